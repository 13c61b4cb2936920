use clap::Parser;
use shunt_io::cli::{run_monte_carlo_command, run_nominal_command, Cli, Commands};

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => {
            run_monte_carlo_command(&args)?;
        }
        Commands::Nominal(args) => {
            run_nominal_command(&args)?;
        }
    }

    Ok(())
}
