pub mod karwatzki;
pub mod strahl;

pub use karwatzki::Karwatzki;
pub use strahl::Strahl;
