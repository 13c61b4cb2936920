use approx::assert_relative_eq;
use shunt_core::{BrakeMode, Scenario, ScenarioError, WagonColumns};

const SCENARIO_JSON: &str = r#"{
    "initial_speed": 6.944444444444445,
    "locomotive": {
        "mass": 53000.0,
        "brake_force": 45580.0,
        "length": 10.5,
        "fill_time": 24.0,
        "brake_mode": "G"
    },
    "wagons": [
        {
            "mass": 90000.0,
            "rotating_mass_factor": 1.04,
            "fill_time": 24.0,
            "brake_mode": "G",
            "cylinder_diameter": 0.406,
            "cylinder_pressure": 380000.0,
            "length": 14.0,
            "brake_rigging": 5.65,
            "brake_blocks": 16,
            "friction_efficiency": 0.83,
            "friction_correction": 1.0
        },
        {
            "mass": 20000.0,
            "rotating_mass_factor": 1.1,
            "fill_time": 4.0,
            "brake_mode": "P",
            "cylinder_diameter": 0.356,
            "cylinder_pressure": 380000.0,
            "length": 12.0,
            "brake_rigging": 6.0,
            "brake_blocks": 8,
            "friction_efficiency": 0.83,
            "friction_correction": 1.0
        }
    ]
}"#;

#[test]
fn scenario_from_json() {
    let scenario: Scenario = serde_json::from_str(SCENARIO_JSON).unwrap();
    assert!(scenario.validate().is_ok());
    assert_eq!(scenario.n_wagons(), 2);
    assert_eq!(scenario.wagons[1].brake_mode, BrakeMode::P);
    assert_relative_eq!(scenario.wagon_mass(), 110_000.0);
    assert_relative_eq!(scenario.dynamic_mass(), 53_000.0 + 93_600.0 + 22_000.0, max_relative = 1e-12);
    assert_relative_eq!(scenario.train_length(), 36.5);
}

#[test]
fn columns_rebuild_the_same_wagons() {
    let scenario: Scenario = serde_json::from_str(SCENARIO_JSON).unwrap();
    let columns = WagonColumns::from(scenario.wagons.as_slice());
    assert_eq!(columns.len(), 2);

    let rebuilt =
        Scenario::from_columns(scenario.initial_speed, scenario.locomotive.clone(), columns).unwrap();
    assert_eq!(rebuilt, scenario);
}

#[test]
fn short_column_is_reported() {
    let scenario: Scenario = serde_json::from_str(SCENARIO_JSON).unwrap();
    let mut columns = WagonColumns::from(scenario.wagons.as_slice());
    columns.brake_blocks.pop();

    let err = Scenario::from_columns(scenario.initial_speed, scenario.locomotive, columns).unwrap_err();
    assert_eq!(
        err,
        ScenarioError::ColumnLengthMismatch { field: "brake_blocks", expected: 2, found: 1 }
    );
}

#[test]
fn invalid_wagon_is_named() {
    let mut scenario: Scenario = serde_json::from_str(SCENARIO_JSON).unwrap();
    scenario.wagons[1].cylinder_pressure = f64::NAN;
    match scenario.validate() {
        Err(ScenarioError::NonFinite { field }) => assert_eq!(field, "wagons[1].cylinder_pressure"),
        other => panic!("unexpected {:?}", other),
    }

    scenario.wagons[1].cylinder_pressure = 3.8e5;
    scenario.wagons[0].brake_blocks = 0;
    assert_eq!(scenario.validate(), Err(ScenarioError::NoBrakeBlocks { wagon: 0 }));
}

#[test]
fn unknown_brake_mode_rejected() {
    let json = SCENARIO_JSON.replacen("\"brake_mode\": \"G\"", "\"brake_mode\": \"R\"", 1);
    assert!(serde_json::from_str::<Scenario>(&json).is_err());
}
