use super::Settings;

#[test]
fn defaults_are_valid() {
    assert!(Settings::default().validate().is_ok());
}

#[test]
fn partial_yaml_falls_back_to_defaults() {
    let settings: Settings = serde_yaml::from_str("radius: 40\nwindow: 5\n").expect("yaml");
    assert_eq!(settings.radius, 40.0);
    assert_eq!(settings.window, 5);
    assert_eq!(settings.density_dims, [40, 40]);
    assert_eq!(settings.data_suffix, "_data.csv");
}

#[test]
fn rejects_non_positive_parameters() {
    let zero_radius = Settings {
        radius: 0.0,
        ..Settings::default()
    };
    assert!(zero_radius.validate().is_err());

    let nan_radius = Settings {
        radius: f64::NAN,
        ..Settings::default()
    };
    assert!(nan_radius.validate().is_err());

    let zero_window = Settings {
        window: 0,
        ..Settings::default()
    };
    let message = zero_window.validate().expect_err("window").to_string();
    assert!(message.contains("window"));

    let flat_grid = Settings {
        density_dims: [1, 40],
        ..Settings::default()
    };
    assert!(flat_grid.validate().is_err());
}
