//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use foilcard::config::AppConfig;
use serial_test::serial;

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("FOIL_WINDOW__TITLE", "Test From Env");
    let config = AppConfig::load().unwrap();
    assert_eq!(config.window.title, "Test From Env");
    std::env::remove_var("FOIL_WINDOW__TITLE");
}

#[test]
#[serial]
fn test_env_override_nested_number() {
    std::env::set_var("FOIL_TILT__RELEASE_STEPS", "12");
    let config = AppConfig::load().unwrap();
    std::env::remove_var("FOIL_TILT__RELEASE_STEPS");

    assert_eq!(config.tilt.release_steps, 12);
    assert_eq!(config.tilt.to_tilt_settings().release_steps, 12);
}

#[test]
#[serial]
fn test_default_file_loading() {
    std::env::remove_var("FOIL_WINDOW__TITLE");

    let cwd = std::env::current_dir().unwrap();
    assert!(cwd.join("config/default.toml").exists());

    let config = AppConfig::load().unwrap();
    assert_eq!(config.tilt.sensitivity, 0.01);
    assert_eq!(config.camera.fov, 50.0);
    assert_eq!(config.card.foil, "assets/foil.jpg");
}

#[test]
#[serial]
fn test_user_file_overrides_default() {
    let dir = std::env::temp_dir().join(format!("foilcard_config_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("default.toml"), "[window]\ntitle = \"Base\"\nwidth = 640\n").unwrap();
    std::fs::write(dir.join("user.toml"), "[window]\ntitle = \"Mine\"\n").unwrap();

    let config = AppConfig::load_from(&dir).unwrap();
    assert_eq!(config.window.title, "Mine");
    assert_eq!(config.window.width, 640);
    assert_eq!(config.window.height, 720);

    let _ = std::fs::remove_dir_all(&dir);
}
