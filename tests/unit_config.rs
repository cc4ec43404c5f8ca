use std::fs;
use std::path::PathBuf;

use chrono::Weekday;
use taskdeck::Config;

#[test]
fn config_defaults_when_missing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = Config::load_from_dir(dir.path());

    assert!(config.data_dir.is_none());
    assert_eq!(config.week_start, "sunday");
    assert_eq!(config.week_start_day(), Weekday::Sun);
    assert!(config.seed_sample_tasks);
}

#[test]
fn config_overrides_from_toml() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let config_path = dir.path().join("taskdeck.toml");
    let toml = r#"
data_dir = "/var/lib/taskdeck"
week_start = "monday"
seed_sample_tasks = false
"#;

    fs::write(&config_path, toml)?;

    let config = Config::load_from_dir(dir.path());

    assert_eq!(config.data_dir, Some(PathBuf::from("/var/lib/taskdeck")));
    assert_eq!(config.week_start_day(), Weekday::Mon);
    assert!(!config.seed_sample_tasks);
    assert_eq!(config.data_root(), PathBuf::from("/var/lib/taskdeck"));

    Ok(())
}

#[test]
fn invalid_config_falls_back_to_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("taskdeck.toml"), "week_start = [nonsense").expect("write");

    let config = Config::load_from_dir(dir.path());
    assert_eq!(config.week_start, "sunday");
}

#[test]
fn unknown_week_start_defaults_to_sunday() {
    let config = Config {
        week_start: "caturday".to_string(),
        ..Config::default()
    };
    assert_eq!(config.week_start_day(), Weekday::Sun);
}

#[test]
fn config_round_trips_through_save() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("taskdeck.toml");

    let config = Config {
        data_dir: Some(dir.path().join("data")),
        week_start: "monday".to_string(),
        seed_sample_tasks: false,
    };
    config.save(&path)?;

    let loaded = Config::load(&path)?;
    assert_eq!(loaded.week_start, "monday");
    assert!(!loaded.seed_sample_tasks);
    Ok(())
}
