use super::*;

use std::{
    collections::HashMap,
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn temp_settings_file(name: &str, contents: &str) -> std::path::PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let dir = env::temp_dir().join(format!("scoreboard_config_test_{name}_{suffix}"));
    fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join("scoreboard.toml");
    fs::write(&path, contents).expect("write settings");
    path
}

#[test]
fn defaults_tick_once_per_second() {
    let settings = Settings::default();
    assert_eq!(settings.tick_millis, 1000);
    assert_eq!(settings.session_options().tick_period, Duration::from_secs(1));
    assert_eq!(settings.log_filter, "info");
}

fn table(raw: &str) -> toml::Table {
    toml::from_str(raw).expect("toml")
}

#[test]
fn file_values_override_defaults() {
    let path = temp_settings_file(
        "override",
        "log_filter = \"match_core=debug\"\ntick_millis = 250\nevent_capacity = 8\n",
    );

    let loaded = load_settings(&path).expect("settings");
    assert_eq!(loaded.settings.tick_millis, 250);
    assert_eq!(loaded.settings.event_capacity, 8);
    assert!(loaded.warnings.is_empty());

    let mut settings = Settings::default();
    let mut warnings = Vec::new();
    apply_file(&mut settings, table(&fs::read_to_string(&path).expect("read")), &mut warnings);
    assert_eq!(settings.log_filter, "match_core=debug");
    assert_eq!(settings.command_queue_capacity, 64);

    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn zero_and_negative_values_in_file_keep_defaults() {
    let mut settings = Settings::default();
    let mut warnings = Vec::new();
    apply_file(
        &mut settings,
        table("tick_millis = 0\ncommand_queue_capacity = -4\n"),
        &mut warnings,
    );
    assert_eq!(settings, Settings::default());
    assert_eq!(warnings.len(), 2);
}

#[test]
fn missing_file_yields_defaults_before_env() {
    let path = env::temp_dir().join("scoreboard_config_test_missing/none.toml");
    let loaded = load_settings(&path).expect("settings");
    assert!(loaded.settings.tick_millis > 0);
    assert!(loaded.settings.command_queue_capacity > 0);
    assert!(loaded.warnings.is_empty());
}

#[test]
fn wrongly_typed_value_keeps_default_and_applies_the_rest() {
    let path = temp_settings_file("wrong_type", "tick_millis = \"fast\"\nevent_capacity = 16\n");

    let loaded = load_settings(&path).expect("wrong type falls back");
    assert_eq!(loaded.settings.event_capacity, 16);
    assert_eq!(loaded.warnings.len(), 1);
    assert!(loaded.warnings[0].contains("tick_millis"));

    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn malformed_file_keeps_defaults() {
    let path = temp_settings_file("malformed", "tick_millis = = 5\n[[[\n");

    let loaded = load_settings(&path).expect("malformed file falls back");
    assert_eq!(loaded.warnings.len(), 1);
    assert!(loaded.warnings[0].contains("ignoring invalid settings file"));
    assert!(loaded.settings.tick_millis > 0);

    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn unknown_keys_are_reported() {
    let mut settings = Settings::default();
    let mut warnings = Vec::new();
    apply_file(&mut settings, table("match_minutes = 30\n"), &mut warnings);
    assert_eq!(settings, Settings::default());
    assert_eq!(warnings, vec!["ignoring settings value match_minutes = 30".to_string()]);
}

#[test]
fn env_overrides_apply_and_bad_values_are_ignored() {
    let vars: HashMap<&str, &str> = HashMap::from([
        ("SCOREBOARD_LOG", "warn"),
        ("APP__TICK_MILLIS", "100"),
        ("APP__COMMAND_QUEUE_CAPACITY", "not-a-number"),
        ("APP__EVENT_CAPACITY", "0"),
    ]);

    let mut settings = Settings::default();
    apply_env(&mut settings, |key| vars.get(key).map(|v| v.to_string()));

    assert_eq!(settings.log_filter, "warn");
    assert_eq!(settings.tick_millis, 100);
    assert_eq!(settings.command_queue_capacity, 64);
    assert_eq!(settings.event_capacity, 64);
}

#[test]
fn app_prefixed_log_filter_wins_over_short_name() {
    let vars: HashMap<&str, &str> =
        HashMap::from([("SCOREBOARD_LOG", "warn"), ("APP__LOG_FILTER", "trace")]);

    let mut settings = Settings::default();
    apply_env(&mut settings, |key| vars.get(key).map(|v| v.to_string()));
    assert_eq!(settings.log_filter, "trace");
}
