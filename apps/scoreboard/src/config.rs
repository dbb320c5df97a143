use std::{fs, io, path::Path, time::Duration};

use anyhow::Context;
use match_core::SessionOptions;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub log_filter: String,
    pub tick_millis: u64,
    pub command_queue_capacity: usize,
    pub event_capacity: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_filter: "info".into(),
            tick_millis: 1000,
            command_queue_capacity: 64,
            event_capacity: 64,
        }
    }
}

impl Settings {
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            tick_period: Duration::from_millis(self.tick_millis),
            command_capacity: self.command_queue_capacity,
            event_capacity: self.event_capacity,
        }
    }
}

/// Settings plus the reasons any configured value was skipped.
///
/// Tracing is not running yet while settings load, so skipped values are reported
/// back for the caller to log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedSettings {
    pub settings: Settings,
    pub warnings: Vec<String>,
}

/// Defaults, then the TOML file at `path` if present, then environment overrides.
///
/// A malformed file or a key with the wrong type keeps the default for that value.
pub fn load_settings(path: &Path) -> anyhow::Result<LoadedSettings> {
    let mut settings = Settings::default();
    let mut warnings = Vec::new();

    match fs::read_to_string(path) {
        Ok(raw) => match toml::from_str::<toml::Table>(&raw) {
            Ok(table) => apply_file(&mut settings, table, &mut warnings),
            Err(err) => warnings.push(format!(
                "ignoring invalid settings file '{}': {err}",
                path.display()
            )),
        },
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read settings file '{}'", path.display()));
        }
    }

    apply_env(&mut settings, |key| std::env::var(key).ok());
    Ok(LoadedSettings { settings, warnings })
}

fn apply_file(settings: &mut Settings, table: toml::Table, warnings: &mut Vec<String>) {
    for (key, value) in table {
        let applied = match (key.as_str(), &value) {
            ("log_filter", toml::Value::String(v)) => {
                settings.log_filter = v.clone();
                true
            }
            ("tick_millis", toml::Value::Integer(v)) => {
                set_positive(&mut settings.tick_millis, *v)
            }
            ("command_queue_capacity", toml::Value::Integer(v)) => {
                set_positive(&mut settings.command_queue_capacity, *v)
            }
            ("event_capacity", toml::Value::Integer(v)) => {
                set_positive(&mut settings.event_capacity, *v)
            }
            _ => false,
        };
        if !applied {
            warnings.push(format!("ignoring settings value {key} = {value}"));
        }
    }
}

fn set_positive<T>(slot: &mut T, raw: i64) -> bool
where
    T: TryFrom<i64> + PartialOrd + Default,
{
    match T::try_from(raw) {
        Ok(v) if v > T::default() => {
            *slot = v;
            true
        }
        _ => false,
    }
}

fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("SCOREBOARD_LOG") {
        settings.log_filter = v;
    }
    if let Some(v) = lookup("APP__LOG_FILTER") {
        settings.log_filter = v;
    }

    if let Some(v) = lookup("APP__TICK_MILLIS") {
        if let Some(parsed) = parse_positive::<u64>(&v) {
            settings.tick_millis = parsed;
        }
    }
    if let Some(v) = lookup("APP__COMMAND_QUEUE_CAPACITY") {
        if let Some(parsed) = parse_positive::<usize>(&v) {
            settings.command_queue_capacity = parsed;
        }
    }
    if let Some(v) = lookup("APP__EVENT_CAPACITY") {
        if let Some(parsed) = parse_positive::<usize>(&v) {
            settings.event_capacity = parsed;
        }
    }
}

fn parse_positive<T>(raw: &str) -> Option<T>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    raw.trim().parse::<T>().ok().filter(|v| *v > T::default())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
