//! Shared helpers for CLI commands.

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use lifeplan_core::{calendar, Config, ScheduledEvent};

pub type CliResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// Resolve the configuration path: explicit flag, then the
/// `LIFEPLAN_CONFIG` environment variable, then the default under the
/// user's config directory.
pub fn config_path(explicit: Option<&Path>) -> CliResult<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    if let Some(path) = std::env::var_os("LIFEPLAN_CONFIG") {
        return Ok(PathBuf::from(path));
    }
    let base = dirs::config_dir().ok_or("could not determine the config directory")?;
    Ok(base.join("lifeplan").join("config.toml"))
}

/// Load and validate the configuration.
pub fn load_config(explicit: Option<&Path>) -> CliResult<Config> {
    let path = config_path(explicit)?;
    Ok(Config::load(&path)?)
}

/// Load a JSON event dump, skipping malformed entries.
pub fn load_events(path: &Path) -> CliResult<Vec<ScheduledEvent>> {
    Ok(calendar::events_from_file(path)?)
}

/// Parse a `YYYY-MM-DD` date into a UTC midnight instant, defaulting to now.
pub fn parse_date(date: Option<&str>) -> CliResult<DateTime<Utc>> {
    match date {
        Some(value) => {
            let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .map_err(|e| format!("invalid date '{value}': {e}"))?;
            Ok(date
                .and_hms_opt(0, 0, 0)
                .expect("midnight is a valid time")
                .and_utc())
        }
        None => Ok(Utc::now()),
    }
}
