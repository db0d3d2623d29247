use anyhow::{Context, Result};
use bus_watch_proximity::ProximityConfig;
use serde::Serialize;
use std::fmt::Display;
use std::path::Path;

/// Print either the human-readable line or the pretty JSON form
pub fn emit<T: Serialize>(json: bool, value: &T, text: impl Display) -> Result<()> {
    if json {
        let rendered = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
        println!("{rendered}");
    } else {
        println!("{text}");
    }
    Ok(())
}

/// Load tunables from a JSON file, or fall back to the defaults
pub fn load_config(path: Option<&Path>) -> Result<ProximityConfig> {
    let Some(path) = path else {
        log::debug!("No config file given, using defaults");
        return Ok(ProximityConfig::default());
    };

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config = parse_config(&content)
        .with_context(|| format!("Invalid config in: {}", path.display()))?;

    log::info!("Config: {}", path.display());
    Ok(config)
}

fn parse_config(content: &str) -> Result<ProximityConfig> {
    let config: ProximityConfig =
        serde_json::from_str(content).context("Failed to parse config JSON")?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = parse_config(r#"{ "average_speed_kmh": 40.0, "update_interval_ms": 2500 }"#)
            .unwrap();

        assert_eq!(config.average_speed_kmh, 40.0);
        assert_eq!(config.update_interval, Duration::from_millis(2500));
        assert_eq!(config.nearest_stop_radius_km, 1.0);
        assert_eq!(config.max_history_points, 100);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        assert!(parse_config(r#"{ "average_speed_kmh": 0.0 }"#).is_err());
        assert!(parse_config(r#"{ "max_history_points": 0 }"#).is_err());
        assert!(parse_config("not json").is_err());
    }

    #[test]
    fn test_missing_path_uses_defaults() {
        assert_eq!(load_config(None).unwrap(), ProximityConfig::default());
    }
}
