//! Environment-driven settings.
//!
//! Values come from the process environment, after an optional `.env` file
//! has been loaded by `main`:
//!
//! | Variable        | Default                      |
//! |-----------------|------------------------------|
//! | `AIRPORTS_CSV`  | `airports.csv`               |
//! | `LOG_FILE_PATH` | `logs/airport_explorer.log`  |

pub const DEFAULT_SOURCE: &str = "airports.csv";
pub const DEFAULT_LOG_FILE: &str = "logs/airport_explorer.log";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Local path, `.gz` file, or `http(s)` URL of the airport table.
    pub source: String,
    pub log_file_path: String,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from any key lookup; empty values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            source: get("AIRPORTS_CSV", DEFAULT_SOURCE),
            log_file_path: get("LOG_FILE_PATH", DEFAULT_LOG_FILE),
        }
    }

    /// A `--source` flag wins over the environment.
    pub fn with_source(mut self, source: Option<String>) -> Self {
        if let Some(source) = source {
            self.source = source;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_when_unset() {
        let settings = Settings::from_lookup(|_| None);
        assert_eq!(settings.source, "airports.csv");
        assert_eq!(settings.log_file_path, "logs/airport_explorer.log");
    }

    #[test]
    fn test_values_from_lookup() {
        let env: HashMap<&str, &str> = [
            ("AIRPORTS_CSV", "data/airports.csv.gz"),
            ("LOG_FILE_PATH", ""),
        ]
        .into();
        let settings = Settings::from_lookup(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(settings.source, "data/airports.csv.gz");
        assert_eq!(settings.log_file_path, DEFAULT_LOG_FILE);
    }

    #[test]
    fn test_flag_overrides_env() {
        let settings = Settings::from_lookup(|_| None).with_source(Some("other.csv".into()));
        assert_eq!(settings.source, "other.csv");

        let settings = Settings::from_lookup(|_| None).with_source(None);
        assert_eq!(settings.source, DEFAULT_SOURCE);
    }
}
