use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use crate::constants::*;

/// Application configuration with sensible defaults.
///
/// Can be overridden via ~/.config/policy-history/config.toml
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Theme name (built-in)
    pub theme: String,
    /// UI language (en, de)
    pub lang: String,
    /// chrono format string for the date column
    pub date_format: String,
    /// Seconds before an in-flight alert fetch is abandoned
    pub fetch_timeout_secs: u64,
    /// Alerts the store returns for the default window
    pub default_recent_limit: usize,
    /// Alert database location
    pub db_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "default".to_string(),
            lang: "en".to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            default_recent_limit: DEFAULT_RECENT_LIMIT,
            db_path: default_db_path(),
        }
    }
}

/// TOML-deserializable config file format.
/// All fields are optional, missing fields use defaults.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct FileConfig {
    theme: Option<String>,
    lang: Option<String>,
    date_format: Option<String>,
    fetch_timeout_secs: Option<u64>,
    default_recent_limit: Option<usize>,
    db_path: Option<PathBuf>,
}

impl Config {
    /// Load config from ~/.config/policy-history/config.toml, falling back to
    /// defaults for any missing fields.
    pub fn load() -> Self {
        Self::load_from(&config_file_path())
    }

    /// Load config from `path`. A missing or unparsable file yields pure defaults.
    pub fn load_from(path: &Path) -> Self {
        let config = Config::default();

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => return config, // No config file, use defaults
        };

        match toml::from_str::<FileConfig>(&content) {
            Ok(file_config) => config.merge(file_config),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to parse config, using defaults");
                config
            }
        }
    }

    /// Merge file values over defaults
    fn merge(mut self, file_config: FileConfig) -> Self {
        if let Some(v) = file_config.theme {
            if !v.is_empty() {
                self.theme = v;
            }
        }
        if let Some(v) = file_config.lang {
            if LANGUAGES.contains(&v.as_str()) {
                self.lang = v;
            } else {
                warn!(lang = %v, "unsupported language in config, keeping default");
            }
        }
        if let Some(v) = file_config.date_format {
            if !v.is_empty() {
                self.date_format = v;
            }
        }
        if let Some(v) = file_config.fetch_timeout_secs {
            self.fetch_timeout_secs = v.max(MIN_FETCH_TIMEOUT_SECS);
        }
        if let Some(v) = file_config.default_recent_limit {
            self.default_recent_limit = v.clamp(1, MAX_RECENT_LIMIT);
        }
        if let Some(v) = file_config.db_path {
            if !v.as_os_str().is_empty() {
                self.db_path = v;
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn load_str(toml: &str) -> Config {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(toml.as_bytes()).unwrap();
        Config::load_from(file.path())
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.toml"));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn malformed_file_gives_defaults() {
        let config = load_str("theme = [");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn partial_file_overrides_only_named_fields() {
        let config = load_str("theme = \"nord\"\ndate_format = \"%H:%M\"\n");
        assert_eq!(config.theme, "nord");
        assert_eq!(config.date_format, "%H:%M");
        assert_eq!(config.lang, "en");
        assert_eq!(config.fetch_timeout_secs, DEFAULT_FETCH_TIMEOUT_SECS);
    }

    #[test]
    fn numeric_values_are_clamped() {
        let config = load_str("fetch_timeout_secs = 0\ndefault_recent_limit = 50000\n");
        assert_eq!(config.fetch_timeout_secs, MIN_FETCH_TIMEOUT_SECS);
        assert_eq!(config.default_recent_limit, MAX_RECENT_LIMIT);

        let config = load_str("default_recent_limit = 0\n");
        assert_eq!(config.default_recent_limit, 1);
    }

    #[test]
    fn unknown_language_is_ignored() {
        let config = load_str("lang = \"tlh\"\n");
        assert_eq!(config.lang, "en");
        let config = load_str("lang = \"de\"\n");
        assert_eq!(config.lang, "de");
    }

    #[test]
    fn empty_strings_keep_defaults() {
        let config = load_str("theme = \"\"\ndb_path = \"\"\n");
        assert_eq!(config.theme, "default");
        assert_eq!(config.db_path, default_db_path());
    }

    #[test]
    fn db_path_override() {
        let config = load_str("db_path = \"/tmp/alerts.db\"\n");
        assert_eq!(config.db_path, PathBuf::from("/tmp/alerts.db"));
    }
}
