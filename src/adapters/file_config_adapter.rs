//! INI file configuration adapter.

use crate::domain::error::BotError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

#[derive(Debug)]
pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, BotError> {
        let mut config = Ini::new();
        config.load(&path).map_err(|reason| BotError::ConfigParse {
            file: path.as_ref().display().to_string(),
            reason,
        })?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, BotError> {
        let mut config = Ini::new();
        config
            .read(content.to_string())
            .map_err(|reason| BotError::ConfigParse {
                file: "<inline>".to_string(),
                reason,
            })?;
        Ok(Self { config })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.config
            .getfloat(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.config
            .get(section, key)
            .as_deref()
            .and_then(parse_bool)
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = "\
[trading]
symbols = AAPL, MSFT, SPY
interval_minutes = 5
timezone = America/New_York

[risk]
max_daily_loss_pct = 0.03

[universe]
enabled = yes
";

    #[test]
    fn typed_getters() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(
            adapter.get_string("trading", "timezone"),
            Some("America/New_York".to_string())
        );
        assert_eq!(adapter.get_int("trading", "interval_minutes", 0), 5);
        assert_eq!(adapter.get_double("risk", "max_daily_loss_pct", 0.0), 0.03);
        assert!(adapter.get_bool("universe", "enabled", false));
    }

    #[test]
    fn defaults_for_missing_or_unparseable() {
        let adapter = FileConfigAdapter::from_string("[trading]\ninterval_minutes = soon\n")
            .unwrap();
        assert_eq!(adapter.get_string("trading", "missing"), None);
        assert_eq!(adapter.get_int("trading", "interval_minutes", 7), 7);
        assert_eq!(adapter.get_double("nowhere", "key", 1.25), 1.25);
        assert!(adapter.get_bool("nowhere", "key", true));
    }

    #[test]
    fn bool_spellings() {
        let adapter = FileConfigAdapter::from_string(
            "[a]\nw = on\nx = off\ny = 1\nz = maybe\n",
        )
        .unwrap();
        assert!(adapter.get_bool("a", "w", false));
        assert!(!adapter.get_bool("a", "x", true));
        assert!(adapter.get_bool("a", "y", false));
        // Unparseable falls back to the default.
        assert!(adapter.get_bool("a", "z", true));
        assert!(!adapter.get_bool("a", "z", false));
    }

    #[test]
    fn list_values_split_and_trim() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(
            adapter.get_list("trading", "symbols"),
            vec!["AAPL", "MSFT", "SPY"]
        );
        assert!(adapter.get_list("trading", "missing").is_empty());
    }

    #[test]
    fn from_file_reads_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{SAMPLE}").unwrap();
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(adapter.get_int("trading", "interval_minutes", 0), 5);
    }

    #[test]
    fn from_file_missing_is_config_parse_error() {
        let err = FileConfigAdapter::from_file("/nonexistent/rotortrader.ini").unwrap_err();
        assert!(matches!(err, BotError::ConfigParse { .. }));
    }
}
