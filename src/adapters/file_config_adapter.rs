//! INI file configuration adapter.
//!
//! Blank values read as absent. Typed getters reject values that are present
//! but do not parse.

use crate::domain::error::TradeClipperError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut config = Ini::new();
        config.load(path).map_err(std::io::Error::other)?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }

    fn value(&self, section: &str, key: &str) -> Option<String> {
        self.config
            .get(section, key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}

/// Boolean spellings accepted in config files.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

fn invalid(section: &str, key: &str, reason: String) -> TradeClipperError {
    TradeClipperError::ConfigInvalid {
        section: section.into(),
        key: key.into(),
        reason,
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.value(section, key)
    }

    fn get_int(&self, section: &str, key: &str) -> Result<Option<i64>, TradeClipperError> {
        if self.value(section, key).is_none() {
            return Ok(None);
        }
        self.config
            .getint(section, key)
            .map_err(|e| invalid(section, key, e))
    }

    fn get_bool(&self, section: &str, key: &str) -> Result<Option<bool>, TradeClipperError> {
        match self.value(section, key) {
            None => Ok(None),
            Some(raw) => parse_flag(&raw)
                .map(Some)
                .ok_or_else(|| invalid(section, key, format!("expected a boolean, got {raw:?}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"
[statement]
path = /home/trader/statements

[portfolio]
include_swing = yes

[filter]
year = 2024
month = 2
day =

[export]
output = /tmp/trades.csv
"#;

    #[test]
    fn from_string_parses_sections() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(
            adapter.get_string("statement", "path"),
            Some("/home/trader/statements".to_string())
        );
        assert_eq!(
            adapter.get_string("export", "output"),
            Some("/tmp/trades.csv".to_string())
        );
        assert_eq!(adapter.get_bool("portfolio", "include_swing").unwrap(), Some(true));
        assert_eq!(adapter.get_int("filter", "year").unwrap(), Some(2024));
        assert_eq!(adapter.get_int("filter", "month").unwrap(), Some(2));
    }

    #[test]
    fn missing_and_blank_keys_are_absent() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(adapter.get_string("filter", "day"), None);
        assert_eq!(adapter.get_int("filter", "day").unwrap(), None);
        assert_eq!(adapter.get_string("nope", "day"), None);
        assert_eq!(adapter.get_bool("portfolio", "missing").unwrap(), None);
    }

    #[test]
    fn non_numeric_int_is_invalid() {
        let adapter = FileConfigAdapter::from_string("[filter]\nyear = soon\n").unwrap();
        let err = adapter.get_int("filter", "year").unwrap_err();
        assert!(matches!(
            err,
            TradeClipperError::ConfigInvalid { ref section, ref key, .. }
                if section == "filter" && key == "year"
        ));
    }

    #[test]
    fn bool_spellings() {
        let adapter = FileConfigAdapter::from_string(
            "[portfolio]\na = true\nb = on\nc = 0\nd = No\ne = maybe\n",
        )
        .unwrap();
        assert_eq!(adapter.get_bool("portfolio", "a").unwrap(), Some(true));
        assert_eq!(adapter.get_bool("portfolio", "b").unwrap(), Some(true));
        assert_eq!(adapter.get_bool("portfolio", "c").unwrap(), Some(false));
        assert_eq!(adapter.get_bool("portfolio", "d").unwrap(), Some(false));
        assert!(matches!(
            adapter.get_bool("portfolio", "e"),
            Err(TradeClipperError::ConfigInvalid { .. })
        ));
    }

    #[test]
    fn parse_flag_trims_and_ignores_case() {
        assert_eq!(parse_flag("  YES "), Some(true));
        assert_eq!(parse_flag("Off"), Some(false));
        assert_eq!(parse_flag(""), None);
    }

    #[test]
    fn from_file_reads_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[statement]\npath = ./statements\n").unwrap();
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(
            adapter.get_string("statement", "path"),
            Some("./statements".to_string())
        );
    }

    #[test]
    fn from_file_missing_is_error() {
        assert!(FileConfigAdapter::from_file("/nonexistent/tradeclipper.ini").is_err());
    }
}
