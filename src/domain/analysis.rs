//! Resolved run parameters.
//!
//! Built from an optional config file with command-line overrides layered on
//! top.

use std::path::PathBuf;

use super::error::TradeClipperError;
use super::portfolio::DateFilter;
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_EXPORT_PATH: &str = "trades.csv";

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub statement_path: PathBuf,
    pub include_swing: bool,
    pub filter: DateFilter,
    pub export_path: PathBuf,
}

/// Values given on the command line; `None` defers to the config file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub statement_path: Option<PathBuf>,
    pub include_swing: Option<bool>,
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
    pub export_path: Option<PathBuf>,
}

impl AnalysisConfig {
    pub fn resolve(
        config: Option<&dyn ConfigPort>,
        overrides: &Overrides,
    ) -> Result<AnalysisConfig, TradeClipperError> {
        let statement_path = match &overrides.statement_path {
            Some(path) => path.clone(),
            None => config
                .and_then(|c| c.get_string("statement", "path"))
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from)
                .ok_or_else(|| TradeClipperError::ConfigMissing {
                    section: "statement".into(),
                    key: "path".into(),
                })?,
        };

        let include_swing = match overrides.include_swing {
            Some(flag) => flag,
            None => match config {
                Some(c) => c.get_bool("portfolio", "include_swing")?.unwrap_or(false),
                None => false,
            },
        };

        let filter = DateFilter {
            year: match overrides.year {
                Some(year) => Some(year),
                None => filter_key(config, "year")?,
            },
            month: match overrides.month {
                Some(month) => Some(month),
                None => filter_key(config, "month")?,
            },
            day: match overrides.day {
                Some(day) => Some(day),
                None => filter_key(config, "day")?,
            },
        };
        validate_filter(&filter)?;

        let export_path = overrides
            .export_path
            .clone()
            .or_else(|| config.and_then(|c| c.get_string("export", "output")).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_PATH));

        Ok(AnalysisConfig {
            statement_path,
            include_swing,
            filter,
            export_path,
        })
    }
}

/// Read a `[filter]` integer, rejecting values that do not fit the field.
fn filter_key<T: TryFrom<i64>>(
    config: Option<&dyn ConfigPort>,
    key: &str,
) -> Result<Option<T>, TradeClipperError> {
    let Some(value) = config.map(|c| c.get_int("filter", key)).transpose()?.flatten() else {
        return Ok(None);
    };
    T::try_from(value)
        .map(Some)
        .map_err(|_| invalid_filter(key, &format!("{value} is out of range")))
}

pub fn validate_filter(filter: &DateFilter) -> Result<(), TradeClipperError> {
    if let Some(year) = filter.year {
        if !(1970..=9999).contains(&year) {
            return Err(invalid_filter("year", "year must be between 1970 and 9999"));
        }
    }
    if let Some(month) = filter.month {
        if !(1..=12).contains(&month) {
            return Err(invalid_filter("month", "month must be between 1 and 12"));
        }
    }
    if let Some(day) = filter.day {
        if !(1..=31).contains(&day) {
            return Err(invalid_filter("day", "day must be between 1 and 31"));
        }
    }
    Ok(())
}

fn invalid_filter(key: &str, reason: &str) -> TradeClipperError {
    TradeClipperError::ConfigInvalid {
        section: "filter".into(),
        key: key.into(),
        reason: reason.into(),
    }
}
