//! Domain error types.

/// Top-level error type for tradeclipper.
#[derive(Debug, thiserror::Error)]
pub enum TradeClipperError {
    #[error("statement source unavailable: {path}: {reason}")]
    SourceUnavailable { path: String, reason: String },

    #[error("malformed statement {source_name}: {reason}")]
    StatementFormat { source_name: String, reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("failed to export trades to {path}: {reason}")]
    Export { path: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&TradeClipperError> for std::process::ExitCode {
    fn from(err: &TradeClipperError) -> Self {
        let code: u8 = match err {
            TradeClipperError::Io(_) => 1,
            TradeClipperError::ConfigParse { .. }
            | TradeClipperError::ConfigMissing { .. }
            | TradeClipperError::ConfigInvalid { .. } => 2,
            TradeClipperError::SourceUnavailable { .. } => 3,
            TradeClipperError::StatementFormat { .. } => 4,
            TradeClipperError::Export { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
