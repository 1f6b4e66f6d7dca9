//! Trade export port trait.

use std::path::Path;

use crate::domain::error::TradeClipperError;
use crate::domain::summary::TradeSummary;

/// Port for handing trade summaries to downstream tooling.
pub trait ExportPort {
    fn export(&self, summaries: &[TradeSummary], output_path: &Path)
    -> Result<(), TradeClipperError>;
}
