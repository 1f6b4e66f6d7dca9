//! CSV export of trade summaries.

use crate::domain::error::TradeClipperError;
use crate::domain::summary::TradeSummary;
use crate::ports::export_port::ExportPort;
use std::path::Path;
use tracing::info;

pub const EXPORT_HEADER: [&str; 11] = [
    "label",
    "ticker",
    "side",
    "open_time",
    "close_time",
    "shares",
    "open_avg",
    "close_avg",
    "profit",
    "pct_gain",
    "swing",
];

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Default)]
pub struct CsvExportAdapter;

impl CsvExportAdapter {
    pub fn new() -> Self {
        Self
    }

    fn to_record(summary: &TradeSummary) -> [String; 11] {
        [
            summary.label(),
            summary.ticker.clone(),
            summary.side.to_string(),
            summary.open_time.format(TIME_FORMAT).to_string(),
            summary.close_time.format(TIME_FORMAT).to_string(),
            summary.total_shares.to_string(),
            format_price(summary.opening_avg),
            format_price(summary.closing_avg),
            format!("{:.2}", summary.profit),
            format_percent(summary.percent_gain),
            summary.swing.to_string(),
        ]
    }
}

fn format_price(price: Option<f64>) -> String {
    price.map(|p| format!("{:.3}", p)).unwrap_or_default()
}

fn format_percent(gain: Option<f64>) -> String {
    gain.map(|g| format!("{:.2}", g * 100.0)).unwrap_or_default()
}

impl ExportPort for CsvExportAdapter {
    fn export(
        &self,
        summaries: &[TradeSummary],
        output_path: &Path,
    ) -> Result<(), TradeClipperError> {
        let export_err = |reason: String| TradeClipperError::Export {
            path: output_path.display().to_string(),
            reason,
        };

        let mut wtr = csv::Writer::from_path(output_path).map_err(|e| export_err(e.to_string()))?;
        wtr.write_record(EXPORT_HEADER)
            .map_err(|e| export_err(e.to_string()))?;
        for summary in summaries {
            wtr.write_record(Self::to_record(summary))
                .map_err(|e| export_err(e.to_string()))?;
        }
        wtr.flush().map_err(|e| export_err(e.to_string()))?;

        info!(
            trades = summaries.len(),
            path = %output_path.display(),
            "exported trades"
        );
        Ok(())
    }
}
