//! Account statement CSV adapter.
//!
//! Reads a single statement export or every `.csv` file in a directory and
//! extracts the rows of the `Account Trade History` section.

use crate::domain::error::TradeClipperError;
use crate::domain::execution::RawExecutionRow;
use crate::ports::statement_port::{Statement, StatementPort};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Line that introduces the trade history section.
pub const TRADE_HISTORY_MARKER: &str = "Account Trade History";

pub struct StatementCsvAdapter {
    path: PathBuf,
}

impl StatementCsvAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn statement_files(&self) -> Result<Vec<PathBuf>, TradeClipperError> {
        let meta = fs::metadata(&self.path).map_err(|e| unavailable(&self.path, &e))?;
        if !meta.is_dir() {
            return Ok(vec![self.path.clone()]);
        }

        let entries = fs::read_dir(&self.path).map_err(|e| unavailable(&self.path, &e))?;
        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| unavailable(&self.path, &e))?;
            let path = entry.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "csv") {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    fn read_statement(&self, path: &Path) -> Result<Statement, TradeClipperError> {
        let content = fs::read_to_string(path).map_err(|e| unavailable(path, &e))?;
        let source = path.display().to_string();
        let rows = parse_statement(&content, &source)?;
        debug!(source = %source, rows = rows.len(), "read statement");
        Ok(Statement { source, rows })
    }
}

impl StatementPort for StatementCsvAdapter {
    fn load_statements(&self) -> Result<Vec<Statement>, TradeClipperError> {
        let files = self.statement_files()?;
        if files.is_empty() {
            warn!(path = %self.path.display(), "no statement files found");
        }
        let statements = files
            .iter()
            .map(|f| self.read_statement(f))
            .collect::<Result<Vec<_>, _>>()?;
        info!(
            statements = statements.len(),
            rows = statements.iter().map(|s| s.rows.len()).sum::<usize>(),
            "loaded statements"
        );
        Ok(statements)
    }
}

fn unavailable(path: &Path, err: &std::io::Error) -> TradeClipperError {
    TradeClipperError::SourceUnavailable {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

/// Slice out the trade history section: it starts two lines after the
/// marker (skipping the column header) and runs to the next blank line.
pub fn trade_history_section(content: &str) -> Option<Vec<&str>> {
    let lines: Vec<&str> = content.lines().collect();
    let marker = lines
        .iter()
        .position(|l| l.trim_end() == TRADE_HISTORY_MARKER)?;
    let start = (marker + 2).min(lines.len());
    Some(
        lines[start..]
            .iter()
            .take_while(|l| !l.trim().is_empty())
            .copied()
            .collect(),
    )
}

/// Parse the trade history section of a statement into raw rows.
pub fn parse_statement(content: &str, source: &str) -> Result<Vec<RawExecutionRow>, TradeClipperError> {
    let Some(section) = trade_history_section(content) else {
        warn!(source = %source, "statement has no trade history section");
        return Ok(Vec::new());
    };

    let joined = section.join("\n");
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(joined.as_bytes());

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(|e| TradeClipperError::StatementFormat {
            source_name: source.to_string(),
            reason: format!("CSV parse error: {}", e),
        })?;
        let field = |i: usize| record.get(i).unwrap_or("").to_string();
        rows.push(RawExecutionRow {
            exec_time: field(1),
            spread: field(2),
            side: field(3),
            quantity: field(4),
            position_effect: field(5),
            symbol: field(6),
            expiration: field(7),
            strike: field(8),
            instrument_type: field(9),
            price: field(10),
            net_price: field(11),
            order_type: field(12),
        });
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const STATEMENT: &str = "\
This document was exported from the paperMoney platform.

Account Statement for D-12345678 since 1/2/24 through 1/3/24

Cash Balance
DATE,TIME,TYPE,REF #,DESCRIPTION,Misc Fees,Commissions & Fees,AMOUNT,BALANCE
1/2/24,00:00:00,BAL,,Cash balance at the start of business day,,,,\"100,000.00\"

Account Trade History
,Exec Time,Spread,Side,Qty,Pos Effect,Symbol,Exp,Strike,Type,Price,Net Price,Order Type
,1/2/24 09:31:02,STOCK,BUY,+100,TO OPEN,AMD,,,STOCK,140.10,140.10,LMT
,1/2/24 09:48:40,STOCK,SELL,-100,TO CLOSE,AMD,,,STOCK,141.25,141.25,LMT
,1/2/24 10:02:11,SINGLE,BUY,+1,TO OPEN,SPY,19 JAN 24,475,CALL,2.10,2.10,LMT

Profits and Losses
Symbol,Description,P/L Open,P/L %,P/L Day,P/L YTD,P/L Diff,Margin Req,Mark Value
";

    #[test]
    fn section_bounds() {
        let section = trade_history_section(STATEMENT).unwrap();
        assert_eq!(section.len(), 3);
        assert!(section[0].contains("AMD"));
        assert!(section[2].contains("SPY"));
    }

    #[test]
    fn section_missing_marker() {
        assert!(trade_history_section("a,b,c\n1,2,3\n").is_none());
        assert!(parse_statement("a,b,c\n", "x.csv").unwrap().is_empty());
    }

    #[test]
    fn section_runs_to_end_without_blank_line() {
        let content = "Account Trade History\nheader\n,1/2/24 09:31:02,STOCK,BUY,+100";
        let section = trade_history_section(content).unwrap();
        assert_eq!(section.len(), 1);
    }

    #[test]
    fn parse_statement_maps_columns() {
        let rows = parse_statement(STATEMENT, "test.csv").unwrap();
        assert_eq!(rows.len(), 3);
        let first = &rows[0];
        assert_eq!(first.exec_time, "1/2/24 09:31:02");
        assert_eq!(first.spread, "STOCK");
        assert_eq!(first.side, "BUY");
        assert_eq!(first.quantity, "+100");
        assert_eq!(first.position_effect, "TO OPEN");
        assert_eq!(first.symbol, "AMD");
        assert_eq!(first.strike, "");
        assert_eq!(first.price, "140.10");
        assert_eq!(first.net_price, "140.10");
        assert_eq!(first.order_type, "LMT");
        assert_eq!(rows[2].strike, "475");
    }

    #[test]
    fn short_rows_pad_missing_columns() {
        let content = "Account Trade History\nheader\n,1/2/24 09:31:02,STOCK,BUY\n";
        let rows = parse_statement(content, "short.csv").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].side, "BUY");
        assert_eq!(rows[0].quantity, "");
        assert_eq!(rows[0].order_type, "");
    }

    #[test]
    fn load_single_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("2024-01-02-AccountStatement.csv");
        fs::write(&path, STATEMENT).unwrap();

        let statements = StatementCsvAdapter::new(path).load_statements().unwrap();
        assert_eq!(statements.len(), 1);
        assert_eq!(statements[0].rows.len(), 3);
    }

    #[test]
    fn load_directory_reads_csv_files_in_name_order() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.csv"), STATEMENT).unwrap();
        fs::write(dir.path().join("a.csv"), STATEMENT).unwrap();
        fs::write(dir.path().join("recording.mkv"), "not a statement").unwrap();

        let statements = StatementCsvAdapter::new(dir.path().to_path_buf())
            .load_statements()
            .unwrap();
        assert_eq!(statements.len(), 2);
        assert!(statements[0].source.ends_with("a.csv"));
        assert!(statements[1].source.ends_with("b.csv"));
    }

    #[test]
    fn missing_path_is_source_unavailable() {
        let adapter = StatementCsvAdapter::new(PathBuf::from("/nonexistent/statements"));
        let err = adapter.load_statements().unwrap_err();
        assert!(matches!(err, TradeClipperError::SourceUnavailable { .. }));
    }
}
