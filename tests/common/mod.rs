#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use std::io::Write;
use tradeclipper::domain::error::TradeClipperError;
use tradeclipper::domain::execution::RawExecutionRow;
use tradeclipper::ports::statement_port::{Statement, StatementPort};

pub struct MockStatementPort {
    pub statements: Vec<Statement>,
    pub error: Option<String>,
}

impl MockStatementPort {
    pub fn new() -> Self {
        Self {
            statements: Vec::new(),
            error: None,
        }
    }

    pub fn with_rows(mut self, source: &str, rows: Vec<RawExecutionRow>) -> Self {
        self.statements.push(Statement {
            source: source.to_string(),
            rows,
        });
        self
    }

    pub fn with_error(mut self, reason: &str) -> Self {
        self.error = Some(reason.to_string());
        self
    }
}

impl StatementPort for MockStatementPort {
    fn load_statements(&self) -> Result<Vec<Statement>, TradeClipperError> {
        if let Some(reason) = &self.error {
            return Err(TradeClipperError::SourceUnavailable {
                path: "mock".into(),
                reason: reason.clone(),
            });
        }
        Ok(self.statements.clone())
    }
}

/// A stock row in statement form. Positive quantity buys, negative sells.
pub fn make_row(time: &str, symbol: &str, qty: i64, effect: &str, price: f64) -> RawExecutionRow {
    RawExecutionRow {
        exec_time: time.to_string(),
        spread: "STOCK".into(),
        side: if qty > 0 { "BUY" } else { "SELL" }.into(),
        quantity: format!("{:+}", qty),
        position_effect: effect.to_string(),
        symbol: symbol.to_string(),
        expiration: String::new(),
        strike: String::new(),
        instrument_type: "STOCK".into(),
        price: format!("{:.2}", price),
        net_price: format!("{:.2}", price),
        order_type: "LMT".into(),
    }
}

pub fn open_row(time: &str, symbol: &str, qty: i64, price: f64) -> RawExecutionRow {
    make_row(time, symbol, qty, "TO OPEN", price)
}

pub fn close_row(time: &str, symbol: &str, qty: i64, price: f64) -> RawExecutionRow {
    make_row(time, symbol, qty, "TO CLOSE", price)
}

pub fn option_row(time: &str, symbol: &str, strike: &str) -> RawExecutionRow {
    RawExecutionRow {
        spread: "SINGLE".into(),
        expiration: "19 JAN 24".into(),
        strike: strike.to_string(),
        instrument_type: "CALL".into(),
        ..open_row(time, symbol, 1, 2.5)
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn datetime(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(h, min, s).unwrap()
}

/// Render rows as a brokerage statement export.
pub fn statement_text(rows: &[RawExecutionRow]) -> String {
    let mut out = String::from(
        "This document was exported from the thinkorswim platform.\n\
         \n\
         Account Statement for 12345678 (individual)\n\
         \n\
         Account Trade History\n\
         ,Exec Time,Spread,Side,Qty,Pos Effect,Symbol,Exp,Strike,Type,Price,Net Price,Order Type\n",
    );
    for r in rows {
        out.push_str(&format!(
            ",{},{},{},{},{},{},{},{},{},{},{},{}\n",
            r.exec_time,
            r.spread,
            r.side,
            r.quantity,
            r.position_effect,
            r.symbol,
            r.expiration,
            r.strike,
            r.instrument_type,
            r.price,
            r.net_price,
            r.order_type
        ));
    }
    out.push_str("\nProfits and Losses\nSymbol,Description,P/L Open\n");
    out
}

pub fn write_temp_file(content: &str, suffix: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
