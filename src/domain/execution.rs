//! Brokerage executions (fills) and statement row parsing.
//!
//! Field-level parsing is lenient: a malformed timestamp becomes the zero
//! time and malformed numbers become zero. Only rows that cannot take part in
//! reconstruction (option legs, zero quantity) are dropped.

use chrono::NaiveDateTime;
use tracing::debug;

/// Statement timestamp layout: two-digit year, 24-hour clock.
pub const TIMESTAMP_FORMAT: &str = "%m/%d/%y %H:%M:%S";

/// Position-effect token that marks an opening fill.
pub const OPENING_TOKEN: &str = "TO OPEN";

/// Position effect recorded by the broker for a fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionEffect {
    Opening,
    Closing,
}

impl PositionEffect {
    /// Only the literal opening token is `Opening`; everything else closes.
    pub fn parse(token: &str) -> Self {
        if token == OPENING_TOKEN {
            PositionEffect::Opening
        } else {
            PositionEffect::Closing
        }
    }
}

/// One statement row, as positional text fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawExecutionRow {
    pub exec_time: String,
    pub spread: String,
    pub side: String,
    pub quantity: String,
    pub position_effect: String,
    pub symbol: String,
    pub expiration: String,
    pub strike: String,
    pub instrument_type: String,
    pub price: String,
    pub net_price: String,
    pub order_type: String,
}

/// A single fill. Quantity is signed: positive buys, negative sells.
#[derive(Debug, Clone, PartialEq)]
pub struct Execution {
    pub time: NaiveDateTime,
    pub symbol: String,
    pub quantity: i64,
    pub price: f64,
    pub net_price: f64,
    pub effect: PositionEffect,
    pub spread: String,
    pub side: String,
    pub expiration: String,
    pub strike: String,
    pub instrument_type: String,
    pub order_type: String,
}

impl Execution {
    /// Build an execution from a statement row.
    ///
    /// Returns `None` for option legs (non-empty strike) and for rows whose
    /// quantity is zero or unparseable.
    pub fn from_row(row: &RawExecutionRow) -> Option<Execution> {
        if !row.strike.trim().is_empty() {
            debug!(symbol = %row.symbol, strike = %row.strike, "dropping option leg");
            return None;
        }

        let quantity = parse_quantity(&row.quantity);
        if quantity == 0 {
            debug!(symbol = %row.symbol, raw = %row.quantity, "dropping zero-quantity row");
            return None;
        }

        Some(Execution {
            time: parse_timestamp(&row.exec_time),
            symbol: row.symbol.clone(),
            quantity,
            price: parse_price(&row.price),
            net_price: parse_price(&row.net_price),
            effect: PositionEffect::parse(&row.position_effect),
            spread: row.spread.clone(),
            side: row.side.clone(),
            expiration: row.expiration.clone(),
            strike: row.strike.clone(),
            instrument_type: row.instrument_type.clone(),
            order_type: row.order_type.clone(),
        })
    }

    pub fn is_opening(&self) -> bool {
        self.effect == PositionEffect::Opening
    }

    /// Unsigned traded value, |quantity × price|.
    pub fn notional(&self) -> f64 {
        (self.quantity as f64 * self.price).abs()
    }
}

/// Parse a statement timestamp, falling back to the zero time.
pub fn parse_timestamp(value: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(value.trim(), TIMESTAMP_FORMAT).unwrap_or_default()
}

fn parse_quantity(value: &str) -> i64 {
    value.trim().parse().unwrap_or(0)
}

fn parse_price(value: &str) -> f64 {
    value.trim().parse().unwrap_or(0.0)
}

/// Convert statement rows into executions ordered by time.
///
/// Equal timestamps keep their row order.
pub fn parse_executions(rows: &[RawExecutionRow]) -> Vec<Execution> {
    let mut executions: Vec<Execution> = rows.iter().filter_map(Execution::from_row).collect();
    executions.sort_by_key(|e| e.time);
    executions
}
