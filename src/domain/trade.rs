//! Trade aggregate: one symbol, flat to flat.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use super::execution::Execution;

/// Direction of a trade, fixed by the sign of its first execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeSide {
    Unknown,
    Long,
    Short,
}

impl std::fmt::Display for TradeSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradeSide::Unknown => write!(f, "UNKNOWN"),
            TradeSide::Long => write!(f, "LONG"),
            TradeSide::Short => write!(f, "SHORT"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    pub ticker: String,
    pub side: TradeSide,
    /// Running signed position.
    pub position: i64,
    /// Sum of opening quantities.
    pub total_share_count: i64,
    pub open_time: Option<NaiveDateTime>,
    pub close_time: Option<NaiveDateTime>,
    pub open_executions: Vec<Execution>,
    pub close_executions: Vec<Execution>,
}

impl Trade {
    pub fn new(ticker: impl Into<String>) -> Self {
        Trade {
            ticker: ticker.into(),
            side: TradeSide::Unknown,
            position: 0,
            total_share_count: 0,
            open_time: None,
            close_time: None,
            open_executions: Vec::new(),
            close_executions: Vec::new(),
        }
    }

    /// Apply one fill for this trade's symbol.
    pub(crate) fn apply(&mut self, execution: &Execution) {
        if self.side == TradeSide::Unknown {
            self.side = if execution.quantity > 0 {
                TradeSide::Long
            } else {
                TradeSide::Short
            };
        }

        self.position += execution.quantity;

        if self.position == 0 {
            self.close_time = Some(execution.time);
            if self.open_time.is_none() {
                self.open_time = Some(execution.time);
            }
        } else if self.open_time.is_none() {
            self.open_time = Some(execution.time);
        }

        if execution.is_opening() {
            self.total_share_count += execution.quantity;
            self.open_executions.push(execution.clone());
        } else {
            self.close_executions.push(execution.clone());
        }
    }

    pub fn is_open(&self) -> bool {
        self.position != 0
    }

    pub fn is_closed(&self) -> bool {
        !self.is_open()
    }

    /// Realized profit; `None` while the trade is open.
    ///
    /// Closing notional minus opening notional, negated for shorts. Leg
    /// quantities are not required to balance.
    pub fn profit(&self) -> Option<f64> {
        if self.is_open() {
            return None;
        }
        let opened: f64 = self.open_executions.iter().map(Execution::notional).sum();
        let closed: f64 = self.close_executions.iter().map(Execution::notional).sum();
        let profit = closed - opened;
        Some(if self.side == TradeSide::Short {
            -profit
        } else {
            profit
        })
    }

    pub fn opening_price_avg(&self) -> Option<f64> {
        volume_weighted_net_price(&self.open_executions)
    }

    pub fn closing_price_avg(&self) -> Option<f64> {
        volume_weighted_net_price(&self.close_executions)
    }

    pub fn duration(&self) -> Option<Duration> {
        match (self.open_time, self.close_time) {
            (Some(open), Some(close)) => Some(close - open),
            _ => None,
        }
    }

    /// Profit per opened share relative to the average entry price.
    pub fn percent_gain(&self) -> Option<f64> {
        if self.total_share_count == 0 {
            return None;
        }
        let per_share = self.profit()? / self.total_share_count.abs() as f64;
        let entry = self.opening_price_avg()?;
        if entry == 0.0 {
            return None;
        }
        Some(per_share / entry)
    }

    /// Calendar date of the first opening fill.
    pub fn first_open_date(&self) -> Option<NaiveDate> {
        self.open_executions.first().map(|e| e.time.date())
    }

    /// Calendar date of the first closing fill.
    pub fn first_close_date(&self) -> Option<NaiveDate> {
        self.close_executions.first().map(|e| e.time.date())
    }

    /// A trade whose first opening and first closing fills fall on different
    /// dates. A trade missing either side counts as a swing.
    pub fn is_swing(&self) -> bool {
        match (self.first_open_date(), self.first_close_date()) {
            (Some(open), Some(close)) => open != close,
            _ => true,
        }
    }
}

/// Σ(net × |qty|) / Σ|qty|; `None` when there is no volume.
pub fn volume_weighted_net_price(executions: &[Execution]) -> Option<f64> {
    let shares: i64 = executions.iter().map(|e| e.quantity.abs()).sum();
    if shares == 0 {
        return None;
    }
    let weighted: f64 = executions
        .iter()
        .map(|e| e.net_price * e.quantity.abs() as f64)
        .sum();
    Some(weighted / shares as f64)
}
