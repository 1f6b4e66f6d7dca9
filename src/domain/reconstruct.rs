//! Execution-to-trade reconstruction.
//!
//! Each symbol has at most one open trade. Fills for a flat symbol start a
//! new trade; fills for a symbol with an open trade are applied to it until
//! its position returns to zero.

use std::collections::HashMap;

use tracing::{debug, trace};

use super::execution::Execution;
use super::trade::Trade;

#[derive(Debug, Default)]
pub struct Reconstructor {
    trades: Vec<Trade>,
    /// Symbol -> index into `trades` of the symbol's open trade.
    open: HashMap<String, usize>,
}

impl Reconstructor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a time-ordered batch of executions.
    ///
    /// Open trades carry over between calls, so statements can be fed one
    /// after another.
    pub fn feed(&mut self, executions: &[Execution]) {
        for execution in executions {
            self.apply(execution);
        }
    }

    fn apply(&mut self, execution: &Execution) {
        let index = match self.open.get(&execution.symbol) {
            Some(&index) => index,
            None => {
                trace!(symbol = %execution.symbol, time = %execution.time, "opening trade");
                self.trades.push(Trade::new(execution.symbol.clone()));
                let index = self.trades.len() - 1;
                self.open.insert(execution.symbol.clone(), index);
                index
            }
        };

        let trade = &mut self.trades[index];
        trade.apply(execution);

        if trade.is_closed() {
            trace!(symbol = %trade.ticker, time = %execution.time, "closed trade");
            self.open.remove(&execution.symbol);
        }
    }

    /// Number of symbols currently holding a position.
    pub fn open_count(&self) -> usize {
        self.open.len()
    }

    /// All trades ordered by close time; still-open trades come first in
    /// the order they were started.
    pub fn finish(self) -> Vec<Trade> {
        let mut trades = self.trades;
        trades.sort_by_key(|t| t.close_time);
        debug!(
            trades = trades.len(),
            open = self.open.len(),
            "reconstruction finished"
        );
        trades
    }
}

/// Reconstruct trades from a single time-ordered batch.
pub fn reconstruct(executions: &[Execution]) -> Vec<Trade> {
    let mut reconstructor = Reconstructor::new();
    reconstructor.feed(executions);
    reconstructor.finish()
}
