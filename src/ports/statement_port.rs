//! Brokerage statement source port trait.

use crate::domain::error::TradeClipperError;
use crate::domain::execution::RawExecutionRow;

/// Trade-history rows read from one statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    /// Where the rows came from, for diagnostics.
    pub source: String,
    pub rows: Vec<RawExecutionRow>,
}

pub trait StatementPort {
    /// Load every statement the source exposes, in a stable order.
    ///
    /// An unreadable source is `TradeClipperError::SourceUnavailable`.
    fn load_statements(&self) -> Result<Vec<Statement>, TradeClipperError>;
}
