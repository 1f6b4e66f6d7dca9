//! Configuration access port trait.

use crate::domain::error::TradeClipperError;

/// Read-only access to sectioned key/value configuration.
///
/// Typed getters return `Ok(None)` for an absent key and
/// `TradeClipperError::ConfigInvalid` for a present value of the wrong type.
pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_int(&self, section: &str, key: &str) -> Result<Option<i64>, TradeClipperError>;
    fn get_bool(&self, section: &str, key: &str) -> Result<Option<bool>, TradeClipperError>;
}
