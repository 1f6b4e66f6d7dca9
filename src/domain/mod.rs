//! Core domain types and logic: executions, trade reconstruction and
//! portfolio analytics.

pub mod analysis;
pub mod error;
pub mod execution;
pub mod metrics;
pub mod portfolio;
pub mod reconstruct;
pub mod summary;
pub mod trade;
