//! Port traits the domain talks to.

pub mod config_port;
pub mod export_port;
pub mod statement_port;
