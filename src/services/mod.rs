//! # Services Module
//!
//! Outbound integrations used by the HTTP routes.

pub mod data_proxy;

pub use data_proxy::{ApiEntry, DataProxy, filter_entries};
