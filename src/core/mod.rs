//! Core module containing shared infrastructure components.
//!
//! This module provides the foundational building blocks for the MCP server,
//! including error handling, configuration, the per-operation database
//! connection provider, server lifecycle management, and transport layer
//! abstractions.

pub mod config;
pub mod db;
pub mod error;
pub mod server;
pub mod transport;

pub use config::Config;
pub use error::{Error, Result};
pub use server::ExpenseServer;
pub use transport::{TransportConfig, TransportService};
