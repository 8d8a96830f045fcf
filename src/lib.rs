//! Expense Tracker MCP Server Library
//!
//! This crate provides a Model Context Protocol (MCP) server for recording
//! and querying personal expenses stored in PostgreSQL, with a modular
//! architecture organized by domains.
//!
//! # Architecture
//!
//! The server is organized into the following modules:
//!
//! - **core**: Core infrastructure including configuration, error handling,
//!   the database connection provider, and the main server
//! - **domains**: Business logic organized by bounded contexts
//!   - **tools**: MCP tools for adding, listing, and summarizing expenses
//!   - **resources**: Data resources that can be read by clients (the
//!     `expense://categories` document)
//!
//! # Example
//!
//! ```rust,no_run
//! use expense_mcp_server::{core::ExpenseServer, core::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let server = ExpenseServer::new(config);
//!     // Start the server...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, ExpenseServer, Result};
