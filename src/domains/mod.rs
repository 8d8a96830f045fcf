//! Domains module containing business logic organized by bounded contexts.
//!
//! Each subdomain represents a specific area of functionality within the MCP
//! server: the expense tools (writes and queries against PostgreSQL) and the
//! read-only resources (the advisory categories document).

pub mod resources;
pub mod tools;
