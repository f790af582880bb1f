//! Outbound adapters implementing domain ports.
//!
//! - **http**: the Connect REST API over `reqwest`
//! - **persistence**: PostgreSQL repositories using Diesel
//! - **memory**: in-process repositories
//!
//! Adapters translate between domain types and wire or row formats. They
//! contain no business logic.

pub mod http;
pub mod memory;
pub mod persistence;
