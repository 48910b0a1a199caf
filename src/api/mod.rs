//! Issue API client and types.
//!
//! This module provides the interface for fetching issue data from the
//! remote collection endpoint.

mod client;
pub mod error;
pub mod types;

pub use client::IssuesClient;
