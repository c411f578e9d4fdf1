//! # ocm-cli
//!
//! Command-line interface for the OCM console dashboard.
//!
//! Provides commands for:
//! - The fleet overview (providers, summary counts, status charts)
//! - Saved searches and suggested templates with result counts
//! - Parsing search text into a structured query
//! - Running the dashboard API server
//!
//! # Architecture
//!
//! Commands talk to the console and search GraphQL APIs through
//! [`ocm_dashboard::GraphqlClient`]; page models are composed by
//! [`ocm_dashboard::DashboardState`], the same code path the server uses.
//!
//! ```text
//! ┌─────────┐                ┌────────────────┐    GraphQL    ┌──────────────┐
//! │ ocm-cli │───────────────►│ DashboardState │──────────────►│ console/search│
//! └─────────┘                └────────────────┘               └──────────────┘
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;

pub use cli::{Cli, Commands, Format};
pub use error::CliError;
pub use output::{OutputFormat, TableDisplay};
