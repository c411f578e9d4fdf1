//! CLI command implementations.
//!
//! Each submodule implements a specific CLI command:
//! - [`overview`] - Fleet overview page
//! - [`searches`] - Saved searches and suggested templates
//! - [`parse`] - Search text parsing

pub mod overview;
pub mod parse;
pub mod searches;

pub use overview::OverviewCommand;
pub use parse::ParseCommand;
pub use searches::SearchesCommand;
