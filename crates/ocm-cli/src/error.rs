//! CLI error types.

use ocm_dashboard::DashboardError;
use thiserror::Error;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Fetching or aggregating dashboard data failed.
    #[error(transparent)]
    Dashboard(#[from] DashboardError),
    /// Output formatting error.
    #[error("format error: {0}")]
    Format(String),
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
