//! Command-line argument parsing with clap.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use ocm_dashboard::DashboardConfig;

use crate::error::CliError;

/// OCM console - multicluster overview and search counts.
#[derive(Parser, Debug, Clone)]
#[command(name = "ocm-console")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long, env = "OCM_CONSOLE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Console GraphQL endpoint (overrides the configuration file).
    #[arg(long, env = "OCM_CONSOLE_URL")]
    pub console_url: Option<String>,

    /// Search GraphQL endpoint (overrides the configuration file).
    #[arg(long, env = "OCM_SEARCH_URL")]
    pub search_url: Option<String>,

    /// Bearer token for both endpoints.
    #[arg(long, env = "OCM_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Table)]
    pub format: Format,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum Format {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON output for scripting.
    Json,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Show the fleet overview: providers, summary, and status charts.
    Overview,

    /// Show saved searches and suggested templates with result counts.
    Searches,

    /// Parse search text and show the resulting query.
    Parse {
        /// Search text, e.g. `kind:pod status:Running`.
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Run the dashboard API server.
    Serve {
        /// Address to listen on (overrides the configuration file).
        #[arg(short, long)]
        bind: Option<SocketAddr>,
    },
}

impl Cli {
    /// Build the dashboard configuration from the file and flag overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be loaded or the result is invalid.
    pub fn dashboard_config(&self) -> Result<DashboardConfig, CliError> {
        let mut config = match &self.config {
            Some(path) => DashboardConfig::from_file(path)?,
            None => DashboardConfig::default(),
        };

        if let Some(url) = &self.console_url {
            config.console_url.clone_from(url);
        }
        if let Some(url) = &self.search_url {
            config.search_url.clone_from(url);
        }
        if let Some(token) = &self.token {
            config = config.with_token(token.clone());
        }
        if let Commands::Serve { bind: Some(addr) } = &self.command {
            config = config.with_bind_addr(*addr);
        }

        config.validate()?;
        Ok(config)
    }
}
