//! OCM console CLI binary entrypoint.
//!
//! This is the main entry point for the `ocm-console` command-line tool.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ocm_cli::cli::{Cli, Commands};
use ocm_cli::commands::{OverviewCommand, ParseCommand, SearchesCommand};
use ocm_cli::output::OutputFormat;
use ocm_dashboard::DashboardServer;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), ocm_cli::CliError> {
    let format = OutputFormat::new(cli.format);

    // Parsing needs neither configuration nor a backend.
    if let Commands::Parse { text } = &cli.command {
        let mut stdout = io::stdout().lock();
        return ParseCommand::new(text).execute(&mut stdout, &format);
    }

    let config = cli.dashboard_config()?;
    let bind_addr = config.bind_addr;
    let server = DashboardServer::from_config(config)?;

    match cli.command {
        Commands::Overview => {
            let mut stdout = io::stdout().lock();
            OverviewCommand::new(server.state())
                .execute(&mut stdout, &format)
                .await?;
        }
        Commands::Searches => {
            let mut stdout = io::stdout().lock();
            SearchesCommand::new(server.state())
                .execute(&mut stdout, &format)
                .await?;
        }
        Commands::Serve { .. } => {
            info!(addr = %bind_addr, "Starting dashboard server");
            server.serve_with_shutdown(bind_addr, shutdown_signal()).await?;
        }
        Commands::Parse { .. } => {}
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    info!("Shutdown signal received");
}
