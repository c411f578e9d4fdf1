//! Overview command implementation.
//!
//! Shows the fleet overview:
//! - Clusters per cloud provider
//! - Summary counts with search links
//! - Pod, compliance and cluster status charts

use std::io::Write;
use std::sync::Arc;

use ocm_dashboard::{ConsoleApi, DashboardState};

use crate::error::CliError;
use crate::output::OutputFormat;

/// Overview command executor.
pub struct OverviewCommand<C> {
    state: Arc<DashboardState<C>>,
}

impl<C: ConsoleApi> OverviewCommand<C> {
    /// Create a new overview command.
    #[must_use]
    pub const fn new(state: Arc<DashboardState<C>>) -> Self {
        Self { state }
    }

    /// Execute the overview command.
    ///
    /// # Errors
    ///
    /// Returns an error if a backend fetch fails or output fails.
    pub async fn execute<W: Write>(&self, writer: &mut W, format: &OutputFormat) -> Result<(), CliError> {
        let model = self.state.overview().await?;
        format.write(writer, &model)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Format;
    use crate::commands::fake::FakeApi;
    use ocm_dashboard::DashboardConfig;

    fn command(api: FakeApi) -> OverviewCommand<FakeApi> {
        OverviewCommand::new(Arc::new(DashboardState::new(DashboardConfig::default(), api)))
    }

    #[tokio::test]
    async fn overview_command_execute_table() {
        let mut buf = Vec::new();

        command(FakeApi::new(4))
            .execute(&mut buf, &OutputFormat::new(Format::Table))
            .await
            .expect("should execute");

        let output = String::from_utf8(buf).expect("valid utf8");
        assert!(output.contains("Fleet Overview"));
        assert!(output.contains("aws:"));
        assert!(output.contains("Running:"));
    }

    #[tokio::test]
    async fn overview_command_execute_json() {
        let mut buf = Vec::new();

        command(FakeApi::new(4))
            .execute(&mut buf, &OutputFormat::new(Format::Json))
            .await
            .expect("should execute");

        let value: serde_json::Value = serde_json::from_slice(&buf).expect("valid json");
        assert_eq!(value["summary"][5]["description"], "Pods");
        assert_eq!(value["summary"][5]["count"], 4);
        assert_eq!(value["cluster_chart"][0]["value"], 1);
    }

    #[tokio::test]
    async fn overview_command_backend_failure() {
        let mut buf = Vec::new();

        let result = command(FakeApi::failing())
            .execute(&mut buf, &OutputFormat::default())
            .await;

        assert!(matches!(result, Err(CliError::Dashboard(_))));
        assert!(buf.is_empty());
    }
}
