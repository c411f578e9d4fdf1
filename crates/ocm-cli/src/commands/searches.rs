//! Saved searches command implementation.

use std::io::Write;
use std::sync::Arc;

use ocm_dashboard::{ConsoleApi, DashboardState};

use crate::error::CliError;
use crate::output::OutputFormat;

/// Saved searches command executor.
pub struct SearchesCommand<C> {
    state: Arc<DashboardState<C>>,
}

impl<C: ConsoleApi> SearchesCommand<C> {
    /// Create a new searches command.
    #[must_use]
    pub const fn new(state: Arc<DashboardState<C>>) -> Self {
        Self { state }
    }

    /// Execute the searches command.
    ///
    /// # Errors
    ///
    /// Returns an error if counting fails or output fails.
    pub async fn execute<W: Write>(&self, writer: &mut W, format: &OutputFormat) -> Result<(), CliError> {
        let model = self.state.saved_searches().await?;
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

    fn command(api: FakeApi) -> SearchesCommand<FakeApi> {
        SearchesCommand::new(Arc::new(DashboardState::new(DashboardConfig::default(), api)))
    }

    #[tokio::test]
    async fn searches_command_execute_table() {
        let mut buf = Vec::new();

        command(FakeApi::new(12))
            .execute(&mut buf, &OutputFormat::new(Format::Table))
            .await
            .expect("should execute");

        let output = String::from_utf8(buf).expect("valid utf8");
        assert!(output.contains("Saved searches"));
        assert!(output.contains("Default pods"));
        assert!(output.contains("Suggested search templates"));
        assert!(output.contains("Workloads"));
    }

    #[tokio::test]
    async fn searches_command_execute_json() {
        let mut buf = Vec::new();

        command(FakeApi::new(12))
            .execute(&mut buf, &OutputFormat::new(Format::Json))
            .await
            .expect("should execute");

        let value: serde_json::Value = serde_json::from_slice(&buf).expect("valid json");
        assert_eq!(value["saved"][0]["count"], 12);
        assert_eq!(value["suggested"].as_array().map(Vec::len), Some(3));
    }

    #[tokio::test]
    async fn searches_command_backend_failure() {
        let mut buf = Vec::new();

        let result = command(FakeApi::failing())
            .execute(&mut buf, &OutputFormat::default())
            .await;

        assert!(result.is_err());
    }
}
