//! Parse command implementation.
//!
//! Runs entirely offline: no backend is contacted.

use std::io::Write;

use ocm_dashboard::parse_search_text;

use crate::error::CliError;
use crate::output::OutputFormat;

/// Parse command executor.
pub struct ParseCommand {
    text: String,
}

impl ParseCommand {
    /// Create a parse command from the words given on the command line.
    #[must_use]
    pub fn new(words: &[String]) -> Self {
        Self {
            text: words.join(" "),
        }
    }

    /// Execute the parse command.
    ///
    /// # Errors
    ///
    /// Returns an error if output fails.
    pub fn execute<W: Write>(&self, writer: &mut W, format: &OutputFormat) -> Result<(), CliError> {
        let descriptor = parse_search_text(&self.text);
        format.write(writer, &descriptor)?;
        Ok(())
    }
}
