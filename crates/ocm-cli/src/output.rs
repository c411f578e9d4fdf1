//! Output formatting for CLI commands.
//!
//! Supports table (human-readable) and JSON output formats.

use std::io::Write;

use ocm_dashboard::overview::ChartDatum;
use ocm_dashboard::searches::SearchCard;
use ocm_dashboard::{OverviewModel, QueryDescriptor, SavedSearchesModel};
use serde::Serialize;

use crate::cli::Format;
use crate::error::CliError;

/// Output formatter that handles both table and JSON output.
#[derive(Debug, Clone)]
pub struct OutputFormat {
    format: Format,
}

impl OutputFormat {
    /// Create a new output formatter.
    #[must_use]
    pub const fn new(format: Format) -> Self {
        Self { format }
    }

    /// Write a serializable value to the output.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write<W, T>(&self, writer: &mut W, value: &T) -> Result<(), CliError>
    where
        W: Write,
        T: Serialize + TableDisplay,
    {
        match self.format {
            Format::Json => {
                serde_json::to_writer_pretty(&mut *writer, value)
                    .map_err(|e| CliError::Format(format!("JSON serialization failed: {e}")))?;
                writeln!(writer)?;
            }
            Format::Table => {
                value.write_table(writer)?;
            }
        }
        Ok(())
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::new(Format::Table)
    }
}

/// Trait for types that can be displayed as a table.
pub trait TableDisplay {
    /// Write the value as a human-readable table.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError>;
}

fn write_chart<W: Write>(writer: &mut W, title: &str, data: &[ChartDatum]) -> Result<(), CliError> {
    writeln!(writer, "{title}")?;
    for datum in data {
        let marker = if datum.is_danger { " !" } else { "" };
        writeln!(writer, "  {:<16}{}{marker}", format!("{}:", datum.key), datum.value)?;
    }
    Ok(())
}

impl TableDisplay for OverviewModel {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "Fleet Overview")?;
        writeln!(writer, "══════════════════════════════════")?;

        writeln!(writer, "Providers")?;
        if self.providers.is_empty() {
            writeln!(writer, "  (no clusters)")?;
        }
        for tally in &self.providers {
            writeln!(writer, "  {:<16}{}", format!("{}:", tally.provider), tally.cluster_count)?;
        }
        writeln!(writer)?;

        writeln!(writer, "Summary")?;
        for item in &self.summary {
            writeln!(writer, "  {:<16}{}", format!("{}:", item.description), item.count)?;
        }
        writeln!(writer)?;

        write_chart(writer, "Cluster compliance", &self.compliance_chart)?;
        writeln!(writer)?;
        write_chart(writer, "Pods", &self.pod_chart)?;
        writeln!(writer)?;
        write_chart(writer, "Cluster status", &self.cluster_chart)?;
        Ok(())
    }
}

fn write_cards<W: Write>(writer: &mut W, title: &str, cards: &[SearchCard]) -> Result<(), CliError> {
    writeln!(writer, "{title}")?;
    writeln!(writer, "{:<24} {:>8}  SEARCH", "NAME", "RESULTS")?;
    writeln!(writer, "{}", "─".repeat(60))?;
    for card in cards {
        writeln!(writer, "{:<24} {:>8}  {}", card.title, card.count, card.search_text)?;
    }
    Ok(())
}

impl TableDisplay for SavedSearchesModel {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        if self.is_empty() {
            writeln!(writer, "No saved searches or suggested templates.")?;
            return Ok(());
        }
        if !self.saved.is_empty() {
            write_cards(writer, "Saved searches", &self.saved)?;
        }
        if !self.suggested.is_empty() {
            if !self.saved.is_empty() {
                writeln!(writer)?;
            }
            write_cards(writer, "Suggested search templates", &self.suggested)?;
        }
        Ok(())
    }
}

impl TableDisplay for QueryDescriptor {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        if self.is_empty() {
            writeln!(writer, "Empty query.")?;
            return Ok(());
        }
        if !self.keywords.is_empty() {
            writeln!(writer, "Keywords: {}", self.keywords.join(", "))?;
        }
        if !self.filters.is_empty() {
            writeln!(writer, "Filters:")?;
            for filter in &self.filters {
                writeln!(writer, "  {:<16}{}", format!("{}:", filter.property), filter.values.join(" | "))?;
            }
        }
        Ok(())
    }
}
