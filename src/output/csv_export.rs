//! CSV export of extracted sections
//!
//! One row per (page, section) pair. The column names are the contract with
//! the downstream retrieval pipeline and must not change.

use crate::crawler::PageRecord;
use crate::output::OutputResult;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Header row of the exported file
pub const CSV_HEADER: [&str; 4] = ["URL", "MainTitle", "SectionTitle", "Content"];

/// One flattened output row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    pub url: String,
    pub main_title: String,
    pub section_title: String,
    /// Section paragraphs joined with a single space
    pub content: String,
}

/// Flattens page records into rows
///
/// Pages without sections produce no rows.
pub fn flatten_records(pages: &[PageRecord]) -> Vec<ExportRow> {
    pages
        .iter()
        .flat_map(|page| {
            page.sections.iter().map(move |section| ExportRow {
                url: page.url.clone(),
                main_title: page.title.clone(),
                section_title: section.heading.clone(),
                content: section.joined_text(),
            })
        })
        .collect()
}

/// Writes the header and every row to `writer`
///
/// Returns the number of data rows written.
pub fn write_csv<W: Write>(pages: &[PageRecord], writer: W) -> OutputResult<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(CSV_HEADER)?;

    let rows = flatten_records(pages);
    for row in &rows {
        csv_writer.write_record([
            row.url.as_str(),
            row.main_title.as_str(),
            row.section_title.as_str(),
            row.content.as_str(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(rows.len())
}

/// Writes the CSV export to a file, replacing any existing file
///
/// # Example
///
/// ```no_run
/// use campus_harvest::output::export_csv;
/// use std::path::Path;
///
/// let rows = export_csv(&[], Path::new("sections.csv")).unwrap();
/// assert_eq!(rows, 0);
/// ```
pub fn export_csv(pages: &[PageRecord], path: &Path) -> OutputResult<usize> {
    let file = File::create(path)?;
    let rows = write_csv(pages, file)?;
    tracing::info!("Wrote {} rows to {}", rows, path.display());
    Ok(rows)
}
