//! Output module: the final report and its JSON sink

mod report;

pub use report::Report;

use crate::CrawlError;
use std::path::Path;

/// Writes the report as pretty-printed JSON to `path`
///
/// The document is written to a temporary sibling file and renamed into
/// place, so a crash mid-write never leaves a truncated report behind.
/// Unlike fetch errors, a sink failure here is surfaced to the caller.
pub fn write_report(report: &Report, path: &Path) -> Result<(), CrawlError> {
    let json = serde_json::to_string_pretty(report)?;

    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes()).map_err(|source| CrawlError::ReportWrite {
        path: tmp_path.clone(),
        source,
    })?;
    std::fs::rename(&tmp_path, path).map_err(|source| CrawlError::ReportWrite {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(path = %path.display(), "report written");
    Ok(())
}
