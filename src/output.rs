use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

/// The output file, if any; an empty path means "no file"
pub fn output_target(path: Option<&Path>) -> Option<&Path> {
    path.filter(|p| !p.as_os_str().is_empty())
}

/// Write the report to `path`, replacing any existing file
pub fn write_report(path: &Path, html: &str) -> Result<()> {
    fs::write(path, html)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    info!(path = %path.display(), bytes = html.len(), "report written");
    Ok(())
}

/// Confirmation shown once the report is on disk
pub fn written_message(path: &Path) -> String {
    format!("Report written to {}", path.display())
}
