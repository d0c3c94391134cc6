//! Parsed-sections report: flat text dump of a `ResumeSections` map.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::errors::AppError;
use crate::resume::sections::ResumeSections;

/// Renders one block per present section:
///
/// ```text
/// ===== EXPERIENCE =====
/// <joined section text>
///
/// ```
pub fn render_report(sections: &ResumeSections) -> String {
    let mut out = String::new();
    for (kind, lines) in sections.iter() {
        out.push_str(&format!("===== {} =====\n", kind.as_str().to_uppercase()));
        out.push_str(lines.join("\n").trim());
        out.push_str("\n\n");
    }
    out
}

/// Writes the report to `path`, replacing any previous contents.
pub fn save_report(sections: &ResumeSections, path: &Path) -> Result<(), AppError> {
    fs::write(path, render_report(sections))?;
    info!("Saved parsed resume to {}", path.display());
    Ok(())
}
