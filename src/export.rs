use std::fs;
use std::path::{Path, PathBuf};

use crate::error::AppResult;

const MANUAL_SUFFIX: &str = "manual";

/// `<prefix>-<ticket>.md`, or `<prefix>-manual.md` for pasted content.
pub fn export_file_name(prefix: &str, ticket_id: Option<&str>) -> String {
    let suffix = ticket_id
        .map(str::trim)
        .filter(|ticket| !ticket.is_empty())
        .map(|ticket| {
            ticket
                .chars()
                .map(|c| {
                    if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                        c
                    } else {
                        '_'
                    }
                })
                .collect::<String>()
        })
        .unwrap_or_else(|| MANUAL_SUFFIX.to_string());
    format!("{prefix}-{suffix}.md")
}

/// Writes the unformatted backend text verbatim.
pub fn write_export(
    dir: &Path,
    prefix: &str,
    ticket_id: Option<&str>,
    raw: &str,
) -> AppResult<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(prefix, ticket_id));
    fs::write(&path, raw)?;
    Ok(path)
}
