//! CSV export of a (filtered) collection.

use std::path::Path;

use gameshelf_catalog::GameRecord;

pub const EXPORT_HEADER: &str = "ID,Título,Plataforma,Formato,Estado,Nota,Es DLC";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Nothing to export")]
    Empty,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Render `records` as CSV text.
///
/// The title is always quoted with inner quotes doubled; the other cells are
/// written bare. Lines are joined with `\n` and there is no trailing newline.
pub fn export_csv(records: &[&GameRecord]) -> Result<String, ExportError> {
    if records.is_empty() {
        return Err(ExportError::Empty);
    }

    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(EXPORT_HEADER.to_string());
    for game in records {
        lines.push(export_row(game));
    }
    Ok(lines.join("\n"))
}

fn export_row(game: &GameRecord) -> String {
    let rating = game.user_rating.map(|r| r.to_string()).unwrap_or_default();
    let dlc = if game.is_dlc() { "Sí" } else { "No" };
    format!(
        "{},\"{}\",{},{},{},{},{}",
        game.id,
        game.title.replace('"', "\"\""),
        game.platform.label(),
        game.format.label(),
        game.status.label(),
        rating,
        dlc
    )
}

/// Export `records` to `path`, returning the number of rows written.
pub fn write_export(path: &Path, records: &[&GameRecord]) -> Result<usize, ExportError> {
    let text = export_csv(records)?;
    std::fs::write(path, text)?;
    log::debug!("Wrote {} rows to {}", records.len(), path.display());
    Ok(records.len())
}
