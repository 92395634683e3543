use crate::models::{Match, Participant};
use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;

pub const CSV_HEADER: [&str; 4] = ["Person 1", "Person 2", "Score", "Title"];
pub const CSV_FILENAME: &str = "matchmatrix_results.csv";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid UTF-8 in export: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Render matches as CSV, one row per match in the given order
///
/// Participant ids resolve to display names, falling back to the raw id.
pub fn matches_csv(matches: &[Match], participants: &[Participant]) -> Result<String, ExportError> {
    let names: HashMap<Uuid, &str> = participants.iter().map(|p| (p.id, p.name.as_str())).collect();
    let name_of = |id: &Uuid| names.get(id).map(|n| n.to_string()).unwrap_or_else(|| id.to_string());

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;
    for m in matches {
        writer.write_record([
            name_of(&m.p1_id),
            name_of(&m.p2_id),
            m.score.to_string(),
            m.title.clone(),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|e| ExportError::Io(e.into_error()))?;

    Ok(String::from_utf8(bytes)?)
}
