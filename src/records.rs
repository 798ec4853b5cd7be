// Record loading — CSV bytes to an ordered list of comment texts.
//
// Exports from different platforms name their text column differently, so
// the loader accepts any of a small set of names. The table is scanned left
// to right and the first matching column wins, even if a later column
// matches a name that appears earlier in the candidate list.

use csv::ReaderBuilder;
use tracing::{debug, info};

use crate::error::AnalysisError;

/// Column names (normalised) that can hold the free text.
pub const TEXT_COLUMN_CANDIDATES: [&str; 4] = ["text", "comment", "body", "message"];

/// Cell values treated as missing, matching common CSV reader defaults.
const NULL_MARKERS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Index of the first header (in column order) naming a text column.
pub fn find_text_column<'a, I>(headers: I) -> Option<usize>
where
    I: IntoIterator<Item = &'a str>,
{
    headers.into_iter().position(|h| {
        let name = h.trim_start_matches('\u{feff}').trim().to_lowercase();
        TEXT_COLUMN_CANDIDATES.contains(&name.as_str())
    })
}

fn is_null(cell: &str) -> bool {
    NULL_MARKERS.contains(&cell)
}

/// Parse a CSV byte stream and return the text column's non-null cells in row order.
pub fn load_records(bytes: &[u8]) -> Result<Vec<String>, AnalysisError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers = reader.headers()?.clone();
    if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
        return Err(AnalysisError::MalformedInput(
            "input has no header row".to_string(),
        ));
    }

    debug!(columns = ?headers.iter().collect::<Vec<_>>(), "CSV header");

    let column = find_text_column(headers.iter()).ok_or(AnalysisError::NoTextColumnFound)?;

    let mut records = Vec::new();
    let mut dropped = 0usize;
    for row in reader.records() {
        let row = row?;
        match row.get(column) {
            Some(cell) if !is_null(cell) => records.push(cell.to_string()),
            _ => dropped += 1,
        }
    }

    info!(
        column = &headers[column],
        records = records.len(),
        dropped,
        "Loaded text records"
    );

    Ok(records)
}
