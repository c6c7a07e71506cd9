//! Built-in sample bars and rendering of records back to document text.

use super::DocumentError;
use crate::domain::bar::BarRecord;
use crate::domain::color::Rgb;

/// The five sample bars written when the user asks for a default file.
pub fn default_bars() -> Vec<BarRecord> {
    vec![
        BarRecord::new("Bar 1", 50, 100, Rgb::new(0xFF, 0x57, 0x33)),
        BarRecord::new("Bar 2", 75, 100, Rgb::new(0x33, 0xFF, 0x57)),
        BarRecord::new("Bar 3", 25, 100, Rgb::new(0x33, 0x57, 0xFF)),
        BarRecord::new("Bar 4", 80, 100, Rgb::new(0xF1, 0xC4, 0x0F)),
        BarRecord::new("Bar 5", 40, 100, Rgb::new(0x9B, 0x59, 0xB6)),
    ]
}

/// Renders records as a JSON array with one record per line.
///
/// # Errors
///
/// Returns [`DocumentError::Render`] if a record cannot be serialized.
pub fn render_document(records: &[BarRecord]) -> Result<String, DocumentError> {
    let lines = records
        .iter()
        .map(|r| serde_json::to_string(r).map(|json| format!("    {json}")))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| DocumentError::Render(e.to_string()))?;

    if lines.is_empty() {
        return Ok("[]\n".to_string());
    }
    Ok(format!("[\n{}\n]\n", lines.join(",\n")))
}

/// Renders [`default_bars`] as document text.
///
/// # Errors
///
/// Returns [`DocumentError::Render`] if serialization fails.
pub fn render_default_document() -> Result<String, DocumentError> {
    render_document(&default_bars())
}
