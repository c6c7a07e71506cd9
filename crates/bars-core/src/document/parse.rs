//! Parsing of bars documents into a [`BarRegistry`](crate::domain::bar::BarRegistry).

use serde_json::{Map, Value};
use tracing::{debug, trace, warn};

use super::{Diagnostic, DocumentError, ParsedDocument};
use crate::domain::bar::{BarRecord, MAX_BARS};
use crate::domain::color::Rgb;

/// Documents larger than this are rejected before parsing (1 MiB).
pub const MAX_DOCUMENT_BYTES: usize = 1024 * 1024;

const KNOWN_KEYS: [&str; 4] = ["title", "current", "total", "color"];

/// Parses the text of a bars file.
///
/// Whitespace-only input (including the empty string) yields an empty
/// registry.  At most [`MAX_BARS`] records are kept, in file order.
///
/// # Errors
///
/// Returns [`DocumentError::Syntax`] for malformed JSON,
/// [`DocumentError::NotAnArray`] if the top-level value is not an array, and
/// [`DocumentError::TooLarge`] for inputs over [`MAX_DOCUMENT_BYTES`].
///
/// # Examples
///
/// ```rust
/// use bars_core::{parse_document, Rgb};
///
/// let doc = parse_document(r##"[{"title":"A","current":3,"total":4,"color":"#112233"}]"##).unwrap();
/// let bar = doc.registry.get(0).unwrap();
/// assert_eq!(bar.title, "A");
/// assert_eq!((bar.current, bar.total), (3, 4));
/// assert_eq!(bar.color, Rgb::new(17, 34, 51));
/// ```
pub fn parse_document(text: &str) -> Result<ParsedDocument, DocumentError> {
    if text.len() > MAX_DOCUMENT_BYTES {
        return Err(DocumentError::TooLarge {
            size: text.len(),
            limit: MAX_DOCUMENT_BYTES,
        });
    }

    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    if text.trim().is_empty() {
        return Ok(ParsedDocument::default());
    }

    let value: Value = serde_json::from_str(text).map_err(|e| DocumentError::Syntax {
        line: e.line(),
        column: e.column(),
        message: syntax_message(&e),
    })?;

    let Value::Array(items) = value else {
        return Err(DocumentError::NotAnArray {
            found: kind_of(&value),
        });
    };

    let mut doc = ParsedDocument::default();

    for (index, item) in items.iter().enumerate() {
        let Value::Object(fields) = item else {
            doc.diagnostics.push(Diagnostic::NotAnObject {
                index,
                found: kind_of(item),
            });
            continue;
        };

        if doc.registry.is_full() {
            let dropped = items[index..].iter().filter(|v| v.is_object()).count();
            doc.diagnostics.push(Diagnostic::CapacityExceeded {
                kept: MAX_BARS,
                dropped,
            });
            break;
        }

        let record = record_from_object(index, fields, &mut doc.diagnostics);
        if record.total == 0 {
            doc.diagnostics.push(Diagnostic::ZeroTotal {
                index,
                title: record.title.clone(),
            });
        }
        trace!(index, title = %record.title, "parsed bar");

        if let Err(rejected) = doc.registry.try_push(record) {
            warn!(index, title = %rejected.title, "bar rejected by a full registry");
        }
    }

    debug!(
        bars = doc.registry.len(),
        diagnostics = doc.diagnostics.len(),
        "bars document parsed"
    );
    Ok(doc)
}

/// Converts one JSON object into a record, defaulting unusable fields.
fn record_from_object(
    index: usize,
    fields: &Map<String, Value>,
    diagnostics: &mut Vec<Diagnostic>,
) -> BarRecord {
    for key in fields.keys().filter(|k| !KNOWN_KEYS.contains(&k.as_str())) {
        debug!(index, key = %key, "ignoring unknown bar field");
    }

    let title = match fields.get("title") {
        None => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => {
            diagnostics.push(Diagnostic::InvalidField {
                index,
                field: "title",
                value: other.to_string(),
                default: "an empty title",
            });
            String::new()
        }
    };

    let current = integer_field(index, fields, "current", diagnostics);
    let total = integer_field(index, fields, "total", diagnostics);

    let color = match fields.get("color") {
        None => Rgb::BLACK,
        Some(Value::String(s)) => Rgb::from_hex(s).unwrap_or_else(|_| {
            diagnostics.push(Diagnostic::InvalidColor {
                index,
                value: format!("{s:?}"),
            });
            Rgb::BLACK
        }),
        Some(other) => {
            diagnostics.push(Diagnostic::InvalidColor {
                index,
                value: other.to_string(),
            });
            Rgb::BLACK
        }
    };

    BarRecord::new(title, current, total, color)
}

/// Reads an integer field that must fit in `i32`; anything else becomes 0.
///
/// Numbers written with a zero fraction (`50.0`, `1e2`) count as integers.
fn integer_field(
    index: usize,
    fields: &Map<String, Value>,
    field: &'static str,
    diagnostics: &mut Vec<Diagnostic>,
) -> i32 {
    let Some(value) = fields.get(field) else {
        return 0;
    };

    match as_integer(value).and_then(|n| i32::try_from(n).ok()) {
        Some(n) => n,
        None => {
            diagnostics.push(Diagnostic::InvalidField {
                index,
                field,
                value: value.to_string(),
                default: "0",
            });
            0
        }
    }
}

fn as_integer(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    let f = value.as_f64()?;
    // The range check keeps the cast exact; `i32::try_from` narrows further.
    (f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64).then(|| f as i64)
}

/// Strips serde_json's trailing " at line L column C"; the position is
/// carried separately.
fn syntax_message(err: &serde_json::Error) -> String {
    let full = err.to_string();
    match full.rfind(" at line ") {
        Some(pos) => full[..pos].to_string(),
        None => full,
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> ParsedDocument {
        parse_document(text).expect("document must parse")
    }

    // ── well-formed input ─────────────────────────────────────────────────────

    #[test]
    fn test_parse_single_record_end_to_end() {
        // Arrange
        let text = r##"[{"title":"A","current":3,"total":4,"color":"#112233"}]"##;

        // Act
        let doc = parse(text);

        // Assert
        assert_eq!(doc.registry.len(), 1);
        assert_eq!(
            doc.registry.get(0),
            Some(&BarRecord::new("A", 3, 4, Rgb::new(17, 34, 51)))
        );
        assert!(doc.diagnostics.is_empty());
    }

    #[test]
    fn test_parse_accepts_fields_in_any_order() {
        let doc = parse(r##"[{"color":"#010203","total":9,"title":"X","current":1}]"##);

        assert_eq!(
            doc.registry.get(0),
            Some(&BarRecord::new("X", 1, 9, Rgb::new(1, 2, 3)))
        );
    }

    #[test]
    fn test_parse_ignores_unknown_keys() {
        let doc = parse(r#"[{"title":"X","current":1,"total":2,"unit":"MB","extra":[1,2]}]"#);

        assert_eq!(doc.registry.len(), 1);
        assert!(doc.diagnostics.is_empty());
    }

    #[test]
    fn test_parse_keeps_negative_and_overfull_counts() {
        let doc = parse(r#"[{"current":-5,"total":10},{"current":15,"total":10}]"#);

        assert_eq!(doc.registry.get(0).map(|b| b.current), Some(-5));
        assert_eq!(doc.registry.get(1).map(|b| b.current), Some(15));
    }

    #[test]
    fn test_integral_floats_are_accepted_as_counts() {
        // Arrange
        let text = r#"[{"title":"A","current":50.0,"total":1e2}]"#;

        // Act
        let doc = parse(text);

        // Assert
        assert_eq!(doc.registry.get(0).map(|b| (b.current, b.total)), Some((50, 100)));
        assert!(doc.diagnostics.is_empty());
    }

    #[test]
    fn test_integral_float_out_of_i32_range_is_rejected() {
        let doc = parse(r#"[{"current":1,"total":3e9}]"#);

        assert_eq!(doc.registry.get(0).map(|b| b.total), Some(0));
        assert!(matches!(
            &doc.diagnostics[0],
            Diagnostic::InvalidField { field: "total", .. }
        ));
    }

    #[test]
    fn test_repeated_key_takes_last_occurrence() {
        let doc = parse(r##"[{"title":"A","title":"B","total":1,"total":4,"color":"#000001","color":"#000002"}]"##);

        assert_eq!(
            doc.registry.get(0),
            Some(&BarRecord::new("B", 0, 4, Rgb::new(0, 0, 2)))
        );
        assert!(doc.diagnostics.is_empty());
    }

    #[test]
    fn test_parse_strips_byte_order_mark() {
        let doc = parse("\u{feff}[{\"title\":\"A\",\"total\":1}]");
        assert_eq!(doc.registry.len(), 1);
    }

    // ── defaults and diagnostics ──────────────────────────────────────────────

    #[test]
    fn test_missing_fields_take_defaults_silently() {
        let doc = parse(r#"[{"total": 5}]"#);

        assert_eq!(doc.registry.get(0), Some(&BarRecord::new("", 0, 5, Rgb::BLACK)));
        assert!(doc.diagnostics.is_empty());
    }

    #[test]
    fn test_invalid_colour_is_black_and_reported() {
        // Act
        let doc = parse(r##"[{"title":"A","current":1,"total":2,"color":"#ZZZZZZ"}]"##);

        // Assert
        assert_eq!(doc.registry.get(0).map(|b| b.color), Some(Rgb::BLACK));
        assert_eq!(doc.diagnostics.len(), 1);
        assert!(matches!(
            &doc.diagnostics[0],
            Diagnostic::InvalidColor { index: 0, .. }
        ));
        assert!(doc.diagnostics[0].is_user_visible());
    }

    #[test]
    fn test_non_string_colour_is_reported() {
        let doc = parse(r#"[{"total":2,"color":255}]"#);

        assert_eq!(doc.registry.get(0).map(|b| b.color), Some(Rgb::BLACK));
        assert!(matches!(
            &doc.diagnostics[0],
            Diagnostic::InvalidColor { value, .. } if value == "255"
        ));
    }

    #[test]
    fn test_non_integer_counts_default_to_zero_with_diagnostic() {
        // Arrange: a float, a string and an out-of-range integer
        let text = r#"[{"current":2.5,"total":"ten"},{"current":1,"total":3000000000}]"#;

        // Act
        let doc = parse(text);

        // Assert
        assert_eq!(doc.registry.get(0).map(|b| (b.current, b.total)), Some((0, 0)));
        assert_eq!(doc.registry.get(1).map(|b| (b.current, b.total)), Some((1, 0)));
        let fields: Vec<_> = doc
            .diagnostics
            .iter()
            .filter_map(|d| match d {
                Diagnostic::InvalidField { index, field, .. } => Some((*index, *field)),
                _ => None,
            })
            .collect();
        assert_eq!(fields, [(0, "current"), (0, "total"), (1, "total")]);
    }

    #[test]
    fn test_non_string_title_defaults_to_empty() {
        let doc = parse(r#"[{"title": 42, "current": 1, "total": 2}]"#);

        let bar = doc.registry.get(0).expect("one bar");
        assert_eq!(bar.title, "");
        assert_eq!((bar.current, bar.total), (1, 2));
        assert!(!doc.diagnostics[0].is_user_visible());
    }

    #[test]
    fn test_zero_total_is_kept_and_flagged() {
        let doc = parse(r#"[{"title":"Empty","current":3,"total":0}]"#);

        assert_eq!(doc.registry.len(), 1);
        assert_eq!(
            doc.diagnostics,
            [Diagnostic::ZeroTotal {
                index: 0,
                title: "Empty".to_string()
            }]
        );
    }

    #[test]
    fn test_non_object_elements_are_skipped() {
        let doc = parse(r#"[1, {"title":"A","total":1}, "x"]"#);

        assert_eq!(doc.registry.len(), 1);
        assert_eq!(
            doc.diagnostics,
            [
                Diagnostic::NotAnObject { index: 0, found: "a number" },
                Diagnostic::NotAnObject { index: 2, found: "a string" },
            ]
        );
    }

    #[test]
    fn test_long_titles_are_truncated() {
        let title = "x".repeat(80);
        let doc = parse(&format!(r#"[{{"title":"{title}","total":1}}]"#));

        assert_eq!(
            doc.registry.get(0).map(|b| b.title.len()),
            Some(crate::MAX_TITLE_CHARS)
        );
    }

    // ── capacity ──────────────────────────────────────────────────────────────

    #[test]
    fn test_more_than_capacity_keeps_first_hundred() {
        // Arrange
        let items: Vec<String> = (0..120)
            .map(|i| format!(r#"{{"title":"bar {i}","current":{i},"total":200}}"#))
            .collect();
        let text = format!("[{}]", items.join(","));

        // Act
        let doc = parse(&text);

        // Assert
        assert_eq!(doc.registry.len(), MAX_BARS);
        assert_eq!(doc.registry.get(99).map(|b| b.title.as_str()), Some("bar 99"));
        assert_eq!(
            doc.diagnostics,
            [Diagnostic::CapacityExceeded { kept: 100, dropped: 20 }]
        );
    }

    #[test]
    fn test_dropped_records_produce_no_field_diagnostics() {
        // Arrange: the record past capacity has a bad colour and a zero total
        let mut items: Vec<String> = (0..MAX_BARS)
            .map(|i| format!(r#"{{"title":"bar {i}","total":1}}"#))
            .collect();
        items.push(r##"{"title":"late","color":"#ZZZZZZ"}"##.to_string());

        // Act
        let doc = parse(&format!("[{}]", items.join(",")));

        // Assert
        assert_eq!(doc.registry.len(), MAX_BARS);
        assert!(doc.registry.iter().all(|b| b.title != "late"));
        assert_eq!(
            doc.diagnostics,
            [Diagnostic::CapacityExceeded { kept: 100, dropped: 1 }]
        );
    }

    // ── empty and malformed input ─────────────────────────────────────────────

    #[test]
    fn test_empty_and_blank_input_yield_no_records() {
        assert!(parse("").registry.is_empty());
        assert!(parse("  \n\t ").registry.is_empty());
        assert!(parse("[]").registry.is_empty());
    }

    #[test]
    fn test_unterminated_object_is_a_syntax_error() {
        let err = parse_document(r#"[{"title":"A","total":1"#).unwrap_err();

        assert!(matches!(err, DocumentError::Syntax { line: 1, .. }));
    }

    #[test]
    fn test_missing_comma_reports_line_and_column() {
        // Arrange
        let text = "[\n  {\"total\": 1}\n  {\"total\": 2}\n]";

        // Act
        let err = parse_document(text).unwrap_err();

        // Assert
        match err {
            DocumentError::Syntax { line, column, message } => {
                assert_eq!(line, 3);
                assert!(column > 0);
                assert!(!message.contains("at line"), "position is not repeated: {message}");
            }
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_top_level_object_is_rejected() {
        assert_eq!(
            parse_document(r#"{"title":"A"}"#),
            Err(DocumentError::NotAnArray { found: "an object" })
        );
    }

    #[test]
    fn test_oversized_document_is_rejected() {
        let text = " ".repeat(MAX_DOCUMENT_BYTES + 1);

        assert!(matches!(
            parse_document(&text),
            Err(DocumentError::TooLarge { .. })
        ));
    }
}
