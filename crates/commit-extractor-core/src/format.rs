//! Payload encoders for the published value.

use crate::domain::OutputFormat;
use crate::extract::is_blank;

/// Encode `value` in the requested format.
///
/// A blank value is returned unchanged for every format.
pub fn format_output(value: &str, format: OutputFormat) -> String {
    if is_blank(value) {
        return value.to_string();
    }

    match format {
        OutputFormat::Text => value.to_string(),
        OutputFormat::Json => to_json_array(value),
        OutputFormat::Csv => to_csv_record(value),
    }
}

/// Non-blank lines of `value` in their original order.
fn payload_lines(value: &str) -> impl Iterator<Item = &str> {
    value.split('\n').filter(|line| !is_blank(line))
}

/// Compact JSON array of the non-blank lines. Non-ASCII is emitted raw.
pub fn to_json_array(value: &str) -> String {
    let lines: Vec<&str> = payload_lines(value).collect();
    serde_json::Value::from(lines).to_string()
}

/// Single CSV record of the non-blank lines.
///
/// Embedded quotes are doubled; a field is quoted when the original line
/// contains a comma or a quote.
pub fn to_csv_record(value: &str) -> String {
    payload_lines(value)
        .map(|line| {
            let escaped = line.replace('"', "\"\"");
            if line.contains(',') || line.contains('"') {
                format!("\"{escaped}\"")
            } else {
                escaped
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}
