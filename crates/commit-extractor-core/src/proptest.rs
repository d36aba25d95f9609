//! Property-based tests for extraction and formatting.
//!
//! These tests use proptest to verify invariants around:
//! - Deduplication and ordering of extracted lines
//! - Blank-line exclusion
//! - JSON and CSV encodings of arbitrary commit text

use crate::domain::OutputFormat;
use crate::extract::{is_blank, unique_sorted_lines};
use crate::format::{format_output, to_csv_record, to_json_array};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

/// Single lines of commit-ish text, including commas, quotes and blanks.
fn arb_line() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::string::string_regex("[a-z]{1,8}(: [a-z ,\"]{0,12})?").unwrap(),
        Just(String::new()),
        Just("   ".to_string()),
        prop::string::string_regex("[é✓a-c]{1,4}").unwrap(),
    ]
}

fn arb_text() -> impl Strategy<Value = String> {
    prop::collection::vec(arb_line(), 0..24).prop_map(|lines| lines.join("\n"))
}

fn non_blank_lines(value: &str) -> Vec<&str> {
    value.split('\n').filter(|l| !is_blank(l)).collect()
}

// ============================================================================
// Extraction
// ============================================================================

proptest! {
    #[test]
    fn extracted_lines_are_sorted_and_unique(text in arb_text()) {
        let extracted = unique_sorted_lines(&text);
        if !extracted.is_empty() {
            let lines: Vec<&str> = extracted.split('\n').collect();
            for pair in lines.windows(2) {
                prop_assert!(pair[0] < pair[1], "{:?} !< {:?}", pair[0], pair[1]);
            }
        }
    }

    #[test]
    fn extracted_lines_are_never_blank(text in arb_text()) {
        let extracted = unique_sorted_lines(&text);
        if !extracted.is_empty() {
            prop_assert!(extracted.split('\n').all(|l| !is_blank(l)));
        }
    }
}

// ============================================================================
// Formatting
// ============================================================================

proptest! {
    #[test]
    fn json_decodes_to_non_blank_lines(text in arb_text()) {
        let encoded = to_json_array(&text);
        let decoded: Vec<String> = serde_json::from_str(&encoded).unwrap();
        prop_assert_eq!(decoded, non_blank_lines(&text));
    }

    #[test]
    fn csv_fields_follow_quoting_rules(text in arb_text()) {
        let lines = non_blank_lines(&text);
        let expected: Vec<String> = lines
            .iter()
            .map(|l| {
                if l.contains(',') || l.contains('"') {
                    format!("\"{}\"", l.replace('"', "\"\""))
                } else {
                    l.to_string()
                }
            })
            .collect();
        prop_assert_eq!(to_csv_record(&text), expected.join(","));
    }

    #[test]
    fn text_format_is_identity(text in arb_text()) {
        prop_assert_eq!(format_output(&text, OutputFormat::Text), text);
    }
}
