//! Line-set extraction over transform output.

use std::collections::BTreeSet;

/// Whether `value` is empty or whitespace only.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Collapse command output into a sorted, deduplicated, newline-joined set.
///
/// The output is trimmed as a whole, split on `\n`, and whitespace-only lines
/// are dropped. Ordering is byte-wise ascending, which for UTF-8 matches
/// code point order.
pub fn unique_sorted_lines(output: &str) -> String {
    let lines: BTreeSet<&str> = output
        .trim()
        .split('\n')
        .filter(|line| !is_blank(line))
        .collect();

    lines.into_iter().collect::<Vec<_>>().join("\n")
}
