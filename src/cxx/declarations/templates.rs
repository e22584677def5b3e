//! Template-argument text helpers
//!
//! Angle-bracket argument lists are matched innermost-first with a pattern
//! that refuses `<`, `>`, and `=` inside the brackets, so `operator<=`,
//! `->`, and comparison expressions never count as template arguments.

use once_cell::sync::Lazy;
use regex::Regex;

static TEMPLATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new("<[^<>=]*>").unwrap_or_else(|e| panic!("template pattern: {e}"))
});

/// Remove all template arguments from `name`, innermost lists first so
/// nested templates collapse outward.
pub fn strip(name: &str) -> String {
    let mut s = name.to_string();
    while let Some(found) = TEMPLATE_PATTERN.find(&s) {
        let range = found.range();
        s.replace_range(range, "");
    }
    s
}

/// Whether `name` carries at least one template-argument list.
pub fn has_template_args(name: &str) -> bool {
    TEMPLATE_PATTERN.is_match(name)
}

/// Split `name` at `::` separators, ignoring separators nested inside
/// template arguments.
pub fn split_namespace(name: &str) -> Vec<String> {
    // mask template spans so :: inside them is invisible to the scan
    let mut masked = name.to_string();
    while let Some(found) = TEMPLATE_PATTERN.find(&masked) {
        let range = found.range();
        let dots = ".".repeat(range.len());
        masked.replace_range(range, &dots);
    }
    let mut parts = Vec::new();
    let mut start = 0;
    while let Some(i) = masked[start..].find("::") {
        let i = start + i;
        parts.push(name[start..i].to_string());
        start = i + 2;
    }
    parts.push(name[start..].to_string());
    parts
}
