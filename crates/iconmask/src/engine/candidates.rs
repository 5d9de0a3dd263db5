//! Utility candidate extraction from source markup.
//!
//! Extraction is deliberately loose: any class-like token is a candidate and
//! the engine discards the ones no family accepts.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;

fn candidate_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[A-Za-z0-9_][A-Za-z0-9_.\-]*").expect("valid candidate regex"))
}

/// Collect every class-like token of `source`.
///
/// A token ending in `.` (end of a sentence, a property access) is also
/// recorded without the trailing dots.
///
/// # Example
///
/// ```
/// use iconmask::engine::extract_candidates;
///
/// let found = extract_candidates(r#"<span class="icon-home h-4"></span>"#);
/// assert!(found.contains("icon-home"));
/// assert!(found.contains("h-4"));
/// ```
pub fn extract_candidates(source: &str) -> BTreeSet<String> {
    let mut candidates = BTreeSet::new();
    extend_candidates(&mut candidates, source);
    candidates
}

/// Add the tokens of `source` to an existing set.
pub fn extend_candidates(candidates: &mut BTreeSet<String>, source: &str) {
    for token in candidate_regex().find_iter(source) {
        let token = token.as_str();
        let trimmed = token.trim_end_matches('.');
        if trimmed.len() != token.len() && !trimmed.is_empty() {
            candidates.insert(trimmed.to_string());
        }
        candidates.insert(token.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_classes_in_markup() {
        let found = extract_candidates(
            r#"<button class="btn icon-arrow-left"><.icon name="icon-star" /></button>"#,
        );
        assert!(found.contains("icon-arrow-left"));
        assert!(found.contains("icon-star"));
        assert!(found.contains("btn"));
    }

    #[test]
    fn finds_classes_in_script_strings() {
        let found = extract_candidates("el.classList.toggle('icon-chevron-down', open);");
        assert!(found.contains("icon-chevron-down"));
    }

    #[test]
    fn trailing_dots_are_trimmed() {
        let found = extract_candidates("Use icon-home.");
        assert!(found.contains("icon-home"));
        assert!(found.contains("icon-home."));
    }

    #[test]
    fn duplicates_collapse() {
        let found = extract_candidates("icon-home icon-home icon-home");
        assert_eq!(found.len(), 1);
    }
}
