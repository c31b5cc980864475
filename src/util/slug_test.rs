use super::*;

// =============================================================
// slugify
// =============================================================

#[test]
fn slugify_lowercases_and_hyphenates() {
    assert_eq!(slugify("Hello World"), "hello-world");
}

#[test]
fn slugify_strips_punctuation() {
    assert_eq!(slugify("What's new, in 2026?"), "whats-new-in-2026");
}

#[test]
fn slugify_collapses_separator_runs() {
    assert_eq!(slugify("a  -  b___c"), "a-b-c");
}

#[test]
fn slugify_trims_leading_and_trailing_separators() {
    assert_eq!(slugify("  spaced out  "), "spaced-out");
    assert_eq!(slugify("---"), "");
}

#[test]
fn slugify_handles_empty_input() {
    assert_eq!(slugify(""), "");
}
