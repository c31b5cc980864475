//! URL slug derivation for post and category titles.

#[cfg(test)]
#[path = "slug_test.rs"]
mod slug_test;

/// Lowercase the title, drop punctuation, and hyphenate whitespace runs.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut last_hyphen = true;
    for ch in title.to_lowercase().chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch);
            last_hyphen = false;
        } else if (ch.is_whitespace() || ch == '-' || ch == '_') && !last_hyphen {
            slug.push('-');
            last_hyphen = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}
