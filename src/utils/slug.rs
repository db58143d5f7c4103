//! URL slug derivation

use crate::constants::SLUG_MAX_LENGTH;

/// Derive a URL-safe slug from a title.
///
/// Lowercases the input, collapses every run of non-alphanumeric characters
/// into a single hyphen, strips leading and trailing hyphens, and caps the
/// result at [`SLUG_MAX_LENGTH`] characters. May return an empty string when
/// the input has no alphanumeric characters; callers supply their own
/// fallback base.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut last_was_hyphen = true; // suppresses a leading hyphen

    for c in input.trim().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }
    slug.truncate(SLUG_MAX_LENGTH);
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Append a numeric collision suffix, truncating the base so the total
/// length stays within [`SLUG_MAX_LENGTH`].
pub fn with_suffix(base: &str, attempt: u32) -> String {
    let suffix = format!("-{attempt}");
    let keep = SLUG_MAX_LENGTH.saturating_sub(suffix.len());
    // slugify output is ASCII, so byte slicing is safe
    format!("{}{}", &base[..base.len().min(keep)], suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("HTML"), "html");
        assert_eq!(slugify("Node JS"), "node-js");
        assert_eq!(slugify("  Express Routes!  "), "express-routes");
        assert_eq!(slugify("a -- b__c"), "a-b-c");
    }

    #[test]
    fn test_slugify_strips_edge_hyphens() {
        assert_eq!(slugify("--hello--"), "hello");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_slugify_caps_length() {
        let long = "x".repeat(100);
        assert_eq!(slugify(&long).len(), SLUG_MAX_LENGTH);
    }

    #[test]
    fn test_suffix_keeps_total_under_cap() {
        let base = "y".repeat(SLUG_MAX_LENGTH);
        let with = with_suffix(&base, 12);
        assert_eq!(with.len(), SLUG_MAX_LENGTH);
        assert!(with.ends_with("-12"));
    }

    #[test]
    fn test_suffix_short_base() {
        assert_eq!(with_suffix("html", 3), "html-3");
    }
}
