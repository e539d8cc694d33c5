//! Slug derivation for categories, tags and posts.

/// Convert text into a URL-safe slug.
///
/// Transforms to lowercase, replaces non-alphanumeric characters with
/// hyphens, collapses consecutive hyphens, and trims leading/trailing
/// hyphens. An explicit slug supplied by an editor bypasses this entirely;
/// derivation only runs when the slug field is empty.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mapped: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();

    // Collapse consecutive hyphens and trim
    let mut result = String::with_capacity(mapped.len());
    let mut prev_was_hyphen = true; // Start true to skip leading hyphens
    for c in mapped.chars() {
        if c == '-' {
            if !prev_was_hyphen {
                result.push('-');
            }
            prev_was_hyphen = true;
        } else {
            result.push(c);
            prev_was_hyphen = false;
        }
    }

    while result.ends_with('-') {
        result.pop();
    }

    result
}

/// Use the explicit slug verbatim when present and non-empty, otherwise
/// derive one from the source text.
#[must_use]
pub fn slug_or_derive(explicit: Option<&str>, source: &str) -> String {
    match explicit {
        Some(slug) if !slug.is_empty() => slug.to_string(),
        _ => slugify(source),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("Choroby neurologiczne"), "choroby-neurologiczne");
    }

    #[test]
    fn test_slugify_special_chars() {
        assert_eq!(slugify("What's New?"), "what-s-new");
        assert_eq!(slugify("Padaczka: objawy & leczenie"), "padaczka-objawy-leczenie");
    }

    #[test]
    fn test_slugify_consecutive_hyphens() {
        assert_eq!(slugify("hello   world"), "hello-world");
        assert_eq!(slugify("a---b"), "a-b");
    }

    #[test]
    fn test_slugify_leading_trailing() {
        assert_eq!(slugify("  hello  "), "hello");
        assert_eq!(slugify("---hello---"), "hello");
    }

    #[test]
    fn test_slugify_empty() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("---"), "");
    }

    #[test]
    fn test_explicit_slug_is_preserved_verbatim() {
        assert_eq!(
            slug_or_derive(Some("My-Custom-Slug"), "Some Title"),
            "My-Custom-Slug"
        );
    }

    #[test]
    fn test_empty_explicit_slug_falls_back_to_derivation() {
        assert_eq!(slug_or_derive(Some(""), "Some Title"), "some-title");
        assert_eq!(slug_or_derive(None, "Some Title"), "some-title");
    }
}
