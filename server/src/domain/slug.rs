//! Slug Generation
//!
//! URL slugs for programs and colleges: lowercase, alphanumerics kept,
//! runs of everything else collapsed to single hyphens.

/// Turn a display name into a URL slug ("BCA Program" -> "bca-program")
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_slug() {
        assert_eq!(slugify("BCA Program"), "bca-program");
        assert_eq!(slugify("Bachelor of Computer Applications"), "bachelor-of-computer-applications");
    }

    #[test]
    fn test_punctuation_collapses() {
        assert_eq!(slugify("St. Xavier's College"), "st-xavier-s-college");
        assert_eq!(slugify("  spaced   out  "), "spaced-out");
    }

    #[test]
    fn test_no_leading_or_trailing_hyphen() {
        assert_eq!(slugify("!!BSc CSIT!!"), "bsc-csit");
        assert_eq!(slugify(""), "");
    }
}
