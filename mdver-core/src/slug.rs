//! Heading anchor generation

/// Create an anchor id from heading text.
///
/// Lowercases, drops anything that is not a letter, digit, whitespace or
/// hyphen, then turns every run of whitespace into a single `-`. Identical
/// text always yields the identical id; uniqueness is not enforced.
pub fn slugify(text: &str) -> String {
    let kept = text
        .to_lowercase()
        .chars()
        .filter(|&c| c.is_alphanumeric() || c.is_whitespace() || c == '-')
        .collect::<String>();

    let mut slug = String::with_capacity(kept.len());
    let mut in_whitespace = false;
    for c in kept.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
            }
            in_whitespace = true;
        } else {
            slug.push(c);
            in_whitespace = false;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_slug() {
        assert_eq!(slugify("Hello World"), "hello-world");
    }

    #[test]
    fn test_punctuation_is_dropped() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("Test & Demo"), "test-demo");
        assert_eq!(slugify("snake_case"), "snakecase");
    }

    #[test]
    fn test_whitespace_runs_collapse() {
        assert_eq!(slugify("A  B"), "a-b");
        assert_eq!(slugify("tab\there"), "tab-here");
        assert_eq!(slugify("Multiple   Spaces"), "multiple-spaces");
    }

    #[test]
    fn test_hyphens_are_kept() {
        assert_eq!(slugify("pre-release notes"), "pre-release-notes");
    }

    #[test]
    fn test_unicode_letters_are_kept() {
        assert_eq!(slugify("Общее описание"), "общее-описание");
        assert_eq!(slugify("Статусы задач 2024"), "статусы-задач-2024");
    }

    #[test]
    fn test_empty_and_symbol_only() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(slugify("Hello, World!"), slugify("Hello, World!"));
    }
}
