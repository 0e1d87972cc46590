//! URL slug derivation for blog posts and stories.
//!
//! Slugs are derived from titles at creation time when the administrator does
//! not supply one. Uniqueness is enforced by the database only (`uq_*_slug`),
//! so a collision surfaces as a conflict from the repository layer.

use std::sync::LazyLock;

use regex::Regex;

/// A well-formed slug: lowercase ASCII alphanumeric runs joined by single hyphens.
static SLUG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("valid slug regex"));

/// Return `explicit` unchanged when it is non-empty, otherwise derive a slug
/// from `title`.
///
/// Derivation lower-cases the title, collapses every maximal run of characters
/// outside `[a-z0-9]` into a single hyphen, then strips one leading and one
/// trailing hyphen.
///
/// ```
/// use vows_core::slug::slugify;
///
/// assert_eq!(slugify("Ana & Pedro!!", None), "ana-pedro");
/// assert_eq!(slugify("Ana & Pedro", Some("custom")), "custom");
/// ```
pub fn slugify(title: &str, explicit: Option<&str>) -> String {
    if let Some(slug) = explicit.filter(|s| !s.is_empty()) {
        return slug.to_string();
    }

    let lowered = title.to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut in_separator = false;

    for ch in lowered.chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            slug.push(ch);
            in_separator = false;
        } else if !in_separator {
            slug.push('-');
            in_separator = true;
        }
    }

    let slug = slug.strip_prefix('-').unwrap_or(&slug);
    let slug = slug.strip_suffix('-').unwrap_or(slug);
    slug.to_string()
}

/// Check that `slug` has the shape [`slugify`] derives from a title.
pub fn is_valid_slug(slug: &str) -> bool {
    SLUG_PATTERN.is_match(slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_from_title() {
        assert_eq!(slugify("Ana & Pedro!!", None), "ana-pedro");
    }

    #[test]
    fn explicit_slug_wins() {
        assert_eq!(slugify("Ana & Pedro", Some("meu-slug")), "meu-slug");
        assert_eq!(slugify("", Some("x")), "x");
    }

    #[test]
    fn empty_explicit_slug_is_ignored() {
        assert_eq!(slugify("Julia e Marcos", Some("")), "julia-e-marcos");
    }

    #[test]
    fn any_non_empty_explicit_slug_is_kept_verbatim() {
        let explicit = [
            " x ",
            "   ",
            "Meu Post",
            "MiXeD-Case",
            "\tcom\ttab\n",
            "--",
            "ação",
            "a/b?c",
        ];
        for title in ["Julia e Marcos", "", "!!!"] {
            for slug in explicit {
                assert_eq!(slugify(title, Some(slug)), slug, "title {title:?}");
            }
        }
    }

    #[test]
    fn collapses_runs_and_trims_edges() {
        assert_eq!(slugify("  --Hello,   World--  ", None), "hello-world");
        assert_eq!(slugify("!!!", None), "");
        assert_eq!(slugify("2024 Casamentos", None), "2024-casamentos");
    }

    #[test]
    fn non_ascii_letters_become_separators() {
        // Accented letters fall outside [a-z0-9] and act as separators.
        assert_eq!(slugify("Casamento em Florianópolis", None), "casamento-em-florian-polis");
        assert_eq!(slugify("Camila & Rafael – Joinville", None), "camila-rafael-joinville");
    }

    #[test]
    fn derived_slugs_are_always_well_formed() {
        let titles = [
            "Ana & Pedro!!",
            "Um dia perfeito",
            "  Praia   do Rosa ",
            "x",
            "a--b",
            "Ação & Reação 2025",
            "-lead and trail-",
        ];
        for title in titles {
            let slug = slugify(title, None);
            assert!(
                slug.chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'),
                "unexpected character in {slug:?}"
            );
            assert!(!slug.starts_with('-') && !slug.ends_with('-'), "{slug:?}");
            assert!(!slug.contains("--"), "{slug:?}");
            assert!(slug.is_empty() || is_valid_slug(&slug), "{slug:?}");
        }
    }

    #[test]
    fn slug_validation() {
        assert!(is_valid_slug("ana-pedro"));
        assert!(is_valid_slug("2024"));
        assert!(!is_valid_slug("Ana-Pedro"));
        assert!(!is_valid_slug("-ana"));
        assert!(!is_valid_slug("ana--pedro"));
        assert!(!is_valid_slug(""));
    }
}
