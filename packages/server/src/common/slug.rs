//! URL slug derivation for property titles.

use std::future::Future;

use anyhow::Result;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Normalizes a free-text title into a URL-safe slug.
///
/// Accents are stripped via NFD decomposition, everything is lower-cased,
/// whitespace runs become single hyphens, remaining non-alphanumeric
/// characters are dropped, and hyphens never repeat or touch the ends.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    // Starting "after a hyphen" trims leading separators.
    let mut at_boundary = true;
    for c in title.nfd() {
        if is_combining_mark(c) {
            continue;
        }
        if c.is_whitespace() || c == '-' || c == '_' {
            if !at_boundary {
                slug.push('-');
                at_boundary = true;
            }
            continue;
        }
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            at_boundary = false;
        }
        // Anything else (punctuation, symbols, leftover non-ASCII) is dropped.
    }
    if slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Derives a unique slug for `title` against an injected existence check.
///
/// If the base candidate is taken, a random numeric suffix in [0, 999] is
/// appended and the result is returned without a second check. The unique
/// constraint on the slug column is the authoritative backstop for the
/// remaining collision window.
pub async fn generate_slug<F, Fut>(title: &str, exists: F) -> Result<String>
where
    F: FnOnce(String) -> Fut,
    Fut: Future<Output = Result<bool>>,
{
    let mut base = slugify(title);
    if base.is_empty() {
        base = "listing".to_string();
    }
    if exists(base.clone()).await? {
        Ok(format!("{}-{}", base, fastrand::u32(0..1000)))
    } else {
        Ok(base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_accents_and_punctuation() {
        assert_eq!(slugify("Ático en São João"), "atico-en-sao-joao");
        assert_eq!(slugify("Casa Bonita #1"), "casa-bonita-1");
    }

    #[test]
    fn collapses_and_trims_separators() {
        assert_eq!(slugify("  Piso --- céntrico  "), "piso-centrico");
        assert_eq!(slugify("--"), "");
    }

    #[tokio::test]
    async fn free_slug_is_returned_unchanged() {
        let slug = generate_slug("Casa Bonita #1", |_| async { Ok(false) })
            .await
            .unwrap();
        assert_eq!(slug, "casa-bonita-1");
    }

    #[tokio::test]
    async fn taken_slug_gets_a_numeric_suffix() {
        let first = generate_slug("Casa Bonita", |_| async { Ok(true) })
            .await
            .unwrap();
        let rest = first.strip_prefix("casa-bonita-").unwrap();
        assert!(rest.parse::<u32>().unwrap() < 1000);

        // Two derivations against a taken base should not collide with the
        // base itself.
        let second = generate_slug("Casa Bonita", |_| async { Ok(true) })
            .await
            .unwrap();
        assert_ne!(second, "casa-bonita");
    }

    #[tokio::test]
    async fn symbol_only_title_falls_back() {
        let slug = generate_slug("###", |_| async { Ok(false) }).await.unwrap();
        assert_eq!(slug, "listing");
    }
}
