//! Catalog of recognized Wikipedia language codes.

mod codes;

use std::collections::HashSet;
use std::sync::OnceLock;

static CATALOG: OnceLock<HashSet<&'static str>> = OnceLock::new();

fn catalog() -> &'static HashSet<&'static str> {
    CATALOG.get_or_init(|| codes::WIKIPEDIA_CODES.iter().copied().collect())
}

/// Returns `true` when `code` names a Wikipedia edition.
///
/// Matching is exact: callers normalize case and whitespace before asking.
pub fn is_supported(code: &str) -> bool {
    catalog().contains(code)
}

pub fn is_unsupported(code: &str) -> bool {
    !is_supported(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_editions_are_supported() {
        for code in ["en", "es", "fr", "ru", "lv", "lt", "zh-yue", "simple"] {
            assert!(is_supported(code), "{code} should be supported");
        }
    }

    #[test]
    fn unknown_codes_are_unsupported() {
        for code in ["", "xx", "EN", " en", "english", "en-us"] {
            assert!(is_unsupported(code), "{code:?} should be unsupported");
        }
    }

    #[test]
    fn table_has_no_duplicates() {
        assert_eq!(catalog().len(), codes::WIKIPEDIA_CODES.len());
        assert!(catalog().len() > 300);
    }
}
