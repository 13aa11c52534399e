// crates/regionmap-core/src/text.rs

/// Convert a string into a folded key suitable for name comparison.
///
/// This performs:
/// 1\) Transliterate Unicode → ASCII (e.g. `Łódź` -> `Lodz`)
/// 2\) Normalize to lowercase
/// 3\) Collapse `-`, `_` and runs of whitespace into single spaces
///
/// Boundary files and catalogs disagree on spelling details such as
/// `SIBORONG BORONG` versus `Siborong-Borong`; folding makes them equal.
///
/// # Examples
///
/// ```rust
/// use regionmap_core::text::fold_key;
///
/// assert_eq!(fold_key("Siborong-Borong"), "siborong borong");
/// assert_eq!(fold_key("  PAHAE   JULU "), "pahae julu");
/// assert_eq!(fold_key("Łódź"), "lodz");
/// ```
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s)
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Compares two names for equality after folding.
pub fn equals_folded(a: &str, b: &str) -> bool {
    fold_key(a) == fold_key(b)
}

/// Substring match on folded forms. An empty needle never matches.
pub fn contains_folded(haystack: &str, needle: &str) -> bool {
    let needle = fold_key(needle);
    !needle.is_empty() && fold_key(haystack).contains(&needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folding_ignores_case_and_separators() {
        assert!(equals_folded("SIBORONG BORONG", "Siborong-Borong"));
        assert!(!equals_folded("Muara", "Pagaran"));
    }

    #[test]
    fn contains_requires_a_needle() {
        assert!(contains_folded("Kecamatan Pahae Jae", "PAHAE JAE"));
        assert!(!contains_folded("Kecamatan Muara", ""));
        assert!(!contains_folded("Kecamatan Muara", "   "));
    }
}
