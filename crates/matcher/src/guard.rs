use crate::normalize::is_cjk;
use crate::tables::tables;

/// Minimum length (in chars) for a name containing any CJK ideograph.
pub const MIN_CJK_LEN: usize = 2;
/// Minimum length (in chars) for a pure-Latin name.
pub const MIN_LATIN_LEN: usize = 4;

/// True when `name` is too short or too common to identify a donor on its own.
pub fn is_too_generic(name: &str) -> bool {
    let name = name.trim().to_lowercase();
    if name.is_empty() {
        return true;
    }

    let len = name.chars().count();
    let min = if name.chars().any(is_cjk) {
        MIN_CJK_LEN
    } else {
        MIN_LATIN_LEN
    };
    if len < min {
        return true;
    }

    is_denylisted(&name)
}

/// True when `name` is on the fixed generic-name denylist, whatever its length.
pub fn is_denylisted(name: &str) -> bool {
    tables()
        .generic_names
        .contains(name.trim().to_lowercase().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jurisdictions_are_generic() {
        assert!(is_too_generic("中國"));
        assert!(is_too_generic("中国"));
        assert!(is_too_generic("香港"));
        assert!(is_too_generic("台灣"));
    }

    #[test]
    fn two_char_brand_is_not_generic() {
        assert!(!is_too_generic("東亞"));
        assert!(!is_too_generic("騰訊"));
    }

    #[test]
    fn single_surname_is_generic() {
        assert!(is_too_generic("李"));
        assert!(is_too_generic("陳"));
        assert!(is_too_generic("何"));
    }

    #[test]
    fn structural_nouns_match_exactly_not_by_substring() {
        assert!(is_too_generic("銀行"));
        assert!(is_too_generic("捐款"));
        assert!(!is_too_generic("東亞銀行"));
        assert!(!is_too_generic("中國燃氣"));
    }

    #[test]
    fn denylist_ignores_length() {
        assert!(is_denylisted(" 台灣 "));
        assert!(!is_denylisted("ibm"));
        assert!(!is_denylisted("東亞"));
    }

    #[test]
    fn latin_minimum_is_four() {
        assert!(is_too_generic("hsb"));
        assert!(!is_too_generic("HSBC"));
        assert!(is_too_generic("  "));
        assert!(is_too_generic(""));
    }
}
