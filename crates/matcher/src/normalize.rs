//! Name normalization: the comparison form of a donor name.

use std::sync::OnceLock;

use regex::Regex;

use crate::tables::{tables, MatchTables};

/// Parenthetical stock / registration codes: "(0384)", "（股份代號：0700）", "[2318.HK]".
const CODE_PATTERN: &str = r"(?i)[(（\[【〔]\s*(?:(?:股份代號|股票代號|股份代号|股票代码|stock\s*code)\s*[:：]?\s*)?\d{1,6}(?:\.[a-z]{1,3})?\s*[)）\]】〕]";

static CODE_RE: OnceLock<Regex> = OnceLock::new();

fn code_re() -> &'static Regex {
    CODE_RE.get_or_init(|| Regex::new(CODE_PATTERN).expect("code pattern compiles"))
}

/// Normalize a raw donor name for comparison.
///
/// Removes parenthetical codes, punctuation and stop-phrases, lowercases,
/// and collapses whitespace. Runs to a fixed point, so the result is stable
/// under a second application. May return an empty string.
pub fn normalize(name: &str) -> String {
    let t = tables();
    let mut current = normalize_once(name, t);
    loop {
        let next = normalize_once(&current, t);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn normalize_once(name: &str, t: &MatchTables) -> String {
    let s = strip_codes(name).to_lowercase();
    let s = strip_punctuation(&s);
    let s = collapse_whitespace(&s);
    let s = strip_stop_phrases(&s, t);
    collapse_whitespace(&s)
}

/// Remove parenthetical numeric codes.
pub fn strip_codes(name: &str) -> String {
    code_re().replace_all(name, " ").into_owned()
}

/// Remove every stop-phrase: CJK phrases anywhere, Latin phrases as whole words.
///
/// Expects lowercase input.
pub fn strip_stop_phrases(s: &str, t: &MatchTables) -> String {
    let mut out = s.to_string();
    for phrase in &t.cjk_stop_phrases {
        if out.contains(phrase) {
            out = out.replace(phrase, "");
        }
    }
    for phrase in &t.latin_stop_phrases {
        if out.contains(phrase) {
            out = remove_latin_word(&out, phrase);
        }
    }
    out
}

/// Rewrite known organizational aliases to their canonical form.
pub fn apply_aliases(name: &str) -> String {
    let mut out = name.to_string();
    for (alias, canonical) in &tables().aliases {
        if out.contains(alias) && !out.contains(canonical) {
            out = out.replace(alias, canonical);
        }
    }
    out
}

/// True for CJK unified ideographs (including extension A and compatibility).
pub fn is_cjk(c: char) -> bool {
    matches!(
        c,
        '\u{4E00}'..='\u{9FFF}'
            | '\u{3400}'..='\u{4DBF}'
            | '\u{F900}'..='\u{FAFF}'
            | '\u{20000}'..='\u{2A6DF}'
    )
}

fn is_latin_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

fn strip_punctuation(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect()
}

/// Collapse whitespace runs to one space; drop spaces next to a CJK character.
fn collapse_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for word in s.split_whitespace() {
        if let (Some(prev), Some(next)) = (out.chars().next_back(), word.chars().next()) {
            if !is_cjk(prev) && !is_cjk(next) {
                out.push(' ');
            }
        }
        out.push_str(word);
    }
    out
}

/// Remove `phrase` (ASCII, lowercase) where it is not part of a longer Latin word.
fn remove_latin_word(s: &str, phrase: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    let mut prev: Option<char> = None;

    while let Some(pos) = rest.find(phrase) {
        let before = rest[..pos].chars().next_back().or(prev);
        let after = rest[pos + phrase.len()..].chars().next();
        let bounded = !before.is_some_and(is_latin_word_char) && !after.is_some_and(is_latin_word_char);

        if bounded {
            out.push_str(&rest[..pos]);
            out.push(' ');
            prev = Some(' ');
            rest = &rest[pos + phrase.len()..];
        } else {
            // phrase is ASCII, so pos + 1 is a char boundary
            out.push_str(&rest[..pos + 1]);
            prev = rest[..pos + 1].chars().next_back();
            rest = &rest[pos + 1..];
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_parenthetical_codes_in_any_bracket() {
        assert_eq!(normalize("中國燃氣（0384）"), "中國燃氣");
        assert_eq!(normalize("中國燃氣(0384)"), "中國燃氣");
        assert_eq!(normalize("騰訊控股【0700.HK】"), "騰訊");
        assert_eq!(normalize("平安（股份代號：2318）"), "平安");
    }

    #[test]
    fn keeps_non_code_parentheses_content() {
        assert_eq!(normalize("東亞(中國)銀行"), "東亞中國銀行");
    }

    #[test]
    fn strips_honorifics_and_suffixes_anywhere() {
        assert_eq!(normalize("刘亦菲女士"), "刘亦菲");
        assert_eq!(normalize("長江和記實業有限公司"), "長江和記實業");
        assert_eq!(normalize("新世界發展集團宣布捐款"), "新世界發展捐款");
        assert_eq!(normalize("李嘉誠基金會承諾捐出1億元"), "李嘉誠捐出1億");
    }

    #[test]
    fn latin_phrases_removed_as_whole_words() {
        assert_eq!(normalize("Swire Pacific Limited"), "swire pacific");
        assert_eq!(normalize("HSBC Holdings plc"), "hsbc plc");
        assert_eq!(normalize("Jardine Matheson Group (HK) Ltd."), "jardine matheson");
        assert_eq!(normalize("HKEX"), "hkex");
        assert_eq!(normalize("Cathay Hong  Kong"), "cathay");
    }

    #[test]
    fn collapses_whitespace_and_case() {
        assert_eq!(normalize("  Li   &  Fung  "), "li fung");
        assert_eq!(normalize("張智霖  袁詠儀"), "張智霖袁詠儀");
    }

    #[test]
    fn over_stripped_name_is_empty_not_error() {
        assert_eq!(normalize("香港有限公司"), "");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn nested_stop_phrases_reach_fixed_point() {
        let once = normalize("有限有限公司公司");
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn idempotent_on_samples() {
        for sample in [
            "中國燃氣（0384）",
            "Hong  Kong Jockey Club",
            "藝人張智霖先生 及 袁詠儀小姐一家",
            "ABC Group/XYZ Ltd",
            "紅十字會總會",
        ] {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "sample {sample:?}");
        }
    }

    #[test]
    fn aliases_rewrite_to_canonical() {
        assert_eq!(apply_aliases("中國紅十字總會"), "中國紅十字會總會");
        assert_eq!(apply_aliases("紅十字會總會"), "紅十字會總會");
        assert_eq!(apply_aliases("香港賽馬會"), "香港賽馬會");
        assert_eq!(apply_aliases("馬會"), "賽馬會");
    }

    #[test]
    fn cjk_detection() {
        assert!(is_cjk('中'));
        assert!(is_cjk('㐀'));
        assert!(!is_cjk('a'));
        assert!(!is_cjk('、'));
    }
}
