//! Fixed match tables: stop-phrases, generic names, aliases, separators.
//!
//! Built once on first use and never mutated afterwards.

use std::collections::HashSet;
use std::sync::OnceLock;

/// Read-only tables shared by every engine instance.
#[derive(Debug)]
pub struct MatchTables {
    /// CJK stop-phrases, longest first. Removed wherever they occur.
    pub cjk_stop_phrases: Vec<&'static str>,
    /// Lowercase Latin stop-phrases, longest first. Removed as whole words.
    pub latin_stop_phrases: Vec<&'static str>,
    /// Names too common to serve as sole evidence of identity.
    pub generic_names: HashSet<&'static str>,
    /// `(alias, canonical)` rewrites applied before matching.
    pub aliases: Vec<(&'static str, &'static str)>,
    /// Single-character segment separators.
    pub separators: HashSet<char>,
}

// ---------------------------------------------------------------------------
// Stop-phrases
// ---------------------------------------------------------------------------

const HONORIFICS: &[&str] = &[
    "先生", "小姐", "女士", "夫婦", "夫妇", "一家", "博士", "太太", "藝人", "艺人", "歌手", "演員",
    "演员",
];

const LEGAL_SUFFIXES: &[&str] = &[
    "有限公司", "有限責任公司", "有限责任公司", "集團", "集团", "基金會", "基金会", "控股", "國際",
    "国际", "香港",
];

const HEADLINE_WORDS: &[&str] = &[
    "啟動", "启动", "緊急", "紧急", "宣布", "承諾", "承诺", "累計", "累计", "首批", "追加", "萬元",
    "万元", "元", "人民幣", "人民币", "物資", "物资",
];

const LATIN_STOP_PHRASES: &[&str] = &[
    "limited",
    "ltd",
    "group",
    "foundation",
    "holdings",
    "international",
    "hong kong",
    "hk",
    "co",
];

// ---------------------------------------------------------------------------
// Generic-name guard
// ---------------------------------------------------------------------------

const COMMON_SURNAMES: &[&str] = &[
    "李", "張", "陳", "王", "黃", "林", "劉", "吳", "周", "鄭", "张", "陈", "黄", "刘", "吴", "郑",
];

const JURISDICTIONS: &[&str] = &["中國", "中国", "香港", "台灣", "台湾"];

const STRUCTURAL_NOUNS: &[&str] = &[
    "集團", "集团", "公司", "基金", "銀行", "银行", "藝人", "先生", "小姐", "女士", "夫婦", "一家",
    "捐", "捐款", "捐贈", "捐赠",
];

// ---------------------------------------------------------------------------
// Aliases + separators
// ---------------------------------------------------------------------------

const ALIASES: &[(&str, &str)] = &[
    ("紅十字總會", "紅十字會總會"),
    ("红十字总会", "红十字会总会"),
    ("滙豐", "匯豐"),
    ("恆生", "恒生"),
    ("馬會", "賽馬會"),
];

const SEPARATORS: &[char] = &['、', '/', '／', ',', '，', ';', '；', '及', '與', '与', '和'];

impl MatchTables {
    fn builtin() -> Self {
        let mut cjk_stop_phrases: Vec<&'static str> = HONORIFICS
            .iter()
            .chain(LEGAL_SUFFIXES)
            .chain(HEADLINE_WORDS)
            .copied()
            .collect();
        sort_longest_first(&mut cjk_stop_phrases);

        let mut latin_stop_phrases = LATIN_STOP_PHRASES.to_vec();
        sort_longest_first(&mut latin_stop_phrases);

        let generic_names = COMMON_SURNAMES
            .iter()
            .chain(JURISDICTIONS)
            .chain(STRUCTURAL_NOUNS)
            .copied()
            .collect();

        Self {
            cjk_stop_phrases,
            latin_stop_phrases,
            generic_names,
            aliases: ALIASES.to_vec(),
            separators: SEPARATORS.iter().copied().collect(),
        }
    }
}

fn sort_longest_first(phrases: &mut [&'static str]) {
    phrases.sort_by(|a, b| {
        b.chars()
            .count()
            .cmp(&a.chars().count())
            .then_with(|| a.cmp(b))
    });
}

static TABLES: OnceLock<MatchTables> = OnceLock::new();

/// The process-wide tables.
pub fn tables() -> &'static MatchTables {
    TABLES.get_or_init(MatchTables::builtin)
}
