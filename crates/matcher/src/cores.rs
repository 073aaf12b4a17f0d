//! Core-name extraction: split a multi-donor string into atomic names.

use crate::normalize::{strip_codes, strip_stop_phrases};
use crate::tables::{tables, MatchTables};

/// Minimum length (in chars) of a retained core.
pub const MIN_CORE_LEN: usize = 2;

/// Split `name` into core names, in left-to-right order.
///
/// Cores are lowercased, stripped of stop-phrases and parenthetical codes,
/// and at least [`MIN_CORE_LEN`] chars long. Codes are removed from the whole
/// name before splitting, since a labelled code may contain whitespace.
pub fn extract_cores(name: &str) -> Vec<String> {
    let t = tables();
    split_segments(&strip_codes(name), t)
        .iter()
        .map(|segment| clean_segment(segment, t))
        .filter(|core| core.chars().count() >= MIN_CORE_LEN)
        .collect()
}

/// Split on separator characters and on whitespace runs. Whitespace between
/// two Latin alphanumerics does not split, so "Jack Ma" stays one segment.
fn split_segments(name: &str, t: &MatchTables) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut pending_space = false;

    for c in name.chars() {
        if t.separators.contains(&c) {
            flush(&mut segments, &mut current);
            pending_space = false;
            continue;
        }
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space {
            let joins_latin = current
                .chars()
                .next_back()
                .is_some_and(|prev| prev.is_ascii_alphanumeric())
                && c.is_ascii_alphanumeric();
            if joins_latin {
                current.push(' ');
            } else {
                flush(&mut segments, &mut current);
            }
            pending_space = false;
        }
        current.push(c);
    }
    flush(&mut segments, &mut current);
    segments
}

fn flush(segments: &mut Vec<String>, current: &mut String) {
    if !current.is_empty() {
        segments.push(std::mem::take(current));
    }
}

fn clean_segment(segment: &str, t: &MatchTables) -> String {
    let lowered = segment.to_lowercase();
    let stripped = strip_stop_phrases(&lowered, t);
    stripped
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_string()
}
