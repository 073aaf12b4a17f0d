//! The match engine: an ordered cascade of strategies, first hit wins.
//!
//! 1. alias rewrite (both sides)
//! 2. direct substring on normalized names
//! 3. scraped → Traditional, containment against existing
//! 4. existing → Simplified, containment against scraped
//! 5. core-name exact, then core-name substring
//! 6. multi-person quorum (both sides ≥ 2 cores, denylisted cores ignored)

use std::sync::OnceLock;

use crate::cores::extract_cores;
use crate::guard::{is_denylisted, is_too_generic};
use crate::model::{MatchReason, MatchVerdict};
use crate::normalize::{apply_aliases, normalize};
use crate::script::{CharTableConverter, ScriptConverter};

/// Distinct scraped cores that must be corroborated for a quorum match.
pub const QUORUM: usize = 2;

#[derive(Debug, Clone, Default)]
pub struct MatchEngine<C = CharTableConverter> {
    converter: C,
}

impl MatchEngine<CharTableConverter> {
    /// Engine backed by the built-in character table.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: ScriptConverter> MatchEngine<C> {
    pub fn with_converter(converter: C) -> Self {
        Self { converter }
    }

    pub fn converter(&self) -> &C {
        &self.converter
    }

    /// Decide whether `scraped` denotes the same donor as `existing`.
    pub fn match_entities(&self, scraped: &str, existing: &str) -> MatchVerdict {
        if scraped.trim().is_empty() || existing.trim().is_empty() {
            return MatchVerdict::empty();
        }

        let scraped = apply_aliases(scraped);
        let existing = apply_aliases(existing);
        let scraped_norm = normalize(&scraped);
        let existing_norm = normalize(&existing);

        if substring_match(&scraped_norm, &existing_norm) {
            return MatchVerdict::hit(MatchReason::Direct, scraped_norm, existing_norm);
        }

        let forward = self.converter.to_traditional(&scraped_norm);
        if substring_match(&forward, &existing_norm) {
            return MatchVerdict::hit(MatchReason::ScriptConvertedForward, forward, existing_norm);
        }

        let backward = self.converter.to_simplified(&existing_norm);
        if substring_match(&scraped_norm, &backward) {
            return MatchVerdict::hit(MatchReason::ScriptConvertedBackward, scraped_norm, backward);
        }

        let scraped_cores = extract_cores(&scraped);
        let existing_cores = extract_cores(&existing);

        if let Some(verdict) = self.core_match(&scraped_cores, &existing_cores) {
            return verdict;
        }

        if scraped_cores.len() >= QUORUM && existing_cores.len() >= QUORUM {
            if let Some(verdict) = self.quorum_match(&scraped_cores, &existing_cores) {
                return verdict;
            }
        }

        MatchVerdict::no_match()
    }

    /// Step 5: every core paired with every core, Traditional variants included.
    /// All exact pairings are tried before any substring pairing.
    fn core_match(&self, scraped: &[String], existing: &[String]) -> Option<MatchVerdict> {
        let left = self.with_traditional(scraped);
        let right = self.with_traditional(existing);

        for s in &left {
            for e in &right {
                if s == e && !is_too_generic(s) && !is_too_generic(e) {
                    return Some(MatchVerdict::hit(MatchReason::CoreExact, s.as_str(), e.as_str()));
                }
            }
        }

        for s in &left {
            for e in &right {
                if (s.contains(e.as_str()) || e.contains(s.as_str()))
                    && !is_too_generic(s)
                    && !is_too_generic(e)
                {
                    return Some(MatchVerdict::hit(
                        MatchReason::CoreSubstring,
                        s.as_str(),
                        e.as_str(),
                    ));
                }
            }
        }

        None
    }

    /// Step 6: count scraped cores corroborated by some existing core.
    fn quorum_match(&self, scraped: &[String], existing: &[String]) -> Option<MatchVerdict> {
        let left = self.normalized_variants(scraped);
        let right: Vec<String> = self.normalized_variants(existing).into_iter().flatten().collect();

        let mut hits_left = Vec::new();
        let mut hits_right: Vec<&str> = Vec::new();
        for variants in &left {
            let hit = variants.iter().find_map(|s| {
                right
                    .iter()
                    .find(|e| s == *e || s.contains(e.as_str()) || e.contains(s.as_str()))
                    .map(|e| (s.as_str(), e.as_str()))
            });
            if let Some((s, e)) = hit {
                hits_left.push(s);
                if !hits_right.contains(&e) {
                    hits_right.push(e);
                }
            }
        }

        if hits_left.len() >= QUORUM {
            Some(MatchVerdict::hit(
                MatchReason::MultiPersonQuorum,
                hits_left.join("、"),
                hits_right.join("、"),
            ))
        } else {
            None
        }
    }

    /// Cores followed by their Traditional forms, without duplicates.
    fn with_traditional(&self, cores: &[String]) -> Vec<String> {
        let mut out: Vec<String> = cores.to_vec();
        for core in cores {
            let traditional = self.converter.to_traditional(core);
            if !out.contains(&traditional) {
                out.push(traditional);
            }
        }
        out
    }

    /// Per core: its normalized form plus that form in Traditional. Cores
    /// that normalize to nothing or to a denylisted name are dropped, so short
    /// names can corroborate each other but jurisdictions and surnames cannot.
    fn normalized_variants(&self, cores: &[String]) -> Vec<Vec<String>> {
        let mut out: Vec<Vec<String>> = Vec::new();
        for core in cores {
            let normalized = normalize(core);
            if normalized.is_empty() || is_denylisted(&normalized) {
                continue;
            }
            let traditional = self.converter.to_traditional(&normalized);
            let mut variants = vec![normalized];
            if !variants.contains(&traditional) {
                variants.push(traditional);
            }
            if !out.contains(&variants) {
                out.push(variants);
            }
        }
        out
    }
}

/// Containment test shared by steps 2–4: equal non-empty strings match;
/// otherwise the shorter must be non-generic and contained in the longer.
pub fn substring_match(a: &str, b: &str) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    if a == b {
        return true;
    }
    let (shorter, longer) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };
    !is_too_generic(shorter) && longer.contains(shorter)
}

static DEFAULT_ENGINE: OnceLock<MatchEngine> = OnceLock::new();

/// The process-wide engine backed by the built-in character table.
pub fn default_engine() -> &'static MatchEngine {
    DEFAULT_ENGINE.get_or_init(MatchEngine::new)
}

/// [`MatchEngine::match_entities`] on the default engine.
pub fn match_entities(scraped: &str, existing: &str) -> MatchVerdict {
    default_engine().match_entities(scraped, existing)
}
