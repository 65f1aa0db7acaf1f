//! Similarity scoring for field-to-column matching.
//!
//! A pair is scored by a deterministic weighted maximum of four measures on
//! the normalized labels. Identical keys short-circuit to 1.0; otherwise the
//! best of containment, token overlap and edit-distance similarity wins, each
//! scaled by its weight from [`MatchConfig`].

use std::collections::BTreeSet;

use colmap_model::{MatchBasis, MatchConfig};
use rapidfuzz::distance::levenshtein;

use crate::normalize::NormalizedLabel;

/// Per-measure scores for a single pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    pub exact: bool,
    /// Weighted containment score, zero when neither key contains the other.
    pub containment: f64,
    /// Weighted Jaccard overlap of the token sets.
    pub token_overlap: f64,
    /// Weighted normalized Levenshtein similarity of the keys.
    pub edit_distance: f64,
}

impl ScoreBreakdown {
    /// All measures zero.
    pub const NONE: Self = Self {
        exact: false,
        containment: 0.0,
        token_overlap: 0.0,
        edit_distance: 0.0,
    };

    /// Combined score in [0, 1].
    pub fn score(&self) -> f64 {
        self.best().0
    }

    /// Measure that produced the combined score.
    pub fn basis(&self) -> MatchBasis {
        self.best().1
    }

    fn best(&self) -> (f64, MatchBasis) {
        if self.exact {
            return (1.0, MatchBasis::Exact);
        }
        // On equal values the earlier measure wins.
        let mut best = (self.containment, MatchBasis::Containment);
        for candidate in [
            (self.token_overlap, MatchBasis::TokenOverlap),
            (self.edit_distance, MatchBasis::EditDistance),
        ] {
            if candidate.0 > best.0 {
                best = candidate;
            }
        }
        (best.0.clamp(0.0, 1.0), best.1)
    }

    /// Human-readable explanation of the score.
    pub fn explain(&self) -> String {
        if self.exact {
            return "exact: 100%".to_string();
        }
        format!(
            "containment: {:.0}%; token overlap: {:.0}%; edit distance: {:.0}%",
            self.containment * 100.0,
            self.token_overlap * 100.0,
            self.edit_distance * 100.0
        )
    }
}

/// Scores one normalized field name against one normalized column label.
pub fn score_labels(
    field: &NormalizedLabel,
    column: &NormalizedLabel,
    config: &MatchConfig,
) -> ScoreBreakdown {
    if field.is_empty() || column.is_empty() {
        return ScoreBreakdown::NONE;
    }
    if field.key == column.key {
        return ScoreBreakdown {
            exact: true,
            ..ScoreBreakdown::NONE
        };
    }
    ScoreBreakdown {
        exact: false,
        containment: containment(&field.key, &column.key, config),
        token_overlap: jaccard(&field.tokens, &column.tokens) * config.token_weight,
        edit_distance: levenshtein::normalized_similarity(field.key.chars(), column.key.chars())
            * config.edit_weight,
    }
}

fn containment(a: &str, b: &str, config: &MatchConfig) -> f64 {
    let (a_len, b_len) = (a.chars().count(), b.chars().count());
    let (shorter, shorter_len, longer, longer_len) = if a_len <= b_len {
        (a, a_len, b, b_len)
    } else {
        (b, b_len, a, a_len)
    };
    if shorter_len < config.min_containment_len || !longer.contains(shorter) {
        return 0.0;
    }
    config.containment_base + config.containment_span * (shorter_len as f64 / longer_len as f64)
}

fn jaccard(a: &[String], b: &[String]) -> f64 {
    let a: BTreeSet<&str> = a.iter().map(String::as_str).collect();
    let b: BTreeSet<&str> = b.iter().map(String::as_str).collect();
    let union = a.union(&b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(&b).count() as f64 / union as f64
}
