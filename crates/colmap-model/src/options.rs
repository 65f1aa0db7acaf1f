//! Tunable matching configuration.
//!
//! Every constant the suggestion engine relies on lives here so a profile or
//! the command line can override it. The defaults form the documented table:
//!
//! | Key                   | Default | Meaning                                        |
//! |-----------------------|---------|------------------------------------------------|
//! | `threshold`           | 0.50    | minimum score for a pair to be offered         |
//! | `containment_base`    | 0.75    | score floor when one key contains the other    |
//! | `containment_span`    | 0.20    | added in proportion to shorter/longer length   |
//! | `min_containment_len` | 3       | contained key must be at least this long       |
//! | `token_weight`        | 0.90    | multiplier on Jaccard token overlap            |
//! | `edit_weight`         | 0.90    | multiplier on normalized Levenshtein similarity|
//! | `use_synonyms`        | true    | rewrite tokens through the synonym table       |

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Default acceptance threshold on the [0, 1] score scale.
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Weights and threshold used to score `(field, column)` pairs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Acceptance threshold. Pairs scoring below it are never surfaced.
    pub threshold: f64,
    /// Score floor for substring containment.
    pub containment_base: f64,
    /// Extra containment score scaled by the shorter/longer key length ratio.
    pub containment_span: f64,
    /// Minimum length (in chars) of the contained key.
    pub min_containment_len: usize,
    /// Multiplier applied to the token-set Jaccard overlap.
    pub token_weight: f64,
    /// Multiplier applied to normalized edit-distance similarity.
    pub edit_weight: f64,
    /// Whether the static synonym table participates in normalization.
    pub use_synonyms: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            containment_base: 0.75,
            containment_span: 0.20,
            min_containment_len: 3,
            token_weight: 0.90,
            edit_weight: 0.90,
            use_synonyms: true,
        }
    }
}

impl MatchConfig {
    /// Conservative preset: only offer near-certain matches.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            threshold: 0.70,
            ..Self::default()
        }
    }

    /// Permissive preset for exploratory imports.
    #[must_use]
    pub fn relaxed() -> Self {
        Self {
            threshold: 0.40,
            ..Self::default()
        }
    }

    /// Replace the acceptance threshold.
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Rejects thresholds and weights outside [0, 1].
    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("threshold", self.threshold),
            ("containment_base", self.containment_base),
            ("containment_span", self.containment_span),
            ("token_weight", self.token_weight),
            ("edit_weight", self.edit_weight),
        ];
        for (name, value) in checks {
            if !(0.0..=1.0).contains(&value) {
                return Err(ModelError::InvalidInput(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }
        if self.containment_base + self.containment_span > 1.0 {
            return Err(ModelError::InvalidInput(
                "containment_base + containment_span must not exceed 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(MatchConfig::default().validate().is_ok());
        assert!(MatchConfig::strict().validate().is_ok());
        assert!(MatchConfig::relaxed().validate().is_ok());
    }

    #[test]
    fn out_of_range_threshold_rejected() {
        let err = MatchConfig::default().with_threshold(1.5).validate();
        assert!(matches!(err, Err(ModelError::InvalidInput(_))));
    }

    #[test]
    fn partial_json_uses_defaults() {
        let config: MatchConfig = serde_json::from_str(r#"{"threshold": 0.6}"#).unwrap();
        assert_eq!(config.threshold, 0.6);
        assert_eq!(config.token_weight, 0.90);
        assert!(config.use_synonyms);
    }
}
