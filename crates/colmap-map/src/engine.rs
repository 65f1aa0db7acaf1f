//! Mapping engine implementation.

use std::collections::{BTreeMap, BTreeSet};

use colmap_model::{CandidateScore, DestinationField, ImportProfile, Mapping, MatchConfig};
use tracing::{debug, trace};

use crate::error::{MapError, Result};
use crate::normalize::{NormalizedLabel, normalize_label};
use crate::score::{ScoreBreakdown, score_labels};

/// Confidence level categories for suggestion quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConfidenceLevel {
    /// Cleared the acceptance threshold but should be verified.
    Low,
    /// Reasonable match that should be reviewed.
    Medium,
    /// Near-certain match.
    High,
}

impl ConfidenceLevel {
    /// What a reviewer should do with a suggestion at this level.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::High => "safe to accept as suggested",
            Self::Medium => "check the column before importing",
            Self::Low => "weak lexical match, confirm by hand",
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// Boundaries between confidence levels.
///
/// - Below `low`: rejected
/// - `low` to `medium`: [`ConfidenceLevel::Low`]
/// - `medium` to `high`: [`ConfidenceLevel::Medium`]
/// - At or above `high`: [`ConfidenceLevel::High`]
#[derive(Debug, Clone, Copy)]
pub struct ConfidenceThresholds {
    /// Default: 0.95.
    pub high: f64,
    /// Default: 0.80.
    pub medium: f64,
    /// Default: the acceptance threshold (0.50).
    pub low: f64,
}

impl Default for ConfidenceThresholds {
    fn default() -> Self {
        Self::from_threshold(colmap_model::DEFAULT_THRESHOLD)
    }
}

impl ConfidenceThresholds {
    /// Thresholds whose lowest band starts at the acceptance threshold.
    #[must_use]
    pub fn from_threshold(threshold: f64) -> Self {
        Self {
            high: 0.95,
            medium: 0.80,
            low: threshold,
        }
    }

    /// Returns `None` if the score is below the low threshold.
    #[must_use]
    pub fn categorize(&self, score: f64) -> Option<ConfidenceLevel> {
        if score >= self.high {
            Some(ConfidenceLevel::High)
        } else if score >= self.medium {
            Some(ConfidenceLevel::Medium)
        } else if score >= self.low {
            Some(ConfidenceLevel::Low)
        } else {
            None
        }
    }
}

/// Result of a suggestion run.
#[derive(Debug, Clone, Default)]
pub struct SuggestionReport {
    /// Committed pairs in assignment order (best score first).
    pub accepted: Vec<CandidateScore>,
    /// Field identifiers with no acceptable column, in field order.
    pub unmapped_fields: Vec<String>,
    /// Column labels left for manual mapping, in document order.
    pub unmapped_columns: Vec<String>,
}

impl SuggestionReport {
    /// The field-to-column mapping for the wire.
    #[must_use]
    pub fn mapping(&self) -> Mapping {
        self.accepted
            .iter()
            .map(|c| (c.field.clone(), c.column.clone()))
            .collect()
    }

    #[must_use]
    pub fn into_mapping(self) -> Mapping {
        self.accepted
            .into_iter()
            .map(|c| (c.field, c.column))
            .collect()
    }

    /// Accepted candidate for a field.
    #[must_use]
    pub fn for_field(&self, field: &str) -> Option<&CandidateScore> {
        self.accepted.iter().find(|c| c.field == field)
    }

    #[must_use]
    pub fn count_by_level(
        &self,
        thresholds: &ConfidenceThresholds,
    ) -> BTreeMap<ConfidenceLevel, usize> {
        let mut counts = BTreeMap::new();
        for candidate in &self.accepted {
            if let Some(level) = thresholds.categorize(candidate.score) {
                *counts.entry(level).or_insert(0) += 1;
            }
        }
        counts
    }

    #[must_use]
    pub fn mean_score(&self) -> Option<f64> {
        if self.accepted.is_empty() {
            return None;
        }
        let sum: f64 = self.accepted.iter().map(|c| c.score).sum();
        Some(sum / self.accepted.len() as f64)
    }
}

/// Stateless engine proposing one column per destination field.
///
/// Every field name (identifier, label, aliases) and every column label is
/// normalized, all pairs are scored, and pairs are committed greedily by
/// descending score while both sides are free and the score clears the
/// acceptance threshold. Exact score ties go to the earlier field, then the
/// earlier column.
///
/// # Example
///
/// ```
/// use colmap_map::SuggestionEngine;
/// use colmap_model::{DestinationField, MatchConfig};
///
/// let engine = SuggestionEngine::new(MatchConfig::default()).unwrap();
/// let fields = [DestinationField::new("email"), DestinationField::new("phone")];
/// let columns = ["Email Address".to_string(), "Phone Number".to_string(), "Notes".to_string()];
/// let mapping = engine.suggest_mapping(&fields, &columns).unwrap();
/// assert_eq!(mapping.get("email"), Some("Email Address"));
/// assert_eq!(mapping.get("phone"), Some("Phone Number"));
/// ```
#[derive(Debug, Clone)]
pub struct SuggestionEngine {
    config: MatchConfig,
}

struct Candidate {
    field_idx: usize,
    column_idx: usize,
    breakdown: ScoreBreakdown,
}

impl Candidate {
    fn score(&self) -> f64 {
        self.breakdown.score()
    }
}

impl SuggestionEngine {
    /// Creates an engine, rejecting out-of-range configuration.
    pub fn new(config: MatchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Engine using the profile's matching override, or the defaults.
    pub fn for_profile(profile: &ImportProfile) -> Result<Self> {
        Self::new(profile.matching.unwrap_or_default())
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Suggests a column for each field.
    ///
    /// An empty column list yields an empty report. Fails only with
    /// [`MapError::InvalidInput`] when the field list is empty or its
    /// identifiers are blank or repeated.
    pub fn suggest(
        &self,
        fields: &[DestinationField],
        columns: &[String],
    ) -> Result<SuggestionReport> {
        validate_fields(fields)?;
        let candidates = self.score_pairs(fields, columns);

        let mut assigned_fields = BTreeSet::new();
        let mut assigned_columns = BTreeSet::new();
        let mut accepted = Vec::new();
        for candidate in candidates {
            let score = candidate.score();
            if score < self.config.threshold {
                break;
            }
            let field = &fields[candidate.field_idx];
            let column = &columns[candidate.column_idx];
            // Duplicate labels are distinct candidates, but the wire carries
            // labels, so one label can back only one field.
            if assigned_fields.contains(&candidate.field_idx)
                || assigned_columns.contains(column.as_str())
            {
                continue;
            }
            debug!(
                field = %field.id,
                column = %column,
                score,
                basis = %candidate.breakdown.basis(),
                "committed suggestion"
            );
            assigned_fields.insert(candidate.field_idx);
            assigned_columns.insert(column.as_str());
            accepted.push(CandidateScore {
                field: field.id.clone(),
                column: column.clone(),
                column_index: candidate.column_idx,
                score,
                basis: candidate.breakdown.basis(),
            });
        }

        let unmapped_fields = fields
            .iter()
            .enumerate()
            .filter(|(idx, _)| !assigned_fields.contains(idx))
            .map(|(_, f)| f.id.clone())
            .collect();
        let mapped_indices: BTreeSet<usize> = accepted.iter().map(|c| c.column_index).collect();
        let unmapped_columns = columns
            .iter()
            .enumerate()
            .filter(|(idx, _)| !mapped_indices.contains(idx))
            .map(|(_, c)| c.clone())
            .collect();

        Ok(SuggestionReport {
            accepted,
            unmapped_fields,
            unmapped_columns,
        })
    }

    /// Suggests and returns only the field-to-column mapping.
    pub fn suggest_mapping(
        &self,
        fields: &[DestinationField],
        columns: &[String],
    ) -> Result<Mapping> {
        Ok(self.suggest(fields, columns)?.into_mapping())
    }

    /// Scores every column against one field, best first.
    ///
    /// Includes sub-threshold candidates; meant for ordering a selector's
    /// options, never for proposing a match.
    pub fn rank_columns(&self, field: &DestinationField, columns: &[String]) -> Vec<CandidateScore> {
        let names = self.normalize_names(field);
        let mut ranked: Vec<CandidateScore> = columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                let label = normalize_label(column, self.config.use_synonyms);
                let breakdown = self.best_breakdown(&names, &label);
                CandidateScore {
                    field: field.id.clone(),
                    column: column.clone(),
                    column_index: idx,
                    score: breakdown.score(),
                    basis: breakdown.basis(),
                }
            })
            .collect();
        ranked.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then(a.column_index.cmp(&b.column_index))
        });
        ranked
    }

    /// Score breakdown of a single field/column pair.
    pub fn explain(&self, field: &DestinationField, column: &str) -> ScoreBreakdown {
        let names = self.normalize_names(field);
        let label = normalize_label(column, self.config.use_synonyms);
        self.best_breakdown(&names, &label)
    }

    fn score_pairs(&self, fields: &[DestinationField], columns: &[String]) -> Vec<Candidate> {
        let field_names: Vec<Vec<NormalizedLabel>> =
            fields.iter().map(|f| self.normalize_names(f)).collect();
        let column_labels: Vec<NormalizedLabel> = columns
            .iter()
            .map(|c| normalize_label(c, self.config.use_synonyms))
            .collect();

        let mut candidates = Vec::with_capacity(fields.len() * columns.len());
        for (field_idx, names) in field_names.iter().enumerate() {
            for (column_idx, label) in column_labels.iter().enumerate() {
                let breakdown = self.best_breakdown(names, label);
                trace!(
                    field = %fields[field_idx].id,
                    column = %columns[column_idx],
                    score = breakdown.score(),
                    "scored pair"
                );
                candidates.push(Candidate {
                    field_idx,
                    column_idx,
                    breakdown,
                });
            }
        }
        candidates.sort_by(|a, b| {
            b.score()
                .total_cmp(&a.score())
                .then(a.field_idx.cmp(&b.field_idx))
                .then(a.column_idx.cmp(&b.column_idx))
        });
        candidates
    }

    fn normalize_names(&self, field: &DestinationField) -> Vec<NormalizedLabel> {
        field
            .names()
            .map(|name| normalize_label(name, self.config.use_synonyms))
            .collect()
    }

    fn best_breakdown(&self, names: &[NormalizedLabel], column: &NormalizedLabel) -> ScoreBreakdown {
        // Strict improvement only, so the identifier beats an equally good alias.
        names
            .iter()
            .map(|name| score_labels(name, column, &self.config))
            .fold(None, |best: Option<ScoreBreakdown>, breakdown| match best {
                Some(current) if current.score() >= breakdown.score() => Some(current),
                _ => Some(breakdown),
            })
            .unwrap_or(ScoreBreakdown::NONE)
    }
}

fn validate_fields(fields: &[DestinationField]) -> Result<()> {
    if fields.is_empty() {
        return Err(MapError::InvalidInput(
            "at least one destination field is required".to_string(),
        ));
    }
    let mut seen = BTreeSet::new();
    for field in fields {
        if field.id.trim().is_empty() {
            return Err(MapError::InvalidInput(
                "field identifier must not be blank".to_string(),
            ));
        }
        if !seen.insert(field.id.as_str()) {
            return Err(MapError::InvalidInput(format!(
                "duplicate field identifier '{}'",
                field.id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use colmap_model::MatchBasis;

    fn engine() -> SuggestionEngine {
        SuggestionEngine::new(MatchConfig::default()).unwrap()
    }

    fn fields(ids: &[&str]) -> Vec<DestinationField> {
        ids.iter().map(|id| DestinationField::new(*id)).collect()
    }

    fn columns(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|c| (*c).to_string()).collect()
    }

    #[test]
    fn empty_fields_is_invalid_input() {
        let err = engine().suggest(&[], &columns(&["Email"]));
        assert!(matches!(err, Err(MapError::InvalidInput(_))));
    }

    #[test]
    fn empty_columns_is_empty_mapping() {
        let report = engine().suggest(&fields(&["email"]), &[]).unwrap();
        assert!(report.accepted.is_empty());
        assert_eq!(report.unmapped_fields, vec!["email"]);
    }

    #[test]
    fn higher_score_wins_contested_column() {
        // Both fields want "Phone"; the exact match takes it.
        let report = engine()
            .suggest(&fields(&["phone_number", "phone"]), &columns(&["Phone"]))
            .unwrap();
        assert_eq!(report.accepted.len(), 1);
        assert_eq!(report.accepted[0].field, "phone");
        assert_eq!(report.accepted[0].basis, MatchBasis::Exact);
        assert_eq!(report.unmapped_fields, vec!["phone_number"]);
    }

    #[test]
    fn exact_tie_goes_to_earlier_field() {
        let fields = vec![
            DestinationField::new("home_phone").with_aliases(["tel"]),
            DestinationField::new("work_phone").with_aliases(["tel"]),
        ];
        let report = engine().suggest(&fields, &columns(&["Tel"])).unwrap();
        assert_eq!(report.accepted.len(), 1);
        assert_eq!(report.accepted[0].field, "home_phone");
    }

    #[test]
    fn aliases_count_as_field_names() {
        let fields = vec![DestinationField::new("revenue").with_aliases(["contract amount"])];
        let mapping = engine()
            .suggest_mapping(&fields, &columns(&["Contract Amount"]))
            .unwrap();
        assert_eq!(mapping.get("revenue"), Some("Contract Amount"));
    }

    #[test]
    fn identical_labels_never_back_two_fields() {
        let fields = vec![
            DestinationField::new("name"),
            DestinationField::new("full_name").with_aliases(["name"]),
        ];
        let report = engine()
            .suggest(&fields, &columns(&["Name", "Name"]))
            .unwrap();
        assert_eq!(report.accepted.len(), 1);
        assert_eq!(report.accepted[0].field, "name");
        assert_eq!(report.accepted[0].column_index, 0);
        assert_eq!(report.unmapped_columns, vec!["Name"]);
    }

    #[test]
    fn threshold_is_respected() {
        let strict = SuggestionEngine::new(MatchConfig::default().with_threshold(0.9)).unwrap();
        let mapping = strict
            .suggest_mapping(&fields(&["email"]), &columns(&["Email Address"]))
            .unwrap();
        assert!(mapping.is_empty());
    }

    #[test]
    fn rank_columns_orders_by_score() {
        let ranked = engine().rank_columns(
            &DestinationField::new("email"),
            &columns(&["Notes", "Email Address", "E-mail"]),
        );
        assert_eq!(ranked[0].column, "E-mail");
        assert_eq!(ranked[1].column, "Email Address");
        assert_eq!(ranked[2].column, "Notes");
    }

    #[test]
    fn confidence_levels() {
        let thresholds = ConfidenceThresholds::default();
        assert_eq!(thresholds.categorize(1.0), Some(ConfidenceLevel::High));
        assert_eq!(thresholds.categorize(0.85), Some(ConfidenceLevel::Medium));
        assert_eq!(thresholds.categorize(0.55), Some(ConfidenceLevel::Low));
        assert_eq!(thresholds.categorize(0.2), None);
    }
}
