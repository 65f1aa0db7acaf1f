//! Destination fields and import profiles.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::options::MatchConfig;

/// A slot in the target schema that an import must populate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationField {
    /// Stable identifier (e.g. `email`, `first_name`).
    pub id: String,
    /// Human-readable label shown next to the selector.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Alternative header spellings that count as this field's own name.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    /// Whether a confirmed mapping must include this field.
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    /// Field that should be mapped whenever this one is.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommends: Option<String>,
}

impl DestinationField {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
            aliases: Vec::new(),
            required: false,
            description: None,
            example: None,
            recommends: None,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example = Some(example.into());
        self
    }

    #[must_use]
    pub fn recommends(mut self, field: impl Into<String>) -> Self {
        self.recommends = Some(field.into());
        self
    }

    /// All names the field answers to: id, then label, then aliases.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.id.as_str())
            .chain(self.label.as_deref())
            .chain(self.aliases.iter().map(String::as_str))
    }

    /// Label for display, falling back to the identifier.
    pub fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }
}

/// A named, ordered set of destination fields.
///
/// Field order is the document order used to break scoring ties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportProfile {
    pub name: String,
    pub fields: Vec<DestinationField>,
    /// Matching overrides for this profile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matching: Option<MatchConfig>,
}

impl ImportProfile {
    pub fn new(name: impl Into<String>, fields: Vec<DestinationField>) -> Self {
        Self {
            name: name.into(),
            fields,
            matching: None,
        }
    }

    /// Build a profile from bare identifiers.
    pub fn from_ids<I, S>(name: impl Into<String>, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(name, ids.into_iter().map(DestinationField::new).collect())
    }

    #[must_use]
    pub fn with_matching(mut self, matching: MatchConfig) -> Self {
        self.matching = Some(matching);
        self
    }

    /// Parse and validate a profile from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let profile: Self = serde_json::from_str(json)?;
        profile.validate()?;
        Ok(profile)
    }

    /// Checks the field list is non-empty with unique, non-blank identifiers.
    pub fn validate(&self) -> Result<()> {
        if self.fields.is_empty() {
            return Err(ModelError::InvalidInput(format!(
                "profile '{}' declares no fields",
                self.name
            )));
        }
        let mut seen = BTreeSet::new();
        for field in &self.fields {
            if field.id.trim().is_empty() {
                return Err(ModelError::InvalidInput(
                    "field identifier must not be blank".to_string(),
                ));
            }
            if !seen.insert(field.id.as_str()) {
                return Err(ModelError::InvalidInput(format!(
                    "duplicate field identifier '{}'",
                    field.id
                )));
            }
        }
        if let Some(matching) = &self.matching {
            matching.validate()?;
        }
        Ok(())
    }

    pub fn field(&self, id: &str) -> Option<&DestinationField> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn field_ids(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.id.as_str())
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &DestinationField> {
        self.fields.iter().filter(|f| f.required)
    }

    /// The project import profile.
    ///
    /// Labels are the headers of the project sheet export; the English names
    /// and the sheet's historical header variants are aliases.
    pub fn projects() -> Self {
        Self::new(
            "projects",
            vec![
                DestinationField::new("project_code")
                    .with_label("プロジェクトコード")
                    .with_aliases(["Project Code", "project id", "code"])
                    .required()
                    .with_description("Unique project identification code")
                    .with_example("PRJ001, PROJECT-2024-001"),
                DestinationField::new("project_name")
                    .with_label("プロジェクト名")
                    .with_aliases(["Project Name", "project title", "title"])
                    .required()
                    .with_description("Name of the project")
                    .with_example("New System Development"),
                DestinationField::new("branch_name")
                    .with_label("支社名")
                    .with_aliases(["Branch Name", "branch", "office", "office name"])
                    .required()
                    .recommends("branch_code")
                    .with_description("Branch that manages the project")
                    .with_example("Tokyo Branch, Osaka Branch"),
                DestinationField::new("branch_code")
                    .with_label("支社コード")
                    .with_aliases(["Branch Code", "office code"])
                    .with_description("Branch identification code (optional)")
                    .with_example("TKY, OSK"),
                DestinationField::new("fiscal_year")
                    .with_label("売上の年度")
                    .with_aliases(["Fiscal Year", "year", "revenue year"])
                    .required()
                    .with_description("Fiscal year the revenue is booked in")
                    .with_example("2024, 2025"),
                DestinationField::new("order_probability")
                    .with_label("受注角度")
                    .with_aliases([
                        "Order Probability",
                        "probability",
                        "win probability",
                        "order likelihood",
                    ])
                    .required()
                    .with_description("Likelihood of winning the order (100, 50, 0)")
                    .with_example("100, 50, 0"),
                DestinationField::new("revenue")
                    .with_label("売上（契約金）")
                    .with_aliases(["売上", "契約金", "Revenue", "sales", "contract amount", "amount"])
                    .required()
                    .with_description("Contract amount")
                    .with_example("1000000, 5000000"),
                DestinationField::new("expenses")
                    .with_label("経費（トータル）")
                    .with_aliases(["経費", "Expenses", "expense", "cost", "total cost"])
                    .required()
                    .with_description("Total expenses")
                    .with_example("800000, 3000000"),
            ],
        )
    }
}

impl Default for ImportProfile {
    fn default() -> Self {
        Self::projects()
    }
}
