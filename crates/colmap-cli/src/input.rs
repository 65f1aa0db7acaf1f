//! Loading CSV headers, profiles and mapping files for the CLI.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use colmap_model::{ImportProfile, Mapping, ModelError};
use serde::Deserialize;
use tracing::debug;

/// Reads the header row of a CSV file as source column labels.
///
/// Labels are kept verbatim, including surrounding whitespace and duplicates.
pub fn read_header(path: &Path) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("open {}", path.display()))?;
    let headers = reader
        .headers()
        .with_context(|| format!("read header row of {}", path.display()))?;
    if headers.is_empty() {
        bail!("{} has no header row", path.display());
    }
    let columns: Vec<String> = headers.iter().map(str::to_string).collect();
    debug!(path = %path.display(), columns = columns.len(), "read CSV header");
    Ok(columns)
}

/// Loads an import profile from JSON, or the built-in projects profile.
pub fn load_profile(path: Option<&Path>) -> Result<ImportProfile> {
    let Some(path) = path else {
        return Ok(ImportProfile::projects());
    };
    let json = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    ImportProfile::from_json(&json).map_err(|err| {
        let stage = match err {
            ModelError::Json(_) => "parse",
            _ => "invalid",
        };
        anyhow::Error::new(err).context(format!("{stage} profile {}", path.display()))
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MappingFile {
    Wrapped {
        mapping: BTreeMap<String, Option<String>>,
    },
    Bare(BTreeMap<String, Option<String>>),
}

/// Parses a confirmed mapping, `{"mapping": {...}}` or a bare object.
///
/// Fields left `null` or empty are treated as unmapped.
pub fn parse_mapping(json: &str) -> Result<Mapping> {
    let file: MappingFile = serde_json::from_str(json).context("mapping must be a JSON object")?;
    let entries = match file {
        MappingFile::Wrapped { mapping } | MappingFile::Bare(mapping) => mapping,
    };
    Ok(entries
        .into_iter()
        .filter_map(|(field, column)| column.filter(|c| !c.is_empty()).map(|c| (field, c)))
        .collect())
}

pub fn load_mapping(path: &Path) -> Result<Mapping> {
    let json = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    parse_mapping(&json).with_context(|| format!("parse mapping {}", path.display()))
}

/// Parses a `field=column` preset.
pub fn parse_preset(value: &str) -> std::result::Result<(String, String), String> {
    let (field, column) = value
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=COLUMN, got `{value}`"))?;
    let field = field.trim();
    if field.is_empty() {
        return Err(format!("missing field name in `{value}`"));
    }
    Ok((field.to_string(), column.to_string()))
}
