//! Reading a design document and reducing it to exportable tokens.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use color_eyre::eyre::WrapErr;
use std::path::Path;
use thiserror::Error;
use tokport_core::{Result, TokportError, TypographyStyle, VariableCollection, VariableKind};
use tokport_domain::{ExportStats, SCHEMA_VERSION};
use tokport_normalize::{color_table, string_table, ColorTable, StringTable, TextStyleRecord};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExportError {
    #[error("No variable collections found.")]
    NoCollections,
    #[error("No exportable variables found.")]
    NoVariables,
}

/// A design document snapshot: variable collections and text styles.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignDocument {
    #[serde(default)]
    pub collections: Vec<VariableCollection>,
    #[serde(default)]
    pub text_styles: Vec<TextStyleRecord>,
}

/// Where variables and text styles come from.
pub trait VariableSource {
    fn collections(&self) -> Result<Vec<VariableCollection>>;
    fn text_styles(&self) -> Result<Vec<TypographyStyle>>;
}

/// A document exported to JSON (`{"collections": [...], "textStyles": [...]}`).
pub struct JsonDocumentSource {
    doc: DesignDocument,
}

impl JsonDocumentSource {
    pub fn from_json(text: &str) -> Result<Self> {
        let doc: DesignDocument = serde_json::from_str(text)
            .map_err(|e| TokportError::InvalidDocument(e.to_string()))?;
        Ok(Self { doc })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read {}", path.display()))?;
        Self::from_json(&text).wrap_err_with(|| format!("failed to load {}", path.display()))
    }
}

impl From<DesignDocument> for JsonDocumentSource {
    fn from(doc: DesignDocument) -> Self {
        Self { doc }
    }
}

impl VariableSource for JsonDocumentSource {
    fn collections(&self) -> Result<Vec<VariableCollection>> {
        Ok(self.doc.collections.clone())
    }

    fn text_styles(&self) -> Result<Vec<TypographyStyle>> {
        Ok(self
            .doc
            .text_styles
            .iter()
            .cloned()
            .map(TextStyleRecord::into_style)
            .collect())
    }
}

/// Normalized tokens, ready for the generators.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TokenSet {
    pub strings: StringTable,
    pub colors: ColorTable,
    pub typography: Vec<TypographyStyle>,
}

impl TokenSet {
    pub fn from_parts(collections: &[VariableCollection], typography: Vec<TypographyStyle>) -> Self {
        Self {
            strings: string_table(collections),
            colors: color_table(collections),
            typography,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.strings.values().all(|m| m.is_empty()) && self.colors.is_empty() && self.typography.is_empty()
    }

    pub fn languages(&self) -> Vec<String> {
        self.strings.keys().cloned().collect()
    }

    /// Distinct string keys over all languages.
    pub fn string_keys(&self) -> usize {
        self.strings
            .values()
            .flat_map(|m| m.keys())
            .collect::<IndexSet<_>>()
            .len()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportReport {
    pub tokens: TokenSet,
    pub stats: ExportStats,
}

fn exportable(collection: &VariableCollection) -> bool {
    collection
        .variables
        .iter()
        .any(|v| matches!(v.kind, VariableKind::String | VariableKind::Color))
}

/// Read everything from `source` and normalize it.
pub fn export_variables(source: &dyn VariableSource) -> Result<ExportReport> {
    let collections = source.collections()?;
    let typography = source.text_styles()?;
    if collections.is_empty() && typography.is_empty() {
        return Err(ExportError::NoCollections.into());
    }
    let tokens = TokenSet::from_parts(&collections, typography);
    if tokens.is_empty() {
        return Err(ExportError::NoVariables.into());
    }
    let used: Vec<&VariableCollection> = collections.iter().filter(|c| exportable(c)).collect();
    let stats = ExportStats {
        schema_version: SCHEMA_VERSION,
        collections: used.len(),
        strings: tokens.string_keys(),
        colors: tokens.colors.len(),
        typography: tokens.typography.len(),
        languages: tokens.strings.len(),
        collection_names: used.iter().map(|c| c.name.clone()).collect(),
    };
    tracing::info!(
        event = "variables_exported",
        collections = stats.collections,
        strings = stats.strings,
        colors = stats.colors,
        typography = stats.typography,
        languages = stats.languages
    );
    Ok(ExportReport { tokens, stats })
}

#[cfg(test)]
pub(crate) mod fixtures {
    /// Two collections: localized strings (en/ar) and brand colors with an alias.
    pub const DOCUMENT: &str = r##"{
      "collections": [
        {
          "id": "c1",
          "name": "Localization",
          "modes": [
            {"name": "English", "modeId": "m_en"},
            {"name": "Arabic", "modeId": "m_ar"}
          ],
          "variables": [
            {"id": "v1", "name": "app_title", "type": "STRING",
             "values": {"m_en": "My App", "m_ar": "تطبيقي"}},
            {"id": "v2", "name": "greeting", "type": "STRING",
             "values": {"m_en": "Hello", "m_ar": "مرحبا"}}
          ]
        },
        {
          "id": "c2",
          "name": "Brand",
          "modes": [{"name": "Light", "modeId": "m_light"}],
          "variables": [
            {"id": "v3", "name": "primary", "type": "COLOR",
             "values": {"m_light": {"r": 0.3843137254901961, "g": 0, "b": 0.9333333333333333, "a": 1}}},
            {"id": "v4", "name": "button/background", "type": "COLOR",
             "values": {"m_light": {"type": "VARIABLE_ALIAS", "id": "v3"}}},
            {"id": "v5", "name": "spacing", "type": "FLOAT",
             "values": {"m_light": 8}}
          ]
        }
      ],
      "textStyles": [
        {"name": "Headline Large", "fontSize": 32,
         "fontName": {"family": "Inter", "style": "Bold"},
         "letterSpacing": {"value": 0, "unit": "PIXELS"},
         "lineHeight": {"value": 40, "unit": "PIXELS"}}
      ]
    }"##;
}
