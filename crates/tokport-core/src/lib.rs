use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod escape;
pub mod format;
pub mod ident;

pub use escape::{encode_base64_utf8, escape_json_text, escape_markup_text, escape_native_string_literal};
pub use format::{format_number, round_to, WeightBucket};
pub use ident::{safe_identifier, Casing, COLOR_PREFIXES, TYPOGRAPHY_PREFIXES};

/// Workspace-wide result alias.
pub type Result<T> = color_eyre::eyre::Result<T>;

/// Color with every channel in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default = "opaque")]
    pub a: f64,
}

fn opaque() -> f64 {
    1.0
}

impl Rgba {
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Build from 0-255 channel values with full opacity.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AliasTag {
    #[serde(rename = "VARIABLE_ALIAS")]
    VariableAlias,
}

/// Pointer to another variable; resolved at the same mode id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasRef {
    #[serde(rename = "type")]
    pub tag: AliasTag,
    pub id: String,
}

impl AliasRef {
    pub fn to(id: impl Into<String>) -> Self {
        Self {
            tag: AliasTag::VariableAlias,
            id: id.into(),
        }
    }
}

/// One value of a variable at one mode, as stored in the design document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Text(String),
    Alias(AliasRef),
    Color(Rgba),
    Number(f64),
    Flag(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VariableKind {
    String,
    Color,
    Float,
    Boolean,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub kind: VariableKind,
    /// modeId -> value, in document order.
    #[serde(default)]
    pub values: IndexMap<String, RawValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mode {
    pub name: String,
    #[serde(rename = "modeId")]
    pub mode_id: String,
}

/// Variables sharing one set of modes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableCollection {
    pub id: String,
    pub name: String,
    pub modes: Vec<Mode>,
    #[serde(default)]
    pub variables: Vec<Variable>,
}

impl VariableCollection {
    /// First mode in the list; the only one used for color and typography export.
    pub fn base_mode(&self) -> Option<&Mode> {
        self.modes.first()
    }

    pub fn variables_of(&self, kind: VariableKind) -> impl Iterator<Item = &Variable> {
        self.variables.iter().filter(move |v| v.kind == kind)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypographyStyle {
    pub name: String,
    #[serde(default)]
    pub font_family: String,
    pub font_size: f64,
    /// Numeric weight, 100..=900.
    pub font_weight: u16,
    #[serde(default)]
    pub letter_spacing: f64,
    pub line_height: f64,
}

/// One `{path, content}` pair slated for publication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileUpdate {
    path: String,
    content: String,
}

impl FileUpdate {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Android,
    Ios,
    Flutter,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Android, Platform::Ios, Platform::Flutter];

    pub fn label(self) -> &'static str {
        match self {
            Platform::Android => "Android",
            Platform::Ios => "iOS",
            Platform::Flutter => "Flutter",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Strings,
    Colors,
    Typography,
}

impl TokenKind {
    pub const ALL: [TokenKind; 3] = [TokenKind::Strings, TokenKind::Colors, TokenKind::Typography];

    pub fn label(self) -> &'static str {
        match self {
            TokenKind::Strings => "Strings",
            TokenKind::Colors => "Colors",
            TokenKind::Typography => "Typography",
        }
    }
}

/// Errors raised while reading documents into the data model.
#[derive(Debug, Error)]
pub enum TokportError {
    #[error("invalid design document: {0}")]
    InvalidDocument(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_values_deserialize_by_shape() {
        let text: RawValue = serde_json::from_str(r#""Hello""#).unwrap();
        assert_eq!(text, RawValue::Text("Hello".into()));

        let color: RawValue = serde_json::from_str(r#"{"r":1,"g":0,"b":0}"#).unwrap();
        assert_eq!(color, RawValue::Color(Rgba::new(1.0, 0.0, 0.0, 1.0)));

        let alias: RawValue =
            serde_json::from_str(r#"{"type":"VARIABLE_ALIAS","id":"VariableID:1:2"}"#).unwrap();
        assert_eq!(alias, RawValue::Alias(AliasRef::to("VariableID:1:2")));
    }

    #[test]
    fn collection_keeps_value_order_and_base_mode() {
        let json = r#"{
            "id": "c1", "name": "Strings",
            "modes": [{"name": "English", "modeId": "m_en"}, {"name": "Arabic", "modeId": "m_ar"}],
            "variables": [{"id": "v1", "name": "title", "type": "STRING",
                           "values": {"m_ar": "a", "m_en": "e"}}]
        }"#;
        let c: VariableCollection = serde_json::from_str(json).unwrap();
        assert_eq!(c.base_mode().unwrap().mode_id, "m_en");
        let keys: Vec<_> = c.variables[0].values.keys().cloned().collect();
        assert_eq!(keys, vec!["m_ar", "m_en"]);
        assert_eq!(c.variables_of(VariableKind::Color).count(), 0);
    }
}
