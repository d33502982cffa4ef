use serde::{Deserialize, Serialize};
use tokport_core::TypographyStyle;

/// Line height used when a style asks for automatic leading.
const AUTO_LINE_HEIGHT: f64 = 1.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DimensionUnit {
    Pixels,
    Percent,
    Auto,
}

/// A measurement either as a bare number (pixels) or with an explicit unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dimension {
    Plain(f64),
    WithUnit {
        #[serde(default)]
        value: f64,
        unit: DimensionUnit,
    },
}

impl Dimension {
    /// Absolute value for a given font size; `None` for `AUTO`.
    fn resolve(self, font_size: f64) -> Option<f64> {
        match self {
            Dimension::Plain(v) => Some(v),
            Dimension::WithUnit { value, unit } => match unit {
                DimensionUnit::Pixels => Some(value),
                DimensionUnit::Percent => Some(font_size * value / 100.0),
                DimensionUnit::Auto => None,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontName {
    pub family: String,
    #[serde(default)]
    pub style: String,
}

/// Text style in the shape the host document stores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTextStyle {
    pub name: String,
    pub font_size: f64,
    pub font_name: FontName,
    #[serde(default)]
    pub letter_spacing: Option<Dimension>,
    #[serde(default)]
    pub line_height: Option<Dimension>,
}

impl RawTextStyle {
    pub fn to_style(&self) -> TypographyStyle {
        let size = self.font_size;
        let letter_spacing = self
            .letter_spacing
            .and_then(|d| d.resolve(size))
            .unwrap_or(0.0);
        let line_height = self
            .line_height
            .and_then(|d| d.resolve(size))
            .unwrap_or(size * AUTO_LINE_HEIGHT);
        TypographyStyle {
            name: self.name.clone(),
            font_family: self.font_name.family.clone(),
            font_size: size,
            font_weight: font_weight_from_style(&self.font_name.style),
            letter_spacing,
            line_height,
        }
    }
}

/// A text style record, either already flat or host-shaped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextStyleRecord {
    Flat(TypographyStyle),
    Raw(RawTextStyle),
}

impl TextStyleRecord {
    pub fn into_style(self) -> TypographyStyle {
        match self {
            TextStyleRecord::Flat(style) => style,
            TextStyleRecord::Raw(raw) => raw.to_style(),
        }
    }
}

/// Numeric weight for a font style name such as `"Semi Bold Italic"`.
pub fn font_weight_from_style(style: &str) -> u16 {
    let key: String = style
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase();
    // compound names first so "semibold" is not read as "bold"
    const TABLE: &[(&str, u16)] = &[
        ("extralight", 200),
        ("ultralight", 200),
        ("semibold", 600),
        ("demibold", 600),
        ("extrabold", 800),
        ("ultrabold", 800),
        ("hairline", 100),
        ("thin", 100),
        ("black", 900),
        ("heavy", 900),
        ("bold", 700),
        ("medium", 500),
        ("light", 300),
    ];
    TABLE
        .iter()
        .find(|(name, _)| key.contains(name))
        .map(|(_, weight)| *weight)
        .unwrap_or(400)
}
