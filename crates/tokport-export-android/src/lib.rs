//! Android generators: `strings.xml`, `colors.xml`, Compose colors and Compose
//! typography.

use indexmap::IndexMap;
use tokport_core::{
    escape_markup_text, format_number, round_to, safe_identifier, Casing, Rgba, TypographyStyle,
    WeightBucket, COLOR_PREFIXES, TYPOGRAPHY_PREFIXES,
};

const XML_DECL: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;

/// Resource directory for a language: the default language goes to the
/// unqualified `values` folder.
pub fn values_dir(lang: &str, default_lang: &str) -> String {
    if lang == default_lang {
        "values".to_string()
    } else {
        format!("values-{lang}")
    }
}

/// `res/values*/strings.xml` for one language.
pub fn strings_xml(strings: &IndexMap<String, String>) -> String {
    let mut out = String::new();
    out.push_str(XML_DECL);
    out.push_str("\n<resources>\n");
    for (key, value) in strings {
        out.push_str(&format!(
            "    <string name=\"{}\">{}</string>\n",
            escape_markup_text(key),
            escape_markup_text(value)
        ));
    }
    out.push_str("</resources>");
    out
}

/// Sanitized identifiers with their colors; later names overwrite earlier ones
/// that sanitize to the same identifier but keep the first position.
fn named_colors(colors: &IndexMap<String, Rgba>, casing: Casing) -> IndexMap<String, Rgba> {
    colors
        .iter()
        .map(|(name, rgba)| (safe_identifier(name, casing, COLOR_PREFIXES), *rgba))
        .collect()
}

/// `res/values/colors.xml` with `#AARRGGBB` values.
pub fn colors_xml(colors: &IndexMap<String, Rgba>) -> String {
    let mut out = String::new();
    out.push_str(XML_DECL);
    out.push_str("\n<!-- Generated from Figma color variables -->\n<resources>\n");
    for (name, rgba) in named_colors(colors, Casing::Snake) {
        out.push_str(&format!(
            "    <color name=\"{name}\">{}</color>\n",
            rgba.to_argb_hex()
        ));
    }
    out.push_str("</resources>");
    out
}

fn package_header(package: Option<&str>) -> Vec<String> {
    match package {
        Some(p) if !p.trim().is_empty() => vec![format!("package {}", p.trim()), String::new()],
        _ => Vec::new(),
    }
}

/// Compose `Color.kt`: one top-level `val` per color.
pub fn compose_colors(colors: &IndexMap<String, Rgba>, package: Option<&str>) -> String {
    let mut lines = package_header(package);
    lines.extend(
        [
            "import androidx.compose.ui.graphics.Color",
            "",
            "// Generated from Figma color variables",
            "",
        ]
        .map(String::from),
    );
    for (name, rgba) in named_colors(colors, Casing::Pascal) {
        lines.push(format!("val {name} = Color({})", rgba.to_argb_literal()));
    }
    lines.push(String::new());
    lines.join("\n")
}

fn compose_weight(weight: u16) -> &'static str {
    match WeightBucket::from_weight(weight) {
        WeightBucket::W100 => "Thin",
        WeightBucket::W200 => "ExtraLight",
        WeightBucket::W300 => "Light",
        WeightBucket::W400 => "Normal",
        WeightBucket::W500 => "Medium",
        WeightBucket::W600 => "SemiBold",
        WeightBucket::W700 => "Bold",
        WeightBucket::W800 => "ExtraBold",
        WeightBucket::W900 => "Black",
    }
}

/// Compose `Type.kt`: one `TextStyle` per text style, line height in `sp`.
pub fn compose_typography(styles: &[TypographyStyle], package: Option<&str>) -> String {
    let mut lines = package_header(package);
    lines.extend(
        [
            "import androidx.compose.ui.text.TextStyle",
            "import androidx.compose.ui.text.font.FontWeight",
            "import androidx.compose.ui.unit.sp",
            "",
            "// Generated from Figma text styles",
            "",
        ]
        .map(String::from),
    );
    for style in styles {
        let name = safe_identifier(&style.name, Casing::Pascal, TYPOGRAPHY_PREFIXES);
        let letter_spacing = round_to(style.letter_spacing, 2);
        lines.push(format!("val {name} = TextStyle("));
        lines.push(format!(
            "    fontSize = {}.sp,",
            format_number(style.font_size.round())
        ));
        lines.push(format!(
            "    fontWeight = FontWeight.{},",
            compose_weight(style.font_weight)
        ));
        if letter_spacing != 0.0 {
            lines.push(format!("    letterSpacing = {}.sp,", format_number(letter_spacing)));
        }
        lines.push(format!(
            "    lineHeight = {}.sp",
            format_number(round_to(style.line_height, 1))
        ));
        lines.push(")".to_string());
        lines.push(String::new());
    }
    lines.join("\n")
}
