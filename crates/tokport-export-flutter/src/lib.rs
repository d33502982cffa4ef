//! Flutter generators: `app_{lang}.arb`, `AppColors` and `AppTextStyles`.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use tokport_core::{
    format_number, round_to, safe_identifier, Casing, Rgba, TypographyStyle, WeightBucket,
    COLOR_PREFIXES, TYPOGRAPHY_PREFIXES,
};

/// Application Resource Bundle for one language: `@@locale` first, then the
/// entries in table order, two-space indented.
pub fn arb(lang: &str, strings: &IndexMap<String, String>) -> String {
    let mut map = Map::new();
    map.insert("@@locale".into(), Value::String(lang.to_string()));
    for (key, value) in strings {
        map.insert(key.clone(), Value::String(value.clone()));
    }
    // a map of strings always serializes
    serde_json::to_string_pretty(&Value::Object(map)).unwrap_or_default()
}

/// `app_colors.dart`.
pub fn dart_colors(colors: &IndexMap<String, Rgba>) -> String {
    let mut lines: Vec<String> = [
        "// Generated from Figma color variables",
        "import 'package:flutter/material.dart';",
        "",
        "class AppColors {",
    ]
    .map(String::from)
    .to_vec();

    let named: IndexMap<String, Rgba> = colors
        .iter()
        .map(|(name, rgba)| (safe_identifier(name, Casing::Camel, COLOR_PREFIXES), *rgba))
        .collect();
    for (name, rgba) in named {
        let (a, r, g, b) = rgba.argb8();
        lines.push(format!(
            "  static const Color {name} = Color.fromARGB({a}, {r}, {g}, {b});"
        ));
    }
    lines.push("}".into());
    lines.push(String::new());
    lines.join("\n")
}

fn dart_weight(weight: u16) -> String {
    format!("w{}", WeightBucket::from_weight(weight).value())
}

/// `app_text_styles.dart`. Line height is a ratio of the font size.
pub fn dart_typography(styles: &[TypographyStyle]) -> String {
    let mut lines: Vec<String> = [
        "// Generated from Figma text styles",
        "import 'package:flutter/material.dart';",
        "",
        "class AppTextStyles {",
    ]
    .map(String::from)
    .to_vec();

    for style in styles {
        let name = safe_identifier(&style.name, Casing::Camel, TYPOGRAPHY_PREFIXES);
        let letter_spacing = round_to(style.letter_spacing, 2);
        lines.push(format!("  static const TextStyle {name} = TextStyle("));
        lines.push(format!(
            "    fontSize: {},",
            format_number(style.font_size.round())
        ));
        lines.push(format!(
            "    fontWeight: FontWeight.{},",
            dart_weight(style.font_weight)
        ));
        if letter_spacing != 0.0 {
            lines.push(format!("    letterSpacing: {},", format_number(letter_spacing)));
        }
        if style.font_size > 0.0 {
            lines.push(format!(
                "    height: {:.2},",
                style.line_height / style.font_size
            ));
        }
        lines.push("  );".into());
    }
    lines.push("}".into());
    lines.push(String::new());
    lines.join("\n")
}
