//! iOS generators: `Localizable.strings`, Swift color and font extensions.

use indexmap::IndexMap;
use tokport_core::{
    escape_native_string_literal, format_number, round_to, safe_identifier, Casing, Rgba,
    TypographyStyle, WeightBucket, COLOR_PREFIXES, TYPOGRAPHY_PREFIXES,
};

/// `.lproj` folder name (without suffix) for a language.
pub fn lproj_dir(lang: &str, default_lang: &str) -> String {
    if lang == default_lang {
        "Base".to_string()
    } else {
        lang.to_string()
    }
}

/// `Localizable.strings` for one language.
pub fn localizable_strings(strings: &IndexMap<String, String>) -> String {
    let mut out = String::from("/* Localization strings generated from Figma */\n\n");
    for (key, value) in strings {
        out.push_str(&format!(
            "\"{}\" = \"{}\";\n",
            escape_native_string_literal(key),
            escape_native_string_literal(value)
        ));
    }
    out
}

const SWIFTUI_HEX_INIT: &[&str] = &[
    "// MARK: - Color Hex Initializer",
    "extension Color {",
    "    init(hex: String, alpha: Double = 1.0) {",
    "        let digits = hex.trimmingCharacters(in: CharacterSet.alphanumerics.inverted)",
    "        var value: UInt64 = 0",
    "        Scanner(string: digits).scanHexInt64(&value)",
    "        let r = Double((value >> 16) & 0xFF) / 255.0",
    "        let g = Double((value >> 8) & 0xFF) / 255.0",
    "        let b = Double(value & 0xFF) / 255.0",
    "        self.init(.sRGB, red: r, green: g, blue: b, opacity: alpha)",
    "    }",
    "}",
];

const UIKIT_HEX_INIT: &[&str] = &[
    "// MARK: - UIColor Hex Initializer",
    "extension UIColor {",
    "    convenience init(hex: String, alpha: CGFloat = 1.0) {",
    "        let digits = hex.trimmingCharacters(in: CharacterSet.alphanumerics.inverted)",
    "        var value: UInt64 = 0",
    "        Scanner(string: digits).scanHexInt64(&value)",
    "        let r = CGFloat((value >> 16) & 0xFF) / 255.0",
    "        let g = CGFloat((value >> 8) & 0xFF) / 255.0",
    "        let b = CGFloat(value & 0xFF) / 255.0",
    "        self.init(red: r, green: g, blue: b, alpha: alpha)",
    "    }",
    "}",
];

fn import_line(swift_ui: bool) -> &'static str {
    if swift_ui {
        "import SwiftUI"
    } else {
        "import UIKit"
    }
}

/// `Colors.swift`. Translucent colors pass their alpha rounded to two places.
pub fn swift_colors(colors: &IndexMap<String, Rgba>, swift_ui: bool) -> String {
    let color_type = if swift_ui { "Color" } else { "UIColor" };
    let mut lines: Vec<String> = vec![
        "// Generated from Figma color variables".into(),
        import_line(swift_ui).into(),
        String::new(),
    ];
    let hex_init = if swift_ui { SWIFTUI_HEX_INIT } else { UIKIT_HEX_INIT };
    lines.extend(hex_init.iter().map(|l| l.to_string()));
    lines.push(String::new());
    lines.push("// MARK: - Design System Colors".into());
    lines.push(format!("extension {color_type} {{"));

    let named: IndexMap<String, Rgba> = colors
        .iter()
        .map(|(name, rgba)| (safe_identifier(name, Casing::Camel, COLOR_PREFIXES), *rgba))
        .collect();
    for (name, rgba) in named {
        if rgba.is_opaque() {
            lines.push(format!(
                "    static let {name} = {color_type}(hex: \"{}\")",
                rgba.to_rgb_hex()
            ));
        } else {
            lines.push(format!(
                "    static let {name} = {color_type}(hex: \"{}\", alpha: {})",
                rgba.to_rgb_hex(),
                format_number(round_to(rgba.a, 2))
            ));
        }
    }
    lines.push("}".into());
    lines.push(String::new());
    lines.join("\n")
}

/// Weight constant shared by `Font.Weight` and `UIFont.Weight`.
fn swift_weight(weight: u16) -> &'static str {
    match WeightBucket::from_weight(weight) {
        WeightBucket::W100 => "ultraLight",
        WeightBucket::W200 => "thin",
        WeightBucket::W300 => "light",
        WeightBucket::W400 => "regular",
        WeightBucket::W500 => "medium",
        WeightBucket::W600 => "semibold",
        WeightBucket::W700 => "bold",
        WeightBucket::W800 => "heavy",
        WeightBucket::W900 => "black",
    }
}

/// `Typography.swift`: a font per text style plus the line height and tracking
/// that the font itself cannot carry.
pub fn swift_typography(styles: &[TypographyStyle], swift_ui: bool) -> String {
    let font_type = if swift_ui { "Font" } else { "UIFont" };
    let mut lines: Vec<String> = vec![
        "// Generated from Figma text styles".into(),
        import_line(swift_ui).into(),
        String::new(),
        format!("extension {font_type} {{"),
    ];
    let mut metrics = Vec::new();
    for style in styles {
        let name = safe_identifier(&style.name, Casing::Camel, TYPOGRAPHY_PREFIXES);
        let size = format_number(style.font_size.round());
        let weight = swift_weight(style.font_weight);
        if swift_ui {
            lines.push(format!(
                "    static let {name} = Font.system(size: {size}, weight: .{weight})"
            ));
        } else {
            lines.push(format!(
                "    static let {name} = UIFont.systemFont(ofSize: {size}, weight: .{weight})"
            ));
        }
        metrics.push(format!(
            "    static let {name} = TextStyleMetrics(lineHeight: {}, tracking: {})",
            format_number(round_to(style.line_height, 1)),
            format_number(round_to(style.letter_spacing, 2))
        ));
    }
    lines.push("}".into());
    lines.push(String::new());
    lines.extend(
        [
            "// MARK: - Text Style Metrics",
            "struct TextStyleMetrics {",
            "    let lineHeight: CGFloat",
            "    let tracking: CGFloat",
            "}",
            "",
            "extension TextStyleMetrics {",
        ]
        .map(String::from),
    );
    lines.extend(metrics);
    lines.push("}".into());
    lines.push(String::new());
    lines.join("\n")
}
