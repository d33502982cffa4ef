use indexmap::IndexMap;
use tokport_core::VariableCollection;

/// Mode display name -> ISO 639-1 code.
pub const LANGUAGE_CODES: &[(&str, &str)] = &[
    ("English", "en"),
    ("Arabic", "ar"),
    ("Spanish", "es"),
    ("French", "fr"),
    ("German", "de"),
    ("Italian", "it"),
    ("Portuguese", "pt"),
    ("Russian", "ru"),
    ("Chinese", "zh"),
    ("Japanese", "ja"),
    ("Korean", "ko"),
    ("Dutch", "nl"),
    ("Polish", "pl"),
    ("Turkish", "tr"),
    ("Swedish", "sv"),
    ("Norwegian", "no"),
    ("Danish", "da"),
    ("Finnish", "fi"),
    ("Greek", "el"),
    ("Hebrew", "he"),
    ("Hindi", "hi"),
    ("Thai", "th"),
    ("Vietnamese", "vi"),
    ("Indonesian", "id"),
    ("Malay", "ms"),
    ("Czech", "cs"),
    ("Hungarian", "hu"),
    ("Romanian", "ro"),
    ("Ukrainian", "uk"),
];

/// Resolve a mode name to a language code.
///
/// Lookup is exact (case-sensitive). Unknown names fall back to the first two
/// characters of the lowercased name, so distinct unknown languages sharing a
/// prefix resolve to the same code.
pub fn language_code(mode_name: &str) -> String {
    if let Some((_, code)) = LANGUAGE_CODES.iter().find(|(name, _)| *name == mode_name) {
        return code.to_string();
    }
    mode_name.to_lowercase().chars().take(2).collect()
}

/// modeId -> language code for one collection.
#[derive(Debug, Clone, Default)]
pub struct LanguageMap {
    codes: IndexMap<String, String>,
}

impl LanguageMap {
    pub fn for_collection(collection: &VariableCollection) -> Self {
        let codes = collection
            .modes
            .iter()
            .map(|m| (m.mode_id.clone(), language_code(&m.name)))
            .collect();
        Self { codes }
    }

    pub fn code(&self, mode_id: &str) -> Option<&str> {
        self.codes.get(mode_id).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::modes;

    #[test]
    fn known_names_map_to_iso_codes() {
        assert_eq!(language_code("English"), "en");
        assert_eq!(language_code("Arabic"), "ar");
        assert_eq!(language_code("Ukrainian"), "uk");
    }

    #[test]
    fn unknown_names_truncate_lowercase() {
        assert_eq!(language_code("Esperanto"), "es");
        assert_eq!(language_code("english"), "en");
        assert_eq!(language_code("X"), "x");
        assert_eq!(language_code(""), "");
        assert_eq!(language_code("Ñandú"), "ña");
    }

    #[test]
    fn map_is_built_per_collection() {
        let c = VariableCollection {
            id: "c".into(),
            name: "Strings".into(),
            modes: modes(&[("English", "m1"), ("Spanish", "m2"), ("Esperanto", "m3")]),
            variables: vec![],
        };
        let map = LanguageMap::for_collection(&c);
        assert_eq!(map.code("m1"), Some("en"));
        assert_eq!(map.code("m3"), Some("es"));
        assert_eq!(map.code("missing"), None);
    }
}
