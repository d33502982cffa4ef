//! Token normalization: variable collections in, token tables out.
//!
//! Strings are keyed by language code then variable name; colors by variable
//! name using each collection's base mode. Both tables preserve encounter
//! order (collection order, then variable order), which is the order the
//! generators emit entries in.

mod colors;
mod lang;
mod typography;

pub use colors::{color_table, resolve_color, resolve_color_aliases, ColorTable, VariableIndex};
pub use lang::{language_code, LanguageMap, LANGUAGE_CODES};
pub use typography::{
    font_weight_from_style, Dimension, DimensionUnit, FontName, RawTextStyle, TextStyleRecord,
};

use indexmap::IndexMap;
use tokport_core::{RawValue, VariableCollection, VariableKind};

/// language code -> (variable name -> text)
pub type StringTable = IndexMap<String, IndexMap<String, String>>;

/// Collect every STRING variable of every collection into one table.
///
/// A name that appears in more than one collection for the same language keeps
/// the value of the last collection processed.
pub fn string_table(collections: &[VariableCollection]) -> StringTable {
    let mut table = StringTable::new();
    for collection in collections {
        let langs = LanguageMap::for_collection(collection);
        for variable in collection.variables_of(VariableKind::String) {
            for (mode_id, value) in &variable.values {
                let RawValue::Text(text) = value else {
                    continue;
                };
                let Some(code) = langs.code(mode_id) else {
                    tracing::warn!(
                        event = "unknown_mode",
                        collection = %collection.name,
                        variable = %variable.name,
                        mode_id = %mode_id
                    );
                    continue;
                };
                let entries = table.entry(code.to_string()).or_default();
                if let Some(prev) = entries.insert(variable.name.clone(), text.clone()) {
                    if prev != *text {
                        tracing::warn!(
                            event = "string_overwritten",
                            lang = code,
                            key = %variable.name,
                            collection = %collection.name
                        );
                    }
                }
            }
        }
    }
    table
}
