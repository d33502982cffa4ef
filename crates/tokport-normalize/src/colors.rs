use indexmap::IndexMap;
use std::collections::HashMap;
use tokport_core::{RawValue, Rgba, Variable, VariableCollection, VariableKind};

/// variable display name -> base-mode color
pub type ColorTable = IndexMap<String, Rgba>;

/// Lookup of variables by id across a set of collections.
pub struct VariableIndex<'a> {
    by_id: HashMap<&'a str, &'a Variable>,
}

impl<'a> VariableIndex<'a> {
    pub fn new(collections: &'a [VariableCollection]) -> Self {
        let by_id = collections
            .iter()
            .flat_map(|c| c.variables.iter())
            .map(|v| (v.id.as_str(), v))
            .collect();
        Self { by_id }
    }

    pub fn get(&self, id: &str) -> Option<&'a Variable> {
        self.by_id.get(id).copied()
    }
}

/// Resolve one color value at `mode_id`.
///
/// Direct colors pass through. An alias is followed exactly one hop: the target
/// must be a COLOR variable holding a direct color at the same mode id.
/// Anything else yields `None` and the value is dropped.
pub fn resolve_color(index: &VariableIndex<'_>, value: &RawValue, mode_id: &str) -> Option<Rgba> {
    match value {
        RawValue::Color(rgba) => Some(*rgba),
        RawValue::Alias(alias) => {
            let target = index.get(&alias.id)?;
            if target.kind != VariableKind::Color {
                return None;
            }
            match target.values.get(mode_id)? {
                RawValue::Color(rgba) => Some(*rgba),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Copy of `collections` restricted to COLOR variables, with every alias
/// replaced by its resolved color. Unresolvable `(variable, mode)` pairs are
/// removed; collections left without color variables are dropped.
pub fn resolve_color_aliases(collections: &[VariableCollection]) -> Vec<VariableCollection> {
    let index = VariableIndex::new(collections);
    let mut out = Vec::new();
    for collection in collections {
        let mut variables = Vec::new();
        for variable in collection.variables_of(VariableKind::Color) {
            let values: IndexMap<_, _> = variable
                .values
                .iter()
                .filter_map(|(mode_id, value)| {
                    let resolved = resolve_color(&index, value, mode_id);
                    if resolved.is_none() {
                        tracing::debug!(
                            event = "color_value_dropped",
                            variable = %variable.name,
                            mode_id = %mode_id
                        );
                    }
                    resolved.map(|c| (mode_id.clone(), RawValue::Color(c)))
                })
                .collect();
            variables.push(Variable {
                values,
                ..variable.clone()
            });
        }
        if !variables.is_empty() {
            out.push(VariableCollection {
                variables,
                ..collection.clone()
            });
        }
    }
    out
}

/// Base-mode color of every COLOR variable, keyed by display name.
pub fn color_table(collections: &[VariableCollection]) -> ColorTable {
    let mut table = ColorTable::new();
    for collection in resolve_color_aliases(collections) {
        let Some(base) = collection.base_mode() else {
            continue;
        };
        for variable in &collection.variables {
            if let Some(RawValue::Color(color)) = variable.values.get(&base.mode_id) {
                table.insert(variable.name.clone(), *color);
            }
        }
    }
    table
}
