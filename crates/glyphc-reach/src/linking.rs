//! The linking table (§6 "Linking table"): an indexed list of exported
//! functions with stable indices, set once per function.

use glyphc_common::FunctionId;
use glyphc_defs::function::FunctionTable;

/// Owning, append-only list of functions exported across the compilation
/// unit boundary. Index assignment is stable: once a function has a
/// linking-table index it keeps it for the rest of the run (`Function`'s
/// `set_linking_table_index` is itself idempotent, §3 "linking-table
/// index").
#[derive(Debug, Default)]
pub struct LinkingTable {
    exported: Vec<FunctionId>,
}

impl LinkingTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns `id` the next linking-table index, unless it already has one.
    /// Returns the (possibly pre-existing) index either way.
    pub fn export(&mut self, functions: &mut FunctionTable, id: FunctionId) -> u32 {
        if let Some(existing) = functions.get(id).linking_table_index() {
            return existing;
        }
        let index = u32::try_from(self.exported.len()).expect("linking table overflow");
        self.exported.push(id);
        functions.get_mut(id).set_linking_table_index(index);
        index
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.exported.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exported.is_empty()
    }

    #[must_use]
    pub fn entries(&self) -> &[FunctionId] {
        &self.exported
    }

    /// `None` if `id` has never been passed to `export`.
    #[must_use]
    pub fn index_of(&self, functions: &FunctionTable, id: FunctionId) -> Option<u32> {
        functions.get(id).linking_table_index()
    }
}

#[cfg(test)]
#[path = "tests/linking.rs"]
mod tests;
