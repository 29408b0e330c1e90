//! `Scope` (§3): "a mapping from variable id ... to LocalVariable, stacked
//! by lexical nesting. Lifetime: created on function-body entry, destroyed
//! on exit; never shared across functions."

use rustc_hash::FxHashMap;

use crate::ir::IrValue;

/// Where a local binding's value actually lives (§3 "LocalVariable").
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageLocation {
    /// A mutable binding: a stack slot, loaded through on read and stored
    /// through on write.
    Slot(IrValue),
    /// An immutable ("frozen") binding: the already-evaluated value itself.
    /// No slot exists, so reading it never emits a load.
    Value(IrValue),
}

/// A pair `(mutable, storage-location)` (§3).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LocalVariable {
    pub mutable: bool,
    pub storage: StorageLocation,
}

impl LocalVariable {
    #[must_use]
    pub fn slot(value: IrValue) -> Self {
        LocalVariable { mutable: true, storage: StorageLocation::Slot(value) }
    }

    #[must_use]
    pub fn frozen(value: IrValue) -> Self {
        LocalVariable { mutable: false, storage: StorageLocation::Value(value) }
    }
}

/// A stack of lexical scopes, each mapping a parse-time variable id to its
/// [`LocalVariable`]. One `Scope` belongs to exactly one function's
/// emission (§5 "Scopes (C7) are stack-local to a single function's
/// emission; there is no cross-function scope aliasing.").
#[derive(Debug, Default)]
pub struct Scope {
    frames: Vec<FxHashMap<u32, LocalVariable>>,
}

impl Scope {
    /// Created on function-body entry, with one top-level frame already open.
    #[must_use]
    pub fn new() -> Self {
        Scope { frames: vec![FxHashMap::default()] }
    }

    pub fn push_frame(&mut self) {
        self.frames.push(FxHashMap::default());
    }

    /// Destroys the innermost lexical nesting level on block exit.
    pub fn pop_frame(&mut self) {
        self.frames.pop();
        debug_assert!(!self.frames.is_empty(), "popped the function's top-level frame");
    }

    pub fn declare(&mut self, variable_id: u32, local: LocalVariable) {
        self.frames.last_mut().expect("scope has no open frame").insert(variable_id, local);
    }

    /// Walks frames from innermost to outermost, per lexical shadowing.
    #[must_use]
    pub fn lookup(&self, variable_id: u32) -> Option<LocalVariable> {
        self.frames.iter().rev().find_map(|frame| frame.get(&variable_id).copied())
    }
}

#[cfg(test)]
#[path = "tests/scope.rs"]
mod tests;
