//! The IR builder contract consumed from the backend (§6): "minimal
//! operations needed — `alloca(type, name?)`, `gep(base, idx...)`,
//! `load(ptr)`, `store(value, ptr)`, plus whatever the higher nodes
//! require." and a `TypeHelper` that "maps a core `Type` to the backend's
//! type representation."
//!
//! Both the backend's SSA values and its types are opaque to this crate —
//! the LLVM-style builder owns their real representation — so we thread
//! them as cheap handle newtypes, the same non-owning-index pattern
//! `glyphc-common::ids` uses for cross-table references.

use std::fmt;

/// An opaque handle to a backend SSA value (a pointer or a loaded value,
/// indistinguishable at this layer — the distinction lives in how the
/// handle was produced).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct IrValue(u32);

impl IrValue {
    #[must_use]
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }

    #[must_use]
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for IrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IrValue({})", self.0)
    }
}

/// An opaque handle to a backend type, produced by a [`TypeHelper`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BackendTypeId(u32);

impl BackendTypeId {
    #[must_use]
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }

    #[must_use]
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for BackendTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BackendTypeId({})", self.0)
    }
}

/// §6 "IR builder contract": the operations C7 issues against the
/// LLVM-style backend. `gep` takes a struct-base pointer and a sequence of
/// indices the way LLVM's `getelementptr` does — a field read is always a
/// *two*-index gep (struct base + field index, §4.7), an optional's
/// presence slot is a *one*-index gep (index 0 into the pair).
pub trait IrBuilder {
    fn alloca(&mut self, ty: BackendTypeId, name: Option<&str>) -> IrValue;
    fn gep(&mut self, base: IrValue, indices: &[i32]) -> IrValue;
    fn load(&mut self, ptr: IrValue) -> IrValue;
    fn store(&mut self, value: IrValue, ptr: IrValue);
}

/// §6 "`TypeHelper` maps a core `Type` to the backend's type representation."
pub trait TypeHelper {
    fn backend_type(&mut self, interner: &glyphc_types::TypeInterner, oracle: &dyn glyphc_types::PayloadSizeOracle, ty: glyphc_types::TypeId) -> BackendTypeId;
}
