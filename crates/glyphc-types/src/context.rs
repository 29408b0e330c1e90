//! `TypeContext`: the three pieces of context every resolution and
//! compatibility decision needs (§4.3).

use glyphc_common::{DefId, FunctionId};

use crate::TypeId;

/// What a generic variable's resolution is performed *against* (§4.3).
#[derive(Clone, Debug)]
pub struct TypeContext {
    /// The callee's own type, e.g. `self`'s static type when compiling one
    /// of its methods. `None` when there is no enclosing type (a free
    /// function, or compiling outside any method).
    pub callee_type: Option<TypeId>,
    /// The definition that owns the generic parameter list
    /// `GenericVariable` indices are relative to, when known independent of
    /// `callee_type` (e.g. while compiling a generic class's own body,
    /// before any particular specialization has been chosen).
    pub callee_generics_owner: Option<DefId>,
    /// The enclosing function's own generic parameters, for resolving
    /// `LocalGenericVariable`.
    pub function: Option<FunctionId>,
    pub function_generic_arguments: Vec<TypeId>,
}

impl TypeContext {
    #[must_use]
    pub fn empty() -> Self {
        TypeContext {
            callee_type: None,
            callee_generics_owner: None,
            function: None,
            function_generic_arguments: Vec::new(),
        }
    }

    #[must_use]
    pub fn for_callee(callee_type: TypeId) -> Self {
        TypeContext {
            callee_type: Some(callee_type),
            callee_generics_owner: None,
            function: None,
            function_generic_arguments: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_function(mut self, function: FunctionId, generic_arguments: Vec<TypeId>) -> Self {
        self.function = Some(function);
        self.function_generic_arguments = generic_arguments;
        self
    }

    /// §4.3: "substitute with `C.calleeType.genericArguments[T.index]`" —
    /// whether `constraint` (the generic variable's resolution constraint)
    /// matches the context's callee, i.e. whether `calleeType` is intended
    /// to resolve this variable. The original's `canBeUsedToResolve` also
    /// allows a supertype of the constraint to resolve it; that requires
    /// walking the class hierarchy, which lives in `glyphc-defs` and is
    /// exposed to this crate through [`crate::resolve::HierarchyOracle`].
    #[must_use]
    pub fn directly_resolves(&self, constraint: DefId) -> bool {
        self.callee_generics_owner == Some(constraint)
    }
}

/// Accumulates the pairwise bounds discovered while unifying generic
/// variables during compatibility checking (§4.4 rule 9), one slot per
/// generic variable index encountered. A later phase reduces each slot's
/// bounds to a single common supertype; that reduction (the "common type
/// finder" proper) is a consumer of this data, not part of C4 itself.
#[derive(Clone, Debug, Default)]
pub struct CommonTypeFinder {
    bounds: Vec<Vec<TypeId>>,
}

impl CommonTypeFinder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_bound(&mut self, slot: usize, ty: TypeId) {
        if self.bounds.len() <= slot {
            self.bounds.resize(slot + 1, Vec::new());
        }
        self.bounds[slot].push(ty);
    }

    #[must_use]
    pub fn bounds(&self, slot: usize) -> &[TypeId] {
        self.bounds.get(slot).map_or(&[], Vec::as_slice)
    }
}
