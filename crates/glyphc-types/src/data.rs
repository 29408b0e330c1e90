//! [`TypeData`]: the payload interned to produce a [`crate::TypeId`] handle.

use crate::flags::TypeFlags;
use crate::kind::TypeKind;
use crate::TypeId;
use glyphc_common::{DefId, FunctionId};

/// The full structural payload of a type occurrence. Two `TypeData` values
/// that are `==` are, by construction of the interner, the same `TypeId`
/// (Invariant 6: "Two Types are identical iff they match on kind, optional,
/// meta, definition reference, and all generic arguments are pairwise
/// identical").
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeData {
    pub kind: TypeKind,
    pub flags: TypeFlags,
    /// MultiProtocol: sorted member protocols. Callable: `[return, args...]`.
    /// Named generic kinds: one substitution per definition slot.
    pub generic_arguments: Vec<TypeId>,
}

impl TypeData {
    #[must_use]
    pub fn new(kind: TypeKind, optional: bool) -> Self {
        TypeData {
            kind,
            flags: TypeFlags::fresh().with(TypeFlags::OPTIONAL, optional),
            generic_arguments: Vec::new(),
        }
    }

    #[must_use]
    pub fn class(def: DefId, optional: bool) -> Self {
        Self::new(TypeKind::Class(def), optional)
    }

    #[must_use]
    pub fn protocol(def: DefId, optional: bool) -> Self {
        Self::new(TypeKind::Protocol(def), optional)
    }

    #[must_use]
    pub fn enumeration(def: DefId, optional: bool) -> Self {
        Self::new(TypeKind::Enum(def), optional)
    }

    #[must_use]
    pub fn value_type(def: DefId, optional: bool) -> Self {
        Self::new(TypeKind::ValueType(def), optional)
    }

    #[must_use]
    pub fn extension(def: DefId) -> Self {
        Self::new(TypeKind::Extension(def), false)
    }

    /// Generic variable resolved against a type definition (§3, §4.1).
    #[must_use]
    pub fn generic_variable(index: u32, constraint: DefId, optional: bool) -> Self {
        Self::new(TypeKind::GenericVariable { index, constraint }, optional)
    }

    /// Generic variable resolved against a function's own generics (§3).
    #[must_use]
    pub fn local_generic_variable(index: u32, constraint: FunctionId, optional: bool) -> Self {
        Self::new(TypeKind::LocalGenericVariable { index, constraint }, optional)
    }

    /// Constructs a `MultiProtocol`. Callers must sort `members` by
    /// canonical protocol identity before calling this (the interner layer
    /// does the sort so the invariant can never be forgotten; see
    /// [`crate::interner::TypeInterner::make_multi_protocol`]).
    #[must_use]
    pub fn multi_protocol(members: Vec<TypeId>, optional: bool) -> Self {
        TypeData {
            kind: TypeKind::MultiProtocol(members),
            flags: TypeFlags::fresh().with(TypeFlags::OPTIONAL, optional),
            generic_arguments: Vec::new(),
        }
    }

    #[must_use]
    pub fn something() -> Self {
        Self::new(TypeKind::Something, false)
    }

    #[must_use]
    pub fn someobject(optional: bool) -> Self {
        Self::new(TypeKind::Someobject, optional)
    }

    #[must_use]
    pub fn no_return() -> Self {
        Self::new(TypeKind::NoReturn, false)
    }

    /// A prior phase already reported an error, carrying the two-variant
    /// payload §4.2 rule 5 describes: `generic_arguments` is `[ok, error]`,
    /// mirroring [`Self::callable`]'s `[return, ...params]` layout.
    #[must_use]
    pub fn error(ok: TypeId, error_type: TypeId) -> Self {
        TypeData {
            kind: TypeKind::Error,
            flags: TypeFlags::fresh(),
            generic_arguments: vec![ok, error_type],
        }
    }

    #[must_use]
    pub fn error_ok(&self) -> Option<TypeId> {
        matches!(self.kind, TypeKind::Error).then(|| self.generic_arguments.first().copied()).flatten()
    }

    #[must_use]
    pub fn error_error(&self) -> Option<TypeId> {
        matches!(self.kind, TypeKind::Error).then(|| self.generic_arguments.get(1).copied()).flatten()
    }

    /// An incomplete `Callable`; `generic_arguments` is filled in afterward
    /// with `[return, arg0, arg1, ...]`.
    #[must_use]
    pub fn callable_incomplete(optional: bool) -> Self {
        Self::new(TypeKind::Callable, optional)
    }

    #[must_use]
    pub fn callable(return_type: TypeId, arguments: &[TypeId], optional: bool) -> Self {
        let mut generic_arguments = Vec::with_capacity(arguments.len() + 1);
        generic_arguments.push(return_type);
        generic_arguments.extend_from_slice(arguments);
        TypeData {
            kind: TypeKind::Callable,
            flags: TypeFlags::fresh().with(TypeFlags::OPTIONAL, optional),
            generic_arguments,
        }
    }

    #[must_use]
    pub fn callable_return(&self) -> Option<TypeId> {
        matches!(self.kind, TypeKind::Callable)
            .then(|| self.generic_arguments.first().copied())
            .flatten()
    }

    #[must_use]
    pub fn callable_parameters(&self) -> &[TypeId] {
        if matches!(self.kind, TypeKind::Callable) && !self.generic_arguments.is_empty() {
            &self.generic_arguments[1..]
        } else {
            &[]
        }
    }
}
