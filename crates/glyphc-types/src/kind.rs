//! The tagged `kind` of a [`crate::TypeData`] (§3, §9 Design Notes: "represent
//! Type as a sum over kinds with kind-specific payloads").

use glyphc_common::{DefId, FunctionId};

/// What a generic variable's index is meaningful against (§3 "resolution
/// constraint").
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResolutionConstraint {
    /// An ordinary generic: the slot belongs to a type definition.
    TypeDefinition(DefId),
    /// A local generic (generic function): the slot belongs to a function.
    Function(FunctionId),
}

/// The tagged kind of a type occurrence (§3).
///
/// Named kinds (`Class`, `Protocol`, `Enum`, `ValueType`, `Extension`) carry
/// a [`DefId`] naming the definition they project; the `Type` does not own
/// that definition, it only references it (§3 "definition reference").
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class(DefId),
    Protocol(DefId),
    /// Sorted set of member protocols, by canonical protocol identity order
    /// (Invariant 1). Stored as generic arguments in the original; kept
    /// separate here so the sort invariant is enforced at construction and
    /// cannot be forgotten by a caller mutating `generic_arguments` directly.
    MultiProtocol(Vec<crate::TypeId>),
    Enum(DefId),
    ValueType(DefId),
    Extension(DefId),
    /// Generic variable bound to a type definition's generic parameter list.
    GenericVariable { index: u32, constraint: DefId },
    /// Generic variable bound to a function's own generic parameter list.
    LocalGenericVariable { index: u32, constraint: FunctionId },
    /// First generic argument is the return type, the rest are parameters.
    Callable,
    /// Maybe everything; top type.
    Something,
    /// Any object instance.
    Someobject,
    /// Bottom type: a call that never returns.
    NoReturn,
    /// A prior phase already reported an error; suppress cascades.
    Error,
    /// Used internally by `Type`'s protected constructor to carry only
    /// storage-expectation flags (reference/mutable/force-box) without
    /// naming a concrete kind — see `Type.hpp`'s `StorageExpectation`.
    StorageExpectation,
}

impl TypeKind {
    /// The definition this kind projects, for kinds that have one.
    #[must_use]
    pub fn def_id(&self) -> Option<DefId> {
        match *self {
            TypeKind::Class(d)
            | TypeKind::Protocol(d)
            | TypeKind::Enum(d)
            | TypeKind::ValueType(d)
            | TypeKind::Extension(d) => Some(d),
            _ => None,
        }
    }

    /// §4.1 "Stringification ... generic variables print as their slot name
    /// within the given TypeContext" relies on knowing which kinds are
    /// generic variables; §9.2 `canHaveGenericArguments`.
    #[must_use]
    pub fn can_have_generic_arguments(&self) -> bool {
        matches!(
            self,
            TypeKind::Class(_) | TypeKind::Protocol(_) | TypeKind::ValueType(_) | TypeKind::Enum(_)
        )
    }

    /// §9.2 `canHaveProtocol`: kinds that may conform to a protocol.
    #[must_use]
    pub fn can_have_protocol(&self) -> bool {
        matches!(self, TypeKind::ValueType(_) | TypeKind::Class(_) | TypeKind::Enum(_))
    }

    /// §9.2 `allowsMetaType`: only named, definable kinds support a
    /// type-object projection (Invariant 3 restates the same set).
    #[must_use]
    pub fn allows_meta_type(&self) -> bool {
        matches!(
            self,
            TypeKind::Class(_) | TypeKind::ValueType(_) | TypeKind::Enum(_) | TypeKind::Protocol(_)
        )
    }

    #[must_use]
    pub fn is_generic_variable(&self) -> bool {
        matches!(self, TypeKind::GenericVariable { .. } | TypeKind::LocalGenericVariable { .. })
    }
}
