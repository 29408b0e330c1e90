//! [`TypeId`]: the cheap `Copy` handle every phase actually passes around,
//! and [`TypeInterner`], the arena that makes structural identity an index
//! comparison (§9 Design Notes, Invariant 6).

use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt;

use glyphc_common::CoreError;
use rustc_hash::FxHashMap;

use crate::data::TypeData;
use crate::flags::TypeFlags;
use crate::kind::TypeKind;

/// A handle into a [`TypeInterner`]. Two `TypeId`s compare equal iff the
/// `TypeData` they were interned from compares equal — so `TypeId`
/// equality already *is* `identicalTo` for any pair of ids drawn from the
/// same interner (§4.4).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(u32);

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeId({})", self.0)
    }
}

impl TypeId {
    #[must_use]
    pub fn index(self) -> u32 {
        self.0
    }
}

#[derive(Default)]
struct TypeInternerData {
    types: Vec<TypeData>,
    lookup: FxHashMap<TypeData, TypeId>,
}

/// Interns [`TypeData`] values, deduplicating structurally identical
/// payloads to the same [`TypeId`].
///
/// Backed by a `RefCell`, not a concurrent map: §5 establishes the
/// compiler is single-threaded and cooperative, so there is nothing here
/// for `dashmap`-style sharding to buy us.
#[derive(Default)]
pub struct TypeInterner {
    data: RefCell<TypeInternerData>,
}

impl TypeInterner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.borrow().types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[tracing::instrument(level = "trace", skip(self))]
    pub fn intern(&self, value: TypeData) -> TypeId {
        let mut data = self.data.borrow_mut();
        if let Some(&id) = data.lookup.get(&value) {
            return id;
        }
        let id = TypeId(data.types.len() as u32);
        data.types.push(value.clone());
        data.lookup.insert(value, id);
        id
    }

    /// Sorts `members` by canonical protocol identity (Invariant 1) before
    /// interning, so the `MultiProtocol` invariant holds for every value
    /// this interner hands out.
    pub fn make_multi_protocol(&self, mut members: Vec<TypeId>, optional: bool) -> TypeId {
        members.sort_by(|a, b| self.canonical_order(*a, *b));
        members.dedup();
        self.intern(TypeData::multi_protocol(members, optional))
    }

    #[must_use]
    pub fn get(&self, id: TypeId) -> TypeData {
        self.data.borrow().types[id.0 as usize].clone()
    }

    #[must_use]
    pub fn kind(&self, id: TypeId) -> TypeKind {
        self.get(id).kind
    }

    #[must_use]
    pub fn flags(&self, id: TypeId) -> TypeFlags {
        self.get(id).flags
    }

    #[must_use]
    pub fn optional(&self, id: TypeId) -> bool {
        self.flags(id).optional()
    }

    #[must_use]
    pub fn meta(&self, id: TypeId) -> bool {
        self.flags(id).meta()
    }

    #[must_use]
    pub fn is_reference(&self, id: TypeId) -> bool {
        self.flags(id).is_reference()
    }

    #[must_use]
    pub fn is_mutable(&self, id: TypeId) -> bool {
        self.flags(id).is_mutable()
    }

    #[must_use]
    pub fn force_box(&self, id: TypeId) -> bool {
        self.flags(id).force_box()
    }

    #[must_use]
    pub fn generic_arguments(&self, id: TypeId) -> Vec<TypeId> {
        self.get(id).generic_arguments
    }

    /// Replaces one slot of `id`'s generic arguments, re-interning the
    /// result (§4.1 `setGenericArgument`; §9 Design Notes: rebuild rather
    /// than mutate in place).
    pub fn with_generic_argument(&self, id: TypeId, index: usize, value: TypeId) -> TypeId {
        let mut data = self.get(id);
        data.generic_arguments[index] = value;
        self.intern(data)
    }

    pub fn with_optional(&self, id: TypeId, optional: bool) -> TypeId {
        let mut data = self.get(id);
        data.flags.set(TypeFlags::OPTIONAL, optional);
        self.intern(data)
    }

    pub fn with_meta(&self, id: TypeId, meta: bool) -> TypeId {
        let mut data = self.get(id);
        data.flags.set(TypeFlags::META, meta);
        self.intern(data)
    }

    pub fn with_reference(&self, id: TypeId, reference: bool) -> TypeId {
        let mut data = self.get(id);
        data.flags.set(TypeFlags::REFERENCE, reference);
        self.intern(data)
    }

    pub fn with_mutable(&self, id: TypeId, mutable: bool) -> TypeId {
        let mut data = self.get(id);
        data.flags.set(TypeFlags::MUTABLE, mutable);
        self.intern(data)
    }

    pub fn with_force_box(&self, id: TypeId) -> TypeId {
        let mut data = self.get(id);
        data.flags.set(TypeFlags::FORCE_BOX, true);
        self.intern(data)
    }

    /// §4.1: fails with `BoxRequired` when `requiresBox()` holds for `id`.
    pub fn unbox(&self, id: TypeId) -> Result<TypeId, CoreError> {
        if crate::storage::requires_box(self, id) {
            return Err(CoreError::BoxRequired);
        }
        let mut data = self.get(id);
        data.flags.set(TypeFlags::FORCE_BOX, false);
        Ok(self.intern(data))
    }

    /// §4.1: "retrieving the wrong projection is a programmer error".
    pub fn def_id(&self, id: TypeId) -> Result<glyphc_common::DefId, CoreError> {
        self.kind(id).def_id().ok_or(CoreError::KindMismatch)
    }

    /// §9.2 `genericVariableIndex`; folded into `KindMismatch` per
    /// `SPEC_FULL.md`'s supplemented-feature note F.3.
    pub fn generic_variable_index(&self, id: TypeId) -> Result<u32, CoreError> {
        match self.kind(id) {
            TypeKind::GenericVariable { index, .. } | TypeKind::LocalGenericVariable { index, .. } => Ok(index),
            _ => Err(CoreError::KindMismatch),
        }
    }

    #[must_use]
    pub fn can_have_generic_arguments(&self, id: TypeId) -> bool {
        self.kind(id).can_have_generic_arguments()
    }

    #[must_use]
    pub fn can_have_protocol(&self, id: TypeId) -> bool {
        self.kind(id).can_have_protocol()
    }

    #[must_use]
    pub fn allows_meta_type(&self, id: TypeId) -> bool {
        self.kind(id).allows_meta_type()
    }

    /// Total order over types used to keep `MultiProtocol` members sorted
    /// (Invariant 1) and, per `SPEC_FULL.md` F.1, any other sorted
    /// container of types a later phase builds. Orders by `(kind
    /// discriminant, def id, optional, meta)`, matching `Type::operator<`
    /// in the original (`kind`, `optional`, `meta`, `typeDefinition_`).
    #[must_use]
    pub fn canonical_order(&self, a: TypeId, b: TypeId) -> Ordering {
        let da = self.get(a);
        let db = self.get(b);
        kind_rank(&da.kind)
            .cmp(&kind_rank(&db.kind))
            .then_with(|| da.kind.def_id().map(|d| d.index()).cmp(&db.kind.def_id().map(|d| d.index())))
            .then_with(|| da.flags.optional().cmp(&db.flags.optional()))
            .then_with(|| da.flags.meta().cmp(&db.flags.meta()))
    }
}

fn kind_rank(kind: &TypeKind) -> u8 {
    match kind {
        TypeKind::Class(_) => 0,
        TypeKind::MultiProtocol(_) => 1,
        TypeKind::Protocol(_) => 2,
        TypeKind::Enum(_) => 3,
        TypeKind::ValueType(_) => 4,
        TypeKind::NoReturn => 5,
        TypeKind::Something => 6,
        TypeKind::Someobject => 7,
        TypeKind::GenericVariable { .. } => 8,
        TypeKind::LocalGenericVariable { .. } => 9,
        TypeKind::Callable => 10,
        TypeKind::Error => 11,
        TypeKind::StorageExpectation => 12,
        TypeKind::Extension(_) => 13,
    }
}

#[cfg(test)]
#[path = "tests/interner.rs"]
mod tests;
