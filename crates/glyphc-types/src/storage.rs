//! Storage classifier (C2, §4.2): maps a resolved [`crate::TypeId`] to a
//! [`StorageClass`] and the memory-footprint facts that follow from it.

use glyphc_common::{limits, DefId};

use crate::interner::TypeInterner;
use crate::kind::TypeKind;
use crate::TypeId;

/// How a value of a given type is represented in a scope or struct (§3).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageClass {
    /// Fits in one machine word or a fixed small record, no dynamic tag.
    Scalar,
    /// Scalar payload plus an in-band presence flag.
    SimpleOptional,
    /// Uniform envelope: a type tag plus up to `kBoxValueSize` payload words.
    Box,
}

/// Supplies the one fact the classifier cannot derive from `Type` alone:
/// how many words a value-type's or enum's own fields occupy. Definitions
/// (and their field layouts) live in `glyphc-defs`, which depends on this
/// crate for `Type` — so the dependency here runs the other way, through a
/// trait, the same pattern §6 uses for `IrBuilder`/`TypeHelper`.
pub trait PayloadSizeOracle {
    /// Words occupied by one non-optional instance of `def`'s own fields,
    /// with `generic_arguments` substituted for its generic parameters.
    fn payload_words(&self, def: DefId, generic_arguments: &[TypeId]) -> u32;
}

/// An oracle for contexts where no real definition table is available yet
/// (construction-site Types, unit tests): assumes every value type/enum
/// payload is a single word.
pub struct UnitPayloadOracle;

impl PayloadSizeOracle for UnitPayloadOracle {
    fn payload_words(&self, _def: DefId, _generic_arguments: &[TypeId]) -> u32 {
        1
    }
}

#[tracing::instrument(level = "trace", skip(interner, oracle))]
pub fn classify(interner: &TypeInterner, oracle: &dyn PayloadSizeOracle, id: TypeId) -> StorageClass {
    let data = interner.get(id);

    // Rule 1.
    if data.flags.force_box() {
        return StorageClass::Box;
    }

    match &data.kind {
        // Rule 2.
        TypeKind::Protocol(_) | TypeKind::MultiProtocol(_) | TypeKind::Something | TypeKind::Callable => {
            StorageClass::Box
        }
        TypeKind::Someobject if data.flags.optional() => StorageClass::Box,
        TypeKind::GenericVariable { .. } | TypeKind::LocalGenericVariable { .. } => StorageClass::Box,

        // Rule 3.
        TypeKind::Class(_) if !data.flags.optional() => StorageClass::Scalar,
        TypeKind::Someobject => StorageClass::Scalar,
        TypeKind::Class(_) => StorageClass::Box,

        // Rule 4.
        TypeKind::Enum(def) | TypeKind::ValueType(def) => {
            let payload = oracle.payload_words(*def, &data.generic_arguments);
            if data.flags.optional() {
                if payload <= limits::SIMPLE_OPTIONAL_MAX_PAYLOAD_WORDS {
                    StorageClass::SimpleOptional
                } else {
                    StorageClass::Box
                }
            } else {
                StorageClass::Scalar
            }
        }

        // Rule 5: a two-variant payload (ok | error) is Box unless both
        // sides would be scalar on their own.
        TypeKind::Error => {
            let ok = data.error_ok();
            let err = data.error_error();
            match (ok, err) {
                (Some(ok), Some(err))
                    if classify(interner, oracle, ok) == StorageClass::Scalar
                        && classify(interner, oracle, err) == StorageClass::Scalar =>
                {
                    StorageClass::Scalar
                }
                _ => StorageClass::Box,
            }
        }

        TypeKind::NoReturn | TypeKind::Extension(_) | TypeKind::StorageExpectation => StorageClass::Scalar,
    }
}

/// Count of machine words the value occupies in a scope or struct.
#[must_use]
pub fn size(interner: &TypeInterner, oracle: &dyn PayloadSizeOracle, id: TypeId) -> u32 {
    match classify(interner, oracle, id) {
        StorageClass::Box => limits::BOX_VALUE_SIZE,
        StorageClass::SimpleOptional => {
            let data = interner.get(id);
            let payload = match &data.kind {
                TypeKind::Enum(def) | TypeKind::ValueType(def) => oracle.payload_words(*def, &data.generic_arguments),
                _ => 1,
            };
            payload + 1
        }
        StorageClass::Scalar => 1,
    }
}

/// Runtime tag distinguishing Nothingness, object references, and specific
/// value types.
#[must_use]
pub fn box_identifier(interner: &TypeInterner, id: TypeId) -> u32 {
    match interner.kind(id) {
        TypeKind::Someobject | TypeKind::Class(_) => 1,
        TypeKind::Enum(def) | TypeKind::ValueType(def) | TypeKind::Extension(def) => 2 + def.index(),
        _ => 0,
    }
}

/// §4.2: "holds when the inline payload would exceed the box's inline
/// capacity"; a direct transcription of the Testable Property in §8.
#[must_use]
pub fn remotely_stored(interner: &TypeInterner, oracle: &dyn PayloadSizeOracle, id: TypeId) -> bool {
    let sz = size(interner, oracle, id);
    let optional = interner.optional(id);
    (sz > 3 && !optional) || sz > 4
}

/// §4.1 `requiresBox`: true when the type's *structure* demands a box,
/// independent of whether `force_box` happens to be set right now.
#[must_use]
pub fn requires_box(interner: &TypeInterner, id: TypeId) -> bool {
    let data = interner.get(id);
    if data.flags.force_box() {
        return true;
    }
    if matches!(data.kind, TypeKind::Error) {
        return classify(interner, &UnitPayloadOracle, id) == StorageClass::Box;
    }
    matches!(
        data.kind,
        TypeKind::Protocol(_) | TypeKind::MultiProtocol(_) | TypeKind::Something | TypeKind::Callable
    ) || matches!(data.kind, TypeKind::Someobject if data.flags.optional())
        || matches!(data.kind, TypeKind::GenericVariable { .. } | TypeKind::LocalGenericVariable { .. })
}

#[cfg(test)]
#[path = "tests/storage.rs"]
mod tests;
