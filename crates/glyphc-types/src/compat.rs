//! Compatibility & identity (C4, §4.4).

use glyphc_common::DefId;

use crate::context::{CommonTypeFinder, TypeContext};
use crate::interner::TypeInterner;
use crate::kind::TypeKind;
use crate::TypeId;

/// Facts about the class/protocol hierarchy that only `glyphc-defs` can
/// answer, consumed here the same way `HierarchyOracle` is consumed by
/// resolution — `glyphc-types` never depends on `glyphc-defs` directly.
pub trait CompatibilityOracle {
    /// `sub` is `sup` or a (possibly indirect) subclass of it.
    fn is_same_or_subclass(&self, sub: DefId, sup: DefId) -> bool;
    /// The generic arguments `sub`, instantiated with `sub_args`, passes to
    /// `sup` along its inheritance chain — `None` if `sub` is not a
    /// subclass of `sup` at all.
    fn superclass_generic_arguments(&self, sub: DefId, sup: DefId, sub_args: &[TypeId]) -> Option<Vec<TypeId>>;
    /// `def` conforms to `protocol` (directly or through a supertype).
    fn conforms_to_protocol(&self, def: DefId, protocol: DefId) -> bool;
    /// The protocol's own generic arguments, resolved on `def` instantiated
    /// with `def_args` — `None` if `def` does not conform to `protocol`.
    fn protocol_generic_arguments(&self, def: DefId, protocol: DefId, def_args: &[TypeId]) -> Option<Vec<TypeId>>;
}

/// §4.4: "Decides true when a value of `from` can be supplied where `to`
/// is expected." First matching rule wins.
#[tracing::instrument(level = "trace", skip(interner, oracle, ctx, ctargs))]
pub fn compatible_to(
    interner: &TypeInterner,
    oracle: &dyn CompatibilityOracle,
    from: TypeId,
    to: TypeId,
    ctx: &TypeContext,
    ctargs: Option<&mut CommonTypeFinder>,
) -> bool {
    let to_data = interner.get(to);
    let from_data = interner.get(from);

    // Rule 8 interacts with every other rule: if `to` is optional and
    // `from` is not, strip `to`'s optionality and recurse; if `from` is
    // optional and `to` is not, no rule below can ever succeed.
    if to_data.flags.optional() && !from_data.flags.optional() {
        let to_non_optional = interner.with_optional(to, false);
        return compatible_to(interner, oracle, from, to_non_optional, ctx, ctargs);
    }
    if from_data.flags.optional() && !to_data.flags.optional() {
        return false;
    }

    match &to_data.kind {
        // Rule 1.
        TypeKind::Something => true,

        // Rule 2.
        TypeKind::Someobject => matches!(from_data.kind, TypeKind::Class(_) | TypeKind::Someobject),

        // Rule 3.
        TypeKind::Class(to_def) => {
            let TypeKind::Class(from_def) = &from_data.kind else { return false };
            let from_def = *from_def;
            if !oracle.is_same_or_subclass(from_def, *to_def) {
                return false;
            }
            if from_def == *to_def {
                return identical_generic_arguments(interner, oracle, &from_data.generic_arguments, &to_data.generic_arguments, ctx, ctargs);
            }
            match oracle.superclass_generic_arguments(from_def, *to_def, &from_data.generic_arguments) {
                Some(projected) => identical_generic_arguments(interner, oracle, &projected, &to_data.generic_arguments, ctx, ctargs),
                None => false,
            }
        }

        // Rule 4.
        TypeKind::Protocol(to_def) => is_compatible_to_protocol(interner, oracle, &from_data, *to_def, &to_data.generic_arguments, ctx, ctargs),

        // Rule 5.
        TypeKind::MultiProtocol(members) => members.iter().all(|member| {
            let TypeKind::Protocol(member_def) = interner.kind(*member) else { return false };
            is_compatible_to_protocol(interner, oracle, &from_data, member_def, &interner.generic_arguments(*member), ctx, None)
        }),

        // Rule 6.
        TypeKind::Callable => is_compatible_to_callable(interner, oracle, &from_data, &to_data, ctx, ctargs),

        // Rule 7.
        TypeKind::Enum(to_def) | TypeKind::ValueType(to_def) => {
            let from_def = match &from_data.kind {
                TypeKind::Enum(d) | TypeKind::ValueType(d) => *d,
                _ => return false,
            };
            from_def == *to_def
                && identical_generic_arguments(interner, oracle, &from_data.generic_arguments, &to_data.generic_arguments, ctx, ctargs)
        }

        // Rule 9 (and the fallback for every remaining sentinel kind: exact
        // identity is the only way to be compatible).
        TypeKind::GenericVariable { index, constraint } => match &from_data.kind {
            TypeKind::GenericVariable { index: fi, constraint: fc } if fi == index && fc == constraint => true,
            _ => {
                if let Some(finder) = ctargs {
                    finder.add_bound(*index as usize, from);
                    true
                } else {
                    false
                }
            }
        },
        TypeKind::LocalGenericVariable { index, constraint } => matches!(
            from_data.kind,
            TypeKind::LocalGenericVariable { index: fi, constraint: fc } if fi == *index && fc == *constraint
        ),

        TypeKind::NoReturn | TypeKind::Error | TypeKind::Extension(_) | TypeKind::StorageExpectation => {
            identical_to(interner, oracle, from, to, ctx)
        }
    }
}

fn is_compatible_to_protocol(
    interner: &TypeInterner,
    oracle: &dyn CompatibilityOracle,
    from_data: &crate::data::TypeData,
    protocol_def: DefId,
    protocol_args: &[TypeId],
    ctx: &TypeContext,
    ctargs: Option<&mut CommonTypeFinder>,
) -> bool {
    let from_def = match &from_data.kind {
        TypeKind::Class(d) | TypeKind::ValueType(d) | TypeKind::Enum(d) => *d,
        TypeKind::Protocol(d) => *d,
        _ => return false,
    };
    if !oracle.conforms_to_protocol(from_def, protocol_def) {
        return false;
    }
    match oracle.protocol_generic_arguments(from_def, protocol_def, &from_data.generic_arguments) {
        Some(resolved) => identical_generic_arguments(interner, oracle, &resolved, protocol_args, ctx, ctargs),
        None => protocol_args.is_empty(),
    }
}

fn is_compatible_to_callable(
    interner: &TypeInterner,
    oracle: &dyn CompatibilityOracle,
    from_data: &crate::data::TypeData,
    to_data: &crate::data::TypeData,
    ctx: &TypeContext,
    mut ctargs: Option<&mut CommonTypeFinder>,
) -> bool {
    if !matches!(from_data.kind, TypeKind::Callable) {
        return false;
    }
    let (to_ret, to_args) = (to_data.generic_arguments[0], &to_data.generic_arguments[1..]);
    let (from_ret, from_args) = (from_data.generic_arguments[0], &from_data.generic_arguments[1..]);
    if from_args.len() != to_args.len() {
        return false;
    }
    // Contravariant: the callee's parameter must accept what the caller offers.
    for (to_arg, from_arg) in to_args.iter().zip(from_args.iter()) {
        if !compatible_to(interner, oracle, *to_arg, *from_arg, ctx, ctargs.as_deref_mut()) {
            return false;
        }
    }
    // Covariant: the callee's return must satisfy what the caller expects.
    compatible_to(interner, oracle, from_ret, to_ret, ctx, ctargs)
}

fn identical_generic_arguments(
    interner: &TypeInterner,
    oracle: &dyn CompatibilityOracle,
    from_args: &[TypeId],
    to_args: &[TypeId],
    ctx: &TypeContext,
    mut ctargs: Option<&mut CommonTypeFinder>,
) -> bool {
    if from_args.len() != to_args.len() {
        return false;
    }
    from_args
        .iter()
        .zip(to_args.iter())
        .all(|(a, b)| identical_to_with_finder(interner, oracle, *a, *b, ctx, ctargs.as_deref_mut()))
}

/// §4.4: "the equivalence used for generic specialization keys"; exact
/// kind, optional, meta, definition, and recursive argument identity
/// (Invariant 6). `TypeId` equality from the *same* interner already
/// implies this, but identity is also asked across resolved projections
/// that may not have been re-interned, so we still check structurally.
#[must_use]
pub fn identical_to(interner: &TypeInterner, oracle: &dyn CompatibilityOracle, from: TypeId, to: TypeId, ctx: &TypeContext) -> bool {
    identical_to_with_finder(interner, oracle, from, to, ctx, None)
}

fn identical_to_with_finder(
    interner: &TypeInterner,
    oracle: &dyn CompatibilityOracle,
    from: TypeId,
    to: TypeId,
    ctx: &TypeContext,
    ctargs: Option<&mut CommonTypeFinder>,
) -> bool {
    if from == to {
        return true;
    }
    let a = interner.get(from);
    let b = interner.get(to);
    if a.flags.optional() != b.flags.optional() || a.flags.meta() != b.flags.meta() {
        return false;
    }
    match (&a.kind, &b.kind) {
        (TypeKind::GenericVariable { index: ia, constraint: ca }, TypeKind::GenericVariable { index: ib, constraint: cb }) => {
            if ia == ib && ca == cb {
                return true;
            }
            if let Some(finder) = ctargs {
                finder.add_bound(*ia as usize, to);
                return true;
            }
            false
        }
        _ if a.kind.def_id().is_some() && a.kind.def_id() == b.kind.def_id() => {
            identical_generic_arguments(interner, oracle, &a.generic_arguments, &b.generic_arguments, ctx, ctargs)
        }
        _ => std::mem::discriminant(&a.kind) == std::mem::discriminant(&b.kind) && a.generic_arguments == b.generic_arguments,
    }
}

#[cfg(test)]
#[path = "tests/compat.rs"]
mod tests;
