//! Generic resolver (C3, §4.3).

use glyphc_common::{limits, DefId, FunctionId};

use crate::context::TypeContext;
use crate::interner::TypeInterner;
use crate::kind::TypeKind;
use crate::TypeId;

/// Ordinary resolution substitutes a generic variable with the concrete
/// argument supplied by the context; super-and-constraints substitutes
/// with the slot's upper-bound constraint instead (§4.3, used "while
/// compiling generic bodies").
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolveMode {
    Concrete,
    SuperAndConstraints,
}

/// Supplies the upper-bound constraint for a generic slot, and whether a
/// definition can resolve a variable declared on one of its supertypes
/// (the original's `canBeUsedToResolve`). Implemented by `glyphc-defs`,
/// which owns the class/protocol hierarchy this crate only references by
/// [`DefId`].
pub trait HierarchyOracle {
    fn type_generic_constraint(&self, def: DefId, index: u32) -> TypeId;
    fn function_generic_constraint(&self, function: FunctionId, index: u32) -> TypeId;
    /// True if `owner` resolves generic variables declared with
    /// `constraint` as their resolution constraint — true when they're the
    /// same definition, or when `owner` is a subtype of `constraint` that
    /// inherits its generic parameter list unchanged.
    fn can_be_used_to_resolve(&self, owner: DefId, constraint: DefId) -> bool;
}

#[tracing::instrument(level = "trace", skip(interner, oracle, ctx))]
pub fn resolve(
    interner: &TypeInterner,
    oracle: &dyn HierarchyOracle,
    id: TypeId,
    ctx: &TypeContext,
    mode: ResolveMode,
) -> TypeId {
    resolve_depth(interner, oracle, id, ctx, mode, 0)
}

fn resolve_depth(
    interner: &TypeInterner,
    oracle: &dyn HierarchyOracle,
    id: TypeId,
    ctx: &TypeContext,
    mode: ResolveMode,
    depth: u32,
) -> TypeId {
    if depth >= limits::MAX_RESOLVE_DEPTH {
        tracing::warn!(depth, "generic resolution hit MAX_RESOLVE_DEPTH, returning unresolved");
        return id;
    }

    let data = interner.get(id);
    match &data.kind {
        TypeKind::GenericVariable { index, constraint } => {
            let substitute = match mode {
                ResolveMode::SuperAndConstraints => Some(oracle.type_generic_constraint(*constraint, *index)),
                ResolveMode::Concrete => {
                    let resolves = match ctx.callee_type.map(|t| interner.kind(t)) {
                        Some(TypeKind::Class(owner))
                        | Some(TypeKind::ValueType(owner))
                        | Some(TypeKind::Enum(owner))
                        | Some(TypeKind::Protocol(owner)) => oracle.can_be_used_to_resolve(owner, *constraint),
                        _ => false,
                    };
                    if resolves {
                        let callee_args = interner.generic_arguments(ctx.callee_type.expect("resolves implies callee_type"));
                        callee_args.get(*index as usize).copied()
                    } else {
                        None
                    }
                }
            };
            match substitute {
                Some(sub) => resolve_depth(interner, oracle, sub, ctx, mode, depth + 1),
                None => id,
            }
        }
        TypeKind::LocalGenericVariable { index, constraint } => {
            let substitute = match mode {
                ResolveMode::SuperAndConstraints => Some(oracle.function_generic_constraint(*constraint, *index)),
                ResolveMode::Concrete => {
                    if ctx.function == Some(*constraint) {
                        ctx.function_generic_arguments.get(*index as usize).copied()
                    } else {
                        None
                    }
                }
            };
            match substitute {
                Some(sub) => resolve_depth(interner, oracle, sub, ctx, mode, depth + 1),
                None => id,
            }
        }
        TypeKind::MultiProtocol(members) => {
            let resolved: Vec<TypeId> = members
                .iter()
                .map(|m| resolve_depth(interner, oracle, *m, ctx, mode, depth + 1))
                .collect();
            if resolved == *members {
                id
            } else {
                interner.make_multi_protocol(resolved, data.flags.optional())
            }
        }
        _ if data.generic_arguments.is_empty() => id,
        _ => {
            let resolved: Vec<TypeId> = data
                .generic_arguments
                .iter()
                .map(|a| resolve_depth(interner, oracle, *a, ctx, mode, depth + 1))
                .collect();
            if resolved == data.generic_arguments {
                id
            } else {
                let mut rebuilt = data.clone();
                rebuilt.generic_arguments = resolved;
                interner.intern(rebuilt)
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/resolve.rs"]
mod tests;
