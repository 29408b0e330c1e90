//! The per-node lowering contracts of §4.7.

use glyphc_types::{PayloadSizeOracle, TypeId, TypeInterner};

use crate::context::FunctionContext;
use crate::ir::IrValue;
use crate::scope::{LocalVariable, StorageLocation};

/// **Read (local)** (§4.7): "If local and the binding is immutable, yield
/// the stored value directly (no slot exists, no load). If local mutable,
/// yield a load unless *reference*."
///
/// # Panics
/// If `variable_id` was never declared in `ctx.scope` — reading an
/// undeclared local is a binder bug upstream of this crate, not a
/// source-language error C7 itself is responsible for reporting.
pub fn read_local<Cx>(ctx: &mut FunctionContext<'_, Cx>, variable_id: u32, is_reference: bool) -> IrValue {
    let local = ctx.scope.lookup(variable_id).expect("read of a local never declared in this scope");
    match local.storage {
        StorageLocation::Value(value) => value,
        StorageLocation::Slot(ptr) => {
            if is_reference {
                ptr
            } else {
                ctx.builder.load(ptr)
            }
        }
    }
}

/// **Read (instance)** (§4.7): "if instance-scoped, compute a pointer to
/// the field by generating a two-index gep (struct base + field index)
/// against `this`; if the node is marked *reference*, yield that pointer,
/// else emit a load through it."
///
/// # Panics
/// If `ctx.this_value` is `None` — an instance-field read outside any
/// instance context is a binder bug, the same class of precondition
/// violation as `read_local`'s.
pub fn read_instance_field<Cx>(ctx: &mut FunctionContext<'_, Cx>, field_index: u32, is_reference: bool) -> IrValue {
    let this = ctx.this_value.expect("instance field read requires a `this` value");
    let ptr = ctx.builder.gep(this, &[0, field_index as i32]);
    if is_reference {
        ptr
    } else {
        ctx.builder.load(ptr)
    }
}

/// **Declare-and-read (init path)** (§4.7): "allocate a stack slot sized
/// for the declared type, install it into scope as a mutable binding, then
/// perform the read as above."
pub fn declare_and_read<Cx>(ctx: &mut FunctionContext<'_, Cx>, interner: &TypeInterner, oracle: &dyn PayloadSizeOracle, variable_id: u32, declared_type: TypeId, is_reference: bool) -> IrValue {
    let backend_type = ctx.type_helper.backend_type(interner, oracle, declared_type);
    let slot = ctx.builder.alloca(backend_type, None);
    ctx.scope.declare(variable_id, LocalVariable::slot(slot));
    if is_reference {
        slot
    } else {
        ctx.builder.load(slot)
    }
}

/// **Declaration without initializer** (§4.7): "allocate a stack slot; if
/// the declared type is optional, store the 'no value' sentinel into the
/// presence slot (a gep of index 0 into the optional pair)." §8 scenario 4.
pub fn declare_without_initializer<Cx>(ctx: &mut FunctionContext<'_, Cx>, interner: &TypeInterner, oracle: &dyn PayloadSizeOracle, variable_id: u32, declared_type: TypeId) {
    let backend_type = ctx.type_helper.backend_type(interner, oracle, declared_type);
    let slot = ctx.builder.alloca(backend_type, None);
    ctx.scope.declare(variable_id, LocalVariable::slot(slot));
    if interner.optional(declared_type) {
        let presence = ctx.builder.gep(slot, &[0]);
        ctx.builder.store(ctx.optional_no_value, presence);
    }
}

/// Where an **Assignment** (§4.7) writes to: "a new stack slot if
/// declaring, an instance-field gep if instance-scoped, or the slot from
/// scope." `NewFrozenLocal` covers the case where no slot is ever
/// allocated at all — the bound value replaces the pointer entirely.
pub enum AssignTarget {
    NewMutableLocal { variable_id: u32, declared_type: TypeId },
    NewFrozenLocal { variable_id: u32 },
    InstanceField { field_index: u32 },
    ExistingLocal { variable_id: u32 },
}

/// **Assignment** (§4.7): "resolve the destination pointer ..., evaluate
/// the right-hand side, store. For frozen (immutable) bindings, the
/// evaluated value is bound directly without allocating a slot;
/// subsequent writes are statically impossible." §8 scenario 5.
///
/// `value` is the already-lowered right-hand side.
///
/// # Panics
/// On `InstanceField` with no `this_value` (see `read_instance_field`), on
/// `ExistingLocal` for a variable never declared, or on `ExistingLocal`
/// naming a frozen binding — the type/override discipline upstream of
/// this crate is what's supposed to make that last case statically
/// impossible in source, per §4.7's own wording.
pub fn assign<Cx>(ctx: &mut FunctionContext<'_, Cx>, interner: &TypeInterner, oracle: &dyn PayloadSizeOracle, target: AssignTarget, value: IrValue) {
    match target {
        AssignTarget::NewMutableLocal { variable_id, declared_type } => {
            let backend_type = ctx.type_helper.backend_type(interner, oracle, declared_type);
            let slot = ctx.builder.alloca(backend_type, None);
            ctx.builder.store(value, slot);
            ctx.scope.declare(variable_id, LocalVariable::slot(slot));
        }
        AssignTarget::NewFrozenLocal { variable_id } => {
            ctx.scope.declare(variable_id, LocalVariable::frozen(value));
        }
        AssignTarget::InstanceField { field_index } => {
            let this = ctx.this_value.expect("instance field assignment requires a `this` value");
            let ptr = ctx.builder.gep(this, &[0, field_index as i32]);
            ctx.builder.store(value, ptr);
        }
        AssignTarget::ExistingLocal { variable_id } => {
            let local = ctx.scope.lookup(variable_id).expect("assignment to a local never declared in this scope");
            match local.storage {
                StorageLocation::Slot(ptr) => ctx.builder.store(value, ptr),
                StorageLocation::Value(_) => panic!("assignment to a frozen binding, which the type discipline must prevent"),
            }
        }
    }
}

/// **Initable creator** (§4.7): "if the wrapped expression is flagged as
/// *no-action*, evaluate for side effects only; otherwise perform an
/// assignment." `value` has already been lowered (and its side effects
/// already emitted) by the caller either way.
pub fn initable_creator<Cx>(ctx: &mut FunctionContext<'_, Cx>, interner: &TypeInterner, oracle: &dyn PayloadSizeOracle, no_action: bool, target: AssignTarget, value: IrValue) {
    if no_action {
        return;
    }
    assign(ctx, interner, oracle, target, value);
}

#[cfg(test)]
#[path = "tests/lower.rs"]
mod tests;
