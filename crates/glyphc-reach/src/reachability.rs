//! `mark_used` and `assign_vti` (§4.6): the two operations that decide
//! what actually gets emitted and how dynamic dispatch finds it.

use glyphc_common::{limits, CoreError, FunctionId};
use glyphc_defs::function::{FunctionTable, VtiProviderTable};

use crate::queue::CompilationQueue;

/// Marks `id` used and, per §4.6, propagates that transitively to every
/// direct overrider so their vtable slots stay valid under dynamic
/// dispatch. Notifies `id`'s VTI provider of one more used consumer (dense
/// vtable packing) and, when `enqueue` is set, pushes every newly-used
/// function onto `queue` for code generation.
///
/// Idempotent: re-marking an already-used function is a no-op, which is
/// what lets overlapping override chains (diamond conformance through
/// multiple protocols) converge instead of looping.
#[tracing::instrument(level = "debug", skip(functions, providers, queue))]
pub fn mark_used(functions: &mut FunctionTable, providers: &mut VtiProviderTable, queue: &mut CompilationQueue, id: FunctionId, enqueue: bool) {
    mark_used_depth(functions, providers, queue, id, enqueue, 0);
}

fn mark_used_depth(
    functions: &mut FunctionTable,
    providers: &mut VtiProviderTable,
    queue: &mut CompilationQueue,
    id: FunctionId,
    enqueue: bool,
    depth: u32,
) {
    if depth >= limits::MAX_OVERRIDE_CHAIN_DEPTH {
        tracing::warn!(depth, "mark_used hit MAX_OVERRIDE_CHAIN_DEPTH, stopping propagation");
        return;
    }
    if functions.get(id).is_used() {
        return;
    }

    // Step 1.
    functions.get_mut(id).mark_used();

    // Step 2.
    if let Some(provider) = functions.get(id).vti_provider() {
        providers.get_mut(provider).notify_used();
    }

    // Step 3.
    let overriders = functions.get(id).overriders.clone();
    for overrider in overriders {
        mark_used_depth(functions, providers, queue, overrider, enqueue, depth + 1);
    }

    // Step 4.
    if enqueue {
        queue.push(id);
    }
}

/// Lazily assigns `id`'s VTI: obtains the next index from `id`'s own VTI
/// provider and propagates the *same* index to every direct overrider
/// (recursively), so all implementations of one virtual method family
/// share a slot. A no-op, returning the existing index, if `id` already
/// has one.
///
/// # Errors
/// `CoreError::ReassignVti` cannot actually occur through this entry point
/// (it checks `has_vti` before assigning) — the error is reserved for a
/// lower-level caller that bypasses this function and calls
/// `Function::set_vti` directly twice.
#[tracing::instrument(level = "debug", skip(functions, providers))]
pub fn assign_vti(functions: &mut FunctionTable, providers: &mut VtiProviderTable, id: FunctionId) -> Result<i32, CoreError> {
    if let Ok(existing) = functions.get(id).vti() {
        return Ok(existing);
    }
    let provider = functions
        .get(id)
        .vti_provider()
        .expect("assign_vti called on a function with no VTI provider");
    let index = providers.get_mut(provider).next_index();
    propagate_vti(functions, id, index, 0)?;
    Ok(index)
}

fn propagate_vti(functions: &mut FunctionTable, id: FunctionId, index: i32, depth: u32) -> Result<(), CoreError> {
    if depth >= limits::MAX_OVERRIDE_CHAIN_DEPTH {
        tracing::warn!(depth, "assign_vti hit MAX_OVERRIDE_CHAIN_DEPTH, stopping propagation");
        return Ok(());
    }
    if functions.get(id).has_vti() {
        // Already reached through another path in a diamond conformance.
        return Ok(());
    }
    functions.get_mut(id).set_vti(index)?;
    let overriders = functions.get(id).overriders.clone();
    for overrider in overriders {
        propagate_vti(functions, overrider, index, depth + 1)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/reachability.rs"]
mod tests;
