//! Function contract enforcer (C5, §4.5).
//!
//! Checks that a function overriding a super-declaration (directly, or
//! through a protocol it implements) keeps the super-declaration's promise:
//! same access level, a compatible and storage-compatible return type, the
//! same arity, and contravariant, storage-compatible arguments. Violations
//! are reported to a [`DiagnosticsSink`] and compilation continues with the
//! next override; they never abort the run, unlike [`glyphc_common::CoreError`].
//!
//! Inside a protocol context a storage mismatch doesn't fail the check — it
//! asks the code generator for a thunk bridging the protocol's boxed view
//! and the implementer's concrete one instead.

use glyphc_common::diagnostics::diagnostic_codes as codes;
use glyphc_common::{DefId, Diagnostic, DiagnosticsSink, FunctionId, Interner};
use glyphc_defs::function::{Function, FunctionTable};
use glyphc_types::{
    CompatibilityOracle, HierarchyOracle, PayloadSizeOracle, ResolveMode, StorageClass, TypeContext, TypeId,
    TypeInterner,
};

/// Which rule of §4.5's checklist an override failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContractViolation {
    OverrideSealed,
    AccessMismatch,
    ReturnIncompatible,
    ReturnStorageIncompatible,
    ArityMismatch,
    ArgumentIncompatible { index: usize },
    ArgumentStorageIncompatible { index: usize },
}

impl ContractViolation {
    #[must_use]
    pub fn code(self) -> u32 {
        match self {
            ContractViolation::OverrideSealed => codes::OVERRIDE_SEALED,
            ContractViolation::AccessMismatch => codes::ACCESS_MISMATCH,
            ContractViolation::ReturnIncompatible => codes::RETURN_INCOMPATIBLE,
            ContractViolation::ReturnStorageIncompatible => codes::RETURN_STORAGE_INCOMPATIBLE,
            ContractViolation::ArityMismatch => codes::ARITY_MISMATCH,
            ContractViolation::ArgumentIncompatible { .. } => codes::ARGUMENT_INCOMPATIBLE,
            ContractViolation::ArgumentStorageIncompatible { .. } => codes::ARGUMENT_STORAGE_INCOMPATIBLE,
        }
    }
}

/// The result of checking one override against its super-declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnforcementOutcome {
    Ok,
    /// A storage mismatch that a protocol-context thunk can bridge.
    NeedsThunk,
    Failed(ContractViolation),
}

/// [`enforce_override`]'s full result: the checklist outcome, plus the
/// rebuilt return type to install on the overrider's `Function` record
/// when a covariant-box return forces one (§9 Design Notes: "model as a
/// rebuild returning a new Type rather than in-place mutation" — the
/// oracle borrows the same `FunctionTable` this would otherwise need to
/// mutate, so the rebuild is handed back for the caller to apply once
/// that borrow has ended).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContractResult {
    pub outcome: EnforcementOutcome,
    pub forced_return_type: Option<TypeId>,
}

/// Everything [`enforce_override`] needs to resolve and compare types; a
/// `glyphc-defs::DefinitionContext` implements both halves of this.
pub trait ContractOracle: HierarchyOracle + CompatibilityOracle {}
impl<T: HierarchyOracle + CompatibilityOracle> ContractOracle for T {}

/// Runs the §4.5 checklist for `f` overriding `s`, optionally through
/// protocol `protocol_context`. Reports a [`Diagnostic`] to `sink` on
/// failure and returns the outcome; never panics on a violation, since a
/// contract violation is source-language error, not a core invariant one.
///
/// An override also counts as a use of the overridden declaration, so if
/// `s` is `@deprecated` a Deprecated-Use warning (§7) is reported at `f`'s
/// position regardless of how the checklist below turns out.
#[tracing::instrument(level = "debug", skip(types, oracle, payload, functions, names, sink))]
#[allow(clippy::too_many_arguments)]
pub fn enforce_override(
    types: &TypeInterner,
    oracle: &dyn ContractOracle,
    payload: &dyn PayloadSizeOracle,
    functions: &FunctionTable,
    f: FunctionId,
    s: FunctionId,
    protocol_context: Option<DefId>,
    file: &str,
    names: &Interner,
    sink: &mut dyn DiagnosticsSink,
) -> ContractResult {
    let overrider = functions.get(f);
    let overridden = functions.get(s);

    if let Some(warning) = overridden.deprecated_warning(names, file, overrider.position) {
        sink.report(warning);
    }

    // Step 1: Override-Sealed.
    if overridden.is_final() {
        return fail(ContractViolation::OverrideSealed, overrider, overridden, file, sink);
    }

    // Step 2: Access-Mismatch.
    if overrider.access != overridden.access {
        return fail(ContractViolation::AccessMismatch, overrider, overridden, file, sink);
    }

    // No concrete instantiation is available while checking a signature in
    // the abstract, so `callee_type` stays unset: a generic variable bound
    // to the owner's own slot resolves to nothing and is left as-is, which
    // the storage classifier already treats as `Box` (C2 rule 2) — exactly
    // the conservative view an unresolved generic slot needs here.
    let f_ctx = TypeContext::empty().with_function(f, Vec::new());
    let s_resolve_mode = if protocol_context.is_some() {
        ResolveMode::SuperAndConstraints
    } else {
        ResolveMode::Concrete
    };

    // Step 3: Return-Incompatible.
    let s_return = glyphc_types::resolve::resolve(types, oracle, overridden.return_type, &f_ctx, s_resolve_mode);
    let f_return = glyphc_types::resolve::resolve(types, oracle, overrider.return_type, &f_ctx, ResolveMode::Concrete);
    if !glyphc_types::compat::compatible_to(types, oracle, f_return, s_return, &f_ctx, None) {
        return fail(ContractViolation::ReturnIncompatible, overrider, overridden, file, sink);
    }

    // Step 4/5: return storage. A force-box rebuild (only outside a
    // protocol context — see the module doc) always yields `Box` under
    // classify's rule 1, so the comparison below uses that fact directly
    // rather than reclassifying the rebuilt type.
    let s_return_storage = glyphc_types::storage::classify(types, payload, s_return);
    let mut f_return_storage = glyphc_types::storage::classify(types, payload, f_return);
    let forced_return_type = if s_return_storage == StorageClass::Box && protocol_context.is_none() {
        f_return_storage = StorageClass::Box;
        Some(types.with_force_box(overrider.return_type))
    } else {
        None
    };
    if s_return_storage != f_return_storage {
        if protocol_context.is_some() {
            return ContractResult { outcome: EnforcementOutcome::NeedsThunk, forced_return_type };
        }
        let mut result = fail(ContractViolation::ReturnStorageIncompatible, overrider, overridden, file, sink);
        result.forced_return_type = forced_return_type;
        return result;
    }

    // Step 6: Arity-Mismatch.
    if overrider.arguments.len() != overridden.arguments.len() {
        let mut result = fail(ContractViolation::ArityMismatch, overrider, overridden, file, sink);
        result.forced_return_type = forced_return_type;
        return result;
    }

    // Step 7: per-argument contravariance and storage.
    let mut needs_thunk = false;
    for (i, (f_arg, s_arg)) in overrider.arguments.iter().zip(overridden.arguments.iter()).enumerate() {
        let s_arg_ty = glyphc_types::resolve::resolve(types, oracle, s_arg.ty, &f_ctx, s_resolve_mode);
        let f_arg_ty = glyphc_types::resolve::resolve(types, oracle, f_arg.ty, &f_ctx, ResolveMode::Concrete);
        if !glyphc_types::compat::compatible_to(types, oracle, s_arg_ty, f_arg_ty, &f_ctx, None) {
            let mut result = fail(
                ContractViolation::ArgumentIncompatible { index: i },
                overrider,
                overridden,
                file,
                sink,
            );
            result.forced_return_type = forced_return_type;
            return result;
        }
        let s_arg_storage = glyphc_types::storage::classify(types, payload, s_arg_ty);
        let f_arg_storage = glyphc_types::storage::classify(types, payload, f_arg_ty);
        if s_arg_storage != f_arg_storage {
            if protocol_context.is_some() {
                needs_thunk = true;
            } else {
                let mut result = fail(
                    ContractViolation::ArgumentStorageIncompatible { index: i },
                    overrider,
                    overridden,
                    file,
                    sink,
                );
                result.forced_return_type = forced_return_type;
                return result;
            }
        }
    }

    let outcome = if needs_thunk { EnforcementOutcome::NeedsThunk } else { EnforcementOutcome::Ok };
    ContractResult { outcome, forced_return_type }
}

fn fail(
    violation: ContractViolation,
    overrider: &Function,
    overridden: &Function,
    file: &str,
    sink: &mut dyn DiagnosticsSink,
) -> ContractResult {
    let span = overrider.position;
    let message = render_message(violation);
    let diagnostic = Diagnostic::error(file, span, message, violation.code())
        .with_related(file, overridden.position, "overridden declaration is here");
    sink.report(diagnostic);
    ContractResult { outcome: EnforcementOutcome::Failed(violation), forced_return_type: None }
}

fn render_message(violation: ContractViolation) -> String {
    let template = glyphc_common::diagnostics::get_message_template(violation.code()).unwrap_or("{0}");
    glyphc_common::diagnostics::format_message(template, &["this", "the overridden declaration", "its super type"])
}

#[cfg(test)]
#[path = "tests/enforce.rs"]
mod tests;
