//! Invariant violations: programmer errors in the compiler itself (§7).
//!
//! Unlike [`crate::diagnostics::Diagnostic`], these never reach source code
//! — they indicate a phase used the API incorrectly (asked for the wrong
//! projection of a `Type`, queried a VTI before it was assigned, tried to
//! reassign one). Callers that are certain the condition cannot occur use
//! `.expect(...)`; callers that can't prove it propagate with `?` and let it
//! abort higher up, per §7's "fail fast" policy.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoreError {
    /// A `Type` accessor was used for the wrong `kind`.
    KindMismatch,
    /// `unbox()` was called on a type for which `requiresBox()` holds.
    BoxRequired,
    /// `getVti()` was called before `assignVti()`.
    UnassignedVti,
    /// `assignVti()`/`setVti()` was called on a function that already has one.
    ReassignVti,
    /// `setVtiProvider()` was called on a function that already has one.
    ReassignProvider,
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            CoreError::KindMismatch => "Type accessor used for a kind it does not represent",
            CoreError::BoxRequired => "cannot unbox a type that requires a box",
            CoreError::UnassignedVti => "getVti() called before assignVti()",
            CoreError::ReassignVti => "VTI was already assigned and cannot be reassigned",
            CoreError::ReassignProvider => "VTI provider was already assigned and cannot be reassigned",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for CoreError {}
