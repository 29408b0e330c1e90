//! Diagnostic types and the sink contract consumed by every phase.
//!
//! The core never prints or owns where diagnostics go — it hands
//! [`Diagnostic`] values to whatever implements [`DiagnosticsSink`] (the
//! driver, an LSP connection, a test harness). This keeps contract
//! enforcement (C5) free to "report and continue" per §7's policy without
//! knowing anything about the presentation layer.

pub mod codes;
pub use codes::{DiagnosticMessage, diagnostic_codes, diagnostic_messages, DIAGNOSTIC_MESSAGES};

use crate::span::Span;
use serde::{Deserialize, Serialize};

/// Diagnostic severity, matching §7's three-way split (errors are reported
/// and execution continues; warnings are advisory; invariant violations are
/// not diagnostics at all, see [`crate::errors::CoreError`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticCategory {
    Warning,
    Error,
    Message,
}

/// A secondary source location attached to a diagnostic, e.g. pointing back
/// at the super-declaration an override failed against.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticRelatedInformation {
    pub file: String,
    pub span: Span,
    pub message_text: String,
}

/// A single diagnostic: a source position, a stable code, and rendered text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    pub code: u32,
    pub file: String,
    pub span: Span,
    pub message_text: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub related_information: Vec<DiagnosticRelatedInformation>,
}

impl Diagnostic {
    #[must_use]
    pub fn error(file: impl Into<String>, span: Span, message: impl Into<String>, code: u32) -> Self {
        Self {
            category: DiagnosticCategory::Error,
            code,
            file: file.into(),
            span,
            message_text: message.into(),
            related_information: Vec::new(),
        }
    }

    #[must_use]
    pub fn warning(file: impl Into<String>, span: Span, message: impl Into<String>, code: u32) -> Self {
        Self {
            category: DiagnosticCategory::Warning,
            code,
            file: file.into(),
            span,
            message_text: message.into(),
            related_information: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_related(mut self, file: impl Into<String>, span: Span, message: impl Into<String>) -> Self {
        self.related_information.push(DiagnosticRelatedInformation {
            file: file.into(),
            span,
            message_text: message.into(),
        });
        self
    }
}

/// Replace `{0}`, `{1}`, ... placeholders in a message template with `args`.
#[must_use]
pub fn format_message(message: &str, args: &[&str]) -> String {
    let mut result = message.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

/// Look up the message template registered for `code`.
#[must_use]
pub fn get_message_template(code: u32) -> Option<&'static str> {
    DIAGNOSTIC_MESSAGES.iter().find(|m| m.code == code).map(|m| m.message)
}

/// Consumes diagnostics produced by the core. The driver/LSP/test harness
/// implement this; the core only ever calls `report`.
///
/// Mirrors §6's "Diagnostics sink" external interface: the core reports and
/// keeps going (per §7's policy for contract errors), it never decides what
/// happens to the message afterward.
pub trait DiagnosticsSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// An in-memory sink, useful for tests and for batch drivers that want to
/// inspect everything emitted during a compilation before deciding what to
/// print.
#[derive(Debug, Default)]
pub struct VecDiagnosticsSink {
    diagnostics: Vec<Diagnostic>,
}

impl VecDiagnosticsSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.category == DiagnosticCategory::Error)
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl DiagnosticsSink for VecDiagnosticsSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}

#[cfg(test)]
#[path = "../../tests/diagnostics.rs"]
mod tests;
