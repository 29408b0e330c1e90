//! Common types and utilities shared across the compiler core crates.
//!
//! This crate provides the foundations every other `glyphc-*` crate builds
//! on:
//! - String interning (`Atom`, `Interner`)
//! - Source spans and line/column positions (`Span`, `LineMap`, `Position`)
//! - The diagnostics model and sink contract (`Diagnostic`, `DiagnosticsSink`)
//! - Invariant-violation errors for fail-fast programmer mistakes (`CoreError`)
//! - Compiler-wide size and recursion limits

pub mod interner;
pub use interner::{Atom, Interner};

pub mod span;
pub use span::{ByteSpan, Span, SpanBuilder, Spanned};

pub mod position;
pub use position::{LineMap, Location, Position, Range, SourceLocation};

pub mod limits;

pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticsSink, VecDiagnosticsSink};

pub mod errors;
pub use errors::CoreError;

pub mod ids;
pub use ids::{DefId, FunctionId, PackageId};
