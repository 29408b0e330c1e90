//! Variable scope & lowering (C7, §4.7).
//!
//! Lowers variable declarations, reads, writes, instance-field access, and
//! optional-default initialization into a sequence of calls against the
//! backend's `IrBuilder` contract (§6), consulting `glyphc-types` for the
//! generic-resolution and storage-classification decisions made upstream
//! of this crate (C1–C4) and baked into a function's signature by C5.
//! This crate never decides *whether* to emit (that's C6, `glyphc-reach`)
//! — it only decides *how*, once a body is already queued.

pub mod ir;
pub use ir::{BackendTypeId, IrBuilder, IrValue, TypeHelper};

pub mod scope;
pub use scope::{LocalVariable, Scope, StorageLocation};

pub mod context;
pub use context::FunctionContext;

pub mod lower;
pub use lower::{assign, declare_and_read, declare_without_initializer, initable_creator, read_instance_field, read_local, AssignTarget};
