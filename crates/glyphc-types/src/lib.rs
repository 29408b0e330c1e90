//! Type representation, storage classification, generic resolution and
//! compatibility — C1 through C4 of the compiler core.
//!
//! A [`TypeId`] is a cheap `Copy` handle into a [`TypeInterner`]; the
//! interner deduplicates structural payloads ([`TypeData`]) so that two
//! equal types are always the same handle. Everything downstream (storage
//! classification, generic resolution, compatibility) is a free function
//! over `(&TypeInterner, TypeId, ...)` rather than a method on a fat
//! `Type` struct, because the struct would otherwise need a lifetime tied
//! to the interner for every single value threaded through the compiler.

pub mod kind;
pub use kind::{ResolutionConstraint, TypeKind};

pub mod flags;
pub use flags::TypeFlags;

pub mod data;
pub use data::TypeData;

pub mod interner;
pub use interner::{TypeId, TypeInterner};

pub mod context;
pub use context::{CommonTypeFinder, TypeContext};

pub mod storage;
pub use storage::{PayloadSizeOracle, StorageClass, UnitPayloadOracle};

pub mod resolve;
pub use resolve::{HierarchyOracle, ResolveMode};

pub mod compat;
pub use compat::CompatibilityOracle;

pub mod display;
pub use display::NameOracle;
