//! `glyphc` — type system and mid-end core for the Emojicode compiler.
//!
//! A facade over the six crates that make up the pipeline: type
//! representation and storage classification, generic resolution and
//! compatibility (`glyphc_types`), the definition entities a type points at
//! (`glyphc_defs`), function contract enforcement (`glyphc_contract`),
//! reachability and VTI allocation (`glyphc_reach`), and variable scope &
//! lowering (`glyphc_lower`). Everything lives in its owning crate; this
//! crate only re-exports and hosts the cross-crate integration tests under
//! `tests/`.

pub use glyphc_common as common;
pub use glyphc_contract as contract;
pub use glyphc_defs as defs;
pub use glyphc_lower as lower;
pub use glyphc_reach as reach;
pub use glyphc_types as types;
