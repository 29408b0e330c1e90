//! Centralized limits and thresholds shared across the compiler core.
//!
//! Mirrors the constants the original Emojicode compiler keeps alongside its
//! `Type` implementation (`kBoxValueSize` and friends) rather than scattering
//! magic numbers through the storage classifier and box layout code.

/// Number of machine words a box envelope occupies, regardless of the
/// payload it carries.
///
/// One word is the type tag; the remaining three hold either the inline
/// payload or, when the payload doesn't fit, a pointer to remote storage.
pub const BOX_VALUE_SIZE: u32 = 4;

/// Inline payload capacity of a box, in machine words, once the tag word is
/// excluded.
pub const BOX_INLINE_PAYLOAD_WORDS: u32 = BOX_VALUE_SIZE - 1;

/// Maximum payload size (in words) a `SimpleOptional` may carry before the
/// storage classifier falls back to `Box`.
pub const SIMPLE_OPTIONAL_MAX_PAYLOAD_WORDS: u32 = 3;

/// Recursion guard for generic resolution (`resolve_on`). Prevents stack
/// overflow on pathological recursive generic instantiations.
pub const MAX_RESOLVE_DEPTH: u32 = 256;

/// Recursion guard for compatibility/identity checks over nested generic
/// arguments and protocol conformance chains.
pub const MAX_COMPATIBILITY_DEPTH: u32 = 256;

/// Recursion guard when walking an override chain to propagate "used" or to
/// assign VTIs to every overrider transitively.
pub const MAX_OVERRIDE_CHAIN_DEPTH: u32 = 1024;
