//! Orthogonal outer wrappers for a [`crate::TypeData`] (§3, §9 Design Notes:
//! "Optional/meta/reference/mutable/force-box become orthogonal outer
//! wrappers").

use bitflags::bitflags;

bitflags! {
    /// `mutable` defaults on (§3's `Type` defaults `mutable_ = true` in the
    /// original), so this is the one flag whose absence is the *marked*
    /// state; every other flag defaults off.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct TypeFlags: u8 {
        /// May carry the "no value" sentinel (§3 `optional`).
        const OPTIONAL  = 0b0000_0001;
        /// Value is the type-object itself (§3 `meta`).
        const META      = 0b0000_0010;
        /// Runtime representation is a pointer to the value (§3 `reference`).
        const REFERENCE = 0b0000_0100;
        /// Write operations on a binding of this type are permitted.
        const MUTABLE   = 0b0000_1000;
        /// Materialize in a uniform box even if otherwise scalar (§3 `force-box`).
        const FORCE_BOX = 0b0001_0000;
    }
}

impl TypeFlags {
    #[must_use]
    pub fn fresh() -> Self {
        TypeFlags::MUTABLE
    }

    #[must_use]
    pub fn optional(self) -> bool {
        self.contains(TypeFlags::OPTIONAL)
    }

    #[must_use]
    pub fn meta(self) -> bool {
        self.contains(TypeFlags::META)
    }

    #[must_use]
    pub fn is_reference(self) -> bool {
        self.contains(TypeFlags::REFERENCE)
    }

    #[must_use]
    pub fn is_mutable(self) -> bool {
        self.contains(TypeFlags::MUTABLE)
    }

    #[must_use]
    pub fn force_box(self) -> bool {
        self.contains(TypeFlags::FORCE_BOX)
    }

    #[must_use]
    pub fn with(self, flag: TypeFlags, value: bool) -> Self {
        let mut out = self;
        out.set(flag, value);
        out
    }
}
