//! Non-owning handles into the central definition/function tables.
//!
//! Per the Design Notes (§9): "definitions own their functions; functions
//! point to super and to overriders by non-owning handle (index into a
//! central table is preferred over raw pointers to avoid cyclic ownership
//! between base and derived)". These newtypes are the handles; the tables
//! they index live in `glyphc-defs`.

use std::fmt;

macro_rules! index_handle {
    ($name:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(u32);

        impl $name {
            #[must_use]
            pub fn new(index: u32) -> Self {
                Self(index)
            }

            #[must_use]
            pub fn index(self) -> u32 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

index_handle!(PackageId, "Handle to a loaded package.");
index_handle!(DefId, "Handle to a type definition (class, protocol, value type, enum or extension).");
index_handle!(FunctionId, "Handle to a function contract (method, initializer or type method).");
