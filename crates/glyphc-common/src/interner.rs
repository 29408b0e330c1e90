//! String interning for identifiers, package names, and protocol/attribute
//! glyphs shared across the type system.
//!
//! The compiler is single-threaded end to end, so `Interner` is a plain
//! `RefCell`-guarded table: one writer at a time, no atomics.

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A cheap, `Copy`-able handle to an interned string.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Atom(u32);

impl Atom {
    #[must_use]
    pub fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Atom({})", self.0)
    }
}

#[derive(Default)]
struct InternerData {
    strings: Vec<Rc<str>>,
    lookup: FxHashMap<Rc<str>, Atom>,
}

/// Deduplicating string table. Two equal strings always intern to the same
/// `Atom`, which is what lets `Type` identity (Invariant 6) compare
/// definition references and generic-slot names by value instead of by
/// string comparison.
#[derive(Default)]
pub struct Interner {
    data: RefCell<InternerData>,
}

impl Interner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&self, s: &str) -> Atom {
        let mut data = self.data.borrow_mut();
        if let Some(&atom) = data.lookup.get(s) {
            return atom;
        }
        let rc: Rc<str> = Rc::from(s);
        let atom = Atom(u32::try_from(data.strings.len()).expect("interner overflow"));
        data.strings.push(rc.clone());
        data.lookup.insert(rc, atom);
        atom
    }

    #[must_use]
    pub fn resolve(&self, atom: Atom) -> Rc<str> {
        self.data
            .borrow()
            .strings
            .get(atom.0 as usize)
            .cloned()
            .expect("Atom from a different interner")
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.borrow().strings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[path = "../tests/interner.rs"]
mod tests;
