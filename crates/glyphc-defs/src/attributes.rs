//! The attribute surface consumed from the parser (§6, `SPEC_FULL.md` F.4).
//!
//! The parser recognizes the emoji-glyph markers themselves and reports
//! unallowed attributes at the source position (out of scope here, §1); we
//! only own the typed, position-indexed bag the core reads presence from.

/// A fixed set of emoji-glyph attribute markers (§6). Mirrors the original
/// `AttributesParser.hpp`'s `enum class Attribute` one-for-one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Attribute {
    /// Warn on use.
    Deprecated,
    /// Disallow override.
    Final,
    /// Require presence of a super declaration.
    Override,
    /// Type method / type initializer.
    StaticOnType,
    /// Value-type method may mutate self.
    Mutating,
    /// Initializer required on subclasses.
    Required,
    /// Emit in the linking table.
    Export,
}

impl Attribute {
    pub const ALL: [Attribute; 7] = [
        Attribute::Deprecated,
        Attribute::Final,
        Attribute::Override,
        Attribute::StaticOnType,
        Attribute::Mutating,
        Attribute::Required,
        Attribute::Export,
    ];
}

/// A typed, position-indexed bag of attributes found by the parser for one
/// declaration: which markers are present, and — per position — which ones
/// the grammar allows there. `allow` is configured by the declaration's
/// parser callback before `check` is used to report violations; the core
/// itself only ever calls [`AttributeSet::has`].
#[derive(Clone, Debug, Default)]
pub struct AttributeSet {
    found: u8,
    allowed: u8,
}

fn bit(attr: Attribute) -> u8 {
    1 << (attr as u8)
}

impl AttributeSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_found(&mut self, attr: Attribute) -> &mut Self {
        self.found |= bit(attr);
        self
    }

    pub fn allow(&mut self, attr: Attribute) -> &mut Self {
        self.allowed |= bit(attr);
        self
    }

    #[must_use]
    pub fn has(&self, attr: Attribute) -> bool {
        self.found & bit(attr) != 0
    }

    /// Attributes found but not allowed at this position — §6/§7's
    /// `Attribute-Not-Applicable` diagnostic, one per violator.
    #[must_use]
    pub fn disallowed_found(&self) -> Vec<Attribute> {
        Attribute::ALL.iter().copied().filter(|a| self.has(*a) && self.allowed & bit(*a) == 0).collect()
    }
}

#[cfg(test)]
#[path = "tests/attributes.rs"]
mod tests;
