//! `Package` (§3): the owner of a set of definitions; the default-namespace
//! sentinel glyph mirrors the original's `kDefaultNamespace`.

use glyphc_common::{Atom, DefId, PackageId};

/// The identifier glyph representing the default namespace (𝑘DefaultNamespace
/// in the original: a single house-building emoji).
pub const DEFAULT_NAMESPACE_GLYPH: &str = "🏠";

#[derive(Clone, Debug)]
pub struct Package {
    pub name: Atom,
    pub definitions: Vec<DefId>,
}

impl Package {
    #[must_use]
    pub fn new(name: Atom) -> Self {
        Package { name, definitions: Vec::new() }
    }
}

/// Owning arena of [`Package`]s, indexed by [`PackageId`].
#[derive(Clone, Debug, Default)]
pub struct PackageTable {
    packages: Vec<Package>,
}

impl PackageTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, package: Package) -> PackageId {
        let id = PackageId::new(self.packages.len() as u32);
        self.packages.push(package);
        id
    }

    #[must_use]
    pub fn get(&self, id: PackageId) -> &Package {
        &self.packages[id.index() as usize]
    }

    pub fn get_mut(&mut self, id: PackageId) -> &mut Package {
        &mut self.packages[id.index() as usize]
    }
}

#[cfg(test)]
#[path = "tests/package.rs"]
mod tests;
