//! Class, Protocol, ValueType, Enum and Extension definitions — the entities
//! a [`glyphc_types::TypeId`] of a named kind points at (§3 "definition
//! reference"). Definitions own their functions (§9 Design Notes); this
//! crate owns the definitions.

use glyphc_common::{Atom, DefId, PackageId};
use glyphc_types::{TypeId, TypeInterner, TypeKind};

/// The kind-specific shape of a definition.
#[derive(Clone, Debug)]
pub enum DefinitionKind {
    Class {
        superclass: Option<DefId>,
        /// The generic arguments this class passes to its superclass,
        /// expressed in terms of *this class's own* generic parameters.
        superclass_arguments: Vec<TypeId>,
    },
    Protocol {
        /// Protocols this protocol itself requires (structural extension).
        required_protocols: Vec<DefId>,
    },
    ValueType,
    Enum,
    Extension {
        extended: DefId,
    },
}

/// A class, protocol, value type, enum, or extension (§3).
#[derive(Clone, Debug)]
pub struct Definition {
    pub package: PackageId,
    pub name: Atom,
    pub kind: DefinitionKind,
    /// Upper-bound constraint for each of this definition's own generic
    /// parameters (§4.3's "resolution constraint").
    pub generic_parameter_constraints: Vec<TypeId>,
    /// Protocols this definition conforms to, each paired with the
    /// definition's own generic arguments resolved into that protocol's
    /// generic argument list (possibly empty for non-generic protocols).
    pub conformances: Vec<(DefId, Vec<TypeId>)>,
    /// Words occupied by one non-optional instance's own fields, used by
    /// the storage classifier for `Enum`/`ValueType` optionals (§4.2).
    pub payload_words: u32,
}

impl Definition {
    #[must_use]
    pub fn class(package: PackageId, name: Atom, superclass: Option<DefId>) -> Self {
        Definition {
            package,
            name,
            kind: DefinitionKind::Class { superclass, superclass_arguments: Vec::new() },
            generic_parameter_constraints: Vec::new(),
            conformances: Vec::new(),
            payload_words: 1,
        }
    }

    #[must_use]
    pub fn protocol(package: PackageId, name: Atom) -> Self {
        Definition {
            package,
            name,
            kind: DefinitionKind::Protocol { required_protocols: Vec::new() },
            generic_parameter_constraints: Vec::new(),
            conformances: Vec::new(),
            payload_words: 0,
        }
    }

    #[must_use]
    pub fn value_type(package: PackageId, name: Atom, payload_words: u32) -> Self {
        Definition {
            package,
            name,
            kind: DefinitionKind::ValueType,
            generic_parameter_constraints: Vec::new(),
            conformances: Vec::new(),
            payload_words,
        }
    }

    #[must_use]
    pub fn enumeration(package: PackageId, name: Atom) -> Self {
        Definition {
            package,
            name,
            kind: DefinitionKind::Enum,
            generic_parameter_constraints: Vec::new(),
            conformances: Vec::new(),
            payload_words: 1,
        }
    }

    #[must_use]
    pub fn extension(package: PackageId, name: Atom, extended: DefId) -> Self {
        Definition {
            package,
            name,
            kind: DefinitionKind::Extension { extended },
            generic_parameter_constraints: Vec::new(),
            conformances: Vec::new(),
            payload_words: 0,
        }
    }

    #[must_use]
    pub fn superclass(&self) -> Option<DefId> {
        match &self.kind {
            DefinitionKind::Class { superclass, .. } => *superclass,
            _ => None,
        }
    }
}

/// Owning arena of [`Definition`]s, indexed by [`DefId`].
#[derive(Clone, Debug, Default)]
pub struct DefinitionTable {
    definitions: Vec<Definition>,
}

impl DefinitionTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, definition: Definition) -> DefId {
        let id = DefId::new(self.definitions.len() as u32);
        self.definitions.push(definition);
        id
    }

    #[must_use]
    pub fn get(&self, id: DefId) -> &Definition {
        &self.definitions[id.index() as usize]
    }

    pub fn get_mut(&mut self, id: DefId) -> &mut Definition {
        &mut self.definitions[id.index() as usize]
    }

    /// Walks the superclass chain from `sub`; `true` if it reaches `sup`
    /// (or starts there).
    #[must_use]
    pub fn is_same_or_subclass(&self, sub: DefId, sup: DefId) -> bool {
        let mut current = Some(sub);
        while let Some(def) = current {
            if def == sup {
                return true;
            }
            current = self.get(def).superclass();
        }
        false
    }

    /// Projects `sub_args` (the generic arguments of a `sub`-kinded `Type`)
    /// up the inheritance chain to `sup`'s own generic parameter space, by
    /// substituting each step's `superclass_arguments` (§4.4 rule 3).
    #[must_use]
    pub fn superclass_generic_arguments(&self, types: &TypeInterner, sub: DefId, sup: DefId, sub_args: &[TypeId]) -> Option<Vec<TypeId>> {
        if sub == sup {
            return Some(sub_args.to_vec());
        }
        let DefinitionKind::Class { superclass, superclass_arguments } = &self.get(sub).kind else { return None };
        let superclass = (*superclass)?;
        let projected = substitute(types, superclass_arguments, sub_args);
        self.superclass_generic_arguments(types, superclass, sup, &projected)
    }

    /// A definition conforms to a protocol if it declares the conformance
    /// directly, or if its superclass does (conformance is inherited).
    #[must_use]
    pub fn conforms_to_protocol(&self, def: DefId, protocol: DefId) -> bool {
        if self.get(def).conformances.iter().any(|(p, _)| *p == protocol) {
            return true;
        }
        match self.get(def).superclass() {
            Some(superclass) => self.conforms_to_protocol(superclass, protocol),
            None => false,
        }
    }

    #[must_use]
    pub fn protocol_generic_arguments(&self, types: &TypeInterner, def: DefId, protocol: DefId, def_args: &[TypeId]) -> Option<Vec<TypeId>> {
        self.get(def)
            .conformances
            .iter()
            .find(|(p, _)| *p == protocol)
            .map(|(_, protocol_params)| substitute(types, protocol_params, def_args))
    }

    #[must_use]
    pub fn generic_constraint(&self, def: DefId, index: u32) -> Option<TypeId> {
        self.get(def).generic_parameter_constraints.get(index as usize).copied()
    }
}

/// Substitutes each `Type` in `template` — expressed in the owning
/// definition's own generic-parameter space — using `arguments` as the
/// concrete bindings for that space. `template` entries that are
/// themselves a `GenericVariable` at `index` become `arguments[index]`;
/// anything else (a concrete type, or a nested generic the definition
/// passes through unchanged) passes through as-is. This is one
/// inheritance/conformance step only — a template entry that nests a
/// generic variable inside its own `generic_arguments` (e.g. `Box<T>`)
/// isn't unpacked here; callers needing that go through `glyphc-types`'s
/// `resolve` with a `HierarchyOracle` once the projected `Type`s reach the
/// rest of the pipeline.
fn substitute(types: &TypeInterner, template: &[TypeId], arguments: &[TypeId]) -> Vec<TypeId> {
    if template.is_empty() {
        return arguments.to_vec();
    }
    template
        .iter()
        .map(|&entry| match types.kind(entry) {
            TypeKind::GenericVariable { index, .. } => arguments.get(index as usize).copied().unwrap_or(entry),
            _ => entry,
        })
        .collect()
}

#[cfg(test)]
#[path = "tests/definition.rs"]
mod tests;
