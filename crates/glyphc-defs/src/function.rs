//! `Function`: contract fields plus the runtime fields C6 mutates (§3).

use glyphc_common::diagnostics::diagnostic_codes as codes;
use glyphc_common::{Atom, CoreError, DefId, Diagnostic, FunctionId, Interner, PackageId, Span};
use glyphc_types::TypeId;

use crate::attributes::AttributeSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum AccessLevel {
    Private,
    Package,
    Public,
}

#[derive(Clone, Debug)]
pub struct Argument {
    pub name: Atom,
    pub ty: TypeId,
}

/// Identifies the allocator (§3 "VTIProvider") a function's VTI comes from.
/// Each class/value-type/protocol has one provider for instance methods and
/// separate ones for initializers and type methods.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct VtiProviderId(u32);

impl VtiProviderId {
    #[must_use]
    pub fn new(index: u32) -> Self {
        Self(index)
    }
    #[must_use]
    pub fn index(self) -> u32 {
        self.0
    }
}

/// A method, initializer, or type method (§3 "Function").
#[derive(Clone, Debug)]
pub struct Function {
    // Contract fields.
    pub name: Atom,
    pub position: Span,
    pub access: AccessLevel,
    pub attributes: AttributeSet,
    pub arguments: Vec<Argument>,
    pub return_type: TypeId,
    /// Upper-bound constraint for each of this function's own generic
    /// parameters (local generics, §3/§4.3).
    pub generic_parameter_constraints: Vec<TypeId>,
    pub package: PackageId,
    pub owner: DefId,
    pub overridden: Option<FunctionId>,
    pub overriders: Vec<FunctionId>,
    /// Doc-comment text attached to the declaration, if any — surfaced in
    /// `deprecated_warning`'s message when the function is also `@deprecated`
    /// (§7 "Warnings — Deprecated-Use, with optional documentation reference").
    pub documentation: Option<Atom>,

    // Runtime fields, mutated by C6.
    vti: i32,
    vti_provider: Option<VtiProviderId>,
    used: bool,
    linking_table_index: Option<u32>,
}

impl Function {
    #[must_use]
    pub fn new(
        name: Atom,
        position: Span,
        access: AccessLevel,
        package: PackageId,
        owner: DefId,
        return_type: TypeId,
        arguments: Vec<Argument>,
    ) -> Self {
        Function {
            name,
            position,
            access,
            attributes: AttributeSet::new(),
            arguments,
            return_type,
            generic_parameter_constraints: Vec::new(),
            package,
            owner,
            overridden: None,
            overriders: Vec::new(),
            documentation: None,
            vti: -1,
            vti_provider: None,
            used: false,
            linking_table_index: None,
        }
    }

    #[must_use]
    pub fn is_final(&self) -> bool {
        self.attributes.has(crate::attributes::Attribute::Final)
    }

    #[must_use]
    pub fn is_deprecated(&self) -> bool {
        self.attributes.has(crate::attributes::Attribute::Deprecated)
    }

    /// §7's Deprecated-Use warning: `None` when `self` isn't `@deprecated`;
    /// otherwise a [`Diagnostic`] at `call_site`, pointing to `documentation`
    /// when one was attached to the declaration. Mirrors the original's
    /// `Function::deprecatedWarning`.
    #[must_use]
    pub fn deprecated_warning(&self, names: &Interner, file: &str, call_site: Span) -> Option<Diagnostic> {
        if !self.is_deprecated() {
            return None;
        }
        let name = names.resolve(self.name);
        let message = match self.documentation {
            Some(doc) => format!(
                "{} is deprecated. Please refer to the documentation for further information: {}",
                name,
                names.resolve(doc)
            ),
            None => format!("{name} is deprecated."),
        };
        Some(Diagnostic::warning(file, call_site, message, codes::DEPRECATED_USE))
    }

    #[must_use]
    pub fn is_used(&self) -> bool {
        self.used
    }

    /// §4.6/§7: programmer error to mark used twice through this low-level
    /// setter's sibling `try_mark_used`; plain `mark_used` is idempotent at
    /// the data layer, the *propagation* idempotence guard lives in
    /// `glyphc-reach`.
    pub fn mark_used(&mut self) {
        self.used = true;
    }

    #[must_use]
    pub fn vti(&self) -> Result<i32, CoreError> {
        if self.vti < 0 {
            Err(CoreError::UnassignedVti)
        } else {
            Ok(self.vti)
        }
    }

    #[must_use]
    pub fn has_vti(&self) -> bool {
        self.vti >= 0
    }

    /// §4.6: "Reassignment is forbidden (Reassign-VTI)".
    pub fn set_vti(&mut self, vti: i32) -> Result<(), CoreError> {
        if self.vti >= 0 {
            return Err(CoreError::ReassignVti);
        }
        self.vti = vti;
        Ok(())
    }

    #[must_use]
    pub fn vti_provider(&self) -> Option<VtiProviderId> {
        self.vti_provider
    }

    /// §4.6: "Reassigning the provider is forbidden (Reassign-Provider)".
    pub fn set_vti_provider(&mut self, provider: VtiProviderId) -> Result<(), CoreError> {
        if self.vti_provider.is_some() {
            return Err(CoreError::ReassignProvider);
        }
        self.vti_provider = Some(provider);
        Ok(())
    }

    #[must_use]
    pub fn linking_table_index(&self) -> Option<u32> {
        self.linking_table_index
    }

    pub fn set_linking_table_index(&mut self, index: u32) {
        self.linking_table_index.get_or_insert(index);
    }
}

/// A dense allocator of VTIs for one method family (§3 "VTIProvider"):
/// "returning successive non-negative indices and counting how many of its
/// customers are used".
#[derive(Clone, Copy, Debug, Default)]
pub struct VtiProvider {
    next: i32,
    used_consumers: u32,
}

impl VtiProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_index(&mut self) -> i32 {
        let index = self.next;
        self.next += 1;
        index
    }

    pub fn notify_used(&mut self) {
        self.used_consumers += 1;
    }

    #[must_use]
    pub fn used_consumers(&self) -> u32 {
        self.used_consumers
    }
}

/// Owning arena of `VtiProvider`s, indexed by [`VtiProviderId`].
#[derive(Clone, Debug, Default)]
pub struct VtiProviderTable {
    providers: Vec<VtiProvider>,
}

impl VtiProviderTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self) -> VtiProviderId {
        let id = VtiProviderId::new(self.providers.len() as u32);
        self.providers.push(VtiProvider::new());
        id
    }

    pub fn get_mut(&mut self, id: VtiProviderId) -> &mut VtiProvider {
        &mut self.providers[id.index() as usize]
    }

    #[must_use]
    pub fn get(&self, id: VtiProviderId) -> &VtiProvider {
        &self.providers[id.index() as usize]
    }
}

/// Owning arena of [`Function`]s, indexed by [`FunctionId`].
#[derive(Clone, Debug, Default)]
pub struct FunctionTable {
    functions: Vec<Function>,
}

impl FunctionTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, function: Function) -> FunctionId {
        let id = FunctionId::new(self.functions.len() as u32);
        self.functions.push(function);
        id
    }

    #[must_use]
    pub fn get(&self, id: FunctionId) -> &Function {
        &self.functions[id.index() as usize]
    }

    pub fn get_mut(&mut self, id: FunctionId) -> &mut Function {
        &mut self.functions[id.index() as usize]
    }

    pub fn add_overrider(&mut self, overridden: FunctionId, overrider: FunctionId) {
        self.get_mut(overridden).overriders.push(overrider);
        self.get_mut(overrider).overridden = Some(overridden);
    }
}

#[cfg(test)]
#[path = "tests/function.rs"]
mod tests;
