use super::*;
use glyphc_common::{DefId, Interner, PackageId, VecDiagnosticsSink};
use glyphc_defs::definition::{Definition, DefinitionTable};
use glyphc_defs::function::{AccessLevel, Argument, Function, FunctionTable};
use glyphc_defs::oracles::DefinitionContext;
use glyphc_defs::package::PackageTable;
use glyphc_types::{TypeData, TypeInterner};

struct Fixture {
    names: Interner,
    types: TypeInterner,
    defs: DefinitionTable,
    functions: FunctionTable,
    packages: PackageTable,
    pkg: PackageId,
}

impl Fixture {
    fn new() -> Self {
        let names = Interner::new();
        let mut packages = PackageTable::new();
        let pkg = packages.insert(glyphc_defs::package::Package::new(names.intern("🏠")));
        Fixture { names, types: TypeInterner::new(), defs: DefinitionTable::new(), functions: FunctionTable::new(), packages, pkg }
    }

    fn ctx(&self) -> DefinitionContext<'_> {
        DefinitionContext { definitions: &self.defs, functions: &self.functions, packages: &self.packages, interner: &self.names, types: &self.types }
    }

    fn function(&mut self, owner: DefId, name: &str, return_type: glyphc_types::TypeId, arguments: Vec<Argument>) -> glyphc_common::FunctionId {
        self.functions.insert(Function::new(self.names.intern(name), glyphc_common::Span::new(0, 1), AccessLevel::Public, self.pkg, owner, return_type, arguments))
    }
}

/// §8 scenario 1: super returns `Protocol P`; subclass declares return
/// `Class C conforming to P`. Enforcement succeeds, the subclass's return
/// is marked force-box, no thunk needed (single class, no protocol context).
#[test]
fn override_covariant_box_marks_force_box_no_thunk() {
    let mut fx = Fixture::new();
    let protocol = fx.defs.insert(Definition::protocol(fx.pkg, fx.names.intern("P")));
    let class = fx.defs.insert(Definition::class(fx.pkg, fx.names.intern("C"), None));
    fx.defs.get_mut(class).conformances.push((protocol, Vec::new()));

    let protocol_ty = fx.types.intern(TypeData::protocol(protocol, false));
    let class_ty = fx.types.intern(TypeData::class(class, false));

    let owner = fx.defs.insert(Definition::class(fx.pkg, fx.names.intern("Owner"), None));
    let sub = fx.defs.insert(Definition::class(fx.pkg, fx.names.intern("Sub"), Some(owner)));

    let s = fx.function(owner, "foo", protocol_ty, Vec::new());
    let f = fx.function(sub, "foo", class_ty, Vec::new());
    fx.functions.add_overrider(s, f);

    let mut sink = VecDiagnosticsSink::new();
    let result = enforce_override(&fx.types, &fx.ctx(), &fx.ctx(), &fx.functions, f, s, None, "test.emoji", &fx.names, &mut sink);

    assert_eq!(result.outcome, EnforcementOutcome::Ok);
    assert!(sink.diagnostics().is_empty());
    let boxed = result.forced_return_type.expect("a covariant box return must rebuild a force-boxed type");
    fx.functions.get_mut(f).return_type = boxed;
    assert!(fx.types.force_box(fx.functions.get(f).return_type));
}

/// §8 scenario 2: a storage mismatch inside a protocol context signals a
/// thunk instead of failing.
#[test]
fn protocol_storage_mismatch_needs_thunk_not_error() {
    let mut fx = Fixture::new();
    let protocol = fx.defs.insert(Definition::protocol(fx.pkg, fx.names.intern("P")));
    let value_type = fx.defs.insert(Definition::value_type(fx.pkg, fx.names.intern("V"), 1));

    // A generic variable return on the protocol side forces Box storage;
    // the implementer's concrete value-type return is Scalar. The protocol
    // context resolves via `ResolveMode::SuperAndConstraints`, which needs
    // a concrete upper-bound constraint for the generic slot (here: the
    // same value type, which is Scalar on its own — the mismatch that
    // should trigger a thunk).
    let something = fx.types.intern(TypeData::something());
    fx.defs.get_mut(protocol).generic_parameter_constraints.push(something);
    let generic_return = fx.types.intern(TypeData::generic_variable(0, protocol, false));
    let concrete_return = fx.types.intern(TypeData::value_type(value_type, false));

    let s = fx.function(protocol, "identity", generic_return, Vec::new());
    let f = fx.function(value_type, "identity", concrete_return, Vec::new());
    fx.functions.add_overrider(s, f);

    let mut sink = VecDiagnosticsSink::new();
    let result = enforce_override(&fx.types, &fx.ctx(), &fx.ctx(), &fx.functions, f, s, Some(protocol), "test.emoji", &fx.names, &mut sink);

    assert_eq!(result.outcome, EnforcementOutcome::NeedsThunk);
    assert!(sink.diagnostics().is_empty());
}

/// §8 scenario 3: overriding a `final` method reports `Override-Sealed` at
/// the subclass's position.
#[test]
fn final_override_attempt_reports_override_sealed() {
    let mut fx = Fixture::new();
    let something = fx.types.intern(TypeData::something());
    let owner = fx.defs.insert(Definition::class(fx.pkg, fx.names.intern("Owner"), None));
    let sub = fx.defs.insert(Definition::class(fx.pkg, fx.names.intern("Sub"), Some(owner)));

    let s = fx.function(owner, "foo", something, Vec::new());
    fx.functions.get_mut(s).attributes.mark_found(glyphc_defs::attributes::Attribute::Final);
    let f = fx.function(sub, "foo", something, Vec::new());

    let mut sink = VecDiagnosticsSink::new();
    let result = enforce_override(&fx.types, &fx.ctx(), &fx.ctx(), &fx.functions, f, s, None, "test.emoji", &fx.names, &mut sink);

    assert_eq!(result.outcome, EnforcementOutcome::Failed(ContractViolation::OverrideSealed));
    assert_eq!(sink.diagnostics().len(), 1);
    assert_eq!(sink.diagnostics()[0].code, codes::OVERRIDE_SEALED);
}

#[test]
fn access_mismatch_is_reported() {
    let mut fx = Fixture::new();
    let something = fx.types.intern(TypeData::something());
    let owner = fx.defs.insert(Definition::class(fx.pkg, fx.names.intern("Owner"), None));
    let sub = fx.defs.insert(Definition::class(fx.pkg, fx.names.intern("Sub"), Some(owner)));

    let s = fx.function(owner, "foo", something, Vec::new());
    let f = fx.function(sub, "foo", something, Vec::new());
    fx.functions.get_mut(f).access = AccessLevel::Private;

    let mut sink = VecDiagnosticsSink::new();
    let result = enforce_override(&fx.types, &fx.ctx(), &fx.ctx(), &fx.functions, f, s, None, "test.emoji", &fx.names, &mut sink);

    assert_eq!(result.outcome, EnforcementOutcome::Failed(ContractViolation::AccessMismatch));
}

#[test]
fn arity_mismatch_is_reported() {
    let mut fx = Fixture::new();
    let something = fx.types.intern(TypeData::something());
    let owner = fx.defs.insert(Definition::class(fx.pkg, fx.names.intern("Owner"), None));
    let sub = fx.defs.insert(Definition::class(fx.pkg, fx.names.intern("Sub"), Some(owner)));

    let s = fx.function(owner, "foo", something, Vec::new());
    let f = fx.function(sub, "foo", something, vec![Argument { name: fx.names.intern("x"), ty: something }]);

    let mut sink = VecDiagnosticsSink::new();
    let result = enforce_override(&fx.types, &fx.ctx(), &fx.ctx(), &fx.functions, f, s, None, "test.emoji", &fx.names, &mut sink);

    assert_eq!(result.outcome, EnforcementOutcome::Failed(ContractViolation::ArityMismatch));
}

/// §7: overriding a `@deprecated` declaration reports a Deprecated-Use
/// warning at the overrider's position, independent of whether the
/// checklist itself passes.
#[test]
fn overriding_a_deprecated_declaration_reports_deprecated_use() {
    let mut fx = Fixture::new();
    let something = fx.types.intern(TypeData::something());
    let owner = fx.defs.insert(Definition::class(fx.pkg, fx.names.intern("Owner"), None));
    let sub = fx.defs.insert(Definition::class(fx.pkg, fx.names.intern("Sub"), Some(owner)));

    let s = fx.function(owner, "foo", something, Vec::new());
    fx.functions.get_mut(s).attributes.mark_found(glyphc_defs::attributes::Attribute::Deprecated);
    let f = fx.function(sub, "foo", something, Vec::new());

    let mut sink = VecDiagnosticsSink::new();
    let result = enforce_override(&fx.types, &fx.ctx(), &fx.ctx(), &fx.functions, f, s, None, "test.emoji", &fx.names, &mut sink);

    assert_eq!(result.outcome, EnforcementOutcome::Ok);
    assert_eq!(sink.diagnostics().len(), 1);
    assert_eq!(sink.diagnostics()[0].code, codes::DEPRECATED_USE);
}

#[test]
fn ordinary_override_with_matching_signature_succeeds() {
    let mut fx = Fixture::new();
    let owner = fx.defs.insert(Definition::class(fx.pkg, fx.names.intern("Owner"), None));
    let sub = fx.defs.insert(Definition::class(fx.pkg, fx.names.intern("Sub"), Some(owner)));
    // A non-optional `Class` return classifies as `Scalar` (storage rule
    // 3), so neither side is `Box` and no force-box rebuild is triggered.
    let return_ty = fx.types.intern(TypeData::class(owner, false));

    let s = fx.function(owner, "foo", return_ty, Vec::new());
    let f = fx.function(sub, "foo", return_ty, Vec::new());

    let mut sink = VecDiagnosticsSink::new();
    let result = enforce_override(&fx.types, &fx.ctx(), &fx.ctx(), &fx.functions, f, s, None, "test.emoji", &fx.names, &mut sink);

    assert_eq!(result.outcome, EnforcementOutcome::Ok);
    assert!(sink.diagnostics().is_empty());
    assert!(result.forced_return_type.is_none(), "a non-covariant-box return must not rebuild a type");
}
