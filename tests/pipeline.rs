//! Cross-crate pipeline tests: a contract check feeding reachability
//! feeding lowering for one function, covering the end-to-end scenarios
//! of §8.

use glyphc::common::{Interner, PackageId, Span, VecDiagnosticsSink};
use glyphc::contract::{enforce_override, EnforcementOutcome};
use glyphc::defs::definition::{Definition, DefinitionTable};
use glyphc::defs::function::{AccessLevel, Argument, Function, FunctionTable, VtiProviderTable};
use glyphc::defs::oracles::DefinitionContext;
use glyphc::defs::package::Package;
use glyphc::defs::package::PackageTable;
use glyphc::lower::context::FunctionContext;
use glyphc::lower::ir::{BackendTypeId, IrBuilder, IrValue, TypeHelper};
use glyphc::lower::lower::{assign, declare_without_initializer, read_local, AssignTarget};
use glyphc::lower::scope::LocalVariable;
use glyphc::reach::{assign_vti, mark_used, CompilationQueue};
use glyphc::types::{PayloadSizeOracle, TypeData, TypeInterner};

struct World {
    names: Interner,
    types: TypeInterner,
    defs: DefinitionTable,
    functions: FunctionTable,
    packages: PackageTable,
    providers: VtiProviderTable,
    pkg: PackageId,
}

impl World {
    fn new() -> Self {
        let names = Interner::new();
        let mut packages = PackageTable::new();
        let pkg = packages.insert(Package::new(names.intern("🏠")));
        World {
            names,
            types: TypeInterner::new(),
            defs: DefinitionTable::new(),
            functions: FunctionTable::new(),
            packages,
            providers: VtiProviderTable::new(),
            pkg,
        }
    }

    fn ctx(&self) -> DefinitionContext<'_> {
        DefinitionContext {
            definitions: &self.defs,
            functions: &self.functions,
            packages: &self.packages,
            interner: &self.names,
            types: &self.types,
        }
    }
}

struct FakeBuilder {
    next: u32,
    allocas: u32,
    stores: u32,
    loads: u32,
}

impl FakeBuilder {
    fn new() -> Self {
        FakeBuilder { next: 0, allocas: 0, stores: 0, loads: 0 }
    }

    fn fresh(&mut self) -> IrValue {
        let v = IrValue::from_raw(self.next);
        self.next += 1;
        v
    }
}

impl IrBuilder for FakeBuilder {
    fn alloca(&mut self, _ty: BackendTypeId, _name: Option<&str>) -> IrValue {
        self.allocas += 1;
        self.fresh()
    }

    fn gep(&mut self, _base: IrValue, _indices: &[i32]) -> IrValue {
        self.fresh()
    }

    fn load(&mut self, _ptr: IrValue) -> IrValue {
        self.loads += 1;
        self.fresh()
    }

    fn store(&mut self, _value: IrValue, _ptr: IrValue) {
        self.stores += 1;
    }
}

struct FakeTypeHelper;

impl TypeHelper for FakeTypeHelper {
    fn backend_type(&mut self, _interner: &TypeInterner, _oracle: &dyn PayloadSizeOracle, _ty: glyphc::types::TypeId) -> BackendTypeId {
        BackendTypeId::from_raw(0)
    }
}

/// §8 scenario 1 plus 6, chained: a covariant-box override succeeds, the
/// overridden method becomes used, reachability propagates "used" to the
/// override and both share one VTI, and the override's body can then be
/// lowered against the forced-box return type.
#[test]
fn contract_success_feeds_reachability_and_lowering() {
    let mut world = World::new();

    let protocol = world.defs.insert(Definition::protocol(world.pkg, world.names.intern("P")));
    let class = world.defs.insert(Definition::class(world.pkg, world.names.intern("C"), None));
    world.defs.get_mut(class).conformances.push((protocol, Vec::new()));

    let protocol_ty = world.types.intern(TypeData::protocol(protocol, false));
    let class_ty = world.types.intern(TypeData::class(class, false));

    let owner = world.defs.insert(Definition::class(world.pkg, world.names.intern("Owner"), None));
    let sub = world.defs.insert(Definition::class(world.pkg, world.names.intern("Sub"), Some(owner)));

    let s = world.functions.insert(Function::new(
        world.names.intern("foo"),
        Span::new(0, 1),
        AccessLevel::Public,
        world.pkg,
        owner,
        protocol_ty,
        Vec::new(),
    ));
    let f = world.functions.insert(Function::new(
        world.names.intern("foo"),
        Span::new(0, 1),
        AccessLevel::Public,
        world.pkg,
        sub,
        class_ty,
        Vec::new(),
    ));
    world.functions.add_overrider(s, f);

    let provider = world.providers.create();
    world.functions.get_mut(s).set_vti_provider(provider).unwrap();
    world.functions.get_mut(f).set_vti_provider(provider).unwrap();

    let mut sink = VecDiagnosticsSink::new();
    let result = enforce_override(&world.types, &world.ctx(), &world.ctx(), &world.functions, f, s, None, "pipeline.emoji", &world.names, &mut sink);
    assert_eq!(result.outcome, EnforcementOutcome::Ok);
    assert!(sink.diagnostics().is_empty());
    let boxed = result.forced_return_type.expect("covariant box return must rebuild a force-boxed type");
    world.functions.get_mut(f).return_type = boxed;
    assert!(world.types.force_box(world.functions.get(f).return_type));

    let mut queue = CompilationQueue::new();
    mark_used(&mut world.functions, &mut world.providers, &mut queue, s, true);
    assert!(world.functions.get(f).is_used(), "marking the overridden method used must propagate to its overrider");

    let s_vti = assign_vti(&mut world.functions, &mut world.providers, s).unwrap();
    let f_vti = assign_vti(&mut world.functions, &mut world.providers, f).unwrap();
    assert_eq!(s_vti, f_vti, "an overrider must share its overridden method's VTI slot");

    let mut builder = FakeBuilder::new();
    let mut helper = FakeTypeHelper;
    let mut cx_data = ();
    let no_value = IrValue::from_raw(1000);
    let mut fn_ctx = FunctionContext::new(None, &mut builder, &mut helper, no_value, &mut cx_data);
    declare_without_initializer(&mut fn_ctx, &world.types, &world.ctx(), 0, boxed);
    assert_eq!(builder.allocas, 1, "declaring a non-optional local should only alloca, not store a sentinel");
}

/// §8 scenario 3 chained with reachability: a sealed override is reported
/// and fails enforcement, but the overridden method can still be marked
/// used and reach code generation independently — the diagnostic and the
/// reachability graph are disjoint channels.
#[test]
fn sealed_override_still_reaches_independently() {
    let mut world = World::new();
    let something = world.types.intern(TypeData::something());
    let owner = world.defs.insert(Definition::class(world.pkg, world.names.intern("Owner"), None));
    let sub = world.defs.insert(Definition::class(world.pkg, world.names.intern("Sub"), Some(owner)));

    let s = world.functions.insert(Function::new(
        world.names.intern("foo"),
        Span::new(0, 1),
        AccessLevel::Public,
        world.pkg,
        owner,
        something,
        Vec::new(),
    ));
    world.functions.get_mut(s).attributes.mark_found(glyphc::defs::attributes::Attribute::Final);
    let f = world.functions.insert(Function::new(
        world.names.intern("foo"),
        Span::new(0, 1),
        AccessLevel::Public,
        world.pkg,
        sub,
        something,
        Vec::new(),
    ));

    let mut sink = VecDiagnosticsSink::new();
    let result = enforce_override(&world.types, &world.ctx(), &world.ctx(), &world.functions, f, s, None, "pipeline.emoji", &world.names, &mut sink);
    assert!(matches!(result.outcome, EnforcementOutcome::Failed(_)));
    assert_eq!(sink.diagnostics().len(), 1);

    let provider = world.providers.create();
    world.functions.get_mut(s).set_vti_provider(provider).unwrap();
    let mut queue = CompilationQueue::new();
    mark_used(&mut world.functions, &mut world.providers, &mut queue, s, true);
    assert!(world.functions.get(s).is_used());
    assert_eq!(queue.len(), 1);
}

/// §8 scenario 5 chained with an argument assignment: a frozen local is
/// bound without a slot, then read back with no further IR ops.
#[test]
fn frozen_binding_round_trips_through_lowering() {
    let types = TypeInterner::new();
    let oracle = glyphc::types::UnitPayloadOracle;
    let mut builder = FakeBuilder::new();
    let mut helper = FakeTypeHelper;
    let mut cx_data = ();
    let no_value = IrValue::from_raw(1000);
    let mut fn_ctx = FunctionContext::new(None, &mut builder, &mut helper, no_value, &mut cx_data);

    let value = IrValue::from_raw(42);
    assign(&mut fn_ctx, &types, &oracle, AssignTarget::NewFrozenLocal { variable_id: 0 }, value);
    assert!(matches!(fn_ctx.scope.lookup(0), Some(LocalVariable { mutable: false, .. })));

    let read = read_local(&mut fn_ctx, 0, false);
    assert_eq!(read, value);
    assert_eq!(builder.allocas, 0);
    assert_eq!(builder.loads, 0);
}
