use super::*;
use crate::context::FunctionContext;
use crate::ir::{BackendTypeId, IrBuilder, IrValue, TypeHelper};
use glyphc_common::DefId;
use glyphc_types::{TypeData, TypeInterner, UnitPayloadOracle};

#[derive(Debug, PartialEq, Eq)]
enum Op {
    Alloca,
    Gep(IrValue, Vec<i32>),
    Load(IrValue),
    Store(IrValue, IrValue),
}

#[derive(Default)]
struct FakeBuilder {
    next: u32,
    ops: Vec<Op>,
}

impl FakeBuilder {
    fn fresh(&mut self) -> IrValue {
        let v = IrValue::from_raw(self.next);
        self.next += 1;
        v
    }
}

impl IrBuilder for FakeBuilder {
    fn alloca(&mut self, _ty: BackendTypeId, _name: Option<&str>) -> IrValue {
        self.ops.push(Op::Alloca);
        self.fresh()
    }

    fn gep(&mut self, base: IrValue, indices: &[i32]) -> IrValue {
        self.ops.push(Op::Gep(base, indices.to_vec()));
        self.fresh()
    }

    fn load(&mut self, ptr: IrValue) -> IrValue {
        self.ops.push(Op::Load(ptr));
        self.fresh()
    }

    fn store(&mut self, value: IrValue, ptr: IrValue) {
        self.ops.push(Op::Store(value, ptr));
    }
}

struct FakeTypeHelper;

impl TypeHelper for FakeTypeHelper {
    fn backend_type(&mut self, _interner: &TypeInterner, _oracle: &dyn glyphc_types::PayloadSizeOracle, _ty: glyphc_types::TypeId) -> BackendTypeId {
        BackendTypeId::from_raw(0)
    }
}

fn ctx<'a>(builder: &'a mut FakeBuilder, helper: &'a mut FakeTypeHelper, this_value: Option<IrValue>, no_value: IrValue, cx: &'a mut ()) -> FunctionContext<'a, ()> {
    FunctionContext::new(this_value, builder, helper, no_value, cx)
}

#[test]
fn read_local_frozen_yields_value_with_no_ops() {
    let mut builder = FakeBuilder::default();
    let mut helper = FakeTypeHelper;
    let mut cx_data = ();
    let no_value = IrValue::from_raw(100);
    let mut c = ctx(&mut builder, &mut helper, None, no_value, &mut cx_data);
    c.scope.declare(0, LocalVariable::frozen(IrValue::from_raw(5)));

    let read = read_local(&mut c, 0, false);
    assert_eq!(read, IrValue::from_raw(5));
    assert!(builder.ops.is_empty());
}

#[test]
fn read_local_mutable_emits_load_unless_reference() {
    let mut builder = FakeBuilder::default();
    let mut helper = FakeTypeHelper;
    let mut cx_data = ();
    let no_value = IrValue::from_raw(100);
    let mut c = ctx(&mut builder, &mut helper, None, no_value, &mut cx_data);
    let slot = IrValue::from_raw(7);
    c.scope.declare(0, LocalVariable::slot(slot));

    let as_reference = read_local(&mut c, 0, true);
    assert_eq!(as_reference, slot);
    assert!(builder.ops.is_empty());

    let loaded = read_local(&mut c, 0, false);
    assert_eq!(builder.ops, vec![Op::Load(slot)]);
    assert_ne!(loaded, slot);
}

#[test]
fn read_instance_field_uses_two_index_gep() {
    let mut builder = FakeBuilder::default();
    let mut helper = FakeTypeHelper;
    let mut cx_data = ();
    let no_value = IrValue::from_raw(100);
    let this = IrValue::from_raw(1);
    let mut c = ctx(&mut builder, &mut helper, Some(this), no_value, &mut cx_data);

    read_instance_field(&mut c, 3, false);
    assert_eq!(builder.ops[0], Op::Gep(this, vec![0, 3]));
    assert!(matches!(builder.ops[1], Op::Load(_)));
}

#[test]
fn declare_without_initializer_stores_sentinel_for_optional() {
    let types = TypeInterner::new();
    let oracle = UnitPayloadOracle;
    let optional_int = types.intern(TypeData::value_type(DefId::new(0), true));

    let mut builder = FakeBuilder::default();
    let mut helper = FakeTypeHelper;
    let mut cx_data = ();
    let no_value = IrValue::from_raw(100);
    let mut c = ctx(&mut builder, &mut helper, None, no_value, &mut cx_data);

    declare_without_initializer(&mut c, &types, &oracle, 0, optional_int);

    let slot = match c.scope.lookup(0).unwrap().storage {
        StorageLocation::Slot(s) => s,
        StorageLocation::Value(_) => panic!("expected a mutable slot"),
    };
    assert_eq!(builder.ops[0], Op::Alloca);
    assert_eq!(builder.ops[1], Op::Gep(slot, vec![0]));
    assert!(matches!(builder.ops[2], Op::Store(v, _) if v == no_value));
}

#[test]
fn declare_without_initializer_skips_sentinel_for_non_optional() {
    let types = TypeInterner::new();
    let oracle = UnitPayloadOracle;
    let plain_int = types.intern(TypeData::value_type(DefId::new(0), false));

    let mut builder = FakeBuilder::default();
    let mut helper = FakeTypeHelper;
    let mut cx_data = ();
    let no_value = IrValue::from_raw(100);
    let mut c = ctx(&mut builder, &mut helper, None, no_value, &mut cx_data);

    declare_without_initializer(&mut c, &types, &oracle, 0, plain_int);
    assert_eq!(builder.ops, vec![Op::Alloca]);
}

#[test]
fn assign_new_frozen_local_binds_value_without_alloca() {
    let types = TypeInterner::new();
    let oracle = UnitPayloadOracle;
    let mut builder = FakeBuilder::default();
    let mut helper = FakeTypeHelper;
    let mut cx_data = ();
    let no_value = IrValue::from_raw(100);
    let mut c = ctx(&mut builder, &mut helper, None, no_value, &mut cx_data);

    let value = IrValue::from_raw(55);
    assign(&mut c, &types, &oracle, AssignTarget::NewFrozenLocal { variable_id: 0 }, value);

    assert!(builder.ops.is_empty());
    assert_eq!(c.scope.lookup(0), Some(LocalVariable::frozen(value)));
}

#[test]
fn assign_new_mutable_local_allocas_and_stores() {
    let types = TypeInterner::new();
    let oracle = UnitPayloadOracle;
    let ty = types.intern(TypeData::value_type(DefId::new(0), false));
    let mut builder = FakeBuilder::default();
    let mut helper = FakeTypeHelper;
    let mut cx_data = ();
    let no_value = IrValue::from_raw(100);
    let mut c = ctx(&mut builder, &mut helper, None, no_value, &mut cx_data);

    let value = IrValue::from_raw(55);
    assign(&mut c, &types, &oracle, AssignTarget::NewMutableLocal { variable_id: 0, declared_type: ty }, value);

    assert_eq!(builder.ops.len(), 2);
    assert!(matches!(builder.ops[0], Op::Alloca));
    assert!(matches!(builder.ops[1], Op::Store(v, _) if v == value));
}

#[test]
#[should_panic(expected = "frozen binding")]
fn assign_to_frozen_existing_local_panics() {
    let types = TypeInterner::new();
    let oracle = UnitPayloadOracle;
    let mut builder = FakeBuilder::default();
    let mut helper = FakeTypeHelper;
    let mut cx_data = ();
    let no_value = IrValue::from_raw(100);
    let mut c = ctx(&mut builder, &mut helper, None, no_value, &mut cx_data);
    c.scope.declare(0, LocalVariable::frozen(IrValue::from_raw(1)));

    assign(&mut c, &types, &oracle, AssignTarget::ExistingLocal { variable_id: 0 }, IrValue::from_raw(2));
}

#[test]
fn initable_creator_no_action_skips_assignment() {
    let types = TypeInterner::new();
    let oracle = UnitPayloadOracle;
    let mut builder = FakeBuilder::default();
    let mut helper = FakeTypeHelper;
    let mut cx_data = ();
    let no_value = IrValue::from_raw(100);
    let mut c = ctx(&mut builder, &mut helper, None, no_value, &mut cx_data);

    initable_creator(&mut c, &types, &oracle, true, AssignTarget::NewFrozenLocal { variable_id: 0 }, IrValue::from_raw(9));

    assert!(c.scope.lookup(0).is_none());
    assert!(builder.ops.is_empty());
}

#[test]
fn initable_creator_performs_assignment_otherwise() {
    let types = TypeInterner::new();
    let oracle = UnitPayloadOracle;
    let mut builder = FakeBuilder::default();
    let mut helper = FakeTypeHelper;
    let mut cx_data = ();
    let no_value = IrValue::from_raw(100);
    let mut c = ctx(&mut builder, &mut helper, None, no_value, &mut cx_data);

    initable_creator(&mut c, &types, &oracle, false, AssignTarget::NewFrozenLocal { variable_id: 0 }, IrValue::from_raw(9));

    assert_eq!(c.scope.lookup(0), Some(LocalVariable::frozen(IrValue::from_raw(9))));
}
