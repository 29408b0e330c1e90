//! §6 "Function code generator context ... exposes the current function's
//! `this` value, the scope, the type helper, the backend builder, the
//! application-level 'optional no-value' constant, and the generator's
//! compilation context."

use crate::ir::{IrBuilder, IrValue, TypeHelper};
use crate::scope::Scope;

/// Everything a lowering operation needs for one function body. `Cx` is
/// left generic over the "generator's compilation context" §6 mentions —
/// C7 itself never inspects it, it only carries it through for call-site
/// lowering (out of scope here, §1) to use, the same way `this_value` is
/// carried for instance access without C7 caring what kind of class it is.
pub struct FunctionContext<'a, Cx> {
    /// `self`'s value when lowering an instance method; `None` for a type
    /// method, initializer-of-a-value-type-before-self-exists, or free
    /// function.
    pub this_value: Option<IrValue>,
    pub scope: Scope,
    pub builder: &'a mut dyn IrBuilder,
    pub type_helper: &'a mut dyn TypeHelper,
    /// The runtime sentinel stored into an optional's presence slot to
    /// mean "no value" (§3 "optional", §4.7 "Declaration without
    /// initializer").
    pub optional_no_value: IrValue,
    pub compilation_context: &'a mut Cx,
}

impl<'a, Cx> FunctionContext<'a, Cx> {
    pub fn new(this_value: Option<IrValue>, builder: &'a mut dyn IrBuilder, type_helper: &'a mut dyn TypeHelper, optional_no_value: IrValue, compilation_context: &'a mut Cx) -> Self {
        FunctionContext {
            this_value,
            scope: Scope::new(),
            builder,
            type_helper,
            optional_no_value,
            compilation_context,
        }
    }
}
