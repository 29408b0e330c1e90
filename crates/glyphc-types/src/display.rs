//! Stringification (§4.1): "a deterministic human-readable form using the
//! same emoji-glyph convention as source code, optionally prefixed by the
//! owning package; generic variables print as their slot name within the
//! given TypeContext or as a numeric fallback when no context is
//! available."

use std::fmt::Write as _;

use crate::context::TypeContext;
use crate::interner::TypeInterner;
use crate::kind::TypeKind;
use crate::TypeId;

/// Names the owning package and a generic slot's source glyph, facts this
/// crate does not own (packages and parameter names live in `glyphc-defs`).
pub trait NameOracle {
    fn package_glyph(&self, def: glyphc_common::DefId) -> Option<String>;
    fn definition_glyph(&self, def: glyphc_common::DefId) -> String;
    fn type_generic_parameter_glyph(&self, def: glyphc_common::DefId, index: u32) -> Option<String>;
    fn function_generic_parameter_glyph(&self, function: glyphc_common::FunctionId, index: u32) -> Option<String>;
}

#[must_use]
pub fn to_string(interner: &TypeInterner, names: &dyn NameOracle, id: TypeId, ctx: &TypeContext, package: bool) -> String {
    let mut out = String::new();
    write_type(interner, names, id, ctx, package, &mut out);
    out
}

fn write_type(interner: &TypeInterner, names: &dyn NameOracle, id: TypeId, ctx: &TypeContext, package: bool, out: &mut String) {
    let data = interner.get(id);
    if data.flags.optional() {
        out.push('🍬');
    }
    if data.flags.meta() {
        out.push_str("🔮");
    }

    match &data.kind {
        TypeKind::Class(def) | TypeKind::ValueType(def) | TypeKind::Enum(def) | TypeKind::Protocol(def) | TypeKind::Extension(def) => {
            if package {
                if let Some(pkg) = names.package_glyph(*def) {
                    let _ = write!(out, "{pkg}");
                }
            }
            out.push_str(&names.definition_glyph(*def));
            if !data.generic_arguments.is_empty() {
                out.push('🐚');
                for (i, arg) in data.generic_arguments.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    write_type(interner, names, *arg, ctx, package, out);
                }
                out.push('🍆');
            }
        }
        TypeKind::MultiProtocol(members) => {
            out.push('🍱');
            for (i, member) in members.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                write_type(interner, names, *member, ctx, package, out);
            }
            out.push('🍱');
        }
        TypeKind::GenericVariable { index, constraint } => match names.type_generic_parameter_glyph(*constraint, *index) {
            Some(glyph) => out.push_str(&glyph),
            None => {
                let _ = write!(out, "🔡{index}");
            }
        },
        TypeKind::LocalGenericVariable { index, constraint } => match names.function_generic_parameter_glyph(*constraint, *index) {
            Some(glyph) => out.push_str(&glyph),
            None => {
                let _ = write!(out, "🔣{index}");
            }
        },
        TypeKind::Callable => {
            out.push('🍇');
            let params = data.callable_parameters();
            for (i, param) in params.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                write_type(interner, names, *param, ctx, package, out);
            }
            out.push('🍉');
            if let Some(ret) = data.callable_return() {
                write_type(interner, names, ret, ctx, package, out);
            }
        }
        TypeKind::Something => out.push_str("⚪️"),
        TypeKind::Someobject => out.push_str("🔵"),
        TypeKind::NoReturn => out.push_str("🙅"),
        TypeKind::Error => out.push_str("🚧"),
        TypeKind::StorageExpectation => out.push_str("❓"),
    }
}

#[cfg(test)]
#[path = "tests/display.rs"]
mod tests;
