//! Definition entities: classes, protocols, value types, enums, extensions,
//! functions, and the packages that own them. Provides the oracles C1–C4
//! in `glyphc-types` need without that crate depending back on this one.

pub mod attributes;
pub use attributes::{Attribute, AttributeSet};

pub mod package;
pub use package::{Package, PackageTable, DEFAULT_NAMESPACE_GLYPH};

pub mod definition;
pub use definition::{Definition, DefinitionKind, DefinitionTable};

pub mod function;
pub use function::{AccessLevel, Argument, Function, FunctionTable, VtiProvider, VtiProviderId, VtiProviderTable};

pub mod oracles;
pub use oracles::DefinitionContext;
