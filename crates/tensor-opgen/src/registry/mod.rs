//! Operator table and schema registry.
//!
//! [`OPS`] pairs every built-in operator with the name of the schema that
//! describes its arguments. [`OpResolver`] attaches the schema objects from a
//! [`SchemaRegistry`] to each row, producing the name-keyed map that the code
//! generator consumes.

mod builtin;
pub mod error;
pub mod loader;
pub mod ops;
pub mod resolver;
pub mod schema;

pub use error::RegistryError;
pub use ops::{DEFAULT_NAMESPACE, OPS, Op, OpDecl, OpSpec};
pub use resolver::{OpFilter, OpResolver, ResolvedOps, by_name};
pub use schema::{ArgType, DefaultValue, Schema, SchemaArg, SchemaName, SchemaRegistry};
