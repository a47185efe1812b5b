use std::path::Path;

use crate::{
  registry::{
    OPS, OpSpec, SchemaRegistry,
    loader::{load_op_table, load_schemas},
  },
  ui::SourceArgs,
};

/// Built-in schemas, with the schemas in `path` layered on top when given.
pub(crate) async fn load_registry(path: Option<&Path>) -> anyhow::Result<SchemaRegistry> {
  let registry = SchemaRegistry::builtin();
  match path {
    Some(path) => Ok(registry.merge(load_schemas(path).await?)),
    None => Ok(registry),
  }
}

/// The operator table in `path`, or the built-in table.
pub(crate) async fn load_table(path: Option<&Path>) -> anyhow::Result<Vec<OpSpec>> {
  match path {
    Some(path) => Ok(load_op_table(path).await?),
    None => Ok(OPS.iter().map(OpSpec::from).collect()),
  }
}

impl SourceArgs {
  /// Human-readable origin of the operator table.
  pub(crate) fn describe(&self) -> String {
    match &self.ops {
      Some(path) => path.display().to_string(),
      None => "<builtin>".to_string(),
    }
  }
}
