use std::path::Path;

use serde::de::DeserializeOwned;

use super::{
  error::RegistryError,
  ops::OpSpec,
  schema::{Schema, SchemaRegistry},
};

async fn read_json<T>(path: &Path) -> Result<T, RegistryError>
where
  T: DeserializeOwned,
{
  let content = tokio::fs::read(path).await.map_err(|source| RegistryError::Io {
    path: path.to_path_buf(),
    source,
  })?;

  let deserializer = &mut serde_json::Deserializer::from_slice(&content);
  serde_path_to_error::deserialize(deserializer).map_err(|source| RegistryError::Parse {
    path: path.to_path_buf(),
    source,
  })
}

/// Reads an operator table: a JSON array of `{ "name", "schema_name" }`.
pub async fn load_op_table(path: &Path) -> Result<Vec<OpSpec>, RegistryError> {
  read_json(path).await
}

/// Reads a JSON array of schemas into a registry.
pub async fn load_schemas(path: &Path) -> Result<SchemaRegistry, RegistryError> {
  let schemas: Vec<Schema> = read_json(path).await?;
  SchemaRegistry::from_schemas(schemas)
}
