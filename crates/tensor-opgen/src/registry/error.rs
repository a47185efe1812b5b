use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
  #[error("operator '{op}' references unknown schema '{schema_name}'")]
  UnresolvedSchema { op: String, schema_name: String },
  #[error("schema '{schema_name}' is defined more than once")]
  DuplicateSchema { schema_name: String },
  #[error("schema '{schema_name}' is invalid: {message}")]
  InvalidSchema { schema_name: String, message: String },
  #[error("failed to read {}: {source}", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
  #[error("failed to parse {}: {source}", path.display())]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_path_to_error::Error<serde_json::Error>,
  },
}
