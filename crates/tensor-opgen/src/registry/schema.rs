use std::sync::Arc;

use indexmap::IndexMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumCount, EnumIter, EnumString, IntoEnumIterator};

use super::{builtin, error::RegistryError};

/// Closed set of schema names shipped with the generator.
///
/// Each variant has exactly one definition in [`builtin::definition`], so the
/// built-in operator table cannot reference a schema that does not exist.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, EnumCount, AsRefStr, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SchemaName {
  Unary,
  UnaryUfunc,
  UnaryDx,
  Binary,
  BinaryUfunc,
  Conv,
  ConvDxw,
  Pool,
  PoolDx,
  Softmax,
  SoftmaxDx,
  BatchNorm,
  BatchNormTrainDxwb,
  Reduce,
  Loss,
  Reshape,
  Transpose,
  TransposeDx,
  CollapseLike,
  Sum,
  Sgd,
  Take,
  ExpandDims,
  SequenceMask,
  BroadcastTo,
  BroadcastToLike,
  Concatenate,
  Split,
  Clip,
  ClipDx,
  ThreefryGenerate,
  ThreefrySplit,
}

/// The value kind accepted by a single schema argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ArgType {
  Tensor,
  OptionalTensor,
  TensorTuple,
  ArrayLike,
  OptionalArrayLike,
  Int,
  OptionalInt,
  IntOrTuple,
  OptionalIntOrTuple,
  IntArray,
  OptionalIntArray,
  Double,
  Bool,
  Str,
}

impl ArgType {
  pub const fn is_optional(self) -> bool {
    matches!(
      self,
      Self::OptionalTensor | Self::OptionalArrayLike | Self::OptionalInt | Self::OptionalIntOrTuple | Self::OptionalIntArray
    )
  }

  pub const fn is_tensor(self) -> bool {
    matches!(
      self,
      Self::Tensor | Self::OptionalTensor | Self::TensorTuple | Self::ArrayLike | Self::OptionalArrayLike
    )
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
  None,
  Bool(bool),
  Int(i64),
  Double(f64),
  Str(String),
  IntArray(Vec<i64>),
}

impl std::fmt::Display for DefaultValue {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::None => write!(f, "None"),
      Self::Bool(value) => write!(f, "{value}"),
      Self::Int(value) => write!(f, "{value}"),
      Self::Double(value) => write!(f, "{value:?}"),
      Self::Str(value) => write!(f, "{value:?}"),
      Self::IntArray(values) => {
        write!(f, "({})", values.iter().join(", "))
      }
    }
  }
}

/// One argument or attribute slot of a schema.
///
/// An argument without a default is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaArg {
  pub name: String,
  #[serde(rename = "type")]
  pub ty: ArgType,
  #[serde(
    default,
    deserialize_with = "deserialize_present_default",
    skip_serializing_if = "Option::is_none"
  )]
  pub default: Option<DefaultValue>,
}

/// A present `"default": null` means "defaults to None", not "required".
fn deserialize_present_default<'de, D>(deserializer: D) -> Result<Option<DefaultValue>, D::Error>
where
  D: serde::Deserializer<'de>,
{
  DefaultValue::deserialize(deserializer).map(Some)
}

impl SchemaArg {
  pub fn required(name: impl Into<String>, ty: ArgType) -> Self {
    Self {
      name: name.into(),
      ty,
      default: None,
    }
  }

  pub fn optional(name: impl Into<String>, ty: ArgType, default: DefaultValue) -> Self {
    Self {
      name: name.into(),
      ty,
      default: Some(default),
    }
  }

  pub const fn is_required(&self) -> bool {
    self.default.is_none()
  }
}

/// Argument template shared by a family of operators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
  pub name: String,
  #[serde(default)]
  pub args: Vec<SchemaArg>,
}

impl Schema {
  pub fn new(name: impl Into<String>, args: Vec<SchemaArg>) -> Self {
    Self {
      name: name.into(),
      args,
    }
  }

  pub fn required_args(&self) -> impl Iterator<Item = &SchemaArg> {
    self.args.iter().filter(|arg| arg.is_required())
  }

  pub fn num_required(&self) -> usize {
    self.required_args().count()
  }

  /// Checks that no required argument follows an argument with a default.
  fn validate(&self) -> Result<(), RegistryError> {
    let mut seen_optional: Option<&str> = None;
    for arg in &self.args {
      match (arg.is_required(), seen_optional) {
        (true, Some(optional)) => {
          return Err(RegistryError::InvalidSchema {
            schema_name: self.name.clone(),
            message: format!("required argument '{}' follows optional argument '{optional}'", arg.name),
          });
        }
        (false, _) => seen_optional = Some(arg.name.as_str()),
        (true, None) => {}
      }
    }
    Ok(())
  }
}

/// Immutable mapping from schema name to schema.
///
/// Schemas are held behind [`Arc`] so resolved operators share them instead of
/// owning copies.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
  schemas: IndexMap<String, Arc<Schema>>,
}

impl SchemaRegistry {
  /// Registry of every [`SchemaName`], in declaration order.
  #[must_use]
  pub fn builtin() -> Self {
    let schemas = SchemaName::iter()
      .map(|name| (name.to_string(), Arc::new(builtin::definition(name))))
      .collect();
    Self { schemas }
  }

  /// Builds a registry from arbitrary schemas.
  ///
  /// Fails on duplicate names and on schemas with a required argument after
  /// an optional one.
  pub fn from_schemas<I>(schemas: I) -> Result<Self, RegistryError>
  where
    I: IntoIterator<Item = Schema>,
  {
    let mut registry = Self::default();
    for schema in schemas {
      schema.validate()?;
      if registry.schemas.contains_key(&schema.name) {
        return Err(RegistryError::DuplicateSchema {
          schema_name: schema.name,
        });
      }
      registry.schemas.insert(schema.name.clone(), Arc::new(schema));
    }
    Ok(registry)
  }

  /// Returns a registry with `other`'s schemas layered over this one.
  ///
  /// Entries of `other` replace same-named entries; new names are appended.
  #[must_use]
  pub fn merge(mut self, other: Self) -> Self {
    for (name, schema) in other.schemas {
      self.schemas.insert(name, schema);
    }
    self
  }

  pub fn schemas_by_name(&self) -> &IndexMap<String, Arc<Schema>> {
    &self.schemas
  }

  pub fn get<S>(&self, name: S) -> Option<&Arc<Schema>>
  where
    S: AsRef<str>,
  {
    self.schemas.get(name.as_ref())
  }

  pub fn contains<S>(&self, name: S) -> bool
  where
    S: AsRef<str>,
  {
    self.schemas.contains_key(name.as_ref())
  }

  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.schemas.keys().map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.schemas.len()
  }

  pub fn is_empty(&self) -> bool {
    self.schemas.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use std::str::FromStr;

  use super::*;

  #[test]
  fn test_schema_name_round_trip() {
    for name in SchemaName::iter() {
      let text = name.to_string();
      assert_eq!(SchemaName::from_str(&text).unwrap(), name, "failed for {text}");
      assert_eq!(name.as_ref(), text);
    }
    assert_eq!(SchemaName::BatchNormTrainDxwb.to_string(), "batch_norm_train_dxwb");
    assert_eq!(SchemaName::ConvDxw.to_string(), "conv_dxw");
    assert!(SchemaName::from_str("nonexistent").is_err());
  }

  #[test]
  fn test_builtin_registry_covers_every_name() {
    let registry = SchemaRegistry::builtin();
    assert_eq!(registry.len(), SchemaName::iter().count());
    for name in SchemaName::iter() {
      let schema = registry.get(name).expect("builtin schema missing");
      assert_eq!(schema.name, name.to_string());
    }
  }

  #[test]
  fn test_builtin_schemas_are_well_formed() {
    for schema in SchemaRegistry::builtin().schemas_by_name().values() {
      assert!(schema.validate().is_ok(), "{} is malformed", schema.name);
      assert!(!schema.args.is_empty(), "{} has no arguments", schema.name);
    }
  }

  #[test]
  fn test_from_schemas_rejects_duplicates() {
    let result = SchemaRegistry::from_schemas([
      Schema::new("unary", vec![SchemaArg::required("x", ArgType::Tensor)]),
      Schema::new("unary", vec![SchemaArg::required("y", ArgType::Tensor)]),
    ]);
    assert!(matches!(
      result,
      Err(RegistryError::DuplicateSchema { ref schema_name }) if schema_name == "unary"
    ));
  }

  #[test]
  fn test_from_schemas_rejects_required_after_optional() {
    let result = SchemaRegistry::from_schemas([Schema::new(
      "bad",
      vec![
        SchemaArg::optional("axis", ArgType::Int, DefaultValue::Int(0)),
        SchemaArg::required("x", ArgType::Tensor),
      ],
    )]);
    let err = result.unwrap_err();
    assert!(matches!(err, RegistryError::InvalidSchema { .. }));
    assert!(err.to_string().contains("required argument 'x' follows optional argument 'axis'"));
  }

  #[test]
  fn test_merge_replaces_and_appends() {
    let custom = SchemaRegistry::from_schemas([
      Schema::new("unary", vec![SchemaArg::required("data", ArgType::Tensor)]),
      Schema::new("gelu", vec![SchemaArg::required("x", ArgType::Tensor)]),
    ])
    .unwrap();

    let merged = SchemaRegistry::builtin().merge(custom);
    assert_eq!(merged.len(), SchemaName::iter().count() + 1);
    assert_eq!(merged.get("unary").unwrap().args[0].name, "data");
    assert_eq!(merged.names().last(), Some("gelu"));
  }

  #[test]
  fn test_default_value_display() {
    assert_eq!(DefaultValue::None.to_string(), "None");
    assert_eq!(DefaultValue::Int(-1).to_string(), "-1");
    assert_eq!(DefaultValue::Double(1e-5).to_string(), "1e-5");
    assert_eq!(DefaultValue::Double(0.1).to_string(), "0.1");
    assert_eq!(DefaultValue::Bool(true).to_string(), "true");
    assert_eq!(DefaultValue::IntArray(vec![1, 2]).to_string(), "(1, 2)");
    assert_eq!(DefaultValue::IntArray(vec![]).to_string(), "()");
  }

  #[test]
  fn test_schema_deserialize() {
    let json = r#"{
      "name": "gelu",
      "args": [
        { "name": "x", "type": "tensor" },
        { "name": "approximate", "type": "bool", "default": false },
        { "name": "axis", "type": "int_or_tuple", "default": [0, 1] }
      ]
    }"#;
    let schema: Schema = serde_json::from_str(json).unwrap();
    assert_eq!(schema.num_required(), 1);
    assert_eq!(schema.args[1].default, Some(DefaultValue::Bool(false)));
    assert_eq!(schema.args[2].ty, ArgType::IntOrTuple);
    assert_eq!(schema.args[2].default, Some(DefaultValue::IntArray(vec![0, 1])));
  }

  #[test]
  fn test_arg_type_classes() {
    assert!(ArgType::OptionalIntArray.is_optional());
    assert!(!ArgType::IntOrTuple.is_optional());
    assert!(ArgType::TensorTuple.is_tensor());
    assert!(ArgType::OptionalArrayLike.is_tensor());
    assert!(!ArgType::Double.is_tensor());
  }

  #[test]
  fn test_null_default_is_optional() {
    let json = r#"{ "name": "out", "type": "optional_array_like", "default": null }"#;
    let arg: SchemaArg = serde_json::from_str(json).unwrap();
    assert!(!arg.is_required());
    assert_eq!(arg.default, Some(DefaultValue::None));

    let json = r#"{ "name": "x", "type": "tensor" }"#;
    let arg: SchemaArg = serde_json::from_str(json).unwrap();
    assert!(arg.is_required());
  }
}
