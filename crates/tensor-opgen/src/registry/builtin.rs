use super::schema::{
  ArgType::{self, *},
  DefaultValue, Schema, SchemaArg, SchemaName,
};

fn req(name: &str, ty: ArgType) -> SchemaArg {
  SchemaArg::required(name, ty)
}

fn opt(name: &str, ty: ArgType, default: DefaultValue) -> SchemaArg {
  SchemaArg::optional(name, ty, default)
}

fn none(name: &str, ty: ArgType) -> SchemaArg {
  opt(name, ty, DefaultValue::None)
}

fn int(name: &str, value: i64) -> SchemaArg {
  opt(name, Int, DefaultValue::Int(value))
}

fn int_or_tuple(name: &str, value: i64) -> SchemaArg {
  opt(name, IntOrTuple, DefaultValue::Int(value))
}

fn double(name: &str, value: f64) -> SchemaArg {
  opt(name, Double, DefaultValue::Double(value))
}

fn flag(name: &str, value: bool) -> SchemaArg {
  opt(name, Bool, DefaultValue::Bool(value))
}

fn conv_attrs() -> [SchemaArg; 4] {
  [
    int_or_tuple("stride", 1),
    int_or_tuple("padding", 0),
    int_or_tuple("dilation", 1),
    int("groups", 1),
  ]
}

fn pool_attrs() -> [SchemaArg; 6] {
  [
    req("kernel", IntOrTuple),
    none("stride", OptionalIntOrTuple),
    int_or_tuple("padding", 0),
    int_or_tuple("dilation", 1),
    flag("ceil_mode", false),
    flag("include_pad", true),
  ]
}

/// The argument list of a built-in schema.
///
/// The match is exhaustive, so adding a [`SchemaName`] variant without a
/// definition does not compile.
pub(super) fn definition(name: SchemaName) -> Schema {
  let args: Vec<SchemaArg> = match name {
    SchemaName::Unary => vec![req("x", Tensor)],
    SchemaName::UnaryUfunc => vec![req("x", ArrayLike), none("out", OptionalArrayLike), none("where", OptionalArrayLike)],
    SchemaName::UnaryDx => vec![req("x", Tensor), req("y", Tensor), req("dy", Tensor)],
    SchemaName::Binary => vec![req("x1", Tensor), req("x2", Tensor)],
    SchemaName::BinaryUfunc => vec![
      req("x1", ArrayLike),
      req("x2", ArrayLike),
      none("out", OptionalArrayLike),
      none("where", OptionalArrayLike),
    ],
    SchemaName::Conv => [req("x", Tensor), req("w", Tensor)].into_iter().chain(conv_attrs()).collect(),
    SchemaName::ConvDxw => [
      req("x_or_w", Tensor),
      req("y", Tensor),
      req("dy", Tensor),
      req("shape", IntArray),
    ]
    .into_iter()
    .chain(conv_attrs())
    .collect(),
    SchemaName::Pool => [req("x", Tensor)].into_iter().chain(pool_attrs()).collect(),
    SchemaName::PoolDx => [req("x", Tensor), req("y", Tensor), req("dy", Tensor)]
      .into_iter()
      .chain(pool_attrs())
      .collect(),
    SchemaName::Softmax => vec![req("x", Tensor), int("axis", -1)],
    SchemaName::SoftmaxDx => vec![req("x", Tensor), req("y", Tensor), req("dy", Tensor), int("axis", -1)],
    SchemaName::BatchNorm => vec![
      req("x", Tensor),
      req("running_mean", Tensor),
      req("running_var", Tensor),
      none("w", OptionalTensor),
      none("b", OptionalTensor),
      double("momentum", 0.1),
      double("eps", 1e-5),
    ],
    SchemaName::BatchNormTrainDxwb => vec![
      req("dy", Tensor),
      req("x", Tensor),
      req("w", Tensor),
      req("b", Tensor),
      req("eps", Double),
    ],
    SchemaName::Reduce => vec![
      req("x", Tensor),
      opt("axis", IntOrTuple, DefaultValue::IntArray(Vec::new())),
      flag("keepdims", false),
    ],
    SchemaName::Loss => vec![req("y_true", Tensor), req("y_pred", Tensor)],
    SchemaName::Reshape => vec![req("x", Tensor), req("shape", IntArray), flag("reverse", false)],
    SchemaName::Transpose => vec![req("x", Tensor), none("axes", OptionalIntArray)],
    SchemaName::TransposeDx => vec![
      req("x", Tensor),
      req("y", Tensor),
      req("dy", Tensor),
      none("axes", OptionalIntArray),
    ],
    SchemaName::CollapseLike => vec![req("x", Tensor), req("shape", IntArray)],
    SchemaName::Sum => vec![req("x", Tensor), req("axis", IntOrTuple), int_or_tuple("keep", 0)],
    SchemaName::Sgd => vec![
      req("x", Tensor),
      req("dx", Tensor),
      req("v", Tensor),
      req("learning_rate", Double),
      req("mu", Double),
    ],
    SchemaName::Take => vec![req("x", Tensor), req("indices", Tensor), none("axis", OptionalInt)],
    SchemaName::ExpandDims => vec![req("x", Tensor), req("axis", Int), int("num_newaxis", 1)],
    SchemaName::SequenceMask => vec![
      req("x", Tensor),
      req("sequence_length", Tensor),
      double("mask_value", 0.0),
      int("axis", 0),
    ],
    SchemaName::BroadcastTo => vec![req("x", Tensor), req("shape", IntArray)],
    SchemaName::BroadcastToLike => vec![req("x", Tensor), req("broadcast_type", Tensor)],
    SchemaName::Concatenate => vec![req("x", TensorTuple), int("axis", 0)],
    SchemaName::Split => vec![req("x", Tensor), none("indices_or_sections", OptionalIntOrTuple), int("axis", 0)],
    SchemaName::Clip => vec![req("x", Tensor), req("a_min", Double), req("a_max", Double)],
    SchemaName::ClipDx => vec![req("x", Tensor), req("dy", Tensor), req("a_min", Double), req("a_max", Double)],
    SchemaName::ThreefryGenerate => vec![req("key", Tensor), req("shape", IntArray)],
    SchemaName::ThreefrySplit => vec![req("key", Tensor)],
  };

  Schema::new(name.to_string(), args)
}
