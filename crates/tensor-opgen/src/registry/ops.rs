use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::schema::{Schema, SchemaName};

/// Namespace prefixed to operator names in registration code.
pub const DEFAULT_NAMESPACE: &str = "mnm.op";

/// A row of the built-in operator table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpDecl {
  pub name: &'static str,
  pub schema: SchemaName,
}

const fn op(name: &'static str, schema: SchemaName) -> OpDecl {
  OpDecl { name, schema }
}

/// The built-in operator table, in registration order.
pub static OPS: &[OpDecl] = &[
  op("atan", SchemaName::Unary),
  op("conv2d", SchemaName::Conv),
  op("max_pool2d", SchemaName::Pool),
  op("avg_pool2d", SchemaName::Pool),
  op("softmax", SchemaName::Softmax),
  op("log_softmax", SchemaName::Softmax),
  op("batch_norm_train", SchemaName::BatchNorm),
  op("batch_norm_infer", SchemaName::BatchNorm),
  op("batch_norm_train_dxwb", SchemaName::BatchNormTrainDxwb),
  op("conv2d_dx", SchemaName::ConvDxw),
  op("conv2d_dw", SchemaName::ConvDxw),
  op("max_pool2d_dx", SchemaName::PoolDx),
  op("avg_pool2d_dx", SchemaName::PoolDx),
  op("softmax_dx", SchemaName::SoftmaxDx),
  op("log_softmax_dx", SchemaName::SoftmaxDx),
  op("batch_flatten", SchemaName::Unary),
  op("negative", SchemaName::UnaryUfunc),
  op("logical_not", SchemaName::UnaryUfunc),
  op("relu", SchemaName::Unary),
  op("tanh", SchemaName::Unary),
  op("copy", SchemaName::Unary),
  op("abs", SchemaName::Unary),
  op("all", SchemaName::Reduce),
  op("any", SchemaName::Reduce),
  op("ceil", SchemaName::Unary),
  op("cos", SchemaName::Unary),
  op("floor", SchemaName::Unary),
  op("log", SchemaName::Unary),
  op("sigmoid", SchemaName::Unary),
  op("erf", SchemaName::Unary),
  op("sqrt", SchemaName::Unary),
  op("relu_dx", SchemaName::UnaryDx),
  op("tanh_dx", SchemaName::UnaryDx),
  op("sigmoid_dx", SchemaName::UnaryDx),
  op("erf_dx", SchemaName::UnaryDx),
  op("sqrt_dx", SchemaName::UnaryDx),
  op("add", SchemaName::BinaryUfunc),
  op("subtract", SchemaName::BinaryUfunc),
  op("multiply", SchemaName::BinaryUfunc),
  op("divide", SchemaName::BinaryUfunc),
  op("mod", SchemaName::BinaryUfunc),
  op("less", SchemaName::BinaryUfunc),
  op("greater", SchemaName::BinaryUfunc),
  op("less_equal", SchemaName::BinaryUfunc),
  op("greater_equal", SchemaName::BinaryUfunc),
  op("equal", SchemaName::BinaryUfunc),
  op("not_equal", SchemaName::BinaryUfunc),
  op("maximum", SchemaName::BinaryUfunc),
  op("minimum", SchemaName::BinaryUfunc),
  op("matmul", SchemaName::Binary),
  op("matmul_nt", SchemaName::Binary),
  op("matmul_tn", SchemaName::Binary),
  op("matmul_tt", SchemaName::Binary),
  op("batch_matmul", SchemaName::Binary),
  op("nll_loss", SchemaName::Loss),
  op("nll_loss_dpred", SchemaName::Loss),
  op("nll_loss_dtrue", SchemaName::Loss),
  op("reshape", SchemaName::Reshape),
  op("transpose", SchemaName::Transpose),
  op("transpose_dx", SchemaName::TransposeDx),
  op("collapse_sum_like", SchemaName::CollapseLike),
  op("sum", SchemaName::Sum),
  op("argmax", SchemaName::Reduce),
  op("argmin", SchemaName::Reduce),
  op("get_reduce_axis", SchemaName::Binary),
  op("get_kept_dims", SchemaName::Binary),
  op("sgd", SchemaName::Sgd),
  op("shape", SchemaName::Unary),
  op("take", SchemaName::Take),
  op("expand_dims", SchemaName::ExpandDims),
  op("sequence_mask", SchemaName::SequenceMask),
  op("broadcast_to", SchemaName::BroadcastTo),
  op("broadcast_to_like", SchemaName::BroadcastToLike),
  op("concatenate", SchemaName::Concatenate),
  op("split", SchemaName::Split),
  op("concatenate_dx", SchemaName::Concatenate),
  op("clip", SchemaName::Clip),
  op("clip_dx", SchemaName::ClipDx),
  op("threefry_generate", SchemaName::ThreefryGenerate),
  op("threefry_split", SchemaName::ThreefrySplit),
];

/// An unresolved operator row with a string schema reference.
///
/// This is the shape of user-supplied tables; the built-in [`OPS`] rows
/// convert into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpSpec {
  pub name: String,
  pub schema_name: String,
}

impl OpSpec {
  pub fn new(name: impl Into<String>, schema_name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      schema_name: schema_name.into(),
    }
  }
}

impl From<OpDecl> for OpSpec {
  fn from(decl: OpDecl) -> Self {
    Self::new(decl.name, decl.schema.to_string())
  }
}

impl From<&OpDecl> for OpSpec {
  fn from(decl: &OpDecl) -> Self {
    Self::from(*decl)
  }
}

/// An operator with its schema attached.
#[derive(Debug, Clone)]
pub struct Op {
  pub name: String,
  pub schema_name: String,
  pub schema: Arc<Schema>,
}

impl Op {
  /// The operator name under `namespace`, e.g. `mnm.op.conv2d`.
  pub fn qualified_name(&self, namespace: &str) -> String {
    if namespace.is_empty() {
      self.name.clone()
    } else {
      format!("{namespace}.{}", self.name)
    }
  }
}
