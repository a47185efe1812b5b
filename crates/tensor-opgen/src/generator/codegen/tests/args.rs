use quote::quote;

use crate::{
  generator::codegen::{CodegenConfig, args::rust_type, format_tokens, generate},
  generator::metrics::GenerationStats,
  registry::{ArgType, OpResolver, OpSpec, SchemaRegistry},
};

fn tensor() -> syn::Type {
  syn::parse_quote!(crate::Tensor)
}

#[test]
fn test_rust_type_mapping() {
  let cases = [
    (ArgType::Tensor, quote! { crate::Tensor }),
    (ArgType::ArrayLike, quote! { crate::Tensor }),
    (ArgType::OptionalTensor, quote! { Option<crate::Tensor> }),
    (ArgType::TensorTuple, quote! { Vec<crate::Tensor> }),
    (ArgType::Int, quote! { i64 }),
    (ArgType::OptionalInt, quote! { Option<i64> }),
    (ArgType::IntOrTuple, quote! { Vec<i64> }),
    (ArgType::OptionalIntArray, quote! { Option<Vec<i64>> }),
    (ArgType::Double, quote! { f64 }),
    (ArgType::Bool, quote! { bool }),
    (ArgType::Str, quote! { String }),
  ];

  for (ty, expected) in cases {
    assert_eq!(rust_type(ty, &tensor()).to_string(), expected.to_string(), "failed for {ty}");
  }
}

fn render_schema_of(op: &str, schema: &str) -> String {
  let registry = SchemaRegistry::builtin();
  let resolved = OpResolver::new(&registry).resolve([OpSpec::new(op, schema)]).unwrap();
  let mut stats = GenerationStats::default();
  format_tokens(generate(&resolved, &registry, &CodegenConfig::default(), &mut stats)).unwrap()
}

#[test]
fn test_args_struct_fields_and_docs() {
  let code = render_schema_of("max_pool2d", "pool");

  assert!(code.contains("/// Arguments of the `pool` schema."));
  assert!(code.contains("pub struct PoolArgs {"));
  assert!(code.contains("/// `kernel` (int_or_tuple), required."));
  assert!(code.contains("pub kernel: Vec<i64>,"));
  assert!(code.contains("/// `stride` (optional_int_or_tuple), defaults to `None`."));
  assert!(code.contains("pub stride: Option<Vec<i64>>,"));
  assert!(code.contains("/// `include_pad` (bool), defaults to `true`."));
  assert!(code.contains("pub include_pad: bool,"));
}

#[test]
fn test_keyword_argument_names_are_raw() {
  let code = render_schema_of("add", "binary_ufunc");

  assert!(code.contains("pub r#where: Option<crate::Tensor>,"));
  assert!(code.contains("pub out: Option<crate::Tensor>,"));
}

#[test]
fn test_op_args_enum_wraps_structs() {
  let code = render_schema_of("batch_norm_infer", "batch_norm");

  assert!(code.contains("BatchNorm(BatchNormArgs)"));
  assert!(code.contains("Self::BatchNorm(_) => \"batch_norm\""));
  assert!(code.contains("/// `eps` (double), defaults to `1e-5`."));
}
