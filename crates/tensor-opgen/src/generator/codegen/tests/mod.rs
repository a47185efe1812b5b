mod args;

use strum::EnumCount;

use crate::{
  generator::{
    codegen::{CodegenConfig, ModuleModel, Visibility, format_tokens, generate},
    metrics::{GenerationStats, GenerationWarning},
  },
  registry::{ArgType, OPS, OpResolver, OpSpec, ResolvedOps, Schema, SchemaArg, SchemaName, SchemaRegistry},
};

fn resolve_builtin(names: &[&str]) -> (SchemaRegistry, ResolvedOps) {
  let registry = SchemaRegistry::builtin();
  let table: Vec<OpSpec> = OPS
    .iter()
    .filter(|decl| names.is_empty() || names.contains(&decl.name))
    .map(OpSpec::from)
    .collect();
  let resolved = OpResolver::new(&registry).resolve(table).unwrap();
  (registry, resolved)
}

fn render(registry: &SchemaRegistry, resolved: &ResolvedOps, config: &CodegenConfig) -> (String, GenerationStats) {
  let mut stats = GenerationStats::default();
  let tokens = generate(resolved, registry, config, &mut stats);
  let code = format_tokens(tokens).expect("generated code should parse");
  (code, stats)
}

#[test]
fn test_builtin_table_generates_valid_module() {
  let (registry, resolved) = resolve_builtin(&[]);
  let (code, stats) = render(&registry, &resolved, &CodegenConfig::default());

  assert!(code.contains("pub const NAMESPACE: &str = \"mnm.op\";"));
  assert!(code.contains("pub enum Op {"));
  assert!(code.contains("pub enum OpArgs {"));
  assert!(code.contains("pub struct ConvArgs {"));
  assert!(code.contains("pub struct BatchNormTrainDxwbArgs {"));
  assert!(code.contains("Self::Conv2d => \"mnm.op.conv2d\""));
  assert!(code.contains("\"threefry_split\" => Some(Self::ThreefrySplit)"));

  assert_eq!(stats.schemas_generated, SchemaName::COUNT);
  assert_eq!(stats.schemas_unused, 0);
  assert!(stats.warnings.is_empty(), "{:?}", stats.warnings);
}

#[test]
fn test_unused_schemas_are_skipped() {
  let (registry, resolved) = resolve_builtin(&["relu", "tanh"]);
  let (code, stats) = render(&registry, &resolved, &CodegenConfig::default());

  assert!(code.contains("pub struct UnaryArgs {"));
  assert!(!code.contains("ConvArgs"));
  assert_eq!(stats.schemas_generated, 1);
  assert_eq!(stats.fields_generated, 1);
  assert_eq!(stats.schemas_unused, registry.len() - 1);
  assert!(stats.warnings.iter().all(|warning| !warning.is_significant()));
}

#[test]
fn test_visibility_and_tensor_type() {
  let (registry, resolved) = resolve_builtin(&["concatenate", "batch_norm_infer"]);
  let config = CodegenConfig {
    visibility: Visibility::Crate,
    namespace: "raf.op".to_string(),
    tensor_type: syn::parse_quote!(my_runtime::TensorValue),
  };
  let (code, _) = render(&registry, &resolved, &config);

  assert!(code.contains("pub(crate) enum Op {"));
  assert!(code.contains("pub(crate) x: Vec<my_runtime::TensorValue>"));
  assert!(code.contains("pub(crate) w: Option<my_runtime::TensorValue>"));
  assert!(code.contains("\"raf.op.concatenate\""));
  assert!(!code.contains("pub struct"));
}

#[test]
fn test_file_visibility_emits_private_items() {
  let (registry, resolved) = resolve_builtin(&["relu"]);
  let config = CodegenConfig {
    visibility: Visibility::File,
    ..CodegenConfig::default()
  };
  let (code, _) = render(&registry, &resolved, &config);

  assert!(code.contains("\nenum Op {"));
  assert!(!code.contains("pub "));
}

#[test]
fn test_empty_table_generates_valid_module() {
  let registry = SchemaRegistry::builtin();
  let resolved = OpResolver::new(&registry).resolve(Vec::<OpSpec>::new()).unwrap();
  let (code, stats) = render(&registry, &resolved, &CodegenConfig::default());

  assert!(code.contains("pub enum Op {}"));
  assert!(code.contains("const ALL: &'static [Op] = &[];"));
  assert_eq!(stats.schemas_generated, 0);
  assert_eq!(stats.schemas_unused, registry.len());
}

#[test]
fn test_identifier_collisions_are_renamed() {
  let registry = SchemaRegistry::from_schemas([Schema::new(
    "elementwise",
    vec![
      SchemaArg::required("x-in", ArgType::Tensor),
      SchemaArg::required("x_in", ArgType::Tensor),
    ],
  )])
  .unwrap();
  let table = vec![
    OpSpec::new("foo-bar", "elementwise"),
    OpSpec::new("foo_bar", "elementwise"),
  ];
  let resolved = OpResolver::new(&registry).resolve(table).unwrap();

  let mut stats = GenerationStats::default();
  let model = ModuleModel::build(&resolved, &registry, "", &mut stats);
  let variants: Vec<_> = model.ops.iter().map(|op| op.variant.to_string()).collect();
  assert_eq!(variants, ["FooBar", "FooBar2"]);
  let fields: Vec<_> = model.schemas[0].fields.iter().map(|f| f.ident.to_string()).collect();
  assert_eq!(fields, ["x_in", "x_in2"]);

  assert_eq!(
    stats.warnings,
    vec![
      GenerationWarning::IdentifierCollision {
        name: "x_in".to_string(),
        original: "x_in".to_string(),
        renamed: "x_in2".to_string(),
      },
      GenerationWarning::IdentifierCollision {
        name: "foo_bar".to_string(),
        original: "FooBar".to_string(),
        renamed: "FooBar2".to_string(),
      },
    ]
  );

  let (code, _) = render(&registry, &resolved, &CodegenConfig::default());
  assert!(code.contains("\"foo_bar\" => Some(Self::FooBar2)"));
}

#[test]
fn test_args_struct_avoids_module_items() {
  let registry = SchemaRegistry::from_schemas([Schema::new("op", vec![SchemaArg::required("x", ArgType::Tensor)])]).unwrap();
  let resolved = OpResolver::new(&registry).resolve([OpSpec::new("identity", "op")]).unwrap();
  let (code, stats) = render(&registry, &resolved, &CodegenConfig::default());

  assert!(code.contains("pub struct OpArgs2 {"));
  assert!(code.contains("Op(OpArgs2)"));
  assert!(stats.warnings.iter().any(|warning| warning.is_significant()));
}
