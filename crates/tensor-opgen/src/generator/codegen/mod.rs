use std::collections::BTreeSet;

use proc_macro2::{Ident, TokenStream};
use quote::{ToTokens, quote};

use super::metrics::{GenerationStats, GenerationWarning};
use crate::{
  naming::{ensure_unique, ident, to_rust_field_name, to_rust_type_name},
  registry::{ArgType, DEFAULT_NAMESPACE, DefaultValue, ResolvedOps, SchemaRegistry},
};

pub mod args;
pub mod dispatch;

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
  #[default]
  Public,
  Crate,
  File,
}

impl Visibility {
  pub fn parse(s: &str) -> Option<Self> {
    match s {
      "public" => Some(Visibility::Public),
      "crate" => Some(Visibility::Crate),
      "file" => Some(Visibility::File),
      _ => None,
    }
  }

  pub(crate) fn to_tokens(self) -> TokenStream {
    match self {
      Visibility::Public => quote! { pub },
      Visibility::Crate => quote! { pub(crate) },
      Visibility::File => quote! {},
    }
  }
}

/// Options that shape the emitted registration module.
#[derive(Debug, Clone)]
pub struct CodegenConfig {
  pub visibility: Visibility,
  /// Prefix for qualified operator names (`mnm.op` → `mnm.op.relu`).
  pub namespace: String,
  /// Type used for tensor-valued arguments.
  pub tensor_type: syn::Type,
}

impl Default for CodegenConfig {
  fn default() -> Self {
    Self {
      visibility: Visibility::default(),
      namespace: DEFAULT_NAMESPACE.to_string(),
      tensor_type: syn::parse_quote!(crate::Tensor),
    }
  }
}

#[derive(Debug, Clone)]
pub(crate) struct FieldModel {
  pub ident: Ident,
  pub arg_name: String,
  pub ty: ArgType,
  pub default: Option<DefaultValue>,
}

#[derive(Debug, Clone)]
pub(crate) struct SchemaModel {
  pub name: String,
  pub variant: Ident,
  pub struct_ident: Ident,
  pub fields: Vec<FieldModel>,
}

#[derive(Debug, Clone)]
pub(crate) struct OpModel {
  pub name: String,
  pub qualified_name: String,
  pub variant: Ident,
  pub schema_name: String,
  pub schema_variant: Ident,
  pub num_args: usize,
  pub num_required_args: usize,
}

/// Identifier-level view of a resolved operator set.
#[derive(Debug, Clone, Default)]
pub(crate) struct ModuleModel {
  pub ops: Vec<OpModel>,
  pub schemas: Vec<SchemaModel>,
}

/// Assigns unique identifiers within one namespace (enum variants or types).
#[derive(Default)]
struct IdentAllocator {
  used: BTreeSet<String>,
}

impl IdentAllocator {
  fn with_reserved(names: &[&str]) -> Self {
    Self {
      used: names.iter().map(ToString::to_string).collect(),
    }
  }

  fn allocate(&mut self, name: &str, base: String, stats: &mut GenerationStats) -> Ident {
    let unique = ensure_unique(&base, &self.used);
    if unique != base {
      stats.record_warning(GenerationWarning::IdentifierCollision {
        name: name.to_string(),
        original: base,
        renamed: unique.clone(),
      });
    }
    self.used.insert(unique.clone());
    ident(&unique)
  }
}

impl ModuleModel {
  /// Builds identifiers for every referenced schema and every operator.
  ///
  /// Registry schemas that no operator references are skipped and recorded
  /// as unused.
  pub(crate) fn build(
    resolved: &ResolvedOps,
    registry: &SchemaRegistry,
    namespace: &str,
    stats: &mut GenerationStats,
  ) -> Self {
    let referenced = resolved.referenced_schemas();
    let referenced_names: BTreeSet<&str> = referenced.iter().map(|schema| schema.name.as_str()).collect();

    for name in registry.names().filter(|name| !referenced_names.contains(name)) {
      stats.record_unused_schema(name);
    }

    let mut schema_variants = IdentAllocator::default();
    // Args structs share the module namespace with the emitted enums.
    let mut struct_idents = IdentAllocator::with_reserved(&["Op", "OpArgs"]);
    let schemas: Vec<SchemaModel> = referenced
      .into_iter()
      .map(|schema| {
        let type_name = to_rust_type_name(&schema.name);
        let variant = schema_variants.allocate(&schema.name, type_name.clone(), stats);
        let struct_ident = struct_idents.allocate(&schema.name, format!("{type_name}Args"), stats);

        let mut field_idents = IdentAllocator::default();
        let fields: Vec<FieldModel> = schema
          .args
          .iter()
          .map(|arg| FieldModel {
            ident: field_idents.allocate(&arg.name, to_rust_field_name(&arg.name), stats),
            arg_name: arg.name.clone(),
            ty: arg.ty,
            default: arg.default.clone(),
          })
          .collect();
        stats.record_schema(fields.len());

        SchemaModel {
          name: schema.name.clone(),
          variant,
          struct_ident,
          fields,
        }
      })
      .collect();

    let mut op_variants = IdentAllocator::default();
    let ops = resolved
      .iter()
      .map(|op| {
        let schema_variant = schemas
          .iter()
          .find(|schema| schema.name == op.schema_name)
          .map(|schema| schema.variant.clone())
          .unwrap_or_else(|| ident(&to_rust_type_name(&op.schema_name)));

        OpModel {
          name: op.name.clone(),
          qualified_name: op.qualified_name(namespace),
          variant: op_variants.allocate(&op.name, to_rust_type_name(&op.name), stats),
          schema_name: op.schema_name.clone(),
          schema_variant,
          num_args: op.schema.args.len(),
          num_required_args: op.schema.num_required(),
        }
      })
      .collect();

    Self { ops, schemas }
  }
}

/// Lints the generated module opts out of.
struct ModuleLints;

impl ToTokens for ModuleLints {
  fn to_tokens(&self, tokens: &mut TokenStream) {
    tokens.extend(quote! {
      #![allow(clippy::enum_variant_names)]
      #![allow(clippy::too_many_lines)]
      #![allow(clippy::match_same_arms)]
      #![allow(dead_code)]
    });
  }
}

/// Emits the registration module for `resolved`.
pub(crate) fn generate(
  resolved: &ResolvedOps,
  registry: &SchemaRegistry,
  config: &CodegenConfig,
  stats: &mut GenerationStats,
) -> TokenStream {
  let model = ModuleModel::build(resolved, registry, &config.namespace, stats);

  let lints = ModuleLints;
  let vis = config.visibility.to_tokens();
  let namespace = &config.namespace;
  let args_structs = model
    .schemas
    .iter()
    .map(|schema| args::ArgsStructFragment::new(schema, &config.tensor_type, config.visibility));
  let op_args = args::OpArgsEnumFragment::new(&model.schemas, config.visibility);
  let op_enum = dispatch::OpEnumFragment::new(&model.ops, config.visibility);

  quote! {
    #lints

    /// Namespace prefixed to every qualified operator name.
    #vis const NAMESPACE: &str = #namespace;

    #op_enum

    #op_args

    #(#args_structs)*
  }
}

/// Parses and pretty-prints generated tokens.
pub(crate) fn format_tokens(tokens: TokenStream) -> anyhow::Result<String> {
  let syntax_tree = syn::parse2::<syn::File>(tokens)?;
  Ok(prettyplease::unparse(&syntax_tree))
}
