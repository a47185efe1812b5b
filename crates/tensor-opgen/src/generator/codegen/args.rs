use proc_macro2::TokenStream;
use quote::{ToTokens, quote};

use super::{FieldModel, SchemaModel, Visibility};
use crate::registry::ArgType;

/// Rust type for an argument of kind `ty`, with tensors spelled as `tensor`.
pub(crate) fn rust_type(ty: ArgType, tensor: &syn::Type) -> TokenStream {
  match ty {
    ArgType::Tensor | ArgType::ArrayLike => quote! { #tensor },
    ArgType::OptionalTensor | ArgType::OptionalArrayLike => quote! { Option<#tensor> },
    ArgType::TensorTuple => quote! { Vec<#tensor> },
    ArgType::Int => quote! { i64 },
    ArgType::OptionalInt => quote! { Option<i64> },
    ArgType::IntOrTuple | ArgType::IntArray => quote! { Vec<i64> },
    ArgType::OptionalIntOrTuple | ArgType::OptionalIntArray => quote! { Option<Vec<i64>> },
    ArgType::Double => quote! { f64 },
    ArgType::Bool => quote! { bool },
    ArgType::Str => quote! { String },
  }
}

fn field_doc(field: &FieldModel) -> String {
  match &field.default {
    Some(default) => format!(" `{}` ({}), defaults to `{default}`.", field.arg_name, field.ty),
    None => format!(" `{}` ({}), required.", field.arg_name, field.ty),
  }
}

/// `struct <Schema>Args { .. }` for one schema.
pub(crate) struct ArgsStructFragment<'a> {
  schema: &'a SchemaModel,
  tensor: &'a syn::Type,
  visibility: Visibility,
}

impl<'a> ArgsStructFragment<'a> {
  pub(crate) fn new(schema: &'a SchemaModel, tensor: &'a syn::Type, visibility: Visibility) -> Self {
    Self {
      schema,
      tensor,
      visibility,
    }
  }
}

impl ToTokens for ArgsStructFragment<'_> {
  fn to_tokens(&self, tokens: &mut TokenStream) {
    let vis = self.visibility.to_tokens();
    let name = &self.schema.struct_ident;
    let doc = format!(" Arguments of the `{}` schema.", self.schema.name);
    let fields = self.schema.fields.iter().map(|field| {
      let ident = &field.ident;
      let doc = field_doc(field);
      let ty = rust_type(field.ty, self.tensor);
      quote! {
        #[doc = #doc]
        #vis #ident: #ty
      }
    });

    tokens.extend(quote! {
      #[doc = #doc]
      #[derive(Debug, Clone)]
      #vis struct #name {
        #(#fields),*
      }
    });
  }
}

/// `enum OpArgs` with one variant per schema, wrapping its args struct.
pub(crate) struct OpArgsEnumFragment<'a> {
  schemas: &'a [SchemaModel],
  visibility: Visibility,
}

impl<'a> OpArgsEnumFragment<'a> {
  pub(crate) fn new(schemas: &'a [SchemaModel], visibility: Visibility) -> Self {
    Self { schemas, visibility }
  }
}

impl ToTokens for OpArgsEnumFragment<'_> {
  fn to_tokens(&self, tokens: &mut TokenStream) {
    let vis = self.visibility.to_tokens();
    let variants = self.schemas.iter().map(|schema| {
      let variant = &schema.variant;
      let args = &schema.struct_ident;
      quote! { #variant(#args) }
    });
    let name_arms = self.schemas.iter().map(|schema| {
      let variant = &schema.variant;
      let name = &schema.name;
      quote! { Self::#variant(_) => #name }
    });

    tokens.extend(quote! {
      /// Arguments of any operator, tagged by schema.
      #[derive(Debug, Clone)]
      #vis enum OpArgs {
        #(#variants),*
      }

      impl OpArgs {
        /// Name of the schema these arguments follow.
        #vis const fn schema_name(&self) -> &'static str {
          match *self {
            #(#name_arms),*
          }
        }
      }
    });
  }
}
