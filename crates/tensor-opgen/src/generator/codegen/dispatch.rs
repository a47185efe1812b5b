use proc_macro2::TokenStream;
use quote::{ToTokens, quote};

use super::{OpModel, Visibility};

/// `enum Op` plus its name, schema, and arity lookup tables.
pub(crate) struct OpEnumFragment<'a> {
  ops: &'a [OpModel],
  visibility: Visibility,
}

impl<'a> OpEnumFragment<'a> {
  pub(crate) fn new(ops: &'a [OpModel], visibility: Visibility) -> Self {
    Self { ops, visibility }
  }

  fn str_arms<F>(&self, value: F) -> Vec<TokenStream>
  where
    F: Fn(&OpModel) -> &str,
  {
    self
      .ops
      .iter()
      .map(|op| {
        let variant = &op.variant;
        let value = value(op);
        quote! { Self::#variant => #value }
      })
      .collect()
  }

  fn usize_arms<F>(&self, value: F) -> Vec<TokenStream>
  where
    F: Fn(&OpModel) -> usize,
  {
    self
      .ops
      .iter()
      .map(|op| {
        let variant = &op.variant;
        let value = value(op);
        quote! { Self::#variant => #value }
      })
      .collect()
  }

  fn lookup_arms<F>(&self, key: F) -> Vec<TokenStream>
  where
    F: Fn(&OpModel) -> &str,
  {
    self
      .ops
      .iter()
      .map(|op| {
        let variant = &op.variant;
        let key = key(op);
        quote! { #key => Some(Self::#variant) }
      })
      .collect()
  }
}

impl ToTokens for OpEnumFragment<'_> {
  fn to_tokens(&self, tokens: &mut TokenStream) {
    let vis = self.visibility.to_tokens();
    let variants = self.ops.iter().map(|op| {
      let variant = &op.variant;
      let doc = format!(" `{}` (schema `{}`).", op.qualified_name, op.schema_name);
      quote! {
        #[doc = #doc]
        #variant
      }
    });
    let all = self.ops.iter().map(|op| {
      let variant = &op.variant;
      quote! { Self::#variant }
    });

    let name_arms = self.str_arms(|op| op.name.as_str());
    let qualified_arms = self.str_arms(|op| op.qualified_name.as_str());
    let schema_arms = self.str_arms(|op| op.schema_name.as_str());
    let num_args_arms = self.usize_arms(|op| op.num_args);
    let num_required_arms = self.usize_arms(|op| op.num_required_args);
    let from_name_arms = self.lookup_arms(|op| op.name.as_str());
    let from_qualified_arms = self.lookup_arms(|op| op.qualified_name.as_str());

    let schema_arg_arms = self.ops.iter().map(|op| {
      let variant = &op.variant;
      let schema_variant = &op.schema_variant;
      quote! { (Self::#variant, OpArgs::#schema_variant(_)) => true }
    });

    tokens.extend(quote! {
      /// Every registered operator.
      #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
      #vis enum Op {
        #(#variants),*
      }

      impl Op {
        /// All operators in registration order.
        #vis const ALL: &'static [Op] = &[#(#all),*];

        #vis const fn name(self) -> &'static str {
          match self {
            #(#name_arms),*
          }
        }

        /// Name under `NAMESPACE`, as registered with the runtime.
        #vis const fn qualified_name(self) -> &'static str {
          match self {
            #(#qualified_arms),*
          }
        }

        #vis const fn schema_name(self) -> &'static str {
          match self {
            #(#schema_arms),*
          }
        }

        /// Number of schema arguments, including those with defaults.
        #vis const fn num_args(self) -> usize {
          match self {
            #(#num_args_arms),*
          }
        }

        #vis const fn num_required_args(self) -> usize {
          match self {
            #(#num_required_arms),*
          }
        }

        #vis fn from_name(name: &str) -> Option<Self> {
          match name {
            #(#from_name_arms,)*
            _ => None,
          }
        }

        #vis fn from_qualified_name(name: &str) -> Option<Self> {
          match name {
            #(#from_qualified_arms,)*
            _ => None,
          }
        }

        /// Whether `args` follow the schema this operator expects.
        #vis fn accepts(self, args: &OpArgs) -> bool {
          match (self, args) {
            #(#schema_arg_arms,)*
            #[allow(unreachable_patterns)]
            _ => false,
          }
        }
      }

      impl std::fmt::Display for Op {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
          f.write_str(self.qualified_name())
        }
      }
    });
  }
}
