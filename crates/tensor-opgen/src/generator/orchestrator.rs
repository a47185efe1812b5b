//! Drives one generation run: resolve the operator table, emit the
//! registration module, and attach the file header.
//!
//! ```no_run
//! use tensor_opgen::generator::orchestrator::Orchestrator;
//! use tensor_opgen::registry::{OPS, OpFilter, SchemaRegistry};
//!
//! # fn example() -> anyhow::Result<()> {
//! let orchestrator = Orchestrator::new(SchemaRegistry::builtin(), OPS, OpFilter::default(), Default::default());
//! let output = orchestrator.generate_with_header("<builtin>")?;
//! std::fs::write("ops.rs", output.code)?;
//! # Ok(())
//! # }
//! ```

use super::{
  codegen::{self, CodegenConfig},
  metrics::{GenerationStats, GenerationWarning},
};
use crate::registry::{OpFilter, OpResolver, OpSpec, SchemaRegistry};

/// Formatted source plus the statistics gathered while producing it.
#[derive(Debug, Clone)]
pub struct GeneratedOutput {
  pub code: String,
  pub stats: GenerationStats,
}

pub struct Orchestrator {
  registry: SchemaRegistry,
  table: Vec<OpSpec>,
  filter: OpFilter,
  config: CodegenConfig,
}

impl Orchestrator {
  pub fn new<I>(registry: SchemaRegistry, table: I, filter: OpFilter, config: CodegenConfig) -> Self
  where
    I: IntoIterator,
    I::Item: Into<OpSpec>,
  {
    Self {
      registry,
      table: table.into_iter().map(Into::into).collect(),
      filter,
      config,
    }
  }

  /// Generates the registration module without a file header.
  ///
  /// # Errors
  ///
  /// Fails when an operator references a schema missing from the registry,
  /// or when the emitted tokens do not parse as a Rust file.
  pub fn generate(&self) -> anyhow::Result<GeneratedOutput> {
    let resolved = OpResolver::new(&self.registry)
      .with_filter(self.filter.clone())
      .resolve(self.table.iter().cloned())?;

    let mut stats = GenerationStats::default();
    let filtered_out = self.table.iter().filter(|spec| !self.filter.accepts(&spec.name)).count();
    stats.record_ops(resolved.len(), resolved.len() + filtered_out);
    stats.record_warnings(
      resolved
        .overwritten()
        .iter()
        .map(|name| GenerationWarning::DuplicateOp { name: name.clone() }),
    );

    let tokens = codegen::generate(&resolved, &self.registry, &self.config, &mut stats);
    let code = codegen::format_tokens(tokens)?;

    Ok(GeneratedOutput { code, stats })
  }

  /// Generates the registration module behind an auto-generated header
  /// naming `source` and the generator version.
  ///
  /// # Errors
  ///
  /// Same as [`Orchestrator::generate`].
  pub fn generate_with_header(&self, source: &str) -> anyhow::Result<GeneratedOutput> {
    let GeneratedOutput { code, stats } = self.generate()?;

    let namespace = if self.config.namespace.is_empty() {
      "(none)"
    } else {
      self.config.namespace.as_str()
    };

    let code = format!(
      r"//! AUTO-GENERATED CODE - DO NOT EDIT!
//!
//! Operator registrations for namespace `{namespace}`.
//! Source: {source}
//! Generated by `{}` {}
//!
//! {} operators, {} schemas.

{code}",
      env!("CARGO_PKG_NAME"),
      env!("CARGO_PKG_VERSION"),
      stats.ops_resolved,
      stats.schemas_generated,
    );

    Ok(GeneratedOutput { code, stats })
  }
}
