use std::collections::HashSet;

use crate::{
  generator::{codegen::CodegenConfig, orchestrator::Orchestrator},
  registry::{OPS, OpFilter, OpSpec, SchemaRegistry},
};

pub(super) fn string_set(values: &[&str]) -> HashSet<String> {
  values.iter().map(|value| (*value).to_string()).collect::<HashSet<_>>()
}

pub(super) fn table(rows: &[(&str, &str)]) -> Vec<OpSpec> {
  rows.iter().map(|(name, schema)| OpSpec::new(*name, *schema)).collect()
}

pub(super) fn builtin_orchestrator() -> Orchestrator {
  Orchestrator::new(SchemaRegistry::builtin(), OPS, OpFilter::default(), CodegenConfig::default())
}

pub(super) fn make_orchestrator_with_ops(
  rows: &[(&str, &str)],
  only: Option<&HashSet<String>>,
  exclude: Option<&HashSet<String>>,
) -> Orchestrator {
  Orchestrator::new(
    SchemaRegistry::builtin(),
    table(rows),
    OpFilter::new(only, exclude),
    CodegenConfig::default(),
  )
}
