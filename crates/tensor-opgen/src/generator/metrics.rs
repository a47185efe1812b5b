use strum::Display;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerationStats {
  pub ops_resolved: usize,
  pub ops_skipped: usize,
  pub schemas_generated: usize,
  pub schemas_unused: usize,
  pub fields_generated: usize,
  pub warnings: Vec<GenerationWarning>,
}

impl GenerationStats {
  pub fn record_ops(&mut self, resolved: usize, total: usize) {
    self.ops_resolved += resolved;
    self.ops_skipped += total.saturating_sub(resolved);
  }

  pub fn record_schema(&mut self, field_count: usize) {
    self.schemas_generated += 1;
    self.fields_generated += field_count;
  }

  pub fn record_unused_schema(&mut self, schema_name: &str) {
    self.schemas_unused += 1;
    self.record_warning(GenerationWarning::UnusedSchema {
      schema_name: schema_name.to_string(),
    });
  }

  pub fn record_warning(&mut self, warning: GenerationWarning) {
    self.warnings.push(warning);
  }

  pub fn record_warnings(&mut self, warnings: impl IntoIterator<Item = GenerationWarning>) {
    self.warnings.extend(warnings);
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum GenerationWarning {
  #[strum(to_string = "Operator '{name}' is declared more than once; the last declaration wins")]
  DuplicateOp { name: String },
  #[strum(to_string = "Schema '{schema_name}' is not referenced by any operator")]
  UnusedSchema { schema_name: String },
  #[strum(to_string = "'{name}' maps to identifier '{original}', renamed to '{renamed}'")]
  IdentifierCollision {
    name: String,
    original: String,
    renamed: String,
  },
}

impl GenerationWarning {
  /// Warnings worth showing without `--verbose`.
  pub fn is_significant(&self) -> bool {
    matches!(self, Self::DuplicateOp { .. } | Self::IdentifierCollision { .. })
  }
}
