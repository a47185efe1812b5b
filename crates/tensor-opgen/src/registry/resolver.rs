use std::{collections::HashSet, sync::Arc};

use indexmap::IndexMap;

use super::{
  error::RegistryError,
  ops::{OPS, Op, OpSpec},
  schema::{Schema, SchemaRegistry},
};

/// Resolves the built-in operator table against the built-in schemas.
///
/// Equivalent to `OpResolver::new(&SchemaRegistry::builtin()).resolve(OPS)`,
/// returning only the name-keyed map.
pub fn by_name() -> Result<IndexMap<String, Op>, RegistryError> {
  let registry = SchemaRegistry::builtin();
  Ok(OpResolver::new(&registry).resolve(OPS)?.into_map())
}

/// Filter for including or excluding operators by name.
///
/// Exclusion takes precedence if a name matches both sets.
#[derive(Debug, Clone, Default)]
pub struct OpFilter {
  only: Option<HashSet<String>>,
  excluded: Option<HashSet<String>>,
}

impl OpFilter {
  #[must_use]
  pub fn new(only: Option<&HashSet<String>>, excluded: Option<&HashSet<String>>) -> Self {
    Self {
      only: only.cloned(),
      excluded: excluded.cloned(),
    }
  }

  #[must_use]
  pub fn accepts<S>(&self, name: S) -> bool
  where
    S: AsRef<str>,
  {
    if let Some(ref included) = self.only
      && !included.contains(name.as_ref())
    {
      return false;
    }

    if let Some(ref excluded) = self.excluded
      && excluded.contains(name.as_ref())
    {
      return false;
    }

    true
  }
}

/// Collects resolved operators while a table is being walked.
#[derive(Debug, Default)]
struct ResolutionContext {
  entries: IndexMap<String, Op>,
  overwritten: Vec<String>,
}

impl ResolutionContext {
  /// Inserts `op`, replacing any earlier operator with the same name.
  ///
  /// The replaced entry keeps its original position in iteration order.
  fn register(&mut self, op: Op) {
    let name = op.name.clone();
    if self.entries.insert(name.clone(), op).is_some() {
      self.overwritten.push(name);
    }
  }
}

/// Attaches schemas from a [`SchemaRegistry`] to operator table rows.
#[derive(Debug, Clone)]
pub struct OpResolver<'a> {
  registry: &'a SchemaRegistry,
  filter: OpFilter,
}

impl<'a> OpResolver<'a> {
  pub fn new(registry: &'a SchemaRegistry) -> Self {
    Self {
      registry,
      filter: OpFilter::default(),
    }
  }

  #[must_use]
  pub fn with_filter(mut self, filter: OpFilter) -> Self {
    self.filter = filter;
    self
  }

  /// Resolves every accepted row of `table`.
  ///
  /// Rows are processed in order. A later row with an already-seen name
  /// replaces the earlier one and is reported through
  /// [`ResolvedOps::overwritten`].
  ///
  /// # Errors
  ///
  /// Returns [`RegistryError::UnresolvedSchema`] for the first accepted row
  /// whose schema name is not in the registry.
  pub fn resolve<I>(&self, table: I) -> Result<ResolvedOps, RegistryError>
  where
    I: IntoIterator,
    I::Item: Into<OpSpec>,
  {
    let mut context = ResolutionContext::default();

    for row in table {
      let OpSpec { name, schema_name } = row.into();
      if !self.filter.accepts(&name) {
        continue;
      }

      let schema = self.lookup(&name, &schema_name)?;
      context.register(Op {
        name,
        schema_name,
        schema,
      });
    }

    Ok(ResolvedOps {
      ops: context.entries,
      overwritten: context.overwritten,
    })
  }

  fn lookup(&self, op: &str, schema_name: &str) -> Result<Arc<Schema>, RegistryError> {
    self
      .registry
      .get(schema_name)
      .cloned()
      .ok_or_else(|| RegistryError::UnresolvedSchema {
        op: op.to_string(),
        schema_name: schema_name.to_string(),
      })
  }
}

/// Result of a resolution pass: operators keyed by name, in table order.
#[derive(Debug, Clone, Default)]
pub struct ResolvedOps {
  ops: IndexMap<String, Op>,
  overwritten: Vec<String>,
}

impl ResolvedOps {
  pub fn get<S>(&self, name: S) -> Option<&Op>
  where
    S: AsRef<str>,
  {
    self.ops.get(name.as_ref())
  }

  pub fn iter(&self) -> impl Iterator<Item = &Op> {
    self.ops.values()
  }

  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.ops.keys().map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.ops.len()
  }

  pub fn is_empty(&self) -> bool {
    self.ops.is_empty()
  }

  /// Names that appeared more than once in the table, once per replacement.
  pub fn overwritten(&self) -> &[String] {
    &self.overwritten
  }

  /// Schemas referenced by at least one operator, deduplicated, in first-use
  /// order.
  pub fn referenced_schemas(&self) -> Vec<&Arc<Schema>> {
    let mut seen = HashSet::new();
    self
      .ops
      .values()
      .filter(|op| seen.insert(op.schema_name.as_str()))
      .map(|op| &op.schema)
      .collect()
  }

  pub fn into_map(self) -> IndexMap<String, Op> {
    self.ops
  }
}
