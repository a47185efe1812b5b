use std::path::Path;

use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Row, Table};
use itertools::Itertools;

use super::source::{load_registry, load_table};
use crate::{
  registry::{Op, OpResolver, OpSpec, Schema, SchemaRegistry, by_name},
  ui::{Colors, SourceArgs, colors::IntoComfyColor, term_width},
};

#[derive(Debug, PartialEq, Eq)]
struct OpRow {
  name: String,
  schema_name: String,
  args: String,
}

#[derive(Debug, PartialEq, Eq)]
struct SchemaRow {
  name: String,
  args: String,
  used_by: usize,
}

fn op_rows<'a>(ops: impl IntoIterator<Item = &'a Op>) -> Vec<OpRow> {
  ops
    .into_iter()
    .map(|op| OpRow {
      name: op.name.clone(),
      schema_name: op.schema_name.clone(),
      args: format!("{}/{}", op.schema.num_required(), op.schema.args.len()),
    })
    .collect()
}

/// Optional arguments are shown in brackets.
fn format_args(schema: &Schema) -> String {
  schema
    .args
    .iter()
    .map(|arg| {
      if arg.is_required() {
        arg.name.clone()
      } else {
        format!("[{}]", arg.name)
      }
    })
    .join(", ")
}

fn schema_rows(registry: &SchemaRegistry, table: &[OpSpec]) -> Vec<SchemaRow> {
  let usage = table.iter().map(|spec| spec.schema_name.as_str()).counts();

  registry
    .schemas_by_name()
    .values()
    .map(|schema| SchemaRow {
      name: schema.name.clone(),
      args: format_args(schema),
      used_by: usage.get(schema.name.as_str()).copied().unwrap_or_default(),
    })
    .collect()
}

fn new_table(colors: &Colors, headers: &[&str]) -> Table {
  let mut table = Table::new();
  table
    .load_preset("  ── ──            ")
    .set_content_arrangement(ContentArrangement::Dynamic)
    .set_width(term_width());

  let mut row = Row::new();
  for header in headers {
    row.add_cell(Cell::new(header).fg(IntoComfyColor::into(colors.label())));
  }
  table.set_header(row);
  table
}

pub async fn list_ops(source: &SourceArgs, colors: &Colors) -> anyhow::Result<()> {
  let ops = if source.ops.is_none() && source.schemas.is_none() {
    by_name()?
  } else {
    let registry = load_registry(source.schemas.as_deref()).await?;
    let table = load_table(source.ops.as_deref()).await?;
    OpResolver::new(&registry).resolve(table)?.into_map()
  };

  let mut output = new_table(colors, &["OPERATOR", "SCHEMA", "ARGS"]);
  for op in op_rows(ops.values()) {
    let mut row = Row::new();
    row.add_cell(
      Cell::new(op.name)
        .fg(IntoComfyColor::into(colors.value()))
        .add_attribute(Attribute::Bold),
    );
    row.add_cell(Cell::new(op.schema_name).fg(IntoComfyColor::into(colors.primary())));
    row.add_cell(
      Cell::new(op.args)
        .fg(IntoComfyColor::into(colors.accent()))
        .set_alignment(CellAlignment::Right),
    );
    output.add_row(row);
  }

  println!("{output}");

  Ok(())
}

pub async fn list_schemas(schemas: Option<&Path>, colors: &Colors) -> anyhow::Result<()> {
  let registry = load_registry(schemas).await?;
  let table = load_table(None).await?;

  let mut output = new_table(colors, &["SCHEMA", "ARGUMENTS", "OPS"]);
  for schema in schema_rows(&registry, &table) {
    let mut row = Row::new();
    row.add_cell(
      Cell::new(schema.name)
        .fg(IntoComfyColor::into(colors.value()))
        .add_attribute(Attribute::Bold),
    );
    row.add_cell(Cell::new(schema.args).fg(IntoComfyColor::into(colors.primary())));
    row.add_cell(
      Cell::new(schema.used_by)
        .fg(IntoComfyColor::into(colors.accent()))
        .set_alignment(CellAlignment::Right),
    );
    output.add_row(row);
  }

  println!("{output}");

  Ok(())
}
