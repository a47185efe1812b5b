use std::{collections::HashSet, path::PathBuf};

use chrono::{Local, Timelike};
use crossterm::style::Stylize;

use super::source::{load_registry, load_table};
use crate::{
  generator::{
    codegen::{CodegenConfig, Visibility},
    metrics::GenerationStats,
    orchestrator::Orchestrator,
  },
  registry::OpFilter,
  ui::{Colors, GenerateCommand, SourceArgs},
};

fn format_timestamp() -> String {
  let now = Local::now();
  format!("[{:02}:{:02}:{:02}]", now.hour(), now.minute(), now.second())
}

#[derive(Debug, Clone)]
pub struct GenerateConfig {
  pub source: SourceArgs,
  pub output: PathBuf,
  pub codegen: CodegenConfig,
  pub verbose: bool,
  pub quiet: bool,
  pub only_ops: Option<HashSet<String>>,
  pub excluded_ops: Option<HashSet<String>>,
}

impl GenerateConfig {
  pub fn from_command(command: GenerateCommand) -> anyhow::Result<Self> {
    let GenerateCommand {
      source,
      output,
      namespace,
      tensor_type,
      visibility,
      only,
      exclude,
      verbose,
      quiet,
    } = command;

    if verbose && quiet {
      anyhow::bail!("--verbose and --quiet cannot be used together");
    }

    let Some(visibility) = Visibility::parse(&visibility) else {
      anyhow::bail!("Invalid visibility '{visibility}': expected one of public, crate, file");
    };
    let tensor_type = syn::parse_str::<syn::Type>(&tensor_type)
      .map_err(|err| anyhow::anyhow!("Invalid tensor type '{tensor_type}': {err}"))?;

    Ok(Self {
      source,
      output,
      codegen: CodegenConfig {
        visibility,
        namespace,
        tensor_type,
      },
      verbose,
      quiet,
      only_ops: only.map(|ops| ops.into_iter().collect()),
      excluded_ops: exclude.map(|ops| ops.into_iter().collect()),
    })
  }

  async fn create_orchestrator(&self) -> anyhow::Result<Orchestrator> {
    let registry = load_registry(self.source.schemas.as_deref()).await?;
    let table = load_table(self.source.ops.as_deref()).await?;
    let filter = OpFilter::new(self.only_ops.as_ref(), self.excluded_ops.as_ref());
    Ok(Orchestrator::new(registry, table, filter, self.codegen.clone()))
  }

  async fn write_output(&self, code: String) -> anyhow::Result<()> {
    if let Some(parent) = self.output.parent() {
      tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&self.output, code).await?;
    Ok(())
  }
}

struct GenerateLogger<'a> {
  config: &'a GenerateConfig,
  colors: &'a Colors,
}

impl<'a> GenerateLogger<'a> {
  fn new(config: &'a GenerateConfig, colors: &'a Colors) -> Self {
    Self { config, colors }
  }

  fn info(&self, message: &str) {
    if !self.config.quiet {
      println!("{} {message}", format_timestamp().with(self.colors.timestamp()));
    }
  }

  fn stat(&self, label: &str, value: String) {
    if !self.config.quiet {
      println!(
        "            {:<25} {}",
        label.with(self.colors.label()),
        value.with(self.colors.value())
      );
    }
  }

  fn log_loading(&self) {
    let schemas = match &self.config.source.schemas {
      Some(path) => format!("builtin + {}", path.display()),
      None => "builtin".to_string(),
    };
    self.info(
      &format!(
        "Loading operator table from: {} (schemas: {schemas})",
        self.config.source.describe()
      )
      .with(self.colors.primary())
      .to_string(),
    );
  }

  fn log_generating(&self) {
    self.info(&"Generating operator registrations...".with(self.colors.primary()).to_string());
  }

  fn print_statistics(&self, stats: &GenerationStats) {
    if self.config.quiet {
      return;
    }

    self.stat("Operators resolved:", stats.ops_resolved.to_string());
    if stats.ops_skipped > 0 {
      self.stat("", format!("{} filtered out", stats.ops_skipped));
    }
    self.stat("Schemas generated:", stats.schemas_generated.to_string());
    self.stat("", format!("{} fields", stats.fields_generated));
    if stats.schemas_unused > 0 && self.config.verbose {
      self.stat("Unused schemas:", stats.schemas_unused.to_string());
    }
    if !stats.warnings.is_empty() {
      self.stat("Warnings:", stats.warnings.len().to_string());
    }

    self.print_warnings(stats);
  }

  fn print_warnings(&self, stats: &GenerationStats) {
    let mut printed_header = false;
    for warning in &stats.warnings {
      if !warning.is_significant() && !self.config.verbose {
        continue;
      }

      if !printed_header {
        println!();
        printed_header = true;
      }

      eprintln!(
        "{} {}",
        "Warning:".with(self.colors.accent()),
        format!("{warning}").with(self.colors.primary())
      );
    }
  }

  fn log_writing(&self) {
    self.info(
      &format!("Writing to: {}", self.config.output.display())
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn log_success(&self) {
    if !self.config.quiet {
      println!();
      println!(
        "{} {}",
        format_timestamp().with(self.colors.timestamp()),
        "Successfully generated operator registrations".with(self.colors.success())
      );
    }
  }
}

pub async fn generate_code(config: GenerateConfig, colors: &Colors) -> anyhow::Result<()> {
  let logger = GenerateLogger::new(&config, colors);

  logger.log_loading();
  let orchestrator = config.create_orchestrator().await?;

  logger.log_generating();
  let output = orchestrator.generate_with_header(&config.source.describe())?;
  logger.print_statistics(&output.stats);

  logger.log_writing();
  config.write_output(output.code).await?;

  logger.log_success();
  Ok(())
}
