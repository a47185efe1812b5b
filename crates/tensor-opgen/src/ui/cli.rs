use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::colors::{ColorMode, Colors, ThemeMode};

#[derive(Parser, Debug)]
#[command(name = "tensor-opgen")]
#[command(author, version, about = "Tensor operator table to Rust registration code generator")]
#[command(styles = Colors::clap_styles())]
pub struct Cli {
  #[command(subcommand)]
  pub command: Commands,

  /// Control color output
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub color: ColorMode,

  /// Terminal theme (dark or light background)
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub theme: ThemeMode,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// List operators or schemas
  List {
    #[command(subcommand)]
    list_command: ListCommands,
  },
  /// Generate a Rust operator registration module
  Generate(GenerateCommand),
}

/// Where the operator table and schema registry come from.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
  /// JSON operator table (defaults to the built-in table)
  #[arg(long, value_name = "FILE")]
  pub ops: Option<PathBuf>,

  /// JSON schema list merged over the built-in schemas
  #[arg(long, value_name = "FILE")]
  pub schemas: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct GenerateCommand {
  #[command(flatten)]
  pub source: SourceArgs,

  /// Path where the generated Rust code will be written
  #[arg(short, long, value_name = "FILE")]
  pub output: PathBuf,

  /// Prefix for qualified operator names; empty for bare names
  #[arg(long, value_name = "NS", default_value = crate::registry::DEFAULT_NAMESPACE)]
  pub namespace: String,

  /// Rust type used for tensor-valued arguments
  #[arg(long, value_name = "PATH", default_value = "crate::Tensor")]
  pub tensor_type: String,

  /// Visibility level for generated items (public, crate, or file)
  #[arg(long, value_name = "VISIBILITY", default_value = "public")]
  pub visibility: String,

  /// Include only specific operators (comma-separated names)
  #[arg(long, value_name = "IDS", value_delimiter = ',')]
  pub only: Option<Vec<String>>,

  /// Exclude specific operators (comma-separated names)
  #[arg(long, value_name = "IDS", value_delimiter = ',')]
  pub exclude: Option<Vec<String>>,

  /// Enable verbose output with detailed progress information
  #[arg(short, long, default_value_t = false)]
  pub verbose: bool,

  /// Suppress non-essential output (errors only)
  #[arg(short, long, default_value_t = false)]
  pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum ListCommands {
  /// List every operator with its schema and argument count
  Ops {
    #[command(flatten)]
    source: SourceArgs,
  },
  /// List every schema with its arguments and the operators using it
  Schemas {
    /// JSON schema list merged over the built-in schemas
    #[arg(long, value_name = "FILE")]
    schemas: Option<PathBuf>,
  },
}

#[cfg(test)]
mod tests {
  use clap::Parser;

  use super::*;

  #[test]
  fn test_generate_defaults() {
    let cli = Cli::try_parse_from(["tensor-opgen", "generate", "-o", "out/ops.rs"]).unwrap();
    let Commands::Generate(command) = cli.command else {
      panic!("expected generate command");
    };
    assert_eq!(command.output, PathBuf::from("out/ops.rs"));
    assert_eq!(command.namespace, "mnm.op");
    assert_eq!(command.tensor_type, "crate::Tensor");
    assert_eq!(command.visibility, "public");
    assert!(command.source.ops.is_none());
    assert!(command.only.is_none());
  }

  #[test]
  fn test_generate_filters_split_on_commas() {
    let cli = Cli::try_parse_from([
      "tensor-opgen",
      "generate",
      "-o",
      "ops.rs",
      "--only",
      "relu,conv2d",
      "--exclude",
      "conv2d",
      "--namespace",
      "",
    ])
    .unwrap();
    let Commands::Generate(command) = cli.command else {
      panic!("expected generate command");
    };
    assert_eq!(command.only, Some(vec!["relu".to_string(), "conv2d".to_string()]));
    assert_eq!(command.exclude, Some(vec!["conv2d".to_string()]));
    assert_eq!(command.namespace, "");
  }

  #[test]
  fn test_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from(["tensor-opgen", "list", "schemas", "--color", "never", "--theme", "light"]).unwrap();
    assert_eq!(cli.color, ColorMode::Never);
    assert_eq!(cli.theme, ThemeMode::Light);
    assert!(matches!(
      cli.command,
      Commands::List {
        list_command: ListCommands::Schemas { schemas: None }
      }
    ));
  }

  #[test]
  fn test_generate_requires_output() {
    assert!(Cli::try_parse_from(["tensor-opgen", "generate"]).is_err());
  }
}
