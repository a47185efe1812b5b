use clap::Parser;
use tensor_opgen::ui::{self, Cli, Colors, Commands, ListCommands, colors};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();
  let colors = Colors::new(colors::colors_enabled(cli.color), colors::detect_theme(cli.theme));

  match cli.command {
    Commands::List { list_command } => match list_command {
      ListCommands::Ops { source } => ui::commands::list_ops(&source, &colors).await?,
      ListCommands::Schemas { schemas } => ui::commands::list_schemas(schemas.as_deref(), &colors).await?,
    },
    Commands::Generate(command) => {
      let config = ui::commands::GenerateConfig::from_command(command)?;
      ui::commands::generate_code(config, &colors).await?;
    }
  }

  Ok(())
}
