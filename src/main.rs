use anyhow::Result;
use clap::Parser;
use recipe_catalogue::config::AppConfig;
use recipe_catalogue::errors::error_logging;
use recipe_catalogue::observability;
use recipe_catalogue::observability_config::ObservabilityConfig;
use recipe_catalogue::shopping_list::{ExportScope, ShoppingList};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "recipe-catalogue")]
#[command(about = "Parse, scale and export ingredient and shopping lists", long_about = None)]
#[command(version)]
struct Cli {
    /// Scale factor applied to every quantity
    #[arg(long)]
    scale: Option<f64>,

    /// Export every item instead of only the checked ones
    #[arg(long)]
    all: bool,

    /// Print the HTML checklist instead of plain text
    #[arg(long)]
    html: bool,

    /// Ingredient or shopping-list file (defaults to stdin)
    file: Option<PathBuf>,
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read '{}': {}", path.display(), e)),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

fn run(config: &AppConfig, cli: &Cli) -> Result<String> {
    let text = read_input(cli.file.as_deref())?;

    let parser = config.parser()?;
    let formatter = config.formatter()?;
    let mut list = ShoppingList::from_text(&text, &parser, formatter, config.shopping);

    if let Some(scale) = cli.scale {
        list.set_scale(scale)?;
    }

    let scope = if cli.all {
        ExportScope::All
    } else {
        ExportScope::Checked
    };
    let export = list.export(scope);

    info!(
        items = list.len(),
        scale = list.scale(),
        scope = scope.as_str(),
        "Rendered shopping list"
    );

    Ok(if cli.html { export.html } else { export.text })
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load environment variables from .env file first
    dotenvy::dotenv().ok();

    // Logging comes up before config loading so pantry file warnings are kept
    observability::init_tracing_with_config(&ObservabilityConfig::from_env())?;

    let config = AppConfig::from_env()?;
    config.validate().inspect_err(|e| {
        error_logging::log_config_error(e, "app_config", "startup_validation");
    })?;
    info!("{}", config.summary());

    match run(&config, &cli) {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            error_logging::log_internal_error(&e, "cli", "run");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_arguments() {
        let cli = Cli::try_parse_from(["recipe-catalogue", "--scale", "2", "--all", "--html", "list.txt"])
            .unwrap();
        assert_eq!(cli.scale, Some(2.0));
        assert!(cli.all);
        assert!(cli.html);
        assert_eq!(cli.file, Some(PathBuf::from("list.txt")));

        let cli = Cli::try_parse_from(["recipe-catalogue"]).unwrap();
        assert_eq!(cli.scale, None);
        assert!(!cli.all);
        assert!(!cli.html);
        assert!(cli.file.is_none());
    }

    #[test]
    fn test_cli_rejects_bad_arguments() {
        assert!(Cli::try_parse_from(["recipe-catalogue", "--scale"]).is_err());
        assert!(Cli::try_parse_from(["recipe-catalogue", "--scale", "double"]).is_err());
        assert!(Cli::try_parse_from(["recipe-catalogue", "--verbose"]).is_err());
        assert!(Cli::try_parse_from(["recipe-catalogue", "a.txt", "b.txt"]).is_err());
    }

    #[test]
    fn test_run_with_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.txt");
        fs::write(&path, "- [ ] 1/2 cup sugar\n- [ ] 2 onions\n").unwrap();
        let path = path.to_string_lossy().into_owned();

        let cli = Cli::try_parse_from(["recipe-catalogue", "--scale", "1.5", path.as_str()]).unwrap();
        let output = run(&AppConfig::default(), &cli).unwrap();
        assert_eq!(output, "- [ ] 3 onions");

        let cli = Cli::try_parse_from(["recipe-catalogue", "--all", path.as_str()]).unwrap();
        let output = run(&AppConfig::default(), &cli).unwrap();
        assert_eq!(output, "- [ ] 1/2 cup sugar\n- [ ] 2 onions");

        let cli = Cli::try_parse_from(["recipe-catalogue", "--scale", "20", path.as_str()]).unwrap();
        assert!(run(&AppConfig::default(), &cli).is_err());
    }
}
