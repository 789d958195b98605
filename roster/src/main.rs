//! Student roster menu.
//!
//! Reads `roster.toml` (or `--config`) for the store location, then runs the
//! interactive menu on stdin/stdout until the user exits.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use roster::io::config::{DEFAULT_CONFIG_FILE, load_config};
use roster::logging;
use roster::menu::Menu;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "roster",
    version,
    about = "View and edit a CSV file of student records"
)]
struct Cli {
    /// Config file (defaults to `roster.toml` in the working directory).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Store file, overriding `store_path` from the config.
    #[arg(long)]
    store: Option<PathBuf>,
}

fn main() {
    logging::init();
    if let Err(err) = run(Cli::parse()) {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config_path = cli
        .config
        .unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE).to_path_buf());
    let mut config = load_config(&config_path).context("load config")?;
    if let Some(store_path) = cli.store {
        config.store_path = store_path;
    }
    config.validate()?;
    info!(store = %config.store_path.display(), "starting roster");

    let store = config.store();
    let stdin = io::stdin();
    let stdout = io::stdout();
    Menu::new(&store, stdin.lock(), stdout.lock())
        .run()
        .context("console i/o")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_without_flags() {
        let cli = Cli::parse_from(["roster"]);
        assert!(cli.config.is_none());
        assert!(cli.store.is_none());
    }

    #[test]
    fn parse_store_override() {
        let cli = Cli::parse_from(["roster", "--store", "grades.csv"]);
        assert_eq!(cli.store, Some(PathBuf::from("grades.csv")));
    }
}
