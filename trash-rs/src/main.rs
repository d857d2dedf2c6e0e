use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use trash_core::{Trash, DISPLAY_TIME_FORMAT};

#[derive(Parser)]
#[command(name = "trash")]
#[command(version, about = "Move to and from the Trash")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Print verbose output
    #[arg(long, global = true)]
    verbose: bool,

    /// File to move to the Trash when no command is given
    path: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Move a file to the Trash
    #[command(visible_aliases = ["mv", "trash"])]
    Put { path: PathBuf },

    /// Restore a file from the Trash to the given path
    #[command(visible_alias = "res")]
    Restore { path: PathBuf },

    /// Empty the Trash
    #[command(visible_alias = "emp")]
    Empty,

    /// List files in the Trash
    #[command(visible_alias = "ls")]
    List,
}

fn run(cli: Cli) -> Result<()> {
    let command = match (cli.command, cli.path) {
        (Some(command), _) => command,
        (None, Some(path)) => Commands::Put { path },
        (None, None) => anyhow::bail!("file path is required"),
    };
    debug!(?command, "parsed command");

    let trash = Trash::from_env()?;

    match command {
        Commands::Put { path } => {
            trash
                .put(&path)
                .with_context(|| format!("cannot trash {}", path.display()))?;
        }
        Commands::Restore { path } => {
            trash
                .restore(&path)
                .with_context(|| format!("cannot restore {}", path.display()))?;
        }
        Commands::Empty => {
            trash.empty().context("cannot empty the Trash")?;
        }
        Commands::List => {
            let items = trash.list().context("cannot list the Trash")?;
            let mut stdout = io::stdout().lock();
            for item in items {
                writeln!(
                    stdout,
                    "{} {}",
                    item.deleted_at.format(DISPLAY_TIME_FORMAT),
                    item.original_path.display()
                )?;
            }
        }
    }
    Ok(())
}

fn report(err: &anyhow::Error) {
    let message = format!("{err:#}");
    let mut stderr = io::stderr().lock();
    if writeln!(stderr, "{}", message.red()).is_err() {
        // fall back to plain output
        let _ = writeln!(stderr, "{message}");
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}
