mod app;
mod commands;
mod render;

use std::io::{IsTerminal, Read};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "revsmart-cli", about = "Spaced-repetition review CLI", version)]
struct Cli {
    /// Path to config.toml (default: platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Set the name shown on the dashboard
    Name {
        name: String,
    },

    /// Add a concept to study
    Add {
        /// Concept name
        name: String,
        /// Description (use "-" to read from stdin)
        #[arg(long, short)]
        description: Option<String>,
    },

    /// Show due and upcoming concepts (default)
    Dashboard,

    /// Show a concept's details and review history
    Show {
        /// Concept id, name, or unique name prefix
        concept: String,
    },

    /// Record a review outcome
    Review {
        /// Concept id, name, or unique name prefix
        concept: String,
        /// Mark the review as failed (default: remembered)
        #[arg(long)]
        forgot: bool,
    },

    /// Delete a concept
    Remove {
        /// Concept id, name, or unique name prefix
        concept: String,
    },

    /// List scheduled reminders
    Reminders {
        /// Include reminders that already fired
        #[arg(long)]
        all: bool,
    },
}

/// Resolve "-" as stdin, or read piped stdin when no value was given
fn resolve_content(content: Option<String>) -> anyhow::Result<Option<String>> {
    match content.as_deref() {
        Some("-") => Ok(Some(read_stdin()?)),
        Some(_) => Ok(content),
        None => {
            if std::io::stdin().is_terminal() {
                return Ok(None);
            }
            let buf = read_stdin()?;
            Ok(if buf.trim().is_empty() { None } else { Some(buf) })
        }
    }
}

fn read_stdin() -> anyhow::Result<String> {
    read_content(std::io::stdin())
}

fn read_content<R: Read>(mut reader: R) -> anyhow::Result<String> {
    let mut buf = String::new();
    reader
        .read_to_string(&mut buf)
        .context("Failed to read from stdin")?;
    Ok(buf)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && std::io::stdout().is_terminal();
    let app = app::App::new(cli.config.as_deref(), cli.data_dir)?;

    match cli.command.unwrap_or(Command::Dashboard) {
        Command::Name { name } => {
            commands::name::run(&app, &name, &cli.format).await?;
        }
        Command::Add { name, description } => {
            let description = resolve_content(description)?.unwrap_or_default();
            commands::add::run(&app, name, description, &cli.format, use_color).await?;
        }
        Command::Dashboard => {
            commands::dashboard::run(&app, &cli.format, use_color).await?;
        }
        Command::Show { concept } => {
            commands::show::run(&app, &concept, &cli.format, use_color).await?;
        }
        Command::Review { concept, forgot } => {
            commands::review::run(&app, &concept, !forgot, &cli.format, use_color).await?;
        }
        Command::Remove { concept } => {
            commands::remove::run(&app, &concept, &cli.format).await?;
        }
        Command::Reminders { all } => {
            commands::reminders::run(&app, all, &cli.format).await?;
        }
    }

    Ok(())
}
