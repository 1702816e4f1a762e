use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::Result;
use clap::{Parser, Subcommand};
use launchstats_lib::{commands, init_logging, Database, SettingsStore};

#[derive(Parser)]
#[command(name = "launchstats")]
#[command(about = "Launcher telemetry: snapshot a layout and inspect stored records", long_about = None)]
struct Cli {
    /// Settings file (JSON); defaults apply when it does not exist
    #[arg(short, long, default_value = "launchstats.json")]
    settings: PathBuf,

    /// SQLite file; overrides the settings value
    #[arg(short, long)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log a full snapshot of a layout dump
    Snapshot {
        /// Layout dump (JSON with workspaceItems, folders, appWidgets)
        #[arg(short, long)]
        model: PathBuf,
    },
    /// Print stored launcher events as JSON lines
    Events {
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },
    /// Print stored records of one snapshot as JSON lines
    Records {
        /// Correlation id printed by `snapshot`
        instance_id: i32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = SettingsStore::new(cli.settings.clone())?.settings()?;
    init_logging(settings.verbose);

    let db_path = cli
        .db
        .unwrap_or_else(|| PathBuf::from(&settings.database_file));
    let database = Database::new(db_path)?;
    let mut stdout = io::stdout().lock();

    match cli.command {
        Commands::Snapshot { model } => {
            let instance_id = commands::snapshot(&settings, &database, &model).await?;
            writeln!(stdout, "{instance_id}")?;
        }
        Commands::Events { limit } => {
            commands::print_events(&database, limit, &mut stdout).await?;
        }
        Commands::Records { instance_id } => {
            commands::print_records(&database, instance_id, &mut stdout).await?;
        }
    }

    Ok(())
}
