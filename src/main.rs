#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod output;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;

use workforce::{
    filter_and_sort, load_catalog, load_config, Config, Mission, MissionId, MissionRepository,
    MissionStatus, RecordStore, Result, SelectedAgent, SortMode, StoreLocation, WorkforceError,
};

use output::{emit_error, emit_output, exit_status};

#[derive(Parser)]
#[command(name = "workforce")]
#[command(about = "AI workforce command center: agent catalog and mission records")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file (default: .workforce/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Search and sort the agent catalog
    Agents {
        /// Case-insensitive match on name, primary use and strengths
        #[arg(short, long, default_value = "")]
        query: String,

        /// name-asc, name-desc or featured
        #[arg(short, long, default_value = "name-asc")]
        sort: SortMode,

        /// Read the roster cached by init-db instead of the catalog file
        #[arg(long)]
        cached: bool,
    },

    /// Create or upgrade the record store and cache the agent roster
    InitDb,

    /// Manage mission records
    Missions {
        #[command(subcommand)]
        command: MissionCommands,
    },
}

#[derive(Subcommand)]
enum MissionCommands {
    /// List missions
    List {
        /// Only missions in this status
        #[arg(short, long, value_parser = parse_status)]
        status: Option<MissionStatus>,

        /// Newest first
        #[arg(long, conflicts_with = "status")]
        recent: bool,
    },

    /// Show one mission
    Show { id: String },

    /// Validate and store a mission read from a JSON file
    Create {
        #[arg(short, long)]
        file: PathBuf,

        /// Assign a fresh mission_id when the file has none
        #[arg(long)]
        generate_id: bool,
    },

    /// Replace a mission's agent team with the JSON array in a file
    Assign {
        id: String,
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Move a mission to another status
    Status {
        id: String,
        #[arg(value_parser = parse_status)]
        status: MissionStatus,
    },

    /// Delete a mission; deleting a missing id succeeds
    Delete { id: String },
}

impl Commands {
    const fn name(&self) -> &'static str {
        match self {
            Self::Agents { .. } => "agents",
            Self::InitDb => "init-db",
            Self::Missions { command } => match command {
                MissionCommands::List { .. } => "missions.list",
                MissionCommands::Show { .. } => "missions.show",
                MissionCommands::Create { .. } => "missions.create",
                MissionCommands::Assign { .. } => "missions.assign",
                MissionCommands::Status { .. } => "missions.status",
                MissionCommands::Delete { .. } => "missions.delete",
            },
        }
    }
}

fn parse_status(value: &str) -> std::result::Result<MissionStatus, String> {
    MissionStatus::try_from(value.trim())
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    if let Err(err) = init_logging(&cli.log_level) {
        eprintln!("{err:#}");
    }

    let command = cli.command.name();
    match run(cli).await {
        Ok(payload) => {
            emit_output(command, payload);
            ExitCode::SUCCESS
        }
        Err(err) => {
            emit_error(command, &err);
            ExitCode::from(exit_status(&err))
        }
    }
}

fn init_logging(level: &str) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .context("Failed to create log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install subscriber: {e}"))
}

async fn run(cli: Cli) -> Result<Value> {
    let config = load_config(cli.config).await?;
    debug!("database at {}", config.database_path.display());

    match cli.command {
        Commands::Agents {
            query,
            sort,
            cached,
        } => list_agents(&config, &query, sort, cached).await,
        Commands::InitDb => init_db(&config).await,
        Commands::Missions { command } => run_missions(&config, command).await,
    }
}

async fn open_store(config: &Config) -> Result<&'static RecordStore> {
    let store = RecordStore::global(|| StoreLocation::File(config.database_path.clone()));
    store.open().await?;
    Ok(store)
}

async fn list_agents(config: &Config, query: &str, sort: SortMode, cached: bool) -> Result<Value> {
    let (agents, source) = if cached {
        let store = open_store(config).await?;
        (store.list_agents().await?, "cache".to_string())
    } else {
        let catalog = load_catalog(config.catalog_path.as_deref()).await;
        let source = if catalog.is_fallback() {
            "fallback".to_string()
        } else {
            config
                .catalog_path
                .as_deref()
                .map_or_else(String::new, |p| p.display().to_string())
        };
        (catalog.agents().to_vec(), source)
    };

    let results = filter_and_sort(&agents, query, sort, &config.featured);
    Ok(json!({
        "source": source,
        "sort": sort.as_str(),
        "query": query,
        "count": results.len(),
        "agents": results,
    }))
}

async fn init_db(config: &Config) -> Result<Value> {
    let store = open_store(config).await?;
    let catalog = load_catalog(config.catalog_path.as_deref()).await;
    store.put_agents(catalog.agents()).await?;

    Ok(json!({
        "database_path": config.database_path.display().to_string(),
        "schema_version": store.schema_version().await?,
        "agents_cached": catalog.agents().len(),
        "catalog_fallback": catalog.is_fallback(),
    }))
}

async fn run_missions(config: &Config, command: MissionCommands) -> Result<Value> {
    let repo = MissionRepository::new(open_store(config).await?);

    match command {
        MissionCommands::List { status, recent } => {
            let missions = match (status, recent) {
                (Some(status), _) => repo.list_by_status(status).await?,
                (None, true) => repo.list_recent().await?,
                (None, false) => repo.list_all().await?,
            };
            Ok(json!({ "count": missions.len(), "missions": missions }))
        }
        MissionCommands::Show { id } => {
            let id = MissionId::new(id);
            let mission = repo
                .get_by_id(&id)
                .await?
                .ok_or_else(|| WorkforceError::NotFound(id.to_string()))?;
            Ok(serde_json::to_value(mission)?)
        }
        MissionCommands::Create { file, generate_id } => {
            let mut mission: Mission = read_json(&file).await?;
            if generate_id && mission.mission_id.is_blank() {
                mission.mission_id = MissionId::generate();
            }
            repo.create_mission(&mission).await?;
            Ok(serde_json::to_value(mission)?)
        }
        MissionCommands::Assign { id, file } => {
            let team: Vec<SelectedAgent> = read_json(&file).await?;
            let mission = repo
                .add_selected_agents_to_mission(&MissionId::new(id), team)
                .await?;
            Ok(serde_json::to_value(mission)?)
        }
        MissionCommands::Status { id, status } => {
            let mission = repo.set_status(&MissionId::new(id), status).await?;
            Ok(serde_json::to_value(mission)?)
        }
        MissionCommands::Delete { id } => {
            let id = MissionId::new(id);
            repo.delete(&id).await?;
            Ok(json!({ "mission_id": id, "deleted": true }))
        }
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&text)?)
}
