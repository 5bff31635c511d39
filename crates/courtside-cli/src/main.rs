use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use courtside_acquire::{FetchFailurePolicy, Pipeline, SourceConfig};
use courtside_model::{AttributeKind, PlayerId};
use courtside_table::{PlayerColumns, ShotTable, TableConfig};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "courtside")]
#[command(about = "Scrape NBA player wingspan, height and position into CSV tables")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_HASH"), ")"))]
struct Cli {
    /// Log level: error, warn, info, debug, trace
    #[arg(long, global = true, default_value = "info", value_enum)]
    log_level: LogLevel,

    /// Use UTC timestamps instead of local time
    #[arg(long, global = true)]
    utc: bool,

    #[command(flatten)]
    sources: SourceArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Args)]
struct SourceArgs {
    /// Base URL for nbasavant.com player pages (wingspan)
    #[arg(long, global = true, default_value = courtside_acquire::source::SAVANT_BASE_URL)]
    savant_url: String,

    /// Base URL for nba.com player pages (height, position)
    #[arg(long, global = true, default_value = courtside_acquire::source::NBA_BASE_URL)]
    nba_url: String,

    /// What to do when a player page cannot be retrieved
    #[arg(long, global = true, default_value = "abort", value_enum)]
    on_fetch_error: OnFetchError,

    /// Per-request timeout in seconds (no timeout when unset)
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OnFetchError {
    /// Stop the run with the error
    Abort,
    /// Record the page's attributes as NA and continue
    Missing,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a player table (height, position) for every shooter and closest defender
    Players {
        /// Input shot table (CSV with a header row)
        #[arg(short, long, default_value = "shot_data.csv")]
        input: PathBuf,

        /// Output player table
        #[arg(short, long, default_value = "player_info.csv")]
        output: PathBuf,

        /// Shooter id column (default: player_id)
        #[arg(long)]
        shooter_column: Option<String>,

        /// Closest-defender id column (default: closest_defender_id or CLOSEST_DEFENDER_PLAYER_ID)
        #[arg(long)]
        defender_column: Option<String>,

        /// Also fetch wingspan from nbasavant.com
        #[arg(long)]
        wingspan: bool,
    },

    /// Append closest-defender height and wingspan to every shot row
    Defenders {
        /// Input shot table (CSV with a header row)
        #[arg(short, long, default_value = "shot_data.csv")]
        input: PathBuf,

        /// Output shot table
        #[arg(short, long, default_value = "shot_data2.csv")]
        output: PathBuf,

        /// Closest-defender id column (default: closest_defender_id or CLOSEST_DEFENDER_PLAYER_ID)
        #[arg(long)]
        defender_column: Option<String>,
    },

    /// Fetch one player's attributes and print them as JSON
    Lookup {
        /// Player id as used in nba.com and nbasavant.com URLs
        player_id: String,

        /// Attributes to fetch (repeatable; default: all)
        #[arg(short, long = "kind")]
        kinds: Vec<AttributeKind>,
    },
}

impl SourceArgs {
    fn into_config(self) -> SourceConfig {
        SourceConfig {
            savant_base_url: self.savant_url,
            nba_base_url: self.nba_url,
            timeout: self.timeout_secs.map(Duration::from_secs),
            on_fetch_error: match self.on_fetch_error {
                OnFetchError::Abort => FetchFailurePolicy::Abort,
                OnFetchError::Missing => FetchFailurePolicy::Missing,
            },
            ..SourceConfig::default()
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Map log level, suppressing noisy HTML-parsing crates at debug/trace
    let level = match cli.log_level {
        LogLevel::Error => "error",
        LogLevel::Warn  => "warn",
        LogLevel::Info  => "info",
        LogLevel::Debug => "debug,selectors=warn,html5ever=warn",
        LogLevel::Trace => "trace,selectors=warn,html5ever=warn",
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // Timestamp format: 2026-02-14 19:44:09.123 -08:00
    let time_format = "%Y-%m-%d %H:%M:%S%.3f %:z";

    if cli.utc {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_timer(tracing_subscriber::fmt::time::ChronoUtc::new(time_format.to_string()))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_timer(tracing_subscriber::fmt::time::ChronoLocal::new(time_format.to_string()))
            .init();
    }

    let pipeline = Pipeline::new(cli.sources.into_config())?;

    match cli.command {
        Commands::Players {
            input,
            output,
            shooter_column,
            defender_column,
            wingspan,
        } => {
            let config = TableConfig {
                shooter_column,
                defender_column,
                ..TableConfig::new(input, output)
            };
            let columns = if wingspan {
                PlayerColumns::default().with_wingspan()
            } else {
                PlayerColumns::default()
            };
            run_players(&pipeline, &config, &columns).await?;
        }
        Commands::Defenders {
            input,
            output,
            defender_column,
        } => {
            let config = TableConfig {
                defender_column,
                ..TableConfig::new(input, output)
            };
            run_defenders(&pipeline, &config).await?;
        }
        Commands::Lookup { player_id, kinds } => {
            let id = PlayerId::parse(&player_id)
                .ok_or_else(|| anyhow::anyhow!("Player id must not be empty"))?;
            let kinds = if kinds.is_empty() {
                AttributeKind::ALL.to_vec()
            } else {
                kinds
            };
            tracing::info!(player = %id, kinds = ?kinds, "Looking up player");
            let record = pipeline.fetch_player(&id, &kinds).await?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
    }

    Ok(())
}

/// Unique shooters and defenders, one row each.
async fn run_players(pipeline: &Pipeline, config: &TableConfig, columns: &PlayerColumns) -> Result<()> {
    tracing::info!(input = %config.input_path.display(), output = %config.output_path.display(), "Building player table");
    let shots = ShotTable::read(&config.input_path)?;
    let shooter = shots.resolve_column(&config.shooter_candidates())?;
    let defender = shots.resolve_column(&config.defender_candidates())?;

    let ids = shots.unique_ids(&[shooter, defender]);
    tracing::info!(players = ids.len(), "Collected unique player ids");

    let records = pipeline.fetch_roster(&ids, columns.kinds()).await?;
    courtside_table::write_player_table(&config.output_path, &records, columns)?;
    Ok(())
}

/// Every shot row with its closest defender's height and wingspan.
async fn run_defenders(pipeline: &Pipeline, config: &TableConfig) -> Result<()> {
    tracing::info!(input = %config.input_path.display(), output = %config.output_path.display(), "Joining defender attributes");
    let shots = ShotTable::read(&config.input_path)?;
    let defender = shots.resolve_column(&config.defender_candidates())?;

    let ids = shots.unique_ids(&[defender]);
    tracing::info!(defenders = ids.len(), "Collected unique defender ids");

    let records = pipeline
        .fetch_roster(&ids, &[AttributeKind::Height, AttributeKind::Wingspan])
        .await?;
    courtside_table::write_shots_with_defenders(&config.output_path, &shots, defender, &records)?;
    Ok(())
}
