//! Roulette CLI
//!
//! Inspect the bet catalogue and play demo rounds against the in-memory
//! stores.

use clap::{Parser, Subcommand};
use roulette::{
    config::generate_sample_config,
    errors::{ConfigurationError, RouletteResult},
    games::{FixedNumber, NumberSource, SecureNumberSource},
    BetTypeRegistry, ConfigLoader, MemoryTableStore, MemoryWagerStore, RouletteConfig, Table,
    TableController, TableValidator, Wager, WageringController,
};
use std::{path::PathBuf, sync::Arc};
use tracing::info;

/// Roulette wagering CLI
#[derive(Parser)]
#[command(name = "roulette")]
#[command(about = "Single-zero roulette tables, wagers and rounds")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List bet types, their multipliers and grouping
    BetTypes,

    /// Create a demo table, place wagers and play rounds
    Play {
        /// Wager as TYPE:SELECTION:AMOUNT, e.g. straight:17:50 or red/black:red:25
        #[arg(short, long = "bet", required = true)]
        bets: Vec<String>,

        /// Table and wager currency
        #[arg(long, default_value = "GBP")]
        currency: String,

        /// Table minimum bet
        #[arg(long, default_value = "10")]
        minimum_bet: i64,

        /// Table maximum bet
        #[arg(long, default_value = "1000")]
        maximum_bet: i64,

        /// Number of rounds to play
        #[arg(short, long, default_value = "1")]
        rounds: usize,

        /// Force every draw to this number instead of the OS CSPRNG
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=36))]
        force: Option<u8>,
    },

    /// Write a sample configuration file
    SampleConfig {
        /// Destination path
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_path(path);
    }
    let config = loader.load()?;
    init_tracing(&config, cli.verbose);

    match cli.command {
        Commands::BetTypes => print_bet_types(),
        Commands::Play {
            bets,
            currency,
            minimum_bet,
            maximum_bet,
            rounds,
            force,
        } => {
            let table = Table::new("demo", minimum_bet, maximum_bet, currency.clone());
            play(&config, table, &bets, &currency, rounds, force).await?;
        }
        Commands::SampleConfig { path } => {
            generate_sample_config(&path.to_string_lossy())?;
            println!("Wrote sample configuration to {}", path.display());
        }
    }

    Ok(())
}

fn init_tracing(config: &RouletteConfig, verbose: bool) {
    let fallback = if verbose {
        "roulette=debug".to_string()
    } else {
        config.logging.filter.clone()
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| fallback.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn print_bet_types() {
    let registry = BetTypeRegistry::standard();
    println!("{:<10} {:>10}  {}", "TYPE", "MULTIPLIER", "GROUP");
    for spec in registry.bet_types() {
        let group = if spec.bet_type.is_inside() { "inside" } else { "outside" };
        println!("{:<10} {:>10}  {}", spec.bet_type, spec.multiplier, group);
    }
}

/// Parse TYPE:SELECTION:AMOUNT
fn parse_bet(raw: &str, table: &Table, currency: &str) -> RouletteResult<Wager> {
    let invalid = |reason: &str| ConfigurationError::InvalidValue {
        field: "--bet".to_string(),
        value: raw.to_string(),
        reason: reason.to_string(),
    };

    let mut parts = raw.split(':');
    let (Some(bet_type), Some(selection), Some(amount), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid("expected TYPE:SELECTION:AMOUNT").into());
    };
    let amount: i64 = amount.parse().map_err(|_| invalid("amount is not an integer"))?;

    Ok(Wager::new(table.id, bet_type, selection, amount, currency))
}

async fn play(
    config: &RouletteConfig,
    mut table: Table,
    bets: &[String],
    currency: &str,
    rounds: usize,
    force: Option<u8>,
) -> RouletteResult<()> {
    let registry = Arc::new(BetTypeRegistry::standard());
    let source: Arc<dyn NumberSource> = match force {
        Some(number) => Arc::new(FixedNumber::new(number).ok_or_else(|| {
            ConfigurationError::InvalidValue {
                field: "--force".to_string(),
                value: number.to_string(),
                reason: "not a pocket on the wheel".to_string(),
            }
        })?),
        None => Arc::new(SecureNumberSource),
    };

    let tables = TableController::new(
        Arc::new(MemoryTableStore::new()),
        TableValidator::new(config.tables.clone()),
    );
    let wagers = WageringController::with_parts(
        Arc::new(MemoryWagerStore::new()),
        registry,
        source,
        config.resolution,
    );

    table.id = tables.create(table.clone()).await?;
    info!(table_id = %table.id, "Demo table ready");

    for raw in bets {
        let wager = parse_bet(raw, &table, currency)?;
        let id = wagers.create(wager).await?;
        info!(wager_id = %id, bet = %raw, "Wager placed");
    }

    for _ in 0..rounds {
        let result = wagers.play(table.id).await?;
        println!("{}", serde_json::to_string_pretty(&result)?);
    }

    Ok(())
}
