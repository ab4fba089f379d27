//! Match Oracle
//!
//! Backtests the predictor roster and serves golden-algorithm consensus calls.

use clap::{Parser, Subcommand};
use match_oracle::{
    api::{self, ApiState},
    config::AppConfig,
    data::build_providers,
    engine::{Engine, EngineHandle},
    types::MatchQuery,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "match-oracle")]
#[command(about = "Football match prediction with backtested algorithm selection")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Override the configured port
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Run one evaluation cycle and print the leaderboard
    Evaluate,
    /// Consensus prediction for one match
    Analyze {
        home: String,
        away: String,
    },
    /// List upcoming fixtures
    Fixtures,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Load configuration
    let config = AppConfig::load(&cli.config)?;

    // Initialize logging; RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Serve { port } => serve(config, port).await,
        Commands::Evaluate => evaluate(config).await,
        Commands::Analyze { home, away } => analyze(config, home, away).await,
        Commands::Fixtures => show_fixtures(config).await,
    }
}

fn build_state(config: &AppConfig) -> anyhow::Result<ApiState> {
    let (matches, fixtures) = build_providers(config)?;
    let engine = Engine::with_default_roster(&config.model, &config.engine);
    Ok(ApiState {
        engine: EngineHandle::new(engine, matches, config.engine.seed),
        fixtures,
    })
}

async fn serve(config: AppConfig, port: Option<u16>) -> anyhow::Result<()> {
    let state = build_state(&config)?;

    if config.engine.initialize_on_startup {
        let engine = state.engine.clone();
        tokio::spawn(async move {
            if let Err(e) = engine.initialize().await {
                tracing::warn!("Startup initialization failed, serving degraded: {}", e);
            }
        });
    } else {
        tracing::info!("Startup initialization disabled; first analysis will train");
    }

    let port = port.unwrap_or(config.server.port);
    api::start_server(state, &config.server.host, port).await
}

async fn evaluate(config: AppConfig) -> anyhow::Result<()> {
    let state = build_state(&config)?;
    state.engine.initialize().await?;
    let summary = state.engine.dashboard_summary().await?;

    println!("\n🏆 Algorithm Leaderboard\n");
    println!("{:<4} {:<28} {:>9}", "#", "Algorithm", "Accuracy");
    println!("{}", "-".repeat(43));
    for ranking in state.engine.rankings().await {
        println!(
            "{:<4} {:<28} {:>8.1}%{}",
            ranking.rank,
            ranking.name,
            ranking.accuracy * 100.0,
            if ranking.golden { "  ⭐" } else { "" }
        );
    }
    println!(
        "\nGolden: {} ({:.1}%) on {} matches",
        summary.golden_algorithm,
        summary.system_accuracy * 100.0,
        summary.data_points
    );
    if summary.empty_holdout {
        println!("⚠️  Holdout was empty; accuracies are all zero");
    }
    Ok(())
}

async fn analyze(config: AppConfig, home: String, away: String) -> anyhow::Result<()> {
    let state = build_state(&config)?;
    let result = state.engine.analyze(&MatchQuery::new(home.clone(), away.clone())).await?;

    let golden = &result.golden_algorithm;
    println!("\n📈 {} vs {}\n", home, away);
    println!(
        "Golden ({}, {:.1}%): {} @ {:.2}",
        golden.name,
        golden.accuracy * 100.0,
        golden.prediction.prediction,
        golden.prediction.confidence
    );
    println!("  {}", golden.prediction.details);

    println!("\nOther algorithms:");
    for block in &result.all_predictions {
        match (block.prediction, block.confidence) {
            (Some(prediction), Some(confidence)) => println!(
                "  {:<28} {} @ {:.2}  ({:.1}%)",
                block.algorithm,
                prediction,
                confidence,
                block.accuracy * 100.0
            ),
            _ => println!("  {:<28} {}", block.algorithm, block.details),
        }
    }
    Ok(())
}

async fn show_fixtures(config: AppConfig) -> anyhow::Result<()> {
    let (_, fixtures) = build_providers(&config)?;
    let fixtures = fixtures.fetch_upcoming_fixtures().await?;

    println!("\n📅 Upcoming Fixtures\n");
    println!("{:<10} {:<18} {:<40} {}", "ID", "Kick-off", "Match", "League");
    println!("{}", "-".repeat(80));
    for fixture in fixtures {
        println!(
            "{:<10} {:<18} {:<40} {}",
            fixture.id,
            fixture.date,
            format!("{} vs {}", fixture.home_team, fixture.away_team),
            fixture.league
        );
    }
    Ok(())
}
