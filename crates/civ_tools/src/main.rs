//! Hex Civ - Development Tools

use std::path::PathBuf;

use civ_core::config::GameConfig;
use civ_core::game::Game;
use civ_tools::ascii::{render_game, AsciiConfig};
use civ_tools::autoplay::{run_autoplay, AutoplayConfig};
use civ_tools::config::load_config;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "civ-tools")]
#[command(about = "Development tools for Hex Civ")]
#[command(version)]
struct Cli {
    /// Enable debug logging to stderr (ignored when RUST_LOG is set)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a map and print it as ASCII
    Generate {
        /// Generation seed
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Map width in tiles
        #[arg(long, default_value = "50")]
        width: u32,

        /// Map height in tiles
        #[arg(long, default_value = "40")]
        height: u32,

        /// AI civilizations besides the player
        #[arg(long, default_value = "1")]
        civs: u32,
    },

    /// Play a game headless and print the standings
    Simulate {
        /// RON config file (defaults apply when omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Rounds to play
        #[arg(short, long, default_value = "50")]
        turns: u32,

        /// Let the AI play the human civilization too
        #[arg(long)]
        ai_player: bool,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Validate a RON config file
    Validate {
        /// Path to config file
        path: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // Logs go to stderr; stdout carries maps and reports
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Generate {
            seed,
            width,
            height,
            civs,
        } => cmd_generate(seed, width, height, civs),
        Commands::Simulate {
            config,
            turns,
            ai_player,
            json,
        } => cmd_simulate(config, turns, ai_player, json),
        Commands::Validate { path } => cmd_validate(&path),
    }
}

fn cmd_generate(seed: u64, width: u32, height: u32, civs: u32) {
    let config = GameConfig::default()
        .with_seed(seed)
        .with_map_size(width, height)
        .with_ai_civilizations(civs);

    let game = match Game::new(config) {
        Ok(game) => game,
        Err(e) => {
            tracing::error!("Generation failed: {e}");
            std::process::exit(1);
        }
    };

    let ascii = AsciiConfig {
        show_entities: false,
        show_starts: true,
        show_legend: true,
    };
    print!("{}", render_game(&game, &ascii));

    if let Some(summary) = game.generation() {
        println!(
            "\nLand: {} / {} target tiles, {} continents",
            summary.land_tiles,
            summary.target_land_tiles,
            summary.continent_seeds.len()
        );
    }
    println!("Starting locations:");
    for (i, (start, civ)) in game
        .starting_locations()
        .iter()
        .zip(game.civilizations())
        .enumerate()
    {
        println!("  {i}: {} at {start}", civ.name);
    }
}

fn cmd_simulate(config: Option<PathBuf>, turns: u32, ai_player: bool, json: bool) {
    let config = match config {
        Some(path) => match load_config(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!("Failed to load config: {e}");
                std::process::exit(1);
            }
        },
        None => GameConfig::default(),
    };

    let autoplay = AutoplayConfig { turns, ai_player };
    let report = match run_autoplay(config, &autoplay) {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Simulation failed: {e}");
            std::process::exit(1);
        }
    };

    if json {
        match report.to_json() {
            Ok(text) => println!("{text}"),
            Err(e) => {
                tracing::error!("Failed to serialize report: {e}");
                std::process::exit(1);
            }
        }
    } else {
        print!("{}", report.to_text());
    }
}

fn cmd_validate(path: &std::path::Path) {
    tracing::info!("Validating config: {}", path.display());
    match load_config(path) {
        Ok(config) => tracing::info!(
            width = config.map_width,
            height = config.map_height,
            civilizations = config.total_civilizations(),
            seed = config.seed,
            "Validation passed"
        ),
        Err(e) => {
            tracing::error!("Validation failed: {e}");
            std::process::exit(1);
        }
    }
}
