//! hall-autopilot - Automated Forgotten Hall runner
//!
//! Plans optimal per-node team assignments from the user's configured team
//! modules and tracks star history across the hall's biweekly rotations.

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use hall_autopilot::config::{self, HallConfig};
use hall_autopilot::domain::{Affinity, Roster};
use hall_autopilot::planner::{search_best_assignment, ModuleProfile, SearchConfig};
use hall_autopilot::storage::{self, record::RunRecord};

/// hall-autopilot - optimal team planning for the Forgotten Hall
#[derive(Parser, Debug)]
#[command(name = "hall-autopilot")]
#[command(about = "Plans optimal per-node teams from configured team modules")]
struct Args {
    /// Path to the config file (defaults to the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the stored run record and exit
    #[arg(long)]
    record: bool,

    /// Per-node required affinities, one argument per node,
    /// e.g. `fire,ice quantum` for a two-node mission
    nodes: Vec<String>,
}

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    if args.record {
        return show_record();
    }

    if args.nodes.is_empty() {
        bail!("no nodes given; pass one affinity list per node, e.g. `fire,ice quantum`");
    }

    let node_affinities = parse_nodes(&args.nodes)?;
    let config = load_or_create_config(args.config.as_deref());

    let roster = Roster::builtin();
    let modules = ModuleProfile::resolve_all(&config.team_modules, &roster)
        .context("configured team modules do not resolve against the roster")?;
    if modules.is_empty() {
        bail!("no team modules configured; add [[team_modules]] entries to the config file");
    }

    let search_config = SearchConfig {
        projection_cap: config.runner.projection_cap,
    };
    match search_best_assignment(&node_affinities, &modules, &search_config) {
        Some(plan) => {
            for (idx, node) in plan.iter().enumerate() {
                let names: Vec<&str> = node
                    .iter()
                    .map(|id| roster.get(id).map_or(id.as_str(), |c| c.name.as_str()))
                    .collect();
                println!("node {}: {}", idx + 1, names.join(", "));
            }
        }
        None => println!("no feasible team assignment for {} nodes", node_affinities.len()),
    }

    Ok(())
}

/// Parse one `fire,ice`-style affinity list per node argument
fn parse_nodes(nodes: &[String]) -> Result<Vec<Vec<Affinity>>> {
    nodes
        .iter()
        .map(|spec| {
            spec.split(',')
                .filter(|part| !part.trim().is_empty())
                .map(|part| part.parse::<Affinity>().map_err(anyhow::Error::from))
                .collect::<Result<Vec<_>>>()
        })
        .collect()
}

/// Load configuration from the given path or the default location, falling
/// back to defaults when no file exists.
fn load_or_create_config(path: Option<&std::path::Path>) -> HallConfig {
    if let Some(path) = path {
        match config::load_config(path) {
            Ok(config) => {
                info!("Loaded configuration from {:?}", path);
                return config;
            }
            Err(e) => {
                tracing::warn!("Failed to load {:?}: {e}", path);
            }
        }
    } else if let Ok(config_dir) = storage::get_config_dir() {
        let config_path = config_dir.join("config.toml");
        if config_path.exists() {
            if let Ok(config) = config::load_config(&config_path) {
                info!("Loaded configuration from {:?}", config_path);
                return config;
            }
        }
    }
    info!("Using default configuration");
    HallConfig::default()
}

/// Print the stored run record
fn show_record() -> Result<()> {
    let record_path = storage::get_data_dir()?.join("record.json");
    if !record_path.exists() {
        println!("no run record stored yet");
        return Ok(());
    }
    let record = RunRecord::load(&record_path)?;
    println!("last run: {} ({:?})", record.dt, record.status);
    println!("total stars: {}", record.star);
    for (mission, star) in &record.mission_stars {
        println!("  mission {mission}: {star} stars");
    }
    Ok(())
}
