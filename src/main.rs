//! Demo driver: plays one AI-vs-AI battle between prefab teams and prints what happened.
//!
//! Run with: `pokemon-turn-engine --opponent trainer --seed 42`

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use pokemon_turn_engine::battle::runner::{Battle, BattleOptions};
use pokemon_turn_engine::prefab_teams::get_prefab_team;
use pokemon_turn_engine::{BattleAi, EngineConfig, LogAnimator};
use simple_logger::SimpleLogger;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Opponent {
    /// Brock, a gym leader driven by the trainer AI
    Trainer,
    /// A wild Rattata that picks moves at random
    Wild,
}

impl Opponent {
    fn prefab_id(self) -> &'static str {
        match self {
            Opponent::Trainer => "brock",
            Opponent::Wild => "wild_rattata",
        }
    }
}

/// Play a battle between prefab teams
#[derive(Parser)]
#[command(name = "pokemon-turn-engine")]
#[command(about = "Resolve an AI-vs-AI battle turn by turn", long_about = None)]
#[command(version)]
struct Cli {
    /// Seed for the battle's random source (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Who the player's team faces
    #[arg(long, value_enum, default_value_t = Opponent::Trainer)]
    opponent: Opponent,

    /// RON file with AI tuning and text overrides
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the event log as JSON instead of narrative text
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .env()
        .init()
        .context("failed to install logger")?;

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => EngineConfig::builtin().context("built-in AI table is invalid")?,
    };

    let player = get_prefab_team("starters")
        .context("missing player prefab")?
        .build()?;
    let opponent_id = cli.opponent.prefab_id();
    let opponent = get_prefab_team(opponent_id)
        .with_context(|| format!("missing prefab team {}", opponent_id))?
        .build()?;

    // The player's side is driven by the same AI; the opponent's comes from `options.ai`.
    let player_selector = Box::new(BattleAi::new(config.ai.clone()));
    let options = BattleOptions {
        battle_id: format!("demo-{}", opponent_id),
        seed: cli.seed,
        text: config.text,
        ai: Some(config.ai),
    };

    let mut battle = Battle::versus_ai(player, opponent, player_selector, options)?
        .with_animator(Box::new(LogAnimator));
    let outcome = battle.run_with(|outcome| log::info!("Outcome: {}", outcome))?;

    if cli.json {
        println!("{}", battle.events().to_json()?);
    } else {
        battle.events().print_formatted(battle.state());
        println!("Result: {}", outcome);
    }
    Ok(())
}
