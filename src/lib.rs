//! Turn-resolution engine for first-generation style monster battles.
//!
//! Two teams each pick an action per turn; the engine orders the actions, resolves moves
//! effect by effect (damage, statistic stages, statuses, forced switches), handles
//! fainting and replacement, and reports the outcome. Presentation hooks in through the
//! [`battle::events::Animator`] trait, and decisions come from [`battle::selectors::Selector`]
//! implementations such as the trainer AI.

// --- MODULE DECLARATIONS ---
pub mod actor;
pub mod battle;
pub mod config;
pub mod errors;
pub mod move_data;
pub mod prefab_teams;
pub mod species;
pub mod team;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
pub use schema::{
    BasePower, BaseStats, EffectData, EffectKind, Item, ItemEffect, Move, MoveData, PokemonType,
    SpeciesData, StatType, StatusType, Target,
};

// --- From this crate's modules (`src/`) ---

// Battle driver and its collaborators.
pub use battle::action::Action;
pub use battle::ai::BattleAi;
pub use battle::events::{Animator, BattleEvent, EventBus, LogAnimator};
pub use battle::runner::{Battle, BattleOptions};
pub use battle::selectors::{CallbackSelector, ScriptedSelector, Selector};
pub use battle::state::{BattleOutcome, BattleState, GameState, Side, TurnRng};

// Core runtime types.
pub use actor::{Actor, StatusCondition};
pub use team::{Leader, Owner, Team};

// Configuration and data access.
pub use config::{AiConfig, EngineConfig, TextOverrides};
pub use move_data::get_move_data;
pub use species::get_species_data;

// Crate-specific error and result types.
pub use errors::{
    ActionError, BattleEngineError, BattleResult, BattleStateError, ConfigError, MoveDataError,
    MoveDataResult, SpeciesDataError, SpeciesDataResult,
};
