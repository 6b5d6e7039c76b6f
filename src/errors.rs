use schema::{Item, Move};
use thiserror::Error;

/// Main error type for the turn engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BattleEngineError {
    /// Error related to move data lookup or processing
    #[error("Move data error: {0}")]
    MoveData(#[from] MoveDataError),
    /// Error related to species data lookup or processing
    #[error("Species data error: {0}")]
    SpeciesData(#[from] SpeciesDataError),
    /// Error related to invalid battle state
    #[error("Battle state error: {0}")]
    BattleState(#[from] BattleStateError),
    /// Error related to invalid actions
    #[error("Action error: {0}")]
    Action(#[from] ActionError),
    /// Error related to loading tuning or text configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors related to move data operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveDataError {
    /// The specified move was not found in the table
    #[error("Move not found: {0:?}")]
    MoveNotFound(Move),
    /// Move table is malformed: unknown effect kinds, duplicate entries, bad syntax
    #[error("Malformed move data: {0}")]
    MalformedData(String),
}

/// Errors related to species data operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpeciesDataError {
    #[error("Species not found: {0}")]
    SpeciesNotFound(String),
    #[error("Malformed species data: {0}")]
    MalformedData(String),
}

/// Errors related to battle state validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BattleStateError {
    #[error("Team {0} has no actors")]
    EmptyTeam(String),
    #[error("Team {team} has active index {index} but only {len} actors")]
    InvalidActiveIndex { team: String, index: usize, len: usize },
    #[error("Team {0} has no actor able to battle")]
    NoHealthyActor(String),
    #[error("Team {team} would start with fainted {actor} in battle")]
    FaintedActiveActor { team: String, actor: String },
    #[error("Battle has already ended")]
    BattleOver,
    #[error("Inconsistent battle state: {0}")]
    InconsistentState(String),
}

/// Errors related to submitted actions. The Display text is the message shown to the
/// person choosing the action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("{0} is already out!")]
    AlreadyActive(String),
    #[error("There is no team member in slot {0}.")]
    InvalidActorIndex(usize),
    #[error("{0} has no energy left to battle!")]
    ActorFainted(String),
    #[error("{actor} doesn't know {move_}.")]
    MoveNotKnown { actor: String, move_: Move },
    #[error("No {0} left in the bag.")]
    NoItemRemaining(Item),
    #[error("There's no running from a trainer battle!")]
    FleeForbidden,
    #[error("No valid action after {0} attempts")]
    TooManyAttempts(usize),
}

/// Errors raised while loading configuration documents
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Could not read {path}: {message}")]
    Io { path: String, message: String },
    #[error("Could not parse {source_name}: {message}")]
    Parse { source_name: String, message: String },
}

/// Result type alias for operations that can fail with a BattleEngineError
pub type BattleResult<T> = Result<T, BattleEngineError>;

/// Result type alias for move data operations
pub type MoveDataResult<T> = Result<T, MoveDataError>;

/// Result type alias for species data operations
pub type SpeciesDataResult<T> = Result<T, SpeciesDataError>;
