use crate::config::TextOverrides;
use crate::team::Team;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which team an action, effect or event belongs to. The player is always index 0.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Player, Side::Opponent];

    pub fn to_index(self) -> usize {
        match self {
            Side::Player => 0,
            Side::Opponent => 1,
        }
    }

    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Player => write!(f, "Player"),
            Side::Opponent => write!(f, "Opponent"),
        }
    }
}

/// Final result of a battle, from the player's point of view.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleOutcome {
    Victory,
    Defeat,
    Fled,
}

impl BattleOutcome {
    pub fn for_winner(winner: Side) -> Self {
        match winner {
            Side::Player => BattleOutcome::Victory,
            Side::Opponent => BattleOutcome::Defeat,
        }
    }
}

impl fmt::Display for BattleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattleOutcome::Victory => write!(f, "victory"),
            BattleOutcome::Defeat => write!(f, "defeat"),
            BattleOutcome::Fled => write!(f, "fled"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Copy)]
pub enum GameState {
    WaitingForActions,
    TurnInProgress,
    /// Terminal. Nothing further runs for this battle.
    Ended(BattleOutcome),
}

/// Source of the byte rolls (0..=255) the engine consumes.
///
/// Tests script the exact bytes; live battles draw them from a seeded `StdRng`.
/// Probabilities of exactly 0 or 1 never consume a roll.
#[derive(Debug, Clone)]
pub struct TurnRng {
    source: RngSource,
}

#[derive(Debug, Clone)]
enum RngSource {
    Scripted { outcomes: Vec<u8>, index: usize },
    Seeded(StdRng),
}

impl TurnRng {
    pub fn new_for_test(outcomes: Vec<u8>) -> Self {
        Self {
            source: RngSource::Scripted { outcomes, index: 0 },
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self {
            source: RngSource::Seeded(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn new_random() -> Self {
        Self::from_seed(rand::random())
    }

    pub fn next_outcome(&mut self, reason: &str) -> u8 {
        let outcome = match &mut self.source {
            RngSource::Scripted { outcomes, index } => {
                let Some(&outcome) = outcomes.get(*index) else {
                    panic!(
                        "TurnRng exhausted! Tried to get a value for: '{}'. Need more random values.",
                        reason
                    );
                };
                *index += 1;
                outcome
            }
            RngSource::Seeded(rng) => rng.random::<u8>(),
        };

        log::trace!("[RNG] Consumed {} for: {}", outcome, reason);
        outcome
    }

    /// Succeeds when a byte roll falls below `probability * 256`.
    pub fn chance(&mut self, probability: f64, reason: &str) -> bool {
        if probability >= 1.0 {
            return true;
        }
        if probability <= 0.0 {
            return false;
        }
        f64::from(self.next_outcome(reason)) < probability * 256.0
    }

    /// Uniform choice of an index below `len`.
    pub fn choose_index(&mut self, len: usize, reason: &str) -> usize {
        if len <= 1 {
            return 0;
        }
        usize::from(self.next_outcome(reason)) * len / 256
    }

    /// Rolls left in a scripted source; `None` for a seeded one.
    pub fn remaining(&self) -> Option<usize> {
        match &self.source {
            RngSource::Scripted { outcomes, index } => Some(outcomes.len() - *index),
            RngSource::Seeded(_) => None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BattleState {
    pub battle_id: String,
    pub teams: [Team; 2],
    pub turn_number: u32,
    pub game_state: GameState,
    /// Incremented on every flee attempt, successful or not.
    pub flee_attempts: u32,
    pub text: TextOverrides,
}

impl BattleState {
    pub fn new(id: String, player: Team, opponent: Team) -> Self {
        Self {
            battle_id: id,
            teams: [player, opponent],
            turn_number: 1,
            game_state: GameState::WaitingForActions,
            flee_attempts: 0,
            text: TextOverrides::default(),
        }
    }

    pub fn team(&self, side: Side) -> &Team {
        &self.teams[side.to_index()]
    }

    pub fn team_mut(&mut self, side: Side) -> &mut Team {
        &mut self.teams[side.to_index()]
    }

    pub fn is_over(&self) -> bool {
        matches!(self.game_state, GameState::Ended(_))
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        match self.game_state {
            GameState::Ended(outcome) => Some(outcome),
            _ => None,
        }
    }
}
