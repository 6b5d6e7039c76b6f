use crate::{Move, PokemonType, StatType, StatusType, Target};
use serde::{Deserialize, Serialize};

/// Base power of a damage effect. `Infinite` is the signal value for one-hit knockouts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BasePower {
    Finite(u16),
    Infinite,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EffectKind {
    Damage { power: BasePower },
    Statistic { stat: StatType, delta: i8 },
    Status { status: StatusType },
    Switch,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectData {
    pub target: Target,
    #[serde(default = "certain")]
    pub probability: f64,
    pub kind: EffectKind,
}

fn certain() -> f64 {
    1.0
}

/// Immutable reference data for a move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveData {
    pub id: Move,
    pub move_type: PokemonType,
    /// Hit chance in percent; `None` never misses.
    #[serde(default)]
    pub accuracy: Option<u8>,
    #[serde(default)]
    pub priority: i8,
    pub pp: u8,
    #[serde(default)]
    pub high_critical: bool,
    pub effects: Vec<EffectData>,
}

impl MoveData {
    /// True when the move does nothing but inflict status conditions.
    pub fn is_status_only(&self) -> bool {
        !self.effects.is_empty()
            && self
                .effects
                .iter()
                .all(|effect| matches!(effect.kind, EffectKind::Status { .. }))
    }

    pub fn deals_damage(&self) -> bool {
        self.effects
            .iter()
            .any(|effect| matches!(effect.kind, EffectKind::Damage { .. }))
    }
}
