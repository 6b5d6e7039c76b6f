use serde::{Deserialize, Serialize};
use std::fmt;
use strum::EnumIter;

/// The statistics every actor carries. Health is tracked as a statistic like the others
/// but is never staged.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum StatType {
    Attack,
    Defense,
    Special,
    Speed,
    Health,
}

impl StatType {
    /// Statistics that take stat stages (-6..=+6) while active.
    pub fn is_staged(self) -> bool {
        !matches!(self, StatType::Health)
    }
}

impl fmt::Display for StatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let display_name = match self {
            StatType::Attack => "Attack",
            StatType::Defense => "Defense",
            StatType::Special => "Special",
            StatType::Speed => "Speed",
            StatType::Health => "HP",
        };
        write!(f, "{}", display_name)
    }
}

/// Major status conditions an effect can inflict.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusType {
    Paralysis,
    Freeze,
    Poison,
    Sleep,
    Burn,
}

/// Which side of the move an effect lands on.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Attacker,
    Defender,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Attacker => write!(f, "Attacker"),
            Target::Defender => write!(f, "Defender"),
        }
    }
}
