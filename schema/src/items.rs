use crate::{StatType, StatusType};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Item {
    Potion,
    SuperPotion,
    FullHeal,
    Antidote,
    ParalyzeHeal,
    Awakening,
    BurnHeal,
    IceHeal,
    XAttack,
    XDefend,
    XSpeed,
    XSpecial,
    DireHit,
}

/// What an item does when used on an actor in battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemEffect {
    Heal(u16),
    /// `None` cures any status.
    Cure(Option<StatusType>),
    Boost(StatType, i8),
    Focus,
}

impl Item {
    pub fn effect(self) -> ItemEffect {
        match self {
            Item::Potion => ItemEffect::Heal(20),
            Item::SuperPotion => ItemEffect::Heal(50),
            Item::FullHeal => ItemEffect::Cure(None),
            Item::Antidote => ItemEffect::Cure(Some(StatusType::Poison)),
            Item::ParalyzeHeal => ItemEffect::Cure(Some(StatusType::Paralysis)),
            Item::Awakening => ItemEffect::Cure(Some(StatusType::Sleep)),
            Item::BurnHeal => ItemEffect::Cure(Some(StatusType::Burn)),
            Item::IceHeal => ItemEffect::Cure(Some(StatusType::Freeze)),
            Item::XAttack => ItemEffect::Boost(StatType::Attack, 1),
            Item::XDefend => ItemEffect::Boost(StatType::Defense, 1),
            Item::XSpeed => ItemEffect::Boost(StatType::Speed, 1),
            Item::XSpecial => ItemEffect::Boost(StatType::Special, 1),
            Item::DireHit => ItemEffect::Focus,
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let display_name = match self {
            Item::Potion => "Potion",
            Item::SuperPotion => "Super Potion",
            Item::FullHeal => "Full Heal",
            Item::Antidote => "Antidote",
            Item::ParalyzeHeal => "Paralyze Heal",
            Item::Awakening => "Awakening",
            Item::BurnHeal => "Burn Heal",
            Item::IceHeal => "Ice Heal",
            Item::XAttack => "X Attack",
            Item::XDefend => "X Defend",
            Item::XSpeed => "X Speed",
            Item::XSpecial => "X Special",
            Item::DireHit => "Dire Hit",
        };
        write!(f, "{}", display_name)
    }
}
