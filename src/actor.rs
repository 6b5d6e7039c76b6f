use crate::errors::MoveDataResult;
use crate::move_data::get_move_max_pp;
use schema::{Item, Move, PokemonType, SpeciesData, StatType, StatusType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single statistic. `current` is the in-battle value and never exceeds `normal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistic {
    pub current: u16,
    pub normal: u16,
}

impl Statistic {
    pub fn new(normal: u16) -> Self {
        Self {
            current: normal,
            normal,
        }
    }

    pub fn set_current(&mut self, value: u16) {
        self.current = value.min(self.normal);
    }

    pub fn restore(&mut self) {
        self.current = self.normal;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub attack: Statistic,
    pub defense: Statistic,
    pub special: Statistic,
    pub speed: Statistic,
    pub health: Statistic,
}

impl Statistics {
    pub fn get(&self, stat: StatType) -> &Statistic {
        match stat {
            StatType::Attack => &self.attack,
            StatType::Defense => &self.defense,
            StatType::Special => &self.special,
            StatType::Speed => &self.speed,
            StatType::Health => &self.health,
        }
    }

    pub fn get_mut(&mut self, stat: StatType) -> &mut Statistic {
        match stat {
            StatType::Attack => &mut self.attack,
            StatType::Defense => &mut self.defense,
            StatType::Special => &mut self.special,
            StatType::Speed => &mut self.speed,
            StatType::Health => &mut self.health,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusCondition {
    Paralysis,
    Freeze,
    Poison,
    /// Turns of sleep remaining.
    Sleep(u8),
    Burn,
}

impl StatusCondition {
    pub fn status_type(&self) -> StatusType {
        match self {
            StatusCondition::Paralysis => StatusType::Paralysis,
            StatusCondition::Freeze => StatusType::Freeze,
            StatusCondition::Poison => StatusType::Poison,
            StatusCondition::Sleep(_) => StatusType::Sleep,
            StatusCondition::Burn => StatusType::Burn,
        }
    }
}

impl fmt::Display for StatusCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StatusCondition::Paralysis => "paralysis",
            StatusCondition::Freeze => "freeze",
            StatusCondition::Poison => "poison",
            StatusCondition::Sleep(_) => "sleep",
            StatusCondition::Burn => "burn",
        };
        write!(f, "{}", name)
    }
}

/// Per-actor usage record for a known move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveSlot {
    pub move_: Move,
    pub remaining: u8,
    pub uses: u32,
}

impl MoveSlot {
    /// Create a move slot with full PP
    pub fn new(move_: Move) -> MoveDataResult<Self> {
        Ok(MoveSlot {
            move_,
            remaining: get_move_max_pp(move_)?,
            uses: 0,
        })
    }

    /// Spend one PP. Returns false when none is left.
    pub fn use_move(&mut self) -> bool {
        if self.remaining > 0 {
            self.remaining -= 1;
            self.uses += 1;
            true
        } else {
            false
        }
    }
}

/// A battle participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub name: String,
    pub species: String,
    pub level: u8,
    pub experience: u32,
    pub types: Vec<PokemonType>,
    /// Species base speed; drives the critical-hit and flee formulas.
    pub base_speed: u8,
    pub moves: Vec<MoveSlot>,
    pub stats: Statistics,
    pub status: Option<StatusCondition>,
    pub held_item: Option<Item>,
}

impl Actor {
    /// Build an actor from species data using the first-generation stat formula
    /// (no DVs or stat experience).
    pub fn from_species(species: &SpeciesData, level: u8, moves: &[Move]) -> MoveDataResult<Self> {
        let base = &species.base_stats;
        let other = |base_stat: u8| -> u16 {
            let value = (2 * u32::from(base_stat) * u32::from(level)) / 100 + 5;
            value.min(u32::from(u16::MAX)) as u16
        };
        let hp = (2 * u32::from(base.hp) * u32::from(level)) / 100 + u32::from(level) + 10;

        let moves = moves
            .iter()
            .take(4)
            .map(|&move_| MoveSlot::new(move_))
            .collect::<MoveDataResult<Vec<_>>>()?;

        Ok(Actor {
            name: species.name.clone(),
            species: species.name.clone(),
            level,
            experience: u32::from(level).pow(3),
            types: species.types.clone(),
            base_speed: base.speed,
            moves,
            stats: Statistics {
                attack: Statistic::new(other(base.attack)),
                defense: Statistic::new(other(base.defense)),
                special: Statistic::new(other(base.special)),
                speed: Statistic::new(other(base.speed)),
                health: Statistic::new(hp.min(u32::from(u16::MAX)) as u16),
            },
            status: None,
            held_item: None,
        })
    }

    pub fn current_hp(&self) -> u16 {
        self.stats.health.current
    }

    pub fn max_hp(&self) -> u16 {
        self.stats.health.normal
    }

    pub fn is_fainted(&self) -> bool {
        self.stats.health.current == 0
    }

    /// Subtract damage, flooring at zero. Returns the damage actually taken.
    pub fn take_damage(&mut self, amount: u16) -> u16 {
        let taken = amount.min(self.stats.health.current);
        self.stats.health.current -= taken;
        taken
    }

    /// Restore health up to the maximum. Returns the amount actually healed.
    pub fn heal(&mut self, amount: u16) -> u16 {
        let before = self.stats.health.current;
        self.stats
            .health
            .set_current(before.saturating_add(amount));
        self.stats.health.current - before
    }

    /// Inflict a status. Fails if the actor already has one or has fainted.
    /// Paralysis quarters current speed and burn halves current attack.
    pub fn set_status(&mut self, status: StatusCondition) -> bool {
        if self.status.is_some() || self.is_fainted() {
            return false;
        }
        match status {
            StatusCondition::Paralysis => {
                let speed = &mut self.stats.speed;
                speed.set_current((speed.normal / 4).max(1));
            }
            StatusCondition::Burn => {
                let attack = &mut self.stats.attack;
                attack.set_current((attack.normal / 2).max(1));
            }
            _ => {}
        }
        self.status = Some(status);
        true
    }

    /// Remove the current status and undo its statistic penalty.
    pub fn clear_status(&mut self) -> Option<StatusCondition> {
        let cleared = self.status.take()?;
        match cleared {
            StatusCondition::Paralysis => self.stats.speed.restore(),
            StatusCondition::Burn => self.stats.attack.restore(),
            _ => {}
        }
        Some(cleared)
    }

    pub fn knows_move(&self, move_: Move) -> bool {
        self.moves.iter().any(|slot| slot.move_ == move_)
    }

    pub fn move_slot_mut(&mut self, move_: Move) -> Option<&mut MoveSlot> {
        self.moves.iter_mut().find(|slot| slot.move_ == move_)
    }

    /// Known moves that still have PP.
    pub fn usable_moves(&self) -> Vec<Move> {
        self.moves
            .iter()
            .filter(|slot| slot.remaining > 0)
            .map(|slot| slot.move_)
            .collect()
    }

    pub fn has_type(&self, pokemon_type: PokemonType) -> bool {
        self.types.contains(&pokemon_type)
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} Lv.{} ({}/{} HP)",
            self.name,
            self.level,
            self.current_hp(),
            self.max_hp()
        )?;
        if let Some(status) = &self.status {
            write!(f, " [{}]", status)?;
        }
        Ok(())
    }
}
