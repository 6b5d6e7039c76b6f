use crate::actor::Actor;
use crate::errors::{ActionError, BattleStateError};
use schema::{Item, StatType};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// The trainer persona commanding a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leader {
    pub name: String,
}

impl Leader {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Who controls a team. Only trainers have a leader; a wild team has neither
/// a leader nor a player behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    Player,
    Trainer(Leader),
    Wild,
}

/// Sophistication flags consulted by the trainer AI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiFlags {
    pub dumb: bool,
    pub smart: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub owner: Owner,
    pub actors: Vec<Actor>,
    pub active_index: usize,
    pub flags: AiFlags,
    pub bag: BTreeMap<Item, u8>,
    // Volatile state of the active slot, reset on every switch.
    stat_stages: HashMap<StatType, i8>,
    pub focused: bool,
}

impl Team {
    pub fn new(name: impl Into<String>, owner: Owner, actors: Vec<Actor>) -> Self {
        Self {
            name: name.into(),
            owner,
            actors,
            active_index: 0,
            flags: AiFlags::default(),
            bag: BTreeMap::new(),
            stat_stages: HashMap::new(),
            focused: false,
        }
    }

    pub fn with_flags(mut self, flags: AiFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_item(mut self, item: Item, count: u8) -> Self {
        self.bag.insert(item, count);
        self
    }

    /// Check the roster before a battle starts.
    pub fn validate(&self) -> Result<(), BattleStateError> {
        if self.actors.is_empty() {
            return Err(BattleStateError::EmptyTeam(self.name.clone()));
        }
        if self.active_index >= self.actors.len() {
            return Err(BattleStateError::InvalidActiveIndex {
                team: self.name.clone(),
                index: self.active_index,
                len: self.actors.len(),
            });
        }
        if !self.has_healthy_actor() {
            return Err(BattleStateError::NoHealthyActor(self.name.clone()));
        }
        let active = &self.actors[self.active_index];
        if active.is_fainted() {
            return Err(BattleStateError::FaintedActiveActor {
                team: self.name.clone(),
                actor: active.name.clone(),
            });
        }
        Ok(())
    }

    pub fn leader(&self) -> Option<&Leader> {
        match &self.owner {
            Owner::Trainer(leader) => Some(leader),
            Owner::Player | Owner::Wild => None,
        }
    }

    pub fn is_wild(&self) -> bool {
        matches!(self.owner, Owner::Wild)
    }

    pub fn active_actor(&self) -> Option<&Actor> {
        self.actors.get(self.active_index)
    }

    pub fn active_actor_mut(&mut self) -> Option<&mut Actor> {
        self.actors.get_mut(self.active_index)
    }

    pub fn has_healthy_actor(&self) -> bool {
        self.actors.iter().any(|actor| !actor.is_fainted())
    }

    /// Roster indices that could replace the active actor, in roster order.
    pub fn replacement_candidates(&self) -> Vec<usize> {
        self.actors
            .iter()
            .enumerate()
            .filter(|(index, actor)| *index != self.active_index && !actor.is_fainted())
            .map(|(index, _)| index)
            .collect()
    }

    /// Make another roster member active. Clears stat stages and focus.
    pub fn switch_actor(&mut self, new_index: usize) -> Result<(), ActionError> {
        let actor = self
            .actors
            .get(new_index)
            .ok_or(ActionError::InvalidActorIndex(new_index))?;
        if new_index == self.active_index {
            return Err(ActionError::AlreadyActive(actor.name.clone()));
        }
        if actor.is_fainted() {
            return Err(ActionError::ActorFainted(actor.name.clone()));
        }

        self.clear_active_state();
        self.active_index = new_index;
        Ok(())
    }

    pub fn clear_active_state(&mut self) {
        self.stat_stages.clear();
        self.focused = false;
    }

    /// Get the stat stage for a specific stat (returns 0 if not modified)
    pub fn get_stat_stage(&self, stat: StatType) -> i8 {
        self.stat_stages.get(&stat).copied().unwrap_or(0)
    }

    /// Set the stat stage for a specific stat (clamped to -6 to +6)
    pub fn set_stat_stage(&mut self, stat: StatType, stage: i8) {
        let clamped_stage = stage.clamp(-6, 6);
        if clamped_stage == 0 {
            self.stat_stages.remove(&stat);
        } else {
            self.stat_stages.insert(stat, clamped_stage);
        }
    }

    /// Modify a stat stage by a delta. Returns the stage before and after.
    pub fn modify_stat_stage(&mut self, stat: StatType, delta: i8) -> (i8, i8) {
        let old_stage = self.get_stat_stage(stat);
        self.set_stat_stage(stat, old_stage.saturating_add(delta));
        (old_stage, self.get_stat_stage(stat))
    }

    /// Take one of an item out of the bag.
    pub fn consume_item(&mut self, item: Item) -> Result<(), ActionError> {
        match self.bag.get_mut(&item) {
            Some(count) if *count > 0 => {
                *count -= 1;
                Ok(())
            }
            _ => Err(ActionError::NoItemRemaining(item)),
        }
    }

    pub fn item_count(&self, item: Item) -> u8 {
        self.bag.get(&item).copied().unwrap_or(0)
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        for (index, actor) in self.actors.iter().enumerate() {
            let marker = if index == self.active_index { "*" } else { " " };
            writeln!(f, " {} {}", marker, actor)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::species::get_species_data;
    use schema::Move;

    fn actor(name: &str) -> Actor {
        let species = get_species_data(name).unwrap();
        Actor::from_species(species, 10, &[Move::Tackle]).unwrap()
    }

    fn team() -> Team {
        Team::new(
            "Red",
            Owner::Player,
            vec![actor("Pikachu"), actor("Charmander"), actor("Squirtle")],
        )
    }

    #[test]
    fn test_switch_clears_stages_and_focus() {
        let mut team = team();
        team.modify_stat_stage(StatType::Attack, 2);
        team.focused = true;

        team.switch_actor(1).unwrap();
        assert_eq!(team.active_index, 1);
        assert_eq!(team.get_stat_stage(StatType::Attack), 0);
        assert!(!team.focused);
    }

    #[test]
    fn test_switch_to_active_is_rejected() {
        let mut team = team();
        assert_eq!(
            team.switch_actor(0),
            Err(ActionError::AlreadyActive("Pikachu".to_string()))
        );
    }

    #[test]
    fn test_switch_to_fainted_is_rejected() {
        let mut team = team();
        team.actors[2].take_damage(u16::MAX);
        assert!(matches!(team.switch_actor(2), Err(ActionError::ActorFainted(_))));
        assert_eq!(team.replacement_candidates(), vec![1]);
    }

    #[test]
    fn test_stat_stages_clamp() {
        let mut team = team();
        assert_eq!(team.modify_stat_stage(StatType::Speed, 5), (0, 5));
        assert_eq!(team.modify_stat_stage(StatType::Speed, 5), (5, 6));
        assert_eq!(team.modify_stat_stage(StatType::Defense, -10), (0, -6));
    }

    #[test]
    fn test_validate_rejects_bad_rosters() {
        let empty = Team::new("Nobody", Owner::Wild, vec![]);
        assert!(matches!(empty.validate(), Err(BattleStateError::EmptyTeam(_))));

        let mut fainted = team();
        for actor in &mut fainted.actors {
            actor.take_damage(u16::MAX);
        }
        assert!(matches!(fainted.validate(), Err(BattleStateError::NoHealthyActor(_))));
    }

    #[test]
    fn test_validate_rejects_fainted_lead() {
        let mut team = team();
        team.actors[0].take_damage(u16::MAX);
        assert_eq!(
            team.validate(),
            Err(BattleStateError::FaintedActiveActor {
                team: "Red".to_string(),
                actor: "Pikachu".to_string()
            })
        );

        team.active_index = 1;
        assert_eq!(team.validate(), Ok(()));
    }

    #[test]
    fn test_consume_item() {
        let mut team = team().with_item(Item::Potion, 1);
        assert_eq!(team.consume_item(Item::Potion), Ok(()));
        assert_eq!(team.consume_item(Item::Potion), Err(ActionError::NoItemRemaining(Item::Potion)));
        assert_eq!(team.item_count(Item::Potion), 0);
    }
}
