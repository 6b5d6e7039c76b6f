use crate::actor::{Actor, Statistic, StatusCondition};
use crate::battle::selectors::{ScriptedSelector, Selector};
use crate::battle::state::BattleState;
use crate::species::get_species_data;
use crate::team::{Leader, Owner, Team};
use schema::{Move, StatType};

/// A builder for creating test actors with common defaults.
///
/// # Example
/// ```ignore
/// let actor = TestActorBuilder::new("Pikachu", 25)
///     .with_moves(vec![Move::ThunderShock])
///     .with_status(StatusCondition::Paralysis)
///     .build();
/// ```
pub struct TestActorBuilder {
    species: String,
    level: u8,
    moves: Option<Vec<Move>>,
    status: Option<StatusCondition>,
    current_hp: Option<u16>,
    stats: Vec<(StatType, u16)>,
}

impl TestActorBuilder {
    /// Creates a new builder for a given species and level.
    pub fn new(species: &str, level: u8) -> Self {
        Self {
            species: species.to_string(),
            level,
            moves: None,
            status: None,
            current_hp: None,
            stats: Vec::new(),
        }
    }

    /// Sets the moves. Defaults to Tackle alone.
    pub fn with_moves(mut self, moves: Vec<Move>) -> Self {
        self.moves = Some(moves);
        self
    }

    /// Sets the status condition, including its statistic penalty.
    pub fn with_status(mut self, status: StatusCondition) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the current HP. If not set, HP will be max.
    pub fn with_hp(mut self, hp: u16) -> Self {
        self.current_hp = Some(hp);
        self
    }

    /// Overrides both the current and the normal value of a statistic.
    pub fn with_stat(mut self, stat: StatType, value: u16) -> Self {
        self.stats.push((stat, value));
        self
    }

    pub fn build(self) -> Actor {
        let species_data = match get_species_data(&self.species) {
            Ok(data) => data,
            Err(err) => panic!("Failed to load species data for {}: {}", self.species, err),
        };
        let moves = self.moves.unwrap_or_else(|| vec![Move::Tackle]);
        let mut actor = match Actor::from_species(species_data, self.level, &moves) {
            Ok(actor) => actor,
            Err(err) => panic!("Failed to build {}: {}", self.species, err),
        };

        for (stat, value) in self.stats {
            *actor.stats.get_mut(stat) = Statistic::new(value);
        }
        if let Some(status) = self.status {
            actor.set_status(status);
        }
        if let Some(hp) = self.current_hp {
            actor.stats.health.set_current(hp);
        }

        actor
    }
}

/// Creates a standard 1v1 battle against a wild opponent.
pub fn create_test_battle(player_actor: Actor, opponent_actor: Actor) -> BattleState {
    let player = Team::new("Player", Owner::Player, vec![player_actor]);
    let opponent = Team::new("Opponent", Owner::Wild, vec![opponent_actor]);
    BattleState::new("test_battle".to_string(), player, opponent)
}

/// Creates a battle against a trainer whose leader persona is `leader`.
pub fn create_trainer_battle(
    player_actors: Vec<Actor>,
    opponent_actors: Vec<Actor>,
    leader: &str,
) -> BattleState {
    let player = Team::new("Player", Owner::Player, player_actors);
    let opponent = Team::new(leader, Owner::Trainer(Leader::new(leader)), opponent_actors);
    BattleState::new("test_battle".to_string(), player, opponent)
}

/// Creates a battle between two full rosters. The opponent is an unlisted trainer, so
/// both sides replace fainted actors and no AI table applies.
pub fn create_team_battle(player_actors: Vec<Actor>, opponent_actors: Vec<Actor>) -> BattleState {
    let player = Team::new("Player", Owner::Player, player_actors);
    let opponent = Team::new("Opponent", Owner::Trainer(Leader::new("Youngster")), opponent_actors);
    BattleState::new("test_battle".to_string(), player, opponent)
}

/// Selectors that always take the first valid action and the first replacement.
pub fn default_selectors() -> [Box<dyn Selector>; 2] {
    [
        Box::new(ScriptedSelector::default()),
        Box::new(ScriptedSelector::default()),
    ]
}
