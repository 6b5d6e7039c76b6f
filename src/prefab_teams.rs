use crate::actor::Actor;
use crate::errors::BattleResult;
use crate::species::get_species_data;
use crate::team::{AiFlags, Leader, Owner, Team};
use schema::{Item, Move};
use serde::{Deserialize, Serialize};

/// A predefined team configuration for demo and test battles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrefabTeam {
    pub id: String,
    pub name: String,
    pub description: String,
    pub owner: Owner,
    #[serde(default)]
    pub flags: AiFlags,
    #[serde(default)]
    pub items: Vec<(Item, u8)>,
    pub actors: Vec<PrefabActor>,
}

/// A predefined roster member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrefabActor {
    pub species: String,
    pub level: u8,
    pub moves: Vec<Move>,
}

impl PrefabActor {
    fn new(species: &str, level: u8, moves: &[Move]) -> Self {
        Self {
            species: species.to_string(),
            level,
            moves: moves.to_vec(),
        }
    }
}

impl PrefabTeam {
    /// Build a battle-ready team with fresh actors.
    pub fn build(&self) -> BattleResult<Team> {
        let actors = self
            .actors
            .iter()
            .map(|prefab| -> BattleResult<Actor> {
                let species = get_species_data(&prefab.species)?;
                Ok(Actor::from_species(species, prefab.level, &prefab.moves)?)
            })
            .collect::<BattleResult<Vec<_>>>()?;

        let team = self
            .items
            .iter()
            .fold(
                Team::new(self.name.clone(), self.owner.clone(), actors).with_flags(self.flags),
                |team, &(item, count)| team.with_item(item, count),
            );
        team.validate()?;
        Ok(team)
    }
}

/// Get all available prefab teams
pub fn get_prefab_teams() -> Vec<PrefabTeam> {
    vec![
        PrefabTeam {
            id: "starters".to_string(),
            name: "Red".to_string(),
            description: "The player's early-game party with a few healing items".to_string(),
            owner: Owner::Player,
            flags: AiFlags::default(),
            items: vec![(Item::Potion, 2), (Item::ParalyzeHeal, 1), (Item::DireHit, 1)],
            actors: vec![
                PrefabActor::new(
                    "Charmander",
                    14,
                    &[Move::Scratch, Move::Ember, Move::Growl, Move::Leer],
                ),
                PrefabActor::new(
                    "Squirtle",
                    14,
                    &[Move::Tackle, Move::WaterGun, Move::TailWhip, Move::Withdraw],
                ),
                PrefabActor::new(
                    "Pikachu",
                    15,
                    &[Move::ThunderShock, Move::QuickAttack, Move::ThunderWave, Move::Growl],
                ),
                PrefabActor::new("Pidgey", 12, &[Move::Gust, Move::QuickAttack]),
            ],
        },
        PrefabTeam {
            id: "brock".to_string(),
            name: "Brock".to_string(),
            description: "Pewter City gym leader with a rock-solid defense".to_string(),
            owner: Owner::Trainer(Leader::new("Brock")),
            flags: AiFlags::default(),
            items: vec![],
            actors: vec![
                PrefabActor::new("Geodude", 12, &[Move::Tackle, Move::Harden, Move::RockThrow]),
                PrefabActor::new(
                    "Onix",
                    14,
                    &[Move::Tackle, Move::Harden, Move::RockThrow, Move::Bite],
                ),
            ],
        },
        PrefabTeam {
            id: "misty".to_string(),
            name: "Misty".to_string(),
            description: "Cerulean City gym leader who knows her type matchups".to_string(),
            owner: Owner::Trainer(Leader::new("Misty")),
            flags: AiFlags::default(),
            items: vec![],
            actors: vec![
                PrefabActor::new("Staryu", 18, &[Move::Tackle, Move::WaterGun, Move::Harden]),
                PrefabActor::new(
                    "Starmie",
                    21,
                    &[Move::Tackle, Move::Bubble, Move::Harden, Move::Psychic],
                ),
            ],
        },
        PrefabTeam {
            id: "wild_rattata".to_string(),
            name: "Wild Rattata".to_string(),
            description: "A wild Rattata from the tall grass of Route 1".to_string(),
            owner: Owner::Wild,
            flags: AiFlags::default(),
            items: vec![],
            actors: vec![PrefabActor::new("Rattata", 8, &[Move::Tackle, Move::TailWhip])],
        },
        PrefabTeam {
            id: "wild_pidgey".to_string(),
            name: "Wild Pidgey".to_string(),
            description: "A wild Pidgey from Viridian Forest".to_string(),
            owner: Owner::Wild,
            flags: AiFlags::default(),
            items: vec![],
            actors: vec![PrefabActor::new("Pidgey", 9, &[Move::Gust, Move::QuickAttack])],
        },
    ]
}

/// Get a specific prefab team by ID
pub fn get_prefab_team(team_id: &str) -> Option<PrefabTeam> {
    get_prefab_teams().into_iter().find(|team| team.id == team_id)
}
