//! Move selection for computer-controlled teams.
//!
//! Trainer teams score every candidate move with a cost (lower is better) built up from
//! data-driven heuristic layers, then pick uniformly among the cheapest moves. Wild teams
//! skip the scoring and pick at random.

use crate::battle::action::Action;
use crate::battle::selectors::Selector;
use crate::battle::state::{BattleState, Side, TurnRng};
use crate::config::{AiConfig, HeuristicTable, Preference};
use crate::errors::MoveDataResult;
use crate::move_data::get_move_data;
use crate::team::Team;
use schema::{EffectKind, Move, MoveData, PokemonType};

/// A candidate move and its cost. Lower costs are preferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovePossibility {
    pub move_: Move,
    pub priority: i32,
}

/// Whether `team` may use a heuristic table: smart teams always can, other teams only
/// when their leader is listed.
fn uses_table(team: &Team, table: &HeuristicTable) -> bool {
    team.flags.smart
        || team
            .leader()
            .is_some_and(|leader| table.is_eligible(&leader.name))
}

/// Does `preference` describe `move_data` used against a defender of `defender_types`?
pub fn preference_matches(
    preference: &Preference,
    move_data: &MoveData,
    defender_types: &[PokemonType],
) -> bool {
    match preference {
        Preference::Move(move_) => move_data.id == *move_,
        Preference::Statistic(stat, delta) => move_data.effects.iter().any(|effect| {
            matches!(effect.kind, EffectKind::Statistic { stat: s, delta: d } if s == *stat && d == *delta)
        }),
        Preference::Super(attacking, defending) | Preference::Weak(attacking, defending) => {
            move_data.deals_damage()
                && move_data.move_type == *attacking
                && defender_types.contains(defending)
        }
    }
}

fn first_match<'t>(
    table: &'t HeuristicTable,
    move_data: &MoveData,
    defender_types: &[PokemonType],
) -> Option<&'t Preference> {
    table
        .preferences
        .iter()
        .find(|preference| preference_matches(preference, move_data, defender_types))
}

/// Score `candidates` for the active actor of `attacking` against the active actor of
/// `defending`.
pub fn generate(
    attacking: &Team,
    defending: &Team,
    candidates: &[Move],
    config: &AiConfig,
) -> MoveDataResult<Vec<MovePossibility>> {
    let defender = defending.active_actor();
    let defender_types = defender.map(|actor| actor.types.as_slice()).unwrap_or(&[]);
    let defender_has_status = defender.is_some_and(|actor| actor.status.is_some());

    let use_second_turn = uses_table(attacking, &config.second_turn);
    let use_effectiveness = uses_table(attacking, &config.effectiveness);

    candidates
        .iter()
        .map(|&move_| {
            let move_data = get_move_data(move_)?;
            let mut priority = config.neutral_cost;

            if defender_has_status && !attacking.flags.dumb && move_data.is_status_only() {
                priority += config.status_penalty;
            }

            if use_second_turn && first_match(&config.second_turn, move_data, defender_types).is_some() {
                priority -= 1;
            }

            if use_effectiveness {
                match first_match(&config.effectiveness, move_data, defender_types) {
                    Some(Preference::Weak(..)) => priority += 1,
                    Some(_) => priority -= 1,
                    None => {}
                }
            }

            Ok(MovePossibility { move_, priority })
        })
        .collect()
}

/// Keep only the cheapest possibilities and choose uniformly among them.
pub fn select_move(possibilities: &[MovePossibility], rng: &mut TurnRng) -> Option<Move> {
    let lowest = possibilities.iter().map(|possibility| possibility.priority).min()?;
    let cheapest: Vec<Move> = possibilities
        .iter()
        .filter(|possibility| possibility.priority == lowest)
        .map(|possibility| possibility.move_)
        .collect();
    let index = rng.choose_index(cheapest.len(), "AI Move Selection");
    cheapest.get(index).copied()
}

/// Selector for computer-controlled teams.
#[derive(Debug, Clone)]
pub struct BattleAi {
    config: AiConfig,
}

impl BattleAi {
    pub fn new(config: AiConfig) -> Self {
        Self { config }
    }

    fn choose_move(&self, side: Side, state: &BattleState, rng: &mut TurnRng) -> Move {
        let team = state.team(side);
        let usable = team
            .active_actor()
            .map(|actor| actor.usable_moves())
            .unwrap_or_default();
        if usable.is_empty() {
            return Move::Struggle;
        }

        if team.leader().is_none() {
            return usable[rng.choose_index(usable.len(), "Wild Move Choice")];
        }

        match generate(team, state.team(side.opponent()), &usable, &self.config) {
            Ok(possibilities) => {
                log::debug!("{} move costs: {:?}", team.name, possibilities);
                select_move(&possibilities, rng).unwrap_or(usable[0])
            }
            // Every known move was looked up when its actor was built, so scoring only
            // fails on a corrupt move table, which `Actor::from_species` already rejected.
            Err(err) => {
                log::warn!("{} could not score its moves: {}", team.name, err);
                usable[0]
            }
        }
    }
}

impl Selector for BattleAi {
    fn next_action(&mut self, side: Side, state: &BattleState, rng: &mut TurnRng) -> Action {
        Action::UseMove {
            move_: self.choose_move(side, state, rng),
        }
    }
}
