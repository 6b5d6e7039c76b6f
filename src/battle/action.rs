use crate::battle::state::{BattleState, Side};
use crate::errors::ActionError;
use schema::{Item, ItemEffect, Move};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    UseMove { move_: Move },
    /// `target` is the roster index of the actor the item is used on.
    UseItem { item: Item, target: usize },
    Switch { team_index: usize },
    Flee,
}

impl Action {
    pub fn is_move(&self) -> bool {
        matches!(self, Action::UseMove { .. })
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::UseMove { move_ } => write!(f, "use {}", move_),
            Action::UseItem { item, target } => write!(f, "use {} on slot {}", item, target),
            Action::Switch { team_index } => write!(f, "switch to slot {}", team_index),
            Action::Flee => write!(f, "flee"),
        }
    }
}

/// An action bound to the side that chose it and the actor that was active at the time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamAndAction {
    pub side: Side,
    pub actor: usize,
    pub action: Action,
}

impl TeamAndAction {
    pub fn new(state: &BattleState, side: Side, action: Action) -> Self {
        Self {
            side,
            actor: state.team(side).active_index,
            action,
        }
    }
}

/// Check that `side` may submit `action` in the current state. The error's Display text
/// is shown to whoever picked the action before they are asked again.
pub fn validate_action(state: &BattleState, side: Side, action: &Action) -> Result<(), ActionError> {
    let team = state.team(side);
    match action {
        Action::UseMove { move_ } => {
            let actor = team
                .active_actor()
                .ok_or(ActionError::InvalidActorIndex(team.active_index))?;
            if *move_ == Move::Struggle && actor.usable_moves().is_empty() {
                return Ok(());
            }
            if !actor.knows_move(*move_) {
                return Err(ActionError::MoveNotKnown {
                    actor: actor.name.clone(),
                    move_: *move_,
                });
            }
            Ok(())
        }
        Action::UseItem { item, target } => {
            if team.item_count(*item) == 0 {
                return Err(ActionError::NoItemRemaining(*item));
            }
            let actor = team
                .actors
                .get(*target)
                .ok_or(ActionError::InvalidActorIndex(*target))?;
            if actor.is_fainted() {
                return Err(ActionError::ActorFainted(actor.name.clone()));
            }
            // Battle-only items work on the active actor alone.
            let needs_active = matches!(item.effect(), ItemEffect::Boost(..) | ItemEffect::Focus);
            if needs_active && *target != team.active_index {
                return Err(ActionError::InvalidActorIndex(*target));
            }
            Ok(())
        }
        Action::Switch { team_index } => {
            let actor = team
                .actors
                .get(*team_index)
                .ok_or(ActionError::InvalidActorIndex(*team_index))?;
            if *team_index == team.active_index {
                return Err(ActionError::AlreadyActive(actor.name.clone()));
            }
            if actor.is_fainted() {
                return Err(ActionError::ActorFainted(actor.name.clone()));
            }
            Ok(())
        }
        Action::Flee => {
            let trainer_owned = side == Side::Opponent && !team.is_wild();
            if trainer_owned || state.team(side.opponent()).leader().is_some() {
                return Err(ActionError::FleeForbidden);
            }
            Ok(())
        }
    }
}

/// Every action `side` could legally submit right now.
pub fn valid_actions(state: &BattleState, side: Side) -> Vec<Action> {
    let team = state.team(side);
    let mut actions = Vec::new();

    if let Some(actor) = team.active_actor() {
        let usable = actor.usable_moves();
        if usable.is_empty() {
            actions.push(Action::UseMove {
                move_: Move::Struggle,
            });
        } else {
            actions.extend(usable.into_iter().map(|move_| Action::UseMove { move_ }));
        }
    }

    actions.extend(
        team.replacement_candidates()
            .into_iter()
            .map(|team_index| Action::Switch { team_index }),
    );

    for (&item, &count) in &team.bag {
        if count > 0 {
            let action = Action::UseItem {
                item,
                target: team.active_index,
            };
            if validate_action(state, side, &action).is_ok() {
                actions.push(action);
            }
        }
    }

    if validate_action(state, side, &Action::Flee).is_ok() {
        actions.push(Action::Flee);
    }

    actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::tests::common::{create_test_battle, create_trainer_battle, TestActorBuilder};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_switch_to_active_is_rejected_with_message() {
        let state = create_test_battle(
            TestActorBuilder::new("Pikachu", 10).build(),
            TestActorBuilder::new("Rattata", 10).build(),
        );
        let err = validate_action(&state, Side::Player, &Action::Switch { team_index: 0 }).unwrap_err();
        assert_eq!(err, ActionError::AlreadyActive("Pikachu".to_string()));
        assert_eq!(err.to_string(), "Pikachu is already out!");
    }

    #[test]
    fn test_flee_forbidden_against_trainer() {
        let state = create_trainer_battle(
            vec![TestActorBuilder::new("Pikachu", 10).build()],
            vec![TestActorBuilder::new("Onix", 12).build()],
            "Brock",
        );
        assert_eq!(
            validate_action(&state, Side::Player, &Action::Flee),
            Err(ActionError::FleeForbidden)
        );
        assert!(!valid_actions(&state, Side::Player).contains(&Action::Flee));
    }

    #[test]
    fn test_unknown_move_is_rejected() {
        let state = create_test_battle(
            TestActorBuilder::new("Pikachu", 10)
                .with_moves(vec![Move::ThunderShock])
                .build(),
            TestActorBuilder::new("Rattata", 10).build(),
        );
        assert!(matches!(
            validate_action(&state, Side::Player, &Action::UseMove { move_: Move::Surf }),
            Err(ActionError::MoveNotKnown { .. })
        ));
    }

    #[test]
    fn test_valid_actions_falls_back_to_struggle() {
        let mut actor = TestActorBuilder::new("Pikachu", 10)
            .with_moves(vec![Move::ThunderShock])
            .build();
        actor.moves[0].remaining = 0;
        let state = create_test_battle(actor, TestActorBuilder::new("Rattata", 10).build());

        assert_eq!(
            valid_actions(&state, Side::Player),
            vec![
                Action::UseMove {
                    move_: Move::Struggle
                },
                Action::Flee
            ]
        );
    }
}
