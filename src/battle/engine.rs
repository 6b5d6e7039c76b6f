use crate::actor::StatusCondition;
use crate::battle::action::{Action, TeamAndAction};
use crate::battle::effects::run_move_effects;
use crate::battle::events::{ActionFailureReason, BattleEvent, EventBus};
use crate::battle::flee::attempt_flee;
use crate::battle::outcome::{check_fainting, end_battle, replace_active};
use crate::battle::selectors::Selector;
use crate::battle::state::{BattleOutcome, BattleState, GameState, Side, TurnRng};
use crate::battle::turn_order::order_actions;
use crate::errors::{ActionError, BattleResult, BattleStateError};
use crate::move_data::get_move_data;
use schema::{Item, ItemEffect, Move};

/// Everything a turn needs besides the battle state itself.
pub struct TurnContext<'a> {
    pub rng: &'a mut TurnRng,
    pub bus: &'a mut EventBus,
    pub selectors: &'a mut [Box<dyn Selector>; 2],
}

impl<'a> TurnContext<'a> {
    pub fn new(
        rng: &'a mut TurnRng,
        bus: &'a mut EventBus,
        selectors: &'a mut [Box<dyn Selector>; 2],
    ) -> Self {
        Self { rng, bus, selectors }
    }
}

/// Resolve one full turn from both sides' chosen actions.
///
/// The actions are ordered, executed one after the other, and followed by the
/// end-of-turn status damage. Once the battle has an outcome nothing else runs,
/// including the `TurnEnded` announcement.
pub fn resolve_turn(
    state: &mut BattleState,
    player_action: Action,
    opponent_action: Action,
    ctx: &mut TurnContext<'_>,
) -> BattleResult<()> {
    if state.is_over() {
        return Err(BattleStateError::BattleOver.into());
    }

    // 1. Initialization
    state.game_state = GameState::TurnInProgress;
    ctx.bus.push(BattleEvent::TurnStarted {
        turn_number: state.turn_number,
    });

    // 2. Actions in turn order
    let ordered = order_actions(state, player_action, opponent_action);
    log::debug!(
        "Turn {} order: {} {} -> {} {}",
        state.turn_number,
        ordered[0].side,
        ordered[0].action,
        ordered[1].side,
        ordered[1].action
    );

    for team_and_action in &ordered {
        if state.is_over() {
            break;
        }
        execute_action(state, team_and_action, ctx)?;

        for side in Side::BOTH {
            if state.is_over() {
                break;
            }
            check_fainting(state, side, ctx)?;
        }
    }

    // 3. End-of-turn phase
    if !state.is_over() {
        apply_status_damage(state, ctx)?;
    }

    // 4. Finalization
    if !state.is_over() {
        state.turn_number += 1;
        state.game_state = GameState::WaitingForActions;
        ctx.bus.push(BattleEvent::TurnEnded);
    }
    Ok(())
}

pub fn execute_action(
    state: &mut BattleState,
    team_and_action: &TeamAndAction,
    ctx: &mut TurnContext<'_>,
) -> BattleResult<()> {
    let side = team_and_action.side;
    match team_and_action.action {
        Action::Flee => execute_flee(state, side, ctx),
        Action::Switch { team_index } => {
            if state.team(side).active_index == team_index {
                // A faint earlier this turn already brought this actor in.
                log::debug!("{} already has slot {} active", state.team(side).name, team_index);
                return Ok(());
            }
            replace_active(state, side, team_index, ctx.bus)
        }
        Action::UseItem { item, target } => execute_item(state, side, item, target, ctx.bus),
        Action::UseMove { move_ } => execute_move(state, team_and_action, move_, ctx),
    }
}

fn execute_flee(state: &mut BattleState, side: Side, ctx: &mut TurnContext<'_>) -> BattleResult<()> {
    match side {
        Side::Player => {
            if attempt_flee(state, ctx.rng) {
                ctx.bus.push(BattleEvent::FleeSucceeded);
                end_battle(state, BattleOutcome::Fled, ctx.bus);
            } else {
                ctx.bus.push(BattleEvent::FleeFailed);
            }
        }
        Side::Opponent => {
            // Only a wild opponent ever submits a flee, and it always gets away.
            ctx.bus.push(BattleEvent::OpponentFled);
            end_battle(state, BattleOutcome::Fled, ctx.bus);
        }
    }
    Ok(())
}

fn execute_item(
    state: &mut BattleState,
    side: Side,
    item: Item,
    target: usize,
    bus: &mut EventBus,
) -> BattleResult<()> {
    let team = state.team_mut(side);
    let actor = team
        .actors
        .get(target)
        .ok_or(ActionError::InvalidActorIndex(target))?;
    if actor.is_fainted() {
        log::debug!("{} fainted before {} could be used", actor.name, item);
        return Ok(());
    }
    let actor_name = actor.name.clone();

    team.consume_item(item)?;
    bus.push(BattleEvent::ItemUsed {
        side,
        item,
        actor: actor_name.clone(),
    });

    match item.effect() {
        ItemEffect::Heal(amount) => {
            let actor = &mut team.actors[target];
            let healed = actor.heal(amount);
            bus.push(BattleEvent::ActorHealed {
                side,
                actor: actor_name,
                amount: healed,
                new_hp: actor.current_hp(),
            });
        }
        ItemEffect::Cure(cures) => {
            let actor = &mut team.actors[target];
            let curable = actor
                .status
                .is_some_and(|status| cures.map_or(true, |kind| kind == status.status_type()));
            if curable {
                if let Some(status) = actor.clear_status() {
                    bus.push(BattleEvent::StatusRemoved {
                        side,
                        actor: actor_name,
                        status,
                    });
                }
            }
        }
        ItemEffect::Boost(stat, delta) => {
            let (old_stage, new_stage) = team.modify_stat_stage(stat, delta);
            if old_stage == new_stage {
                bus.push(BattleEvent::StatChangeBlocked {
                    side,
                    actor: actor_name,
                    stat,
                    delta,
                });
            } else {
                bus.push(BattleEvent::StatStageChanged {
                    side,
                    actor: actor_name,
                    stat,
                    old_stage,
                    new_stage,
                });
            }
        }
        ItemEffect::Focus => {
            team.focused = true;
            bus.push(BattleEvent::ActorFocused {
                side,
                actor: actor_name,
            });
        }
    }
    Ok(())
}

fn execute_move(
    state: &mut BattleState,
    team_and_action: &TeamAndAction,
    move_: Move,
    ctx: &mut TurnContext<'_>,
) -> BattleResult<()> {
    let side = team_and_action.side;
    let team = state.team_mut(side);
    let replaced = team.active_index != team_and_action.actor;
    let actor = team
        .actors
        .get_mut(team_and_action.actor)
        .ok_or(ActionError::InvalidActorIndex(team_and_action.actor))?;

    if replaced || actor.is_fainted() {
        ctx.bus.push(BattleEvent::ActionFailed {
            side,
            actor: actor.name.clone(),
            reason: ActionFailureReason::ActorReplaced,
        });
        return Ok(());
    }

    // Status conditions that can stop the actor from moving.
    match actor.status {
        Some(StatusCondition::Sleep(turns)) if turns <= 1 => {
            if let Some(status) = actor.clear_status() {
                ctx.bus.push(BattleEvent::StatusRemoved {
                    side,
                    actor: actor.name.clone(),
                    status,
                });
            }
            return Ok(());
        }
        Some(StatusCondition::Sleep(turns)) => {
            actor.status = Some(StatusCondition::Sleep(turns - 1));
            ctx.bus.push(BattleEvent::ActionFailed {
                side,
                actor: actor.name.clone(),
                reason: ActionFailureReason::IsAsleep,
            });
            return Ok(());
        }
        Some(StatusCondition::Freeze) => {
            ctx.bus.push(BattleEvent::ActionFailed {
                side,
                actor: actor.name.clone(),
                reason: ActionFailureReason::IsFrozen,
            });
            return Ok(());
        }
        Some(StatusCondition::Paralysis) if ctx.rng.chance(0.25, "Full Paralysis Check") => {
            ctx.bus.push(BattleEvent::ActionFailed {
                side,
                actor: actor.name.clone(),
                reason: ActionFailureReason::IsParalyzed,
            });
            return Ok(());
        }
        _ => {}
    }

    // Spend PP; an actor with none left struggles instead.
    let move_used = if move_ == Move::Struggle {
        Move::Struggle
    } else {
        let actor_name = actor.name.clone();
        let slot = actor.move_slot_mut(move_).ok_or(ActionError::MoveNotKnown {
            actor: actor_name,
            move_,
        })?;
        if slot.use_move() {
            move_
        } else {
            Move::Struggle
        }
    };

    let move_data = get_move_data(move_used)?;
    ctx.bus.push(BattleEvent::MoveUsed {
        side,
        actor: actor.name.clone(),
        move_used,
    });

    run_move_effects(state, team_and_action, move_data, ctx)
}

/// Poison and burn each cost `max(max_hp / 16, 1)` at the end of the turn.
fn apply_status_damage(state: &mut BattleState, ctx: &mut TurnContext<'_>) -> BattleResult<()> {
    for side in Side::BOTH {
        if state.is_over() {
            break;
        }

        let Some(actor) = state.team_mut(side).active_actor_mut() else {
            continue;
        };
        let status = match actor.status {
            Some(status @ (StatusCondition::Poison | StatusCondition::Burn)) if !actor.is_fainted() => {
                status
            }
            _ => continue,
        };

        let damage = actor.take_damage((actor.max_hp() / 16).max(1));
        ctx.bus.push(BattleEvent::StatusDamage {
            side,
            actor: actor.name.clone(),
            status,
            damage,
            remaining_hp: actor.current_hp(),
        });

        check_fainting(state, side, ctx)?;
    }
    Ok(())
}
