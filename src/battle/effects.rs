use crate::actor::StatusCondition;
use crate::battle::action::TeamAndAction;
use crate::battle::calculators::calculate_damage;
use crate::battle::engine::TurnContext;
use crate::battle::events::BattleEvent;
use crate::battle::outcome::{check_fainting, replace_active};
use crate::battle::state::{BattleState, Side};
use crate::errors::{BattleResult, BattleStateError};
use schema::{BasePower, EffectKind, MoveData, StatType, StatusType, Target};

/// Run a move's effects in declaration order.
///
/// Accuracy is rolled once up front; a miss skips every effect. Each effect then rolls
/// its own probability. A damage effect the target is immune to ends the move. After
/// every effect the target is checked for fainting, and the faint is fully resolved
/// before the next effect runs against whoever is active then.
pub fn run_move_effects(
    state: &mut BattleState,
    team_and_action: &TeamAndAction,
    move_data: &MoveData,
    ctx: &mut TurnContext<'_>,
) -> BattleResult<()> {
    let attacker_side = team_and_action.side;

    if let Some(accuracy) = move_data.accuracy {
        if !ctx.rng.chance(f64::from(accuracy) / 100.0, "Accuracy Check") {
            ctx.bus.push(BattleEvent::MoveMissed {
                side: attacker_side,
                actor: active_name(state, attacker_side),
                move_used: move_data.id,
            });
            return Ok(());
        }
    }

    for effect in &move_data.effects {
        if state.is_over() {
            break;
        }

        let target_side = match effect.target {
            Target::Attacker => attacker_side,
            Target::Defender => attacker_side.opponent(),
        };

        if !ctx.rng.chance(effect.probability, "Effect Probability Check") {
            ctx.bus.push(BattleEvent::EffectMissed {
                side: target_side,
                move_used: move_data.id,
            });
            continue;
        }

        match &effect.kind {
            EffectKind::Damage { power } => {
                if !apply_damage(state, attacker_side, target_side, move_data, *power, ctx)? {
                    // An immune target shrugs off the rest of the move as well.
                    break;
                }
            }
            EffectKind::Statistic { stat, delta } => {
                apply_statistic(state, target_side, *stat, *delta, ctx)?
            }
            EffectKind::Status { status } => apply_status(state, target_side, *status, ctx)?,
            EffectKind::Switch => apply_forced_switch(state, target_side, ctx)?,
        }

        if !state.is_over() {
            check_fainting(state, target_side, ctx)?;
        }
    }

    Ok(())
}

fn active_name(state: &BattleState, side: Side) -> String {
    state
        .team(side)
        .active_actor()
        .map(|actor| actor.name.clone())
        .unwrap_or_default()
}

fn no_active_actor(state: &BattleState, side: Side) -> BattleStateError {
    BattleStateError::InconsistentState(format!("{} has no active actor", state.team(side).name))
}

fn apply_damage(
    state: &mut BattleState,
    attacker_side: Side,
    target_side: Side,
    move_data: &MoveData,
    power: BasePower,
    ctx: &mut TurnContext<'_>,
) -> BattleResult<bool> {
    let calculation = calculate_damage(state, attacker_side, target_side, move_data, power, ctx.rng)?;

    if calculation.critical {
        ctx.bus.push(BattleEvent::CriticalHit {
            side: attacker_side,
        });
    }
    if calculation.effectiveness != 1.0 {
        ctx.bus.push(BattleEvent::AttackTypeEffectiveness {
            multiplier: calculation.effectiveness,
        });
    }
    if calculation.effectiveness == 0.0 {
        return Ok(false);
    }

    let target = state
        .team_mut(target_side)
        .active_actor_mut()
        .ok_or_else(|| BattleStateError::InconsistentState("no target".to_string()))?;
    let damage = target.take_damage(calculation.damage);
    ctx.bus.push(BattleEvent::DamageDealt {
        side: target_side,
        actor: target.name.clone(),
        damage,
        remaining_hp: target.current_hp(),
    });
    Ok(true)
}

/// Stat deltas move the target's stage within -6..=+6. Health deltas change hit points
/// directly, bounded by zero and the maximum.
fn apply_statistic(
    state: &mut BattleState,
    target_side: Side,
    stat: StatType,
    delta: i8,
    ctx: &mut TurnContext<'_>,
) -> BattleResult<()> {
    if stat == StatType::Health {
        let target = state
            .team_mut(target_side)
            .active_actor_mut()
            .ok_or_else(|| BattleStateError::InconsistentState("no target".to_string()))?;
        let amount = u16::from(delta.unsigned_abs());
        let event = if delta >= 0 {
            let healed = target.heal(amount);
            BattleEvent::ActorHealed {
                side: target_side,
                actor: target.name.clone(),
                amount: healed,
                new_hp: target.current_hp(),
            }
        } else {
            let damage = target.take_damage(amount);
            BattleEvent::DamageDealt {
                side: target_side,
                actor: target.name.clone(),
                damage,
                remaining_hp: target.current_hp(),
            }
        };
        ctx.bus.push(event);
        return Ok(());
    }

    let actor = active_name(state, target_side);
    let (old_stage, new_stage) = state.team_mut(target_side).modify_stat_stage(stat, delta);
    if old_stage == new_stage {
        ctx.bus.push(BattleEvent::StatChangeBlocked {
            side: target_side,
            actor,
            stat,
            delta,
        });
    } else {
        ctx.bus.push(BattleEvent::StatStageChanged {
            side: target_side,
            actor,
            stat,
            old_stage,
            new_stage,
        });
    }
    Ok(())
}

fn apply_status(
    state: &mut BattleState,
    target_side: Side,
    status: StatusType,
    ctx: &mut TurnContext<'_>,
) -> BattleResult<()> {
    let already_affected = state
        .team(target_side)
        .active_actor()
        .ok_or_else(|| no_active_actor(state, target_side))?
        .status
        .is_some();

    let condition = match status {
        StatusType::Paralysis => StatusCondition::Paralysis,
        StatusType::Freeze => StatusCondition::Freeze,
        StatusType::Poison => StatusCondition::Poison,
        StatusType::Burn => StatusCondition::Burn,
        // Only roll the duration when the status can actually land.
        StatusType::Sleep if already_affected => StatusCondition::Sleep(0),
        StatusType::Sleep => StatusCondition::Sleep(1 + ctx.rng.next_outcome("Sleep Duration") % 7),
    };

    let target = state
        .team_mut(target_side)
        .active_actor_mut()
        .ok_or_else(|| BattleStateError::InconsistentState("no target".to_string()))?;
    let event = if target.set_status(condition) {
        BattleEvent::StatusApplied {
            side: target_side,
            actor: target.name.clone(),
            status: condition,
        }
    } else {
        BattleEvent::StatusFailed {
            side: target_side,
            actor: target.name.clone(),
        }
    };
    ctx.bus.push(event);
    Ok(())
}

fn apply_forced_switch(
    state: &mut BattleState,
    target_side: Side,
    ctx: &mut TurnContext<'_>,
) -> BattleResult<()> {
    let candidates = state.team(target_side).replacement_candidates();
    let Some(&default) = candidates.first() else {
        ctx.bus.push(BattleEvent::SwitchFailed { side: target_side });
        return Ok(());
    };

    let chosen = ctx.selectors[target_side.to_index()]
        .choose_replacement(target_side, state, &candidates)
        .filter(|index| candidates.contains(index))
        .unwrap_or(default);
    replace_active(state, target_side, chosen, ctx.bus)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::action::Action;
    use crate::battle::events::EventBus;
    use crate::battle::selectors::{ScriptedSelector, Selector};
    use crate::battle::state::{BattleOutcome, TurnRng};
    use crate::battle::tests::common::{create_team_battle, create_test_battle, TestActorBuilder};
    use crate::move_data::get_move_data;
    use pretty_assertions::assert_eq;
    use schema::Move;

    fn selectors() -> [Box<dyn Selector>; 2] {
        [
            Box::new(ScriptedSelector::default()),
            Box::new(ScriptedSelector::default()),
        ]
    }

    fn run(state: &mut BattleState, side: Side, move_: Move, rolls: Vec<u8>) -> EventBus {
        let mut rng = TurnRng::new_for_test(rolls);
        let mut bus = EventBus::new();
        let mut selectors = selectors();
        let mut ctx = TurnContext::new(&mut rng, &mut bus, &mut selectors);
        let team_and_action = TeamAndAction::new(state, side, Action::UseMove { move_ });
        let move_data = get_move_data(move_).unwrap();
        run_move_effects(state, &team_and_action, move_data, &mut ctx).unwrap();
        bus
    }

    #[test]
    fn test_miss_skips_all_effects() {
        let mut state = create_test_battle(
            TestActorBuilder::new("Rattata", 10).build(),
            TestActorBuilder::new("Pidgey", 10).build(),
        );
        // Tackle is 95% accurate: 95/100 * 256 = 243.2, so 250 misses.
        let bus = run(&mut state, Side::Player, Move::Tackle, vec![250]);
        assert_eq!(
            bus.events(),
            &[BattleEvent::MoveMissed {
                side: Side::Player,
                actor: "Rattata".to_string(),
                move_used: Move::Tackle
            }]
        );
    }

    #[test]
    fn test_secondary_effect_rolls_independently() {
        let mut state = create_test_battle(
            TestActorBuilder::new("Pikachu", 10).build(),
            TestActorBuilder::new("Rattata", 30).build(),
        );
        // crit miss, variance, then the 10% paralysis roll (25 < 25.6)
        let bus = run(&mut state, Side::Player, Move::ThunderShock, vec![255, 255, 25]);
        assert!(bus.events().iter().any(|event| matches!(event, BattleEvent::DamageDealt { .. })));
        assert_eq!(
            state.teams[1].actors[0].status,
            Some(StatusCondition::Paralysis)
        );

        let mut state = create_test_battle(
            TestActorBuilder::new("Pikachu", 10).build(),
            TestActorBuilder::new("Rattata", 30).build(),
        );
        let bus = run(&mut state, Side::Player, Move::ThunderShock, vec![255, 255, 26]);
        assert!(bus.events().contains(&BattleEvent::EffectMissed {
            side: Side::Opponent,
            move_used: Move::ThunderShock
        }));
        assert_eq!(state.teams[1].actors[0].status, None);
    }

    #[test]
    fn test_immune_target_skips_secondary_effects() {
        let mut state = create_test_battle(
            TestActorBuilder::new("Pikachu", 10).build(),
            TestActorBuilder::new("Geodude", 10).build(),
        );
        let bus = run(&mut state, Side::Player, Move::ThunderShock, vec![]);
        assert_eq!(
            bus.events(),
            &[BattleEvent::AttackTypeEffectiveness { multiplier: 0.0 }]
        );
        assert_eq!(state.teams[1].actors[0].status, None);
    }

    #[test]
    fn test_infinite_power_passes_through_immunity() {
        let mut state = create_test_battle(
            TestActorBuilder::new("Rattata", 10)
                .with_moves(vec![Move::HornDrill])
                .build(),
            TestActorBuilder::new("Gastly", 10)
                .with_stat(StatType::Health, 100)
                .with_hp(37)
                .build(),
        );
        // accuracy 30%: roll 0 hits
        let bus = run(&mut state, Side::Player, Move::HornDrill, vec![0]);
        assert!(bus.events().contains(&BattleEvent::DamageDealt {
            side: Side::Opponent,
            actor: "Gastly".to_string(),
            damage: 37,
            remaining_hp: 0
        }));
        assert_eq!(state.outcome(), Some(BattleOutcome::Victory));
    }

    #[test]
    fn test_status_does_not_overwrite() {
        let mut state = create_test_battle(
            TestActorBuilder::new("Pikachu", 10).build(),
            TestActorBuilder::new("Rattata", 10)
                .with_status(StatusCondition::Poison)
                .build(),
        );
        let bus = run(&mut state, Side::Player, Move::ThunderWave, vec![]);
        assert_eq!(
            bus.events(),
            &[BattleEvent::StatusFailed {
                side: Side::Opponent,
                actor: "Rattata".to_string()
            }]
        );
        assert_eq!(state.teams[1].actors[0].status, Some(StatusCondition::Poison));
    }

    #[test]
    fn test_sleep_duration_is_rolled() {
        let mut state = create_test_battle(
            TestActorBuilder::new("Bulbasaur", 10).build(),
            TestActorBuilder::new("Rattata", 10).build(),
        );
        // accuracy 75%: roll 0 hits; duration 1 + 9 % 7 = 3
        run(&mut state, Side::Player, Move::SleepPowder, vec![0, 9]);
        assert_eq!(state.teams[1].actors[0].status, Some(StatusCondition::Sleep(3)));
    }

    #[test]
    fn test_stat_stage_changes_clamp() {
        let mut state = create_test_battle(
            TestActorBuilder::new("Rattata", 10)
                .with_moves(vec![Move::SwordsDance])
                .build(),
            TestActorBuilder::new("Pidgey", 10).build(),
        );
        state.teams[0].set_stat_stage(StatType::Attack, 5);
        run(&mut state, Side::Player, Move::SwordsDance, vec![]);
        assert_eq!(state.teams[0].get_stat_stage(StatType::Attack), 6);

        let bus = run(&mut state, Side::Player, Move::SwordsDance, vec![]);
        assert_eq!(
            bus.events(),
            &[BattleEvent::StatChangeBlocked {
                side: Side::Player,
                actor: "Rattata".to_string(),
                stat: StatType::Attack,
                delta: 2
            }]
        );
    }

    #[test]
    fn test_health_statistic_stays_in_bounds() {
        let mut state = create_test_battle(
            TestActorBuilder::new("Rattata", 10).with_hp(5).build(),
            TestActorBuilder::new("Pidgey", 10).build(),
        );
        let mut rng = TurnRng::new_for_test(vec![]);
        let mut bus = EventBus::new();
        let mut selectors = selectors();
        let mut ctx = TurnContext::new(&mut rng, &mut bus, &mut selectors);

        apply_statistic(&mut state, Side::Player, StatType::Health, -20, &mut ctx).unwrap();
        assert_eq!(state.teams[0].actors[0].current_hp(), 0);

        apply_statistic(&mut state, Side::Player, StatType::Health, 127, &mut ctx).unwrap();
        let actor = &state.teams[0].actors[0];
        assert_eq!(actor.current_hp(), actor.max_hp().min(127));
    }

    #[test]
    fn test_forced_switch_brings_in_next_actor() {
        let mut state = create_team_battle(
            vec![TestActorBuilder::new("Pidgey", 10).build()],
            vec![
                TestActorBuilder::new("Rattata", 10).build(),
                TestActorBuilder::new("Ekans", 10).build(),
            ],
        );
        let bus = run(&mut state, Side::Player, Move::Roar, vec![]);
        assert_eq!(state.teams[1].active_index, 1);
        assert_eq!(
            bus.events(),
            &[BattleEvent::ActorSwitched {
                side: Side::Opponent,
                old_actor: "Rattata".to_string(),
                new_actor: "Ekans".to_string()
            }]
        );
    }

    #[test]
    fn test_forced_switch_fails_without_candidates() {
        let mut state = create_test_battle(
            TestActorBuilder::new("Pidgey", 10).build(),
            TestActorBuilder::new("Rattata", 10).build(),
        );
        let bus = run(&mut state, Side::Player, Move::Roar, vec![]);
        assert_eq!(bus.events(), &[BattleEvent::SwitchFailed { side: Side::Opponent }]);
    }

    #[test]
    fn test_knockout_mid_sequence_stops_wild_battle() {
        let mut state = create_test_battle(
            TestActorBuilder::new("Pikachu", 30).build(),
            TestActorBuilder::new("Rattata", 5).with_hp(1).build(),
        );
        // Damage knocks the wild Rattata out; the paralysis effect must not run.
        let bus = run(&mut state, Side::Player, Move::ThunderShock, vec![255, 255]);
        assert_eq!(state.outcome(), Some(BattleOutcome::Victory));
        assert!(!bus
            .events()
            .iter()
            .any(|event| matches!(event, BattleEvent::EffectMissed { .. } | BattleEvent::StatusApplied { .. })));
    }
}
