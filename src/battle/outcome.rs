use crate::battle::engine::TurnContext;
use crate::battle::events::{BattleEvent, EventBus};
use crate::battle::state::{BattleOutcome, BattleState, GameState, Side};
use crate::errors::{BattleResult, BattleStateError};

/// Where an active slot ends up after a faint check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    /// The active actor still has health.
    Active,
    /// The active actor fainted and the roster member at this index took its place.
    Replaced(usize),
    /// The active actor fainted and nobody can take its place. A wild team is wiped
    /// the moment its active actor faints.
    TeamWiped,
}

/// Resolve a possible faint of `side`'s active actor: announce it, then either bring in
/// a replacement or end the battle in the other side's favour.
pub fn check_fainting(
    state: &mut BattleState,
    side: Side,
    ctx: &mut TurnContext<'_>,
) -> BattleResult<SlotState> {
    let team = state.team(side);
    let actor = team.active_actor().ok_or_else(|| {
        BattleStateError::InconsistentState(format!("{} has no active actor", team.name))
    })?;
    if !actor.is_fainted() {
        return Ok(SlotState::Active);
    }

    ctx.bus.push(BattleEvent::ActorFainted {
        side,
        actor: actor.name.clone(),
    });

    if team.is_wild() {
        end_battle(state, BattleOutcome::for_winner(side.opponent()), ctx.bus);
        return Ok(SlotState::TeamWiped);
    }

    let candidates = team.replacement_candidates();
    let Some(&default) = candidates.first() else {
        ctx.bus.push(BattleEvent::TeamWiped { side });
        end_battle(state, BattleOutcome::for_winner(side.opponent()), ctx.bus);
        return Ok(SlotState::TeamWiped);
    };

    let chosen = match ctx.selectors[side.to_index()].choose_replacement(side, state, &candidates) {
        Some(index) if candidates.contains(&index) => index,
        Some(index) => {
            log::warn!(
                "{} picked ineligible replacement {}; sending out slot {} instead",
                state.team(side).name,
                index,
                default
            );
            default
        }
        None => default,
    };

    replace_active(state, side, chosen, ctx.bus)?;
    Ok(SlotState::Replaced(chosen))
}

/// Switch `side` to roster index `new_index` and announce it.
pub fn replace_active(
    state: &mut BattleState,
    side: Side,
    new_index: usize,
    bus: &mut EventBus,
) -> BattleResult<()> {
    let team = state.team_mut(side);
    let old_actor = team
        .active_actor()
        .map(|actor| actor.name.clone())
        .unwrap_or_default();
    team.switch_actor(new_index)?;
    let new_actor = team
        .active_actor()
        .map(|actor| actor.name.clone())
        .unwrap_or_default();

    bus.push(BattleEvent::ActorSwitched {
        side,
        old_actor,
        new_actor,
    });
    Ok(())
}

/// Record the final outcome. Only the first call has any effect, so `BattleEnded`
/// is emitted exactly once.
pub fn end_battle(state: &mut BattleState, outcome: BattleOutcome, bus: &mut EventBus) {
    if state.is_over() {
        return;
    }
    log::info!("Battle {} ended: {}", state.battle_id, outcome);
    state.game_state = GameState::Ended(outcome);
    bus.push(BattleEvent::BattleEnded { outcome });
}
