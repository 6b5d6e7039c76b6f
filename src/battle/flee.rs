use crate::battle::state::{BattleState, Side, TurnRng};

/// Escape threshold out of 256, or `None` when escape is guaranteed
/// (zero divisor or a threshold above 255).
///
/// `f = player_speed * 32 / ((opponent_base_speed / 4) mod 256) + 30 * prior_attempts`
pub fn flee_threshold(player_speed: u16, opponent_base_speed: u8, prior_attempts: u32) -> Option<u32> {
    let divisor = (u32::from(opponent_base_speed) / 4) % 256;
    if divisor == 0 {
        return None;
    }
    let threshold = (u32::from(player_speed) * 32) / divisor + 30 * prior_attempts;
    if threshold > 255 {
        None
    } else {
        Some(threshold)
    }
}

/// Roll an escape attempt for the player. Every call counts as an attempt.
///
/// The caller guarantees the opponent is not a trainer.
pub fn attempt_flee(state: &mut BattleState, rng: &mut TurnRng) -> bool {
    let prior_attempts = state.flee_attempts;
    state.flee_attempts += 1;

    let player_speed = state
        .team(Side::Player)
        .active_actor()
        .map(|actor| actor.stats.speed.current)
        .unwrap_or(0);
    let opponent_base_speed = state
        .team(Side::Opponent)
        .active_actor()
        .map(|actor| actor.base_speed)
        .unwrap_or(0);

    let escaped = match flee_threshold(player_speed, opponent_base_speed, prior_attempts) {
        None => true,
        Some(threshold) => u32::from(rng.next_outcome("Flee Check")) < threshold,
    };

    log::debug!(
        "Flee attempt {} (speed {} vs base {}): {}",
        prior_attempts + 1,
        player_speed,
        opponent_base_speed,
        if escaped { "escaped" } else { "failed" }
    );
    escaped
}
