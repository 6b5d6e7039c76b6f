use crate::battle::state::{BattleState, Side, TurnRng};
use crate::battle::stats::{effective_attack, effective_defense};
use crate::errors::{BattleResult, BattleStateError};
use schema::{BasePower, MoveData};

/// Critical hits can never be certain.
pub const MAX_CRITICAL_PROBABILITY: f64 = 255.0 / 256.0;

/// Result of one damage roll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageCalculation {
    pub damage: u16,
    pub critical: bool,
    pub effectiveness: f64,
}

/// Chance of a critical hit: base speed / 512, eight times that for high-critical moves.
/// Focus divides the chance by four, as the first-generation games did.
pub fn critical_hit_probability(base_speed: u8, high_critical: bool, focused: bool) -> f64 {
    let mut probability = f64::from(base_speed) / 512.0;
    if high_critical {
        probability *= 8.0;
    }
    if focused {
        probability /= 4.0;
    }
    probability.min(MAX_CRITICAL_PROBABILITY)
}

/// Calculate the damage one damage effect of `move_data` deals from the active actor on
/// `attacker_side` to the active actor on `defender_side`.
///
/// Rolls, in order: critical hit, then the 0.85..=1.0 variance factor. Non-finite power
/// always takes the defender's current health, even through a type immunity; neither
/// it nor an immunity consumes a roll. The level term only counts on a critical hit; a
/// regular hit uses level 0.
pub fn calculate_damage(
    state: &BattleState,
    attacker_side: Side,
    defender_side: Side,
    move_data: &MoveData,
    power: BasePower,
    rng: &mut TurnRng,
) -> BattleResult<DamageCalculation> {
    let attacker_team = state.team(attacker_side);
    let defender_team = state.team(defender_side);
    let attacker = attacker_team.active_actor().ok_or_else(|| {
        BattleStateError::InconsistentState(format!("{} has no active actor", attacker_team.name))
    })?;
    let defender = defender_team.active_actor().ok_or_else(|| {
        BattleStateError::InconsistentState(format!("{} has no active actor", defender_team.name))
    })?;

    // Non-finite power ignores the type chart entirely.
    let BasePower::Finite(power) = power else {
        return Ok(DamageCalculation {
            damage: defender.current_hp(),
            critical: false,
            effectiveness: 1.0,
        });
    };

    let effectiveness = move_data.move_type.effectiveness_against(&defender.types);
    if effectiveness == 0.0 {
        return Ok(DamageCalculation {
            damage: 0,
            critical: false,
            effectiveness,
        });
    }

    let crit_chance = critical_hit_probability(
        attacker.base_speed,
        move_data.high_critical,
        attacker_team.focused,
    );
    let critical = rng.chance(crit_chance, "Critical Hit Check");

    let level = if critical { f64::from(attacker.level) } else { 0.0 };
    let attack = f64::from(effective_attack(attacker, attacker_team, move_data.move_type));
    let defense = f64::from(effective_defense(defender, defender_team, move_data.move_type).max(1));

    let base_damage = (((2.0 * level + 10.0) / 250.0) * (attack / defense) * f64::from(power) + 2.0).floor();

    let stab = if attacker.has_type(move_data.move_type) {
        1.5
    } else {
        1.0
    };
    let variance = 0.85 + 0.15 * f64::from(rng.next_outcome("Damage Variance")) / 255.0;
    let modifier = stab * effectiveness * variance;

    let damage = (base_damage * modifier).max(1.0).round();
    let damage = damage.min(f64::from(defender.current_hp())) as u16;

    log::debug!(
        "{} -> {}: {:?} power {} atk {} def {} crit {} eff {} var {:.3} = {}",
        attacker.name,
        defender.name,
        move_data.id,
        power,
        attack,
        defense,
        critical,
        effectiveness,
        variance,
        damage
    );

    Ok(DamageCalculation {
        damage,
        critical,
        effectiveness,
    })
}
