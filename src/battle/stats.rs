use crate::actor::Actor;
use crate::team::Team;
use schema::{PokemonType, StatType};

/// Current value of a statistic with the team's stat stage applied.
/// Status penalties are already folded into `current`.
pub fn effective_stat(actor: &Actor, team: &Team, stat: StatType) -> u16 {
    let current = actor.stats.get(stat).current;
    if !stat.is_staged() {
        return current;
    }
    apply_stat_stage_multiplier(current, team.get_stat_stage(stat))
}

/// Offensive statistic used by a move of the given type (physical/special split by type).
pub fn effective_attack(actor: &Actor, team: &Team, move_type: PokemonType) -> u16 {
    let stat = if move_type.is_special() {
        StatType::Special
    } else {
        StatType::Attack
    };
    effective_stat(actor, team, stat)
}

/// Defensive statistic facing a move of the given type.
pub fn effective_defense(actor: &Actor, team: &Team, move_type: PokemonType) -> u16 {
    let stat = if move_type.is_special() {
        StatType::Special
    } else {
        StatType::Defense
    };
    effective_stat(actor, team, stat)
}

pub fn effective_speed(actor: &Actor, team: &Team) -> u16 {
    effective_stat(actor, team, StatType::Speed)
}

/// Apply stat stage multipliers according to Pokemon formula
/// Stages range from -6 to +6
/// Negative stages: (2 / (2 + |stage|))
/// Positive stages: ((2 + stage) / 2)
pub fn apply_stat_stage_multiplier(base_stat: u16, stage: i8) -> u16 {
    let clamped_stage = stage.clamp(-6, 6);

    if clamped_stage == 0 {
        return base_stat;
    }

    let multiplier = if clamped_stage < 0 {
        2.0 / (2.0 + f64::from(-clamped_stage))
    } else {
        (2.0 + f64::from(clamped_stage)) / 2.0
    };

    (f64::from(base_stat) * multiplier).round().min(f64::from(u16::MAX)) as u16
}
