use crate::battle::action::{Action, TeamAndAction};
use crate::battle::state::{BattleState, Side};
use crate::battle::stats::effective_speed;
use crate::move_data::get_move_data;

/// Verdict of one ordering filter about the first action of a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precedence {
    First,
    Second,
    Undecided,
}

type OrderingFilter = fn(&TeamAndAction, &TeamAndAction, &BattleState) -> Precedence;

/// Filters applied in sequence; the first one that decides wins.
const ORDERING_FILTERS: [OrderingFilter; 6] = [
    player_flee_first,
    switch_first,
    item_first,
    higher_priority_first,
    faster_first,
    move_first,
];

/// Order the player's and opponent's actions for this turn.
///
/// Pure: consumes no randomness and does not touch the state. When no filter
/// decides, submission order (player first) is kept.
pub fn order_actions(
    state: &BattleState,
    player_action: Action,
    opponent_action: Action,
) -> [TeamAndAction; 2] {
    let player = TeamAndAction::new(state, Side::Player, player_action);
    let opponent = TeamAndAction::new(state, Side::Opponent, opponent_action);
    order_pair(state, player, opponent)
}

/// Order two already-bound actions. `first` wins every tie.
pub fn order_pair(
    state: &BattleState,
    first: TeamAndAction,
    second: TeamAndAction,
) -> [TeamAndAction; 2] {
    for filter in ORDERING_FILTERS {
        match filter(&first, &second, state) {
            Precedence::First => return [first, second],
            Precedence::Second => return [second, first],
            Precedence::Undecided => {}
        }
    }
    log::debug!(
        "No ordering filter decided between {} and {}; keeping submission order",
        first.action,
        second.action
    );
    [first, second]
}

fn prefer(a_matches: bool, b_matches: bool) -> Precedence {
    match (a_matches, b_matches) {
        (true, false) => Precedence::First,
        (false, true) => Precedence::Second,
        _ => Precedence::Undecided,
    }
}

fn player_flee_first(a: &TeamAndAction, b: &TeamAndAction, _state: &BattleState) -> Precedence {
    let is_player_flee = |t: &TeamAndAction| t.side == Side::Player && t.action == Action::Flee;
    prefer(is_player_flee(a), is_player_flee(b))
}

fn switch_first(a: &TeamAndAction, b: &TeamAndAction, _state: &BattleState) -> Precedence {
    let is_switch = |t: &TeamAndAction| matches!(t.action, Action::Switch { .. });
    prefer(is_switch(a), is_switch(b))
}

fn item_first(a: &TeamAndAction, b: &TeamAndAction, _state: &BattleState) -> Precedence {
    let is_item = |t: &TeamAndAction| matches!(t.action, Action::UseItem { .. });
    prefer(is_item(a), is_item(b))
}

fn higher_priority_first(a: &TeamAndAction, b: &TeamAndAction, _state: &BattleState) -> Precedence {
    match (move_priority(a), move_priority(b)) {
        (Some(pa), Some(pb)) if pa > pb => Precedence::First,
        (Some(pa), Some(pb)) if pa < pb => Precedence::Second,
        _ => Precedence::Undecided,
    }
}

fn faster_first(a: &TeamAndAction, b: &TeamAndAction, state: &BattleState) -> Precedence {
    if !(a.action.is_move() && b.action.is_move()) {
        return Precedence::Undecided;
    }
    match (speed_of(a, state), speed_of(b, state)) {
        (Some(sa), Some(sb)) if sa > sb => Precedence::First,
        (Some(sa), Some(sb)) if sa < sb => Precedence::Second,
        _ => Precedence::Undecided,
    }
}

fn move_first(a: &TeamAndAction, b: &TeamAndAction, _state: &BattleState) -> Precedence {
    prefer(a.action.is_move(), b.action.is_move())
}

/// Declared priority of a move action. Unknown moves count as priority 0 here;
/// the missing data is reported when the move executes.
fn move_priority(t: &TeamAndAction) -> Option<i8> {
    match t.action {
        Action::UseMove { move_ } => Some(get_move_data(move_).map(|data| data.priority).unwrap_or(0)),
        _ => None,
    }
}

fn speed_of(t: &TeamAndAction, state: &BattleState) -> Option<u16> {
    let team = state.team(t.side);
    team.actors
        .get(t.actor)
        .map(|actor| effective_speed(actor, team))
}
