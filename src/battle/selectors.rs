use crate::battle::action::{valid_actions, Action};
use crate::battle::state::{BattleState, Side, TurnRng};
use std::collections::VecDeque;

/// Chooses actions for one side of a battle.
pub trait Selector {
    /// Pick this turn's action. Invalid picks are rejected and the selector is asked again.
    fn next_action(&mut self, side: Side, state: &BattleState, rng: &mut TurnRng) -> Action;

    /// Pick who replaces a fainted actor. `candidates` is non-empty and in roster order;
    /// returning `None` or an index outside it falls back to the first candidate.
    fn choose_replacement(
        &mut self,
        _side: Side,
        _state: &BattleState,
        candidates: &[usize],
    ) -> Option<usize> {
        candidates.first().copied()
    }

    /// Whether fleeing should be offered at all. Nobody runs from a trainer.
    fn can_attempt_flee(&self, side: Side, state: &BattleState) -> bool {
        state.team(side.opponent()).leader().is_none()
    }
}

/// Plays back queued actions and replacements, then falls back to the first valid action.
#[derive(Debug, Default, Clone)]
pub struct ScriptedSelector {
    actions: VecDeque<Action>,
    replacements: VecDeque<usize>,
}

impl ScriptedSelector {
    pub fn new(actions: Vec<Action>) -> Self {
        Self {
            actions: actions.into(),
            replacements: VecDeque::new(),
        }
    }

    pub fn with_replacements(mut self, replacements: Vec<usize>) -> Self {
        self.replacements = replacements.into();
        self
    }
}

impl Selector for ScriptedSelector {
    fn next_action(&mut self, side: Side, state: &BattleState, _rng: &mut TurnRng) -> Action {
        if let Some(action) = self.actions.pop_front() {
            return action;
        }
        valid_actions(state, side)
            .into_iter()
            .next()
            .unwrap_or(Action::Flee)
    }

    fn choose_replacement(
        &mut self,
        _side: Side,
        _state: &BattleState,
        candidates: &[usize],
    ) -> Option<usize> {
        self.replacements
            .pop_front()
            .or_else(|| candidates.first().copied())
    }
}

type ActionCallback = dyn FnMut(Side, &BattleState, &[Action]) -> Action;
type ReplacementCallback = dyn FnMut(Side, &BattleState, &[usize]) -> Option<usize>;

/// Delegates decisions to closures, e.g. a menu driven by a person.
pub struct CallbackSelector {
    on_action: Box<ActionCallback>,
    on_replacement: Option<Box<ReplacementCallback>>,
}

impl CallbackSelector {
    pub fn new(on_action: impl FnMut(Side, &BattleState, &[Action]) -> Action + 'static) -> Self {
        Self {
            on_action: Box::new(on_action),
            on_replacement: None,
        }
    }

    pub fn with_replacement(
        mut self,
        on_replacement: impl FnMut(Side, &BattleState, &[usize]) -> Option<usize> + 'static,
    ) -> Self {
        self.on_replacement = Some(Box::new(on_replacement));
        self
    }
}

impl Selector for CallbackSelector {
    fn next_action(&mut self, side: Side, state: &BattleState, _rng: &mut TurnRng) -> Action {
        let options = valid_actions(state, side);
        (self.on_action)(side, state, &options)
    }

    fn choose_replacement(
        &mut self,
        side: Side,
        state: &BattleState,
        candidates: &[usize],
    ) -> Option<usize> {
        match self.on_replacement.as_mut() {
            Some(callback) => callback(side, state, candidates),
            None => candidates.first().copied(),
        }
    }
}

impl std::fmt::Debug for CallbackSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackSelector").finish_non_exhaustive()
    }
}
