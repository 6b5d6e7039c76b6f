use crate::battle::action::{validate_action, Action};
use crate::battle::ai::BattleAi;
use crate::battle::engine::{resolve_turn, TurnContext};
use crate::battle::events::{Animator, BattleEvent, EventBus};
use crate::battle::selectors::Selector;
use crate::battle::state::{BattleOutcome, BattleState, Side, TurnRng};
use crate::config::{AiConfig, TextOverrides};
use crate::errors::{ActionError, BattleResult, BattleStateError};
use crate::team::Team;

/// How many times a selector is asked for a valid action before the turn gives up.
pub const MAX_SELECTION_ATTEMPTS: usize = 5;

/// Battles that have not ended by this turn are abandoned.
pub const TURN_LIMIT: u32 = 1000;

/// Caller-provided settings for a new battle.
#[derive(Debug, Clone, Default)]
pub struct BattleOptions {
    pub battle_id: String,
    /// Seed for the battle's random source; `None` draws one from the OS.
    pub seed: Option<u64>,
    pub text: TextOverrides,
    /// AI tuning for the opponent built by [`Battle::versus_ai`]; `None` uses the built-in
    /// table. [`Battle::new`] takes ready-made selectors and does not read it.
    pub ai: Option<AiConfig>,
}

/// Owns a battle from start to finish: asks the selectors for actions, resolves turns,
/// and reports the outcome.
pub struct Battle {
    state: BattleState,
    selectors: [Box<dyn Selector>; 2],
    rng: TurnRng,
    bus: EventBus,
}

impl Battle {
    /// Validate both rosters and set up the initial state.
    pub fn new(
        player: Team,
        opponent: Team,
        selectors: [Box<dyn Selector>; 2],
        options: BattleOptions,
    ) -> BattleResult<Self> {
        player.validate()?;
        opponent.validate()?;

        let mut state = BattleState::new(options.battle_id, player, opponent);
        state.text = options.text;
        let rng = options.seed.map_or_else(TurnRng::new_random, TurnRng::from_seed);

        log::info!(
            "Battle {} started: {} vs {}",
            state.battle_id,
            state.team(Side::Player).name,
            state.team(Side::Opponent).name
        );

        Ok(Self {
            state,
            selectors,
            rng,
            bus: EventBus::new(),
        })
    }

    /// A battle whose opponent is driven by [`BattleAi`].
    pub fn versus_ai(
        player: Team,
        opponent: Team,
        player_selector: Box<dyn Selector>,
        options: BattleOptions,
    ) -> BattleResult<Self> {
        let ai = match options.ai.clone() {
            Some(config) => config,
            None => AiConfig::builtin()?,
        };
        Self::new(
            player,
            opponent,
            [player_selector, Box::new(BattleAi::new(ai))],
            options,
        )
    }

    /// Forward every event to `animator` as it is produced.
    pub fn with_animator(mut self, animator: Box<dyn Animator>) -> Self {
        self.bus = EventBus::with_animator(animator);
        self
    }

    /// Replace the random source, e.g. with scripted rolls.
    pub fn with_rng(mut self, rng: TurnRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn events(&self) -> &EventBus {
        &self.bus
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        self.state.outcome()
    }

    /// Ask `side`'s selector for an action until it offers a valid one. Each rejection
    /// is announced with a message meant for whoever made the choice.
    fn select_action(&mut self, side: Side) -> BattleResult<Action> {
        let selector = &mut self.selectors[side.to_index()];
        for attempt in 1..=MAX_SELECTION_ATTEMPTS {
            let action = selector.next_action(side, &self.state, &mut self.rng);
            match validate_action(&self.state, side, &action) {
                Ok(()) => return Ok(action),
                Err(err) => {
                    log::warn!(
                        "{} chose an invalid action ({}) on attempt {}: {}",
                        self.state.team(side).name,
                        action,
                        attempt,
                        err
                    );
                    let reason = match err {
                        ActionError::FleeForbidden => self.state.text.flee_forbidden.clone(),
                        other => other.to_string(),
                    };
                    self.bus.push(BattleEvent::ActionRejected { side, reason });
                }
            }
        }
        Err(ActionError::TooManyAttempts(MAX_SELECTION_ATTEMPTS).into())
    }

    /// Play one turn. Returns the outcome once the battle is over.
    pub fn step(&mut self) -> BattleResult<Option<BattleOutcome>> {
        if let Some(outcome) = self.state.outcome() {
            return Ok(Some(outcome));
        }
        if self.state.turn_number > TURN_LIMIT {
            return Err(BattleStateError::InconsistentState(format!(
                "battle {} passed {} turns",
                self.state.battle_id, TURN_LIMIT
            ))
            .into());
        }

        let player_action = self.select_action(Side::Player)?;
        let opponent_action = self.select_action(Side::Opponent)?;

        let mut ctx = TurnContext::new(&mut self.rng, &mut self.bus, &mut self.selectors);
        resolve_turn(&mut self.state, player_action, opponent_action, &mut ctx)?;
        Ok(self.state.outcome())
    }

    /// Play turns until the battle ends.
    pub fn run(&mut self) -> BattleResult<BattleOutcome> {
        loop {
            if let Some(outcome) = self.step()? {
                return Ok(outcome);
            }
        }
    }

    /// Like [`Battle::run`], handing the outcome to `on_complete` exactly once.
    pub fn run_with<F>(&mut self, on_complete: F) -> BattleResult<BattleOutcome>
    where
        F: FnOnce(BattleOutcome),
    {
        let outcome = self.run()?;
        on_complete(outcome);
        Ok(outcome)
    }
}

impl std::fmt::Debug for Battle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Battle")
            .field("state", &self.state)
            .field("rng", &self.rng)
            .field("bus", &self.bus)
            .finish_non_exhaustive()
    }
}
