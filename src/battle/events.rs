use crate::actor::StatusCondition;
use crate::battle::state::{BattleOutcome, BattleState, Side};
use schema::{Item, Move, StatType};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum BattleEvent {
    // Turn Management
    TurnStarted {
        turn_number: u32,
    },
    TurnEnded,
    ActionRejected {
        side: Side,
        reason: String,
    },

    // Actor Actions
    ActorSwitched {
        side: Side,
        old_actor: String,
        new_actor: String,
    },
    MoveUsed {
        side: Side,
        actor: String,
        move_used: Move,
    },
    MoveMissed {
        side: Side,
        actor: String,
        move_used: Move,
    },
    EffectMissed {
        side: Side,
        move_used: Move,
    },
    CriticalHit {
        side: Side,
    },
    AttackTypeEffectiveness {
        multiplier: f64,
    },
    DamageDealt {
        side: Side,
        actor: String,
        damage: u16,
        remaining_hp: u16,
    },
    ActorHealed {
        side: Side,
        actor: String,
        amount: u16,
        new_hp: u16,
    },
    ItemUsed {
        side: Side,
        item: Item,
        actor: String,
    },
    ActorFocused {
        side: Side,
        actor: String,
    },
    SwitchFailed {
        side: Side,
    },

    // Stat Changes
    StatStageChanged {
        side: Side,
        actor: String,
        stat: StatType,
        old_stage: i8,
        new_stage: i8,
    },
    StatChangeBlocked {
        side: Side,
        actor: String,
        stat: StatType,
        delta: i8,
    },

    // Status Conditions
    StatusApplied {
        side: Side,
        actor: String,
        status: StatusCondition,
    },
    StatusFailed {
        side: Side,
        actor: String,
    },
    StatusRemoved {
        side: Side,
        actor: String,
        status: StatusCondition,
    },
    StatusDamage {
        side: Side,
        actor: String,
        status: StatusCondition,
        damage: u16,
        remaining_hp: u16,
    },

    // Action Failures
    ActionFailed {
        side: Side,
        actor: String,
        reason: ActionFailureReason,
    },

    // Fleeing
    FleeSucceeded,
    FleeFailed,
    OpponentFled,

    // Fainting and Battle End
    ActorFainted {
        side: Side,
        actor: String,
    },
    TeamWiped {
        side: Side,
    },
    BattleEnded {
        outcome: BattleOutcome,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionFailureReason {
    IsAsleep,
    IsFrozen,
    IsParalyzed,
    /// The actor that chose the action fainted or was replaced before it could act.
    ActorReplaced,
}

impl BattleEvent {
    /// Formats the event into a human-readable string using battle context.
    /// Returns None for silent events that should not produce user-visible text.
    pub fn format(&self, battle_state: &BattleState) -> Option<String> {
        let team_name = |side: Side| battle_state.team(side).name.as_str();
        let text = &battle_state.text;

        match self {
            // === Turn Management Events ===
            BattleEvent::TurnStarted { turn_number } => {
                Some(format!("=== Turn {} ===", turn_number))
            }
            BattleEvent::TurnEnded => None,
            BattleEvent::ActionRejected { reason, .. } => Some(reason.clone()),

            // === Switching Events ===
            BattleEvent::ActorSwitched {
                side,
                old_actor,
                new_actor,
            } => Some(format!(
                "{} recalled {} and sent out {}!",
                team_name(*side),
                old_actor,
                new_actor
            )),
            BattleEvent::SwitchFailed { .. } => Some("But it failed!".to_string()),

            // === Move Events ===
            BattleEvent::MoveUsed {
                side,
                actor,
                move_used,
            } => Some(format!("{}'s {} used {}!", team_name(*side), actor, move_used)),
            BattleEvent::MoveMissed { actor, .. } => Some(format!("{}'s attack missed!", actor)),
            BattleEvent::EffectMissed { .. } => None,
            BattleEvent::CriticalHit { .. } => Some("A critical hit!".to_string()),
            BattleEvent::AttackTypeEffectiveness { multiplier } => match *multiplier {
                m if m > 1.0 => Some("It's super effective!".to_string()),
                m if m < 1.0 && m > 0.0 => Some("It's not very effective...".to_string()),
                m if m == 0.0 => Some("It had no effect!".to_string()),
                _ => None,
            },

            // === Damage and Healing Events ===
            BattleEvent::DamageDealt { actor, damage, .. } => {
                Some(format!("{} took {} damage!", actor, damage))
            }
            BattleEvent::ActorHealed { actor, amount, .. } => {
                Some(format!("{} recovered {} HP!", actor, amount))
            }
            BattleEvent::ItemUsed { side, item, actor } => Some(format!(
                "{} used {} on {}!",
                team_name(*side),
                item,
                actor
            )),
            BattleEvent::ActorFocused { actor, .. } => {
                Some(format!("{} is getting pumped!", actor))
            }

            // === Stat Change Events ===
            BattleEvent::StatStageChanged {
                actor,
                stat,
                old_stage,
                new_stage,
                ..
            } => {
                if new_stage > old_stage {
                    Some(format!("{}'s {} rose!", actor, stat))
                } else {
                    Some(format!("{}'s {} fell!", actor, stat))
                }
            }
            BattleEvent::StatChangeBlocked {
                actor, stat, delta, ..
            } => {
                let direction = if *delta > 0 { "higher" } else { "lower" };
                Some(format!("{}'s {} won't go any {}!", actor, stat, direction))
            }

            // === Status Events ===
            BattleEvent::StatusApplied { actor, status, .. } => {
                Some(format!("{} {}", actor, Self::format_status_applied(status)))
            }
            BattleEvent::StatusFailed { .. } => Some("But it failed!".to_string()),
            BattleEvent::StatusRemoved { actor, status, .. } => {
                Some(format!("{} {}", actor, Self::format_status_removed(status)))
            }
            BattleEvent::StatusDamage {
                actor,
                status,
                damage,
                ..
            } => Some(format!(
                "{} is hurt by its {}! ({} damage)",
                actor, status, damage
            )),

            // === Action Failure Events ===
            BattleEvent::ActionFailed { actor, reason, .. } => {
                Self::format_action_failure_reason(reason).map(|text| format!("{} {}", actor, text))
            }

            // === Flee Events ===
            BattleEvent::FleeSucceeded => Some(text.flee_success.clone()),
            BattleEvent::FleeFailed => Some(text.flee_failure.clone()),
            BattleEvent::OpponentFled => Some(text.wild_fled.clone()),

            // === Battle End Events ===
            BattleEvent::ActorFainted { actor, .. } => Some(format!("{} fainted!", actor)),
            BattleEvent::TeamWiped { side } => Some(format!(
                "{} is out of usable Pokémon!",
                team_name(*side)
            )),
            BattleEvent::BattleEnded { outcome } => match outcome {
                BattleOutcome::Victory => Some(text.victory.clone()),
                BattleOutcome::Defeat => Some(text.defeat.clone()),
                BattleOutcome::Fled => None,
            },
        }
    }

    fn format_status_applied(status: &StatusCondition) -> &'static str {
        match status {
            StatusCondition::Sleep(_) => "fell asleep!",
            StatusCondition::Poison => "was poisoned!",
            StatusCondition::Burn => "was burned!",
            StatusCondition::Freeze => "was frozen solid!",
            StatusCondition::Paralysis => "is paralyzed! It may be unable to move!",
        }
    }

    fn format_status_removed(status: &StatusCondition) -> String {
        match status {
            StatusCondition::Sleep(_) => "woke up!".to_string(),
            StatusCondition::Freeze => "thawed out!".to_string(),
            _ => format!("was cured of its {}!", status),
        }
    }

    fn format_action_failure_reason(reason: &ActionFailureReason) -> Option<&'static str> {
        match reason {
            ActionFailureReason::IsAsleep => Some("is fast asleep."),
            ActionFailureReason::IsFrozen => Some("is frozen solid!"),
            ActionFailureReason::IsParalyzed => Some("is fully paralyzed!"),
            ActionFailureReason::ActorReplaced => None,
        }
    }
}

/// Presentation hook. Called synchronously for every event as it is produced;
/// returning is the signal that presentation finished.
pub trait Animator {
    fn animate(&mut self, event: &BattleEvent);
}

/// Animator that writes every event to the debug log.
#[derive(Debug, Default)]
pub struct LogAnimator;

impl Animator for LogAnimator {
    fn animate(&mut self, event: &BattleEvent) {
        log::debug!("{:?}", event);
    }
}

/// Event bus for collecting battle events and forwarding them to an animator.
///
/// ```rust,ignore
/// event_bus.print_debug();                                    // Just print events
/// event_bus.print_formatted(&battle_state);                  // Human-readable format
/// println!("{}", event_bus);                                  // Print all events
/// ```
#[derive(Default)]
pub struct EventBus {
    events: Vec<BattleEvent>,
    animator: Option<Box<dyn Animator>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_animator(animator: Box<dyn Animator>) -> Self {
        Self {
            events: Vec::new(),
            animator: Some(animator),
        }
    }

    pub fn push(&mut self, event: BattleEvent) {
        if let Some(animator) = self.animator.as_mut() {
            animator.animate(&event);
        }
        self.events.push(event);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    /// Events pushed at or after `index`.
    pub fn events_since(&self, index: usize) -> &[BattleEvent] {
        self.events.get(index..).unwrap_or(&[])
    }

    /// Print all events in debug format with indentation.
    pub fn print_debug(&self) {
        for event in &self.events {
            println!("  {:?}", event);
        }
    }

    /// Print all events using their formatted text, skipping silent ones.
    pub fn print_formatted(&self, battle_state: &BattleState) {
        for event in &self.events {
            if let Some(formatted) = event.format(battle_state) {
                println!("  {}", formatted);
            }
        }
    }

    /// Serialize the event log.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.events)
    }

    /// Return true if the event bus contains no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Return the number of events in the bus.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("events", &self.events)
            .field("animated", &self.animator.is_some())
            .finish()
    }
}

impl std::fmt::Display for EventBus {
    /// Format the EventBus for printing. Shows debug format of all events.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for event in &self.events {
            writeln!(f, "  {:?}", event)?;
        }
        Ok(())
    }
}
