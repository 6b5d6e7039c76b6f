#[cfg(test)]
mod tests {
    use crate::actor::StatusCondition;
    use crate::battle::action::{valid_actions, Action};
    use crate::battle::ai::BattleAi;
    use crate::battle::engine::{resolve_turn, TurnContext};
    use crate::battle::events::{ActionFailureReason, BattleEvent, EventBus};
    use crate::battle::selectors::{ScriptedSelector, Selector};
    use crate::battle::state::{BattleOutcome, BattleState, Side, TurnRng};
    use crate::battle::tests::common::{
        create_team_battle, create_test_battle, create_trainer_battle, default_selectors,
        TestActorBuilder,
    };
    use crate::config::AiConfig;
    use pretty_assertions::assert_eq;
    use schema::{Move, StatType};

    fn play_turn(
        state: &mut BattleState,
        player_action: Action,
        opponent_action: Action,
        rolls: Vec<u8>,
    ) -> EventBus {
        let mut rng = TurnRng::new_for_test(rolls);
        let mut bus = EventBus::new();
        let mut selectors = default_selectors();
        let mut ctx = TurnContext::new(&mut rng, &mut bus, &mut selectors);
        resolve_turn(state, player_action, opponent_action, &mut ctx).unwrap();
        bus
    }

    fn moves_in_order(bus: &EventBus) -> Vec<(Side, Move)> {
        bus.events()
            .iter()
            .filter_map(|event| match event {
                BattleEvent::MoveUsed { side, move_used, .. } => Some((*side, *move_used)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_priority_move_outruns_faster_opponent() {
        let mut state = create_test_battle(
            TestActorBuilder::new("Pikachu", 20)
                .with_moves(vec![Move::Growl])
                .with_stat(StatType::Speed, 120)
                .build(),
            TestActorBuilder::new("Rattata", 20)
                .with_moves(vec![Move::QuickAttack])
                .with_stat(StatType::Speed, 30)
                .build(),
        );

        // Quick Attack: crit roll, variance roll.
        let bus = play_turn(
            &mut state,
            Action::UseMove { move_: Move::Growl },
            Action::UseMove {
                move_: Move::QuickAttack,
            },
            vec![255, 200],
        );

        assert_eq!(
            moves_in_order(&bus),
            vec![
                (Side::Opponent, Move::QuickAttack),
                (Side::Player, Move::Growl)
            ]
        );
    }

    #[test]
    fn test_infinite_power_knocks_out_and_ends_wild_battle() {
        let mut state = create_test_battle(
            TestActorBuilder::new("Krabby", 20)
                .with_moves(vec![Move::Guillotine])
                .build(),
            TestActorBuilder::new("Rattata", 20)
                .with_moves(vec![Move::TailWhip])
                .with_stat(StatType::Health, 100)
                .with_hp(37)
                .build(),
        );

        // Rattata is faster; Tail Whip needs no roll. Guillotine hits on 0.
        let bus = play_turn(
            &mut state,
            Action::UseMove {
                move_: Move::Guillotine,
            },
            Action::UseMove {
                move_: Move::TailWhip,
            },
            vec![0],
        );

        assert!(bus.events().contains(&BattleEvent::DamageDealt {
            side: Side::Opponent,
            actor: "Rattata".to_string(),
            damage: 37,
            remaining_hp: 0,
        }));
        assert_eq!(state.teams[1].actors[0].current_hp(), 0);
        assert_eq!(
            &bus.events()[bus.len() - 2..],
            &[
                BattleEvent::ActorFainted {
                    side: Side::Opponent,
                    actor: "Rattata".to_string()
                },
                BattleEvent::BattleEnded {
                    outcome: BattleOutcome::Victory
                },
            ]
        );
        assert_eq!(state.outcome(), Some(BattleOutcome::Victory));
    }

    #[test]
    fn test_flee_is_never_offered_against_a_trainer() {
        let state = create_trainer_battle(
            vec![TestActorBuilder::new("Pikachu", 10).build()],
            vec![TestActorBuilder::new("Onix", 12).build()],
            "Brock",
        );
        let selector = ScriptedSelector::default();

        assert!(!selector.can_attempt_flee(Side::Player, &state));
        assert!(!valid_actions(&state, Side::Player).contains(&Action::Flee));
        assert_eq!(state.flee_attempts, 0);
    }

    #[test]
    fn test_trainer_ai_skips_redundant_status_move() {
        let state = create_trainer_battle(
            vec![TestActorBuilder::new("Rattata", 15)
                .with_status(StatusCondition::Poison)
                .build()],
            vec![TestActorBuilder::new("Ekans", 15)
                .with_moves(vec![Move::Glare, Move::PoisonSting])
                .build()],
            "Youngster",
        );
        let mut ai = BattleAi::new(AiConfig::builtin().unwrap());

        for _ in 0..5 {
            let mut rng = TurnRng::new_for_test(vec![]);
            assert_eq!(
                ai.next_action(Side::Opponent, &state, &mut rng),
                Action::UseMove {
                    move_: Move::PoisonSting
                }
            );
        }
    }

    #[test]
    fn test_replacement_mid_turn_cancels_pending_move() {
        let mut state = create_team_battle(
            vec![TestActorBuilder::new("Pikachu", 30)
                .with_moves(vec![Move::ThunderShock])
                .build()],
            vec![
                TestActorBuilder::new("Rattata", 10).with_hp(1).build(),
                TestActorBuilder::new("Pidgey", 10).build(),
            ],
        );

        // crit, variance, then the paralysis roll against the newcomer
        let bus = play_turn(
            &mut state,
            Action::UseMove {
                move_: Move::ThunderShock,
            },
            Action::UseMove { move_: Move::Tackle },
            vec![255, 255, 255],
        );

        assert_eq!(state.teams[1].active_index, 1);
        assert!(!state.is_over());
        let events = bus.events();
        let fainted = events
            .iter()
            .position(|event| {
                *event
                    == BattleEvent::ActorFainted {
                        side: Side::Opponent,
                        actor: "Rattata".to_string(),
                    }
            })
            .unwrap();
        assert_eq!(
            events[fainted + 1],
            BattleEvent::ActorSwitched {
                side: Side::Opponent,
                old_actor: "Rattata".to_string(),
                new_actor: "Pidgey".to_string()
            }
        );
        assert_eq!(
            events[fainted + 2],
            BattleEvent::EffectMissed {
                side: Side::Opponent,
                move_used: Move::ThunderShock
            }
        );
        assert!(events.contains(&BattleEvent::ActionFailed {
            side: Side::Opponent,
            actor: "Rattata".to_string(),
            reason: ActionFailureReason::ActorReplaced
        }));
        assert_eq!(events.last(), Some(&BattleEvent::TurnEnded));
    }

    #[test]
    fn test_player_flee_resolves_before_faster_priority_move() {
        let mut state = create_test_battle(
            TestActorBuilder::new("Slowpoke", 10).build(),
            TestActorBuilder::new("Rattata", 10)
                .with_moves(vec![Move::QuickAttack])
                .build(),
        );
        // Slowpoke speed 8: 8 * 32 / 18 = 14, roll 3 escapes.
        let bus = play_turn(
            &mut state,
            Action::Flee,
            Action::UseMove {
                move_: Move::QuickAttack,
            },
            vec![3],
        );

        assert_eq!(
            bus.events(),
            &[
                BattleEvent::TurnStarted { turn_number: 1 },
                BattleEvent::FleeSucceeded,
                BattleEvent::BattleEnded {
                    outcome: BattleOutcome::Fled
                },
            ]
        );
    }

    #[test]
    fn test_wild_opponent_flee_follows_the_move() {
        let mut state = create_test_battle(
            TestActorBuilder::new("Pikachu", 10)
                .with_moves(vec![Move::Growl])
                .build(),
            TestActorBuilder::new("Rattata", 10).build(),
        );
        let bus = play_turn(
            &mut state,
            Action::UseMove { move_: Move::Growl },
            Action::Flee,
            vec![],
        );

        assert_eq!(moves_in_order(&bus), vec![(Side::Player, Move::Growl)]);
        assert_eq!(
            &bus.events()[bus.len() - 2..],
            &[
                BattleEvent::OpponentFled,
                BattleEvent::BattleEnded {
                    outcome: BattleOutcome::Fled
                },
            ]
        );
    }

    #[test]
    fn test_failed_flee_consumes_the_turn() {
        let mut state = create_test_battle(
            TestActorBuilder::new("Slowpoke", 10).build(),
            TestActorBuilder::new("Rattata", 10)
                .with_moves(vec![Move::TailWhip])
                .build(),
        );
        let bus = play_turn(
            &mut state,
            Action::Flee,
            Action::UseMove {
                move_: Move::TailWhip,
            },
            vec![200],
        );

        assert_eq!(bus.events()[1], BattleEvent::FleeFailed);
        assert_eq!(state.flee_attempts, 1);
        assert_eq!(state.turn_number, 2);
        assert!(!state.is_over());
        assert_eq!(state.teams[0].get_stat_stage(StatType::Defense), -1);
    }

    #[test]
    fn test_whole_team_fainting_ends_in_defeat() {
        let mut state = create_team_battle(
            vec![
                TestActorBuilder::new("Caterpie", 5).with_hp(1).build(),
                TestActorBuilder::new("Pidgey", 5).with_hp(0).build(),
            ],
            vec![TestActorBuilder::new("Onix", 20).build()],
        );

        // Onix is faster: Tackle hits on 0, then crit and variance.
        let bus = play_turn(
            &mut state,
            Action::UseMove { move_: Move::Tackle },
            Action::UseMove { move_: Move::Tackle },
            vec![0, 255, 255],
        );

        assert_eq!(state.outcome(), Some(BattleOutcome::Defeat));
        assert_eq!(
            &bus.events()[bus.len() - 3..],
            &[
                BattleEvent::ActorFainted {
                    side: Side::Player,
                    actor: "Caterpie".to_string()
                },
                BattleEvent::TeamWiped { side: Side::Player },
                BattleEvent::BattleEnded {
                    outcome: BattleOutcome::Defeat
                },
            ]
        );
        assert_eq!(moves_in_order(&bus), vec![(Side::Opponent, Move::Tackle)]);
    }

    #[test]
    fn test_selector_picks_replacement() {
        let mut state = create_team_battle(
            vec![
                TestActorBuilder::new("Caterpie", 5).with_hp(1).build(),
                TestActorBuilder::new("Pidgey", 10).build(),
                TestActorBuilder::new("Abra", 10).build(),
            ],
            vec![TestActorBuilder::new("Onix", 20).build()],
        );
        let mut rng = TurnRng::new_for_test(vec![0, 255, 255]);
        let mut bus = EventBus::new();
        let mut selectors: [Box<dyn Selector>; 2] = [
            Box::new(ScriptedSelector::default().with_replacements(vec![2])),
            Box::new(ScriptedSelector::default()),
        ];
        let mut ctx = TurnContext::new(&mut rng, &mut bus, &mut selectors);

        resolve_turn(
            &mut state,
            Action::UseMove { move_: Move::Tackle },
            Action::UseMove { move_: Move::Tackle },
            &mut ctx,
        )
        .unwrap();

        assert_eq!(state.teams[0].active_index, 2);
        assert!(bus.events().contains(&BattleEvent::ActorSwitched {
            side: Side::Player,
            old_actor: "Caterpie".to_string(),
            new_actor: "Abra".to_string()
        }));
    }
}
