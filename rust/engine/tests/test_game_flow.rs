use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use riverstone_engine::cards::parse_cards;
use riverstone_engine::decision::{Decision, TurnTicket};
use riverstone_engine::engine::{Progress, Table};
use riverstone_engine::events::EngineEvent;
use riverstone_engine::game::{GameStateSnapshot, Phase, TableConfig};
use riverstone_engine::player::Player;
use riverstone_engine::rules::{ActionKind, ValidActions};

fn config(seats: usize, seed: u64) -> TableConfig {
    TableConfig {
        seats,
        seed,
        ..Default::default()
    }
}

#[test]
fn repeated_min_raises_terminate() {
    for seats in 2..=6 {
        let mut table = Table::new(config(seats, seats as u64)).unwrap();
        let mut min_raiser = |_: &Player, _: &GameStateSnapshot, v: &ValidActions| match (v.raise, v.all_in) {
            (Some(r), _) => Decision::raise(r.min),
            (None, Some(_)) => Decision::all_in(),
            _ => Decision::passive(v),
        };
        table.play_hand(&mut min_raiser).unwrap();
        assert_eq!(table.total_chips(), 1_000 * seats as u32);

        let acted = table
            .drain_events()
            .iter()
            .filter(|e| matches!(e, EngineEvent::PlayerActed { .. }))
            .count();
        let bound = seats * (1_000 / 10 + seats + 2);
        assert!(acted <= bound, "{acted} turns with {seats} seats");
    }
}

#[test]
fn chips_are_conserved_under_random_play() {
    let mut rng = ChaCha20Rng::seed_from_u64(9);
    let mut table = Table::new(config(5, 1234)).unwrap();
    let mut chaos = move |p: &Player, _: &GameStateSnapshot, v: &ValidActions| {
        let kinds = v.kinds();
        let kind = kinds[rng.random_range(0..kinds.len())];
        match kind {
            ActionKind::Raise => {
                let r = v.raise.unwrap();
                // now and then an out-of-range amount, which must be refused
                if rng.random_bool(0.1) {
                    Decision::raise(r.max + 1)
                } else {
                    Decision::raise(rng.random_range(r.min..=r.max.min(r.min * 3)))
                }
            }
            ActionKind::Fold if p.id % 2 == 0 => Decision::call(),
            ActionKind::Fold => Decision::fold(),
            ActionKind::Check => Decision::check(),
            ActionKind::Call => Decision::call(),
            ActionKind::AllIn => Decision::all_in(),
        }
    };

    let mut hands = 0;
    while table.seated_count() >= 2 && hands < 300 {
        let summary = table.play_hand(&mut chaos).unwrap();
        hands += 1;
        assert_eq!(table.total_chips(), 5_000);
        let pots: u32 = summary.pots.iter().map(|p| p.amount).sum();
        let won: u32 = summary.winners.iter().map(|w| w.amount).sum();
        assert_eq!(pots, won);
        for p in table.players() {
            assert_eq!(p.is_busted(), p.chips() == 0);
        }
    }
    assert!(hands > 0);
}

#[test]
fn tied_players_split_101_chips_deterministically() {
    // dealer 0, small blind 1, big blind 2; a royal flush on board ties everyone
    let cards = parse_cards("2c 3c 4c 2d 3d 4d 5h As Ks Qs 6h Js 7h Ts").unwrap();
    let mut table = Table::new(TableConfig {
        seats: 3,
        small_blind: 1,
        big_blind: 50,
        ..Default::default()
    })
    .unwrap();
    table.preset_next_deck(cards).unwrap();
    let mut script = |p: &Player, _: &GameStateSnapshot, v: &ValidActions| {
        if p.id == 1 && !v.can_check {
            Decision::fold()
        } else {
            Decision::passive(v)
        }
    };
    let summary = table.play_hand(&mut script).unwrap();
    assert!(summary.showdown);
    let amounts: Vec<(usize, u32)> = summary
        .winners
        .iter()
        .map(|w| (w.player_id, w.amount))
        .collect();
    // the odd chip goes to the first winner left of the dealer
    assert_eq!(amounts, vec![(0, 50), (2, 51)]);
    assert_eq!(table.players()[0].chips(), 1_000);
    assert_eq!(table.players()[2].chips(), 1_001);
}

#[test]
fn elimination_ends_the_game() {
    // heads-up, dealer 0 holds aces against a short stack
    let cards = parse_cards("2c As 7d Ah 3h 9s Tc Jd 4s 5c 6s Kd").unwrap();
    let mut table = Table::with_stacks(config(2, 5), &[1_000, 20]).unwrap();
    table.preset_next_deck(cards).unwrap();
    let mut shover = |_: &Player, _: &GameStateSnapshot, v: &ValidActions| {
        if v.raise.is_some() || v.all_in.is_some() {
            Decision::all_in()
        } else {
            Decision::passive(v)
        }
    };
    let summary = table.play_hand(&mut shover).unwrap();
    assert_eq!(summary.eliminated, vec![1]);
    assert_eq!(summary.game_over, Some(0));
    assert_eq!(table.players()[0].chips(), 1_020);
    assert_eq!(summary.pots.len(), 2);

    let events = table.drain_events();
    let tail: Vec<&EngineEvent> = events.iter().rev().take(3).collect();
    assert!(matches!(tail[0], EngineEvent::GameOver { winner_id: 0 }));
    assert!(matches!(tail[1], EngineEvent::PlayerEliminated { player_id: 1 }));
    assert!(matches!(tail[2], EngineEvent::HandEnd { showdown: true, .. }));
    assert!(table.start_hand().is_err());
}

#[test]
fn events_follow_the_hand() {
    let mut table = Table::new(config(3, 8)).unwrap();
    let mut station = |_: &Player, _: &GameStateSnapshot, v: &ValidActions| Decision::passive(v);
    table.play_hand(&mut station).unwrap();
    let events = table.drain_events();

    assert!(matches!(events[0], EngineEvent::HandStart { hand_number: 1, .. }));
    assert!(matches!(events[1], EngineEvent::BlindsPosted { .. }));
    assert!(matches!(events[2], EngineEvent::HoleCardsDealt { .. }));
    let phases: Vec<Phase> = events
        .iter()
        .filter_map(|e| match e {
            EngineEvent::PhaseChange { phase } => Some(*phase),
            _ => None,
        })
        .collect();
    assert_eq!(
        phases,
        vec![Phase::PreFlop, Phase::Flop, Phase::Turn, Phase::River, Phase::Showdown]
    );
    let awaiting = events
        .iter()
        .filter(|e| matches!(e, EngineEvent::AwaitingAction { .. }))
        .count();
    let acted = events
        .iter()
        .filter(|e| matches!(e, EngineEvent::PlayerActed { .. }))
        .count();
    assert_eq!(awaiting, acted);
    assert!(matches!(events.last(), Some(EngineEvent::HandEnd { .. })));
    assert!(table.drain_events().is_empty());
}

#[test]
fn dealer_button_moves_each_hand() {
    let mut table = Table::new(config(4, 3)).unwrap();
    let mut station = |_: &Player, _: &GameStateSnapshot, v: &ValidActions| Decision::passive(v);
    let mut dealers = Vec::new();
    for _ in 0..5 {
        table.play_hand(&mut station).unwrap();
        dealers.push(table.dealer_index());
    }
    assert_eq!(dealers, vec![0, 1, 2, 3, 0]);
}

#[test]
fn play_game_stops_at_the_hand_limit() {
    let mut table = Table::new(config(4, 21)).unwrap();
    let mut station = |_: &Player, _: &GameStateSnapshot, v: &ValidActions| Decision::passive(v);
    let summary = table.play_game(&mut station, 7).unwrap();
    assert!(summary.hands_played <= 7);
    assert_eq!(summary.chips.iter().sum::<u32>(), 4_000);
    assert_eq!(table.hand_number(), summary.hands_played);
}

fn pending(progress: Progress) -> TurnTicket {
    match progress {
        Progress::AwaitingDecision(t) => t,
        other => panic!("expected a pending turn, got {other:?}"),
    }
}

#[test]
fn short_all_in_does_not_reopen_for_the_raiser() {
    // dealer 0, small blind 1, big blind 2 with 35 chips
    let mut table = Table::with_stacks(config(3, 4), &[1_000, 1_000, 35]).unwrap();
    let t = pending(table.start_hand().unwrap());
    assert_eq!(t.player_id, 0);
    let t = pending(table.submit(t, Decision::raise(30)).unwrap());
    assert_eq!(t.player_id, 1);
    let t = pending(table.submit(t, Decision::call()).unwrap());
    assert_eq!(t.player_id, 2);
    // 25 more on top of the blind makes 35, five over the 30 to match
    let t = pending(table.submit(t, Decision::all_in()).unwrap());
    assert_eq!(t.player_id, 0);

    let va = table.valid_actions(0).unwrap();
    assert_eq!(va.call, Some(5));
    assert_eq!(va.raise, None);
    assert_eq!(va.all_in, None);
    assert!(table.submit(t, Decision::raise(100)).is_err());

    let t = pending(table.submit(t, Decision::call()).unwrap());
    assert_eq!(t.player_id, 1);
    let va = table.valid_actions(1).unwrap();
    assert_eq!((va.call, va.raise, va.all_in), (Some(5), None, None));
}

#[test]
fn short_all_in_leaves_raising_open_for_players_yet_to_act() {
    // dealer 0 (35 chips), small blind 1, big blind 2, first to act 3
    let mut table = Table::with_stacks(config(4, 4), &[35, 1_000, 1_000, 1_000]).unwrap();
    let t = pending(table.start_hand().unwrap());
    assert_eq!(t.player_id, 3);
    let t = pending(table.submit(t, Decision::raise(30)).unwrap());
    assert_eq!(t.player_id, 0);
    let t = pending(table.submit(t, Decision::all_in()).unwrap());
    assert_eq!(table.players()[0].current_bet(), 35);

    // the small blind has not acted yet and may still raise
    assert_eq!(t.player_id, 1);
    let va = table.valid_actions(1).unwrap();
    assert_eq!(va.call, Some(30));
    assert!(va.raise.is_some_and(|r| r.min <= r.max));
    let t = pending(table.submit(t, Decision::call()).unwrap());

    // so has the big blind
    assert_eq!(t.player_id, 2);
    assert!(table.valid_actions(2).unwrap().raise.is_some());
    let t = pending(table.submit(t, Decision::call()).unwrap());

    // the original raiser only gets to call the extra five
    assert_eq!(t.player_id, 3);
    let va = table.valid_actions(3).unwrap();
    assert_eq!((va.call, va.raise, va.all_in), (Some(5), None, None));
}
