use holdem_engine::engine::{EngineConfig, HandEngine, Phase};
use holdem_engine::errors::{GameError, SetupError};
use holdem_engine::hand::evaluate_hand;
use holdem_engine::logger::{parse_action_sequence, ActionToken};
use holdem_engine::player::{ActionKind, PlayerAction as A};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

fn started(stacks: &[u32], seed: u64) -> HandEngine {
    let mut eng = HandEngine::new(EngineConfig {
        small_blind: 20,
        seed,
    });
    eng.set_starting_stacks(stacks).unwrap();
    eng.start_new_hand().unwrap();
    eng
}

fn chips_on_table(eng: &HandEngine) -> u32 {
    eng.pot() + eng.seats().iter().map(|s| s.stack()).sum::<u32>()
}

fn assert_invariants(eng: &HandEngine) {
    let expected: u32 = eng.initial_stacks().iter().sum();
    assert_eq!(chips_on_table(eng), expected, "chips created or lost");
    if eng.phase().is_betting() {
        let committed: u32 = eng.seats().iter().map(|s| s.total_hand_bet()).sum();
        assert_eq!(eng.pot(), committed, "pot differs from commitments");
        assert_eq!(
            eng.community_cards().len(),
            eng.phase().community_len(),
            "board does not match {:?}",
            eng.phase()
        );
    }
}

fn action_for(kind: ActionKind, eng: &HandEngine, rng: &mut ChaCha20Rng) -> A {
    let bb = eng.blinds().big_blind;
    match kind {
        ActionKind::Fold => A::Fold,
        ActionKind::Check => A::Check,
        ActionKind::Call => A::Call,
        ActionKind::Bet => A::Bet(bb * rng.random_range(1..=4)),
        ActionKind::Raise => A::Raise(eng.current_bet() + bb * rng.random_range(1..=3)),
        ActionKind::AllIn => A::AllIn,
    }
}

const KINDS: [ActionKind; 6] = [
    ActionKind::Fold,
    ActionKind::Check,
    ActionKind::Call,
    ActionKind::Bet,
    ActionKind::Raise,
    ActionKind::AllIn,
];

#[test]
fn five_folds_end_the_hand_immediately() {
    let mut eng = started(&[1000; 6], 17);
    for _ in 0..5 {
        assert_eq!(eng.phase(), Phase::Preflop);
        eng.process_action(A::Fold).unwrap();
    }
    assert!(eng.first_action_taken());
    assert_eq!(eng.phase(), Phase::Finished);
    assert_eq!(eng.pot(), 0);
    assert!(eng.community_cards().is_empty());
    assert!(eng.valid_actions().is_empty());

    let bb = eng.big_blind_index();
    assert_eq!(eng.seats()[bb].stack(), 1020);
    assert_eq!(eng.action_sequence(), "f f f f f");

    let rec = eng.result().unwrap();
    assert_eq!(rec.winnings[&bb], 20);
    assert_eq!(rec.winnings[&eng.small_blind_index()], -20);
    assert_eq!(rec.winnings.values().sum::<i64>(), 0);
    assert!(rec.showdown.is_none());
    assert!(eng
        .action_log()
        .iter()
        .any(|l| l == &format!("Seat {} wins 60 uncontested", bb)));
}

#[test]
fn checking_down_reaches_showdown_and_pays_the_best_hand() {
    let mut eng = started(&[1000; 6], 31);
    for _ in 0..5 {
        eng.process_action(A::Call).unwrap();
    }
    eng.process_action(A::Check).unwrap();

    let mut boards = vec![eng.community_cards().len()];
    while eng.phase() != Phase::Finished {
        assert_eq!(eng.pot(), 240);
        eng.process_action(A::Check).unwrap();
        assert_invariants(&eng);
        if eng.phase() != Phase::Finished {
            boards.push(eng.community_cards().len());
        }
    }
    boards.dedup();
    assert_eq!(boards, vec![3, 4, 5]);
    assert_eq!(eng.community_cards().len(), 5);
    assert!(eng.action_log().iter().any(|l| l == "Showdown"));

    let strengths: Vec<_> = eng
        .seats()
        .iter()
        .map(|s| {
            let mut cards = s.hole_cards().unwrap().to_vec();
            cards.extend_from_slice(eng.community_cards());
            evaluate_hand(&cards)
        })
        .collect();
    let best = *strengths.iter().max().unwrap();
    let expected: Vec<usize> = (0..6).filter(|&i| strengths[i] == best).collect();

    let showdown = eng.showdown().unwrap();
    assert_eq!(showdown.winners, expected);
    assert_eq!(showdown.notes.as_deref(), Some(best.category.name()));

    let won: u32 = expected.iter().map(|&i| eng.seats()[i].stack() - 960).sum();
    assert_eq!(won, 240);
    for i in (0..6).filter(|i| !expected.contains(i)) {
        assert_eq!(eng.seats()[i].stack(), 960);
    }
}

#[test]
fn folding_to_a_flop_bet_keeps_the_revealed_board() {
    let mut eng = started(&[1000; 6], 8);
    for _ in 0..5 {
        eng.process_action(A::Call).unwrap();
    }
    eng.process_action(A::Check).unwrap();
    assert_eq!(eng.active_seat(), Some(1));
    eng.process_action(A::Bet(80)).unwrap();
    for _ in 0..5 {
        eng.process_action(A::Fold).unwrap();
    }
    assert_eq!(eng.phase(), Phase::Finished);
    assert_eq!(eng.community_cards().len(), 3);
    assert_eq!(eng.seats()[1].stack(), 1200);

    let rec = eng.result().unwrap();
    assert_eq!(rec.winnings[&1], 200);
    assert_eq!(rec.board.len(), 3);
    rec.validate().unwrap();
}

#[test]
fn all_in_preflop_runs_the_board_out() {
    let mut eng = started(&[1000; 6], 12);
    eng.process_action(A::AllIn).unwrap();
    assert_eq!(eng.current_bet(), 1000);
    for _ in 0..5 {
        eng.process_action(A::Call).unwrap();
    }
    assert_eq!(eng.phase(), Phase::Finished);
    assert_eq!(eng.community_cards().len(), 5);
    assert_eq!(chips_on_table(&eng), 6000);
    assert!(eng.showdown().is_some());

    let tokens = parse_action_sequence(&eng.action_sequence()).unwrap();
    let boards = tokens
        .iter()
        .filter(|t| matches!(t, ActionToken::Board(_)))
        .count();
    assert_eq!(boards, 3);
    assert_eq!(tokens[0], ActionToken::AllIn);
}

#[test]
fn big_blind_keeps_the_option_after_limps() {
    let mut eng = started(&[1000; 6], 3);
    for _ in 0..5 {
        eng.process_action(A::Call).unwrap();
    }
    assert_eq!(eng.phase(), Phase::Preflop);
    assert_eq!(eng.active_seat(), Some(eng.big_blind_index()));
    assert_eq!(
        eng.valid_actions(),
        vec![
            ActionKind::Fold,
            ActionKind::Check,
            ActionKind::Raise,
            ActionKind::AllIn
        ]
    );
    eng.process_action(A::Raise(120)).unwrap();
    assert_eq!(eng.phase(), Phase::Preflop);
    assert_eq!(eng.active_seat(), Some(3));
}

#[test]
fn same_seed_and_actions_replay_identically() {
    let script = [A::Call, A::Raise(200), A::Fold, A::Call, A::Fold, A::Call, A::Call];
    let run = || {
        let mut eng = started(&[1000; 6], 555);
        for a in script {
            eng.process_action(a).unwrap();
        }
        while eng.phase() != Phase::Finished {
            let a = if eng.valid_actions().contains(&ActionKind::Check) {
                A::Check
            } else {
                A::Call
            };
            eng.process_action(a).unwrap();
        }
        let mut rec = eng.result().unwrap();
        rec.ts = None;
        rec
    };
    assert_eq!(run(), run());
}

#[test]
fn random_play_preserves_table_invariants() {
    let stack_sets: [[u32; 6]; 4] = [
        [1000; 6],
        [1000, 30, 500, 0, 2000, 120],
        [40, 40, 40, 40, 40, 40],
        [0, 0, 700, 0, 65, 0],
    ];
    for seed in 0..40u64 {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let stacks = stack_sets[seed as usize % stack_sets.len()];
        let total: u32 = stacks.iter().sum();
        let mut eng = HandEngine::new(EngineConfig { small_blind: 20, seed });
        eng.set_starting_stacks(&stacks).unwrap();

        for _hand in 0..25 {
            match eng.start_new_hand() {
                Ok(()) => {}
                Err(GameError::Setup(SetupError::NoFundedSeats)) => break,
                Err(e) => panic!("unexpected setup error: {e}"),
            }
            for idx in [eng.dealer_index(), eng.small_blind_index(), eng.big_blind_index()] {
                assert!(eng.initial_stacks()[idx] > 0, "blind on a broke seat");
            }
            assert_invariants(&eng);

            let mut steps = 0;
            while eng.phase() != Phase::Finished {
                steps += 1;
                assert!(steps < 500, "hand did not terminate");

                let valid = eng.valid_actions();
                assert!(!valid.is_empty());

                // anything outside the valid set is refused without side effects
                let before = eng.snapshot();
                for kind in KINDS.iter().filter(|k| !valid.contains(*k)) {
                    let action = action_for(*kind, &eng, &mut rng);
                    assert!(eng.process_action(action).is_err(), "{action:?} accepted");
                    assert_eq!(eng.snapshot(), before);
                }

                let kind = valid[rng.random_range(0..valid.len())];
                let action = action_for(kind, &eng, &mut rng);
                let phase = eng.phase();
                eng.process_action(action)
                    .unwrap_or_else(|e| panic!("{action:?} from {valid:?} rejected: {e}"));
                assert_invariants(&eng);

                if eng.phase() == phase {
                    let active = eng.active_seat().expect("someone must act");
                    assert!(eng.seats()[active].can_act());
                }
            }

            assert_eq!(eng.pot(), 0);
            assert_eq!(chips_on_table(&eng), total);
            let seq = eng.action_sequence();
            assert_eq!(parse_action_sequence(&seq).unwrap(), eng.action_tokens());
            let rec = eng.result().unwrap();
            rec.validate().unwrap();
            assert_eq!(rec.winnings.values().sum::<i64>(), 0);
        }
    }
}
