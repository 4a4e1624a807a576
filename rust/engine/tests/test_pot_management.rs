use holdem_engine::engine::{EngineConfig, HandEngine, Phase};
use holdem_engine::hand::{Category, HandStrength};
use holdem_engine::player::{ActionKind, PlayerAction as A};
use holdem_engine::pot::{award_pots, build_side_pots, SidePot};

fn strength(category: Category, top: u8) -> Option<HandStrength> {
    Some(HandStrength {
        category,
        kickers: [top, 0, 0, 0, 0],
    })
}

#[test]
fn heads_up_simple_side_pot() {
    let pots = build_side_pots(&[500, 1000], &[true, true]);
    assert_eq!(
        pots,
        vec![
            SidePot {
                amount: 1000,
                eligible: vec![0, 1]
            },
            SidePot {
                amount: 500,
                eligible: vec![1]
            },
        ]
    );
}

#[test]
fn equal_stacks_no_side_pot() {
    let pots = build_side_pots(&[1000, 1000], &[true, true]);
    assert_eq!(pots.len(), 1);
    assert_eq!(pots[0].amount, 2000);
}

#[test]
fn three_way_all_in_layers() {
    let contributions = [200, 500, 900, 900, 0, 40];
    let live = [true, true, true, true, false, false];
    let pots = build_side_pots(&contributions, &live);
    let amounts: Vec<u32> = pots.iter().map(|p| p.amount).collect();
    assert_eq!(amounts, vec![840, 900, 800]);
    assert_eq!(amounts.iter().sum::<u32>(), contributions.iter().sum::<u32>());
    assert_eq!(pots[2].eligible, vec![2, 3]);

    // shortest stack holds the best hand, the medium stack the second best
    let strengths = [
        strength(Category::FullHouse, 10),
        strength(Category::Flush, 12),
        strength(Category::OnePair, 14),
        strength(Category::HighCard, 14),
        None,
        None,
    ];
    let p = award_pots(&pots, &strengths, &[1, 2, 3, 4, 5, 0]);
    assert_eq!(p.amounts, vec![840, 900, 800, 0, 0, 0]);
    assert_eq!(p.main_winners, vec![0]);
}

#[test]
fn split_pot_odd_chip_goes_left_of_the_button() {
    let pots = build_side_pots(&[45, 45, 45, 0, 0, 0], &[true, true, false, false, false, false]);
    assert_eq!(pots[0].amount, 135);
    let strengths = [
        strength(Category::Straight, 9),
        strength(Category::Straight, 9),
        None,
        None,
        None,
        None,
    ];
    // button on seat 0: seat 1 is first to its left
    let p = award_pots(&pots, &strengths, &[1, 2, 3, 4, 5, 0]);
    assert_eq!(p.amounts[1], 68);
    assert_eq!(p.amounts[0], 67);
    assert_eq!(p.main_winners, vec![0, 1]);
}

#[test]
fn short_stack_all_in_call_still_closes_the_round() {
    let mut eng = HandEngine::new(EngineConfig {
        small_blind: 20,
        seed: 64,
    });
    eng.set_starting_stacks(&[1000, 1000, 1000, 30, 1000, 1000])
        .unwrap();
    eng.start_new_hand().unwrap();

    assert_eq!(eng.active_seat(), Some(3));
    assert_eq!(
        eng.valid_actions(),
        vec![ActionKind::Fold, ActionKind::Call, ActionKind::AllIn]
    );
    eng.process_action(A::AllIn).unwrap();
    let short = &eng.seats()[3];
    assert!(short.is_all_in());
    assert_eq!(short.total_hand_bet(), 30);
    assert_eq!(short.stack(), 0);
    assert_eq!(eng.current_bet(), 40);
    assert!(eng.action_log().iter().any(|l| l == "Seat 3 goes all-in for 30"));

    // seats 4, 5, 0 and the small blind call; the big blind checks
    for _ in 0..4 {
        eng.process_action(A::Call).unwrap();
    }
    eng.process_action(A::Check).unwrap();
    assert_eq!(eng.phase(), Phase::Flop);
    assert_eq!(eng.pot(), 230);

    while eng.phase() != Phase::Finished {
        eng.process_action(A::Check).unwrap();
    }
    // the all-in seat can win at most six times its 30
    assert!(eng.seats()[3].stack() <= 180);
    let total: u32 = eng.seats().iter().map(|s| s.stack()).sum();
    assert_eq!(total, 5030);
    eng.result().unwrap().validate().unwrap();
}
