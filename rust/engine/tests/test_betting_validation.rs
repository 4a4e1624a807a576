use holdem_engine::engine::{EngineConfig, HandEngine, Phase};
use holdem_engine::errors::{ActionRejection, GameError};
use holdem_engine::player::{ActionKind, PlayerAction as A};
use holdem_engine::rules::{valid_actions, validate_action, BettingContext, ValidatedAction};

fn ctx(stack: u32, street_bet: u32, current_bet: u32) -> BettingContext {
    BettingContext {
        stack,
        street_bet,
        current_bet,
        big_blind: 40,
    }
}

/// Six seats of 1000; everyone limps and the big blind checks, so the
/// flop is dealt with seat 1 to act.
fn engine_on_flop() -> HandEngine {
    let mut eng = HandEngine::new(EngineConfig {
        small_blind: 20,
        seed: 2024,
    });
    eng.set_starting_stacks(&[1000; 6]).unwrap();
    eng.start_new_hand().unwrap();
    for _ in 0..5 {
        eng.process_action(A::Call).unwrap();
    }
    eng.process_action(A::Check).unwrap();
    assert_eq!(eng.phase(), Phase::Flop);
    eng
}

#[test]
fn bet_below_big_blind_is_rejected() {
    assert_eq!(
        validate_action(&ctx(1000, 0, 0), A::Bet(10)),
        Err(ActionRejection::BetBelowMinimum {
            amount: 10,
            minimum: 40
        })
    );
}

#[test]
fn bet_over_stack_becomes_allin() {
    assert_eq!(
        validate_action(&ctx(50, 0, 0), A::Bet(100)),
        Ok(ValidatedAction::AllIn(50))
    );
}

#[test]
fn short_stack_cannot_open() {
    assert_eq!(
        validate_action(&ctx(30, 0, 0), A::Bet(40)),
        Err(ActionRejection::InsufficientChips)
    );
    assert_eq!(
        valid_actions(&ctx(30, 0, 0)),
        vec![ActionKind::Fold, ActionKind::Check, ActionKind::AllIn]
    );
}

#[test]
fn call_with_insufficient_stack_commits_what_is_left() {
    assert_eq!(
        validate_action(&ctx(30, 0, 40), A::Call),
        Ok(ValidatedAction::Call(30))
    );
}

#[test]
fn check_and_call_depend_on_the_amount_owed() {
    assert_eq!(
        validate_action(&ctx(1000, 20, 40), A::Check),
        Err(ActionRejection::MustCallNotCheck { to_call: 20 })
    );
    assert_eq!(
        validate_action(&ctx(1000, 40, 40), A::Call),
        Err(ActionRejection::NoBetToCall)
    );
}

#[test]
fn raise_rules() {
    assert_eq!(
        validate_action(&ctx(1000, 0, 0), A::Raise(80)),
        Err(ActionRejection::RaiseNotAllowed)
    );
    assert_eq!(
        validate_action(&ctx(1000, 0, 40), A::Raise(40)),
        Err(ActionRejection::RaiseTooSmall {
            amount: 40,
            current: 40
        })
    );
    assert_eq!(
        validate_action(&ctx(1000, 0, 40), A::Bet(80)),
        Err(ActionRejection::BetNotAllowed)
    );
    assert_eq!(
        validate_action(&ctx(1000, 20, 40), A::Raise(120)),
        Ok(ValidatedAction::Raise(120))
    );
    // raise-to that needs the whole stack
    assert_eq!(
        validate_action(&ctx(100, 20, 40), A::Raise(120)),
        Ok(ValidatedAction::AllIn(100))
    );
    assert_eq!(
        validate_action(&ctx(70, 0, 40), A::Raise(100)),
        Err(ActionRejection::InsufficientChips)
    );
}

#[test]
fn valid_actions_follow_the_table() {
    // unopened street
    assert_eq!(
        valid_actions(&ctx(1000, 0, 0)),
        vec![
            ActionKind::Fold,
            ActionKind::Check,
            ActionKind::Bet,
            ActionKind::AllIn
        ]
    );
    // facing a bet
    assert_eq!(
        valid_actions(&ctx(1000, 0, 40)),
        vec![
            ActionKind::Fold,
            ActionKind::Call,
            ActionKind::Raise,
            ActionKind::AllIn
        ]
    );
    // big blind option after limps
    assert_eq!(
        valid_actions(&ctx(960, 40, 40)),
        vec![
            ActionKind::Fold,
            ActionKind::Check,
            ActionKind::Raise,
            ActionKind::AllIn
        ]
    );
    // can only call short or shove
    assert_eq!(
        valid_actions(&ctx(60, 0, 40)),
        vec![ActionKind::Fold, ActionKind::Call, ActionKind::AllIn]
    );
}

#[test]
fn rejected_bet_leaves_state_untouched() {
    let mut eng = engine_on_flop();
    assert_eq!(eng.current_bet(), 0);
    assert_eq!(eng.active_seat(), Some(1));
    let before = eng.snapshot();
    let tokens = eng.action_sequence();

    assert_eq!(
        eng.process_action(A::Bet(10)),
        Err(GameError::Rejected(ActionRejection::BetBelowMinimum {
            amount: 10,
            minimum: 40
        }))
    );
    assert_eq!(eng.snapshot(), before);
    assert_eq!(eng.action_sequence(), tokens);
}

#[test]
fn actions_outside_valid_actions_are_rejected() {
    let mut eng = engine_on_flop();
    let valid = eng.valid_actions();
    assert!(!valid.contains(&ActionKind::Call));
    assert!(!valid.contains(&ActionKind::Raise));
    let before = eng.snapshot();

    assert_eq!(
        eng.process_action(A::Call),
        Err(GameError::Rejected(ActionRejection::NoBetToCall))
    );
    assert_eq!(
        eng.process_action(A::Raise(200)),
        Err(GameError::Rejected(ActionRejection::RaiseNotAllowed))
    );
    assert_eq!(eng.snapshot(), before);

    // once a bet is out, checking is no longer offered or accepted
    eng.process_action(A::Bet(100)).unwrap();
    assert!(!eng.valid_actions().contains(&ActionKind::Check));
    assert_eq!(
        eng.process_action(A::Check),
        Err(GameError::Rejected(ActionRejection::MustCallNotCheck {
            to_call: 100
        }))
    );
}

#[test]
fn per_seat_submission_checks_the_turn() {
    let mut eng = engine_on_flop();
    let before = eng.snapshot();
    assert_eq!(
        eng.process_action_for(4, A::Check),
        Err(GameError::Rejected(ActionRejection::NotSeatsTurn {
            expected: 1,
            actual: 4
        }))
    );
    assert_eq!(eng.snapshot(), before);
    eng.process_action_for(1, A::Check).unwrap();
    assert_eq!(eng.active_seat(), Some(2));
}

#[test]
fn named_actions_are_parsed_or_rejected() {
    let mut eng = engine_on_flop();
    let before = eng.snapshot();
    assert_eq!(
        eng.process_named("limp", None),
        Err(GameError::Rejected(ActionRejection::UnknownAction(
            "limp".into()
        )))
    );
    assert_eq!(
        eng.process_named("bet", None),
        Err(GameError::Rejected(ActionRejection::MissingAmount(
            "BET".into()
        )))
    );
    assert_eq!(eng.snapshot(), before);

    eng.process_named("bet", Some(80)).unwrap();
    assert_eq!(eng.current_bet(), 80);
    eng.process_named("raise", Some(200)).unwrap();
    assert_eq!(eng.current_bet(), 200);
    eng.process_named("fold", None).unwrap();
    assert_eq!(eng.pot(), 240 + 80 + 200);
}

#[test]
fn rejection_codes_are_stable() {
    assert_eq!(ActionRejection::NoBetToCall.code(), "NoBetToCall");
    assert_eq!(
        ActionRejection::BetBelowMinimum {
            amount: 1,
            minimum: 40
        }
        .code(),
        "BetBelowMinimum"
    );
    assert_eq!(
        ActionRejection::UnknownAction("x".into()).code(),
        "UnknownAction"
    );
}
