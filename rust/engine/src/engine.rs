use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::cards::{format_cards, Card};
use crate::deck::Deck;
use crate::errors::{ActionRejection, GameError, SetupError};
use crate::hand::evaluate_hand;
use crate::logger::{ActionToken, HandRecord, ShowdownInfo};
use crate::player::{ActionKind, PlayerAction, Seat, SEAT_COUNT};
use crate::pot::{award_pots, build_side_pots};
use crate::rules::{valid_actions, validate_action, BettingContext, Blinds, ValidatedAction};

/// Phase of a hand. Betting happens in Preflop through River.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    Setup,
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
    Finished,
}

impl Phase {
    pub fn is_betting(self) -> bool {
        matches!(self, Phase::Preflop | Phase::Flop | Phase::Turn | Phase::River)
    }

    /// Number of community cards on the table during this phase.
    pub fn community_len(self) -> usize {
        match self {
            Phase::Setup | Phase::Preflop => 0,
            Phase::Flop => 3,
            Phase::Turn => 4,
            Phase::River | Phase::Showdown | Phase::Finished => 5,
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct EngineConfig {
    pub small_blind: u32,
    /// Seeds both the deck shuffle and hand-id generation.
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            small_blind: 20,
            seed: 0xA1A2_A3A4,
        }
    }
}

/// Read-only view of the table handed to collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSnapshot {
    pub hand_id: String,
    pub phase: Phase,
    pub seats: Vec<Seat>,
    pub community_cards: Vec<Card>,
    pub pot: u32,
    pub current_bet: u32,
    pub active_seat: Option<usize>,
    pub dealer_index: usize,
    pub small_blind_index: usize,
    pub big_blind_index: usize,
    pub valid_actions: Vec<ActionKind>,
    pub action_log: Vec<String>,
}

/// State machine for one six-seat hand of No-Limit Hold'em.
///
/// Seats and stacks live across hands; everything else is rebuilt by
/// [`HandEngine::start_new_hand`]. Actions are always applied for the
/// active seat and are either fully applied or rejected without touching
/// any state. Taking `&mut self` for every mutation means a second action
/// can never interleave with one in progress.
///
/// # Examples
///
/// ```
/// use holdem_engine::engine::{EngineConfig, HandEngine, Phase};
/// use holdem_engine::player::PlayerAction;
///
/// let mut engine = HandEngine::new(EngineConfig { small_blind: 20, seed: 7 });
/// engine.set_starting_stacks(&[1000; 6])?;
/// engine.start_new_hand()?;
/// assert_eq!(engine.pot(), 60);
///
/// // Everyone folds around to the big blind
/// for _ in 0..5 {
///     engine.process_action(PlayerAction::Fold)?;
/// }
/// assert_eq!(engine.phase(), Phase::Finished);
/// assert_eq!(engine.seats()[engine.big_blind_index()].stack(), 1020);
/// # Ok::<(), holdem_engine::errors::GameError>(())
/// ```
#[derive(Debug, Clone)]
pub struct HandEngine {
    deck: Deck,
    id_rng: ChaCha20Rng,
    blinds: Blinds,
    seats: [Seat; SEAT_COUNT],
    stacks_configured: bool,
    initial_stacks: [u32; SEAT_COUNT],
    hands_started: u32,
    phase: Phase,
    community_cards: Vec<Card>,
    pot: u32,
    current_bet: u32,
    active_seat: Option<usize>,
    dealer_index: usize,
    small_blind_index: usize,
    big_blind_index: usize,
    action_log: Vec<String>,
    action_tokens: Vec<ActionToken>,
    hand_id: String,
    first_action_taken: bool,
    showdown: Option<ShowdownInfo>,
}

impl HandEngine {
    pub fn new(config: EngineConfig) -> Self {
        let mut id_rng = ChaCha20Rng::seed_from_u64(config.seed);
        id_rng.set_stream(1);
        Self {
            deck: Deck::new_with_seed(config.seed),
            id_rng,
            blinds: Blinds::from_small_blind(config.small_blind),
            seats: std::array::from_fn(|i| Seat::new(i, 0)),
            stacks_configured: false,
            initial_stacks: [0; SEAT_COUNT],
            hands_started: 0,
            phase: Phase::Setup,
            community_cards: Vec::with_capacity(5),
            pot: 0,
            current_bet: 0,
            active_seat: None,
            dealer_index: 0,
            small_blind_index: 0,
            big_blind_index: 0,
            action_log: Vec::new(),
            action_tokens: Vec::new(),
            hand_id: String::new(),
            first_action_taken: false,
            showdown: None,
        }
    }

    pub fn blinds(&self) -> Blinds {
        self.blinds
    }
    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn seats(&self) -> &[Seat; SEAT_COUNT] {
        &self.seats
    }
    pub fn community_cards(&self) -> &[Card] {
        &self.community_cards
    }
    pub fn pot(&self) -> u32 {
        self.pot
    }
    pub fn current_bet(&self) -> u32 {
        self.current_bet
    }
    pub fn active_seat(&self) -> Option<usize> {
        self.active_seat
    }
    pub fn dealer_index(&self) -> usize {
        self.dealer_index
    }
    pub fn small_blind_index(&self) -> usize {
        self.small_blind_index
    }
    pub fn big_blind_index(&self) -> usize {
        self.big_blind_index
    }
    pub fn action_log(&self) -> &[String] {
        &self.action_log
    }
    pub fn action_tokens(&self) -> &[ActionToken] {
        &self.action_tokens
    }
    pub fn hand_id(&self) -> &str {
        &self.hand_id
    }
    pub fn first_action_taken(&self) -> bool {
        self.first_action_taken
    }
    /// Stacks as they were before the blinds of the current hand.
    pub fn initial_stacks(&self) -> &[u32; SEAT_COUNT] {
        &self.initial_stacks
    }
    pub fn showdown(&self) -> Option<&ShowdownInfo> {
        self.showdown.as_ref()
    }
    pub fn deck_remaining(&self) -> usize {
        self.deck.remaining()
    }

    /// Space-separated action tokens emitted so far.
    pub fn action_sequence(&self) -> String {
        ActionToken::join(&self.action_tokens)
    }

    fn hand_in_progress(&self) -> bool {
        !matches!(self.phase, Phase::Setup | Phase::Finished)
    }

    pub fn set_starting_stacks(&mut self, stacks: &[u32]) -> Result<(), GameError> {
        if self.hand_in_progress() {
            return Err(SetupError::HandInProgress.into());
        }
        if stacks.len() != SEAT_COUNT {
            return Err(SetupError::InvalidSeatCount {
                expected: SEAT_COUNT,
                actual: stacks.len(),
            }
            .into());
        }
        // The pot and every side-pot layer are bounded by the table total.
        if stacks.iter().try_fold(0u32, |acc, &s| acc.checked_add(s)).is_none() {
            return Err(SetupError::ChipTotalTooLarge { max: u32::MAX }.into());
        }
        for (seat, &stack) in self.seats.iter_mut().zip(stacks) {
            seat.set_stack(stack);
        }
        self.stacks_configured = true;
        Ok(())
    }

    pub fn start_new_hand(&mut self) -> Result<(), GameError> {
        if self.hand_in_progress() {
            return Err(SetupError::HandInProgress.into());
        }
        if !self.stacks_configured {
            return Err(SetupError::StacksNotConfigured.into());
        }
        if self.blinds.small_blind == 0 {
            return Err(SetupError::ZeroSmallBlind.into());
        }
        if self.seats.iter().filter(|s| s.stack() > 0).count() < 2 {
            return Err(SetupError::NoFundedSeats.into());
        }

        for seat in &mut self.seats {
            seat.reset();
        }
        self.deck.reset();
        self.pot = 0;
        self.current_bet = 0;
        self.community_cards.clear();
        self.action_log.clear();
        self.action_tokens.clear();
        self.showdown = None;
        self.first_action_taken = false;
        self.hand_id = self.next_hand_id();
        for (initial, seat) in self.initial_stacks.iter_mut().zip(&self.seats) {
            *initial = seat.stack();
        }

        let funded = |s: &Seat| s.stack() > 0;
        // The first hand puts the button on the lowest funded seat.
        let dealer_start = if self.hands_started == 0 {
            0
        } else {
            self.dealer_index + 1
        };
        self.dealer_index = self
            .next_seat_from(dealer_start, funded)
            .ok_or(SetupError::NoFundedSeats)?;
        self.small_blind_index = self
            .next_seat_from(self.dealer_index + 1, funded)
            .ok_or(SetupError::NoFundedSeats)?;
        self.big_blind_index = self
            .next_seat_from(self.small_blind_index + 1, funded)
            .ok_or(SetupError::NoFundedSeats)?;
        self.hands_started += 1;

        self.log(format!(
            "Hand {} started: dealer seat {}, small blind seat {}, big blind seat {}",
            self.hand_id, self.dealer_index, self.small_blind_index, self.big_blind_index
        ));
        for seat in self.seats.iter_mut().filter(|s| s.stack() == 0) {
            seat.sit_out();
            self.action_log
                .push(format!("Seat {} sits out with no chips", seat.index()));
        }

        let sb = self.seats[self.small_blind_index].post_blind(self.blinds.small_blind);
        self.pot += sb;
        self.log(format!(
            "Seat {} posts small blind {}",
            self.small_blind_index, sb
        ));
        let bb = self.seats[self.big_blind_index].post_blind(self.blinds.big_blind);
        self.pot += bb;
        self.log(format!("Seat {} posts big blind {}", self.big_blind_index, bb));
        self.current_bet = self.blinds.big_blind;

        self.deal_hole_cards()?;

        self.phase = Phase::Preflop;
        self.active_seat = self.next_seat_from(self.big_blind_index + 1, Seat::can_act);
        debug!(
            hand_id = %self.hand_id,
            dealer = self.dealer_index,
            small_blind = self.small_blind_index,
            big_blind = self.big_blind_index,
            pot = self.pot,
            "hand started"
        );

        // Blinds alone can put everyone all-in.
        self.advance_while_round_complete()
    }

    /// Applies `action` for the active seat.
    pub fn process_action(&mut self, action: PlayerAction) -> Result<(), GameError> {
        let seat_idx = self.acting_seat().inspect_err(|r| self.trace_rejection(action, r))?;
        let ctx = self.betting_context(seat_idx);
        let validated =
            validate_action(&ctx, action).inspect_err(|r| self.trace_rejection(action, r))?;

        self.apply(seat_idx, validated, ctx.to_call());
        self.first_action_taken = true;
        self.active_seat = self.next_seat_from(seat_idx + 1, Seat::can_act);
        self.advance_while_round_complete()
    }

    /// Like [`HandEngine::process_action`] but refuses unless `seat` is the
    /// active seat.
    pub fn process_action_for(&mut self, seat: usize, action: PlayerAction) -> Result<(), GameError> {
        let expected = self.acting_seat()?;
        if expected != seat {
            return Err(ActionRejection::NotSeatsTurn {
                expected,
                actual: seat,
            }
            .into());
        }
        self.process_action(action)
    }

    /// Applies an action given by name (`fold`, `check`, `call`, `bet`,
    /// `raise`, `allin`) and optional amount.
    pub fn process_named(&mut self, name: &str, amount: Option<u32>) -> Result<(), GameError> {
        let action = PlayerAction::from_parts(name, amount)?;
        self.process_action(action)
    }

    /// Legal actions for the active seat; empty when nobody can act.
    pub fn valid_actions(&self) -> Vec<ActionKind> {
        match self.acting_seat() {
            Ok(i) => valid_actions(&self.betting_context(i)),
            Err(_) => Vec::new(),
        }
    }

    pub fn snapshot(&self) -> TableSnapshot {
        TableSnapshot {
            hand_id: self.hand_id.clone(),
            phase: self.phase,
            seats: self.seats.to_vec(),
            community_cards: self.community_cards.clone(),
            pot: self.pot,
            current_bet: self.current_bet,
            active_seat: self.active_seat,
            dealer_index: self.dealer_index,
            small_blind_index: self.small_blind_index,
            big_blind_index: self.big_blind_index,
            valid_actions: self.valid_actions(),
            action_log: self.action_log.clone(),
        }
    }

    /// Persistable summary of the finished hand.
    pub fn result(&self) -> Result<HandRecord, GameError> {
        HandRecord::from_engine(self)
    }

    fn betting_context(&self, seat: usize) -> BettingContext {
        let s = &self.seats[seat];
        BettingContext {
            stack: s.stack(),
            street_bet: s.current_street_bet(),
            current_bet: self.current_bet,
            big_blind: self.blinds.big_blind,
        }
    }

    fn acting_seat(&self) -> Result<usize, ActionRejection> {
        if !self.phase.is_betting() {
            return Err(ActionRejection::NoHandInProgress);
        }
        match self.active_seat {
            Some(i) if self.seats[i].can_act() => Ok(i),
            _ => Err(ActionRejection::SeatCannotAct),
        }
    }

    fn trace_rejection(&self, action: PlayerAction, reason: &ActionRejection) {
        debug!(
            hand_id = %self.hand_id,
            seat = ?self.active_seat,
            ?action,
            reason = reason.code(),
            "action rejected"
        );
    }

    fn apply(&mut self, i: usize, action: ValidatedAction, to_call: u32) {
        let (line, token) = match action {
            ValidatedAction::Fold => {
                self.seats[i].fold();
                (format!("Seat {} folds", i), ActionToken::Fold)
            }
            ValidatedAction::Check => {
                self.seats[i].check();
                (format!("Seat {} checks", i), ActionToken::Check)
            }
            ValidatedAction::Call(_) => {
                let paid = self.seats[i].call(to_call);
                self.pot += paid;
                let suffix = if self.seats[i].is_all_in() { " and is all-in" } else { "" };
                (format!("Seat {} calls {}{}", i, paid, suffix), ActionToken::Call)
            }
            ValidatedAction::Bet(amount) => {
                self.pot += self.seats[i].bet(amount);
                self.current_bet = self.seats[i].current_street_bet();
                (format!("Seat {} bets {}", i, amount), ActionToken::Bet(amount))
            }
            ValidatedAction::Raise(to) => {
                let add = to - self.seats[i].current_street_bet();
                self.pot += self.seats[i].bet(add);
                self.current_bet = to;
                (format!("Seat {} raises to {}", i, to), ActionToken::Raise(to))
            }
            ValidatedAction::AllIn(_) => {
                let paid = self.seats[i].all_in();
                self.pot += paid;
                self.current_bet = self.current_bet.max(self.seats[i].current_street_bet());
                (format!("Seat {} goes all-in for {}", i, paid), ActionToken::AllIn)
            }
        };
        trace!(hand_id = %self.hand_id, seat = i, token = %token, pot = self.pot, "action applied");
        self.log(line);
        self.action_tokens.push(token);
    }

    /// Whether the current betting round is closed.
    fn is_round_complete(&self) -> bool {
        let live: Vec<&Seat> = self.seats.iter().filter(|s| !s.is_folded()).collect();
        if live.len() <= 1 {
            return true;
        }
        let actionable: Vec<&Seat> = live.iter().copied().filter(|s| s.can_act()).collect();
        match actionable.as_slice() {
            [] => return true,
            // Nobody left to bet against; done once that seat owes nothing.
            [only] if only.current_street_bet() >= self.current_bet => return true,
            _ => {}
        }
        live.iter().all(|s| {
            s.is_all_in()
                || s.stack() == 0
                || (s.acted_this_street() && s.current_street_bet() == self.current_bet)
        })
    }

    fn advance_while_round_complete(&mut self) -> Result<(), GameError> {
        while self.phase.is_betting() && self.is_round_complete() {
            self.advance_phase()?;
        }
        Ok(())
    }

    fn advance_phase(&mut self) -> Result<(), GameError> {
        for seat in &mut self.seats {
            seat.start_street();
        }
        self.current_bet = 0;
        self.active_seat = None;

        if self.live_seats().count() <= 1 {
            self.award_uncontested();
            return Ok(());
        }

        let (next, label, count) = match self.phase {
            Phase::Preflop => (Phase::Flop, "Flop", 3),
            Phase::Flop => (Phase::Turn, "Turn", 1),
            Phase::Turn => (Phase::River, "River", 1),
            _ => {
                self.settle_showdown();
                return Ok(());
            }
        };
        self.deck.burn()?;
        let mut revealed = Vec::with_capacity(count);
        for _ in 0..count {
            revealed.push(self.deck.deal()?);
        }
        self.community_cards.extend_from_slice(&revealed);
        self.phase = next;
        let shown: Vec<String> = revealed.iter().map(Card::to_string).collect();
        self.log(format!("{}: {}", label, shown.join(" ")));
        self.action_tokens.push(ActionToken::Board(revealed));
        self.active_seat = self.next_seat_from(self.dealer_index + 1, Seat::can_act);
        debug!(
            hand_id = %self.hand_id,
            phase = ?self.phase,
            board = %format_cards(&self.community_cards),
            pot = self.pot,
            "street dealt"
        );
        Ok(())
    }

    fn award_uncontested(&mut self) {
        let pot = self.pot;
        let winner = self.live_seats().next();
        if let Some(winner) = winner {
            self.seats[winner].add_chips(pot);
            self.log(format!("Seat {} wins {} uncontested", winner, pot));
            debug!(hand_id = %self.hand_id, winner, pot, "hand won uncontested");
        }
        self.pot = 0;
        self.phase = Phase::Finished;
    }

    fn settle_showdown(&mut self) {
        self.phase = Phase::Showdown;
        self.log("Showdown".to_string());

        let mut strengths = vec![None; SEAT_COUNT];
        for seat in self.seats.iter().filter(|s| !s.is_folded()) {
            if let Some(hole) = seat.hole_cards() {
                let mut cards = hole.to_vec();
                cards.extend_from_slice(&self.community_cards);
                let hs = evaluate_hand(&cards);
                strengths[seat.index()] = Some(hs);
                self.action_log.push(format!(
                    "Seat {} shows {} ({})",
                    seat.index(),
                    format_cards(&hole),
                    hs.category.name()
                ));
            }
        }

        let contributions: Vec<u32> = self.seats.iter().map(Seat::total_hand_bet).collect();
        let live: Vec<bool> = self.seats.iter().map(|s| !s.is_folded()).collect();
        let order: Vec<usize> = (1..=SEAT_COUNT)
            .map(|k| (self.dealer_index + k) % SEAT_COUNT)
            .collect();
        let pots = build_side_pots(&contributions, &live);
        let payouts = award_pots(&pots, &strengths, &order);

        for (i, &amount) in payouts.amounts.iter().enumerate() {
            if amount > 0 {
                self.seats[i].add_chips(amount);
                let category = strengths[i].map(|hs| hs.category.name()).unwrap_or("-");
                self.log(format!("Seat {} wins {} with {}", i, amount, category));
            }
        }
        let notes = payouts
            .main_winners
            .first()
            .and_then(|&w| strengths[w])
            .map(|hs| hs.category.name().to_string());
        debug!(
            hand_id = %self.hand_id,
            winners = ?payouts.main_winners,
            pot = self.pot,
            "showdown settled"
        );
        self.showdown = Some(ShowdownInfo {
            winners: payouts.main_winners,
            notes,
        });
        self.pot = 0;
        self.phase = Phase::Finished;
    }

    fn deal_hole_cards(&mut self) -> Result<(), GameError> {
        let order: Vec<usize> = (1..=SEAT_COUNT)
            .map(|k| (self.dealer_index + k) % SEAT_COUNT)
            .filter(|&i| !self.seats[i].is_folded())
            .collect();
        let mut first = [None; SEAT_COUNT];
        for &i in &order {
            first[i] = Some(self.deck.deal()?);
        }
        for &i in &order {
            let second = self.deck.deal()?;
            if let Some(c) = first[i] {
                self.seats[i].deal_hole_cards([c, second]);
            }
        }
        Ok(())
    }

    fn live_seats(&self) -> impl Iterator<Item = usize> + '_ {
        self.seats
            .iter()
            .filter(|s| !s.is_folded())
            .map(Seat::index)
    }

    /// First seat at or clockwise after `start` matching `pred`, checking
    /// each seat at most once.
    fn next_seat_from(&self, start: usize, pred: impl Fn(&Seat) -> bool) -> Option<usize> {
        (0..SEAT_COUNT)
            .map(|k| (start + k) % SEAT_COUNT)
            .find(|&i| pred(&self.seats[i]))
    }

    fn next_hand_id(&mut self) -> String {
        let mut bytes = [0u8; 16];
        self.id_rng.fill_bytes(&mut bytes);
        uuid::Builder::from_random_bytes(bytes)
            .into_uuid()
            .to_string()
    }

    fn log(&mut self, line: String) {
        self.action_log.push(line);
    }
}
