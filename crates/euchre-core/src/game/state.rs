use crate::game::log::GameLog;
use crate::game::scoring::{self, HandResult, HandScore};
use crate::model::card::Card;
use crate::model::deck::Deck;
use crate::model::hand::Hand;
use crate::model::seat::{Seat, Team};
use crate::model::suit::Suit;
use crate::model::trick::Trick;
use core::fmt;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::array;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    Idle,
    Bidding1,
    Bidding2,
    Discard,
    Playing,
    GameOver,
}

/// A bidding action. Round one only offers the turn-up suit; round two
/// names any suit except the one turned down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bid {
    OrderUp { alone: bool },
    CallSuit { suit: Suit, alone: bool },
    Pass,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BidOutcome {
    /// Round one order-up: trump is named and the dealer must now discard.
    TrumpOrdered { trump: Suit, dealer: Seat },
    /// Round two call: play begins immediately.
    TrumpCalled { trump: Suit },
    Passed,
    /// Fourth pass of round one; the turn-up is turned down.
    TurnedDown,
    /// Fourth pass of round two; a fresh hand was dealt.
    Redealt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    Played,
    TrickCompleted {
        winner: Seat,
    },
    /// Final trick of the hand: the hand was scored and, unless the game
    /// ended, the next hand has already been dealt.
    HandCompleted {
        winner: Seat,
        score: HandScore,
        game_over: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartError {
    GameInProgress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BidError {
    NotBiddingPhase,
    NotYourTurn { expected: Option<Seat>, actual: Seat },
    WrongBidForRound,
    SuitTurnedDown(Suit),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscardError {
    NotDiscardPhase,
    NotDealer(Seat),
    CardOutOfRange(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayError {
    NotPlayingPhase,
    NotYourTurn { expected: Option<Seat>, actual: Seat },
    CardOutOfRange(usize),
    MustFollowSuit(Suit),
}

impl fmt::Display for StartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartError::GameInProgress => write!(f, "a hand is already in progress"),
        }
    }
}

impl fmt::Display for BidError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BidError::NotBiddingPhase => write!(f, "no bidding round is in progress"),
            BidError::NotYourTurn { expected, actual } => match expected {
                Some(seat) => write!(f, "expected {seat} to bid next but got {actual}"),
                None => write!(f, "no seat is expected to bid but got {actual}"),
            },
            BidError::WrongBidForRound => {
                write!(f, "that bid is not available in the current round")
            }
            BidError::SuitTurnedDown(suit) => {
                write!(f, "{suit} was turned down and cannot be called")
            }
        }
    }
}

impl fmt::Display for DiscardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscardError::NotDiscardPhase => write!(f, "no discard is pending"),
            DiscardError::NotDealer(seat) => write!(f, "only the dealer may discard, not {seat}"),
            DiscardError::CardOutOfRange(index) => write!(f, "card index {index} is out of range"),
        }
    }
}

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayError::NotPlayingPhase => write!(f, "the hand is not in the play phase"),
            PlayError::NotYourTurn { expected, actual } => match expected {
                Some(seat) => write!(f, "expected {seat} to play next but got {actual}"),
                None => write!(f, "no seat is expected to play but got {actual}"),
            },
            PlayError::CardOutOfRange(index) => write!(f, "card index {index} is out of range"),
            PlayError::MustFollowSuit(suit) => write!(f, "must follow {suit} if possible"),
        }
    }
}

impl std::error::Error for StartError {}
impl std::error::Error for BidError {}
impl std::error::Error for DiscardError {}
impl std::error::Error for PlayError {}

/// Full state of one Euchre table: phases, hands, bidding, tricks, and
/// cumulative team scores. All mutation goes through the operations below;
/// every rejected action leaves the state untouched.
#[derive(Debug, Clone)]
pub struct GameState {
    phase: GamePhase,
    dealer: Seat,
    deck: Deck,
    hands: [Hand; 4],
    dead: Vec<Card>,
    turn_up: Option<Card>,
    trump: Option<Suit>,
    maker: Option<Seat>,
    alone: Option<Seat>,
    current_trick: Trick,
    current_seat: Option<Seat>,
    first_position: Option<Seat>,
    tricks_won: [u8; 4],
    team_tricks: [u8; 2],
    team_scores: [u8; 2],
    bids_made: u8,
    log: GameLog,
    rng: StdRng,
    seed: u64,
}

impl GameState {
    pub fn new(dealer: Seat) -> Self {
        Self::with_seed(dealer, rand::random())
    }

    pub fn with_seed(dealer: Seat, seed: u64) -> Self {
        let first = dealer.next_clockwise();
        Self {
            phase: GamePhase::Idle,
            dealer,
            deck: Deck::euchre(),
            hands: array::from_fn(|_| Hand::new()),
            dead: Vec::new(),
            turn_up: None,
            trump: None,
            maker: None,
            alone: None,
            current_trick: Trick::new(first),
            current_seat: None,
            first_position: None,
            tricks_won: [0; 4],
            team_tricks: [0; 2],
            team_scores: [0; 2],
            bids_made: 0,
            log: GameLog::new(),
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Test scaffolding: a table already in the play phase with known hands.
    pub fn from_hands(
        hands: [Hand; 4],
        dealer: Seat,
        trump: Suit,
        maker: Seat,
        alone: Option<Seat>,
    ) -> Self {
        let mut state = Self::with_seed(dealer, 0);
        // Drain the deck so only the provided hands are in play.
        while state.deck.deal_one().is_some() {}
        state.hands = hands;
        state.trump = Some(trump);
        state.maker = Some(maker);
        state.alone = alone;
        state.phase = GamePhase::Playing;
        state.begin_play();
        state
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn dealer(&self) -> Seat {
        self.dealer
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn turn_up(&self) -> Option<Card> {
        self.turn_up
    }

    pub fn trump(&self) -> Option<Suit> {
        self.trump
    }

    pub fn maker(&self) -> Option<Seat> {
        self.maker
    }

    pub fn alone_player(&self) -> Option<Seat> {
        self.alone
    }

    pub fn is_going_alone(&self) -> bool {
        self.alone.is_some()
    }

    pub fn current_seat(&self) -> Option<Seat> {
        self.current_seat
    }

    pub fn first_position(&self) -> Option<Seat> {
        self.first_position
    }

    pub fn current_trick(&self) -> &Trick {
        &self.current_trick
    }

    pub fn hand(&self, seat: Seat) -> &Hand {
        &self.hands[seat.index()]
    }

    pub fn tricks_won(&self, seat: Seat) -> u8 {
        self.tricks_won[seat.index()]
    }

    pub fn team_tricks(&self) -> [u8; 2] {
        self.team_tricks
    }

    pub fn team_scores(&self) -> [u8; 2] {
        self.team_scores
    }

    pub fn bids_made(&self) -> u8 {
        self.bids_made
    }

    pub fn log(&self) -> &GameLog {
        &self.log
    }

    /// The seat sitting out while its partner plays alone, if any.
    pub fn sitting_out(&self) -> Option<Seat> {
        self.alone.map(Seat::partner)
    }

    pub fn is_sitting_out(&self, seat: Seat) -> bool {
        self.sitting_out() == Some(seat)
    }

    pub fn active_seats(&self) -> impl Iterator<Item = Seat> + '_ {
        Seat::ALL
            .into_iter()
            .filter(|seat| !self.is_sitting_out(*seat))
    }

    /// Plays needed to complete a trick: three during a lone hand, else four.
    pub fn expected_trick_size(&self) -> usize {
        if self.alone.is_some() { 3 } else { 4 }
    }

    /// The next seat to act after `seat`, skipping the sat-out partner of a
    /// lone player. At most one skip is ever needed.
    pub fn next_active_seat(&self, seat: Seat) -> Seat {
        let next = seat.next_clockwise();
        if self.is_sitting_out(next) {
            next.next_clockwise()
        } else {
            next
        }
    }

    fn first_active_from(&self, seat: Seat) -> Seat {
        if self.is_sitting_out(seat) {
            seat.next_clockwise()
        } else {
            seat
        }
    }

    /// Cards currently accounted for within the hand. Holds at 24 from the
    /// moment a hand is dealt until the next deal.
    pub fn card_count(&self) -> usize {
        let in_hands: usize = self.hands.iter().map(Hand::len).sum();
        in_hands + self.deck.len() + self.dead.len() + usize::from(self.turn_up.is_some())
    }

    /// Hand indices this seat could legally play right now.
    pub fn legal_plays(&self, seat: Seat) -> Vec<usize> {
        if self.phase != GamePhase::Playing {
            return Vec::new();
        }
        let Some(trump) = self.trump else {
            return Vec::new();
        };
        let hand = &self.hands[seat.index()];
        match self.current_trick.lead_suit(trump) {
            None => (0..hand.len()).collect(),
            Some(lead) => {
                let follows: Vec<usize> = hand
                    .iter()
                    .enumerate()
                    .filter(|(_, card)| card.effective_suit(trump) == lead)
                    .map(|(index, _)| index)
                    .collect();
                if follows.is_empty() {
                    (0..hand.len()).collect()
                } else {
                    follows
                }
            }
        }
    }

    /// Starts the first hand of a game. Later hands deal themselves.
    pub fn start_hand(&mut self) -> Result<(), StartError> {
        if self.phase != GamePhase::Idle {
            return Err(StartError::GameInProgress);
        }
        self.log.push("Game started. Bidding begins.");
        self.deal_new_hand();
        Ok(())
    }

    pub fn bid(&mut self, seat: Seat, bid: Bid) -> Result<BidOutcome, BidError> {
        match self.phase {
            GamePhase::Bidding1 => self.bid_round_one(seat, bid),
            GamePhase::Bidding2 => self.bid_round_two(seat, bid),
            _ => Err(BidError::NotBiddingPhase),
        }
    }

    pub fn discard(&mut self, seat: Seat, index: usize) -> Result<(), DiscardError> {
        if self.phase != GamePhase::Discard {
            return Err(DiscardError::NotDiscardPhase);
        }
        if seat != self.dealer {
            return Err(DiscardError::NotDealer(seat));
        }
        let card = self.hands[self.dealer.index()]
            .remove_at(index)
            .ok_or(DiscardError::CardOutOfRange(index))?;
        self.dead.push(card);
        self.log.push(format!("{seat} discarded a card"));
        self.phase = GamePhase::Playing;
        self.begin_play();
        Ok(())
    }

    pub fn play_card(&mut self, seat: Seat, index: usize) -> Result<PlayOutcome, PlayError> {
        if self.phase != GamePhase::Playing {
            return Err(PlayError::NotPlayingPhase);
        }
        if self.current_seat != Some(seat) {
            return Err(PlayError::NotYourTurn {
                expected: self.current_seat,
                actual: seat,
            });
        }
        let trump = self.trump.expect("trump is set during play");
        let hand = &self.hands[seat.index()];
        let card = hand
            .card_at(index)
            .ok_or(PlayError::CardOutOfRange(index))?;

        if let Some(lead) = self.current_trick.lead_suit(trump) {
            let can_follow = hand.iter().any(|c| c.effective_suit(trump) == lead);
            if can_follow && card.effective_suit(trump) != lead {
                return Err(PlayError::MustFollowSuit(lead));
            }
        }

        self.hands[seat.index()]
            .remove_at(index)
            .expect("checked index is present");
        self.current_trick.push(seat, card);
        self.log.push(format!("{seat} played {card}"));

        if self.current_trick.len() == self.expected_trick_size() {
            Ok(self.resolve_trick(trump))
        } else {
            self.current_seat = Some(self.next_active_seat(seat));
            Ok(PlayOutcome::Played)
        }
    }

    /// Resets a missing or unplayable current seat to a deterministic
    /// fallback so the table cannot deadlock. Returns the new seat when a
    /// reset happened.
    pub fn recover_current_seat(&mut self) -> Option<Seat> {
        let fallback = match self.phase {
            GamePhase::Discard => self.dealer,
            GamePhase::Bidding1 | GamePhase::Bidding2 => self.dealer.next_clockwise(),
            GamePhase::Playing => self.first_active_from(self.dealer.next_clockwise()),
            GamePhase::Idle | GamePhase::GameOver => return None,
        };
        let stalled = match self.current_seat {
            None => true,
            Some(seat) => {
                self.phase == GamePhase::Playing && self.hands[seat.index()].is_empty()
            }
        };
        if stalled {
            self.current_seat = Some(fallback);
            Some(fallback)
        } else {
            None
        }
    }

    fn bid_round_one(&mut self, seat: Seat, bid: Bid) -> Result<BidOutcome, BidError> {
        self.check_bidder(seat)?;
        match bid {
            Bid::OrderUp { alone } => {
                let turn_up = self.turn_up.take().expect("turn-up is present in round one");
                let trump = turn_up.suit;
                self.name_trump(seat, trump, alone, true);
                self.log.push(format!(
                    "{} picks up the {turn_up}",
                    self.dealer
                ));
                self.hands[self.dealer.index()].add(turn_up);
                self.phase = GamePhase::Discard;
                self.current_seat = Some(self.dealer);
                Ok(BidOutcome::TrumpOrdered {
                    trump,
                    dealer: self.dealer,
                })
            }
            Bid::CallSuit { .. } => Err(BidError::WrongBidForRound),
            Bid::Pass => {
                self.bids_made += 1;
                self.log.push(format!("{seat} passed"));
                if self.bids_made >= 4 {
                    let turned = self.turn_up.expect("turn-up is present in round one");
                    self.log
                        .push(format!("Everyone passed. Turn down {}.", turned.suit));
                    self.phase = GamePhase::Bidding2;
                    self.bids_made = 0;
                    self.current_seat = Some(self.dealer.next_clockwise());
                    Ok(BidOutcome::TurnedDown)
                } else {
                    self.current_seat = Some(seat.next_clockwise());
                    Ok(BidOutcome::Passed)
                }
            }
        }
    }

    fn bid_round_two(&mut self, seat: Seat, bid: Bid) -> Result<BidOutcome, BidError> {
        self.check_bidder(seat)?;
        match bid {
            Bid::CallSuit { suit, alone } => {
                if self.turn_up.map(|card| card.suit) == Some(suit) {
                    return Err(BidError::SuitTurnedDown(suit));
                }
                self.name_trump(seat, suit, alone, false);
                self.phase = GamePhase::Playing;
                self.begin_play();
                Ok(BidOutcome::TrumpCalled { trump: suit })
            }
            Bid::OrderUp { .. } => Err(BidError::WrongBidForRound),
            Bid::Pass => {
                self.bids_made += 1;
                self.log.push(format!("{seat} passed"));
                if self.bids_made >= 4 {
                    self.log.push("Everyone passed. Redealing.");
                    self.dealer = self.dealer.next_clockwise();
                    self.deal_new_hand();
                    Ok(BidOutcome::Redealt)
                } else {
                    self.current_seat = Some(seat.next_clockwise());
                    Ok(BidOutcome::Passed)
                }
            }
        }
    }

    fn check_bidder(&self, seat: Seat) -> Result<(), BidError> {
        if self.current_seat != Some(seat) {
            return Err(BidError::NotYourTurn {
                expected: self.current_seat,
                actual: seat,
            });
        }
        Ok(())
    }

    fn name_trump(&mut self, seat: Seat, trump: Suit, alone: bool, ordered: bool) {
        self.trump = Some(trump);
        self.maker = Some(seat);
        self.alone = alone.then_some(seat);
        self.bids_made = 0;
        let verb = if ordered {
            format!("ordered up {trump}")
        } else {
            format!("called {trump} as trump")
        };
        if alone {
            self.log.push(format!("{seat} {verb} and is going ALONE!"));
        } else {
            self.log.push(format!("{seat} {verb}"));
        }
    }

    fn begin_play(&mut self) {
        let lead = self.first_active_from(self.dealer.next_clockwise());
        self.current_trick = Trick::new(lead);
        self.current_seat = Some(lead);
        self.first_position = Some(lead);
    }

    fn resolve_trick(&mut self, trump: Suit) -> PlayOutcome {
        let winner = self
            .current_trick
            .winner(trump)
            .expect("completed trick has a winner");
        self.tricks_won[winner.index()] += 1;
        self.team_tricks[winner.team().index()] += 1;
        self.log.push(format!("{winner} won the trick"));

        let hand_done = self
            .active_seats()
            .all(|seat| self.hands[seat.index()].is_empty());
        if hand_done {
            let score = self.score_hand();
            let game_over = self.team_scores.iter().any(|&s| s >= scoring::GAME_TARGET);
            if game_over {
                self.phase = GamePhase::GameOver;
                self.current_seat = None;
                let winner_team = if self.team_scores[0] >= scoring::GAME_TARGET {
                    Team::One
                } else {
                    Team::Two
                };
                self.log.push(format!("Game over! {winner_team} wins!"));
            } else {
                self.dealer = self.dealer.next_clockwise();
                self.log
                    .push(format!("Next hand starting. Dealer moves to {}.", self.dealer));
                self.deal_new_hand();
            }
            PlayOutcome::HandCompleted {
                winner,
                score,
                game_over,
            }
        } else {
            self.current_trick = Trick::new(winner);
            self.current_seat = Some(winner);
            self.first_position = Some(winner);
            PlayOutcome::TrickCompleted { winner }
        }
    }

    fn score_hand(&mut self) -> HandScore {
        let maker = self.maker.expect("maker is set during play");
        let alone = self.alone.is_some();
        let score = scoring::score_hand(self.team_tricks, maker.team(), alone);
        self.team_scores[0] += score.points[0];
        self.team_scores[1] += score.points[1];

        let team = score.maker_team;
        let line = match score.result {
            HandResult::March { alone: true } => {
                format!("{team} ({maker} going alone) made a march! +4 points")
            }
            HandResult::March { alone: false } => {
                format!("{team} (led by {maker}) made a march! +2 points")
            }
            HandResult::Made { alone: true } => {
                format!("{team} ({maker} going alone) made their bid! +4 points")
            }
            HandResult::Made { alone: false } => {
                format!("{team} (led by {maker}) made their bid. +1 point")
            }
            HandResult::Euchred => {
                let defenders = team.opponent();
                format!("{team} was euchred! {defenders} gets +2 points.")
            }
        };
        self.log.push(line);
        self.log.push(format!(
            "Current Scores - Team 1: {}, Team 2: {}",
            self.team_scores[0], self.team_scores[1]
        ));
        score
    }

    /// Deals a fresh hand: shuffled 24-card deck, five cards per seat dealt
    /// one at a time starting left of the dealer, then the turn-up. The
    /// three-card kitty stays in the deck.
    fn deal_new_hand(&mut self) {
        self.deck = Deck::shuffled(&mut self.rng);
        for hand in &mut self.hands {
            hand.clear();
        }
        self.dead.clear();
        for _ in 0..5 {
            let mut seat = self.dealer.next_clockwise();
            for _ in 0..4 {
                let card = self.deck.deal_one().expect("deck covers a full deal");
                self.hands[seat.index()].add(card);
                seat = seat.next_clockwise();
            }
        }
        self.turn_up = self.deck.deal_one();
        self.trump = None;
        self.maker = None;
        self.alone = None;
        self.tricks_won = [0; 4];
        self.team_tricks = [0; 2];
        self.bids_made = 0;
        self.phase = GamePhase::Bidding1;
        let first = self.dealer.next_clockwise();
        self.current_trick = Trick::new(first);
        self.current_seat = Some(first);
        self.first_position = Some(first);
        self.log
            .push(format!("Bidding begins. {first} goes first."));
    }
}
