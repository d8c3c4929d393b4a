use crate::scheduler::{CpuActivation, TurnScheduler};
use crate::seats::{SeatError, SeatMap};
use core::fmt;
use euchre_bot::{HeuristicPolicy, Policy, PolicyContext};
use euchre_core::game::snapshot::{self, TableView};
use euchre_core::game::state::{
    BidError, BidOutcome, DiscardError, GamePhase, GameState, PlayError, PlayOutcome, StartError,
};
use euchre_core::game::state::Bid;
use euchre_core::model::seat::Seat;
use tracing::{Level, event};

/// Cap on consecutive bot turns, generous enough for a full game of
/// redeals and lone hands.
const MAX_CPU_TURNS: usize = 10_000;

#[derive(Debug)]
pub enum SessionError {
    NotSeated(String),
    Seat(SeatError),
    Start(StartError),
    Bid(BidError),
    Discard(DiscardError),
    Play(PlayError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::NotSeated(player) => write!(f, "player {player} holds no seat"),
            SessionError::Seat(err) => err.fmt(f),
            SessionError::Start(err) => err.fmt(f),
            SessionError::Bid(err) => err.fmt(f),
            SessionError::Discard(err) => err.fmt(f),
            SessionError::Play(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<SeatError> for SessionError {
    fn from(err: SeatError) -> Self {
        SessionError::Seat(err)
    }
}

impl From<StartError> for SessionError {
    fn from(err: StartError) -> Self {
        SessionError::Start(err)
    }
}

impl From<BidError> for SessionError {
    fn from(err: BidError) -> Self {
        SessionError::Bid(err)
    }
}

impl From<DiscardError> for SessionError {
    fn from(err: DiscardError) -> Self {
        SessionError::Discard(err)
    }
}

impl From<PlayError> for SessionError {
    fn from(err: PlayError) -> Self {
        SessionError::Play(err)
    }
}

/// One resolved table action, reported back to the embedding runtime so it
/// can broadcast fresh snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    BidResolved { seat: Seat, outcome: BidOutcome },
    Discarded { seat: Seat },
    Played { seat: Seat, outcome: PlayOutcome },
}

/// Receives the per-seat redacted views (game log included) after every
/// accepted table action.
pub trait NotificationSink: Send {
    fn publish(&mut self, seat: Seat, view: TableView);
}

/// One table: the game state, who sits where, the bot policy for CPU seats,
/// and the scheduler that keeps bot turns from double-firing.
pub struct GameSession {
    state: GameState,
    seats: SeatMap,
    scheduler: TurnScheduler,
    policy: Box<dyn Policy>,
    sink: Option<Box<dyn NotificationSink>>,
}

impl GameSession {
    pub fn new(dealer: Seat) -> Self {
        Self::build(GameState::new(dealer))
    }

    pub fn with_seed(dealer: Seat, seed: u64) -> Self {
        Self::build(GameState::with_seed(dealer, seed))
    }

    fn build(state: GameState) -> Self {
        Self {
            state,
            seats: SeatMap::new(),
            scheduler: TurnScheduler::new(),
            policy: Box::new(HeuristicPolicy::default()),
            sink: None,
        }
    }

    /// Swaps the decision policy driving CPU seats.
    pub fn set_policy(&mut self, policy: Box<dyn Policy>) {
        self.policy = policy;
    }

    /// Installs the sink that receives redacted per-seat views after every
    /// accepted action.
    pub fn set_sink(&mut self, sink: Box<dyn NotificationSink>) {
        self.sink = Some(sink);
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn seats(&self) -> &SeatMap {
        &self.seats
    }

    pub fn generation(&self) -> u64 {
        self.scheduler.generation()
    }

    /// Seats a human at the first open position.
    pub fn join(&mut self, player: impl Into<String>) -> Result<Seat, SessionError> {
        Ok(self.seats.claim_first_open(player)?)
    }

    pub fn claim_seat(
        &mut self,
        seat: Seat,
        player: impl Into<String>,
    ) -> Result<(), SessionError> {
        Ok(self.seats.claim(seat, player)?)
    }

    /// Removes a player. Mid-game their seat is handed to a bot so the
    /// table keeps moving; the follow-up activation (if any) is returned.
    pub fn leave(&mut self, player: &str) -> Option<CpuActivation> {
        let seat = self.seats.release(player)?;
        if self.state.phase() != GamePhase::Idle && self.state.phase() != GamePhase::GameOver {
            self.seats.fill_with_cpus();
            event!(
                target: "euchre_table::session",
                Level::INFO,
                %seat,
                player,
                "seat handed to cpu after departure"
            );
            return self.pending_activation();
        }
        None
    }

    /// Fills open seats with bots and deals the first hand.
    pub fn start(&mut self) -> Result<Option<CpuActivation>, SessionError> {
        self.seats.fill_with_cpus();
        self.state.start_hand()?;
        self.scheduler.advance();
        self.broadcast();
        Ok(self.pending_activation())
    }

    /// The bot turn currently owed, if the acting seat is CPU-held.
    pub fn pending_activation(&self) -> Option<CpuActivation> {
        let seat = self.state.current_seat()?;
        if self.seats.is_cpu(seat) {
            Some(self.scheduler.schedule(seat))
        } else {
            None
        }
    }

    pub fn handle_bid(
        &mut self,
        player: &str,
        bid: Bid,
    ) -> Result<(BidOutcome, Option<CpuActivation>), SessionError> {
        let seat = self.seat_of(player)?;
        let outcome = self.state.bid(seat, bid)?;
        self.after_action(seat, "bid");
        Ok((outcome, self.pending_activation()))
    }

    pub fn handle_discard(
        &mut self,
        player: &str,
        index: usize,
    ) -> Result<Option<CpuActivation>, SessionError> {
        let seat = self.seat_of(player)?;
        self.state.discard(seat, index)?;
        self.after_action(seat, "discard");
        Ok(self.pending_activation())
    }

    pub fn handle_play(
        &mut self,
        player: &str,
        index: usize,
    ) -> Result<(PlayOutcome, Option<CpuActivation>), SessionError> {
        let seat = self.seat_of(player)?;
        let outcome = self.state.play_card(seat, index)?;
        self.after_action(seat, "play");
        Ok((outcome, self.pending_activation()))
    }

    /// Executes a scheduled bot turn. Stale activations (the table moved on
    /// since they were issued) and activations for seats that are no longer
    /// due are dropped without effect.
    pub fn fire_cpu(
        &mut self,
        activation: CpuActivation,
    ) -> Result<Option<SessionEvent>, SessionError> {
        if !self.scheduler.is_current(&activation) {
            event!(
                target: "euchre_table::session",
                Level::DEBUG,
                seat = %activation.seat,
                generation = activation.generation,
                "dropping stale cpu activation"
            );
            return Ok(None);
        }
        if self.state.current_seat() != Some(activation.seat)
            || !self.seats.is_cpu(activation.seat)
        {
            return Ok(None);
        }

        let seat = activation.seat;
        let ctx = PolicyContext {
            seat,
            state: &self.state,
        };
        // A policy that picks an illegal action must never stall the table:
        // fall back to passing or the first legal card instead.
        let event = match self.state.phase() {
            GamePhase::Bidding1 | GamePhase::Bidding2 => {
                let bid = self.policy.choose_bid(&ctx);
                let outcome = match self.state.bid(seat, bid) {
                    Ok(outcome) => outcome,
                    Err(err) => {
                        event!(
                            target: "euchre_table::session",
                            Level::WARN,
                            %seat,
                            %err,
                            "cpu bid rejected, passing instead"
                        );
                        self.state.bid(seat, Bid::Pass)?
                    }
                };
                Some(SessionEvent::BidResolved { seat, outcome })
            }
            GamePhase::Discard => {
                let index = self.policy.choose_discard(&ctx);
                if let Err(err) = self.state.discard(seat, index) {
                    event!(
                        target: "euchre_table::session",
                        Level::WARN,
                        %seat,
                        %err,
                        "cpu discard rejected, discarding the first card"
                    );
                    self.state.discard(seat, 0)?;
                }
                Some(SessionEvent::Discarded { seat })
            }
            GamePhase::Playing => {
                let index = self.policy.choose_play(&ctx);
                let outcome = match self.state.play_card(seat, index) {
                    Ok(outcome) => outcome,
                    Err(err) => {
                        event!(
                            target: "euchre_table::session",
                            Level::WARN,
                            %seat,
                            %err,
                            "cpu play rejected, playing the first legal card"
                        );
                        let fallback =
                            self.state.legal_plays(seat).first().copied().unwrap_or(0);
                        self.state.play_card(seat, fallback)?
                    }
                };
                Some(SessionEvent::Played { seat, outcome })
            }
            GamePhase::Idle | GamePhase::GameOver => None,
        };

        if event.is_some() {
            self.after_action(seat, "cpu");
        }
        Ok(event)
    }

    /// Drains bot turns until a human is due, the game ends, or the cap is
    /// hit. Delays are skipped; a realtime embedder should sleep on each
    /// activation instead of calling this.
    pub fn run_cpu_turns(&mut self) -> Result<Vec<SessionEvent>, SessionError> {
        let mut events = Vec::new();
        for _ in 0..MAX_CPU_TURNS {
            let Some(activation) = self.pending_activation() else {
                break;
            };
            match self.fire_cpu(activation)? {
                Some(event) => events.push(event),
                None => break,
            }
        }
        Ok(events)
    }

    /// Resets a wedged turn pointer and reports the bot turn now owed.
    pub fn recover(&mut self) -> Option<CpuActivation> {
        let recovered = self.state.recover_current_seat()?;
        self.scheduler.advance();
        event!(
            target: "euchre_table::session",
            Level::WARN,
            seat = %recovered,
            "current seat recovered to fallback"
        );
        self.pending_activation()
    }

    /// The table as one seated player may see it. Unseated watchers get the
    /// spectator view instead, with every hand reduced to a count.
    pub fn snapshot_for(&self, player: &str) -> TableView {
        snapshot::for_viewer(&self.state, self.seats.seat_of(player))
    }

    pub fn snapshot_for_seat(&self, seat: Seat) -> TableView {
        snapshot::for_viewer(&self.state, Some(seat))
    }

    pub fn snapshot_for_spectator(&self) -> TableView {
        snapshot::for_viewer(&self.state, None)
    }

    fn seat_of(&self, player: &str) -> Result<Seat, SessionError> {
        self.seats
            .seat_of(player)
            .ok_or_else(|| SessionError::NotSeated(player.to_string()))
    }

    fn after_action(&mut self, seat: Seat, action: &str) {
        self.scheduler.advance();
        event!(
            target: "euchre_table::session",
            Level::INFO,
            %seat,
            action,
            phase = ?self.state.phase(),
            generation = self.scheduler.generation(),
        );
        self.broadcast();
    }

    fn broadcast(&mut self) {
        let Some(sink) = self.sink.as_mut() else {
            return;
        };
        for seat in Seat::ALL {
            sink.publish(seat, snapshot::for_viewer(&self.state, Some(seat)));
        }
    }
}
