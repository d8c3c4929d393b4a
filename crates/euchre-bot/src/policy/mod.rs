mod heuristic;

pub use heuristic::HeuristicPolicy;

use euchre_core::game::state::{Bid, GameState};
use euchre_core::model::seat::Seat;

/// Context provided to policies for decision-making.
pub struct PolicyContext<'a> {
    pub seat: Seat,
    pub state: &'a GameState,
}

/// Unified interface for seat decision-making.
pub trait Policy: Send {
    /// Choose a bid during either bidding round.
    fn choose_bid(&mut self, ctx: &PolicyContext) -> Bid;

    /// Choose the hand index the dealer discards after picking up.
    fn choose_discard(&mut self, ctx: &PolicyContext) -> usize;

    /// Choose the hand index to play during the play phase.
    fn choose_play(&mut self, ctx: &PolicyContext) -> usize;
}
