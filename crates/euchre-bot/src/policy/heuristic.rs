use super::{Policy, PolicyContext};
use crate::bot::{BidPlanner, BotParams, PlayPlanner};
use euchre_core::game::state::{Bid, GamePhase};
use tracing::{Level, event};

/// Wraps the planners behind the `Policy` trait. Every method falls back to
/// a safe legal choice when the table is not in the phase it expects, so a
/// mistimed call can never wedge a game.
pub struct HeuristicPolicy {
    params: BotParams,
}

impl HeuristicPolicy {
    pub fn new(params: BotParams) -> Self {
        Self { params }
    }
}

impl Default for HeuristicPolicy {
    fn default() -> Self {
        Self::new(BotParams::default())
    }
}

impl Policy for HeuristicPolicy {
    fn choose_bid(&mut self, ctx: &PolicyContext) -> Bid {
        let hand = ctx.state.hand(ctx.seat);
        let bid = match (ctx.state.phase(), ctx.state.turn_up()) {
            (GamePhase::Bidding1, Some(turn_up)) => {
                BidPlanner::round_one(hand, turn_up, &self.params)
            }
            (GamePhase::Bidding2, Some(turned_down)) => {
                BidPlanner::round_two(hand, turned_down.suit, &self.params)
            }
            _ => Bid::Pass,
        };
        log_bid_decision(ctx, bid);
        bid
    }

    fn choose_discard(&mut self, ctx: &PolicyContext) -> usize {
        let hand = ctx.state.hand(ctx.seat);
        match ctx.state.trump() {
            Some(trump) => BidPlanner::choose_discard(hand, trump),
            None => 0,
        }
    }

    fn choose_play(&mut self, ctx: &PolicyContext) -> usize {
        let state = ctx.state;
        let hand = state.hand(ctx.seat);
        let chosen = state.trump().and_then(|trump| {
            let partner_winning =
                state.current_trick().winner(trump) == Some(ctx.seat.partner());
            PlayPlanner::choose(hand, state.current_trick(), trump, partner_winning)
        });

        match chosen {
            Some(index) => {
                log_play_decision(ctx, index, "planner");
                index
            }
            None => {
                let fallback = state.legal_plays(ctx.seat).first().copied().unwrap_or(0);
                log_play_decision(ctx, fallback, "fallback_first_legal");
                fallback
            }
        }
    }
}

fn log_bid_decision(ctx: &PolicyContext, bid: Bid) {
    if !tracing::enabled!(Level::INFO) {
        return;
    }
    event!(
        target: "euchre_bot::bid",
        Level::INFO,
        seat = %ctx.seat,
        phase = ?ctx.state.phase(),
        hand_size = ctx.state.hand(ctx.seat).len(),
        bid = ?bid,
    );
}

fn log_play_decision(ctx: &PolicyContext, index: usize, reason: &str) {
    if !tracing::enabled!(Level::INFO) {
        return;
    }
    let card = ctx
        .state
        .hand(ctx.seat)
        .card_at(index)
        .map(|c| c.to_string())
        .unwrap_or_default();
    event!(
        target: "euchre_bot::play",
        Level::INFO,
        seat = %ctx.seat,
        index,
        card = %card,
        trick_cards = ctx.state.current_trick().len(),
        reason,
    );
}

#[cfg(test)]
mod tests {
    use super::HeuristicPolicy;
    use crate::policy::{Policy, PolicyContext};
    use euchre_core::game::state::{Bid, GameState};
    use euchre_core::model::card::Card;
    use euchre_core::model::hand::Hand;
    use euchre_core::model::rank::Rank;
    use euchre_core::model::seat::Seat;
    use euchre_core::model::suit::Suit;

    #[test]
    fn bids_during_round_one() {
        let mut state = GameState::with_seed(Seat::One, 5);
        state.start_hand().unwrap();
        let seat = state.current_seat().unwrap();

        let mut policy = HeuristicPolicy::default();
        let bid = policy.choose_bid(&PolicyContext {
            seat,
            state: &state,
        });
        // Whatever the decision, it must be accepted by the table.
        assert!(state.bid(seat, bid).is_ok());
    }

    #[test]
    fn chosen_play_is_always_legal() {
        let hands = [
            Hand::with_cards(vec![
                Card::new(Rank::Nine, Suit::Clubs),
                Card::new(Rank::Ace, Suit::Hearts),
            ]),
            Hand::with_cards(vec![
                Card::new(Rank::Ten, Suit::Clubs),
                Card::new(Rank::Nine, Suit::Hearts),
            ]),
            Hand::with_cards(vec![
                Card::new(Rank::Queen, Suit::Clubs),
                Card::new(Rank::Ten, Suit::Hearts),
            ]),
            Hand::with_cards(vec![
                Card::new(Rank::King, Suit::Clubs),
                Card::new(Rank::Jack, Suit::Hearts),
            ]),
        ];
        let mut state = GameState::from_hands(hands, Seat::Two, Suit::Hearts, Seat::One, None);
        let mut policy = HeuristicPolicy::default();

        for _ in 0..8 {
            let Some(seat) = state.current_seat() else {
                break;
            };
            let index = policy.choose_play(&PolicyContext {
                seat,
                state: &state,
            });
            assert!(
                state.legal_plays(seat).contains(&index),
                "policy picked an illegal index for {seat}"
            );
            state.play_card(seat, index).unwrap();
        }
    }

    #[test]
    fn discard_choice_is_in_range() {
        let mut state = GameState::with_seed(Seat::Four, 11);
        state.start_hand().unwrap();
        state
            .bid(Seat::Three, Bid::OrderUp { alone: false })
            .unwrap();

        let mut policy = HeuristicPolicy::default();
        let index = policy.choose_discard(&PolicyContext {
            seat: Seat::Four,
            state: &state,
        });
        assert!(index < state.hand(Seat::Four).len());
        state.discard(Seat::Four, index).unwrap();
    }
}
