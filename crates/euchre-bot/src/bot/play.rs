use crate::bot::{highest_index_by_value, indices_where, lowest_index_by_value};
use euchre_core::model::card::Card;
use euchre_core::model::hand::Hand;
use euchre_core::model::rank::Rank;
use euchre_core::model::suit::Suit;
use euchre_core::model::trick::Trick;
use std::cmp::Ordering;

pub struct PlayPlanner;

impl PlayPlanner {
    /// Picks a hand index for the seat to play into `trick`. Returns `None`
    /// only for an empty hand; the result is always a legal index.
    pub fn choose(
        hand: &Hand,
        trick: &Trick,
        trump: Suit,
        partner_winning: bool,
    ) -> Option<usize> {
        if hand.is_empty() {
            return None;
        }
        match trick.lead_suit(trump) {
            None => Self::choose_lead(hand, trump),
            Some(lead) => {
                let winning = trick.winning_play(trump).map(|play| play.card);
                Self::choose_follow(hand, trump, lead, winning, partner_winning)
            }
        }
    }

    /// Leading: right bower, then left bower, then an off-trump ace, then the
    /// highest off-trump card, and the lowest trump when nothing else is left.
    fn choose_lead(hand: &Hand, trump: Suit) -> Option<usize> {
        if let Some(index) = hand.iter().position(|c| c.is_right_bower(trump)) {
            return Some(index);
        }
        if let Some(index) = hand.iter().position(|c| c.is_left_bower(trump)) {
            return Some(index);
        }
        if let Some(index) = hand
            .iter()
            .position(|c| c.rank == Rank::Ace && c.effective_suit(trump) != trump)
        {
            return Some(index);
        }
        let off_trump = indices_where(hand, |c| c.effective_suit(trump) != trump);
        if !off_trump.is_empty() {
            return highest_index_by_value(hand, &off_trump, trump);
        }
        let all: Vec<usize> = (0..hand.len()).collect();
        lowest_index_by_value(hand, &all, trump)
    }

    fn choose_follow(
        hand: &Hand,
        trump: Suit,
        lead: Suit,
        winning: Option<Card>,
        partner_winning: bool,
    ) -> Option<usize> {
        let following = indices_where(hand, |c| c.effective_suit(trump) == lead);
        if !following.is_empty() {
            if partner_winning {
                return lowest_index_by_value(hand, &following, trump);
            }
            if let Some(to_beat) = winning {
                let winners: Vec<usize> = following
                    .iter()
                    .copied()
                    .filter(|&index| {
                        hand.card_at(index).is_some_and(|card| {
                            Card::compare(card, to_beat, lead, trump) == Ordering::Greater
                        })
                    })
                    .collect();
                if !winners.is_empty() {
                    // Win as cheaply as possible.
                    return lowest_index_by_value(hand, &winners, trump);
                }
            }
            return lowest_index_by_value(hand, &following, trump);
        }

        // Off suit: dump low under a winning partner, otherwise ruff with the
        // lowest trump if one is held.
        let all: Vec<usize> = (0..hand.len()).collect();
        if partner_winning {
            return lowest_index_by_value(hand, &all, trump);
        }
        let trumps = indices_where(hand, |c| c.effective_suit(trump) == trump);
        if !trumps.is_empty() {
            return lowest_index_by_value(hand, &trumps, trump);
        }
        lowest_index_by_value(hand, &all, trump)
    }
}
