use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Jack of the trump suit, the highest card in play.
    pub fn is_right_bower(self, trump: Suit) -> bool {
        self.rank == Rank::Jack && self.suit == trump
    }

    /// Jack of the same-color suit, second highest and counted as trump.
    pub fn is_left_bower(self, trump: Suit) -> bool {
        self.rank == Rank::Jack && self.suit == trump.color_mate()
    }

    /// The suit the card plays as: the left bower belongs to the trump suit,
    /// every other card keeps its face suit.
    pub fn effective_suit(self, trump: Suit) -> Suit {
        if self.is_left_bower(trump) {
            trump
        } else {
            self.suit
        }
    }

    /// Numeric strength for trick comparison: right bower 100, left bower 99,
    /// other trump at base rank + 50, everything else at base rank (9..=14).
    pub fn rank_value(self, trump: Suit) -> u8 {
        if self.is_right_bower(trump) {
            100
        } else if self.is_left_bower(trump) {
            99
        } else if self.suit == trump {
            self.rank.value() + 50
        } else {
            self.rank.value()
        }
    }

    /// Orders two cards for trick resolution. Trump beats non-trump; among
    /// trumps the bower order applies; among non-trumps a card of the lead
    /// suit beats an off-suit card, then base rank decides.
    pub fn compare(a: Card, b: Card, lead: Suit, trump: Suit) -> Ordering {
        let a_trump = a.effective_suit(trump) == trump;
        let b_trump = b.effective_suit(trump) == trump;

        match (a_trump, b_trump) {
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (true, true) => a.rank_value(trump).cmp(&b.rank_value(trump)),
            (false, false) => {
                let a_follows = a.suit == lead;
                let b_follows = b.suit == lead;
                match (a_follows, b_follows) {
                    (true, false) => Ordering::Greater,
                    (false, true) => Ordering::Less,
                    _ => a.rank.cmp(&b.rank),
                }
            }
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {}", self.rank, self.suit)
    }
}
