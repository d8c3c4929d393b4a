use crate::bot::params::BotParams;
use euchre_core::game::state::Bid;
use euchre_core::model::card::Card;
use euchre_core::model::hand::Hand;
use euchre_core::model::rank::Rank;
use euchre_core::model::suit::Suit;

/// How much of a hand backs a candidate trump suit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrumpStrength {
    /// Effective trump count, left bower included.
    pub count: u8,
    pub has_right_bower: bool,
    pub has_left_bower: bool,
    pub has_trump_ace: bool,
}

impl TrumpStrength {
    pub fn evaluate(hand: &Hand, trump: Suit) -> Self {
        let mut strength = Self::default();
        for card in hand.iter() {
            if card.suit == trump {
                strength.count += 1;
                if card.rank == Rank::Jack {
                    strength.has_right_bower = true;
                }
                if card.rank == Rank::Ace {
                    strength.has_trump_ace = true;
                }
            } else if card.is_left_bower(trump) {
                strength.count += 1;
                strength.has_left_bower = true;
            }
        }
        strength
    }

    pub fn has_bower(self) -> bool {
        self.has_right_bower || self.has_left_bower
    }
}

pub struct BidPlanner;

impl BidPlanner {
    /// Round-one decision against the face-up card. Orders up on three-plus
    /// trump, a right bower, or a left bower or trump ace with support.
    pub fn round_one(hand: &Hand, turn_up: Card, params: &BotParams) -> Bid {
        let strength = TrumpStrength::evaluate(hand, turn_up.suit);
        let order = strength.count >= params.solo_count
            || strength.has_right_bower
            || (strength.has_left_bower && strength.count >= params.support_count)
            || (strength.has_trump_ace && strength.count >= params.support_count);
        if order {
            let alone = strength.has_right_bower
                && strength.has_left_bower
                && strength.count >= params.alone_count;
            Bid::OrderUp { alone }
        } else {
            Bid::Pass
        }
    }

    /// Round-two decision. Scores every suit except the turned-down one and
    /// calls the strongest when it has three-plus cards or a bower.
    pub fn round_two(hand: &Hand, turned_down: Suit, params: &BotParams) -> Bid {
        let mut best: Option<(Suit, TrumpStrength)> = None;
        for suit in Suit::ALL {
            if suit == turned_down {
                continue;
            }
            let strength = TrumpStrength::evaluate(hand, suit);
            let better = match best {
                None => true,
                Some((_, current)) => {
                    strength.count > current.count
                        || (strength.count == current.count
                            && strength.has_bower()
                            && !current.has_bower())
                }
            };
            if better {
                best = Some((suit, strength));
            }
        }

        match best {
            Some((suit, strength))
                if strength.count >= params.solo_count || strength.has_bower() =>
            {
                let alone = strength.has_bower() && strength.count >= params.alone_count;
                Bid::CallSuit { suit, alone }
            }
            _ => Bid::Pass,
        }
    }

    /// After picking up the turn-up, the dealer sheds the weakest card:
    /// lowest off-trump if one exists, otherwise the lowest trump.
    pub fn choose_discard(hand: &Hand, trump: Suit) -> usize {
        let off_trump = crate::bot::indices_where(hand, |c| c.effective_suit(trump) != trump);
        let pool = if off_trump.is_empty() {
            (0..hand.len()).collect()
        } else {
            off_trump
        };
        crate::bot::lowest_index_by_value(hand, &pool, trump).unwrap_or(0)
    }
}
