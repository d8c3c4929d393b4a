mod bid;
mod params;
mod play;

pub use bid::{BidPlanner, TrumpStrength};
pub use params::BotParams;
pub use play::PlayPlanner;

use euchre_core::model::card::Card;
use euchre_core::model::hand::Hand;
use euchre_core::model::suit::Suit;

pub(crate) fn lowest_index_by_value(
    hand: &Hand,
    indices: &[usize],
    trump: Suit,
) -> Option<usize> {
    indices
        .iter()
        .copied()
        .min_by_key(|&index| hand.card_at(index).map_or(u8::MAX, |c| c.rank_value(trump)))
}

pub(crate) fn highest_index_by_value(
    hand: &Hand,
    indices: &[usize],
    trump: Suit,
) -> Option<usize> {
    indices
        .iter()
        .copied()
        .max_by_key(|&index| hand.card_at(index).map_or(u8::MIN, |c| c.rank_value(trump)))
}

pub(crate) fn indices_where(
    hand: &Hand,
    mut predicate: impl FnMut(Card) -> bool,
) -> Vec<usize> {
    hand.iter()
        .enumerate()
        .filter(|(_, card)| predicate(**card))
        .map(|(index, _)| index)
        .collect()
}
