use crate::model::card::Card;
use crate::model::seat::Seat;
use crate::model::suit::Suit;
use std::cmp::Ordering;

#[derive(Debug, Clone)]
pub struct Trick {
    leader: Seat,
    plays: Vec<Play>,
}

#[derive(Debug, Clone, Copy)]
pub struct Play {
    pub seat: Seat,
    pub card: Card,
}

impl Trick {
    pub fn new(leader: Seat) -> Self {
        Self {
            leader,
            plays: Vec::with_capacity(4),
        }
    }

    pub fn leader(&self) -> Seat {
        self.leader
    }

    pub fn plays(&self) -> &[Play] {
        &self.plays
    }

    pub fn len(&self) -> usize {
        self.plays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plays.is_empty()
    }

    /// The suit that must be followed: the effective suit of the first card,
    /// so a led left bower sets the trump suit as the lead.
    pub fn lead_suit(&self, trump: Suit) -> Option<Suit> {
        self.plays.first().map(|play| play.card.effective_suit(trump))
    }

    pub fn push(&mut self, seat: Seat, card: Card) {
        self.plays.push(Play { seat, card });
    }

    /// The play currently taking the trick, resolved under the lead suit and
    /// trump. `None` only for an empty trick.
    pub fn winning_play(&self, trump: Suit) -> Option<&Play> {
        let lead = self.lead_suit(trump)?;
        let mut best = self.plays.first()?;
        for play in &self.plays[1..] {
            if Card::compare(play.card, best.card, lead, trump) == Ordering::Greater {
                best = play;
            }
        }
        Some(best)
    }

    pub fn winner(&self, trump: Suit) -> Option<Seat> {
        self.winning_play(trump).map(|play| play.seat)
    }
}

#[cfg(test)]
mod tests {
    use super::Trick;
    use crate::model::card::Card;
    use crate::model::rank::Rank;
    use crate::model::seat::Seat;
    use crate::model::suit::Suit;

    #[test]
    fn right_bower_wins_regardless_of_position() {
        // Trick 9S, AS, JH, JD with hearts trump and spades led.
        let mut trick = Trick::new(Seat::One);
        trick.push(Seat::One, Card::new(Rank::Nine, Suit::Spades));
        trick.push(Seat::Four, Card::new(Rank::Ace, Suit::Spades));
        trick.push(Seat::Three, Card::new(Rank::Jack, Suit::Hearts));
        trick.push(Seat::Two, Card::new(Rank::Jack, Suit::Diamonds));

        assert_eq!(trick.winner(Suit::Hearts), Some(Seat::Three));
    }

    #[test]
    fn led_left_bower_sets_trump_as_lead_suit() {
        let mut trick = Trick::new(Seat::Two);
        trick.push(Seat::Two, Card::new(Rank::Jack, Suit::Diamonds));
        assert_eq!(trick.lead_suit(Suit::Hearts), Some(Suit::Hearts));
        assert_eq!(trick.lead_suit(Suit::Clubs), Some(Suit::Diamonds));
    }

    #[test]
    fn highest_of_lead_suit_wins_without_trump() {
        let mut trick = Trick::new(Seat::One);
        trick.push(Seat::One, Card::new(Rank::Ten, Suit::Clubs));
        trick.push(Seat::Four, Card::new(Rank::Queen, Suit::Clubs));
        trick.push(Seat::Three, Card::new(Rank::Ace, Suit::Diamonds));

        assert_eq!(trick.winner(Suit::Hearts), Some(Seat::Four));
    }

    #[test]
    fn empty_trick_has_no_winner() {
        let trick = Trick::new(Seat::One);
        assert_eq!(trick.winner(Suit::Hearts), None);
        assert_eq!(trick.lead_suit(Suit::Hearts), None);
    }
}
