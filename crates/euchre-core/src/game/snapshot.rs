use crate::game::state::{GamePhase, GameState};
use crate::model::card::Card;
use crate::model::seat::Seat;
use crate::model::suit::Suit;
use serde::Serialize;

/// What one seat is allowed to see about another seat.
#[derive(Debug, Clone, Serialize)]
pub struct SeatView {
    pub seat: Seat,
    pub card_count: usize,
    /// Present only for the viewer's own seat.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cards: Option<Vec<Card>>,
    pub tricks_won: u8,
    pub sitting_out: bool,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct PlayView {
    pub seat: Seat,
    pub card: Card,
}

/// A redacted projection of the table for a single viewer. Everything here
/// is either public at the table or belongs to the viewer's own hand.
#[derive(Debug, Clone, Serialize)]
pub struct TableView {
    pub phase: GamePhase,
    pub dealer: Seat,
    /// `None` for a spectator, who sees every hand as a count.
    pub viewer: Option<Seat>,
    pub current_seat: Option<Seat>,
    pub trump: Option<Suit>,
    /// The face-up card during round one, or the turned-down card during
    /// round two. Public either way.
    pub turn_up: Option<Card>,
    pub maker: Option<Seat>,
    pub alone: Option<Seat>,
    pub seats: Vec<SeatView>,
    pub trick: Vec<PlayView>,
    pub trick_leader: Seat,
    pub team_tricks: [u8; 2],
    pub team_scores: [u8; 2],
    pub log: Vec<String>,
}

/// Projects the table as `viewer` may see it; pass `None` for a spectator,
/// who gets no hand at all. Hidden hands are reduced to counts; no
/// full-state serialization happens along the way, so nothing private can
/// leak through a forgotten field.
pub fn for_viewer(state: &GameState, viewer: Option<Seat>) -> TableView {
    let seats = Seat::ALL
        .into_iter()
        .map(|seat| {
            let hand = state.hand(seat);
            SeatView {
                seat,
                card_count: hand.len(),
                cards: (Some(seat) == viewer).then(|| hand.cards().to_vec()),
                tricks_won: state.tricks_won(seat),
                sitting_out: state.is_sitting_out(seat),
            }
        })
        .collect();

    let trick = state
        .current_trick()
        .plays()
        .iter()
        .map(|play| PlayView {
            seat: play.seat,
            card: play.card,
        })
        .collect();

    TableView {
        phase: state.phase(),
        dealer: state.dealer(),
        viewer,
        current_seat: state.current_seat(),
        trump: state.trump(),
        turn_up: state.turn_up(),
        maker: state.maker(),
        alone: state.alone_player(),
        seats,
        trick,
        trick_leader: state.current_trick().leader(),
        team_tricks: state.team_tricks(),
        team_scores: state.team_scores(),
        log: state.log().to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::for_viewer;
    use crate::game::state::GameState;
    use crate::model::seat::Seat;

    fn started() -> GameState {
        let mut state = GameState::with_seed(Seat::One, 99);
        state.start_hand().unwrap();
        state
    }

    #[test]
    fn viewer_sees_only_their_own_cards() {
        let state = started();
        let view = for_viewer(&state, Some(Seat::Two));
        for seat_view in &view.seats {
            if seat_view.seat == Seat::Two {
                let cards = seat_view.cards.as_ref().unwrap();
                assert_eq!(cards.len(), 5);
            } else {
                assert!(seat_view.cards.is_none());
                assert_eq!(seat_view.card_count, 5);
            }
        }
    }

    #[test]
    fn spectator_sees_every_hand_as_a_count() {
        let state = started();
        let view = for_viewer(&state, None);
        assert_eq!(view.viewer, None);
        for seat_view in &view.seats {
            assert!(seat_view.cards.is_none());
            assert_eq!(seat_view.card_count, 5);
        }

        let json = serde_json::to_value(&view).unwrap();
        for seat in json["seats"].as_array().unwrap() {
            assert!(seat.get("cards").is_none());
        }
    }

    #[test]
    fn hidden_hands_are_absent_from_the_serialized_view() {
        let state = started();
        let view = for_viewer(&state, Some(Seat::One));
        let json = serde_json::to_value(&view).unwrap();

        let seats = json["seats"].as_array().unwrap();
        let mut with_cards = 0;
        for seat in seats {
            if seat.get("cards").is_some() {
                with_cards += 1;
            }
        }
        assert_eq!(with_cards, 1);
    }

    #[test]
    fn public_fields_match_the_table() {
        let state = started();
        let view = for_viewer(&state, Some(Seat::Three));
        assert_eq!(view.dealer, Seat::One);
        assert_eq!(view.current_seat, Some(Seat::Four));
        assert_eq!(view.turn_up, state.turn_up());
        assert_eq!(view.team_scores, [0, 0]);
        assert!(!view.log.is_empty());
    }

    #[test]
    fn each_viewer_gets_a_distinct_projection() {
        let state = started();
        for seat in Seat::ALL {
            let view = for_viewer(&state, Some(seat));
            assert_eq!(view.viewer, Some(seat));
            let own = view.seats.iter().find(|s| s.seat == seat).unwrap();
            assert!(own.cards.is_some());
        }
    }
}
