use euchre_core::game::scoring::GAME_TARGET;
use euchre_core::game::state::{Bid, GamePhase, PlayOutcome};
use euchre_core::model::seat::Seat;
use euchre_table::{GameSession, SessionEvent};

#[test]
fn all_cpu_table_plays_a_full_game() {
    let mut session = GameSession::with_seed(Seat::One, 20260828);
    session.start().unwrap();

    let events = session.run_cpu_turns().unwrap();
    assert!(!events.is_empty());
    assert_eq!(session.state().phase(), GamePhase::GameOver);

    let scores = session.state().team_scores();
    assert!(
        scores[0] >= GAME_TARGET || scores[1] >= GAME_TARGET,
        "game ended without a winner: {scores:?}"
    );

    // The final event must be the hand that ended the game.
    let last = events.last().unwrap();
    assert!(matches!(
        last,
        SessionEvent::Played {
            outcome: PlayOutcome::HandCompleted {
                game_over: true,
                ..
            },
            ..
        }
    ));
}

#[test]
fn different_seeds_reach_game_over_too() {
    for seed in [1u64, 42, 9_000_000_000] {
        let mut session = GameSession::with_seed(Seat::Three, seed);
        session.start().unwrap();
        session.run_cpu_turns().unwrap();
        assert_eq!(
            session.state().phase(),
            GamePhase::GameOver,
            "seed {seed} did not finish"
        );
    }
}

#[test]
fn human_and_cpu_turns_interleave() {
    let mut session = GameSession::with_seed(Seat::One, 77);
    session.claim_seat(Seat::Four, "alice").unwrap();
    session.start().unwrap();

    // Seat Four opens the bidding; the bots cannot move until alice does.
    assert_eq!(session.pending_activation(), None);
    let (_, activation) = session.handle_bid("alice", Bid::Pass).unwrap();
    assert!(activation.is_some(), "cpu seat three should be due next");

    // Drive bots until the table waits on alice again or the hand resolves.
    let events = session.run_cpu_turns().unwrap();
    assert!(!events.is_empty());
    if session.state().phase() != GamePhase::GameOver {
        let waiting_on = session.state().current_seat();
        if let Some(seat) = waiting_on {
            assert!(
                !session.seats().is_cpu(seat),
                "run_cpu_turns stopped with a cpu still due"
            );
        }
    }
}

#[test]
fn log_stays_bounded_across_a_whole_game() {
    let mut session = GameSession::with_seed(Seat::Two, 4_242);
    session.start().unwrap();
    session.run_cpu_turns().unwrap();
    assert!(session.state().log().len() <= 20);
    assert!(!session.state().log().is_empty());
}
