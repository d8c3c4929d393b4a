use crate::model::seat::Team;

/// First team to reach this total wins the game.
pub const GAME_TARGET: u8 = 10;

/// Points for taking all five tricks.
pub const MARCH_POINTS: u8 = 2;

/// Points for a 3- or 4-trick make.
pub const MAKE_POINTS: u8 = 1;

/// Points awarded to the defenders when the makers are euchred.
pub const EUCHRE_POINTS: u8 = 2;

/// Points for any successful lone hand (3 or more tricks). Table policy:
/// a lone make pays the march rate even below five tricks.
pub const ALONE_MAKE_POINTS: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandResult {
    March { alone: bool },
    Made { alone: bool },
    Euchred,
}

/// Outcome of a completed hand: which team scored, how much, and why.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandScore {
    pub maker_team: Team,
    pub winning_team: Team,
    pub result: HandResult,
    pub points: [u8; 2],
}

/// Applies the scoring table to the tricks each team took this hand.
pub fn score_hand(team_tricks: [u8; 2], maker_team: Team, alone: bool) -> HandScore {
    let maker_tricks = team_tricks[maker_team.index()];
    let mut points = [0u8; 2];

    let (result, winning_team) = if maker_tricks >= 3 {
        let result = if maker_tricks == 5 {
            HandResult::March { alone }
        } else {
            HandResult::Made { alone }
        };
        let award = match result {
            HandResult::March { alone: true } | HandResult::Made { alone: true } => {
                ALONE_MAKE_POINTS
            }
            HandResult::March { alone: false } => MARCH_POINTS,
            HandResult::Made { alone: false } => MAKE_POINTS,
            HandResult::Euchred => unreachable!(),
        };
        points[maker_team.index()] = award;
        (result, maker_team)
    } else {
        points[maker_team.opponent().index()] = EUCHRE_POINTS;
        (HandResult::Euchred, maker_team.opponent())
    };

    HandScore {
        maker_team,
        winning_team,
        result,
        points,
    }
}

#[cfg(test)]
mod tests {
    use super::{HandResult, score_hand};
    use crate::model::seat::Team;

    #[test]
    fn march_scores_two_points() {
        let score = score_hand([5, 0], Team::One, false);
        assert_eq!(score.result, HandResult::March { alone: false });
        assert_eq!(score.points, [2, 0]);
        assert_eq!(score.winning_team, Team::One);
    }

    #[test]
    fn standard_make_scores_one_point() {
        let score = score_hand([1, 4], Team::Two, false);
        assert_eq!(score.result, HandResult::Made { alone: false });
        assert_eq!(score.points, [0, 1]);
    }

    #[test]
    fn lone_march_scores_four_points() {
        let score = score_hand([5, 0], Team::One, true);
        assert_eq!(score.result, HandResult::March { alone: true });
        assert_eq!(score.points, [4, 0]);
    }

    #[test]
    fn lone_three_trick_make_also_scores_four() {
        let score = score_hand([3, 2], Team::One, true);
        assert_eq!(score.result, HandResult::Made { alone: true });
        assert_eq!(score.points, [4, 0]);
    }

    #[test]
    fn euchre_awards_defenders_two_points() {
        let score = score_hand([2, 3], Team::One, false);
        assert_eq!(score.result, HandResult::Euchred);
        assert_eq!(score.points, [0, 2]);
        assert_eq!(score.winning_team, Team::Two);
    }

    #[test]
    fn lone_euchre_still_pays_defenders_two() {
        let score = score_hand([1, 4], Team::One, true);
        assert_eq!(score.result, HandResult::Euchred);
        assert_eq!(score.points, [0, 2]);
    }
}
