use core::fmt;
use euchre_core::model::seat::Seat;
use serde::Serialize;

/// Who holds a seat at the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "id")]
pub enum Occupant {
    Human(String),
    Cpu,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeatError {
    SeatTaken(Seat),
    AlreadySeated { player: String, seat: Seat },
}

impl fmt::Display for SeatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeatError::SeatTaken(seat) => write!(f, "{seat} is already occupied"),
            SeatError::AlreadySeated { player, seat } => {
                write!(f, "player {player} already holds {seat}")
            }
        }
    }
}

impl std::error::Error for SeatError {}

/// Maps the four table seats to the players (or bots) holding them.
/// Partnerships are fixed by position, so seating decides the teams.
#[derive(Debug, Clone, Default)]
pub struct SeatMap {
    seats: [Option<Occupant>; 4],
}

impl SeatMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn occupant(&self, seat: Seat) -> Option<&Occupant> {
        self.seats[seat.index()].as_ref()
    }

    pub fn seat_of(&self, player: &str) -> Option<Seat> {
        Seat::ALL.into_iter().find(|seat| {
            matches!(
                self.occupant(*seat),
                Some(Occupant::Human(id)) if id == player
            )
        })
    }

    pub fn is_cpu(&self, seat: Seat) -> bool {
        matches!(self.occupant(seat), Some(Occupant::Cpu))
    }

    /// Claims a specific seat for a human player.
    pub fn claim(&mut self, seat: Seat, player: impl Into<String>) -> Result<(), SeatError> {
        let player = player.into();
        if let Some(held) = self.seat_of(&player) {
            return Err(SeatError::AlreadySeated { player, seat: held });
        }
        if self.seats[seat.index()].is_some() {
            return Err(SeatError::SeatTaken(seat));
        }
        self.seats[seat.index()] = Some(Occupant::Human(player));
        Ok(())
    }

    /// Seats a player at the first open seat, in table order.
    pub fn claim_first_open(&mut self, player: impl Into<String>) -> Result<Seat, SeatError> {
        let player = player.into();
        if let Some(held) = self.seat_of(&player) {
            return Err(SeatError::AlreadySeated { player, seat: held });
        }
        for seat in Seat::ALL {
            if self.seats[seat.index()].is_none() {
                self.seats[seat.index()] = Some(Occupant::Human(player));
                return Ok(seat);
            }
        }
        Err(SeatError::SeatTaken(Seat::Four))
    }

    /// Removes a human player, leaving their seat open. Returns the freed
    /// seat when the player was seated.
    pub fn release(&mut self, player: &str) -> Option<Seat> {
        let seat = self.seat_of(player)?;
        self.seats[seat.index()] = None;
        Some(seat)
    }

    /// Puts a bot in every open seat so a game can start.
    pub fn fill_with_cpus(&mut self) {
        for slot in &mut self.seats {
            if slot.is_none() {
                *slot = Some(Occupant::Cpu);
            }
        }
    }

    pub fn human_count(&self) -> usize {
        self.seats
            .iter()
            .filter(|slot| matches!(slot, Some(Occupant::Human(_))))
            .count()
    }

    pub fn is_full(&self) -> bool {
        self.seats.iter().all(Option::is_some)
    }
}

#[cfg(test)]
mod tests {
    use super::{Occupant, SeatError, SeatMap};
    use euchre_core::model::seat::{Seat, Team};

    #[test]
    fn claim_and_lookup_round_trip() {
        let mut map = SeatMap::new();
        map.claim(Seat::Two, "alice").unwrap();
        assert_eq!(map.seat_of("alice"), Some(Seat::Two));
        assert_eq!(
            map.occupant(Seat::Two),
            Some(&Occupant::Human("alice".to_string()))
        );
        assert!(!map.is_cpu(Seat::Two));
    }

    #[test]
    fn taken_seat_is_rejected() {
        let mut map = SeatMap::new();
        map.claim(Seat::One, "alice").unwrap();
        assert_eq!(
            map.claim(Seat::One, "bob"),
            Err(SeatError::SeatTaken(Seat::One))
        );
    }

    #[test]
    fn double_seating_is_rejected() {
        let mut map = SeatMap::new();
        map.claim(Seat::One, "alice").unwrap();
        let err = map.claim(Seat::Three, "alice").unwrap_err();
        assert_eq!(
            err,
            SeatError::AlreadySeated {
                player: "alice".to_string(),
                seat: Seat::One
            }
        );
    }

    #[test]
    fn cpus_fill_the_open_seats() {
        let mut map = SeatMap::new();
        map.claim(Seat::One, "alice").unwrap();
        map.fill_with_cpus();
        assert!(map.is_full());
        assert_eq!(map.human_count(), 1);
        for seat in [Seat::Two, Seat::Three, Seat::Four] {
            assert!(map.is_cpu(seat));
        }
    }

    #[test]
    fn seating_determines_the_teams() {
        let mut map = SeatMap::new();
        let a = map.claim_first_open("alice").unwrap();
        let b = map.claim_first_open("bob").unwrap();
        let c = map.claim_first_open("carol").unwrap();
        assert_eq!(a.team(), Team::One);
        assert_eq!(b.team(), Team::Two);
        assert_eq!(c.team(), Team::One);
        assert_eq!(a.partner(), c);
    }

    #[test]
    fn release_frees_the_seat() {
        let mut map = SeatMap::new();
        map.claim(Seat::Four, "alice").unwrap();
        assert_eq!(map.release("alice"), Some(Seat::Four));
        assert_eq!(map.release("alice"), None);
        assert!(map.occupant(Seat::Four).is_none());
    }
}
