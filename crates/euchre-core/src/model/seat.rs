use core::fmt;
use serde::{Deserialize, Serialize};

/// Table position, numbered 1-4 as players see them. Play proceeds
/// clockwise through the fixed cycle 1 -> 4 -> 3 -> 2 -> 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Seat {
    One = 1,
    Two = 2,
    Three = 3,
    Four = 4,
}

/// Fixed partnerships: seats 1 & 3 against seats 2 & 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Team {
    One = 0,
    Two = 1,
}

impl Seat {
    pub const ALL: [Seat; 4] = [Seat::One, Seat::Two, Seat::Three, Seat::Four];

    pub const fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Seat::One),
            2 => Some(Seat::Two),
            3 => Some(Seat::Three),
            4 => Some(Seat::Four),
            _ => None,
        }
    }

    pub const fn number(self) -> u8 {
        self as u8
    }

    pub const fn index(self) -> usize {
        (self as u8 - 1) as usize
    }

    /// The next seat in clockwise play order. The direction is load-bearing:
    /// dealer rotation and lead selection both assume this exact cycle.
    pub const fn next_clockwise(self) -> Seat {
        match self {
            Seat::One => Seat::Four,
            Seat::Four => Seat::Three,
            Seat::Three => Seat::Two,
            Seat::Two => Seat::One,
        }
    }

    pub const fn partner(self) -> Seat {
        match self {
            Seat::One => Seat::Three,
            Seat::Three => Seat::One,
            Seat::Two => Seat::Four,
            Seat::Four => Seat::Two,
        }
    }

    pub const fn team(self) -> Team {
        match self {
            Seat::One | Seat::Three => Team::One,
            Seat::Two | Seat::Four => Team::Two,
        }
    }
}

impl Team {
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn opponent(self) -> Team {
        match self {
            Team::One => Team::Two,
            Team::Two => Team::One,
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seat {}", self.number())
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Team::One => f.write_str("Team 1"),
            Team::Two => f.write_str("Team 2"),
        }
    }
}
