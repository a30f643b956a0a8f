use std::fmt;
use std::str::FromStr;

use crate::error::ReplayError;

/// Number of squares on the board.
pub const NUM_SQUARES: usize = 64;

/// Chess square (0-63: a1=0, h1=7, a8=56, h8=63)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    pub const fn new(value: u8) -> Option<Self> {
        if value < NUM_SQUARES as u8 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Fallible constructor for indices coming from outside the crate.
    pub fn try_new(value: u8) -> Result<Self, ReplayError> {
        Self::new(value).ok_or(ReplayError::InvalidSquare(value))
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Zero-based rank, 0 = rank 1.
    pub const fn row(self) -> u8 {
        self.0 / 8
    }

    /// Zero-based file, 0 = file a.
    pub const fn column(self) -> u8 {
        self.0 % 8
    }

    pub const fn file_char(self) -> char {
        (b'a' + self.column()) as char
    }

    pub const fn rank_char(self) -> char {
        (b'1' + self.row()) as char
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl FromStr for Square {
    type Err = ReplayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(file @ 'a'..='h'), Some(rank @ '1'..='8'), None) => {
                let column = file as u8 - b'a';
                let row = rank as u8 - b'1';
                Ok(Self(row * 8 + column))
            }
            _ => Err(ReplayError::MalformedNotation(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0, "a1")]
    #[test_case(7, "h1")]
    #[test_case(28, "e4")]
    #[test_case(56, "a8")]
    #[test_case(63, "h8")]
    fn name_round_trip(index: u8, name: &str) {
        let square = Square::new(index).expect("index in range");
        assert_eq!(square.to_string(), name);
        assert_eq!(name.parse::<Square>(), Ok(square));
    }

    #[test]
    fn rejects_out_of_range_index() {
        assert_eq!(Square::new(64), None);
        assert_eq!(Square::try_new(64), Err(ReplayError::InvalidSquare(64)));
    }

    #[test_case(""; "empty")]
    #[test_case("e"; "file only")]
    #[test_case("e9"; "rank out of range")]
    #[test_case("i4"; "file out of range")]
    #[test_case("e44"; "too long")]
    fn rejects_bad_names(name: &str) {
        assert!(name.parse::<Square>().is_err());
    }

    #[test]
    fn coords_match_index_arithmetic() {
        let square = Square::new(28).expect("in range");
        assert_eq!(square.index(), 28);
        assert_eq!(square.row(), 3);
        assert_eq!(square.column(), 4);
    }
}
