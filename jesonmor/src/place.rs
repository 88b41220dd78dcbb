use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A cell on the board, addressed by column `x` and row `y`.
///
/// Places are not checked against the board size on construction, so
/// move generation can produce off-board candidates and leave it to the
/// [boundary rule](crate::Rule::OutOfBoundary) to reject them.
///
/// Serializes to its text form, e.g. `"a1"`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Place {
    x: i32,
    y: i32,
}

impl Place {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    /// The place shifted by `(dx, dy)`, which may be off the board.
    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// The L1 distance between two places.
    pub fn manhattan_distance(&self, other: Place) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    pub fn is_within(&self, size: usize) -> bool {
        let size = size as i64;
        (0..size).contains(&i64::from(self.x)) && (0..size).contains(&i64::from(self.y))
    }
}

/// Column letter followed by the 1-based row, e.g. `a1` for `(0, 0)`.
impl std::fmt::Display for Place {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match u8::try_from(self.x).ok().filter(|&x| x < 26) {
            Some(x) => write!(f, "{}{}", char::from(b'a' + x), i64::from(self.y) + 1),
            None => write!(f, "({}, {})", self.x, self.y),
        }
    }
}

/// The error type for the [`FromStr`] instance of [`Place`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaceFromStrErr {
    Empty,
    InvalidColumn,
    InvalidRow,
}

impl std::error::Error for PlaceFromStrErr {}

impl std::fmt::Display for PlaceFromStrErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlaceFromStrErr::Empty => write!(f, "No place was given"),
            PlaceFromStrErr::InvalidColumn => {
                write!(f, "A place must start with a column letter from 'a' to 'z'")
            }
            PlaceFromStrErr::InvalidRow => {
                write!(f, "The column letter must be followed by a row number of at least 1")
            }
        }
    }
}

impl FromStr for Place {
    type Err = PlaceFromStrErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let column = chars.next().ok_or(PlaceFromStrErr::Empty)?;
        if !column.is_ascii_alphabetic() {
            return Err(PlaceFromStrErr::InvalidColumn);
        }
        let x = i32::from(column.to_ascii_lowercase() as u8 - b'a');
        let row: i32 = chars
            .as_str()
            .parse()
            .map_err(|_| PlaceFromStrErr::InvalidRow)?;
        if row < 1 {
            return Err(PlaceFromStrErr::InvalidRow);
        }
        Ok(Place::new(x, row - 1))
    }
}

impl From<Place> for String {
    fn from(place: Place) -> Self {
        place.to_string()
    }
}

impl TryFrom<String> for Place {
    type Error = PlaceFromStrErr;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Moving whatever piece is at `source` to `destination`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    source: Place,
    destination: Place,
}

impl Move {
    pub const fn new(source: Place, destination: Place) -> Self {
        Self {
            source,
            destination,
        }
    }

    pub fn source(&self) -> Place {
        self.source
    }

    pub fn destination(&self) -> Place {
        self.destination
    }

    /// The L1 distance travelled by this move.
    pub fn distance(&self) -> u32 {
        self.source.manhattan_distance(self.destination)
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}->{}", self.source, self.destination)
    }
}

/// The error type for the [`FromStr`] instance of [`Move`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveFromStrErr {
    MissingDestination,
    InvalidSource(PlaceFromStrErr),
    InvalidDestination(PlaceFromStrErr),
}

impl std::error::Error for MoveFromStrErr {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MoveFromStrErr::MissingDestination => None,
            MoveFromStrErr::InvalidSource(err) | MoveFromStrErr::InvalidDestination(err) => {
                Some(err)
            }
        }
    }
}

impl std::fmt::Display for MoveFromStrErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveFromStrErr::MissingDestination => {
                write!(f, "Expected a move of the form 'a1->b3'")
            }
            MoveFromStrErr::InvalidSource(err) => write!(f, "Invalid source: {}", err),
            MoveFromStrErr::InvalidDestination(err) => write!(f, "Invalid destination: {}", err),
        }
    }
}

/// Accepts `a1->b3` as well as `a1 b3`.
impl FromStr for Move {
    type Err = MoveFromStrErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (source, destination) = s
            .split_once("->")
            .or_else(|| s.split_once(char::is_whitespace))
            .ok_or(MoveFromStrErr::MissingDestination)?;
        let source = source.parse().map_err(MoveFromStrErr::InvalidSource)?;
        let destination = destination
            .parse()
            .map_err(MoveFromStrErr::InvalidDestination)?;
        Ok(Move::new(source, destination))
    }
}

/// Shorthand for creating places from their text form.
///
/// This macro is just calling the [`FromStr`] instance of [`Place`].
/// ```
/// # use jesonmor::{place, Place};
/// assert_eq!(place!("c2"), Place::new(2, 1));
/// ```
#[macro_export]
macro_rules! place {
    ($s:literal) => {
        <$crate::Place as std::str::FromStr>::from_str($s)
            .expect("Invalid place given to place! macro")
    };
}
#[allow(unused_imports)]
pub(crate) use place;

/// Shorthand for creating moves, e.g. `mv!("a1->b3")`.
#[macro_export]
macro_rules! mv {
    ($s:literal) => {
        <$crate::Move as std::str::FromStr>::from_str($s)
            .expect("Invalid move given to mv! macro")
    };
}
#[allow(unused_imports)]
pub(crate) use mv;
