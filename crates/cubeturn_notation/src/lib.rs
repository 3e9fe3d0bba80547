//! Move notation parser and serializer.
//!
//! A script is a whitespace-separated list of tokens matching
//! `[UuDdLlRrFfBb]['2]?`. Uppercase letters turn the outer layer of a face.
//! Lowercase letters turn the second layer from that face and are only
//! meaningful on puzzles with at least four layers.

use std::fmt;
use std::str::FromStr;

use cubemath::Face;
use itertools::Itertools;
use regex::Regex;
use serde::{Deserialize, Serialize};

mod errors;

pub use errors::NotationError;

/// Suffix of a move token.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    /// Clockwise quarter turn (no suffix).
    #[default]
    None,
    /// Counterclockwise quarter turn (`'`).
    Prime,
    /// Half turn (`2`).
    Double,
}
impl Modifier {
    /// All modifiers, in the order they are drawn for scrambles.
    pub const ALL: [Modifier; 3] = [Modifier::None, Modifier::Prime, Modifier::Double];

    /// Returns the suffix for the modifier.
    pub const fn suffix(self) -> &'static str {
        match self {
            Modifier::None => "",
            Modifier::Prime => "'",
            Modifier::Double => "2",
        }
    }
    /// Returns the modifier that undoes this one.
    #[must_use]
    pub const fn inverse(self) -> Self {
        match self {
            Modifier::None => Modifier::Prime,
            Modifier::Prime => Modifier::None,
            Modifier::Double => Modifier::Double,
        }
    }
}

/// Single move token, such as `R`, `u'`, or `F2`.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct NotatedMove {
    /// Face whose layer is turned.
    pub face: Face,
    /// Whether the move turns the second layer from the face (lowercase).
    pub wide: bool,
    /// Direction or repetition of the turn.
    pub modifier: Modifier,
}
impl NotatedMove {
    /// Constructs an outer-layer move.
    pub const fn new(face: Face, modifier: Modifier) -> Self {
        Self {
            face,
            wide: false,
            modifier,
        }
    }
    /// Constructs a second-layer move.
    pub const fn wide(face: Face, modifier: Modifier) -> Self {
        Self {
            face,
            wide: true,
            modifier,
        }
    }

    /// Returns the face letter, lowercase for wide moves.
    pub const fn letter(self) -> char {
        match self.wide {
            true => self.face.symbol_lower(),
            false => self.face.symbol_upper(),
        }
    }
    /// Returns the move that undoes this one.
    #[must_use]
    pub const fn inverse(self) -> Self {
        Self {
            modifier: self.modifier.inverse(),
            ..self
        }
    }
}
impl fmt::Display for NotatedMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.letter(), self.modifier.suffix())
    }
}
impl FromStr for NotatedMove {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_move(s, 0)
    }
}

/// Parses a single token. `index` is the position of the token in its
/// script, used for error reporting.
fn parse_move(token: &str, index: usize) -> Result<NotatedMove, NotationError> {
    const MOVE_PATTERN: &str = r"^([UuDdLlRrFfBb])(['2]?)$";
    // match the whole string   ^                    $
    // capture a face letter     (              )
    // then capture an optional suffix           (['2]?)

    lazy_static::lazy_static! {
        static ref MOVE_REGEX: Regex = Regex::new(MOVE_PATTERN).expect("bad regex");
    }

    let invalid = || NotationError::InvalidToken {
        token: token.to_owned(),
        index,
    };

    let captures = MOVE_REGEX.captures(token).ok_or_else(invalid)?;
    let letter = captures[1].chars().next().ok_or_else(invalid)?;
    let face = Face::from_symbol(letter).ok_or_else(invalid)?;
    let modifier = match &captures[2] {
        "'" => Modifier::Prime,
        "2" => Modifier::Double,
        _ => Modifier::None,
    };
    Ok(NotatedMove {
        face,
        wide: letter.is_ascii_lowercase(),
        modifier,
    })
}

/// Parses a whitespace-separated sequence of moves.
///
/// Returns the first invalid token as an error. An empty or blank script
/// parses to an empty list.
pub fn parse_notation(s: &str) -> Result<Vec<NotatedMove>, NotationError> {
    s.split_whitespace()
        .enumerate()
        .map(|(i, token)| parse_move(token, i))
        .collect()
}

/// Formats a sequence of moves as a space-separated string.
pub fn format_notation(moves: impl IntoIterator<Item = NotatedMove>) -> String {
    moves.into_iter().join(" ")
}
