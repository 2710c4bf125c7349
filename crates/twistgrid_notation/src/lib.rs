//! Translation of face-turn (Singmaster) notation into twistgrid turn codes.
//!
//! Only the six outer face turns of a 3×3×3 arrangement are understood:
//!
//! | Move | Turn code |
//! |------|-----------|
//! | `R`  | `x0`      |
//! | `L`  | `x2'`     |
//! | `U`  | `y0`      |
//! | `D`  | `y2'`     |
//! | `F`  | `z0`      |
//! | `B`  | `z2'`     |
//!
//! Only the last character of a move is significant: a trailing `'` reverses
//! the direction and a trailing `2` doubles the turn. Anything else after the
//! letter is ignored, so `R2'` is a single reversed turn and `R'2` is a double
//! turn. Move letters are case-insensitive.

#[macro_use]
extern crate lazy_static;

use regex::Regex;
use smallvec::{SmallVec, smallvec};
use thiserror::Error;
use twistgrid_core::{Axis, TurnCode, TurnDirection};

/// Notation to translate: either a single whitespace-delimited string or a
/// list of separate moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notation<'a>(Vec<&'a str>);

impl<'a> Notation<'a> {
    /// Returns the individual move tokens.
    pub fn tokens(&self) -> &[&'a str] {
        &self.0
    }
}

impl<'a> From<&'a str> for Notation<'a> {
    fn from(value: &'a str) -> Self {
        Self(value.split_whitespace().collect())
    }
}
impl<'a> From<&'a String> for Notation<'a> {
    fn from(value: &'a String) -> Self {
        Self::from(value.as_str())
    }
}
impl<'a> From<&'a [&'a str]> for Notation<'a> {
    fn from(value: &'a [&'a str]) -> Self {
        Self(value.iter().map(|s| s.trim()).collect())
    }
}
impl<'a, const N: usize> From<&'a [&'a str; N]> for Notation<'a> {
    fn from(value: &'a [&'a str; N]) -> Self {
        Self::from(value.as_slice())
    }
}
impl<'a> From<&'a [String]> for Notation<'a> {
    fn from(value: &'a [String]) -> Self {
        Self(value.iter().map(|s| s.trim()).collect())
    }
}
impl<'a> From<&'a Vec<String>> for Notation<'a> {
    fn from(value: &'a Vec<String>) -> Self {
        Self::from(value.as_slice())
    }
}

/// Move that could not be translated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidNotation {
    /// The letter does not name a face turn.
    #[error("unknown move {0:?}")]
    UnknownMove(String),
    /// The token is empty.
    #[error("empty move")]
    Empty,
}

/// Error returned by [`translate_notation`], carrying every turn translated
/// before the first invalid move.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid notation at move {position}: {error}")]
pub struct TranslateError {
    /// Index of the invalid move in the token list.
    pub position: usize,
    /// What was wrong with it.
    #[source]
    pub error: InvalidNotation,
    /// Turn codes for the moves before the invalid one.
    pub partial: Vec<TurnCode>,
}

/// Translates notation into turn codes, stopping at the first invalid move.
pub fn translate_notation<'a>(input: impl Into<Notation<'a>>) -> Result<Vec<TurnCode>, TranslateError> {
    let mut ret = vec![];
    for (position, token) in input.into().tokens().iter().enumerate() {
        match translate_move(token) {
            Ok(codes) => ret.extend(codes),
            Err(error) => {
                return Err(TranslateError {
                    position,
                    error,
                    partial: ret,
                });
            }
        }
    }
    Ok(ret)
}

/// Translates notation into turn codes, skipping invalid moves with a warning.
pub fn translate_notation_lossy<'a>(input: impl Into<Notation<'a>>) -> Vec<TurnCode> {
    let mut ret = vec![];
    for token in input.into().tokens() {
        match translate_move(token) {
            Ok(codes) => ret.extend(codes),
            Err(e) => log::warn!("skipping move: {e}"),
        }
    }
    ret
}

/// Translates a single move. A double move yields two codes.
pub fn translate_move(s: &str) -> Result<SmallVec<[TurnCode; 2]>, InvalidNotation> {
    const MOVE_PATTERN: &str = r"^([A-Za-z])(.*)$";
    // match the whole string    ^            $
    // capture one letter         ([A-Za-z])
    // then capture the suffix              (.*)

    lazy_static! {
        static ref MOVE_REGEX: Regex = Regex::new(MOVE_PATTERN).expect("bad regex");
    }

    let captures = MOVE_REGEX.captures(s).ok_or_else(|| {
        if s.is_empty() {
            InvalidNotation::Empty
        } else {
            InvalidNotation::UnknownMove(s.to_owned())
        }
    })?;
    let letter = captures[1].chars().next().unwrap_or_default();
    let base = face_turn(letter).ok_or_else(|| InvalidNotation::UnknownMove(s.to_owned()))?;

    let suffix = &captures[2];
    let prime = suffix.ends_with('\'');
    let double = suffix.ends_with('2');
    let code = if prime { base.inverse() } else { base };
    Ok(if double { smallvec![code, code] } else { smallvec![code] })
}

/// Returns the turn code for an unprimed face turn.
fn face_turn(letter: char) -> Option<TurnCode> {
    use TurnDirection::{Clockwise as Cw, Counterclockwise as Ccw};

    let (axis, index, direction) = match letter.to_ascii_uppercase() {
        'R' => (Axis::X, 0, Cw),
        'L' => (Axis::X, 2, Ccw),
        'U' => (Axis::Y, 0, Cw),
        'D' => (Axis::Y, 2, Ccw),
        'F' => (Axis::Z, 0, Cw),
        'B' => (Axis::Z, 2, Ccw),
        _ => return None,
    };
    Some(TurnCode::new(axis, index, direction))
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;

    fn codes(s: &str) -> String {
        translate_notation(s).unwrap().iter().join(" ")
    }

    #[test]
    fn test_single_moves() {
        assert_eq!(codes("R"), "x0");
        assert_eq!(codes("R'"), "x0'");
        assert_eq!(codes("R2"), "x0 x0");
        assert_eq!(codes("L"), "x2'");
        assert_eq!(codes("L'"), "x2");
        assert_eq!(codes("U D' F B"), "y0 y2 z0 z2'");
        assert_eq!(codes("B2"), "z2' z2'");
    }

    #[test]
    fn test_only_last_suffix_character_counts() {
        assert_eq!(codes("R2'"), "x0'");
        assert_eq!(codes("R'2"), "x0 x0");
        assert_eq!(codes("B2'"), "z2");
        assert_eq!(codes("L'2"), "x2' x2'");
        assert_eq!(codes("R3"), "x0");
        assert_eq!(codes("U''"), "y0'");
    }

    #[test]
    fn test_lowercase_and_whitespace() {
        assert_eq!(codes("  r  u'\tf2 "), "x0 y0' z0 z0");
        assert_eq!(codes(""), "");
    }

    #[test]
    fn test_token_list() {
        let moves = ["R", "U'"];
        assert_eq!(translate_notation(&moves).unwrap().iter().join(" "), "x0 y0'");
        let owned = vec!["F2".to_owned()];
        assert_eq!(translate_notation(&owned).unwrap().iter().join(" "), "z0 z0");
        // An empty token in a list is an error, not a no-op.
        let moves: &[&str] = &["R", ""];
        assert_eq!(translate_notation(moves).unwrap_err().error, InvalidNotation::Empty);
    }

    #[test]
    fn test_invalid_aborts_with_partial() {
        let err = translate_notation("R U X F").unwrap_err();
        assert_eq!(err.position, 2);
        assert_eq!(err.error, InvalidNotation::UnknownMove("X".to_owned()));
        assert_eq!(err.partial.iter().join(" "), "x0 y0");

        let err = translate_notation("2R").unwrap_err();
        assert_eq!(err.error, InvalidNotation::UnknownMove("2R".to_owned()));
        assert!(err.partial.is_empty());

        assert!(translate_notation("' R").is_err());
    }

    #[test]
    fn test_lossy_skips_invalid() {
        let codes = translate_notation_lossy("R Q 2 F");
        assert_eq!(codes.iter().join(" "), "x0 z0");
    }

    proptest! {
        #[test]
        fn proptest_prime_undoes_move(letter in "[RLUDFBrludfb]") {
            let forward = translate_notation(letter.as_str()).unwrap();
            let backward = translate_notation(format!("{letter}'").as_str()).unwrap();
            prop_assert_eq!(forward.len(), 1);
            prop_assert!(forward[0].is_inverse_of(backward[0]));
        }
    }
}
