//! Move notation.
//!
//! Single moves use the 18-token quarter-turn vocabulary `U U' D D' L L' R R'
//! F F' B B' M M' E E' S S'`. Sequences additionally accept double turns such
//! as `R2`, which always decompose into two identical quarter turns.

use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};

use crate::{MoveError, Sign};

/// Layer that a move turns.
#[derive(
    Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter,
)]
pub enum Layer {
    /// Up face
    U,
    /// Down face
    D,
    /// Left face
    L,
    /// Right face
    R,
    /// Front face
    F,
    /// Back face
    B,
    /// Middle slice between L and R, turning like L
    M,
    /// Equatorial slice between U and D, turning like D
    E,
    /// Standing slice between F and B, turning like F
    S,
}
impl Layer {
    /// Returns the letter used in notation.
    pub const fn letter(self) -> char {
        match self {
            Layer::U => 'U',
            Layer::D => 'D',
            Layer::L => 'L',
            Layer::R => 'R',
            Layer::F => 'F',
            Layer::B => 'B',
            Layer::M => 'M',
            Layer::E => 'E',
            Layer::S => 'S',
        }
    }
    /// Parses a layer letter.
    pub fn from_letter(c: char) -> Option<Self> {
        match c {
            'U' => Some(Layer::U),
            'D' => Some(Layer::D),
            'L' => Some(Layer::L),
            'R' => Some(Layer::R),
            'F' => Some(Layer::F),
            'B' => Some(Layer::B),
            'M' => Some(Layer::M),
            'E' => Some(Layer::E),
            'S' => Some(Layer::S),
            _ => None,
        }
    }

    /// Returns the axis, slice, and turn direction of the unprimed move.
    ///
    /// Unprimed moves are clockwise when looking at the face; slices follow
    /// the face named in their doc comment.
    const fn unprimed(self) -> (usize, u8, Sign) {
        match self {
            Layer::L => (0, 0, Sign::Pos),
            Layer::M => (0, 1, Sign::Pos),
            Layer::R => (0, 2, Sign::Neg),
            Layer::D => (1, 0, Sign::Pos),
            Layer::E => (1, 1, Sign::Pos),
            Layer::U => (1, 2, Sign::Neg),
            Layer::B => (2, 0, Sign::Pos),
            Layer::S => (2, 1, Sign::Neg),
            Layer::F => (2, 2, Sign::Neg),
        }
    }
    /// Returns the layer turned by a move on `axis` and `slice`.
    const fn from_axis_slice(axis: usize, slice: u8) -> Option<Self> {
        match (axis, slice) {
            (0, 0) => Some(Layer::L),
            (0, 1) => Some(Layer::M),
            (0, 2) => Some(Layer::R),
            (1, 0) => Some(Layer::D),
            (1, 1) => Some(Layer::E),
            (1, 2) => Some(Layer::U),
            (2, 0) => Some(Layer::B),
            (2, 1) => Some(Layer::S),
            (2, 2) => Some(Layer::F),
            _ => None,
        }
    }
}

/// Quarter turn of one layer.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    /// Layer to turn.
    pub layer: Layer,
    /// Whether the turn is counterclockwise (written with `'`).
    pub prime: bool,
}
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.layer.letter())?;
        if self.prime {
            write!(f, "'")?;
        }
        Ok(())
    }
}
impl FromStr for Move {
    type Err = MoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || MoveError::UnknownMove(s.to_owned());
        let mut chars = s.chars();
        let layer = chars.next().and_then(Layer::from_letter).ok_or_else(unknown)?;
        let prime = match chars.as_str() {
            "" => false,
            "'" => true,
            _ => return Err(unknown()),
        };
        Ok(Move { layer, prime })
    }
}
impl Move {
    /// Every quarter turn in the vocabulary.
    pub const ALL: [Move; 18] = [
        Move::new(Layer::U, false),
        Move::new(Layer::U, true),
        Move::new(Layer::D, false),
        Move::new(Layer::D, true),
        Move::new(Layer::L, false),
        Move::new(Layer::L, true),
        Move::new(Layer::R, false),
        Move::new(Layer::R, true),
        Move::new(Layer::F, false),
        Move::new(Layer::F, true),
        Move::new(Layer::B, false),
        Move::new(Layer::B, true),
        Move::new(Layer::M, false),
        Move::new(Layer::M, true),
        Move::new(Layer::E, false),
        Move::new(Layer::E, true),
        Move::new(Layer::S, false),
        Move::new(Layer::S, true),
    ];

    /// Constructs a move.
    pub const fn new(layer: Layer, prime: bool) -> Self {
        Self { layer, prime }
    }
    /// Returns the inverse move.
    #[must_use]
    pub const fn rev(self) -> Self {
        Self::new(self.layer, !self.prime)
    }
    /// Returns whether this turns an outer face rather than a middle slice.
    pub const fn is_face_turn(self) -> bool {
        !matches!(self.layer, Layer::M | Layer::E | Layer::S)
    }

    /// Decodes the move into the axis, slice, and direction of the turn.
    pub const fn pending(self) -> PendingMove {
        let (axis, slice, direction) = self.layer.unprimed();
        let direction = match (self.prime, direction) {
            (false, d) => d,
            (true, Sign::Neg) => Sign::Pos,
            (true, Sign::Pos) => Sign::Neg,
        };
        PendingMove {
            axis,
            slice,
            direction,
        }
    }
}

/// Quarter turn in flight, decoded into an axis, a slice along that axis, and
/// a direction.
///
/// Only constructed from a [`Move`], and serialized as one, so the axis and
/// slice are always in the range `0..3`.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(from = "Move", into = "Move")]
pub struct PendingMove {
    axis: usize,
    slice: u8,
    direction: Sign,
}
impl fmt::Display for PendingMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_move())
    }
}
impl From<Move> for PendingMove {
    fn from(mv: Move) -> Self {
        mv.pending()
    }
}
impl From<PendingMove> for Move {
    fn from(pending: PendingMove) -> Self {
        pending.to_move()
    }
}
impl PendingMove {
    /// Returns the axis of rotation: 0 for X, 1 for Y, 2 for Z.
    pub fn axis(self) -> usize {
        self.axis
    }
    /// Returns the slice along the axis, in the range `0..3`.
    pub fn slice(self) -> u8 {
        self.slice
    }
    /// Returns the direction of rotation.
    pub fn direction(self) -> Sign {
        self.direction
    }
    /// Returns the inverse turn.
    #[must_use]
    pub fn rev(self) -> Self {
        Self {
            direction: -self.direction,
            ..self
        }
    }
    /// Returns the named move that decodes to this turn. Every
    /// `(axis, slice, direction)` combination has exactly one name.
    pub fn to_move(self) -> Move {
        let layer = Layer::from_axis_slice(self.axis, self.slice);
        debug_assert!(layer.is_some(), "bad turn {self:?}");
        let layer = layer.unwrap_or(Layer::M);
        let (_, _, unprimed_direction) = layer.unprimed();
        Move::new(layer, self.direction != unprimed_direction)
    }
}

/// Single token in a move sequence: a quarter turn, or a double turn of a
/// layer.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    /// Quarter turn.
    pub mv: Move,
    /// Whether the quarter turn is done twice (written with `2`).
    pub double: bool,
}
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.double {
            true => write!(f, "{}2", self.mv.layer.letter()),
            false => write!(f, "{}", self.mv),
        }
    }
}
impl FromStr for Token {
    type Err = MoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_suffix('2') {
            Some(base) => match base.parse::<Move>() {
                Ok(mv) if !mv.prime => Ok(Token { mv, double: true }),
                _ => Err(MoveError::UnknownMove(s.to_owned())),
            },
            None => Ok(Token {
                mv: s.parse()?,
                double: false,
            }),
        }
    }
}
impl From<Move> for Token {
    fn from(mv: Move) -> Self {
        Token { mv, double: false }
    }
}
impl Token {
    /// Returns the quarter turns that make up the token.
    pub fn quarter_turns(self) -> SmallVec<[Move; 2]> {
        match self.double {
            true => smallvec![self.mv, self.mv],
            false => smallvec![self.mv],
        }
    }
    /// Returns the inverse token.
    #[must_use]
    pub fn rev(self) -> Self {
        match self.double {
            true => self,
            false => Token::from(self.mv.rev()),
        }
    }
}

/// Sequence of move tokens, written separated by whitespace. Serializes to a
/// string like `"R U2 F'"`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct MoveSequence(pub Vec<Token>);
impl Serialize for MoveSequence {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_string().serialize(serializer)
    }
}
impl<'de> Deserialize<'de> for MoveSequence {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
impl fmt::Display for MoveSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.iter().join(" "))
    }
}
impl FromStr for MoveSequence {
    type Err = MoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split_whitespace().map(str::parse::<Token>).collect()
    }
}
impl FromIterator<Token> for MoveSequence {
    fn from_iter<T: IntoIterator<Item = Token>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
impl MoveSequence {
    /// Returns the number of tokens in the sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }
    /// Returns whether the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    /// Returns the tokens of the sequence.
    pub fn tokens(&self) -> &[Token] {
        &self.0
    }
    /// Returns the sequence as quarter turns, with double turns expanded.
    pub fn quarter_turns(&self) -> impl Iterator<Item = Move> + '_ {
        self.0.iter().flat_map(|token| token.quarter_turns())
    }
    /// Returns the sequence that undoes this one.
    #[must_use]
    pub fn inverse(&self) -> Self {
        self.0.iter().rev().map(|token| token.rev()).collect()
    }
    /// Returns the token strings, for submission to a move queue.
    pub fn to_strings(&self) -> Vec<String> {
        self.0.iter().map(|token| token.to_string()).collect()
    }
}

/// Replaces each double-turn token such as `R2` with two quarter-turn tokens.
/// Every other token, including unrecognized ones, is kept as-is.
pub fn expand_double_turns<S: AsRef<str>>(tokens: impl IntoIterator<Item = S>) -> Vec<String> {
    let mut ret = vec![];
    for token in tokens {
        let token = token.as_ref();
        match token.parse::<Token>() {
            Ok(parsed) if parsed.double => {
                ret.extend(parsed.quarter_turns().iter().map(|mv| mv.to_string()));
            }
            _ => ret.push(token.to_owned()),
        }
    }
    ret
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_vocabulary() {
        let names = Move::ALL.iter().map(|mv| mv.to_string()).collect_vec();
        assert_eq!(
            "U U' D D' L L' R R' F F' B B' M M' E E' S S'",
            names.join(" "),
        );
        for name in &names {
            assert_eq!(name, &name.parse::<Move>().unwrap().to_string());
        }
        for bad in ["", "X", "R2", "R''", "r", "U '", "Rw"] {
            assert_eq!(
                Err(MoveError::UnknownMove(bad.to_owned())),
                bad.parse::<Move>(),
            );
        }
    }

    #[test]
    fn test_decoding_table() {
        let pending = |s: &str| {
            let p = s.parse::<Move>().unwrap().pending();
            (p.axis(), p.slice(), p.direction())
        };
        assert_eq!((0, 2, Sign::Neg), pending("R"));
        assert_eq!((0, 0, Sign::Pos), pending("L"));
        assert_eq!((1, 2, Sign::Neg), pending("U"));
        assert_eq!((1, 0, Sign::Neg), pending("D'"));
        assert_eq!((2, 2, Sign::Pos), pending("F'"));
        assert_eq!((0, 1, Sign::Pos), pending("M"));
        assert_eq!((1, 1, Sign::Neg), pending("E'"));
        assert_eq!((2, 1, Sign::Neg), pending("S"));
    }

    #[test]
    fn test_pending_move_names_are_bijective() {
        for mv in Move::ALL {
            assert_eq!(mv, mv.pending().to_move());
            assert_eq!(mv.rev(), mv.pending().rev().to_move());
        }
        let distinct = Move::ALL.iter().map(|mv| mv.pending()).unique().count();
        assert_eq!(18, distinct);
        assert_eq!(9, Layer::iter().count());
    }

    #[test]
    fn test_pending_move_serde() {
        let pending: PendingMove = "S'".parse::<Move>().unwrap().pending();
        let json = serde_json::to_string(&pending).unwrap();
        assert_eq!(r#"{"layer":"S","prime":true}"#, json);
        assert_eq!(pending, serde_json::from_str(&json).unwrap());

        let raw = r#"{"axis":7,"slice":9,"direction":"pos"}"#;
        assert!(serde_json::from_str::<PendingMove>(raw).is_err());
    }

    #[test]
    fn test_sequences() {
        let seq: MoveSequence = "R U2 F' M2".parse().unwrap();
        assert_eq!("R U2 F' M2", seq.to_string());
        assert_eq!(
            "R U U F' M M",
            seq.quarter_turns().map(|mv| mv.to_string()).join(" "),
        );
        assert_eq!("M2 F U2 R'", seq.inverse().to_string());
        assert!("R U2' F".parse::<MoveSequence>().is_err());
        assert_eq!(MoveSequence::default(), "  ".parse().unwrap());
    }

    #[test]
    fn test_expand_double_turns() {
        assert_eq!(
            vec!["R", "R", "U'", "x", "S", "S"],
            expand_double_turns(["R2", "U'", "x", "S2"]),
        );
    }
}
