use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Color, Sign};

/// Face of the puzzle.
///
/// The declaration order (Up, Left, Front, Right, Back, Down) is the order in
/// which per-cubie colors and face matrices are indexed.
#[derive(
    Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter,
)]
pub enum Face {
    /// Up (+Y)
    U,
    /// Left (-X)
    L,
    /// Front (+Z)
    F,
    /// Right (+X)
    R,
    /// Back (-Z)
    B,
    /// Down (-Y)
    D,
}
impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}
impl Face {
    /// Number of faces.
    pub const COUNT: usize = 6;

    /// Returns the index of the face in Up, Left, Front, Right, Back, Down
    /// order.
    pub const fn index(self) -> usize {
        self as usize
    }
    /// Returns the axis perpendicular to the face: 0 for X, 1 for Y, 2 for Z.
    pub const fn axis(self) -> usize {
        match self {
            Face::L | Face::R => 0,
            Face::U | Face::D => 1,
            Face::F | Face::B => 2,
        }
    }
    /// Returns which end of its axis the face is on.
    pub const fn sign(self) -> Sign {
        match self {
            Face::U | Face::F | Face::R => Sign::Pos,
            Face::L | Face::B | Face::D => Sign::Neg,
        }
    }
    /// Returns the grid coordinate along [`Face::axis()`] shared by every
    /// cubie on this face.
    pub const fn layer(self) -> u8 {
        match self.sign() {
            Sign::Neg => 0,
            Sign::Pos => 2,
        }
    }
    /// Returns the outward unit normal of the face.
    pub fn normal(self) -> [i8; 3] {
        let mut ret = [0; 3];
        ret[self.axis()] = self.sign().int();
        ret
    }
    /// Returns the face on the given end of an axis.
    ///
    /// # Panics
    ///
    /// Panics if `axis` is not 0, 1, or 2.
    pub fn from_axis_sign(axis: usize, sign: Sign) -> Face {
        match (axis, sign) {
            (0, Sign::Neg) => Face::L,
            (0, Sign::Pos) => Face::R,
            (1, Sign::Neg) => Face::D,
            (1, Sign::Pos) => Face::U,
            (2, Sign::Neg) => Face::B,
            (2, Sign::Pos) => Face::F,
            _ => panic!("invalid axis {axis}"),
        }
    }
    /// Returns the face on the other side of the puzzle.
    pub const fn opposite(self) -> Face {
        match self {
            Face::U => Face::D,
            Face::L => Face::R,
            Face::F => Face::B,
            Face::R => Face::L,
            Face::B => Face::F,
            Face::D => Face::U,
        }
    }

    /// Returns the face letter used in move notation and facelet strings.
    pub const fn letter(self) -> char {
        match self {
            Face::U => 'U',
            Face::L => 'L',
            Face::F => 'F',
            Face::R => 'R',
            Face::B => 'B',
            Face::D => 'D',
        }
    }
    /// Parses a face letter.
    pub fn from_letter(c: char) -> Option<Face> {
        match c {
            'U' => Some(Face::U),
            'L' => Some(Face::L),
            'F' => Some(Face::F),
            'R' => Some(Face::R),
            'B' => Some(Face::B),
            'D' => Some(Face::D),
            _ => None,
        }
    }

    /// Returns the color of this face when the puzzle is solved.
    pub const fn scheme_color(self) -> Color {
        match self {
            Face::U => Color::Yellow,
            Face::L => Color::Red,
            Face::F => Color::Green,
            Face::R => Color::Orange,
            Face::B => Color::Blue,
            Face::D => Color::White,
        }
    }
}
