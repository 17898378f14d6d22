//! Sign enum.

use std::ops::{Mul, Neg};

use serde::{Deserialize, Serialize};

/// Positive or negative.
///
/// Used both for the direction of a quarter turn (positive is
/// counterclockwise when looking down the axis toward the origin) and for the
/// side of the puzzle that a face lies on.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Sign {
    /// Negative.
    Neg = -1,
    /// Positive.
    Pos = 1,
}
impl Neg for Sign {
    type Output = Sign;
    fn neg(self) -> Sign {
        match self {
            Sign::Neg => Sign::Pos,
            Sign::Pos => Sign::Neg,
        }
    }
}
impl Mul<Sign> for Sign {
    type Output = Sign;
    fn mul(self, rhs: Sign) -> Sign {
        match self {
            Sign::Neg => -rhs,
            Sign::Pos => rhs,
        }
    }
}
impl Sign {
    /// Returns an integer representation of the sign (either -1 or 1).
    pub const fn int(self) -> i8 {
        match self {
            Sign::Neg => -1,
            Sign::Pos => 1,
        }
    }
    /// Returns a floating-point representation of the sign (either -1.0 or
    /// 1.0).
    pub const fn float(self) -> f32 {
        self.int() as f32
    }
    /// Returns the sign of a nonzero integer, or `None` if it is zero.
    pub const fn of(x: i8) -> Option<Sign> {
        match x {
            0 => None,
            x if x < 0 => Some(Sign::Neg),
            _ => Some(Sign::Pos),
        }
    }

    /// Returns an iterator over both signs.
    pub fn iter() -> impl Clone + Iterator<Item = Sign> {
        [Sign::Neg, Sign::Pos].into_iter()
    }
}
