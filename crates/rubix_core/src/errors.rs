use thiserror::Error;

use crate::{Face, PendingMove};

/// Error produced when requesting a move.
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
pub enum MoveError {
    /// Move name is not in the vocabulary
    #[error("unknown move {0:?}")]
    UnknownMove(String),
    /// Another move is still turning
    #[error("busy turning {0}")]
    MoveBusy(PendingMove),
    /// Scripted sequence still has moves queued
    #[error("busy playing sequence with {0} moves left")]
    SequenceBusy(usize),
}

/// Error produced when converting between face matrices, facelet strings, and
/// text.
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
pub enum CodecError {
    /// Input has the wrong number of elements
    #[error("expected {expected} facelets, got {got}")]
    WrongLength {
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
    },
    /// Character is not a color code
    #[error("unknown color code {0:?}")]
    UnknownColorCode(char),
    /// Character is not a face letter
    #[error("unknown face letter {0:?}")]
    UnknownFaceLetter(char),
    /// Face matrix text is missing a face
    #[error("missing face {0}")]
    MissingFace(Face),
    /// Face matrix text lists a face twice
    #[error("duplicate face {0}")]
    DuplicateFace(Face),
    /// Line of face matrix text could not be parsed
    #[error("bad row {0:?}")]
    BadRow(String),
}

/// Reason that a facelet configuration cannot be reached from the solved
/// state.
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
pub enum InvalidConfiguration {
    /// Facelet string does not have 54 facelets
    #[error("expected 54 facelets, got {0}")]
    WrongLength(usize),
    /// Facelet is not one of `URFDLB`
    #[error("unknown facelet {0:?}")]
    UnknownFacelet(char),
    /// Some color does not appear exactly 9 times
    #[error("color {0} appears {1} times")]
    WrongColorCount(Face, usize),
    /// Center facelets are not in their home faces
    #[error("center of face {0} is {1}")]
    CentersMisplaced(Face, Face),
    /// Corner stickers match no corner piece
    #[error("unrecognized corner at {0}")]
    UnrecognizedCorner(&'static str),
    /// Edge stickers match no edge piece
    #[error("unrecognized edge at {0}")]
    UnrecognizedEdge(&'static str),
    /// Same corner piece appears twice
    #[error("corner {0} appears twice")]
    DuplicateCorner(&'static str),
    /// Same edge piece appears twice
    #[error("edge {0} appears twice")]
    DuplicateEdge(&'static str),
    /// Odd number of flipped edges
    #[error("one edge is flipped")]
    EdgeFlip,
    /// Corner twists do not sum to a multiple of three
    #[error("one corner is twisted")]
    CornerTwist,
    /// Corner and edge permutation parities differ
    #[error("two pieces are swapped")]
    Parity,
    /// Solver rejected the configuration
    #[error("rejected by solver: {0}")]
    Rejected(String),
}

/// Error produced by a solve request.
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SolveError {
    /// Configuration is not solvable
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] InvalidConfiguration),
    /// Face capture collaborator failed
    #[error("capture failed: {0}")]
    CaptureFailure(String),
    /// Solver could not be run
    #[error("solver error: {0}")]
    Solver(String),
    /// Face data could not be converted
    #[error("{0}")]
    Codec(#[from] CodecError),
    /// Solver output is not a move sequence
    #[error("solver returned a bad solution: {0:?}")]
    BadSolution(String),
}
