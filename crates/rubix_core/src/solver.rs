//! Interface to an external move solver.
//!
//! Solvers consume a facelet string (see [`crate::codec`]) and return a move
//! sequence. Before a string is handed to a solver, [`validate_facelets()`]
//! checks that it describes a configuration reachable from the solved state.

use std::process::Command;

use itertools::Itertools;

use crate::codec::{FACELET_COUNT, SOLVER_FACE_ORDER, faces_to_solver_string};
use crate::Face::{B, D, F, L, R, U};
use crate::{Face, FaceMatrix, InvalidConfiguration, MoveSequence, SolveError};

/// Something that can find a move sequence solving a facelet string.
pub trait Solver {
    /// Returns a move sequence that solves the configuration described by
    /// `facelets`.
    fn solve(&self, facelets: &str) -> Result<MoveSequence, SolveError>;
}

/// Solver that runs an external command with the facelet string as its last
/// argument and reads the solution from its standard output.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExternalSolver {
    /// Program to run.
    pub command: String,
    /// Arguments passed before the facelet string.
    pub args: Vec<String>,
}
impl Solver for ExternalSolver {
    fn solve(&self, facelets: &str) -> Result<MoveSequence, SolveError> {
        log::info!("running solver {:?}", self.command);
        let output = Command::new(&self.command)
            .args(&self.args)
            .arg(facelets)
            .output()
            .map_err(|e| SolveError::Solver(format!("{}: {e}", self.command)))?;
        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_owned();
        if !output.status.success() || stdout.starts_with("Error") {
            let reason = match stdout.is_empty() {
                true => String::from_utf8_lossy(&output.stderr).trim().to_owned(),
                false => stdout,
            };
            return Err(InvalidConfiguration::Rejected(reason).into());
        }
        stdout.parse().map_err(|_| SolveError::BadSolution(stdout))
    }
}

/// Encodes and validates `faces`, then asks `solver` for a solution.
pub fn solve_faces(solver: &dyn Solver, faces: &FaceMatrix) -> Result<MoveSequence, SolveError> {
    let facelets = faces_to_solver_string(faces);
    validate_facelets(&facelets)?;
    solver.solve(&facelets)
}

const CORNER_NAMES: [&str; 8] = ["URF", "UFL", "ULB", "UBR", "DFR", "DLF", "DBL", "DRB"];
/// Facelet indices of each corner slot, starting with its Up or Down facelet
/// and going clockwise.
const CORNER_FACELETS: [[usize; 3]; 8] = [
    [8, 9, 20],
    [6, 18, 38],
    [0, 36, 47],
    [2, 45, 11],
    [29, 26, 15],
    [27, 44, 24],
    [33, 53, 42],
    [35, 17, 51],
];
const CORNER_COLORS: [[Face; 3]; 8] = [
    [U, R, F],
    [U, F, L],
    [U, L, B],
    [U, B, R],
    [D, F, R],
    [D, L, F],
    [D, B, L],
    [D, R, B],
];

const EDGE_NAMES: [&str; 12] = [
    "UR", "UF", "UL", "UB", "DR", "DF", "DL", "DB", "FR", "FL", "BL", "BR",
];
const EDGE_FACELETS: [[usize; 2]; 12] = [
    [5, 10],
    [7, 19],
    [3, 37],
    [1, 46],
    [32, 16],
    [28, 25],
    [30, 43],
    [34, 52],
    [23, 12],
    [21, 41],
    [50, 39],
    [48, 14],
];
const EDGE_COLORS: [[Face; 2]; 12] = [
    [U, R],
    [U, F],
    [U, L],
    [U, B],
    [D, R],
    [D, F],
    [D, L],
    [D, B],
    [F, R],
    [F, L],
    [B, L],
    [B, R],
];

/// Checks that a facelet string describes a configuration reachable from the
/// solved state.
pub fn validate_facelets(facelets: &str) -> Result<(), InvalidConfiguration> {
    let chars = facelets.chars().collect_vec();
    if chars.len() != FACELET_COUNT {
        return Err(InvalidConfiguration::WrongLength(chars.len()));
    }
    let f: Vec<Face> = chars
        .iter()
        .map(|&c| Face::from_letter(c).ok_or(InvalidConfiguration::UnknownFacelet(c)))
        .collect::<Result<_, _>>()?;

    for face in SOLVER_FACE_ORDER {
        let count = f.iter().filter(|&&x| x == face).count();
        if count != 9 {
            return Err(InvalidConfiguration::WrongColorCount(face, count));
        }
    }
    for (i, face) in SOLVER_FACE_ORDER.into_iter().enumerate() {
        let center = f[9 * i + 4];
        if center != face {
            return Err(InvalidConfiguration::CentersMisplaced(face, center));
        }
    }

    let mut corner_perm = [0; 8];
    let mut twist = 0;
    for (slot, facelets) in CORNER_FACELETS.iter().enumerate() {
        let unrecognized = || InvalidConfiguration::UnrecognizedCorner(CORNER_NAMES[slot]);
        let ori = (0..3)
            .find(|&o| matches!(f[facelets[o]], U | D))
            .ok_or_else(unrecognized)?;
        let colors = [0, 1, 2].map(|k| f[facelets[(ori + k) % 3]]);
        corner_perm[slot] = CORNER_COLORS
            .iter()
            .position(|&c| c == colors)
            .ok_or_else(unrecognized)?;
        twist += ori;
    }

    let mut edge_perm = [0; 12];
    let mut flip = 0;
    for (slot, &[a, b]) in EDGE_FACELETS.iter().enumerate() {
        let (a, b) = (f[a], f[b]);
        (edge_perm[slot], flip) = if let Some(j) = EDGE_COLORS.iter().position(|&c| c == [a, b]) {
            (j, flip)
        } else if let Some(j) = EDGE_COLORS.iter().position(|&c| c == [b, a]) {
            (j, flip + 1)
        } else {
            return Err(InvalidConfiguration::UnrecognizedEdge(EDGE_NAMES[slot]));
        };
    }

    if let Some(dup) = corner_perm.iter().duplicates().next() {
        return Err(InvalidConfiguration::DuplicateCorner(CORNER_NAMES[*dup]));
    }
    if let Some(dup) = edge_perm.iter().duplicates().next() {
        return Err(InvalidConfiguration::DuplicateEdge(EDGE_NAMES[*dup]));
    }
    if flip % 2 != 0 {
        return Err(InvalidConfiguration::EdgeFlip);
    }
    if twist % 3 != 0 {
        return Err(InvalidConfiguration::CornerTwist);
    }
    if is_odd_permutation(&corner_perm) != is_odd_permutation(&edge_perm) {
        return Err(InvalidConfiguration::Parity);
    }
    Ok(())
}

fn is_odd_permutation(perm: &[usize]) -> bool {
    let inversions = perm
        .iter()
        .tuple_combinations()
        .filter(|(a, b)| a > b)
        .count();
    inversions % 2 == 1
}
