//! Conversion between the cubie grid, face matrices, and facelet strings.
//!
//! Each face is read like the standard unfolded net of the puzzle:
//!
//! ```text
//!           U
//!        L  F  R  B
//!           D
//! ```
//!
//! Side faces have row 0 on top. Up has row 0 against Back, and Down has row 0
//! against Front.

use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::{CodecError, Color, Cubie, Face, GridPos};

/// Number of facelets on the puzzle.
pub const FACELET_COUNT: usize = 54;

/// Order of faces in a facelet string.
pub const SOLVER_FACE_ORDER: [Face; 6] = [Face::U, Face::R, Face::F, Face::D, Face::L, Face::B];

/// Colors on one face, indexed by row and then column.
pub type FaceGrid = [[Color; 3]; 3];

/// Colors on all six faces, ordered Up, Left, Front, Right, Back, Down.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct FaceMatrix(pub [FaceGrid; Face::COUNT]);
impl Default for FaceMatrix {
    fn default() -> Self {
        Self::solved()
    }
}
impl Index<Face> for FaceMatrix {
    type Output = FaceGrid;

    fn index(&self, face: Face) -> &Self::Output {
        &self.0[face.index()]
    }
}
impl IndexMut<Face> for FaceMatrix {
    fn index_mut(&mut self, face: Face) -> &mut Self::Output {
        &mut self.0[face.index()]
    }
}
impl fmt::Display for FaceMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for face in Face::iter() {
            let rows = self[face]
                .iter()
                .map(|row| row.iter().map(|c| c.code()).collect::<String>())
                .join(" ");
            writeln!(f, "{face}: {rows}")?;
        }
        Ok(())
    }
}
impl FromStr for FaceMatrix {
    type Err = CodecError;

    /// Parses text with one `X:` header per face followed by three rows of
    /// three color codes. Rows may share a line with the header or follow it
    /// on separate lines.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut grids: [Option<FaceGrid>; Face::COUNT] = [None; Face::COUNT];
        let mut words = s.split_whitespace();
        while let Some(header) = words.next() {
            let face = parse_face_header(header)?;
            let mut grid = [[Color::Unknown; 3]; 3];
            for row in &mut grid {
                let word = words.next().ok_or_else(|| CodecError::BadRow(header.to_owned()))?;
                *row = parse_row(word)?;
            }
            if grids[face.index()].replace(grid).is_some() {
                return Err(CodecError::DuplicateFace(face));
            }
        }
        let mut ret = Self::solved();
        for face in Face::iter() {
            ret[face] = grids[face.index()].ok_or(CodecError::MissingFace(face))?;
        }
        Ok(ret)
    }
}
impl FaceMatrix {
    /// Returns the face matrix of the solved puzzle in the default color
    /// scheme.
    pub fn solved() -> Self {
        let mut grids = [[[Color::Unknown; 3]; 3]; Face::COUNT];
        for face in Face::iter() {
            grids[face.index()] = [[face.scheme_color(); 3]; 3];
        }
        Self(grids)
    }
}

fn parse_face_header(word: &str) -> Result<Face, CodecError> {
    let bad = || CodecError::BadRow(word.to_owned());
    let mut chars = word.strip_suffix(':').ok_or_else(bad)?.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Face::from_letter(c.to_ascii_uppercase())
            .ok_or(CodecError::UnknownFaceLetter(c)),
        _ => Err(bad()),
    }
}

fn parse_row(word: &str) -> Result<[Color; 3], CodecError> {
    let colors = word.chars().map(Color::try_from).collect::<Result<Vec<_>, _>>()?;
    colors
        .try_into()
        .map_err(|_| CodecError::BadRow(word.to_owned()))
}

/// Returns the grid position of the cubie shown at `row` and `col` of `face`.
pub fn face_position(face: Face, row: usize, col: usize) -> GridPos {
    let (r, c) = (row as u8, col as u8);
    match face {
        Face::U => [c, 2, r],
        Face::D => [c, 0, 2 - r],
        Face::F => [c, 2 - r, 2],
        Face::B => [2 - c, 2 - r, 0],
        Face::R => [2, 2 - r, 2 - c],
        Face::L => [0, 2 - r, c],
    }
}

/// Reads the outward colors of the cubies on every face.
pub fn grid_to_faces(cubies: &[Cubie]) -> FaceMatrix {
    let mut ret = FaceMatrix::solved();
    for face in Face::iter() {
        for (row, row_colors) in ret[face].iter_mut().enumerate() {
            for (col, color) in row_colors.iter_mut().enumerate() {
                let pos = face_position(face, row, col);
                *color = cubies
                    .iter()
                    .find(|cubie| cubie.position() == pos)
                    .map_or(Color::Unknown, |cubie| cubie.outward_color(face));
            }
        }
    }
    ret
}

/// Encodes a face matrix as a facelet string: the faces in
/// [`SOLVER_FACE_ORDER`], each flattened row by row, with each color replaced
/// by the letter of its home face. Colors with no home face become `?`.
pub fn faces_to_solver_string(faces: &FaceMatrix) -> String {
    SOLVER_FACE_ORDER
        .iter()
        .flat_map(|&face| faces[face].into_iter().flatten())
        .map(|color| color.home_face().map_or('?', Face::letter))
        .collect()
}

/// Decodes a facelet string into a face matrix.
pub fn solver_string_to_faces(s: &str) -> Result<FaceMatrix, CodecError> {
    let letters: Vec<char> = s.trim().chars().collect();
    if letters.len() != FACELET_COUNT {
        return Err(CodecError::WrongLength {
            expected: FACELET_COUNT,
            got: letters.len(),
        });
    }
    let mut ret = FaceMatrix::solved();
    for (&face, chunk) in SOLVER_FACE_ORDER.iter().zip(letters.chunks(9)) {
        for (i, &c) in chunk.iter().enumerate() {
            let letter_face = Face::from_letter(c).ok_or(CodecError::UnknownFaceLetter(c))?;
            ret[face][i / 3][i % 3] = letter_face.scheme_color();
        }
    }
    Ok(ret)
}

/// Rotates a face grid a quarter turn counterclockwise.
pub fn rot90_ccw(grid: FaceGrid) -> FaceGrid {
    std::array::from_fn(|r| std::array::from_fn(|c| grid[c][2 - r]))
}

/// Assembles a face matrix from six scanned faces.
///
/// The faces are captured in order of their center colors: white, green,
/// red, blue, orange, yellow. The yellow face is captured a quarter turn off
/// from its reading order and is rotated back.
pub fn faces_from_scan(captures: [FaceGrid; 6]) -> FaceMatrix {
    let [white, green, red, blue, orange, yellow] = captures;
    FaceMatrix([rot90_ccw(yellow), red, green, orange, blue, white])
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::MoveEngine;

    fn solver_string_after(moves: &[&str]) -> String {
        let mut engine = MoveEngine::new();
        for mv in moves {
            engine.apply_move(mv.parse().unwrap()).unwrap();
        }
        faces_to_solver_string(&engine.faces())
    }

    #[test]
    fn test_solved_string() {
        let s = solver_string_after(&[]);
        assert_eq!(
            "UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB",
            s,
        );
        assert_eq!(Ok(FaceMatrix::solved()), solver_string_to_faces(&s));
    }

    #[test]
    fn test_face_turn_strings() {
        assert_eq!(
            "UUFUUFUUFRRRRRRRRRFFDFFDFFDDDBDDBDDBLLLLLLLLLUBBUBBUBB",
            solver_string_after(&["R"]),
        );
        assert_eq!(
            "UUUUUUUUUBBBRRRRRRRRRFFFFFFDDDDDDDDDFFFLLLLLLLLLBBBBBB",
            solver_string_after(&["U"]),
        );
    }

    #[test]
    fn test_solver_string_round_trip() {
        let s = solver_string_after(&["R", "U", "F'", "M", "D", "S'"]);
        let faces = solver_string_to_faces(&s).unwrap();
        assert_eq!(s, faces_to_solver_string(&faces));
    }

    #[test]
    fn test_solver_string_errors() {
        assert_eq!(
            Err(CodecError::WrongLength {
                expected: 54,
                got: 3
            }),
            solver_string_to_faces("UUU"),
        );
        let bad = format!("X{}", "U".repeat(53));
        assert_eq!(
            Err(CodecError::UnknownFaceLetter('X')),
            solver_string_to_faces(&bad),
        );
    }

    #[test]
    fn test_unknown_color_encodes_as_question_mark() {
        let mut faces = FaceMatrix::solved();
        faces[Face::U][0][0] = Color::Unknown;
        assert!(faces_to_solver_string(&faces).starts_with("?UUUUUUUU"));
    }

    #[test]
    fn test_text_format() {
        let mut faces = FaceMatrix::solved();
        faces[Face::F][0][2] = Color::Red;
        let text = faces.to_string();
        assert_eq!(Some("F: ggr ggg ggg"), text.lines().nth(2));
        assert_eq!(Ok(faces), text.parse());

        let multiline = text.replace(": ", ":\n").replace(' ', "\n");
        assert_eq!(Ok(faces), multiline.parse());

        let missing = text.lines().take(5).join("\n");
        assert_eq!(
            Err(CodecError::MissingFace(Face::D)),
            missing.parse::<FaceMatrix>(),
        );
        let duplicate = format!("{text}U: yyy yyy yyy\n");
        assert_eq!(
            Err(CodecError::DuplicateFace(Face::U)),
            duplicate.parse::<FaceMatrix>(),
        );
        assert_eq!(
            Err(CodecError::UnknownColorCode('x')),
            text.replace("ggr", "gxr").parse::<FaceMatrix>(),
        );
        assert_eq!(
            Err(CodecError::BadRow("gg".to_owned())),
            text.replace("ggr", "gg").parse::<FaceMatrix>(),
        );
    }

    #[test]
    fn test_rot90_ccw() {
        use Color::*;
        let grid = [[White, Yellow, Red], [Orange, Green, Blue], [Unknown, White, Yellow]];
        let rotated = rot90_ccw(grid);
        assert_eq!([Red, Blue, Yellow], rotated[0]);
        assert_eq!([Yellow, Green, White], rotated[1]);
        assert_eq!([White, Orange, Unknown], rotated[2]);
        assert_eq!(grid, rot90_ccw(rot90_ccw(rot90_ccw(rotated))));
    }

    #[test]
    fn test_faces_from_scan() {
        let solved = FaceMatrix::solved();
        let captures = [Face::D, Face::F, Face::L, Face::B, Face::R, Face::U].map(|f| solved[f]);
        assert_eq!(solved, faces_from_scan(captures));
    }
}
