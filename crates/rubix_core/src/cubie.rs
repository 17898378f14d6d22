//! Cubies and their orientations.

use strum::IntoEnumIterator;

use crate::{Color, Face, Sign};

/// Grid coordinate of a cubie. Each component is in the range `0..3`.
///
/// Axis 0 runs from left to right, axis 1 from down to up, and axis 2 from
/// back to front.
pub type GridPos = [u8; 3];

/// Number of cubies in the puzzle.
pub const CUBIE_COUNT: usize = 27;

/// Returns the two axes perpendicular to `axis`, in right-handed order.
pub const fn perpendiculars(axis: usize) -> (usize, usize) {
    ((axis + 1) % 3, (axis + 2) % 3)
}

/// Reflects a grid coordinate about the center layer.
const fn reflect(v: u8) -> u8 {
    2 - v
}

/// Returns every grid position, in X-major order.
pub fn all_positions() -> impl Iterator<Item = GridPos> {
    (0..3).flat_map(|x| (0..3).flat_map(move |y| (0..3).map(move |z| [x, y, z])))
}

/// Rotates a grid position by a quarter turn about `axis`.
///
/// A positive direction sends the first perpendicular axis toward the second.
pub fn rotate_position(pos: GridPos, axis: usize, direction: Sign) -> GridPos {
    let (i, j) = perpendiculars(axis);
    let (a, b) = (pos[i], pos[j]);
    let mut ret = pos;
    (ret[i], ret[j]) = match direction {
        Sign::Pos => (reflect(b), a),
        Sign::Neg => (b, reflect(a)),
    };
    ret
}

/// Rotation of a cubie relative to its solved orientation, stored as a signed
/// permutation matrix.
///
/// Row `k` is the direction (in puzzle space) that the cubie's local axis `k`
/// currently points along.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Orientation([[i8; 3]; 3]);
impl Default for Orientation {
    fn default() -> Self {
        Self::IDENTITY
    }
}
impl Orientation {
    /// Solved orientation.
    pub const IDENTITY: Self = Self([[1, 0, 0], [0, 1, 0], [0, 0, 1]]);

    /// Returns the rows of the matrix.
    pub fn rows(self) -> [[i8; 3]; 3] {
        self.0
    }

    /// Returns the orientation after a quarter turn about `axis`.
    ///
    /// This applies the same coordinate update as [`rotate_position()`] to
    /// each row, so it never leaves the group of signed permutation matrices.
    #[must_use]
    pub fn rotated(self, axis: usize, direction: Sign) -> Self {
        let (i, j) = perpendiculars(axis);
        let mut rows = self.0;
        for row in &mut rows {
            let (a, b) = (row[i], row[j]);
            (row[i], row[j]) = match direction {
                Sign::Pos => (-b, a),
                Sign::Neg => (b, -a),
            };
        }
        Self(rows)
    }

    /// Returns the face (in puzzle space) that the cubie's local face `local`
    /// currently points toward.
    pub fn world_face(self, local: Face) -> Face {
        let row = self.0[local.axis()];
        let axis = (0..3).find(|&c| row[c] != 0).unwrap_or(local.axis());
        let sign = Sign::of(row[axis]).unwrap_or(Sign::Pos) * local.sign();
        Face::from_axis_sign(axis, sign)
    }
    /// Returns the cubie's local face that currently points toward `world`.
    ///
    /// This is the inverse of [`Orientation::world_face()`].
    pub fn local_face(self, world: Face) -> Face {
        let axis = world.axis();
        let k = (0..3).find(|&k| self.0[k][axis] != 0).unwrap_or(axis);
        let sign = Sign::of(self.0[k][axis]).unwrap_or(Sign::Pos) * world.sign();
        Face::from_axis_sign(k, sign)
    }

    /// Returns whether the matrix is a signed permutation matrix with
    /// determinant +1.
    pub fn is_rotation(self) -> bool {
        let m = self.0;
        let rows_ok = m
            .iter()
            .all(|row| row.iter().filter(|&&x| x != 0).count() == 1 && row.iter().all(|x| x.abs() <= 1));
        let cols_ok = (0..3).all(|c| m.iter().filter(|row| row[c] != 0).count() == 1);
        let m = m.map(|row| row.map(i32::from));
        let det = m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0]);
        rows_ok && cols_ok && det == 1
    }
}

/// One of the 27 sub-cubes of the puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cubie {
    home: GridPos,
    position: GridPos,
    orientation: Orientation,
    /// Sticker colors, indexed by the cubie's local faces.
    colors: [Color; Face::COUNT],
}
impl Cubie {
    /// Constructs a solved cubie at `home`, with the default color scheme on
    /// its exterior faces and [`Color::Unknown`] on its interior faces.
    pub fn new(home: GridPos) -> Self {
        let mut colors = [Color::Unknown; Face::COUNT];
        for face in Face::iter() {
            if home[face.axis()] == face.layer() {
                colors[face.index()] = face.scheme_color();
            }
        }
        Self {
            home,
            position: home,
            orientation: Orientation::IDENTITY,
            colors,
        }
    }

    /// Returns the cubie's solved position, which identifies it.
    pub fn home(&self) -> GridPos {
        self.home
    }
    /// Returns the cubie's current position.
    pub fn position(&self) -> GridPos {
        self.position
    }
    /// Returns the cubie's current orientation.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }
    /// Returns the cubie's sticker colors, indexed by local face.
    pub fn colors(&self) -> [Color; Face::COUNT] {
        self.colors
    }
    /// Sets the cubie's sticker colors, indexed by local face.
    pub fn set_colors(&mut self, colors: [Color; Face::COUNT]) {
        self.colors = colors;
    }

    /// Returns whether the cubie is in slice `slice` along `axis`.
    pub fn is_affected(&self, axis: usize, slice: u8) -> bool {
        self.position[axis] == slice
    }
    /// Returns whether the cubie is part of the outer layer `face`.
    pub fn is_on_face(&self, face: Face) -> bool {
        self.is_affected(face.axis(), face.layer())
    }
    /// Returns whether the cubie is at its home position with its solved
    /// orientation.
    pub fn is_home(&self) -> bool {
        self.position == self.home && self.orientation == Orientation::IDENTITY
    }

    /// Returns the color currently facing toward `world`.
    pub fn outward_color(&self, world: Face) -> Color {
        self.colors[self.orientation.local_face(world).index()]
    }
    /// Sets the color of the sticker currently facing toward `world`.
    pub fn set_outward_color(&mut self, world: Face, color: Color) {
        self.colors[self.orientation.local_face(world).index()] = color;
    }

    /// Rotates the cubie by a quarter turn about `axis`. Does nothing if the
    /// cubie is not in `slice`.
    pub(crate) fn turn(&mut self, axis: usize, slice: u8, direction: Sign) {
        if !self.is_affected(axis, slice) {
            return;
        }
        self.orientation = self.orientation.rotated(axis, direction);
        self.position = rotate_position(self.position, axis, direction);
    }
}
