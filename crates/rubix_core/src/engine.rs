//! Authoritative puzzle state.

use std::collections::HashSet;

use strum::IntoEnumIterator;

use crate::codec::{self, FaceGrid, FaceMatrix};
use crate::{CUBIE_COUNT, Color, Cubie, Face, GridPos, Move, MoveError, PendingMove};

/// Owns the 27 cubies and the single in-flight move.
///
/// The engine is `Idle` when [`MoveEngine::pending()`] is `None` and
/// `Turning` otherwise. A move is committed to the cubies only by
/// [`MoveEngine::commit()`] (or the instant [`MoveEngine::apply_move()`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveEngine {
    cubies: [Cubie; CUBIE_COUNT],
    pending: Option<PendingMove>,
}
impl Default for MoveEngine {
    fn default() -> Self {
        Self::new()
    }
}
impl MoveEngine {
    /// Constructs a solved puzzle with the default color scheme.
    pub fn new() -> Self {
        Self {
            cubies: std::array::from_fn(|i| Cubie::new(home_of_index(i))),
            pending: None,
        }
    }
    /// Resets the puzzle to its solved default. A turn in flight is committed
    /// before the reset.
    pub fn reset(&mut self) {
        self.commit();
        *self = Self::new();
    }

    /// Returns all cubies, ordered by home position.
    pub fn cubies(&self) -> &[Cubie; CUBIE_COUNT] {
        &self.cubies
    }
    /// Returns the cubie currently at `pos`.
    pub fn cubie_at(&self, pos: GridPos) -> Option<&Cubie> {
        self.cubies.iter().find(|c| c.position() == pos)
    }
    fn cubie_at_mut(&mut self, pos: GridPos) -> Option<&mut Cubie> {
        self.cubies.iter_mut().find(|c| c.position() == pos)
    }

    /// Returns the move in flight, if any.
    pub fn pending(&self) -> Option<PendingMove> {
        self.pending
    }
    /// Returns whether a move is in flight.
    pub fn is_turning(&self) -> bool {
        self.pending.is_some()
    }

    /// Parses and begins a move by name.
    pub fn begin_move(&mut self, name: &str) -> Result<PendingMove, MoveError> {
        if let Some(busy) = self.pending {
            return Err(MoveError::MoveBusy(busy));
        }
        self.begin(name.parse()?)
    }
    /// Begins a move. The cubies do not change until the move is committed.
    pub fn begin(&mut self, mv: Move) -> Result<PendingMove, MoveError> {
        if let Some(busy) = self.pending {
            return Err(MoveError::MoveBusy(busy));
        }
        let pending = mv.pending();
        log::debug!("begin {mv}");
        self.pending = Some(pending);
        Ok(pending)
    }
    /// Commits the move in flight and returns to `Idle`. Returns the move that
    /// was committed, or `None` if the engine was already idle.
    pub fn commit(&mut self) -> Option<PendingMove> {
        let pending = self.pending.take()?;
        self.apply(pending);
        log::debug!("commit {pending}");
        Some(pending)
    }
    /// Instantly applies a move, without animation.
    pub fn apply_move(&mut self, mv: Move) -> Result<(), MoveError> {
        self.begin(mv)?;
        self.commit();
        Ok(())
    }

    /// Rotates every cubie in the slice by a quarter turn.
    fn apply(&mut self, pending: PendingMove) {
        for cubie in &mut self.cubies {
            cubie.turn(pending.axis(), pending.slice(), pending.direction());
        }
        debug_assert!(self.check_invariant(), "bad state after {pending}");
    }

    /// Returns whether every position is occupied by exactly one cubie and
    /// every orientation is a proper rotation.
    pub fn check_invariant(&self) -> bool {
        let positions: HashSet<GridPos> = self.cubies.iter().map(|c| c.position()).collect();
        positions.len() == CUBIE_COUNT
            && self.cubies.iter().all(|c| c.orientation().is_rotation())
    }

    /// Returns whether every cubie is at its home position with its solved
    /// orientation.
    pub fn is_home(&self) -> bool {
        self.cubies.iter().all(|c| c.is_home())
    }
    /// Returns whether every face shows a single color.
    ///
    /// This can be true even when [`MoveEngine::is_home()`] is not, because
    /// center cubies may be turned in place.
    pub fn is_solved(&self) -> bool {
        let faces = self.faces();
        Face::iter().all(|face| {
            let grid = faces[face];
            grid.iter().flatten().all(|&c| c == grid[1][1])
        })
    }

    /// Returns the colors currently visible on each face.
    pub fn faces(&self) -> FaceMatrix {
        codec::grid_to_faces(&self.cubies)
    }

    /// Sets every sticker of every cubie to `color`.
    pub fn set_entire_color(&mut self, color: Color) {
        for cubie in &mut self.cubies {
            cubie.set_colors([color; Face::COUNT]);
        }
    }
    /// Sets all nine stickers on `face` to `color`.
    pub fn color_entire_face(&mut self, face: Face, color: Color) {
        self.color_face(face, [[color; 3]; 3]);
    }
    /// Sets the nine stickers on `face`, given in the face's reading order.
    pub fn color_face(&mut self, face: Face, colors: FaceGrid) {
        for (row, row_colors) in colors.iter().enumerate() {
            for (col, &color) in row_colors.iter().enumerate() {
                let pos = codec::face_position(face, row, col);
                if let Some(cubie) = self.cubie_at_mut(pos) {
                    cubie.set_outward_color(face, color);
                }
            }
        }
    }
    /// Sets every visible sticker from a face matrix.
    pub fn load_faces(&mut self, faces: &FaceMatrix) {
        for face in Face::iter() {
            self.color_face(face, faces[face]);
        }
    }
}

/// Returns the home position of the cubie at index `i`, in X-major order.
fn home_of_index(i: usize) -> GridPos {
    [(i / 9) as u8, (i / 3 % 3) as u8, (i % 3) as u8]
}
