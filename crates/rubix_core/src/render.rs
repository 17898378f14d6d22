//! Per-frame data for a renderer.

use cgmath::{Deg, Matrix4, Vector3, Vector4};

use crate::{AnimationController, Cubie, Face, GridPos, MoveEngine, PendingMove, Rgb};

/// Distance between adjacent cubie centers, in cubie widths.
pub const CUBIE_SPACING: f32 = 2.1;

/// Everything a renderer needs to draw one cubie.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CubieRenderData {
    /// Solved position of the cubie, which identifies it.
    pub home: GridPos,
    /// Model transform, including the turn in flight.
    pub transform: Matrix4<f32>,
    /// Sticker colors, indexed by the cubie's local faces.
    pub colors: [Rgb; Face::COUNT],
}

/// Returns the model transform of a cubie.
///
/// If `turn` is a move in flight that affects the cubie, the transform is
/// preceded by a rotation of the turned angle about the move's axis.
pub fn cubie_transform(cubie: &Cubie, turn: Option<(PendingMove, f32)>, scale: f32) -> Matrix4<f32> {
    let rows = cubie.orientation().rows();
    let col = |k: usize| {
        let [x, y, z] = rows[k].map(|v| f32::from(v) * scale);
        Vector4::new(x, y, z, 0.0)
    };
    let offset = cubie
        .position()
        .map(|p| (f32::from(p) - 1.0) * CUBIE_SPACING * scale);
    let model = Matrix4::from_cols(
        col(0),
        col(1),
        col(2),
        Vector4::new(offset[0], offset[1], offset[2], 1.0),
    );

    match turn {
        Some((pending, angle)) if cubie.is_affected(pending.axis(), pending.slice()) => {
            let mut axis = Vector3::new(0.0, 0.0, 0.0);
            axis[pending.axis()] = 1.0;
            Matrix4::from_axis_angle(axis, Deg(angle * pending.direction().float())) * model
        }
        _ => model,
    }
}

/// Returns render data for every cubie.
pub fn render_data(
    engine: &MoveEngine,
    animation: &AnimationController,
    scale: f32,
) -> Vec<CubieRenderData> {
    let turn = animation.current_turn(engine);
    engine
        .cubies()
        .iter()
        .map(|cubie| CubieRenderData {
            home: cubie.home(),
            transform: cubie_transform(cubie, turn, scale),
            colors: cubie.colors().map(|c| c.rgb()),
        })
        .collect()
}
