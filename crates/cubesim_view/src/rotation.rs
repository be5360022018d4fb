use cgmath::{Matrix4, Quaternion, Rad, Rotation3, Vector3};
use cubesim_core::PieceId;

/// Set of pieces rotating together during a move animation.
///
/// Pieces keep their rest coordinates while the group turns. The group's
/// transform is applied on top of each piece's own transform when rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct RotationGroup {
    pub(crate) pieces: Vec<PieceId>,
    pub(crate) axis: Vector3<f32>,
    pub(crate) target_angle: f32,
    pub(crate) angle: f32,
}
impl RotationGroup {
    pub(crate) fn new(pieces: Vec<PieceId>, axis: Vector3<f32>, target_angle: f32) -> Self {
        Self {
            pieces,
            axis,
            target_angle,
            angle: 0.0,
        }
    }

    /// Returns the pieces in the group, in ascending order.
    pub fn pieces(&self) -> &[PieceId] {
        &self.pieces
    }
    /// Returns whether `piece` is in the group.
    pub fn contains(&self, piece: PieceId) -> bool {
        self.pieces.binary_search(&piece).is_ok()
    }
    /// Returns the unit axis that the group rotates around.
    pub fn axis(&self) -> Vector3<f32> {
        self.axis
    }
    /// Returns the angle that the group will have turned when the move is
    /// finished, in radians.
    pub fn target_angle(&self) -> f32 {
        self.target_angle
    }
    /// Returns the angle that the group has turned so far, in radians.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Returns the current rotation of the group.
    pub fn quaternion(&self) -> Quaternion<f32> {
        Quaternion::from_axis_angle(self.axis, Rad(self.angle))
    }
    /// Returns the current rotation of the group as a matrix.
    pub fn transform(&self) -> Matrix4<f32> {
        Matrix4::from(self.quaternion())
    }
}
