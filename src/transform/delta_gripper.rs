//! Delta transform in the gripper's own frame.

use nalgebra::{Matrix3, Vector3};

use super::traits::{ArmTransform, Sealed};
use crate::internal::scipy::euler_to_rotation_matrix;
use crate::Pose;

/// Position and orientation deltas expressed in the current gripper frame.
///
/// Works on rotation matrices, never on angle differences:
///
/// - `delta.position = R_cur^T * (next.position - state.position)`
/// - `R_delta = R_cur^T * R_next`
///
/// so that the absolute pose is recovered by right-multiplying the current
/// frame, `R_next = R_cur * R_delta`, the same composition a trajectory
/// integrator uses (`world = world * relative`).
///
/// An optional base orientation `A` describes a mount where the gripper's
/// nominal forward axis is rotated relative to the frame the deltas were
/// recorded in (e.g. a camera-down mount). With an alignment the current frame
/// becomes `C = R_cur * A^T` and absolute rotations are `C * R_delta * A`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DeltaGripperTransform {
    base_euler: Option<Vector3<f64>>,
    alignment: Option<Matrix3<f64>>,
}

impl DeltaGripperTransform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transform aligned to the mount orientation `base_euler`.
    pub fn with_base_euler(base_euler: [f64; 3]) -> Self {
        let base_euler = Vector3::from(base_euler);
        Self {
            base_euler: Some(base_euler),
            alignment: Some(euler_to_rotation_matrix(&base_euler)),
        }
    }

    /// The configured mount orientation, if any.
    pub fn base_euler(&self) -> Option<[f64; 3]> {
        self.base_euler.map(|euler| euler.into())
    }

    /// Fixed alignment rotation derived from the base orientation.
    pub fn alignment(&self) -> Option<&Matrix3<f64>> {
        self.alignment.as_ref()
    }

    /// Current gripper frame `C`, with the alignment applied.
    fn current_frame(&self, state: &Pose) -> Matrix3<f64> {
        let current = state.rotation_matrix();
        match &self.alignment {
            Some(align) => current * align.transpose(),
            None => current,
        }
    }
}

impl Sealed for DeltaGripperTransform {}

impl ArmTransform for DeltaGripperTransform {
    fn forward(&self, state: &Pose, next: &Pose) -> Pose {
        let current = self.current_frame(state);
        let current_inv = current.transpose();

        let mut delta_rot = current_inv * next.rotation_matrix();
        if let Some(align) = &self.alignment {
            delta_rot *= align.transpose();
        }

        let delta_pos = current_inv * (next.position - state.position);

        Pose::from_rotation(delta_pos, &delta_rot, next.gripper)
    }

    fn inverse(&self, state: &Pose, action: &Pose) -> Pose {
        let current = self.current_frame(state);

        let mut absolute_rot = current * action.rotation_matrix();
        if let Some(align) = &self.alignment {
            absolute_rot *= *align;
        }

        let absolute_pos = state.position + current * action.position;

        Pose::from_rotation(absolute_pos, &absolute_rot, action.gripper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_zero_rotation_matches_world_frame() {
        let transform = DeltaGripperTransform::new();
        let state = Pose::from([0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.5]);
        let next = Pose::from([0.1, 0.0, 0.0, 0.0, 0.0, 0.0, 0.5]);

        let delta = transform.forward(&state, &next);
        let expected = [0.1, 0.0, 0.0, 0.0, 0.0, 0.0, 0.5];
        for (got, want) in delta.to_array().iter().zip(expected) {
            assert_relative_eq!(*got, want, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_position_expressed_in_gripper_frame() {
        // Gripper yawed by 90deg: its local x axis is world y
        let transform = DeltaGripperTransform::new();
        let state = Pose::new([0.0; 3], [0.0, 0.0, FRAC_PI_2], 0.0);
        let next = Pose::new([0.0, 0.2, 0.0], [0.0, 0.0, FRAC_PI_2], 0.0);

        let delta = transform.forward(&state, &next);
        assert_relative_eq!(delta.position, Vector3::new(0.2, 0.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(delta.euler, Vector3::zeros(), epsilon = 1e-12);
    }

    #[test]
    fn test_rotation_is_relative_to_current_frame() {
        // Pitch about the gripper's own y axis after a 90deg yaw is a world rotation
        // about -x; the delta must still read as a pure pitch.
        let transform = DeltaGripperTransform::new();
        let state = Pose::new([0.0; 3], [0.0, 0.0, FRAC_PI_2], 0.0);
        let delta = Pose::new([0.0; 3], [0.0, 0.3, 0.0], 0.0);

        let next = transform.inverse(&state, &delta);
        let expected = state.rotation_matrix() * delta.rotation_matrix();
        assert_relative_eq!(next.rotation_matrix(), expected, epsilon = 1e-12);

        let recovered = transform.forward(&state, &next);
        assert_relative_eq!(recovered.euler, delta.euler, epsilon = 1e-12);
    }

    #[test]
    fn test_inverse_moves_along_gripper_axis() {
        let transform = DeltaGripperTransform::new();
        let state = Pose::new([1.0, 1.0, 1.0], [0.0, 0.0, FRAC_PI_2], 0.3);
        let delta = Pose::new([0.1, 0.0, 0.0], [0.0; 3], 0.8);

        let next = transform.inverse(&state, &delta);
        assert_relative_eq!(next.position, Vector3::new(1.0, 1.1, 1.0), epsilon = 1e-12);
        assert_relative_eq!(next.euler, state.euler, epsilon = 1e-12);
        assert_eq!(next.gripper, 0.8);
    }

    #[test]
    fn test_alignment_roundtrip() {
        let transform = DeltaGripperTransform::with_base_euler([0.0, FRAC_PI_2, 0.0]);
        let state = Pose::new([0.2, 0.0, 0.3], [0.1, -0.3, 0.4], 0.5);
        let next = Pose::new([0.25, 0.05, 0.28], [0.2, -0.2, 0.6], 0.7);

        let delta = transform.forward(&state, &next);
        let restored = transform.inverse(&state, &delta);

        assert_relative_eq!(restored.position, next.position, epsilon = 1e-9);
        assert_relative_eq!(restored.euler, next.euler, epsilon = 1e-9);
        assert_eq!(restored.gripper, next.gripper);
    }

    #[test]
    fn test_alignment_zero_delta_keeps_pose() {
        let transform = DeltaGripperTransform::with_base_euler([0.0, FRAC_PI_2, 0.0]);
        let state = Pose::new([0.2, 0.0, 0.3], [0.1, -0.3, 0.4], 0.5);

        let next = transform.inverse(&state, &Pose::identity(0.5));
        assert_relative_eq!(next.position, state.position, epsilon = 1e-12);
        assert_relative_eq!(next.euler, state.euler, epsilon = 1e-9);
    }

    #[test]
    fn test_camera_down_mount_forward_axis() {
        // Mount pitched by 90deg: a recorded step along the local x axis moves
        // an unrotated flange along world +z.
        let transform = DeltaGripperTransform::with_base_euler([0.0, FRAC_PI_2, 0.0]);
        let state = Pose::identity(0.0);
        let delta = Pose::new([0.1, 0.0, 0.0], [0.0; 3], 0.0);

        let next = transform.inverse(&state, &delta);
        let align = transform.alignment().unwrap();
        assert_relative_eq!(next.position, align.transpose() * Vector3::new(0.1, 0.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(next.position, Vector3::new(0.0, 0.0, 0.1), epsilon = 1e-12);
    }
}
