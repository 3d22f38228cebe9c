//! Delta transform in the robot base frame.

use super::traits::{ArmTransform, Sealed};
use crate::Pose;

/// Position and orientation deltas expressed in the fixed base frame.
///
/// Orientation deltas are plain component-wise Euler differences. This is an
/// approximation: it is only meaningful for small rotations and does not
/// handle wraparound near +/-pi (a yaw going from 3.1 to -3.1 is encoded as a
/// delta of -6.2, not 0.08). `inverse` undoes `forward` exactly regardless.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DeltaBaseTransform;

impl Sealed for DeltaBaseTransform {}

impl ArmTransform for DeltaBaseTransform {
    fn forward(&self, state: &Pose, next: &Pose) -> Pose {
        Pose {
            position: next.position - state.position,
            euler: next.euler - state.euler,
            gripper: next.gripper,
        }
    }

    fn inverse(&self, state: &Pose, action: &Pose) -> Pose {
        Pose {
            position: state.position + action.position,
            euler: state.euler + action.euler,
            gripper: action.gripper,
        }
    }
}
