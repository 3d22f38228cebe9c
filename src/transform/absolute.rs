//! Identity transform: actions are absolute poses.

use super::traits::{ArmTransform, Sealed};
use crate::Pose;

/// No-op transform that returns poses unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AbsoluteTransform;

impl Sealed for AbsoluteTransform {}

impl ArmTransform for AbsoluteTransform {
    fn forward(&self, _state: &Pose, next: &Pose) -> Pose {
        *next
    }

    fn inverse(&self, _state: &Pose, action: &Pose) -> Pose {
        *action
    }
}
