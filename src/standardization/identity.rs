//! Identity standardization for devices that already report canonical units.

use crate::Pose;

/// Baseline standardization that does not change values.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IdentityStandardization;

impl IdentityStandardization {
    pub fn new() -> Self {
        Self
    }

    pub fn to_canonical(&self, hardware: &[f64; 7]) -> Pose {
        Pose::from(*hardware)
    }

    pub fn to_hardware(&self, pose: &Pose) -> [f64; 7] {
        pose.to_array()
    }
}
