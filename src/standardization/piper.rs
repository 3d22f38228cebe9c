//! Piper arm unit encoding.

use std::f64::consts::PI;

use crate::Pose;

/// Hardware counts per meter (positions are reported in 0.001 mm).
const POSITION_COUNTS_PER_METER: f64 = 1e6;

/// Hardware counts per degree (rotations are reported in 0.001 degree).
const ROTATION_COUNTS_PER_DEGREE: f64 = 1e3;

/// Full-scale gripper reading.
const GRIPPER_FULL_SCALE: f64 = 60000.0;

/// Canonical gripper value at full scale.
const GRIPPER_CANONICAL_MAX: f64 = 1.6;

/// Converts between Piper integer counts and canonical units.
///
/// - position: 1e-6 m counts <-> meters
/// - rotation: 1e-3 degree counts <-> radians
/// - gripper: `[0, 60000]` <-> `[0, 1.6]`
///
/// Conversion to hardware truncates toward zero, so the round trip through
/// hardware units is only exact up to one count per channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PiperStandardization {
    pub gripper_full_scale: f64,
    pub gripper_canonical_max: f64,
}

impl Default for PiperStandardization {
    fn default() -> Self {
        Self {
            gripper_full_scale: GRIPPER_FULL_SCALE,
            gripper_canonical_max: GRIPPER_CANONICAL_MAX,
        }
    }
}

impl PiperStandardization {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to_canonical(&self, hardware: &[f64; 7]) -> Pose {
        let rotation_scale = PI / 180.0 / ROTATION_COUNTS_PER_DEGREE;
        Pose::new(
            [
                hardware[0] / POSITION_COUNTS_PER_METER,
                hardware[1] / POSITION_COUNTS_PER_METER,
                hardware[2] / POSITION_COUNTS_PER_METER,
            ],
            [
                hardware[3] * rotation_scale,
                hardware[4] * rotation_scale,
                hardware[5] * rotation_scale,
            ],
            hardware[6] / self.gripper_full_scale * self.gripper_canonical_max,
        )
    }

    pub fn to_hardware(&self, pose: &Pose) -> [f64; 7] {
        let to_counts = |radians: f64| (radians * 180.0 / PI * ROTATION_COUNTS_PER_DEGREE).trunc();
        [
            (pose.position.x * POSITION_COUNTS_PER_METER).trunc(),
            (pose.position.y * POSITION_COUNTS_PER_METER).trunc(),
            (pose.position.z * POSITION_COUNTS_PER_METER).trunc(),
            to_counts(pose.euler.x),
            to_counts(pose.euler.y),
            to_counts(pose.euler.z),
            (pose.gripper / self.gripper_canonical_max * self.gripper_full_scale).trunc(),
        ]
    }

    /// Size of one hardware count in canonical units, per channel.
    pub fn quantization_step(&self) -> [f64; 7] {
        let position = 1.0 / POSITION_COUNTS_PER_METER;
        let rotation = PI / 180.0 / ROTATION_COUNTS_PER_DEGREE;
        let gripper = self.gripper_canonical_max / self.gripper_full_scale;
        [position, position, position, rotation, rotation, rotation, gripper]
    }
}
