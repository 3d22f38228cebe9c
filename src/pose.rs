//! End-effector pose vectors.
//!
//! A pose is 7 channels: position `x, y, z` in meters, orientation
//! `roll, pitch, yaw` in radians and a normalized gripper aperture. A dual-arm
//! vector is two such blocks back to back, left arm first.

use std::collections::HashMap;

use nalgebra::{Matrix3, Matrix4, Vector3};

use crate::internal::scipy::{euler_to_rotation_matrix, rotation_matrix_to_euler};
use crate::{Error, Result};

/// Number of channels of a single arm block.
pub const ARM_DIM: usize = 7;

/// Number of channels of a dual-arm vector.
pub const BIMANUAL_DIM: usize = 2 * ARM_DIM;

/// Channel names of one arm block, in vector order.
pub const CHANNEL_NAMES: [&str; ARM_DIM] = ["x", "y", "z", "roll", "pitch", "yaw", "gripper"];

/// Name prefixes of the two arms of a dual-arm vector, in vector order.
pub const ARM_PREFIXES: [&str; 2] = ["left_", "right_"];

/// Instantaneous end-effector state (or a relative displacement, see [`DeltaPose`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// Position in meters.
    pub position: Vector3<f64>,
    /// Orientation as `[roll, pitch, yaw]` in radians, extrinsic x-y-z.
    pub euler: Vector3<f64>,
    /// Gripper aperture. Always absolute, also inside a delta.
    pub gripper: f64,
}

/// A relative pose: channels 0-5 encode a displacement/rotation in the base
/// or gripper frame, channel 6 is the absolute gripper value.
pub type DeltaPose = Pose;

impl Pose {
    pub fn new(position: [f64; 3], euler: [f64; 3], gripper: f64) -> Self {
        Self {
            position: Vector3::from(position),
            euler: Vector3::from(euler),
            gripper,
        }
    }

    /// Pose at the origin with zero rotation.
    pub fn identity(gripper: f64) -> Self {
        Self {
            position: Vector3::zeros(),
            euler: Vector3::zeros(),
            gripper,
        }
    }

    /// Build a pose from a 7-channel slice.
    pub fn from_slice(values: &[f64]) -> Result<Self> {
        if values.len() != ARM_DIM {
            return Err(Error::shape(format!("{} channels", ARM_DIM), values.len()));
        }
        Ok(Self {
            position: Vector3::new(values[0], values[1], values[2]),
            euler: Vector3::new(values[3], values[4], values[5]),
            gripper: values[6],
        })
    }

    /// Build a pose from a rotation matrix, decomposing it to Euler angles.
    pub fn from_rotation(position: Vector3<f64>, rotation: &Matrix3<f64>, gripper: f64) -> Self {
        Self {
            position,
            euler: rotation_matrix_to_euler(rotation),
            gripper,
        }
    }

    /// Build a pose from a 4x4 homogeneous transform.
    pub fn from_homogeneous(matrix: &Matrix4<f64>, gripper: f64) -> Self {
        let rotation: Matrix3<f64> = matrix.fixed_view::<3, 3>(0, 0).into_owned();
        let position: Vector3<f64> = matrix.fixed_view::<3, 1>(0, 3).into_owned();
        Self::from_rotation(position, &rotation, gripper)
    }

    pub fn to_array(&self) -> [f64; ARM_DIM] {
        [
            self.position.x,
            self.position.y,
            self.position.z,
            self.euler.x,
            self.euler.y,
            self.euler.z,
            self.gripper,
        ]
    }

    /// Rotation matrix of the orientation channels.
    pub fn rotation_matrix(&self) -> Matrix3<f64> {
        euler_to_rotation_matrix(&self.euler)
    }

    /// 4x4 homogeneous transform `[R | p; 0 0 0 1]`.
    pub fn homogeneous(&self) -> Matrix4<f64> {
        let mut matrix = Matrix4::identity();
        matrix
            .fixed_view_mut::<3, 3>(0, 0)
            .copy_from(&self.rotation_matrix());
        matrix.fixed_view_mut::<3, 1>(0, 3).copy_from(&self.position);
        matrix
    }

    /// Read a pose from named channels, e.g. `{"left_x": .., "left_y": .., ...}`
    /// with `prefix = "left_"`.
    pub fn from_named(values: &HashMap<String, f64>, prefix: &str) -> Result<Self> {
        let mut channels = [0.0; ARM_DIM];
        for (channel, name) in channels.iter_mut().zip(CHANNEL_NAMES) {
            let key = format!("{}{}", prefix, name);
            *channel = *values.get(&key).ok_or_else(|| Error::InvalidShape {
                expected: format!("channel '{}'", key),
                got: format!("{} named channels", values.len()),
            })?;
        }
        Self::from_slice(&channels)
    }

    /// Named channels of this pose, in vector order.
    pub fn to_named(&self, prefix: &str) -> Vec<(String, f64)> {
        CHANNEL_NAMES
            .iter()
            .zip(self.to_array())
            .map(|(name, value)| (format!("{}{}", prefix, name), value))
            .collect()
    }
}

impl From<[f64; ARM_DIM]> for Pose {
    fn from(values: [f64; ARM_DIM]) -> Self {
        Self::new(
            [values[0], values[1], values[2]],
            [values[3], values[4], values[5]],
            values[6],
        )
    }
}

impl From<Pose> for [f64; ARM_DIM] {
    fn from(pose: Pose) -> Self {
        pose.to_array()
    }
}

/// Split a vector into its 7-channel arm blocks.
///
/// The length must be a non-zero multiple of [`ARM_DIM`].
pub fn split_arm_blocks(values: &[f64]) -> Result<Vec<Pose>> {
    if values.is_empty() || values.len() % ARM_DIM != 0 {
        return Err(Error::shape(
            format!("a non-zero multiple of {} channels", ARM_DIM),
            values.len(),
        ));
    }
    values.chunks_exact(ARM_DIM).map(Pose::from_slice).collect()
}

/// Concatenate arm blocks back into one vector, preserving block order.
pub fn join_arm_blocks(blocks: &[Pose]) -> Vec<f64> {
    blocks.iter().flat_map(|pose| pose.to_array()).collect()
}

/// Check that a vector is a single-arm or a dual-arm vector.
pub fn validate_arm_vector(values: &[f64]) -> Result<()> {
    match values.len() {
        ARM_DIM | BIMANUAL_DIM => Ok(()),
        other => Err(Error::shape(
            format!("{} or {} channels", ARM_DIM, BIMANUAL_DIM),
            other,
        )),
    }
}

/// Channel names of a vector with `n_arms` blocks.
///
/// Single-arm vectors use bare names; dual-arm vectors use the `left_` /
/// `right_` prefixes.
pub fn channel_names(n_arms: usize) -> Vec<String> {
    if n_arms == 1 {
        return CHANNEL_NAMES.iter().map(|name| name.to_string()).collect();
    }
    ARM_PREFIXES
        .iter()
        .take(n_arms)
        .flat_map(|prefix| CHANNEL_NAMES.iter().map(move |name| format!("{}{}", prefix, name)))
        .collect()
}

/// Read a 7- or 14-wide vector from named channels.
pub fn vector_from_named(values: &HashMap<String, f64>, n_arms: usize) -> Result<Vec<f64>> {
    match n_arms {
        1 => Ok(Pose::from_named(values, "")?.to_array().to_vec()),
        2 => {
            let left = Pose::from_named(values, ARM_PREFIXES[0])?;
            let right = Pose::from_named(values, ARM_PREFIXES[1])?;
            Ok(join_arm_blocks(&[left, right]))
        }
        other => Err(Error::InvalidConfig(format!(
            "expected 1 or 2 arms, got {}",
            other
        ))),
    }
}
