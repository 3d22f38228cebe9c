//! No-op frame filtering.
//!
//! A frame whose end-effector state barely differs from the previous one
//! carries no useful action and is dropped from the recorded episode.

use serde::{Deserialize, Serialize};

use crate::pose::{split_arm_blocks, ARM_DIM};
use crate::{Error, Pose, Result};

fn default_position_epsilon() -> f64 {
    1e-3
}

fn default_rotation_epsilon() -> f64 {
    1.0_f64.to_radians()
}

fn default_gripper_epsilon() -> f64 {
    1e-2
}

/// Per-quantity motion thresholds, applied to every arm block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Meters.
    #[serde(default = "default_position_epsilon")]
    pub position_epsilon: f64,
    /// Radians.
    #[serde(default = "default_rotation_epsilon")]
    pub rotation_epsilon: f64,
    #[serde(default = "default_gripper_epsilon")]
    pub gripper_epsilon: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            position_epsilon: default_position_epsilon(),
            rotation_epsilon: default_rotation_epsilon(),
            gripper_epsilon: default_gripper_epsilon(),
        }
    }
}

impl Thresholds {
    pub fn new(position_epsilon: f64, rotation_epsilon: f64, gripper_epsilon: f64) -> Self {
        Self {
            position_epsilon,
            rotation_epsilon,
            gripper_epsilon,
        }
    }

    /// Thresholds that keep any frame that differs at all.
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Every epsilon must be finite and non-negative, so an unchanged frame
    /// is never motion.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("position_epsilon", self.position_epsilon),
            ("rotation_epsilon", self.rotation_epsilon),
            ("gripper_epsilon", self.gripper_epsilon),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{} must be finite and non-negative, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// Measured differences of one arm block between two ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockMotion {
    /// Euclidean norm of the position difference.
    pub position: f64,
    /// Euclidean norm of the raw Euler angle difference.
    pub rotation: f64,
    /// Absolute gripper difference.
    pub gripper: f64,
}

impl BlockMotion {
    /// Motion between two poses of the same arm.
    pub fn between(prev: &Pose, next: &Pose) -> Self {
        Self {
            position: (next.position - prev.position).norm(),
            rotation: (next.euler - prev.euler).norm(),
            gripper: (next.gripper - prev.gripper).abs(),
        }
    }

    /// True if any quantity is strictly above its threshold.
    pub fn exceeds(&self, thresholds: &Thresholds) -> bool {
        self.position > thresholds.position_epsilon
            || self.rotation > thresholds.rotation_epsilon
            || self.gripper > thresholds.gripper_epsilon
    }
}

/// Per-block motion between two vectors of equal length.
pub fn block_motion(prev: &[f64], next: &[f64]) -> Result<Vec<BlockMotion>> {
    if prev.len() != next.len() {
        return Err(Error::shape(format!("{} channels to match the previous state", prev.len()), next.len()));
    }
    let prev_blocks = split_arm_blocks(prev)?;
    let next_blocks = split_arm_blocks(next)?;
    Ok(prev_blocks
        .iter()
        .zip(&next_blocks)
        .map(|(p, n)| BlockMotion::between(p, n))
        .collect())
}

/// Whether `next` moved enough from `prev` to be kept.
///
/// The vectors are split into 7-channel arm blocks; the pair is motion if any
/// block exceeds any threshold.
pub fn is_motion(prev: &[f64], next: &[f64], thresholds: &Thresholds) -> Result<bool> {
    thresholds.validate()?;
    Ok(block_motion(prev, next)?
        .iter()
        .any(|motion| motion.exceeds(thresholds)))
}

/// When the previous state of a [`MotionGate`] advances.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvancePolicy {
    /// Advance only on kept frames. Slow drift accumulates until it is flagged.
    #[default]
    OnKeep,
    /// Advance on every tick, kept or dropped.
    EveryTick,
}

/// Stateful filter holding the previous state of one recording loop.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionGate {
    thresholds: Thresholds,
    policy: AdvancePolicy,
    previous: Vec<f64>,
}

impl MotionGate {
    /// Create a gate seeded with the first state of an episode.
    pub fn new(thresholds: Thresholds, policy: AdvancePolicy, initial: &[f64]) -> Result<Self> {
        thresholds.validate()?;
        split_arm_blocks(initial)?;
        Ok(Self {
            thresholds,
            policy,
            previous: initial.to_vec(),
        })
    }

    /// Decide whether to keep `next`, then advance per the policy.
    pub fn check(&mut self, next: &[f64]) -> Result<bool> {
        let keep = is_motion(&self.previous, next, &self.thresholds)?;
        if keep || self.policy == AdvancePolicy::EveryTick {
            self.previous.clear();
            self.previous.extend_from_slice(next);
        }
        Ok(keep)
    }

    /// The state the next frame is compared against.
    pub fn previous(&self) -> &[f64] {
        &self.previous
    }

    /// Reseed the gate, e.g. at the start of a new episode.
    pub fn reset(&mut self, initial: &[f64]) -> Result<()> {
        split_arm_blocks(initial)?;
        self.previous = initial.to_vec();
        Ok(())
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn policy(&self) -> AdvancePolicy {
        self.policy
    }

    /// Number of arm blocks in the tracked state.
    pub fn n_arms(&self) -> usize {
        self.previous.len() / ARM_DIM
    }
}
