//! Dual-arm vector composition.

use crate::pose::{validate_arm_vector, ARM_DIM};
use crate::{Error, Pose, PoseTransform, Result};

/// Applies one [`PoseTransform`] independently to each arm of a vector.
///
/// A 14-channel vector is split into its left and right arm blocks, each block
/// is transformed on its own and the results are concatenated in the same
/// order. A 7-channel vector is passed straight to the transform.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BimanualTransform {
    transform: PoseTransform,
}

impl BimanualTransform {
    pub fn new(transform: PoseTransform) -> Self {
        Self { transform }
    }

    /// Create an adapter from a transform name.
    pub fn from_name(name: &str) -> Result<Self> {
        Ok(Self::new(PoseTransform::from_name(name)?))
    }

    /// The per-arm transform.
    pub fn transform(&self) -> &PoseTransform {
        &self.transform
    }

    /// `forward` for every arm block of `state` / `next`.
    pub fn forward(&self, state: &[f64], next: &[f64]) -> Result<Vec<f64>> {
        self.apply(state, next, |s, n| self.transform.forward(s, n))
    }

    /// `inverse` for every arm block of `state` / `action`.
    pub fn inverse(&self, state: &[f64], action: &[f64]) -> Result<Vec<f64>> {
        self.apply(state, action, |s, a| self.transform.inverse(s, a))
    }

    fn apply<F>(&self, state: &[f64], other: &[f64], op: F) -> Result<Vec<f64>>
    where
        F: Fn(&Pose, &Pose) -> Pose,
    {
        validate_arm_vector(state)?;
        if other.len() != state.len() {
            return Err(Error::shape(format!("{} channels to match the state", state.len()), other.len()));
        }

        let mut result = Vec::with_capacity(state.len());
        for (state_block, other_block) in state.chunks_exact(ARM_DIM).zip(other.chunks_exact(ARM_DIM)) {
            let state_pose = Pose::from_slice(state_block)?;
            let other_pose = Pose::from_slice(other_block)?;
            result.extend_from_slice(&op(&state_pose, &other_pose).to_array());
        }
        Ok(result)
    }
}
