//! Transform trait shared by the pose transform variants.

use crate::Pose;

mod private {
    pub trait Sealed {}
}

pub(crate) use private::Sealed;

/// Conversion between absolute poses and one relative encoding.
///
/// `forward` is used when authoring data (absolute -> encoding), `inverse`
/// when driving the robot (encoding -> absolute). For a fixed `state`, the two
/// are inverse functions: `inverse(state, forward(state, next)) == next`.
///
/// The trait is sealed; the set of variants is closed and dispatched through
/// [`PoseTransform`](super::PoseTransform).
pub trait ArmTransform: Sealed + Send + Sync + std::fmt::Debug {
    /// Encode `next` relative to the current absolute `state`.
    fn forward(&self, state: &Pose, next: &Pose) -> Pose;

    /// Recover the absolute pose that `action` encodes relative to `state`.
    fn inverse(&self, state: &Pose, action: &Pose) -> Pose;
}
