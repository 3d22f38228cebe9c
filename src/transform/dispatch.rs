//! Enum-based transform dispatch.
//!
//! `PoseTransform` is the closed set of supported encodings, constructed once
//! from a configuration string and dispatched without vtable lookups.

use std::fmt;
use std::str::FromStr;

use super::absolute::AbsoluteTransform;
use super::delta_base::DeltaBaseTransform;
use super::delta_gripper::DeltaGripperTransform;
use super::traits::{ArmTransform, Sealed};
use crate::config::TransformConfig;
use crate::{Error, Pose, Result};

/// The kind of a pose encoding, parsed from its configuration name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformKind {
    Absolute,
    DeltaBase,
    DeltaGripper,
}

impl TransformKind {
    /// Canonical configuration name.
    pub fn name(&self) -> &'static str {
        match self {
            TransformKind::Absolute => "ee_absolute",
            TransformKind::DeltaBase => "ee_delta_base",
            TransformKind::DeltaGripper => "ee_delta_gripper",
        }
    }
}

impl FromStr for TransformKind {
    type Err = Error;

    /// Supported names:
    /// - "ee_absolute", "absolute"
    /// - "ee_delta_base", "delta_base", "ee_delta_base_to_absolute"
    /// - "ee_delta_gripper", "delta_gripper", "ee_delta_gripper_to_absolute"
    fn from_str(name: &str) -> Result<Self> {
        match name {
            "ee_absolute" | "absolute" => Ok(TransformKind::Absolute),
            "ee_delta_base" | "delta_base" | "ee_delta_base_to_absolute" => {
                Ok(TransformKind::DeltaBase)
            }
            "ee_delta_gripper" | "delta_gripper" | "ee_delta_gripper_to_absolute" => {
                Ok(TransformKind::DeltaGripper)
            }
            _ => Err(Error::UnknownTransform(name.to_string())),
        }
    }
}

impl fmt::Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A configured pose transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PoseTransform {
    Absolute(AbsoluteTransform),
    DeltaBase(DeltaBaseTransform),
    DeltaGripper(DeltaGripperTransform),
}

impl Default for PoseTransform {
    fn default() -> Self {
        PoseTransform::Absolute(AbsoluteTransform)
    }
}

impl PoseTransform {
    /// Get a transform by name.
    ///
    /// An unknown name is a configuration error.
    pub fn from_name(name: &str) -> Result<Self> {
        Self::with_base_euler(name, None)
    }

    /// Get a transform by name, aligned to a mount orientation.
    ///
    /// `base_euler` only affects the delta-gripper transform; other kinds
    /// ignore it.
    pub fn with_base_euler(name: &str, base_euler: Option<[f64; 3]>) -> Result<Self> {
        let kind: TransformKind = name.parse()?;
        Ok(Self::from_kind(kind, base_euler))
    }

    /// Build a transform from its parsed kind.
    pub fn from_kind(kind: TransformKind, base_euler: Option<[f64; 3]>) -> Self {
        if base_euler.is_some() && kind != TransformKind::DeltaGripper {
            log::debug!("base_euler has no effect on the {} transform, ignoring it", kind);
        }
        log::debug!("creating {} transform (base_euler: {:?})", kind, base_euler);

        match kind {
            TransformKind::Absolute => PoseTransform::Absolute(AbsoluteTransform),
            TransformKind::DeltaBase => PoseTransform::DeltaBase(DeltaBaseTransform),
            TransformKind::DeltaGripper => PoseTransform::DeltaGripper(match base_euler {
                Some(euler) => DeltaGripperTransform::with_base_euler(euler),
                None => DeltaGripperTransform::new(),
            }),
        }
    }

    /// Build a transform from configuration.
    pub fn from_config(config: &TransformConfig) -> Result<Self> {
        Self::with_base_euler(&config.transform_type, config.base_euler)
    }

    pub fn kind(&self) -> TransformKind {
        match self {
            PoseTransform::Absolute(_) => TransformKind::Absolute,
            PoseTransform::DeltaBase(_) => TransformKind::DeltaBase,
            PoseTransform::DeltaGripper(_) => TransformKind::DeltaGripper,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Encode `next` relative to the absolute `state`.
    #[inline(always)]
    pub fn forward(&self, state: &Pose, next: &Pose) -> Pose {
        match self {
            PoseTransform::Absolute(t) => t.forward(state, next),
            PoseTransform::DeltaBase(t) => t.forward(state, next),
            PoseTransform::DeltaGripper(t) => t.forward(state, next),
        }
    }

    /// Recover the absolute pose encoded by `action` relative to `state`.
    #[inline(always)]
    pub fn inverse(&self, state: &Pose, action: &Pose) -> Pose {
        match self {
            PoseTransform::Absolute(t) => t.inverse(state, action),
            PoseTransform::DeltaBase(t) => t.inverse(state, action),
            PoseTransform::DeltaGripper(t) => t.inverse(state, action),
        }
    }

    /// `forward` on raw 7-channel slices.
    pub fn forward_slice(&self, state: &[f64], next: &[f64]) -> Result<Vec<f64>> {
        let state = Pose::from_slice(state)?;
        let next = Pose::from_slice(next)?;
        Ok(self.forward(&state, &next).to_array().to_vec())
    }

    /// `inverse` on raw 7-channel slices.
    pub fn inverse_slice(&self, state: &[f64], action: &[f64]) -> Result<Vec<f64>> {
        let state = Pose::from_slice(state)?;
        let action = Pose::from_slice(action)?;
        Ok(self.inverse(&state, &action).to_array().to_vec())
    }
}

impl Sealed for PoseTransform {}

impl ArmTransform for PoseTransform {
    #[inline(always)]
    fn forward(&self, state: &Pose, next: &Pose) -> Pose {
        PoseTransform::forward(self, state, next)
    }

    #[inline(always)]
    fn inverse(&self, state: &Pose, action: &Pose) -> Pose {
        PoseTransform::inverse(self, state, action)
    }
}
