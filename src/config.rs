//! Configuration structures.
//!
//! All structures deserialize with serde, so they can be loaded from JSON or
//! any other serde format by the caller. Defaults match the values used by the
//! data-collection pipeline and the end-effector robots.

use serde::{Deserialize, Serialize};

use crate::nonoop::{AdvancePolicy, Thresholds};
use crate::{Error, Result};

fn default_transform_type() -> String {
    "ee_absolute".to_string()
}

fn default_standardization() -> String {
    "dummy".to_string()
}

fn default_delta_with_previous() -> bool {
    true
}

/// Hardware state a Piper arm is driven to on connect:
/// x = 100 mm, z = 300 mm, level orientation, gripper fully open.
fn default_init_ee_state() -> Vec<f64> {
    vec![100000.0, 0.0, 300000.0, 0.0, 0.0, 0.0, 60000.0]
}

/// Which pose encoding to use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformConfig {
    /// Transform name, e.g. "ee_absolute", "ee_delta_base", "ee_delta_gripper".
    #[serde(default = "default_transform_type")]
    pub transform_type: String,

    /// Mount orientation `[roll, pitch, yaw]` for the delta-gripper transform.
    #[serde(default)]
    pub base_euler: Option<[f64; 3]>,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            transform_type: default_transform_type(),
            base_euler: None,
        }
    }
}

impl TransformConfig {
    pub fn new(transform_type: &str) -> Self {
        Self {
            transform_type: transform_type.to_string(),
            base_euler: None,
        }
    }
}

/// Configuration of the sample-emission loop that turns an episode of
/// absolute states into recorded (state, action) samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordingConfig {
    #[serde(default = "default_transform_type")]
    pub transform_type: String,

    /// Motion thresholds below which a frame is dropped.
    #[serde(default)]
    pub thresholds: Thresholds,

    /// When the reference state used for filtering and deltas advances.
    #[serde(default)]
    pub advance_policy: AdvancePolicy,
}

impl Default for RecordingConfig {
    fn default() -> Self {
        Self {
            transform_type: default_transform_type(),
            thresholds: Thresholds::default(),
            advance_policy: AdvancePolicy::default(),
        }
    }
}

impl RecordingConfig {
    pub fn new(transform_type: &str) -> Self {
        Self {
            transform_type: transform_type.to_string(),
            ..Self::default()
        }
    }
}

/// Configuration of an end-effector controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// How incoming actions are encoded (transform name).
    #[serde(default = "default_transform_type")]
    pub control_mode: String,

    /// Mount orientation for delta-gripper control.
    #[serde(default)]
    pub base_euler: Option<[f64; 3]>,

    /// Apply deltas to the current measured state (`true`) or to the base
    /// state captured on connect (`false`).
    #[serde(default = "default_delta_with_previous")]
    pub delta_with_previous: bool,

    /// Unit standardization family, e.g. "dummy" or "piper".
    #[serde(default = "default_standardization")]
    pub standardization: String,

    /// Initial state in hardware units, 7 channels per arm.
    #[serde(default = "default_init_ee_state")]
    pub init_ee_state: Vec<f64>,

    /// Record the observed states into per-arm trajectories.
    #[serde(default)]
    pub monitor: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            control_mode: default_transform_type(),
            base_euler: None,
            delta_with_previous: default_delta_with_previous(),
            standardization: default_standardization(),
            init_ee_state: default_init_ee_state(),
            monitor: false,
        }
    }
}

impl ControllerConfig {
    /// Configuration for a Piper arm with the given control mode.
    pub fn piper(control_mode: &str) -> Self {
        Self {
            control_mode: control_mode.to_string(),
            standardization: "piper".to_string(),
            ..Self::default()
        }
    }

    /// Configuration for a dual Piper setup: the initial state is duplicated
    /// for both arms and the camera-down mount alignment is set.
    pub fn bi_piper(control_mode: &str) -> Self {
        let single = default_init_ee_state();
        let init_ee_state = single.iter().chain(single.iter()).copied().collect();
        Self {
            control_mode: control_mode.to_string(),
            base_euler: Some([0.0, 0.5 * std::f64::consts::PI, 0.0]),
            standardization: "piper".to_string(),
            init_ee_state,
            ..Self::default()
        }
    }

    pub(crate) fn transform_config(&self) -> TransformConfig {
        TransformConfig {
            transform_type: self.control_mode.clone(),
            base_euler: self.base_euler,
        }
    }

    /// Number of arms described by `init_ee_state`.
    pub fn n_arms(&self) -> Result<usize> {
        match self.init_ee_state.len() {
            crate::ARM_DIM => Ok(1),
            crate::BIMANUAL_DIM => Ok(2),
            other => Err(Error::InvalidConfig(format!(
                "init_ee_state must have {} or {} channels, got {}",
                crate::ARM_DIM,
                crate::BIMANUAL_DIM,
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_config_defaults() {
        let config: TransformConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, TransformConfig::default());
        assert_eq!(config.transform_type, "ee_absolute");
    }

    #[test]
    fn test_transform_config_from_json() {
        let config: TransformConfig = serde_json::from_str(
            r#"{"transform_type": "ee_delta_gripper", "base_euler": [0.0, 1.5707963267948966, 0.0]}"#,
        )
        .unwrap();
        assert_eq!(config.transform_type, "ee_delta_gripper");
        assert_eq!(config.base_euler, Some([0.0, std::f64::consts::FRAC_PI_2, 0.0]));
    }

    #[test]
    fn test_recording_config_from_json() {
        let config: RecordingConfig = serde_json::from_str(
            r#"{
                "transform_type": "ee_delta_gripper",
                "thresholds": {"position_epsilon": 0.002},
                "advance_policy": "every_tick"
            }"#,
        )
        .unwrap();
        assert_eq!(config.thresholds.position_epsilon, 0.002);
        assert_eq!(config.thresholds.rotation_epsilon, Thresholds::default().rotation_epsilon);
        assert_eq!(config.advance_policy, AdvancePolicy::EveryTick);
    }

    #[test]
    fn test_controller_config_defaults() {
        let config = ControllerConfig::default();
        assert!(config.delta_with_previous);
        assert_eq!(config.n_arms().unwrap(), 1);

        let bi = ControllerConfig::bi_piper("ee_delta_gripper");
        assert_eq!(bi.n_arms().unwrap(), 2);
        assert_eq!(&bi.init_ee_state[7..], &bi.init_ee_state[..7]);
    }

    #[test]
    fn test_controller_config_invalid_arms() {
        let config = ControllerConfig {
            init_ee_state: vec![0.0; 5],
            ..ControllerConfig::default()
        };
        assert!(config.n_arms().is_err());
    }
}
