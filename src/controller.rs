//! Command path of an end-effector controlled arm (or pair of arms).
//!
//! The controller never talks to hardware itself: the caller passes in the
//! measured hardware state and gets back the hardware target to send.

use std::collections::HashMap;

use crate::config::ControllerConfig;
use crate::pose::{join_arm_blocks, vector_from_named};
use crate::standardization::{standardization_by_name, UnitStandardizer};
use crate::trajectory::{BimanualTrajectory, Trajectory, TrajectoryAccumulator};
use crate::{Error, Pose, PoseTransform, Result};

/// Per-arm record of observed absolute poses.
#[derive(Debug, Clone)]
enum Monitor {
    Single(TrajectoryAccumulator),
    Bimanual(BimanualTrajectory),
}

/// Maps actions in the configured encoding to hardware targets.
///
/// # Examples
///
/// ```
/// use eetransform_rs::{ControllerConfig, EndEffectorController};
///
/// let config = ControllerConfig::piper("ee_delta_base");
/// let controller = EndEffectorController::new(config).unwrap();
///
/// // Move 1 cm along x from the current state
/// let current = [100000.0, 0.0, 300000.0, 0.0, 0.0, 0.0, 60000.0];
/// let target = controller.command(&[0.01, 0.0, 0.0, 0.0, 0.0, 0.0, 1.6], &current).unwrap();
/// assert_eq!(target[0], 110000.0);
/// ```
#[derive(Debug, Clone)]
pub struct EndEffectorController {
    transform: PoseTransform,
    standardizer: UnitStandardizer,
    delta_with_previous: bool,
    n_arms: usize,
    initial_state: Vec<f64>,
    base_state: Vec<f64>,
    monitor: Option<Monitor>,
}

impl EndEffectorController {
    pub fn new(config: ControllerConfig) -> Result<Self> {
        let n_arms = config.n_arms()?;
        let transform = PoseTransform::from_config(&config.transform_config())?;
        let standardizer = standardization_by_name(&config.standardization)?;

        let monitor = if config.monitor {
            let initial = standardizer.to_canonical_slice(&config.init_ee_state)?;
            let absolute = PoseTransform::default();
            Some(match initial.as_slice() {
                [single] => Monitor::Single(TrajectoryAccumulator::from_transform(absolute, single)),
                blocks => Monitor::Bimanual(BimanualTrajectory::new(absolute, &join_arm_blocks(blocks))?),
            })
        } else {
            None
        };

        log::debug!(
            "end-effector controller: {} arm(s), {} control, {} units, delta_with_previous={}",
            n_arms,
            transform.name(),
            standardizer.name(),
            config.delta_with_previous
        );

        Ok(Self {
            transform,
            standardizer,
            delta_with_previous: config.delta_with_previous,
            n_arms,
            base_state: config.init_ee_state.clone(),
            initial_state: config.init_ee_state,
            monitor,
        })
    }

    /// Capture the base state deltas are applied to when
    /// `delta_with_previous` is off.
    pub fn connect(&mut self, hardware: &[f64]) -> Result<()> {
        self.check_len(hardware)?;
        self.base_state = hardware.to_vec();
        Ok(())
    }

    /// Hardware target for `action`, given the measured hardware state.
    pub fn command(&self, action: &[f64], current: &[f64]) -> Result<Vec<f64>> {
        self.check_len(action)?;
        self.check_len(current)?;

        let reference = if self.delta_with_previous {
            current
        } else {
            self.base_state.as_slice()
        };
        let states = self.standardizer.to_canonical_slice(reference)?;

        let targets = states
            .iter()
            .zip(action.chunks_exact(crate::ARM_DIM))
            .map(|(state, block)| -> Result<Pose> {
                Ok(self.transform.inverse(state, &Pose::from_slice(block)?))
            })
            .collect::<Result<Vec<Pose>>>()?;

        Ok(self.standardizer.to_hardware_slice(&targets))
    }

    /// `command` with the action given as named channels
    /// (`x`, `y`, ... or `left_x`, ..., `right_gripper`).
    pub fn command_named(&self, action: &HashMap<String, f64>, current: &[f64]) -> Result<Vec<f64>> {
        let action = vector_from_named(action, self.n_arms)?;
        self.command(&action, current)
    }

    /// Canonical state of a measured hardware state, recorded into the
    /// trajectories when monitoring is on.
    pub fn observe(&mut self, hardware: &[f64]) -> Result<Vec<f64>> {
        self.check_len(hardware)?;
        let poses = self.standardizer.to_canonical_slice(hardware)?;
        let canonical = join_arm_blocks(&poses);

        match &mut self.monitor {
            Some(Monitor::Single(accumulator)) => {
                accumulator.append(&poses[0]);
            }
            Some(Monitor::Bimanual(trajectories)) => {
                trajectories.append(&canonical)?;
            }
            None => {}
        }
        Ok(canonical)
    }

    /// Observed trajectories, one per arm. Empty if monitoring is off.
    pub fn trajectories(&self) -> Vec<&Trajectory> {
        match &self.monitor {
            Some(Monitor::Single(accumulator)) => vec![accumulator.trajectory()],
            Some(Monitor::Bimanual(trajectories)) => trajectories.trajectories().to_vec(),
            None => Vec::new(),
        }
    }

    pub fn transform(&self) -> &PoseTransform {
        &self.transform
    }

    pub fn standardizer(&self) -> &UnitStandardizer {
        &self.standardizer
    }

    pub fn n_arms(&self) -> usize {
        self.n_arms
    }

    /// Configured initial hardware state.
    pub fn initial_state(&self) -> &[f64] {
        &self.initial_state
    }

    pub fn base_state(&self) -> &[f64] {
        &self.base_state
    }

    fn check_len(&self, values: &[f64]) -> Result<()> {
        let expected = self.n_arms * crate::ARM_DIM;
        if values.len() != expected {
            return Err(Error::shape(format!("{} channels", expected), values.len()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use approx::assert_relative_eq;

    const INIT: [f64; 7] = [100000.0, 0.0, 300000.0, 0.0, 0.0, 0.0, 60000.0];

    #[test]
    fn test_absolute_command() {
        let controller = EndEffectorController::new(ControllerConfig::piper("ee_absolute")).unwrap();
        let target = controller
            .command(&[0.2, -0.05, 0.25, 0.0, 0.0, 0.0, 0.8], &INIT)
            .unwrap();
        assert_eq!(target, vec![200000.0, -50000.0, 250000.0, 0.0, 0.0, 0.0, 30000.0]);
    }

    #[test]
    fn test_delta_with_previous_uses_current() {
        let controller = EndEffectorController::new(ControllerConfig::piper("ee_delta_base")).unwrap();
        let current = [150000.0, 0.0, 300000.0, 0.0, 0.0, 0.0, 60000.0];
        let target = controller
            .command(&[0.0, 0.01, 0.0, 0.0, 0.0, 0.0, 1.6], &current)
            .unwrap();
        assert_eq!(target[0], 150000.0);
        assert_eq!(target[1], 10000.0);
    }

    #[test]
    fn test_delta_from_base_state() {
        let config = ControllerConfig {
            delta_with_previous: false,
            ..ControllerConfig::piper("ee_delta_base")
        };
        let mut controller = EndEffectorController::new(config).unwrap();
        let current = [150000.0, 0.0, 300000.0, 0.0, 0.0, 0.0, 60000.0];
        let action = [0.0, 0.0, 0.01, 0.0, 0.0, 0.0, 1.6];

        // Before connect the configured initial state is the base
        let target = controller.command(&action, &current).unwrap();
        assert_eq!(target[0], 100000.0);

        controller.connect(&current).unwrap();
        let target = controller.command(&action, &INIT).unwrap();
        assert_eq!(target[0], 150000.0);
        assert_eq!(target[2], 310000.0);
    }

    #[test]
    fn test_bimanual_named_command() {
        let controller = EndEffectorController::new(ControllerConfig::bi_piper("ee_delta_gripper")).unwrap();
        let current = controller.initial_state().to_vec();

        let mut action = HashMap::new();
        for (prefix, x) in [("left_", 0.0), ("right_", 0.01)] {
            for (name, value) in Pose::new([x, 0.0, 0.0], [0.0; 3], 1.6).to_named(prefix) {
                action.insert(name, value);
            }
        }

        let target = controller.command_named(&action, &current).unwrap();
        assert_eq!(target.len(), 14);
        // Left arm does not move
        assert_eq!(&target[..3], &current[..3]);
        // Camera-down mount: the gripper x step is world +z for a level flange
        assert_eq!(target[7], current[7]);
        assert_eq!(target[9], current[9] + 10000.0);
    }

    #[test]
    fn test_observe_records_trajectory() {
        let config = ControllerConfig {
            monitor: true,
            ..ControllerConfig::piper("ee_delta_gripper")
        };
        let mut controller = EndEffectorController::new(config).unwrap();
        let canonical = controller.observe(&INIT).unwrap();

        assert_relative_eq!(canonical[0], 0.1, epsilon = 1e-12);
        assert_relative_eq!(canonical[6], 1.6, epsilon = 1e-12);

        let trajectories = controller.trajectories();
        assert_eq!(trajectories.len(), 1);
        assert_eq!(trajectories[0].len(), 1);
        assert_relative_eq!(trajectories[0].poses()[0].position.z, 0.3, epsilon = 1e-12);
    }

    #[test]
    fn test_bimanual_monitor() {
        let config = ControllerConfig {
            monitor: true,
            ..ControllerConfig::bi_piper("ee_absolute")
        };
        let mut controller = EndEffectorController::new(config).unwrap();
        let state = controller.initial_state().to_vec();
        controller.observe(&state).unwrap();
        controller.observe(&state).unwrap();

        let trajectories = controller.trajectories();
        assert_eq!(trajectories.len(), 2);
        assert_eq!(trajectories[1].steps(), &[0, 1]);
    }

    #[test]
    fn test_no_monitor_by_default() {
        let mut controller = EndEffectorController::new(ControllerConfig::default()).unwrap();
        controller.observe(&[0.1, 0.0, 0.3, 0.0, 0.0, 0.0, 1.0]).unwrap();
        assert!(controller.trajectories().is_empty());
    }

    #[test]
    fn test_wrong_lengths() {
        let mut controller = EndEffectorController::new(ControllerConfig::piper("ee_absolute")).unwrap();
        let err = controller.command(&[0.0; 14], &INIT).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Shape);
        assert!(controller.connect(&[0.0; 6]).is_err());
    }

    #[test]
    fn test_invalid_config() {
        let config = ControllerConfig {
            standardization: "kuka".to_string(),
            ..ControllerConfig::default()
        };
        assert_eq!(
            EndEffectorController::new(config).unwrap_err(),
            Error::UnknownStandardization("kuka".to_string())
        );
    }
}
