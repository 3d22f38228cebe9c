//! # eetransform - End-effector pose transforms
//!
//! Converts a robot end effector's absolute world-frame pose into, and back
//! from, the relative ("delta") encodings used to author training data and to
//! drive live control.
//!
//! ## Features
//!
//! - Absolute, delta-in-base-frame and delta-in-gripper-frame pose transforms
//! - Hardware unit standardization (integer device counts <-> meters/radians)
//! - Motion-significance filtering of consecutive samples ("nonoop" filter)
//! - Dual-arm vector composition
//! - Trajectory integration for monitoring and rendering
//!
//! ## Example
//!
//! ```rust
//! use eetransform_rs::{BimanualTransform, PoseTransform};
//!
//! let transform = BimanualTransform::new(PoseTransform::from_name("ee_delta_gripper").unwrap());
//!
//! let state = [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.5];
//! let next = [0.1, 0.0, 0.0, 0.0, 0.0, 0.0, 0.5];
//!
//! let delta = transform.forward(&state, &next).unwrap();
//! let restored = transform.inverse(&state, &delta).unwrap();
//! assert!((restored[0] - 0.1).abs() < 1e-12);
//! ```

// Internal modules (ports of scipy)
pub(crate) mod internal;

// Public modules
pub mod pose;
pub mod transform;
pub mod bimanual;
pub mod standardization;
pub mod nonoop;
pub mod trajectory;
pub mod recorder;
pub mod controller;
pub mod config;
pub mod utils;

// Optional modules
#[cfg(feature = "python")]
pub mod python;

// Re-exports for convenience
pub use pose::{DeltaPose, Pose, ARM_DIM, BIMANUAL_DIM};
pub use transform::{PoseTransform, TransformKind};
pub use bimanual::BimanualTransform;
pub use standardization::{standardization_by_name, UnitStandardizer};
pub use nonoop::{is_motion, AdvancePolicy, MotionGate, Thresholds};
pub use trajectory::{BimanualTrajectory, Trajectory, TrajectoryAccumulator};
pub use recorder::{EpisodeRecorder, RecordingStats, Sample};
pub use controller::EndEffectorController;
pub use config::{ControllerConfig, RecordingConfig, TransformConfig};

// Error types
pub use crate::error::{Error, ErrorKind, Result};

mod error {
    use thiserror::Error;

    /// Errors that can occur in the eetransform library
    #[derive(Error, Debug, Clone, PartialEq)]
    pub enum Error {
        #[error("Invalid configuration: {0}")]
        InvalidConfig(String),

        #[error("Unknown transform type: {0}")]
        UnknownTransform(String),

        #[error("Unknown standardization type: {0}")]
        UnknownStandardization(String),

        #[error("Invalid vector shape: expected {expected}, got {got}")]
        InvalidShape { expected: String, got: String },
    }

    /// The two classes of failure the library can report.
    ///
    /// Neither is transient: configuration errors surface at construction and
    /// shape errors are programming errors in the caller.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum ErrorKind {
        Configuration,
        Shape,
    }

    impl Error {
        /// Classify this error.
        pub fn kind(&self) -> ErrorKind {
            match self {
                Error::InvalidConfig(_)
                | Error::UnknownTransform(_)
                | Error::UnknownStandardization(_) => ErrorKind::Configuration,
                Error::InvalidShape { .. } => ErrorKind::Shape,
            }
        }

        pub(crate) fn shape(expected: impl Into<String>, got: usize) -> Self {
            Error::InvalidShape {
                expected: expected.into(),
                got: format!("{} channels", got),
            }
        }
    }

    /// Result type for eetransform operations
    pub type Result<T> = std::result::Result<T, Error>;
}
