//! Pose transforms between absolute poses and relative encodings.
//!
//! This module provides three encodings:
//! - `AbsoluteTransform` - actions are absolute poses
//! - `DeltaBaseTransform` - deltas in the fixed robot base frame
//! - `DeltaGripperTransform` - deltas in the gripper's own frame
//!
//! `PoseTransform` wraps the closed set and is what the rest of the crate uses.

mod traits;
mod absolute;
mod delta_base;
mod delta_gripper;
mod dispatch;

pub use traits::ArmTransform;
pub use absolute::AbsoluteTransform;
pub use delta_base::DeltaBaseTransform;
pub use delta_gripper::DeltaGripperTransform;
pub use dispatch::{PoseTransform, TransformKind};
