//! Trajectory reconstruction from streams of absolute or relative poses.
//!
//! An accumulator is fed the same vectors an arm would be commanded with and
//! integrates them into world-frame poses, e.g. to check a recorded episode
//! or to plot the path followed by a live controller.

use nalgebra::{Matrix4, Vector3};

use crate::internal::scipy::x_axis;
use crate::pose::{split_arm_blocks, BIMANUAL_DIM};
use crate::{Error, Pose, PoseTransform, Result, TransformKind};

/// Number of heading arrows a renderer draws along a trajectory.
const HEADING_ARROWS: usize = 20;

/// Ordered world-frame poses with their step indices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trajectory {
    steps: Vec<usize>,
    poses: Vec<Pose>,
}

impl Trajectory {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, pose: Pose) {
        self.steps.push(self.steps.len());
        self.poses.push(pose);
    }

    fn clear(&mut self) {
        self.steps.clear();
        self.poses.clear();
    }

    pub fn len(&self) -> usize {
        self.poses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }

    pub fn steps(&self) -> &[usize] {
        &self.steps
    }

    pub fn poses(&self) -> &[Pose] {
        &self.poses
    }

    pub fn positions(&self) -> Vec<Vector3<f64>> {
        self.poses.iter().map(|pose| pose.position).collect()
    }

    pub fn euler_angles(&self) -> Vec<Vector3<f64>> {
        self.poses.iter().map(|pose| pose.euler).collect()
    }

    pub fn grippers(&self) -> Vec<f64> {
        self.poses.iter().map(|pose| pose.gripper).collect()
    }

    pub fn last(&self) -> Option<&Pose> {
        self.poses.last()
    }

    /// Sub-sampled `(position, heading)` pairs, where the heading is the
    /// gripper x axis in world frame.
    ///
    /// Every `max(1, n / 20)`-th pose is used, starting with the first.
    pub fn headings(&self) -> Vec<(Vector3<f64>, Vector3<f64>)> {
        let stride = (self.poses.len() / HEADING_ARROWS).max(1);
        self.poses
            .iter()
            .step_by(stride)
            .map(|pose| (pose.position, x_axis(&pose.rotation_matrix())))
            .collect()
    }
}

/// World-frame reference a relative pose is applied to.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Reference {
    /// Last absolute pose.
    Pose(Pose),
    /// Homogeneous transform of the gripper frame in world.
    Frame { world: Matrix4<f64>, gripper: f64 },
}

/// Integrates a stream of poses in one encoding into a world-frame trajectory.
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectoryAccumulator {
    transform: PoseTransform,
    /// Alignment embedded in a 4x4 transform, delta-gripper mode only.
    alignment: Option<Matrix4<f64>>,
    reference: Reference,
    trajectory: Trajectory,
}

impl TrajectoryAccumulator {
    /// Create an accumulator for the named mode, seeded at `initial`.
    pub fn new(mode: &str, initial: &Pose) -> Result<Self> {
        Ok(Self::from_transform(PoseTransform::from_name(mode)?, initial))
    }

    /// Create an accumulator for the named mode with a mount orientation.
    pub fn with_base_euler(mode: &str, base_euler: Option<[f64; 3]>, initial: &Pose) -> Result<Self> {
        Ok(Self::from_transform(PoseTransform::with_base_euler(mode, base_euler)?, initial))
    }

    pub fn from_transform(transform: PoseTransform, initial: &Pose) -> Self {
        let alignment = match &transform {
            PoseTransform::DeltaGripper(t) => t.alignment().map(|align| align.to_homogeneous()),
            _ => None,
        };
        let mut accumulator = Self {
            transform,
            alignment,
            reference: Reference::Pose(*initial),
            trajectory: Trajectory::new(),
        };
        accumulator.reset(initial);
        accumulator
    }

    /// Clear the history and reseed the reference frame.
    ///
    /// The initial pose itself is not recorded.
    pub fn reset(&mut self, initial: &Pose) {
        self.trajectory.clear();
        self.reference = match self.transform.kind() {
            TransformKind::DeltaGripper => Reference::Frame {
                world: initial.homogeneous(),
                gripper: initial.gripper,
            },
            _ => Reference::Pose(*initial),
        };
    }

    /// Integrate one incoming pose and return the resulting absolute pose.
    pub fn append(&mut self, incoming: &Pose) -> Pose {
        let absolute = match &mut self.reference {
            Reference::Pose(last) => {
                *last = self.transform.inverse(last, incoming);
                *last
            }
            Reference::Frame { world, gripper } => {
                let mut relative = incoming.homogeneous();
                if let Some(align) = &self.alignment {
                    relative = align.transpose() * relative * align;
                }
                *world *= relative;
                *gripper = incoming.gripper;
                Pose::from_homogeneous(world, *gripper)
            }
        };
        self.trajectory.push(absolute);
        absolute
    }

    /// `append` on a raw 7-channel slice.
    pub fn append_slice(&mut self, incoming: &[f64]) -> Result<Pose> {
        Ok(self.append(&Pose::from_slice(incoming)?))
    }

    pub fn transform(&self) -> &PoseTransform {
        &self.transform
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    /// Current absolute pose of the reference frame.
    pub fn current(&self) -> Pose {
        match &self.reference {
            Reference::Pose(pose) => *pose,
            Reference::Frame { world, gripper } => Pose::from_homogeneous(world, *gripper),
        }
    }
}

/// One accumulator per arm, fed 14-channel vectors.
#[derive(Debug, Clone, PartialEq)]
pub struct BimanualTrajectory {
    left: TrajectoryAccumulator,
    right: TrajectoryAccumulator,
}

impl BimanualTrajectory {
    /// Seed both arms from a 14-channel initial vector.
    pub fn new(transform: PoseTransform, initial: &[f64]) -> Result<Self> {
        let [left, right] = Self::split(initial)?;
        Ok(Self {
            left: TrajectoryAccumulator::from_transform(transform, &left),
            right: TrajectoryAccumulator::from_transform(transform, &right),
        })
    }

    fn split(values: &[f64]) -> Result<[Pose; 2]> {
        if values.len() != BIMANUAL_DIM {
            return Err(Error::shape(format!("{} channels", BIMANUAL_DIM), values.len()));
        }
        let blocks = split_arm_blocks(values)?;
        Ok([blocks[0], blocks[1]])
    }

    pub fn reset(&mut self, initial: &[f64]) -> Result<()> {
        let [left, right] = Self::split(initial)?;
        self.left.reset(&left);
        self.right.reset(&right);
        Ok(())
    }

    /// Integrate one 14-channel vector; returns both absolute poses, left first.
    pub fn append(&mut self, incoming: &[f64]) -> Result<[Pose; 2]> {
        let [left, right] = Self::split(incoming)?;
        Ok([self.left.append(&left), self.right.append(&right)])
    }

    pub fn left(&self) -> &TrajectoryAccumulator {
        &self.left
    }

    pub fn right(&self) -> &TrajectoryAccumulator {
        &self.right
    }

    /// Both trajectories, left first.
    pub fn trajectories(&self) -> [&Trajectory; 2] {
        [self.left.trajectory(), self.right.trajectory()]
    }
}
