//! Sample emission for recorded episodes.

use crate::config::RecordingConfig;
use crate::nonoop::MotionGate;
use crate::pose::validate_arm_vector;
use crate::{BimanualTransform, PoseTransform, Result};

/// One recorded (state, action) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// Tick of `next` in the episode; the initial state is tick 0.
    pub index: usize,
    /// Reference state the action is relative to.
    pub state: Vec<f64>,
    /// `next` encoded relative to `state`.
    pub action: Vec<f64>,
}

/// Kept and dropped frame counts of an episode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordingStats {
    pub kept: usize,
    pub dropped: usize,
}

impl RecordingStats {
    /// Ticks pushed after the initial state.
    pub fn total(&self) -> usize {
        self.kept + self.dropped
    }
}

/// Turns the absolute states of one episode into samples, dropping no-op frames.
///
/// # Examples
///
/// ```
/// use eetransform_rs::{EpisodeRecorder, RecordingConfig};
///
/// let config = RecordingConfig::new("ee_delta_base");
/// let mut recorder = EpisodeRecorder::new(&config, &[0.0, 0.0, 0.3, 0.0, 0.0, 0.0, 0.5]).unwrap();
///
/// // Too small to be kept
/// assert!(recorder.push(&[0.0001, 0.0, 0.3, 0.0, 0.0, 0.0, 0.5]).unwrap().is_none());
///
/// let sample = recorder.push(&[0.05, 0.0, 0.3, 0.0, 0.0, 0.0, 0.5]).unwrap().unwrap();
/// assert_eq!(sample.index, 2);
/// assert!((sample.action[0] - 0.05).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct EpisodeRecorder {
    gate: MotionGate,
    transform: BimanualTransform,
    tick: usize,
    stats: RecordingStats,
}

impl EpisodeRecorder {
    /// Start an episode at its first absolute state.
    pub fn new(config: &RecordingConfig, initial: &[f64]) -> Result<Self> {
        validate_arm_vector(initial)?;
        config.thresholds.validate()?;
        let transform = PoseTransform::from_name(&config.transform_type)?;
        log::debug!(
            "recording {} actions, advance policy {:?}",
            transform.name(),
            config.advance_policy
        );
        Ok(Self {
            gate: MotionGate::new(config.thresholds, config.advance_policy, initial)?,
            transform: BimanualTransform::new(transform),
            tick: 0,
            stats: RecordingStats::default(),
        })
    }

    /// Feed the next absolute state of the episode.
    ///
    /// Returns `None` if the frame is dropped as a no-op.
    pub fn push(&mut self, next: &[f64]) -> Result<Option<Sample>> {
        let state = self.gate.previous().to_vec();
        let keep = self.gate.check(next)?;
        self.tick += 1;

        if !keep {
            log::debug!("Skipping frame {}", self.tick);
            self.stats.dropped += 1;
            return Ok(None);
        }

        let action = self.transform.forward(&state, next)?;
        self.stats.kept += 1;
        Ok(Some(Sample {
            index: self.tick,
            state,
            action,
        }))
    }

    /// Feed a whole episode after the initial state, returning the kept samples.
    pub fn extend<'a, I>(&mut self, states: I) -> Result<Vec<Sample>>
    where
        I: IntoIterator<Item = &'a [f64]>,
    {
        let mut samples = Vec::new();
        for state in states {
            if let Some(sample) = self.push(state)? {
                samples.push(sample);
            }
        }
        Ok(samples)
    }

    pub fn transform(&self) -> &PoseTransform {
        self.transform.transform()
    }

    pub fn stats(&self) -> RecordingStats {
        self.stats
    }

    /// Close the episode.
    pub fn finish(self) -> RecordingStats {
        log::debug!(
            "episode finished: {} kept, {} dropped",
            self.stats.kept,
            self.stats.dropped
        );
        self.stats
    }
}
