//! Unit standardization between hardware encodings and canonical units.
//!
//! Canonical units are meters, radians and a normalized gripper value. Each
//! hardware family converts its raw encoding to and from that representation.
//! Standardizations are looked up by name, like the transforms.

mod identity;
mod piper;

pub use identity::IdentityStandardization;
pub use piper::PiperStandardization;

use crate::pose::{split_arm_blocks, validate_arm_vector, ARM_DIM};
use crate::{Error, Pose, Result};

/// Supported standardization families.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnitStandardizer {
    Identity(IdentityStandardization),
    Piper(PiperStandardization),
}

impl Default for UnitStandardizer {
    fn default() -> Self {
        UnitStandardizer::Identity(IdentityStandardization)
    }
}

/// Get a standardization by name.
///
/// Supported names:
/// - "dummy", "identity", "none" -> values are already canonical
/// - "piper", "piper_end_effector", "bi_piper_end_effector" -> Piper counts
pub fn standardization_by_name(name: &str) -> Result<UnitStandardizer> {
    match name {
        "dummy" | "identity" | "none" => Ok(UnitStandardizer::Identity(IdentityStandardization)),
        "piper" | "piper_end_effector" | "bi_piper_end_effector" => {
            Ok(UnitStandardizer::Piper(PiperStandardization::default()))
        }
        _ => Err(Error::UnknownStandardization(name.to_string())),
    }
}

impl UnitStandardizer {
    pub fn name(&self) -> &'static str {
        match self {
            UnitStandardizer::Identity(_) => "dummy",
            UnitStandardizer::Piper(_) => "piper",
        }
    }

    /// Convert one hardware arm block to a canonical pose.
    #[inline(always)]
    pub fn to_canonical(&self, hardware: &[f64; ARM_DIM]) -> Pose {
        match self {
            UnitStandardizer::Identity(s) => s.to_canonical(hardware),
            UnitStandardizer::Piper(s) => s.to_canonical(hardware),
        }
    }

    /// Convert a canonical pose to one hardware arm block.
    #[inline(always)]
    pub fn to_hardware(&self, pose: &Pose) -> [f64; ARM_DIM] {
        match self {
            UnitStandardizer::Identity(s) => s.to_hardware(pose),
            UnitStandardizer::Piper(s) => s.to_hardware(pose),
        }
    }

    /// Size of one hardware unit in canonical units, per channel.
    ///
    /// Zero for the identity family, which does not quantize.
    pub fn quantization_step(&self) -> [f64; ARM_DIM] {
        match self {
            UnitStandardizer::Identity(_) => [0.0; ARM_DIM],
            UnitStandardizer::Piper(s) => s.quantization_step(),
        }
    }

    /// Convert a 7- or 14-channel hardware vector to canonical arm poses.
    pub fn to_canonical_slice(&self, hardware: &[f64]) -> Result<Vec<Pose>> {
        validate_arm_vector(hardware)?;
        Ok(hardware
            .chunks_exact(ARM_DIM)
            .map(|block| {
                let mut channels = [0.0; ARM_DIM];
                channels.copy_from_slice(block);
                self.to_canonical(&channels)
            })
            .collect())
    }

    /// Convert canonical arm poses back to one hardware vector.
    pub fn to_hardware_slice(&self, poses: &[Pose]) -> Vec<f64> {
        poses.iter().flat_map(|pose| self.to_hardware(pose)).collect()
    }

    /// Convert a canonical 7 or 14 channel vector to hardware units.
    pub fn to_hardware_vector(&self, canonical: &[f64]) -> Result<Vec<f64>> {
        validate_arm_vector(canonical)?;
        let poses = split_arm_blocks(canonical)?;
        Ok(self.to_hardware_slice(&poses))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use approx::assert_relative_eq;

    #[test]
    fn test_standardization_by_name() {
        assert_eq!(standardization_by_name("dummy").unwrap().name(), "dummy");
        assert_eq!(standardization_by_name("identity").unwrap().name(), "dummy");
        assert_eq!(standardization_by_name("piper").unwrap().name(), "piper");
        assert_eq!(
            standardization_by_name("bi_piper_end_effector").unwrap().name(),
            "piper"
        );
    }

    #[test]
    fn test_unknown_standardization() {
        let err = standardization_by_name("ur5").unwrap_err();
        assert_eq!(err, Error::UnknownStandardization("ur5".to_string()));
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_identity_is_passthrough() {
        let standardizer = UnitStandardizer::default();
        let values = [0.12345, -0.5, 0.3, 0.1, -0.2, 3.0, 0.77];
        let pose = standardizer.to_canonical(&values);
        assert_eq!(pose.to_array(), values);
        assert_eq!(standardizer.to_hardware(&pose), values);
        assert_eq!(standardizer.quantization_step(), [0.0; 7]);
    }

    #[test]
    fn test_canonical_roundtrip_within_quantization() {
        let standardizer = standardization_by_name("piper").unwrap();
        let pose = Pose::new([0.1234567, -0.2000003, 0.3000004], [0.5, -1.0, 2.9], 0.913);
        let restored = standardizer.to_canonical(&standardizer.to_hardware(&pose));

        let step = standardizer.quantization_step();
        for ((got, want), step) in restored.to_array().iter().zip(pose.to_array()).zip(step) {
            assert!((got - want).abs() <= step * (1.0 + 1e-6), "{} vs {}", got, want);
        }
    }

    #[test]
    fn test_bimanual_slice() {
        let standardizer = standardization_by_name("piper").unwrap();
        let single = [100000.0, 0.0, 300000.0, 0.0, 0.0, 0.0, 60000.0];
        let hardware: Vec<f64> = single.iter().chain(single.iter()).copied().collect();

        let poses = standardizer.to_canonical_slice(&hardware).unwrap();
        assert_eq!(poses.len(), 2);
        assert_relative_eq!(poses[1].position.z, 0.3, epsilon = 1e-12);

        let back = standardizer.to_hardware_slice(&poses);
        assert_eq!(back.len(), 14);
        assert!(standardizer.to_canonical_slice(&hardware[..10]).is_err());
    }

    #[test]
    fn test_vector_conversions_accept_same_shapes() {
        let standardizer = standardization_by_name("piper").unwrap();
        let canonical = [0.1, 0.0, 0.3, 0.0, 0.0, 0.0, 1.6];
        let dual: Vec<f64> = canonical.iter().chain(canonical.iter()).copied().collect();

        assert_eq!(standardizer.to_hardware_vector(&dual).unwrap().len(), 14);
        assert_eq!(standardizer.to_hardware_vector(&canonical).unwrap()[6], 60000.0);
        for channels in [0, 13, 21, 28] {
            let values = vec![0.0; channels];
            let err = standardizer.to_hardware_vector(&values).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Shape);
            assert_eq!(err, standardizer.to_canonical_slice(&values).unwrap_err());
        }
    }
}
