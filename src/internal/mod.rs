//! Internal modules ported from external libraries.
//!
//! These modules contain code adapted from:
//! - scipy: `scipy.spatial.transform.Rotation` Euler conversions

pub mod scipy;
