//! SciPy functions port.
//!
//! Ported from:
//! - scipy.spatial.transform.Rotation (`from_euler` / `as_euler` for the `'xyz'` sequence)

mod rotation;

pub use rotation::*;
