//! Python bindings for eetransform-rs using PyO3.
//!
//! Vectors cross the boundary as 1D float64 numpy arrays of 7 or 14 channels.

use numpy::ndarray::Array1;
use numpy::{IntoPyArray, PyArray1, PyReadonlyArray1};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

mod nonoop;
mod trajectory;
mod transforms;

pub use nonoop::PyMotionGate;
pub use trajectory::PyTrajectoryAccumulator;
pub use transforms::{PyPoseTransform, PyUnitStandardizer};

/// Map a crate error to a Python `ValueError`.
pub(crate) fn to_py_err(err: crate::Error) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Copy a 1D numpy array into a Vec.
pub(crate) fn numpy_to_vec(array: &PyReadonlyArray1<'_, f64>) -> Vec<f64> {
    array.as_array().iter().copied().collect()
}

/// Helper to convert a slice to a 1D numpy array.
pub(crate) fn vec_to_numpy1<'py>(py: Python<'py>, data: &[f64]) -> Bound<'py, PyArray1<f64>> {
    Array1::from_vec(data.to_vec()).into_pyarray_bound(py)
}

/// Python module for eetransform-rs.
///
/// The function is named `_eetransform_rs` with underscore prefix for mixed Python/Rust projects.
#[pymodule]
fn _eetransform_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyPoseTransform>()?;
    m.add_class::<PyUnitStandardizer>()?;
    m.add_class::<PyMotionGate>()?;
    m.add_class::<PyTrajectoryAccumulator>()?;

    m.add_function(wrap_pyfunction!(nonoop::is_motion, m)?)?;

    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
