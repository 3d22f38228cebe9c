//! Python wrappers for no-op frame filtering.

use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::nonoop::{self as filtering, AdvancePolicy, MotionGate, Thresholds};

use super::{numpy_to_vec, to_py_err, vec_to_numpy1};

/// Whether `next` moved enough from `prev` to be kept.
#[pyfunction]
#[pyo3(signature = (prev, next, position_epsilon=1e-3, rotation_epsilon=std::f64::consts::PI / 180.0, gripper_epsilon=1e-2))]
pub fn is_motion(
    prev: PyReadonlyArray1<'_, f64>,
    next: PyReadonlyArray1<'_, f64>,
    position_epsilon: f64,
    rotation_epsilon: f64,
    gripper_epsilon: f64,
) -> PyResult<bool> {
    let thresholds = Thresholds::new(position_epsilon, rotation_epsilon, gripper_epsilon);
    filtering::is_motion(&numpy_to_vec(&prev), &numpy_to_vec(&next), &thresholds).map_err(to_py_err)
}

fn parse_policy(name: &str) -> PyResult<AdvancePolicy> {
    match name {
        "on_keep" => Ok(AdvancePolicy::OnKeep),
        "every_tick" => Ok(AdvancePolicy::EveryTick),
        _ => Err(PyValueError::new_err(format!(
            "advance_policy must be 'on_keep' or 'every_tick', got '{}'",
            name
        ))),
    }
}

/// Stateful no-op filter holding the previous state of a recording loop.
#[pyclass(name = "MotionGate")]
pub struct PyMotionGate {
    inner: MotionGate,
}

#[pymethods]
impl PyMotionGate {
    #[new]
    #[pyo3(signature = (initial, position_epsilon=1e-3, rotation_epsilon=std::f64::consts::PI / 180.0, gripper_epsilon=1e-2, advance_policy="on_keep"))]
    fn new(
        initial: PyReadonlyArray1<'_, f64>,
        position_epsilon: f64,
        rotation_epsilon: f64,
        gripper_epsilon: f64,
        advance_policy: &str,
    ) -> PyResult<Self> {
        let thresholds = Thresholds::new(position_epsilon, rotation_epsilon, gripper_epsilon);
        let inner = MotionGate::new(thresholds, parse_policy(advance_policy)?, &numpy_to_vec(&initial))
            .map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Decide whether to keep `next`.
    fn check(&mut self, next: PyReadonlyArray1<'_, f64>) -> PyResult<bool> {
        self.inner.check(&numpy_to_vec(&next)).map_err(to_py_err)
    }

    fn reset(&mut self, initial: PyReadonlyArray1<'_, f64>) -> PyResult<()> {
        self.inner.reset(&numpy_to_vec(&initial)).map_err(to_py_err)
    }

    #[getter]
    fn previous<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        vec_to_numpy1(py, self.inner.previous())
    }
}
