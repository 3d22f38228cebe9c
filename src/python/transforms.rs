//! Python wrappers for pose transforms and unit standardizations.

use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::prelude::*;

use crate::standardization::{standardization_by_name, UnitStandardizer};
use crate::{BimanualTransform, PoseTransform};

use super::{numpy_to_vec, to_py_err, vec_to_numpy1};

/// A pose transform applied independently to each arm of a 7 or 14 channel vector.
#[pyclass(name = "PoseTransform")]
#[derive(Clone)]
pub struct PyPoseTransform {
    pub(crate) inner: BimanualTransform,
}

#[pymethods]
impl PyPoseTransform {
    /// Create a transform by name.
    ///
    /// Args:
    ///     name: "ee_absolute", "ee_delta_base" or "ee_delta_gripper".
    ///     base_euler: Optional mount orientation [roll, pitch, yaw] for "ee_delta_gripper".
    #[new]
    #[pyo3(signature = (name, base_euler=None))]
    fn new(name: &str, base_euler: Option<[f64; 3]>) -> PyResult<Self> {
        let transform = PoseTransform::with_base_euler(name, base_euler).map_err(to_py_err)?;
        Ok(Self {
            inner: BimanualTransform::new(transform),
        })
    }

    /// Encode `next` relative to `state`.
    fn forward<'py>(
        &self,
        py: Python<'py>,
        state: PyReadonlyArray1<'py, f64>,
        next: PyReadonlyArray1<'py, f64>,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        let result = self
            .inner
            .forward(&numpy_to_vec(&state), &numpy_to_vec(&next))
            .map_err(to_py_err)?;
        Ok(vec_to_numpy1(py, &result))
    }

    /// Recover the absolute pose encoded by `action` relative to `state`.
    fn inverse<'py>(
        &self,
        py: Python<'py>,
        state: PyReadonlyArray1<'py, f64>,
        action: PyReadonlyArray1<'py, f64>,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        let result = self
            .inner
            .inverse(&numpy_to_vec(&state), &numpy_to_vec(&action))
            .map_err(to_py_err)?;
        Ok(vec_to_numpy1(py, &result))
    }

    /// The canonical transform name.
    #[getter]
    fn name(&self) -> &'static str {
        self.inner.transform().name()
    }

    fn __repr__(&self) -> String {
        format!("PoseTransform('{}')", self.name())
    }
}

/// Conversion between hardware units and meters / radians.
#[pyclass(name = "UnitStandardizer")]
#[derive(Clone)]
pub struct PyUnitStandardizer {
    pub(crate) inner: UnitStandardizer,
}

#[pymethods]
impl PyUnitStandardizer {
    /// Create a standardization by name, e.g. "dummy" or "piper".
    #[new]
    fn new(name: &str) -> PyResult<Self> {
        Ok(Self {
            inner: standardization_by_name(name).map_err(to_py_err)?,
        })
    }

    /// Hardware vector to canonical units.
    fn to_canonical<'py>(
        &self,
        py: Python<'py>,
        hardware: PyReadonlyArray1<'py, f64>,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        let poses = self
            .inner
            .to_canonical_slice(&numpy_to_vec(&hardware))
            .map_err(to_py_err)?;
        Ok(vec_to_numpy1(py, &crate::pose::join_arm_blocks(&poses)))
    }

    /// Canonical vector to hardware units, truncated toward zero.
    fn to_hardware<'py>(
        &self,
        py: Python<'py>,
        canonical: PyReadonlyArray1<'py, f64>,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        let hardware = self
            .inner
            .to_hardware_vector(&numpy_to_vec(&canonical))
            .map_err(to_py_err)?;
        Ok(vec_to_numpy1(py, &hardware))
    }

    /// Size of one hardware count in canonical units, for one arm.
    fn quantization_step<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        vec_to_numpy1(py, &self.inner.quantization_step())
    }

    #[getter]
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn __repr__(&self) -> String {
        format!("UnitStandardizer('{}')", self.inner.name())
    }
}
