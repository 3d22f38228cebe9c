//! Python wrapper for trajectory reconstruction.

use numpy::ndarray::Array2;
use numpy::{IntoPyArray, PyArray1, PyArray2, PyReadonlyArray1};
use pyo3::prelude::*;

use crate::{Pose, TrajectoryAccumulator};

use super::{numpy_to_vec, to_py_err, vec_to_numpy1};

/// Integrates absolute or relative poses of one arm into a world-frame trajectory.
#[pyclass(name = "TrajectoryAccumulator")]
pub struct PyTrajectoryAccumulator {
    inner: TrajectoryAccumulator,
}

fn pose_from_numpy(values: &PyReadonlyArray1<'_, f64>) -> PyResult<Pose> {
    Pose::from_slice(&numpy_to_vec(values)).map_err(to_py_err)
}

#[pymethods]
impl PyTrajectoryAccumulator {
    #[new]
    #[pyo3(signature = (mode, initial, base_euler=None))]
    fn new(mode: &str, initial: PyReadonlyArray1<'_, f64>, base_euler: Option<[f64; 3]>) -> PyResult<Self> {
        let initial = pose_from_numpy(&initial)?;
        let inner = TrajectoryAccumulator::with_base_euler(mode, base_euler, &initial).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    fn reset(&mut self, initial: PyReadonlyArray1<'_, f64>) -> PyResult<()> {
        let initial = pose_from_numpy(&initial)?;
        self.inner.reset(&initial);
        Ok(())
    }

    /// Integrate one pose and return the resulting absolute pose.
    fn append<'py>(
        &mut self,
        py: Python<'py>,
        incoming: PyReadonlyArray1<'py, f64>,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        let incoming = pose_from_numpy(&incoming)?;
        Ok(vec_to_numpy1(py, &self.inner.append(&incoming).to_array()))
    }

    /// Recorded poses as an (n, 7) array.
    fn poses<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        let poses = self.inner.trajectory().poses();
        let mut arr = Array2::zeros((poses.len(), crate::ARM_DIM));
        for (i, pose) in poses.iter().enumerate() {
            for (j, value) in pose.to_array().iter().enumerate() {
                arr[[i, j]] = *value;
            }
        }
        arr.into_pyarray_bound(py)
    }

    /// Sub-sampled (positions, headings) arrays, each of shape (k, 3).
    fn headings<'py>(&self, py: Python<'py>) -> (Bound<'py, PyArray2<f64>>, Bound<'py, PyArray2<f64>>) {
        let headings = self.inner.trajectory().headings();
        let mut positions = Array2::zeros((headings.len(), 3));
        let mut directions = Array2::zeros((headings.len(), 3));
        for (i, (position, direction)) in headings.iter().enumerate() {
            for j in 0..3 {
                positions[[i, j]] = position[j];
                directions[[i, j]] = direction[j];
            }
        }
        (positions.into_pyarray_bound(py), directions.into_pyarray_bound(py))
    }

    fn __len__(&self) -> usize {
        self.inner.trajectory().len()
    }
}
