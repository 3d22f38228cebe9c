//! Euler angle conversions ported from scipy.spatial.transform.Rotation
//!
//! Only the lowercase `'xyz'` sequence is supported: rotations about the fixed
//! x, y and z axes, applied in that order, so `R = Rz(yaw) * Ry(pitch) * Rx(roll)`.
//! Every pose in the crate goes through these two functions, which keeps the
//! convention identical between recording and playback.

use nalgebra::{Matrix3, Rotation3, Vector3};

use crate::utils::warn_once;

/// Below this value of `cos(pitch)` the decomposition is treated as gimbal locked.
const GIMBAL_LOCK_EPSILON: f64 = 1e-9;

/// `Rotation.from_euler('xyz', [roll, pitch, yaw]).as_matrix()`
pub fn euler_to_rotation_matrix(euler: &Vector3<f64>) -> Matrix3<f64> {
    Rotation3::from_euler_angles(euler.x, euler.y, euler.z).into_inner()
}

/// `Rotation.from_matrix(matrix).as_euler('xyz')`
///
/// Returns `[roll, pitch, yaw]` with roll and yaw in (-pi, pi] and pitch in
/// [-pi/2, pi/2]. At gimbal lock the yaw angle is set to zero, as scipy does,
/// and all of the remaining rotation is folded into roll.
pub fn rotation_matrix_to_euler(matrix: &Matrix3<f64>) -> Vector3<f64> {
    let sin_pitch = -matrix[(2, 0)];
    let cos_pitch = (matrix[(0, 0)] * matrix[(0, 0)] + matrix[(1, 0)] * matrix[(1, 0)]).sqrt();
    let pitch = sin_pitch.atan2(cos_pitch);

    if cos_pitch > GIMBAL_LOCK_EPSILON {
        let roll = matrix[(2, 1)].atan2(matrix[(2, 2)]);
        let yaw = matrix[(1, 0)].atan2(matrix[(0, 0)]);
        return Vector3::new(roll, pitch, yaw);
    }

    warn_once("Gimbal lock detected. Setting third angle to zero since it is not possible to uniquely determine all angles.");

    // With yaw fixed at zero, row 0 / row 1 of the matrix only depend on
    // roll - yaw (pitch = +pi/2) or roll + yaw (pitch = -pi/2).
    let roll = if sin_pitch > 0.0 {
        matrix[(0, 1)].atan2(matrix[(1, 1)])
    } else {
        (-matrix[(0, 1)]).atan2(matrix[(1, 1)])
    };
    Vector3::new(roll, pitch, 0.0)
}

/// Heading of a frame: the image of the local x axis in world coordinates.
pub fn x_axis(matrix: &Matrix3<f64>) -> Vector3<f64> {
    matrix.column(0).into_owned()
}
