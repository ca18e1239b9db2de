//! Quaternion/matrix helpers over plain arrays.
//!
//! Quaternions are (x, y, z, w). Matrices are row-major with the translation
//! in the fourth row.

use serde::{Deserialize, Serialize};
use snapsync_api_core::Mat4;

pub const RAD_TO_DEG: f32 = 180.0 / std::f32::consts::PI;
pub const INCH_TO_MILLIMETER: f32 = 25.4;

/// 180-degree turn about Y; post-multiplying by this flips the forward axis
/// convention for cameras and lights.
const ROT_Y_180: [f32; 4] = [0.0, 1.0, 0.0, 0.0];

/// Hamilton product a * b (apply b first, then a).
#[inline]
pub fn quat_mul(a: [f32; 4], b: [f32; 4]) -> [f32; 4] {
    let [ax, ay, az, aw] = a;
    let [bx, by, bz, bw] = b;
    [
        aw * bx + ax * bw + ay * bz - az * by,
        aw * by - ax * bz + ay * bw + az * bx,
        aw * bz + ax * by - ay * bx + az * bw,
        aw * bw - ax * bx - ay * by - az * bz,
    ]
}

#[inline]
pub fn quat_normalize(mut q: [f32; 4]) -> [f32; 4] {
    let len2 = q[0] * q[0] + q[1] * q[1] + q[2] * q[2] + q[3] * q[3];
    if len2 > 0.0 {
        let inv_len = len2.sqrt().recip();
        q[0] *= inv_len;
        q[1] *= inv_len;
        q[2] *= inv_len;
        q[3] *= inv_len;
    }
    q
}

/// Align the host's camera/light forward axis with the target convention.
#[inline]
pub fn flip_y(q: [f32; 4]) -> [f32; 4] {
    quat_mul(q, ROT_Y_180)
}

#[inline]
fn axis_angle_x(rad: f32) -> [f32; 4] {
    let h = rad * 0.5;
    [h.sin(), 0.0, 0.0, h.cos()]
}

#[inline]
fn axis_angle_y(rad: f32) -> [f32; 4] {
    let h = rad * 0.5;
    [0.0, h.sin(), 0.0, h.cos()]
}

#[inline]
fn axis_angle_z(rad: f32) -> [f32; 4] {
    let h = rad * 0.5;
    [0.0, 0.0, h.sin(), h.cos()]
}

/// Order in which per-axis rotations are applied to compose a rotation.
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum RotationOrder {
    #[default]
    Xyz,
    Yzx,
    Zxy,
    Xzy,
    Yxz,
    Zyx,
}

/// Compose a quaternion from Euler angles (radians), applying the axes in
/// the given order (first axis innermost).
pub fn euler_to_quat(euler: [f32; 3], order: RotationOrder) -> [f32; 4] {
    let qx = axis_angle_x(euler[0]);
    let qy = axis_angle_y(euler[1]);
    let qz = axis_angle_z(euler[2]);
    match order {
        RotationOrder::Xyz => quat_mul(qz, quat_mul(qy, qx)),
        RotationOrder::Yzx => quat_mul(qx, quat_mul(qz, qy)),
        RotationOrder::Zxy => quat_mul(qy, quat_mul(qx, qz)),
        RotationOrder::Xzy => quat_mul(qy, quat_mul(qz, qx)),
        RotationOrder::Yxz => quat_mul(qz, quat_mul(qx, qy)),
        RotationOrder::Zyx => quat_mul(qx, quat_mul(qy, qz)),
    }
}

/// Horizontal field of view in degrees from aperture and focal length, both
/// in millimeters.
#[inline]
pub fn compute_fov(aperture_mm: f32, focal_length_mm: f32) -> f32 {
    2.0 * (aperture_mm / (2.0 * focal_length_mm)).atan() * RAD_TO_DEG
}

/// Compose a local-to-world matrix from TRS components.
pub fn trs_matrix(t: [f32; 3], r: [f32; 4], s: [f32; 3]) -> Mat4 {
    let [x, y, z, w] = r;
    let (x2, y2, z2) = (x + x, y + y, z + z);
    let (xx, yy, zz) = (x * x2, y * y2, z * z2);
    let (xy, xz, yz) = (x * y2, x * z2, y * z2);
    let (wx, wy, wz) = (w * x2, w * y2, w * z2);
    [
        [(1.0 - (yy + zz)) * s[0], (xy + wz) * s[0], (xz - wy) * s[0], 0.0],
        [(xy - wz) * s[1], (1.0 - (xx + zz)) * s[1], (yz + wx) * s[1], 0.0],
        [(xz + wy) * s[2], (yz - wx) * s[2], (1.0 - (xx + yy)) * s[2], 0.0],
        [t[0], t[1], t[2], 1.0],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx4(a: [f32; 4], b: [f32; 4]) {
        for i in 0..4 {
            assert!((a[i] - b[i]).abs() < 1e-5, "left={a:?} right={b:?}");
        }
    }

    #[test]
    fn quat_mul_identity_is_neutral() {
        let q = quat_normalize([0.1, 0.2, 0.3, 0.9]);
        approx4(quat_mul(q, [0.0, 0.0, 0.0, 1.0]), q);
        approx4(quat_mul([0.0, 0.0, 0.0, 1.0], q), q);
    }

    #[test]
    fn flip_y_is_a_half_turn() {
        let q = quat_normalize([0.3, -0.1, 0.2, 0.9]);
        // Two flips are a full turn about Y, i.e. -identity on the double cover.
        let twice = flip_y(flip_y(q));
        approx4(twice, [-q[0], -q[1], -q[2], -q[3]]);
    }

    #[test]
    fn euler_single_axis_matches_axis_angle() {
        let half = std::f32::consts::FRAC_PI_2;
        for order in [
            RotationOrder::Xyz,
            RotationOrder::Yzx,
            RotationOrder::Zxy,
            RotationOrder::Xzy,
            RotationOrder::Yxz,
            RotationOrder::Zyx,
        ] {
            approx4(euler_to_quat([half, 0.0, 0.0], order), axis_angle_x(half));
            approx4(euler_to_quat([0.0, half, 0.0], order), axis_angle_y(half));
            approx4(euler_to_quat([0.0, 0.0, half], order), axis_angle_z(half));
        }
    }

    #[test]
    fn euler_orders_differ_for_mixed_axes() {
        let e = [0.4, -0.7, 1.1];
        let xyz = euler_to_quat(e, RotationOrder::Xyz);
        let zyx = euler_to_quat(e, RotationOrder::Zyx);
        assert!((xyz[0] - zyx[0]).abs() > 1e-4 || (xyz[2] - zyx[2]).abs() > 1e-4);
    }

    #[test]
    fn compute_fov_reference_values() {
        // 36mm aperture behind a 50mm lens: the classic ~39.6 degrees.
        assert!((compute_fov(36.0, 50.0) - 39.5978).abs() < 1e-3);
        assert!((compute_fov(24.0, 24.0) - 53.1301).abs() < 1e-3);
    }

    #[test]
    fn trs_matrix_identity() {
        let m = trs_matrix([0.0; 3], [0.0, 0.0, 0.0, 1.0], [1.0; 3]);
        assert_eq!(m, snapsync_api_core::MAT4_IDENTITY);
    }

    #[test]
    fn trs_matrix_translation_in_fourth_row() {
        let m = trs_matrix([1.0, 2.0, 3.0], [0.0, 0.0, 0.0, 1.0], [1.0; 3]);
        assert_eq!(m[3], [1.0, 2.0, 3.0, 1.0]);
    }
}
