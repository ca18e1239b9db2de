//! Animation-curve sampling.
//!
//! Sampling policy:
//! - sps == 0: sample exactly at the union of the input curves' native
//!   keyframe times, sorted and deduplicated.
//! - sps == N: `ceil(span * N) + 1` evenly spaced samples covering the union
//!   of the curves' key-time domains, endpoints inclusive.
//!
//! Multi-component channels share one time base; a component without a curve
//! falls back to its static value at every sample. A channel with no curves
//! at all stays empty ("not animated"), never a constant sequence.

use snapsync_api_core::{Channel, Sample};

use crate::host::AnimCurve;
use crate::math::{self, RotationOrder};

/// Times closer than this collapse to one sample when merging curves.
const TIME_MERGE_EPS: f32 = 1e-6;

/// Build the shared time base for a set of optional curves.
pub fn build_time_samples(curves: &[Option<&dyn AnimCurve>], sps: u32) -> Vec<f32> {
    let mut times = Vec::new();
    if sps == 0 {
        for curve in curves.iter().flatten() {
            times.extend(curve.key_times());
        }
        times.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        times.dedup_by(|a, b| (*a - *b).abs() < TIME_MERGE_EPS);
        return times;
    }

    let mut start = f32::INFINITY;
    let mut end = f32::NEG_INFINITY;
    for curve in curves.iter().flatten() {
        let keys = curve.key_times();
        if let (Some(first), Some(last)) = (keys.first(), keys.last()) {
            start = start.min(*first);
            end = end.max(*last);
        }
    }
    if start > end {
        return times;
    }
    let span = end - start;
    if span <= 0.0 {
        times.push(start);
        return times;
    }
    let count = (span * sps as f32).ceil() as usize + 1;
    let step = span / (count - 1) as f32;
    for i in 0..count {
        times.push(start + step * i as f32);
    }
    times
}

fn eval_or(curve: Option<&dyn AnimCurve>, time: f32, fallback: f32) -> f32 {
    curve.map_or(fallback, |c| c.evaluate(time))
}

/// Sample a single scalar curve; absent curve yields an empty channel.
pub fn sample_scalar(curve: Option<&dyn AnimCurve>, sps: u32) -> Channel<f32> {
    let Some(curve) = curve else {
        return Channel::new();
    };
    build_time_samples(&[Some(curve)], sps)
        .into_iter()
        .map(|t| Sample::new(t, curve.evaluate(t)))
        .collect()
}

/// Sample a scalar curve as a boolean channel (non-zero means true).
pub fn sample_bool(curve: Option<&dyn AnimCurve>, sps: u32) -> Channel<bool> {
    let Some(curve) = curve else {
        return Channel::new();
    };
    build_time_samples(&[Some(curve)], sps)
        .into_iter()
        .map(|t| Sample::new(t, curve.evaluate(t) != 0.0))
        .collect()
}

/// Sample three per-component curves to a shared time base; missing
/// components hold their static value.
pub fn sample_vec3(
    statics: [f32; 3],
    curves: [Option<&dyn AnimCurve>; 3],
    sps: u32,
) -> Channel<[f32; 3]> {
    if curves.iter().all(Option::is_none) {
        return Channel::new();
    }
    build_time_samples(&curves, sps)
        .into_iter()
        .map(|t| {
            Sample::new(
                t,
                [
                    eval_or(curves[0], t, statics[0]),
                    eval_or(curves[1], t, statics[1]),
                    eval_or(curves[2], t, statics[2]),
                ],
            )
        })
        .collect()
}

/// Four-component analogue of [`sample_vec3`].
pub fn sample_vec4(
    statics: [f32; 4],
    curves: [Option<&dyn AnimCurve>; 4],
    sps: u32,
) -> Channel<[f32; 4]> {
    if curves.iter().all(Option::is_none) {
        return Channel::new();
    }
    build_time_samples(&curves, sps)
        .into_iter()
        .map(|t| {
            Sample::new(
                t,
                [
                    eval_or(curves[0], t, statics[0]),
                    eval_or(curves[1], t, statics[1]),
                    eval_or(curves[2], t, statics[2]),
                    eval_or(curves[3], t, statics[3]),
                ],
            )
        })
        .collect()
}

/// Derive a quaternion rotation channel from per-axis Euler angle curves
/// (radians) and the node's rotation order. Axes without a curve contribute a
/// zero angle; no animated axis means no rotation channel.
pub fn sample_rotation(
    curves: [Option<&dyn AnimCurve>; 3],
    order: RotationOrder,
    sps: u32,
) -> Channel<[f32; 4]> {
    sample_vec3([0.0; 3], curves, sps)
        .into_iter()
        .map(|s| Sample::new(s.time, math::euler_to_quat(s.value, order)))
        .collect()
}

/// Derive the field-of-view channel from independently optional aperture and
/// focal-length curves. The time base is the union of both curves; the absent
/// side falls back to its static value. Aperture curve samples are in the
/// host's inch unit and converted to millimeters before the fov formula;
/// `static_aperture_mm` is already converted.
pub fn sample_fov(
    static_aperture_mm: f32,
    static_focal_length: f32,
    aperture_curve: Option<&dyn AnimCurve>,
    focal_curve: Option<&dyn AnimCurve>,
    sps: u32,
) -> Channel<f32> {
    if aperture_curve.is_none() && focal_curve.is_none() {
        return Channel::new();
    }
    build_time_samples(&[aperture_curve, focal_curve], sps)
        .into_iter()
        .map(|t| {
            let aperture = aperture_curve
                .map_or(static_aperture_mm, |c| c.evaluate(t) * math::INCH_TO_MILLIMETER);
            let focal = eval_or(focal_curve, t, static_focal_length);
            Sample::new(t, math::compute_fov(aperture, focal))
        })
        .collect()
}
