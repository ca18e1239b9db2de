//! Camera extraction: transform + projection parameters + animation.
//!
//! The host's camera forward axis is corrected by a flip-Y rotation, applied
//! to the static rotation and to every sampled rotation. Angular values are
//! converted to degrees and apertures to millimeters on extraction.

use snapsync_api_core::{AnimationBlock, CameraAnimation, CameraRecord};

use crate::channel::ChannelRole;
use crate::config::ExtractConfig;
use crate::host::SceneNode;
use crate::math::{self, flip_y};
use crate::sampling;
use crate::transform::{curve_for, do_extract_transform};

pub(crate) fn do_extract_camera<N: SceneNode + ?Sized>(
    dst: &mut CameraRecord,
    node: &N,
    cfg: &ExtractConfig,
) {
    do_extract_transform(&mut dst.transform, node, cfg);
    dst.transform.rotation = flip_y(dst.transform.rotation);
    if let Some(block) = &mut dst.transform.animation {
        for s in &mut block.transform_mut().rotation {
            s.value = flip_y(s.value);
        }
    }

    let Some(shape) = node.camera_shape() else {
        log::debug!("camera extraction: no camera shape under '{}'", dst.transform.path);
        return;
    };

    dst.is_ortho = shape.is_ortho;
    dst.near_plane = shape.near_plane;
    dst.far_plane = shape.far_plane;
    dst.fov = shape.horizontal_fov * math::RAD_TO_DEG;
    dst.horizontal_aperture = shape.horizontal_aperture * math::INCH_TO_MILLIMETER;
    dst.vertical_aperture = shape.vertical_aperture * math::INCH_TO_MILLIMETER;
    dst.focal_length = shape.focal_length;
    dst.focus_distance = shape.focus_distance;

    // Whatever happens below, a camera's animation block carries the camera
    // variant so the transform channels live alongside the domain channels.
    let rewrap = |dst: &mut CameraRecord| {
        if let Some(AnimationBlock::Transform(t)) = dst.transform.animation.take() {
            dst.transform.animation = Some(AnimationBlock::Camera(CameraAnimation {
                transform: t,
                ..Default::default()
            }));
        }
    };

    if !cfg.sync_animations {
        rewrap(dst);
        return;
    }
    let channels = node.shape_animated_channels();
    if channels.is_empty() {
        rewrap(dst);
        return;
    }

    let sps = cfg.effective_sps();
    let aperture_curve = curve_for(&channels, ChannelRole::HorizontalAperture);
    let focal_curve = curve_for(&channels, ChannelRole::FocalLength);

    let mut anim = CameraAnimation {
        transform: dst
            .transform
            .animation
            .take()
            .map(AnimationBlock::into_transform)
            .unwrap_or_default(),
        near_plane: sampling::sample_scalar(curve_for(&channels, ChannelRole::NearPlane), sps),
        far_plane: sampling::sample_scalar(curve_for(&channels, ChannelRole::FarPlane), sps),
        horizontal_aperture: sampling::sample_scalar(aperture_curve, sps),
        vertical_aperture: sampling::sample_scalar(
            curve_for(&channels, ChannelRole::VerticalAperture),
            sps,
        ),
        focal_length: sampling::sample_scalar(focal_curve, sps),
        focus_distance: sampling::sample_scalar(
            curve_for(&channels, ChannelRole::FocusDistance),
            sps,
        ),
        fov: sampling::sample_fov(
            dst.horizontal_aperture,
            dst.focal_length,
            aperture_curve,
            focal_curve,
            sps,
        ),
    };

    // Aperture curves come in the host's inch unit.
    for s in &mut anim.horizontal_aperture {
        s.value *= math::INCH_TO_MILLIMETER;
    }
    for s in &mut anim.vertical_aperture {
        s.value *= math::INCH_TO_MILLIMETER;
    }

    dst.transform.animation = if anim.is_empty() {
        None
    } else {
        Some(AnimationBlock::Camera(anim))
    };
}
