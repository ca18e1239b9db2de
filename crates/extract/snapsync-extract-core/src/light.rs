//! Light extraction: transform + light shape fields + animation.
//!
//! Only spot, directional, point, and area shapes are recognized; any other
//! shape leaves the record transform-only. Rotation gets the same flip-Y
//! correction as cameras; the spot cone angle is converted to degrees.

use snapsync_api_core::{AnimationBlock, LightAnimation, LightKind, LightRecord};

use crate::channel::ChannelRole;
use crate::config::ExtractConfig;
use crate::host::{LightShapeKind, SceneNode};
use crate::math::{self, flip_y};
use crate::sampling;
use crate::transform::{curve_for, do_extract_transform};

pub(crate) fn do_extract_light<N: SceneNode + ?Sized>(
    dst: &mut LightRecord,
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

    let Some(shape) = node.light_shape() else {
        log::debug!("light extraction: unsupported shape under '{}'", dst.transform.path);
        return;
    };

    dst.kind = Some(match shape.kind {
        LightShapeKind::Spot { cone_angle } => {
            dst.spot_angle = cone_angle * math::RAD_TO_DEG;
            LightKind::Spot
        }
        LightShapeKind::Directional => LightKind::Directional,
        LightShapeKind::Point => LightKind::Point,
        LightShapeKind::Area => LightKind::Area,
    });
    dst.color = shape.color;
    dst.intensity = shape.intensity;

    let rewrap = |dst: &mut LightRecord| {
        if let Some(AnimationBlock::Transform(t)) = dst.transform.animation.take() {
            dst.transform.animation = Some(AnimationBlock::Light(LightAnimation {
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
    let anim = LightAnimation {
        transform: dst
            .transform
            .animation
            .take()
            .map(AnimationBlock::into_transform)
            .unwrap_or_default(),
        color: sampling::sample_vec4(
            dst.color,
            [
                curve_for(&channels, ChannelRole::ColorR),
                curve_for(&channels, ChannelRole::ColorG),
                curve_for(&channels, ChannelRole::ColorB),
                curve_for(&channels, ChannelRole::ColorA),
            ],
            sps,
        ),
        intensity: sampling::sample_scalar(curve_for(&channels, ChannelRole::Intensity), sps),
    };

    dst.transform.animation = if anim.is_empty() {
        None
    } else {
        Some(AnimationBlock::Light(anim))
    };
}
