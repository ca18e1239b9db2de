//! Transform extraction: local TRS, joint corrections, animation channels.

use snapsync_api_core::{AnimationBlock, TransformAnimation, TransformRecord};

use crate::channel::ChannelRole;
use crate::config::ExtractConfig;
use crate::host::{AnimCurve, AnimatedChannel, SceneNode};
use crate::math::{quat_mul, quat_normalize};
use crate::sampling;

/// Find the curve bound to a role among a node's animated channels.
pub(crate) fn curve_for<'a>(
    channels: &'a [AnimatedChannel<'a>],
    role: ChannelRole,
) -> Option<&'a dyn AnimCurve> {
    channels.iter().find(|c| c.role == role).map(|c| c.curve)
}

/// Populate the transform portion of a record from a live node.
pub(crate) fn do_extract_transform<N: SceneNode + ?Sized>(
    dst: &mut TransformRecord,
    node: &N,
    cfg: &ExtractConfig,
) {
    dst.path = node.path();
    dst.position = node.local_position();
    dst.rotation = node.local_rotation();
    let raw_scale = node.local_scale();
    dst.scale = raw_scale;
    dst.visible_in_hierarchy = node.visible_in_hierarchy();

    let joint = node.joint();
    if let Some(j) = &joint {
        dst.rotation =
            quat_normalize(quat_mul(j.scale_orient, quat_mul(dst.rotation, j.joint_orient)));
        if j.segment_scale_compensate {
            for (s, inv) in dst.scale.iter_mut().zip(j.inverse_parent_scale) {
                *s /= inv;
            }
        }
    }

    if !cfg.sync_animations {
        return;
    }
    let channels = node.animated_channels();
    if channels.is_empty() {
        return;
    }

    let sps = cfg.effective_sps();
    let mut anim = TransformAnimation {
        visible: sampling::sample_bool(curve_for(&channels, ChannelRole::Visibility), sps),
        translation: sampling::sample_vec3(
            dst.position,
            [
                curve_for(&channels, ChannelRole::TranslateX),
                curve_for(&channels, ChannelRole::TranslateY),
                curve_for(&channels, ChannelRole::TranslateZ),
            ],
            sps,
        ),
        // Raw statics here: the joint compensation below divides every
        // sample, animated or fallback, exactly once.
        scale: sampling::sample_vec3(
            raw_scale,
            [
                curve_for(&channels, ChannelRole::ScaleX),
                curve_for(&channels, ChannelRole::ScaleY),
                curve_for(&channels, ChannelRole::ScaleZ),
            ],
            sps,
        ),
        rotation: sampling::sample_rotation(
            [
                curve_for(&channels, ChannelRole::RotateX),
                curve_for(&channels, ChannelRole::RotateY),
                curve_for(&channels, ChannelRole::RotateZ),
            ],
            node.rotation_order(),
            sps,
        ),
    };

    // The static pose's joint corrections apply to every sample as well.
    if let Some(j) = &joint {
        for s in &mut anim.rotation {
            s.value = quat_normalize(quat_mul(j.scale_orient, quat_mul(s.value, j.joint_orient)));
        }
        if j.segment_scale_compensate {
            for s in &mut anim.scale {
                for (v, inv) in s.value.iter_mut().zip(j.inverse_parent_scale) {
                    *v /= inv;
                }
            }
        }
    }

    dst.animation = if anim.is_empty() {
        None
    } else {
        Some(AnimationBlock::Transform(anim))
    };
}
