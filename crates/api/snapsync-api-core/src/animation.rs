//! Animation blocks attached to extracted records.
//!
//! The block is a closed tagged enum: camera and light animation embed the
//! transform channels as a field instead of extending a base type, so
//! consumers match on the variant rather than downcasting.

use serde::{Deserialize, Serialize};

use crate::value::Channel;

/// Channels shared by every animated record: local TRS plus visibility.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct TransformAnimation {
    #[serde(default)]
    pub translation: Channel<[f32; 3]>,
    /// Quaternion (x, y, z, w) per sample.
    #[serde(default)]
    pub rotation: Channel<[f32; 4]>,
    #[serde(default)]
    pub scale: Channel<[f32; 3]>,
    #[serde(default)]
    pub visible: Channel<bool>,
}

impl TransformAnimation {
    pub fn is_empty(&self) -> bool {
        self.translation.is_empty()
            && self.rotation.is_empty()
            && self.scale.is_empty()
            && self.visible.is_empty()
    }
}

/// Camera channels; angular values in degrees, apertures in millimeters.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct CameraAnimation {
    #[serde(default)]
    pub transform: TransformAnimation,
    #[serde(default)]
    pub near_plane: Channel<f32>,
    #[serde(default)]
    pub far_plane: Channel<f32>,
    #[serde(default)]
    pub horizontal_aperture: Channel<f32>,
    #[serde(default)]
    pub vertical_aperture: Channel<f32>,
    #[serde(default)]
    pub focal_length: Channel<f32>,
    #[serde(default)]
    pub focus_distance: Channel<f32>,
    #[serde(default)]
    pub fov: Channel<f32>,
}

impl CameraAnimation {
    pub fn is_empty(&self) -> bool {
        self.transform.is_empty()
            && self.near_plane.is_empty()
            && self.far_plane.is_empty()
            && self.horizontal_aperture.is_empty()
            && self.vertical_aperture.is_empty()
            && self.focal_length.is_empty()
            && self.focus_distance.is_empty()
            && self.fov.is_empty()
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct LightAnimation {
    #[serde(default)]
    pub transform: TransformAnimation,
    /// RGBA per sample.
    #[serde(default)]
    pub color: Channel<[f32; 4]>,
    #[serde(default)]
    pub intensity: Channel<f32>,
}

impl LightAnimation {
    pub fn is_empty(&self) -> bool {
        self.transform.is_empty() && self.color.is_empty() && self.intensity.is_empty()
    }
}

/// Tagged animation payload stored on a record. A block with zero populated
/// channels is never stored; records hold `Option<AnimationBlock>` instead.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data")]
pub enum AnimationBlock {
    Transform(TransformAnimation),
    Camera(CameraAnimation),
    Light(LightAnimation),
}

impl AnimationBlock {
    pub fn is_empty(&self) -> bool {
        match self {
            AnimationBlock::Transform(a) => a.is_empty(),
            AnimationBlock::Camera(a) => a.is_empty(),
            AnimationBlock::Light(a) => a.is_empty(),
        }
    }

    /// The transform channels common to every variant.
    pub fn transform(&self) -> &TransformAnimation {
        match self {
            AnimationBlock::Transform(a) => a,
            AnimationBlock::Camera(a) => &a.transform,
            AnimationBlock::Light(a) => &a.transform,
        }
    }

    pub fn transform_mut(&mut self) -> &mut TransformAnimation {
        match self {
            AnimationBlock::Transform(a) => a,
            AnimationBlock::Camera(a) => &mut a.transform,
            AnimationBlock::Light(a) => &mut a.transform,
        }
    }

    /// Take the transform channels out of the block, consuming it.
    pub fn into_transform(self) -> TransformAnimation {
        match self {
            AnimationBlock::Transform(a) => a,
            AnimationBlock::Camera(a) => a.transform,
            AnimationBlock::Light(a) => a.transform,
        }
    }
}
