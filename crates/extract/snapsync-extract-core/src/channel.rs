//! Semantic channel roles for animated attributes.
//!
//! The pipeline consumes `(ChannelRole, curve)` pairs from the host binding;
//! it never inspects attribute names itself. `classify` is a convenience for
//! bindings whose attribute metadata only carries dotted names.

use serde::{Deserialize, Serialize};

/// What an animated attribute means to the snapshot schema.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ChannelRole {
    TranslateX,
    TranslateY,
    TranslateZ,
    RotateX,
    RotateY,
    RotateZ,
    ScaleX,
    ScaleY,
    ScaleZ,
    Visibility,
    ColorR,
    ColorG,
    ColorB,
    ColorA,
    Intensity,
    NearPlane,
    FarPlane,
    HorizontalAperture,
    VerticalAperture,
    FocalLength,
    FocusDistance,
}

/// Dotted attribute suffix -> role, for every attribute the pipeline samples.
const ATTRIBUTE_TABLE: &[(&str, ChannelRole)] = &[
    (".translateX", ChannelRole::TranslateX),
    (".translateY", ChannelRole::TranslateY),
    (".translateZ", ChannelRole::TranslateZ),
    (".rotateX", ChannelRole::RotateX),
    (".rotateY", ChannelRole::RotateY),
    (".rotateZ", ChannelRole::RotateZ),
    (".scaleX", ChannelRole::ScaleX),
    (".scaleY", ChannelRole::ScaleY),
    (".scaleZ", ChannelRole::ScaleZ),
    (".visibility", ChannelRole::Visibility),
    (".colorR", ChannelRole::ColorR),
    (".colorG", ChannelRole::ColorG),
    (".colorB", ChannelRole::ColorB),
    (".colorA", ChannelRole::ColorA),
    (".intensity", ChannelRole::Intensity),
    (".nearClipPlane", ChannelRole::NearPlane),
    (".farClipPlane", ChannelRole::FarPlane),
    (".horizontalFilmAperture", ChannelRole::HorizontalAperture),
    (".verticalFilmAperture", ChannelRole::VerticalAperture),
    (".focalLength", ChannelRole::FocalLength),
    (".focusDistance", ChannelRole::FocusDistance),
];

impl ChannelRole {
    /// Map a host attribute name (e.g. "pCube1.translateX") to its role.
    /// Pure table lookup on the dotted suffix; unknown attributes are None.
    pub fn classify(attribute: &str) -> Option<ChannelRole> {
        ATTRIBUTE_TABLE
            .iter()
            .find(|(suffix, _)| attribute.ends_with(suffix))
            .map(|(_, role)| *role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_transform_attributes() {
        assert_eq!(
            ChannelRole::classify("pCube1.translateX"),
            Some(ChannelRole::TranslateX)
        );
        assert_eq!(
            ChannelRole::classify("joint3.scaleZ"),
            Some(ChannelRole::ScaleZ)
        );
        assert_eq!(
            ChannelRole::classify("group1.visibility"),
            Some(ChannelRole::Visibility)
        );
    }

    #[test]
    fn classifies_camera_and_light_attributes() {
        assert_eq!(
            ChannelRole::classify("cameraShape1.focalLength"),
            Some(ChannelRole::FocalLength)
        );
        assert_eq!(
            ChannelRole::classify("cameraShape1.horizontalFilmAperture"),
            Some(ChannelRole::HorizontalAperture)
        );
        assert_eq!(
            ChannelRole::classify("spotLightShape1.colorG"),
            Some(ChannelRole::ColorG)
        );
    }

    #[test]
    fn unknown_attributes_are_unclassified() {
        assert_eq!(ChannelRole::classify("pCube1.rotateOrder"), None);
        assert_eq!(ChannelRole::classify("translateX"), None);
    }
}
