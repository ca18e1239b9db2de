//! Explicit invariant checks for populated records.
//!
//! Extraction never propagates errors; validation is a separate API callers
//! run before serializing or transmitting a snapshot.

use thiserror::Error;

use crate::animation::{AnimationBlock, TransformAnimation};
use crate::record::MeshRecord;
use crate::value::Channel;

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("face counts sum to {counts_sum} but index array has {index_len} entries")]
    CountIndexMismatch { counts_sum: usize, index_len: usize },
    #[error("{array} has {len} entries, expected corner count {expected}")]
    CornerArrayLength {
        array: &'static str,
        len: usize,
        expected: usize,
    },
    #[error("material id array has {len} entries, expected face count {expected}")]
    MaterialIdLength { len: usize, expected: usize },
    #[error("blend shape '{name}' frame {frame} has {len} deltas, expected vertex count {expected}")]
    BlendShapeDeltaLength {
        name: String,
        frame: usize,
        len: usize,
        expected: usize,
    },
    #[error("bone '{path}' has {len} weights, expected vertex count {expected}")]
    BoneWeightLength {
        path: String,
        len: usize,
        expected: usize,
    },
    #[error("channel '{channel}' sample times are not strictly increasing at index {index}")]
    NonMonotonicChannel { channel: &'static str, index: usize },
    #[error("animation block has no populated channels; it should be absent instead")]
    EmptyAnimationBlock,
}

/// Check that a channel's sample times are strictly increasing.
pub fn validate_channel_times<T>(
    channel: &Channel<T>,
    name: &'static str,
) -> Result<(), ValidationError> {
    for i in 1..channel.len() {
        if channel[i].time <= channel[i - 1].time {
            return Err(ValidationError::NonMonotonicChannel {
                channel: name,
                index: i,
            });
        }
    }
    Ok(())
}

fn validate_transform_channels(anim: &TransformAnimation) -> Result<(), ValidationError> {
    validate_channel_times(&anim.translation, "translation")?;
    validate_channel_times(&anim.rotation, "rotation")?;
    validate_channel_times(&anim.scale, "scale")?;
    validate_channel_times(&anim.visible, "visible")?;
    Ok(())
}

/// Check an animation block: non-empty, every channel monotonic.
pub fn validate_animation(block: &AnimationBlock) -> Result<(), ValidationError> {
    if block.is_empty() {
        return Err(ValidationError::EmptyAnimationBlock);
    }
    validate_transform_channels(block.transform())?;
    match block {
        AnimationBlock::Transform(_) => {}
        AnimationBlock::Camera(a) => {
            validate_channel_times(&a.near_plane, "near_plane")?;
            validate_channel_times(&a.far_plane, "far_plane")?;
            validate_channel_times(&a.horizontal_aperture, "horizontal_aperture")?;
            validate_channel_times(&a.vertical_aperture, "vertical_aperture")?;
            validate_channel_times(&a.focal_length, "focal_length")?;
            validate_channel_times(&a.focus_distance, "focus_distance")?;
            validate_channel_times(&a.fov, "fov")?;
        }
        AnimationBlock::Light(a) => {
            validate_channel_times(&a.color, "color")?;
            validate_channel_times(&a.intensity, "intensity")?;
        }
    }
    Ok(())
}

impl MeshRecord {
    /// Check the structural invariants of a populated mesh record.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let counts_sum: usize = self.counts.iter().map(|c| *c as usize).sum();
        let index_len = self.indices.len();
        if counts_sum != index_len {
            return Err(ValidationError::CountIndexMismatch {
                counts_sum,
                index_len,
            });
        }

        let corner_check = |array: &'static str, len: usize| -> Result<(), ValidationError> {
            if len != 0 && len != index_len {
                Err(ValidationError::CornerArrayLength {
                    array,
                    len,
                    expected: index_len,
                })
            } else {
                Ok(())
            }
        };
        corner_check("normals", self.normals.len())?;
        corner_check("uv0", self.uv0.len())?;
        corner_check("colors", self.colors.len())?;

        if !self.material_ids.is_empty() && self.material_ids.len() != self.counts.len() {
            return Err(ValidationError::MaterialIdLength {
                len: self.material_ids.len(),
                expected: self.counts.len(),
            });
        }

        let vertex_count = self.points.len();
        for bs in &self.blendshapes {
            for (fi, frame) in bs.frames.iter().enumerate() {
                if frame.deltas.len() != vertex_count {
                    return Err(ValidationError::BlendShapeDeltaLength {
                        name: bs.name.clone(),
                        frame: fi,
                        len: frame.deltas.len(),
                        expected: vertex_count,
                    });
                }
            }
        }
        for bone in &self.bones {
            if bone.weights.len() != vertex_count {
                return Err(ValidationError::BoneWeightLength {
                    path: bone.path.clone(),
                    len: bone.weights.len(),
                    expected: vertex_count,
                });
            }
        }

        if let Some(anim) = &self.transform.animation {
            validate_animation(anim)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{BoneData, MeshRecord};
    use crate::value::Sample;

    #[test]
    fn count_index_mismatch_is_reported() {
        let mesh = MeshRecord {
            counts: vec![4],
            indices: vec![0, 1, 2],
            ..Default::default()
        };
        assert_eq!(
            mesh.validate(),
            Err(ValidationError::CountIndexMismatch {
                counts_sum: 4,
                index_len: 3
            })
        );
    }

    #[test]
    fn corner_arrays_must_match_index_length() {
        let mesh = MeshRecord {
            points: vec![[0.0; 3]; 3],
            counts: vec![3],
            indices: vec![0, 1, 2],
            uv0: vec![[0.0; 2]; 2],
            ..Default::default()
        };
        assert!(matches!(
            mesh.validate(),
            Err(ValidationError::CornerArrayLength { array: "uv0", .. })
        ));
    }

    #[test]
    fn bone_weights_must_cover_every_vertex() {
        let mesh = MeshRecord {
            points: vec![[0.0; 3]; 4],
            counts: vec![4],
            indices: vec![0, 1, 2, 3],
            bones: vec![BoneData {
                path: "/root/joint1".into(),
                weights: vec![1.0; 3],
                ..Default::default()
            }],
            ..Default::default()
        };
        assert!(matches!(
            mesh.validate(),
            Err(ValidationError::BoneWeightLength { .. })
        ));
    }

    #[test]
    fn non_monotonic_channel_is_rejected() {
        let mut channel = Vec::new();
        channel.push(Sample::new(0.0, 1.0f32));
        channel.push(Sample::new(0.0, 2.0f32));
        assert_eq!(
            validate_channel_times(&channel, "focal_length"),
            Err(ValidationError::NonMonotonicChannel {
                channel: "focal_length",
                index: 1
            })
        );
    }
}
