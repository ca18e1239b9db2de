//! Extraction configuration.

use serde::{Deserialize, Serialize};

/// Feature flags and the sampling policy for one extraction session.
/// Passed by value into the session; nothing here is global or mutable
/// during extraction.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExtractConfig {
    pub sync_animations: bool,
    pub sync_normals: bool,
    pub sync_uvs: bool,
    pub sync_colors: bool,
    pub sync_blendshapes: bool,
    pub sync_bones: bool,
    /// Apply manual per-vertex/uv tweak overlays on deformed meshes.
    pub apply_tweak: bool,
    /// When false, channels are sampled at each curve's native keyframe times.
    pub sample_animation: bool,
    /// Samples per second when `sample_animation` is set.
    pub animation_sps: u32,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            sync_animations: true,
            sync_normals: true,
            sync_uvs: true,
            sync_colors: true,
            sync_blendshapes: true,
            sync_bones: true,
            apply_tweak: true,
            sample_animation: false,
            animation_sps: 5,
        }
    }
}

impl ExtractConfig {
    /// Effective fixed sampling rate; 0 selects native keyframe times.
    pub fn effective_sps(&self) -> u32 {
        if self.sample_animation {
            self.animation_sps
        } else {
            0
        }
    }
}
