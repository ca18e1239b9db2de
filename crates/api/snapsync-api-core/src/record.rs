//! Snapshot records populated in place by the extraction pipeline.
//!
//! Records are created empty by the session layer, handed to the pipeline by
//! slot handle, and filled during the deferred pass. A record that keeps its
//! default geometry/domain fields after extraction means the source node did
//! not resolve (see the pipeline's failure policy).

use serde::{Deserialize, Serialize};

use crate::animation::AnimationBlock;

/// Row-major 4x4 matrix, translation in the fourth row.
pub type Mat4 = [[f32; 4]; 4];

pub const MAT4_IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Local transform and visibility for one node.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TransformRecord {
    /// Hierarchy path; the stable external key for this node.
    pub path: String,
    pub position: [f32; 3],
    /// Unit quaternion (x, y, z, w).
    pub rotation: [f32; 4],
    pub scale: [f32; 3],
    /// Visibility combined with all ancestors.
    pub visible_in_hierarchy: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<AnimationBlock>,
}

impl Default for TransformRecord {
    fn default() -> Self {
        Self {
            path: String::new(),
            position: [0.0; 3],
            rotation: [0.0, 0.0, 0.0, 1.0],
            scale: [1.0; 3],
            visible_in_hierarchy: true,
            animation: None,
        }
    }
}

/// Camera projection parameters. Angles are degrees, apertures millimeters.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CameraRecord {
    pub transform: TransformRecord,
    pub is_ortho: bool,
    pub near_plane: f32,
    pub far_plane: f32,
    /// Horizontal field of view in degrees.
    pub fov: f32,
    pub horizontal_aperture: f32,
    pub vertical_aperture: f32,
    pub focal_length: f32,
    pub focus_distance: f32,
}

impl Default for CameraRecord {
    fn default() -> Self {
        Self {
            transform: TransformRecord::default(),
            is_ortho: false,
            near_plane: 0.3,
            far_plane: 1000.0,
            fov: 30.0,
            horizontal_aperture: 36.0,
            vertical_aperture: 24.0,
            focal_length: 50.0,
            focus_distance: 5.0,
        }
    }
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum LightKind {
    Spot,
    Directional,
    Point,
    Area,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LightRecord {
    pub transform: TransformRecord,
    /// None when the node's shape is not one of the supported light kinds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<LightKind>,
    /// RGBA.
    pub color: [f32; 4],
    pub intensity: f32,
    /// Cone angle in degrees; meaningful for spot lights only.
    pub spot_angle: f32,
}

impl Default for LightRecord {
    fn default() -> Self {
        Self {
            transform: TransformRecord::default(),
            kind: None,
            color: [1.0; 4],
            intensity: 1.0,
            spot_angle: 0.0,
        }
    }
}

/// One blend-shape target frame: weight on the 0-100 scale and a per-vertex
/// delta array sized to the mesh's vertex count (zero where untouched).
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct BlendShapeFrame {
    pub weight: f32,
    pub deltas: Vec<[f32; 3]>,
}

/// One named blend-shape channel with its current weight (0-100 scale) and
/// ordered target frames.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct BlendShapeData {
    pub name: String,
    pub weight: f32,
    pub frames: Vec<BlendShapeFrame>,
}

/// One skin influence: bind pose plus a weight per vertex, index-aligned with
/// the owning mesh's point array.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BoneData {
    pub path: String,
    /// Stored pre-bind (object-space inverse bind) matrix.
    pub bindpose: Mat4,
    pub weights: Vec<f32>,
}

impl Default for BoneData {
    fn default() -> Self {
        Self {
            path: String::new(),
            bindpose: MAT4_IDENTITY,
            weights: Vec::new(),
        }
    }
}

/// Cached flags describing which optional arrays a mesh record carries.
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MeshSummary {
    pub has_normals: bool,
    pub has_uv0: bool,
    pub has_colors: bool,
    pub has_material_ids: bool,
    pub has_blendshapes: bool,
    pub has_bones: bool,
}

/// Extracted polygonal mesh. A record with zero points means "no mesh"
/// (the source node failed one of the extraction gates).
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct MeshRecord {
    pub transform: TransformRecord,
    /// Shape-level visibility (the transform carries hierarchy visibility).
    pub visible: bool,
    pub points: Vec<[f32; 3]>,
    /// Vertex count per face.
    pub counts: Vec<u32>,
    /// Flattened corner -> vertex index array; sum(counts) == indices.len().
    pub indices: Vec<u32>,
    /// Corner-indexed, parallel to `indices` when present.
    pub normals: Vec<[f32; 3]>,
    /// Corner-indexed (u, v), parallel to `indices` when present.
    pub uv0: Vec<[f32; 2]>,
    /// Corner-indexed RGBA, parallel to `indices` when present.
    pub colors: Vec<[f32; 4]>,
    /// One id per face; -1 where no shader resolved.
    pub material_ids: Vec<i32>,
    pub blendshapes: Vec<BlendShapeData>,
    pub bones: Vec<BoneData>,
    /// Path of the topmost ancestor of the first influence's hierarchy.
    pub root_bone: String,
    /// When set, downstream consumers should bake geometry into world space
    /// with this local-to-world matrix (skinned meshes only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bake_transform: Option<Mat4>,
    pub summary: MeshSummary,
}

impl MeshRecord {
    /// Recompute the cached summary flags from the populated arrays.
    pub fn refresh_summary(&mut self) {
        self.summary = MeshSummary {
            has_normals: !self.normals.is_empty(),
            has_uv0: !self.uv0.is_empty(),
            has_colors: !self.colors.is_empty(),
            has_material_ids: !self.material_ids.is_empty(),
            has_blendshapes: !self.blendshapes.is_empty(),
            has_bones: !self.bones.is_empty(),
        };
    }
}

/// Caller-owned record store. The extraction session appends empty records
/// here and fills them in place during the deferred pass; ownership never
/// moves into the pipeline.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    pub transforms: Vec<TransformRecord>,
    pub cameras: Vec<CameraRecord>,
    pub lights: Vec<LightRecord>,
    pub meshes: Vec<MeshRecord>,
}
