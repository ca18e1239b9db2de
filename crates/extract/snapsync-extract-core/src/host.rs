//! Host-binding traits: everything the pipeline reads from the content
//! application. Bindings implement these over the host SDK; tests implement
//! them over canned data.
//!
//! All accessors are plain reads. Failure to resolve something is expressed
//! as `None`/empty, never as an error: the pipeline degrades to a partial
//! record by design.

use crate::channel::ChannelRole;
pub use crate::math::RotationOrder;
use snapsync_api_core::Mat4;

/// A single animation curve on one attribute.
pub trait AnimCurve {
    /// Native keyframe times in seconds, ascending.
    fn key_times(&self) -> Vec<f32>;
    /// Evaluate the curve at an arbitrary time.
    fn evaluate(&self, time: f32) -> f32;
}

/// One animated attribute, already classified by the binding layer.
pub struct AnimatedChannel<'a> {
    pub role: ChannelRole,
    pub curve: &'a dyn AnimCurve,
}

/// Joint-specific correction attributes (skeleton-chain nodes only).
#[derive(Clone, Copy, Debug)]
pub struct JointAttributes {
    /// Scale-orientation quaternion (x, y, z, w).
    pub scale_orient: [f32; 4],
    /// Joint-orientation quaternion (x, y, z, w).
    pub joint_orient: [f32; 4],
    pub segment_scale_compensate: bool,
    /// Inherited inverse-parent-scale, meaningful when compensation is on.
    pub inverse_parent_scale: [f32; 3],
}

/// Static camera shape attributes in host-native units: fov in radians,
/// apertures in inches.
#[derive(Clone, Copy, Debug)]
pub struct CameraShape {
    pub is_ortho: bool,
    pub near_plane: f32,
    pub far_plane: f32,
    pub horizontal_fov: f32,
    pub horizontal_aperture: f32,
    pub vertical_aperture: f32,
    pub focal_length: f32,
    pub focus_distance: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LightShapeKind {
    /// Cone angle in radians.
    Spot { cone_angle: f32 },
    Directional,
    Point,
    Area,
}

#[derive(Clone, Copy, Debug)]
pub struct LightShape {
    pub kind: LightShapeKind,
    /// RGBA.
    pub color: [f32; 4],
    pub intensity: f32,
}

/// One polygon's corner indexing into the geometry's attribute pools.
/// The per-corner vectors are parallel: entry i describes corner i.
#[derive(Clone, Debug, Default)]
pub struct Polygon {
    pub vertex_indices: Vec<u32>,
    /// Face-varying normal index per corner.
    pub normal_indices: Vec<u32>,
    /// Index into the uv pools per corner; None where no valid uv is assigned.
    pub uv_indices: Vec<Option<u32>>,
    /// Index into the color pool per corner; None where unassigned.
    pub color_indices: Vec<Option<u32>>,
}

/// First uv set with data: parallel u/v pools indexed by `Polygon::uv_indices`.
#[derive(Clone, Debug, Default)]
pub struct UvSet {
    pub u: Vec<f32>,
    pub v: Vec<f32>,
}

/// First color set with data, indexed by `Polygon::color_indices`.
#[derive(Clone, Debug, Default)]
pub struct ColorSet {
    pub colors: Vec<[f32; 4]>,
}

/// Readable polygonal geometry (either the deformed output or the
/// pre-deformation original).
pub trait MeshGeometry {
    /// Vertex positions; None when the host fails to provide points.
    fn points(&self) -> Option<Vec<[f32; 3]>>;
    /// Polygons in native order.
    fn polygons(&self) -> Vec<Polygon>;
    /// Face-varying normal pool, indexed by `Polygon::normal_indices`.
    fn normals(&self) -> Option<Vec<[f32; 3]>>;
    fn uv_set(&self) -> Option<UvSet>;
    fn color_set(&self) -> Option<ColorSet>;
}

/// Which deformer a tweak node is associated with.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DeformerSite {
    BlendShape,
    SkinCluster,
}

/// Manual per-vertex/uv edits layered on a deformer output, keyed by logical
/// vertex/uv index.
#[derive(Clone, Debug, Default)]
pub struct TweakOverlay {
    pub position_deltas: Vec<(u32, [f32; 3])>,
    pub uv_deltas: Vec<(u32, [f32; 2])>,
}

/// Delta encoding of one blend-shape target.
#[derive(Clone, Debug)]
pub enum TargetDelta {
    /// Full replacement geometry; the frame delta is target - base per vertex.
    Geometry(Vec<[f32; 3]>),
    /// Sparse encoding: absolute positions stored at the listed vertex
    /// indices; every other vertex keeps a zero delta.
    Sparse {
        indices: Vec<u32>,
        positions: Vec<[f32; 3]>,
    },
    /// Neither encoding resolved; the frame delta stays zero.
    Missing,
}

/// One target entry under a blend-shape weight channel.
#[derive(Clone, Debug)]
pub struct BlendShapeTarget {
    /// Encoded slot index: 5000..=6000 maps to target weight 0..100.
    pub slot_index: u32,
    pub delta: TargetDelta,
}

/// One weight channel of a blend-shape deformer.
#[derive(Clone, Debug)]
pub struct BlendShapeChannel {
    pub name: String,
    /// Current weight in the host's native 0..1 range.
    pub weight: f32,
    pub targets: Vec<BlendShapeTarget>,
}

pub trait BlendShapeDeformer {
    fn channels(&self) -> Vec<BlendShapeChannel>;
}

/// One influence object (bone) of a skin cluster.
#[derive(Clone, Debug)]
pub struct Influence {
    pub path: String,
    /// Topmost ancestor of the influence's hierarchy.
    pub root_path: String,
    /// Stored pre-bind matrix for this influence, row-major.
    pub bind_pose: Mat4,
}

pub trait SkinCluster {
    fn influences(&self) -> Vec<Influence>;
    /// Weight per influence for one vertex, aligned with `influences()`.
    fn vertex_weights(&self, vertex: usize) -> Vec<f32>;
    /// Index of the extracted mesh among this deformer's output shapes.
    fn output_index(&self) -> usize;
}

/// Per-face shading assignment: a shader identity per shading group and a
/// group index per face. Uids are persistent host identifiers; None where no
/// shader resolves upstream of a group.
#[derive(Clone, Debug, Default)]
pub struct ShadingAssignment {
    pub group_shader_uids: Vec<Option<String>>,
    pub face_groups: Vec<u32>,
}

/// A node's polygonal mesh shape plus its deformation history.
///
/// The pipeline models at most one blend-shape and one skin-cluster deformer
/// per mesh, with the blend shape evaluating after skinning; scenes violating
/// that are not detected and produce unspecified (but memory-safe) results.
pub trait MeshShape {
    /// Shape-level visibility (hierarchy visibility lives on the node).
    fn visible(&self) -> bool;
    /// The deformed output geometry.
    fn geometry(&self) -> &dyn MeshGeometry;
    /// The pre-deformation ("original") geometry, when deformer history exists.
    fn orig_geometry(&self) -> Option<&dyn MeshGeometry>;
    fn blend_shape(&self) -> Option<&dyn BlendShapeDeformer>;
    fn skin_cluster(&self) -> Option<&dyn SkinCluster>;
    /// The tweak node associated with the given deformer output, if any.
    fn tweak_overlay(&self, site: DeformerSite, output_index: usize) -> Option<TweakOverlay>;
    fn shading_assignment(&self) -> ShadingAssignment;
}

/// An addressable node in the host hierarchy, as seen by the pipeline.
pub trait SceneNode {
    /// Hierarchy path; the stable external key.
    fn path(&self) -> String;
    fn local_position(&self) -> [f32; 3];
    /// Local rotation quaternion (x, y, z, w).
    fn local_rotation(&self) -> [f32; 4];
    fn local_scale(&self) -> [f32; 3];
    /// Visibility combined with all ancestors.
    fn visible_in_hierarchy(&self) -> bool;
    fn rotation_order(&self) -> RotationOrder;
    /// Joint correction attributes when this is a skeleton-chain node.
    fn joint(&self) -> Option<JointAttributes>;
    /// Animated channels on the transform node itself.
    fn animated_channels(&self) -> Vec<AnimatedChannel<'_>>;
    /// Animated channels on the node's shape (camera/light attributes).
    fn shape_animated_channels(&self) -> Vec<AnimatedChannel<'_>>;
    fn camera_shape(&self) -> Option<CameraShape>;
    fn light_shape(&self) -> Option<LightShape>;
    fn mesh_shape(&self) -> Option<&dyn MeshShape>;
}
