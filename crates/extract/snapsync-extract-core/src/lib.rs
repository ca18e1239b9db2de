//! snapsync-extract-core: animated-scene snapshot extraction
//!
//! Given live scene-graph nodes exposed through the [`host`] traits, this
//! crate produces self-contained [`snapsync_api_core`] records: local
//! transforms with joint corrections, camera/light domain fields, polygonal
//! geometry with deformation data, and time-sampled animation channels.
//!
//! Extraction is two-phase: `extract_*` entry points on [`session::Extractor`]
//! enqueue per-node tasks during traversal, and `run_deferred` evaluates them
//! sequentially in queue order (the host's accessors are not reentrant-safe
//! during enumeration).

pub mod camera;
pub mod channel;
pub mod config;
pub mod host;
pub mod light;
pub mod material;
pub mod math;
pub mod mesh;
pub mod sampling;
pub mod session;
pub mod transform;

pub use channel::ChannelRole;
pub use config::ExtractConfig;
pub use host::{
    AnimCurve, AnimatedChannel, BlendShapeChannel, BlendShapeDeformer, BlendShapeTarget,
    CameraShape, ColorSet, DeformerSite, Influence, JointAttributes, LightShape, LightShapeKind,
    MeshGeometry, MeshShape, Polygon, RotationOrder, SceneNode, ShadingAssignment, SkinCluster,
    TargetDelta, TweakOverlay, UvSet,
};
pub use material::MaterialRegistry;
pub use session::{CameraHandle, Extractor, LightHandle, MeshHandle, TransformHandle};
pub use snapsync_api_core::Snapshot;
