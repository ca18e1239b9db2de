//! snapsync-api-core: snapshot record types (host-agnostic)
//!
//! This crate defines the flat, serializable records produced by the
//! extraction pipeline: transform/camera/light/mesh records, their animation
//! blocks, and validation of the invariants the pipeline promises (monotonic
//! sample times, corner-array sizing, weight-array alignment).

pub mod animation;
pub mod record;
pub mod validate;
pub mod value;

pub use animation::{AnimationBlock, CameraAnimation, LightAnimation, TransformAnimation};
pub use record::{
    BlendShapeData, BlendShapeFrame, BoneData, CameraRecord, LightKind, LightRecord, Mat4,
    MeshRecord, MeshSummary, Snapshot, TransformRecord, MAT4_IDENTITY,
};
pub use validate::ValidationError;
pub use value::{Channel, Sample};
