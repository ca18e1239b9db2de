//! Extraction session: deferred task queue over caller-owned records.
//!
//! Traversal must not mutate host evaluation state, so the `extract_*` entry
//! points only append an empty record to the caller's [`Snapshot`] and queue
//! a value-typed task descriptor. `run_deferred` evaluates every task in
//! queue order, exactly once, on a single thread.

use snapsync_api_core::{CameraRecord, LightRecord, MeshRecord, Snapshot, TransformRecord};

use crate::camera::do_extract_camera;
use crate::config::ExtractConfig;
use crate::host::SceneNode;
use crate::light::do_extract_light;
use crate::material::MaterialRegistry;
use crate::mesh::do_extract_mesh;
use crate::transform::do_extract_transform;

/// Slot of a transform record within a snapshot.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TransformHandle(pub usize);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CameraHandle(pub usize);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LightHandle(pub usize);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MeshHandle(pub usize);

/// One deferred unit of work: which routine to run, against which record
/// slot, reading which node.
enum ExtractTask<N> {
    Transform { slot: usize, node: N },
    Camera { slot: usize, node: N },
    Light { slot: usize, node: N },
    Mesh { slot: usize, node: N },
}

/// Extraction session over one snapshot pass.
pub struct Extractor<N> {
    cfg: ExtractConfig,
    materials: MaterialRegistry,
    tasks: Vec<ExtractTask<N>>,
}

impl<N: SceneNode> Extractor<N> {
    pub fn new(cfg: ExtractConfig) -> Self {
        Self {
            cfg,
            materials: MaterialRegistry::new(),
            tasks: Vec::new(),
        }
    }

    pub fn config(&self) -> &ExtractConfig {
        &self.cfg
    }

    /// Material ids allocated so far (stable within this session).
    pub fn materials_mut(&mut self) -> &mut MaterialRegistry {
        &mut self.materials
    }

    /// Number of queued, not-yet-run tasks.
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Queue transform extraction; returns immediately.
    pub fn extract_transform(&mut self, dst: &mut Snapshot, node: N) -> TransformHandle {
        let slot = dst.transforms.len();
        dst.transforms.push(TransformRecord::default());
        self.tasks.push(ExtractTask::Transform { slot, node });
        TransformHandle(slot)
    }

    pub fn extract_camera(&mut self, dst: &mut Snapshot, node: N) -> CameraHandle {
        let slot = dst.cameras.len();
        dst.cameras.push(CameraRecord::default());
        self.tasks.push(ExtractTask::Camera { slot, node });
        CameraHandle(slot)
    }

    pub fn extract_light(&mut self, dst: &mut Snapshot, node: N) -> LightHandle {
        let slot = dst.lights.len();
        dst.lights.push(LightRecord::default());
        self.tasks.push(ExtractTask::Light { slot, node });
        LightHandle(slot)
    }

    pub fn extract_mesh(&mut self, dst: &mut Snapshot, node: N) -> MeshHandle {
        let slot = dst.meshes.len();
        dst.meshes.push(MeshRecord::default());
        self.tasks.push(ExtractTask::Mesh { slot, node });
        MeshHandle(slot)
    }

    /// Run every queued task in order, then clear the queue. After return,
    /// each previously queued record is fully populated (or left minimal
    /// where the source failed to resolve).
    pub fn run_deferred(&mut self, dst: &mut Snapshot) {
        for task in std::mem::take(&mut self.tasks) {
            match task {
                ExtractTask::Transform { slot, node } => {
                    if let Some(record) = dst.transforms.get_mut(slot) {
                        do_extract_transform(record, &node, &self.cfg);
                    }
                }
                ExtractTask::Camera { slot, node } => {
                    if let Some(record) = dst.cameras.get_mut(slot) {
                        do_extract_camera(record, &node, &self.cfg);
                    }
                }
                ExtractTask::Light { slot, node } => {
                    if let Some(record) = dst.lights.get_mut(slot) {
                        do_extract_light(record, &node, &self.cfg);
                    }
                }
                ExtractTask::Mesh { slot, node } => {
                    if let Some(record) = dst.meshes.get_mut(slot) {
                        do_extract_mesh(record, &node, &self.cfg, &mut self.materials);
                    }
                }
            }
        }
    }
}
