//! In-memory fake host for snapsync tests: nodes, curves, mesh shapes, and a
//! few canned scenes shared across the extraction test suites.

use snapsync_api_core::MAT4_IDENTITY;
use snapsync_extract_core::{
    AnimCurve, AnimatedChannel, BlendShapeChannel, BlendShapeDeformer, CameraShape, ChannelRole,
    ColorSet, DeformerSite, Influence, JointAttributes, LightShape, MeshGeometry, MeshShape,
    Polygon, RotationOrder, SceneNode, ShadingAssignment, SkinCluster, TweakOverlay, UvSet,
};

/// Piecewise-linear curve over explicit (time, value) keys.
#[derive(Clone, Debug, Default)]
pub struct FakeCurve {
    keys: Vec<(f32, f32)>,
}

impl FakeCurve {
    pub fn new(keys: &[(f32, f32)]) -> Self {
        Self { keys: keys.to_vec() }
    }
}

impl AnimCurve for FakeCurve {
    fn key_times(&self) -> Vec<f32> {
        self.keys.iter().map(|(t, _)| *t).collect()
    }

    fn evaluate(&self, time: f32) -> f32 {
        match self.keys.len() {
            0 => 0.0,
            1 => self.keys[0].1,
            _ => {
                if time <= self.keys[0].0 {
                    return self.keys[0].1;
                }
                let last = self.keys[self.keys.len() - 1];
                if time >= last.0 {
                    return last.1;
                }
                for pair in self.keys.windows(2) {
                    let (t0, v0) = pair[0];
                    let (t1, v1) = pair[1];
                    if time >= t0 && time <= t1 {
                        let u = (time - t0) / (t1 - t0).max(f32::EPSILON);
                        return v0 + (v1 - v0) * u;
                    }
                }
                last.1
            }
        }
    }
}

/// Geometry backed by plain vectors.
#[derive(Clone, Debug, Default)]
pub struct FakeGeometry {
    /// None simulates a host failure to read points.
    pub points: Option<Vec<[f32; 3]>>,
    pub polygons: Vec<Polygon>,
    pub normals: Option<Vec<[f32; 3]>>,
    pub uv_set: Option<UvSet>,
    pub color_set: Option<ColorSet>,
}

impl MeshGeometry for FakeGeometry {
    fn points(&self) -> Option<Vec<[f32; 3]>> {
        self.points.clone()
    }
    fn polygons(&self) -> Vec<Polygon> {
        self.polygons.clone()
    }
    fn normals(&self) -> Option<Vec<[f32; 3]>> {
        self.normals.clone()
    }
    fn uv_set(&self) -> Option<UvSet> {
        self.uv_set.clone()
    }
    fn color_set(&self) -> Option<ColorSet> {
        self.color_set.clone()
    }
}

#[derive(Clone, Debug, Default)]
pub struct FakeBlendShape {
    pub channels: Vec<BlendShapeChannel>,
}

impl BlendShapeDeformer for FakeBlendShape {
    fn channels(&self) -> Vec<BlendShapeChannel> {
        self.channels.clone()
    }
}

#[derive(Clone, Debug, Default)]
pub struct FakeSkinCluster {
    pub influences: Vec<Influence>,
    /// Outer index: vertex; inner: weight per influence.
    pub weights: Vec<Vec<f32>>,
    pub output_index: usize,
}

impl SkinCluster for FakeSkinCluster {
    fn influences(&self) -> Vec<Influence> {
        self.influences.clone()
    }
    fn vertex_weights(&self, vertex: usize) -> Vec<f32> {
        self.weights.get(vertex).cloned().unwrap_or_default()
    }
    fn output_index(&self) -> usize {
        self.output_index
    }
}

#[derive(Clone, Debug, Default)]
pub struct FakeMeshShape {
    pub visible: bool,
    pub geometry: FakeGeometry,
    pub orig_geometry: Option<FakeGeometry>,
    pub blend_shape: Option<FakeBlendShape>,
    pub skin: Option<FakeSkinCluster>,
    /// Tweak overlays keyed by (deformer site, output index).
    pub tweaks: Vec<(DeformerSite, usize, TweakOverlay)>,
    pub shading: ShadingAssignment,
}

impl MeshShape for FakeMeshShape {
    fn visible(&self) -> bool {
        self.visible
    }
    fn geometry(&self) -> &dyn MeshGeometry {
        &self.geometry
    }
    fn orig_geometry(&self) -> Option<&dyn MeshGeometry> {
        self.orig_geometry.as_ref().map(|g| g as &dyn MeshGeometry)
    }
    fn blend_shape(&self) -> Option<&dyn BlendShapeDeformer> {
        self.blend_shape.as_ref().map(|b| b as &dyn BlendShapeDeformer)
    }
    fn skin_cluster(&self) -> Option<&dyn SkinCluster> {
        self.skin.as_ref().map(|s| s as &dyn SkinCluster)
    }
    fn tweak_overlay(&self, site: DeformerSite, output_index: usize) -> Option<TweakOverlay> {
        self.tweaks
            .iter()
            .find(|(s, i, _)| *s == site && *i == output_index)
            .map(|(_, _, overlay)| overlay.clone())
    }
    fn shading_assignment(&self) -> ShadingAssignment {
        self.shading.clone()
    }
}

/// A scene node with every capability optional, built field-by-field.
#[derive(Default)]
pub struct FakeNode {
    pub path: String,
    pub position: [f32; 3],
    pub rotation: [f32; 4],
    pub scale: [f32; 3],
    pub visible_in_hierarchy: bool,
    pub rotation_order: RotationOrder,
    pub joint: Option<JointAttributes>,
    pub channels: Vec<(ChannelRole, FakeCurve)>,
    pub shape_channels: Vec<(ChannelRole, FakeCurve)>,
    pub camera: Option<CameraShape>,
    pub light: Option<LightShape>,
    pub mesh: Option<FakeMeshShape>,
}

impl FakeNode {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            rotation: [0.0, 0.0, 0.0, 1.0],
            scale: [1.0; 3],
            visible_in_hierarchy: true,
            ..Default::default()
        }
    }

    pub fn with_trs(mut self, position: [f32; 3], rotation: [f32; 4], scale: [f32; 3]) -> Self {
        self.position = position;
        self.rotation = rotation;
        self.scale = scale;
        self
    }

    pub fn with_channel(mut self, role: ChannelRole, curve: FakeCurve) -> Self {
        self.channels.push((role, curve));
        self
    }

    pub fn with_shape_channel(mut self, role: ChannelRole, curve: FakeCurve) -> Self {
        self.shape_channels.push((role, curve));
        self
    }

    pub fn with_mesh(mut self, mesh: FakeMeshShape) -> Self {
        self.mesh = Some(mesh);
        self
    }
}

impl SceneNode for FakeNode {
    fn path(&self) -> String {
        self.path.clone()
    }
    fn local_position(&self) -> [f32; 3] {
        self.position
    }
    fn local_rotation(&self) -> [f32; 4] {
        self.rotation
    }
    fn local_scale(&self) -> [f32; 3] {
        self.scale
    }
    fn visible_in_hierarchy(&self) -> bool {
        self.visible_in_hierarchy
    }
    fn rotation_order(&self) -> RotationOrder {
        self.rotation_order
    }
    fn joint(&self) -> Option<JointAttributes> {
        self.joint
    }
    fn animated_channels(&self) -> Vec<AnimatedChannel<'_>> {
        self.channels
            .iter()
            .map(|(role, curve)| AnimatedChannel {
                role: *role,
                curve: curve as &dyn AnimCurve,
            })
            .collect()
    }
    fn shape_animated_channels(&self) -> Vec<AnimatedChannel<'_>> {
        self.shape_channels
            .iter()
            .map(|(role, curve)| AnimatedChannel {
                role: *role,
                curve: curve as &dyn AnimCurve,
            })
            .collect()
    }
    fn camera_shape(&self) -> Option<CameraShape> {
        self.camera
    }
    fn light_shape(&self) -> Option<LightShape> {
        self.light
    }
    fn mesh_shape(&self) -> Option<&dyn MeshShape> {
        self.mesh.as_ref().map(|m| m as &dyn MeshShape)
    }
}

/// A polygon whose corners index vertices, normals, uvs, and colors all by
/// the same sequence (the common case for simple fixtures).
pub fn uniform_polygon(indices: &[u32]) -> Polygon {
    Polygon {
        vertex_indices: indices.to_vec(),
        normal_indices: indices.to_vec(),
        uv_indices: indices.iter().map(|i| Some(*i)).collect(),
        color_indices: indices.iter().map(|i| Some(*i)).collect(),
    }
}

/// Unit quad in the XY plane: 4 vertices, 1 face, one uv per corner.
pub fn quad_geometry() -> FakeGeometry {
    FakeGeometry {
        points: Some(vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
        ]),
        polygons: vec![uniform_polygon(&[0, 1, 2, 3])],
        normals: Some(vec![[0.0, 0.0, 1.0]; 4]),
        uv_set: Some(UvSet {
            u: vec![0.0, 1.0, 1.0, 0.0],
            v: vec![0.0, 0.0, 1.0, 1.0],
        }),
        color_set: Some(ColorSet {
            colors: vec![[1.0, 0.0, 0.0, 1.0]; 4],
        }),
    }
}

/// Two triangles sharing an edge: counts [3, 3], 6 corners.
pub fn two_triangle_geometry() -> FakeGeometry {
    FakeGeometry {
        points: Some(vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
        ]),
        polygons: vec![uniform_polygon(&[0, 1, 2]), uniform_polygon(&[0, 2, 3])],
        normals: Some(vec![[0.0, 0.0, 1.0]; 4]),
        uv_set: Some(UvSet {
            u: vec![0.0, 1.0, 1.0, 0.0],
            v: vec![0.0, 0.0, 1.0, 1.0],
        }),
        color_set: None,
    }
}

/// Visible mesh node over the unit quad, no deformers.
pub fn quad_mesh_node(path: &str) -> FakeNode {
    FakeNode::new(path).with_mesh(FakeMeshShape {
        visible: true,
        geometry: quad_geometry(),
        ..Default::default()
    })
}

/// Two-bone skin over the unit quad: the left edge follows joint1, the right
/// edge follows joint2. The deformed output is offset so tests can verify the
/// original geometry is preferred.
pub fn skinned_quad_node(path: &str) -> FakeNode {
    let mut deformed = quad_geometry();
    if let Some(points) = &mut deformed.points {
        for p in points {
            p[2] += 5.0;
        }
    }
    FakeNode::new(path).with_mesh(FakeMeshShape {
        visible: true,
        geometry: deformed,
        orig_geometry: Some(quad_geometry()),
        skin: Some(FakeSkinCluster {
            influences: vec![
                Influence {
                    path: "/root/joint1".into(),
                    root_path: "/root".into(),
                    bind_pose: MAT4_IDENTITY,
                },
                Influence {
                    path: "/root/joint1/joint2".into(),
                    root_path: "/root".into(),
                    bind_pose: MAT4_IDENTITY,
                },
            ],
            weights: vec![
                vec![1.0, 0.0],
                vec![0.0, 1.0],
                vec![0.0, 1.0],
                vec![1.0, 0.0],
            ],
            output_index: 0,
        }),
        ..Default::default()
    })
}
