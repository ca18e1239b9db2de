use snapsync_api_core::Snapshot;
use snapsync_extract_core::{ExtractConfig, Extractor, ShadingAssignment};
use snapsync_test_fixtures::{quad_mesh_node, FakeNode};

#[test]
fn handles_index_their_record_slots_in_order() {
    let mut extractor = Extractor::new(ExtractConfig::default());
    let mut snapshot = Snapshot::default();

    let t0 = extractor.extract_transform(&mut snapshot, FakeNode::new("/a"));
    let t1 = extractor.extract_transform(&mut snapshot, FakeNode::new("/b"));
    let c0 = extractor.extract_camera(&mut snapshot, FakeNode::new("/cam"));
    let l0 = extractor.extract_light(&mut snapshot, FakeNode::new("/light"));
    let m0 = extractor.extract_mesh(&mut snapshot, quad_mesh_node("/quad"));

    assert_eq!((t0.0, t1.0), (0, 1));
    assert_eq!(c0.0, 0);
    assert_eq!(l0.0, 0);
    assert_eq!(m0.0, 0);
    assert_eq!(extractor.pending(), 5);
}

#[test]
fn records_stay_default_until_the_deferred_pass_runs() {
    let mut extractor = Extractor::new(ExtractConfig::default());
    let mut snapshot = Snapshot::default();

    let handle = extractor.extract_transform(
        &mut snapshot,
        FakeNode::new("/root/node").with_trs([1.0, 2.0, 3.0], [0.0, 0.0, 0.0, 1.0], [1.0; 3]),
    );
    assert_eq!(snapshot.transforms[handle.0].path, "");
    assert_eq!(snapshot.transforms[handle.0].position, [0.0; 3]);

    extractor.run_deferred(&mut snapshot);
    assert_eq!(snapshot.transforms[handle.0].path, "/root/node");
    assert_eq!(snapshot.transforms[handle.0].position, [1.0, 2.0, 3.0]);
}

#[test]
fn run_deferred_drains_the_queue_once() {
    let mut extractor = Extractor::new(ExtractConfig::default());
    let mut snapshot = Snapshot::default();

    extractor.extract_transform(&mut snapshot, FakeNode::new("/a"));
    extractor.extract_transform(&mut snapshot, FakeNode::new("/b"));
    assert_eq!(extractor.pending(), 2);

    extractor.run_deferred(&mut snapshot);
    assert_eq!(extractor.pending(), 0);

    // A second run is a no-op; records keep their values.
    snapshot.transforms[0].position = [9.0; 3];
    extractor.run_deferred(&mut snapshot);
    assert_eq!(snapshot.transforms[0].position, [9.0; 3]);
}

#[test]
fn material_ids_stay_stable_across_meshes_in_one_session() {
    let mut extractor = Extractor::new(ExtractConfig::default());
    let mut snapshot = Snapshot::default();

    let mut first = quad_mesh_node("/quad1");
    if let Some(mesh) = &mut first.mesh {
        mesh.shading = ShadingAssignment {
            group_shader_uids: vec![Some("lambert1".into()), Some("phong2".into())],
            face_groups: vec![0],
        };
    }
    let mut second = quad_mesh_node("/quad2");
    if let Some(mesh) = &mut second.mesh {
        mesh.shading = ShadingAssignment {
            // phong2 seen again, plus a new shader.
            group_shader_uids: vec![Some("phong2".into()), Some("blinn3".into())],
            face_groups: vec![1],
        };
    }

    let h1 = extractor.extract_mesh(&mut snapshot, first);
    let h2 = extractor.extract_mesh(&mut snapshot, second);
    extractor.run_deferred(&mut snapshot);

    assert_eq!(snapshot.meshes[h1.0].material_ids, vec![0]);
    // blinn3 allocates the next id after lambert1 (0) and phong2 (1).
    assert_eq!(snapshot.meshes[h2.0].material_ids, vec![2]);
    assert_eq!(extractor.materials_mut().len(), 3);
}

#[test]
fn queueing_later_records_does_not_invalidate_earlier_handles() {
    let mut extractor = Extractor::new(ExtractConfig::default());
    let mut snapshot = Snapshot::default();

    let first = extractor.extract_mesh(&mut snapshot, quad_mesh_node("/quad1"));
    let second = extractor.extract_mesh(&mut snapshot, quad_mesh_node("/quad2"));
    extractor.run_deferred(&mut snapshot);

    assert_eq!(snapshot.meshes[first.0].transform.path, "/quad1");
    assert_eq!(snapshot.meshes[second.0].transform.path, "/quad2");
    assert_eq!(snapshot.meshes[first.0].points.len(), 4);
}
