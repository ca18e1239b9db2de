use snapsync_api_core::{AnimationBlock, CameraRecord, LightKind, LightRecord, Snapshot};
use snapsync_extract_core::math::{flip_y, INCH_TO_MILLIMETER, RAD_TO_DEG};
use snapsync_extract_core::{
    CameraShape, ChannelRole, ExtractConfig, Extractor, LightShape, LightShapeKind,
};
use snapsync_test_fixtures::{FakeCurve, FakeNode};

fn approx(a: f32, b: f32, eps: f32) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

fn approx4(a: [f32; 4], b: [f32; 4], eps: f32) {
    for i in 0..4 {
        assert!((a[i] - b[i]).abs() <= eps, "left={a:?} right={b:?}");
    }
}

fn test_camera_shape() -> CameraShape {
    CameraShape {
        is_ortho: false,
        near_plane: 0.1,
        far_plane: 500.0,
        horizontal_fov: 0.6911112, // ~39.6 degrees
        horizontal_aperture: 1.417323, // 36mm in inches
        vertical_aperture: 0.9448819,  // 24mm in inches
        focal_length: 50.0,
        focus_distance: 5.0,
    }
}

fn extract_camera(node: FakeNode, cfg: ExtractConfig) -> CameraRecord {
    let mut extractor = Extractor::new(cfg);
    let mut snapshot = Snapshot::default();
    let handle = extractor.extract_camera(&mut snapshot, node);
    extractor.run_deferred(&mut snapshot);
    snapshot.cameras.swap_remove(handle.0)
}

fn extract_light(node: FakeNode, cfg: ExtractConfig) -> LightRecord {
    let mut extractor = Extractor::new(cfg);
    let mut snapshot = Snapshot::default();
    let handle = extractor.extract_light(&mut snapshot, node);
    extractor.run_deferred(&mut snapshot);
    snapshot.lights.swap_remove(handle.0)
}

#[test]
fn camera_fields_are_converted_to_degrees_and_millimeters() {
    let mut node = FakeNode::new("/root/cam");
    node.camera = Some(test_camera_shape());
    let record = extract_camera(node, ExtractConfig::default());

    approx(record.fov, 0.6911112 * RAD_TO_DEG, 1e-3);
    approx(record.horizontal_aperture, 36.0, 1e-3);
    approx(record.vertical_aperture, 24.0, 1e-3);
    approx(record.near_plane, 0.1, 1e-6);
    approx(record.far_plane, 500.0, 1e-6);
    approx(record.focal_length, 50.0, 1e-6);
    approx(record.focus_distance, 5.0, 1e-6);
    assert!(!record.is_ortho);
}

#[test]
fn camera_rotation_gets_the_flip_y_correction() {
    let mut node = FakeNode::new("/root/cam");
    node.camera = Some(test_camera_shape());
    let record = extract_camera(node, ExtractConfig::default());
    approx4(record.transform.rotation, flip_y([0.0, 0.0, 0.0, 1.0]), 1e-6);
}

#[test]
fn camera_sampled_rotations_are_flipped_too() {
    let half = std::f32::consts::FRAC_PI_2;
    let mut node = FakeNode::new("/root/cam")
        .with_channel(ChannelRole::RotateY, FakeCurve::new(&[(0.0, 0.0), (1.0, half)]));
    node.camera = Some(test_camera_shape());
    let record = extract_camera(node, ExtractConfig::default());

    let Some(block) = &record.transform.animation else {
        panic!("expected animation");
    };
    assert!(matches!(block, AnimationBlock::Camera(_)));
    let rotation = &block.transform().rotation;
    assert_eq!(rotation.len(), 2);
    approx4(rotation[0].value, flip_y([0.0, 0.0, 0.0, 1.0]), 1e-5);
}

#[test]
fn missing_camera_shape_leaves_the_record_minimal() {
    let node = FakeNode::new("/root/not_a_cam");
    let record = extract_camera(node, ExtractConfig::default());
    // Transform populated, projection fields untouched defaults.
    assert_eq!(record.transform.path, "/root/not_a_cam");
    let defaults = CameraRecord::default();
    assert_eq!(record.fov, defaults.fov);
    assert_eq!(record.focal_length, defaults.focal_length);
}

#[test]
fn animated_focal_length_yields_camera_block_with_derived_fov() {
    let mut node = FakeNode::new("/root/cam").with_shape_channel(
        ChannelRole::FocalLength,
        FakeCurve::new(&[(0.0, 10.0), (1.0, 20.0), (2.0, 30.0), (3.0, 40.0), (4.0, 50.0)]),
    );
    node.camera = Some(test_camera_shape());
    let record = extract_camera(node, ExtractConfig::default());

    let Some(AnimationBlock::Camera(anim)) = &record.transform.animation else {
        panic!("expected a camera animation block");
    };
    assert_eq!(anim.focal_length.len(), 5);
    assert_eq!(anim.fov.len(), 5);
    // Static aperture (mm) over the animated focal length.
    for (f, fov) in anim.focal_length.iter().zip(&anim.fov) {
        let expected = 2.0 * (record.horizontal_aperture / (2.0 * f.value)).atan().to_degrees();
        approx(fov.value, expected, 1e-3);
    }
    assert!(anim.near_plane.is_empty());
}

#[test]
fn animated_aperture_channel_is_converted_to_millimeters() {
    let mut node = FakeNode::new("/root/cam").with_shape_channel(
        ChannelRole::HorizontalAperture,
        FakeCurve::new(&[(0.0, 1.0), (1.0, 2.0)]),
    );
    node.camera = Some(test_camera_shape());
    let record = extract_camera(node, ExtractConfig::default());

    let Some(AnimationBlock::Camera(anim)) = &record.transform.animation else {
        panic!("expected a camera animation block");
    };
    assert_eq!(anim.horizontal_aperture.len(), 2);
    approx(anim.horizontal_aperture[0].value, INCH_TO_MILLIMETER, 1e-4);
    approx(anim.horizontal_aperture[1].value, 2.0 * INCH_TO_MILLIMETER, 1e-4);
    // fov derives from the animated aperture against the static focal length.
    assert_eq!(anim.fov.len(), 2);
}

#[test]
fn camera_transform_animation_is_rewrapped_into_the_camera_variant() {
    let mut node = FakeNode::new("/root/cam")
        .with_channel(ChannelRole::TranslateX, FakeCurve::new(&[(0.0, 0.0), (1.0, 1.0)]));
    node.camera = Some(test_camera_shape());
    let record = extract_camera(node, ExtractConfig::default());
    let Some(AnimationBlock::Camera(anim)) = &record.transform.animation else {
        panic!("expected the camera variant");
    };
    assert_eq!(anim.transform.translation.len(), 2);
    assert!(anim.fov.is_empty());
}

#[test]
fn spot_light_gets_kind_and_cone_angle_in_degrees() {
    let mut node = FakeNode::new("/root/spot");
    node.light = Some(LightShape {
        kind: LightShapeKind::Spot {
            cone_angle: std::f32::consts::FRAC_PI_4,
        },
        color: [1.0, 0.5, 0.25, 1.0],
        intensity: 2.0,
    });
    let record = extract_light(node, ExtractConfig::default());
    assert_eq!(record.kind, Some(LightKind::Spot));
    approx(record.spot_angle, 45.0, 1e-4);
    assert_eq!(record.color, [1.0, 0.5, 0.25, 1.0]);
    approx(record.intensity, 2.0, 1e-6);
}

#[test]
fn unsupported_light_shape_is_a_no_op_beyond_the_transform() {
    let node = FakeNode::new("/root/volume_light");
    let record = extract_light(node, ExtractConfig::default());
    assert_eq!(record.kind, None);
    assert_eq!(record.transform.path, "/root/volume_light");
    let defaults = LightRecord::default();
    assert_eq!(record.color, defaults.color);
    assert_eq!(record.intensity, defaults.intensity);
}

#[test]
fn light_rotation_is_flipped_like_cameras() {
    let mut node = FakeNode::new("/root/sun");
    node.light = Some(LightShape {
        kind: LightShapeKind::Directional,
        color: [1.0; 4],
        intensity: 1.0,
    });
    let record = extract_light(node, ExtractConfig::default());
    assert_eq!(record.kind, Some(LightKind::Directional));
    approx4(record.transform.rotation, flip_y([0.0, 0.0, 0.0, 1.0]), 1e-6);
}

#[test]
fn animated_light_color_samples_with_static_alpha_fallback() {
    let mut node = FakeNode::new("/root/point")
        .with_shape_channel(ChannelRole::ColorR, FakeCurve::new(&[(0.0, 0.0), (1.0, 1.0)]))
        .with_shape_channel(ChannelRole::Intensity, FakeCurve::new(&[(0.0, 3.0)]));
    node.light = Some(LightShape {
        kind: LightShapeKind::Point,
        color: [0.2, 0.4, 0.6, 0.8],
        intensity: 3.0,
    });
    let record = extract_light(node, ExtractConfig::default());

    let Some(AnimationBlock::Light(anim)) = &record.transform.animation else {
        panic!("expected a light animation block");
    };
    assert_eq!(anim.color.len(), 2);
    // G, B, A come from the static color at every sample.
    approx(anim.color[1].value[0], 1.0, 1e-5);
    approx(anim.color[1].value[1], 0.4, 1e-5);
    approx(anim.color[1].value[2], 0.6, 1e-5);
    approx(anim.color[1].value[3], 0.8, 1e-5);
    assert_eq!(anim.intensity.len(), 1);
}

#[test]
fn light_transform_animation_is_rewrapped_into_the_light_variant() {
    let mut node = FakeNode::new("/root/area")
        .with_channel(ChannelRole::TranslateZ, FakeCurve::new(&[(0.0, 0.0), (2.0, 4.0)]));
    node.light = Some(LightShape {
        kind: LightShapeKind::Area,
        color: [1.0; 4],
        intensity: 1.0,
    });
    let record = extract_light(node, ExtractConfig::default());
    let Some(AnimationBlock::Light(anim)) = &record.transform.animation else {
        panic!("expected the light variant");
    };
    assert_eq!(anim.transform.translation.len(), 2);
    assert!(anim.color.is_empty());
}
