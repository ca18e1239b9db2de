//! Mesh extraction: geometry, face-varying attributes, materials, tweak
//! overlays, blend shapes, and skinning.
//!
//! Every step is a hard gate: failure to resolve a shape or its points
//! returns early with an effectively-empty record (zero points means "no
//! mesh" to callers). Corner-indexed arrays (normals/uv0/colors) are parallel
//! to the flattened index array, never to the point array.

use snapsync_api_core::{BlendShapeData, BlendShapeFrame, BoneData, MeshRecord};

use crate::config::ExtractConfig;
use crate::host::{DeformerSite, MeshGeometry, MeshShape, SceneNode, TargetDelta};
use crate::material::MaterialRegistry;
use crate::math::trs_matrix;
use crate::transform::do_extract_transform;

/// Base weight slot: slot 5000 decodes to target weight 0, 6000 to 100.
const TARGET_SLOT_BASE: i64 = 5000;

pub(crate) fn do_extract_mesh<N: SceneNode + ?Sized>(
    dst: &mut MeshRecord,
    node: &N,
    cfg: &ExtractConfig,
    materials: &mut MaterialRegistry,
) {
    do_extract_transform(&mut dst.transform, node, cfg);

    let Some(shape) = node.mesh_shape() else {
        log::debug!("mesh extraction: no polygon shape under '{}'", dst.transform.path);
        return;
    };
    dst.visible = shape.visible();
    if !dst.visible {
        return;
    }

    let blend_shape = if cfg.sync_blendshapes {
        shape.blend_shape()
    } else {
        None
    };
    let skin = if cfg.sync_bones {
        shape.skin_cluster()
    } else {
        None
    };

    // When the deformation chain is re-expressed as explicit blend-shape
    // deltas and skin weights, geometry must come from the pre-deformation
    // mesh; the deformed output already encodes the blend/skin result.
    let mut geometry: &dyn MeshGeometry = shape.geometry();
    let mut output_index = 0usize;
    if blend_shape.is_some() {
        if let Some(orig) = shape.orig_geometry() {
            geometry = orig;
        }
    }
    if let Some(sk) = skin {
        if let Some(orig) = shape.orig_geometry() {
            geometry = orig;
            output_index = sk.output_index();
        }
    }

    let Some(points) = geometry.points() else {
        log::debug!("mesh extraction: no points under '{}'", dst.transform.path);
        return;
    };
    dst.points = points;

    let polygons = geometry.polygons();
    dst.counts.reserve(polygons.len());
    dst.indices.reserve(polygons.len() * 4);
    for poly in &polygons {
        dst.counts.push(poly.vertex_indices.len() as u32);
        dst.indices.extend_from_slice(&poly.vertex_indices);
    }

    let vertex_count = dst.points.len();
    let index_count = dst.indices.len();
    let face_count = dst.counts.len();

    if cfg.sync_normals {
        if let Some(pool) = geometry.normals() {
            dst.normals = vec![[0.0; 3]; index_count];
            let mut corner = 0usize;
            for poly in &polygons {
                for ni in &poly.normal_indices {
                    if let Some(n) = pool.get(*ni as usize) {
                        dst.normals[corner] = *n;
                    }
                    corner += 1;
                }
            }
        }
    }

    if cfg.sync_uvs {
        if let Some(uv) = geometry.uv_set() {
            dst.uv0 = vec![[0.0; 2]; index_count];
            let mut corner = 0usize;
            for poly in &polygons {
                for iu in &poly.uv_indices {
                    if let Some(iu) = iu {
                        let iu = *iu as usize;
                        if iu < uv.u.len() && iu < uv.v.len() {
                            dst.uv0[corner] = [uv.u[iu], uv.v[iu]];
                        }
                    }
                    corner += 1;
                }
            }
        }
    }

    if cfg.sync_colors {
        if let Some(set) = geometry.color_set() {
            dst.colors = vec![[1.0; 4]; index_count];
            let mut corner = 0usize;
            for poly in &polygons {
                for ic in &poly.color_indices {
                    if let Some(ic) = ic {
                        if let Some(c) = set.colors.get(*ic as usize) {
                            dst.colors[corner] = *c;
                        }
                    }
                    corner += 1;
                }
            }
        }
    }

    // Per-face material ids: shading group -> upstream shader -> registry id.
    let assignment = shape.shading_assignment();
    if !assignment.group_shader_uids.is_empty() {
        let group_ids: Vec<i32> = assignment
            .group_shader_uids
            .iter()
            .map(|uid| uid.as_deref().map_or(-1, |u| materials.id_for(u)))
            .collect();
        dst.material_ids = vec![0; face_count];
        let len = face_count.min(assignment.face_groups.len());
        for i in 0..len {
            dst.material_ids[i] = group_ids
                .get(assignment.face_groups[i] as usize)
                .copied()
                .unwrap_or(-1);
        }
    }

    if let Some(bs) = blend_shape {
        for channel in bs.channels() {
            let mut data = BlendShapeData {
                name: channel.name,
                // native 0..1 -> snapshot 0..100 scale
                weight: channel.weight * 100.0,
                frames: Vec::with_capacity(channel.targets.len()),
            };
            for target in channel.targets {
                let mut frame = BlendShapeFrame {
                    weight: (target.slot_index as i64 - TARGET_SLOT_BASE) as f32 / 10.0,
                    deltas: vec![[0.0; 3]; vertex_count],
                };
                match target.delta {
                    TargetDelta::Geometry(target_points) => {
                        let len = target_points.len().min(vertex_count);
                        for pi in 0..len {
                            let t = target_points[pi];
                            let b = dst.points[pi];
                            frame.deltas[pi] = [t[0] - b[0], t[1] - b[1], t[2] - b[2]];
                        }
                    }
                    TargetDelta::Sparse { indices, positions } => {
                        for (vi, pos) in indices.iter().zip(positions) {
                            if let Some(delta) = frame.deltas.get_mut(*vi as usize) {
                                *delta = pos;
                            }
                        }
                    }
                    TargetDelta::Missing => {}
                }
                data.frames.push(frame);
            }
            dst.blendshapes.push(data);
        }

        if cfg.apply_tweak {
            apply_tweaks(dst, shape, output_index);
        }
    }

    if let Some(sk) = skin {
        // Skin weights are defined in bind-time object space; ask consumers
        // to bake the extracted local transform into the geometry.
        dst.bake_transform = Some(trs_matrix(
            dst.transform.position,
            dst.transform.rotation,
            dst.transform.scale,
        ));

        for (i, influence) in sk.influences().into_iter().enumerate() {
            if i == 0 {
                dst.root_bone = influence.root_path;
            }
            dst.bones.push(BoneData {
                path: influence.path,
                bindpose: influence.bind_pose,
                weights: Vec::with_capacity(vertex_count),
            });
        }

        // Vertex-major iteration keeps every influence's weight array
        // index-aligned with the point array.
        for vi in 0..vertex_count {
            let weights = sk.vertex_weights(vi);
            for (bone, w) in dst.bones.iter_mut().zip(weights) {
                bone.weights.push(w);
            }
        }

        if cfg.apply_tweak {
            apply_tweaks(dst, shape, output_index);
        }
    }

    dst.refresh_summary();
}

/// Add the manual tweak overlay onto already-extracted points and uvs.
///
/// Both the blend-shape and the skinning paths read the tweak node through
/// the blend-shape deformer site (with the skin output index); see DESIGN.md
/// before changing the site.
fn apply_tweaks(dst: &mut MeshRecord, shape: &dyn MeshShape, output_index: usize) {
    let Some(overlay) = shape.tweak_overlay(DeformerSite::BlendShape, output_index) else {
        return;
    };
    for (li, delta) in overlay.position_deltas {
        if let Some(p) = dst.points.get_mut(li as usize) {
            p[0] += delta[0];
            p[1] += delta[1];
            p[2] += delta[2];
        }
    }
    for (li, delta) in overlay.uv_deltas {
        if let Some(uv) = dst.uv0.get_mut(li as usize) {
            uv[0] += delta[0];
            uv[1] += delta[1];
        }
    }
}
