use eframe::egui::Pos2;

use super::super::{Camera, EntityRef, Scene};

/// 5px pick band around a link, squared. Screen space, so it stays a true
/// pixel tolerance at any zoom.
const LINK_HIT_THRESHOLD_SQ: f32 = 25.0;

/// Squared distance from `point` to the segment `a..b`, or None when the
/// perpendicular projection falls outside the segment. A zero-length
/// segment has no interior and is never hit.
fn segment_distance_sq(point: Pos2, a: Pos2, b: Pos2) -> Option<f32> {
    let ab = b - a;
    let length_sq = ab.length_sq();
    if length_sq == 0.0 {
        return None;
    }

    let t = (point - a).dot(ab) / length_sq;
    if !(0.0..=1.0).contains(&t) {
        return None;
    }

    let nearest = a + ab * t;
    Some((point - nearest).length_sq())
}

/// First node (insertion order) whose screen-space circle contains the
/// pointer. Ties between overlapping nodes resolve to the earliest one.
pub(in crate::app) fn node_at(scene: &Scene, camera: &Camera, pointer: Pos2) -> Option<usize> {
    scene.nodes.iter().position(|node| {
        let center = camera.graph_to_screen(node.pos);
        let radius = node.radius * camera.scale;
        (pointer - center).length_sq() <= radius * radius
    })
}

pub(in crate::app) fn link_at(scene: &Scene, camera: &Camera, pointer: Pos2) -> Option<usize> {
    scene.links.iter().position(|link| {
        let a = camera.graph_to_screen(scene.nodes[link.source].pos);
        let b = camera.graph_to_screen(scene.nodes[link.target].pos);
        segment_distance_sq(pointer, a, b)
            .is_some_and(|distance_sq| distance_sq < LINK_HIT_THRESHOLD_SQ)
    })
}

/// What is under the cursor. Nodes win over links.
pub(in crate::app) fn entity_at(
    scene: &Scene,
    camera: &Camera,
    pointer: Pos2,
) -> Option<EntityRef> {
    node_at(scene, camera, pointer)
        .map(EntityRef::Node)
        .or_else(|| link_at(scene, camera, pointer).map(EntityRef::Link))
}
