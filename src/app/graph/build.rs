use std::collections::HashMap;

use eframe::egui::{Color32, Vec2, vec2};
use log::warn;

use crate::glyph::{GlyphDocument, NodeMetrics, NodeRecord};
use crate::util::stable_pair;

use super::super::motion::Eased;
use super::super::theme::MotionSettings;
use super::super::{GraphLink, GraphNode, Scene};

/// Reserved id of the synthetic whole-project node.
pub(in crate::app) const ROOT_ID: &str = "project";

const DEFAULT_BOUNDS: Vec2 = vec2(1200.0, 800.0);
const ROOT_STYLE_SIZE: f32 = 2.0;

const LOC_CLAMP_MIN: f32 = 1.0;
const LOC_CLAMP_MAX: f32 = 10_000.0;
const RADIUS_MIN: f32 = 10.0;
const RADIUS_MAX: f32 = 20.0;

/// Affine map from the clamped lines-of-code metric into a bounded visual
/// radius range, scaled by the per-node style size and the theme's size
/// multiplier. Outlier metrics can never produce an outlier radius.
fn node_radius(loc: u64, style_size: f32, size_scale: f32) -> f32 {
    let clamped = (loc as f32).clamp(LOC_CLAMP_MIN, LOC_CLAMP_MAX);
    let t = (clamped - LOC_CLAMP_MIN) / (LOC_CLAMP_MAX - LOC_CLAMP_MIN);
    (RADIUS_MIN + t * (RADIUS_MAX - RADIUS_MIN)) * style_size * size_scale
}

fn parse_style_color(style_color: Option<&str>) -> Option<Color32> {
    let hex = style_color?.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let value = u32::from_str_radix(hex, 16).ok()?;
    Some(Color32::from_rgb(
        (value >> 16) as u8,
        (value >> 8) as u8,
        value as u8,
    ))
}

fn spawn_position(id: &str, bounds: Vec2) -> Vec2 {
    let (jx, jy) = stable_pair(id);
    vec2(
        (jx + 1.0) * 0.5 * bounds.x,
        (jy + 1.0) * 0.5 * bounds.y,
    )
}

fn make_node(record: &NodeRecord, pos: Vec2, motion: &MotionSettings) -> GraphNode {
    let style_size = record.style.size.unwrap_or(1.0);
    GraphNode {
        id: record.id.clone(),
        name: record.name.clone(),
        kind: record.kind.clone(),
        pos,
        vel: Vec2::ZERO,
        radius: node_radius(record.metrics.loc, style_size, motion.size_scale),
        fixed: false,
        metrics: record.metrics,
        style_size,
        style_color: parse_style_color(record.style.color.as_deref()),
        glow: Eased::new(0.0, motion.glow_duration),
    }
}

impl Scene {
    /// Builds the node arena and resolved links from a freshly loaded
    /// document. One synthetic root node represents the whole project and
    /// starts at the canvas center; everything else spawns at a stable
    /// pseudo-random point inside the canvas bounds and is left to the
    /// collision step to untangle.
    pub(in crate::app) fn build(document: &GlyphDocument, motion: &MotionSettings) -> Self {
        let bounds = DEFAULT_BOUNDS;

        let root_record = NodeRecord {
            id: ROOT_ID.to_owned(),
            name: document.project.name.clone(),
            kind: "root".to_owned(),
            path: None,
            metrics: NodeMetrics {
                loc: document.project.metrics.total_loc,
                complexity: document.project.metrics.average_complexity,
                imports: document.project.metrics.dependencies,
                functions: document.project.metrics.functions,
                classes: document.project.metrics.classes,
                calls: 0,
            },
            style: crate::glyph::NodeStyle {
                color: None,
                size: Some(ROOT_STYLE_SIZE),
            },
        };

        let mut nodes = Vec::with_capacity(document.nodes.len() + 1);
        let mut index_by_id = HashMap::with_capacity(document.nodes.len() + 1);

        nodes.push(make_node(&root_record, bounds * 0.5, motion));
        index_by_id.insert(ROOT_ID.to_owned(), 0);

        for record in &document.nodes {
            if index_by_id.contains_key(&record.id) {
                warn!("duplicate node id {:?} ignored", record.id);
                continue;
            }
            let index = nodes.len();
            nodes.push(make_node(record, spawn_position(&record.id, bounds), motion));
            index_by_id.insert(record.id.clone(), index);
        }

        // Links resolve to arena indices once, here. A link either end of
        // which is unknown never enters the collection; best-effort import.
        let mut links = Vec::with_capacity(document.links.len());
        let mut dropped_links = 0usize;
        for record in &document.links {
            match (
                index_by_id.get(&record.source),
                index_by_id.get(&record.target),
            ) {
                (Some(&source), Some(&target)) => links.push(GraphLink {
                    source,
                    target,
                    relation: record.relation,
                }),
                _ => {
                    dropped_links += 1;
                    warn!(
                        "dropping link {} -> {}: unresolved endpoint",
                        record.source, record.target
                    );
                }
            }
        }

        Self {
            nodes,
            links,
            index_by_id,
            root_index: 0,
            dropped_links,
            bounds,
        }
    }

    /// Merges metric updates from a re-exported document onto the existing
    /// nodes by id. Positions, velocities, and links are left alone; the
    /// layout stays warm. Ids absent from the scene are ignored.
    pub(in crate::app) fn merge_document(
        &mut self,
        document: &GlyphDocument,
        motion: &MotionSettings,
    ) {
        for record in &document.nodes {
            let Some(&index) = self.index_by_id.get(&record.id) else {
                continue;
            };
            let node = &mut self.nodes[index];
            node.metrics = record.metrics;
            if let Some(size) = record.style.size {
                node.style_size = size;
            }
            if record.style.color.is_some() {
                node.style_color = parse_style_color(record.style.color.as_deref());
            }
            node.radius = node_radius(record.metrics.loc, node.style_size, motion.size_scale);
        }

        let root = &mut self.nodes[self.root_index];
        root.metrics.loc = document.project.metrics.total_loc;
        root.metrics.complexity = document.project.metrics.average_complexity;
        root.radius = node_radius(root.metrics.loc, root.style_size, motion.size_scale);
    }

    /// Re-applies theme-derived sizing after a theme switch.
    pub(in crate::app) fn apply_size_scale(&mut self, motion: &MotionSettings) {
        for node in &mut self.nodes {
            node.radius = node_radius(node.metrics.loc, node.style_size, motion.size_scale);
        }
    }

    /// Throws every node back to its spawn position and clears motion.
    pub(in crate::app) fn reset_layout(&mut self) {
        let bounds = self.bounds;
        for (index, node) in self.nodes.iter_mut().enumerate() {
            node.pos = if index == 0 {
                bounds * 0.5
            } else {
                spawn_position(&node.id, bounds)
            };
            node.vel = Vec2::ZERO;
            node.fixed = false;
        }
    }

    pub(in crate::app) fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub(in crate::app) fn link_count(&self) -> usize {
        self.links.len()
    }
}

#[cfg(test)]
impl Scene {
    pub(in crate::app) fn for_tests(entries: &[(&str, Vec2, f32)]) -> Self {
        let mut nodes = Vec::new();
        let mut index_by_id = HashMap::new();
        for (index, (id, pos, radius)) in entries.iter().enumerate() {
            index_by_id.insert((*id).to_owned(), index);
            nodes.push(GraphNode {
                id: (*id).to_owned(),
                name: (*id).to_owned(),
                kind: "file".to_owned(),
                pos: *pos,
                vel: Vec2::ZERO,
                radius: *radius,
                fixed: false,
                metrics: NodeMetrics::default(),
                style_size: 1.0,
                style_color: None,
                glow: Eased::new(0.0, 0.35),
            });
        }
        Self {
            nodes,
            links: Vec::new(),
            index_by_id,
            root_index: 0,
            dropped_links: 0,
            bounds: DEFAULT_BOUNDS,
        }
    }

    pub(in crate::app) fn push_link_for_tests(
        &mut self,
        source: usize,
        target: usize,
        relation: crate::glyph::Relation,
    ) {
        self.links.push(GraphLink {
            source,
            target,
            relation,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::theme::Theme;
    use crate::glyph::GlyphDocument;

    fn document(json: &str) -> GlyphDocument {
        serde_json::from_str(json).expect("test document parses")
    }

    fn sample() -> GlyphDocument {
        document(
            r#"{
                "project": { "name": "demo", "metrics": { "totalLOC": 4200 } },
                "nodes": [
                    { "id": "a", "name": "a.rs", "type": "file", "metrics": { "loc": 100 } },
                    { "id": "b", "name": "b.rs", "type": "file", "metrics": { "loc": 900 } }
                ],
                "links": [
                    { "source": "a", "target": "b", "relation": "imports" },
                    { "source": "a", "target": "ghost", "relation": "calls" },
                    { "source": "project", "target": "a", "relation": "contains" }
                ]
            }"#,
        )
    }

    #[test]
    fn builds_synthetic_root_and_drops_dangling_links() {
        let scene = Scene::build(&sample(), &Theme::dark().motion);

        assert_eq!(scene.node_count(), 3);
        assert_eq!(scene.nodes[scene.root_index].id, ROOT_ID);
        assert_eq!(scene.nodes[scene.root_index].pos, DEFAULT_BOUNDS * 0.5);

        // "a -> ghost" is gone; both survivors resolve to live indices.
        assert_eq!(scene.link_count(), 2);
        assert_eq!(scene.dropped_links, 1);
        for link in &scene.links {
            assert!(link.source < scene.node_count());
            assert!(link.target < scene.node_count());
        }
    }

    #[test]
    fn radius_is_bounded_for_outlier_metrics() {
        let scale = 1.0;
        assert_eq!(node_radius(0, 1.0, scale), RADIUS_MIN);
        assert_eq!(node_radius(u64::MAX, 1.0, scale), RADIUS_MAX);
        let mid = node_radius(5_000, 1.0, scale);
        assert!(mid > RADIUS_MIN && mid < RADIUS_MAX);
    }

    #[test]
    fn radius_scales_with_style_and_theme() {
        assert_eq!(node_radius(0, 2.0, 1.0), RADIUS_MIN * 2.0);
        assert_eq!(node_radius(0, 1.0, 1.5), RADIUS_MIN * 1.5);
    }

    #[test]
    fn spawn_positions_stay_inside_bounds() {
        let scene = Scene::build(&sample(), &Theme::dark().motion);
        for node in &scene.nodes {
            assert!((0.0..=scene.bounds.x).contains(&node.pos.x), "{}", node.id);
            assert!((0.0..=scene.bounds.y).contains(&node.pos.y), "{}", node.id);
        }
    }

    #[test]
    fn merge_updates_metrics_without_moving_nodes() {
        let motion = Theme::dark().motion;
        let mut scene = Scene::build(&sample(), &motion);
        let index = scene.index_by_id["a"];
        scene.nodes[index].pos = vec2(77.0, 33.0);
        let old_radius = scene.nodes[index].radius;

        let update = document(
            r#"{
                "project": { "name": "demo", "metrics": { "totalLOC": 5000 } },
                "nodes": [
                    { "id": "a", "name": "a.rs", "type": "file", "metrics": { "loc": 9000 } },
                    { "id": "new", "name": "new.rs", "type": "file" }
                ],
                "links": []
            }"#,
        );
        scene.merge_document(&update, &motion);

        assert_eq!(scene.nodes[index].pos, vec2(77.0, 33.0));
        assert_eq!(scene.nodes[index].metrics.loc, 9000);
        assert!(scene.nodes[index].radius > old_radius);
        // Unknown ids in the update never grow the arena.
        assert_eq!(scene.node_count(), 3);
    }

    #[test]
    fn style_color_parses_hex() {
        assert_eq!(
            parse_style_color(Some("#3b82f6")),
            Some(Color32::from_rgb(0x3b, 0x82, 0xf6))
        );
        assert_eq!(parse_style_color(Some("blue")), None);
        assert_eq!(parse_style_color(None), None);
    }

    #[test]
    fn reset_layout_restores_spawn_state() {
        let motion = Theme::dark().motion;
        let mut scene = Scene::build(&sample(), &motion);
        let spawn = scene.nodes[1].pos;
        scene.nodes[1].pos = vec2(-500.0, -500.0);
        scene.nodes[1].vel = vec2(3.0, 3.0);
        scene.nodes[1].fixed = true;

        scene.reset_layout();
        assert_eq!(scene.nodes[1].pos, spawn);
        assert_eq!(scene.nodes[1].vel, Vec2::ZERO);
        assert!(!scene.nodes[1].fixed);
    }
}
