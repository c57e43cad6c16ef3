use eframe::egui::{self, Pos2, Rect, Ui, Vec2};

use super::super::{PointerState, ViewModel};
use super::hit;

/// Net pointer travel below this is a click, at or above it a drag.
pub(in crate::app) const CLICK_THRESHOLD: f32 = 5.0;

/// Click/drag disambiguation over the whole press: one accumulated vector
/// from press to release, never per-move deltas, so a jittery but
/// returning pointer still counts as a click.
fn is_click(press: Pos2, release: Pos2, threshold: f32) -> bool {
    (release - press).length() < threshold
}

impl ViewModel {
    pub(in crate::app) fn pointer_down(&mut self, local: Pos2) {
        self.press_origin = Some(local);

        if let Some(index) = hit::node_at(&self.scene, &self.camera, local) {
            let grab_offset = self.camera.screen_to_graph(local) - self.scene.nodes[index].pos;
            self.scene.nodes[index].fixed = true;
            self.pointer = PointerState::DraggingNode { index, grab_offset };
        } else {
            self.pointer = PointerState::Panning { last: local };
        }
    }

    pub(in crate::app) fn pointer_move(&mut self, local: Pos2) {
        match &mut self.pointer {
            PointerState::DraggingNode { index, grab_offset } => {
                // Position is written directly; the integrator skips fixed
                // nodes, so this write is authoritative this tick.
                let pos = self.camera.screen_to_graph(local) - *grab_offset;
                self.scene.nodes[*index].pos = pos;
            }
            PointerState::Panning { last } => {
                let delta = local - *last;
                *last = local;
                self.camera.pan(delta);
            }
            PointerState::Idle => {}
        }
    }

    pub(in crate::app) fn pointer_up(&mut self, local: Pos2) {
        if let PointerState::DraggingNode { index, .. } = self.pointer {
            let node = &mut self.scene.nodes[index];
            node.fixed = false;
            // Forces kept accumulating while anchored; drop them so the
            // node does not fly off on release.
            node.vel = Vec2::ZERO;
        }

        if let Some(press) = self.press_origin.take()
            && is_click(press, local, self.click_threshold)
        {
            self.set_selected(hit::node_at(&self.scene, &self.camera, local));
        }

        self.pointer = PointerState::Idle;
    }

    pub(in crate::app) fn pointer_leave(&mut self) {
        if let PointerState::DraggingNode { index, .. } = self.pointer {
            let node = &mut self.scene.nodes[index];
            node.fixed = false;
            node.vel = Vec2::ZERO;
        }
        self.pointer = PointerState::Idle;
        self.press_origin = None;
        self.hovered = None;
    }

    pub(in crate::app) fn handle_pointer(&mut self, ui: &Ui, rect: Rect, response: &egui::Response) {
        let local = ui
            .input(|input| input.pointer.hover_pos())
            .map(|pos| (pos - rect.min).to_pos2());
        let (pressed, released) = ui.input(|input| {
            (
                input.pointer.primary_pressed(),
                input.pointer.primary_released(),
            )
        });

        match local {
            Some(local) => {
                if pressed && response.hovered() {
                    self.pointer_down(local);
                }
                self.pointer_move(local);
                if released {
                    self.pointer_up(local);
                }
            }
            None => self.pointer_leave(),
        }
    }

    pub(in crate::app) fn handle_zoom(&mut self, ui: &Ui, rect: Rect, response: &egui::Response) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        let anchor = (pointer - rect.min).to_pos2();
        let factor = (1.0 + (scroll * 0.0018)).clamp(0.85, 1.15);
        self.camera.zoom_at(anchor, factor);
    }

    /// Hover is recomputed from here once per rendered frame, not per raw
    /// pointer event, and only while no button interaction is running.
    pub(in crate::app) fn update_hover(&mut self, local: Option<Pos2>) {
        if !matches!(self.pointer, PointerState::Idle) {
            return;
        }
        self.hovered = local.and_then(|pos| hit::entity_at(&self.scene, &self.camera, pos));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::EntityRef;
    use crate::app::theme::Theme;
    use crate::glyph::GlyphDocument;
    use eframe::egui::{pos2, vec2};

    fn model() -> ViewModel {
        let document: GlyphDocument = serde_json::from_str(
            r#"{
                "project": { "name": "demo" },
                "nodes": [
                    { "id": "a", "name": "a.rs", "type": "file", "metrics": { "loc": 10 } },
                    { "id": "b", "name": "b.rs", "type": "file", "metrics": { "loc": 10 } }
                ],
                "links": [{ "source": "a", "target": "b", "relation": "imports" }]
            }"#,
        )
        .expect("test document parses");
        let mut model = ViewModel::new(document, Theme::dark());
        // Deterministic geometry for pointer math.
        model.scene.nodes[1].pos = vec2(100.0, 100.0);
        model.scene.nodes[2].pos = vec2(400.0, 100.0);
        model
    }

    #[test]
    fn click_vs_drag_uses_net_displacement() {
        assert!(is_click(pos2(10.0, 10.0), pos2(12.0, 13.0), CLICK_THRESHOLD));
        assert!(!is_click(pos2(10.0, 10.0), pos2(10.0, 15.0), CLICK_THRESHOLD));
        // Out-and-back: far intermediate travel is irrelevant.
        assert!(is_click(pos2(10.0, 10.0), pos2(11.0, 10.0), CLICK_THRESHOLD));
    }

    #[test]
    fn press_on_node_starts_drag_and_fixes_it() {
        let mut model = model();
        model.pointer_down(pos2(100.0, 100.0));

        assert!(matches!(
            model.pointer,
            PointerState::DraggingNode { index: 1, .. }
        ));
        assert!(model.scene.nodes[1].fixed);
    }

    #[test]
    fn press_on_empty_space_starts_pan() {
        let mut model = model();
        model.pointer_down(pos2(700.0, 700.0));
        assert!(matches!(model.pointer, PointerState::Panning { .. }));

        let offset_before = model.camera.offset;
        model.pointer_move(pos2(710.0, 695.0));
        assert_eq!(model.camera.offset, offset_before + vec2(10.0, -5.0));
    }

    #[test]
    fn drag_preserves_grab_offset() {
        let mut model = model();
        // Grab the node 4px right of its center.
        model.pointer_down(pos2(104.0, 100.0));
        model.pointer_move(pos2(204.0, 150.0));
        assert_eq!(model.scene.nodes[1].pos, vec2(200.0, 150.0));
    }

    #[test]
    fn release_clears_fixed_and_velocity() {
        let mut model = model();
        model.pointer_down(pos2(100.0, 100.0));
        model.pointer_move(pos2(160.0, 100.0));
        model.scene.nodes[1].vel = vec2(4.0, 4.0);

        model.pointer_up(pos2(160.0, 100.0));
        assert!(matches!(model.pointer, PointerState::Idle));
        assert!(!model.scene.nodes[1].fixed);
        assert_eq!(model.scene.nodes[1].vel, Vec2::ZERO);
    }

    #[test]
    fn short_press_selects_the_node_under_the_pointer() {
        let mut model = model();
        model.pointer_down(pos2(100.0, 100.0));
        model.pointer_up(pos2(102.0, 101.0));
        assert_eq!(model.selected, Some(1));

        // A later click on empty space clears the selection.
        model.pointer_down(pos2(700.0, 700.0));
        model.pointer_up(pos2(700.0, 700.0));
        assert_eq!(model.selected, None);
    }

    #[test]
    fn long_drag_does_not_select() {
        let mut model = model();
        model.pointer_down(pos2(100.0, 100.0));
        model.pointer_move(pos2(160.0, 100.0));
        model.pointer_up(pos2(160.0, 100.0));
        assert_eq!(model.selected, None);
    }

    #[test]
    fn leave_mid_drag_releases_the_node() {
        let mut model = model();
        model.pointer_down(pos2(100.0, 100.0));
        model.pointer_leave();
        assert!(matches!(model.pointer, PointerState::Idle));
        assert!(!model.scene.nodes[1].fixed);
        assert!(model.press_origin.is_none());
    }

    #[test]
    fn hover_is_skipped_while_interacting() {
        let mut model = model();
        model.update_hover(Some(pos2(100.0, 100.0)));
        assert_eq!(model.hovered, Some(EntityRef::Node(1)));

        model.pointer_down(pos2(100.0, 100.0));
        model.update_hover(Some(pos2(700.0, 700.0)));
        // Stale hover is fine; it must not churn during a drag.
        assert_eq!(model.hovered, Some(EntityRef::Node(1)));
    }
}
