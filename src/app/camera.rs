use eframe::egui::{Pos2, Rect, Vec2, pos2};

pub(in crate::app) const MIN_SCALE: f32 = 0.2;
pub(in crate::app) const MAX_SCALE: f32 = 5.0;

/// Affine viewport transform: uniform scale plus a screen-space offset.
/// Screen points are canvas-local (relative to the widget rect origin).
/// Scale stays inside [MIN_SCALE, MAX_SCALE], so the transform is always
/// invertible.
#[derive(Clone, Copy, Debug)]
pub(in crate::app) struct Camera {
    pub(in crate::app) offset: Vec2,
    pub(in crate::app) scale: f32,
}

impl Camera {
    pub(in crate::app) fn new() -> Self {
        Self {
            offset: Vec2::ZERO,
            scale: 1.0,
        }
    }

    pub(in crate::app) fn screen_to_graph(&self, screen: Pos2) -> Vec2 {
        (screen.to_vec2() - self.offset) / self.scale
    }

    pub(in crate::app) fn graph_to_screen(&self, graph: Vec2) -> Pos2 {
        (graph * self.scale + self.offset).to_pos2()
    }

    /// Screen-space pan; deliberately unaffected by the current scale.
    pub(in crate::app) fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Rescales around `anchor` so the graph point under it stays under it.
    pub(in crate::app) fn zoom_at(&mut self, anchor: Pos2, factor: f32) {
        let new_scale = (self.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
        let ratio = new_scale / self.scale;
        self.offset = anchor.to_vec2() - (anchor.to_vec2() - self.offset) * ratio;
        self.scale = new_scale;
    }

    /// Graph-space rectangle currently visible in a canvas of `size`.
    pub(in crate::app) fn visible_graph_rect(&self, size: Vec2) -> Rect {
        let min = self.screen_to_graph(pos2(0.0, 0.0));
        let max = self.screen_to_graph(size.to_pos2());
        Rect::from_min_max(min.to_pos2(), max.to_pos2())
    }

    /// Centers the viewport on a graph point at the current scale.
    pub(in crate::app) fn center_on(&mut self, graph: Vec2, canvas_size: Vec2) {
        self.offset = canvas_size * 0.5 - graph * self.scale;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::vec2;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn round_trips_between_spaces() {
        let camera = Camera {
            offset: vec2(40.0, -12.5),
            scale: 1.7,
        };
        let graph = vec2(310.0, 95.0);
        assert!(close(camera.screen_to_graph(camera.graph_to_screen(graph)), graph));
    }

    #[test]
    fn zoom_keeps_the_cursor_point_anchored() {
        let mut camera = Camera {
            offset: vec2(130.0, 70.0),
            scale: 1.0,
        };
        let cursor = pos2(512.0, 300.0);

        for factor in [1.1, 1.1, 0.8, 1.25, 0.5] {
            let before = camera.screen_to_graph(cursor);
            camera.zoom_at(cursor, factor);
            let after = camera.screen_to_graph(cursor);
            assert!(close(before, after), "anchor drifted: {before:?} -> {after:?}");
        }
    }

    #[test]
    fn zoom_anchor_holds_even_when_scale_clamps() {
        let mut camera = Camera::new();
        let cursor = pos2(200.0, 150.0);

        let before = camera.screen_to_graph(cursor);
        camera.zoom_at(cursor, 100.0);
        assert_eq!(camera.scale, MAX_SCALE);
        assert!(close(before, camera.screen_to_graph(cursor)));
    }

    #[test]
    fn scale_stays_clamped_over_any_sequence() {
        let mut camera = Camera::new();
        for _ in 0..64 {
            camera.zoom_at(pos2(10.0, 10.0), 1.3);
        }
        assert_eq!(camera.scale, MAX_SCALE);

        for _ in 0..128 {
            camera.zoom_at(pos2(900.0, 40.0), 0.7);
        }
        assert_eq!(camera.scale, MIN_SCALE);
    }

    #[test]
    fn pan_is_screen_space() {
        let mut camera = Camera {
            offset: Vec2::ZERO,
            scale: 4.0,
        };
        camera.pan(vec2(10.0, 0.0));
        // A 10px pan shifts graph coordinates by 10/scale.
        assert!(close(camera.screen_to_graph(pos2(0.0, 0.0)), vec2(-2.5, 0.0)));
    }

    #[test]
    fn visible_rect_is_the_inverse_of_the_screen_bounds() {
        let mut camera = Camera::new();
        camera.zoom_at(pos2(0.0, 0.0), 2.0);
        let rect = camera.visible_graph_rect(vec2(800.0, 600.0));
        assert!(close(rect.min.to_vec2(), vec2(0.0, 0.0)));
        assert!(close(rect.max.to_vec2(), vec2(400.0, 300.0)));
    }
}
