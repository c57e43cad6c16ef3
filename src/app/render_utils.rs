use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke};

use super::camera::Camera;
use super::theme::Theme;

const GRID_STEP: f32 = 56.0;

pub(super) fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let inverse = 1.0 - amount;

    Color32::from_rgba_unmultiplied(
        ((base.r() as f32 * inverse) + (overlay.r() as f32 * amount)) as u8,
        ((base.g() as f32 * inverse) + (overlay.g() as f32 * amount)) as u8,
        ((base.b() as f32 * inverse) + (overlay.b() as f32 * amount)) as u8,
        ((base.a() as f32 * inverse) + (overlay.a() as f32 * amount)) as u8,
    )
}

pub(super) fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

/// Background fill plus a graph-space grid. Only the grid lines inside the
/// camera's visible graph rect are generated, so the work stays bounded by
/// the viewport rather than the world extent.
pub(super) fn draw_background(painter: &Painter, rect: Rect, camera: &Camera, theme: &Theme) {
    painter.rect_filled(rect, 0.0, theme.colors.background);

    let visible = camera.visible_graph_rect(rect.size());
    let stroke = Stroke::new(1.0, theme.colors.grid);

    let mut x = (visible.min.x / GRID_STEP).floor() * GRID_STEP;
    while x <= visible.max.x {
        let sx = rect.min.x + (x * camera.scale + camera.offset.x);
        painter.line_segment(
            [Pos2::new(sx, rect.top()), Pos2::new(sx, rect.bottom())],
            stroke,
        );
        x += GRID_STEP;
    }

    let mut y = (visible.min.y / GRID_STEP).floor() * GRID_STEP;
    while y <= visible.max.y {
        let sy = rect.min.y + (y * camera.scale + camera.offset.y);
        painter.line_segment(
            [Pos2::new(rect.left(), sy), Pos2::new(rect.right(), sy)],
            stroke,
        );
        y += GRID_STEP;
    }
}

pub(super) fn circle_visible(rect: Rect, position: Pos2, radius: f32) -> bool {
    !(position.x + radius < rect.left()
        || position.x - radius > rect.right()
        || position.y + radius < rect.top()
        || position.y - radius > rect.bottom())
}

pub(super) fn edge_visible(rect: Rect, start: Pos2, end: Pos2, padding: f32) -> bool {
    let min_x = start.x.min(end.x) - padding;
    let max_x = start.x.max(end.x) + padding;
    let min_y = start.y.min(end.y) - padding;
    let max_y = start.y.max(end.y) + padding;

    !(max_x < rect.left() || min_x > rect.right() || max_y < rect.top() || min_y > rect.bottom())
}
