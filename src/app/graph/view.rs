use eframe::egui::{self, Align2, FontId, Pos2, Sense, Stroke, Ui};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use super::super::physics::step_simulation;
use super::super::render_utils::{
    blend_color, circle_visible, draw_background, edge_visible, with_alpha,
};
use super::super::{Camera, EntityRef, PointerState, SearchMatchCache, ViewModel};

fn fuzzy_match(matcher: &SkimMatcherV2, text: &str, query: &str) -> bool {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
        .is_some()
}

impl ViewModel {
    fn refresh_search_matches(&mut self) {
        let query = self.search.trim();
        if query.is_empty() {
            self.search_match_cache = None;
            return;
        }
        if self
            .search_match_cache
            .as_ref()
            .is_some_and(|cache| cache.query == query)
        {
            return;
        }

        let matcher = SkimMatcherV2::default();
        let matches = self
            .scene
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| fuzzy_match(&matcher, &node.name, query))
            .map(|(index, _)| index)
            .collect();
        self.search_match_cache = Some(SearchMatchCache {
            query: query.to_owned(),
            matches,
        });
    }

    fn hover_readout(&self) -> Option<String> {
        match self.hovered? {
            EntityRef::Node(index) => {
                let node = &self.scene.nodes[index];
                Some(format!(
                    "{}  |  {}  |  loc {}",
                    node.name, node.kind, node.metrics.loc
                ))
            }
            EntityRef::Link(index) => {
                let link = &self.scene.links[index];
                Some(format!(
                    "{} \u{2192} {}  ({})",
                    self.scene.nodes[link.source].name,
                    self.scene.nodes[link.target].name,
                    link.relation.label()
                ))
            }
        }
    }

    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);
        self.canvas_size = rect.size();

        self.handle_zoom(ui, rect, &response);
        self.handle_pointer(ui, rect, &response);

        // The simulation finishes its tick before any drawing; a frame
        // never shows a half-integrated state.
        let mut physics_moving = false;
        if self.live_simulation {
            physics_moving = step_simulation(&mut self.scene, &self.sim);
        }

        let local = ui
            .input(|input| input.pointer.hover_pos())
            .filter(|pos| rect.contains(*pos))
            .map(|pos| (pos - rect.min).to_pos2());
        self.update_hover(local);
        self.refresh_search_matches();

        draw_background(&painter, rect, &self.camera, &self.theme);

        let frame_delta = ui
            .ctx()
            .input(|input| input.stable_dt)
            .clamp(1.0 / 240.0, 1.0 / 20.0);

        let hovered = self.hovered;
        let selected = self.selected;
        let mut easing_active = false;
        for (index, node) in self.scene.nodes.iter_mut().enumerate() {
            let lit = hovered == Some(EntityRef::Node(index)) || selected == Some(index);
            node.glow.set_target(if lit { 1.0 } else { 0.0 });
            easing_active |= node.glow.advance(frame_delta);
        }

        let to_screen =
            |camera: &Camera, pos| -> Pos2 { rect.min + camera.graph_to_screen(pos).to_vec2() };

        // Links under nodes, always in that order.
        let scale_sqrt = self.camera.scale.sqrt();
        for (index, link) in self.scene.links.iter().enumerate() {
            let start = to_screen(&self.camera, self.scene.nodes[link.source].pos);
            let end = to_screen(&self.camera, self.scene.nodes[link.target].pos);
            if !edge_visible(rect, start, end, 2.5) {
                continue;
            }

            let is_hovered = hovered == Some(EntityRef::Link(index));
            let (width, color) = if is_hovered {
                ((2.4 * scale_sqrt).clamp(1.4, 4.5), self.theme.colors.selection)
            } else {
                (
                    (1.4 * scale_sqrt).clamp(0.6, 3.2),
                    self.theme.edge_color(link.relation),
                )
            };
            painter.line_segment([start, end], Stroke::new(width, color));
        }

        let search_matches = self.search_match_cache.as_ref().map(|cache| &cache.matches);
        let search_active = search_matches.is_some_and(|matches| !matches.is_empty());
        let glow_intensity = self.theme.motion.glow_intensity;

        for (index, node) in self.scene.nodes.iter().enumerate() {
            let position = to_screen(&self.camera, node.pos);
            let radius = node.radius * self.camera.scale;
            if !circle_visible(rect, position, radius) {
                continue;
            }

            let is_selected = selected == Some(index);
            let is_match = search_matches.is_some_and(|matches| matches.contains(&index));

            let mut fill = node.style_color.unwrap_or(self.theme.colors.node_fill);
            if is_match {
                fill = blend_color(fill, self.theme.colors.imports_edge, 0.55);
            } else if search_active {
                fill = with_alpha(fill, 90);
            }
            if is_selected {
                fill = blend_color(fill, self.theme.colors.selection, 0.45);
            }

            let glow = node.glow.value() * glow_intensity;
            if glow > 0.0 {
                painter.circle_stroke(
                    position,
                    radius + 3.0 + glow * 4.0,
                    Stroke::new(
                        1.0 + glow * 1.5,
                        with_alpha(self.theme.colors.glow, (glow * 160.0) as u8),
                    ),
                );
            }

            painter.circle_filled(position, radius, fill);
            painter.circle_stroke(
                position,
                radius,
                Stroke::new(
                    if is_selected { 2.0 } else { 1.2 },
                    if is_selected {
                        self.theme.colors.selection
                    } else {
                        self.theme.colors.node_border
                    },
                ),
            );

            let show_label = self.show_labels
                && (is_selected
                    || is_match
                    || hovered == Some(EntityRef::Node(index))
                    || radius > 14.0
                    || self.camera.scale > 1.35);
            if show_label {
                painter.text(
                    position + egui::vec2(radius + 4.0, 0.0),
                    Align2::LEFT_CENTER,
                    &node.name,
                    FontId::proportional(12.0),
                    self.theme.colors.label,
                );
            }
        }

        if matches!(self.hovered, Some(EntityRef::Node(_))) {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }

        if let Some(readout) = self.hover_readout() {
            painter.text(
                rect.left_top() + egui::vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                readout,
                FontId::proportional(13.0),
                self.theme.colors.label,
            );
        }

        // Repaint only while something is actually moving; once motion,
        // easings, and interaction all stop, so does the frame loop.
        let interacting = !matches!(self.pointer, PointerState::Idle);
        if physics_moving || easing_active || interacting {
            ui.ctx().request_repaint();
        }
    }

    pub(in crate::app) fn center_view(&mut self) {
        let root_pos = self.scene.nodes[self.scene.root_index].pos;
        self.camera.center_on(root_pos, self.canvas_size);
    }
}
