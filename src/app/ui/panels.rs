use std::collections::VecDeque;

use eframe::egui::{self, Align, Context, Layout, vec2};

use crate::glyph::GlyphDocument;
use crate::util::format_count;

use super::super::graph::CLICK_THRESHOLD;
use super::super::theme::Theme;
use super::super::{Camera, PointerState, Scene, SimulationConfig, ViewModel};

impl ViewModel {
    pub(in crate::app) fn new(document: GlyphDocument, theme: Theme) -> Self {
        let scene = Scene::build(&document, &theme.motion);

        Self {
            project_name: document.project.name.clone(),
            scene,
            camera: Camera::new(),
            pointer: PointerState::Idle,
            press_origin: None,
            hovered: None,
            selected: None,
            search: String::new(),
            search_match_cache: None,
            live_simulation: true,
            sim: SimulationConfig::default(),
            click_threshold: CLICK_THRESHOLD,
            theme,
            show_labels: true,
            canvas_size: vec2(1200.0, 800.0),
            fps_current: 0.0,
            fps_samples: VecDeque::new(),
        }
    }

    pub(in crate::app) fn merge_document(&mut self, document: &GlyphDocument) {
        self.project_name = document.project.name.clone();
        self.scene.merge_document(document, &self.theme.motion);
        self.search_match_cache = None;
    }

    pub(in crate::app) fn set_selected(&mut self, selected: Option<usize>) {
        self.selected = selected;
    }

    pub(in crate::app) fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.scene.apply_size_scale(&self.theme.motion);
    }

    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        graph_path: &str,
        reload_requested: &mut bool,
        is_loading: bool,
    ) {
        self.update_fps_counter(ctx);

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("codeglyph");
                    ui.separator();
                    ui.label(format!("project: {}", self.project_name));
                    ui.label(format!("source: {graph_path}"));
                    ui.label(format!(
                        "nodes: {}",
                        format_count(self.scene.node_count() as u64)
                    ));
                    ui.label(format!(
                        "links: {}",
                        format_count(self.scene.link_count() as u64)
                    ));
                    if self.scene.dropped_links > 0 {
                        ui.label(format!("dropped links: {}", self.scene.dropped_links))
                            .on_hover_text(
                                "Link records whose source or target id did not resolve.",
                            );
                    }
                    let reload_button =
                        ui.add_enabled(!is_loading, egui::Button::new("Reload metrics"));
                    if reload_button.clicked() {
                        *reload_requested = true;
                    }
                    if is_loading {
                        ui.spinner();
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if let Some(fps_text) = self.fps_display_text() {
                            ui.label(fps_text);
                        }
                        ui.label(format!("zoom: {:.2}x", self.camera.scale));
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default().show(ctx, |ui| self.draw_graph(ui));
    }
}
