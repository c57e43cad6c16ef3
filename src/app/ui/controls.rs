use eframe::egui::{self, Ui};

use super::super::theme::Theme;
use super::super::{SimulationConfig, ViewModel};

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Graph Controls");
        ui.separator();
        ui.add_space(4.0);

        ui.label("Search")
            .on_hover_text("Fuzzy-highlight nodes by name without moving the layout.");
        ui.text_edit_singleline(&mut self.search);

        ui.separator();

        ui.horizontal(|ui| {
            ui.label("Theme:");
            let mut name = self.theme.name;
            if ui.selectable_value(&mut name, "dark", "Dark").clicked()
                | ui.selectable_value(&mut name, "light", "Light").clicked()
            {
                if name != self.theme.name {
                    self.set_theme(Theme::by_name(name));
                }
            }
        });

        ui.checkbox(&mut self.live_simulation, "Live simulation")
            .on_hover_text("Pause to freeze the layout; dragging still works.");
        ui.checkbox(&mut self.show_labels, "Node labels");

        ui.separator();
        ui.label("Simulation");

        ui.add(
            egui::Slider::new(&mut self.sim.desired_length, 50.0..=400.0)
                .text("link length"),
        );
        ui.add(
            egui::Slider::new(&mut self.sim.spring_k, 0.001..=0.05)
                .logarithmic(true)
                .text("spring"),
        );
        ui.add(egui::Slider::new(&mut self.sim.padding, 0.0..=60.0).text("node padding"));
        ui.add(egui::Slider::new(&mut self.sim.damping, 0.5..=0.98).text("damping"));
        ui.add(egui::Slider::new(&mut self.sim.max_speed, 10.0..=200.0).text("max speed"));

        ui.separator();
        ui.label("Interaction");
        ui.add(
            egui::Slider::new(&mut self.click_threshold, 1.0..=12.0)
                .text("click threshold (px)"),
        );

        ui.separator();
        ui.horizontal_wrapped(|ui| {
            if ui
                .button("Reset layout")
                .on_hover_text("Re-scatter all nodes to their spawn positions.")
                .clicked()
            {
                self.scene.reset_layout();
            }
            if ui.button("Center view").clicked() {
                self.center_view();
            }
            if ui.button("Reset tuning").clicked() {
                self.sim = SimulationConfig::default();
            }
            if ui
                .add_enabled(self.selected.is_some(), egui::Button::new("Clear selection"))
                .clicked()
            {
                self.set_selected(None);
            }
        });
    }
}
