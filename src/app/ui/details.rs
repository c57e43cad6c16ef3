use eframe::egui::{self, Ui};

use crate::glyph::Relation;

use super::super::ViewModel;

struct NeighborRow {
    node: usize,
    relation: Relation,
    outgoing: bool,
}

impl ViewModel {
    fn neighbor_rows(&self, index: usize) -> Vec<NeighborRow> {
        let mut rows = Vec::new();
        for link in &self.scene.links {
            if link.source == index && link.target != index {
                rows.push(NeighborRow {
                    node: link.target,
                    relation: link.relation,
                    outgoing: true,
                });
            } else if link.target == index && link.source != index {
                rows.push(NeighborRow {
                    node: link.source,
                    relation: link.relation,
                    outgoing: false,
                });
            }
        }
        rows
    }

    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Details");
        ui.separator();

        let Some(index) = self.selected else {
            ui.add_space(8.0);
            ui.label("Click a node to inspect it.");
            ui.add_space(4.0);
            ui.label("Drag nodes to pin them while the simulation settles; drag empty space to pan; scroll to zoom at the cursor.");
            return;
        };

        let (name, kind, id, metrics) = {
            let node = &self.scene.nodes[index];
            (
                node.name.clone(),
                node.kind.clone(),
                node.id.clone(),
                node.metrics,
            )
        };

        ui.strong(&name);
        ui.label(format!("{kind}  ({id})"));
        ui.add_space(6.0);

        egui::Grid::new("node_metrics").num_columns(2).show(ui, |ui| {
            ui.label("lines of code");
            ui.label(metrics.loc.to_string());
            ui.end_row();
            ui.label("complexity");
            ui.label(format!("{:.2}", metrics.complexity));
            ui.end_row();
            ui.label("imports");
            ui.label(metrics.imports.to_string());
            ui.end_row();
            ui.label("functions");
            ui.label(metrics.functions.to_string());
            ui.end_row();
            ui.label("classes");
            ui.label(metrics.classes.to_string());
            ui.end_row();
            ui.label("calls");
            ui.label(metrics.calls.to_string());
            ui.end_row();
        });

        ui.add_space(8.0);
        ui.separator();
        ui.label("Connections");

        let rows = self.neighbor_rows(index);
        if rows.is_empty() {
            ui.label("(none)");
            return;
        }

        let mut jump_to = None;
        egui::ScrollArea::vertical().show(ui, |ui| {
            for row in &rows {
                let neighbor = &self.scene.nodes[row.node];
                let arrow = if row.outgoing { "\u{2192}" } else { "\u{2190}" };
                let text = format!("{arrow} {}  [{}]", neighbor.name, row.relation.label());
                if ui.link(text).clicked() {
                    jump_to = Some(row.node);
                }
            }
        });

        if let Some(target) = jump_to {
            self.set_selected(Some(target));
        }
    }
}
