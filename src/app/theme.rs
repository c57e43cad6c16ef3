use eframe::egui::Color32;

use crate::glyph::Relation;

/// Explicit palette + motion configuration. Passed in at construction and
/// swapped through `ViewModel::set_theme`; nothing global.
#[derive(Clone, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub colors: ThemeColors,
    pub motion: MotionSettings,
}

#[derive(Clone, Debug)]
pub struct ThemeColors {
    pub background: Color32,
    pub grid: Color32,
    pub node_fill: Color32,
    pub node_border: Color32,
    pub label: Color32,
    pub glow: Color32,
    pub selection: Color32,
    pub contains_edge: Color32,
    pub imports_edge: Color32,
    pub calls_edge: Color32,
    pub other_edge: Color32,
}

#[derive(Clone, Copy, Debug)]
pub struct MotionSettings {
    pub glow_intensity: f32,
    /// Seconds for a hover/selection glow transition to complete.
    pub glow_duration: f32,
    pub size_scale: f32,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            colors: ThemeColors {
                background: Color32::from_rgb(19, 23, 29),
                grid: Color32::from_rgba_unmultiplied(60, 70, 80, 70),
                node_fill: Color32::from_rgb(59, 130, 246),
                node_border: Color32::from_rgba_unmultiplied(240, 240, 240, 200),
                label: Color32::from_gray(238),
                glow: Color32::from_rgb(255, 164, 101),
                selection: Color32::from_rgb(245, 206, 93),
                contains_edge: Color32::from_rgba_unmultiplied(119, 119, 119, 200),
                imports_edge: Color32::from_rgba_unmultiplied(106, 198, 255, 190),
                calls_edge: Color32::from_rgba_unmultiplied(186, 140, 255, 190),
                other_edge: Color32::from_rgba_unmultiplied(100, 100, 100, 170),
            },
            motion: MotionSettings {
                glow_intensity: 1.0,
                glow_duration: 0.35,
                size_scale: 1.0,
            },
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            colors: ThemeColors {
                background: Color32::from_rgb(244, 246, 249),
                grid: Color32::from_rgba_unmultiplied(170, 180, 190, 90),
                node_fill: Color32::from_rgb(37, 99, 235),
                node_border: Color32::from_rgba_unmultiplied(30, 30, 30, 200),
                label: Color32::from_gray(32),
                glow: Color32::from_rgb(234, 120, 60),
                selection: Color32::from_rgb(202, 152, 16),
                contains_edge: Color32::from_rgba_unmultiplied(110, 110, 110, 210),
                imports_edge: Color32::from_rgba_unmultiplied(40, 130, 200, 200),
                calls_edge: Color32::from_rgba_unmultiplied(130, 80, 210, 200),
                other_edge: Color32::from_rgba_unmultiplied(140, 140, 140, 180),
            },
            motion: MotionSettings {
                glow_intensity: 0.8,
                glow_duration: 0.35,
                size_scale: 1.0,
            },
        }
    }

    pub fn by_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }

    pub fn edge_color(&self, relation: Relation) -> Color32 {
        match relation {
            Relation::Contains => self.colors.contains_edge,
            Relation::Imports => self.colors.imports_edge,
            Relation::Calls => self.colors.calls_edge,
            Relation::Other => self.colors.other_edge,
        }
    }
}
