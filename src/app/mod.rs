use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Color32, Context, Pos2, Vec2};

use crate::glyph::{GlyphDocument, NodeMetrics, Relation, load_document};

mod camera;
mod graph;
mod motion;
mod physics;
mod render_utils;
pub mod theme;
mod ui;

use camera::Camera;
use motion::Eased;
use theme::Theme;

pub struct GlyphApp {
    graph_path: String,
    initial_theme: Theme,
    state: AppState,
    reload_rx: Option<Receiver<Result<GlyphDocument, String>>>,
}

enum AppState {
    Loading {
        rx: Receiver<Result<GlyphDocument, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    project_name: String,
    scene: Scene,
    camera: Camera,
    pointer: PointerState,
    press_origin: Option<Pos2>,
    hovered: Option<EntityRef>,
    selected: Option<usize>,
    search: String,
    search_match_cache: Option<SearchMatchCache>,
    live_simulation: bool,
    sim: SimulationConfig,
    click_threshold: f32,
    theme: Theme,
    show_labels: bool,
    canvas_size: Vec2,
    fps_current: f32,
    fps_samples: VecDeque<f32>,
}

struct SearchMatchCache {
    query: String,
    matches: HashSet<usize>,
}

/// Node arena plus index-based links. Nodes are created once per session
/// and never removed; links always reference live indices.
struct Scene {
    nodes: Vec<GraphNode>,
    links: Vec<GraphLink>,
    index_by_id: HashMap<String, usize>,
    root_index: usize,
    dropped_links: usize,
    bounds: Vec2,
}

struct GraphNode {
    id: String,
    name: String,
    kind: String,
    pos: Vec2,
    vel: Vec2,
    radius: f32,
    fixed: bool,
    metrics: NodeMetrics,
    style_size: f32,
    style_color: Option<Color32>,
    glow: Eased,
}

struct GraphLink {
    source: usize,
    target: usize,
    relation: Relation,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EntityRef {
    Node(usize),
    Link(usize),
}

/// Pointer interaction modes. At most one is active; a node drag and a
/// canvas pan are mutually exclusive by construction.
enum PointerState {
    Idle,
    DraggingNode { index: usize, grab_offset: Vec2 },
    Panning { last: Pos2 },
}

#[derive(Clone, Copy)]
struct SimulationConfig {
    desired_length: f32,
    spring_k: f32,
    padding: f32,
    damping: f32,
    max_speed: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            desired_length: 150.0,
            spring_k: 0.01,
            padding: 20.0,
            damping: 0.9,
            max_speed: 60.0,
        }
    }
}

impl GlyphApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, graph_path: String, theme: Theme) -> Self {
        let state = Self::start_load(graph_path.clone());
        Self {
            graph_path,
            initial_theme: theme,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(graph_path: String) -> Receiver<Result<GlyphDocument, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_document(&graph_path).map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(graph_path: String) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(graph_path),
        }
    }
}

impl eframe::App for GlyphApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                if let Ok(result) = rx.try_recv() {
                    transition = Some(match result {
                        Ok(document) => AppState::Ready(Box::new(ViewModel::new(
                            document,
                            self.initial_theme.clone(),
                        ))),
                        Err(error) => AppState::Error(error),
                    });
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading code graph...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load code graph");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(self.graph_path.clone()));
                    }
                });
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                model.show(ctx, &self.graph_path, &mut reload_requested, is_reloading);

                if reload_requested && self.reload_rx.is_none() {
                    self.reload_rx = Some(Self::spawn_load(self.graph_path.clone()));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        // A reload merges fresh metrics onto the warm
                        // layout instead of rebuilding it.
                        Ok(Ok(document)) => model.merge_document(&document),
                        Ok(Err(error)) => transition = Some(AppState::Error(error)),
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                        }
                        Err(TryRecvError::Disconnected) => {
                            transition =
                                Some(AppState::Error("Background load worker disconnected".to_owned()));
                        }
                    }
                }
            }
        }

        if let Some(next_state) = transition {
            self.reload_rx = None;
            self.state = next_state;
        }
    }
}
