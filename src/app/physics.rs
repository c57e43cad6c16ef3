use eframe::egui::Vec2;

use super::{Scene, SimulationConfig};

const SLEEP_SPEED: f32 = 0.02;

/// One simulation tick: spring forces along links into velocities, pairwise
/// positional separation, then damped explicit-Euler integration. Returns
/// whether anything is still moving so the caller can gate repaints.
pub(in crate::app) fn step_simulation(scene: &mut Scene, config: &SimulationConfig) -> bool {
    apply_spring_forces(scene, config);
    separate_overlaps(scene, config);
    integrate(scene, config)
}

/// Hooke spring on every link toward `desired_length`, applied
/// symmetrically to both endpoint velocities. Forces accumulate on fixed
/// nodes too; integration is what ignores them, so neighbors keep feeling
/// an anchored node's pull.
fn apply_spring_forces(scene: &mut Scene, config: &SimulationConfig) {
    for link in &scene.links {
        let (source, target) = (link.source, link.target);
        if source == target {
            continue;
        }

        let delta = scene.nodes[target].pos - scene.nodes[source].pos;
        let distance = delta.length();
        if distance <= f32::EPSILON {
            // No defined direction; leave the pair for a later tick.
            continue;
        }

        let force = (distance - config.desired_length) * config.spring_k;
        let push = (delta / distance) * force;

        scene.nodes[source].vel += push;
        scene.nodes[target].vel -= push;
    }
}

/// Positional constraint solve, not a force: any pair closer than
/// `r1 + r2 + padding` is displaced apart by half the overlap each. O(n²)
/// over all pairs, accepted at this tool's graph sizes. A fixed endpoint
/// never moves; its half of the separation transfers to the free one.
fn separate_overlaps(scene: &mut Scene, config: &SimulationConfig) {
    let node_count = scene.nodes.len();

    for i in 0..node_count {
        for j in (i + 1)..node_count {
            let delta = scene.nodes[j].pos - scene.nodes[i].pos;
            let distance_sq = delta.length_sq();
            if distance_sq == 0.0 {
                // Coincident nodes; integration will perturb them apart.
                continue;
            }

            let min_distance =
                scene.nodes[i].radius + scene.nodes[j].radius + config.padding;
            if distance_sq >= min_distance * min_distance {
                continue;
            }

            let distance = distance_sq.sqrt();
            let half_overlap = (min_distance - distance) * 0.5;
            let offset = (delta / distance) * half_overlap;

            match (scene.nodes[i].fixed, scene.nodes[j].fixed) {
                (false, false) => {
                    scene.nodes[i].pos -= offset;
                    scene.nodes[j].pos += offset;
                }
                (true, false) => scene.nodes[j].pos += offset * 2.0,
                (false, true) => scene.nodes[i].pos -= offset * 2.0,
                (true, true) => {}
            }
        }
    }
}

fn integrate(scene: &mut Scene, config: &SimulationConfig) -> bool {
    let mut any_motion = false;

    for node in &mut scene.nodes {
        if node.fixed {
            continue;
        }

        node.vel *= config.damping;

        let speed = node.vel.length();
        if speed > config.max_speed {
            node.vel *= config.max_speed / speed;
        }
        if speed < SLEEP_SPEED {
            node.vel = Vec2::ZERO;
            continue;
        }

        node.pos += node.vel;
        any_motion = true;
    }

    any_motion
}
