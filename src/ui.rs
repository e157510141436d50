/*
 * UI Module
 *
 * This module builds the egui control panel with nannou_egui: pause, the
 * movement policy, the cohesion switch, a reset button and live counters.
 */

use nannou_egui::{egui, Egui};

use crate::debug::DebugInfo;
use crate::physics::MovementPolicy;
use crate::rules::Rule;

// Runtime switches the panel edits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub paused: bool,
    pub policy: MovementPolicy,
    pub commit_cohesion: bool,
}

impl Controls {
    pub fn new(policy: MovementPolicy, commit_cohesion: bool) -> Self {
        Self {
            paused: false,
            policy,
            commit_cohesion,
        }
    }
}

// Draw the panel and return whether a swarm reset was requested
pub fn update_ui(egui: &mut Egui, controls: &mut Controls, debug_info: &DebugInfo, swarm_size: usize) -> bool {
    let mut should_reset = false;

    let ctx = egui.begin_frame();

    egui::Window::new("Simulation Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.collapsing("Swarm", |ui| {
                ui.label(format!("Cockroaches: {}", swarm_size));
                if ui.button("Reset Swarm (R)").clicked() {
                    should_reset = true;
                }
                ui.checkbox(&mut controls.paused, "Pause Simulation");
            });

            ui.collapsing("Behaviour", |ui| {
                ui.radio_value(&mut controls.policy, MovementPolicy::RuleBased, MovementPolicy::RuleBased.label());
                ui.radio_value(&mut controls.policy, MovementPolicy::RandomWalk, MovementPolicy::RandomWalk.label());
                ui.checkbox(&mut controls.commit_cohesion, "Commit anti-isolation heading");
                ui.label("Hold the left button to switch the light on");
            });

            ui.collapsing("Last Tick", |ui| {
                for rule in Rule::ORDER {
                    ui.label(format!("{}: {}", rule, debug_info.last_report.committed_by(rule)));
                }
                ui.label(format!("Degenerate fallbacks: {}", debug_info.last_report.degenerate));
            });

            ui.separator();

            ui.label(format!("FPS: {:.1}", debug_info.fps));
            ui.label(format!("Frame time: {:.2} ms", debug_info.frame_time.as_secs_f64() * 1000.0));
            ui.label(format!("Ticks this frame: {}", debug_info.ticks_per_frame));
            ui.label(format!("Ticks since reset: {}", debug_info.total_ticks));
            ui.label(format!("Light: {}", if debug_info.light_on { "on" } else { "off" }));
        });

    should_reset
}
