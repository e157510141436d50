/*
 * Debug Information Module
 *
 * This module defines the DebugInfo struct that collects the per-frame
 * figures shown in the control panel:
 * - FPS and frame time
 * - Ticks run during the last frame and since the last reset
 * - What the steering rules did on the last tick
 */

use std::time::Duration;

use crate::physics::TickReport;

#[derive(Debug, Clone, Default)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub ticks_per_frame: usize,
    pub total_ticks: u64,
    pub last_report: TickReport,
    pub light_on: bool,
}

impl DebugInfo {
    // Refresh the simulation-side figures after the frame's ticks ran
    pub fn record_ticks(&mut self, ticks_this_frame: usize, total_ticks: u64, last_report: TickReport) {
        self.ticks_per_frame = ticks_this_frame;
        self.total_ticks = total_ticks;
        self.last_report = last_report;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_ticks_overwrites_previous_frame() {
        let mut info = DebugInfo::default();
        let report = TickReport {
            committed: [0, 3, 1, 0, 2],
            degenerate: 1,
        };
        info.record_ticks(2, 40, report);
        info.record_ticks(1, 41, TickReport::default());
        assert_eq!(info.ticks_per_frame, 1);
        assert_eq!(info.total_ticks, 41);
        assert_eq!(info.last_report, TickReport::default());
    }
}
