// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2024 Jonathan Lee
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License version 3
// as published by the Free Software Foundation.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see https://www.gnu.org/licenses/.

use serde::{Deserialize, Serialize};

/// Lifecycle of one rendered element. `render` always replaces the whole
/// element population, so the only transitions are Entering to Steady over
/// the enter duration, and anything to Replaced at the next render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementPhase {
    Entering,
    Steady,
    Replaced,
}

/// Symmetric cubic ease, the curve every animated property follows.
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// One animated value under the host clock. Retargeting restarts the curve
/// from the currently interpolated value, so an interrupted animation never
/// snaps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    from: f32,
    to: f32,
    started_ms: f64,
    duration_ms: f64,
}
impl Transition {
    pub fn new(from: f32, to: f32, started_ms: f64, duration_ms: f64) -> Self {
        Self {
            from,
            to,
            started_ms,
            duration_ms,
        }
    }
    pub fn settled(value: f32) -> Self {
        Self {
            from: value,
            to: value,
            started_ms: 0.0,
            duration_ms: 0.0,
        }
    }
    /// Raw progress in [0, 1]; clocks before the start count as zero.
    pub fn progress(&self, now_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((now_ms - self.started_ms) / self.duration_ms).clamp(0.0, 1.0)
    }
    pub fn value_at(&self, now_ms: f64) -> f32 {
        let eased = ease_cubic_in_out(self.progress(now_ms));
        self.from + (self.to - self.from) * eased as f32
    }
    pub fn is_complete(&self, now_ms: f64) -> bool {
        self.progress(now_ms) >= 1.0
    }
    pub fn target(&self) -> f32 {
        self.to
    }
    pub fn retarget(&mut self, now_ms: f64, to: f32, duration_ms: f64) {
        self.from = self.value_at(now_ms);
        self.to = to;
        self.started_ms = now_ms;
        self.duration_ms = duration_ms;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ease_clamps_and_hits_endpoints() {
        assert_eq!(ease_cubic_in_out(-1.0), 0.0);
        assert_eq!(ease_cubic_in_out(0.0), 0.0);
        assert_eq!(ease_cubic_in_out(0.5), 0.5);
        assert_eq!(ease_cubic_in_out(1.0), 1.0);
        assert_eq!(ease_cubic_in_out(2.0), 1.0);
    }

    #[test]
    fn transition_completes_exactly_at_duration() {
        let transition = Transition::new(0.0, 10.0, 100.0, 800.0);
        assert_eq!(transition.value_at(100.0), 0.0);
        assert_eq!(transition.value_at(500.0), 5.0);
        assert_eq!(transition.value_at(900.0), 10.0);
        assert!(!transition.is_complete(899.0));
        assert!(transition.is_complete(900.0));
    }

    #[test]
    fn retarget_resumes_from_current_value() {
        let mut transition = Transition::new(0.0, 1.0, 0.0, 200.0);
        let midway = transition.value_at(100.0);
        assert!(midway > 0.0 && midway < 1.0);
        transition.retarget(100.0, 0.0, 200.0);
        assert_eq!(transition.value_at(100.0), midway);
        assert_eq!(transition.value_at(300.0), 0.0);
        assert_eq!(transition.target(), 0.0);
    }

    #[test]
    fn clock_before_start_reads_as_initial_value() {
        let transition = Transition::new(4.0, 8.0, 1_000.0, 500.0);
        assert_eq!(transition.value_at(0.0), 4.0);
    }

    #[test]
    fn settled_transition_is_complete_at_any_clock() {
        let settled = Transition::settled(5.0);
        assert_eq!(settled.value_at(0.0), 5.0);
        assert_eq!(settled.value_at(1_000_000.0), 5.0);
        assert!(settled.is_complete(0.0));
    }
}
