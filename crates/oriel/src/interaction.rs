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

use crate::aggregate::{CountryCountEntry, ScatterPoint, SectorIntensityEntry, TopicCountEntry};
use crate::colour::FALLBACK_CATEGORY;
use crate::config::style;
use crate::scene::ElementId;
use crate::transition::Transition;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

const TITLE_TRUNCATION: usize = 50;

/// Payload attached to a hoverable element; the tooltip content is a pure
/// function of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChartDatum {
    Sector(SectorIntensityEntry),
    Topic { entry: TopicCountEntry, share: f64 },
    Scatter(ScatterPoint),
    Country(CountryCountEntry),
}
impl ChartDatum {
    pub fn tooltip(&self) -> TooltipContent {
        match self {
            ChartDatum::Sector(entry) => TooltipContent {
                title: entry.sector.clone(),
                lines: vec![format!("Avg Intensity: {:.2}", entry.avg_intensity)],
            },
            ChartDatum::Topic { entry, share } => TooltipContent {
                title: entry.topic.clone(),
                lines: vec![
                    format!("Count: {}", entry.count),
                    format!("Percentage: {:.1}%", share * 100.0),
                ],
            },
            ChartDatum::Scatter(point) => TooltipContent {
                title: match &point.title {
                    Some(title) => format!(
                        "{}...",
                        title.chars().take(TITLE_TRUNCATION).collect::<String>()
                    ),
                    None => "No Title".to_string(),
                },
                lines: vec![
                    format!("Relevance: {}", point.relevance),
                    format!("Likelihood: {}", point.likelihood),
                    format!("Intensity: {}", point.intensity),
                    format!(
                        "Sector: {}",
                        point.sector.as_deref().unwrap_or(FALLBACK_CATEGORY)
                    ),
                ],
            },
            ChartDatum::Country(entry) => TooltipContent {
                title: entry.country.clone(),
                lines: vec![format!("Insights: {}", entry.count)],
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TooltipContent {
    pub title: String,
    pub lines: Vec<String>,
}

/// The floating detail panel, one per chart instance. The owning view
/// creates it on mount and drops it on teardown; the chart id keeps two
/// instances of the same chart kind from ever sharing state.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipOverlay {
    chart: Uuid,
    visible: bool,
    content: Option<TooltipContent>,
    x: f32,
    y: f32,
}
impl TooltipOverlay {
    fn new(chart: Uuid) -> Self {
        Self {
            chart,
            visible: false,
            content: None,
            x: 0.0,
            y: 0.0,
        }
    }
    pub fn chart(&self) -> Uuid {
        self.chart
    }
    pub fn is_visible(&self) -> bool {
        self.visible
    }
    pub fn content(&self) -> Option<&TooltipContent> {
        self.content.as_ref()
    }
    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }
    fn show(&mut self, content: TooltipContent, x: f32, y: f32) {
        self.visible = true;
        self.content = Some(content);
        self.x = x;
        self.y = y;
    }
    fn follow(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }
    fn hide(&mut self) {
        self.visible = false;
    }
}

#[derive(Debug, Clone, Default)]
struct HoverState {
    current: Option<ElementId>,
    animations: HashMap<ElementId, Transition>,
}

/// Pointer-to-tooltip state machine for one chart instance. Elements fade
/// their hover transform in and out over the hover duration; an interrupted
/// fade resumes from wherever it was.
#[derive(Debug, Clone)]
pub struct InteractionController {
    overlay: TooltipOverlay,
    hover: HoverState,
    hover_duration_ms: f64,
}
impl InteractionController {
    pub fn mount(chart: Uuid, hover_duration_ms: f64) -> Self {
        Self {
            overlay: TooltipOverlay::new(chart),
            hover: HoverState::default(),
            hover_duration_ms,
        }
    }
    pub fn on_enter(
        &mut self,
        element: ElementId,
        datum: &ChartDatum,
        pointer: (f32, f32),
        now_ms: f64,
    ) {
        if let Some(previous) = self.hover.current {
            if previous != element {
                self.revert(previous, now_ms);
            }
        }
        self.hover.current = Some(element);
        let duration = self.hover_duration_ms;
        self.hover
            .animations
            .entry(element)
            .and_modify(|animation| animation.retarget(now_ms, 1.0, duration))
            .or_insert_with(|| Transition::new(0.0, 1.0, now_ms, duration));
        self.overlay.show(
            datum.tooltip(),
            pointer.0 + style::TOOLTIP_OFFSET_X,
            pointer.1 + style::TOOLTIP_OFFSET_Y,
        );
        debug!(element = element.0, chart = %self.overlay.chart, "Hover enter");
    }
    pub fn on_move(&mut self, pointer: (f32, f32)) {
        if self.overlay.visible {
            self.overlay.follow(
                pointer.0 + style::TOOLTIP_OFFSET_X,
                pointer.1 + style::TOOLTIP_OFFSET_Y,
            );
        }
    }
    pub fn on_leave(&mut self, element: ElementId, now_ms: f64) {
        self.revert(element, now_ms);
        if self.hover.current == Some(element) {
            self.hover.current = None;
            self.overlay.hide();
        }
    }
    /// How far the element's hover transform has progressed, in [0, 1].
    pub fn hover_progress(&self, element: ElementId, now_ms: f64) -> f32 {
        self.hover
            .animations
            .get(&element)
            .map_or(0.0, |animation| animation.value_at(now_ms))
    }
    pub fn hovered(&self) -> Option<ElementId> {
        self.hover.current
    }
    pub fn overlay(&self) -> &TooltipOverlay {
        &self.overlay
    }
    /// Drops animations that have fully reverted.
    pub fn prune(&mut self, now_ms: f64) {
        self.hover
            .animations
            .retain(|_, animation| animation.target() != 0.0 || !animation.is_complete(now_ms));
    }
    pub fn has_active_animations(&self, now_ms: f64) -> bool {
        self.hover
            .animations
            .values()
            .any(|animation| !animation.is_complete(now_ms))
    }
    /// Clears hover state wholesale; used when render replaces the elements
    /// the state refers to.
    pub fn reset(&mut self) {
        self.hover.current = None;
        self.hover.animations.clear();
        self.overlay.hide();
    }
    fn revert(&mut self, element: ElementId, now_ms: f64) {
        let duration = self.hover_duration_ms;
        if let Some(animation) = self.hover.animations.get_mut(&element) {
            animation.retarget(now_ms, 0.0, duration);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sector_datum() -> ChartDatum {
        ChartDatum::Sector(SectorIntensityEntry {
            sector: "Energy".to_string(),
            avg_intensity: 15.0,
        })
    }

    #[test]
    fn enter_shows_tooltip_at_offset_pointer() {
        let mut controller = InteractionController::mount(Uuid::new_v4(), 200.0);
        controller.on_enter(ElementId(0), &sector_datum(), (100.0, 80.0), 0.0);
        assert!(controller.overlay().is_visible());
        assert_eq!(controller.overlay().position(), (110.0, 70.0));
        let content = controller.overlay().content().unwrap();
        assert_eq!(content.title, "Energy");
        assert_eq!(content.lines, vec!["Avg Intensity: 15.00".to_string()]);
    }

    #[test]
    fn leave_reverts_over_hover_duration() {
        let mut controller = InteractionController::mount(Uuid::new_v4(), 200.0);
        controller.on_enter(ElementId(3), &sector_datum(), (0.0, 0.0), 0.0);
        assert_eq!(controller.hover_progress(ElementId(3), 200.0), 1.0);
        controller.on_leave(ElementId(3), 200.0);
        assert!(!controller.overlay().is_visible());
        let midway = controller.hover_progress(ElementId(3), 300.0);
        assert!(midway > 0.0 && midway < 1.0);
        assert_eq!(controller.hover_progress(ElementId(3), 400.0), 0.0);
    }

    #[test]
    fn interrupted_revert_resumes_from_current_progress() {
        let mut controller = InteractionController::mount(Uuid::new_v4(), 200.0);
        controller.on_enter(ElementId(1), &sector_datum(), (0.0, 0.0), 0.0);
        controller.on_leave(ElementId(1), 200.0);
        let partway = controller.hover_progress(ElementId(1), 300.0);
        controller.on_enter(ElementId(1), &sector_datum(), (5.0, 5.0), 300.0);
        assert_eq!(controller.hover_progress(ElementId(1), 300.0), partway);
        assert_eq!(controller.hover_progress(ElementId(1), 500.0), 1.0);
    }

    #[test]
    fn scatter_tooltip_truncates_title_and_falls_back() {
        let datum = ChartDatum::Scatter(ScatterPoint {
            relevance: 3.0,
            likelihood: 3.5,
            intensity: 12.0,
            sector: None,
            title: Some("x".repeat(60)),
        });
        let content = datum.tooltip();
        assert_eq!(content.title.len(), 53);
        assert!(content.title.ends_with("..."));
        assert_eq!(
            content.lines,
            vec![
                "Relevance: 3".to_string(),
                "Likelihood: 3.5".to_string(),
                "Intensity: 12".to_string(),
                "Sector: Unknown".to_string(),
            ]
        );
    }
}
