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

pub mod aggregate;
pub mod colour;
pub mod config;
pub mod error;
pub mod interaction;
pub mod layout;
pub mod record;
pub mod scale;
pub mod scene;
pub mod transition;

pub use aggregate::{
    aggregate, AggregatedSeries, ChartKind, CountryCountEntry, ScatterPoint,
    SectorIntensityEntry, TopicCountEntry,
};
pub use colour::{Colour, Gradient, Palette, FALLBACK_CATEGORY};
pub use config::{ChartConfig, Margins};
pub use error::{ChartError, ConfigError, DashboardError, DataError, Result};
pub use interaction::{ChartDatum, InteractionController, TooltipContent, TooltipOverlay};
pub use layout::{ChartElement, ChartLayout, EnterAnimation, HoverStyle};
pub use record::{
    records_from_json_slice, records_from_json_str, records_from_path, Record, RecordSet,
};
pub use scene::{ElementId, HitRegion, HitTarget, Scene, SceneNode, Shape, Stroke, TextAnchor};
pub use transition::{ease_cubic_in_out, ElementPhase, Transition};

use tracing::debug;
use uuid::Uuid;

struct RenderState {
    layout: ChartLayout,
    enters: Vec<Transition>,
}

/// One mounted chart. Owns its aggregation, geometry, transition clocks and
/// tooltip overlay exclusively; two views never share state, even of the
/// same kind. All animation reads the host-supplied clock in milliseconds,
/// the view never looks at wall time itself.
pub struct ChartView {
    id: Uuid,
    kind: ChartKind,
    config: ChartConfig,
    loading: bool,
    interaction: Option<InteractionController>,
    state: Option<RenderState>,
}

impl ChartView {
    /// Mounts a view with the dashboard's preset geometry for the kind.
    pub fn mount(kind: ChartKind) -> Self {
        Self::assemble(kind, ChartConfig::for_kind(kind))
    }

    /// Mounts a view over a hand-built configuration, rejecting one that
    /// violates the geometry invariants.
    pub fn with_config(kind: ChartKind, config: ChartConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|reason| ConfigError::ValidationFailed { reason })?;
        Ok(Self::assemble(kind, config))
    }

    fn assemble(kind: ChartKind, config: ChartConfig) -> Self {
        let id = Uuid::new_v4();
        Self {
            id,
            kind,
            config,
            loading: false,
            interaction: Some(InteractionController::mount(id, config.hover_duration_ms)),
            state: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }
    pub fn kind(&self) -> ChartKind {
        self.kind
    }
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Aggregates the records and replaces every element with a fresh
    /// generation entering from nothing. Prior elements, their animations and
    /// any hover state are discarded first. Ignored while the view is loading
    /// or torn down.
    pub fn render(&mut self, records: &[Record], now_ms: f64) {
        let Some(interaction) = self.interaction.as_mut() else {
            return;
        };
        if self.loading {
            return;
        }
        interaction.reset();
        let series = aggregate(records, self.kind);
        let layout = layout::build(&series, &self.config);
        let enters = layout
            .elements
            .iter()
            .map(|_| Transition::new(0.0, 1.0, now_ms, self.config.enter_duration_ms))
            .collect();
        debug!(
            chart = %self.id,
            kind = %self.kind,
            elements = layout.elements.len(),
            "Rendered chart"
        );
        self.state = Some(RenderState { layout, enters });
    }

    /// Flips the loading flag. Any rendered elements are discarded on the
    /// spot so nothing stale survives into the next render.
    pub fn set_loading(&mut self, loading: bool) {
        if self.loading == loading {
            return;
        }
        self.loading = loading;
        self.state = None;
        if let Some(interaction) = self.interaction.as_mut() {
            interaction.reset();
        }
    }

    /// The frame at `now_ms`: chrome, then elements resolved to their
    /// current animation state, then annotations. A loading view shows the
    /// loading placeholder, an unrendered or empty one its no-data message,
    /// a torn-down one nothing at all.
    pub fn scene_at(&self, now_ms: f64) -> Scene {
        let Some(interaction) = self.interaction.as_ref() else {
            return Scene::new(self.config.width, self.config.height);
        };
        if self.loading {
            return Scene::message(self.config.width, self.config.height, layout::LOADING_TEXT);
        }
        let Some(state) = self.state.as_ref() else {
            return Scene::message(
                self.config.width,
                self.config.height,
                layout::empty_message(self.kind),
            );
        };
        let mut scene = Scene::new(state.layout.width, state.layout.height);
        for shape in &state.layout.chrome {
            scene.nodes.push(SceneNode {
                element: None,
                shape: shape.clone(),
            });
        }
        for (element, enter) in state.layout.elements.iter().zip(&state.enters) {
            let shape = layout::resolve_shape(
                element,
                enter.value_at(now_ms),
                interaction.hover_progress(element.id, now_ms),
            );
            if let Some(region) = shape.hit_region() {
                scene.hit_targets.push(HitTarget {
                    element: element.id,
                    region,
                });
            }
            scene.nodes.push(SceneNode {
                element: Some(element.id),
                shape,
            });
        }
        for shape in &state.layout.annotations {
            scene.nodes.push(SceneNode {
                element: None,
                shape: shape.clone(),
            });
        }
        scene
    }

    /// Where an element sits in its lifecycle. Ids outside the current
    /// generation read as replaced; `None` means nothing is rendered at all.
    pub fn element_phase(&self, element: ElementId, now_ms: f64) -> Option<ElementPhase> {
        let state = self.state.as_ref()?;
        match state.enters.get(element.0) {
            Some(enter) if !enter.is_complete(now_ms) => Some(ElementPhase::Entering),
            Some(_) => Some(ElementPhase::Steady),
            None => Some(ElementPhase::Replaced),
        }
    }

    /// Routes a pointer position to hover enter/move/leave against the
    /// current frame's hit targets. Hit testing runs on resolved geometry,
    /// so a half-grown circle is exactly as hoverable as it looks.
    pub fn pointer_moved(&mut self, pointer: (f32, f32), now_ms: f64) {
        let hit = self.scene_at(now_ms).hit_test(pointer.0, pointer.1);
        let Some(interaction) = self.interaction.as_mut() else {
            return;
        };
        let Some(state) = self.state.as_ref() else {
            return;
        };
        match (interaction.hovered(), hit) {
            (Some(previous), Some(current)) if previous == current => {
                interaction.on_move(pointer);
            }
            (_, Some(current)) => {
                if let Some(element) = state.layout.elements.get(current.0) {
                    interaction.on_enter(current, &element.datum, pointer, now_ms);
                }
            }
            (Some(previous), None) => interaction.on_leave(previous, now_ms),
            (None, None) => {}
        }
        interaction.prune(now_ms);
    }

    /// The pointer left the mount surface entirely.
    pub fn pointer_left(&mut self, now_ms: f64) {
        if let Some(interaction) = self.interaction.as_mut() {
            if let Some(current) = interaction.hovered() {
                interaction.on_leave(current, now_ms);
            }
            interaction.prune(now_ms);
        }
    }

    /// The tooltip overlay, while the view is mounted.
    pub fn overlay(&self) -> Option<&TooltipOverlay> {
        self.interaction
            .as_ref()
            .map(InteractionController::overlay)
    }

    /// True while any enter or hover animation still has frames to show.
    pub fn is_animating(&self, now_ms: f64) -> bool {
        if self.loading {
            return false;
        }
        let entering = self.state.as_ref().is_some_and(|state| {
            state
                .enters
                .iter()
                .any(|enter| !enter.is_complete(now_ms))
        });
        entering
            || self
                .interaction
                .as_ref()
                .is_some_and(|interaction| interaction.has_active_animations(now_ms))
    }

    /// Per-frame housekeeping: drops finished hover animations and reports
    /// whether another frame is worth scheduling.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        if let Some(interaction) = self.interaction.as_mut() {
            interaction.prune(now_ms);
        }
        self.is_animating(now_ms)
    }

    /// Releases the tooltip overlay and every element. The inert view
    /// renders an empty scene and ignores pointers and renders alike.
    /// Dropping the view releases the same resources implicitly.
    pub fn teardown(&mut self) {
        self.interaction = None;
        self.state = None;
        debug!(chart = %self.id, "Chart view torn down");
    }
}
