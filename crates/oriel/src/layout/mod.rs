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

mod axis;
mod bars;
mod bubbles;
mod country_map;
mod donut;

use crate::aggregate::{AggregatedSeries, ChartKind};
use crate::config::{style, ChartConfig};
use crate::interaction::ChartDatum;
use crate::scale::{build_scales, ScaleSet};
use crate::scene::{ElementId, Shape, TextAnchor};
use tracing::debug;

pub const NO_DATA_TEXT: &str = "No data available";
pub const NO_TOPIC_DATA_TEXT: &str = "No topic data available";
pub const NO_GEO_DATA_TEXT: &str = "No geographic data available";
pub const LOADING_TEXT: &str = "Loading chart...";

/// Placeholder wording for an empty series, per chart kind.
pub fn empty_message(kind: ChartKind) -> &'static str {
    match kind {
        ChartKind::SectorIntensity | ChartKind::ScatterSample => NO_DATA_TEXT,
        ChartKind::TopicCounts => NO_TOPIC_DATA_TEXT,
        ChartKind::CountryCounts => NO_GEO_DATA_TEXT,
    }
}

/// How an element animates in from nothing when it first renders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnterAnimation {
    /// Rect grows upward out of a horizontal baseline.
    GrowFromBaseline { baseline: f32 },
    /// Opacity fades from the given value to the shape's steady value.
    FadeIn { from: f32 },
    /// Circle radius grows from zero to the shape's steady value.
    GrowRadius,
}

/// Visual deltas applied while an element is hovered, each interpolated by
/// the hover transition's progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HoverStyle {
    pub radius_delta: f32,
    pub opacity: Option<f32>,
    pub stroke_width: Option<f32>,
}

/// One hoverable mark: steady-state geometry plus its enter animation,
/// hover transform and tooltip payload.
#[derive(Debug, Clone)]
pub struct ChartElement {
    pub id: ElementId,
    pub shape: Shape,
    pub enter: EnterAnimation,
    pub hover: HoverStyle,
    pub datum: ChartDatum,
}

/// Renderer output for one series: static chrome (axes, labels, headings)
/// under the animated elements, annotations (slice labels, centre captions)
/// over them, all in canvas coordinates.
#[derive(Debug, Clone)]
pub struct ChartLayout {
    pub width: f32,
    pub height: f32,
    pub chrome: Vec<Shape>,
    pub elements: Vec<ChartElement>,
    pub annotations: Vec<Shape>,
}

/// Lays a series out through its scale bundle. An empty series produces the
/// placeholder layout; scales are never built for it.
pub fn build(series: &AggregatedSeries, config: &ChartConfig) -> ChartLayout {
    let layout = match (series, build_scales(series, config)) {
        (AggregatedSeries::SectorIntensity(entries), Some(ScaleSet::Bar { x, y, colour })) => {
            bars::build(entries, &x, &y, &colour, config)
        }
        (AggregatedSeries::TopicCounts(entries), Some(ScaleSet::Donut { palette })) => {
            donut::build(entries, palette, config)
        }
        (
            AggregatedSeries::ScatterSample(points),
            Some(ScaleSet::Bubble {
                x,
                y,
                radius,
                palette,
            }),
        ) => bubbles::build(points, &x, &y, &radius, palette, config),
        (AggregatedSeries::CountryCounts(entries), Some(ScaleSet::Map { x, y, colour })) => {
            country_map::build(entries, &x, &y, &colour, config)
        }
        (series, _) => message_layout(config, empty_message(series.kind())),
    };
    debug!(
        kind = %series.kind(),
        elements = layout.elements.len(),
        chrome = layout.chrome.len(),
        "Built chart layout"
    );
    layout
}

/// Layout carrying a single centred message and no elements.
pub fn message_layout(config: &ChartConfig, text: &str) -> ChartLayout {
    ChartLayout {
        width: config.width,
        height: config.height,
        chrome: vec![Shape::Text {
            x: config.width / 2.0,
            y: config.height / 2.0,
            content: text.to_string(),
            size: style::PLACEHOLDER_FONT_SIZE,
            colour: style::AXIS_TEXT,
            anchor: TextAnchor::Middle,
            angle_degrees: 0.0,
            bold: false,
        }],
        elements: Vec::new(),
        annotations: Vec::new(),
    }
}

/// Geometry of an element at a point in its enter and hover animations.
/// Enter applies first, the hover deltas interpolate on top of the result.
pub fn resolve_shape(element: &ChartElement, enter_progress: f32, hover_progress: f32) -> Shape {
    let mut shape = element.shape.clone();
    match element.enter {
        EnterAnimation::GrowFromBaseline { baseline } => {
            if let Shape::Rect { y, height, .. } = &mut shape {
                *y = baseline + (*y - baseline) * enter_progress;
                *height *= enter_progress;
            }
        }
        EnterAnimation::FadeIn { from } => match &mut shape {
            Shape::Arc { opacity, .. }
            | Shape::Circle { opacity, .. }
            | Shape::Rect { opacity, .. } => {
                *opacity = from + (*opacity - from) * enter_progress;
            }
            _ => {}
        },
        EnterAnimation::GrowRadius => {
            if let Shape::Circle { radius, .. } = &mut shape {
                *radius *= enter_progress;
            }
        }
    }
    if hover_progress > 0.0 {
        apply_hover(&mut shape, element.hover, hover_progress);
    }
    shape
}

fn apply_hover(shape: &mut Shape, hover: HoverStyle, progress: f32) {
    match shape {
        Shape::Circle {
            radius,
            stroke,
            opacity,
            ..
        } => {
            *radius += hover.radius_delta * progress;
            if let (Some(target), Some(stroke)) = (hover.stroke_width, stroke.as_mut()) {
                stroke.width += (target - stroke.width) * progress;
            }
            if let Some(target) = hover.opacity {
                *opacity += (target - *opacity) * progress;
            }
        }
        Shape::Arc {
            outer_radius,
            stroke,
            opacity,
            ..
        } => {
            *outer_radius += hover.radius_delta * progress;
            if let (Some(target), Some(stroke)) = (hover.stroke_width, stroke.as_mut()) {
                stroke.width += (target - stroke.width) * progress;
            }
            if let Some(target) = hover.opacity {
                *opacity += (target - *opacity) * progress;
            }
        }
        Shape::Rect { opacity, .. } => {
            if let Some(target) = hover.opacity {
                *opacity += (target - *opacity) * progress;
            }
        }
        Shape::Line { .. } | Shape::Text { .. } => {}
    }
}
