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

use super::{axis, ChartElement, ChartLayout, EnterAnimation, HoverStyle};
use crate::aggregate::ScatterPoint;
use crate::colour::{Palette, FALLBACK_CATEGORY};
use crate::config::{style, ChartConfig};
use crate::interaction::ChartDatum;
use crate::scale::{LinearScale, SqrtScale};
use crate::scene::{ElementId, Shape, Stroke, TextAnchor};

const STEADY_OPACITY: f32 = 0.7;
const STROKE_WIDTH: f32 = 1.0;
const HOVER_STROKE_WIDTH: f32 = 2.0;
const X_AXIS_TITLE: &str = "Relevance";
const Y_AXIS_TITLE: &str = "Likelihood";
const CAPTION: &str = "Bubble size represents intensity";
const X_TITLE_DROP: f32 = 32.0;
const Y_TITLE_LIFT: f32 = 40.0;
const CAPTION_INSET: f32 = 6.0;

/// Relevance/likelihood scatter: one circle per sampled record, area tracking
/// intensity, palette keyed by sector. Circles grow in from nothing; hover
/// brightens to full opacity and doubles the white outline.
pub(super) fn build(
    points: &[ScatterPoint],
    x: &LinearScale,
    y: &LinearScale,
    radius: &SqrtScale,
    palette: Palette,
    config: &ChartConfig,
) -> ChartLayout {
    let margins = config.margins;
    let mut elements = Vec::with_capacity(points.len());
    for point in points {
        let sector = point.sector.as_deref().unwrap_or(FALLBACK_CATEGORY);
        elements.push(ChartElement {
            id: ElementId(elements.len()),
            shape: Shape::Circle {
                cx: margins.left + x.scale(point.relevance),
                cy: margins.top + y.scale(point.likelihood),
                radius: radius.radius(point.intensity),
                fill: palette.colour_for(sector),
                stroke: Some(Stroke {
                    colour: style::WHITE,
                    width: STROKE_WIDTH,
                }),
                opacity: STEADY_OPACITY,
            },
            enter: EnterAnimation::GrowRadius,
            hover: HoverStyle {
                radius_delta: 0.0,
                opacity: Some(1.0),
                stroke_width: Some(HOVER_STROKE_WIDTH),
            },
            datum: ChartDatum::Scatter(point.clone()),
        });
    }

    let inner_width = config.inner_width();
    let inner_height = config.inner_height();
    let mut chrome = axis::left_linear_axis(y, margins);
    chrome.extend(axis::bottom_linear_axis(x, margins, inner_height));
    chrome.push(Shape::Text {
        x: margins.left + inner_width / 2.0,
        y: margins.top + inner_height + X_TITLE_DROP,
        content: X_AXIS_TITLE.to_string(),
        size: style::TICK_FONT_SIZE,
        colour: style::AXIS_TEXT,
        anchor: TextAnchor::Middle,
        angle_degrees: 0.0,
        bold: false,
    });
    chrome.push(Shape::Text {
        x: margins.left - Y_TITLE_LIFT,
        y: margins.top + inner_height / 2.0,
        content: Y_AXIS_TITLE.to_string(),
        size: style::TICK_FONT_SIZE,
        colour: style::AXIS_TEXT,
        anchor: TextAnchor::Middle,
        angle_degrees: -90.0,
        bold: false,
    });
    chrome.push(Shape::Text {
        x: config.width / 2.0,
        y: config.height - CAPTION_INSET,
        content: CAPTION.to_string(),
        size: style::TICK_FONT_SIZE,
        colour: style::AXIS_TEXT,
        anchor: TextAnchor::Middle,
        angle_degrees: 0.0,
        bold: false,
    });

    ChartLayout {
        width: config.width,
        height: config.height,
        chrome,
        elements,
        annotations: Vec::new(),
    }
}
