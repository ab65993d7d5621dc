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
use crate::aggregate::CountryCountEntry;
use crate::colour::SequentialScale;
use crate::config::{style, ChartConfig};
use crate::interaction::ChartDatum;
use crate::scale::{BandScale, LinearScale};
use crate::scene::{ElementId, Shape, Stroke, TextAnchor};

/// Circle radius per insight count, uncapped unlike the bubble radius scale.
const RADIUS_FACTOR: f32 = 3.0;
const STROKE_WIDTH: f32 = 2.0;
const HOVER_STROKE_WIDTH: f32 = 3.0;
const HOVER_RADIUS_BONUS: f32 = 5.0;
const HEADING: &str = "Data Points by Country";
const CAPTION: &str = "Circle size represents number of insights";
const LABEL_MAX_WORDS: usize = 2;
const HEADING_LIFT: f32 = 5.0;
const CAPTION_INSET: f32 = 6.0;

/// Geographic stand-in: one circle per country on band positions, lifted to
/// its count on the y scale, Greens fill deepening with the count. Long
/// country names shorten to their first two words on the axis.
pub(super) fn build(
    entries: &[CountryCountEntry],
    x: &BandScale,
    y: &LinearScale,
    colour: &SequentialScale,
    config: &ChartConfig,
) -> ChartLayout {
    let margins = config.margins;
    let mut elements = Vec::with_capacity(entries.len());
    for entry in entries {
        let Some(position) = x.position(&entry.country) else {
            continue;
        };
        let count = entry.count as f64;
        elements.push(ChartElement {
            id: ElementId(elements.len()),
            shape: Shape::Circle {
                cx: margins.left + position + x.bandwidth() / 2.0,
                cy: margins.top + y.scale(count),
                radius: (entry.count as f32).sqrt() * RADIUS_FACTOR,
                fill: colour.colour(count),
                stroke: Some(Stroke {
                    colour: style::WHITE,
                    width: STROKE_WIDTH,
                }),
                opacity: 1.0,
            },
            enter: EnterAnimation::GrowRadius,
            hover: HoverStyle {
                radius_delta: HOVER_RADIUS_BONUS,
                opacity: None,
                stroke_width: Some(HOVER_STROKE_WIDTH),
            },
            datum: ChartDatum::Country(entry.clone()),
        });
    }

    let inner_width = config.inner_width();
    let inner_height = config.inner_height();
    let mut chrome = vec![Shape::Text {
        x: margins.left + inner_width / 2.0,
        y: margins.top - HEADING_LIFT,
        content: HEADING.to_string(),
        size: style::LABEL_FONT_SIZE,
        colour: style::AXIS_TEXT,
        anchor: TextAnchor::Middle,
        angle_degrees: 0.0,
        bold: false,
    }];
    chrome.extend(axis::left_linear_axis(y, margins));
    chrome.extend(axis::bottom_band_axis(
        x,
        margins,
        inner_width,
        inner_height,
        Some(LABEL_MAX_WORDS),
    ));
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
