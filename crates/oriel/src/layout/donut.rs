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

use super::{ChartElement, ChartLayout, EnterAnimation, HoverStyle};
use crate::aggregate::TopicCountEntry;
use crate::colour::Palette;
use crate::config::{style, ChartConfig};
use crate::interaction::ChartDatum;
use crate::scene::{ElementId, Shape, Stroke, TextAnchor};
use std::f32::consts::TAU;

const RADIUS_INSET: f32 = 20.0;
const INNER_RADIUS_RATIO: f32 = 0.5;
const STEADY_OPACITY: f32 = 0.8;
const HOVER_RADIUS_BONUS: f32 = 5.0;
const ARC_STROKE_WIDTH: f32 = 2.0;
/// Slices smaller than this share carry no percentage label.
const LABEL_MIN_SHARE: f64 = 0.05;
const CAPTION_TITLE_LIFT: f32 = 7.0;
const CAPTION_DETAIL_DROP: f32 = 12.0;

/// Topic donut: one annular arc per topic in series order, clockwise from
/// twelve o'clock, fading in. Percentage labels sit at the arc centroids for
/// slices worth more than five percent; the hole carries the caption pair.
pub(super) fn build(
    entries: &[TopicCountEntry],
    palette: Palette,
    config: &ChartConfig,
) -> ChartLayout {
    let cx = config.width / 2.0;
    let cy = config.height / 2.0;
    let outer_radius = config.width.min(config.height) / 2.0 - RADIUS_INSET;
    let inner_radius = outer_radius * INNER_RADIUS_RATIO;
    let total: usize = entries.iter().map(|entry| entry.count).sum();

    let mut elements = Vec::with_capacity(entries.len());
    let mut annotations = Vec::new();
    let mut start_angle = 0.0f32;
    for entry in entries {
        let share = if total == 0 {
            0.0
        } else {
            entry.count as f64 / total as f64
        };
        let end_angle = start_angle + share as f32 * TAU;
        elements.push(ChartElement {
            id: ElementId(elements.len()),
            shape: Shape::Arc {
                cx,
                cy,
                inner_radius,
                outer_radius,
                start_angle,
                end_angle,
                fill: palette.colour_for(&entry.topic),
                stroke: Some(Stroke {
                    colour: style::ARC_STROKE,
                    width: ARC_STROKE_WIDTH,
                }),
                opacity: STEADY_OPACITY,
            },
            enter: EnterAnimation::FadeIn { from: 0.0 },
            hover: HoverStyle {
                radius_delta: HOVER_RADIUS_BONUS,
                opacity: Some(1.0),
                stroke_width: None,
            },
            datum: ChartDatum::Topic {
                entry: entry.clone(),
                share,
            },
        });
        if share > LABEL_MIN_SHARE {
            let mid_angle = (start_angle + end_angle) / 2.0;
            let centroid_radius = (inner_radius + outer_radius) / 2.0;
            annotations.push(Shape::Text {
                x: cx + centroid_radius * mid_angle.sin(),
                y: cy - centroid_radius * mid_angle.cos(),
                content: format!("{:.0}%", share * 100.0),
                size: style::TICK_FONT_SIZE,
                colour: style::WHITE,
                anchor: TextAnchor::Middle,
                angle_degrees: 0.0,
                bold: true,
            });
        }
        start_angle = end_angle;
    }
    annotations.push(Shape::Text {
        x: cx,
        y: cy - CAPTION_TITLE_LIFT,
        content: "Top Topics".to_string(),
        size: style::PLACEHOLDER_FONT_SIZE,
        colour: style::AXIS_TEXT,
        anchor: TextAnchor::Middle,
        angle_degrees: 0.0,
        bold: true,
    });
    annotations.push(Shape::Text {
        x: cx,
        y: cy + CAPTION_DETAIL_DROP,
        content: format!("{} categories", entries.len()),
        size: style::LABEL_FONT_SIZE,
        colour: style::SUBDUED_TEXT,
        anchor: TextAnchor::Middle,
        angle_degrees: 0.0,
        bold: false,
    });

    ChartLayout {
        width: config.width,
        height: config.height,
        chrome: Vec::new(),
        elements,
        annotations,
    }
}
