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

use crate::config::{style, Margins};
use crate::scale::{BandScale, LinearScale};
use crate::scene::{Shape, Stroke, TextAnchor};

/// Tick count the dashboard's numeric axes render with.
pub(super) const AXIS_TICKS: usize = 5;

fn axis_stroke() -> Stroke {
    Stroke {
        colour: style::AXIS_LINE,
        width: 1.0,
    }
}

fn tick_label(x: f32, y: f32, content: String, anchor: TextAnchor, angle_degrees: f32) -> Shape {
    Shape::Text {
        x,
        y,
        content,
        size: style::TICK_FONT_SIZE,
        colour: style::AXIS_TEXT,
        anchor,
        angle_degrees,
        bold: false,
    }
}

/// Numeric tick text without float noise: whole values print bare, the rest
/// keep at most two decimals.
fn fmt_tick(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        format!("{:.0}", value.round())
    } else {
        let text = format!("{value:.2}");
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Vertical axis along the left margin: domain line, outward tick marks and
/// end-anchored numeric labels.
pub(super) fn left_linear_axis(y: &LinearScale, margins: Margins) -> Vec<Shape> {
    let (r0, r1) = y.range();
    let (near, far) = (r0.min(r1), r0.max(r1));
    let axis_x = margins.left;
    let mut shapes = vec![Shape::Line {
        x1: axis_x,
        y1: margins.top + near,
        x2: axis_x,
        y2: margins.top + far,
        stroke: axis_stroke(),
    }];
    for tick in y.ticks(AXIS_TICKS) {
        let tick_y = margins.top + y.scale(tick);
        shapes.push(Shape::Line {
            x1: axis_x - style::TICK_LENGTH,
            y1: tick_y,
            x2: axis_x,
            y2: tick_y,
            stroke: axis_stroke(),
        });
        shapes.push(tick_label(
            axis_x - style::TICK_LENGTH - style::TICK_LABEL_GAP,
            tick_y,
            fmt_tick(tick),
            TextAnchor::End,
            0.0,
        ));
    }
    shapes
}

/// Horizontal numeric axis along the plot bottom with centred labels.
pub(super) fn bottom_linear_axis(x: &LinearScale, margins: Margins, inner_height: f32) -> Vec<Shape> {
    let (r0, r1) = x.range();
    let (near, far) = (r0.min(r1), r0.max(r1));
    let axis_y = margins.top + inner_height;
    let mut shapes = vec![Shape::Line {
        x1: margins.left + near,
        y1: axis_y,
        x2: margins.left + far,
        y2: axis_y,
        stroke: axis_stroke(),
    }];
    for tick in x.ticks(AXIS_TICKS) {
        let tick_x = margins.left + x.scale(tick);
        shapes.push(Shape::Line {
            x1: tick_x,
            y1: axis_y,
            x2: tick_x,
            y2: axis_y + style::TICK_LENGTH,
            stroke: axis_stroke(),
        });
        shapes.push(tick_label(
            tick_x,
            axis_y + style::TICK_LENGTH + style::TICK_LABEL_GAP + style::TICK_FONT_SIZE / 2.0,
            fmt_tick(tick),
            TextAnchor::Middle,
            0.0,
        ));
    }
    shapes
}

/// Horizontal category axis along the plot bottom. Labels rotate -45 degrees
/// anchored at their end so long names slope down-left out of the band;
/// `max_words` optionally shortens multi-word names to the first few + "...".
pub(super) fn bottom_band_axis(
    x: &BandScale,
    margins: Margins,
    inner_width: f32,
    inner_height: f32,
    max_words: Option<usize>,
) -> Vec<Shape> {
    let axis_y = margins.top + inner_height;
    let mut shapes = vec![Shape::Line {
        x1: margins.left,
        y1: axis_y,
        x2: margins.left + inner_width,
        y2: axis_y,
        stroke: axis_stroke(),
    }];
    for label in x.labels() {
        let Some(position) = x.position(label) else {
            continue;
        };
        let centre = margins.left + position + x.bandwidth() / 2.0;
        shapes.push(Shape::Line {
            x1: centre,
            y1: axis_y,
            x2: centre,
            y2: axis_y + style::TICK_LENGTH,
            stroke: axis_stroke(),
        });
        shapes.push(tick_label(
            centre,
            axis_y + style::TICK_LENGTH + style::TICK_LABEL_GAP,
            shorten(label, max_words),
            TextAnchor::End,
            style::CATEGORY_LABEL_ROTATION_DEGREES,
        ));
    }
    shapes
}

fn shorten(label: &str, max_words: Option<usize>) -> String {
    let Some(limit) = max_words else {
        return label.to_string();
    };
    let words: Vec<&str> = label.split_whitespace().collect();
    if words.len() > limit {
        format!("{}...", words[..limit].join(" "))
    } else {
        label.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_text_drops_float_noise() {
        assert_eq!(fmt_tick(0.0), "0");
        assert_eq!(fmt_tick(15.0), "15");
        assert_eq!(fmt_tick(2.5), "2.5");
        assert_eq!(fmt_tick(3.0f64 * 0.2), "0.6");
    }

    #[test]
    fn long_names_shorten_to_two_words() {
        assert_eq!(
            shorten("United States of America", Some(2)),
            "United States..."
        );
        assert_eq!(shorten("United States", Some(2)), "United States");
        assert_eq!(shorten("United States of America", None), "United States of America");
    }

    #[test]
    fn left_axis_spans_the_plot_column() {
        let y = LinearScale::nice((0.0, 14.0), (230.0, 0.0), AXIS_TICKS);
        let margins = Margins::new(20.0, 30.0, 50.0, 60.0);
        let shapes = left_linear_axis(&y, margins);
        let Shape::Line { x1, y1, x2, y2, .. } = shapes[0] else {
            panic!("expected the domain line first");
        };
        assert_eq!((x1, x2), (60.0, 60.0));
        assert_eq!((y1, y2), (20.0, 250.0));
        // One mark and one label per tick after the domain line.
        assert_eq!(shapes.len() % 2, 1);
    }
}
