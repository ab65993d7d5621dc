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

use egui::epaint::TextShape;
use egui::{Align2, Color32, CornerRadius, FontId, Pos2, Rect, Sense, Vec2};
use oriel::config::style;
use oriel::{ChartView, Colour, Shape, TextAnchor, TooltipOverlay};

/// Paints one chart's current frame into an aspect-correct canvas and wires
/// the pointer through to the view's hover pipeline.
pub fn chart_canvas(ui: &mut egui::Ui, view: &mut ChartView, now_ms: f64) {
    // Probe for canvas dimensions first; the scene is rebuilt after pointer
    // routing so hover feedback lands in the same frame.
    let probe = view.scene_at(now_ms);
    let width = ui.available_width();
    let desired = Vec2::new(width, width * probe.height / probe.width);
    let (response, painter) = ui.allocate_painter(desired, Sense::hover());
    let rect = response.rect;
    let scale = (rect.width() / probe.width).min(rect.height() / probe.height);
    let origin = rect.min;

    match response.hover_pos() {
        Some(pos) => {
            let logical = ((pos.x - origin.x) / scale, (pos.y - origin.y) / scale);
            view.pointer_moved(logical, now_ms);
        }
        None => view.pointer_left(now_ms),
    }

    let scene = view.scene_at(now_ms);
    for node in &scene.nodes {
        draw_shape(&painter, origin, scale, &node.shape);
    }
    if let Some(overlay) = view.overlay() {
        if overlay.is_visible() {
            draw_tooltip(&painter, origin, scale, overlay);
        }
    }
}

fn to_screen(origin: Pos2, scale: f32, x: f32, y: f32) -> Pos2 {
    Pos2::new(origin.x + x * scale, origin.y + y * scale)
}

/// Ring point at `theta` radians clockwise from twelve o'clock.
fn ring_point(origin: Pos2, scale: f32, cx: f32, cy: f32, radius: f32, theta: f32) -> Pos2 {
    to_screen(
        origin,
        scale,
        cx + radius * theta.sin(),
        cy - radius * theta.cos(),
    )
}

fn colour32(colour: Colour, opacity: f32) -> Color32 {
    Color32::from_rgba_unmultiplied(
        colour.r,
        colour.g,
        colour.b,
        (opacity.clamp(0.0, 1.0) * 255.0) as u8,
    )
}

fn draw_shape(painter: &egui::Painter, origin: Pos2, scale: f32, shape: &Shape) {
    match shape {
        Shape::Rect {
            x,
            y,
            width,
            height,
            corner_radius,
            fill,
            opacity,
        } => {
            let rect = Rect::from_min_size(
                to_screen(origin, scale, *x, *y),
                Vec2::new(width * scale, height * scale),
            );
            painter.rect_filled(
                rect,
                CornerRadius::same((corner_radius * scale) as u8),
                colour32(*fill, *opacity),
            );
        }
        Shape::Circle {
            cx,
            cy,
            radius,
            fill,
            stroke,
            opacity,
        } => {
            let centre = to_screen(origin, scale, *cx, *cy);
            painter.circle_filled(centre, radius * scale, colour32(*fill, *opacity));
            if let Some(stroke) = stroke {
                painter.circle_stroke(
                    centre,
                    radius * scale,
                    egui::Stroke::new(stroke.width * scale, colour32(stroke.colour, *opacity)),
                );
            }
        }
        Shape::Arc {
            cx,
            cy,
            inner_radius,
            outer_radius,
            start_angle,
            end_angle,
            fill,
            stroke,
            opacity,
        } => {
            // egui has no annular-sector primitive; a thick polyline along
            // the centreline radius reads the same at donut scale.
            let mid_radius = (inner_radius + outer_radius) / 2.0;
            let thickness = (outer_radius - inner_radius) * scale;
            let span = end_angle - start_angle;
            let steps = ((span * mid_radius * scale / 4.0).abs().ceil() as usize).clamp(12, 256);
            let points: Vec<Pos2> = (0..=steps)
                .map(|i| {
                    let theta = start_angle + span * (i as f32 / steps as f32);
                    ring_point(origin, scale, *cx, *cy, mid_radius, theta)
                })
                .collect();
            painter.add(egui::Shape::line(
                points,
                egui::Stroke::new(thickness, colour32(*fill, *opacity)),
            ));
            if let Some(stroke) = stroke {
                let pen = egui::Stroke::new(stroke.width * scale, colour32(stroke.colour, *opacity));
                for theta in [*start_angle, *end_angle] {
                    painter.line_segment(
                        [
                            ring_point(origin, scale, *cx, *cy, *inner_radius, theta),
                            ring_point(origin, scale, *cx, *cy, *outer_radius, theta),
                        ],
                        pen,
                    );
                }
            }
        }
        Shape::Line {
            x1,
            y1,
            x2,
            y2,
            stroke,
        } => {
            painter.line_segment(
                [
                    to_screen(origin, scale, *x1, *y1),
                    to_screen(origin, scale, *x2, *y2),
                ],
                egui::Stroke::new(stroke.width * scale, colour32(stroke.colour, 1.0)),
            );
        }
        Shape::Text {
            x,
            y,
            content,
            size,
            colour,
            anchor,
            angle_degrees,
            // egui's default face has no bold variant; weight is dropped.
            bold: _,
        } => {
            let font = FontId::proportional(size * scale);
            let colour = colour32(*colour, 1.0);
            let anchor_pos = to_screen(origin, scale, *x, *y);
            if *angle_degrees == 0.0 {
                let align = match anchor {
                    TextAnchor::Start => Align2::LEFT_CENTER,
                    TextAnchor::Middle => Align2::CENTER_CENTER,
                    TextAnchor::End => Align2::RIGHT_CENTER,
                };
                painter.text(anchor_pos, align, content, font, colour);
            } else {
                let galley = painter.layout_no_wrap(content.clone(), font, colour);
                let angle = angle_degrees.to_radians();
                // Keep the anchor point fixed while rotating about the
                // galley origin.
                let local = match anchor {
                    TextAnchor::Start => Vec2::new(0.0, galley.size().y / 2.0),
                    TextAnchor::Middle => Vec2::new(galley.size().x / 2.0, galley.size().y / 2.0),
                    TextAnchor::End => Vec2::new(galley.size().x, galley.size().y / 2.0),
                };
                let rotated = egui::emath::Rot2::from_angle(angle) * local;
                painter.add(TextShape::new(anchor_pos - rotated, galley, colour).with_angle(angle));
            }
        }
    }
}

/// The overlay paints last, above every chart element, at the logical
/// position the interaction controller reported.
fn draw_tooltip(painter: &egui::Painter, origin: Pos2, scale: f32, overlay: &TooltipOverlay) {
    let Some(content) = overlay.content() else {
        return;
    };
    let (x, y) = overlay.position();
    let anchor = to_screen(origin, scale, x, y);

    let title_font = FontId::proportional(style::LABEL_FONT_SIZE * scale);
    let line_font = FontId::proportional(style::TICK_FONT_SIZE * scale);
    let title = painter.layout_no_wrap(content.title.clone(), title_font, Color32::WHITE);
    let lines: Vec<_> = content
        .lines
        .iter()
        .map(|line| painter.layout_no_wrap(line.clone(), line_font.clone(), Color32::from_gray(0xd1)))
        .collect();

    let padding = 6.0 * scale;
    let gap = 2.0 * scale;
    let mut box_width = title.size().x;
    let mut box_height = title.size().y;
    for line in &lines {
        box_width = box_width.max(line.size().x);
        box_height += gap + line.size().y;
    }
    let rect = Rect::from_min_size(
        anchor,
        Vec2::new(box_width + padding * 2.0, box_height + padding * 2.0),
    );
    painter.rect_filled(
        rect,
        CornerRadius::same(4),
        colour32(
            style::TOOLTIP_BACKGROUND,
            style::TOOLTIP_BACKGROUND_OPACITY,
        ),
    );

    let mut cursor = anchor + Vec2::new(padding, padding);
    let title_height = title.size().y;
    painter.add(TextShape::new(cursor, title, Color32::WHITE));
    cursor.y += title_height + gap;
    for line in lines {
        let line_height = line.size().y;
        painter.add(TextShape::new(cursor, line, Color32::WHITE));
        cursor.y += line_height + gap;
    }
}
