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

use crate::colour::Colour;
use crate::config::style;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Identity of one hoverable element within a single render generation.
/// Render replaces all elements, so ids never survive a data change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub colour: Colour,
    pub width: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

/// Drawable primitive in logical canvas coordinates (y grows downward).
/// Arc angles are radians measured clockwise from twelve o'clock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        corner_radius: f32,
        fill: Colour,
        opacity: f32,
    },
    Circle {
        cx: f32,
        cy: f32,
        radius: f32,
        fill: Colour,
        stroke: Option<Stroke>,
        opacity: f32,
    },
    Arc {
        cx: f32,
        cy: f32,
        inner_radius: f32,
        outer_radius: f32,
        start_angle: f32,
        end_angle: f32,
        fill: Colour,
        stroke: Option<Stroke>,
        opacity: f32,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        stroke: Stroke,
    },
    Text {
        x: f32,
        y: f32,
        content: String,
        size: f32,
        colour: Colour,
        anchor: TextAnchor,
        angle_degrees: f32,
        bold: bool,
    },
}
impl Shape {
    /// Pointer-sensitive region of the shape, if it has one.
    pub fn hit_region(&self) -> Option<HitRegion> {
        match *self {
            Shape::Rect {
                x,
                y,
                width,
                height,
                ..
            } => Some(HitRegion::Rect {
                x,
                y,
                width,
                height,
            }),
            Shape::Circle {
                cx, cy, radius, ..
            } => Some(HitRegion::Circle { cx, cy, radius }),
            Shape::Arc {
                cx,
                cy,
                inner_radius,
                outer_radius,
                start_angle,
                end_angle,
                ..
            } => Some(HitRegion::Annulus {
                cx,
                cy,
                inner_radius,
                outer_radius,
                start_angle,
                end_angle,
            }),
            Shape::Line { .. } | Shape::Text { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum HitRegion {
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    Circle {
        cx: f32,
        cy: f32,
        radius: f32,
    },
    Annulus {
        cx: f32,
        cy: f32,
        inner_radius: f32,
        outer_radius: f32,
        start_angle: f32,
        end_angle: f32,
    },
}
impl HitRegion {
    pub fn contains(&self, px: f32, py: f32) -> bool {
        match *self {
            HitRegion::Rect {
                x,
                y,
                width,
                height,
            } => px >= x && px <= x + width && py >= y && py <= y + height,
            HitRegion::Circle { cx, cy, radius } => {
                let (dx, dy) = (px - cx, py - cy);
                dx * dx + dy * dy <= radius * radius
            }
            HitRegion::Annulus {
                cx,
                cy,
                inner_radius,
                outer_radius,
                start_angle,
                end_angle,
            } => {
                let (dx, dy) = (px - cx, py - cy);
                let distance = (dx * dx + dy * dy).sqrt();
                if distance < inner_radius || distance > outer_radius {
                    return false;
                }
                // Clockwise angle from twelve o'clock, matching arc layout.
                let mut theta = dx.atan2(-dy);
                if theta < 0.0 {
                    theta += TAU;
                }
                theta >= start_angle && theta <= end_angle
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitTarget {
    pub element: ElementId,
    pub region: HitRegion,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    pub element: Option<ElementId>,
    pub shape: Shape,
}

/// One frame's worth of geometry. Hit targets are ordered like the nodes
/// that produced them; hit testing walks them back to front.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub width: f32,
    pub height: f32,
    pub nodes: Vec<SceneNode>,
    pub hit_targets: Vec<HitTarget>,
}
impl Scene {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            nodes: Vec::new(),
            hit_targets: Vec::new(),
        }
    }
    /// Scene holding a single centred message, used for the no-data and
    /// loading placeholders. Carries no hit targets.
    pub fn message(width: f32, height: f32, text: &str) -> Self {
        let mut scene = Self::new(width, height);
        scene.nodes.push(SceneNode {
            element: None,
            shape: Shape::Text {
                x: width / 2.0,
                y: height / 2.0,
                content: text.to_string(),
                size: style::PLACEHOLDER_FONT_SIZE,
                colour: style::AXIS_TEXT,
                anchor: TextAnchor::Middle,
                angle_degrees: 0.0,
                bold: false,
            },
        });
        scene
    }
    pub fn hit_test(&self, px: f32, py: f32) -> Option<ElementId> {
        self.hit_targets
            .iter()
            .rev()
            .find(|target| target.region.contains(px, py))
            .map(|target| target.element)
    }
    pub fn text_contents(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .filter_map(|node| match &node.shape {
                Shape::Text { content, .. } => Some(content.as_str()),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn annulus_angle_test_is_clockwise_from_top() {
        let region = HitRegion::Annulus {
            cx: 0.0,
            cy: 0.0,
            inner_radius: 5.0,
            outer_radius: 10.0,
            start_angle: 0.0,
            end_angle: std::f32::consts::FRAC_PI_2,
        };
        // Straight up sits at angle zero, straight right at a quarter turn.
        assert!(region.contains(0.0, -7.0));
        assert!(region.contains(7.0, 0.0));
        assert!(!region.contains(0.0, 7.0));
        assert!(!region.contains(-7.0, 0.0));
        assert!(!region.contains(0.0, -3.0));
    }

    #[test]
    fn hit_test_prefers_later_nodes() {
        let mut scene = Scene::new(100.0, 100.0);
        for (index, radius) in [(0usize, 20.0f32), (1, 10.0)] {
            scene.hit_targets.push(HitTarget {
                element: ElementId(index),
                region: HitRegion::Circle {
                    cx: 50.0,
                    cy: 50.0,
                    radius,
                },
            });
        }
        assert_eq!(scene.hit_test(52.0, 50.0), Some(ElementId(1)));
        assert_eq!(scene.hit_test(75.0, 50.0), None);
    }
}
