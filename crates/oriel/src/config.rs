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

use crate::aggregate::ChartKind;
use serde::{Deserialize, Serialize};

pub mod bounds {
    pub const SECTOR_TOP_N: usize = 10;
    pub const TOPIC_TOP_N: usize = 10;
    pub const SCATTER_SAMPLE_MAX: usize = 50;
    pub const COUNTRY_TOP_N: usize = 15;
}

pub mod timing {
    pub const BAR_ENTER_MS: f64 = 800.0;
    pub const DONUT_ENTER_MS: f64 = 800.0;
    pub const BUBBLE_ENTER_MS: f64 = 1000.0;
    pub const MAP_ENTER_MS: f64 = 1000.0;
    pub const HOVER_MS: f64 = 200.0;
}

pub mod style {
    use crate::colour::Colour;

    pub const AXIS_LINE: Colour = Colour::from_rgb(0x4b, 0x56, 0x63);
    pub const AXIS_TEXT: Colour = Colour::from_rgb(0x9c, 0xa3, 0xaf);
    pub const SUBDUED_TEXT: Colour = Colour::from_rgb(0x6b, 0x72, 0x80);
    pub const ARC_STROKE: Colour = Colour::from_rgb(0x1f, 0x29, 0x37);
    pub const WHITE: Colour = Colour::from_rgb(0xff, 0xff, 0xff);
    pub const TOOLTIP_BACKGROUND: Colour = Colour::from_rgb(0x00, 0x00, 0x00);
    pub const TOOLTIP_BACKGROUND_OPACITY: f32 = 0.8;

    pub const TICK_FONT_SIZE: f32 = 10.0;
    pub const LABEL_FONT_SIZE: f32 = 12.0;
    pub const PLACEHOLDER_FONT_SIZE: f32 = 14.0;
    pub const TICK_LENGTH: f32 = 6.0;
    pub const TICK_LABEL_GAP: f32 = 3.0;
    pub const CATEGORY_LABEL_ROTATION_DEGREES: f32 = -45.0;

    pub const TOOLTIP_OFFSET_X: f32 = 10.0;
    pub const TOOLTIP_OFFSET_Y: f32 = -10.0;
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}
impl Margins {
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
    pub const ZERO: Margins = Margins::new(0.0, 0.0, 0.0, 0.0);
}

/// Geometry and timing for one chart instance. Presets mirror the dashboard's
/// fixed card layout; `validate` guards hand-built configurations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub width: f32,
    pub height: f32,
    pub margins: Margins,
    pub band_padding: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    pub corner_radius: f32,
    pub tick_count: usize,
    pub enter_duration_ms: f64,
    pub hover_duration_ms: f64,
}
impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 500.0,
            height: 300.0,
            margins: Margins::new(20.0, 30.0, 80.0, 60.0),
            band_padding: 0.2,
            min_radius: 3.0,
            max_radius: 20.0,
            corner_radius: 4.0,
            tick_count: 10,
            enter_duration_ms: timing::BAR_ENTER_MS,
            hover_duration_ms: timing::HOVER_MS,
        }
    }
}
impl ChartConfig {
    pub fn for_kind(kind: ChartKind) -> Self {
        match kind {
            ChartKind::SectorIntensity => Self::default(),
            ChartKind::TopicCounts => Self {
                width: 400.0,
                height: 300.0,
                margins: Margins::ZERO,
                enter_duration_ms: timing::DONUT_ENTER_MS,
                ..Default::default()
            },
            ChartKind::ScatterSample => Self {
                margins: Margins::new(20.0, 30.0, 50.0, 60.0),
                enter_duration_ms: timing::BUBBLE_ENTER_MS,
                ..Default::default()
            },
            ChartKind::CountryCounts => Self {
                margins: Margins::new(20.0, 30.0, 120.0, 80.0),
                band_padding: 0.3,
                enter_duration_ms: timing::MAP_ENTER_MS,
                ..Default::default()
            },
        }
    }
    pub fn validate(&self) -> Result<(), String> {
        if !(self.width.is_finite() && self.height.is_finite()) {
            return Err("canvas dimensions must be finite".to_string());
        }
        if self.inner_width() <= 0.0 || self.inner_height() <= 0.0 {
            return Err("margins leave no drawable area".to_string());
        }
        if !(0.0..1.0).contains(&self.band_padding) {
            return Err("band_padding must be within [0.0, 1.0)".to_string());
        }
        if self.min_radius < 0.0 || self.max_radius < self.min_radius {
            return Err("radius bounds must satisfy 0 <= min <= max".to_string());
        }
        if self.enter_duration_ms < 0.0 || self.hover_duration_ms < 0.0 {
            return Err("durations must be non-negative".to_string());
        }
        if self.tick_count == 0 {
            return Err("tick_count must be greater than 0".to_string());
        }
        Ok(())
    }
    pub fn inner_width(&self) -> f32 {
        self.width - self.margins.left - self.margins.right
    }
    pub fn inner_height(&self) -> f32 {
        self.height - self.margins.top - self.margins.bottom
    }
}
