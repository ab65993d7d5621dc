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

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}
impl Colour {
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let channel = |a: u8, b: u8| -> u8 {
            (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8
        };
        Self {
            r: channel(self.r, other.r),
            g: channel(self.g, other.g),
            b: channel(self.b, other.b),
        }
    }
}
impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Ten-swatch categorical palette (scatter sectors).
pub const CATEGORY_TEN: [Colour; 10] = [
    Colour::from_rgb(0x1f, 0x77, 0xb4),
    Colour::from_rgb(0xff, 0x7f, 0x0e),
    Colour::from_rgb(0x2c, 0xa0, 0x2c),
    Colour::from_rgb(0xd6, 0x27, 0x28),
    Colour::from_rgb(0x94, 0x67, 0xbd),
    Colour::from_rgb(0x8c, 0x56, 0x4b),
    Colour::from_rgb(0xe3, 0x77, 0xc2),
    Colour::from_rgb(0x7f, 0x7f, 0x7f),
    Colour::from_rgb(0xbc, 0xbd, 0x22),
    Colour::from_rgb(0x17, 0xbe, 0xcf),
];

/// Twelve-swatch pastel palette (donut topics).
pub const PASTEL_TWELVE: [Colour; 12] = [
    Colour::from_rgb(0x8d, 0xd3, 0xc7),
    Colour::from_rgb(0xff, 0xff, 0xb3),
    Colour::from_rgb(0xbe, 0xba, 0xda),
    Colour::from_rgb(0xfb, 0x80, 0x72),
    Colour::from_rgb(0x80, 0xb1, 0xd3),
    Colour::from_rgb(0xfd, 0xb4, 0x62),
    Colour::from_rgb(0xb3, 0xde, 0x69),
    Colour::from_rgb(0xfc, 0xcd, 0xe5),
    Colour::from_rgb(0xd9, 0xd9, 0xd9),
    Colour::from_rgb(0xbc, 0x80, 0xbd),
    Colour::from_rgb(0xcc, 0xeb, 0xc5),
    Colour::from_rgb(0xff, 0xed, 0x6f),
];

const BLUES_STOPS: [Colour; 9] = [
    Colour::from_rgb(0xf7, 0xfb, 0xff),
    Colour::from_rgb(0xde, 0xeb, 0xf7),
    Colour::from_rgb(0xc6, 0xdb, 0xef),
    Colour::from_rgb(0x9e, 0xca, 0xe1),
    Colour::from_rgb(0x6b, 0xae, 0xd6),
    Colour::from_rgb(0x42, 0x92, 0xc6),
    Colour::from_rgb(0x21, 0x71, 0xb5),
    Colour::from_rgb(0x08, 0x51, 0x9c),
    Colour::from_rgb(0x08, 0x30, 0x6b),
];

const GREENS_STOPS: [Colour; 9] = [
    Colour::from_rgb(0xf7, 0xfc, 0xf5),
    Colour::from_rgb(0xe5, 0xf5, 0xe0),
    Colour::from_rgb(0xc7, 0xe9, 0xc0),
    Colour::from_rgb(0xa1, 0xd9, 0x9b),
    Colour::from_rgb(0x74, 0xc4, 0x76),
    Colour::from_rgb(0x41, 0xab, 0x5d),
    Colour::from_rgb(0x23, 0x8b, 0x45),
    Colour::from_rgb(0x00, 0x6d, 0x2c),
    Colour::from_rgb(0x00, 0x44, 0x1b),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gradient {
    Blues,
    Greens,
}
impl Gradient {
    fn stops(self) -> &'static [Colour; 9] {
        match self {
            Gradient::Blues => &BLUES_STOPS,
            Gradient::Greens => &GREENS_STOPS,
        }
    }
    /// Piecewise-linear sample across the stop table, `t` clamped to [0, 1].
    pub fn sample(self, t: f64) -> Colour {
        let stops = self.stops();
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let position = t * (stops.len() - 1) as f64;
        let index = (position.floor() as usize).min(stops.len() - 2);
        stops[index].lerp(stops[index + 1], position - index as f64)
    }
}

/// Sequential colour scale over a numeric extent. A degenerate extent
/// (max <= min) maps everything to the lightest stop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequentialScale {
    gradient: Gradient,
    min: f64,
    max: f64,
}
impl SequentialScale {
    pub fn new(gradient: Gradient, min: f64, max: f64) -> Self {
        Self { gradient, min, max }
    }
    pub fn colour(&self, value: f64) -> Colour {
        if self.max <= self.min {
            return self.gradient.sample(0.0);
        }
        self.gradient.sample((value - self.min) / (self.max - self.min))
    }
}

/// Label applied wherever a categorical key is missing from a record.
pub const FALLBACK_CATEGORY: &str = "Unknown";

/// Static categorical palette. A label's swatch is a pure function of the
/// label text, so a category keeps its colour across renders, filter changes
/// and runs, independent of which other categories are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Palette {
    CategoryTen,
    PastelTwelve,
}
impl Palette {
    fn swatches(self) -> &'static [Colour] {
        match self {
            Palette::CategoryTen => &CATEGORY_TEN,
            Palette::PastelTwelve => &PASTEL_TWELVE,
        }
    }
    pub fn colour_for(self, label: &str) -> Colour {
        let swatches = self.swatches();
        let index = (fxhash::hash64(label) % swatches.len() as u64) as usize;
        swatches[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradient_endpoints_hit_first_and_last_stop() {
        assert_eq!(Gradient::Blues.sample(0.0), BLUES_STOPS[0]);
        assert_eq!(Gradient::Blues.sample(1.0), BLUES_STOPS[8]);
        assert_eq!(Gradient::Greens.sample(2.5), GREENS_STOPS[8]);
        assert_eq!(Gradient::Greens.sample(-1.0), GREENS_STOPS[0]);
    }

    #[test]
    fn degenerate_extent_maps_to_lightest_stop() {
        let scale = SequentialScale::new(Gradient::Blues, 0.0, 0.0);
        assert_eq!(scale.colour(0.0), BLUES_STOPS[0]);
        assert_eq!(scale.colour(42.0), BLUES_STOPS[0]);
    }

    #[test]
    fn palette_assignment_is_stable_per_label() {
        let first = Palette::PastelTwelve.colour_for("Oil");
        let second = Palette::PastelTwelve.colour_for("Oil");
        assert_eq!(first, second);
        assert!(PASTEL_TWELVE.contains(&first));
    }

    #[test]
    fn hex_formatting_is_lowercase_rgb() {
        assert_eq!(Colour::from_rgb(0x1f, 0x77, 0xb4).to_string(), "#1f77b4");
    }
}
