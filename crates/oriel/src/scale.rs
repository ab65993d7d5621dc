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

use crate::aggregate::AggregatedSeries;
use crate::colour::{Gradient, Palette, SequentialScale};
use crate::config::ChartConfig;
use itertools::{Itertools, MinMaxResult};

const E10: f64 = 7.071_067_811_865_475_5;
const E5: f64 = 3.162_277_660_168_379_5;
const E2: f64 = std::f64::consts::SQRT_2;

/// Step of the 1-2-5 tick progression covering `[start, stop]` with roughly
/// `count` intervals. Zero when the span is empty or not finite.
fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let span = stop - start;
    if span <= 0.0 || !span.is_finite() || count == 0 {
        return 0.0;
    }
    let raw = span / count as f64;
    let base = 10f64.powf(raw.log10().floor());
    let error = raw / base;
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };
    factor * base
}

/// Expands `[min, max]` outward to tick-step multiples. The step is
/// recomputed once after the first expansion, which is where it settles.
pub fn nice_bounds(min: f64, max: f64, count: usize) -> (f64, f64) {
    let (mut lo, mut hi) = (min, max);
    let mut previous_step = 0.0;
    for _ in 0..2 {
        let step = tick_step(lo, hi, count);
        if step <= 0.0 || step == previous_step {
            break;
        }
        lo = (lo / step).floor() * step;
        hi = (hi / step).ceil() * step;
        previous_step = step;
    }
    (lo, hi)
}

/// Tick values inside `[min, max]` on the 1-2-5 progression.
pub fn ticks(min: f64, max: f64, count: usize) -> Vec<f64> {
    if !min.is_finite() || !max.is_finite() || min > max {
        return Vec::new();
    }
    if min == max {
        return vec![min];
    }
    let step = tick_step(min, max, count);
    if step <= 0.0 {
        return Vec::new();
    }
    let first = (min / step).ceil() as i64;
    let last = (max / step).floor() as i64;
    (first..=last).map(|i| i as f64 * step).collect()
}

/// Ordinal position scale: the label sequence split over a pixel interval
/// with proportional inner and outer padding.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    labels: Vec<String>,
    step: f32,
    bandwidth: f32,
    offset: f32,
}
impl BandScale {
    pub fn new(labels: Vec<String>, width: f32, padding: f32) -> Self {
        let count = labels.len() as f32;
        let step = if labels.is_empty() {
            0.0
        } else {
            width / (count + padding).max(1.0)
        };
        Self {
            labels,
            step,
            bandwidth: step * (1.0 - padding),
            offset: step * padding,
        }
    }
    /// Left edge of the label's band; `None` for labels outside the domain.
    pub fn position(&self, label: &str) -> Option<f32> {
        self.labels
            .iter()
            .position(|candidate| candidate == label)
            .map(|index| self.offset + index as f32 * self.step)
    }
    pub fn bandwidth(&self) -> f32 {
        self.bandwidth
    }
    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f32, f32),
}
impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f32, f32)) -> Self {
        Self { domain, range }
    }
    /// Linear scale with the domain expanded to nice bounds first.
    pub fn nice(domain: (f64, f64), range: (f32, f32), count: usize) -> Self {
        Self {
            domain: nice_bounds(domain.0, domain.1, count),
            range,
        }
    }
    /// Maps a domain value into the range. A degenerate domain maps every
    /// input to the start of the range.
    pub fn scale(&self, value: f64) -> f32 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return r0;
        }
        let t = (value - d0) / (d1 - d0);
        if !t.is_finite() {
            return r0;
        }
        r0 + (f64::from(r1 - r0) * t) as f32
    }
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks(self.domain.0, self.domain.1, count)
    }
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }
    pub fn range(&self) -> (f32, f32) {
        self.range
    }
}

/// Radius scale with a square-root transform so circle area grows linearly
/// with the value. Output always lies in `[min_radius, max_radius]`; a zero
/// or negative domain maximum clamps everything to `min_radius`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SqrtScale {
    max: f64,
    min_radius: f32,
    max_radius: f32,
}
impl SqrtScale {
    pub fn new(max: f64, min_radius: f32, max_radius: f32) -> Self {
        Self {
            max,
            min_radius,
            max_radius,
        }
    }
    pub fn radius(&self, value: f64) -> f32 {
        if self.max <= 0.0 {
            return self.min_radius;
        }
        let t = (value.max(0.0) / self.max).sqrt().min(1.0);
        self.min_radius + (self.max_radius - self.min_radius) * t as f32
    }
    pub fn min_radius(&self) -> f32 {
        self.min_radius
    }
    pub fn max_radius(&self) -> f32 {
        self.max_radius
    }
}

/// The scale bundle one renderer consumes. The variant mirrors the series
/// the bundle was built from.
#[derive(Debug, Clone, PartialEq)]
pub enum ScaleSet {
    Bar {
        x: BandScale,
        y: LinearScale,
        colour: SequentialScale,
    },
    Donut {
        palette: Palette,
    },
    Bubble {
        x: LinearScale,
        y: LinearScale,
        radius: SqrtScale,
        palette: Palette,
    },
    Map {
        x: BandScale,
        y: LinearScale,
        colour: SequentialScale,
    },
}

/// Builds the scale bundle for a series. `None` for an empty series: scales
/// over empty domains are undefined and callers render the placeholder
/// before ever asking for them.
pub fn build_scales(series: &AggregatedSeries, config: &ChartConfig) -> Option<ScaleSet> {
    if series.is_empty() {
        return None;
    }
    let inner_width = config.inner_width();
    let inner_height = config.inner_height();
    match series {
        AggregatedSeries::SectorIntensity(entries) => {
            let labels = entries.iter().map(|e| e.sector.clone()).collect();
            let max = entries.iter().map(|e| e.avg_intensity).fold(0.0, f64::max);
            Some(ScaleSet::Bar {
                x: BandScale::new(labels, inner_width, config.band_padding),
                y: LinearScale::nice((0.0, max), (inner_height, 0.0), config.tick_count),
                colour: SequentialScale::new(Gradient::Blues, 0.0, max),
            })
        }
        AggregatedSeries::TopicCounts(_) => Some(ScaleSet::Donut {
            palette: Palette::PastelTwelve,
        }),
        AggregatedSeries::ScatterSample(points) => {
            let x_extent = extent(points.iter().map(|p| p.relevance));
            let y_extent = extent(points.iter().map(|p| p.likelihood));
            let max_intensity = points.iter().map(|p| p.intensity).fold(0.0, f64::max);
            Some(ScaleSet::Bubble {
                x: LinearScale::nice(x_extent, (0.0, inner_width), config.tick_count),
                y: LinearScale::nice(y_extent, (inner_height, 0.0), config.tick_count),
                radius: SqrtScale::new(max_intensity, config.min_radius, config.max_radius),
                palette: Palette::CategoryTen,
            })
        }
        AggregatedSeries::CountryCounts(entries) => {
            let labels = entries.iter().map(|e| e.country.clone()).collect();
            let max = entries.iter().map(|e| e.count as f64).fold(0.0, f64::max);
            Some(ScaleSet::Map {
                x: BandScale::new(labels, inner_width, config.band_padding),
                y: LinearScale::nice((0.0, max), (inner_height, 0.0), config.tick_count),
                colour: SequentialScale::new(Gradient::Greens, 0.0, max),
            })
        }
    }
}

fn extent(values: impl Iterator<Item = f64>) -> (f64, f64) {
    match values.minmax() {
        MinMaxResult::NoElements => (0.0, 0.0),
        MinMaxResult::OneElement(value) => (value, value),
        MinMaxResult::MinMax(lo, hi) => (lo, hi),
    }
}
