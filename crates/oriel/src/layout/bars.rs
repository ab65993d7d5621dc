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
use crate::aggregate::SectorIntensityEntry;
use crate::colour::SequentialScale;
use crate::config::ChartConfig;
use crate::interaction::ChartDatum;
use crate::scale::{BandScale, LinearScale};
use crate::scene::{ElementId, Shape};

/// Sector intensity bars: one rounded rect per sector, Blues fill deepening
/// with the mean, growing up out of the axis baseline. Hover changes no
/// geometry, it only raises the tooltip.
pub(super) fn build(
    entries: &[SectorIntensityEntry],
    x: &BandScale,
    y: &LinearScale,
    colour: &SequentialScale,
    config: &ChartConfig,
) -> ChartLayout {
    let margins = config.margins;
    let baseline = margins.top + config.inner_height();
    let mut elements = Vec::with_capacity(entries.len());
    for entry in entries {
        let Some(position) = x.position(&entry.sector) else {
            continue;
        };
        let top = margins.top + y.scale(entry.avg_intensity);
        elements.push(ChartElement {
            id: ElementId(elements.len()),
            shape: Shape::Rect {
                x: margins.left + position,
                y: top,
                width: x.bandwidth(),
                height: (baseline - top).max(0.0),
                corner_radius: config.corner_radius,
                fill: colour.colour(entry.avg_intensity),
                opacity: 1.0,
            },
            enter: EnterAnimation::GrowFromBaseline { baseline },
            hover: HoverStyle::default(),
            datum: ChartDatum::Sector(entry.clone()),
        });
    }
    let mut chrome = axis::left_linear_axis(y, margins);
    chrome.extend(axis::bottom_band_axis(
        x,
        margins,
        config.inner_width(),
        config.inner_height(),
        None,
    ));
    ChartLayout {
        width: config.width,
        height: config.height,
        chrome,
        elements,
        annotations: Vec::new(),
    }
}
