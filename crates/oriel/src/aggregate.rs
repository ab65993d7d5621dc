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

use crate::config::bounds;
use crate::error::ChartError;
use crate::record::Record;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartKind {
    SectorIntensity,
    TopicCounts,
    ScatterSample,
    CountryCounts,
}
impl ChartKind {
    pub const ALL: [ChartKind; 4] = [
        ChartKind::SectorIntensity,
        ChartKind::TopicCounts,
        ChartKind::ScatterSample,
        ChartKind::CountryCounts,
    ];
    pub fn identifier(self) -> &'static str {
        match self {
            ChartKind::SectorIntensity => "sector-intensity",
            ChartKind::TopicCounts => "topic-counts",
            ChartKind::ScatterSample => "scatter-sample",
            ChartKind::CountryCounts => "country-counts",
        }
    }
}
impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}
impl FromStr for ChartKind {
    type Err = ChartError;
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "sector-intensity" => Ok(ChartKind::SectorIntensity),
            "topic-counts" => Ok(ChartKind::TopicCounts),
            "scatter-sample" => Ok(ChartKind::ScatterSample),
            "country-counts" => Ok(ChartKind::CountryCounts),
            other => Err(ChartError::UnknownKind {
                identifier: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorIntensityEntry {
    pub sector: String,
    pub avg_intensity: f64,
}
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicCountEntry {
    pub topic: String,
    pub count: usize,
}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub relevance: f64,
    pub likelihood: f64,
    pub intensity: f64,
    pub sector: Option<String>,
    pub title: Option<String>,
}
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryCountEntry {
    pub country: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AggregatedSeries {
    SectorIntensity(Vec<SectorIntensityEntry>),
    TopicCounts(Vec<TopicCountEntry>),
    ScatterSample(Vec<ScatterPoint>),
    CountryCounts(Vec<CountryCountEntry>),
}
impl AggregatedSeries {
    pub fn kind(&self) -> ChartKind {
        match self {
            AggregatedSeries::SectorIntensity(_) => ChartKind::SectorIntensity,
            AggregatedSeries::TopicCounts(_) => ChartKind::TopicCounts,
            AggregatedSeries::ScatterSample(_) => ChartKind::ScatterSample,
            AggregatedSeries::CountryCounts(_) => ChartKind::CountryCounts,
        }
    }
    pub fn len(&self) -> usize {
        match self {
            AggregatedSeries::SectorIntensity(entries) => entries.len(),
            AggregatedSeries::TopicCounts(entries) => entries.len(),
            AggregatedSeries::ScatterSample(points) => points.len(),
            AggregatedSeries::CountryCounts(entries) => entries.len(),
        }
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Reduces a record set to the series one chart consumes. Total over any
/// input: records missing a required field are excluded, never defaulted.
pub fn aggregate(records: &[Record], kind: ChartKind) -> AggregatedSeries {
    let series = match kind {
        ChartKind::SectorIntensity => {
            AggregatedSeries::SectorIntensity(sector_intensity(records))
        }
        ChartKind::TopicCounts => AggregatedSeries::TopicCounts(topic_counts(records)),
        ChartKind::ScatterSample => AggregatedSeries::ScatterSample(scatter_sample(records)),
        ChartKind::CountryCounts => AggregatedSeries::CountryCounts(country_counts(records)),
    };
    debug!(
        kind = %kind,
        records = records.len(),
        entries = series.len(),
        "Aggregated record set"
    );
    series
}

/// Mean intensity per sector, descending, top 10. Groups are accumulated in
/// first-occurrence order so the stable sort resolves ties by appearance.
pub fn sector_intensity(records: &[Record]) -> Vec<SectorIntensityEntry> {
    let mut groups: IndexMap<&str, (f64, usize)> = IndexMap::new();
    for record in records {
        if let (Some(sector), Some(intensity)) = (record.sector(), record.intensity()) {
            let slot = groups.entry(sector).or_insert((0.0, 0));
            slot.0 += intensity;
            slot.1 += 1;
        }
    }
    let mut entries: Vec<SectorIntensityEntry> = groups
        .into_iter()
        .map(|(sector, (sum, samples))| SectorIntensityEntry {
            sector: sector.to_string(),
            avg_intensity: sum / samples as f64,
        })
        .collect();
    entries.sort_by(|a, b| {
        b.avg_intensity
            .partial_cmp(&a.avg_intensity)
            .unwrap_or(Ordering::Equal)
    });
    entries.truncate(bounds::SECTOR_TOP_N);
    entries
}

/// Record count per topic, descending, top 10.
pub fn topic_counts(records: &[Record]) -> Vec<TopicCountEntry> {
    let mut groups: IndexMap<&str, usize> = IndexMap::new();
    for record in records {
        if let Some(topic) = record.topic() {
            *groups.entry(topic).or_insert(0) += 1;
        }
    }
    let mut entries: Vec<TopicCountEntry> = groups
        .into_iter()
        .map(|(topic, count)| TopicCountEntry {
            topic: topic.to_string(),
            count,
        })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries.truncate(bounds::TOPIC_TOP_N);
    entries
}

/// First 50 records carrying positive relevance and likelihood plus an
/// intensity, in input order. No re-sort: the sample mirrors the feed.
pub fn scatter_sample(records: &[Record]) -> Vec<ScatterPoint> {
    records
        .iter()
        .filter_map(|record| {
            let relevance = record.relevance().filter(|v| *v > 0.0)?;
            let likelihood = record.likelihood().filter(|v| *v > 0.0)?;
            let intensity = record.intensity()?;
            Some(ScatterPoint {
                relevance,
                likelihood,
                intensity,
                sector: record.sector().map(str::to_string),
                title: record.title().map(str::to_string),
            })
        })
        .take(bounds::SCATTER_SAMPLE_MAX)
        .collect()
}

/// Record count per country, descending, top 15.
pub fn country_counts(records: &[Record]) -> Vec<CountryCountEntry> {
    let mut groups: IndexMap<&str, usize> = IndexMap::new();
    for record in records {
        if let Some(country) = record.country() {
            *groups.entry(country).or_insert(0) += 1;
        }
    }
    let mut entries: Vec<CountryCountEntry> = groups
        .into_iter()
        .map(|(country, count)| CountryCountEntry {
            country: country.to_string(),
            count,
        })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries.truncate(bounds::COUNTRY_TOP_N);
    entries
}
