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

use anyhow::Context;
use oriel::{records_from_path, Record, RecordSet};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::Path;

const SECTORS: [&str; 8] = [
    "Energy",
    "Environment",
    "Government",
    "Aerospace & defence",
    "Manufacturing",
    "Retail",
    "Financial services",
    "Healthcare",
];

const TOPICS: [&str; 12] = [
    "gas", "oil", "consumption", "market", "gdp", "war", "production", "export", "battery",
    "biofuel", "policy", "economy",
];

const REGIONS: [&str; 6] = [
    "Northern America",
    "Central America",
    "Western Europe",
    "Eastern Asia",
    "Southern Asia",
    "Africa",
];

const COUNTRIES: [&str; 10] = [
    "United States of America",
    "Mexico",
    "Nigeria",
    "Lebanon",
    "Russia",
    "Saudi Arabia",
    "India",
    "China",
    "United Kingdom",
    "Brazil",
];

const PESTLES: [&str; 6] = [
    "Industries",
    "Environmental",
    "Political",
    "Economic",
    "Technological",
    "Social",
];

const SOURCES: [&str; 6] = [
    "EIA",
    "Reuters",
    "World Bank",
    "OilPrice.com",
    "Bloomberg Business",
    "CleanTechnica",
];

const TITLE_STEMS: [&str; 5] = [
    "Annual energy outlook projects rising consumption across",
    "New trade agreement reshapes export expectations for",
    "Emerging battery technology shifts the market balance in",
    "Policy revision alters production quotas throughout",
    "Analysts revise GDP growth forecasts following changes in",
];

/// Synthetic feed standing in for the live API. Some records miss a sector
/// or topic, some carry blank countries and a few have no metrics at all,
/// so the missing-data paths in the charts get exercised.
pub fn synthetic_records(count: usize, seed: u64) -> RecordSet {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let sector = pick(&mut rng, &SECTORS, 0.88);
            let topic = pick(&mut rng, &TOPICS, 0.92);
            let country = pick(&mut rng, &COUNTRIES, 0.85);
            let region = pick(&mut rng, &REGIONS, 0.85);
            let pestle = pick(&mut rng, &PESTLES, 0.9);
            let source = pick(&mut rng, &SOURCES, 0.9);
            let title = if rng.gen_bool(0.8) {
                let stem = TITLE_STEMS[rng.gen_range(0..TITLE_STEMS.len())];
                let place = COUNTRIES[rng.gen_range(0..COUNTRIES.len())];
                Some(format!("{stem} {place}"))
            } else {
                None
            };
            let end_year = if rng.gen_bool(0.7) {
                Some(rng.gen_range(2020..2040).to_string())
            } else {
                None
            };
            Record {
                sector,
                topic,
                country,
                region,
                pestle,
                source,
                end_year,
                title,
                intensity: metric(&mut rng, 1.0, 65.0, 0.9),
                likelihood: metric(&mut rng, 1.0, 4.0, 0.85),
                relevance: metric(&mut rng, 1.0, 5.0, 0.85),
            }
        })
        .collect()
}

fn pick(rng: &mut StdRng, pool: &[&str], keep: f64) -> Option<String> {
    if rng.gen_bool(keep) {
        Some(pool[rng.gen_range(0..pool.len())].to_string())
    } else {
        None
    }
}

fn metric(rng: &mut StdRng, low: f64, high: f64, keep: f64) -> Option<f64> {
    if rng.gen_bool(keep) {
        Some(rng.gen_range(low..high).round())
    } else {
        None
    }
}

/// Loads a JSON array of records from disk.
pub fn load_records(path: &Path) -> anyhow::Result<RecordSet> {
    records_from_path(path).with_context(|| format!("loading records from {}", path.display()))
}
