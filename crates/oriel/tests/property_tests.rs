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

use oriel::config::bounds;
use oriel::scale::{nice_bounds, ticks, BandScale, SqrtScale};
use oriel::{aggregate, AggregatedSeries, ChartKind, Palette, Record};
use proptest::prelude::*;

const SECTOR_POOL: [&str; 6] = ["Energy", "Retail", "Aerospace", "Financial", "Water", ""];
const TOPIC_POOL: [&str; 6] = ["oil", "gas", "market", "growth", "gdp", "  "];
const COUNTRY_POOL: [&str; 5] = ["United States", "India", "Mexico", "Brazil", "China"];

fn arb_label(pool: &'static [&'static str]) -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        1 => Just(None),
        4 => prop::sample::select(pool).prop_map(|label| Some(label.to_string())),
    ]
}

fn arb_metric() -> impl Strategy<Value = Option<f64>> {
    prop_oneof![
        1 => Just(None),
        1 => Just(Some(f64::NAN)),
        6 => (0.0f64..50.0).prop_map(Some),
    ]
}

fn arb_record() -> impl Strategy<Value = Record> {
    (
        arb_label(&SECTOR_POOL),
        arb_label(&TOPIC_POOL),
        arb_label(&COUNTRY_POOL),
        arb_metric(),
        arb_metric(),
        arb_metric(),
    )
        .prop_map(
            |(sector, topic, country, intensity, likelihood, relevance)| Record {
                sector,
                topic,
                country,
                intensity,
                likelihood,
                relevance,
                ..Record::default()
            },
        )
}

proptest! {
    #[test]
    fn proptest_series_never_exceed_their_caps(
        records in prop::collection::vec(arb_record(), 0..200)
    ) {
        prop_assert!(
            aggregate(&records, ChartKind::SectorIntensity).len() <= bounds::SECTOR_TOP_N
        );
        prop_assert!(aggregate(&records, ChartKind::TopicCounts).len() <= bounds::TOPIC_TOP_N);
        prop_assert!(
            aggregate(&records, ChartKind::ScatterSample).len() <= bounds::SCATTER_SAMPLE_MAX
        );
        prop_assert!(
            aggregate(&records, ChartKind::CountryCounts).len() <= bounds::COUNTRY_TOP_N
        );
    }

    #[test]
    fn proptest_ranked_series_sort_non_increasing(
        records in prop::collection::vec(arb_record(), 0..150)
    ) {
        let AggregatedSeries::SectorIntensity(sectors) =
            aggregate(&records, ChartKind::SectorIntensity)
        else {
            panic!("kind and variant must agree");
        };
        for pair in sectors.windows(2) {
            prop_assert!(pair[0].avg_intensity >= pair[1].avg_intensity);
        }

        let AggregatedSeries::TopicCounts(topics) = aggregate(&records, ChartKind::TopicCounts)
        else {
            panic!("kind and variant must agree");
        };
        for pair in topics.windows(2) {
            prop_assert!(pair[0].count >= pair[1].count);
        }

        let AggregatedSeries::CountryCounts(countries) =
            aggregate(&records, ChartKind::CountryCounts)
        else {
            panic!("kind and variant must agree");
        };
        for pair in countries.windows(2) {
            prop_assert!(pair[0].count >= pair[1].count);
        }
    }

    #[test]
    fn proptest_aggregation_is_deterministic(
        records in prop::collection::vec(arb_record(), 0..150)
    ) {
        for kind in ChartKind::ALL {
            prop_assert_eq!(aggregate(&records, kind), aggregate(&records, kind));
        }
    }

    #[test]
    fn proptest_scatter_mirrors_qualifying_records_in_feed_order(
        records in prop::collection::vec(arb_record(), 0..120)
    ) {
        let AggregatedSeries::ScatterSample(points) =
            aggregate(&records, ChartKind::ScatterSample)
        else {
            panic!("kind and variant must agree");
        };
        let expected: Vec<(f64, f64, f64)> = records
            .iter()
            .filter_map(|record| {
                let relevance = record.relevance().filter(|v| *v > 0.0)?;
                let likelihood = record.likelihood().filter(|v| *v > 0.0)?;
                let intensity = record.intensity()?;
                Some((relevance, likelihood, intensity))
            })
            .take(bounds::SCATTER_SAMPLE_MAX)
            .collect();
        let actual: Vec<(f64, f64, f64)> = points
            .iter()
            .map(|point| (point.relevance, point.likelihood, point.intensity))
            .collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn proptest_sqrt_radius_stays_inside_the_configured_band(
        max in 0.1f64..10_000.0,
        values in prop::collection::vec(0.0f64..10_000.0, 1..40)
    ) {
        let scale = SqrtScale::new(max, 3.0, 20.0);
        for value in &values {
            let radius = scale.radius(*value);
            prop_assert!((3.0..=20.0).contains(&radius), "radius {radius} out of band");
        }
    }

    #[test]
    fn proptest_sqrt_radius_is_monotone(
        max in 1.0f64..1_000.0,
        mut values in prop::collection::vec(0.0f64..1_000.0, 2..30)
    ) {
        let scale = SqrtScale::new(max, 3.0, 20.0);
        values.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let radii: Vec<f32> = values.iter().map(|v| scale.radius(*v)).collect();
        for pair in radii.windows(2) {
            prop_assert!(pair[0] <= pair[1]);
        }
    }

    #[test]
    fn proptest_palette_assignment_is_stable(
        labels in prop::collection::vec("[A-Za-z][A-Za-z ]{0,11}", 1..20)
    ) {
        let assigned: Vec<_> = labels
            .iter()
            .map(|label| Palette::CategoryTen.colour_for(label))
            .collect();
        // Same label, same colour, regardless of what else was coloured.
        for (label, colour) in labels.iter().zip(&assigned) {
            prop_assert_eq!(Palette::CategoryTen.colour_for(label), *colour);
        }
    }

    #[test]
    fn proptest_ticks_are_sorted_and_stay_inside_the_domain(
        max in 0.5f64..10_000.0,
        count in 2usize..12
    ) {
        let marks = ticks(0.0, max, count);
        prop_assert!(!marks.is_empty());
        prop_assert!(marks[0] >= 0.0);
        prop_assert!(*marks.last().unwrap() <= max * (1.0 + 1e-9));
        for pair in marks.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn proptest_nice_bounds_cover_the_raw_extent(
        max in 0.5f64..10_000.0,
        count in 2usize..12
    ) {
        let (lo, hi) = nice_bounds(0.0, max, count);
        prop_assert_eq!(lo, 0.0);
        prop_assert!(hi >= max * (1.0 - 1e-9));
    }

    #[test]
    fn proptest_band_positions_stay_inside_the_span(
        labels in prop::collection::hash_set("[a-z]{1,8}", 1..12),
        width in 50.0f32..800.0
    ) {
        let labels: Vec<String> = labels.into_iter().collect();
        let scale = BandScale::new(labels.clone(), width, 0.2);
        for label in &labels {
            let position = scale.position(label).unwrap();
            prop_assert!(position >= 0.0);
            prop_assert!(position + scale.bandwidth() <= width + 1e-2);
        }
        prop_assert!(scale.position("not-in-the-domain").is_none());
    }
}
