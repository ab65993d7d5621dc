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

use oriel::{records_from_json_str, records_from_path, DashboardError, DataError, Record};

#[test]
fn test_decode_normalises_blank_and_quoted_values() {
    let json = r#"[
        {
            "sector": "Energy",
            "topic": "",
            "country": "  ",
            "intensity": 6,
            "likelihood": "6",
            "relevance": "  8 "
        },
        {
            "sector": null,
            "intensity": null,
            "likelihood": "not a number",
            "relevance": ""
        }
    ]"#;
    let records = records_from_json_str(json).unwrap();
    assert_eq!(records.len(), 2);

    let first = &records[0];
    assert_eq!(first.sector(), Some("Energy"));
    assert_eq!(first.topic(), None, "empty strings read as missing");
    assert_eq!(first.country(), None, "whitespace reads as missing");
    assert_eq!(first.intensity(), Some(6.0));
    assert_eq!(first.likelihood(), Some(6.0), "quoted numbers still parse");
    assert_eq!(first.relevance(), Some(8.0), "padding around digits is fine");

    let second = &records[1];
    assert_eq!(second.sector(), None);
    assert_eq!(second.intensity(), None);
    assert_eq!(second.likelihood(), None, "garbage text is missing, not an error");
    assert_eq!(second.relevance(), None);
}

#[test]
fn test_decode_turns_year_numbers_into_text() {
    let json = r#"[
        { "end_year": 2018 },
        { "end_year": "2022" },
        { "end_year": 2018.5 },
        { "end_year": "" }
    ]"#;
    let records = records_from_json_str(json).unwrap();
    assert_eq!(records[0].end_year(), Some("2018"));
    assert_eq!(records[1].end_year(), Some("2022"));
    assert_eq!(records[2].end_year(), Some("2018.5"));
    assert_eq!(records[3].end_year(), None);
}

#[test]
fn test_decode_ignores_unknown_keys() {
    // Production feeds carry plenty of keys the charts never read.
    let json = r#"[{
        "end_year": "",
        "intensity": 6,
        "sector": "Energy",
        "topic": "gas",
        "insight": "Annual Energy Outlook",
        "url": "http://www.example.com/outlook",
        "region": "Northern America",
        "start_year": "",
        "impact": "",
        "added": "January, 20 2017 03:51:25",
        "published": "January, 09 2017 00:00:00",
        "country": "United States of America",
        "relevance": 2,
        "pestle": "Industries",
        "source": "EIA",
        "title": "U.S. natural gas consumption is expected to increase",
        "likelihood": 3
    }]"#;
    let records = records_from_json_str(json).unwrap();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.sector(), Some("Energy"));
    assert_eq!(record.topic(), Some("gas"));
    assert_eq!(record.country(), Some("United States of America"));
    assert_eq!(record.pestle(), Some("Industries"));
    assert_eq!(record.source(), Some("EIA"));
    assert_eq!(record.intensity(), Some(6.0));
    assert_eq!(record.relevance(), Some(2.0));
    assert_eq!(record.likelihood(), Some(3.0));
}

#[test]
fn test_accessors_guard_hand_built_records_too() {
    let record = Record {
        sector: Some("   ".to_string()),
        topic: Some(" oil ".to_string()),
        intensity: Some(f64::NAN),
        likelihood: Some(f64::INFINITY),
        relevance: Some(4.0),
        ..Record::default()
    };
    assert_eq!(record.sector(), None);
    assert_eq!(record.topic(), Some("oil"), "accessors trim what they return");
    assert_eq!(record.intensity(), None, "NaN never reaches a sort");
    assert_eq!(record.likelihood(), None);
    assert_eq!(record.relevance(), Some(4.0));
}

#[test]
fn test_malformed_json_reports_a_decode_error() {
    let outcome = records_from_json_str("[{not json");
    assert!(matches!(
        outcome,
        Err(DashboardError::Data(DataError::DatasetDecodeError { .. }))
    ));
}

#[test]
fn test_records_from_path_round_trips_through_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("insights.json");
    std::fs::write(
        &path,
        r#"[{ "sector": "Retail", "intensity": "12" }]"#,
    )
    .unwrap();
    let records = records_from_path(&path).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].sector(), Some("Retail"));
    assert_eq!(records[0].intensity(), Some(12.0));
}

#[test]
fn test_missing_dataset_file_reports_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nowhere.json");
    let outcome = records_from_path(&path);
    let Err(DashboardError::Data(DataError::DatasetFileError { path: reported, .. })) = outcome
    else {
        panic!("missing files must surface as dataset file errors");
    };
    assert!(reported.ends_with("nowhere.json"));
}

#[test]
fn test_empty_array_decodes_to_an_empty_set() {
    assert!(records_from_json_str("[]").unwrap().is_empty());
}
