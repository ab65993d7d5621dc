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

use crate::error::Result;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;
use tracing::debug;

/// One insight entry. Every field is optional: the upstream feed serialises
/// missing values as `null` or `""`, and numeric fields occasionally arrive
/// as quoted strings. The deserialisers normalise all of those to `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default, deserialize_with = "de_opt_text")]
    pub sector: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub topic: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub region: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub pestle: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub source: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub end_year: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "de_opt_number")]
    pub intensity: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_number")]
    pub likelihood: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_number")]
    pub relevance: Option<f64>,
}

/// The full filtered collection for the current query. Replaced wholesale
/// whenever the query changes; never patched incrementally.
pub type RecordSet = Vec<Record>;

impl Record {
    pub fn sector(&self) -> Option<&str> {
        non_blank(self.sector.as_deref())
    }
    pub fn topic(&self) -> Option<&str> {
        non_blank(self.topic.as_deref())
    }
    pub fn country(&self) -> Option<&str> {
        non_blank(self.country.as_deref())
    }
    pub fn region(&self) -> Option<&str> {
        non_blank(self.region.as_deref())
    }
    pub fn pestle(&self) -> Option<&str> {
        non_blank(self.pestle.as_deref())
    }
    pub fn source(&self) -> Option<&str> {
        non_blank(self.source.as_deref())
    }
    pub fn end_year(&self) -> Option<&str> {
        non_blank(self.end_year.as_deref())
    }
    pub fn title(&self) -> Option<&str> {
        non_blank(self.title.as_deref())
    }
    pub fn intensity(&self) -> Option<f64> {
        finite(self.intensity)
    }
    pub fn likelihood(&self) -> Option<f64> {
        finite(self.likelihood)
    }
    pub fn relevance(&self) -> Option<f64> {
        finite(self.relevance)
    }
}

/// A blank or whitespace-only string is missing data, same as an absent key.
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// NaN and infinities are missing data; they never reach a sort or a scale.
fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

pub fn records_from_json_str(json: &str) -> Result<RecordSet> {
    let records: Vec<Record> =
        serde_json::from_str(json).map_err(crate::error::DataError::from)?;
    debug!(records = records.len(), "Decoded record set");
    Ok(records)
}

pub fn records_from_json_slice(json: &[u8]) -> Result<RecordSet> {
    let records: Vec<Record> =
        serde_json::from_slice(json).map_err(crate::error::DataError::from)?;
    debug!(records = records.len(), "Decoded record set");
    Ok(records)
}

pub fn records_from_path(path: &Path) -> Result<RecordSet> {
    let bytes = std::fs::read(path).map_err(|source| crate::error::DataError::DatasetFileError {
        path: path.display().to_string(),
        source,
    })?;
    records_from_json_slice(&bytes)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawField {
    Number(f64),
    Text(String),
}

fn de_opt_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawField>::deserialize(deserializer)?;
    Ok(raw.and_then(|field| match field {
        RawField::Text(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        RawField::Number(n) => {
            if n.fract() == 0.0 && n.is_finite() {
                Some(format!("{}", n as i64))
            } else {
                Some(n.to_string())
            }
        }
    }))
}

fn de_opt_number<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawField>::deserialize(deserializer)?;
    Ok(raw.and_then(|field| match field {
        RawField::Number(n) => Some(n),
        RawField::Text(s) => s.trim().parse::<f64>().ok(),
    }))
}
