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

use thiserror::Error;
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Data error: {0}")]
    Data(#[from] DataError),
    #[error("Chart error: {0}")]
    Chart(#[from] ChartError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Failed to read dataset '{path}': {source}")]
    DatasetFileError {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to decode dataset: {source}")]
    DatasetDecodeError {
        #[from]
        source: serde_json::Error,
    },
}
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Unknown chart kind '{identifier}'")]
    UnknownKind { identifier: String },
}
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed: {reason}")]
    ValidationFailed { reason: String },
}
pub type Result<T> = std::result::Result<T, DashboardError>;
