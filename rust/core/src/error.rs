// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for parameter model operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building or validating the house parameter model
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Degenerate polygon: {0}")]
    DegeneratePolygon(String),

    #[error("Duplicate consecutive point at index {index} ({x:.4}, {z:.4})")]
    DuplicatePoint { index: usize, x: f64, z: f64 },

    #[error("Invalid facade profile: {0}")]
    InvalidProfile(String),

    #[error("Malformed sill parameters: {0}")]
    MalformedSill(String),

    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

impl Error {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
