// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for E2K import and export
//!
//! Only orchestration failures surface as errors. Malformed lines and
//! unresolved references are soft failures recorded in
//! [`ParseDiagnostics`](crate::ParseDiagnostics).

use crate::IdCategory;
use thiserror::Error;

/// Result type alias for codec operations
pub type Result<T> = std::result::Result<T, E2kError>;

/// Errors that abort an import, export or merge
#[derive(Error, Debug)]
pub enum E2kError {
    /// A pipeline stage failed; the whole operation is aborted
    #[error("{stage} stage failed: {source}")]
    Stage {
        stage: &'static str,
        #[source]
        source: Box<E2kError>,
    },

    /// The per-category identifier counter overflowed
    #[error("Identifier space exhausted for {0}")]
    IdSpaceExhausted(IdCategory),

    /// The section injector was driven out of order
    #[error("Injector is in state {actual}, expected {expected}")]
    InjectorState {
        expected: &'static str,
        actual: &'static str,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl E2kError {
    /// Wrap an error with the name of the stage it occurred in
    pub fn in_stage(stage: &'static str, source: E2kError) -> Self {
        E2kError::Stage {
            stage,
            source: Box::new(source),
        }
    }

    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        E2kError::Other(msg.into())
    }
}

/// Extension for attaching stage context to a `Result`
pub trait StageContext<T> {
    fn stage(self, stage: &'static str) -> Result<T>;
}

impl<T> StageContext<T> for Result<T> {
    fn stage(self, stage: &'static str) -> Result<T> {
        self.map_err(|e| E2kError::in_stage(stage, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_context_wraps_source() {
        let failed: Result<()> = Err(E2kError::IdSpaceExhausted(IdCategory::Point));
        let err = failed.stage("points").unwrap_err();
        assert_eq!(
            err.to_string(),
            "points stage failed: Identifier space exhausted for Point"
        );
        assert!(std::error::Error::source(&err).is_some());
    }
}
