//! Wire/boundary support for detection result documents.
//!
//! This crate provides the **wire model** and **translation helpers** for the `result.json`
//! document produced by the tooth detection pipeline:
//! - a permissive wire struct mirroring the JSON schema
//! - translation into domain-level [`FindingsData`]
//! - the disease label vocabulary ([`DiseaseKind`])
//!
//! Parsing is lenient by default: absent fields contribute nothing rather than failing. A strict
//! mode is available for callers that prefer malformed findings to be rejected loudly.

pub mod disease;
pub mod result;

// Re-export facades
pub use result::Findings;

// Re-export public domain-level types
pub use disease::DiseaseKind;
pub use result::{Disease, DiseasedTooth, Finding, FindingsData, ParseMode};

/// Errors returned by the `findings` boundary crate.
#[derive(Debug, thiserror::Error)]
pub enum FindingsError {
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("translation error: {0}")]
    Translation(String),

    #[error("invalid finding at diseased_teeth[{index}]: {reason}")]
    InvalidFinding { index: usize, reason: String },
}

/// Type alias for Results that can fail with a [`FindingsError`].
pub type FindingsResult<T> = Result<T, FindingsError>;
