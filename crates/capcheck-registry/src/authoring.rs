// capcheck-registry/src/authoring.rs
// ============================================================================
// Module: Authoring Formats
// Description: Contract-set source parsing and normalization helpers.
// Purpose: Validate and canonicalize authoring inputs into RFC 8785 JSON.
// Dependencies: capcheck-core, ron, serde_json
// ============================================================================

//! ## Overview
//! This module validates and normalizes contract-set authoring inputs. JSON
//! is the canonical format; RON is accepted for human-friendly authoring and
//! is normalized into canonical JSON (RFC 8785 / JCS). Loading then
//! re-serializing a set reproduces an equivalent set with an identical
//! canonical hash.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::path::Path;

use capcheck_core::ContractSet;
use capcheck_core::HashDigest;
use capcheck_core::MalformedContractError;
use capcheck_core::ScriptSpec;
use capcheck_core::core::hashing::canonical_json_bytes;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Source Formats
// ============================================================================

/// Supported authoring formats for contract sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Canonical JSON authoring format.
    Json,
    /// Human-friendly RON authoring format.
    Ron,
}

impl SourceFormat {
    /// Returns the lowercase label for the format.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Ron => "ron",
        }
    }

    /// Parses a format from a file extension.
    #[must_use]
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "ron" => Some(Self::Ron),
            _ => None,
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.label())
    }
}

/// Detects the authoring format from a file path.
#[must_use]
pub fn detect_format(path: &Path) -> Option<SourceFormat> {
    path.extension().and_then(|extension| extension.to_str()).and_then(SourceFormat::from_extension)
}

// ============================================================================
// SECTION: Loaded Outputs
// ============================================================================

/// Loaded contract set with canonical JSON and hash metadata.
#[derive(Debug, Clone)]
pub struct LoadedContractSet {
    /// Parsed and validated contract set.
    pub set: ContractSet,
    /// Canonical JSON bytes for the set (RFC 8785).
    pub canonical_json: Vec<u8>,
    /// Canonical set hash used for round-trip comparison.
    pub set_hash: HashDigest,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while loading contract sources.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Failed to parse the authoring input.
    #[error("failed to parse {format} input: {error}")]
    Parse {
        /// Format that failed to parse.
        format: SourceFormat,
        /// Underlying parse error message.
        error: String,
    },
    /// Failed to deserialize into core contract types.
    #[error("failed to deserialize contract source: {error}")]
    Deserialize {
        /// Deserialization error details.
        error: String,
    },
    /// Contract-set semantic validation failed.
    #[error("malformed contract set: {0}")]
    Malformed(#[from] MalformedContractError),
    /// Canonical JSON serialization failed.
    #[error("canonicalization failed: {error}")]
    Canonicalization {
        /// Canonicalization error details.
        error: String,
    },
}

// ============================================================================
// SECTION: Public API
// ============================================================================

/// Loads and normalizes a contract-set source.
///
/// # Errors
///
/// Returns [`RegistryError`] when parsing, validation, or canonicalization
/// fails; all load-time errors are fatal to the run.
pub fn load_contract_set(
    input: &str,
    format: SourceFormat,
) -> Result<LoadedContractSet, RegistryError> {
    let value = parse_value(input, format)?;
    let set: ContractSet = serde_json::from_value(value).map_err(|err| {
        RegistryError::Deserialize {
            error: err.to_string(),
        }
    })?;
    set.validate()?;
    let canonical_json =
        canonical_json_bytes(&set).map_err(|err| RegistryError::Canonicalization {
            error: err.to_string(),
        })?;
    let set_hash = set.canonical_hash().map_err(|err| RegistryError::Canonicalization {
        error: err.to_string(),
    })?;
    Ok(LoadedContractSet {
        set,
        canonical_json,
        set_hash,
    })
}

/// Loads a candidate behavior script from a declarative source.
///
/// # Errors
///
/// Returns [`RegistryError`] when parsing or deserialization fails.
pub fn load_script_spec(input: &str, format: SourceFormat) -> Result<ScriptSpec, RegistryError> {
    let value = parse_value(input, format)?;
    serde_json::from_value(value).map_err(|err| RegistryError::Deserialize {
        error: err.to_string(),
    })
}

// ============================================================================
// SECTION: Parsing Helpers
// ============================================================================

/// Parses authoring input into a JSON value.
fn parse_value(input: &str, format: SourceFormat) -> Result<Value, RegistryError> {
    match format {
        SourceFormat::Json => serde_json::from_str(input).map_err(|err| RegistryError::Parse {
            format,
            error: err.to_string(),
        }),
        SourceFormat::Ron => ron::from_str(input).map_err(|err| RegistryError::Parse {
            format,
            error: err.to_string(),
        }),
    }
}
