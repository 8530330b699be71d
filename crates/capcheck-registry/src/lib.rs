// capcheck-registry/src/lib.rs
// ============================================================================
// Module: capcheck Registry Library
// Description: Declarative contract-source loading and validation.
// Purpose: Turn authored contract sources into validated, canonical sets.
// Dependencies: capcheck-core, ron, serde_json, thiserror
// ============================================================================

//! ## Overview
//! The registry loads contract sets from declarative sources, independent of
//! any candidate implementation. JSON is the canonical format; RON is
//! accepted for human-friendly authoring and normalized into canonical JSON.
//! Loading is fail-fast: a malformed set aborts before any contract can
//! execute. The warning pass is separate and purely advisory.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod authoring;
pub mod examples;
pub mod validate;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use authoring::LoadedContractSet;
pub use authoring::RegistryError;
pub use authoring::SourceFormat;
pub use authoring::detect_format;
pub use authoring::load_contract_set;
pub use authoring::load_script_spec;
pub use validate::ValidationWarning;
pub use validate::validate;
