// capcheck-core/src/core/mod.rs
// ============================================================================
// Module: capcheck Core Types
// Description: Canonical contract schema and execution record structures.
// Purpose: Provide stable, serializable types for contract sets and run results.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Core types define operation contracts, invariant expressions, execution
//! results, and run summaries. These types are the canonical source of truth
//! for any derived surfaces (registry loading, CLI output).

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod contract;
pub mod hashing;
pub mod identifiers;
pub mod invariant;
pub mod result;
pub mod summary;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use contract::ContractSet;
pub use contract::ContractStatus;
pub use contract::MalformedContractError;
pub use contract::OperationContract;
pub use contract::PreconditionStep;
pub use hashing::DEFAULT_HASH_ALGORITHM;
pub use hashing::HashAlgorithm;
pub use hashing::HashDigest;
pub use hashing::HashError;
pub use identifiers::OperationName;
pub use identifiers::ProbeQuery;
pub use identifiers::SetId;
pub use identifiers::SetVersion;
pub use identifiers::StepName;
pub use invariant::InvariantParseError;
pub use invariant::InvariantSpec;
pub use result::ExecutionResult;
pub use result::FailureDetail;
pub use result::FailurePhase;
pub use result::Outcome;
pub use summary::RunSummary;
