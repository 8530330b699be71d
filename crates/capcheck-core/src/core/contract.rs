// capcheck-core/src/core/contract.rs
// ============================================================================
// Module: capcheck Contract Specification
// Description: Operation contracts and contract-set structures.
// Purpose: Define canonical contract sets with load-time validation helpers.
// Dependencies: crate::core::{hashing, identifiers, invariant}, serde
// ============================================================================

//! ## Overview
//! A contract set is the declarative description of the capabilities one
//! candidate object type must honor. Sets are validated at load time to
//! enforce invariants such as unique contract names and resolvable invariant
//! step references; a malformed set aborts a run before any contract
//! executes. Contracts are logically independent: declaration order defines
//! report order and nothing else.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::core::hashing::DEFAULT_HASH_ALGORITHM;
use crate::core::hashing::HashDigest;
use crate::core::hashing::HashError;
use crate::core::identifiers::OperationName;
use crate::core::identifiers::SetId;
use crate::core::identifiers::SetVersion;
use crate::core::identifiers::StepName;
use crate::core::invariant::InvariantSpec;

// ============================================================================
// SECTION: Contract Set
// ============================================================================

/// Named, ordered collection of operation contracts for one object type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractSet {
    /// Contract-set identifier.
    pub set_id: SetId,
    /// Contract-set schema version.
    pub version: SetVersion,
    /// Contracts in declaration order; order defines report order.
    pub contracts: Vec<OperationContract>,
}

impl ContractSet {
    /// Computes the canonical hash of the contract set.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::Canonicalization`] when serialization fails.
    pub fn canonical_hash(&self) -> Result<HashDigest, HashError> {
        crate::core::hashing::hash_canonical_json(DEFAULT_HASH_ALGORITHM, self)
    }

    /// Validates the contract-set invariants.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedContractError`] when validation fails.
    pub fn validate(&self) -> Result<(), MalformedContractError> {
        ensure_unique_contract_names(&self.contracts)?;
        for contract in &self.contracts {
            ensure_unique_step_names(contract)?;
            ensure_unique_arities(contract)?;
            ensure_invariant_steps_resolve(contract)?;
        }
        Ok(())
    }

    /// Returns the number of stub contracts in the set.
    #[must_use]
    pub fn stub_count(&self) -> usize {
        self.contracts.iter().filter(|contract| contract.status == ContractStatus::Stub).count()
    }
}

// ============================================================================
// SECTION: Operation Contract
// ============================================================================

/// Execution status of a declared contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractStatus {
    /// The contract is executed by the runner.
    #[default]
    Active,
    /// The contract is declared but never executed; counted for coverage.
    Stub,
}

/// One capability expected of the candidate object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationContract {
    /// Operation name; unique within a set.
    pub name: OperationName,
    /// Accepted argument-count variants, in declaration order.
    pub arities: Vec<usize>,
    /// Ordered setup steps required before invocation.
    #[serde(default)]
    pub preconditions: Vec<PreconditionStep>,
    /// Pass/fail predicate over the return value and post-call state.
    #[serde(default)]
    pub invariant: InvariantSpec,
    /// Execution status of the contract.
    #[serde(default)]
    pub status: ContractStatus,
}

/// One named setup step executed by the candidate factory before invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreconditionStep {
    /// Step name; unique within the contract.
    pub step: StepName,
    /// Operation the factory performs for this step.
    pub op: OperationName,
    /// Optional step parameters forwarded to the factory.
    #[serde(default)]
    pub params: Option<Value>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Contract-set validation errors; all are fatal at load time.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MalformedContractError {
    /// Two contracts in the set share a name.
    #[error("duplicate contract name: {name}")]
    DuplicateContract {
        /// Duplicated contract name.
        name: OperationName,
    },
    /// Two precondition steps in one contract share a name.
    #[error("contract {contract} declares duplicate step: {step}")]
    DuplicateStep {
        /// Contract owning the duplicated step.
        contract: OperationName,
        /// Duplicated step name.
        step: StepName,
    },
    /// A contract declares the same arity twice.
    #[error("contract {contract} declares duplicate arity: {arity}")]
    DuplicateArity {
        /// Contract owning the duplicated arity.
        contract: OperationName,
        /// Duplicated arity value.
        arity: usize,
    },
    /// An invariant references a precondition step the contract never declares.
    #[error("contract {contract} invariant references undeclared step: {step}")]
    UnknownStep {
        /// Contract owning the dangling reference.
        contract: OperationName,
        /// Referenced step name.
        step: StepName,
    },
}

// ============================================================================
// SECTION: Validation Helpers
// ============================================================================

/// Ensures contract names are unique within the set.
fn ensure_unique_contract_names(
    contracts: &[OperationContract],
) -> Result<(), MalformedContractError> {
    let mut seen: Vec<&OperationName> = Vec::with_capacity(contracts.len());
    for contract in contracts {
        if seen.contains(&&contract.name) {
            return Err(MalformedContractError::DuplicateContract {
                name: contract.name.clone(),
            });
        }
        seen.push(&contract.name);
    }
    Ok(())
}

/// Ensures precondition step names are unique within one contract.
fn ensure_unique_step_names(contract: &OperationContract) -> Result<(), MalformedContractError> {
    let mut seen: Vec<&StepName> = Vec::with_capacity(contract.preconditions.len());
    for precondition in &contract.preconditions {
        if seen.contains(&&precondition.step) {
            return Err(MalformedContractError::DuplicateStep {
                contract: contract.name.clone(),
                step: precondition.step.clone(),
            });
        }
        seen.push(&precondition.step);
    }
    Ok(())
}

/// Ensures arity variants are distinct within one contract.
fn ensure_unique_arities(contract: &OperationContract) -> Result<(), MalformedContractError> {
    let mut seen: Vec<usize> = Vec::with_capacity(contract.arities.len());
    for &arity in &contract.arities {
        if seen.contains(&arity) {
            return Err(MalformedContractError::DuplicateArity {
                contract: contract.name.clone(),
                arity,
            });
        }
        seen.push(arity);
    }
    Ok(())
}

/// Ensures invariant step references resolve to declared preconditions.
fn ensure_invariant_steps_resolve(
    contract: &OperationContract,
) -> Result<(), MalformedContractError> {
    let Some(step) = contract.invariant.referenced_step() else {
        return Ok(());
    };
    let declared = contract.preconditions.iter().any(|precondition| &precondition.step == step);
    if declared {
        Ok(())
    } else {
        Err(MalformedContractError::UnknownStep {
            contract: contract.name.clone(),
            step: step.clone(),
        })
    }
}
