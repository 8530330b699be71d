// capcheck-core/src/core/result.rs
// ============================================================================
// Module: capcheck Execution Results
// Description: Per-contract execution outcomes and failure detail records.
// Purpose: Record what happened to each executed contract, immutably.
// Dependencies: crate::core::identifiers, serde
// ============================================================================

//! ## Overview
//! Every executed (non-stub) contract produces exactly one execution result
//! per run. Results are created fresh each run and never mutated after
//! creation; stub contracts produce no result and are counted separately.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::OperationName;

// ============================================================================
// SECTION: Outcome
// ============================================================================

/// Classification of one contract execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Every arity variant invoked cleanly and the invariant held.
    Pass,
    /// The candidate behaved but the invariant predicate returned false.
    Fail,
    /// An unexpected failure was raised during preparation or invocation.
    Error,
    /// The contract was not executed because a prior failure halted the run.
    Skipped,
}

impl Outcome {
    /// Returns the lowercase label for the outcome.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
            Self::Error => "error",
            Self::Skipped => "skipped",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// SECTION: Failure Detail
// ============================================================================

/// Phase in which a contract execution failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePhase {
    /// The candidate factory could not produce a ready instance.
    Preparation,
    /// The operation invocation raised a failure.
    Invocation,
    /// The invariant predicate was violated or could not be evaluated.
    Invariant,
    /// The contract exceeded its execution deadline.
    Timeout,
}

impl FailurePhase {
    /// Returns the lowercase label for the phase.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Preparation => "preparation",
            Self::Invocation => "invocation",
            Self::Invariant => "invariant",
            Self::Timeout => "timeout",
        }
    }
}

impl fmt::Display for FailurePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Detail attached to a failed or errored result.
///
/// Carries enough context (arity variant, phase, message) to reproduce the
/// failing invocation manually.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureDetail {
    /// Arity variant that failed, when the failure is variant-specific.
    pub arity: Option<usize>,
    /// Phase in which the failure occurred.
    pub phase: FailurePhase,
    /// Human-readable failure message.
    pub message: String,
}

impl fmt::Display for FailureDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.arity {
            Some(arity) => write!(f, "arity {arity}: {}: {}", self.phase, self.message),
            None => write!(f, "{}: {}", self.phase, self.message),
        }
    }
}

// ============================================================================
// SECTION: Execution Result
// ============================================================================

/// Outcome record for one executed contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Contract name.
    pub name: OperationName,
    /// Execution outcome.
    pub outcome: Outcome,
    /// Failure detail for fail/error outcomes.
    pub detail: Option<FailureDetail>,
    /// Wall-clock execution time in milliseconds.
    pub elapsed_ms: u64,
}

impl ExecutionResult {
    /// Creates a skipped result for a contract that never executed.
    #[must_use]
    pub fn skipped(name: OperationName) -> Self {
        Self {
            name,
            outcome: Outcome::Skipped,
            detail: None,
            elapsed_ms: 0,
        }
    }
}
