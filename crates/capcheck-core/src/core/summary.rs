// capcheck-core/src/core/summary.rs
// ============================================================================
// Module: capcheck Run Summaries
// Description: Aggregated run counters and exit-code semantics.
// Purpose: Fold execution results into a CI-friendly summary.
// Dependencies: crate::core::result, serde
// ============================================================================

//! ## Overview
//! A run summary aggregates execution results plus the stub count into the
//! counters a caller needs for reporting and exit signaling. Stub contracts
//! represent deliberately unimplemented coverage and never affect the exit
//! code; only failed or errored contracts do.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::result::ExecutionResult;
use crate::core::result::Outcome;

// ============================================================================
// SECTION: Run Summary
// ============================================================================

/// Aggregated counters for one conformance run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Contracts whose every arity variant passed.
    pub passed: usize,
    /// Contracts whose invariant was violated.
    pub failed: usize,
    /// Contracts that raised an unexpected failure or timed out.
    pub errored: usize,
    /// Contracts skipped after an early halt.
    pub skipped: usize,
    /// Declared stub contracts, never executed.
    pub stubbed: usize,
    /// Total declared contracts (executed, skipped, and stubbed).
    pub total_declared: usize,
}

impl RunSummary {
    /// Aggregates execution results and the stub count into a summary.
    #[must_use]
    pub fn summarize(results: &[ExecutionResult], stubbed: usize) -> Self {
        let mut summary = Self {
            passed: 0,
            failed: 0,
            errored: 0,
            skipped: 0,
            stubbed,
            total_declared: results.len() + stubbed,
        };
        for result in results {
            match result.outcome {
                Outcome::Pass => summary.passed += 1,
                Outcome::Fail => summary.failed += 1,
                Outcome::Error => summary.errored += 1,
                Outcome::Skipped => summary.skipped += 1,
            }
        }
        summary
    }

    /// Returns true when no contract failed or errored.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.failed == 0 && self.errored == 0
    }

    /// Returns the process exit code for the run: 0 iff no fail and no error.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        if self.is_success() { 0 } else { 1 }
    }
}
