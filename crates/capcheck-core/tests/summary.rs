// capcheck-core/tests/summary.rs
// ============================================================================
// Module: Run Summary Tests
// Description: Tests and properties for summary aggregation and exit codes.
// ============================================================================
//! ## Overview
//! Validates summary counters and the exit-code law: zero iff no contract
//! failed or errored, regardless of stub and skip counts.

#![allow(clippy::unwrap_used, reason = "Tests use unwrap on deterministic fixtures.")]
#![allow(clippy::expect_used, reason = "Tests use expect for explicit failure messages.")]

use capcheck_core::ExecutionResult;
use capcheck_core::OperationName;
use capcheck_core::Outcome;
use capcheck_core::RunSummary;
use proptest::prelude::*;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn result(name: &str, outcome: Outcome) -> ExecutionResult {
    ExecutionResult {
        name: OperationName::from(name),
        outcome,
        detail: None,
        elapsed_ms: 1,
    }
}

// ============================================================================
// SECTION: Aggregation
// ============================================================================

#[test]
fn test_summarize_counts_each_outcome() {
    let results = vec![
        result("position", Outcome::Pass),
        result("pick", Outcome::Fail),
        result("vertex", Outcome::Error),
        result("degrees_of_freedom", Outcome::Skipped),
    ];
    let summary = RunSummary::summarize(&results, 2);

    assert_eq!(summary.passed, 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.errored, 1);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.stubbed, 2);
    assert_eq!(summary.total_declared, 6);
}

#[test]
fn test_stubs_and_skips_do_not_affect_exit_code() {
    let results = vec![result("position", Outcome::Pass), result("pick", Outcome::Skipped)];
    let summary = RunSummary::summarize(&results, 5);
    assert_eq!(summary.exit_code(), 0);
}

#[test]
fn test_single_failure_makes_exit_code_nonzero() {
    let results = vec![result("pick", Outcome::Fail)];
    assert_eq!(RunSummary::summarize(&results, 0).exit_code(), 1);
}

// ============================================================================
// SECTION: Properties
// ============================================================================

/// Strategy producing an arbitrary outcome.
fn outcome_strategy() -> impl Strategy<Value = Outcome> {
    prop_oneof![
        Just(Outcome::Pass),
        Just(Outcome::Fail),
        Just(Outcome::Error),
        Just(Outcome::Skipped),
    ]
}

proptest! {
    /// The exit code is zero exactly when no result failed or errored.
    #[test]
    fn prop_exit_code_matches_failure_presence(
        outcomes in proptest::collection::vec(outcome_strategy(), 0..32),
        stubbed in 0usize..8,
    ) {
        let results: Vec<ExecutionResult> = outcomes
            .iter()
            .enumerate()
            .map(|(index, &outcome)| result(&format!("op-{index}"), outcome))
            .collect();
        let summary = RunSummary::summarize(&results, stubbed);

        let has_failure = outcomes
            .iter()
            .any(|outcome| matches!(outcome, Outcome::Fail | Outcome::Error));
        prop_assert_eq!(summary.exit_code() == 0, !has_failure);
        prop_assert_eq!(summary.total_declared, outcomes.len() + stubbed);
        prop_assert_eq!(
            summary.passed + summary.failed + summary.errored + summary.skipped,
            outcomes.len()
        );
    }
}
