// capcheck-core/src/runtime/runner.rs
// ============================================================================
// Module: capcheck Conformance Runner
// Description: Sequential contract execution with classification and deadlines.
// Purpose: Execute active contracts against one candidate factory, producing results.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! The conformance runner is the single canonical execution path for
//! capcheck. Contracts execute sequentially in declaration order; candidate
//! objects are frequently backed by a single shared external resource, so no
//! concurrent invocation happens within one set. Classification is strict:
//! preparation failures and raised invocations are errors, invariant
//! violations are failures, and a contract passes only when every declared
//! arity variant passes.
//!
//! When a deadline is configured, each contract executes on a detached
//! worker thread. A synchronous call that hangs cannot be cancelled
//! in-process; at the deadline the worker is abandoned, the contract is
//! recorded as an error, and execution proceeds. A handle lost to an
//! abandoned worker forces re-preparation for the next contract even under
//! reuse.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::mpsc;
use std::sync::mpsc::RecvTimeoutError;
use std::thread;
use std::time::Duration;
use std::time::Instant;

use crate::core::ContractSet;
use crate::core::ContractStatus;
use crate::core::ExecutionResult;
use crate::core::FailureDetail;
use crate::core::FailurePhase;
use crate::core::MalformedContractError;
use crate::core::OperationContract;
use crate::core::Outcome;
use crate::interfaces::CandidateFactory;
use crate::interfaces::CandidateHandle;
use crate::runtime::invariant::InvariantVerdict;
use crate::runtime::invariant::check_invariant;

// ============================================================================
// SECTION: Runner Options
// ============================================================================

/// Candidate instance lifetime across contracts in one set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Isolation {
    /// Each contract gets a freshly prepared candidate instance.
    #[default]
    Fresh,
    /// One instance is reused across contracts until it is lost.
    Reuse,
}

/// Options controlling one conformance run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunnerOptions {
    /// Halt after the first fail/error and report the rest as skipped.
    pub stop_on_first_failure: bool,
    /// Candidate instance lifetime policy.
    pub isolation: Isolation,
    /// Optional per-contract execution deadline.
    pub timeout: Option<Duration>,
}

// ============================================================================
// SECTION: Conformance Runner
// ============================================================================

/// Executes active contracts from a set against one candidate factory.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConformanceRunner {
    /// Options applied to every run.
    options: RunnerOptions,
}

impl ConformanceRunner {
    /// Creates a runner with the provided options.
    #[must_use]
    pub const fn new(options: RunnerOptions) -> Self {
        Self {
            options,
        }
    }

    /// Returns the active runner options.
    #[must_use]
    pub const fn options(&self) -> &RunnerOptions {
        &self.options
    }

    /// Runs every active contract in declaration order.
    ///
    /// Stub contracts produce no result; skipped contracts (after an early
    /// halt) produce a [`Outcome::Skipped`] result each.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedContractError`] when the set fails validation; no
    /// contract executes in that case.
    pub fn run<F>(
        &self,
        set: &ContractSet,
        factory: &Arc<F>,
    ) -> Result<Vec<ExecutionResult>, MalformedContractError>
    where
        F: CandidateFactory + Send + Sync + 'static,
        F::Handle: Send + 'static,
    {
        set.validate()?;

        let mut results = Vec::with_capacity(set.contracts.len());
        let mut carried: Option<F::Handle> = None;
        let mut halted = false;

        for contract in &set.contracts {
            if contract.status == ContractStatus::Stub {
                continue;
            }
            if halted {
                results.push(ExecutionResult::skipped(contract.name.clone()));
                continue;
            }

            let reused = match self.options.isolation {
                Isolation::Reuse => carried.take(),
                Isolation::Fresh => None,
            };

            let started = Instant::now();
            let (verdict, handle) = self.execute(contract, factory, reused);
            let elapsed_ms =
                u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

            if self.options.isolation == Isolation::Reuse {
                carried = handle;
            }
            if self.options.stop_on_first_failure && verdict.outcome != Outcome::Pass {
                halted = true;
            }

            results.push(ExecutionResult {
                name: contract.name.clone(),
                outcome: verdict.outcome,
                detail: verdict.detail,
                elapsed_ms,
            });
        }

        Ok(results)
    }

    /// Runs several independent sets, one scoped thread per set.
    ///
    /// Sets must not share a mutable external resource; within each set
    /// execution stays sequential. Results are returned in set order.
    ///
    /// # Errors
    ///
    /// Each slot carries [`MalformedContractError`] when that set failed
    /// validation.
    #[must_use = "collect per-set results or handle the errors"]
    pub fn run_sets<F>(
        &self,
        sets: &[ContractSet],
        factory: &Arc<F>,
    ) -> Vec<Result<Vec<ExecutionResult>, MalformedContractError>>
    where
        F: CandidateFactory + Send + Sync + 'static,
        F::Handle: Send + 'static,
    {
        let mut slots: Vec<Option<Result<Vec<ExecutionResult>, MalformedContractError>>> =
            sets.iter().map(|_| None).collect();
        thread::scope(|scope| {
            for (slot, set) in slots.iter_mut().zip(sets) {
                let factory = Arc::clone(factory);
                scope.spawn(move || {
                    *slot = Some(self.run(set, &factory));
                });
            }
        });
        // The scope propagates worker panics, so every slot is filled here.
        slots.into_iter().flatten().collect()
    }

    /// Executes one contract, inline or under a deadline.
    fn execute<F>(
        &self,
        contract: &OperationContract,
        factory: &Arc<F>,
        reused: Option<F::Handle>,
    ) -> (ContractVerdict, Option<F::Handle>)
    where
        F: CandidateFactory + Send + Sync + 'static,
        F::Handle: Send + 'static,
    {
        let Some(deadline) = self.options.timeout else {
            return execute_contract(factory.as_ref(), contract, reused);
        };

        let (sender, receiver) = mpsc::channel();
        let worker_factory = Arc::clone(factory);
        let worker_contract = contract.clone();
        thread::spawn(move || {
            let outcome = execute_contract(worker_factory.as_ref(), &worker_contract, reused);
            let _ = sender.send(outcome);
        });

        match receiver.recv_timeout(deadline) {
            Ok(outcome) => outcome,
            Err(RecvTimeoutError::Timeout) => (
                ContractVerdict::error(
                    FailurePhase::Timeout,
                    None,
                    format!(
                        "contract execution exceeded the {}ms deadline",
                        deadline.as_millis()
                    ),
                ),
                None,
            ),
            Err(RecvTimeoutError::Disconnected) => (
                ContractVerdict::error(
                    FailurePhase::Invocation,
                    None,
                    "candidate worker terminated unexpectedly".to_string(),
                ),
                None,
            ),
        }
    }
}

// ============================================================================
// SECTION: Contract Execution
// ============================================================================

/// Internal classification of one contract execution.
struct ContractVerdict {
    /// Execution outcome.
    outcome: Outcome,
    /// Failure detail for fail/error outcomes.
    detail: Option<FailureDetail>,
}

impl ContractVerdict {
    /// Creates a passing verdict.
    const fn pass() -> Self {
        Self {
            outcome: Outcome::Pass,
            detail: None,
        }
    }

    /// Creates a failing verdict with the violating variant's detail.
    fn fail(arity: Option<usize>, message: String) -> Self {
        Self {
            outcome: Outcome::Fail,
            detail: Some(FailureDetail {
                arity,
                phase: FailurePhase::Invariant,
                message,
            }),
        }
    }

    /// Creates an errored verdict.
    fn error(phase: FailurePhase, arity: Option<usize>, message: String) -> Self {
        Self {
            outcome: Outcome::Error,
            detail: Some(FailureDetail {
                arity,
                phase,
                message,
            }),
        }
    }
}

/// Prepares a candidate (unless one is reused) and invokes every declared
/// arity variant, classifying the first failure encountered.
fn execute_contract<F>(
    factory: &F,
    contract: &OperationContract,
    reused: Option<F::Handle>,
) -> (ContractVerdict, Option<F::Handle>)
where
    F: CandidateFactory,
{
    let mut handle = match reused {
        Some(handle) => handle,
        None => match factory.prepare(&contract.preconditions) {
            Ok(handle) => handle,
            Err(err) => {
                return (
                    ContractVerdict::error(FailurePhase::Preparation, None, err.to_string()),
                    None,
                );
            }
        },
    };

    for &arity in &contract.arities {
        let args = factory.arguments(&contract.name, arity);
        let value = match handle.invoke(&contract.name, &args) {
            Ok(value) => value,
            Err(err) => {
                return (
                    ContractVerdict::error(FailurePhase::Invocation, Some(arity), err.to_string()),
                    Some(handle),
                );
            }
        };
        match check_invariant(&contract.invariant, &value, &handle) {
            Ok(InvariantVerdict::Holds) => {}
            Ok(InvariantVerdict::Violated {
                message,
            }) => return (ContractVerdict::fail(Some(arity), message), Some(handle)),
            Err(err) => {
                return (
                    ContractVerdict::error(FailurePhase::Invariant, Some(arity), err.to_string()),
                    Some(handle),
                );
            }
        }
    }

    (ContractVerdict::pass(), Some(handle))
}
