// capcheck-core/tests/runner.rs
// ============================================================================
// Module: Conformance Runner Tests
// Description: Tests for contract execution, classification, and halting.
// ============================================================================
//! ## Overview
//! Validates runner classification semantics: pass/fail/error outcomes, stub
//! accounting, preparation failures, arity variants, halting, and isolation.

#![allow(clippy::unwrap_used, reason = "Tests use unwrap on deterministic fixtures.")]
#![allow(clippy::expect_used, reason = "Tests use expect for explicit failure messages.")]

use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use capcheck_core::CandidateFactory;
use capcheck_core::CandidateHandle;
use capcheck_core::ConformanceRunner;
use capcheck_core::ContractSet;
use capcheck_core::ContractStatus;
use capcheck_core::FailurePhase;
use capcheck_core::InvariantSpec;
use capcheck_core::InvokeError;
use capcheck_core::Isolation;
use capcheck_core::OperationContract;
use capcheck_core::OperationName;
use capcheck_core::Outcome;
use capcheck_core::PreconditionStep;
use capcheck_core::PreparationError;
use capcheck_core::ProbeQuery;
use capcheck_core::RunSummary;
use capcheck_core::RunnerOptions;
use capcheck_core::ScriptSpec;
use capcheck_core::ScriptedFactory;
use capcheck_core::SetId;
use capcheck_core::SetVersion;
use capcheck_core::StepName;
use capcheck_core::runtime::Behavior;
use capcheck_core::runtime::FlagAssignment;
use capcheck_core::runtime::OperationScript;
use capcheck_core::runtime::PrepareScript;
use serde_json::Value;
use serde_json::json;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn contract(name: &str, arities: &[usize], invariant: &str) -> OperationContract {
    OperationContract {
        name: OperationName::from(name),
        arities: arities.to_vec(),
        preconditions: Vec::new(),
        invariant: InvariantSpec::parse(invariant).expect("invariant"),
        status: ContractStatus::Active,
    }
}

fn set_of(contracts: Vec<OperationContract>) -> ContractSet {
    ContractSet {
        set_id: SetId::from("probe"),
        version: SetVersion::from("1"),
        contracts,
    }
}

fn returning(operation: &str, value: Value) -> OperationScript {
    OperationScript {
        operation: operation.into(),
        behavior: Behavior::Return {
            value,
        },
        sets: Vec::new(),
        notices: Vec::new(),
    }
}

fn raising(operation: &str, message: &str) -> OperationScript {
    OperationScript {
        operation: operation.into(),
        behavior: Behavior::Raise {
            message: message.to_string(),
        },
        sets: Vec::new(),
        notices: Vec::new(),
    }
}

// ============================================================================
// SECTION: Scenario Coverage
// ============================================================================

/// One active no-failure contract over a well-behaved candidate passes.
#[test]
fn test_position_contract_passes() {
    let set = set_of(vec![contract("position", &[0], "no_failure")]);
    let factory = Arc::new(ScriptedFactory::new(ScriptSpec {
        operations: vec![returning("position", json!([10, 20, 30]))],
        prepare: None,
        strict: false,
    }));

    let results = ConformanceRunner::default().run(&set, &factory).expect("run");
    let summary = RunSummary::summarize(&results, set.stub_count());

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].outcome, Outcome::Pass);
    assert_eq!(summary.passed, 1);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.errored, 0);
    assert_eq!(summary.exit_code(), 0);
}

/// A raised invocation is classified as an error, not a failure.
#[test]
fn test_raised_invocation_is_an_error() {
    let set = set_of(vec![contract("position", &[0], "no_failure")]);
    let factory = Arc::new(ScriptedFactory::new(ScriptSpec {
        operations: vec![raising("position", "host rejected the call")],
        prepare: None,
        strict: false,
    }));

    let results = ConformanceRunner::default().run(&set, &factory).expect("run");
    let summary = RunSummary::summarize(&results, set.stub_count());

    assert_eq!(results[0].outcome, Outcome::Error);
    let detail = results[0].detail.as_ref().expect("detail");
    assert_eq!(detail.phase, FailurePhase::Invocation);
    assert_eq!(summary.passed, 0);
    assert_eq!(summary.errored, 1);
    assert_eq!(summary.exit_code(), 1);
}

/// Stub contracts produce no result and never affect the exit code.
#[test]
fn test_stub_contract_produces_no_result() {
    let mut stub = contract("transform", &[1], "no_failure");
    stub.status = ContractStatus::Stub;
    let set = set_of(vec![stub]);
    let factory = Arc::new(ScriptedFactory::new(ScriptSpec::default()));

    let results = ConformanceRunner::default().run(&set, &factory).expect("run");
    let summary = RunSummary::summarize(&results, set.stub_count());

    assert!(results.is_empty());
    assert_eq!(summary.stubbed, 1);
    assert_eq!(summary.total_declared, 1);
    assert_eq!(summary.exit_code(), 0);
}

/// A multi-arity contract fails when one variant's invariant is violated,
/// and the detail references the failing variant.
#[test]
fn test_multi_arity_failure_records_failing_variant() {
    let set = set_of(vec![contract("pick", &[2, 3], "returns_value")]);
    let factory = Arc::new(ArityFactory);

    let results = ConformanceRunner::default().run(&set, &factory).expect("run");

    assert_eq!(results[0].outcome, Outcome::Fail);
    let detail = results[0].detail.as_ref().expect("detail");
    assert_eq!(detail.arity, Some(3));
    assert_eq!(detail.phase, FailurePhase::Invariant);
}

/// Factory returning a value for two-argument calls and null otherwise.
struct ArityFactory;

/// Handle produced by [`ArityFactory`].
struct ArityCandidate;

impl CandidateFactory for ArityFactory {
    type Handle = ArityCandidate;

    fn prepare(&self, _preconditions: &[PreconditionStep]) -> Result<ArityCandidate, PreparationError> {
        Ok(ArityCandidate)
    }
}

impl CandidateHandle for ArityCandidate {
    fn invoke(&mut self, _operation: &OperationName, args: &[Value]) -> Result<Value, InvokeError> {
        if args.len() == 2 { Ok(json!("picked")) } else { Ok(Value::Null) }
    }

    fn probe(&self, _query: &ProbeQuery) -> Result<bool, InvokeError> {
        Ok(false)
    }

    fn step_product(&self, _step: &StepName) -> Option<Value> {
        None
    }
}

// ============================================================================
// SECTION: Preparation Failures
// ============================================================================

/// A preparation failure is always an error, never a contract failure.
#[test]
fn test_prepare_failure_is_classified_as_error() {
    let set = set_of(vec![contract("pick", &[2], "state:valid?=true")]);
    let factory = Arc::new(ScriptedFactory::new(ScriptSpec {
        operations: Vec::new(),
        prepare: Some(PrepareScript::Fail {
            message: "no active view".to_string(),
        }),
        strict: false,
    }));

    let results = ConformanceRunner::default().run(&set, &factory).expect("run");

    assert_eq!(results[0].outcome, Outcome::Error);
    let detail = results[0].detail.as_ref().expect("detail");
    assert_eq!(detail.phase, FailurePhase::Preparation);
}

/// A raised precondition step surfaces as a preparation error.
#[test]
fn test_raised_precondition_step_is_a_preparation_error() {
    let mut entry = contract("pick", &[2], "no_failure");
    entry.preconditions = vec![PreconditionStep {
        step: StepName::from("place"),
        op: OperationName::from("position_instance"),
        params: None,
    }];
    let set = set_of(vec![entry]);
    let factory = Arc::new(ScriptedFactory::new(ScriptSpec {
        operations: vec![raising("position_instance", "cannot place instance")],
        prepare: None,
        strict: false,
    }));

    let results = ConformanceRunner::default().run(&set, &factory).expect("run");

    assert_eq!(results[0].outcome, Outcome::Error);
    assert_eq!(results[0].detail.as_ref().expect("detail").phase, FailurePhase::Preparation);
}

// ============================================================================
// SECTION: State Invariants
// ============================================================================

/// A state invariant passes once the operation flips the probed flag.
#[test]
fn test_state_invariant_after_successful_pick() {
    let set = set_of(vec![contract("pick", &[2], "state:valid?=true")]);
    let factory = Arc::new(ScriptedFactory::new(ScriptSpec {
        operations: vec![OperationScript {
            operation: "pick".into(),
            behavior: Behavior::Return {
                value: json!([0, 0, 0]),
            },
            sets: vec![FlagAssignment {
                query: ProbeQuery::from("valid?"),
                value: true,
            }],
            notices: Vec::new(),
        }],
        prepare: None,
        strict: false,
    }));

    let results = ConformanceRunner::default().run(&set, &factory).expect("run");
    assert_eq!(results[0].outcome, Outcome::Pass);
}

// ============================================================================
// SECTION: Halting
// ============================================================================

/// Remaining contracts are reported skipped after the first failure.
#[test]
fn test_stop_on_first_failure_skips_the_rest() {
    let set = set_of(vec![
        contract("position", &[0], "no_failure"),
        contract("pick", &[2], "no_failure"),
        contract("vertex", &[0], "no_failure"),
    ]);
    let factory = Arc::new(ScriptedFactory::new(ScriptSpec {
        operations: vec![raising("pick", "boom")],
        prepare: None,
        strict: false,
    }));
    let runner = ConformanceRunner::new(RunnerOptions {
        stop_on_first_failure: true,
        ..RunnerOptions::default()
    });

    let results = runner.run(&set, &factory).expect("run");
    let summary = RunSummary::summarize(&results, set.stub_count());

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].outcome, Outcome::Pass);
    assert_eq!(results[1].outcome, Outcome::Error);
    assert_eq!(results[2].outcome, Outcome::Skipped);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.exit_code(), 1);
}

// ============================================================================
// SECTION: Isolation
// ============================================================================

/// Factory counting how many instances it prepares.
struct CountingFactory {
    /// Number of prepare calls observed.
    prepares: AtomicUsize,
}

/// Handle produced by [`CountingFactory`].
struct CountingCandidate;

impl CandidateFactory for CountingFactory {
    type Handle = CountingCandidate;

    fn prepare(&self, _preconditions: &[PreconditionStep]) -> Result<CountingCandidate, PreparationError> {
        self.prepares.fetch_add(1, Ordering::SeqCst);
        Ok(CountingCandidate)
    }
}

impl CandidateHandle for CountingCandidate {
    fn invoke(&mut self, _operation: &OperationName, _args: &[Value]) -> Result<Value, InvokeError> {
        Ok(Value::Null)
    }

    fn probe(&self, _query: &ProbeQuery) -> Result<bool, InvokeError> {
        Ok(false)
    }

    fn step_product(&self, _step: &StepName) -> Option<Value> {
        None
    }
}

/// Fresh isolation prepares one instance per contract.
#[test]
fn test_fresh_isolation_prepares_per_contract() {
    let set = set_of(vec![
        contract("position", &[0], "no_failure"),
        contract("vertex", &[0], "no_failure"),
    ]);
    let factory = Arc::new(CountingFactory {
        prepares: AtomicUsize::new(0),
    });

    let results = ConformanceRunner::default().run(&set, &factory).expect("run");

    assert_eq!(results.len(), 2);
    assert_eq!(factory.prepares.load(Ordering::SeqCst), 2);
}

/// Reuse isolation shares one instance across the whole set.
#[test]
fn test_reuse_isolation_prepares_once() {
    let set = set_of(vec![
        contract("position", &[0], "no_failure"),
        contract("vertex", &[0], "no_failure"),
    ]);
    let factory = Arc::new(CountingFactory {
        prepares: AtomicUsize::new(0),
    });
    let runner = ConformanceRunner::new(RunnerOptions {
        isolation: Isolation::Reuse,
        ..RunnerOptions::default()
    });

    let results = runner.run(&set, &factory).expect("run");

    assert_eq!(results.len(), 2);
    assert_eq!(factory.prepares.load(Ordering::SeqCst), 1);
}

// ============================================================================
// SECTION: Malformed Sets
// ============================================================================

/// A malformed set aborts before any contract executes.
#[test]
fn test_malformed_set_aborts_the_run() {
    let set = set_of(vec![
        contract("pick", &[2], "no_failure"),
        contract("pick", &[3], "no_failure"),
    ]);
    let factory = Arc::new(CountingFactory {
        prepares: AtomicUsize::new(0),
    });

    let outcome = ConformanceRunner::default().run(&set, &factory);

    assert!(outcome.is_err());
    assert_eq!(factory.prepares.load(Ordering::SeqCst), 0);
}

// ============================================================================
// SECTION: Parallel Sets
// ============================================================================

/// Independent sets run to completion on their own threads, in set order.
#[test]
fn test_run_sets_preserves_set_order() {
    let sets = vec![
        set_of(vec![contract("position", &[0], "no_failure")]),
        set_of(vec![contract("vertex", &[0], "no_failure")]),
    ];
    let factory = Arc::new(ScriptedFactory::new(ScriptSpec::default()));

    let outcomes = ConformanceRunner::default().run_sets(&sets, &factory);

    assert_eq!(outcomes.len(), 2);
    let first = outcomes[0].as_ref().expect("first set");
    let second = outcomes[1].as_ref().expect("second set");
    assert_eq!(first[0].name, OperationName::from("position"));
    assert_eq!(second[0].name, OperationName::from("vertex"));
}
