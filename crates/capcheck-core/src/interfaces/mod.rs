// capcheck-core/src/interfaces/mod.rs
// ============================================================================
// Module: capcheck Interfaces
// Description: Binding-agnostic interfaces for candidate objects and notices.
// Purpose: Define the seams where real host object models plug in.
// Dependencies: crate::core, serde_json
// ============================================================================

//! ## Overview
//! Interfaces define how capcheck drives an externally supplied candidate
//! object without embedding host-specific details. A factory prepares ready
//! candidate instances; a handle performs dynamic invocation and exposes the
//! observable state invariants inspect. Environment side-effects a candidate
//! may trigger (notification dialogs and the like) are routed through an
//! injected notice sink rather than mutated global behavior.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Mutex;

use serde_json::Value;
use thiserror::Error;

use crate::core::OperationName;
use crate::core::PreconditionStep;
use crate::core::ProbeQuery;
use crate::core::StepName;

// ============================================================================
// SECTION: Candidate Factory
// ============================================================================

/// Errors raised while preparing a candidate instance.
///
/// Preparation failures are environment/setup failures: the runner always
/// classifies them as errors, never as invariant failures of the contract
/// under test.
#[derive(Debug, Error)]
pub enum PreparationError {
    /// The factory could not produce a ready candidate.
    #[error("candidate preparation failed: {0}")]
    Failed(String),
}

/// Factory producing ready candidate instances for contract execution.
///
/// The factory is the external collaborator that knows how to construct and
/// position a real object inside its host environment.
pub trait CandidateFactory {
    /// Handle type produced by [`CandidateFactory::prepare`].
    type Handle: CandidateHandle;

    /// Executes the contract's precondition steps and returns a ready handle.
    ///
    /// # Errors
    ///
    /// Returns [`PreparationError`] when any step cannot be performed.
    fn prepare(&self, preconditions: &[PreconditionStep]) -> Result<Self::Handle, PreparationError>;

    /// Synthesizes positional arguments for an invocation of `operation`.
    ///
    /// Contracts declare argument counts only; the factory owns argument
    /// values. The default synthesizes nulls.
    fn arguments(&self, operation: &OperationName, arity: usize) -> Vec<Value> {
        let _ = operation;
        vec![Value::Null; arity]
    }
}

// ============================================================================
// SECTION: Candidate Handle
// ============================================================================

/// Errors raised by candidate invocations and probes.
#[derive(Debug, Error)]
pub enum InvokeError {
    /// The candidate raised a failure during the call.
    #[error("candidate raised: {message}")]
    Raised {
        /// Failure message reported by the candidate.
        message: String,
    },
    /// The candidate does not support the named operation.
    #[error("unsupported operation: {operation}")]
    UnsupportedOperation {
        /// Unsupported operation name.
        operation: OperationName,
    },
    /// The candidate does not answer the named state probe.
    #[error("unsupported probe: {query}")]
    UnsupportedProbe {
        /// Unsupported probe query.
        query: ProbeQuery,
    },
}

/// Live candidate instance supporting dynamic invocation.
pub trait CandidateHandle {
    /// Invokes a named operation with positional arguments.
    ///
    /// # Errors
    ///
    /// Returns [`InvokeError`] when the candidate raises or the operation is
    /// unsupported.
    fn invoke(&mut self, operation: &OperationName, args: &[Value]) -> Result<Value, InvokeError>;

    /// Answers a boolean state query about the candidate.
    ///
    /// # Errors
    ///
    /// Returns [`InvokeError`] when the probe is unsupported.
    fn probe(&self, query: &ProbeQuery) -> Result<bool, InvokeError>;

    /// Returns the value produced by a named precondition step, if recorded.
    fn step_product(&self, step: &StepName) -> Option<Value>;
}

// ============================================================================
// SECTION: Notice Sink
// ============================================================================

/// Observer for environment side-effects emitted by a candidate.
pub trait NoticeSink: Send + Sync {
    /// Records one notice emitted during candidate activity.
    fn notify(&self, notice: &str);
}

/// Notice sink that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNoticeSink;

impl NoticeSink for NullNoticeSink {
    fn notify(&self, _notice: &str) {}
}

/// Notice sink that collects notices for later inspection.
#[derive(Debug, Default)]
pub struct CollectingNoticeSink {
    /// Notices recorded so far, in emission order.
    notices: Mutex<Vec<String>>,
}

impl CollectingNoticeSink {
    /// Creates an empty collecting sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the notices recorded so far.
    #[must_use]
    pub fn notices(&self) -> Vec<String> {
        self.notices.lock().unwrap_or_else(std::sync::PoisonError::into_inner).clone()
    }
}

impl NoticeSink for CollectingNoticeSink {
    fn notify(&self, notice: &str) {
        self.notices
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(notice.to_string());
    }
}
