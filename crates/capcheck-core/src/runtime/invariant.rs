// capcheck-core/src/runtime/invariant.rs
// ============================================================================
// Module: capcheck Invariant Evaluation
// Description: Evaluate invariant predicates against call outcomes.
// Purpose: Turn a successful invocation plus candidate state into a verdict.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! Invariant evaluation runs only over successful invocations: a raised
//! failure is classified by the runner before any predicate is consulted.
//! Probe failures during evaluation surface as errors, not violations, so a
//! candidate that cannot answer a state query is distinguishable from one
//! whose state is wrong.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;

use crate::core::InvariantSpec;
use crate::interfaces::CandidateHandle;
use crate::interfaces::InvokeError;

// ============================================================================
// SECTION: Verdict
// ============================================================================

/// Result of evaluating one invariant over one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantVerdict {
    /// The predicate held.
    Holds,
    /// The predicate returned false.
    Violated {
        /// Human-readable violation description.
        message: String,
    },
}

// ============================================================================
// SECTION: Evaluation
// ============================================================================

/// Evaluates an invariant against a successful call's return value and the
/// candidate's post-call state.
///
/// # Errors
///
/// Returns [`InvokeError`] when a required state probe cannot be answered.
pub fn check_invariant<H: CandidateHandle>(
    invariant: &InvariantSpec,
    value: &Value,
    handle: &H,
) -> Result<InvariantVerdict, InvokeError> {
    match invariant {
        InvariantSpec::Unspecified | InvariantSpec::NoFailure => Ok(InvariantVerdict::Holds),
        InvariantSpec::ReturnsValue => {
            if value.is_null() {
                Ok(InvariantVerdict::Violated {
                    message: "operation returned null where a value was required".to_string(),
                })
            } else {
                Ok(InvariantVerdict::Holds)
            }
        }
        InvariantSpec::StateFlag {
            query,
            expected,
        } => {
            let actual = handle.probe(query)?;
            if actual == *expected {
                Ok(InvariantVerdict::Holds)
            } else {
                Ok(InvariantVerdict::Violated {
                    message: format!("state {query} was {actual}, expected {expected}"),
                })
            }
        }
        InvariantSpec::EchoesStep {
            step,
        } => match handle.step_product(step) {
            Some(product) if product == *value => Ok(InvariantVerdict::Holds),
            Some(_) => Ok(InvariantVerdict::Violated {
                message: format!("return value does not echo the product of step {step}"),
            }),
            None => Ok(InvariantVerdict::Violated {
                message: format!("step {step} recorded no product to compare against"),
            }),
        },
    }
}
