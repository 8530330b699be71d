// capcheck-core/src/runtime/scripted.rs
// ============================================================================
// Module: capcheck Scripted Candidate
// Description: Declarative, script-driven candidate factory and handle.
// Purpose: Provide an executable stand-in candidate for the CLI and tests.
// Dependencies: crate::{core, interfaces}, serde, serde_json
// ============================================================================

//! ## Overview
//! The scripted candidate executes a declarative behavior script instead of
//! a real host object: each operation either returns a scripted value or
//! raises, optionally setting state flags and emitting notices through the
//! injected sink. Undeclared operations succeed with null unless the script
//! is strict. Real host bindings implement [`CandidateFactory`] directly;
//! this factory exists so a contract source can be exercised without one.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::core::OperationName;
use crate::core::PreconditionStep;
use crate::core::ProbeQuery;
use crate::core::StepName;
use crate::interfaces::CandidateFactory;
use crate::interfaces::CandidateHandle;
use crate::interfaces::InvokeError;
use crate::interfaces::NoticeSink;
use crate::interfaces::NullNoticeSink;
use crate::interfaces::PreparationError;

// ============================================================================
// SECTION: Script Specification
// ============================================================================

/// Declarative behavior script for a scripted candidate.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScriptSpec {
    /// Scripted operation behaviors, applied to invocations and steps.
    #[serde(default)]
    pub operations: Vec<OperationScript>,
    /// Optional preparation override.
    #[serde(default)]
    pub prepare: Option<PrepareScript>,
    /// Raise on operations and probes the script does not declare.
    #[serde(default)]
    pub strict: bool,
}

impl ScriptSpec {
    /// Returns the scripted behavior for an operation, if declared.
    #[must_use]
    pub fn operation(&self, name: &OperationName) -> Option<&OperationScript> {
        self.operations.iter().find(|entry| &entry.operation == name)
    }
}

/// Scripted behavior for one operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationScript {
    /// Operation this entry scripts.
    pub operation: OperationName,
    /// What the operation does when performed.
    pub behavior: Behavior,
    /// State flags assigned when the operation performs.
    #[serde(default)]
    pub sets: Vec<FlagAssignment>,
    /// Notices emitted to the sink when the operation performs.
    #[serde(default)]
    pub notices: Vec<String>,
}

/// Effect of performing a scripted operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Behavior {
    /// Complete successfully with the given value.
    Return {
        /// Value the operation returns.
        #[serde(default)]
        value: Value,
    },
    /// Raise a failure with the given message.
    Raise {
        /// Failure message.
        message: String,
    },
}

/// One state-flag assignment performed by an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagAssignment {
    /// Probe query the flag answers.
    pub query: ProbeQuery,
    /// Flag value assigned.
    pub value: bool,
}

/// Scripted preparation behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PrepareScript {
    /// Preparation succeeds (the default when omitted).
    Succeed,
    /// Preparation fails before any step executes.
    Fail {
        /// Failure message.
        message: String,
    },
}

// ============================================================================
// SECTION: Scripted Factory
// ============================================================================

/// Candidate factory driven by a [`ScriptSpec`].
pub struct ScriptedFactory {
    /// Behavior script shared by every prepared candidate.
    script: ScriptSpec,
    /// Sink receiving notices emitted by scripted operations.
    sink: Arc<dyn NoticeSink>,
}

impl ScriptedFactory {
    /// Creates a factory that discards notices.
    #[must_use]
    pub fn new(script: ScriptSpec) -> Self {
        Self {
            script,
            sink: Arc::new(NullNoticeSink),
        }
    }

    /// Creates a factory routing notices to the provided sink.
    #[must_use]
    pub fn with_sink(script: ScriptSpec, sink: Arc<dyn NoticeSink>) -> Self {
        Self {
            script,
            sink,
        }
    }
}

impl CandidateFactory for ScriptedFactory {
    type Handle = ScriptedCandidate;

    fn prepare(
        &self,
        preconditions: &[PreconditionStep],
    ) -> Result<Self::Handle, PreparationError> {
        if let Some(PrepareScript::Fail {
            message,
        }) = &self.script.prepare
        {
            return Err(PreparationError::Failed(message.clone()));
        }

        let mut candidate = ScriptedCandidate {
            script: self.script.clone(),
            flags: HashMap::new(),
            products: HashMap::new(),
            sink: Arc::clone(&self.sink),
        };
        for precondition in preconditions {
            let product = candidate
                .perform(&precondition.op)
                .map_err(|err| PreparationError::Failed(err.to_string()))?;
            candidate.products.insert(precondition.step.clone(), product);
        }
        Ok(candidate)
    }
}

// ============================================================================
// SECTION: Scripted Candidate
// ============================================================================

/// Live scripted candidate instance.
pub struct ScriptedCandidate {
    /// Behavior script for this instance.
    script: ScriptSpec,
    /// Boolean state flags assigned by performed operations.
    flags: HashMap<ProbeQuery, bool>,
    /// Products recorded for precondition steps during preparation.
    products: HashMap<StepName, Value>,
    /// Sink receiving emitted notices.
    sink: Arc<dyn NoticeSink>,
}

impl ScriptedCandidate {
    /// Performs one scripted operation, applying its side effects.
    fn perform(&mut self, operation: &OperationName) -> Result<Value, InvokeError> {
        let Some(entry) = self.script.operation(operation).cloned() else {
            if self.script.strict {
                return Err(InvokeError::UnsupportedOperation {
                    operation: operation.clone(),
                });
            }
            return Ok(Value::Null);
        };

        for notice in &entry.notices {
            self.sink.notify(notice);
        }
        for assignment in &entry.sets {
            self.flags.insert(assignment.query.clone(), assignment.value);
        }
        match entry.behavior {
            Behavior::Return {
                value,
            } => Ok(value),
            Behavior::Raise {
                message,
            } => Err(InvokeError::Raised {
                message,
            }),
        }
    }
}

impl CandidateHandle for ScriptedCandidate {
    fn invoke(&mut self, operation: &OperationName, args: &[Value]) -> Result<Value, InvokeError> {
        // Scripted behaviors are arity-agnostic; arguments only matter to
        // real bindings.
        let _ = args;
        self.perform(operation)
    }

    fn probe(&self, query: &ProbeQuery) -> Result<bool, InvokeError> {
        if let Some(&flag) = self.flags.get(query) {
            return Ok(flag);
        }
        if self.script.strict {
            return Err(InvokeError::UnsupportedProbe {
                query: query.clone(),
            });
        }
        Ok(false)
    }

    fn step_product(&self, step: &StepName) -> Option<Value> {
        self.products.get(step).cloned()
    }
}
