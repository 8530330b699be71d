// capcheck-core/src/core/invariant.rs
// ============================================================================
// Module: capcheck Invariant Expressions
// Description: Declarative pass/fail predicates attached to contracts.
// Purpose: Model invariant expressions with lossless string round-trips.
// Dependencies: crate::core::identifiers, serde
// ============================================================================

//! ## Overview
//! An invariant is the boolean predicate that defines pass/fail for one
//! contract. Invariants are authored as short expression strings and parsed
//! into structured form at load time; serializing a parsed invariant
//! reproduces the original expression.
//!
//! Supported expressions:
//! - `no_failure` — the invocation must not raise (the default);
//! - `returns_value` — the invocation must produce a non-null value;
//! - `state:<query>=<true|false>` — a post-call boolean probe of the
//!   candidate must match;
//! - `echoes:<step>` — the return value must equal the product of the named
//!   precondition step;
//! - the empty expression — accepted as unspecified, behaves as
//!   `no_failure`, and is surfaced by the registry warning pass.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de::Error as DeError;
use thiserror::Error;

use crate::core::identifiers::ProbeQuery;
use crate::core::identifiers::StepName;

// ============================================================================
// SECTION: Invariant Specification
// ============================================================================

/// Parsed invariant predicate for one contract.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InvariantSpec {
    /// Declared with an empty expression; behaves as [`InvariantSpec::NoFailure`].
    Unspecified,
    /// The invocation must complete without a raised failure.
    #[default]
    NoFailure,
    /// The invocation must return a non-null value.
    ReturnsValue,
    /// A post-call state probe must return the expected flag.
    StateFlag {
        /// Boolean query evaluated against the candidate after the call.
        query: ProbeQuery,
        /// Expected probe result.
        expected: bool,
    },
    /// The return value must equal the product of a precondition step.
    EchoesStep {
        /// Precondition step whose product is compared.
        step: StepName,
    },
}

impl InvariantSpec {
    /// Parses an invariant expression string.
    ///
    /// # Errors
    ///
    /// Returns [`InvariantParseError`] when the expression is not one of the
    /// documented forms.
    pub fn parse(expression: &str) -> Result<Self, InvariantParseError> {
        let trimmed = expression.trim();
        if trimmed.is_empty() {
            return Ok(Self::Unspecified);
        }
        match trimmed {
            "no_failure" => return Ok(Self::NoFailure),
            "returns_value" => return Ok(Self::ReturnsValue),
            _ => {}
        }
        if let Some(rest) = trimmed.strip_prefix("state:") {
            let Some((query, flag)) = rest.rsplit_once('=') else {
                return Err(InvariantParseError::MissingFlag {
                    expression: trimmed.to_string(),
                });
            };
            if query.is_empty() {
                return Err(InvariantParseError::MissingQuery {
                    expression: trimmed.to_string(),
                });
            }
            let expected = match flag {
                "true" => true,
                "false" => false,
                other => {
                    return Err(InvariantParseError::BadFlag {
                        value: other.to_string(),
                    });
                }
            };
            return Ok(Self::StateFlag {
                query: ProbeQuery::new(query),
                expected,
            });
        }
        if let Some(step) = trimmed.strip_prefix("echoes:") {
            if step.is_empty() {
                return Err(InvariantParseError::MissingStep {
                    expression: trimmed.to_string(),
                });
            }
            return Ok(Self::EchoesStep {
                step: StepName::new(step),
            });
        }
        Err(InvariantParseError::Unrecognized {
            expression: trimmed.to_string(),
        })
    }

    /// Returns the expression string for this invariant.
    #[must_use]
    pub fn expression(&self) -> String {
        match self {
            Self::Unspecified => String::new(),
            Self::NoFailure => "no_failure".to_string(),
            Self::ReturnsValue => "returns_value".to_string(),
            Self::StateFlag {
                query,
                expected,
            } => format!("state:{query}={expected}"),
            Self::EchoesStep {
                step,
            } => format!("echoes:{step}"),
        }
    }

    /// Returns the precondition step this invariant references, if any.
    #[must_use]
    pub fn referenced_step(&self) -> Option<&StepName> {
        match self {
            Self::EchoesStep {
                step,
            } => Some(step),
            _ => None,
        }
    }

    /// Returns true when the invariant was declared with an empty expression.
    #[must_use]
    pub const fn is_unspecified(&self) -> bool {
        matches!(self, Self::Unspecified)
    }
}

impl fmt::Display for InvariantSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression())
    }
}

impl Serialize for InvariantSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.expression())
    }
}

impl<'de> Deserialize<'de> for InvariantSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let expression = String::deserialize(deserializer)?;
        Self::parse(&expression).map_err(DeError::custom)
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while parsing invariant expressions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvariantParseError {
    /// The expression matches no documented form.
    #[error("unrecognized invariant expression: {expression}")]
    Unrecognized {
        /// Offending expression text.
        expression: String,
    },
    /// A `state:` expression is missing its `=<flag>` suffix.
    #[error("state invariant is missing an expected flag: {expression}")]
    MissingFlag {
        /// Offending expression text.
        expression: String,
    },
    /// A `state:` expression names no probe query.
    #[error("state invariant names no probe query: {expression}")]
    MissingQuery {
        /// Offending expression text.
        expression: String,
    },
    /// An `echoes:` expression names no precondition step.
    #[error("echoes invariant names no precondition step: {expression}")]
    MissingStep {
        /// Offending expression text.
        expression: String,
    },
    /// A `state:` flag is neither `true` nor `false`.
    #[error("state invariant flag must be true or false, got: {value}")]
    BadFlag {
        /// Offending flag text.
        value: String,
    },
}
