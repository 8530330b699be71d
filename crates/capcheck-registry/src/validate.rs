// capcheck-registry/src/validate.rs
// ============================================================================
// Module: Contract Warning Pass
// Description: Advisory checks over loaded contract sets.
// Purpose: Surface suspicious but legal declarations without failing the load.
// Dependencies: capcheck-core, serde
// ============================================================================

//! ## Overview
//! The warning pass is pure and side-effect-free: it inspects an already
//! validated contract set and reports declarations that are legal but likely
//! mistakes, such as a contract with no arity variants (nothing will ever be
//! invoked) or an invariant declared with an empty expression.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use capcheck_core::ContractSet;
use capcheck_core::OperationName;
use serde::Serialize;

// ============================================================================
// SECTION: Warnings
// ============================================================================

/// Advisory finding for one contract declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationWarning {
    /// The contract declares no arity variants; nothing will be invoked.
    EmptyArities {
        /// Contract with the empty arity list.
        contract: OperationName,
    },
    /// The contract's invariant was declared with an empty expression.
    UnspecifiedInvariant {
        /// Contract with the defaulted invariant.
        contract: OperationName,
    },
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyArities {
                contract,
            } => write!(f, "contract {contract} declares no arity variants"),
            Self::UnspecifiedInvariant {
                contract,
            } => {
                write!(f, "contract {contract} declares an empty invariant; defaulting to no_failure")
            }
        }
    }
}

// ============================================================================
// SECTION: Warning Pass
// ============================================================================

/// Reports advisory warnings for a contract set. Pure; never mutates.
#[must_use]
pub fn validate(set: &ContractSet) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    for contract in &set.contracts {
        if contract.arities.is_empty() {
            warnings.push(ValidationWarning::EmptyArities {
                contract: contract.name.clone(),
            });
        }
        if contract.invariant.is_unspecified() {
            warnings.push(ValidationWarning::UnspecifiedInvariant {
                contract: contract.name.clone(),
            });
        }
    }
    warnings
}
