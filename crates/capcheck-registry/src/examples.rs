// capcheck-registry/src/examples.rs
// ============================================================================
// Module: Registry Examples
// Description: Canonical example payloads for contract sets and scripts.
// Purpose: Provide deterministic examples for docs, tests, and the CLI.
// Dependencies: capcheck-core, ron, serde_json
// ============================================================================

//! ## Overview
//! This module constructs example payloads from the real core types so docs
//! and tests cannot drift from runtime expectations. The contract set models
//! a point-inspection capability surface; the matching script makes every
//! active contract pass.

// ============================================================================
// SECTION: Imports
// ============================================================================

use capcheck_core::ContractSet;
use capcheck_core::ContractStatus;
use capcheck_core::InvariantSpec;
use capcheck_core::OperationContract;
use capcheck_core::OperationName;
use capcheck_core::PreconditionStep;
use capcheck_core::ProbeQuery;
use capcheck_core::ScriptSpec;
use capcheck_core::SetId;
use capcheck_core::SetVersion;
use capcheck_core::StepName;
use capcheck_core::runtime::Behavior;
use capcheck_core::runtime::FlagAssignment;
use capcheck_core::runtime::OperationScript;
use ron::ser::PrettyConfig;
use serde_json::json;

// ============================================================================
// SECTION: Contract Set Example
// ============================================================================

/// Returns a canonical example contract set.
#[must_use]
pub fn contract_set_example() -> ContractSet {
    ContractSet {
        set_id: SetId::from("point-inspection"),
        version: SetVersion::from("1"),
        contracts: vec![
            OperationContract {
                name: OperationName::from("position"),
                arities: vec![0],
                preconditions: Vec::new(),
                invariant: InvariantSpec::ReturnsValue,
                status: ContractStatus::Active,
            },
            OperationContract {
                name: OperationName::from("pick"),
                arities: vec![2, 3],
                preconditions: vec![PreconditionStep {
                    step: StepName::from("place"),
                    op: OperationName::from("position_instance"),
                    params: Some(json!({ "x": 10, "y": 20 })),
                }],
                invariant: InvariantSpec::StateFlag {
                    query: ProbeQuery::from("valid?"),
                    expected: true,
                },
                status: ContractStatus::Active,
            },
            OperationContract {
                name: OperationName::from("vertex"),
                arities: vec![0],
                preconditions: Vec::new(),
                invariant: InvariantSpec::NoFailure,
                status: ContractStatus::Active,
            },
            OperationContract {
                name: OperationName::from("transform"),
                arities: vec![1],
                preconditions: Vec::new(),
                invariant: InvariantSpec::NoFailure,
                status: ContractStatus::Stub,
            },
        ],
    }
}

/// Returns a RON authoring example for the canonical contract set.
///
/// # Errors
///
/// Returns a RON serialization error when the example cannot be rendered.
#[must_use = "use the rendered RON example or handle the error"]
pub fn contract_set_example_ron() -> Result<String, ron::Error> {
    let value = serde_json::to_value(contract_set_example())
        .map_err(|err| ron::Error::Message(err.to_string()))?;
    let pretty = PrettyConfig::new().depth_limit(6).separate_tuple_members(true);
    ron::ser::to_string_pretty(&value, pretty)
}

// ============================================================================
// SECTION: Script Example
// ============================================================================

/// Returns a behavior script under which the example set fully passes.
#[must_use]
pub fn script_example() -> ScriptSpec {
    ScriptSpec {
        operations: vec![
            OperationScript {
                operation: OperationName::from("position"),
                behavior: Behavior::Return {
                    value: json!([10, 20, 0]),
                },
                sets: Vec::new(),
                notices: Vec::new(),
            },
            OperationScript {
                operation: OperationName::from("pick"),
                behavior: Behavior::Return {
                    value: json!([10, 20, 0]),
                },
                sets: vec![FlagAssignment {
                    query: ProbeQuery::from("valid?"),
                    value: true,
                }],
                notices: Vec::new(),
            },
        ],
        prepare: None,
        strict: false,
    }
}

/// Returns a RON authoring example for the passing behavior script.
///
/// # Errors
///
/// Returns a RON serialization error when the example cannot be rendered.
#[must_use = "use the rendered RON example or handle the error"]
pub fn script_example_ron() -> Result<String, ron::Error> {
    let value = serde_json::to_value(script_example())
        .map_err(|err| ron::Error::Message(err.to_string()))?;
    let pretty = PrettyConfig::new().depth_limit(6).separate_tuple_members(true);
    ron::ser::to_string_pretty(&value, pretty)
}
