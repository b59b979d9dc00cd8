//! Test case synthesis
//!
//! Turns one fully resolved combination into the text of one googletest
//! case: a header plus one body fragment per phase.

use std::collections::BTreeMap;

use log::debug;

use crate::dtype::{ElementType, TypeRegistry};
use crate::error::GenResult;
use crate::operator::Semiring;
use crate::shape::ShapePreset;
use crate::symbol::{binary_op_symbol, monoid_symbol};
use crate::template::{MatrixTypes, Phase, PhaseCall, ProblemSpecDecl, ScalarTypes, TestHeader};

/// One point of the test matrix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCaseSpec {
    pub suite: String,
    pub semiring: Semiring,
    pub types: MatrixTypes,
    pub scalars: ScalarTypes,
    pub shape: ShapePreset,
}

impl TestCaseSpec {
    /// Unique test name
    ///
    /// Shape, monoid, binop, then every type behind its role letter, e.g.
    /// `nanoxnanoPLUS_TIMESCint32_tMboolAint32_tBint32_tXint32_tYint32_tZint32_t`.
    /// Role letters keep two specs that differ in a single type apart.
    pub fn test_name(&self) -> String {
        let t = &self.types;
        let s = &self.scalars;
        format!(
            "{}{}_{}C{}M{}A{}B{}X{}Y{}Z{}",
            self.shape.name,
            self.semiring.monoid,
            self.semiring.binop,
            t.c,
            t.m,
            t.a,
            t.b,
            s.x,
            s.y,
            s.z
        )
    }
}

/// Rendered test case: header text and one body per phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedTestCase {
    pub name: String,
    pub header: String,
    pub phases: BTreeMap<Phase, String>,
}

impl GeneratedTestCase {
    /// Body of one phase
    pub fn phase(&self, phase: Phase) -> Option<&str> {
        self.phases.get(&phase).map(String::as_str)
    }

    /// Every phase present with a non-empty body
    pub fn is_complete(&self) -> bool {
        Phase::ALL
            .iter()
            .all(|p| self.phase(*p).is_some_and(|body| !body.is_empty()))
    }
}

/// Synthesize the test case for `spec`
///
/// Operators are specialised to the result type C, whatever the mask and
/// operand types are.
pub fn synthesize(registry: &TypeRegistry, spec: &TestCaseSpec) -> GenResult<GeneratedTestCase> {
    let result_type: ElementType = spec.types.c;
    let monoid = monoid_symbol(registry, result_type, &spec.semiring.monoid)?;
    let binop = binary_op_symbol(registry, result_type, &spec.semiring.binop)?;

    // every role must be registered, not only the one driving operator selection
    for ty in [
        spec.types.m,
        spec.types.a,
        spec.types.b,
        spec.scalars.x,
        spec.scalars.y,
        spec.scalars.z,
    ] {
        registry.tag(ty)?;
    }

    let name = spec.test_name();
    let header = TestHeader {
        suite: spec.suite.clone(),
        name: name.clone(),
        monoid,
        binop,
        problem: ProblemSpecDecl {
            types: spec.types,
            shape: spec.shape,
        },
    };

    let phases = Phase::ALL
        .into_iter()
        .map(|phase| {
            let call = PhaseCall {
                phase,
                types: spec.types,
                scalars: spec.scalars,
            };
            (phase, call.to_string())
        })
        .collect();

    debug!("Synthesized test case {}", name);

    Ok(GeneratedTestCase {
        name,
        header: header.to_string(),
        phases,
    })
}
