//! Typed template slots for generated test cases
//!
//! Each piece of generated C++ is a record whose fields are the slots of
//! the template; rendering is the record's `Display` impl. A slot cannot be
//! forgotten or swapped without the record failing to construct.

use std::fmt;

use crate::dtype::ElementType;
use crate::shape::ShapePreset;
use crate::symbol::{BinaryOpSymbol, MonoidSymbol};

/// Indentation of statements inside a `TEST` body
pub const INDENT: &str = "    ";

/// Types of the four matrices: result C, mask M, operands A and B
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatrixTypes {
    pub c: ElementType,
    pub m: ElementType,
    pub a: ElementType,
    pub b: ElementType,
}

/// Scalar cast types X, Y, Z of the dot3 kernel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScalarTypes {
    pub x: ElementType,
    pub y: ElementType,
    pub z: ElementType,
}

impl ScalarTypes {
    /// X = Y = Z = `ty`
    pub fn uniform(ty: ElementType) -> Self {
        Self { x: ty, y: ty, z: ty }
    }
}

/// Stage of the sparse mxm pipeline a test body exercises
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Phase {
    /// Bucket partitioning
    Phase1,
    /// Bucket counting
    Phase2,
    /// Full dot3 multiply
    Dot3Full,
    /// Final reduction
    Reduce,
}

impl Phase {
    /// All phases in ascending order
    pub const ALL: [Phase; 4] = [Phase::Phase1, Phase::Phase2, Phase::Dot3Full, Phase::Reduce];

    pub fn number(&self) -> u8 {
        match self {
            Phase::Phase1 => 1,
            Phase::Phase2 => 2,
            Phase::Dot3Full => 3,
            Phase::Reduce => 4,
        }
    }

    pub fn from_number(n: u8) -> Option<Phase> {
        Phase::ALL.into_iter().find(|p| p.number() == n)
    }

    /// Name of the C++ test driver invoked for this phase
    pub fn driver(&self) -> &'static str {
        match self {
            Phase::Phase1 => "test_AxB_phase1_factory",
            Phase::Phase2 => "test_AxB_phase2_factory",
            Phase::Dot3Full => "test_AxB_dot3_full_factory",
            Phase::Reduce => "test_reduce_factory",
        }
    }

    /// Whether the driver also takes the scalar cast types
    pub fn takes_scalar_types(&self) -> bool {
        matches!(self, Phase::Dot3Full)
    }
}

/// `mxm_problem_spec<C, M, A, B> problem_spec(monoid, binop, N, Anz, Bnz, Cnz);`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemSpecDecl {
    pub types: MatrixTypes,
    pub shape: ShapePreset,
}

impl fmt::Display for ProblemSpecDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = &self.types;
        let s = &self.shape;
        write!(
            f,
            "mxm_problem_spec<{}, {}, {}, {}> problem_spec(monoid, binop, {}, {}, {}, {});",
            t.c, t.m, t.a, t.b, s.n, s.anz, s.bnz, s.cnz
        )
    }
}

/// Opening of a test case: `TEST(...)`, operator handles, problem spec
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestHeader {
    pub suite: String,
    pub name: String,
    pub monoid: MonoidSymbol,
    pub binop: BinaryOpSymbol,
    pub problem: ProblemSpecDecl,
}

impl fmt::Display for TestHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "TEST( {}, {}) {{", self.suite, self.name)?;
        writeln!(f)?;
        writeln!(f, "{INDENT}/**************************")?;
        writeln!(f, "{INDENT} * Create reference and input data")?;
        writeln!(f, "{INDENT} */")?;
        writeln!(f, "{INDENT}GrB_Monoid monoid = {};", self.monoid)?;
        writeln!(f, "{INDENT}GrB_BinaryOp binop = {};", self.binop)?;
        writeln!(f)?;
        writeln!(f, "{INDENT}{}", self.problem)
    }
}

/// One driver invocation inside a test body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseCall {
    pub phase: Phase,
    pub types: MatrixTypes,
    pub scalars: ScalarTypes,
}

impl fmt::Display for PhaseCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = &self.types;
        write!(
            f,
            "{INDENT}{}< {}, {}, {}, {}",
            self.phase.driver(),
            t.c,
            t.m,
            t.a,
            t.b
        )?;
        if self.phase.takes_scalar_types() {
            let s = &self.scalars;
            write!(f, ", {}, {}, {}", s.x, s.y, s.z)?;
        }
        writeln!(f, " >(problem_spec);")
    }
}

/// Closing brace of a test case
pub const TEST_FOOTER: &str = "}\n";

/// Preamble of a generated instances header
pub const INSTANCES_PREAMBLE: &str = "#pragma once\n#include \"problem_spec.hpp\"\n";
