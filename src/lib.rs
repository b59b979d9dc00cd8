//! mxm-testgen: combinatorial test-instance generator for sparse mxm kernels
//!
//! Given element types, a semiring and shape presets, mxm-testgen enumerates
//! every combination and emits one googletest case per combination into a
//! generated C++ header, plus a harness source that includes it.
//!
//! # Architecture
//!
//! - **dtype**: element types and the type registry
//! - **operator**: operator tags, semirings and the operator policy
//! - **symbol**: library operator symbol names
//! - **shape**: problem shape presets
//! - **template** / **synth**: typed template slots and test case synthesis
//! - **expand**: test matrix expansion
//! - **renderer**: rendering of expanded matrices to source
//! - **harness**: harness file emission
//! - **generate**: one full generation run
//!
//! The command line front end lives in the `mxm-testgen-cli` crate.

// ============================================================================
// Core Modules
// ============================================================================

pub mod config;
pub mod dtype;
pub mod error;
pub mod expand;
pub mod generate;
pub mod harness;
pub mod operator;
pub mod renderer;
pub mod shape;
pub mod symbol;
pub mod synth;
pub mod template;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{GeneratorConfig, Invocation};
pub use dtype::{ElementType, TypeRegistry};
pub use error::{GenError, GenResult};
pub use expand::{OutputArtifact, TestMatrix, MASK_TYPES};
pub use generate::{GenerationReport, Generator};
pub use operator::{OperatorPolicy, OperatorTag, Semiring};
pub use renderer::{InstanceCode, InstancesRenderer, Renderer};
pub use shape::{ShapeCatalog, ShapePreset};
pub use synth::{synthesize, GeneratedTestCase, TestCaseSpec};
pub use template::Phase;

// ============================================================================
// Prelude
// ============================================================================

/// Prelude module with commonly used types and traits
pub mod prelude {
    pub use crate::dtype::{ElementType, TypeRegistry};
    pub use crate::error::{GenError, GenResult};
    pub use crate::expand::TestMatrix;
    pub use crate::operator::Semiring;
    pub use crate::renderer::{InstancesRenderer, Renderer};
    pub use crate::shape::ShapeCatalog;
    pub use crate::template::Phase;
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_prelude_compiles() {
        use super::prelude::*;
        let registry = TypeRegistry::standard();
        let semiring = Semiring::new("PLUS", "TIMES").unwrap();
        let matrix = TestMatrix::new("T", semiring, vec![ElementType::I32]);
        assert_eq!(matrix.case_count(&ShapeCatalog::standard()), 15);
        assert!(registry.contains(ElementType::Bool));
    }
}
