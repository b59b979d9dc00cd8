//! Rendering of test matrices into C++ source
//!
//! The expansion driver produces an `OutputArtifact`; a `Renderer` turns it
//! into the text of the generated instances header.

use log::debug;

use crate::expand::OutputArtifact;
use crate::template::INSTANCES_PREAMBLE;

/// Text of a generated `*_test_instances.hpp`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceCode(String);

impl InstanceCode {
    pub fn new(code: String) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Size in bytes, as written to disk
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for InstanceCode {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Renderer trait for converting an expanded test matrix to source code
pub trait Renderer {
    /// The type representing rendered code
    type CodeRepr: AsRef<str>;

    /// Render an artifact to source code
    fn render(&self, artifact: &OutputArtifact) -> Self::CodeRepr;
}

/// Renders googletest instance headers included by the CUDA test harness
#[derive(Debug, Clone, Default)]
pub struct InstancesRenderer;

impl InstancesRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for InstancesRenderer {
    type CodeRepr = InstanceCode;

    fn render(&self, artifact: &OutputArtifact) -> InstanceCode {
        let body_len: usize = artifact.blocks().iter().map(String::len).sum();
        let mut code = String::with_capacity(INSTANCES_PREAMBLE.len() + body_len);
        code.push_str(INSTANCES_PREAMBLE);
        for block in artifact.blocks() {
            code.push_str(block);
        }
        debug!(
            "Rendered {} test cases ({} bytes)",
            artifact.len(),
            code.len()
        );
        InstanceCode::new(code)
    }
}
