//! One generation run: instances header plus harness
//!
//! The full artifact is synthesized in memory before anything is written,
//! so an invalid combination never leaves a partial header behind.

use std::path::PathBuf;

use log::info;

use crate::config::{GeneratorConfig, Invocation};
use crate::dtype::TypeRegistry;
use crate::error::GenResult;
use crate::expand::{write_test_instances, TestMatrix};
use crate::harness::HarnessEmitter;
use crate::renderer::{InstanceCode, InstancesRenderer, Renderer};
use crate::shape::ShapeCatalog;

/// Files produced by a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub instances_path: PathBuf,
    pub harness_path: PathBuf,
    pub test_cases: usize,
}

/// Instances header rendered in memory
#[derive(Debug, Clone)]
pub struct RenderedInstances {
    pub matrix: TestMatrix,
    pub code: InstanceCode,
    pub test_cases: usize,
}

/// Owns the registry and shape catalog for the lifetime of a run
#[derive(Debug, Clone)]
pub struct Generator {
    registry: TypeRegistry,
    shapes: ShapeCatalog,
    config: GeneratorConfig,
}

impl Generator {
    /// Generator over the standard registry and the configured shapes
    pub fn new(config: GeneratorConfig) -> GenResult<Self> {
        let catalog = ShapeCatalog::standard();
        let shapes = match &config.shapes {
            Some(names) => catalog.select(names)?,
            None => catalog,
        };
        Ok(Self {
            registry: TypeRegistry::standard(),
            shapes,
            config,
        })
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    pub fn shapes(&self) -> &ShapeCatalog {
        &self.shapes
    }

    /// Parse positional arguments against this generator's registry
    pub fn parse_invocation<S: AsRef<str>>(&self, args: &[S]) -> GenResult<Invocation> {
        Invocation::from_positional(args, &self.registry)
    }

    /// Render the instances header text without writing anything
    pub fn render(&self, invocation: &Invocation) -> GenResult<RenderedInstances> {
        self.config
            .operator_policy
            .check_semiring(&invocation.semiring)?;
        invocation.lint();

        let matrix = TestMatrix::new(
            invocation.suite.clone(),
            invocation.semiring.clone(),
            invocation.types.clone(),
        );
        let artifact = matrix.expand(&self.registry, &self.shapes)?;
        let code = InstancesRenderer::new().render(&artifact);
        Ok(RenderedInstances {
            matrix,
            code,
            test_cases: artifact.len(),
        })
    }

    /// Generate both files for `invocation`
    pub fn run(&self, invocation: &Invocation) -> GenResult<GenerationReport> {
        let RenderedInstances {
            matrix,
            code,
            test_cases,
        } = self.render(invocation)?;

        let instances_path = write_test_instances(
            &self.config.output_dir,
            matrix.suite(),
            matrix.semiring(),
            &code,
        )?;
        let harness_path = HarnessEmitter::new(&invocation.source_dir, &self.config.output_dir)
            .emit(matrix.suite(), matrix.semiring(), &invocation.kernel)?;

        info!(
            "Generated {} test cases for {}",
            test_cases,
            matrix.test_suite_name()
        );
        Ok(GenerationReport {
            instances_path,
            harness_path,
            test_cases,
        })
    }
}
