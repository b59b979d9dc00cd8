//! Test matrix expansion
//!
//! Enumerates result type × mask type × operand A type × operand B type ×
//! shape, synthesizes one test case per tuple and collects them in
//! enumeration order. The order is also the physical order in the
//! generated file, so regeneration diffs cleanly.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::dtype::{ElementType, TypeRegistry};
use crate::error::{GenError, GenResult};
use crate::operator::Semiring;
use crate::renderer::InstanceCode;
use crate::shape::ShapeCatalog;
use crate::synth::{synthesize, GeneratedTestCase, TestCaseSpec};
use crate::template::{MatrixTypes, Phase, ScalarTypes, TEST_FOOTER};

/// Mask types every result/operand combination is tested against
///
/// Masks are read as booleans whatever their value type, so this axis does
/// not follow the caller's type list.
pub const MASK_TYPES: [ElementType; 5] = [
    ElementType::Bool,
    ElementType::I32,
    ElementType::I64,
    ElementType::F32,
    ElementType::F64,
];

/// File name of the generated instances header
pub fn instances_file_name(suite: &str, semiring: &Semiring) -> String {
    format!("{}_{}_test_instances.hpp", suite, semiring)
}

/// Ordered test-case blocks of one generated file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputArtifact {
    names: Vec<String>,
    blocks: Vec<String>,
}

impl OutputArtifact {
    /// Append a test case: header, the selected phases ascending, footer
    pub fn push(&mut self, case: &GeneratedTestCase, phases: &[Phase]) {
        let mut block = case.header.clone();
        for phase in phases {
            if let Some(body) = case.phase(*phase) {
                block.push_str(body);
            }
        }
        block.push_str(TEST_FOOTER);
        self.names.push(case.name.clone());
        self.blocks.push(block);
    }

    /// Test names in enumeration order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn blocks(&self) -> &[String] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Axes of one generated test file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestMatrix {
    suite: String,
    semiring: Semiring,
    result_types: Vec<ElementType>,
    operand_types: Vec<ElementType>,
    phases: Vec<Phase>,
}

impl TestMatrix {
    /// Matrix over `types` for both result and operand axes, all phases
    pub fn new(suite: impl Into<String>, semiring: Semiring, types: Vec<ElementType>) -> Self {
        Self {
            suite: suite.into(),
            semiring,
            result_types: types.clone(),
            operand_types: types,
            phases: Phase::ALL.to_vec(),
        }
    }

    pub fn with_result_types(mut self, types: Vec<ElementType>) -> Self {
        self.result_types = types;
        self
    }

    pub fn with_operand_types(mut self, types: Vec<ElementType>) -> Self {
        self.operand_types = types;
        self
    }

    /// Restrict the phases written per test case
    pub fn with_phases(mut self, phases: Vec<Phase>) -> Self {
        self.phases = phases;
        self
    }

    pub fn suite(&self) -> &str {
        &self.suite
    }

    pub fn semiring(&self) -> &Semiring {
        &self.semiring
    }

    /// googletest suite name, e.g. `T_tests_PLUS_TIMES`
    pub fn test_suite_name(&self) -> String {
        format!(
            "{}_tests_{}_{}",
            self.suite, self.semiring.monoid, self.semiring.binop
        )
    }

    /// Number of test cases `expand` produces over `shapes`
    pub fn case_count(&self, shapes: &ShapeCatalog) -> usize {
        self.result_types.len()
            * MASK_TYPES.len()
            * self.operand_types.len()
            * self.operand_types.len()
            * shapes.len()
    }

    /// Synthesize every test case of the matrix
    ///
    /// Scalar cast types X, Y and Z follow the result type.
    pub fn expand(&self, registry: &TypeRegistry, shapes: &ShapeCatalog) -> GenResult<OutputArtifact> {
        let mut phases = self.phases.clone();
        phases.sort();
        phases.dedup();
        if phases.is_empty() {
            return Err(GenError::InvalidArgument(
                "at least one phase must be generated".to_string(),
            ));
        }

        let expected = self.case_count(shapes);
        if expected == 0 {
            warn!(
                "Test matrix for {} is empty; no test cases will be generated",
                self.test_suite_name()
            );
        }
        info!(
            "Expanding {} test cases for {}",
            expected,
            self.test_suite_name()
        );

        let suite = self.test_suite_name();
        let mut artifact = OutputArtifact::default();
        for &c in &self.result_types {
            let scalars = ScalarTypes::uniform(c);
            for &m in &MASK_TYPES {
                for &a in &self.operand_types {
                    for &b in &self.operand_types {
                        for shape in shapes.iter() {
                            let spec = TestCaseSpec {
                                suite: suite.clone(),
                                semiring: self.semiring.clone(),
                                types: MatrixTypes { c, m, a, b },
                                scalars,
                                shape: *shape,
                            };
                            let case = synthesize(registry, &spec)?;
                            artifact.push(&case, &phases);
                        }
                    }
                }
            }
        }

        debug!("Expanded {} test cases", artifact.len());
        Ok(artifact)
    }
}

/// Write the rendered instances header into `dir`
pub fn write_test_instances(
    dir: &Path,
    suite: &str,
    semiring: &Semiring,
    code: &InstanceCode,
) -> GenResult<PathBuf> {
    let path = dir.join(instances_file_name(suite, semiring));
    fs::write(&path, code.as_str()).map_err(|e| GenError::io(&path, e))?;
    info!("Wrote {} ({} bytes)", path.display(), code.len());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{InstancesRenderer, Renderer};
    use rstest::rstest;

    fn plus_times() -> Semiring {
        Semiring::new("PLUS", "TIMES").unwrap()
    }

    #[rstest]
    #[case(vec![ElementType::I32], 1)]
    #[case(vec![ElementType::I32, ElementType::F32], 1)]
    #[case(vec![ElementType::I32, ElementType::F32, ElementType::F64], 3)]
    fn test_case_count(#[case] types: Vec<ElementType>, #[case] shapes: usize) {
        let _ = env_logger::builder().is_test(true).try_init();
        let registry = TypeRegistry::standard();
        let catalog = ShapeCatalog::from_presets(
            ShapeCatalog::standard().iter().take(shapes).copied().collect(),
        );
        let n = types.len();
        let matrix = TestMatrix::new("T", plus_times(), types);
        let artifact = matrix.expand(&registry, &catalog).unwrap();
        assert_eq!(artifact.len(), n * 5 * n * n * shapes);
        assert_eq!(artifact.len(), matrix.case_count(&catalog));
    }

    #[test]
    fn test_distinct_result_and_operand_axes() {
        let registry = TypeRegistry::standard();
        let catalog = ShapeCatalog::standard().select(&["nanoxnano"]).unwrap();
        let matrix = TestMatrix::new("T", plus_times(), vec![ElementType::I32])
            .with_result_types(vec![ElementType::F32, ElementType::F64])
            .with_operand_types(vec![ElementType::I32, ElementType::U32, ElementType::I64]);
        let artifact = matrix.expand(&registry, &catalog).unwrap();
        assert_eq!(artifact.len(), 2 * 5 * 3 * 3);
    }

    #[test]
    fn test_enumeration_order() {
        let registry = TypeRegistry::standard();
        let catalog = ShapeCatalog::standard()
            .select(&["nanoxnano", "tinyxtiny"])
            .unwrap();
        let matrix = TestMatrix::new("T", plus_times(), vec![ElementType::I32, ElementType::F32]);
        let artifact = matrix.expand(&registry, &catalog).unwrap();
        let names = artifact.names();

        // shape is the innermost axis, then operand B
        assert!(names[0].starts_with("nanoxnanoPLUS_TIMESCint32_tMboolAint32_tBint32_t"));
        assert!(names[1].starts_with("tinyxtinyPLUS_TIMESCint32_tMboolAint32_tBint32_t"));
        assert!(names[2].starts_with("nanoxnanoPLUS_TIMESCint32_tMboolAint32_tBfloat"));
        // result type is the outermost axis
        assert!(names[names.len() / 2].starts_with("nanoxnanoPLUS_TIMESCfloatMbool"));
        // mask axis follows the fixed list
        assert!(names[8].starts_with("nanoxnanoPLUS_TIMESCint32_tMint32_t"));
    }

    #[test]
    fn test_names_unique() {
        let registry = TypeRegistry::standard();
        let catalog = ShapeCatalog::standard();
        let matrix = TestMatrix::new("T", plus_times(), ElementType::ALL.to_vec());
        let artifact = matrix.expand(&registry, &catalog).unwrap();
        let mut names = artifact.names().to_vec();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), artifact.len());
    }

    #[test]
    fn test_blocks_hold_phases_in_order() {
        let registry = TypeRegistry::standard();
        let catalog = ShapeCatalog::standard().select(&["nanoxnano"]).unwrap();
        let matrix = TestMatrix::new("T", plus_times(), vec![ElementType::U64]);
        let artifact = matrix.expand(&registry, &catalog).unwrap();
        for block in artifact.blocks() {
            let positions: Vec<usize> = Phase::ALL
                .iter()
                .map(|p| block.find(p.driver()).expect("phase missing"))
                .collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]));
            assert!(block.ends_with("(problem_spec);\n}\n"));
        }
    }

    #[test]
    fn test_phase_subset() {
        let registry = TypeRegistry::standard();
        let catalog = ShapeCatalog::standard().select(&["nanoxnano"]).unwrap();
        let matrix = TestMatrix::new("T", plus_times(), vec![ElementType::I32])
            .with_phases(vec![Phase::Reduce, Phase::Phase1, Phase::Reduce]);
        let artifact = matrix.expand(&registry, &catalog).unwrap();
        let block = &artifact.blocks()[0];
        assert_eq!(block.matches("test_reduce_factory").count(), 1);
        assert!(!block.contains("test_AxB_phase2_factory"));
        assert!(block.find("test_AxB_phase1_factory") < block.find("test_reduce_factory"));

        let empty = TestMatrix::new("T", plus_times(), vec![ElementType::I32]).with_phases(vec![]);
        assert!(matches!(
            empty.expand(&registry, &catalog),
            Err(GenError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_expand_is_deterministic() {
        let registry = TypeRegistry::standard();
        let catalog = ShapeCatalog::standard();
        let matrix = TestMatrix::new("T", plus_times(), vec![ElementType::I64, ElementType::Bool]);
        let renderer = InstancesRenderer::new();
        let first = renderer.render(&matrix.expand(&registry, &catalog).unwrap());
        let second = renderer.render(&matrix.expand(&registry, &catalog).unwrap());
        assert_eq!(first, second);
    }

    #[test]
    fn test_write_test_instances() {
        let dir = tempfile::tempdir().unwrap();
        let code = InstanceCode::new("#pragma once\n".to_string());
        let path = write_test_instances(dir.path(), "T", &plus_times(), &code).unwrap();
        assert_eq!(path, dir.path().join("T_PLUS_TIMES_test_instances.hpp"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "#pragma once\n");
    }

    #[test]
    fn test_write_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let code = InstanceCode::new(String::new());
        let err = write_test_instances(&missing, "T", &plus_times(), &code).unwrap_err();
        assert!(matches!(err, GenError::Io { .. }));
    }
}
