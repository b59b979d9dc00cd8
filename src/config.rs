//! Invocation arguments and generator configuration

use std::path::PathBuf;

use log::warn;

use crate::dtype::{ElementType, TypeRegistry};
use crate::error::{GenError, GenResult};
use crate::harness::DOT3_BUCKETS;
use crate::operator::{parse_operator_list, OperatorPolicy, OperatorTag, Semiring};

/// Number of positional arguments the generator takes
pub const POSITIONAL_ARGS: usize = 7;

/// The seven positional arguments, parsed
///
/// `<SOURCE_DIR> <SUITE> <MONOIDS> <BINOPS> <SEMIRING> <TYPES> <KERNEL>`,
/// lists delimited by `;`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub source_dir: PathBuf,
    pub suite: String,
    pub monoids: Vec<OperatorTag>,
    pub binops: Vec<OperatorTag>,
    pub semiring: Semiring,
    pub types: Vec<ElementType>,
    pub kernel: String,
}

impl Invocation {
    /// Parse positional arguments, resolving types against `registry`
    ///
    /// Fails before touching the filesystem.
    pub fn from_positional<S: AsRef<str>>(args: &[S], registry: &TypeRegistry) -> GenResult<Self> {
        if args.len() != POSITIONAL_ARGS {
            return Err(GenError::ArgumentCount {
                expected: POSITIONAL_ARGS,
                actual: args.len(),
            });
        }
        let arg: Vec<&str> = args.iter().map(|s| s.as_ref()).collect();

        let suite = arg[1].trim();
        if suite.is_empty() {
            return Err(GenError::InvalidArgument(
                "test suite name is empty".to_string(),
            ));
        }
        let types = registry.parse_list(arg[5])?;
        if types.is_empty() {
            return Err(GenError::InvalidArgument("type list is empty".to_string()));
        }

        Ok(Self {
            source_dir: PathBuf::from(arg[0]),
            suite: suite.to_string(),
            monoids: parse_operator_list(arg[2]),
            binops: parse_operator_list(arg[3]),
            semiring: Semiring::parse(arg[4].trim())?,
            types,
            kernel: arg[6].trim().to_string(),
        })
    }

    /// Warn about inputs that are accepted but look inconsistent
    pub fn lint(&self) {
        if !self.monoids.is_empty() && !self.monoids.contains(&self.semiring.monoid) {
            warn!(
                "semiring monoid '{}' is not in the monoid list",
                self.semiring.monoid
            );
        }
        if !self.binops.is_empty() && !self.binops.contains(&self.semiring.binop) {
            warn!(
                "semiring binop '{}' is not in the binop list",
                self.semiring.binop
            );
        }
        match self.kernel.parse::<u32>() {
            Ok(bucket) if DOT3_BUCKETS.contains(&bucket) => {}
            _ => warn!(
                "kernel selector '{}' is not one of the dot3 buckets {:?}",
                self.kernel, DOT3_BUCKETS
            ),
        }
    }
}

/// Options that are not part of the positional contract
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Directory both generated files are written to
    pub output_dir: PathBuf,
    /// Shape presets to generate, in order; `None` means the full catalog
    pub shapes: Option<Vec<String>>,
    pub operator_policy: OperatorPolicy,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            shapes: None,
            operator_policy: OperatorPolicy::default(),
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_shapes(mut self, shapes: Vec<String>) -> Self {
        self.shapes = Some(shapes);
        self
    }

    pub fn with_operator_policy(mut self, policy: OperatorPolicy) -> Self {
        self.operator_policy = policy;
        self
    }
}
