//! CUDA test harness emission
//!
//! The harness is a copy of a fixed googletest template with one include
//! of the generated instances header appended.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::error::{GenError, GenResult};
use crate::expand::instances_file_name;
use crate::operator::Semiring;

/// Location of the template, relative to the source directory
pub const TEMPLATE_PATH: &str = "test/cuda_tests_template.cpp";

/// dot3 kernel buckets the harness can be built for
pub const DOT3_BUCKETS: [u32; 3] = [1, 2, 3];

/// File name of the generated harness
pub fn harness_file_name(suite: &str, semiring: &Semiring) -> String {
    format!("{}_{}_cuda_tests.cpp", suite, semiring)
}

/// Writes harness files next to the generated instances headers
#[derive(Debug, Clone)]
pub struct HarnessEmitter {
    source_dir: PathBuf,
    output_dir: PathBuf,
}

impl HarnessEmitter {
    pub fn new(source_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    pub fn template_path(&self) -> PathBuf {
        self.source_dir.join(TEMPLATE_PATH)
    }

    /// Copy the template and append the instances include
    ///
    /// `kernel` is the bucket selector the build was configured with; the
    /// template covers every bucket, so it is only recorded.
    pub fn emit(&self, suite: &str, semiring: &Semiring, kernel: &str) -> GenResult<PathBuf> {
        let template = self.template_path();
        if !template.is_file() {
            return Err(GenError::MissingTemplate { path: template });
        }

        let target = self.output_dir.join(harness_file_name(suite, semiring));
        // The template is known to exist, so a failed copy is a failed write
        fs::copy(&template, &target).map_err(|e| GenError::io(&target, e))?;
        append_include(&target, &instances_file_name(suite, semiring))?;

        debug!("Harness kernel selector: {}", kernel);
        info!("Wrote {}", target.display());
        Ok(target)
    }
}

fn append_include(path: &Path, header: &str) -> GenResult<()> {
    let mut file = OpenOptions::new()
        .append(true)
        .open(path)
        .map_err(|e| GenError::io(path, e))?;
    write!(file, "\n#include \"{}\"", header).map_err(|e| GenError::io(path, e))
}
