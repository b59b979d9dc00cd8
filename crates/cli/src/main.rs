//! mxm-testgen: generate googletest instances for the CUDA mxm kernels
//!
//! Usage:
//!   mxm-testgen [OPTIONS] <SOURCE_DIR> <SUITE> <MONOIDS> <BINOPS> <SEMIRING> <TYPES> <KERNEL>
//!
//! Examples:
//!   mxm-testgen ../CUDA AxB_dot3 "PLUS;MIN" "TIMES" PLUS_TIMES "int32_t;float" 1
//!   mxm-testgen ../CUDA AxB_dot3 PLUS TIMES PLUS_TIMES int32_t 1 --shapes nanoxnano --print

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

use mxm_testgen::{GeneratorConfig, Generator, OperatorPolicy};

/// Test instance generator
///
/// Expands result, mask, operand and shape axes into one googletest case per
/// combination and writes `<SUITE>_<SEMIRING>_test_instances.hpp` plus the
/// `<SUITE>_<SEMIRING>_cuda_tests.cpp` harness that includes it.
#[derive(Parser, Debug)]
#[command(name = "mxm-testgen")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// SOURCE_DIR SUITE MONOIDS BINOPS SEMIRING TYPES KERNEL (lists are ';'-delimited)
    #[arg(value_name = "ARGS")]
    positional: Vec<String>,

    /// Directory the generated files are written to
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Shape presets to generate (';'-delimited, default: all)
    #[arg(long, value_name = "SHAPES")]
    shapes: Option<String>,

    /// Reject operator tags the library does not define
    #[arg(long)]
    strict_ops: bool,

    /// Print the instances header to stdout instead of writing files
    #[arg(long)]
    print: bool,

    /// Verbose output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();
    init_logger(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    // RUST_LOG still wins when set
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = GeneratorConfig::new().with_output_dir(args.output_dir.clone());
    if let Some(shapes) = &args.shapes {
        config = config.with_shapes(
            shapes
                .split(';')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        );
    }
    if args.strict_ops {
        config = config.with_operator_policy(OperatorPolicy::Strict);
    }

    let generator = Generator::new(config)?;
    let invocation = generator.parse_invocation(&args.positional)?;

    if args.print {
        let rendered = generator.render(&invocation)?;
        let mut stdout = io::stdout().lock();
        stdout.write_all(rendered.code.as_str().as_bytes())?;
        stdout.flush()?;
        return Ok(());
    }

    let report = generator.run(&invocation)?;
    if args.verbose > 0 {
        eprintln!(
            "Generated {} test cases: {}, {}",
            report.test_cases,
            report.instances_path.display(),
            report.harness_path.display()
        );
    }
    Ok(())
}
