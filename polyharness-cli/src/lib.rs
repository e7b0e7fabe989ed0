#![warn(missing_docs)]
//! Polyharness CLI
//!
//! Drives the comparative build-and-benchmark workflow for the PolyBench
//! kernel suite: three CMake build trees (Standard, Kokkos, Kokkos+Polly),
//! built and executed kernel by kernel, then either verified for byte-exact
//! output equivalence or timed over repeated runs.
//!
//! The whole workflow is sequential and fail-fast: commands run one at a
//! time, and the first nonzero exit status aborts the run.

pub mod bench;
pub mod command;
pub mod config;
pub mod hash;
pub mod orchestrator;
pub mod verify;

pub use command::{CommandError, Redirect, ShellCommand};
pub use config::{KernelGroup, KernelGroups};
pub use hash::{DumpComparison, compare_dumps, digest_file};
pub use orchestrator::{BuildTree, KERNEL_ENV, Toolchain, Variant, configure_builds};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Polyharness command line
#[derive(Parser, Debug)]
#[command(name = "polyharness")]
#[command(
    author,
    version,
    about = "Build-and-compare harness for PolyBench kernel variants"
)]
pub struct Cli {
    /// What to do
    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Verify that the optimized variants reproduce the baseline output
    Verify {
        /// Shared build/run options
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Time the Kokkos and Polly variants over repeated runs
    Bench {
        /// Shared build/run options
        #[command(flatten)]
        common: CommonArgs,

        /// Number of timed executions per kernel and variant
        #[arg(long, default_value = "5")]
        iterations: u32,
    },
    /// Write a kernel-group TOML template covering the full suite
    InitGroups {
        /// Destination file
        #[arg(default_value = "kernels.toml")]
        path: PathBuf,
    },
}

/// Options shared by `verify` and `bench`
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Dataset size identifier handed to the kernel suite (e.g. SMALL,
    /// MEDIUM, LARGE)
    #[arg(long)]
    pub dataset: String,

    /// C++ compiler passed to CMake
    #[arg(long)]
    pub cxx_compiler: PathBuf,

    /// Kokkos installation prefix
    #[arg(long)]
    pub kokkos_install_dir: PathBuf,

    /// PolyBench kernel suite source directory
    #[arg(long)]
    pub polybench_dir: PathBuf,

    /// Scratch workspace, wiped and recreated at startup
    #[arg(long, default_value = "/tmp/polybench")]
    pub scratch_dir: PathBuf,

    /// Kernel-group TOML file (built-in stencil selection if omitted)
    #[arg(long)]
    pub groups: Option<PathBuf>,

    /// Regex filter over kernel names
    #[arg(long, default_value = ".*")]
    pub filter: String,

    /// Build-configuration generator program (overridable for testing)
    #[arg(long, hide = true, default_value = "cmake")]
    pub cmake: String,

    /// Incremental builder program (overridable for testing)
    #[arg(long, hide = true, default_value = "make")]
    pub make: String,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parse the command line and run the harness.
pub fn run() -> anyhow::Result<()> {
    run_with_cli(Cli::parse())
}

/// Run the harness with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Verify { common } => run_workflow(&common, None),
        Commands::Bench { common, iterations } => run_workflow(&common, Some(iterations)),
        Commands::InitGroups { path } => init_groups(&path),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        "polyharness=debug,polyharness_cli=debug"
    } else {
        "polyharness=info,polyharness_cli=info"
    };
    // try_init: repeated invocations from the same process (tests) keep the
    // first subscriber
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn init_groups(path: &Path) -> anyhow::Result<()> {
    std::fs::write(path, KernelGroups::template_toml())
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("Kernel-group template written to {}", path.display());
    Ok(())
}

/// Load the kernel selection and apply the name filter.
fn load_groups(common: &CommonArgs) -> anyhow::Result<KernelGroups> {
    let groups = match &common.groups {
        Some(path) => KernelGroups::load(path)
            .with_context(|| format!("failed to load kernel groups from {}", path.display()))?,
        None => KernelGroups::default(),
    };

    let filter = regex::Regex::new(&common.filter)
        .with_context(|| format!("invalid kernel filter {:?}", common.filter))?;
    Ok(groups.filtered(&filter))
}

/// Shared verify/bench workflow. `iterations` is `Some` for benchmarking.
fn run_workflow(common: &CommonArgs, iterations: Option<u32>) -> anyhow::Result<()> {
    init_tracing(common.verbose);

    let verification = iterations.is_none();
    let groups = load_groups(common)?;
    if groups.kernel_count() == 0 {
        println!("No kernels selected.");
        return Ok(());
    }

    let toolchain = Toolchain {
        cmake: common.cmake.clone(),
        make: common.make.clone(),
        cxx_compiler: common.cxx_compiler.clone(),
        kokkos_install_dir: common.kokkos_install_dir.clone(),
    };
    let tree = BuildTree::new(&common.scratch_dir);

    match iterations {
        None => println!("Run: verification"),
        Some(n) => println!("Run: benchmark, {} iterations", n),
    }
    println!("Compiler   : {}", common.cxx_compiler.display());
    println!("Kokkos     : {}", common.kokkos_install_dir.display());
    println!("Dataset    : {}", common.dataset);
    println!("Scratch dir: {}", tree.root().display());

    tree.prepare().with_context(|| {
        format!(
            "failed to prepare scratch workspace {}",
            tree.root().display()
        )
    })?;

    configure_builds(
        &toolchain,
        &tree,
        &common.polybench_dir,
        &common.dataset,
        verification,
    )?;

    for group in &groups.groups {
        match iterations {
            None => {
                verify::verify_group(&toolchain, &tree, group)?;
            }
            Some(n) => {
                bench::bench_group(&toolchain, &tree, group, n)?;
            }
        }
    }

    Ok(())
}
