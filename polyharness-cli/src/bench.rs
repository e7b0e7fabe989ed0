//! Benchmark Runner
//!
//! Times the two optimized variants. Each kernel is compiled once per
//! variant, then executed `iterations` times; every run appends one cycle
//! count to the variant's timing log. The log is then summarized into the
//! six comparison statistics. The scratch workspace is wiped at startup, so
//! a fresh run's log holds exactly `iterations` samples.

use crate::command::{Redirect, ShellCommand};
use crate::config::KernelGroup;
use crate::orchestrator::{BuildTree, KERNEL_ENV, Toolchain, Variant, build_kernel};
use anyhow::Context;
use polyharness_report as report;
use polyharness_stats::{TimingSummary, summarize_file};

/// Timing statistics for one kernel, per optimized variant
#[derive(Debug, Clone)]
pub struct KernelBenchmark {
    /// Statistics for the Kokkos build
    pub kokkos: TimingSummary,
    /// Statistics for the Polly build
    pub polly: TimingSummary,
}

/// Build and repeatedly run one kernel in both optimized variants.
pub fn bench_kernel(
    toolchain: &Toolchain,
    tree: &BuildTree,
    group: &str,
    kernel: &str,
    iterations: u32,
) -> anyhow::Result<KernelBenchmark> {
    let out_dir = tree.kernel_output_dir(group, kernel);
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("failed to create output directory {}", out_dir.display()))?;

    let kokkos = bench_variant(toolchain, tree, Variant::Kokkos, group, kernel, iterations)?;
    let polly = bench_variant(toolchain, tree, Variant::Polly, group, kernel, iterations)?;
    Ok(KernelBenchmark { kokkos, polly })
}

fn bench_variant(
    toolchain: &Toolchain,
    tree: &BuildTree,
    variant: Variant,
    group: &str,
    kernel: &str,
    iterations: u32,
) -> anyhow::Result<TimingSummary> {
    build_kernel(toolchain, tree, variant, group, kernel)?;

    let binary = tree.kernel_binary(variant, group, kernel);
    let time_log = tree.kernel_artifact(group, kernel, variant, "time");
    for iteration in 1..=iterations {
        report::status(&format!(
            "Running {} {} version (iteration {}/{})",
            kernel,
            variant.display(),
            iteration,
            iterations
        ));
        ShellCommand::new(binary.display().to_string())
            .envs(KERNEL_ENV)
            .redirect(Redirect::StdoutAppend(time_log.clone()))
            .run()?;
    }

    summarize_file(&time_log).with_context(|| {
        format!(
            "failed to summarize timing log {} for {} {}",
            time_log.display(),
            kernel,
            variant.display()
        )
    })
}

/// Benchmark a whole kernel group, rendering one statistics block per
/// kernel.
pub fn bench_group(
    toolchain: &Toolchain,
    tree: &BuildTree,
    group: &KernelGroup,
    iterations: u32,
) -> anyhow::Result<Vec<(String, KernelBenchmark)>> {
    println!("{}", report::benchmark_title(&group.name));

    let mut outcomes = Vec::with_capacity(group.kernels.len());
    for kernel in &group.kernels {
        let benchmark = bench_kernel(toolchain, tree, &group.name, kernel, iterations)?;
        report::clear_line();
        println!(
            "{}",
            report::benchmark_block(kernel, &benchmark.kokkos, &benchmark.polly)
        );
        outcomes.push((kernel.clone(), benchmark));
    }
    Ok(outcomes)
}
