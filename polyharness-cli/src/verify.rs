//! Verification Runner
//!
//! Builds and runs every kernel in all three variants, then compares the
//! array dumps of the optimized variants against the baseline dump by hash.
//! Each variant's own dump file feeds the comparison; verification fails
//! the moment an optimized binary produces output that differs by a single
//! byte.

use crate::command::{Redirect, ShellCommand};
use crate::config::KernelGroup;
use crate::hash::{DumpComparison, compare_dumps};
use crate::orchestrator::{BuildTree, KERNEL_ENV, Toolchain, Variant, build_kernel};
use anyhow::Context;
use polyharness_report as report;

/// Build, run, and hash-compare one kernel across the three variants.
pub fn verify_kernel(
    toolchain: &Toolchain,
    tree: &BuildTree,
    group: &str,
    kernel: &str,
) -> anyhow::Result<DumpComparison> {
    let out_dir = tree.kernel_output_dir(group, kernel);
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("failed to create output directory {}", out_dir.display()))?;

    for variant in Variant::VERIFIED {
        build_kernel(toolchain, tree, variant, group, kernel)?;

        report::status(&format!("Running {} {} version", kernel, variant.display()));
        let binary = tree.kernel_binary(variant, group, kernel);
        // Timing goes to stdout, the array dump to stderr
        ShellCommand::new(binary.display().to_string())
            .envs(KERNEL_ENV)
            .redirect(Redirect::SplitAppend {
                stdout: tree.kernel_artifact(group, kernel, variant, "time"),
                stderr: tree.kernel_artifact(group, kernel, variant, "out"),
            })
            .run()?;
    }

    let comparison = compare_dumps(
        &tree.kernel_artifact(group, kernel, Variant::Standard, "out"),
        &tree.kernel_artifact(group, kernel, Variant::Kokkos, "out"),
        &tree.kernel_artifact(group, kernel, Variant::Polly, "out"),
    )?;
    Ok(comparison)
}

/// Verify a whole kernel group, rendering one table row per kernel.
///
/// Hash mismatches are reported in the table, not as errors; only a failing
/// build or crashing kernel aborts the run.
pub fn verify_group(
    toolchain: &Toolchain,
    tree: &BuildTree,
    group: &KernelGroup,
) -> anyhow::Result<Vec<(String, DumpComparison)>> {
    println!("{}", report::verification_title(&group.name));

    let mut outcomes = Vec::with_capacity(group.kernels.len());
    for kernel in &group.kernels {
        let comparison = verify_kernel(toolchain, tree, &group.name, kernel)?;
        report::clear_line();
        println!("{}", report::verification_row(kernel, &comparison.marker()));
        outcomes.push((kernel.clone(), comparison));
    }
    Ok(outcomes)
}
