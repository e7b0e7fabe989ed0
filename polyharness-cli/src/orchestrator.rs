//! Build Orchestrator
//!
//! Owns the scratch workspace layout and the out-of-source CMake
//! configuration of the three kernel-suite variants. Configuration happens
//! once per run; per-kernel compilation afterwards is an incremental `make`
//! inside the variant's build tree.

use crate::command::{CommandError, Redirect, ShellCommand};
use polyharness_report as report;
use std::path::{Path, PathBuf};

/// Fixed environment applied to every kernel execution: spread thread
/// affinity over the machine with thread-granular placement.
pub const KERNEL_ENV: &[(&str, &str)] = &[("OMP_PROC_BIND", "spread"), ("OMP_PLACES", "threads")];

/// One of the three build variants of the kernel suite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Unoptimized reference build, the correctness oracle
    Standard,
    /// Kokkos runtime backend (OpenMP + serial execution spaces)
    Kokkos,
    /// Kokkos runtime backend plus the Polly polyhedral optimizer
    Polly,
}

impl Variant {
    /// All three variants, in verification order.
    pub const VERIFIED: [Variant; 3] = [Variant::Standard, Variant::Kokkos, Variant::Polly];

    /// The two timed variants; benchmarking has no use for the baseline.
    pub const BENCHED: [Variant; 2] = [Variant::Kokkos, Variant::Polly];

    /// Short label used in directory and file names.
    pub fn label(&self) -> &'static str {
        match self {
            Variant::Standard => "std",
            Variant::Kokkos => "kokkos",
            Variant::Polly => "polly",
        }
    }

    /// Human-facing name used in progress lines and table headers.
    pub fn display(&self) -> &'static str {
        match self {
            Variant::Standard => "Standard",
            Variant::Kokkos => "Kokkos",
            Variant::Polly => "Polly",
        }
    }
}

/// External programs and paths the orchestrator drives.
///
/// The `cmake` and `make` program names are injectable so tests can
/// substitute stub scripts for the real toolchain.
#[derive(Debug, Clone)]
pub struct Toolchain {
    /// Build-configuration generator, normally `cmake`
    pub cmake: String,
    /// Incremental per-target builder, normally `make`
    pub make: String,
    /// C++ compiler handed to CMake
    pub cxx_compiler: PathBuf,
    /// Kokkos installation prefix
    pub kokkos_install_dir: PathBuf,
}

impl Toolchain {
    /// Toolchain with the standard program names.
    pub fn new(cxx_compiler: PathBuf, kokkos_install_dir: PathBuf) -> Self {
        Self {
            cmake: "cmake".to_string(),
            make: "make".to_string(),
            cxx_compiler,
            kokkos_install_dir,
        }
    }
}

/// Scratch workspace layout: three build trees plus the run output tree
#[derive(Debug, Clone)]
pub struct BuildTree {
    root: PathBuf,
}

impl BuildTree {
    /// Workspace rooted at `root` (normally `/tmp/polybench`).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Scratch root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Build directory for one variant.
    pub fn build_dir(&self, variant: Variant) -> PathBuf {
        self.root.join(format!("build_{}", variant.label()))
    }

    /// Root of the per-kernel log/output tree.
    pub fn output_dir(&self) -> PathBuf {
        self.root.join("output")
    }

    /// Output directory for one kernel, mirroring the group hierarchy.
    pub fn kernel_output_dir(&self, group: &str, kernel: &str) -> PathBuf {
        self.output_dir().join(group).join(kernel)
    }

    /// Compiled kernel binary inside a variant's build tree.
    pub fn kernel_binary(&self, variant: Variant, group: &str, kernel: &str) -> PathBuf {
        self.build_dir(variant).join(group).join(kernel).join(kernel)
    }

    /// Per-kernel, per-variant artifact path: `<kernel>_<variant>.<ext>`
    /// under the kernel's output directory. `ext` is one of `compile`,
    /// `time`, or `out`.
    pub fn kernel_artifact(&self, group: &str, kernel: &str, variant: Variant, ext: &str) -> PathBuf {
        self.kernel_output_dir(group, kernel)
            .join(format!("{}_{}.{}", kernel, variant.label(), ext))
    }

    /// Wipe and recreate the scratch workspace.
    ///
    /// No state survives across runs: the whole tree is removed and the
    /// output plus all three build directories are created fresh.
    pub fn prepare(&self) -> std::io::Result<()> {
        if self.root.exists() {
            std::fs::remove_dir_all(&self.root)?;
        }
        std::fs::create_dir_all(self.output_dir())?;
        for variant in Variant::VERIFIED {
            std::fs::create_dir_all(self.build_dir(variant))?;
        }
        Ok(())
    }
}

/// Generate the out-of-source build configurations.
///
/// In verification mode all three variants are configured and array dumping
/// is enabled; in benchmark mode the baseline is skipped (nothing to compare
/// it against numerically) and dumping stays off so I/O does not skew the
/// timings. Each `cmake` invocation logs to `output/cmake_<variant>.log`.
pub fn configure_builds(
    toolchain: &Toolchain,
    tree: &BuildTree,
    suite_dir: &Path,
    dataset: &str,
    verification: bool,
) -> Result<(), CommandError> {
    let dump_arrays = if verification { "ON" } else { "OFF" };
    let base = format!(
        "{} -S {} -DCMAKE_CXX_COMPILER={} -DCMAKE_BUILD_TYPE=Release \
         -DPB_CYCLE_MONITORING=ON -DPB_DUMP_ARRAYS={} -DPB_DATASET_SIZE={}",
        toolchain.cmake,
        suite_dir.display(),
        toolchain.cxx_compiler.display(),
        dump_arrays,
        dataset,
    );
    let kokkos_dir = toolchain.kokkos_install_dir.display();

    if verification {
        report::status("Configuring Standard build");
        let command = format!("{} -B {}", base, tree.build_dir(Variant::Standard).display());
        run_configure(tree, Variant::Standard, &command)?;
    }

    report::status("Configuring Kokkos build");
    let command = format!(
        "{} -B {} -DPB_KOKKOS=ON -DPB_KOKKOS_DIR={} \
         -DKokkos_ENABLE_SERIAL=ON -DKokkos_ENABLE_OPENMP=ON",
        base,
        tree.build_dir(Variant::Kokkos).display(),
        kokkos_dir,
    );
    run_configure(tree, Variant::Kokkos, &command)?;

    report::status("Configuring Polly build");
    let command = format!(
        "{} -B {} -DPB_KOKKOS=ON -DPB_KOKKOS_DIR={} -DPB_USE_POLLY=ON \
         -DKokkos_ENABLE_SERIAL=ON",
        base,
        tree.build_dir(Variant::Polly).display(),
        kokkos_dir,
    );
    run_configure(tree, Variant::Polly, &command)?;

    report::clear_line();
    Ok(())
}

/// Incrementally build one kernel target inside a variant's build tree.
///
/// `make -j <kernel>` with the build directory as working directory; build
/// output is appended to the kernel's `.compile` log.
pub fn build_kernel(
    toolchain: &Toolchain,
    tree: &BuildTree,
    variant: Variant,
    group: &str,
    kernel: &str,
) -> Result<(), CommandError> {
    report::status(&format!(
        "Building {} {} version",
        kernel,
        variant.display()
    ));
    let log = tree.kernel_artifact(group, kernel, variant, "compile");
    ShellCommand::new(format!("{} -j {}", toolchain.make, kernel))
        .current_dir(tree.build_dir(variant))
        .redirect(Redirect::StdoutAppend(log))
        .run()
}

fn run_configure(
    tree: &BuildTree,
    variant: Variant,
    command: &str,
) -> Result<(), CommandError> {
    let log = tree
        .output_dir()
        .join(format!("cmake_{}.log", variant.label()));
    ShellCommand::new(command)
        .redirect(Redirect::StdoutAppend(log))
        .run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    /// Stub cmake that appends its full argument line to a recording file.
    fn stub_cmake(dir: &Path, record: &Path) -> String {
        let path = dir.join("cmake-stub");
        let script = format!("#!/bin/sh\nprintf '%s\\n' \"$*\" >> {}\n", record.display());
        std::fs::write(&path, script).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path.display().to_string()
    }

    fn test_toolchain(dir: &Path, record: &Path) -> Toolchain {
        Toolchain {
            cmake: stub_cmake(dir, record),
            make: "make".to_string(),
            cxx_compiler: PathBuf::from("/usr/bin/c++"),
            kokkos_install_dir: PathBuf::from("/opt/kokkos"),
        }
    }

    #[test]
    fn prepare_wipes_and_recreates_the_workspace() {
        let dir = tempfile::tempdir().unwrap();
        let tree = BuildTree::new(dir.path().join("scratch"));

        tree.prepare().unwrap();
        let stale = tree.output_dir().join("stale.log");
        std::fs::write(&stale, b"leftover").unwrap();

        tree.prepare().unwrap();
        assert!(!stale.exists());
        assert!(tree.build_dir(Variant::Standard).is_dir());
        assert!(tree.build_dir(Variant::Kokkos).is_dir());
        assert!(tree.build_dir(Variant::Polly).is_dir());
        assert!(tree.output_dir().is_dir());
    }

    #[test]
    fn verification_configures_all_three_variants() {
        let dir = tempfile::tempdir().unwrap();
        let record = dir.path().join("invocations.txt");
        let tree = BuildTree::new(dir.path().join("scratch"));
        tree.prepare().unwrap();
        let toolchain = test_toolchain(dir.path(), &record);

        configure_builds(&toolchain, &tree, Path::new("/src/polybench"), "MEDIUM", true).unwrap();

        let recorded = std::fs::read_to_string(&record).unwrap();
        let lines: Vec<&str> = recorded.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("build_std"));
        assert!(lines[1].contains("build_kokkos"));
        assert!(lines[1].contains("-DKokkos_ENABLE_OPENMP=ON"));
        assert!(lines[2].contains("-DPB_USE_POLLY=ON"));
        assert!(lines.iter().all(|l| l.contains("-DPB_DUMP_ARRAYS=ON")));
        assert!(lines.iter().all(|l| l.contains("-DPB_DATASET_SIZE=MEDIUM")));
    }

    #[test]
    fn benchmarking_skips_the_baseline_and_disables_dumping() {
        let dir = tempfile::tempdir().unwrap();
        let record = dir.path().join("invocations.txt");
        let tree = BuildTree::new(dir.path().join("scratch"));
        tree.prepare().unwrap();
        let toolchain = test_toolchain(dir.path(), &record);

        configure_builds(&toolchain, &tree, Path::new("/src/polybench"), "LARGE", false).unwrap();

        let recorded = std::fs::read_to_string(&record).unwrap();
        let lines: Vec<&str> = recorded.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(!recorded.contains("build_std"));
        assert!(lines.iter().all(|l| l.contains("-DPB_DUMP_ARRAYS=OFF")));
    }

    #[test]
    fn configure_logs_land_in_the_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let record = dir.path().join("invocations.txt");
        let tree = BuildTree::new(dir.path().join("scratch"));
        tree.prepare().unwrap();

        // Stub that also writes to stdout so the log file has content
        let cmake = dir.path().join("cmake-noisy");
        let script = format!(
            "#!/bin/sh\necho configuring\nprintf '%s\\n' \"$*\" >> {}\n",
            record.display()
        );
        std::fs::write(&cmake, script).unwrap();
        std::fs::set_permissions(&cmake, std::fs::Permissions::from_mode(0o755)).unwrap();
        let toolchain = Toolchain {
            cmake: cmake.display().to_string(),
            ..test_toolchain(dir.path(), &record)
        };

        configure_builds(&toolchain, &tree, Path::new("/src"), "SMALL", false).unwrap();

        for variant in Variant::BENCHED {
            let log = tree
                .output_dir()
                .join(format!("cmake_{}.log", variant.label()));
            assert_eq!(std::fs::read_to_string(log).unwrap(), "configuring\n");
        }
    }

    #[test]
    fn failing_generator_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let tree = BuildTree::new(dir.path().join("scratch"));
        tree.prepare().unwrap();
        let toolchain = Toolchain {
            cmake: "false".to_string(),
            make: "make".to_string(),
            cxx_compiler: PathBuf::from("c++"),
            kokkos_install_dir: PathBuf::from("/opt/kokkos"),
        };

        assert!(configure_builds(&toolchain, &tree, Path::new("/src"), "SMALL", false).is_err());
    }

    #[test]
    fn tree_paths_mirror_the_group_hierarchy() {
        let tree = BuildTree::new("/tmp/polybench");
        assert_eq!(
            tree.kernel_binary(Variant::Kokkos, "stencils", "jacobi-1d"),
            PathBuf::from("/tmp/polybench/build_kokkos/stencils/jacobi-1d/jacobi-1d")
        );
        assert_eq!(
            tree.kernel_output_dir("linear-algebra/kernels", "2mm"),
            PathBuf::from("/tmp/polybench/output/linear-algebra/kernels/2mm")
        );
    }
}
