//! Kernel group configuration
//!
//! The kernel selection is injectable: a TOML file of `[[group]]` tables
//! maps a group directory (as laid out in the PolyBench source tree) to an
//! ordered list of kernel names. Without a file, a built-in default covers
//! the stencil kernels; `init-groups` writes a template listing the whole
//! suite.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// One named kernel category, matching a subdirectory of the suite
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KernelGroup {
    /// Group directory relative to the suite root (e.g. `linear-algebra/kernels`)
    pub name: String,
    /// Ordered kernel names within the group
    pub kernels: Vec<String>,
}

/// The full ordered kernel selection for one run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KernelGroups {
    /// Groups in declaration order
    #[serde(rename = "group")]
    pub groups: Vec<KernelGroup>,
}

impl Default for KernelGroups {
    fn default() -> Self {
        Self {
            groups: vec![KernelGroup {
                name: "stencils".to_string(),
                kernels: [
                    "adi",
                    "fdtd-2d",
                    "heat-3d",
                    "jacobi-1d",
                    "jacobi-2d",
                    "seidel-2d",
                ]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            }],
        }
    }
}

impl KernelGroups {
    /// Load a kernel selection from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let groups: Self = toml::from_str(&content)?;
        Ok(groups)
    }

    /// Keep only kernels whose name matches `filter`, dropping groups left
    /// empty. Group order and kernel order are preserved.
    pub fn filtered(&self, filter: &regex::Regex) -> Self {
        let groups = self
            .groups
            .iter()
            .map(|group| KernelGroup {
                name: group.name.clone(),
                kernels: group
                    .kernels
                    .iter()
                    .filter(|kernel| filter.is_match(kernel))
                    .cloned()
                    .collect(),
            })
            .filter(|group| !group.kernels.is_empty())
            .collect();
        Self { groups }
    }

    /// Total number of selected kernels across all groups.
    pub fn kernel_count(&self) -> usize {
        self.groups.iter().map(|g| g.kernels.len()).sum()
    }

    /// Template covering the full PolyBench suite, for `init-groups`.
    pub fn template_toml() -> String {
        r#"# Polyharness kernel selection
# Each [[group]] names a PolyBench source subdirectory and the kernels to
# build and run from it, in order. Delete the groups you do not want.

[[group]]
name = "datamining"
kernels = ["correlation", "covariance"]

[[group]]
name = "linear-algebra/kernels"
kernels = ["2mm", "3mm", "atax", "bicg", "doitgen", "mvt"]

[[group]]
name = "linear-algebra/solvers"
kernels = ["cholesky", "durbin", "gramschmidt", "lu", "ludcmp", "trisolv"]

[[group]]
name = "medley"
kernels = ["deriche", "floyd-warshall", "nussinov"]

[[group]]
name = "stencils"
kernels = ["adi", "fdtd-2d", "heat-3d", "jacobi-1d", "jacobi-2d", "seidel-2d"]
"#
        .to_string()
    }
}
