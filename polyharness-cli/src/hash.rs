//! Hash Comparator
//!
//! Byte-exact equivalence of kernel array dumps via SHA-256. The baseline
//! dump is the oracle: each optimized variant either matches it or is
//! flagged. There is no tolerance for floating-point drift; the kernels are
//! expected to dump bit-identical output when the transformations are sound.

use polyharness_report::{GREEN, NO_COLOR, RED};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// Errors from hashing a dump file
#[derive(Debug, thiserror::Error)]
pub enum HashError {
    /// A dump file could not be read
    #[error("failed to read dump file {path}: {source}")]
    Read {
        /// Path of the dump file
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

/// SHA-256 digest of a file's raw bytes.
///
/// Reads the whole file into memory; dump files are small numeric output.
pub fn digest_file(path: &Path) -> Result<[u8; 32], HashError> {
    let bytes = std::fs::read(path).map_err(|source| HashError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Sha256::digest(&bytes).into())
}

/// Which optimized variants reproduced the baseline dump
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DumpComparison {
    /// Kokkos dump hashed identically to the baseline
    pub kokkos_matches: bool,
    /// Polly dump hashed identically to the baseline
    pub polly_matches: bool,
}

impl DumpComparison {
    /// All three dumps were byte-identical.
    pub fn all_match(&self) -> bool {
        self.kokkos_matches && self.polly_matches
    }

    /// Colored result marker for the verification table: green `KP` on full
    /// agreement, struck red letters for each diverging variant.
    pub fn marker(&self) -> String {
        if self.all_match() {
            return format!("{GREEN}KP{NO_COLOR}");
        }
        let mut marker = String::new();
        if !self.kokkos_matches {
            marker.push_str(&format!("{RED}K\u{336}{NO_COLOR}"));
        }
        if !self.polly_matches {
            marker.push_str(&format!("{RED}P\u{336}{NO_COLOR}"));
        }
        marker
    }
}

/// Hash the three per-variant dump files and compare each optimized variant
/// against the baseline.
pub fn compare_dumps(
    standard: &Path,
    kokkos: &Path,
    polly: &Path,
) -> Result<DumpComparison, HashError> {
    let reference = digest_file(standard)?;
    Ok(DumpComparison {
        kokkos_matches: digest_file(kokkos)? == reference,
        polly_matches: digest_file(polly)? == reference,
    })
}
