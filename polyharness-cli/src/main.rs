//! `polyharness` binary entry point.
//!
//! Any error (a failing configure, a broken build, a crashing kernel, a
//! malformed timing log) propagates here, prints a diagnostic naming the
//! failing step, and exits nonzero.

fn main() -> anyhow::Result<()> {
    polyharness_cli::run()
}
