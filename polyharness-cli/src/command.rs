//! Command Runner
//!
//! Executes one external shell command at a time and waits for it. Output
//! redirection is an explicit policy value rather than a pair of optional
//! paths, so exactly one of the four capture modes applies and each is
//! testable on its own.
//!
//! A nonzero exit status is always an error carrying the offending command
//! text; callers propagate it and the whole run stops. There is no retry.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

/// Where a child process's stdout/stderr go.
///
/// Log files are opened in append mode: benchmark iterations accumulate one
/// timing sample per run in the same file.
#[derive(Debug, Clone)]
pub enum Redirect {
    /// Suppress all child output
    Discard,
    /// Append stdout to the given file, with stderr merged into it
    StdoutAppend(PathBuf),
    /// Append stderr to the given file, suppressing stdout
    StderrAppend(PathBuf),
    /// Append stdout and stderr to separate files
    SplitAppend {
        /// File receiving stdout
        stdout: PathBuf,
        /// File receiving stderr
        stderr: PathBuf,
    },
}

/// Errors from running an external command
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// A redirection target could not be opened
    #[error("failed to open log file {path}: {source}")]
    Log {
        /// Path of the log file
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The shell itself could not be spawned
    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        /// The command line that failed to spawn
        command: String,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The command ran but exited with a nonzero status
    #[error("command `{command}` failed with {status}")]
    Failed {
        /// The failing command line
        command: String,
        /// Exit status reported by the shell
        status: ExitStatus,
    },
}

/// One external command, run through `sh -c`.
#[derive(Debug)]
pub struct ShellCommand {
    command: String,
    current_dir: Option<PathBuf>,
    env: Vec<(String, String)>,
    redirect: Redirect,
}

impl ShellCommand {
    /// Create a command with output discarded by default.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            current_dir: None,
            env: Vec::new(),
            redirect: Redirect::Discard,
        }
    }

    /// Run the command from `dir` instead of the harness's own directory.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Add environment variables for the child process.
    pub fn envs(mut self, vars: &[(&str, &str)]) -> Self {
        self.env
            .extend(vars.iter().map(|(k, v)| (k.to_string(), v.to_string())));
        self
    }

    /// Select the output redirection policy.
    pub fn redirect(mut self, redirect: Redirect) -> Self {
        self.redirect = redirect;
        self
    }

    /// Run the command and wait for it, failing on nonzero exit.
    pub fn run(&self) -> Result<(), CommandError> {
        let mut child = Command::new("sh");
        child.arg("-c").arg(&self.command);

        if let Some(dir) = &self.current_dir {
            child.current_dir(dir);
        }
        for (key, value) in &self.env {
            child.env(key, value);
        }

        match &self.redirect {
            Redirect::Discard => {
                child.stdout(Stdio::null()).stderr(Stdio::null());
            }
            Redirect::StdoutAppend(path) => {
                let log = append_log(path)?;
                let merged = log.try_clone().map_err(|source| CommandError::Log {
                    path: path.clone(),
                    source,
                })?;
                child.stdout(log).stderr(merged);
            }
            Redirect::StderrAppend(path) => {
                child.stdout(Stdio::null()).stderr(append_log(path)?);
            }
            Redirect::SplitAppend { stdout, stderr } => {
                child.stdout(append_log(stdout)?).stderr(append_log(stderr)?);
            }
        }

        tracing::debug!(command = %self.command, "running external command");

        let status = child.status().map_err(|source| CommandError::Spawn {
            command: self.command.clone(),
            source,
        })?;

        if !status.success() {
            return Err(CommandError::Failed {
                command: self.command.clone(),
                status,
            });
        }
        Ok(())
    }
}

fn append_log(path: &Path) -> Result<File, CommandError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| CommandError::Log {
            path: path.to_path_buf(),
            source,
        })
}
