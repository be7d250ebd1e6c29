//! One whole invocation, independent of argument parsing
//!
//! `main.rs` maps parsed flags and configuration onto [GenerateArgs]; tests
//! call [run_generate] directly.

use std::path::PathBuf;

use tracing::debug;

use crate::domain::{Selection, VersionInfo};
use crate::error::Result;
use crate::git::{open_repository, Backend};
use crate::resolver::VersionResolver;
use crate::writer::{write_version, OutputTarget};

/// Arguments for one version generation run
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateArgs {
    /// Directory inside the repository to inspect
    pub repo_path: PathBuf,

    /// Which adapter reads the repository
    pub backend: Backend,

    /// Name a detached HEAD after a containing local branch
    pub resolve_detached: bool,

    /// Scheme or legacy formatting
    pub selection: Selection,

    /// Write the version to a file instead of returning it for printing
    pub output: Option<OutputTarget>,
}

impl Default for GenerateArgs {
    fn default() -> Self {
        GenerateArgs {
            repo_path: PathBuf::from("."),
            backend: Backend::default(),
            resolve_detached: true,
            selection: Selection::default(),
            output: None,
        }
    }
}

/// Generate a version and, if requested, write it out
///
/// # Returns
/// * `Ok(VersionInfo)` - The resolved version; already written if `output` was set
/// * `Err` - If the repository cannot be read or the output cannot be written
pub fn run_generate(args: &GenerateArgs) -> Result<VersionInfo> {
    debug!(path = %args.repo_path.display(), backend = ?args.backend, "opening repository");
    let repo = open_repository(args.backend, &args.repo_path)?;

    let info = VersionResolver::new(repo.as_ref())
        .resolve_detached(args.resolve_detached)
        .resolve(&args.selection)?;

    if let Some(target) = &args.output {
        write_version(target, &info.version)?;
    }

    Ok(info)
}
