//! Resolution engine: repository view in, version info out

pub mod ancestry;
pub mod branch;
pub mod counter;
pub mod tag;

pub use counter::count_commits_since;
pub use tag::resolve_tag;

use crate::domain::{BranchContext, Scheme, Selection, VersionInfo, VersionParts};
use crate::error::Result;
use crate::git::Repository;
use crate::version::{format_legacy, DateSource, SystemDate, VersionFormatter};
use tracing::{debug, info, warn};

/// Runs one resolution pass against a repository view
pub struct VersionResolver<'r, R: Repository + ?Sized, D = SystemDate> {
    repo: &'r R,
    formatter: VersionFormatter<D>,
    resolve_detached: bool,
}

impl<'r, R: Repository + ?Sized> VersionResolver<'r, R, SystemDate> {
    /// Create a resolver that reads the wall clock for CalVer
    pub fn new(repo: &'r R) -> Self {
        Self::with_dates(repo, SystemDate)
    }
}

impl<'r, R: Repository + ?Sized, D: DateSource> VersionResolver<'r, R, D> {
    /// Create a resolver with an explicit date source
    pub fn with_dates(repo: &'r R, dates: D) -> Self {
        VersionResolver {
            repo,
            formatter: VersionFormatter::new(dates),
            resolve_detached: true,
        }
    }

    /// Whether a detached HEAD is named after a local branch containing it
    pub fn resolve_detached(mut self, enabled: bool) -> Self {
        self.resolve_detached = enabled;
        self
    }

    /// Resolve branch, tag, distance and hash, then format them
    ///
    /// # Returns
    /// * `Ok(VersionInfo)` - The complete resolution result
    /// * `Err` - If the repository cannot be read; no partial result is returned
    pub fn resolve(&self, selection: &Selection) -> Result<VersionInfo> {
        let position = self.repo.current_position()?;
        let branch =
            branch::current_branch_name(self.repo, &position, self.resolve_detached)?;
        let short_hash = self.repo.short_hash(position.commit)?;

        let tag = resolve_tag(self.repo, position.commit, &branch)?;
        let distance = count_commits_since(self.repo, position.commit, &tag)?;
        debug!(branch = %branch, tag = tag.name(), distance, "resolved version components");

        let parts = VersionParts {
            tag: tag.name(),
            distance,
            branch: &branch,
            short_hash: &short_hash,
        };

        let version = match selection {
            Selection::Scheme(spec) => {
                let version = self.formatter.format(&parts, spec);
                if spec.scheme == Scheme::Semver {
                    check_semver(&version);
                }
                version
            }
            Selection::Legacy { docker } => {
                format_legacy(parts.tag, distance, &BranchContext::new(&branch), *docker)
            }
        };
        info!(version = %version, "generated version");

        Ok(VersionInfo {
            tag: tag.name().to_string(),
            branch,
            distance,
            short_hash,
            version,
        })
    }
}

/// Warn when a semver-scheme result is not a valid semantic version
fn check_semver(version: &str) {
    let bare = version.strip_prefix('v').unwrap_or(version);
    if let Err(e) = semver::Version::parse(bare) {
        warn!(version, error = %e, "generated version is not valid semver");
    }
}
