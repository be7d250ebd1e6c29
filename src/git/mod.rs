//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the read-only view of
//! a repository that version resolution needs, so the resolver and formatter
//! exist exactly once regardless of how repository state is read.
//!
//! # Overview
//!
//! The primary abstraction is the [Repository] trait. The concrete
//! implementations include:
//!
//! - [repository::Git2Repository]: reads the object store through the `git2` crate
//! - [system::SystemGitRepository]: invokes the `git` executable
//! - [mock::MockRepository]: an in-memory commit graph for testing
//!
//! # Usage
//!
//! Most code should depend on the [Repository] trait rather than concrete
//! implementations; [open_repository] picks an adapter from a [Backend].
//!
//! ```rust
//! # use git_versioner::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> git_versioner::Result<()> {
//! let position = repo.current_position()?;
//! let parents = repo.parents(position.commit)?;
//! println!("{} has {} parent(s)", repo.short_hash(position.commit)?, parents.len());
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;
pub mod system;

pub use mock::MockRepository;
pub use repository::Git2Repository;
pub use system::SystemGitRepository;

use crate::domain::TagRef;
use crate::error::{Result, VersionerError};
use git2::Oid;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What HEAD points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Head {
    /// HEAD is a symbolic ref to a local branch
    Branch(String),
    /// HEAD points directly at a commit
    Detached,
}

/// The commit HEAD resolves to, and how it got there
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub commit: Oid,
    pub head: Head,
}

/// Which adapter reads repository state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// The `git` executable found on `PATH`
    #[default]
    System,
    /// The embedded libgit2 bindings
    Git2,
}

/// Read-only repository capability consumed by the resolver
///
/// All methods are synchronous. Implementations map their underlying
/// failures onto [VersionerError]: failure to open or read HEAD is
/// [VersionerError::RepositoryUnavailable], failure to read an object while
/// walking is [VersionerError::GraphTraversal].
///
/// ## Implementations
///
/// - [Git2Repository](repository::Git2Repository)
/// - [SystemGitRepository](system::SystemGitRepository)
/// - [MockRepository](mock::MockRepository)
pub trait Repository {
    /// Get the commit HEAD resolves to and the branch it is on, if any
    fn current_position(&self) -> Result<Position>;

    /// Get all tags that (possibly through annotation) target a commit
    ///
    /// Tags pointing at trees or blobs are skipped. Order is unspecified.
    fn tags(&self) -> Result<Vec<TagRef>>;

    /// Get every parent of a commit, first parent first
    ///
    /// # Example
    /// ```rust
    /// # use git_versioner::git::Repository;
    /// # fn example<R: Repository>(repo: &R) -> git_versioner::Result<()> {
    /// let head = repo.current_position()?.commit;
    /// if repo.parents(head)?.len() > 1 {
    ///     println!("HEAD is a merge commit");
    /// }
    /// # Ok(())
    /// # }
    /// ```
    fn parents(&self, commit: Oid) -> Result<Vec<Oid>>;

    /// Find the head commit of a local branch
    ///
    /// # Returns
    /// * `Ok(Some(Oid))` - The branch exists
    /// * `Ok(None)` - No such branch
    /// * `Err` - The branch could not be read
    fn branch_head(&self, name: &str) -> Result<Option<Oid>>;

    /// Get the abbreviated hash of a commit
    fn short_hash(&self, commit: Oid) -> Result<String>;

    /// Get the names of all local branches
    fn local_branches(&self) -> Result<Vec<String>>;

    /// Find the head commit of a branch that must exist
    ///
    /// # Returns
    /// * `Err(VersionerError::ReferenceNotFound)` - If the branch doesn't exist
    fn require_branch_head(&self, name: &str) -> Result<Oid> {
        self.branch_head(name)?
            .ok_or_else(|| VersionerError::not_found(format!("Branch not found: {}", name)))
    }
}

/// Open the repository at `path` with the requested adapter
pub fn open_repository(backend: Backend, path: &Path) -> Result<Box<dyn Repository>> {
    match backend {
        Backend::Git2 => Ok(Box::new(Git2Repository::open(path)?)),
        Backend::System => Ok(Box::new(SystemGitRepository::open(path)?)),
    }
}
