use crate::domain::TagRef;
use crate::error::{Result, VersionerError};
use crate::git::{Head, Position};
use git2::{BranchType, ErrorCode, ObjectType, Oid, Repository as Git2Repo};
use std::path::Path;
use tracing::debug;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo = Git2Repo::discover(path).map_err(|e| {
            VersionerError::unavailable(format!(
                "Cannot open repository at '{}': {}",
                path.display(),
                e
            ))
        })?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }
}

impl super::Repository for Git2Repository {
    fn current_position(&self) -> Result<Position> {
        let head = self
            .repo
            .head()
            .map_err(|e| VersionerError::unavailable(format!("Cannot read HEAD: {}", e)))?;

        let commit = head.peel_to_commit().map_err(|e| {
            VersionerError::unavailable(format!("HEAD does not point to a commit: {}", e))
        })?;

        let detached = self
            .repo
            .head_detached()
            .map_err(|e| VersionerError::unavailable(format!("Cannot read HEAD: {}", e)))?;

        let head = match head.shorthand() {
            Some(name) if !detached && head.is_branch() => Head::Branch(name.to_string()),
            _ => Head::Detached,
        };

        Ok(Position {
            commit: commit.id(),
            head,
        })
    }

    fn tags(&self) -> Result<Vec<TagRef>> {
        let names = self
            .repo
            .tag_names(None)
            .map_err(|e| VersionerError::traversal(format!("Cannot list tags: {}", e)))?;

        let mut tags = Vec::new();

        for name in names.iter().flatten() {
            let reference = self
                .repo
                .find_reference(&format!("refs/tags/{}", name))
                .map_err(|e| {
                    VersionerError::traversal(format!("Cannot find tag '{}': {}", name, e))
                })?;

            // Peels through any chain of annotated tag objects
            let object = reference.peel(ObjectType::Any).map_err(|e| {
                VersionerError::traversal(format!("Cannot peel tag '{}': {}", name, e))
            })?;

            match object.into_commit() {
                Ok(commit) => {
                    tags.push(TagRef::new(name, commit.id(), commit.time().seconds()));
                }
                Err(object) => {
                    debug!(tag = name, kind = ?object.kind(), "skipping tag that does not target a commit");
                }
            }
        }

        Ok(tags)
    }

    fn parents(&self, commit: Oid) -> Result<Vec<Oid>> {
        let commit = self
            .repo
            .find_commit(commit)
            .map_err(|e| VersionerError::traversal(format!("Cannot read commit {}: {}", commit, e)))?;

        Ok(commit.parent_ids().collect())
    }

    fn branch_head(&self, name: &str) -> Result<Option<Oid>> {
        let branch = match self.repo.find_branch(name, BranchType::Local) {
            Ok(branch) => branch,
            Err(e) if e.code() == ErrorCode::NotFound => return Ok(None),
            Err(e) => {
                return Err(VersionerError::traversal(format!(
                    "Cannot find branch '{}': {}",
                    name, e
                )))
            }
        };

        let commit = branch.into_reference().peel_to_commit().map_err(|e| {
            VersionerError::traversal(format!("Branch '{}' has no commit: {}", name, e))
        })?;

        Ok(Some(commit.id()))
    }

    fn short_hash(&self, commit: Oid) -> Result<String> {
        let object = self
            .repo
            .find_object(commit, None)
            .map_err(|e| VersionerError::traversal(format!("Cannot find object {}: {}", commit, e)))?;

        let short = object.short_id().map_err(|e| {
            VersionerError::traversal(format!("Cannot abbreviate {}: {}", commit, e))
        })?;

        Ok(short.as_str().unwrap_or_default().to_string())
    }

    fn local_branches(&self) -> Result<Vec<String>> {
        let branches = self
            .repo
            .branches(Some(BranchType::Local))
            .map_err(|e| VersionerError::traversal(format!("Cannot list branches: {}", e)))?;

        let mut names = Vec::new();
        for entry in branches {
            let (branch, _) =
                entry.map_err(|e| VersionerError::traversal(format!("Cannot read branch: {}", e)))?;

            if let Ok(Some(name)) = branch.name() {
                names.push(name.to_string());
            }
        }

        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::Repository;
    use git2::{RepositoryInitOptions, Signature, Time};
    use tempfile::TempDir;

    fn init_repo() -> (TempDir, Git2Repo) {
        let temp_dir = TempDir::new().expect("Could not create temp dir");
        let mut opts = RepositoryInitOptions::new();
        opts.initial_head("main");
        let repo = Git2Repo::init_opts(temp_dir.path(), &opts).expect("Could not init git repo");
        (temp_dir, repo)
    }

    fn commit(repo: &Git2Repo, parents: &[Oid], time: i64) -> Oid {
        let sig = Signature::new("Test User", "test@example.com", &Time::new(time, 0)).unwrap();
        let tree_id = repo.treebuilder(None).unwrap().write().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let parents: Vec<_> = parents.iter().map(|p| repo.find_commit(*p).unwrap()).collect();
        let parent_refs: Vec<_> = parents.iter().collect();
        repo.commit(Some("HEAD"), &sig, &sig, "commit", &tree, &parent_refs)
            .unwrap()
    }

    #[test]
    fn test_open_outside_repository_is_unavailable() {
        let temp_dir = TempDir::new().unwrap();
        let result = Git2Repository::open(temp_dir.path().join("missing"));
        assert!(matches!(
            result,
            Err(VersionerError::RepositoryUnavailable(_))
        ));
    }

    #[test]
    fn test_empty_repository_has_no_position() {
        let (_dir, repo) = init_repo();
        let repo = Git2Repository::from_git2(repo);
        assert!(matches!(
            repo.current_position(),
            Err(VersionerError::RepositoryUnavailable(_))
        ));
    }

    #[test]
    fn test_position_parents_and_tags() {
        let (_dir, repo) = init_repo();
        let first = commit(&repo, &[], 1_000);
        let second = commit(&repo, &[first], 2_000);

        {
            let sig =
                Signature::new("Test User", "test@example.com", &Time::new(3_000, 0)).unwrap();
            let target = repo.find_object(first, None).unwrap();
            repo.tag("v1.0.0", &target, &sig, "annotated", false).unwrap();
            let second_obj = repo.find_object(second, None).unwrap();
            repo.tag_lightweight("v1.1.0", &second_obj, false).unwrap();
        }

        let repo = Git2Repository::from_git2(repo);

        let position = repo.current_position().unwrap();
        assert_eq!(position.commit, second);
        assert_eq!(position.head, Head::Branch("main".to_string()));
        assert_eq!(repo.parents(second).unwrap(), vec![first]);
        assert!(repo.parents(first).unwrap().is_empty());

        let mut tags = repo.tags().unwrap();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        assert_eq!(tags[0], TagRef::new("v1.0.0", first, 1_000));
        assert_eq!(tags[1], TagRef::new("v1.1.0", second, 2_000));
    }

    #[test]
    fn test_branch_head_missing_is_none() {
        let (_dir, repo) = init_repo();
        let first = commit(&repo, &[], 1_000);
        let repo = Git2Repository::from_git2(repo);

        assert_eq!(repo.branch_head("main").unwrap(), Some(first));
        assert_eq!(repo.branch_head("master").unwrap(), None);
        assert!(matches!(
            repo.require_branch_head("master"),
            Err(VersionerError::ReferenceNotFound(_))
        ));
        assert_eq!(repo.local_branches().unwrap(), vec!["main".to_string()]);
    }

    #[test]
    fn test_detached_head() {
        let (_dir, repo) = init_repo();
        let first = commit(&repo, &[], 1_000);
        repo.set_head_detached(first).unwrap();
        let repo = Git2Repository::from_git2(repo);

        let position = repo.current_position().unwrap();
        assert_eq!(position.head, Head::Detached);
        assert_eq!(repo.short_hash(first).unwrap().len(), 7);
    }
}
