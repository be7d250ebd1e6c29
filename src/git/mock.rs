use crate::domain::TagRef;
use crate::error::{Result, VersionerError};
use crate::git::{Head, Position, Repository};
use git2::Oid;
use std::collections::HashMap;

/// Mock repository for testing without actual git operations
///
/// Holds an explicit commit graph; tags take the timestamp of their
/// target commit when listed, like the real adapters.
pub struct MockRepository {
    commits: HashMap<Oid, (Vec<Oid>, i64)>,
    tags: Vec<(String, Oid)>,
    branch_heads: HashMap<String, Oid>,
    head: Option<Position>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            commits: HashMap::new(),
            tags: Vec::new(),
            branch_heads: HashMap::new(),
            head: None,
        }
    }

    /// Add a commit with its parents (first parent first) and timestamp
    pub fn add_commit(&mut self, oid: Oid, parents: &[Oid], time: i64) {
        self.commits.insert(oid, (parents.to_vec(), time));
    }

    /// Add a tag pointing to an OID
    pub fn add_tag(&mut self, name: impl Into<String>, oid: Oid) {
        self.tags.push((name.into(), oid));
    }

    /// Set a branch head
    pub fn set_branch_head(&mut self, branch: impl Into<String>, oid: Oid) {
        self.branch_heads.insert(branch.into(), oid);
    }

    /// Check out a branch: HEAD follows the branch head
    pub fn checkout(&mut self, branch: &str) {
        if let Some(oid) = self.branch_heads.get(branch) {
            self.head = Some(Position {
                commit: *oid,
                head: Head::Branch(branch.to_string()),
            });
        }
    }

    /// Detach HEAD at a commit
    pub fn detach(&mut self, oid: Oid) {
        self.head = Some(Position {
            commit: oid,
            head: Head::Detached,
        });
    }

    fn commit(&self, oid: Oid) -> Result<&(Vec<Oid>, i64)> {
        self.commits
            .get(&oid)
            .ok_or_else(|| VersionerError::traversal(format!("Commit {} not found", oid)))
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn current_position(&self) -> Result<Position> {
        self.head
            .clone()
            .ok_or_else(|| VersionerError::unavailable("HEAD does not point to a commit"))
    }

    fn tags(&self) -> Result<Vec<TagRef>> {
        self.tags
            .iter()
            .map(|(name, oid)| {
                let (_, time) = self.commit(*oid)?;
                Ok(TagRef::new(name.clone(), *oid, *time))
            })
            .collect()
    }

    fn parents(&self, commit: Oid) -> Result<Vec<Oid>> {
        Ok(self.commit(commit)?.0.clone())
    }

    fn branch_head(&self, name: &str) -> Result<Option<Oid>> {
        Ok(self.branch_heads.get(name).copied())
    }

    fn short_hash(&self, commit: Oid) -> Result<String> {
        self.commit(commit)?;
        Ok(commit.to_string()[..7].to_string())
    }

    fn local_branches(&self) -> Result<Vec<String>> {
        Ok(self.branch_heads.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oid(n: u8) -> Oid {
        Oid::from_bytes(&[n; 20]).unwrap()
    }

    #[test]
    fn test_mock_repository_basic() {
        let mut repo = MockRepository::new();
        repo.add_commit(oid(1), &[], 100);
        repo.set_branch_head("main", oid(1));
        repo.checkout("main");

        let position = repo.current_position().unwrap();
        assert_eq!(position.commit, oid(1));
        assert_eq!(position.head, Head::Branch("main".to_string()));
        assert_eq!(repo.branch_head("main").unwrap(), Some(oid(1)));
        assert_eq!(repo.branch_head("master").unwrap(), None);
    }

    #[test]
    fn test_mock_repository_tags_take_commit_time() {
        let mut repo = MockRepository::new();
        repo.add_commit(oid(2), &[], 250);
        repo.add_tag("v1.0.0", oid(2));

        assert_eq!(repo.tags().unwrap(), vec![TagRef::new("v1.0.0", oid(2), 250)]);
    }

    #[test]
    fn test_mock_repository_missing_commit_is_traversal_error() {
        let repo = MockRepository::new();
        assert!(matches!(
            repo.parents(oid(9)),
            Err(VersionerError::GraphTraversal(_))
        ));
    }

    #[test]
    fn test_mock_repository_short_hash() {
        let mut repo = MockRepository::new();
        repo.add_commit(oid(0xab), &[], 0);
        assert_eq!(repo.short_hash(oid(0xab)).unwrap(), "abababa");
    }

    #[test]
    fn test_mock_repository_default_has_no_head() {
        let repo = MockRepository::default();
        assert!(matches!(
            repo.current_position(),
            Err(VersionerError::RepositoryUnavailable(_))
        ));
        assert!(repo.tags().unwrap().is_empty());
    }
}
