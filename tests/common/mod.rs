//! Real repositories built with git2 inside a temp directory
#![allow(dead_code)]

use git2::{Oid, Repository, RepositoryInitOptions, Signature, Time};
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

pub struct TestRepo {
    pub repo: Repository,
    pub dir: TempDir,
}

impl TestRepo {
    /// An empty repository whose unborn HEAD is `main`
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Could not create temp dir");
        let mut opts = RepositoryInitOptions::new();
        opts.initial_head("main");
        let repo = Repository::init_opts(dir.path(), &opts).expect("Could not init git repo");
        TestRepo { repo, dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    fn signature(time: i64) -> Signature<'static> {
        Signature::new("Test User", "test@example.com", &Time::new(time, 0)).unwrap()
    }

    /// Create a commit with an empty tree without moving any ref
    pub fn commit(&self, parents: &[Oid], time: i64) -> Oid {
        let sig = Self::signature(time);
        let tree_id = self.repo.treebuilder(None).unwrap().write().unwrap();
        let tree = self.repo.find_tree(tree_id).unwrap();
        let parents: Vec<_> = parents
            .iter()
            .map(|p| self.repo.find_commit(*p).unwrap())
            .collect();
        let parent_refs: Vec<_> = parents.iter().collect();
        self.repo
            .commit(None, &sig, &sig, &format!("commit at {}", time), &tree, &parent_refs)
            .unwrap()
    }

    /// A linear chain of `len` commits on top of `parent`, times stepping by 100
    pub fn chain(&self, parent: Option<Oid>, len: usize, start_time: i64) -> Vec<Oid> {
        let mut oids = Vec::with_capacity(len);
        let mut previous = parent;
        for i in 0..len {
            let parents: Vec<Oid> = previous.into_iter().collect();
            let oid = self.commit(&parents, start_time + i as i64 * 100);
            oids.push(oid);
            previous = Some(oid);
        }
        oids
    }

    pub fn branch(&self, name: &str, target: Oid) {
        self.repo
            .reference(&format!("refs/heads/{}", name), target, true, "test branch")
            .unwrap();
    }

    pub fn checkout(&self, name: &str) {
        self.repo.set_head(&format!("refs/heads/{}", name)).unwrap();
    }

    pub fn detach(&self, target: Oid) {
        self.repo.set_head_detached(target).unwrap();
    }

    pub fn lightweight_tag(&self, name: &str, target: Oid) {
        self.repo
            .reference(&format!("refs/tags/{}", name), target, true, "test tag")
            .unwrap();
    }

    pub fn annotated_tag(&self, name: &str, target: Oid, time: i64) {
        let object = self.repo.find_object(target, None).unwrap();
        self.repo
            .tag(name, &object, &Self::signature(time), "release", true)
            .unwrap();
    }
}

/// Whether a `git` executable can be run
pub fn system_git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// main: 8 commits with v1.2.3 on the third; feature/auth: 3 commits forked from the fifth
pub fn standard_repo() -> (TestRepo, Vec<Oid>, Vec<Oid>) {
    let repo = TestRepo::new();
    let main = repo.chain(None, 8, 1_700_000_000);
    let feature = repo.chain(Some(main[4]), 3, 1_700_001_000);
    repo.branch("main", main[7]);
    repo.branch("feature/auth", feature[2]);
    repo.lightweight_tag("v1.2.3", main[2]);
    repo.checkout("main");
    (repo, main, feature)
}
