use crate::error::Result;
use crate::git::Repository;
use git2::Oid;
use std::collections::HashSet;

/// Preorder walk over every ancestor of a commit, the commit included
///
/// All parent edges are followed, first parent first. Each commit is
/// yielded at most once. A read failure is yielded once and ends the walk.
pub struct Ancestors<'r, R: Repository + ?Sized> {
    repo: &'r R,
    stack: Vec<Oid>,
    seen: HashSet<Oid>,
}

impl<'r, R: Repository + ?Sized> Ancestors<'r, R> {
    pub fn new(repo: &'r R, start: Oid) -> Self {
        Ancestors {
            repo,
            stack: vec![start],
            seen: HashSet::new(),
        }
    }
}

impl<R: Repository + ?Sized> Iterator for Ancestors<'_, R> {
    type Item = Result<Oid>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(oid) = self.stack.pop() {
            if !self.seen.insert(oid) {
                continue;
            }

            match self.repo.parents(oid) {
                Ok(parents) => {
                    let seen = &self.seen;
                    self.stack
                        .extend(parents.into_iter().rev().filter(|p| !seen.contains(p)));
                    return Some(Ok(oid));
                }
                Err(e) => {
                    self.stack.clear();
                    return Some(Err(e));
                }
            }
        }

        None
    }
}

/// Walk ancestors of `start` in preorder
pub fn ancestors<R: Repository + ?Sized>(repo: &R, start: Oid) -> Ancestors<'_, R> {
    Ancestors::new(repo, start)
}

/// Collect the full ancestor set of `start`, `start` included
pub fn ancestor_set<R: Repository + ?Sized>(repo: &R, start: Oid) -> Result<HashSet<Oid>> {
    ancestors(repo, start).collect()
}
