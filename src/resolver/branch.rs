use crate::domain::branch::DETACHED;
use crate::error::Result;
use crate::git::{Head, Position, Repository};
use crate::resolver::ancestry::ancestors;
use git2::Oid;
use tracing::debug;

/// Name of the branch the current position is on
///
/// A detached HEAD is reported as `detached` unless `lookup` is set and a
/// local branch contains the commit; the first such branch by name wins.
pub fn current_branch_name<R: Repository + ?Sized>(
    repo: &R,
    position: &Position,
    lookup: bool,
) -> Result<String> {
    match &position.head {
        Head::Branch(name) => Ok(name.clone()),
        Head::Detached if lookup => {
            let branch = containing_branch(repo, position.commit)?;
            debug!(branch = ?branch, "resolved detached HEAD");
            Ok(branch.unwrap_or_else(|| DETACHED.to_string()))
        }
        Head::Detached => Ok(DETACHED.to_string()),
    }
}

fn containing_branch<R: Repository + ?Sized>(repo: &R, commit: Oid) -> Result<Option<String>> {
    let mut names = repo.local_branches()?;
    names.sort();

    for name in names {
        let Some(head) = repo.branch_head(&name)? else {
            continue;
        };

        for oid in ancestors(repo, head) {
            if oid? == commit {
                return Ok(Some(name));
            }
        }
    }

    Ok(None)
}
