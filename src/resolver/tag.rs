use crate::domain::branch::{is_trunk, TRUNK_HEADS};
use crate::domain::{ResolvedTag, TagRef};
use crate::error::Result;
use crate::git::Repository;
use crate::resolver::ancestry::{ancestor_set, ancestors};
use git2::Oid;
use std::cmp::Ordering;
use tracing::debug;

/// Find the tag that applies to `head` on `branch`
///
/// Trunk branches search from `head` itself. Other branches search from the
/// rebase point against `main` (or `master`), falling back to `head` when
/// there is no trunk branch or no common ancestor.
pub fn resolve_tag<R: Repository + ?Sized>(
    repo: &R,
    head: Oid,
    branch: &str,
) -> Result<ResolvedTag> {
    if is_trunk(branch) {
        return newest_reachable_tag(repo, head);
    }

    let Some((trunk, trunk_head)) = find_trunk_head(repo)? else {
        debug!(branch, "no trunk branch, searching tags from HEAD");
        return newest_reachable_tag(repo, head);
    };

    match rebase_point(repo, head, trunk_head)? {
        Some(point) => {
            debug!(branch, trunk, rebase_point = %point, "searching tags from rebase point");
            newest_reachable_tag(repo, point)
        }
        None => {
            debug!(branch, trunk, "no common ancestor with trunk, searching tags from HEAD");
            newest_reachable_tag(repo, head)
        }
    }
}

/// Look up `main`, then `master`
fn find_trunk_head<R: Repository + ?Sized>(repo: &R) -> Result<Option<(&'static str, Oid)>> {
    for name in TRUNK_HEADS {
        if let Some(oid) = repo.branch_head(name)? {
            return Ok(Some((name, oid)));
        }
    }
    Ok(None)
}

/// First ancestor of `head`, in walk order, that is also an ancestor of `trunk_head`
///
/// On linear histories this is the merge base. With several merge paths it
/// is only the first shared commit the preorder walk meets.
pub fn rebase_point<R: Repository + ?Sized>(
    repo: &R,
    head: Oid,
    trunk_head: Oid,
) -> Result<Option<Oid>> {
    let trunk = ancestor_set(repo, trunk_head)?;

    for oid in ancestors(repo, head) {
        let oid = oid?;
        if trunk.contains(&oid) {
            return Ok(Some(oid));
        }
    }

    Ok(None)
}

/// Newest tag whose target is `start` or one of its ancestors
pub fn newest_reachable_tag<R: Repository + ?Sized>(repo: &R, start: Oid) -> Result<ResolvedTag> {
    let tags = repo.tags()?;
    if tags.is_empty() {
        debug!("repository has no tags");
        return Ok(ResolvedTag::Sentinel);
    }

    let reachable = ancestor_set(repo, start)?;
    let candidates: Vec<TagRef> = tags
        .into_iter()
        .filter(|tag| reachable.contains(&tag.target))
        .collect();
    debug!(candidates = candidates.len(), start = %start, "reachable tags");

    Ok(candidates
        .into_iter()
        .min_by(newest_first)
        .map(ResolvedTag::Found)
        .unwrap_or(ResolvedTag::Sentinel))
}

/// Newer target commit first; equal timestamps fall back to tag name, ascending
fn newest_first(a: &TagRef, b: &TagRef) -> Ordering {
    b.time.cmp(&a.time).then_with(|| a.name.cmp(&b.name))
}
