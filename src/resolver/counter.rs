use crate::domain::ResolvedTag;
use crate::error::Result;
use crate::git::Repository;
use crate::resolver::ancestry::ancestors;
use git2::Oid;

/// Count commits between `head` and the resolved tag's target
///
/// Every commit the ancestor walk visits before meeting the target is
/// counted, `head` included and the target excluded. Without a tag the
/// whole ancestor set of `head` is counted.
pub fn count_commits_since<R: Repository + ?Sized>(
    repo: &R,
    head: Oid,
    tag: &ResolvedTag,
) -> Result<usize> {
    let Some(target) = tag.target() else {
        return ancestors(repo, head).try_fold(0, |count, oid| oid.map(|_| count + 1));
    };

    if target == head {
        return Ok(0);
    }

    let mut count = 0;
    for oid in ancestors(repo, head) {
        if oid? == target {
            break;
        }
        count += 1;
    }

    Ok(count)
}
