use git2::Oid;

/// Reserved tag name reported when no tag is reachable
pub const SENTINEL_TAG: &str = "v0.0.0";

/// Represents a git tag resolved to the commit it targets
///
/// Annotated tags are peeled, so `target` is always a commit and `time`
/// is that commit's timestamp (seconds since the epoch).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRef {
    pub name: String,
    pub target: Oid,
    pub time: i64,
}

impl TagRef {
    /// Create a new tag reference
    pub fn new(name: impl Into<String>, target: Oid, time: i64) -> Self {
        TagRef {
            name: name.into(),
            target,
            time,
        }
    }
}

/// Outcome of tag resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedTag {
    /// A real tag reachable from the search start
    Found(TagRef),
    /// No tag was reachable
    Sentinel,
}

impl ResolvedTag {
    /// Name to embed in the version string
    pub fn name(&self) -> &str {
        match self {
            ResolvedTag::Found(tag) => &tag.name,
            ResolvedTag::Sentinel => SENTINEL_TAG,
        }
    }

    /// Target commit, if a real tag was found
    pub fn target(&self) -> Option<Oid> {
        match self {
            ResolvedTag::Found(tag) => Some(tag.target),
            ResolvedTag::Sentinel => None,
        }
    }
}

/// Strip a single leading `v` (e.g., "v1.2.3" -> "1.2.3", "vv1" -> "v1")
pub fn semver_core(tag: &str) -> &str {
    tag.strip_prefix('v').unwrap_or(tag)
}
