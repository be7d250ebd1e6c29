/// Branch name used when HEAD is not on a named branch
pub const DETACHED: &str = "detached";

/// Branches whose name is never embedded in a version string
pub const TRUNK_BRANCHES: [&str; 3] = ["main", "master", DETACHED];

/// Candidate trunk heads, in lookup order, for the rebase-point search
pub const TRUNK_HEADS: [&str; 2] = ["main", "master"];

/// Check whether a branch name denotes a trunk branch
pub fn is_trunk(name: &str) -> bool {
    TRUNK_BRANCHES.contains(&name)
}

/// Replace every character outside `[A-Za-z0-9-]` with `-`
pub fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if is_allowed(c) { c } else { '-' })
        .collect()
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-'
}

/// Represents a git branch with context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchContext {
    pub name: String,
    pub is_trunk: bool,
}

impl BranchContext {
    /// Create a new branch context
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let is_trunk = is_trunk(&name);

        BranchContext { name, is_trunk }
    }

    /// Branch name as it may appear inside a version string
    pub fn sanitized(&self) -> String {
        sanitize(&self.name)
    }
}
