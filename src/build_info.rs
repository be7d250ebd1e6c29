use std::fmt;

/// Metadata stamped into the binary at compile time.
///
/// Values come from `GIT_VERSIONER_VERSION`, `GIT_VERSIONER_COMMIT` and
/// `GIT_VERSIONER_BUILD_DATE` in the build environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInfo {
    pub version: &'static str,
    pub commit: &'static str,
    pub date: &'static str,
}

impl BuildInfo {
    #[must_use]
    pub fn from_env() -> Self {
        BuildInfo {
            version: option_env!("GIT_VERSIONER_VERSION").unwrap_or(env!("CARGO_PKG_VERSION")),
            commit: option_env!("GIT_VERSIONER_COMMIT").unwrap_or("unknown"),
            date: option_env!("GIT_VERSIONER_BUILD_DATE").unwrap_or("unknown"),
        }
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "git-versioner {} (commit {}, built {})",
            self.version, self.commit, self.date
        )
    }
}
