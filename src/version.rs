//! Version string synthesis
//!
//! Every scheme is a pure function of its inputs except CalVer, which also
//! reads the current date through a [DateSource].

use crate::domain::tag::semver_core;
use crate::domain::{BranchContext, Scheme, VersionParts, VersionSpec};
use chrono::{Datelike, NaiveDate};

/// Supplies "today" to the CalVer scheme
pub trait DateSource {
    fn today(&self) -> NaiveDate;
}

/// Local wall-clock date
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemDate;

impl DateSource for SystemDate {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// A fixed date, for reproducible output
#[derive(Debug, Clone, Copy)]
pub struct FixedDate(pub NaiveDate);

impl DateSource for FixedDate {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Maps (tag, distance, branch, hash) to a version string per scheme
#[derive(Debug, Clone, Default)]
pub struct VersionFormatter<D = SystemDate> {
    dates: D,
}

impl<D: DateSource> VersionFormatter<D> {
    pub fn new(dates: D) -> Self {
        VersionFormatter { dates }
    }

    /// Format according to `spec`
    ///
    /// Exactly on a tag without a hash, every scheme but CalVer returns the
    /// tag untouched; CalVer still renders the date.
    ///
    /// # Example
    /// ```rust
    /// use git_versioner::domain::{Scheme, VersionParts, VersionSpec};
    /// use git_versioner::version::{SystemDate, VersionFormatter};
    ///
    /// let formatter = VersionFormatter::new(SystemDate);
    /// let parts = VersionParts { tag: "v1.2.3", distance: 5, branch: "main", short_hash: "abc1234" };
    /// assert_eq!(formatter.format(&parts, &VersionSpec::new(Scheme::Semver, false)), "v1.2.3-dev.5");
    /// ```
    pub fn format(&self, parts: &VersionParts<'_>, spec: &VersionSpec) -> String {
        let branch = BranchContext::new(parts.branch);

        if parts.distance == 0 && !spec.include_hash {
            return match spec.scheme {
                Scheme::CalVer => self.calver(0, &branch, false, parts.short_hash),
                _ => parts.tag.to_string(),
            };
        }

        match spec.scheme {
            Scheme::CalVer => self.calver(
                parts.distance,
                &branch,
                spec.include_hash,
                parts.short_hash,
            ),
            Scheme::Semver => format_semver(
                parts.tag,
                parts.distance,
                &branch,
                spec.include_hash,
                parts.short_hash,
            ),
            Scheme::Simple => format_simple(parts.tag, spec.include_hash, parts.short_hash),
            Scheme::Default => format_default(
                parts.tag,
                parts.distance,
                &branch,
                spec.include_hash,
                parts.short_hash,
            ),
        }
    }

    /// `{Y}.{MM}[.{distance}][-{branch}][+{hash}]`; the tag is not used
    pub fn calver(
        &self,
        distance: usize,
        branch: &BranchContext,
        include_hash: bool,
        short_hash: &str,
    ) -> String {
        let today = self.dates.today();
        let mut version = format!("{}.{:02}", today.year(), today.month());

        if distance > 0 {
            version = format!("{}.{}", version, distance);
        }

        if !branch.is_trunk {
            version = format!("{}-{}", version, branch.sanitized());
        }

        if include_hash && !short_hash.is_empty() {
            version = format!("{}+{}", version, short_hash);
        }

        version
    }
}

/// `tag[+distance]` on trunk, `tag-branch[+distance]` elsewhere, then `+hash`
pub fn format_default(
    tag: &str,
    distance: usize,
    branch: &BranchContext,
    include_hash: bool,
    short_hash: &str,
) -> String {
    if distance == 0 && !include_hash {
        return tag.to_string();
    }

    let mut version = match (branch.is_trunk, distance) {
        (true, 0) => tag.to_string(),
        (true, n) => format!("{}+{}", tag, n),
        (false, 0) => format!("{}-{}", tag, branch.sanitized()),
        (false, n) => format!("{}-{}+{}", tag, branch.sanitized(), n),
    };

    if include_hash {
        version = format!("{}+{}", version, short_hash);
    }

    version
}

/// `{core}-dev.N` on trunk, `{core}-{branch}[.N]` elsewhere, then `+hash`
///
/// A leading `v` is added when the result lacks one.
pub fn format_semver(
    tag: &str,
    distance: usize,
    branch: &BranchContext,
    include_hash: bool,
    short_hash: &str,
) -> String {
    if distance == 0 && !include_hash {
        return tag.to_string();
    }

    let core = semver_core(tag);
    let mut version = match (branch.is_trunk, distance) {
        (true, 0) => core.to_string(),
        (true, n) => format!("{}-dev.{}", core, n),
        (false, 0) => format!("{}-{}", core, branch.sanitized()),
        (false, n) => format!("{}-{}.{}", core, branch.sanitized(), n),
    };

    if include_hash && !short_hash.is_empty() {
        version = format!("{}+{}", version, short_hash);
    }

    if version.starts_with('v') {
        version
    } else {
        format!("v{}", version)
    }
}

/// The tag, optionally `+hash`; distance and branch are ignored
pub fn format_simple(tag: &str, include_hash: bool, short_hash: &str) -> String {
    if include_hash {
        format!("{}+{}", tag, short_hash)
    } else {
        tag.to_string()
    }
}

/// Pre-scheme format kept for older callers
///
/// Trunk: `tag+N`, or `tag-N` in docker mode. Elsewhere: `tag-branch+N`, or
/// `tag-branch-N` in docker mode. Exactly on a tag: the tag.
pub fn format_legacy(tag: &str, distance: usize, branch: &BranchContext, docker: bool) -> String {
    if distance == 0 {
        return tag.to_string();
    }

    let separator = if docker { '-' } else { '+' };

    if branch.is_trunk {
        format!("{}{}{}", tag, separator, distance)
    } else {
        format!("{}-{}{}{}", tag, branch.sanitized(), separator, distance)
    }
}
