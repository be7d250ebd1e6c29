use crate::error::{Result, VersionerError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Version-string synthesis rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    #[default]
    Default,
    Semver,
    CalVer,
    Simple,
}

impl FromStr for Scheme {
    type Err = VersionerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "default" => Ok(Scheme::Default),
            "semver" => Ok(Scheme::Semver),
            "calver" => Ok(Scheme::CalVer),
            "simple" => Ok(Scheme::Simple),
            _ => Err(VersionerError::config(format!(
                "Unknown version scheme: '{}' (expected default, semver, calver or simple)",
                s
            ))),
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scheme::Default => write!(f, "default"),
            Scheme::Semver => write!(f, "semver"),
            Scheme::CalVer => write!(f, "calver"),
            Scheme::Simple => write!(f, "simple"),
        }
    }
}

/// Caller-supplied scheme plus the include-hash flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VersionSpec {
    pub scheme: Scheme,
    pub include_hash: bool,
}

impl VersionSpec {
    pub fn new(scheme: Scheme, include_hash: bool) -> Self {
        VersionSpec {
            scheme,
            include_hash,
        }
    }
}

/// Which formatter entry point an invocation uses
///
/// The legacy entry point only knows the docker flag and predates the
/// schemes; the two are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Scheme(VersionSpec),
    Legacy { docker: bool },
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Legacy { docker: false }
    }
}

/// Inputs to the version formatter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionParts<'a> {
    pub tag: &'a str,
    pub distance: usize,
    pub branch: &'a str,
    pub short_hash: &'a str,
}

/// Result of one resolution pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionInfo {
    pub branch: String,
    pub tag: String,
    pub distance: usize,
    pub short_hash: String,
    pub version: String,
}

impl fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.version)
    }
}
