//! Domain logic - pure business rules independent of git operations

pub mod branch;
pub mod tag;
pub mod version;

pub use branch::BranchContext;
pub use tag::{ResolvedTag, TagRef, SENTINEL_TAG};
pub use version::{Scheme, Selection, VersionInfo, VersionParts, VersionSpec};
