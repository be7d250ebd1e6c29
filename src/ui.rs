//! Styled terminal messages.
//!
//! Status messages go to stderr; stdout carries only the version string.

use crate::domain::VersionInfo;
use console::style;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    eprintln!("{} {}", style("✓").green(), message);
}

/// One-line summary of how a version was derived.
pub fn describe(info: &VersionInfo) -> String {
    format!(
        "{} ({} commits since {} on {})",
        info.version, info.distance, info.tag, info.branch
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe() {
        let info = VersionInfo {
            branch: "main".to_string(),
            tag: "v1.2.3".to_string(),
            distance: 5,
            short_hash: "abc1234".to_string(),
            version: "v1.2.3+5".to_string(),
        };
        assert_eq!(describe(&info), "v1.2.3+5 (5 commits since v1.2.3 on main)");
    }
}
