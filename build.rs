use std::process::Command;

fn main() {
    // An explicit value from the build environment wins
    if std::env::var("GIT_VERSIONER_COMMIT").is_err() {
        let commit = Command::new("git")
            .args(["rev-parse", "--short", "HEAD"])
            .output()
            .ok()
            .filter(|output| output.status.success())
            .and_then(|output| String::from_utf8(output.stdout).ok())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        if let Some(commit) = commit {
            println!("cargo:rustc-env=GIT_VERSIONER_COMMIT={commit}");
        }
    }

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-env-changed=GIT_VERSIONER_VERSION");
    println!("cargo:rerun-if-env-changed=GIT_VERSIONER_COMMIT");
    println!("cargo:rerun-if-env-changed=GIT_VERSIONER_BUILD_DATE");
}
