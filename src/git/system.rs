use crate::domain::TagRef;
use crate::error::{Result, VersionerError};
use crate::git::{Head, Position};
use git2::Oid;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Commit metadata loaded from `git log`
#[derive(Debug, Clone)]
struct CommitNode {
    time: i64,
    parents: Vec<Oid>,
}

/// Repository view backed by the `git` executable
///
/// The commit graph reachable from any ref is loaded once when the
/// repository is opened; parent lookups are then served from memory.
pub struct SystemGitRepository {
    path: PathBuf,
    commits: HashMap<Oid, CommitNode>,
}

impl SystemGitRepository {
    /// Open the repository containing `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        run_git(&path, &["rev-parse", "--git-dir"]).map_err(|e| {
            VersionerError::unavailable(format!(
                "Cannot open repository at '{}': {}",
                path.display(),
                e
            ))
        })?;

        let log = run_git(&path, &["log", "--all", "--format=%H%x09%ct%x09%P"])
            .map_err(|e| VersionerError::unavailable(format!("Cannot read history: {}", e)))?;
        let commits = parse_log(&log)?;
        debug!(commits = commits.len(), "loaded commit graph from git log");

        Ok(SystemGitRepository { path, commits })
    }

    fn git(&self, args: &[&str]) -> Result<String> {
        run_git(&self.path, args).map_err(VersionerError::traversal)
    }

    /// Branch HEAD refers to, read with `symbolic-ref` so that a tag of the
    /// same name cannot change the reported name
    fn symbolic_head(&self) -> Result<Head> {
        let output = Command::new("git")
            .arg("-C")
            .arg(&self.path)
            .args(["symbolic-ref", "-q", "HEAD"])
            .output()
            .map_err(|e| VersionerError::unavailable(format!("Failed to execute git: {}", e)))?;

        // Exit code 1 with -q means HEAD is not symbolic
        match output.status.code() {
            Some(0) => {
                let stdout = String::from_utf8_lossy(&output.stdout);
                Ok(head_from_symbolic_ref(stdout.trim_end_matches(['\n', '\r'])))
            }
            Some(1) => Ok(Head::Detached),
            _ => Err(VersionerError::unavailable(format!(
                "Cannot read HEAD: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            ))),
        }
    }

    fn commit_time(&self, commit: Oid) -> Result<i64> {
        self.commits
            .get(&commit)
            .map(|node| node.time)
            .ok_or_else(|| VersionerError::traversal(format!("Commit {} not found", commit)))
    }
}

/// Run `git -C <path> <args>` and return stdout
fn run_git(path: &Path, args: &[&str]) -> std::result::Result<String, String> {
    let output = Command::new("git")
        .arg("-C")
        .arg(path)
        .args(args)
        .output()
        .map_err(|e| format!("Failed to execute git: {}", e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!(
            "git {} failed with exit code {}: {}",
            args.join(" "),
            output.status.code().unwrap_or(-1),
            stderr.trim()
        ));
    }

    // Only the trailing newline is dropped; empty trailing fields are significant
    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(stdout.trim_end_matches(['\n', '\r']).to_string())
}

/// Map the full ref HEAD points at onto a [Head]
fn head_from_symbolic_ref(reference: &str) -> Head {
    match reference.strip_prefix("refs/heads/") {
        Some(name) => Head::Branch(name.to_string()),
        None => Head::Detached,
    }
}

fn parse_oid(hex: &str) -> Result<Oid> {
    Oid::from_str(hex).map_err(|e| VersionerError::traversal(format!("Bad object id '{}': {}", hex, e)))
}

/// Parse `%H<TAB>%ct<TAB>%P` lines
fn parse_log(log: &str) -> Result<HashMap<Oid, CommitNode>> {
    let mut commits = HashMap::new();

    for line in log.lines().filter(|l| !l.is_empty()) {
        let mut fields = line.split('\t');
        let (Some(hash), Some(time), parents) = (fields.next(), fields.next(), fields.next())
        else {
            return Err(VersionerError::traversal(format!(
                "Unexpected git log line: '{}'",
                line
            )));
        };

        let time = time.parse::<i64>().map_err(|e| {
            VersionerError::traversal(format!("Bad commit time in '{}': {}", line, e))
        })?;
        let parents = parents
            .unwrap_or_default()
            .split_whitespace()
            .map(parse_oid)
            .collect::<Result<Vec<_>>>()?;

        commits.insert(parse_oid(hash)?, CommitNode { time, parents });
    }

    Ok(commits)
}

impl super::Repository for SystemGitRepository {
    fn current_position(&self) -> Result<Position> {
        let commit = run_git(&self.path, &["rev-parse", "--verify", "HEAD^{commit}"])
            .map_err(|e| VersionerError::unavailable(format!("Cannot read HEAD: {}", e)))?;
        let head = self.symbolic_head()?;

        Ok(Position {
            commit: parse_oid(&commit)?,
            head,
        })
    }

    fn tags(&self) -> Result<Vec<TagRef>> {
        let output = self.git(&[
            "for-each-ref",
            "refs/tags",
            "--format=%(refname:short)%09%(objecttype)%09%(objectname)%09%(*objecttype)%09%(*objectname)",
        ])?;

        let mut tags = Vec::new();

        for line in output.lines().filter(|l| !l.is_empty()) {
            let fields: Vec<&str> = line.split('\t').collect();
            let [name, kind, object, peeled_kind, peeled] = fields[..] else {
                return Err(VersionerError::traversal(format!(
                    "Unexpected for-each-ref line: '{}'",
                    line
                )));
            };

            let target = match (kind, peeled_kind) {
                ("commit", _) => object,
                ("tag", "commit") => peeled,
                ("tag", "tag") => {
                    // Tag of a tag: let git peel the whole chain
                    let resolved = self.git(&["rev-parse", &format!("{}^{{}}", object)])?;
                    let resolved_kind = self.git(&["cat-file", "-t", &resolved])?;
                    if resolved_kind != "commit" {
                        debug!(tag = name, kind = %resolved_kind, "skipping tag that does not target a commit");
                        continue;
                    }
                    let oid = parse_oid(&resolved)?;
                    tags.push(TagRef::new(name, oid, self.commit_time(oid)?));
                    continue;
                }
                _ => {
                    debug!(tag = name, kind, "skipping tag that does not target a commit");
                    continue;
                }
            };

            let oid = parse_oid(target)?;
            tags.push(TagRef::new(name, oid, self.commit_time(oid)?));
        }

        Ok(tags)
    }

    fn parents(&self, commit: Oid) -> Result<Vec<Oid>> {
        self.commits
            .get(&commit)
            .map(|node| node.parents.clone())
            .ok_or_else(|| VersionerError::traversal(format!("Commit {} not found", commit)))
    }

    fn branch_head(&self, name: &str) -> Result<Option<Oid>> {
        let reference = format!("refs/heads/{}^{{commit}}", name);
        let output = Command::new("git")
            .arg("-C")
            .arg(&self.path)
            .args(["rev-parse", "--verify", "--quiet", &reference])
            .output()
            .map_err(|e| VersionerError::traversal(format!("Failed to execute git: {}", e)))?;

        if !output.status.success() {
            return Ok(None);
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_oid(stdout.trim()).map(Some)
    }

    fn short_hash(&self, commit: Oid) -> Result<String> {
        self.git(&["rev-parse", "--short", &commit.to_string()])
    }

    fn local_branches(&self) -> Result<Vec<String>> {
        let output = self.git(&["for-each-ref", "refs/heads", "--format=%(refname:short)"])?;

        Ok(output
            .lines()
            .filter(|l| !l.is_empty())
            .map(|l| l.to_string())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: &str = "1111111111111111111111111111111111111111";
    const B: &str = "2222222222222222222222222222222222222222";
    const C: &str = "3333333333333333333333333333333333333333";

    #[test]
    fn test_parse_log_root_and_merge() {
        let log = format!("{C}\t300\t{A} {B}\n{B}\t200\t{A}\n{A}\t100\t\n");
        let commits = parse_log(&log).unwrap();

        assert_eq!(commits.len(), 3);
        let merge = &commits[&parse_oid(C).unwrap()];
        assert_eq!(merge.time, 300);
        assert_eq!(merge.parents, vec![parse_oid(A).unwrap(), parse_oid(B).unwrap()]);
        assert!(commits[&parse_oid(A).unwrap()].parents.is_empty());
    }

    #[test]
    fn test_parse_log_root_without_trailing_tab() {
        let commits = parse_log(&format!("{A}\t100")).unwrap();
        assert!(commits[&parse_oid(A).unwrap()].parents.is_empty());
    }

    #[test]
    fn test_parse_log_rejects_garbage() {
        assert!(matches!(
            parse_log("not a log line"),
            Err(VersionerError::GraphTraversal(_))
        ));
        assert!(parse_log(&format!("{A}\tyesterday\t")).is_err());
    }

    #[test]
    fn test_symbolic_ref_keeps_full_branch_name() {
        assert_eq!(
            head_from_symbolic_ref("refs/heads/main"),
            Head::Branch("main".to_string())
        );
        assert_eq!(
            head_from_symbolic_ref("refs/heads/feature/auth"),
            Head::Branch("feature/auth".to_string())
        );
        assert_eq!(head_from_symbolic_ref("refs/remotes/origin/main"), Head::Detached);
    }

    #[test]
    fn test_parse_log_empty() {
        assert!(parse_log("").unwrap().is_empty());
    }
}
