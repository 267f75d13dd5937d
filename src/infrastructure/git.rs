//! Git-backed VersionHistory
//!
//! Every query is a short-lived `git` subprocess with a bounded runtime.
//! A query that exits non-zero or times out becomes
//! `HistoryQuery::QueryFailed`; it never aborts the run.

use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::config::ScopeConfig;
use crate::domain::ports::{HistoryQuery, PathChange, Revision, VersionHistory};
use crate::domain::value_objects::ChangeKind;

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// How long output readers get to finish after a timed-out process is killed.
const DRAIN_GRACE: Duration = Duration::from_millis(250);

/// `VersionHistory` implementation that shells out to `git`.
#[derive(Debug, Clone)]
pub struct GitHistory {
    binary: String,
    timeout: Duration,
}

impl GitHistory {
    pub fn new(binary: impl Into<String>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
        }
    }

    pub fn from_config(config: &ScopeConfig) -> Self {
        Self::new(config.git_binary.clone(), config.timeout())
    }

    fn run(&self, base: &Path, args: &[&str]) -> HistoryQuery<Vec<u8>> {
        tracing::debug!(cwd = %base.display(), ?args, "running git");

        let mut child = match Command::new(&self.binary)
            .args(args)
            .current_dir(base)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
        {
            Ok(child) => child,
            Err(e) => {
                return HistoryQuery::QueryFailed(format!("failed to run {}: {}", self.binary, e))
            }
        };

        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let status = match self.wait_with_deadline(&mut child) {
            Ok(status) => status,
            Err(reason) => {
                join_within(stdout, DRAIN_GRACE);
                join_within(stderr, DRAIN_GRACE);
                return HistoryQuery::QueryFailed(reason);
            }
        };

        let stdout = stdout.join().unwrap_or_default();
        let stderr = stderr.join().unwrap_or_default();

        if status.success() {
            return HistoryQuery::Success(stdout);
        }

        let message = String::from_utf8_lossy(&stderr).trim().to_string();
        if message.contains("not a git repository") {
            return HistoryQuery::NoRepository;
        }
        HistoryQuery::QueryFailed(if message.is_empty() {
            format!("git {} exited with {:?}", args.join(" "), status.code())
        } else {
            message
        })
    }

    fn wait_with_deadline(&self, child: &mut Child) -> Result<std::process::ExitStatus, String> {
        let deadline = Instant::now() + self.timeout;
        loop {
            match child.try_wait() {
                Ok(Some(status)) => return Ok(status),
                Ok(None) if Instant::now() >= deadline => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(format!("git timed out after {}s", self.timeout.as_secs_f32()));
                }
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(e) => {
                    let _ = child.kill();
                    return Err(e.to_string());
                }
            }
        }
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> thread::JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        buf
    })
}

/// Join a reader thread if it finishes within `grace`.
///
/// A descendant of a killed process can keep the pipe open; its reader is
/// then left to end on its own once that descendant exits.
fn join_within(handle: thread::JoinHandle<Vec<u8>>, grace: Duration) -> Option<Vec<u8>> {
    let deadline = Instant::now() + grace;
    while !handle.is_finished() {
        if Instant::now() >= deadline {
            tracing::debug!("output pipe still held open after kill; not waiting for reader");
            return None;
        }
        thread::sleep(POLL_INTERVAL);
    }
    handle.join().ok()
}

fn git_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

impl VersionHistory for GitHistory {
    fn is_repository(&self, base: &Path) -> bool {
        base.join(".git").exists()
    }

    fn working_tree_changes(&self, base: &Path, subtree: &Path) -> HistoryQuery<Vec<PathChange>> {
        let subtree = git_path(subtree);
        self.run(
            base,
            &[
                "status",
                "--porcelain",
                "-z",
                "--untracked-files=all",
                "--",
                &subtree,
            ],
        )
        .map(|out| parse_porcelain(&String::from_utf8_lossy(&out)))
    }

    fn last_commit_changes(&self, base: &Path, subtree: &Path) -> HistoryQuery<Vec<PathChange>> {
        let subtree = git_path(subtree);
        self.run(
            base,
            &[
                "diff",
                "--name-status",
                "-z",
                Revision::Previous.as_git_rev(),
                Revision::Head.as_git_rev(),
                "--",
                &subtree,
            ],
        )
        .map(|out| parse_name_status(&String::from_utf8_lossy(&out)))
    }

    fn show(&self, base: &Path, revision: Revision, path: &Path) -> HistoryQuery<String> {
        let object = format!("{}:{}", revision.as_git_rev(), git_path(path));
        self.run(base, &["show", &object])
            .map(|out| String::from_utf8_lossy(&out).into_owned())
    }
}

/// Parse `git status --porcelain -z` output.
///
/// Entries are `XY path`; renames and copies are followed by an extra entry
/// holding the original path, which is skipped.
pub fn parse_porcelain(output: &str) -> Vec<PathChange> {
    let mut changes = Vec::new();
    let mut entries = output.split('\0').filter(|e| !e.is_empty());

    while let Some(entry) = entries.next() {
        if entry.len() < 4 {
            continue;
        }
        let (code, path) = entry.split_at(2);
        changes.push(PathChange::new(&path[1..], ChangeKind::from_porcelain(code)));
        if code.contains('R') || code.contains('C') {
            entries.next();
        }
    }

    changes
}

/// Parse `git diff --name-status -z` output.
///
/// Renames and copies carry two paths; the new one is kept.
pub fn parse_name_status(output: &str) -> Vec<PathChange> {
    let mut changes = Vec::new();
    let mut fields = output.split('\0').filter(|f| !f.is_empty());

    while let Some(code) = fields.next() {
        let path = if code.starts_with('R') || code.starts_with('C') {
            fields.next();
            fields.next()
        } else {
            fields.next()
        };
        if let Some(path) = path {
            changes.push(PathChange::new(path, ChangeKind::from_name_status(code)));
        }
    }

    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn porcelain_modified_added_deleted() {
        let out = " M deployments/services/web.yml\0A  deployments/services/db.yml\0 D deployments/identities/old.yml\0?? deployments/services/new.yml\0";
        let changes = parse_porcelain(out);
        assert_eq!(
            changes,
            vec![
                PathChange::new("deployments/services/web.yml", ChangeKind::Changed),
                PathChange::new("deployments/services/db.yml", ChangeKind::Changed),
                PathChange::new("deployments/identities/old.yml", ChangeKind::Deleted),
                PathChange::new("deployments/services/new.yml", ChangeKind::Changed),
            ]
        );
    }

    #[test]
    fn porcelain_rename_keeps_new_path() {
        let out = "R  deployments/services/b.yml\0deployments/services/a.yml\0 M deployments/services/c.yml\0";
        let changes = parse_porcelain(out);
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].path, PathBuf::from("deployments/services/b.yml"));
        assert_eq!(changes[0].kind, ChangeKind::Changed);
        assert_eq!(changes[1].path, PathBuf::from("deployments/services/c.yml"));
    }

    #[test]
    fn porcelain_path_with_spaces() {
        let changes = parse_porcelain(" M deployments/services/my web.yml\0");
        assert_eq!(changes[0].path, PathBuf::from("deployments/services/my web.yml"));
    }

    #[test]
    fn porcelain_empty_output() {
        assert!(parse_porcelain("").is_empty());
    }

    #[test]
    fn name_status_basic_and_rename() {
        let out = "M\0deployments/services/web.yml\0D\0deployments/services/gone.yml\0R100\0deployments/services/a.yml\0deployments/services/b.yml\0";
        let changes = parse_name_status(out);
        assert_eq!(
            changes,
            vec![
                PathChange::new("deployments/services/web.yml", ChangeKind::Changed),
                PathChange::new("deployments/services/gone.yml", ChangeKind::Deleted),
                PathChange::new("deployments/services/b.yml", ChangeKind::Changed),
            ]
        );
    }

    #[test]
    fn missing_binary_is_query_failure() {
        let git = GitHistory::new("definitely-not-a-git-binary", Duration::from_secs(1));
        let dir = tempfile::tempdir().unwrap();
        let result = git.working_tree_changes(dir.path(), Path::new("deployments"));
        assert!(matches!(result, HistoryQuery::QueryFailed(_)));
    }

    #[cfg(unix)]
    #[test]
    fn slow_query_times_out() {
        let dir = tempfile::tempdir().unwrap();
        let shell = GitHistory::new("sh", Duration::from_secs(1));

        let started = Instant::now();
        let result = shell.run(dir.path(), &["-c", "exec sleep 30"]);

        assert!(
            matches!(&result, HistoryQuery::QueryFailed(reason) if reason.contains("timed out")),
            "unexpected result: {result:?}"
        );
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[cfg(unix)]
    #[test]
    fn timeout_does_not_wait_for_descendants_holding_output() {
        let dir = tempfile::tempdir().unwrap();
        let shell = GitHistory::new("sh", Duration::from_millis(300));

        // The backgrounded sleep inherits stdout and outlives the killed shell.
        let started = Instant::now();
        let result = shell.run(dir.path(), &["-c", "sleep 5 & sleep 5; true"]);

        assert!(matches!(result, HistoryQuery::QueryFailed(_)));
        assert!(started.elapsed() < Duration::from_secs(3));
    }

    #[test]
    fn join_within_returns_finished_output() {
        let handle = thread::spawn(|| b"ok".to_vec());
        assert_eq!(join_within(handle, Duration::from_secs(1)), Some(b"ok".to_vec()));
    }

    #[test]
    fn is_repository_checks_git_dir() {
        let dir = tempfile::tempdir().unwrap();
        let git = GitHistory::new("git", Duration::from_secs(1));
        assert!(!git.is_repository(dir.path()));
        std::fs::create_dir(dir.path().join(".git")).unwrap();
        assert!(git.is_repository(dir.path()));
    }
}
