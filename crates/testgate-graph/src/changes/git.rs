//! `git diff --name-only` change source.
//!
//! The child process is supervised: stdout and stderr are drained on reader
//! threads while the parent waits with a timeout, and a child that overruns
//! the timeout is killed and reaped.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use tracing::{debug, warn};
use wait_timeout::ChildExt;

use super::{ChangeSource, DiffError};

/// Default time allowed for the diff to complete.
pub const DEFAULT_DIFF_TIMEOUT: Duration = Duration::from_secs(30);

/// Maximum stdout size read from the child (16 MB).
const MAX_STDOUT_SIZE: u64 = 16 * 1024 * 1024;

/// Maximum stderr size read from the child (1 MB).
const MAX_STDERR_SIZE: u64 = 1024 * 1024;

/// Lists files changed between the working tree and a baseline revision.
#[derive(Debug, Clone)]
pub struct GitDiff {
    base_revision: String,
    repo_dir: Option<PathBuf>,
    timeout: Duration,
    program: String,
    leading_args: Vec<String>,
}

impl GitDiff {
    pub fn new(base_revision: impl Into<String>) -> Self {
        Self {
            base_revision: base_revision.into(),
            repo_dir: None,
            timeout: DEFAULT_DIFF_TIMEOUT,
            program: "git".to_string(),
            leading_args: Vec::new(),
        }
    }

    /// Run the diff inside `dir` instead of the current directory.
    pub fn repo_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.repo_dir = Some(dir.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_revision(&self) -> &str {
        &self.base_revision
    }

    #[cfg(test)]
    fn with_program(mut self, program: &str, leading_args: &[&str]) -> Self {
        self.program = program.to_string();
        self.leading_args = leading_args.iter().map(|s| s.to_string()).collect();
        self
    }

    fn invocation_error(&self, reason: impl Into<String>) -> DiffError {
        DiffError::Invocation {
            program: self.program.clone(),
            reason: reason.into(),
        }
    }
}

fn read_pipe_bounded<R: Read>(reader: R, limit: u64) -> std::io::Result<Vec<u8>> {
    let mut buffer = Vec::new();
    reader.take(limit).read_to_end(&mut buffer)?;
    Ok(buffer)
}

fn spawn_reader<R: Read + Send + 'static>(
    pipe: Option<R>,
    limit: u64,
) -> (mpsc::Receiver<std::io::Result<Vec<u8>>>, Option<thread::JoinHandle<()>>) {
    let (tx, rx) = mpsc::channel();
    let handle = match pipe {
        Some(pipe) => Some(thread::spawn(move || {
            let _ = tx.send(read_pipe_bounded(pipe, limit));
        })),
        None => {
            let _ = tx.send(Ok(Vec::new()));
            None
        }
    };
    (rx, handle)
}

/// Split NUL-terminated `--name-only -z` output. Paths are unquoted in this mode.
fn parse_name_list(stdout: &[u8]) -> Vec<String> {
    stdout
        .split(|&b| b == 0)
        .filter(|name| !name.is_empty())
        .map(|name| String::from_utf8_lossy(name).into_owned())
        .collect()
}

impl ChangeSource for GitDiff {
    fn changed_paths(&self) -> Result<Vec<String>, DiffError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.leading_args)
            .arg("diff")
            .arg("--name-only")
            .arg("-z")
            .arg(&self.base_revision)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &self.repo_dir {
            cmd.current_dir(dir);
        }

        debug!(
            program = %self.program,
            base = %self.base_revision,
            dir = %self.repo_dir.as_deref().unwrap_or(Path::new(".")).display(),
            "running diff"
        );

        let mut child = cmd
            .spawn()
            .map_err(|e| self.invocation_error(e.to_string()))?;

        // Drain both pipes while waiting so a large diff cannot fill the pipe buffer.
        let (stdout_rx, stdout_thread) = spawn_reader(child.stdout.take(), MAX_STDOUT_SIZE);
        let (stderr_rx, stderr_thread) = spawn_reader(child.stderr.take(), MAX_STDERR_SIZE);

        let status = match child.wait_timeout(self.timeout) {
            Ok(Some(status)) => status,
            Ok(None) => {
                warn!(timeout_secs = self.timeout.as_secs(), "diff timed out, killing child");
                let _ = child.kill();
                let _ = child.wait();
                return Err(DiffError::Timeout {
                    program: self.program.clone(),
                    timeout: self.timeout,
                });
            }
            Err(e) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(self.invocation_error(format!("failed to wait: {e}")));
            }
        };

        for handle in [stdout_thread, stderr_thread].into_iter().flatten() {
            if handle.join().is_err() {
                return Err(self.invocation_error("output reader thread panicked"));
            }
        }

        let stdout = stdout_rx
            .recv()
            .map_err(|_| self.invocation_error("stdout reader disconnected"))?
            .map_err(|e| self.invocation_error(format!("failed to read stdout: {e}")))?;
        let stderr = stderr_rx
            .recv()
            .map_err(|_| self.invocation_error("stderr reader disconnected"))?
            .map_err(|e| self.invocation_error(format!("failed to read stderr: {e}")))?;

        if !status.success() {
            return Err(DiffError::NonZeroExit {
                program: self.program.clone(),
                status: status.to_string(),
                stderr: String::from_utf8_lossy(&stderr).trim().to_string(),
            });
        }

        let paths = parse_name_list(&stdout);
        debug!(changed = paths.len(), "diff complete");
        Ok(paths)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    // `sh -c <script>` receives `diff --name-only -z <rev>` as $0..$3.
    fn scripted(script: &str) -> GitDiff {
        GitDiff::new("main").with_program("sh", &["-c", script])
    }

    #[test]
    fn test_parses_name_only_output() {
        let diff = scripted("printf 'pkg/a.go\\000cmd/main.go\\000'");
        let paths = diff.changed_paths().unwrap();
        assert_eq!(paths, vec!["pkg/a.go", "cmd/main.go"]);
    }

    #[test]
    fn test_passes_revision_argument() {
        let diff = scripted("printf '%s\\000' \"$3\"");
        assert_eq!(diff.changed_paths().unwrap(), vec!["main"]);
    }

    #[test]
    fn test_special_characters_are_not_quoted() {
        let paths = parse_name_list("pkg/caf\u{e9}.go\0dir with space/a\tb.go\0".as_bytes());
        assert_eq!(paths, vec!["pkg/caf\u{e9}.go", "dir with space/a\tb.go"]);
    }

    #[test]
    fn test_nonzero_exit_reports_stderr() {
        let diff = scripted("echo 'bad revision' >&2; exit 3");
        let err = diff.changed_paths().unwrap_err();
        match err {
            DiffError::NonZeroExit { stderr, .. } => assert_eq!(stderr, "bad revision"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_timeout_kills_child() {
        let diff = scripted("sleep 5").timeout(Duration::from_millis(200));
        let err = diff.changed_paths().unwrap_err();
        assert!(err.is_timeout());
    }

    #[test]
    fn test_missing_program() {
        let diff = GitDiff::new("main").with_program("/definitely/not/git", &[]);
        let err = diff.changed_paths().unwrap_err();
        assert!(matches!(err, DiffError::Invocation { .. }));
    }
}
