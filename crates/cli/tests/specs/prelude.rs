//! Shared helpers for CLI specs

#![allow(dead_code)]

use std::path::Path;
use tempfile::TempDir;

/// A 2x3 venue with the front row sold out
pub const SOLD_FRONT_CONFIG: &str = r#"
[venue]
layout = """
xxx
...
"""

[hold]
hold_duration = "6s"
"#;

/// Scratch directory the CLI runs in
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `content` to `relative`, creating parent directories
    pub fn file(&self, relative: &str, content: &str) {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    pub fn usher(&self) -> CliBuilder {
        CliBuilder {
            dir: self.dir.path().to_path_buf(),
            args: Vec::new(),
        }
    }
}

pub struct CliBuilder {
    dir: std::path::PathBuf,
    args: Vec<String>,
}

impl CliBuilder {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|a| a.to_string()));
        self
    }

    fn run(self) -> RunAssert {
        let output = assert_cmd::Command::cargo_bin("usher")
            .unwrap()
            .current_dir(&self.dir)
            .env_remove("RUST_LOG")
            .args(&self.args)
            .output()
            .unwrap();
        RunAssert {
            args: self.args,
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }

    /// Run and expect exit code 0
    pub fn passes(self) -> RunAssert {
        let run = self.run();
        assert!(
            run.status.success(),
            "usher {:?} failed\nstdout:\n{}\nstderr:\n{}",
            run.args,
            run.stdout,
            run.stderr
        );
        run
    }

    /// Run and expect a non-zero exit code
    pub fn fails(self) -> RunAssert {
        let run = self.run();
        assert!(
            !run.status.success(),
            "usher {:?} unexpectedly passed\nstdout:\n{}",
            run.args,
            run.stdout
        );
        run
    }
}

pub struct RunAssert {
    args: Vec<String>,
    status: std::process::ExitStatus,
    stdout: String,
    stderr: String,
}

impl RunAssert {
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stdout_has(self, expected: &str) -> Self {
        assert!(
            self.stdout.contains(expected),
            "stdout missing {:?}\nstdout:\n{}",
            expected,
            self.stdout
        );
        self
    }

    pub fn stdout_lacks(self, unexpected: &str) -> Self {
        assert!(
            !self.stdout.contains(unexpected),
            "stdout has {:?}\nstdout:\n{}",
            unexpected,
            self.stdout
        );
        self
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stdout.as_str(), expected);
        self
    }

    pub fn stderr_has(self, expected: &str) -> Self {
        assert!(
            self.stderr.contains(expected),
            "stderr missing {:?}\nstderr:\n{}",
            expected,
            self.stderr
        );
        self
    }
}
