#![allow(dead_code)]

pub mod project;

use assert_cmd::Command;
use std::path::Path;

pub fn run_git_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::new("git");
    cmd.env("LC_ALL", "C");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

/// Run the external tool directly and return its trimmed stdout
pub fn git_stdout(dir: &Path, args: &[&str]) -> String {
    let output = run_git_command(dir, args)
        .output()
        .expect("Failed to run git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );

    String::from_utf8(output.stdout)
        .expect("git output is not UTF-8")
        .trim()
        .to_string()
}

/// Current value of HEAD as the external tool sees it
pub fn head_commit_sha(dir: &Path) -> String {
    git_stdout(dir, &["rev-parse", "HEAD"])
}
