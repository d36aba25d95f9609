//! End-to-end tests for the `commit-info-extractor` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

/// Binary command isolated from the caller's CI and git configuration.
fn extractor_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_commit-info-extractor"));
    cmd.current_dir(dir)
        .env_remove("GITHUB_ENV")
        .env_remove("GITHUB_OUTPUT")
        .env_remove("RUST_LOG")
        .env("GIT_CONFIG_GLOBAL", dir.join(".test-gitconfig"))
        .env("INPUT_SAFE_DIRECTORIES", "/github/workspace");
    cmd
}

fn run_git(repo_dir: &Path, args: &[&str]) {
    let output = std::process::Command::new("git")
        .args(args)
        .current_dir(repo_dir)
        .output()
        .expect("git not available");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
}

fn make_git_repo(messages: &[&str]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    run_git(dir.path(), &["init"]);
    run_git(dir.path(), &["config", "user.name", "test-user"]);
    run_git(dir.path(), &["config", "user.email", "test@example.com"]);
    for message in messages {
        run_git(dir.path(), &["commit", "--allow-empty", "-m", message]);
    }
    dir
}

#[test]
fn help_works() {
    let dir = tempfile::tempdir().unwrap();
    extractor_cmd(dir.path()).arg("--help").assert().success();
}

#[test]
fn version_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    extractor_cmd(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn usage_error_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    extractor_cmd(dir.path())
        .arg("--commit-limit")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("--commit-limit"));
}

#[test]
fn unknown_flag_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    extractor_cmd(dir.path())
        .arg("--no-such-flag")
        .assert()
        .code(1);
}

#[test]
fn no_repository_prints_sentinel_locally() {
    let dir = tempfile::tempdir().unwrap();
    extractor_cmd(dir.path())
        .assert()
        .success()
        .stdout(predicate::eq("ENVIRONMENT=No commit messages available.\n"));
}

#[test]
fn invalid_commit_limit_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    extractor_cmd(dir.path())
        .env("INPUT_COMMIT_LIMIT", "abc")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("commit_limit"));
}

#[test]
fn non_positive_timeout_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let output = extractor_cmd(dir.path())
        .env("INPUT_TIMEOUT", "0")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(
        stderr.matches("timeout must be greater than 0").count(),
        1,
        "error reported more than once:\n{stderr}"
    );
}

#[test]
fn huge_commit_limit_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    extractor_cmd(dir.path())
        .env("INPUT_COMMIT_LIMIT", "5000000000")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("commit_limit is out of range"));
}

#[test]
fn invalid_output_format_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    extractor_cmd(dir.path())
        .env("INPUT_OUTPUT_FORMAT", "yaml")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Must be text, json, or csv"));
}

#[test]
fn extract_command_dedups_into_github_files() {
    let repo = make_git_repo(&["fix: a", "feat: b", "fix: a"]);
    let out = tempfile::tempdir().unwrap();
    let env_file = out.path().join("env");
    let output_file = out.path().join("output");

    extractor_cmd(repo.path())
        .env("GITHUB_ENV", &env_file)
        .env("GITHUB_OUTPUT", &output_file)
        .env("INPUT_PRETTY", "true")
        .env("INPUT_EXTRACT_COMMAND", "cat")
        .env("INPUT_OUTPUT_FORMAT", "json")
        .env("INPUT_KEY_VARIABLE", "COMMITS_JSON")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let env = std::fs::read_to_string(&env_file).unwrap();
    let output = std::fs::read_to_string(&output_file).unwrap();
    assert_eq!(env, output);

    let lines: Vec<&str> = env.lines().collect();
    assert_eq!(lines.len(), 4);
    let delimiter = lines[0].strip_prefix("value_variable<<EOF_").unwrap();
    assert!(delimiter.chars().all(|c| c.is_ascii_digit()));
    assert_eq!(lines[1], r#"["feat: b","fix: a"]"#);
    assert_eq!(lines[2], format!("EOF_{delimiter}"));
    assert_eq!(lines[3], "key_variable=COMMITS_JSON");
}

#[test]
fn csv_output_quotes_commas() {
    let repo = make_git_repo(&["c", "a,b"]);

    extractor_cmd(repo.path())
        .env("INPUT_PRETTY", "true")
        .env("INPUT_EXTRACT_COMMAND", "cat")
        .env("INPUT_OUTPUT_FORMAT", "csv")
        .assert()
        .success()
        .stdout(predicate::eq("ENVIRONMENT=\"a,b\",c\n"));
}

#[test]
fn fail_on_empty_exits_one_without_publishing() {
    let repo = make_git_repo(&["fix: a"]);
    let out = tempfile::tempdir().unwrap();
    let env_file = out.path().join("env");
    let output_file = out.path().join("output");

    extractor_cmd(repo.path())
        .env("GITHUB_ENV", &env_file)
        .env("GITHUB_OUTPUT", &output_file)
        .env("INPUT_EXTRACT_COMMAND", "grep -oE 'release' || true")
        .env("INPUT_FAIL_ON_EMPTY", "true")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("fail_on_empty"));

    assert!(!env_file.exists());
    assert!(!output_file.exists());
}

#[test]
fn extract_command_timeout_exits_one() {
    let repo = make_git_repo(&["fix: a"]);

    let output = extractor_cmd(repo.path())
        .env("INPUT_EXTRACT_COMMAND", "sleep 10")
        .env("INPUT_TIMEOUT", "1")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("timed out after 1 seconds").count(), 1);
}

#[test]
fn debug_logs_git_invocation() {
    let repo = make_git_repo(&["fix: a"]);

    extractor_cmd(repo.path())
        .env("INPUT_DEBUG", "true")
        .env("INPUT_COMMIT_LIMIT", "1")
        .assert()
        .success()
        .stderr(predicate::str::contains("git log -1"));
}

#[test]
fn bare_switches_read_as_true() {
    let repo = make_git_repo(&["fix: a"]);

    extractor_cmd(repo.path())
        .args(["--debug", "--pretty", "--commit-limit", "1"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ENVIRONMENT=fix: a"))
        .stderr(predicate::str::contains("git log -1 --pretty=%B"));
}
