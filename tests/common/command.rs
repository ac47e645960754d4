use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// Repository with `a.txt = "A"` committed on master
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_minivc_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    write_file(FileSpec::new(
        repository_dir.path().join("a.txt"),
        "A".to_string(),
    ));
    run_minivc_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();
    minivc_commit(repository_dir.path(), "C0").assert().success();

    repository_dir
}

pub fn run_minivc_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("minivc").expect("Failed to find minivc binary");
    cmd.envs(vec![("NO_PAGER", "1"), ("NO_COLOR", "1")]);
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn minivc_commit(dir: &Path, message: &str) -> Command {
    let mut cmd = run_minivc_command(dir, &["commit", "-m", message]);
    cmd.envs(vec![
        ("MINIVC_AUTHOR_NAME", "fake_user"),
        ("MINIVC_AUTHOR_EMAIL", "fake_email@email.com"),
    ]);
    cmd
}

/// Write, stage and commit one file, returning the new commit hash
pub fn commit_file(dir: &Path, name: &str, content: &str, message: &str) -> String {
    write_file(FileSpec::new(dir.join(name), content.to_string()));
    run_minivc_command(dir, &["add", "-f", name])
        .assert()
        .success();
    minivc_commit(dir, message).assert().success();

    head_commit_hash(dir)
}

/// Read the HEAD hash out of the state snapshot
pub fn head_commit_hash(dir: &Path) -> String {
    state(dir)["head"]
        .as_str()
        .expect("state has a head")
        .to_string()
}

pub fn state(dir: &Path) -> serde_json::Value {
    let content =
        std::fs::read(dir.join(".minivc").join("STATE")).expect("Failed to read state file");
    serde_json::from_slice(&content).expect("Failed to parse state file")
}

pub fn branch_names(dir: &Path) -> Vec<String> {
    state(dir)["branches"]["heads"]
        .as_object()
        .expect("state has branch heads")
        .keys()
        .cloned()
        .collect()
}
