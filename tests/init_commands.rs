use crate::common::command::{branch_names, repository_dir, run_minivc_command, state};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;

#[rstest]
fn init_creates_the_repository_layout(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir;

    run_minivc_command(dir.path(), &["init"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Initialized empty minivc repository in",
        ));

    let repo_dir = dir.path().join(".minivc");
    assert!(repo_dir.join("STATE").is_file());
    assert!(repo_dir.join("config.toml").is_file());
    assert!(repo_dir.join("commits").is_dir());
    assert_eq!(branch_names(dir.path()), vec!["master"]);
    assert_eq!(state(dir.path())["current_branch"], "master");

    Ok(())
}

#[rstest]
fn log_after_init_shows_the_single_root_commit(repository_dir: TempDir) {
    let dir = repository_dir;
    run_minivc_command(dir.path(), &["init"]).assert().success();

    let output = run_minivc_command(dir.path(), &["log"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let output = String::from_utf8(output).expect("log output is utf-8");

    assert_eq!(output.matches("commit ").count(), 1);
    assert!(output.contains("    Initial commit"));
}

#[rstest]
fn init_twice_fails(repository_dir: TempDir) {
    let dir = repository_dir;
    run_minivc_command(dir.path(), &["init"]).assert().success();

    run_minivc_command(dir.path(), &["init"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("error: a minivc repository already exists"));
}

#[rstest]
fn commands_outside_a_repository_fail(repository_dir: TempDir) {
    run_minivc_command(repository_dir.path(), &["status"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("error: not a minivc repository"));
}

#[rstest]
fn init_accepts_a_target_directory(repository_dir: TempDir) {
    let dir = repository_dir;

    run_minivc_command(dir.path(), &["-C", "nested/project", "init"])
        .assert()
        .success();

    assert!(dir.path().join("nested/project/.minivc/STATE").is_file());
}
