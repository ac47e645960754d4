use crate::common::command::{
    commit_file, head_commit_hash, init_repository_dir, run_minivc_command, state,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;

#[rstest]
fn restores_a_file_from_a_historical_commit(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    let m1 = commit_file(dir.path(), "a.txt", "X", "m1");
    commit_file(dir.path(), "a.txt", "later", "m2");
    std::fs::remove_file(dir.path().join("a.txt")).unwrap();

    run_minivc_command(dir.path(), &["checkout", "-c", &m1[..8], "--a.txt"])
        .assert()
        .success();

    assert_eq!(read_file(&dir.path().join("a.txt")), "X");
}

#[rstest]
fn restores_a_modified_file_from_head(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    write_file(FileSpec::new(dir.path().join("a.txt"), "scribbles".to_string()));

    run_minivc_command(dir.path(), &["checkout", "--a.txt"])
        .assert()
        .success();

    assert_eq!(read_file(&dir.path().join("a.txt")), "A");
}

#[rstest]
#[case(&["checkout", "--missing.txt"], "error: file missing.txt does not exist in commit")]
#[case(&["checkout", "-c", "deadbeef", "--a.txt"], "error: no commit with hash deadbeef exists")]
#[case(&["checkout", "ghost"], "error: branch 'ghost' not found")]
#[case(&["checkout", "-b", "master"], "error: a branch named 'master' already exists")]
#[case(&["checkout", "-x", "y", "z"], "error: invalid checkout arguments")]
fn checkout_failures_are_reported(
    init_repository_dir: TempDir,
    #[case] args: &[&str],
    #[case] message: &str,
) {
    run_minivc_command(init_repository_dir.path(), args)
        .assert()
        .failure()
        .stdout(predicate::str::contains(message));
}

#[rstest]
fn new_branch_starts_at_head_with_a_fork_point(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    let head = head_commit_hash(dir.path());

    run_minivc_command(dir.path(), &["checkout", "-b", "feature"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Switched to a new branch 'feature'"));

    let state = state(dir.path());
    assert_eq!(state["current_branch"], "feature");
    assert_eq!(state["branches"]["heads"]["feature"], head.as_str());
    assert_eq!(state["branches"]["fork_points"]["feature"], head.as_str());
}

#[rstest]
fn switching_branches_swaps_the_working_files(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    run_minivc_command(dir.path(), &["checkout", "-b", "feature"])
        .assert()
        .success();
    commit_file(dir.path(), "a.txt", "feature A", "f1");
    commit_file(dir.path(), "docs/only-feature.md", "docs", "f2");
    write_file(FileSpec::new(dir.path().join("script.sh"), "echo".to_string()));

    run_minivc_command(dir.path(), &["checkout", "master"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Switched to branch 'master'"));

    assert_eq!(read_file(&dir.path().join("a.txt")), "A");
    assert!(!dir.path().join("docs").exists());
    // files outside the extension policy are never touched
    assert!(dir.path().join("script.sh").exists());

    run_minivc_command(dir.path(), &["checkout", "feature"])
        .assert()
        .success();
    assert_eq!(read_file(&dir.path().join("a.txt")), "feature A");
    assert_eq!(read_file(&dir.path().join("docs/only-feature.md")), "docs");
}

#[rstest]
#[case(&["checkout", "ghost"], true)]
#[case(&["checkout", "-b", "master"], false)]
fn lookup_failures_hint_at_listing_commands(
    init_repository_dir: TempDir,
    #[case] args: &[&str],
    #[case] hinted: bool,
) {
    let hint = predicate::str::contains("hint: `minivc status`");

    let assert = run_minivc_command(init_repository_dir.path(), args)
        .assert()
        .failure();
    if hinted {
        assert.stdout(hint);
    } else {
        assert.stdout(hint.not());
    }
}

#[rstest]
fn switching_refuses_to_clobber_untracked_files(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    commit_file(dir.path(), "x.txt", "X", "c0");
    run_minivc_command(dir.path(), &["checkout", "-b", "feature"])
        .assert()
        .success();
    run_minivc_command(dir.path(), &["rm", "x.txt"]).assert().success();
    commit_file(dir.path(), "x.txt/y.txt", "Y", "f1");
    write_file(FileSpec::new(
        dir.path().join("x.txt").join("precious.bin"),
        "precious".to_string(),
    ));

    run_minivc_command(dir.path(), &["checkout", "master"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("x.txt/precious.bin"));

    assert_eq!(read_file(&dir.path().join("x.txt").join("precious.bin")), "precious");
    assert_eq!(state(dir.path())["current_branch"], "feature");
}
