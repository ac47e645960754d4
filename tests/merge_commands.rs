use crate::common::command::{
    commit_file, head_commit_hash, init_repository_dir, minivc_commit, run_minivc_command, state,
};
use crate::common::file::read_file;
use assert_fs::TempDir;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;

/// Returns the feature head after committing `feature_content` on `feature`
/// and optionally `master_content` on master, with master checked out
fn diverge(dir: &TempDir, feature_content: &str, master_content: Option<&str>) -> String {
    run_minivc_command(dir.path(), &["checkout", "-b", "feature"])
        .assert()
        .success();
    let feature_head = commit_file(dir.path(), "a.txt", feature_content, "feature edit");
    run_minivc_command(dir.path(), &["checkout", "master"])
        .assert()
        .success();
    if let Some(content) = master_content {
        commit_file(dir.path(), "a.txt", content, "master edit");
    }
    feature_head
}

#[rstest]
fn non_conflicting_merge_stages_their_change(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    let feature_head = diverge(&dir, "Y", None);

    run_minivc_command(dir.path(), &["merge", "feature"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CONFLICT").not())
        .stdout(predicate::str::contains("Staged 1 file(s)"));

    assert_eq!(read_file(&dir.path().join("a.txt")), "Y");
    let state = state(dir.path());
    assert!(state["staging"]["staged"]["a.txt"].is_string());
    assert_eq!(state["pending_merge"]["head"], feature_head.as_str());
}

#[rstest]
fn conflicting_merge_writes_both_sides(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    diverge(&dir, "F", Some("M"));

    run_minivc_command(dir.path(), &["merge", "feature"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CONFLICT in a.txt"));

    assert_eq!(
        read_file(&dir.path().join("a.txt")),
        "M<<<<<<<<<<<<<<<HEAD\n>>>>>>>>>>>>>>>feature\nF"
    );
    run_minivc_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Staged Files ===\na.txt\n"));
}

#[rstest]
fn committing_a_merge_records_the_merged_head(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    let feature_head = diverge(&dir, "Y", None);
    let master_head = head_commit_hash(dir.path());
    run_minivc_command(dir.path(), &["merge", "feature"])
        .assert()
        .success();

    minivc_commit(dir.path(), "merge feature")
        .assert()
        .success();

    let state = state(dir.path());
    assert!(state.get("pending_merge").is_none());
    run_minivc_command(dir.path(), &["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "Merge: {} {}",
            &master_head[..7],
            &feature_head[..7]
        )));
}

#[rstest]
#[case("ghost", "error: branch 'ghost' not found")]
#[case("master", "error: cannot merge branch 'master' with itself")]
fn merge_failures_are_reported(
    init_repository_dir: TempDir,
    #[case] branch: &str,
    #[case] message: &str,
) {
    run_minivc_command(init_repository_dir.path(), &["merge", branch])
        .assert()
        .failure()
        .stdout(predicate::str::contains(message));
}

#[rstest]
fn merge_refuses_uncommitted_changes(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    diverge(&dir, "Y", None);
    std::fs::write(dir.path().join("pending.txt"), "pending").unwrap();
    run_minivc_command(dir.path(), &["add", "-f", "pending.txt"])
        .assert()
        .success();

    run_minivc_command(dir.path(), &["merge", "feature"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("error: you have staged changes"));
}
