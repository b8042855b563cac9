use crate::common::command::{
    commit_field, commit_file, head_commit_id, init_repository_dir, minigit_commit,
    read_commit_object, run_minigit_command,
};
use crate::common::file::list_worktree_files;
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn merge_branch_that_deleted_a_file(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    commit_file(dir, "d.txt", "doomed", "add d");
    run_minigit_command(dir, &["branch", "feature"])
        .assert()
        .success();
    run_minigit_command(dir, &["checkout", "feature"])
        .assert()
        .success();
    std::fs::remove_file(dir.join("d.txt"))?;
    run_minigit_command(dir, &["add", "."])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed d.txt from staging area."));
    minigit_commit(dir, "drop d").assert().success();

    let feature_tip = read_commit_object(dir, &head_commit_id(dir));
    assert!(!commit_field(&feature_tip, "files").contains("d.txt="));

    run_minigit_command(dir, &["checkout", "main"])
        .assert()
        .success();
    assert_eq!(list_worktree_files(dir), vec!["a.txt", "d.txt"]);
    commit_file(dir, "b.txt", "main work", "main work");

    run_minigit_command(dir, &["merge", "feature"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Removing d.txt\n"));

    assert_eq!(list_worktree_files(dir), vec!["a.txt", "b.txt"]);
    let merge_commit = read_commit_object(dir, &head_commit_id(dir));
    let files = commit_field(&merge_commit, "files");
    assert!(files.contains("a.txt=") && files.contains("b.txt="));
    assert!(!files.contains("d.txt="));

    Ok(())
}
