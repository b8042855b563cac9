use crate::common::command::{
    commit_field, commit_file, head_commit_id, init_repository_dir, read_commit_object,
    run_minigit_command,
};
use crate::common::file::{list_worktree_files, read_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn merge_feature_branch(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_minigit_command(dir, &["branch", "feature"])
        .assert()
        .success();
    run_minigit_command(dir, &["checkout", "feature"])
        .assert()
        .success();
    commit_file(dir, "a.txt", "hello world", "second");
    run_minigit_command(dir, &["checkout", "main"])
        .assert()
        .success();
    let main_tip = head_commit_id(dir);

    run_minigit_command(dir, &["merge", "feature"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Merge made by the 'three-way' strategy.",
        ));

    assert_eq!(read_file(&dir.join("a.txt")), "hello world");
    assert_eq!(list_worktree_files(dir), vec!["a.txt"]);

    let merge_commit = head_commit_id(dir);
    assert_ne!(merge_commit, main_tip);
    let commit = read_commit_object(dir, &merge_commit);
    assert_eq!(commit_field(&commit, "parent"), main_tip);
    assert_eq!(
        commit_field(&commit, "message"),
        format!("Merge branch 'feature' into {main_tip}")
    );

    Ok(())
}

#[rstest]
fn merge_keeps_changes_from_both_sides(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_minigit_command(dir, &["branch", "feature"])
        .assert()
        .success();
    run_minigit_command(dir, &["checkout", "feature"])
        .assert()
        .success();
    commit_file(dir, "theirs.txt", "from feature", "feature work");
    run_minigit_command(dir, &["checkout", "main"])
        .assert()
        .success();
    commit_file(dir, "a.txt", "changed on main", "main work");

    run_minigit_command(dir, &["merge", "feature"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Adding theirs.txt\n"));

    assert_eq!(list_worktree_files(dir), vec!["a.txt", "theirs.txt"]);
    assert_eq!(read_file(&dir.join("a.txt")), "changed on main");
    assert_eq!(read_file(&dir.join("theirs.txt")), "from feature");

    Ok(())
}
