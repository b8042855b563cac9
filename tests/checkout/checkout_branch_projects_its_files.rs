use crate::common::command::{commit_file, init_repository_dir, read_ref, run_minigit_command};
use crate::common::file::{FileSpec, list_worktree_files, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn checkout_branch_projects_its_files(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_minigit_command(dir, &["branch", "feature"])
        .assert()
        .success();
    run_minigit_command(dir, &["checkout", "feature"])
        .assert()
        .success()
        .stdout(predicate::eq("Switched to branch 'feature'\n"));
    commit_file(dir, "a.txt", "hello world", "second");
    commit_file(dir, "docs/guide.txt", "guide", "third");
    write_file(FileSpec::new(dir.join("scratch.txt"), "untracked".to_string()));

    run_minigit_command(dir, &["checkout", "main"])
        .assert()
        .success()
        .stdout(predicate::eq("Switched to branch 'main'\n"));

    assert_eq!(list_worktree_files(dir), vec!["a.txt"]);
    assert_eq!(read_file(&dir.join("a.txt")), "hello");
    assert!(!dir.join("docs").exists());
    assert_eq!(read_ref(dir, "HEAD"), "ref: refs/heads/main");

    run_minigit_command(dir, &["checkout", "feature"])
        .assert()
        .success();

    assert_eq!(list_worktree_files(dir), vec!["a.txt", "docs/guide.txt"]);
    assert_eq!(read_file(&dir.join("a.txt")), "hello world");

    Ok(())
}
