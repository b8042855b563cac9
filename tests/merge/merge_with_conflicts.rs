use crate::common::command::{
    commit_file, head_commit_id, init_repository_dir, minigit_commit, run_minigit_command,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn merge_with_conflicts(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    commit_file(dir, "a.txt", "a", "base");
    run_minigit_command(dir, &["branch", "feature"])
        .assert()
        .success();
    run_minigit_command(dir, &["checkout", "feature"])
        .assert()
        .success();
    commit_file(dir, "a.txt", "c", "theirs");
    run_minigit_command(dir, &["checkout", "main"])
        .assert()
        .success();
    commit_file(dir, "a.txt", "b", "ours");
    let main_tip = head_commit_id(dir);

    run_minigit_command(dir, &["merge", "feature"])
        .assert()
        .success()
        .stdout(predicate::eq(
            "CONFLICT (content): Merge conflict in a.txt\n\
             Automatic merge failed; fix conflicts and then commit the result.\n",
        ));

    assert_eq!(
        read_file(&dir.join("a.txt")),
        "<<<<<<< HEAD\nb=======\nc>>>>>>> feature\n"
    );
    assert_eq!(head_commit_id(dir), main_tip);

    // the user resolves the conflict and commits explicitly
    write_file(FileSpec::new(dir.join("a.txt"), "b and c".to_string()));
    run_minigit_command(dir, &["add", "a.txt"])
        .assert()
        .success();
    minigit_commit(dir, "resolve conflict")
        .assert()
        .success();

    assert_ne!(head_commit_id(dir), main_tip);
    assert_eq!(read_file(&dir.join("a.txt")), "b and c");

    Ok(())
}
