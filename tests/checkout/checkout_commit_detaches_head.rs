use crate::common::command::{
    commit_file, head_commit_id, init_repository_dir, read_ref, run_minigit_command,
};
use crate::common::file::read_file;
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn checkout_commit_detaches_head(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let first = head_commit_id(dir);
    commit_file(dir, "a.txt", "changed", "second");
    let second = head_commit_id(dir);

    run_minigit_command(dir, &["checkout", &first])
        .assert()
        .success()
        .stdout(predicate::str::contains("You are in 'detached HEAD' state."))
        .stdout(predicate::str::ends_with(format!(
            "HEAD is now at {} first\n",
            &first[..7]
        )));

    assert_eq!(read_ref(dir, "HEAD"), first);
    assert_eq!(read_file(&dir.join("a.txt")), "hello");
    assert_eq!(read_ref(dir, "refs/heads/main"), second);

    // committing while detached moves HEAD only
    commit_file(dir, "b.txt", "bee", "detached work");
    let detached = head_commit_id(dir);
    assert_eq!(read_ref(dir, "HEAD"), detached);
    assert_eq!(read_ref(dir, "refs/heads/main"), second);

    Ok(())
}
