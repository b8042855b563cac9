use crate::common::command::{
    COMMITTER_DATE, commit_field, head_commit_id, minigit_commit, read_commit_object,
    repository_dir, run_minigit_command,
};
use crate::common::file::write_generated_files;
use assert_fs::TempDir;
use fake::Fake;
use fake::faker::lorem::en::Words;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn write_root_commit_successfully(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_minigit_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    let files = write_generated_files(repository_dir.path(), (1..=5).fake::<usize>());
    run_minigit_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();
    let message = Words(3..6).fake::<Vec<String>>().join(" ");

    minigit_commit(repository_dir.path(), &message)
        .assert()
        .success()
        .stdout(predicate::str::is_match(format!(
            r"^\[main \(root-commit\) [0-9a-f]{{7}}\] {message}\n$"
        ))?);

    let commit_id = head_commit_id(repository_dir.path());
    assert_eq!(commit_id.len(), 40);

    let commit = read_commit_object(repository_dir.path(), &commit_id);
    assert_eq!(commit_field(&commit, "commitHash"), commit_id);
    assert_eq!(commit_field(&commit, "message"), message);
    assert_eq!(commit_field(&commit, "parent"), "");
    assert_eq!(
        commit_field(&commit, "timestamp"),
        "2024/3/1\t12:30:0",
        "timestamp derived from {COMMITTER_DATE}"
    );
    assert_eq!(
        commit_field(&commit, "files").split(',').count(),
        files.len()
    );

    let index = std::fs::read_to_string(repository_dir.path().join(".minigit").join("index"))?;
    assert_eq!(index, "");

    Ok(())
}
