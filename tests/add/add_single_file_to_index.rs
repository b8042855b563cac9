use crate::common::command::{repository_dir, run_minigit_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use fake::Fake;
use fake::faker::lorem::en::Words;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn add_single_file_to_index(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_minigit_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    let content = Words(5..10).fake::<Vec<String>>().join(" ");
    write_file(FileSpec::new(repository_dir.path().join("notes.txt"), content));

    run_minigit_command(repository_dir.path(), &["add", "notes.txt"])
        .assert()
        .success()
        .stdout(predicate::eq("Added notes.txt to staging area.\n"));

    let index = std::fs::read_to_string(repository_dir.path().join(".minigit").join("index"))?;
    let lines = index.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 1);
    let (name, blob_id) = lines[0].split_once(' ').ok_or("malformed index line")?;
    assert_eq!(name, "notes.txt");
    assert_eq!(blob_id.len(), 40);

    let (object_dir, object_file) = blob_id.split_at(2);
    assert!(
        repository_dir
            .path()
            .join(".minigit/objects")
            .join(object_dir)
            .join(object_file)
            .is_file()
    );

    Ok(())
}
