use crate::common::command::{
    commit_file, head_commit_id, init_repository_dir, run_minigit_command,
};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn show_multiple_commits_with_decorations(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let first = head_commit_id(dir);
    run_minigit_command(dir, &["branch", "release"])
        .assert()
        .success();
    commit_file(dir, "a.txt", "hello again", "second");
    let second = head_commit_id(dir);

    let output = run_minigit_command(dir, &["log"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let output = String::from_utf8(output)?;

    let headers = output
        .lines()
        .filter(|line| line.starts_with("commit "))
        .collect::<Vec<_>>();
    assert_eq!(
        headers,
        vec![
            format!("commit {second} (HEAD -> main)"),
            format!("commit {first} (release)"),
        ]
    );
    let parents = output
        .lines()
        .filter_map(|line| line.strip_prefix("Parent: "))
        .collect::<Vec<_>>();
    assert_eq!(parents, vec![first.as_str(), ""]);

    Ok(())
}
