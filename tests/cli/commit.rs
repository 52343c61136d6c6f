use crate::common::command::{init_repository_dir, run_twig_command, twig_commit};
use crate::common::file::{FileSpec, write_file, write_generated_files};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn commit_staged_files(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;
    let files = write_generated_files(repository_dir.path(), 3);

    for file in &files {
        let name = file.path.file_name().unwrap().to_string_lossy().to_string();
        run_twig_command(repository_dir.path(), &["add", &name])
            .assert()
            .success();
    }

    twig_commit(repository_dir.path(), "generated files")
        .assert()
        .success();

    run_twig_command(repository_dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Staged Files ===\n\n"));

    Ok(())
}

#[rstest]
fn commit_without_staged_changes_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    twig_commit(init_repository_dir.path(), "nothing")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no changes added to the commit"));

    Ok(())
}

#[rstest]
fn commit_with_blank_message_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;
    write_file(FileSpec::new(
        repository_dir.path().join("1.txt"),
        "changed".to_string(),
    ));
    run_twig_command(repository_dir.path(), &["add", "1.txt"])
        .assert()
        .success();

    twig_commit(repository_dir.path(), "")
        .assert()
        .failure()
        .stderr(predicate::str::contains("please enter a commit message"));

    Ok(())
}

#[rstest]
fn rm_of_unknown_file_fails(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_twig_command(init_repository_dir.path(), &["rm", "unknown.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no reason to remove the file"));

    Ok(())
}

#[rstest]
fn rm_of_tracked_file_deletes_it(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    run_twig_command(repository_dir.path(), &["rm", "a/2.txt"])
        .assert()
        .success();

    assert!(!repository_dir.path().join("a").exists());
    run_twig_command(repository_dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Removed Files ===\na/2.txt\n"));

    Ok(())
}
