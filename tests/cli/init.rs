use crate::common::command::{repository_dir, run_twig_command};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn init_creates_repository_directory(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir_absolute_path = repository_dir.path().canonicalize()?.display().to_string();

    run_twig_command(repository_dir.path(), &["init"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(
            r"^Initialized empty twig repository in .+\.twig\n$",
        )?)
        .stdout(predicate::str::contains(dir_absolute_path));

    assert!(repository_dir.path().join(".twig").join("state").is_file());
    assert!(repository_dir.path().join(".twig").join("objects").is_dir());

    Ok(())
}

#[rstest]
fn init_at_explicit_path(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let target = repository_dir.path().join("nested").join("project");

    run_twig_command(repository_dir.path(), &["init", &target.display().to_string()])
        .assert()
        .success();

    assert!(target.join(".twig").join("state").is_file());

    Ok(())
}

#[rstest]
fn init_twice_fails(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_twig_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    run_twig_command(repository_dir.path(), &["init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    Ok(())
}

#[rstest]
fn commands_outside_a_repository_fail(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_twig_command(repository_dir.path(), &["status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a twig repository"));

    Ok(())
}
