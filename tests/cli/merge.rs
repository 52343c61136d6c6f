use crate::common::command::{commit_file, init_repository_dir, run_twig_command};
use crate::common::file::read_file;
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn merge_reports_fast_forward(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "feature"]).assert().success();
    run_twig_command(dir, &["checkout", "feature"]).assert().success();
    commit_file(dir, "1.txt", "ahead", "ahead");
    run_twig_command(dir, &["checkout", "master"]).assert().success();

    run_twig_command(dir, &["merge", "feature"])
        .assert()
        .success()
        .stdout("Current branch fast-forwarded.\n");
    assert_eq!(read_file(&dir.join("1.txt")), "ahead");

    Ok(())
}

#[rstest]
fn merge_reports_ancestor(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "old"]).assert().success();
    commit_file(dir, "1.txt", "newer", "newer");

    run_twig_command(dir, &["merge", "old"])
        .assert()
        .success()
        .stdout("Given branch is an ancestor of the current branch.\n");

    Ok(())
}

#[rstest]
fn merge_reports_conflict(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "feature"]).assert().success();
    commit_file(dir, "1.txt", "master\n", "master edit");
    run_twig_command(dir, &["checkout", "feature"]).assert().success();
    commit_file(dir, "1.txt", "feature\n", "feature edit");
    run_twig_command(dir, &["checkout", "master"]).assert().success();

    run_twig_command(dir, &["merge", "feature"])
        .assert()
        .success()
        .stdout("Encountered a merge conflict.\n");
    assert_eq!(
        read_file(&dir.join("1.txt")),
        "<<<<<<< HEAD\nmaster\n=======\nfeature\n>>>>>>>\n"
    );

    Ok(())
}

#[rstest]
#[case::unknown_branch("nowhere", "branch nowhere does not exist")]
#[case::itself("master", "cannot merge a branch with itself")]
fn merge_failures(
    init_repository_dir: TempDir,
    #[case] branch: &str,
    #[case] message: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    run_twig_command(init_repository_dir.path(), &["merge", branch])
        .assert()
        .failure()
        .stderr(predicate::str::contains(message));

    Ok(())
}

#[rstest]
fn merge_with_staged_changes_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "feature"]).assert().success();
    std::fs::write(dir.join("1.txt"), "staged")?;
    run_twig_command(dir, &["add", "1.txt"]).assert().success();

    run_twig_command(dir, &["merge", "feature"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("you have uncommitted changes"));

    Ok(())
}
