use crate::common::command::{init_repository_dir, run_twig_command};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn create_and_delete_branch(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();

    run_twig_command(dir, &["branch", "feature/one"]).assert().success();
    run_twig_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Branches ===\nfeature/one\n*master\n"));

    run_twig_command(dir, &["rm-branch", "feature/one"])
        .assert()
        .success();
    run_twig_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Branches ===\n*master\n"));

    Ok(())
}

#[rstest]
#[case::duplicate(&["branch", "master"], "a branch named master already exists")]
#[case::invalid_name(&["branch", "bad..name"], "invalid branch name")]
#[case::delete_current(&["rm-branch", "master"], "cannot remove the current branch")]
#[case::delete_unknown(&["rm-branch", "nowhere"], "branch nowhere does not exist")]
fn branch_command_failures(
    init_repository_dir: TempDir,
    #[case] args: &[&str],
    #[case] message: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    run_twig_command(init_repository_dir.path(), args)
        .assert()
        .failure()
        .stderr(predicate::str::contains(message));

    Ok(())
}
