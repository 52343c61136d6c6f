use crate::common::command::{init_repository_dir, run_twig_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn status_of_clean_repository(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_twig_command(init_repository_dir.path(), &["status"])
        .assert()
        .success()
        .stdout(
            "=== Branches ===\n*master\n\n\
             === Staged Files ===\n\n\
             === Removed Files ===\n\n\
             === Modifications Not Staged For Commit ===\n\n\
             === Untracked Files ===\n\n",
        );

    Ok(())
}

#[rstest]
fn status_lists_every_kind_of_change(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "dev"]).assert().success();

    write_file(FileSpec::new(dir.join("1.txt"), "edited".to_string()));
    run_twig_command(dir, &["rm", "a/2.txt"]).assert().success();
    write_file(FileSpec::new(dir.join("staged.txt"), "staged".to_string()));
    run_twig_command(dir, &["add", "staged.txt"]).assert().success();
    write_file(FileSpec::new(dir.join("untracked.txt"), "?".to_string()));

    run_twig_command(dir, &["status"])
        .assert()
        .success()
        .stdout(
            "=== Branches ===\ndev\n*master\n\n\
             === Staged Files ===\nstaged.txt\n\n\
             === Removed Files ===\na/2.txt\n\n\
             === Modifications Not Staged For Commit ===\n1.txt (modified)\n\n\
             === Untracked Files ===\nuntracked.txt\n\n",
        );

    Ok(())
}
