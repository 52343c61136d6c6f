use crate::common::repository::{commit_file, error_kind, read, repository, write};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::path::PathBuf;
use twig::areas::repository::Repository;
use twig::artifacts::branch::branch_name::BranchName;
use twig::errors::{ErrorKind, RepositoryError};

fn name(name: &str) -> BranchName {
    BranchName::try_parse(name.to_string()).unwrap()
}

#[rstest]
fn branch_starts_at_head_and_records_split_point(
    repository: (TempDir, Repository),
) -> Result<(), Box<dyn std::error::Error>> {
    let (dir, mut repository) = repository;
    let head = commit_file(&mut repository, dir.path(), "f", "base", "base");

    repository.branch("feature")?;

    assert_eq!(repository.refs().tip(&name("feature"))?, &head);
    assert_eq!(
        repository.refs().split_points().get(&name("master"), &name("feature")),
        Some(&head)
    );
    assert_eq!(error_kind(repository.branch("feature")), Some(ErrorKind::AlreadyExists));

    Ok(())
}

#[rstest]
#[case::consecutive_dots("a..b")]
#[case::lock_suffix("topic.lock")]
#[case::empty("")]
fn invalid_branch_names_are_rejected(repository: (TempDir, Repository), #[case] branch: &str) {
    let (_dir, mut repository) = repository;

    let error = repository.branch(branch).unwrap_err();

    assert!(matches!(
        RepositoryError::find(&error),
        Some(RepositoryError::InvalidBranchName(_))
    ));
}

#[rstest]
fn new_branch_inherits_split_points_of_current_branch(
    repository: (TempDir, Repository),
) -> Result<(), Box<dyn std::error::Error>> {
    let (dir, mut repository) = repository;
    let fork = commit_file(&mut repository, dir.path(), "f", "base", "base");
    repository.branch("one")?;
    commit_file(&mut repository, dir.path(), "f", "moved on", "master only");

    repository.branch("two")?;

    let splits = repository.refs().split_points();
    assert_eq!(splits.get(&name("one"), &name("two")), Some(&fork));
    assert_eq!(splits.get(&name("master"), &name("two")), repository.refs().head().ok());

    Ok(())
}

#[rstest]
fn checkout_switches_working_tree(
    repository: (TempDir, Repository),
) -> Result<(), Box<dyn std::error::Error>> {
    let (dir, mut repository) = repository;
    commit_file(&mut repository, dir.path(), "shared.txt", "base", "base");
    repository.branch("feature")?;
    repository.checkout_branch("feature")?;
    commit_file(&mut repository, dir.path(), "dir/feature.txt", "feature", "feature");
    commit_file(&mut repository, dir.path(), "shared.txt", "feature side", "edit shared");

    repository.checkout_branch("master")?;

    assert_eq!(repository.refs().current_branch(), &name("master"));
    assert_eq!(read(dir.path(), "shared.txt"), "base");
    assert!(!dir.path().join("dir").exists());

    repository.checkout_branch("feature")?;

    assert_eq!(read(dir.path(), "dir/feature.txt"), "feature");
    assert_eq!(read(dir.path(), "shared.txt"), "feature side");

    Ok(())
}

#[rstest]
fn checkout_clears_the_staging_area(
    repository: (TempDir, Repository),
) -> Result<(), Box<dyn std::error::Error>> {
    let (dir, mut repository) = repository;
    commit_file(&mut repository, dir.path(), "f", "base", "base");
    repository.branch("feature")?;
    write(dir.path(), "f", "staged edit");
    repository.add(std::path::Path::new("f"))?;

    repository.checkout_branch("feature")?;

    assert!(repository.index().is_empty());
    assert_eq!(read(dir.path(), "f"), "base");

    Ok(())
}

#[rstest]
fn checkout_rejects_current_and_unknown_branches(repository: (TempDir, Repository)) {
    let (_dir, mut repository) = repository;

    assert_eq!(
        error_kind(repository.checkout_branch("master")),
        Some(ErrorKind::InvalidState)
    );
    assert_eq!(
        error_kind(repository.checkout_branch("nowhere")),
        Some(ErrorKind::NotFound)
    );
}

#[rstest]
fn checkout_refuses_to_overwrite_untracked_files(
    repository: (TempDir, Repository),
) -> Result<(), Box<dyn std::error::Error>> {
    let (dir, mut repository) = repository;
    repository.branch("feature")?;
    repository.checkout_branch("feature")?;
    commit_file(&mut repository, dir.path(), "g.txt", "committed", "add g");
    repository.checkout_branch("master")?;
    write(dir.path(), "g.txt", "precious");

    let error = repository.checkout_branch("feature").unwrap_err();

    assert_eq!(
        RepositoryError::find(&error),
        Some(&RepositoryError::UntrackedOverwrite(vec![PathBuf::from("g.txt")]))
    );
    assert_eq!(read(dir.path(), "g.txt"), "precious");
    assert_eq!(repository.refs().current_branch(), &name("master"));

    Ok(())
}

#[rstest]
fn deleting_a_branch_purges_its_split_points(
    repository: (TempDir, Repository),
) -> Result<(), Box<dyn std::error::Error>> {
    let (dir, mut repository) = repository;
    let first = commit_file(&mut repository, dir.path(), "f", "1", "one");
    repository.branch("feature")?;
    let second = commit_file(&mut repository, dir.path(), "f", "2", "two");

    repository.delete_branch("feature")?;

    assert!(!repository.refs().contains(&name("feature")));
    assert!(repository.refs().split_points().is_empty());

    repository.branch("feature")?;
    assert_eq!(repository.refs().lineage(&name("feature"))?, &[second.clone()]);
    assert_eq!(
        repository.refs().split_points().get(&name("master"), &name("feature")),
        Some(&second)
    );
    assert_ne!(first, second);

    Ok(())
}

#[rstest]
fn deleting_current_or_unknown_branch_fails(repository: (TempDir, Repository)) {
    let (_dir, mut repository) = repository;

    assert_eq!(
        error_kind(repository.delete_branch("master")),
        Some(ErrorKind::InvalidState)
    );
    assert_eq!(
        error_kind(repository.delete_branch("nowhere")),
        Some(ErrorKind::NotFound)
    );
}
