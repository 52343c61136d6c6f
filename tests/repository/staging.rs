use crate::common::repository::{commit_file, error_kind, read, reopen, repository, write};
use assert_fs::TempDir;
use bytes::Bytes;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::path::{Path, PathBuf};
use twig::areas::index::{AddOutcome, RemoveOutcome};
use twig::areas::repository::Repository;
use twig::errors::ErrorKind;

#[rstest]
fn committed_file_is_restored_by_checkout(
    repository: (TempDir, Repository),
) -> Result<(), Box<dyn std::error::Error>> {
    let (dir, mut repository) = repository;

    commit_file(&mut repository, dir.path(), "f", "hello", "add f");
    write(dir.path(), "f", "scribbled over");
    repository.checkout_file(Path::new("f"))?;

    assert_eq!(read(dir.path(), "f"), "hello");
    assert!(repository.index().is_empty());

    Ok(())
}

#[rstest]
fn adding_unchanged_file_stages_nothing(
    repository: (TempDir, Repository),
) -> Result<(), Box<dyn std::error::Error>> {
    let (dir, mut repository) = repository;
    commit_file(&mut repository, dir.path(), "f", "hello", "add f");

    write(dir.path(), "f", "changed");
    assert_eq!(repository.add(Path::new("f"))?, AddOutcome::Staged);
    write(dir.path(), "f", "hello");
    assert_eq!(repository.add(Path::new("f"))?, AddOutcome::AlreadyCommitted);

    assert!(repository.index().is_empty());
    assert_eq!(error_kind(repository.commit("nothing")), Some(ErrorKind::InvalidState));

    Ok(())
}

#[rstest]
fn adding_missing_file_is_not_found(repository: (TempDir, Repository)) {
    let (_dir, mut repository) = repository;

    assert_eq!(error_kind(repository.add(Path::new("ghost.txt"))), Some(ErrorKind::NotFound));
}

#[rstest]
fn removing_unknown_file_leaves_stage_unchanged(
    repository: (TempDir, Repository),
) -> Result<(), Box<dyn std::error::Error>> {
    let (dir, mut repository) = repository;
    write(dir.path(), "staged.txt", "staged");
    repository.add(Path::new("staged.txt"))?;
    let before = repository.index().clone();

    assert_eq!(
        error_kind(repository.remove(Path::new("unknown.txt"))),
        Some(ErrorKind::InvalidState)
    );
    assert_eq!(repository.index(), &before);

    Ok(())
}

#[rstest]
fn removing_tracked_file_deletes_it_and_drops_it_from_next_commit(
    repository: (TempDir, Repository),
) -> Result<(), Box<dyn std::error::Error>> {
    let (dir, mut repository) = repository;
    commit_file(&mut repository, dir.path(), "keep.txt", "keep", "add keep");
    commit_file(&mut repository, dir.path(), "gone.txt", "gone", "add gone");

    assert_eq!(
        repository.remove(Path::new("gone.txt"))?,
        RemoveOutcome::StagedForRemoval
    );
    assert!(!dir.path().join("gone.txt").exists());

    repository.commit("remove gone")?;
    let files = repository.head_files()?;
    assert_eq!(files.keys().collect::<Vec<_>>(), vec![&PathBuf::from("keep.txt")]);

    Ok(())
}

#[rstest]
fn removing_staged_only_file_keeps_it_on_disk(
    repository: (TempDir, Repository),
) -> Result<(), Box<dyn std::error::Error>> {
    let (dir, mut repository) = repository;
    write(dir.path(), "draft.txt", "draft");
    repository.add(Path::new("draft.txt"))?;

    assert_eq!(repository.remove(Path::new("draft.txt"))?, RemoveOutcome::Unstaged);

    assert!(repository.index().is_empty());
    assert_eq!(read(dir.path(), "draft.txt"), "draft");

    Ok(())
}

#[rstest]
#[case::blank_message("   ")]
#[case::empty_message("")]
fn commit_requires_a_message(
    repository: (TempDir, Repository),
    #[case] message: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let (dir, mut repository) = repository;
    write(dir.path(), "f", "content");
    repository.add(Path::new("f"))?;

    assert_eq!(error_kind(repository.commit(message)), Some(ErrorKind::InvalidState));
    assert!(repository.index().is_staged_for_addition(Path::new("f")));

    Ok(())
}

#[rstest]
fn file_names_with_line_breaks_are_refused(
    repository: (TempDir, Repository),
) -> Result<(), Box<dyn std::error::Error>> {
    let (dir, mut repository) = repository;
    write(dir.path(), "a\nb", "x");

    assert_eq!(error_kind(repository.add(Path::new("a\nb"))), Some(ErrorKind::InvalidState));
    assert!(repository.index().is_empty());

    commit_file(&mut repository, dir.path(), "ok.txt", "fine", "still usable");
    assert_eq!(repository.head_commit()?.message(), "still usable");
    assert_eq!(repository.log()?.len(), 2);

    Ok(())
}

#[rstest]
fn files_outside_the_working_tree_cannot_be_staged(repository: (TempDir, Repository)) {
    let (_dir, mut repository) = repository;
    let outside = TempDir::new().expect("Failed to create temp dir");
    write(outside.path(), "outside.txt", "secret");
    let outside_name = outside.path().file_name().expect("temp dir has a name");

    let relative = Path::new("..").join(outside_name).join("outside.txt");
    let absolute = outside
        .path()
        .canonicalize()
        .expect("temp dir exists")
        .join("outside.txt");

    assert_eq!(error_kind(repository.add(&relative)), Some(ErrorKind::NotFound));
    assert_eq!(error_kind(repository.add(&absolute)), Some(ErrorKind::NotFound));
    assert!(repository.index().is_empty());
}

#[rstest]
fn staging_area_survives_reopening(
    repository: (TempDir, Repository),
) -> Result<(), Box<dyn std::error::Error>> {
    let (dir, mut repository) = repository;
    commit_file(&mut repository, dir.path(), "tracked.txt", "tracked", "add tracked");
    write(dir.path(), "nested/new.txt", "new");
    repository.add(Path::new("./nested/new.txt"))?;
    repository.remove(Path::new("tracked.txt"))?;
    drop(repository);

    let repository = reopen(dir.path());

    assert_eq!(
        repository.index().additions().get(Path::new("nested/new.txt")),
        Some(&Bytes::from_static(b"new"))
    );
    assert!(repository.index().is_staged_for_removal(Path::new("tracked.txt")));

    Ok(())
}

#[rstest]
fn status_reports_every_section(
    repository: (TempDir, Repository),
) -> Result<(), Box<dyn std::error::Error>> {
    use twig::artifacts::status::file_change::WorkspaceChangeType;

    let (dir, mut repository) = repository;
    commit_file(&mut repository, dir.path(), "edited.txt", "v1", "add edited");
    commit_file(&mut repository, dir.path(), "deleted.txt", "bye", "add deleted");
    commit_file(&mut repository, dir.path(), "removed.txt", "rm", "add removed");
    repository.branch("dev")?;

    write(dir.path(), "edited.txt", "v2");
    std::fs::remove_file(dir.path().join("deleted.txt"))?;
    repository.remove(Path::new("removed.txt"))?;
    write(dir.path(), "staged.txt", "staged");
    repository.add(Path::new("staged.txt"))?;
    write(dir.path(), "untracked.txt", "?");

    let status = repository.status()?;

    assert_eq!(
        status.branches.iter().map(|b| b.to_string()).collect::<Vec<_>>(),
        vec!["dev", "master"]
    );
    assert_eq!(status.current_branch.to_string(), "master");
    assert_eq!(status.staged_files, [PathBuf::from("staged.txt")].into());
    assert_eq!(status.removed_files, [PathBuf::from("removed.txt")].into());
    assert_eq!(
        status.workspace_changeset,
        [
            (PathBuf::from("deleted.txt"), WorkspaceChangeType::Deleted),
            (PathBuf::from("edited.txt"), WorkspaceChangeType::Modified),
        ]
        .into()
    );
    assert_eq!(status.untracked_files, [PathBuf::from("untracked.txt")].into());

    Ok(())
}
