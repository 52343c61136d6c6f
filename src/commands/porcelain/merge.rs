use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::conflict::ensure_no_untracked_overwrite;
use crate::artifacts::merge::MergeOutcome;
use crate::artifacts::merge::resolution::{Resolution, conflict_content};
use crate::artifacts::objects::commit::FileMap;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;
use bytes::Bytes;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Working-tree changes a three-way merge will make, with every blob already loaded
#[derive(Debug, Default)]
struct MergePlan {
    writes: Vec<(PathBuf, Bytes)>,
    removals: Vec<PathBuf>,
    conflicts: Vec<PathBuf>,
}

impl Repository {
    /// Merge branch `name` into the current branch
    pub fn merge(&mut self, name: &str) -> anyhow::Result<MergeOutcome> {
        if !self.index().is_empty() {
            return Err(RepositoryError::UncommittedChanges.into());
        }
        let other = BranchName::try_parse(name.to_string())
            .map_err(|_| RepositoryError::BranchNotFound(name.to_string()))?;
        if !self.refs().contains(&other) {
            return Err(RepositoryError::BranchNotFound(name.to_string()).into());
        }
        let current = self.refs().current_branch().clone();
        if other == current {
            return Err(RepositoryError::SelfMerge.into());
        }

        let head = self.head()?.clone();
        let branch_tip = self.refs().tip(&other)?.clone();
        let split = self.split_point(&current, &other, &head, &branch_tip)?;

        if split.as_ref() == Some(&branch_tip) {
            tracing::info!(%current, %other, "given branch is an ancestor");
            return Ok(MergeOutcome::AlreadyAncestor);
        }
        if split.as_ref() == Some(&head) {
            return self.fast_forward(&current, &other, branch_tip);
        }

        let head_files = self.head_files()?;
        let other_files = self.database().get_commit(&branch_tip)?.files().clone();
        let split_files = match &split {
            Some(oid) => self.database().get_commit(oid)?.files().clone(),
            None => FileMap::new(),
        };

        let workspace_files = self.workspace().list_files()?;
        ensure_no_untracked_overwrite(&workspace_files, &head_files, self.index(), &other_files)?;

        let plan = self.plan_merge(&split_files, &head_files, &other_files)?;
        let conflicts = plan.conflicts.clone();
        self.apply_merge_plan(plan)?;

        let message = format!("Merged {other} into {current}.");
        let commit = self.build_commit(&message, head, Some(branch_tip.clone()))?;
        self.state_mut()
            .refs
            .split_points_mut()
            .record_merge(&current, &other, &branch_tip);

        self.persist()?;

        if conflicts.is_empty() {
            tracing::info!(%current, %other, %commit, "merged");
            Ok(MergeOutcome::Clean { commit })
        } else {
            tracing::info!(%current, %other, %commit, conflicts = conflicts.len(), "merged with conflicts");
            Ok(MergeOutcome::Conflict {
                commit,
                paths: conflicts,
            })
        }
    }

    fn split_point(
        &self,
        current: &BranchName,
        other: &BranchName,
        head: &ObjectId,
        branch_tip: &ObjectId,
    ) -> anyhow::Result<Option<ObjectId>> {
        if let Some(oid) = self.refs().split_points().get(current, other) {
            return Ok(Some(oid.clone()));
        }

        tracing::warn!(%current, %other, "no recorded split point, searching commit graph");
        self.commits()
            .nearest_common_ancestor(self.database(), head, branch_tip)
    }

    fn fast_forward(
        &mut self,
        current: &BranchName,
        other: &BranchName,
        branch_tip: ObjectId,
    ) -> anyhow::Result<MergeOutcome> {
        let target_files = self.database().get_commit(&branch_tip)?.files().clone();
        self.apply_file_map(&target_files)?;

        let state = self.state_mut();
        state.refs.advance(branch_tip.clone())?;
        state
            .refs
            .split_points_mut()
            .set(current, other, branch_tip.clone());
        state.index.clear();

        self.persist()?;

        tracing::info!(%current, %other, tip = %branch_tip, "fast-forwarded");
        Ok(MergeOutcome::FastForwarded { tip: branch_tip })
    }

    fn plan_merge(
        &self,
        split_files: &FileMap,
        head_files: &FileMap,
        other_files: &FileMap,
    ) -> anyhow::Result<MergePlan> {
        let paths = head_files
            .keys()
            .chain(other_files.keys())
            .collect::<BTreeSet<_>>();
        let mut plan = MergePlan::default();

        for path in paths {
            let head_blob = head_files.get(path);
            let other_blob = other_files.get(path);

            match Resolution::resolve(split_files.get(path), head_blob, other_blob) {
                Resolution::Keep => {}
                Resolution::Take(oid) => {
                    plan.writes
                        .push((path.clone(), self.database().get_blob(&oid)?));
                }
                Resolution::Remove => plan.removals.push(path.clone()),
                Resolution::Conflict => {
                    let head_content = head_blob
                        .map(|oid| self.database().get_blob(oid))
                        .transpose()?;
                    let other_content = other_blob
                        .map(|oid| self.database().get_blob(oid))
                        .transpose()?;

                    let content =
                        conflict_content(head_content.as_deref(), other_content.as_deref());
                    plan.writes.push((path.clone(), content));
                    plan.conflicts.push(path.clone());
                }
            }
        }

        Ok(plan)
    }

    fn apply_merge_plan(&mut self, plan: MergePlan) -> anyhow::Result<()> {
        for path in &plan.removals {
            self.workspace().remove_file(path)?;
        }
        for (path, content) in &plan.writes {
            self.workspace().write_file(path, content)?;
        }

        let index = &mut self.state_mut().index;
        for path in &plan.removals {
            index.stage_remove(path, true)?;
        }
        for (path, content) in plan.writes {
            index.stage_add(&path, content, None)?;
        }

        tracing::debug!(
            written = index.additions().len(),
            removed = index.removals().len(),
            "staged merge result"
        );
        Ok(())
    }

    pub fn print_merge_outcome(&self, outcome: &MergeOutcome) -> anyhow::Result<()> {
        match outcome {
            MergeOutcome::Clean { .. } => {}
            MergeOutcome::Conflict { .. } => {
                writeln!(self.writer(), "Encountered a merge conflict.")?;
            }
            MergeOutcome::FastForwarded { .. } => {
                writeln!(self.writer(), "Current branch fast-forwarded.")?;
            }
            MergeOutcome::AlreadyAncestor => {
                writeln!(
                    self.writer(),
                    "Given branch is an ancestor of the current branch."
                )?;
            }
        }

        Ok(())
    }
}
