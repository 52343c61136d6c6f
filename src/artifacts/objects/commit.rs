//! Commit object
//!
//! Commits represent snapshots of the repository at specific points in time.
//! They contain:
//! - Parent commit ID (absent only for the root commit)
//! - Merge parent ID (merge commits only)
//! - Timestamp with its UTC offset
//! - File map (path -> blob ID)
//! - Commit message
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! parent <parent-sha>
//! merge <merge-parent-sha>
//! timestamp <unix-seconds> <+hhmm>
//! file <blob-sha> <path>
//!
//! <commit message>
//! ```

use crate::artifacts::objects::object::{Object, Packable, Unpackable, with_header};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::RepositoryError;
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset, Utc};
use std::collections::BTreeMap;
use std::io::BufRead;
use std::path::{Path, PathBuf};

/// Mapping from repository-relative path to blob ID, ordered by path
pub type FileMap = BTreeMap<PathBuf, ObjectId>;

/// Message of the root commit created by `init`
pub const INITIAL_COMMIT_MESSAGE: &str = "initial commit";

/// Slim representation of a commit
///
/// Contains only essential information for lightweight operations like the
/// common ancestor search.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SlimCommit {
    /// The commit's object ID
    pub oid: ObjectId,
    /// The commit's parent object IDs (first parent, then merge parent)
    pub parents: Vec<ObjectId>,
    /// Commit timestamp (needed for comparison)
    pub timestamp: DateTime<FixedOffset>,
}

impl PartialOrd for SlimCommit {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SlimCommit {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.timestamp
            .cmp(&other.timestamp)
            .then_with(|| self.oid.cmp(&other.oid))
    }
}

/// Commit object
///
/// Two commits with identical fields serialize identically and therefore
/// share one object ID.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    parent: Option<ObjectId>,
    merge_parent: Option<ObjectId>,
    timestamp: DateTime<FixedOffset>,
    files: FileMap,
    message: String,
}

impl Commit {
    pub fn new(
        parent: Option<ObjectId>,
        merge_parent: Option<ObjectId>,
        timestamp: DateTime<FixedOffset>,
        files: FileMap,
        message: String,
    ) -> Self {
        Commit {
            parent,
            merge_parent,
            timestamp,
            files,
            message,
        }
    }

    /// The parentless commit every repository starts from
    pub fn root() -> Self {
        let epoch = DateTime::<Utc>::UNIX_EPOCH.fixed_offset();
        Commit::new(
            None,
            None,
            epoch,
            FileMap::new(),
            INITIAL_COMMIT_MESSAGE.to_string(),
        )
    }

    /// Get the first line of the commit message
    pub fn short_message(&self) -> String {
        self.message.lines().next().unwrap_or("").to_string()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn merge_parent(&self) -> Option<&ObjectId> {
        self.merge_parent.as_ref()
    }

    /// First parent followed by the merge parent, when present
    pub fn parents(&self) -> Vec<ObjectId> {
        self.parent
            .iter()
            .chain(self.merge_parent.iter())
            .cloned()
            .collect()
    }

    pub fn files(&self) -> &FileMap {
        &self.files
    }

    /// Blob ID recorded for `path`, if the commit tracks it
    pub fn file(&self, path: &Path) -> Option<&ObjectId> {
        self.files.get(path)
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    /// Format timestamp in human-readable form
    ///
    /// # Returns
    ///
    /// String like "Thu Jan 1 00:00:00 1970 +0000"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp
            .format("%a %b %-d %H:%M:%S %Y %z")
            .to_string()
    }

    pub fn to_slim(&self, oid: ObjectId) -> SlimCommit {
        SlimCommit {
            oid,
            parents: self.parents(),
            timestamp: self.timestamp,
        }
    }

    fn parse_timestamp(value: &str) -> anyhow::Result<DateTime<FixedOffset>> {
        let (seconds, timezone) = value
            .split_once(' ')
            .context("Invalid commit object: malformed timestamp")?;
        let seconds = seconds
            .parse::<i64>()
            .context(format!("Invalid commit object: bad timestamp {seconds:?}"))?;

        let (sign, digits) = match timezone.split_at_checked(1) {
            Some(("+", digits)) => (1, digits),
            Some(("-", digits)) => (-1, digits),
            _ => anyhow::bail!("Invalid commit object: bad timezone {timezone:?}"),
        };
        if digits.len() != 4 {
            anyhow::bail!("Invalid commit object: bad timezone {timezone:?}");
        }
        let hours = digits[..2].parse::<i32>()?;
        let minutes = digits[2..].parse::<i32>()?;
        let offset = FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
            .context(format!("Invalid commit object: bad timezone {timezone:?}"))?;

        let datetime = DateTime::from_timestamp(seconds, 0)
            .context(format!("Invalid commit object: bad timestamp {seconds}"))?;

        Ok(datetime.with_timezone(&offset))
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut object_content = vec![];

        if let Some(parent) = &self.parent {
            object_content.push(format!("parent {parent}"));
        }
        if let Some(merge_parent) = &self.merge_parent {
            object_content.push(format!("merge {merge_parent}"));
        }
        object_content.push(format!(
            "timestamp {} {}",
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        ));
        for (path, oid) in &self.files {
            let name = path
                .to_str()
                .filter(|name| !name.contains(['\n', '\r']))
                .ok_or_else(|| RepositoryError::InvalidPath(path.clone()))?;
            object_content.push(format!("file {oid} {name}"));
        }
        object_content.push(String::new());
        object_content.push(self.message.to_string());

        with_header(self.object_type(), object_content.join("\n").as_bytes())
    }
}

impl Unpackable for Commit {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;

        let (header, message) = content
            .split_once("\n\n")
            .context("Invalid commit object: missing message separator")?;

        let mut parent = None;
        let mut merge_parent = None;
        let mut timestamp = None;
        let mut files = FileMap::new();

        for line in header.lines() {
            let (key, value) = line
                .split_once(' ')
                .context(format!("Invalid commit object: malformed line {line:?}"))?;

            match key {
                "parent" => parent = Some(ObjectId::try_parse(value.to_string())?),
                "merge" => merge_parent = Some(ObjectId::try_parse(value.to_string())?),
                "timestamp" => timestamp = Some(Self::parse_timestamp(value)?),
                "file" => {
                    let (oid, path) = value
                        .split_once(' ')
                        .context(format!("Invalid commit object: malformed file {value:?}"))?;
                    files.insert(PathBuf::from(path), ObjectId::try_parse(oid.to_string())?);
                }
                _ => anyhow::bail!("Invalid commit object: unknown header {key:?}"),
            }
        }

        let timestamp = timestamp.context("Invalid commit object: missing timestamp line")?;

        Ok(Self::new(
            parent,
            merge_parent,
            timestamp,
            files,
            message.to_string(),
        ))
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }
}
