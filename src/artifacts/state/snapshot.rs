use crate::areas::commit_graph::CommitGraph;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::split_points::{BranchPair, SplitPoints};
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::state::checksum::Checksum;
use crate::artifacts::state::{SIGNATURE, VERSION};
use anyhow::{Context, anyhow};
use fake::rand;
use std::collections::{BTreeMap, BTreeSet};
use std::io::{BufReader, BufWriter, Read, Write};
use std::ops::DerefMut;
use std::path::{Path, PathBuf};

/// In-memory repository state, as loaded at the start of an operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryState {
    pub refs: Refs,
    pub index: Index,
    pub commits: CommitGraph,
}

impl RepositoryState {
    pub fn new(root: ObjectId) -> Self {
        RepositoryState {
            refs: Refs::new(root.clone()),
            index: Index::default(),
            commits: CommitGraph::from_known(vec![root]),
        }
    }

    pub fn write_to<W: Write>(&self, writer: &mut Checksum<W>) -> anyhow::Result<()> {
        writer.write(SIGNATURE.as_bytes())?;
        writer.write_u32(VERSION)?;

        write_str(writer, self.refs.current_branch().as_ref())?;

        write_len(writer, self.refs.branches().len())?;
        for (name, lineage) in self.refs.branches() {
            write_str(writer, name.as_ref())?;
            write_len(writer, lineage.len())?;
            for oid in lineage {
                write_oid(writer, oid)?;
            }
        }

        write_len(writer, self.refs.split_points().len())?;
        for (pair, oid) in self.refs.split_points().iter() {
            let (first, second) = pair.names();
            write_str(writer, first.as_ref())?;
            write_str(writer, second.as_ref())?;
            write_oid(writer, oid)?;
        }

        write_len(writer, self.index.additions().len())?;
        for (path, content) in self.index.additions() {
            write_str(writer, path_str(path)?)?;
            write_len(writer, content.len())?;
            writer.write(content)?;
        }

        write_len(writer, self.index.removals().len())?;
        for path in self.index.removals() {
            write_str(writer, path_str(path)?)?;
        }

        write_len(writer, self.commits.known().len())?;
        for oid in self.commits.known() {
            write_oid(writer, oid)?;
        }

        writer.write_checksum()
    }

    pub fn read_from<R: Read>(reader: &mut Checksum<R>) -> anyhow::Result<Self> {
        let signature = reader.read(SIGNATURE.len())?;
        if signature.as_ref() != SIGNATURE.as_bytes() {
            return Err(anyhow!("Invalid state file signature"));
        }
        let version = reader.read_u32()?;
        if version != VERSION {
            return Err(anyhow!("Unsupported state file version: {version}"));
        }

        let current = read_branch_name(reader)?;

        let mut branches = BTreeMap::new();
        for _ in 0..reader.read_u32()? {
            let name = read_branch_name(reader)?;
            let lineage = (0..reader.read_u32()?)
                .map(|_| read_oid(reader))
                .collect::<anyhow::Result<Vec<_>>>()?;
            branches.insert(name, lineage);
        }

        let split_points: SplitPoints = (0..reader.read_u32()?)
            .map(|_| {
                let first = read_branch_name(reader)?;
                let second = read_branch_name(reader)?;
                Ok((BranchPair::new(first, second), read_oid(reader)?))
            })
            .collect::<anyhow::Result<_>>()?;

        let mut additions = BTreeMap::new();
        for _ in 0..reader.read_u32()? {
            let path = PathBuf::from(read_str(reader)?);
            let size = reader.read_u32()? as usize;
            additions.insert(path, reader.read(size)?);
        }

        let removals = (0..reader.read_u32()?)
            .map(|_| Ok(PathBuf::from(read_str(reader)?)))
            .collect::<anyhow::Result<BTreeSet<_>>>()?;

        let known = (0..reader.read_u32()?)
            .map(|_| read_oid(reader))
            .collect::<anyhow::Result<Vec<_>>>()?;

        reader.verify()?;

        Ok(RepositoryState {
            refs: Refs::from_parts(current, branches, split_points)?,
            index: Index::from_parts(additions, removals),
            commits: CommitGraph::from_known(known),
        })
    }
}

fn path_str(path: &Path) -> anyhow::Result<&str> {
    path.to_str()
        .with_context(|| format!("Path is not valid UTF-8: {:?}", path))
}

fn write_len<W: Write>(writer: &mut Checksum<W>, len: usize) -> anyhow::Result<()> {
    let len = u32::try_from(len).context("Too many entries for state file")?;
    writer.write_u32(len)
}

fn write_str<W: Write>(writer: &mut Checksum<W>, value: &str) -> anyhow::Result<()> {
    write_len(writer, value.len())?;
    writer.write(value.as_bytes())
}

fn write_oid<W: Write>(writer: &mut Checksum<W>, oid: &ObjectId) -> anyhow::Result<()> {
    let mut bytes = Vec::with_capacity(OBJECT_ID_LENGTH / 2);
    oid.write_h40_to(&mut bytes)?;
    writer.write(&bytes)
}

fn read_str<R: Read>(reader: &mut Checksum<R>) -> anyhow::Result<String> {
    let size = reader.read_u32()? as usize;
    let bytes = reader.read(size)?;
    String::from_utf8(bytes.to_vec()).context("Invalid UTF-8 string in state file")
}

fn read_branch_name<R: Read>(reader: &mut Checksum<R>) -> anyhow::Result<BranchName> {
    BranchName::try_parse(read_str(reader)?)
}

fn read_oid<R: Read>(reader: &mut Checksum<R>) -> anyhow::Result<ObjectId> {
    let bytes = reader.read(OBJECT_ID_LENGTH / 2)?;
    ObjectId::read_h40_from(&mut bytes.as_ref())
}

/// Location of the snapshot on disk
#[derive(Debug)]
pub struct StateFile {
    path: Box<Path>,
}

impl StateFile {
    pub fn new(path: Box<Path>) -> Self {
        StateFile { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load and verify the snapshot under a shared lock
    pub fn load(&self) -> anyhow::Result<RepositoryState> {
        let mut state_file = std::fs::OpenOptions::new()
            .read(true)
            .open(&self.path)
            .with_context(|| format!("Unable to open state file {}", self.path.display()))?;
        let mut lock = file_guard::lock(&mut state_file, file_guard::Lock::Shared, 0, 1)?;

        let mut reader = Checksum::new(BufReader::new(lock.deref_mut()));
        RepositoryState::read_from(&mut reader)
            .with_context(|| format!("Corrupt state file {}", self.path.display()))
    }

    /// Write the snapshot to a temporary file, then rename it into place
    pub fn store(&self, state: &RepositoryState) -> anyhow::Result<()> {
        let dir = self
            .path
            .parent()
            .context(format!("Invalid state path {}", self.path.display()))?;
        let temp_path = dir.join(Self::generate_temp_name());

        {
            let mut temp_file = std::fs::OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .with_context(|| format!("Unable to open state file {}", temp_path.display()))?;
            let mut lock = file_guard::lock(&mut temp_file, file_guard::Lock::Exclusive, 0, 1)?;

            let mut buffer = BufWriter::new(lock.deref_mut());
            let mut writer = Checksum::new(&mut buffer);
            state.write_to(&mut writer)?;
            buffer.flush().context("Unable to flush state file")?;
        }

        std::fs::rename(&temp_path, &self.path).with_context(|| {
            format!("Unable to rename state file to {}", self.path.display())
        })?;

        tracing::debug!(path = %self.path.display(), "persisted repository state");
        Ok(())
    }

    fn generate_temp_name() -> String {
        format!("tmp-state-{}", rand::random::<u32>())
    }
}
