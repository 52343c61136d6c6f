use crate::artifacts::state::CHECKSUM_SIZE;
use anyhow::anyhow;
use byteorder::{ByteOrder, NetworkEndian};
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::io::{Read, Write};

/// Stream wrapper that hashes every byte passing through it
///
/// The digest of everything read or written so far is what `write_checksum`
/// appends and what `verify` compares against the trailing bytes on disk.
#[derive(Debug)]
pub struct Checksum<S> {
    stream: S,
    digest: Sha1,
}

impl<S> Checksum<S> {
    pub(crate) fn new(stream: S) -> Self {
        Checksum {
            stream,
            digest: Sha1::new(),
        }
    }
}

impl<S: Read> Checksum<S> {
    pub(crate) fn read(&mut self, size: usize) -> anyhow::Result<Bytes> {
        let mut buffer = vec![0; size];
        self.stream
            .read_exact(&mut buffer)
            .map_err(|_| anyhow!("Unexpected end-of-file while reading state"))?;

        self.digest.update(&buffer);
        Ok(Bytes::from(buffer))
    }

    pub(crate) fn read_u32(&mut self) -> anyhow::Result<u32> {
        Ok(NetworkEndian::read_u32(&self.read(4)?))
    }

    pub(crate) fn verify(&mut self) -> anyhow::Result<()> {
        let mut expected_checksum = [0u8; CHECKSUM_SIZE];
        self.stream
            .read_exact(&mut expected_checksum)
            .map_err(|_| anyhow!("State file is missing its checksum"))?;

        let actual_checksum = self.digest.clone().finalize();

        if expected_checksum != actual_checksum.as_slice() {
            return Err(anyhow!("Checksum does not match value stored on disk"));
        }

        let mut trailing = [0u8; 1];
        if self.stream.read(&mut trailing)? != 0 {
            return Err(anyhow!("Unexpected data after state checksum"));
        }

        Ok(())
    }
}

impl<S: Write> Checksum<S> {
    pub(crate) fn write(&mut self, data: &[u8]) -> anyhow::Result<()> {
        self.stream.write_all(data)?;
        self.digest.update(data);
        Ok(())
    }

    pub(crate) fn write_u32(&mut self, value: u32) -> anyhow::Result<()> {
        let mut buffer = [0u8; 4];
        NetworkEndian::write_u32(&mut buffer, value);
        self.write(&buffer)
    }

    pub(crate) fn write_checksum(&mut self) -> anyhow::Result<()> {
        let checksum = self.digest.clone().finalize();
        self.stream
            .write_all(checksum.as_slice())
            .map_err(|_| anyhow!("Failed to write checksum to state file"))?;

        Ok(())
    }
}
