//! Persisted "current player" index, shared by every invocation.
//!
//! The index lives in a small file holding one little-endian `u64`. Opening
//! an [`IndexStore`] takes an exclusive advisory lock on that file and keeps
//! it until the store is dropped, so a whole invocation's read-modify-write
//! is atomic with respect to other invocations.

use crate::error::CtrlError;
use fs2::FileExt;
use log::debug;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

const INDEX_WIDTH: usize = 8;

/// A single integer cell, accessed while the caller holds exclusive access.
pub trait IndexCell {
    /// Stored index, 0 when nothing usable has been stored yet.
    fn load(&mut self) -> i64;

    /// Overwrite the stored index and return it.
    fn store(&mut self, index: usize) -> Result<usize, CtrlError>;
}

/// Lock guard over the index file
#[derive(Debug)]
pub struct IndexStore {
    file: File,
    path: PathBuf,
}

impl IndexStore {
    /// Open (creating if needed) and exclusively lock the index file.
    /// Blocks while another process holds the lock.
    pub fn open(path: &Path) -> Result<Self, CtrlError> {
        let lock_err = |source| CtrlError::Lock {
            path: path.to_path_buf(),
            source,
        };

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map_err(lock_err)?;
        FileExt::lock_exclusive(&file).map_err(lock_err)?;
        debug!("Locked {}", path.display());

        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_raw(&mut self) -> io::Result<u64> {
        let mut buf = [0u8; INDEX_WIDTH];
        self.file.seek(SeekFrom::Start(0))?;
        self.file.read_exact(&mut buf)?;
        Ok(u64::from_le_bytes(buf))
    }

    fn write_raw(&mut self, value: u64) -> io::Result<()> {
        self.file.seek(SeekFrom::Start(0))?;
        self.file.write_all(&value.to_le_bytes())?;
        self.file.set_len(INDEX_WIDTH as u64)?;
        self.file.sync_data()
    }
}

impl IndexCell for IndexStore {
    fn load(&mut self) -> i64 {
        match self.read_raw() {
            // Values past i64::MAX can only come from a corrupt file
            Ok(raw) => i64::try_from(raw).unwrap_or(0),
            Err(e) => {
                debug!("No stored index in {} ({}), using 0", self.path.display(), e);
                0
            }
        }
    }

    fn store(&mut self, index: usize) -> Result<usize, CtrlError> {
        self.write_raw(index as u64)
            .map_err(|source| CtrlError::WriteIndex {
                path: self.path.clone(),
                source,
            })?;
        debug!("Stored index {} in {}", index, self.path.display());
        Ok(index)
    }
}

impl Drop for IndexStore {
    fn drop(&mut self) {
        // Closing the file releases the lock as well
        let _ = FileExt::unlock(&self.file);
    }
}
