use crate::error::{Result, SequencerError};
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Move,
    Rename,
    Copy,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Move => "move",
            Operation::Rename => "rename",
            Operation::Copy => "copy",
        })
    }
}

/// Append-only log of performed filesystem operations, one
/// `op<TAB>from<TAB>to` line each, flushed immediately so an interrupted run
/// can be finished or undone by hand.
#[derive(Debug)]
pub struct Journal {
    path: PathBuf,
    file: File,
}

impl Journal {
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| SequencerError::Journal {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    pub fn record(&mut self, op: Operation, from: &Path, to: &Path) -> Result<()> {
        writeln!(self.file, "{op}\t{}\t{}", from.display(), to.display())
            .and_then(|_| self.file.flush())
            .map_err(|source| SequencerError::Journal {
                path: self.path.clone(),
                source,
            })
    }
}
