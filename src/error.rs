use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failures of the scan / split / relocate / rename / copy steps.
///
/// Every variant is fatal to the current run: callers abort the bulk
/// operation on the first error and leave already-processed files as they are.
#[derive(Debug, Error)]
pub enum SequencerError {
    #[error("cannot access directory {}: {source}", path.display())]
    DirectoryAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot move {} to {}: {source}", from.display(), to.display())]
    Relocation {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(
        "cannot rename {} to {}: target already exists{}",
        from.display(),
        to.display(),
        collision_hint(from, to)
    )]
    RenameCollision { from: PathBuf, to: PathBuf },

    #[error("cannot rename {} to {}: {source}", from.display(), to.display())]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot copy {} to {}: {source}", from.display(), to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot create directory {}: {source}", path.display())]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no directory selected")]
    NoDirectorySelected,

    #[error("cannot write journal {}: {source}", path.display())]
    Journal {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read input: {0}")]
    Prompt(#[from] io::Error),
}

fn collision_hint(from: &Path, to: &Path) -> &'static str {
    if from == to {
        " (file already carries its sequence name; folder already renamed?)"
    } else {
        ""
    }
}

pub type Result<T> = std::result::Result<T, SequencerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collision_message_names_both_paths() {
        let err = SequencerError::RenameCollision {
            from: PathBuf::from("/data/a.JPG"),
            to: PathBuf::from("/data/0000_left_X.JPG"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/data/a.JPG"));
        assert!(msg.contains("0000_left_X.JPG"));
        assert!(msg.contains("already exists"));
    }

    #[test]
    fn self_collision_hints_at_an_earlier_run() {
        let path = PathBuf::from("/data/0000_left_X.JPG");
        let err = SequencerError::RenameCollision {
            from: path.clone(),
            to: path,
        };
        assert!(err.to_string().contains("folder already renamed?"));

        let other = SequencerError::RenameCollision {
            from: PathBuf::from("/data/a.JPG"),
            to: PathBuf::from("/data/0000_left_X.JPG"),
        };
        assert!(!other.to_string().contains("already renamed"));
    }

    #[test]
    fn directory_access_keeps_io_source() {
        let err = SequencerError::DirectoryAccess {
            path: PathBuf::from("/nope"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert!(std::error::Error::source(&err).is_some());
    }
}
