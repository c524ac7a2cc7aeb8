use crate::error::{Result, SequencerError};
use crate::file_scanner::{self, FileEntry, FileList};
use crate::journal::{Journal, Operation};
use crate::progress::Progress;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// How target names are composed: `index<sep>label<sep>tag<ext>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingScheme {
    pub separator: String,
    pub pad_width: usize,
    pub output_extension: String,
}

impl NamingScheme {
    pub fn new(separator: &str, pad_width: usize, output_extension: &str) -> Self {
        Self {
            separator: separator.to_string(),
            pad_width,
            output_extension: output_extension.to_string(),
        }
    }

    /// Indices wider than `pad_width` are printed in full, never truncated.
    pub fn target_name(&self, index: usize, label: &str, tag: &str) -> String {
        format!(
            "{index:0width$}{sep}{label}{sep}{tag}{ext}",
            width = self.pad_width,
            sep = self.separator,
            ext = self.output_extension,
        )
    }
}

/// The two interleaved halves of a list: `even` holds positions 0, 2, 4, ...
/// and `odd` holds 1, 3, 5, ...
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitResult {
    pub even: FileList,
    pub odd: FileList,
}

pub fn split_interleaved(list: &FileList) -> SplitResult {
    let (even, odd): (Vec<(usize, &FileEntry)>, Vec<(usize, &FileEntry)>) =
        list.entries.iter().enumerate().partition(|(i, _)| i % 2 == 0);
    let strip = |half: Vec<(usize, &FileEntry)>| -> Vec<FileEntry> {
        half.into_iter().map(|(_, e)| e.clone()).collect()
    };
    SplitResult {
        even: FileList::new(&list.dir, strip(even)),
        odd: FileList::new(&list.dir, strip(odd)),
    }
}

/// Ordered `(current name, new name)` pairs for one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamePlan {
    pub dir: PathBuf,
    pub moves: Vec<(String, String)>,
}

pub fn plan_renames(list: &FileList, label: &str, tag: &str, scheme: &NamingScheme) -> RenamePlan {
    let moves = list
        .entries
        .iter()
        .enumerate()
        .map(|(index, entry)| (entry.name.clone(), scheme.target_name(index, label, tag)))
        .collect();
    RenamePlan {
        dir: list.dir.clone(),
        moves,
    }
}

/// Performs the filesystem side of a run: every move, rename and copy goes
/// through here so that progress and the optional journal see all of them.
pub struct Sequencer {
    progress: Box<dyn Progress>,
    journal: Option<Journal>,
}

impl Sequencer {
    pub fn new(progress: Box<dyn Progress>, journal: Option<Journal>) -> Self {
        Self { progress, journal }
    }

    pub fn scan(&self, dir: &Path, extension: &str) -> Result<FileList> {
        file_scanner::scan_files(dir, extension)
    }

    /// Creates `dir` (and parents) unless it already exists.
    pub fn ensure_dir(&self, dir: &Path) -> Result<()> {
        if dir.is_dir() {
            return Ok(());
        }
        fs::create_dir_all(dir).map_err(|source| SequencerError::CreateDirectory {
            path: dir.to_path_buf(),
            source,
        })?;
        tracing::info!(dir = %dir.display(), "created directory");
        Ok(())
    }

    /// Moves every file of `list` into `dest`, keeping its name.
    ///
    /// Stops at the first failure; files moved before it stay moved.
    pub fn relocate(&mut self, list: &FileList, dest: &Path) -> Result<usize> {
        self.progress.start("Splitting file list", list.len());
        for entry in &list.entries {
            let from = list.path_of(entry);
            let to = dest.join(&entry.name);
            self.progress.advance(&entry.name);
            move_file(&from, &to)?;
            tracing::debug!(from = %from.display(), to = %to.display(), "moved");
            self.record(Operation::Move, &from, &to)?;
        }
        self.progress.finish();
        Ok(list.len())
    }

    /// Renames every file of `list` in place to its sequence name.
    pub fn rename(
        &mut self,
        list: &FileList,
        label: &str,
        tag: &str,
        scheme: &NamingScheme,
    ) -> Result<usize> {
        let plan = plan_renames(list, label, tag, scheme);
        self.apply(&plan)
    }

    /// Applies `plan` in order. A target that already exists, including a
    /// file that already carries its target name, is a collision.
    pub fn apply(&mut self, plan: &RenamePlan) -> Result<usize> {
        self.progress.start("Renaming files", plan.moves.len());
        for (current, target) in &plan.moves {
            let from = plan.dir.join(current);
            let to = plan.dir.join(target);
            self.progress.advance(target);
            if fs::symlink_metadata(&to).is_ok() {
                return Err(SequencerError::RenameCollision { from, to });
            }
            fs::rename(&from, &to).map_err(|source| SequencerError::Rename {
                from: from.clone(),
                to: to.clone(),
                source,
            })?;
            tracing::info!(from = %current, to = %target, "renamed");
            self.record(Operation::Rename, &from, &to)?;
        }
        self.progress.finish();
        Ok(plan.moves.len())
    }

    /// Copies every file of `list` into `dest`, replacing files of the same
    /// name. Sources are left untouched.
    pub fn copy_into(&mut self, list: &FileList, dest: &Path) -> Result<usize> {
        self.progress.start("Copying files", list.len());
        for entry in &list.entries {
            let from = list.path_of(entry);
            let to = dest.join(&entry.name);
            self.progress.advance(&entry.name);
            fs::copy(&from, &to).map_err(|source| SequencerError::Copy {
                from: from.clone(),
                to: to.clone(),
                source,
            })?;
            self.record(Operation::Copy, &from, &to)?;
        }
        self.progress.finish();
        Ok(list.len())
    }

    fn record(&mut self, op: Operation, from: &Path, to: &Path) -> Result<()> {
        match self.journal.as_mut() {
            Some(journal) => journal.record(op, from, to),
            None => Ok(()),
        }
    }
}

fn move_file(from: &Path, to: &Path) -> Result<()> {
    let relocation = |source: io::Error| SequencerError::Relocation {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    };

    if fs::symlink_metadata(to).is_ok() {
        return Err(relocation(io::Error::new(
            io::ErrorKind::AlreadyExists,
            "destination already exists",
        )));
    }
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            fs::copy(from, to).map_err(relocation)?;
            fs::remove_file(from).map_err(relocation)
        }
        Err(e) => Err(relocation(e)),
    }
}
