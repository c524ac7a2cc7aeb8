use crate::error::{Result, SequencerError};
use rfd::FileDialog;
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Source of the directory a workflow operates on.
pub trait DirectoryProvider {
    /// `None` means the user cancelled.
    fn provide(&self) -> Option<PathBuf>;
}

/// A directory given up front, e.g. on the command line.
#[derive(Debug, Clone)]
pub struct FixedDirectory(pub PathBuf);

impl DirectoryProvider for FixedDirectory {
    fn provide(&self) -> Option<PathBuf> {
        Some(self.0.clone())
    }
}

/// Native "choose folder" dialog.
#[derive(Debug, Clone)]
pub struct FolderPicker {
    pub title: String,
}

impl DirectoryProvider for FolderPicker {
    fn provide(&self) -> Option<PathBuf> {
        FileDialog::new().set_title(&self.title).pick_folder()
    }
}

/// Asks `provider` for a directory and resolves it to a canonical absolute
/// path, so `..` and symlinks never leak into the parent-folder tag.
///
/// Cancellation, empty answers and missing directories are fatal so no scan
/// ever runs against an unintended location.
pub fn choose_directory(provider: &dyn DirectoryProvider) -> Result<PathBuf> {
    let dir = provider
        .provide()
        .filter(|p| !p.as_os_str().is_empty())
        .ok_or(SequencerError::NoDirectorySelected)?;
    dir.canonicalize().map_err(|source| SequencerError::DirectoryAccess { path: dir, source })
}

/// Prints `question` and reads one line. Only the line ending is stripped;
/// the text is otherwise used verbatim.
pub fn read_label(question: &str, input: &mut impl BufRead, output: &mut impl Write) -> Result<String> {
    writeln!(output, "{question}")?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    let trimmed = line.strip_suffix('\n').unwrap_or(&line);
    let trimmed = trimmed.strip_suffix('\r').unwrap_or(trimmed);
    Ok(trimmed.to_string())
}
