use crate::error::{Result, SequencerError};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A file identified only by its name inside a scanned directory.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct FileEntry {
    pub name: String,
}

impl FileEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Files of one directory, sorted by name.
///
/// The position of an entry is its sequence index when renaming, so a list is
/// always built from a fresh scan right before it is consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileList {
    pub dir: PathBuf,
    pub entries: Vec<FileEntry>,
}

impl FileList {
    pub fn new(dir: impl Into<PathBuf>, entries: Vec<FileEntry>) -> Self {
        Self {
            dir: dir.into(),
            entries,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn path_of(&self, entry: &FileEntry) -> PathBuf {
        self.dir.join(&entry.name)
    }
}

/// Fails with `DirectoryAccess` unless `dir` is an existing, readable
/// directory.
pub fn check_directory(dir: &Path) -> Result<()> {
    let meta = fs::metadata(dir).map_err(|source| SequencerError::DirectoryAccess {
        path: dir.to_path_buf(),
        source,
    })?;
    if !meta.is_dir() {
        return Err(SequencerError::DirectoryAccess {
            path: dir.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotADirectory, "not a directory"),
        });
    }
    // read_dir up front so an unreadable directory is an error, not an empty list.
    fs::read_dir(dir).map_err(|source| SequencerError::DirectoryAccess {
        path: dir.to_path_buf(),
        source,
    })?;

    Ok(())
}

/// Lists the regular files directly inside `dir` whose name ends with
/// `extension` (case-sensitive), sorted by name.
///
/// Hidden files are skipped, like a shell `*` glob would. Symlinks count when
/// they point at a regular file.
pub fn scan_files(dir: &Path, extension: &str) -> Result<FileList> {
    check_directory(dir)?;

    let mut entries: Vec<FileEntry> = Vec::new();
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true);

    for result in walker {
        let dirent = match result {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "skipping unreadable entry");
                continue;
            }
        };

        if !dirent.file_type().is_file() {
            continue;
        }

        let Some(name) = dirent.file_name().to_str() else {
            tracing::warn!(path = %dirent.path().display(), "skipping non UTF-8 file name");
            continue;
        };

        if name.starts_with('.') || !name.ends_with(extension) {
            continue;
        }
        entries.push(FileEntry::new(name));
    }

    entries.sort();
    tracing::debug!(dir = %dir.display(), extension, count = entries.len(), "scanned directory");

    Ok(FileList::new(dir, entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"x").unwrap();
    }

    #[test]
    fn keeps_only_matching_regular_files_sorted() {
        let tmp = TempDir::new().unwrap();
        for name in ["c.JPG", "a.JPG", "b.jpg", "notes.txt", "B.JPG"] {
            touch(tmp.path(), name);
        }
        fs::create_dir(tmp.path().join("sub.JPG")).unwrap();
        touch(&tmp.path().join("sub.JPG"), "nested.JPG");

        let list = scan_files(tmp.path(), ".JPG").unwrap();
        let names: Vec<&str> = list.names().collect();
        assert_eq!(names, ["B.JPG", "a.JPG", "c.JPG"]);
        assert_eq!(list.dir, tmp.path());
    }

    #[test]
    fn skips_hidden_files() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), ".hidden.JPG");
        touch(tmp.path(), "shown.JPG");

        let list = scan_files(tmp.path(), ".JPG").unwrap();
        assert_eq!(list.names().collect::<Vec<_>>(), ["shown.JPG"]);
    }

    #[test]
    fn empty_directory_gives_empty_list() {
        let tmp = TempDir::new().unwrap();
        let list = scan_files(tmp.path(), ".JPG").unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn scanning_twice_is_deterministic() {
        let tmp = TempDir::new().unwrap();
        for name in ["IMG_0003.JPG", "IMG_0001.JPG", "IMG_0002.JPG"] {
            touch(tmp.path(), name);
        }
        let first = scan_files(tmp.path(), ".JPG").unwrap();
        let second = scan_files(tmp.path(), ".JPG").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn missing_directory_is_access_error() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("does-not-exist");
        let err = scan_files(&missing, ".JPG").unwrap_err();
        assert!(matches!(err, SequencerError::DirectoryAccess { ref path, .. } if *path == missing));
    }

    #[test]
    fn check_directory_accepts_only_directories() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "a.JPG");
        check_directory(tmp.path()).unwrap();
        assert!(check_directory(&tmp.path().join("a.JPG")).is_err());
        assert!(check_directory(&tmp.path().join("typo")).is_err());
    }

    #[test]
    fn file_path_is_access_error() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "a.JPG");
        let err = scan_files(&tmp.path().join("a.JPG"), ".JPG").unwrap_err();
        assert!(matches!(err, SequencerError::DirectoryAccess { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn follows_symlinks_to_files_and_skips_dangling_ones() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "real.JPG");
        std::os::unix::fs::symlink(tmp.path().join("real.JPG"), tmp.path().join("link.JPG"))
            .unwrap();
        std::os::unix::fs::symlink(tmp.path().join("gone"), tmp.path().join("dangling.JPG"))
            .unwrap();

        let list = scan_files(tmp.path(), ".JPG").unwrap();
        assert_eq!(list.names().collect::<Vec<_>>(), ["link.JPG", "real.JPG"]);
    }
}
