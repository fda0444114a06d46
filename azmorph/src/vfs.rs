//! File access for dictionary loading, from disk or from memory.
use memmap2::{Mmap, MmapOptions};
use std::fmt::Debug;
use std::io::{Cursor, Read, Result};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use hashbrown::HashMap;

/// Opens files by path.
pub trait Filesystem {
    /// The handle returned by [`Filesystem::open`].
    type File: File;

    /// Opens the file at `path` for reading.
    fn open<P: AsRef<Path>>(&self, path: P) -> Result<Self::File>;
}

/// A readable file handle.
pub trait File: Read + Debug {
    /// Size in bytes.
    fn len(&self) -> Result<u64>;
    /// True for a zero-length file.
    fn is_empty(&self) -> Result<bool>;

    /// The whole file, mapped into memory where the file system allows it.
    fn contents(&mut self) -> Result<Contents>;
}

/// Bytes of a file, either mapped or held in memory.
#[derive(Debug)]
pub enum Contents {
    /// A read-only memory map of a file on disk.
    Mapped(Mmap),
    /// Bytes shared with the in-memory file system.
    Shared(Arc<[u8]>),
}

impl Deref for Contents {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            Contents::Mapped(mmap) => mmap,
            Contents::Shared(bytes) => bytes,
        }
    }
}

impl File for std::fs::File {
    fn len(&self) -> Result<u64> {
        self.metadata().map(|m| m.len())
    }

    fn is_empty(&self) -> Result<bool> {
        self.len().map(|x| x == 0)
    }

    fn contents(&mut self) -> Result<Contents> {
        // empty files cannot be mapped
        if File::is_empty(self)? {
            return Ok(Contents::Shared(Arc::from(Vec::new())));
        }

        // The mapping is read-only and dictionaries are not rewritten while loaded.
        let mmap = unsafe { MmapOptions::new().map(&*self)? };
        Ok(Contents::Mapped(mmap))
    }
}

/// The real file system.
pub struct Fs;

impl Filesystem for Fs {
    type File = std::fs::File;

    #[inline(always)]
    fn open<P: AsRef<Path>>(&self, path: P) -> Result<Self::File> {
        std::fs::File::open(&path)
    }
}

/// Files held in memory, for bundled dictionaries and tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryFs {
    files: HashMap<PathBuf, Arc<[u8]>>,
}

impl MemoryFs {
    /// An empty file system.
    pub fn new() -> MemoryFs {
        MemoryFs::default()
    }

    /// Adds or replaces the file at `path`.
    pub fn insert<P: AsRef<Path>>(&mut self, path: P, bytes: impl Into<Arc<[u8]>>) {
        self.files.insert(path.as_ref().to_path_buf(), bytes.into());
    }

    /// Number of files held.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// True when no files are held.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// A file opened from a [`MemoryFs`].
#[derive(Debug)]
pub struct MemoryFile {
    reader: Cursor<Arc<[u8]>>,
}

impl Read for MemoryFile {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        self.reader.read(buf)
    }
}

impl File for MemoryFile {
    fn len(&self) -> Result<u64> {
        Ok(self.reader.get_ref().len() as u64)
    }

    fn is_empty(&self) -> Result<bool> {
        Ok(self.reader.get_ref().is_empty())
    }

    fn contents(&mut self) -> Result<Contents> {
        Ok(Contents::Shared(Arc::clone(self.reader.get_ref())))
    }
}

impl Filesystem for MemoryFs {
    type File = MemoryFile;

    fn open<P: AsRef<Path>>(&self, path: P) -> Result<Self::File> {
        match self.files.get(path.as_ref()) {
            Some(bytes) => Ok(MemoryFile {
                reader: Cursor::new(Arc::clone(bytes)),
            }),
            None => Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} not found", path.as_ref().display()),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn memory_files() {
        let mut fs = MemoryFs::new();
        fs.insert("dict/suffixes.json", b"[\"\"]".to_vec());

        let mut file = fs.open("dict/suffixes.json").unwrap();
        assert_eq!(file.len().unwrap(), 4);

        let mut text = String::new();
        file.read_to_string(&mut text).unwrap();
        assert_eq!(text, "[\"\"]");
        assert_eq!(&*file.contents().unwrap(), b"[\"\"]");

        let err = fs.open("dict/words.dawg").unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }

    #[test]
    fn mapped_files() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"AZDW").unwrap();
        tmp.flush().unwrap();

        let mut file = Fs.open(tmp.path()).unwrap();
        let contents = file.contents().unwrap();
        assert!(matches!(contents, Contents::Mapped(_)));
        assert_eq!(&*contents, b"AZDW");

        let empty = tempfile::NamedTempFile::new().unwrap();
        let mut file = Fs.open(empty.path()).unwrap();
        assert!(file.contents().unwrap().is_empty());
    }
}
