//! Reading a dictionary directory into a [`Thesaurus`].
//!
//! A dictionary directory holds one file per [`ArtifactKind`]. JSON tables are
//! parsed with `serde_json`, `paradigms.array` is a little-endian `u16` array
//! and the automata are decoded from memory-mapped files.
use std::io::ErrorKind;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use byteorder::{ByteOrder, LittleEndian};

mod error;

pub use self::error::LoaderError;
use crate::thesaurus::{ArtifactData, ArtifactKind, Thesaurus};
use crate::vfs::{self, File, Filesystem, MemoryFs};

/// Produces a dictionary from a path.
pub trait Loader {
    /// Loads the dictionary at `path`.
    fn load(&self, path: &Path) -> Result<Arc<Thesaurus>, LoaderError>;
}

/// Loads the artifacts of a dictionary directory from a [`Filesystem`].
#[derive(Debug)]
pub struct DirectoryLoader<FS: Filesystem> {
    fs: FS,
}

impl<FS: Filesystem> DirectoryLoader<FS> {
    /// A loader reading from `fs`.
    pub fn new(fs: FS) -> DirectoryLoader<FS> {
        DirectoryLoader { fs }
    }

    /// The file system read from.
    pub fn filesystem(&self) -> &FS {
        &self.fs
    }
}

impl<FS: Filesystem> Loader for DirectoryLoader<FS> {
    fn load(&self, path: &Path) -> Result<Arc<Thesaurus>, LoaderError> {
        let mut builder = Thesaurus::builder();

        for kind in ArtifactKind::ALL.iter().copied() {
            let file_path = path.join(kind.file_name());

            let mut file = match self.fs.open(&file_path) {
                Ok(file) => file,
                Err(err) if err.kind() == ErrorKind::NotFound && !kind.is_required() => {
                    log::debug!("no {} in {}", kind, path.display());
                    continue;
                }
                Err(source) => {
                    return Err(LoaderError::Open {
                        path: file_path,
                        source,
                    })
                }
            };

            let contents = file.contents()?;
            log::trace!("read {} ({} bytes)", file_path.display(), contents.len());

            let data = match kind {
                ArtifactKind::Grammemes => ArtifactData::Grammemes(serde_json::from_slice(&contents)?),
                ArtifactKind::TagsInt | ArtifactKind::TagsExt | ArtifactKind::Suffixes => {
                    ArtifactData::Strings(serde_json::from_slice(&contents)?)
                }
                ArtifactKind::Paradigms => ArtifactData::Integers(read_u16_array(&contents)?),
                ArtifactKind::Words
                | ArtifactKind::Probabilities
                | ArtifactKind::PredictionSuffixes(_) => ArtifactData::Automaton(&*contents),
                ArtifactKind::Meta => ArtifactData::Json(serde_json::from_slice(&contents)?),
            };

            builder.insert(kind, data)?;
        }

        let thesaurus = builder.build()?;
        log::info!(
            "loaded dictionary from {}: {} paradigms, {} tags, {} suffixes",
            path.display(),
            thesaurus.paradigms().len(),
            thesaurus.tag_count(),
            thesaurus.suffix_count(),
        );

        Ok(Arc::new(thesaurus))
    }
}

fn read_u16_array(bytes: &[u8]) -> Result<Vec<u16>, LoaderError> {
    if bytes.len() % 2 != 0 {
        return Err(std::io::Error::new(
            ErrorKind::InvalidData,
            format!("odd byte count {} in a u16 array", bytes.len()),
        )
        .into());
    }

    let mut out = vec![0u16; bytes.len() / 2];
    LittleEndian::read_u16_into(bytes, &mut out);
    Ok(out)
}

/// Copies the artifacts of a dictionary directory into memory.
pub fn preload(path: &Path) -> Result<MemoryFs, LoaderError> {
    let mut fs = MemoryFs::new();

    for kind in ArtifactKind::ALL.iter() {
        let file_path = path.join(kind.file_name());
        match std::fs::read(&file_path) {
            Ok(bytes) => fs.insert(&file_path, bytes),
            Err(err) if err.kind() == ErrorKind::NotFound => continue,
            Err(source) => {
                return Err(LoaderError::Open {
                    path: file_path,
                    source,
                })
            }
        }
    }

    Ok(fs)
}

/// Where dictionary bytes live while they are decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderKind {
    /// Files are memory-mapped from disk.
    Fs,
    /// Files are read into memory up front.
    Memory,
}

impl LoaderKind {
    /// Loads the dictionary directory at `path` with this loader.
    pub fn load(self, path: &Path) -> Result<Arc<Thesaurus>, LoaderError> {
        match self {
            LoaderKind::Fs => DirectoryLoader::new(vfs::Fs).load(path),
            LoaderKind::Memory => DirectoryLoader::new(preload(path)?).load(path),
        }
    }
}

impl FromStr for LoaderKind {
    type Err = LoaderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fs" => Ok(LoaderKind::Fs),
            "memory" => Ok(LoaderKind::Memory),
            other => Err(LoaderError::InvalidLoaderSelection(other.to_string())),
        }
    }
}

/// Picks a loader by name, `fs` or `memory`.
pub fn select(name: &str) -> Result<LoaderKind, LoaderError> {
    name.parse()
}
