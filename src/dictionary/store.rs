use std::{
    fs::{File, OpenOptions},
    io::{self, BufReader, BufWriter, Read, Write},
    path::{Path, PathBuf},
};

use bzip2::read::BzDecoder;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed record {record} in {path}: {source}")]
    Malformed {
        path: PathBuf,
        record: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("{0} is compressed and cannot be appended to")]
    ReadOnly(PathBuf),
}

/// One line of the word list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Entry {
    pub word: String,
    pub definition: String,
}

impl Entry {
    pub fn new(word: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            definition: definition.into(),
        }
    }
}

/// Word list kept as a stream of JSON objects, one per line. A `.bz2` path is
/// read through a bzip2 decoder and treated as read-only.
#[derive(Debug, Clone)]
pub struct WordStore {
    path: PathBuf,
}

impl WordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_compressed(&self) -> bool {
        self.path.extension().and_then(|s| s.to_str()) == Some("bz2")
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    /// Reads every entry in file order, skipping blank words. A missing file
    /// is an empty list.
    pub fn load(&self) -> Result<Vec<Entry>, StoreError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "word list not found, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(self.io_error(e)),
        };

        let reader: Box<dyn Read> = if self.is_compressed() {
            Box::new(BzDecoder::new(file))
        } else {
            Box::new(file)
        };
        let reader = BufReader::new(reader);

        let stream = serde_json::Deserializer::from_reader(reader).into_iter::<Entry>();
        let mut entries = Vec::new();
        for (i, result) in stream.enumerate() {
            let mut entry = result.map_err(|source| {
                if source.is_io() {
                    self.io_error(io::Error::other(source))
                } else {
                    StoreError::Malformed {
                        path: self.path.clone(),
                        record: i + 1,
                        source,
                    }
                }
            })?;
            let trimmed = entry.word.trim();
            if trimmed.is_empty() {
                debug!(record = i + 1, "skipping entry with an empty word");
                continue;
            }
            if trimmed.len() != entry.word.len() {
                entry.word = trimmed.to_string();
            }
            entries.push(entry);
        }

        info!(path = %self.path.display(), entries = entries.len(), "loaded word list");
        Ok(entries)
    }

    /// Appends one entry as a JSON line, creating the file if needed.
    pub fn append(&self, entry: &Entry) -> Result<(), StoreError> {
        if self.is_compressed() {
            return Err(StoreError::ReadOnly(self.path.clone()));
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_error(e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, entry).map_err(|e| self.io_error(io::Error::other(e)))?;
        writer.write_all(b"\n").map_err(|e| self.io_error(e))?;
        writer.flush().map_err(|e| self.io_error(e))?;
        debug!(word = %entry.word, "appended entry");
        Ok(())
    }

    /// Writes a whole list, replacing whatever the file held.
    pub fn save(&self, entries: &[Entry]) -> Result<(), StoreError> {
        if self.is_compressed() {
            return Err(StoreError::ReadOnly(self.path.clone()));
        }
        let file = File::create(&self.path).map_err(|e| self.io_error(e))?;
        let mut writer = BufWriter::new(file);
        for entry in entries {
            serde_json::to_writer(&mut writer, entry)
                .map_err(|e| self.io_error(io::Error::other(e)))?;
            writer.write_all(b"\n").map_err(|e| self.io_error(e))?;
        }
        writer.flush().map_err(|e| self.io_error(e))?;
        Ok(())
    }
}
