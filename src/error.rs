// Error type shared by the codec, the artifact stores and the corpus loaders.
//
// Every variant carries the path it concerns so a failure deep inside a bulk
// load still points at the offending file.

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    /// The file or directory an operation expected does not exist.
    #[error("not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed delimited file {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{} has no '{column}' column", path.display())]
    MissingColumn { path: PathBuf, column: String },

    #[error("{}:{line}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: u64,
        message: String,
    },

    #[error("archive error in {}: {message}", path.display())]
    Archive { path: PathBuf, message: String },

    #[error("could not encode or decode {}: {message}", path.display())]
    Encoding { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, StoreError>;

impl StoreError {
    /// Wrap an I/O error, mapping `ErrorKind::NotFound` to [`StoreError::NotFound`].
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            StoreError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            StoreError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    /// Wrap a csv error. A missing file underneath it still reads as `NotFound`.
    pub fn csv(path: &Path, source: csv::Error) -> Self {
        match source.kind() {
            csv::ErrorKind::Io(err) if err.kind() == std::io::ErrorKind::NotFound => {
                StoreError::NotFound {
                    path: path.to_path_buf(),
                }
            }
            _ => StoreError::Csv {
                path: path.to_path_buf(),
                source,
            },
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}
