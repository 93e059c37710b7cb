// Zipped binary cache for tables too large for CSV (word co-frequencies).
//
// The archive holds a single deflate-compressed entry `<name>.pkl` containing
// the bincode encoding of the value. There is no schema version: the payload
// is only readable by a build with the same types and bincode major version.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::info;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use super::artifact_path;
use crate::config::Config;
use crate::error::{Result, StoreError};

/// `<root>/<folder>/<name>.pkl.zip`
pub fn archive_path(config: &Config, relative_folder: &str, file_name: &str) -> PathBuf {
    artifact_path(config, relative_folder, "", &format!("{file_name}.pkl.zip"))
}

fn entry_name(file_name: &str) -> String {
    format!("{file_name}.pkl")
}

fn archive_error(path: &Path, err: zip::result::ZipError) -> StoreError {
    match err {
        zip::result::ZipError::Io(source) => StoreError::io(path, source),
        other => StoreError::Archive {
            path: path.to_path_buf(),
            message: other.to_string(),
        },
    }
}

fn encoding_error(path: &Path, err: bincode::Error) -> StoreError {
    StoreError::Encoding {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

/// Serialize `value` into `<folder>/<name>.pkl.zip`.
///
/// The archive is staged next to its destination and renamed into place once
/// complete, so an existing archive is only replaced by a whole one.
pub fn write_word_co_frequencies_zip_file<T>(
    config: &Config,
    relative_folder: &str,
    file_name: &str,
    value: &T,
) -> Result<()>
where
    T: Serialize + ?Sized,
{
    let path = archive_path(config, relative_folder, file_name);
    let parent_dir = path.parent().unwrap_or_else(|| Path::new("."));

    let io_error = |source| StoreError::Io {
        path: path.clone(),
        source,
    };

    let temp_file = NamedTempFile::new_in(parent_dir).map_err(io_error)?;
    let mut zip = ZipWriter::new(temp_file);
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .large_file(true);

    zip.start_file(entry_name(file_name), options)
        .map_err(|e| archive_error(&path, e))?;
    {
        let mut writer = BufWriter::new(&mut zip);
        bincode::serialize_into(&mut writer, value).map_err(|e| encoding_error(&path, e))?;
        writer.flush().map_err(io_error)?;
    }
    let temp_file = zip.finish().map_err(|e| archive_error(&path, e))?;

    temp_file.persist(&path).map_err(|e| io_error(e.error))?;
    info!(path = %path.display(), "Wrote zipped co-frequencies");
    Ok(())
}

/// Load a value written by [`write_word_co_frequencies_zip_file`].
///
/// The entry is looked up by name; an archive with a single entry under a
/// different name is accepted as well.
pub fn load_zipped_word_co_frequencies<T>(
    config: &Config,
    relative_folder: &str,
    file_name: &str,
) -> Result<T>
where
    T: DeserializeOwned,
{
    let path = archive_path(config, relative_folder, file_name);
    let file = File::open(&path).map_err(|e| StoreError::io(&path, e))?;
    let mut archive =
        ZipArchive::new(BufReader::new(file)).map_err(|e| archive_error(&path, e))?;

    let wanted = entry_name(file_name);
    let index = match archive.index_for_name(&wanted) {
        Some(index) => index,
        None if archive.len() == 1 => 0,
        None => {
            return Err(StoreError::Archive {
                path,
                message: format!(
                    "expected entry '{wanted}', archive has {} entries",
                    archive.len()
                ),
            })
        }
    };

    let entry = archive
        .by_index(index)
        .map_err(|e| archive_error(&path, e))?;
    bincode::deserialize_from(BufReader::new(entry)).map_err(|e| encoding_error(&path, e))
}
