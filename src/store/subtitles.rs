// Tokenized subtitles: program id -> comma-joined token list.

use std::path::PathBuf;

use indexmap::IndexMap;
use tracing::info;

use super::{artifact_path, exists, SUBTITLE_COLUMNS};
use crate::codec::{self, join_words, split_words};
use crate::config::Config;
use crate::error::Result;

/// Program id -> tokens, in file order.
pub type SubtitledPrograms = IndexMap<String, Vec<String>>;

/// `<root>/<folder>/data/<name>.csv`
pub fn subtitles_path(config: &Config, relative_folder: &str, file_name: &str) -> PathBuf {
    artifact_path(config, relative_folder, "data", &format!("{file_name}.csv"))
}

pub fn subtitles_file_exists(config: &Config, relative_folder: &str, file_name: &str) -> bool {
    exists(&subtitles_path(config, relative_folder, file_name))
}

/// Write preprocessed subtitles. Tokens must not contain commas; they are the
/// list separator inside the field.
pub fn write_subtitles_file(
    config: &Config,
    relative_folder: &str,
    file_name: &str,
    programs: &SubtitledPrograms,
) -> Result<()> {
    let path = subtitles_path(config, relative_folder, file_name);
    let rows = codec::write_key_value(
        &path,
        programs,
        SUBTITLE_COLUMNS,
        |id| id.to_string(),
        |tokens| join_words(tokens.as_slice()),
    )?;
    info!(programs = rows, path = %path.display(), "Wrote subtitles");
    Ok(())
}

pub fn load_subtitles(
    config: &Config,
    relative_folder: &str,
    file_name: &str,
) -> Result<SubtitledPrograms> {
    codec::read(
        subtitles_path(config, relative_folder, file_name),
        SUBTITLE_COLUMNS,
        codec::text,
        split_words,
    )
}
