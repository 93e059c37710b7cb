// Artifact stores: one module per persisted artifact kind.
//
// Each store fixes the column labels, the on-disk path convention and the
// formatters for its artifact, and delegates the file handling to the codec.
// Paths are always `<config.root_path>/<relative folder>/...`.

pub mod archive;
pub mod frequencies;
pub mod pipeline;
pub mod stats;
pub mod subtitles;
pub mod topics;

use std::path::{Path, PathBuf};

use crate::codec::Columns;
use crate::config::Config;

pub const SUBTITLE_COLUMNS: Columns = Columns::new("Program ID", "Tokenized subtitles");
pub const STATS_COLUMNS: Columns = Columns::new("Stat", "Value");
pub const PIPELINE_COLUMNS: Columns = Columns::new("Rule name", "Rule method");
pub const WORD_FREQUENCY_COLUMNS: Columns = Columns::new("Word", "Frequency");
pub const WORD_CO_FREQUENCY_COLUMNS: Columns = Columns::new("Word pair", "Co-frequency");
pub const TOPIC_COLUMNS: Columns = Columns::new("Topic ID", "Topic words");

/// `<root>/<folder>/<subfolder>/<file_name>`, with an empty subfolder skipped.
pub(crate) fn artifact_path(
    config: &Config,
    relative_folder: &str,
    subfolder: &str,
    file_name: &str,
) -> PathBuf {
    let mut path = config.folder(relative_folder);
    if !subfolder.is_empty() {
        path.push(subfolder);
    }
    path.push(file_name);
    path
}

/// Probe for a file without opening it.
pub(crate) fn exists(path: &Path) -> bool {
    path.is_file()
}
