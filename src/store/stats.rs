// Preprocessing stats: stat label -> value, both stored as plain strings.

use std::fmt::Display;
use std::path::PathBuf;

use indexmap::IndexMap;

use super::{artifact_path, exists, STATS_COLUMNS};
use crate::codec;
use crate::config::Config;
use crate::error::Result;

/// `<root>/<folder>/stats/<name>_stats.csv`
pub fn stats_path(config: &Config, relative_folder: &str, file_name: &str) -> PathBuf {
    artifact_path(
        config,
        relative_folder,
        "stats",
        &format!("{file_name}_stats.csv"),
    )
}

pub fn stats_file_exists(config: &Config, relative_folder: &str, file_name: &str) -> bool {
    exists(&stats_path(config, relative_folder, file_name))
}

/// Write stats in the order given. Any displayable value is accepted; it is
/// read back as a string.
pub fn write_stats_file<K, V>(
    config: &Config,
    relative_folder: &str,
    file_name: &str,
    stats: &[(K, V)],
) -> Result<()>
where
    K: Display,
    V: Display,
{
    codec::write_key_value(
        stats_path(config, relative_folder, file_name),
        stats.iter().map(|(k, v)| (k, v)),
        STATS_COLUMNS,
        |k| k.to_string(),
        |v| v.to_string(),
    )?;
    Ok(())
}

pub fn load_stats_file(
    config: &Config,
    relative_folder: &str,
    file_name: &str,
) -> Result<IndexMap<String, String>> {
    codec::read(
        stats_path(config, relative_folder, file_name),
        STATS_COLUMNS,
        codec::text,
        codec::text,
    )
}
