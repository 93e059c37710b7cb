// Word frequencies and word co-frequencies as keyed CSV files.
//
// Co-frequency keys are word pairs, written as `(a,b)`. Reading strips any
// parentheses and single quotes before splitting on the comma, so files that
// quote each word, like `('a', 'b')`, load as well.

use std::path::PathBuf;
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex_lite::Regex;
use tracing::info;

use super::{artifact_path, exists, WORD_CO_FREQUENCY_COLUMNS, WORD_FREQUENCY_COLUMNS};
use crate::codec;
use crate::config::Config;
use crate::error::Result;

/// An unordered word pair, stored in the order it was produced upstream.
pub type WordPair = (String, String);

static PAIR_DECORATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"['()]").expect("static pattern"));

/// `<root>/<folder>/<name>.csv`: shared by both frequency artifacts.
pub fn frequencies_path(config: &Config, relative_folder: &str, file_name: &str) -> PathBuf {
    artifact_path(config, relative_folder, "", &format!("{file_name}.csv"))
}

pub fn word_frequencies_file_exists(
    config: &Config,
    relative_folder: &str,
    file_name: &str,
) -> bool {
    exists(&frequencies_path(config, relative_folder, file_name))
}

pub fn write_word_frequencies_file<'a, I>(
    config: &Config,
    relative_folder: &str,
    file_name: &str,
    word_frequencies: I,
) -> Result<()>
where
    I: IntoIterator<Item = (&'a String, &'a u64)>,
{
    let path = frequencies_path(config, relative_folder, file_name);
    let rows = codec::write_key_value(
        &path,
        word_frequencies,
        WORD_FREQUENCY_COLUMNS,
        |word| word.to_string(),
        |count| count.to_string(),
    )?;
    info!(words = rows, path = %path.display(), "Wrote word frequencies");
    Ok(())
}

pub fn load_word_frequencies(
    config: &Config,
    relative_folder: &str,
    file_name: &str,
) -> Result<IndexMap<String, u64>> {
    codec::read(
        frequencies_path(config, relative_folder, file_name),
        WORD_FREQUENCY_COLUMNS,
        codec::text,
        codec::integer::<u64>,
    )
}

/// Format a pair as `(a,b)`.
pub fn format_word_pair(pair: &WordPair) -> String {
    format!("({},{})", pair.0, pair.1)
}

/// Parse `(a,b)`, `a,b` or `('a', 'b')` into a pair. Surrounding whitespace on
/// each word is dropped.
pub fn parse_word_pair(raw: &str) -> std::result::Result<WordPair, String> {
    let stripped = PAIR_DECORATION.replace_all(raw, "");
    let mut parts = stripped.split(codec::LIST_SEPARATOR);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(a), Some(b), None) => Ok((a.trim().to_string(), b.trim().to_string())),
        _ => Err(format!("'{raw}' is not a word pair")),
    }
}

pub fn write_word_co_frequencies_file<'a, I>(
    config: &Config,
    relative_folder: &str,
    file_name: &str,
    word_co_frequencies: I,
) -> Result<()>
where
    I: IntoIterator<Item = (&'a WordPair, &'a u64)>,
{
    let path = frequencies_path(config, relative_folder, file_name);
    let rows = codec::write_key_value(
        &path,
        word_co_frequencies,
        WORD_CO_FREQUENCY_COLUMNS,
        |pair| format_word_pair(pair),
        |count| count.to_string(),
    )?;
    info!(pairs = rows, path = %path.display(), "Wrote word co-frequencies");
    Ok(())
}

/// Load co-frequencies with the count left as the raw string from the file.
///
/// Use [`load_word_co_frequency_counts`] for parsed counts.
pub fn load_word_co_frequencies(
    config: &Config,
    relative_folder: &str,
    file_name: &str,
) -> Result<IndexMap<WordPair, String>> {
    codec::read(
        frequencies_path(config, relative_folder, file_name),
        WORD_CO_FREQUENCY_COLUMNS,
        parse_word_pair,
        codec::text,
    )
}

/// Load co-frequencies with counts parsed as integers.
pub fn load_word_co_frequency_counts(
    config: &Config,
    relative_folder: &str,
    file_name: &str,
) -> Result<IndexMap<WordPair, u64>> {
    codec::read(
        frequencies_path(config, relative_folder, file_name),
        WORD_CO_FREQUENCY_COLUMNS,
        parse_word_pair,
        codec::integer::<u64>,
    )
}
