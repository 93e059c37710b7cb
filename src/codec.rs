// Keyed CSV codec: two-column, semicolon-delimited tables.
//
// Every artifact the stores persist is a header row `[key label, value label]`
// followed by one row per record. The codec owns the delimiter, header and
// quoting rules; callers only supply the labels and the functions that turn
// typed keys and values into strings and back.

use std::fs::File;
use std::hash::Hash;
use std::path::Path;

use indexmap::IndexMap;

use crate::error::{Result, StoreError};

/// Field delimiter for every artifact file.
pub const DELIMITER: u8 = b';';

/// Separator used inside a single field for word lists.
pub const LIST_SEPARATOR: char = ',';

/// The two header labels of a keyed table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Columns {
    pub key: &'static str,
    pub value: &'static str,
}

impl Columns {
    pub const fn new(key: &'static str, value: &'static str) -> Self {
        Self { key, value }
    }
}

/// Write records with the key in the key column and the value in the value column.
///
/// Truncates any existing file. The parent directory must already exist.
/// Returns the number of data rows written.
pub fn write_key_value<P, I, K, V, FK, FV>(
    path: P,
    records: I,
    columns: Columns,
    key_fmt: FK,
    value_fmt: FV,
) -> Result<usize>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = (K, V)>,
    FK: Fn(&K) -> String,
    FV: Fn(&V) -> String,
{
    write_rows(
        path.as_ref(),
        columns,
        records
            .into_iter()
            .map(|(key, value)| [key_fmt(&key), value_fmt(&value)]),
    )
}

/// Write records with their columns swapped relative to the header.
///
/// The header is still `[key label, value label]`, but the key column holds the
/// formatted value and the value column holds the formatted key. Pipelines are
/// stored this way: the rule name is the row's leading column.
pub fn write_value_key<P, I, K, V, FK, FV>(
    path: P,
    records: I,
    columns: Columns,
    key_fmt: FK,
    value_fmt: FV,
) -> Result<usize>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = (K, V)>,
    FK: Fn(&K) -> String,
    FV: Fn(&V) -> String,
{
    write_rows(
        path.as_ref(),
        columns,
        records
            .into_iter()
            .map(|(key, value)| [value_fmt(&value), key_fmt(&key)]),
    )
}

fn write_rows<I>(path: &Path, columns: Columns, rows: I) -> Result<usize>
where
    I: Iterator<Item = [String; 2]>,
{
    // Not StoreError::io: a missing parent directory is an I/O failure here,
    // not a missing artifact.
    let file = File::create(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut writer = csv::WriterBuilder::new()
        .delimiter(DELIMITER)
        .terminator(csv::Terminator::CRLF)
        .from_writer(file);

    writer
        .write_record([columns.key, columns.value])
        .map_err(|e| StoreError::csv(path, e))?;

    let mut count = 0;
    for row in rows {
        writer
            .write_record(&row)
            .map_err(|e| StoreError::csv(path, e))?;
        count += 1;
    }

    writer.flush().map_err(|e| StoreError::io(path, e))?;
    Ok(count)
}

/// Read a keyed table into an insertion-ordered map.
///
/// Columns are located by header label, so the file's column order does not
/// matter. A key that appears more than once keeps its first position and its
/// last value.
pub fn read<P, K, V, FK, FV>(
    path: P,
    columns: Columns,
    key_parse: FK,
    value_parse: FV,
) -> Result<IndexMap<K, V>>
where
    P: AsRef<Path>,
    K: Hash + Eq,
    FK: Fn(&str) -> std::result::Result<K, String>,
    FV: Fn(&str) -> std::result::Result<V, String>,
{
    let mut data = IndexMap::new();
    for_each_row(path.as_ref(), columns, key_parse, value_parse, |key, value| {
        data.insert(key, value);
    })?;
    Ok(data)
}

/// Read a keyed table as pairs in file order, keeping duplicate keys.
pub fn read_pairs<P, K, V, FK, FV>(
    path: P,
    columns: Columns,
    key_parse: FK,
    value_parse: FV,
) -> Result<Vec<(K, V)>>
where
    P: AsRef<Path>,
    FK: Fn(&str) -> std::result::Result<K, String>,
    FV: Fn(&str) -> std::result::Result<V, String>,
{
    let mut pairs = Vec::new();
    for_each_row(path.as_ref(), columns, key_parse, value_parse, |key, value| {
        pairs.push((key, value));
    })?;
    Ok(pairs)
}

fn for_each_row<K, V, FK, FV, F>(
    path: &Path,
    columns: Columns,
    key_parse: FK,
    value_parse: FV,
    mut sink: F,
) -> Result<()>
where
    FK: Fn(&str) -> std::result::Result<K, String>,
    FV: Fn(&str) -> std::result::Result<V, String>,
    F: FnMut(K, V),
{
    let file = File::open(path).map_err(|e| StoreError::io(path, e))?;
    let mut reader = delimited_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| StoreError::csv(path, e))?
        .clone();
    let key_idx = column_index(path, &headers, columns.key)?;
    let value_idx = column_index(path, &headers, columns.value)?;

    let mut record = csv::StringRecord::new();
    loop {
        let more = reader
            .read_record(&mut record)
            .map_err(|e| StoreError::csv(path, e))?;
        if !more {
            break;
        }
        let line = record.position().map_or(0, |p| p.line());

        let (raw_key, raw_value) = match (record.get(key_idx), record.get(value_idx)) {
            (Some(k), Some(v)) => (k, v),
            _ => {
                return Err(StoreError::Parse {
                    path: path.to_path_buf(),
                    line,
                    message: format!(
                        "expected columns '{}' and '{}', found {} field(s)",
                        columns.key,
                        columns.value,
                        record.len()
                    ),
                })
            }
        };

        let parse_err = |message: String| StoreError::Parse {
            path: path.to_path_buf(),
            line,
            message,
        };
        let key = key_parse(raw_key).map_err(parse_err)?;
        let value = value_parse(raw_value).map_err(parse_err)?;
        sink(key, value);
    }

    Ok(())
}

/// Semicolon reader that tolerates ragged rows; callers check field counts.
pub(crate) fn delimited_reader<R: std::io::Read>(source: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .flexible(true)
        .from_reader(source)
}

pub(crate) fn column_index(path: &Path, headers: &csv::StringRecord, label: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == label)
        .ok_or_else(|| StoreError::MissingColumn {
            path: path.to_path_buf(),
            column: label.to_string(),
        })
}

// ------------------------------------------------------------
// Formatters and parsers shared by the stores
// ------------------------------------------------------------

/// Identity parser.
pub fn text(raw: &str) -> std::result::Result<String, String> {
    Ok(raw.to_string())
}

/// Parse an integer field, naming the offending text on failure.
pub fn integer<T>(raw: &str) -> std::result::Result<T, String>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| format!("'{raw}' is not an integer: {e}"))
}

/// Join words into one field: `["a", "b"]` -> `"a,b"`.
pub fn join_words<S: AsRef<str>>(words: &[S]) -> String {
    let mut out = String::new();
    for (i, word) in words.iter().enumerate() {
        if i > 0 {
            out.push(LIST_SEPARATOR);
        }
        out.push_str(word.as_ref());
    }
    out
}

/// Split a word-list field. An empty field yields one empty word.
pub fn split_words(raw: &str) -> std::result::Result<Vec<String>, String> {
    Ok(raw.split(LIST_SEPARATOR).map(str::to_string).collect())
}
