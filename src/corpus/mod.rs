// NST corpus access: parsed subtitle tables and the contiguous-run grouping
// used to split flat exports back into programs.

pub mod nst;
pub mod table;

use indexmap::IndexMap;

/// Column holding the program's file name in flat exports.
pub const FILE_NAME: &str = "File name";
/// Row number column in flat exports.
pub const NUMBER: &str = "Number";
/// Subtitle text column in flat exports.
pub const SUBTITLE: &str = "Subtitle";

/// Consecutive items sharing a key, in input order.
///
/// The same key may show up in more than one run when the input is not
/// grouped; [`Runs::into_map`] then keeps the last run for that key.
#[derive(Debug)]
pub struct Runs<T> {
    runs: Vec<(String, Vec<T>)>,
}

impl<T> Default for Runs<T> {
    fn default() -> Self {
        Self { runs: Vec::new() }
    }
}

impl<T> Runs<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `item`, starting a new run when `key` differs from the current one.
    pub fn push(&mut self, key: &str, item: T) {
        match self.runs.last_mut() {
            Some((current, items)) if current == key => items.push(item),
            _ => self.runs.push((key.to_string(), vec![item])),
        }
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    pub fn into_runs(self) -> Vec<(String, Vec<T>)> {
        self.runs
    }

    /// Collapse runs into a map keyed by run key (last run wins).
    pub fn into_map(self) -> IndexMap<String, Vec<T>> {
        self.runs.into_iter().collect()
    }
}

/// Group items into contiguous runs of equal key.
pub fn group_runs<T, I, F>(items: I, mut key_of: F) -> Vec<(String, Vec<T>)>
where
    I: IntoIterator<Item = T>,
    F: FnMut(&T) -> String,
{
    let mut runs = Runs::new();
    for item in items {
        let key = key_of(&item);
        runs.push(&key, item);
    }
    runs.into_runs()
}
