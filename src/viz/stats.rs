// Dataset statistics for tokenized subtitle collections.

use std::collections::HashSet;

use stop_words::{get, LANGUAGE};

/// Labels paired with [`DatasetStats::values`], in the same order.
pub const DATA_STATS_HEADERS: [&str; 6] = [
    "dataset_size",
    "vocab_size",
    "total_tokens",
    "avg_token_freq",
    "avg_token_per_doc",
    "avg_stopwords_per_doc",
];

/// Summary of a collection of tokenized documents.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DatasetStats {
    pub dataset_size: usize,
    pub vocab_size: usize,
    pub total_tokens: usize,
    /// Mean occurrences per distinct token.
    pub avg_token_freq: f64,
    pub avg_token_per_doc: f64,
    pub avg_stopwords_per_doc: f64,
}

impl DatasetStats {
    pub fn values(&self) -> [f64; 6] {
        [
            self.dataset_size as f64,
            self.vocab_size as f64,
            self.total_tokens as f64,
            self.avg_token_freq,
            self.avg_token_per_doc,
            self.avg_stopwords_per_doc,
        ]
    }
}

/// Norwegian stopwords, lowercased.
pub fn norwegian_stop_words() -> HashSet<String> {
    get(LANGUAGE::Norwegian)
        .into_iter()
        .map(|w| w.to_lowercase())
        .collect()
}

/// Compute stats over documents. Stopwords are matched case-insensitively
/// against a lowercased `stop_words` set.
pub fn get_data_stats<'a, I>(documents: I, stop_words: &HashSet<String>) -> DatasetStats
where
    I: IntoIterator<Item = &'a Vec<String>>,
{
    let mut vocabulary: HashSet<&str> = HashSet::new();
    let mut dataset_size = 0;
    let mut total_tokens = 0;
    let mut stopword_tokens = 0;

    for doc in documents {
        dataset_size += 1;
        total_tokens += doc.len();
        for token in doc {
            vocabulary.insert(token.as_str());
            if stop_words.contains(&token.to_lowercase()) {
                stopword_tokens += 1;
            }
        }
    }

    let vocab_size = vocabulary.len();
    DatasetStats {
        dataset_size,
        vocab_size,
        total_tokens,
        avg_token_freq: ratio(total_tokens, vocab_size),
        avg_token_per_doc: ratio(total_tokens, dataset_size),
        avg_stopwords_per_doc: ratio(stopword_tokens, dataset_size),
    }
}

/// Stats paired with their labels, ready for display or `write_stats_file`.
pub fn create_stats_table<'a, I>(
    documents: I,
    stop_words: &HashSet<String>,
) -> Vec<(&'static str, f64)>
where
    I: IntoIterator<Item = &'a Vec<String>>,
{
    let stats = get_data_stats(documents, stop_words);
    DATA_STATS_HEADERS.into_iter().zip(stats.values()).collect()
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}
