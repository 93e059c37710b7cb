// Topic model output: topic id -> ranked topic words.

use std::fmt;
use std::path::PathBuf;

use indexmap::IndexMap;
use tracing::info;

use super::{artifact_path, exists, TOPIC_COLUMNS};
use crate::codec::{self, join_words, split_words};
use crate::config::Config;
use crate::error::Result;

pub const DEFAULT_LDA_TOPICS: usize = 8;
pub const DEFAULT_TOP2VEC_EMBEDDING: &str = "distiluse";

/// Topic id -> words in rank order.
pub type Topics = IndexMap<i64, Vec<String>>;

/// Which model produced a topics file. Decides the file's location and name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TopicModel {
    /// `<folder>/<name>.csv`
    #[default]
    Plain,
    /// `<folder>/lda/<name>_lda_<k>_topics.csv`
    Lda { num_topics: usize },
    /// `<folder>/top2vec/<name>_top2vec_<embedding>.csv`
    Top2Vec { embedding: String },
}

impl TopicModel {
    pub fn lda() -> Self {
        TopicModel::Lda {
            num_topics: DEFAULT_LDA_TOPICS,
        }
    }

    pub fn top2vec() -> Self {
        TopicModel::Top2Vec {
            embedding: DEFAULT_TOP2VEC_EMBEDDING.to_string(),
        }
    }

    fn subfolder(&self) -> &'static str {
        match self {
            TopicModel::Plain => "",
            TopicModel::Lda { .. } => "lda",
            TopicModel::Top2Vec { .. } => "top2vec",
        }
    }

    fn file_name(&self, name: &str) -> String {
        match self {
            TopicModel::Plain => format!("{name}.csv"),
            TopicModel::Lda { num_topics } => format!("{name}_lda_{num_topics}_topics.csv"),
            TopicModel::Top2Vec { embedding } => format!("{name}_top2vec_{embedding}.csv"),
        }
    }
}

impl fmt::Display for TopicModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TopicModel::Plain => write!(f, "plain"),
            TopicModel::Lda { num_topics } => write!(f, "lda ({num_topics} topics)"),
            TopicModel::Top2Vec { embedding } => write!(f, "top2vec ({embedding})"),
        }
    }
}

pub fn topics_path(
    config: &Config,
    relative_folder: &str,
    file_name: &str,
    model: &TopicModel,
) -> PathBuf {
    artifact_path(
        config,
        relative_folder,
        model.subfolder(),
        &model.file_name(file_name),
    )
}

pub fn topics_file_exists(
    config: &Config,
    relative_folder: &str,
    file_name: &str,
    model: &TopicModel,
) -> bool {
    exists(&topics_path(config, relative_folder, file_name, model))
}

pub fn write_topics_file<'a, I>(
    config: &Config,
    relative_folder: &str,
    file_name: &str,
    topics: I,
    model: &TopicModel,
) -> Result<()>
where
    I: IntoIterator<Item = (&'a i64, &'a Vec<String>)>,
{
    let path = topics_path(config, relative_folder, file_name, model);
    let rows = codec::write_key_value(
        &path,
        topics,
        TOPIC_COLUMNS,
        |id| id.to_string(),
        |words| join_words(words.as_slice()),
    )?;
    info!(topics = rows, %model, path = %path.display(), "Wrote topics");
    Ok(())
}

pub fn load_model_topics(
    config: &Config,
    relative_folder: &str,
    file_name: &str,
    model: &TopicModel,
) -> Result<Topics> {
    codec::read(
        topics_path(config, relative_folder, file_name, model),
        TOPIC_COLUMNS,
        codec::integer::<i64>,
        split_words,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_paths_follow_model_conventions() {
        let config = Config::new("/root");
        assert_eq!(
            topics_path(&config, "out", "nrk", &TopicModel::Plain),
            PathBuf::from("/root/out/nrk.csv")
        );
        assert_eq!(
            topics_path(&config, "out", "nrk", &TopicModel::lda()),
            PathBuf::from("/root/out/lda/nrk_lda_8_topics.csv")
        );
        assert_eq!(
            topics_path(&config, "out", "nrk", &TopicModel::top2vec()),
            PathBuf::from("/root/out/top2vec/nrk_top2vec_distiluse.csv")
        );
    }
}
