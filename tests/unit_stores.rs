// Unit tests for the artifact stores.
//
// Each store is written into a temp root and read back through its paired
// loader; pipelines are checked against the raw file since they are written
// value-first.

use std::collections::HashMap;
use std::fs;

use indexmap::IndexMap;
use nstmine::config::Config;
use nstmine::store::frequencies::{
    frequencies_path, load_word_co_frequencies, load_word_co_frequency_counts,
    load_word_frequencies, word_frequencies_file_exists, write_word_co_frequencies_file,
    write_word_frequencies_file, WordPair,
};
use nstmine::store::pipeline::{load_pipeline_file, pipeline_path, write_pipeline_file, RuleMethod};
use nstmine::store::stats::{load_stats_file, stats_file_exists, write_stats_file};
use nstmine::store::subtitles::{
    load_subtitles, subtitles_file_exists, write_subtitles_file, SubtitledPrograms,
};
use nstmine::store::topics::{
    load_model_topics, topics_file_exists, topics_path, write_topics_file, TopicModel, Topics,
};
use tempfile::TempDir;

fn workspace() -> (TempDir, Config) {
    let dir = TempDir::new().unwrap();
    let config = Config::new(dir.path());
    (dir, config)
}

fn words(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|w| w.to_string()).collect()
}

// ============================================================
// Subtitles
// ============================================================

#[test]
fn subtitles_scenario_round_trips() {
    let (dir, config) = workspace();
    fs::create_dir_all(dir.path().join("preprocessed").join("data")).unwrap();

    let mut programs = SubtitledPrograms::new();
    programs.insert("p1".to_string(), words(&["a", "b", "c"]));

    write_subtitles_file(&config, "preprocessed", "prog", &programs).unwrap();

    let loaded = load_subtitles(&config, "preprocessed", "prog").unwrap();
    assert_eq!(loaded, programs);
    assert!(dir.path().join("preprocessed/data/prog.csv").is_file());
}

#[test]
fn subtitles_existence_flips_after_write() {
    let (dir, config) = workspace();
    fs::create_dir_all(dir.path().join("out").join("data")).unwrap();

    assert!(!subtitles_file_exists(&config, "out", "nrk"));
    write_subtitles_file(&config, "out", "nrk", &SubtitledPrograms::new()).unwrap();
    assert!(subtitles_file_exists(&config, "out", "nrk"));
}

#[test]
fn subtitles_preserve_program_order() {
    let (dir, config) = workspace();
    fs::create_dir_all(dir.path().join("out").join("data")).unwrap();

    let mut programs = SubtitledPrograms::new();
    for id in ["zeta", "alpha", "mid"] {
        programs.insert(id.to_string(), words(&["ord"]));
    }
    write_subtitles_file(&config, "out", "order", &programs).unwrap();

    let loaded = load_subtitles(&config, "out", "order").unwrap();
    let ids: Vec<&str> = loaded.keys().map(|k| k.as_str()).collect();
    assert_eq!(ids, vec!["zeta", "alpha", "mid"]);
}

#[test]
fn subtitles_missing_file_is_not_found() {
    let (_dir, config) = workspace();
    let err = load_subtitles(&config, "out", "absent").unwrap_err();
    assert!(err.is_not_found());
}

// ============================================================
// Stats
// ============================================================

#[test]
fn stats_values_come_back_as_strings() {
    let (dir, config) = workspace();
    fs::create_dir_all(dir.path().join("out").join("stats")).unwrap();

    assert!(!stats_file_exists(&config, "out", "nrk"));
    let table = vec![("dataset_size", 3.0), ("avg_token_per_doc", 2.5)];
    write_stats_file(&config, "out", "nrk", &table).unwrap();
    assert!(stats_file_exists(&config, "out", "nrk"));

    let loaded = load_stats_file(&config, "out", "nrk").unwrap();
    assert_eq!(loaded["dataset_size"], "3");
    assert_eq!(loaded["avg_token_per_doc"], "2.5");
    assert!(dir.path().join("out/stats/nrk_stats.csv").is_file());
}

// ============================================================
// Pipelines
// ============================================================

struct Lowercase;

impl RuleMethod for Lowercase {
    fn method_name(&self) -> String {
        "lowercase".to_string()
    }
}

#[test]
fn pipeline_rows_lead_with_rule_name() {
    let (dir, config) = workspace();
    fs::create_dir_all(dir.path().join("out").join("pipelines")).unwrap();

    let pipeline = vec![(Lowercase, "ruleA".to_string())];
    write_pipeline_file(&config, "out", "nrk", &pipeline).unwrap();

    let raw = fs::read_to_string(pipeline_path(&config, "out", "nrk")).unwrap();
    let lines: Vec<&str> = raw.lines().collect();
    assert_eq!(lines, vec!["Rule name;Rule method", "ruleA;lowercase"]);
}

#[test]
fn pipeline_loads_back_as_method_rule_pairs_in_order() {
    let (dir, config) = workspace();
    fs::create_dir_all(dir.path().join("out").join("pipelines")).unwrap();

    let pipeline = vec![
        ("remove_stopwords", "stop".to_string()),
        ("lemmatize", "lemma".to_string()),
        ("remove_stopwords", "stop again".to_string()),
    ];
    write_pipeline_file(&config, "out", "nrk", &pipeline).unwrap();

    let loaded = load_pipeline_file(&config, "out", "nrk").unwrap();
    assert_eq!(
        loaded,
        vec![
            ("remove_stopwords".to_string(), "stop".to_string()),
            ("lemmatize".to_string(), "lemma".to_string()),
            ("remove_stopwords".to_string(), "stop again".to_string()),
        ]
    );
}

// ============================================================
// Word frequencies
// ============================================================

#[test]
fn word_frequencies_round_trip() {
    let (_dir, config) = workspace();

    let mut frequencies: IndexMap<String, u64> = IndexMap::new();
    frequencies.insert("hei".to_string(), 12);
    frequencies.insert("på".to_string(), 0);
    frequencies.insert("deg".to_string(), u64::MAX);

    assert!(!word_frequencies_file_exists(&config, "", "freq"));
    write_word_frequencies_file(&config, "", "freq", &frequencies).unwrap();
    assert!(word_frequencies_file_exists(&config, "", "freq"));

    let loaded = load_word_frequencies(&config, "", "freq").unwrap();
    assert_eq!(loaded, frequencies);
}

#[test]
fn word_frequencies_accept_hash_map_input() {
    let (_dir, config) = workspace();

    let frequencies: HashMap<String, u64> =
        [("a".to_string(), 1), ("b".to_string(), 2)].into_iter().collect();
    write_word_frequencies_file(&config, "", "freq", &frequencies).unwrap();

    let loaded = load_word_frequencies(&config, "", "freq").unwrap();
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded["b"], 2);
}

// ============================================================
// Word co-frequencies
// ============================================================

#[test]
fn co_frequency_scenario_raw_row_and_string_value() {
    let (_dir, config) = workspace();

    let pair: WordPair = ("cat".to_string(), "dog".to_string());
    let data = vec![(pair.clone(), 5u64)];
    write_word_co_frequencies_file(&config, "", "cofreq", data.iter().map(|(k, v)| (k, v)))
        .unwrap();

    let raw = fs::read_to_string(frequencies_path(&config, "", "cofreq")).unwrap();
    let lines: Vec<&str> = raw.lines().collect();
    assert_eq!(lines, vec!["Word pair;Co-frequency", "(cat,dog);5"]);

    let loaded = load_word_co_frequencies(&config, "", "cofreq").unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[&pair], "5");
}

#[test]
fn co_frequency_counts_parse_as_integers() {
    let (_dir, config) = workspace();

    let mut data: IndexMap<WordPair, u64> = IndexMap::new();
    data.insert(("sol".to_string(), "regn".to_string()), 41);
    data.insert(("vind".to_string(), "sol".to_string()), 3);
    write_word_co_frequencies_file(&config, "", "cofreq", &data).unwrap();

    let loaded = load_word_co_frequency_counts(&config, "", "cofreq").unwrap();
    assert_eq!(loaded, data);
}

#[test]
fn co_frequency_reads_quoted_tuple_keys() {
    let (dir, config) = workspace();
    fs::write(
        dir.path().join("legacy.csv"),
        "Word pair;Co-frequency\n('hei', 'du');7\n",
    )
    .unwrap();

    let loaded = load_word_co_frequency_counts(&config, "", "legacy").unwrap();
    assert_eq!(loaded[&("hei".to_string(), "du".to_string())], 7);
}

// ============================================================
// Topics
// ============================================================

fn sample_topics() -> Topics {
    let mut topics = Topics::new();
    topics.insert(0, words(&["valg", "regjering", "storting"]));
    topics.insert(1, words(&["fotball", "kamp"]));
    topics.insert(7, words(&["vær"]));
    topics
}

#[test]
fn topics_round_trip_for_every_model_path() {
    let (dir, config) = workspace();
    fs::create_dir_all(dir.path().join("topics").join("lda")).unwrap();
    fs::create_dir_all(dir.path().join("topics").join("top2vec")).unwrap();

    let topics = sample_topics();
    for model in [
        TopicModel::Plain,
        TopicModel::lda(),
        TopicModel::Lda { num_topics: 20 },
        TopicModel::top2vec(),
        TopicModel::Top2Vec {
            embedding: "universal-sentence-encoder".to_string(),
        },
    ] {
        assert!(!topics_file_exists(&config, "topics", "nrk", &model));
        write_topics_file(&config, "topics", "nrk", &topics, &model).unwrap();
        assert!(topics_file_exists(&config, "topics", "nrk", &model));

        let loaded = load_model_topics(&config, "topics", "nrk", &model).unwrap();
        assert_eq!(loaded, topics, "model {model}");
    }

    assert!(dir.path().join("topics/lda/nrk_lda_20_topics.csv").is_file());
    assert!(dir
        .path()
        .join("topics/top2vec/nrk_top2vec_universal-sentence-encoder.csv")
        .is_file());
}

#[test]
fn topics_in_missing_model_folder_fail_to_write() {
    let (_dir, config) = workspace();
    let err = write_topics_file(&config, "topics", "nrk", &sample_topics(), &TopicModel::lda())
        .unwrap_err();
    assert!(!err.is_not_found(), "write failures are I/O errors, got {err:?}");
    assert!(!topics_path(&config, "topics", "nrk", &TopicModel::lda()).exists());
}
