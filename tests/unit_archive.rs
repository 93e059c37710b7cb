// Unit tests for the zipped binary co-frequency cache.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;

use indexmap::IndexMap;
use nstmine::config::Config;
use nstmine::store::archive::{
    archive_path, load_zipped_word_co_frequencies, write_word_co_frequencies_zip_file,
};
use nstmine::store::frequencies::WordPair;
use nstmine::StoreError;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

type Nested = IndexMap<String, IndexMap<String, u64>>;

fn nested() -> Nested {
    let mut inner_a = IndexMap::new();
    inner_a.insert("dog".to_string(), 5);
    inner_a.insert("mouse".to_string(), 2);
    let mut inner_b = IndexMap::new();
    inner_b.insert("sol".to_string(), 41);

    let mut outer = Nested::new();
    outer.insert("cat".to_string(), inner_a);
    outer.insert("regn".to_string(), inner_b);
    outer
}

fn write_raw_archive(path: &std::path::Path, entries: &[(&str, Vec<u8>)]) {
    let mut zip = ZipWriter::new(File::create(path).unwrap());
    for (name, bytes) in entries {
        zip.start_file(*name, SimpleFileOptions::default()).unwrap();
        zip.write_all(bytes).unwrap();
    }
    zip.finish().unwrap();
}

// ============================================================
// Round trip
// ============================================================

#[test]
fn nested_map_round_trips() {
    let dir = TempDir::new().unwrap();
    let config = Config::new(dir.path());

    let value = nested();
    write_word_co_frequencies_zip_file(&config, "", "cofreq", &value).unwrap();
    assert!(dir.path().join("cofreq.pkl.zip").is_file());

    let loaded: Nested = load_zipped_word_co_frequencies(&config, "", "cofreq").unwrap();
    assert_eq!(loaded, value);
    // Order survives, not just contents
    let keys: Vec<&str> = loaded.keys().map(|k| k.as_str()).collect();
    assert_eq!(keys, vec!["cat", "regn"]);
}

#[test]
fn word_pair_counts_round_trip_with_inner_order() {
    let dir = TempDir::new().unwrap();
    let config = Config::new(dir.path());

    let pair = |a: &str, b: &str| -> WordPair { (a.to_string(), b.to_string()) };
    let mut nrk: IndexMap<WordPair, u64> = IndexMap::new();
    nrk.insert(pair("sol", "regn"), 41);
    nrk.insert(pair("cat", "dog"), 5);
    nrk.insert(pair("vind", "sol"), 3);
    let mut tv2: IndexMap<WordPair, u64> = IndexMap::new();
    tv2.insert(pair("kamp", "mål"), u64::MAX);

    let mut value: HashMap<String, IndexMap<WordPair, u64>> = HashMap::new();
    value.insert("nrk".to_string(), nrk);
    value.insert("tv2".to_string(), tv2);

    write_word_co_frequencies_zip_file(&config, "", "pairs", &value).unwrap();
    let loaded: HashMap<String, IndexMap<WordPair, u64>> =
        load_zipped_word_co_frequencies(&config, "", "pairs").unwrap();
    assert_eq!(loaded, value);

    let order: Vec<&WordPair> = loaded["nrk"].keys().collect();
    assert_eq!(
        order,
        vec![&pair("sol", "regn"), &pair("cat", "dog"), &pair("vind", "sol")]
    );
}

#[test]
fn overwrite_replaces_previous_archive() {
    let dir = TempDir::new().unwrap();
    let config = Config::new(dir.path());

    write_word_co_frequencies_zip_file(&config, "", "cofreq", &nested()).unwrap();
    let mut smaller: HashMap<String, u64> = HashMap::new();
    smaller.insert("only".to_string(), 1);
    write_word_co_frequencies_zip_file(&config, "", "cofreq", &smaller).unwrap();

    let loaded: HashMap<String, u64> =
        load_zipped_word_co_frequencies(&config, "", "cofreq").unwrap();
    assert_eq!(loaded, smaller);

    // No staging files left behind next to the archive
    let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn archive_entry_is_named_after_file() {
    let dir = TempDir::new().unwrap();
    let config = Config::new(dir.path());
    write_word_co_frequencies_zip_file(&config, "", "cofreq", &nested()).unwrap();

    let file = File::open(archive_path(&config, "", "cofreq")).unwrap();
    let archive = zip::ZipArchive::new(file).unwrap();
    let names: Vec<&str> = archive.file_names().collect();
    assert_eq!(names, vec!["cofreq.pkl"]);
}

// ============================================================
// Failure modes
// ============================================================

#[test]
fn missing_archive_is_not_found() {
    let dir = TempDir::new().unwrap();
    let config = Config::new(dir.path());

    let err = load_zipped_word_co_frequencies::<Nested>(&config, "", "absent").unwrap_err();
    assert!(err.is_not_found(), "got {err:?}");
}

#[test]
fn single_entry_under_other_name_is_accepted() {
    let dir = TempDir::new().unwrap();
    let config = Config::new(dir.path());

    let bytes = bincode::serialize(&nested()).unwrap();
    write_raw_archive(&archive_path(&config, "", "renamed"), &[("original.pkl", bytes)]);

    let loaded: Nested = load_zipped_word_co_frequencies(&config, "", "renamed").unwrap();
    assert_eq!(loaded, nested());
}

#[test]
fn several_entries_without_match_is_archive_error() {
    let dir = TempDir::new().unwrap();
    let config = Config::new(dir.path());

    write_raw_archive(
        &archive_path(&config, "", "multi"),
        &[("a.pkl", vec![0]), ("b.pkl", vec![0])],
    );

    let err = load_zipped_word_co_frequencies::<Nested>(&config, "", "multi").unwrap_err();
    assert!(matches!(err, StoreError::Archive { .. }), "got {err:?}");
}

#[test]
fn non_zip_file_is_archive_error() {
    let dir = TempDir::new().unwrap();
    let config = Config::new(dir.path());
    fs::write(
        archive_path(&config, "", "junk"),
        "definitely not a zip archive, only text\n".repeat(4),
    )
    .unwrap();

    let err = load_zipped_word_co_frequencies::<Nested>(&config, "", "junk").unwrap_err();
    assert!(matches!(err, StoreError::Archive { .. }), "got {err:?}");
}

#[test]
fn payload_of_wrong_shape_is_encoding_error() {
    let dir = TempDir::new().unwrap();
    let config = Config::new(dir.path());

    // A lone u8 cannot decode as a map length prefix plus entries
    write_raw_archive(&archive_path(&config, "", "short"), &[("short.pkl", vec![7])]);

    let err = load_zipped_word_co_frequencies::<Nested>(&config, "", "short").unwrap_err();
    assert!(matches!(err, StoreError::Encoding { .. }), "got {err:?}");
}
