// NST bulk loaders.
//
// Three ways into the corpus:
// - sample per-program files straight from the NST export directory
// - split a flat per-row sample file back into per-program tables
// - split a flat subtitle sample into per-program token lists

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use indicatif::{ProgressBar, ProgressStyle};
use rand::seq::IndexedRandom;
use rand::Rng;
use tracing::{debug, info};

use super::table::NstTable;
use super::{Runs, FILE_NAME, NUMBER, SUBTITLE};
use crate::codec::{column_index, delimited_reader};
use crate::config::Config;
use crate::error::{Result, StoreError};
use crate::store::subtitles::SubtitledPrograms;

/// Leading columns of a per-program NST file that carry no subtitle content.
pub const CORPUS_LEADING_COLUMNS: usize = 2;

/// File name -> parsed table.
pub type NstSample = IndexMap<String, NstTable>;

/// Corpus files for the configured language, sorted by file name.
pub fn list_corpus_files(config: &Config) -> Result<Vec<PathBuf>> {
    let dir = &config.nst_path;
    if !dir.is_dir() {
        return Err(StoreError::NotFound { path: dir.clone() });
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| StoreError::io(dir, e))? {
        let path = entry.map_err(|e| StoreError::io(dir, e))?.path();
        if is_language_file(&path, &config.language_suffix) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn is_language_file(path: &Path, suffix: &str) -> bool {
    path.is_file()
        && path.extension().is_some_and(|ext| ext == "csv")
        && path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .is_some_and(|stem| stem.ends_with(suffix))
}

/// Number of files drawn for a sample of `sample_size`: ten percent extra to
/// absorb files that fail to parse.
pub fn candidate_count(sample_size: usize) -> usize {
    sample_size + sample_size / 10
}

/// Sample programs from the NST export directory using the thread RNG.
pub fn load_nst_sample_from_corpus(
    config: &Config,
    sample_size: usize,
    full_sample: bool,
) -> Result<NstSample> {
    load_nst_sample_from_corpus_with_rng(config, sample_size, full_sample, &mut rand::rng())
}

/// Sample programs from the NST export directory.
///
/// Without `full_sample`, a random subset of [`candidate_count`] files is
/// parsed and loading stops once `sample_size` tables are kept. Files that do
/// not parse are skipped. Each kept table loses its first
/// [`CORPUS_LEADING_COLUMNS`] columns and is keyed by its file name.
pub fn load_nst_sample_from_corpus_with_rng<R: Rng + ?Sized>(
    config: &Config,
    sample_size: usize,
    full_sample: bool,
    rng: &mut R,
) -> Result<NstSample> {
    let files = list_corpus_files(config)?;

    let candidates: Vec<&PathBuf> = if full_sample {
        files.iter().collect()
    } else {
        let amount = candidate_count(sample_size).min(files.len());
        files.choose_multiple(rng, amount).collect()
    };

    let pb = ProgressBar::new(candidates.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  Corpus [{bar:30}] {pos}/{len} ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut sample = NstSample::new();
    for path in candidates {
        pb.inc(1);
        match NstTable::from_path(path) {
            Ok(mut table) => {
                table.drop_leading_columns(CORPUS_LEADING_COLUMNS);
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                sample.insert(name, table);
            }
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Skipping unparseable corpus file");
            }
        }
        if !full_sample && sample.len() == sample_size {
            break;
        }
    }
    pb.finish_and_clear();

    info!(sample_size = sample.len(), "Loaded NST sample from corpus");
    Ok(sample)
}

/// Split a flat NST sample file into one table per program.
///
/// Consecutive rows with the same `File name` form one program; the
/// `File name` and `Number` columns are dropped from each table. Rows are
/// expected to be grouped by file name already; a name that comes back later
/// keeps only its last run. A row wider than the header is a parse error. An
/// empty file yields an empty sample.
pub fn load_nst_sample(path: &Path) -> Result<NstSample> {
    let file = File::open(path).map_err(|e| StoreError::io(path, e))?;
    let mut reader = delimited_reader(file);

    let header_record = reader
        .headers()
        .map_err(|e| StoreError::csv(path, e))?
        .clone();
    if header_record.is_empty() {
        return Ok(NstSample::new());
    }
    let name_idx = column_index(path, &header_record, FILE_NAME)?;
    column_index(path, &header_record, NUMBER)?;
    let headers: Vec<String> = header_record.iter().map(str::to_string).collect();

    let mut runs = Runs::new();
    for record in reader.records() {
        let record = record.map_err(|e| StoreError::csv(path, e))?;
        if record.len() > headers.len() {
            return Err(StoreError::Parse {
                path: path.to_path_buf(),
                line: record.position().map_or(0, |p| p.line()),
                message: format!("expected {} fields, saw {}", headers.len(), record.len()),
            });
        }
        let name = record.get(name_idx).unwrap_or_default().to_string();
        runs.push(&name, record.iter().map(str::to_string).collect::<Vec<_>>());
    }

    let sample = runs
        .into_map()
        .into_iter()
        .map(|(name, rows)| {
            let mut table = NstTable::new(headers.clone());
            for row in rows {
                table.push_row(row);
            }
            table.drop_columns(&[FILE_NAME, NUMBER]);
            (name, table)
        })
        .collect();
    Ok(sample)
}

/// Load the bulk subtitle sample `<root>/nst_sample/nst_<size>_text.csv` as
/// token lists.
///
/// A program's subtitle cells are joined with spaces and split again on any
/// whitespace, so tokens come out normalized regardless of how the export
/// broke its lines.
pub fn load_subtitles_from_bulk_sample(
    config: &Config,
    sample_size: usize,
) -> Result<SubtitledPrograms> {
    let path = config.bulk_sample_path(sample_size);
    let file = File::open(&path).map_err(|e| StoreError::io(&path, e))?;
    let mut reader = delimited_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| StoreError::csv(&path, e))?
        .clone();
    let name_idx = column_index(&path, &headers, FILE_NAME)?;
    let subtitle_idx = column_index(&path, &headers, SUBTITLE)?;

    let mut runs = Runs::new();
    for record in reader.records() {
        let record = record.map_err(|e| StoreError::csv(&path, e))?;
        let name = record.get(name_idx).unwrap_or_default();
        let subtitle = record.get(subtitle_idx).unwrap_or_default().to_string();
        runs.push(name, subtitle);
    }

    let programs = runs
        .into_runs()
        .into_iter()
        .map(|(name, subtitles)| {
            let tokens: Vec<String> = subtitles
                .join(" ")
                .split_whitespace()
                .map(str::to_string)
                .collect();
            (name, tokens)
        })
        .collect();
    Ok(programs)
}
