// Workspace status display: configured paths and what exists under them.

use std::path::Path;

use colored::Colorize;

use crate::config::Config;
use crate::corpus::nst::list_corpus_files;

/// Display workspace status to the terminal.
pub fn show(config: &Config) {
    println!("Root: {}", describe_dir(&config.root_path));
    println!("NST export: {}", describe_dir(&config.nst_path));

    match list_corpus_files(config) {
        Ok(files) => {
            println!(
                "Corpus files ({}*.csv): {}",
                config.language_suffix,
                files.len()
            );
        }
        Err(_) => {
            println!("Corpus files: unavailable");
            println!("  Set NSTMINE_NST_PATH to the NST CSV export directory");
        }
    }

    let bulk = config.bulk_sample_path(config.sample_size);
    match std::fs::metadata(&bulk) {
        Ok(meta) => println!(
            "Bulk sample ({}): {} ({})",
            config.sample_size,
            bulk.display(),
            format_bytes(meta.len())
        ),
        Err(_) => println!(
            "Bulk sample ({}): {}",
            config.sample_size,
            "not found".dimmed()
        ),
    }
}

fn describe_dir(path: &Path) -> String {
    if path.is_dir() {
        format!("{} {}", path.display(), "(ok)".green())
    } else {
        format!("{} {}", path.display(), "(missing)".red())
    }
}

/// Human-readable size; bulk samples run from kilobytes into gigabytes.
fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 3] = ["KB", "MB", "GB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut size = bytes as f64 / 1024.0;
    let mut unit = 0;
    while size >= 1024.0 && unit + 1 < UNITS.len() {
        size /= 1024.0;
        unit += 1;
    }
    format!("{size:.1} {}", UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_bytes_picks_unit() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MB");
        assert_eq!(format_bytes(5 * 1024 * 1024 * 1024), "5.0 GB");
    }
}
