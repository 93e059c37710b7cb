// Preprocessing pipelines: which rule method ran under which rule name.
//
// Pipeline files are written value-first: the header reads
// `Rule name;Rule method` and each row leads with the rule name, followed by
// the name of the method that implements it.

use std::path::PathBuf;

use super::{artifact_path, PIPELINE_COLUMNS};
use crate::codec::{self, Columns};
use crate::config::Config;
use crate::error::Result;

/// Something that can be recorded as the method behind a pipeline rule.
pub trait RuleMethod {
    /// Stable name of the method, as it should appear in the pipeline file.
    fn method_name(&self) -> String;
}

impl RuleMethod for str {
    fn method_name(&self) -> String {
        self.to_string()
    }
}

impl RuleMethod for String {
    fn method_name(&self) -> String {
        self.clone()
    }
}

impl<T: RuleMethod + ?Sized> RuleMethod for &T {
    fn method_name(&self) -> String {
        (**self).method_name()
    }
}

/// `<root>/<folder>/pipelines/<name>_pipeline.csv`
pub fn pipeline_path(config: &Config, relative_folder: &str, file_name: &str) -> PathBuf {
    artifact_path(
        config,
        relative_folder,
        "pipelines",
        &format!("{file_name}_pipeline.csv"),
    )
}

/// Write `(method, rule name)` pairs in order.
pub fn write_pipeline_file<R: RuleMethod>(
    config: &Config,
    relative_folder: &str,
    file_name: &str,
    pipeline: &[(R, String)],
) -> Result<()> {
    codec::write_value_key(
        pipeline_path(config, relative_folder, file_name),
        pipeline.iter().map(|(method, rule)| (method, rule)),
        PIPELINE_COLUMNS,
        |method| method.method_name(),
        |rule| rule.to_string(),
    )?;
    Ok(())
}

/// Read a pipeline back as `(method name, rule name)` pairs in file order.
pub fn load_pipeline_file(
    config: &Config,
    relative_folder: &str,
    file_name: &str,
) -> Result<Vec<(String, String)>> {
    // Columns are located by label, so reading method-first undoes the swap.
    let method_first = Columns::new(PIPELINE_COLUMNS.value, PIPELINE_COLUMNS.key);
    codec::read_pairs(
        pipeline_path(config, relative_folder, file_name),
        method_first,
        codec::text,
        codec::text,
    )
}
