// src/config/options.rs
use std::path::PathBuf;

use super::consts::*;

/// Everything one run needs to know. Built by the CLI, or directly in tests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOptions {
    pub home: String,
    pub terms: TermSource,
    pub disciplines: Vec<String>,
    pub export: ExportOptions,
    pub verbose: bool,
    pub reset: bool,
    pub dump_dir: PathBuf,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            home: HOME.to_string(),
            terms: TermSource::default(),
            disciplines: DISCIPLINES.iter().map(|d| d.to_string()).collect(),
            export: ExportOptions::default(),
            verbose: false,
            reset: false,
            dump_dir: PathBuf::from(DEFAULT_DUMP_DIR),
        }
    }
}

impl RunOptions {
    /// Dump directory, only when verbose.
    pub fn dump_dir(&self) -> Option<&PathBuf> {
        self.verbose.then_some(&self.dump_dir)
    }
}

/// Where search terms come from: files, the command line, or both.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TermSource {
    pub files: Vec<PathBuf>,
    pub inline: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    /// Link text of the export format on the results page; also the file extension.
    pub format: String,
    pub out_dir: PathBuf,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: DEFAULT_FORMAT.to_string(),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
        }
    }
}

impl ExportOptions {
    /// `<out_dir>/<discipline>-<term>.<format>`
    pub fn out_path(&self, discipline: &str, term: &str) -> PathBuf {
        self.out_dir
            .join(crate::core::sanitize::output_file_name(discipline, term, &self.format))
    }
}
