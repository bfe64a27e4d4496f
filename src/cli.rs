// src/cli.rs
use std::path::PathBuf;

use clap::Parser;

use crate::config::consts::{DEFAULT_DUMP_DIR, DEFAULT_FORMAT, DEFAULT_OUT_DIR, DISCIPLINES, HOME};
use crate::config::options::{ExportOptions, RunOptions, TermSource};
use crate::core::net::HttpTransport;
use crate::error::Result;
use crate::progress::Progress;
use crate::runner;
use crate::session::Session;

/// Download the JSTOR Data for Research CSV exports for a set of search terms,
/// one file per discipline and term.
#[derive(Parser, Debug)]
#[command(name = "dfr_scrape", version, about)]
pub struct Cli {
    /// Search terms to look up.
    #[arg(value_name = "TERM")]
    pub terms: Vec<String>,

    /// File listing terms to search for, one per line. Repeatable.
    #[arg(short = 't', long = "term-file", value_name = "TERM_FILE")]
    pub term_files: Vec<PathBuf>,

    /// The directory to store the output in.
    #[arg(short, long, value_name = "OUTPUT_DIR", default_value = DEFAULT_OUT_DIR)]
    pub output: PathBuf,

    /// Debug logging, plus a dump of every fetched page.
    #[arg(short, long)]
    pub verbose: bool,

    /// Clear the output directory (and the dump directory with --verbose) first.
    #[arg(short, long)]
    pub reset: bool,

    /// Discipline to export. Repeatable; defaults to the built-in list.
    #[arg(short, long = "discipline", value_name = "NAME")]
    pub disciplines: Vec<String>,

    /// Export format, as labelled on the results page. Also the file extension.
    #[arg(short, long, default_value = DEFAULT_FORMAT)]
    pub format: String,

    /// Portal home page.
    #[arg(long, env = "DFR_HOME", default_value = HOME)]
    pub home: String,

    /// Where page dumps go with --verbose.
    #[arg(long, value_name = "DIR", default_value = DEFAULT_DUMP_DIR)]
    pub dump_dir: PathBuf,

    /// Print the disciplines the site offers and exit.
    #[arg(long)]
    pub list_disciplines: bool,
}

impl Cli {
    pub fn into_options(self) -> RunOptions {
        let disciplines = if self.disciplines.is_empty() {
            DISCIPLINES.iter().map(|d| d.to_string()).collect()
        } else {
            self.disciplines
        };
        RunOptions {
            home: self.home,
            terms: TermSource { files: self.term_files, inline: self.terms },
            disciplines,
            export: ExportOptions { format: self.format, out_dir: self.output },
            verbose: self.verbose,
            reset: self.reset,
            dump_dir: self.dump_dir,
        }
    }
}

/// Prints status lines to stdout as the run goes.
#[derive(Default)]
pub struct ConsoleProgress {
    total: usize,
    done: usize,
}

impl ConsoleProgress {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
    }
    fn log(&mut self, msg: &str) {
        println!("{msg}");
    }
    fn item_done(&mut self, path: &std::path::Path) {
        self.done += 1;
        println!("[{}/{}] {}", self.done, self.total, path.display());
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let list_only = cli.list_disciplines;
    let options = cli.into_options();

    crate::log::init(options.verbose);

    let mut session = Session::new(Box::new(HttpTransport::new()?));
    if let Some(dir) = options.dump_dir() {
        session = session.with_dump_dir(dir.clone());
    }

    if list_only {
        for name in runner::list_disciplines(&options, &session)? {
            println!("{name}");
        }
        return Ok(());
    }

    let mut progress = ConsoleProgress::new();
    runner::run(&options, &session, Some(&mut progress)).map(|_| ())
}
