// src/runner.rs
//! The scrape itself: home → language → discipline → year facet → search → export.

use std::collections::BTreeMap;
use std::path::PathBuf;

use url::Url;

use crate::{
    config::consts::*,
    config::options::RunOptions,
    error::{Error, Result},
    file::{ensure_directory, reset_directory},
    page::{self, Page},
    progress::Progress,
    session::Session,
    terms,
};

/// Summary of what was produced.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub files_written: Vec<PathBuf>,
}

/// Run the whole scrape. `progress` can be None (no UI updates).
/// Stops at the first error; files already written stay on disk.
pub fn run(
    options: &RunOptions,
    session: &Session,
    mut progress: Option<&mut dyn Progress>,
) -> Result<RunSummary> {
    let out_dir = &options.export.out_dir;
    if options.reset {
        reset_directory(out_dir)?;
        if let Some(dump) = options.dump_dir() {
            reset_directory(dump)?;
        }
    } else {
        ensure_directory(out_dir)?;
    }

    let terms = terms::load(&options.terms)?;
    logf!("{} term(s), {} discipline(s)", terms.len(), options.disciplines.len());

    let mut disciplines = open_disciplines(options, session, &mut progress)?;

    if let Some(p) = progress.as_deref_mut() {
        p.begin(options.disciplines.len() * terms.len());
    }

    let mut written = Vec::with_capacity(options.disciplines.len() * terms.len());

    for name in &options.disciplines {
        let disc_page = disciplines
            .get_mut(name)
            .ok_or_else(|| Error::DisciplineNotFound { name: name.clone() })?;

        let mut years_open = disc_page.open_section(session, YEAR_SECTION)?;
        match years_open.find_year_range(session) {
            Ok(years) => logd!("{name}: years {}..={}", years.start(), years.end()),
            Err(e) => logd!("{name}: no year range ({e})"),
        }

        for term in &terms {
            say(&mut progress, &format!("search for term \"{term}\""));
            let mut term_page = years_open.submit_term(session, term)?;

            let out = options.export.out_path(name, term);
            say(&mut progress, &format!("select discipline \"{name}\" and open year of publication"));
            let url = term_page.find_export_link(session, YEAR_SECTION, &options.export.format)?;
            say(&mut progress, &format!("download <{url}>"));
            say(&mut progress, &format!("writing {}", out.display()));
            let path = page::download(session, url, &out)?;

            if let Some(p) = progress.as_deref_mut() {
                p.item_done(&path);
            }
            written.push(path);
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    logf!("wrote {} file(s) to {}", written.len(), out_dir.display());

    Ok(RunSummary { files_written: written })
}

/// Discipline labels the site currently offers.
pub fn list_disciplines(options: &RunOptions, session: &Session) -> Result<Vec<String>> {
    let disciplines = open_disciplines(options, session, &mut None)?;
    Ok(disciplines.into_keys().collect())
}

/// Home → Language → English → Discipline; returns the discipline options.
fn open_disciplines(
    options: &RunOptions,
    session: &Session,
    progress: &mut Option<&mut dyn Progress>,
) -> Result<BTreeMap<String, Page>> {
    let mut root = Page::new(Url::parse(&options.home)?);

    say(progress, "open language");
    let mut lang = root.open_section(session, LANGUAGE_SECTION)?;

    say(progress, "select english");
    let mut eng = lang.follow(session, ENGLISH_LINK)?;

    say(progress, "open discipline");
    let mut disc = eng.open_section(session, DISCIPLINE_SECTION)?;
    let disciplines = disc.find_options(session, DISCIPLINE_SECTION)?;

    logd!("DISCIPLINE LINKS");
    for (label, option) in &disciplines {
        logd!("  {label} -> <{}>", option.url());
    }
    Ok(disciplines)
}

fn say(progress: &mut Option<&mut dyn Progress>, msg: &str) {
    logd!("{msg}");
    if let Some(p) = progress.as_deref_mut() {
        p.log(msg);
    }
}
