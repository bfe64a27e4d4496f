// src/terms.rs

use std::{collections::BTreeSet, fs};

use crate::config::options::TermSource;
use crate::error::{Error, Result};

/// Search terms from every term file plus the inline ones.
/// Deduplicated and sorted; blank lines are dropped.
pub fn load(source: &TermSource) -> Result<Vec<String>> {
    let mut terms = BTreeSet::new();
    for path in &source.files {
        let text = fs::read_to_string(path)?;
        terms.extend(parse_file(&text));
    }
    terms.extend(
        source.inline.iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string),
    );

    if terms.is_empty() {
        return Err(Error::NoTerms);
    }
    Ok(terms.into_iter().collect())
}

/// One term per line.
fn parse_file(text: &str) -> impl Iterator<Item = String> + '_ {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn tmp_file(name: &str, contents: &str) -> PathBuf {
        let mut p = std::env::temp_dir();
        p.push(format!("dfr_terms_{}_{}", name, std::process::id()));
        fs::write(&p, contents).unwrap();
        p
    }

    #[test]
    fn merges_files_and_inline_sorted() {
        let a = tmp_file("a", "war\n  peace \r\n\nrevolution\n");
        let b = tmp_file("b", "peace\nclass\n");
        let source = TermSource { files: vec![a, b], inline: vec!["war".into(), " empire ".into()] };
        assert_eq!(load(&source).unwrap(), vec!["class", "empire", "peace", "revolution", "war"]);
    }

    #[test]
    fn empty_sources_are_an_error() {
        let blank = tmp_file("blank", "\n   \n");
        let source = TermSource { files: vec![blank], inline: vec![" ".into()] };
        assert!(matches!(load(&source), Err(Error::NoTerms)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let source = TermSource { files: vec![PathBuf::from("/nonexistent/dfr/terms.txt")], inline: vec![] };
        assert!(matches!(load(&source), Err(Error::Io(_))));
    }
}
