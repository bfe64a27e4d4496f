// src/error.rs
//! Error type shared by every stage of the scrape.
//!
//! Nothing here is recoverable: the runner stops at the first error and the
//! binary reports it.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The server answered with anything but 200.
    #[error("HTTP {status} from <{url}>")]
    Status { status: u16, url: String },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("bad URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No `<a>` with this exact text on the page.
    #[error("no link with text {text:?} on <{url}>")]
    LinkNotFound { text: String, url: String },

    /// Some other piece of markup we navigate by is missing.
    #[error("{what} not found on <{url}>")]
    ElementNotFound { what: &'static str, url: String },

    #[error("input {name:?} has no usable year (got {value:?})")]
    InvalidYear { name: &'static str, value: Option<String> },

    #[error("discipline {name:?} is not offered by the site")]
    DisciplineNotFound { name: String },

    #[error("no search terms given (pass terms or --term-file)")]
    NoTerms,

    #[error("path exists but is not a directory: {}", .path.display())]
    NotDirectory { path: PathBuf },
}

impl Error {
    pub(crate) fn missing(what: &'static str, url: &url::Url) -> Self {
        Error::ElementNotFound { what, url: url.to_string() }
    }
}
