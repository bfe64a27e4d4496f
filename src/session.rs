// src/session.rs
//! One scrape session: the transport plus the debug-dump policy.

use std::fs;
use std::path::{Path, PathBuf};

use scraper::Html;
use url::Url;

use crate::core::net::{Request, Response, Transport};
use crate::error::{Error, Result};
use crate::file::{ensure_directory, next_dump_path};

pub struct Session {
    transport: Box<dyn Transport>,
    dump_dir: Option<PathBuf>,
}

impl Session {
    pub fn new(transport: Box<dyn Transport>) -> Self {
        Self { transport, dump_dir: None }
    }

    /// Every fetched page (not export files) gets written under `dir` as `NNNN.html`.
    pub fn with_dump_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dump_dir = Some(dir.into());
        self
    }

    pub fn dump_dir(&self) -> Option<&Path> {
        self.dump_dir.as_deref()
    }

    /// Fetch a page; anything other than a 200 is an error. Dumped when dumping.
    pub fn fetch(&self, req: &Request) -> Result<Response> {
        let resp = self.send(req)?;
        if let Some(dir) = &self.dump_dir {
            ensure_directory(dir)?;
            let path = next_dump_path(dir);
            logd!("DUMP {}", path.display());
            fs::write(&path, &resp.body)?;
        }
        check_status(resp)
    }

    /// Fetch an export file. Same status rule as `fetch`, never dumped.
    pub fn fetch_export(&self, req: &Request) -> Result<Response> {
        check_status(self.send(req)?)
    }

    fn send(&self, req: &Request) -> Result<Response> {
        logd!("{:?} <{}> {:?}", req.method, req.url, req.params);
        let resp = self.transport.send(req)?;
        logd!("RESPONSE <{}>: {}", resp.url, resp.status);
        Ok(resp)
    }

    /// Fetch and parse. Returns the final URL alongside the document.
    pub fn fetch_document(&self, req: &Request) -> Result<(Url, Html)> {
        let resp = self.fetch(req)?;
        let doc = Html::parse_document(&resp.text());
        Ok((resp.url, doc))
    }
}

fn check_status(resp: Response) -> Result<Response> {
    if resp.status != 200 {
        return Err(Error::Status { status: resp.status, url: resp.url.to_string() });
    }
    Ok(resp)
}
