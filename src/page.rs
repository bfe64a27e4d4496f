// src/page.rs
//! A page of the portal and the navigation steps we take from it.
//!
//! A `Page` starts out as a request (URL, params, method) and is fetched on
//! first use. Every lookup works on visible link text, the same way a person
//! clicks through the site: find the anchor labelled "Discipline", look at what
//! follows it, and so on.
//!
//! The markup we rely on:
//! - sections are anchors whose text is the section title; their content comes
//!   after the anchor as siblings (`<ul>` of options, `<div>` of export links);
//! - the search form holds `<input name="qv0">`, a `<select name="qf0">` and
//!   hidden state fields;
//! - the year facet carries `<input name="sy">`/`<input name="ey">` with the
//!   original bounds in an `orig` attribute.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use scraper::{ElementRef, Html};
use url::Url;

use crate::config::consts::*;
use crate::core::html::{self, ANCHOR, INPUT, LIST_ITEM, OPTION, SELECT};
use crate::core::net::{Method, Request};
use crate::core::sanitize::clean_filename;
use crate::error::{Error, Result};
use crate::file::write_export;
use crate::session::Session;

/// The element a page was reached through.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Origin {
    /// `a` or `form`
    pub tag: &'static str,
    /// Link text, or the submitted term for forms.
    pub text: String,
    /// Raw `href`/`action` as written in the markup.
    pub target: String,
}

pub struct Page {
    request: Request,
    origin: Option<Origin>,
    loaded: Option<(Url, Html)>,
}

impl fmt::Debug for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Page")
            .field("url", &self.request.url.as_str())
            .field("method", &self.request.method)
            .field("params", &self.request.params)
            .field("origin", &self.origin)
            .field("loaded", &self.loaded.is_some())
            .finish()
    }
}

impl Page {
    pub fn new(url: Url) -> Self {
        Self { request: Request::get(url), origin: None, loaded: None }
    }

    /// A page whose markup is already at hand; it will never be fetched.
    pub fn from_html(url: Url, markup: &str) -> Self {
        let doc = Html::parse_document(markup);
        Self { request: Request::get(url.clone()), origin: None, loaded: Some((url, doc)) }
    }

    fn linked(url: Url, text: String, href: &str) -> Self {
        Self {
            request: Request::get(url),
            origin: Some(Origin { tag: "a", text, target: href.to_string() }),
            loaded: None,
        }
    }

    pub fn url(&self) -> &Url {
        &self.request.url
    }

    pub fn request(&self) -> &Request {
        &self.request
    }

    pub fn origin(&self) -> Option<&Origin> {
        self.origin.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    /// Fetch now, even if already loaded.
    pub fn load(&mut self, session: &Session) -> Result<()> {
        self.loaded = Some(session.fetch_document(&self.request)?);
        Ok(())
    }

    /// Base URL and document, fetching on first use.
    fn ensure(&mut self, session: &Session) -> Result<(&Url, &Html)> {
        if self.loaded.is_none() {
            self.load(session)?;
        }
        match &self.loaded {
            Some((base, doc)) => Ok((base, doc)),
            None => Err(Error::missing("document", &self.request.url)),
        }
    }

    /// Every link whose text is exactly `target`, as unfetched pages.
    pub fn find_links(&mut self, session: &Session, target: &str) -> Result<Vec<Page>> {
        let (base, doc) = self.ensure(session)?;
        let mut pages = Vec::new();
        for a in html::anchors_with_text(doc, target) {
            let Some(href) = a.value().attr("href") else { continue };
            pages.push(Page::linked(html::resolve(base, href)?, target.to_string(), href));
        }
        Ok(pages)
    }

    /// First link whose text is exactly `target`, unfetched.
    pub fn find_link(&mut self, session: &Session, target: &str) -> Result<Page> {
        let url = self.ensure(session)?.0.to_string();
        self.find_links(session, target)?
            .into_iter()
            .next()
            .ok_or(Error::LinkNotFound { text: target.to_string(), url })
    }

    /// `find_link`, then fetch the result.
    pub fn follow(&mut self, session: &Session, target: &str) -> Result<Page> {
        let mut next = self.find_link(session, target)?;
        next.load(session)?;
        Ok(next)
    }

    /// Open a top-level section. While dumping, its CSV export is saved next to
    /// the page dumps as `<section>.csv`.
    pub fn open_section(&mut self, session: &Session, title: &str) -> Result<Page> {
        let mut next = self.follow(session, title)?;
        if let Some(dir) = session.dump_dir() {
            let path = dir.join(format!("{}.{DEFAULT_FORMAT}", clean_filename(title)));
            match next.export(session, title, DEFAULT_FORMAT, &path) {
                Ok(_) => {}
                Err(e @ (Error::LinkNotFound { .. } | Error::ElementNotFound { .. })) => {
                    logw!("no {DEFAULT_FORMAT} dump for section {title:?}: {e}");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(next)
    }

    /// Options listed under an open section: label → page.
    pub fn find_options(
        &mut self,
        session: &Session,
        section_title: &str,
    ) -> Result<BTreeMap<String, Page>> {
        let (base, doc) = self.ensure(session)?;
        let anchor = section_anchor(doc, base, section_title)?;

        let mut links = BTreeMap::new();
        for list in html::following_elements(anchor).filter(|e| e.value().name() == "ul") {
            for li in list.select(&LIST_ITEM) {
                let Some(a) = li.select(&ANCHOR).next() else { continue };
                let Some(href) = a.value().attr("href") else { continue };
                let label = html::text_content(a);
                let page = Page::linked(html::resolve(base, href)?, label.clone(), href);
                links.insert(label, page);
            }
        }
        Ok(links)
    }

    /// Years covered by the current result set, from the year facet inputs.
    pub fn find_year_range(&mut self, session: &Session) -> Result<RangeInclusive<i32>> {
        let (_, doc) = self.ensure(session)?;
        let year = |name: &'static str| -> Result<i32> {
            let value = html::find_named(doc.select(&INPUT), name)
                .and_then(|inp| inp.value().attr("orig"));
            value
                .and_then(|v| v.trim().parse().ok())
                .ok_or_else(|| Error::InvalidYear { name, value: value.map(str::to_string) })
        };
        Ok(year(START_YEAR_FIELD)?..=year(END_YEAR_FIELD)?)
    }

    /// Fill the search form with `term` and return the (unfetched) results page.
    ///
    /// Sends the term, the currently selected search range (falling back to
    /// full text) and every hidden field of the form.
    pub fn submit_term(&mut self, session: &Session, term: &str) -> Result<Page> {
        let (base, doc) = self.ensure(session)?;

        let input = html::find_named(doc.select(&INPUT), TERM_FIELD)
            .ok_or_else(|| Error::missing("search input", base))?;
        let form = html::ancestor_named(input, "form")
            .ok_or_else(|| Error::missing("search form", base))?;

        let search_range = html::find_named(doc.select(&SELECT), RANGE_FIELD)
            .and_then(|select| select.select(&OPTION).find(|o| o.value().attr("selected").is_some()))
            .map(option_value)
            .unwrap_or_else(|| DEFAULT_SEARCH_RANGE.to_string());

        let mut params = vec![
            (TERM_FIELD.to_string(), term.to_string()),
            (RANGE_FIELD.to_string(), search_range),
        ];
        for hidden in form.select(&INPUT) {
            let el = hidden.value();
            if !el.attr("type").is_some_and(|t| t.eq_ignore_ascii_case("hidden")) { continue; }
            let Some(name) = el.attr("name") else { continue };
            set_param(&mut params, name, el.attr("value").unwrap_or_default());
        }

        let action = form.value().attr("action").unwrap_or_default();
        let method = match form.value().attr("method") {
            Some(m) if m.eq_ignore_ascii_case("post") => Method::Post,
            _ => Method::Get,
        };

        Ok(Page {
            request: Request { method, url: html::resolve(base, action)?, params },
            origin: Some(Origin { tag: "form", text: term.to_string(), target: action.to_string() }),
            loaded: None,
        })
    }

    /// URL of the `data_format` export inside an open section.
    pub fn find_export_link(
        &mut self,
        session: &Session,
        section_title: &str,
        data_format: &str,
    ) -> Result<Url> {
        let (base, doc) = self.ensure(session)?;
        let anchor = section_anchor(doc, base, section_title)?;
        let block = html::next_sibling_named(anchor, "div")
            .ok_or_else(|| Error::missing("export block", base))?;
        let link = block
            .select(&ANCHOR)
            .find(|a| html::text_content(*a) == data_format)
            .ok_or_else(|| Error::missing("export link", base))?;
        let href = link.value().attr("href").ok_or_else(|| Error::missing("export href", base))?;
        Ok(html::resolve(base, href)?)
    }

    /// Download the section's export and write it to `output_file` untouched.
    pub fn export(
        &mut self,
        session: &Session,
        section_title: &str,
        data_format: &str,
        output_file: &Path,
    ) -> Result<PathBuf> {
        let url = self.find_export_link(session, section_title, data_format)?;
        download(session, url, output_file)
    }
}

/// Fetch `url` and write the body to `output_file` byte for byte.
pub fn download(session: &Session, url: Url, output_file: &Path) -> Result<PathBuf> {
    logd!("download <{url}>");
    let resp = session.fetch_export(&Request::get(url))?;
    logd!("writing {} ({} bytes)", output_file.display(), resp.body.len());
    write_export(output_file, &resp.body)?;
    Ok(output_file.to_path_buf())
}

fn section_anchor<'a>(doc: &'a Html, base: &Url, title: &'a str) -> Result<ElementRef<'a>> {
    html::anchors_with_text(doc, title)
        .next()
        .ok_or_else(|| Error::LinkNotFound { text: title.to_string(), url: base.to_string() })
}

/// `value` attribute, or the option's text when it has none.
fn option_value(option: ElementRef<'_>) -> String {
    match option.value().attr("value") {
        Some(v) => v.to_string(),
        None => html::text_content(option),
    }
}

/// Replace an existing param of the same name, else append.
fn set_param(params: &mut Vec<(String, String)>, name: &str, value: &str) {
    match params.iter_mut().find(|(k, _)| k == name) {
        Some(slot) => slot.1 = value.to_string(),
        None => params.push((name.to_string(), value.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::net::{Response, Transport};

    /// Any request is an error; proves fixture pages are never fetched.
    struct Offline;
    impl Transport for Offline {
        fn send(&self, req: &Request) -> Result<Response> {
            Err(Error::Status { status: 599, url: req.url.to_string() })
        }
    }

    fn offline() -> Session {
        Session::new(Box::new(Offline))
    }

    fn page(markup: &str) -> Page {
        let url = Url::parse("http://dfr.jstor.org/fsearch/submitrequest?view=x").unwrap();
        Page::from_html(url, markup)
    }

    #[test]
    fn find_link_resolves_href_against_page_url() {
        let mut p = page(r#"<ul><li><a href="lang?l=fr">French</a></li><li><a href="lang?l=en">English</a></li></ul>"#);
        let next = p.find_link(&offline(), "English").unwrap();
        assert_eq!(next.url().as_str(), "http://dfr.jstor.org/fsearch/lang?l=en");
        assert!(!next.is_loaded());
        let origin = next.origin().unwrap();
        assert_eq!((origin.tag, origin.text.as_str(), origin.target.as_str()), ("a", "English", "lang?l=en"));
    }

    #[test]
    fn find_link_missing_is_an_error() {
        let mut p = page(r#"<a href="/x">Englisch</a>"#);
        let err = p.find_link(&offline(), "English").unwrap_err();
        assert!(matches!(err, Error::LinkNotFound { ref text, .. } if text == "English"));
    }

    #[test]
    fn find_links_skips_anchors_without_href() {
        let mut p = page(r#"<a name="top">Language</a><a href="/a">Language</a><a href="/b">Language</a>"#);
        let found = p.find_links(&offline(), "Language").unwrap();
        let urls: Vec<_> = found.iter().map(|p| p.url().path().to_string()).collect();
        assert_eq!(urls, vec!["/a", "/b"]);
    }

    #[test]
    fn find_options_reads_lists_after_section() {
        let mut p = page(r#"
            <ul><li><a href="/ignored">Before</a></li></ul>
            <div class="facet">
              <a href="/toggle?f=disc">Discipline</a>
              <ul>
                <li><a href="/f?d=soc">Sociology</a> (120)</li>
                <li><a href="/f?d=ppa">Public Policy &amp; Administration</a></li>
              </ul>
              <ul><li><a href="/f?d=more">Statistics</a></li><li>no link</li></ul>
            </div>
        "#);
        let opts = p.find_options(&offline(), "Discipline").unwrap();
        assert_eq!(opts.len(), 3);
        assert_eq!(opts["Sociology"].url().as_str(), "http://dfr.jstor.org/f?d=soc");
        assert_eq!(opts["Public Policy & Administration"].url().query(), Some("d=ppa"));
        assert!(opts.contains_key("Statistics"));
        assert!(!opts.contains_key("Before"));
    }

    #[test]
    fn find_year_range_reads_orig() {
        let mut p = page(r#"<form><input name="sy" value="1950" orig="1665"><input name="ey" orig="2013"></form>"#);
        assert_eq!(p.find_year_range(&offline()).unwrap(), 1665..=2013);
    }

    #[test]
    fn find_year_range_missing_bound() {
        let mut p = page(r#"<input name="sy" orig="1665"><input name="ey" orig="soon">"#);
        let err = p.find_year_range(&offline()).unwrap_err();
        assert!(matches!(err, Error::InvalidYear { name: "ey", .. }));
    }

    #[test]
    fn submit_term_collects_form_state() {
        let mut p = page(r#"
            <form action="/fsearch/submitrequest" method="get">
              <input type="text" name="qv0" value="">
              <select name="qf0">
                <option value="ti">Title</option>
                <option value="au" selected>Author</option>
              </select>
              <input type="hidden" name="cs" value="disc:soc">
              <input type="HIDDEN" name="qf0" value="override">
              <input type="hidden" name="empty">
            </form>
        "#);
        let results = p.submit_term(&offline(), "civil war").unwrap();
        let req = results.request();
        assert_eq!(req.method, Method::Get);
        assert_eq!(req.url.as_str(), "http://dfr.jstor.org/fsearch/submitrequest");
        let params: Vec<(&str, &str)> = req.params.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        assert_eq!(params, vec![("qv0", "civil war"), ("qf0", "override"), ("cs", "disc:soc"), ("empty", "")]);
        assert_eq!(results.origin().unwrap().tag, "form");
    }

    #[test]
    fn submit_term_defaults_range_and_honours_post() {
        let mut p = page(r#"
            <form action="search" method="POST">
              <input name="qv0"><select name="qf0"><option value="ti">Title</option></select>
            </form>
        "#);
        let results = p.submit_term(&offline(), "war").unwrap();
        assert_eq!(results.request().method, Method::Post);
        assert_eq!(results.request().params[1], ("qf0".to_string(), "text".to_string()));
        assert_eq!(results.url().path(), "/fsearch/search");
    }

    #[test]
    fn submit_term_without_form() {
        let mut p = page(r#"<input name="qv0">"#);
        let err = p.submit_term(&offline(), "war").unwrap_err();
        assert!(matches!(err, Error::ElementNotFound { what: "search form", .. }));
    }

    #[test]
    fn find_export_link_uses_div_after_section() {
        let mut p = page(r#"
            <a href="/toggle?f=year">Year of Publication</a>
            <span>chart</span>
            <div class="export">
              <a href="/export?fmt=xml">xml</a>
              <a href="/export?fmt=csv&amp;f=year">csv</a>
            </div>
            <div><a href="/wrong">csv</a></div>
        "#);
        let url = p.find_export_link(&offline(), "Year of Publication", "csv").unwrap();
        assert_eq!(url.as_str(), "http://dfr.jstor.org/export?fmt=csv&f=year");
    }

    #[test]
    fn find_export_link_missing_format() {
        let mut p = page(r##"<a href="#">Year of Publication</a><div><a href="/x">xml</a></div>"##);
        let err = p.find_export_link(&offline(), "Year of Publication", "csv").unwrap_err();
        assert!(matches!(err, Error::ElementNotFound { what: "export link", .. }));
    }

    #[test]
    fn unloaded_page_fetches_through_session() {
        let mut p = Page::new(Url::parse("http://dfr.jstor.org/").unwrap());
        let err = p.find_link(&offline(), "Language").unwrap_err();
        assert!(matches!(err, Error::Status { status: 599, .. }));
    }

    #[test]
    fn set_param_overrides_in_place() {
        let mut params = vec![("a".to_string(), "1".to_string())];
        set_param(&mut params, "a", "2");
        set_param(&mut params, "b", "3");
        assert_eq!(params, vec![("a".into(), "2".into()), ("b".into(), "3".into())]);
    }

    /// Serves the same page for every URL.
    struct Always(&'static str);
    impl Transport for Always {
        fn send(&self, req: &Request) -> Result<Response> {
            Ok(Response { url: req.url.clone(), status: 200, body: self.0.as_bytes().to_vec() })
        }
    }

    #[test]
    fn open_section_without_csv_still_opens() {
        let dir = std::env::temp_dir().join(format!("dfr_page_nocsv_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        let session = Session::new(Box::new(Always(r#"<a href="/facet/disc">Discipline</a>"#)))
            .with_dump_dir(&dir);

        let mut p = page(r#"<a href="/facet/disc">Discipline</a>"#);
        let next = p.open_section(&session, "Discipline").unwrap();
        assert!(next.is_loaded());
        assert!(!dir.join("discipline.csv").exists());
    }
}
