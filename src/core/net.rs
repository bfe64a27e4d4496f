// src/core/net.rs
//! Blocking HTTP behind a small trait so navigation can run against fixtures.

use reqwest::blocking::Client;
use url::Url;

use crate::config::consts::USER_AGENT;
use crate::error::Result;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method { Get, Post }

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub url: Url,
    pub params: Vec<(String, String)>,
}

impl Request {
    pub fn get(url: Url) -> Self {
        Self { method: Method::Get, url, params: Vec::new() }
    }
}

#[derive(Debug)]
pub struct Response {
    /// Final URL after redirects.
    pub url: Url,
    pub status: u16,
    pub body: Vec<u8>,
}

impl Response {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

pub trait Transport {
    fn send(&self, req: &Request) -> Result<Response>;
}

pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .cookie_store(true)
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn send(&self, req: &Request) -> Result<Response> {
        let builder = match req.method {
            Method::Get => self.client.get(req.url.clone()).query(&req.params),
            Method::Post => self.client.post(req.url.clone()).form(&req.params),
        };
        let resp = builder.send()?;
        let url = resp.url().clone();
        let status = resp.status().as_u16();
        let body = resp.bytes()?.to_vec();
        Ok(Response { url, status, body })
    }
}
