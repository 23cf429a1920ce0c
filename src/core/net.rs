// src/core/net.rs
// HTTP/1.0 GET/HEAD over TCP (std-only, no TLS).
// HTTP/1.0 so the server closes the connection at the end (no chunked transfer).

use std::{io::{Read, Write}, net::TcpStream, time::Duration};

use chrono::{DateTime, Utc};

use crate::config::consts::{NET_TIMEOUT_SECS, USER_AGENT};
use crate::error::LoadError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Url {
    pub host: String,
    pub port: u16,
    pub path: String,
}

impl Url {
    /// `http://host[:port][/path]`. Anything else is `None`.
    pub fn parse(s: &str) -> Option<Url> {
        let rest = s.trim().strip_prefix("http://")?;
        let (authority, path) = match rest.find('/') {
            Some(i) => (&rest[..i], &rest[i..]),
            None => (rest, "/"),
        };
        let (host, port) = match authority.rsplit_once(':') {
            Some((h, p)) => (h, p.parse().ok()?),
            None => (authority, 80),
        };
        if host.is_empty() { return None; }
        Some(Url { host: s!(host), port, path: s!(path) })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method { Get, Head }

impl Method {
    fn as_str(self) -> &'static str {
        match self { Method::Get => "GET", Method::Head => "HEAD" }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Response {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Response {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn last_modified(&self) -> Option<DateTime<Utc>> {
        self.header("last-modified").and_then(parse_http_date)
    }
}

pub fn request(url: &Url, method: Method) -> Result<Response, LoadError> {
    let mut s = TcpStream::connect((url.host.as_str(), url.port))?;
    s.set_read_timeout(Some(Duration::from_secs(NET_TIMEOUT_SECS)))?;
    s.set_write_timeout(Some(Duration::from_secs(NET_TIMEOUT_SECS)))?;

    let req = format!(
        "{} {} HTTP/1.0\r\nHost: {}\r\nUser-Agent: {}\r\nCache-Control: no-cache\r\nConnection: close\r\n\r\n",
        method.as_str(), url.path, url.host, USER_AGENT
    );
    s.write_all(req.as_bytes())?;
    s.flush()?;

    let mut buf = Vec::new();
    s.read_to_end(&mut buf)?;
    let resp = parse_response(&buf)?;

    if !(200..300).contains(&resp.status) {
        return Err(LoadError::Transport(format!(
            "HTTP {} from {}:{}{}", resp.status, url.host, url.port, url.path
        )));
    }
    Ok(resp)
}

pub fn parse_response(raw: &[u8]) -> Result<Response, LoadError> {
    let head_end = raw
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .ok_or_else(|| LoadError::Transport(s!("Malformed HTTP response")))?;
    let head = String::from_utf8_lossy(&raw[..head_end]);
    let mut lines = head.split("\r\n");

    let status_line = lines.next().unwrap_or("");
    let status: u16 = status_line
        .split_whitespace()
        .nth(1)
        .and_then(|c| c.parse().ok())
        .ok_or_else(|| LoadError::Transport(format!("Bad status line: {}", status_line)))?;

    let headers = lines
        .filter_map(|l| l.split_once(':'))
        .map(|(k, v)| (s!(k.trim()), s!(v.trim())))
        .collect();

    Ok(Response { status, headers, body: raw[head_end + 4..].to_vec() })
}

/// HTTP-date (`Wed, 21 Oct 2015 07:28:00 GMT`) as UTC.
pub fn parse_http_date(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(s.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
