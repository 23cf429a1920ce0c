// src/source.rs
//! Where the sheet comes from: a local file or a plain-HTTP URL.
//!
//! Each source can do a full fetch (body + modification time) and a cheap
//! metadata-only probe that the refresh controller polls.

use std::{fs, path::PathBuf, sync::Arc};

use chrono::{DateTime, Utc};

use crate::{
    core::net::{self, Method, Url},
    error::{ConfigError, LoadError},
};

/// Full body plus the modification time the source reported, if any.
#[derive(Clone, Debug)]
pub struct Fetched {
    pub text: String,
    pub modified: Option<DateTime<Utc>>,
}

pub trait Source: Send + Sync {
    /// Human-readable location for logs and the status line.
    fn describe(&self) -> String;

    fn fetch(&self) -> Result<Fetched, LoadError>;

    /// Modification time only, without downloading the body.
    fn probe(&self) -> Result<Option<DateTime<Utc>>, LoadError>;
}

/// Build a source from a config/CLI location string.
pub fn open(location: &str) -> Result<Arc<dyn Source>, ConfigError> {
    let loc = location.trim();
    if let Some(url) = Url::parse(loc) {
        return Ok(Arc::new(HttpSource { url }));
    }
    if loc.is_empty() || loc.contains("://") {
        return Err(ConfigError::UnsupportedSource(s!(loc)));
    }
    Ok(Arc::new(FileSource { path: PathBuf::from(loc) }))
}

fn decode_utf8(bytes: Vec<u8>) -> Result<String, LoadError> {
    String::from_utf8(bytes).map_err(|e| LoadError::Decode(format!("body is not UTF-8: {}", e)))
}

/* ---------------- Local file ---------------- */

#[derive(Clone, Debug)]
pub struct FileSource {
    pub path: PathBuf,
}

impl FileSource {
    fn mtime(&self) -> Result<Option<DateTime<Utc>>, LoadError> {
        let meta = fs::metadata(&self.path)
            .map_err(|e| LoadError::Transport(format!("{}: {}", self.path.display(), e)))?;
        Ok(meta.modified().ok().map(DateTime::<Utc>::from))
    }
}

impl Source for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> Result<Fetched, LoadError> {
        let modified = self.mtime()?;
        let bytes = fs::read(&self.path)
            .map_err(|e| LoadError::Transport(format!("{}: {}", self.path.display(), e)))?;
        Ok(Fetched { text: decode_utf8(bytes)?, modified })
    }

    fn probe(&self) -> Result<Option<DateTime<Utc>>, LoadError> {
        self.mtime()
    }
}

/* ---------------- HTTP ---------------- */

#[derive(Clone, Debug)]
pub struct HttpSource {
    pub url: Url,
}

impl Source for HttpSource {
    fn describe(&self) -> String {
        format!("http://{}:{}{}", self.url.host, self.url.port, self.url.path)
    }

    fn fetch(&self) -> Result<Fetched, LoadError> {
        let resp = net::request(&self.url, Method::Get)?;
        let modified = resp.last_modified();
        Ok(Fetched { text: decode_utf8(resp.body)?, modified })
    }

    fn probe(&self) -> Result<Option<DateTime<Utc>>, LoadError> {
        Ok(net::request(&self.url, Method::Head)?.last_modified())
    }
}
