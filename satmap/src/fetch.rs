//! Blocking retrieval of remote resources.
//!
//! All network access in the pipeline goes through [`Fetch`], one request per
//! resource, no retries and no caching.

use crate::error::NetworkError;
use std::{collections::HashMap, fs, io::Read, time::Duration};
use tracing::debug;
use url::Url;

pub trait Fetch {
    fn fetch_text(&self, url: &Url) -> Result<String, NetworkError>;

    fn fetch_bytes(&self, url: &Url) -> Result<Vec<u8>, NetworkError>;
}

/// Schemes [`HttpFetcher`] can retrieve
pub const SUPPORTED_SCHEMES: &[&str] = &["http", "https", "file"];

/// HTTP(S) fetcher backed by a blocking `ureq` agent. `file` URLs are read
/// from the local file system.
pub struct HttpFetcher {
    agent: ureq::Agent,
}

impl HttpFetcher {
    pub fn new(timeout: Option<Duration>) -> Self {
        let mut builder = ureq::AgentBuilder::new();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        Self {
            agent: builder.build(),
        }
    }

    fn get(&self, url: &Url) -> Result<ureq::Response, NetworkError> {
        debug!(%url, "GET");
        self.agent
            .get(url.as_str())
            .call()
            .map_err(|e| NetworkError::Request {
                url: url.clone(),
                reason: e.to_string(),
            })
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Fetch for HttpFetcher {
    fn fetch_text(&self, url: &Url) -> Result<String, NetworkError> {
        if url.scheme() == "file" {
            let bytes = read_file(url)?;
            return String::from_utf8(bytes).map_err(|e| invalid_utf8(url, e));
        }
        self.get(url)?
            .into_string()
            .map_err(|source| NetworkError::Body {
                url: url.clone(),
                source,
            })
    }

    fn fetch_bytes(&self, url: &Url) -> Result<Vec<u8>, NetworkError> {
        if url.scheme() == "file" {
            return read_file(url);
        }
        let mut bytes = Vec::new();
        self.get(url)?
            .into_reader()
            .read_to_end(&mut bytes)
            .map_err(|source| NetworkError::Body {
                url: url.clone(),
                source,
            })?;
        Ok(bytes)
    }
}

fn read_file(url: &Url) -> Result<Vec<u8>, NetworkError> {
    let path = url.to_file_path().map_err(|()| NetworkError::Request {
        url: url.clone(),
        reason: "not a local file path".to_owned(),
    })?;
    debug!(path = %path.display(), "Reading");
    fs::read(&path).map_err(|source| NetworkError::File { path, source })
}

fn invalid_utf8(url: &Url, e: std::string::FromUtf8Error) -> NetworkError {
    NetworkError::Body {
        url: url.clone(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
    }
}

/// Serves canned responses from memory, for offline runs and tests.
/// Unknown URLs fail with [`NetworkError::NotFound`].
#[derive(Clone, Debug, Default)]
pub struct StaticFetcher {
    responses: HashMap<Url, Vec<u8>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<B: Into<Vec<u8>>>(mut self, url: Url, body: B) -> Self {
        self.insert(url, body);
        self
    }

    pub fn insert<B: Into<Vec<u8>>>(&mut self, url: Url, body: B) {
        self.responses.insert(url, body.into());
    }
}

impl Fetch for StaticFetcher {
    fn fetch_text(&self, url: &Url) -> Result<String, NetworkError> {
        let bytes = self.fetch_bytes(url)?;
        String::from_utf8(bytes).map_err(|e| invalid_utf8(url, e))
    }

    fn fetch_bytes(&self, url: &Url) -> Result<Vec<u8>, NetworkError> {
        self.responses
            .get(url)
            .cloned()
            .ok_or_else(|| NetworkError::NotFound(url.clone()))
    }
}
