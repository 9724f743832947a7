use encoding_rs::{Encoding, UTF_8};
use reqwest::blocking::Client;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::network::cache::{Cache, CacheError};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unreadable Content-Type header: {0}")]
    InvalidHeader(#[from] reqwest::header::ToStrError),
}

/// Downloads pages as Unicode text, going through the cache first
#[derive(Clone)]
pub struct Session {
    cache: Option<Arc<dyn Cache>>,
    client: Client,
}

impl Session {
    pub fn new(cache: Option<Arc<dyn Cache>>) -> Session {
        Session {
            cache,
            client: Client::new(),
        }
    }

    pub fn cache(&self) -> Option<&Arc<dyn Cache>> {
        self.cache.as_ref()
    }

    /// Returns the page at `url` decoded to Unicode
    ///
    /// A cached copy is returned without touching the network. Otherwise the page is
    /// downloaded, transcoded from the charset declared in its `Content-Type` header
    /// (UTF-8 when missing or unknown), and the transcoded text is written back to the
    /// cache. Failing to write the cache is logged and ignored.
    pub fn fetch(&self, user_agent: &str, url: &str) -> Result<String, FetchError> {
        if let Some(cache) = &self.cache {
            match cache.get(url) {
                Ok((_, content)) => match String::from_utf8(content) {
                    Ok(text) => {
                        debug!("Cache hit for {}", url);
                        return Ok(text);
                    }
                    Err(e) => warn!("Cached page for {} is not valid UTF-8: {}", url, e),
                },
                Err(CacheError::NotFound) => info!("Cache miss for {}", url),
                Err(e) => warn!("Unable to read the cache for {}: {}", url, e),
            }
        }

        let (status_code, text) = self.download(user_agent, url).map_err(|e| {
            error!("HTTP error for {}: {}", url, e);
            e
        })?;

        if let Some(cache) = &self.cache {
            if let Err(e) = cache.set(url, status_code, text.as_bytes()) {
                warn!("Unable to populate the cache: {}", e);
            }
        }

        Ok(text)
    }

    fn download(&self, user_agent: &str, url: &str) -> Result<(u16, String), FetchError> {
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, user_agent)
            .send()?;

        let status_code = response.status().as_u16();
        if !response.status().is_success() {
            warn!("Upstream answered {} for {}", status_code, url);
        }

        let content_type = match response.headers().get(CONTENT_TYPE) {
            Some(value) => value.to_str()?.to_string(),
            None => String::new(),
        };
        let body = response.bytes()?;

        let encoding = detect_charset(&content_type);
        let (text, _, had_errors) = encoding.decode(&body);
        if had_errors {
            warn!(
                "Malformed {} sequences in {} were replaced",
                encoding.name(),
                url
            );
        }

        Ok((status_code, text.into_owned()))
    }
}

/// Picks the encoding declared in a `Content-Type` header value, falling back to UTF-8
pub fn detect_charset(content_type: &str) -> &'static Encoding {
    let (_media_type, charset) = parse_content_type(content_type);

    if charset.is_empty() {
        return UTF_8;
    }

    Encoding::for_label(charset.as_bytes()).unwrap_or_else(|| {
        warn!(
            "Unable to define charset in {}. Fall back to {}",
            content_type,
            UTF_8.name()
        );
        UTF_8
    })
}

/// Splits a `Content-Type` value into its media type and (unquoted) charset
pub fn parse_content_type(content_type: &str) -> (String, String) {
    let mut media_type = String::new();
    let mut charset = String::new();

    let parts: Vec<&str> = content_type.split(';').collect();

    if !parts.is_empty() {
        media_type = parts[0].trim().to_lowercase();
    }

    for part in parts.iter().skip(1) {
        let part = part.trim();
        if let Some((name, value)) = part.split_once('=') {
            if name.trim().eq_ignore_ascii_case("charset") {
                charset = value.trim().trim_matches('"').trim().to_string();
            }
        }
    }

    (media_type, charset)
}
