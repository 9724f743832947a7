use serde::Serialize;
use std::error::Error;
use std::fmt;
use std::sync::Arc;
use tracing::info;
use url::form_urlencoded;

use crate::network::cache::Cache;
use crate::network::session::{FetchError, Session};
use crate::parsers::search_result::parse_search_result;
use crate::types::ApiResponse;
use crate::utils::lang::{validate_lang, Language};

/// Default upstream origin
pub const DEFAULT_BASE_URL: &str = "https://www.linguee.com";

const PRODUCT_NAME: &str = "Linguee API";
const PROJECT_URL: &str = "https://github.com/imankulov/linguee-api";

/// Category of a [`LingueeError`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Bad language code or empty query; never reaches the network
    Validation,
    /// Network, transport or charset failure
    Fetch,
    /// Upstream has no results and no suggestion
    NotFound,
    /// Upstream has no results but suggests another spelling
    Correction,
    /// The page does not look like a results page anymore
    Structure,
}

impl ErrorKind {
    /// HTTP status code an outer layer should answer with
    pub fn status_code(self) -> u16 {
        match self {
            ErrorKind::Validation => 400,
            ErrorKind::Fetch => 502,
            ErrorKind::NotFound => 404,
            ErrorKind::Correction => 302,
            ErrorKind::Structure => 500,
        }
    }
}

/// Error returned by every public operation of the translator
///
/// `correction` is only ever set for [`ErrorKind::Correction`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LingueeError {
    pub kind: ErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correction: Option<String>,
}

impl LingueeError {
    fn new(kind: ErrorKind, msg: &str) -> LingueeError {
        LingueeError {
            kind,
            message: msg.to_string(),
            correction: None,
        }
    }

    pub fn validation(msg: &str) -> LingueeError {
        LingueeError::new(ErrorKind::Validation, msg)
    }

    pub fn fetch(msg: &str) -> LingueeError {
        LingueeError::new(ErrorKind::Fetch, msg)
    }

    pub fn not_found() -> LingueeError {
        LingueeError::new(ErrorKind::NotFound, "Term not found")
    }

    pub fn correction(correction: &str) -> LingueeError {
        LingueeError {
            kind: ErrorKind::Correction,
            message: "Another term found".to_string(),
            correction: Some(correction.to_string()),
        }
    }

    pub fn structure(msg: &str) -> LingueeError {
        LingueeError::new(ErrorKind::Structure, msg)
    }

    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }
}

impl fmt::Display for LingueeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.correction {
            Some(correction) => write!(f, "{} (did you mean \"{}\"?)", self.message, correction),
            None => write!(f, "{}", self.message),
        }
    }
}

impl Error for LingueeError {}

impl From<FetchError> for LingueeError {
    fn from(error: FetchError) -> Self {
        LingueeError::fetch(&error.to_string())
    }
}

/// What to translate and how
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TranslateRequest {
    pub query: String,
    pub src_lang: String,
    pub dst_lang: String,
    /// Let the upstream site pick the direction instead of pinning the source language
    pub guess_direction: bool,
    /// Follow a spelling suggestion once when the query itself has no results
    pub allow_correction: bool,
}

impl TranslateRequest {
    pub fn new(query: &str, src_lang: &str, dst_lang: &str) -> Self {
        TranslateRequest {
            query: query.to_string(),
            src_lang: src_lang.to_string(),
            dst_lang: dst_lang.to_string(),
            guess_direction: false,
            allow_correction: true,
        }
    }
}

/// Configuration of a [`Translator`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranslatorOptions {
    /// Upstream origin, without a trailing slash
    pub base_url: String,
    /// Identity of the caller, inserted into the User-Agent
    pub service_name: String,
}

impl Default for TranslatorOptions {
    fn default() -> Self {
        TranslatorOptions {
            base_url: DEFAULT_BASE_URL.to_string(),
            service_name: "localhost".to_string(),
        }
    }
}

/// Whether a failed lookup may still be retried with the suggested spelling
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CorrectionRetry {
    Allowed,
    Exhausted,
}

/// Validates requests, downloads result pages and parses them
#[derive(Clone)]
pub struct Translator {
    options: TranslatorOptions,
    session: Session,
}

impl Translator {
    pub fn new(options: TranslatorOptions, cache: Option<Arc<dyn Cache>>) -> Translator {
        Translator {
            options,
            session: Session::new(cache),
        }
    }

    pub fn options(&self) -> &TranslatorOptions {
        &self.options
    }

    pub fn user_agent(&self) -> String {
        user_agent(&self.options.service_name)
    }

    /// Looks `request.query` up in the dictionary
    ///
    /// When the page only offers a spelling suggestion and `allow_correction` is set,
    /// the suggestion is looked up instead, exactly once.
    pub fn translate(&self, request: &TranslateRequest) -> Result<ApiResponse, LingueeError> {
        let retry = if request.allow_correction {
            CorrectionRetry::Allowed
        } else {
            CorrectionRetry::Exhausted
        };
        self.translate_query(&request.query, request, retry)
    }

    fn translate_query(
        &self,
        query: &str,
        request: &TranslateRequest,
        retry: CorrectionRetry,
    ) -> Result<ApiResponse, LingueeError> {
        if query.trim().is_empty() {
            return Err(LingueeError::validation("empty query"));
        }
        let src_lang = validate_lang(&request.src_lang)?;
        let dst_lang = validate_lang(&request.dst_lang)?;

        let url = search_url(
            &self.options.base_url,
            query,
            src_lang,
            dst_lang,
            request.guess_direction,
        );
        info!("Send request: {}", url);

        let page = self.session.fetch(&self.user_agent(), &url)?;

        match parse_search_result(&page) {
            Err(LingueeError {
                kind: ErrorKind::Correction,
                correction: Some(suggestion),
                ..
            }) if retry == CorrectionRetry::Allowed => {
                info!("No results for \"{}\", retrying with \"{}\"", query, suggestion);
                self.translate_query(&suggestion, request, CorrectionRetry::Exhausted)
            }
            result => result,
        }
    }
}

/// User-Agent sent upstream on behalf of `service_name`
pub fn user_agent(service_name: &str) -> String {
    format!("{PRODUCT_NAME} proxy at {service_name} ({PROJECT_URL})")
}

/// Builds the results page URL, e.g.
/// `https://www.linguee.com/portuguese-english/search?query=obrigado&ajax=1&source=PT`
pub fn search_url(
    base_url: &str,
    query: &str,
    src_lang: Language,
    dst_lang: Language,
    guess_direction: bool,
) -> String {
    let encoded_query: String = form_urlencoded::byte_serialize(query.as_bytes()).collect();
    let mut url = format!(
        "{}/{}-{}/search?query={}&ajax=1",
        base_url.trim_end_matches('/'),
        src_lang.name,
        dst_lang.name,
        encoded_query
    );

    if !guess_direction {
        url.push_str("&source=");
        url.push_str(src_lang.code);
    }

    url
}
