//! Environment-based configuration
//!
//! Every setting is an [`EnvVar`] with a name, a default and a validating parser.
//! [`EnvConfig::from_env`] reads them all at once, and [`EnvConfig::build_cache`]
//! turns the cache settings into a ready-to-share cache backend.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::core::{TranslatorOptions, DEFAULT_BASE_URL};
use crate::network::cache::{Cache, CacheError, DbCache, MemoryCache};

/// Environment variable parsing error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvError {
    pub variable: String,
    pub message: String,
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Environment variable '{}': {}", self.variable, self.message)
    }
}

impl std::error::Error for EnvError {}

pub type EnvResult<T> = Result<T, EnvError>;

/// Typed accessor for one environment variable
pub trait EnvVar<T> {
    const NAME: &'static str;
    const DESCRIPTION: &'static str;

    fn default_value() -> T;

    fn parse(value: &str) -> EnvResult<T>;

    fn get() -> EnvResult<T> {
        match env::var(Self::NAME) {
            Ok(value) => Self::parse(&value),
            Err(_) => Ok(Self::default_value()),
        }
    }
}

fn invalid(variable: &str, message: String) -> EnvError {
    EnvError {
        variable: variable.to_string(),
        message,
    }
}

/// Which cache backend to use
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CacheBackend {
    None,
    Memory,
    Db,
}

pub struct CacheBackendVar;
impl EnvVar<CacheBackend> for CacheBackendVar {
    const NAME: &'static str = "LINGUEE_CACHE_BACKEND";
    const DESCRIPTION: &'static str = "Cache backend: memory, db, none";

    fn default_value() -> CacheBackend {
        CacheBackend::Memory
    }

    fn parse(value: &str) -> EnvResult<CacheBackend> {
        match value.trim().to_lowercase().as_str() {
            "memory" | "mem" => Ok(CacheBackend::Memory),
            "db" | "redb" | "disk" => Ok(CacheBackend::Db),
            "none" | "off" => Ok(CacheBackend::None),
            _ => Err(invalid(
                Self::NAME,
                format!("Invalid cache backend '{}'. Use: memory, db, none", value),
            )),
        }
    }
}

pub struct CachePath;
impl EnvVar<PathBuf> for CachePath {
    const NAME: &'static str = "LINGUEE_CACHE_PATH";
    const DESCRIPTION: &'static str = "Path of the on-disk cache database (db backend only)";

    fn default_value() -> PathBuf {
        Self::parse("~/.cache/linguee/cache.redb").unwrap_or_else(|_| PathBuf::from("cache.redb"))
    }

    fn parse(value: &str) -> EnvResult<PathBuf> {
        let value = value.trim();
        if value.is_empty() {
            return Err(invalid(Self::NAME, "Path must not be empty".to_string()));
        }

        shellexpand::full(value)
            .map(|expanded| PathBuf::from(expanded.as_ref()))
            .map_err(|e| invalid(Self::NAME, e.to_string()))
    }
}

pub struct ServiceName;
impl EnvVar<String> for ServiceName {
    const NAME: &'static str = "LINGUEE_SERVICE_NAME";
    const DESCRIPTION: &'static str = "Caller identity reported in the upstream User-Agent";

    fn default_value() -> String {
        "localhost".to_string()
    }

    fn parse(value: &str) -> EnvResult<String> {
        let name = value.trim();
        if name.is_empty() {
            Err(invalid(Self::NAME, "Service name must not be empty".to_string()))
        } else {
            Ok(name.to_string())
        }
    }
}

pub struct BaseUrl;
impl EnvVar<String> for BaseUrl {
    const NAME: &'static str = "LINGUEE_BASE_URL";
    const DESCRIPTION: &'static str = "Upstream dictionary origin";

    fn default_value() -> String {
        DEFAULT_BASE_URL.to_string()
    }

    fn parse(value: &str) -> EnvResult<String> {
        let url = value.trim();
        if url.starts_with("http://") || url.starts_with("https://") {
            Ok(url.trim_end_matches('/').to_string())
        } else {
            Err(invalid(
                Self::NAME,
                "Base URL must start with http:// or https://".to_string(),
            ))
        }
    }
}

pub struct LogLevel;
impl EnvVar<String> for LogLevel {
    const NAME: &'static str = "LINGUEE_LOG_LEVEL";
    const DESCRIPTION: &'static str = "Log level: trace, debug, info, warn, error";

    fn default_value() -> String {
        "info".to_string()
    }

    fn parse(value: &str) -> EnvResult<String> {
        match value.trim().to_lowercase().as_str() {
            level @ ("trace" | "debug" | "info" | "warn" | "error") => Ok(level.to_string()),
            _ => Err(invalid(
                Self::NAME,
                format!(
                    "Invalid log level '{}'. Use: trace, debug, info, warn, error",
                    value
                ),
            )),
        }
    }
}

/// All settings, read once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvConfig {
    pub cache_backend: CacheBackend,
    pub cache_path: PathBuf,
    pub service_name: String,
    pub base_url: String,
    pub log_level: String,
}

impl Default for EnvConfig {
    fn default() -> Self {
        EnvConfig {
            cache_backend: CacheBackendVar::default_value(),
            cache_path: CachePath::default_value(),
            service_name: ServiceName::default_value(),
            base_url: BaseUrl::default_value(),
            log_level: LogLevel::default_value(),
        }
    }
}

impl EnvConfig {
    pub fn from_env() -> EnvResult<Self> {
        Ok(EnvConfig {
            cache_backend: CacheBackendVar::get()?,
            cache_path: CachePath::get()?,
            service_name: ServiceName::get()?,
            base_url: BaseUrl::get()?,
            log_level: LogLevel::get()?,
        })
    }

    pub fn translator_options(&self) -> TranslatorOptions {
        TranslatorOptions {
            base_url: self.base_url.clone(),
            service_name: self.service_name.clone(),
        }
    }

    /// Opens the configured cache backend
    pub fn build_cache(&self) -> Result<Option<Arc<dyn Cache>>, CacheError> {
        match self.cache_backend {
            CacheBackend::None => Ok(None),
            CacheBackend::Memory => Ok(Some(Arc::new(MemoryCache::new()))),
            CacheBackend::Db => {
                if let Some(parent) = self.cache_path.parent() {
                    std::fs::create_dir_all(parent).map_err(|source| CacheError::CreateDir {
                        path: parent.to_path_buf(),
                        source,
                    })?;
                }
                Ok(Some(Arc::new(DbCache::open(&self.cache_path)?)))
            }
        }
    }
}

/// Markdown description of every supported variable
pub fn generate_env_docs() -> String {
    let rows = [
        (CacheBackendVar::NAME, CacheBackendVar::DESCRIPTION, "memory".to_string()),
        (
            CachePath::NAME,
            CachePath::DESCRIPTION,
            "~/.cache/linguee/cache.redb".to_string(),
        ),
        (ServiceName::NAME, ServiceName::DESCRIPTION, ServiceName::default_value()),
        (BaseUrl::NAME, BaseUrl::DESCRIPTION, BaseUrl::default_value()),
        (LogLevel::NAME, LogLevel::DESCRIPTION, LogLevel::default_value()),
    ];

    let mut docs = String::from("# Environment Variables\n\n");
    for (name, description, default) in rows {
        docs.push_str(&format!("- `{}`: {} (default: `{}`)\n", name, description, default));
    }
    docs
}
