//! Content cache for downloaded pages
//!
//! Pages are stored as `(status code, zlib-compressed bytes)` under the SHA-256
//! hash of the exact URL they were fetched from. Two backends implement the
//! [`Cache`] capability:
//!
//! - [`MemoryCache`] keeps everything in process memory and never evicts
//! - [`DbCache`] keeps a single redb table on disk

use dashmap::DashMap;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use redb::{Database, ReadableTable, ReadableTableMetadata, TableDefinition};
use sha2::{Digest, Sha256};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Length of a cache key in bytes
pub const KEY_LENGTH: usize = 32;

/// Fixed-width cache key derived from a URL
pub type CacheKey = [u8; KEY_LENGTH];

/// `id -> (url, status_code, content)`
const PAGES_TABLE: TableDefinition<&[u8], (&str, u16, &[u8])> =
    TableDefinition::new("linguee_cache");

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("URL not in cache")]
    NotFound,
    #[error("unable to (de)compress cached content: {0}")]
    Io(#[from] std::io::Error),
    #[error("cache storage error: {0}")]
    Storage(#[from] redb::Error),
    #[error("unable to create cache directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

macro_rules! impl_storage_error {
    ($($error:ty),*) => {
        $(
            impl From<$error> for CacheError {
                fn from(error: $error) -> Self {
                    CacheError::Storage(error.into())
                }
            }
        )*
    };
}

impl_storage_error!(
    redb::DatabaseError,
    redb::TransactionError,
    redb::TableError,
    redb::StorageError,
    redb::CommitError
);

/// Storage for downloaded pages, keyed by the exact URL they came from
///
/// Implementations must be safe to share between threads; concurrent writes to
/// the same key resolve last-write-wins.
pub trait Cache: Send + Sync {
    /// Returns the status code and content stored for `url`
    fn get(&self, url: &str) -> Result<(u16, Vec<u8>), CacheError>;

    /// Stores `content` for `url`, replacing any previous record
    fn set(&self, url: &str, status_code: u16, content: &[u8]) -> Result<(), CacheError>;

    /// Removes every record
    fn clear(&self) -> Result<(), CacheError>;
}

impl<C: Cache + ?Sized> Cache for Arc<C> {
    fn get(&self, url: &str) -> Result<(u16, Vec<u8>), CacheError> {
        (**self).get(url)
    }

    fn set(&self, url: &str, status_code: u16, content: &[u8]) -> Result<(), CacheError> {
        (**self).set(url, status_code, content)
    }

    fn clear(&self) -> Result<(), CacheError> {
        (**self).clear()
    }
}

impl<C: Cache + ?Sized> Cache for Box<C> {
    fn get(&self, url: &str) -> Result<(u16, Vec<u8>), CacheError> {
        (**self).get(url)
    }

    fn set(&self, url: &str, status_code: u16, content: &[u8]) -> Result<(), CacheError> {
        (**self).set(url, status_code, content)
    }

    fn clear(&self) -> Result<(), CacheError> {
        (**self).clear()
    }
}

/// SHA-256 of the URL bytes; any difference in encoding or parameter order is a different key
pub fn cache_key(url: &str) -> CacheKey {
    Sha256::digest(url.as_bytes()).into()
}

pub fn compress(content: &[u8]) -> Result<Vec<u8>, CacheError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(content)?;
    Ok(encoder.finish()?)
}

pub fn decompress(compressed: &[u8]) -> Result<Vec<u8>, CacheError> {
    let mut content = Vec::new();
    ZlibDecoder::new(compressed).read_to_end(&mut content)?;
    Ok(content)
}

#[derive(Clone, Debug)]
struct MemoryCacheItem {
    status_code: u16,
    compressed_content: Vec<u8>,
}

/// Unbounded in-memory cache
///
/// Nothing is ever evicted, so memory grows with every distinct URL.
/// Meant for development and tests.
#[derive(Debug, Default)]
pub struct MemoryCache {
    items: DashMap<CacheKey, MemoryCacheItem>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Cache for MemoryCache {
    fn get(&self, url: &str) -> Result<(u16, Vec<u8>), CacheError> {
        let item = self
            .items
            .get(&cache_key(url))
            .map(|item| item.value().clone())
            .ok_or(CacheError::NotFound)?;

        Ok((item.status_code, decompress(&item.compressed_content)?))
    }

    fn set(&self, url: &str, status_code: u16, content: &[u8]) -> Result<(), CacheError> {
        let item = MemoryCacheItem {
            status_code,
            compressed_content: compress(content)?,
        };
        self.items.insert(cache_key(url), item);
        Ok(())
    }

    fn clear(&self) -> Result<(), CacheError> {
        self.items.clear();
        Ok(())
    }
}

/// Persistent cache backed by a single redb table
///
/// Rows are `(id, url, status_code, content)` with the hashed URL as primary key.
/// Every write is its own transaction, so an upsert of one key is atomic.
pub struct DbCache {
    database: Database,
}

impl DbCache {
    /// Opens (or creates) the database file and makes sure the table exists
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, CacheError> {
        let database = Database::create(path)?;

        let txn = database.begin_write()?;
        txn.open_table(PAGES_TABLE)?;
        txn.commit()?;

        Ok(Self { database })
    }

    /// Number of stored records
    pub fn len(&self) -> Result<u64, CacheError> {
        let txn = self.database.begin_read()?;
        let table = txn.open_table(PAGES_TABLE)?;
        Ok(table.len()?)
    }
}

impl Cache for DbCache {
    fn get(&self, url: &str) -> Result<(u16, Vec<u8>), CacheError> {
        let key = cache_key(url);
        let txn = self.database.begin_read()?;
        let table = txn.open_table(PAGES_TABLE)?;

        let row = table.get(key.as_slice())?.ok_or(CacheError::NotFound)?;
        let (_url, status_code, compressed_content) = row.value();

        Ok((status_code, decompress(compressed_content)?))
    }

    fn set(&self, url: &str, status_code: u16, content: &[u8]) -> Result<(), CacheError> {
        let key = cache_key(url);
        let compressed_content = compress(content)?;

        let txn = self.database.begin_write()?;
        {
            let mut table = txn.open_table(PAGES_TABLE)?;
            table.insert(key.as_slice(), (url, status_code, compressed_content.as_slice()))?;
        }
        txn.commit()?;

        Ok(())
    }

    fn clear(&self) -> Result<(), CacheError> {
        let txn = self.database.begin_write()?;
        txn.delete_table(PAGES_TABLE)?;
        txn.open_table(PAGES_TABLE)?;
        txn.commit()?;

        Ok(())
    }
}
