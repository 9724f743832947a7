//! # Linguee
//!
//! Looks words up on linguee.com and turns the results page into typed data:
//! lemmas with their forms and translations, plus real-world usage examples.
//!
//! ## Modules
//!
//! - `core` - request validation, the correction-retry orchestrator and errors
//! - `env` - configuration from `LINGUEE_*` environment variables
//! - `network` - page download with charset handling and the page cache
//! - `parsers` - HTML queries, the results page parser and grammar tags
//! - `types` - the response data model
//! - `utils` - supported languages

pub mod core;
pub mod env;
pub mod network;
pub mod parsers;
pub mod types;
pub mod utils;

// Re-export commonly used items for convenience
pub use self::core::*;
pub use network::*;
pub use parsers::*;
pub use types::*;
pub use utils::*;
