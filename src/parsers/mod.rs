//! Parsers for dictionary pages
//!
//! - `autocompletions` - suggestion list to [`crate::types::Autocompletions`]
//! - `html` - DOM construction and path queries
//! - `search_result` - results page to [`crate::types::ApiResponse`]
//! - `word_properties` - grammar tags in long and short notation

pub mod autocompletions;
pub mod html;
pub mod search_result;
pub mod word_properties;

pub use autocompletions::parse_autocompletions;
pub use html::html_to_dom;
pub use search_result::{extract_audio_links, parse_search_result};
pub use word_properties::WordProperties;
