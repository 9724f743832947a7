//! # Utilities
//!
//! - `lang` - the table of languages supported by the upstream dictionary

pub mod lang;

// Re-export commonly used items for convenience
pub use lang::{validate_lang, Language, LANGUAGES};
