//! # Response model
//!
//! Plain data types produced by the search result parser. Everything here is
//! constructed fresh for every request and never persisted.

use serde::{Deserialize, Serialize};

use crate::parsers::word_properties::WordProperties;

const AUDIO_BASE_URL: &str = "https://www.linguee.com/mp3";

/// Root structure of a parsed search result page
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    /// e.g. "pt"
    pub src_lang: String,
    /// e.g. "en"
    pub dst_lang: String,
    pub query: String,
    pub correct_query: String,
    pub exact_matches: Vec<Lemma>,
    /// Reserved. The upstream page carries inexact matches, but they are not extracted.
    pub inexact_matches: Vec<Lemma>,
    /// Set phrases built around the query, e.g. "muito obrigado"
    pub examples: Vec<ExamplePhrase>,
    pub real_examples: Vec<RealExample>,
}

/// One dictionary headword found for the query
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lemma {
    pub featured: bool,
    /// Rank weight, e.g. 1000 or 386
    pub wt: i32,
    /// e.g. "PT:obrigado49462"
    pub lemma_id: String,
    pub text: String,
    pub word_type: WordProperties,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grammar_info: Option<String>,
    pub audio_links: Vec<AudioLink>,
    pub forms: Vec<LemmaForm>,
    pub translations: Vec<Translation>,
}

/// Inflected variant of a lemma (feminine, plural, ...)
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LemmaForm {
    pub text: String,
    pub form_type: WordProperties,
}

/// Pronunciation audio path paired with its language variant
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioLink {
    /// e.g. "PT_BR/f5/f5491d72610965dd0a287c1ab1025c0f-300"
    pub url_part: String,
    /// e.g. "Brazilian Portuguese"
    pub lang: String,
}

impl AudioLink {
    /// Full URL of the mp3 file this link points to
    pub fn mp3_url(&self) -> String {
        format!("{AUDIO_BASE_URL}/{}.mp3", self.url_part)
    }
}

/// How often a translation is used, as flagged by the upstream page
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageFrequency {
    Often,
    AlmostAlways,
}

/// One target-language rendering of a lemma
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    pub featured: bool,
    pub text: String,
    /// e.g. "10003211476"
    pub bid: String,
    /// e.g. "EN:required5162"
    pub lemma_id: String,
    pub word_type: WordProperties,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_frequency: Option<UsageFrequency>,
    pub audio_links: Vec<AudioLink>,
    pub examples: Vec<TranslationExample>,
}

/// Dictionary-curated usage sample for a translation
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationExample {
    pub source: String,
    pub target: String,
}

/// Dictionary phrase listed under "Examples", with its own short translations
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamplePhrase {
    pub text: String,
    pub word_type: WordProperties,
    pub audio_links: Vec<AudioLink>,
    pub translations: Vec<ExamplePhraseTranslation>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamplePhraseTranslation {
    /// e.g. "big thanks"
    pub text: String,
    pub word_type: WordProperties,
}

/// Corpus-sourced bilingual sentence pair
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealExample {
    /// e.g. "row_0_8255523216_0"
    pub id: String,
    pub src: String,
    pub dst: String,
    /// Document the source sentence comes from
    pub url: String,
    /// Document the target sentence comes from
    pub dst_url: String,
}

/// Root structure of a parsed autocompletion page
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Autocompletions {
    pub autocompletions: Vec<AutocompletionItem>,
}

/// One suggested word with its most common translations
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutocompletionItem {
    /// e.g. "Katze"
    pub text: String,
    pub word_type: WordProperties,
    pub translations: Vec<AutocompletionTranslation>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutocompletionTranslation {
    /// e.g. "cat"
    pub text: String,
    pub word_type: WordProperties,
}
