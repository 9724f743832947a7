//! Grammatical property decoding
//!
//! The upstream pages describe the grammar of a word in two different ways:
//!
//! - a long, comma-separated form used next to headwords (`"noun, masculine"`)
//! - a short, space-separated form used for inflections and translations (`"m pl"`)
//!
//! Both map onto the same [`WordProperties`] triple.

use serde::{Deserialize, Serialize};

const POS_FULL_NAMES: &[&str] = &[
    "noun",
    "noun as adjective",
    "verb",
    "adjective",
    "adjective / past participle",
    "adverb",
    "pronoun",
    "preposition",
    "conjunction",
    "interjection",
    "article",
];

const GENDER_FULL_NAMES: &[&str] = &["feminine", "masculine", "neuter"];

const PLURAL_FULL_NAMES: &[(&str, bool)] = &[("singular", false), ("plural", true)];

const POS_SHORT_NAMES: &[(&str, &str)] = &[
    ("n", "noun"),
    ("m", "noun"),
    ("f", "noun"),
    ("nt", "noun"),
    ("pl", "noun"),
    ("v", "verb"),
    ("adj", "adjective"),
    ("adv", "adverb"),
    ("pron", "pronoun"),
    ("prep", "preposition"),
    ("conj", "conjunction"),
    ("interj", "interjection"),
    ("art", "article"),
];

const GENDER_SHORT_NAMES: &[(&str, &str)] =
    &[("m", "masculine"), ("f", "feminine"), ("nt", "neuter")];

const PLURAL_SHORT_NAMES: &[(&str, bool)] = &[("sl", false), ("pl", true)];

/// Canonical abbreviation for each part of speech, used when rendering a triple.
const POS_ABBREVIATIONS: &[(&str, &str)] = &[
    ("noun", "n"),
    ("verb", "v"),
    ("adjective", "adj"),
    ("adverb", "adv"),
    ("pronoun", "pron"),
    ("preposition", "prep"),
    ("conjunction", "conj"),
    ("interjection", "interj"),
    ("article", "art"),
];

const PLURAL_SUFFIX: &str = "pl";

fn lookup<'a, T: Copy>(table: &'a [(&'a str, T)], key: &str) -> Option<T> {
    table
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, value)| *value)
}

fn reverse_lookup<'a>(table: &'a [(&'a str, &'a str)], value: &str) -> Option<&'a str> {
    table
        .iter()
        .find(|(_, full)| *full == value)
        .map(|(abbreviation, _)| *abbreviation)
}

/// Normalized (part of speech, gender, plural) descriptor of a word
///
/// A missing axis is an empty string or `false`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordProperties {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub pos: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub gender: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub plural: bool,
}

impl WordProperties {
    /// Parses the long form, e.g. `"adjective / past participle, masculine"`.
    ///
    /// Each comma-separated token sets at most one axis, checked in the order
    /// part of speech, gender, number. The first token to set an axis keeps it.
    pub fn parse_long(definition: &str) -> Self {
        let mut wp = WordProperties::default();
        let mut plural_seen = false;

        for chunk in definition.split(',') {
            let chunk = chunk.trim();

            if let Some(pos) = POS_FULL_NAMES.iter().find(|name| **name == chunk) {
                if wp.pos.is_empty() {
                    wp.pos = pos.to_string();
                }
            } else if let Some(gender) = GENDER_FULL_NAMES.iter().find(|name| **name == chunk) {
                if wp.gender.is_empty() {
                    wp.gender = gender.to_string();
                }
            } else if let Some(plural) = lookup(PLURAL_FULL_NAMES, chunk) {
                if !plural_seen {
                    wp.plural = plural;
                    plural_seen = true;
                }
            }
        }

        wp
    }

    /// Parses the short form, e.g. `"f pl"`.
    ///
    /// A single token may set several axes at once (`"m"` is a masculine noun),
    /// and a later token overwrites an earlier one on the same axis.
    pub fn parse_short(definition: &str) -> Self {
        let mut wp = WordProperties::default();

        for chunk in definition.split(' ') {
            let chunk = chunk.trim();

            if let Some(pos) = lookup(POS_SHORT_NAMES, chunk) {
                wp.pos = pos.to_string();
            }
            if let Some(gender) = lookup(GENDER_SHORT_NAMES, chunk) {
                wp.gender = gender.to_string();
            }
            if let Some(plural) = lookup(PLURAL_SHORT_NAMES, chunk) {
                wp.plural = plural;
            }
        }

        wp
    }

    /// Renders the triple back into the short form.
    ///
    /// Gender wins over part of speech, since a gender abbreviation already implies a noun.
    pub fn to_short_tag(&self) -> String {
        let main = reverse_lookup(GENDER_SHORT_NAMES, &self.gender)
            .or_else(|| lookup(POS_ABBREVIATIONS, &self.pos))
            .unwrap_or("");
        let suffix = if self.plural { PLURAL_SUFFIX } else { "" };

        format!("{main} {suffix}").trim().to_string()
    }

    /// True when neither part of speech nor gender is set. The plural flag is ignored.
    pub fn is_empty(&self) -> bool {
        self.pos.is_empty() && self.gender.is_empty()
    }

    /// True when at least one axis, the plural flag included, is set.
    pub fn has_any_axis(&self) -> bool {
        !self.is_empty() || self.plural
    }
}
