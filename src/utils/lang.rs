use crate::core::LingueeError;

/// Languages understood by the upstream dictionary, as (code, name) pairs
pub const LANGUAGES: [(&str, &str); 25] = [
    ("BG", "bulgarian"),
    ("CS", "czech"),
    ("DA", "danish"),
    ("DE", "german"),
    ("EL", "greek"),
    ("EN", "english"),
    ("ES", "spanish"),
    ("ET", "estonian"),
    ("FI", "finnish"),
    ("FR", "french"),
    ("HU", "hungarian"),
    ("IT", "italian"),
    ("JA", "japanese"),
    ("LT", "lithuanian"),
    ("LV", "latvian"),
    ("MT", "maltese"),
    ("NL", "dutch"),
    ("PL", "polish"),
    ("PT", "portuguese"),
    ("RO", "romanian"),
    ("RU", "russian"),
    ("SK", "slovak"),
    ("SL", "slovene"),
    ("SV", "swedish"),
    ("ZH", "chinese"),
];

/// A validated language: upper-case code plus the full name used in upstream URLs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
}

/// Looks the code up case-insensitively in [`LANGUAGES`]
pub fn validate_lang(code: &str) -> Result<Language, LingueeError> {
    let normalized_code = code.to_uppercase();

    LANGUAGES
        .iter()
        .find(|(known_code, _)| *known_code == normalized_code)
        .map(|&(code, name)| Language { code, name })
        .ok_or_else(|| LingueeError::validation(&format!("invalid language \"{code}\"")))
}
