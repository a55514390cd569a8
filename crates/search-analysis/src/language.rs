//! Language resolution for stemming analyzers.

/// Languages the engine ships a snowball stemmer for.
pub const SNOWBALL_LANGUAGES: &[&str] = &[
    "Armenian",
    "Basque",
    "Catalan",
    "Danish",
    "Dutch",
    "English",
    "Finnish",
    "French",
    "German",
    "Hungarian",
    "Italian",
    "Kp",
    "Lovins",
    "Norwegian",
    "Porter",
    "Portuguese",
    "Romanian",
    "Russian",
    "Spanish",
    "Swedish",
    "Turkish",
];

/// English display name for an ISO-639-1 language code.
///
/// Only languages that can matter for stemmer selection are listed; anything
/// else resolves to `None` and the store falls back to the base analyzers.
pub fn language_name(code: &str) -> Option<&'static str> {
    let name = match code {
        "hy" => "Armenian",
        "eu" => "Basque",
        "ca" => "Catalan",
        "da" => "Danish",
        "nl" => "Dutch",
        "en" => "English",
        "fi" => "Finnish",
        "fr" => "French",
        "de" => "German",
        "hu" => "Hungarian",
        "it" => "Italian",
        "nb" | "nn" | "no" => "Norwegian",
        "pt" => "Portuguese",
        "ro" => "Romanian",
        "ru" => "Russian",
        "es" => "Spanish",
        "sv" => "Swedish",
        "tr" => "Turkish",
        _ => return None,
    };
    Some(name)
}

/// Snowball language for a code, when the engine supports stemming it.
pub fn snowball_language(code: &str) -> Option<&'static str> {
    language_name(code).filter(|name| SNOWBALL_LANGUAGES.contains(name))
}
