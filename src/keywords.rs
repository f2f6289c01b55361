//! Phrase lists used by the text heuristics.
//!
//! The defaults match the Polish and English copy of the shop this watcher was
//! first deployed against. Other deployments override them through
//! `KEYWORDS_OUT` / `KEYWORDS_IN`.

const DEFAULT_UNAVAILABLE: &[&str] = &[
    "wyprzedany",
    "wyprzedane",
    "wyprzedana",
    "niedostępny",
    "niedostępne",
    "brak w magazynie",
    "sold out",
    "out of stock",
];

const DEFAULT_AVAILABLE: &[&str] = &[
    "dostępny",
    "dostępne",
    "na stanie",
    "in stock",
    "add to cart",
    "do koszyka",
    "kup teraz",
];

/// Ordered phrase lists. Order matters: the first phrase found wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordSet {
    unavailable: Vec<String>,
    available: Vec<String>,
}

impl KeywordSet {
    pub fn new<U, A, S>(unavailable: U, available: A) -> Self
    where
        U: IntoIterator<Item = S>,
        A: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            unavailable: normalize_phrases(unavailable),
            available: normalize_phrases(available),
        }
    }

    /// Builds a set from optional comma-separated overrides, falling back to
    /// the built-in list for whichever side is not given.
    pub fn from_overrides(unavailable: Option<&str>, available: Option<&str>) -> Self {
        let defaults = Self::default();
        Self {
            unavailable: unavailable
                .map(|csv| normalize_phrases(csv.split(',')))
                .filter(|list| !list.is_empty())
                .unwrap_or(defaults.unavailable),
            available: available
                .map(|csv| normalize_phrases(csv.split(',')))
                .filter(|list| !list.is_empty())
                .unwrap_or(defaults.available),
        }
    }

    pub fn unavailable(&self) -> &[String] {
        &self.unavailable
    }

    pub fn available(&self) -> &[String] {
        &self.available
    }

    /// First unavailable phrase contained in already-normalized `text`.
    pub fn find_unavailable(&self, text: &str) -> Option<&str> {
        find_in(&self.unavailable, text)
    }

    /// First available phrase contained in already-normalized `text`.
    pub fn find_available(&self, text: &str) -> Option<&str> {
        find_in(&self.available, text)
    }
}

impl Default for KeywordSet {
    fn default() -> Self {
        Self::new(DEFAULT_UNAVAILABLE.iter(), DEFAULT_AVAILABLE.iter())
    }
}

/// Collapses whitespace runs to one space, trims and lowercases.
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn normalize_phrases<I, S>(phrases: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    phrases
        .into_iter()
        .map(|p| normalize_text(p.as_ref()))
        .filter(|p| !p.is_empty())
        .collect()
}

fn find_in<'a>(phrases: &'a [String], text: &str) -> Option<&'a str> {
    phrases
        .iter()
        .find(|phrase| text.contains(phrase.as_str()))
        .map(String::as_str)
}
