//! Search-term handling shared by every list loader.
//!
//! Searches are case-insensitive substring matches executed with
//! `ILIKE $n ESCAPE '\'`, so user input must have its wildcards escaped.

use serde::Deserialize;

/// `?query=` parameter accepted by list endpoints
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub query: Option<String>,
}

impl SearchQuery {
    /// ILIKE pattern for the term, or `None` to list everything
    pub fn pattern(&self) -> Option<String> {
        normalize_query(self.query.as_deref()).map(like_pattern)
    }
}

/// Trim the raw term; blank terms mean "no filter".
pub fn normalize_query(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|term| !term.is_empty())
}

/// Wrap a term in `%...%`, escaping LIKE metacharacters
pub fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
