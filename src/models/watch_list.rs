use std::fmt;

/// Ordered list of manga names to watch for.
///
/// Terms are trimmed and empty terms are dropped, so `"Fairy, ,Dragon"`
/// yields `["Fairy", "Dragon"]`. Duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WatchList {
    terms: Vec<String>,
}

impl WatchList {
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let terms = terms
            .into_iter()
            .map(|t| t.as_ref().trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        Self { terms }
    }

    /// Parse a comma-separated list such as `MANGA_NAMES`.
    pub fn parse(csv: &str) -> Self {
        Self::new(csv.split(','))
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }
}

impl fmt::Display for WatchList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.terms.join(", "))
    }
}
