//! Ordered header multimap.
//!
//! Header names are matched ASCII case-insensitively. Every occurrence is
//! kept in the order it was received, so duplicate `Host` headers can be
//! detected and all `Expect` values can be walked.

/// A single header line as received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Header name, original case preserved
    pub name: String,
    /// Header value, surrounding whitespace already trimmed
    pub value: String,
}

impl Header {
    /// Returns true if this header's name matches `name` ignoring ASCII case.
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// Header multimap preserving receipt order and duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    entries: Vec<Header>,
}

impl HeaderMap {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Appends a header occurrence. Existing occurrences of the same name
    /// are kept.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push(Header {
            name: name.into(),
            value: value.into(),
        });
    }

    /// Position of the first occurrence of `name`.
    pub fn find_first(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|h| h.is_named(name))
    }

    /// Position of the next occurrence of `name` strictly after `pos`.
    pub fn find_next(&self, pos: usize, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .enumerate()
            .skip(pos + 1)
            .find(|(_, h)| h.is_named(name))
            .map(|(i, _)| i)
    }

    /// The header stored at `pos`, as returned by `find_first`/`find_next`.
    pub fn at(&self, pos: usize) -> Option<&Header> {
        self.entries.get(pos)
    }

    /// First occurrence of `name`.
    pub fn lookup(&self, name: &str) -> Option<&Header> {
        self.find_first(name).and_then(|pos| self.at(pos))
    }

    /// Value of the first occurrence of `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.lookup(name).map(|h| h.value.as_str())
    }

    /// Values of every occurrence of `name`, in receipt order.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |h| h.is_named(name))
            .map(|h| h.value.as_str())
    }

    /// Returns true if any occurrence of `name` lists `token` in its
    /// comma-separated value, compared ignoring ASCII case.
    ///
    /// ```
    /// # use reqguard::http::headers::HeaderMap;
    /// let mut headers = HeaderMap::new();
    /// headers.append("Connection", "Upgrade, Keep-Alive");
    /// assert!(headers.has_token("connection", "keep-alive"));
    /// assert!(!headers.has_token("connection", "close"));
    /// ```
    pub fn has_token(&self, name: &str, token: &str) -> bool {
        self.get_all(name)
            .flat_map(|v| v.split(','))
            .any(|t| t.trim().eq_ignore_ascii_case(token))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Header> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every header but keeps the allocation for the next request.
    pub fn reset(&mut self) {
        self.entries.clear();
    }

    /// Drops every header and releases the storage.
    pub fn clear(&mut self) {
        self.entries = Vec::new();
    }
}
