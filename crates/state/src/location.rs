//! Address bar access.

/// The query string of whatever shows the current URL.
pub trait LocationBar {
    /// Current query string, with or without the leading `?`.
    fn query(&self) -> String;

    /// Replaces the query string without adding a history entry or reloading.
    fn replace_query(&mut self, query: &str);
}

/// In-memory address bar, for tests and the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryLocationBar {
    query: String,
    writes: usize,
}

impl MemoryLocationBar {
    /// Starts with `query` in the bar.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            writes: 0,
        }
    }

    /// Number of `replace_query` calls so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl LocationBar for MemoryLocationBar {
    fn query(&self) -> String {
        self.query.clone()
    }

    fn replace_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.writes += 1;
    }
}

impl<L: LocationBar + ?Sized> LocationBar for &mut L {
    fn query(&self) -> String {
        (**self).query()
    }

    fn replace_query(&mut self, query: &str) {
        (**self).replace_query(query);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_bar_counts_writes() {
        let mut bar = MemoryLocationBar::new("?tab=1");
        assert_eq!(bar.query(), "?tab=1");
        bar.replace_query("tab=2");
        assert_eq!(bar.query(), "tab=2");
        assert_eq!(bar.writes(), 1);
    }
}
