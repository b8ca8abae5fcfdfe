use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One stored paste.
///
/// Snippets have no id of their own: they are addressed by their position in
/// the store, which shifts whenever an earlier snippet is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Snippet {
    pub fn new(text: String) -> Self {
        Self {
            text,
            created_at: Utc::now(),
        }
    }

    /// Builds a snippet with a fixed timestamp (used when the caller owns the clock).
    pub fn at(text: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            text: text.into(),
            created_at,
        }
    }

    /// Human readable age, e.g. "33 seconds ago".
    pub fn relative_age(&self, now: DateTime<Utc>) -> String {
        let elapsed = now
            .signed_duration_since(self.created_at)
            .to_std()
            .unwrap_or_default();
        timeago::Formatter::new().convert(elapsed)
    }
}

/// A row of the `list` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedSnippet {
    pub index: usize,
    pub relative_age: String,
    pub text: String,
}

/// A single matching line returned by `grep`. Line numbers start at 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrepMatch {
    pub index: usize,
    pub line_number: usize,
    pub relative_age: String,
    pub line: String,
}
