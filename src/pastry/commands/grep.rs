use crate::model::{GrepMatch, Snippet};
use chrono::{DateTime, Utc};

/// Literal substring search over every line of every snippet.
///
/// Results come in store order, then line order. Lines are split on `\n`
/// only, so a trailing newline yields a final empty line (which an empty
/// term matches).
pub fn run(snippets: &[Snippet], term: &str, now: DateTime<Utc>) -> Vec<GrepMatch> {
    let mut matches = Vec::new();

    for (index, snippet) in snippets.iter().enumerate() {
        let mut age: Option<String> = None;
        for (line_idx, line) in snippet.text.split('\n').enumerate() {
            if line.contains(term) {
                let relative_age = age
                    .get_or_insert_with(|| snippet.relative_age(now))
                    .clone();
                matches.push(GrepMatch {
                    index,
                    line_number: line_idx + 1,
                    relative_age,
                    line: line.to_string(),
                });
            }
        }
    }

    matches
}
