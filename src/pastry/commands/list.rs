use crate::model::{ListedSnippet, Snippet};
use chrono::{DateTime, Utc};

/// Every snippet, oldest first, with its current index.
pub fn run(snippets: &[Snippet], now: DateTime<Utc>) -> Vec<ListedSnippet> {
    snippets
        .iter()
        .enumerate()
        .map(|(index, s)| ListedSnippet {
            index,
            relative_age: s.relative_age(now),
            text: s.text.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::apples;

    #[test]
    fn lists_in_insertion_order_with_dense_indexes() {
        let snippets = apples();
        let listed = run(&snippets, Utc::now());

        let indexes: Vec<_> = listed.iter().map(|l| l.index).collect();
        let texts: Vec<_> = listed.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(indexes, vec![0, 1, 2]);
        assert_eq!(texts, vec!["one apple", "two apples", "three apple"]);
    }

    #[test]
    fn carries_relative_age() {
        let snippets = apples();
        let listed = run(&snippets, Utc::now());
        assert_eq!(listed[0].relative_age, "3 minutes ago");
        assert_eq!(listed[2].relative_age, "1 minute ago");
    }

    #[test]
    fn empty_store_lists_nothing() {
        assert!(run(&[], Utc::now()).is_empty());
    }
}
