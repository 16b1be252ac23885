//! Fixed glossary served by the dictionary lookup endpoint.

use std::collections::BTreeMap;

const ENTRIES: [(&str, &str); 3] = [
    ("Go", "A programming language created by Google."),
    ("Gopher", "A software engineer who builds with Go."),
    ("Golang", "Another name for Go."),
];

/// Returns every term with its definition, ordered by term.
pub fn entries() -> BTreeMap<&'static str, &'static str> {
    ENTRIES.into_iter().collect()
}

/// Looks up a single term. Matching is case-sensitive.
pub fn lookup(term: &str) -> Option<&'static str> {
    ENTRIES
        .iter()
        .find(|(t, _)| *t == term)
        .map(|(_, definition)| *definition)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_are_sorted() {
        let terms: Vec<_> = entries().into_keys().collect();
        assert_eq!(terms, vec!["Go", "Golang", "Gopher"]);
    }

    #[test]
    fn test_lookup() {
        assert_eq!(lookup("Golang"), Some("Another name for Go."));
        assert_eq!(lookup("golang"), None);
    }
}
