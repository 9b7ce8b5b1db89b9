//! Resource matcher.
//!
//! Decides whether a desired resource already exists among the resources
//! fetched from the remote service. Matching is exact string equality on the
//! display name; when several resources share the name, the first one in
//! fetch order wins.

/// A remote resource identified by its display name.
pub trait Named {
    /// The display name used for matching.
    fn name(&self) -> &str;
}

/// Result of looking up a desired name among existing resources.
#[derive(Debug)]
pub enum NameMatch<'a, T> {
    /// No existing resource carries the name.
    Missing,
    /// Exactly one existing resource carries the name.
    Unique(&'a T),
    /// Several resources carry the name; `first` is the one to use.
    Ambiguous { first: &'a T, count: usize },
}

impl<'a, T> NameMatch<'a, T> {
    /// The resource to reuse, if any.
    pub fn existing(&self) -> Option<&'a T> {
        match self {
            NameMatch::Missing => None,
            NameMatch::Unique(found) => Some(*found),
            NameMatch::Ambiguous { first, .. } => Some(*first),
        }
    }

    /// True when more than one resource matched.
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, NameMatch::Ambiguous { .. })
    }
}

/// Finds `name` among `existing`, preserving fetch order.
pub fn find_by_name<'a, T: Named>(existing: &'a [T], name: &str) -> NameMatch<'a, T> {
    let mut matches = existing.iter().filter(|resource| resource.name() == name);

    match matches.next() {
        None => NameMatch::Missing,
        Some(first) => match matches.count() {
            0 => NameMatch::Unique(first),
            others => NameMatch::Ambiguous {
                first,
                count: others + 1,
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        name: String,
        id: usize,
    }

    impl Named for Item {
        fn name(&self) -> &str {
            &self.name
        }
    }

    fn items(names: &[&str]) -> Vec<Item> {
        names
            .iter()
            .enumerate()
            .map(|(id, name)| Item {
                name: name.to_string(),
                id,
            })
            .collect()
    }

    #[test]
    fn missing_when_list_is_empty() {
        let existing: Vec<Item> = Vec::new();
        assert!(find_by_name(&existing, "QA").existing().is_none());
    }

    #[test]
    fn unique_match_is_returned() {
        let existing = items(&["Production", "QA"]);
        let found = find_by_name(&existing, "QA");
        assert!(matches!(found, NameMatch::Unique(item) if item.id == 1));
        assert!(!found.is_ambiguous());
    }

    #[test]
    fn matching_is_case_sensitive() {
        let existing = items(&["qa"]);
        assert!(matches!(find_by_name(&existing, "QA"), NameMatch::Missing));
    }

    #[test]
    fn ambiguous_match_picks_first_in_fetch_order() {
        let existing = items(&["Dev", "app", "Dev", "Dev"]);
        match find_by_name(&existing, "Dev") {
            NameMatch::Ambiguous { first, count } => {
                assert_eq!(first.id, 0);
                assert_eq!(count, 3);
            }
            other => panic!("expected ambiguous match, got {:?}", other),
        }
    }

    proptest! {
        #[test]
        fn existing_is_first_item_with_name(
            names in proptest::collection::vec("[a-c]", 0..12),
            wanted in "[a-c]",
        ) {
            let existing: Vec<Item> = names
                .iter()
                .enumerate()
                .map(|(id, name)| Item { name: name.clone(), id })
                .collect();

            let expected = existing.iter().find(|item| item.name == wanted);
            let found = find_by_name(&existing, &wanted);

            prop_assert_eq!(found.existing(), expected);
            let count = existing.iter().filter(|item| item.name == wanted).count();
            prop_assert_eq!(found.is_ambiguous(), count > 1);
        }
    }
}
