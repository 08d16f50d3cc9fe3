//! Normalized tag sets.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use stockwise_core::ValueObject;

/// Set of lowercase tag labels.
///
/// Labels are trimmed and lowercased on insert; empty labels are dropped.
/// Ordering is irrelevant for equality and duplicates cannot exist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct TagSet(BTreeSet<String>);

impl TagSet {
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Normalize a raw label the way the set stores it.
    pub fn normalize(tag: &str) -> Option<String> {
        let tag = tag.trim().to_lowercase();
        if tag.is_empty() { None } else { Some(tag) }
    }

    /// Insert a label; returns `true` if it was not present yet.
    pub fn insert(&mut self, tag: impl AsRef<str>) -> bool {
        match Self::normalize(tag.as_ref()) {
            Some(tag) => self.0.insert(tag),
            None => false,
        }
    }

    pub fn contains(&self, tag: &str) -> bool {
        match Self::normalize(tag) {
            Some(tag) => self.0.contains(&tag),
            None => false,
        }
    }

    /// `true` when every label in `self` is also in `other`.
    pub fn is_subset(&self, other: &TagSet) -> bool {
        self.0.is_subset(&other.0)
    }

    /// Labels present in `self` but not in `other`.
    pub fn difference(&self, other: &TagSet) -> TagSet {
        Self(self.0.difference(&other.0).cloned().collect())
    }

    pub fn union(&self, other: &TagSet) -> TagSet {
        Self(self.0.union(&other.0).cloned().collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl ValueObject for TagSet {}

impl<S: AsRef<str>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = TagSet::new();
        set.extend(iter);
        set
    }
}

impl<S: AsRef<str>> Extend<S> for TagSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for tag in iter {
            self.insert(tag);
        }
    }
}

impl From<Vec<String>> for TagSet {
    fn from(value: Vec<String>) -> Self {
        value.into_iter().collect()
    }
}

impl From<TagSet> for Vec<String> {
    fn from(value: TagSet) -> Self {
        value.0.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a TagSet {
    type Item = &'a String;
    type IntoIter = std::collections::btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn labels_are_normalized_on_insert() {
        let tags: TagSet = ["  Candle ", "CANDLE", "soy-wax", ""].into_iter().collect();
        assert_eq!(tags.len(), 2);
        assert!(tags.contains("candle"));
        assert!(tags.contains("Soy-Wax"));
    }

    #[test]
    fn subset_ignores_order() {
        let small: TagSet = ["floral", "candle"].into_iter().collect();
        let big: TagSet = ["candle", "handmade", "floral"].into_iter().collect();
        assert!(small.is_subset(&big));
        assert!(!big.is_subset(&small));
        assert_eq!(big.difference(&small), ["handmade"].into_iter().collect::<TagSet>());
    }

    #[test]
    fn deserializing_normalizes_labels() {
        let tags: TagSet = serde_json::from_str(r#"["Floral", "floral", " gift "]"#).unwrap();
        let expected: TagSet = ["floral", "gift"].into_iter().collect();
        assert_eq!(tags, expected);
        assert_eq!(serde_json::to_string(&tags).unwrap(), r#"["floral","gift"]"#);
    }

    proptest! {
        /// Property: union never loses labels from either side.
        #[test]
        fn union_is_superset_of_both(
            a in proptest::collection::vec("[a-zA-Z-]{1,12}", 0..8),
            b in proptest::collection::vec("[a-zA-Z-]{1,12}", 0..8),
        ) {
            let a: TagSet = a.into_iter().collect();
            let b: TagSet = b.into_iter().collect();
            let u = a.union(&b);
            prop_assert!(a.is_subset(&u));
            prop_assert!(b.is_subset(&u));
            prop_assert_eq!(u.union(&a), u.clone());
        }
    }
}
