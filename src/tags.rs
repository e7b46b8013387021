//! Product Tags
//!
//! A small sorted, de-duplicated set of free-form labels attached to a product.

use std::{fmt, string::ToString};

use smallvec::SmallVec;

/// A string-based tag collection backed by `SmallVec<[String; 5]>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringTagCollection {
    tags: SmallVec<[String; 5]>,
}

impl StringTagCollection {
    /// Create a new collection, sorting and de-duplicating the given tags.
    #[must_use]
    pub fn new(tags: SmallVec<[String; 5]>) -> Self {
        let mut collection = Self { tags };

        collection.tags.retain(|tag| !tag.trim().is_empty());
        collection.tags.sort();
        collection.tags.dedup();

        collection
    }

    /// Create a new collection from string slices.
    pub fn from_strs(tags: &[&str]) -> Self {
        Self::new(tags.iter().map(ToString::to_string).collect())
    }

    /// An empty collection.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check if this collection contains a specific tag.
    pub fn contains(&self, tag: &str) -> bool {
        self.tags
            .binary_search_by(|probe| probe.as_str().cmp(tag))
            .is_ok()
    }

    /// Add a tag, keeping the collection sorted.
    pub fn add(&mut self, tag: &str) {
        if tag.trim().is_empty() {
            return;
        }

        if let Err(pos) = self.tags.binary_search_by(|probe| probe.as_str().cmp(tag)) {
            self.tags.insert(pos, tag.to_string());
        }
    }

    /// Remove a tag if present.
    pub fn remove(&mut self, tag: &str) {
        if let Ok(pos) = self.tags.binary_search_by(|probe| probe.as_str().cmp(tag)) {
            self.tags.remove(pos);
        }
    }

    /// Iterate over the tags in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    /// Check if this collection is empty.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Get the number of tags in this collection.
    pub fn len(&self) -> usize {
        self.tags.len()
    }
}

impl fmt::Display for StringTagCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tags.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_sorts_and_dedups() {
        let tags = StringTagCollection::from_strs(&["vegan", "isolate", "vegan", ""]);

        assert_eq!(tags.iter().collect::<Vec<_>>(), vec!["isolate", "vegan"]);
        assert_eq!(tags.len(), 2);
    }

    #[test]
    fn add_and_remove_keep_order() {
        let mut tags = StringTagCollection::from_strs(&["b"]);

        tags.add("a");
        tags.add("c");
        tags.add("a");
        tags.remove("b");
        tags.remove("missing");

        assert_eq!(tags.to_string(), "a, c");
    }

    #[test]
    fn contains_finds_existing_tags() {
        let tags = StringTagCollection::from_strs(&["keto", "gluten-free"]);

        assert!(tags.contains("keto"));
        assert!(!tags.contains("vegan"));
        assert!(StringTagCollection::empty().is_empty());
    }
}
