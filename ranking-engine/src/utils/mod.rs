// Tag-set helpers shared by the gating and scoring layers.

use std::collections::HashSet;

/// True when any tag in `tags` is present in `set`.
pub fn tags_intersect(tags: &[String], set: &HashSet<String>) -> bool {
    tags.iter().any(|tag| set.contains(tag))
}

/// Number of distinct tags from `first ∪ second` present in `set`.
pub fn distinct_overlap(first: &[String], second: &[String], set: &HashSet<String>) -> usize {
    first
        .iter()
        .chain(second.iter())
        .filter(|tag| set.contains(*tag))
        .collect::<HashSet<_>>()
        .len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(tags: &[&str]) -> HashSet<String> {
        tags.iter().map(|t| t.to_string()).collect()
    }

    fn vec_of(tags: &[&str]) -> Vec<String> {
        tags.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_tags_intersect() {
        assert!(tags_intersect(&vec_of(&["a", "b"]), &set(&["b", "c"])));
        assert!(!tags_intersect(&vec_of(&["a"]), &set(&["b"])));
        assert!(!tags_intersect(&[], &set(&["a"])));
    }

    #[test]
    fn test_distinct_overlap_collapses_duplicates() {
        // "a" appears in both inputs but counts once
        let count = distinct_overlap(&vec_of(&["a", "b"]), &vec_of(&["a", "c"]), &set(&["a", "c"]));
        assert_eq!(count, 2);
    }

    #[test]
    fn test_distinct_overlap_empty_set() {
        assert_eq!(
            distinct_overlap(&vec_of(&["a"]), &vec_of(&["b"]), &HashSet::new()),
            0
        );
    }
}
