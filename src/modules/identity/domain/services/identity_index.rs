use std::collections::BTreeMap;

use super::name_normalizer::NameNormalizer;
use crate::modules::identity::domain::value_objects::NormalizedName;

/// Runner names grouped by surname prefix
///
/// Buckets are keyed by `NormalizedName::surname_key` and hold names in
/// the order they were supplied. The index is immutable once built.
#[derive(Debug, Clone, Default)]
pub struct IdentityIndex {
    buckets: BTreeMap<String, Vec<NormalizedName>>,
    bucket_prefix_length: usize,
    len: usize,
}

impl IdentityIndex {
    /// Build from raw names, skipping blanks and exact duplicates
    pub fn build<S: AsRef<str>>(raw_names: &[S], normalizer: &NameNormalizer) -> Self {
        let mut buckets: BTreeMap<String, Vec<NormalizedName>> = BTreeMap::new();
        let mut len = 0;

        for raw in raw_names {
            let name = normalizer.normalize(raw.as_ref());
            if !name.is_indexable() {
                continue;
            }
            let bucket = buckets.entry(name.surname_key.clone()).or_default();
            if bucket.iter().any(|n| n.original == name.original) {
                continue;
            }
            bucket.push(name);
            len += 1;
        }

        log::debug!(
            "Built identity index: {} names in {} buckets",
            len,
            buckets.len()
        );

        Self {
            buckets,
            bucket_prefix_length: normalizer.bucket_prefix_length(),
            len,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn bucket(&self, key: &str) -> Option<&[NormalizedName]> {
        self.buckets.get(key).map(Vec::as_slice)
    }

    /// Names matching a partial query, at most `cap` of them
    ///
    /// The bucket token is the last word of the query. Candidates come from
    /// every bucket whose key starts with that token's prefix and are kept
    /// when their lowercased display starts with the query, or, for a
    /// one-word query, when their surname does. Results keep bucket order
    /// then insertion order.
    pub fn lookup(&self, partial: &str, cap: usize) -> Vec<NormalizedName> {
        let query = partial.split_whitespace().collect::<Vec<&str>>().join(" ");
        let query = query.to_lowercase();
        let Some(token) = query.rsplit(' ').next().filter(|t| !t.is_empty()) else {
            return Vec::new();
        };
        let single_word = !query.contains(' ');
        let prefix: String = token.chars().take(self.bucket_prefix_length).collect();

        self.buckets
            .range(prefix.clone()..)
            .take_while(|(key, _)| key.starts_with(&prefix))
            .flat_map(|(_, names)| names.iter())
            .filter(|name| {
                name.display_lowercase().starts_with(&query)
                    || (single_word && name.surname.starts_with(&query))
            })
            .take(cap)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(names: &[&str]) -> IdentityIndex {
        IdentityIndex::build(names, &NameNormalizer::default())
    }

    #[test]
    fn test_names_are_bucketed_by_surname_prefix() {
        let index = index(&["Smith, John", "John  Smith", "Smithson, Amy", "Lee, Ann"]);

        assert_eq!(index.len(), 4);
        assert_eq!(index.bucket_count(), 2);
        assert_eq!(index.bucket("smit").map(|b| b.len()), Some(3));
        assert_eq!(index.bucket("lee").map(|b| b.len()), Some(1));
    }

    #[test]
    fn test_blank_and_duplicate_names_are_skipped() {
        let index = index(&["", "  ", "Smith, John", "Smith, John"]);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_lookup_by_full_name_prefix() {
        let index = index(&["Smith, John", "John  Smith", "Smith, Jane", "Jones, John"]);
        let found = index.lookup("john smi", 20);

        let originals: Vec<&str> = found.iter().map(|n| n.original.as_str()).collect();
        assert_eq!(originals, vec!["Smith, John", "John  Smith"]);
    }

    #[test]
    fn test_lookup_by_surname_only() {
        let index = index(&["Smith, John", "Smithson, Amy", "Lee, Ann"]);
        let found = index.lookup("smith", 20);

        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|n| n.surname.starts_with("smith")));
    }

    #[test]
    fn test_lookup_spans_buckets_sharing_prefix() {
        let index = index(&["Lee, Ann", "Leeming, Bob"]);
        assert_eq!(index.bucket_count(), 2);
        assert_eq!(index.lookup("lee", 20).len(), 2);
    }

    #[test]
    fn test_lookup_respects_cap() {
        let names: Vec<String> = (0..30).map(|i| format!("Smith, Runner{i}")).collect();
        let index = IdentityIndex::build(&names, &NameNormalizer::default());

        let found = index.lookup("smith", 20);
        assert_eq!(found.len(), 20);
        assert_eq!(found[0].original, "Smith, Runner0");
    }

    #[test]
    fn test_lookup_unknown_prefix_is_empty() {
        let index = index(&["Smith, John"]);
        assert!(index.lookup("zzzz", 20).is_empty());
        assert!(index.lookup("   ", 20).is_empty());
    }

    #[test]
    fn test_lookup_ignores_case_and_spacing() {
        let index = index(&["Smith, John"]);
        assert_eq!(index.lookup("  JOHN   Smith ", 20).len(), 1);
    }
}
