/// Deterministic cache key builder
///
/// Every part is lower-cased, trimmed and stripped of punctuation; list parts
/// are sorted and de-duplicated so the same logical query always produces the
/// same key regardless of input order.
#[derive(Debug, Clone)]
pub struct CacheKey {
    namespace: &'static str,
    parts: Vec<String>,
}

impl CacheKey {
    pub fn new(namespace: &'static str) -> Self {
        Self {
            namespace,
            parts: Vec::new(),
        }
    }

    /// Append a single free-text part
    pub fn part(mut self, value: impl AsRef<str>) -> Self {
        self.parts.push(tidy_key_part(value.as_ref()));
        self
    }

    /// Append an order-insensitive list part
    pub fn sorted_parts<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tidied: Vec<String> = values
            .into_iter()
            .map(|v| tidy_key_part(v.as_ref()))
            .collect();
        tidied.sort();
        tidied.dedup();
        self.parts.push(tidied.join(","));
        self
    }

    pub fn build(self) -> String {
        let mut key = String::from(self.namespace);
        for part in self.parts {
            key.push(':');
            key.push_str(&part);
        }
        key
    }
}

/// Keep alphanumerics, fold whitespace runs to `_`, drop everything else
///
/// Queries differing only in punctuation share a key: `"o'neil"` and
/// `"oneil"` hit the same entry.
fn tidy_key_part(value: &str) -> String {
    value
        .trim()
        .to_lowercase()
        .split_whitespace()
        .map(|word| word.chars().filter(|c| c.is_alphanumeric()).collect::<String>())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_part_is_tidied() {
        let key = CacheKey::new("partial").part("  O'Brien, Pat ").build();
        assert_eq!(key, "partial:obrien_pat");
    }

    #[test]
    fn test_list_part_is_order_insensitive() {
        let a = CacheKey::new("runner")
            .sorted_parts(["John Smith - Pennine", "J Smith - PFR"])
            .build();
        let b = CacheKey::new("runner")
            .sorted_parts(["J Smith - PFR", "john smith - pennine"])
            .build();
        assert_eq!(a, b);
    }

    #[test]
    fn test_parts_follow_namespace() {
        let key = CacheKey::new("runner").part("x").part("y z").build();
        assert_eq!(key, "runner:x:y_z");
    }

    #[test]
    fn test_punctuation_variants_share_a_key() {
        assert_eq!(
            CacheKey::new("partial-name").part("o'neil").build(),
            CacheKey::new("partial-name").part("oneil").build()
        );
    }

    #[test]
    fn test_punctuation_only_part_becomes_empty() {
        let key = CacheKey::new("q").part("$$||").build();
        assert_eq!(key, "q:");
    }
}
