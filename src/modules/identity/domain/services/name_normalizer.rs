use super::text_pipeline::{split_surname_first, TextPipeline};
use crate::modules::identity::domain::value_objects::NormalizedName;
use crate::shared::utils::collapse_whitespace;

/// Turns raw runner names into display names and surname bucket keys
///
/// `"SMITH, John"` and `"john  smith"` both become `"John Smith"` with the
/// surname key `"smit"` (for a prefix length of 4).
pub struct NameNormalizer {
    pipeline: TextPipeline,
    bucket_prefix_length: usize,
}

impl NameNormalizer {
    pub fn new(bucket_prefix_length: usize) -> Self {
        Self {
            pipeline: TextPipeline::display_name(),
            bucket_prefix_length,
        }
    }

    /// Normalize a raw name
    ///
    /// Deterministic and total: empty or whitespace-only input yields an
    /// empty display and an empty surname key.
    pub fn normalize(&self, raw: &str) -> NormalizedName {
        let display = self.pipeline.apply(raw);
        let surname = Self::surname_of(raw);
        let surname_key = self.key_for(&surname);

        NormalizedName {
            display,
            original: raw.to_string(),
            surname_key,
            surname,
        }
    }

    /// Lowercased last token of the surname component
    ///
    /// For `"Surname, Given"` the surname component is the part before the
    /// comma; otherwise it is the whole name.
    pub fn surname_of(raw: &str) -> String {
        let lowered = raw.to_lowercase();
        let component = match split_surname_first(&lowered) {
            Some((surname, _)) => collapse_whitespace(surname),
            None => collapse_whitespace(&lowered),
        };
        component
            .rsplit(' ')
            .next()
            .unwrap_or_default()
            .to_string()
    }

    pub fn bucket_prefix_length(&self) -> usize {
        self.bucket_prefix_length
    }

    /// Bucket key for an arbitrary token
    pub fn key_for(&self, token: &str) -> String {
        token
            .to_lowercase()
            .chars()
            .take(self.bucket_prefix_length)
            .collect()
    }
}

impl Default for NameNormalizer {
    fn default() -> Self {
        Self::new(4)
    }
}
