use std::time::Duration;

/// Tuned constants for identity resolution, autocomplete and race-name grouping
///
/// These values were tuned against real result data; the defaults are the
/// production values and must not drift.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    // Autocomplete limits
    /// Partial runner names shorter than this are rejected with an empty result
    pub min_partial_name_length: usize,

    /// Partial race names shorter than this are rejected with an empty result
    pub min_partial_race_length: usize,

    /// Number of surname characters used as the name-bucket key
    pub bucket_prefix_length: usize,

    /// First-N cap on autocomplete candidates (encounter order, not ranked)
    pub max_autocomplete_results: usize,

    // Similarity thresholds (Dice coefficient, 0.0 to 1.0)
    /// Display-name similarity needed to merge two differently spelt names
    pub name_merge_threshold: f64,

    /// Club token / whole-string similarity needed to call two clubs the same
    pub club_token_threshold: f64,

    /// Acronym similarity needed to call two clubs the same
    pub club_acronym_threshold: f64,

    /// Leading-words similarity needed to merge two race names
    pub race_name_threshold: f64,

    // Cache lifetimes
    /// TTL for the name index and the race metadata list
    pub name_index_ttl: Duration,

    /// TTL for shaped query results
    pub result_ttl: Duration,
}

impl SearchConfig {
    /// Creates a new configuration with the production defaults
    pub fn new() -> Self {
        Self {
            min_partial_name_length: 4,
            min_partial_race_length: 3,
            bucket_prefix_length: 4,
            max_autocomplete_results: 20,

            name_merge_threshold: 0.5,
            club_token_threshold: 0.5,
            club_acronym_threshold: 0.3,
            race_name_threshold: 0.8,

            name_index_ttl: Duration::from_secs(86_400),
            result_ttl: Duration::from_secs(86_400),
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("name_merge_threshold", self.name_merge_threshold),
            ("club_token_threshold", self.club_token_threshold),
            ("club_acronym_threshold", self.club_acronym_threshold),
            ("race_name_threshold", self.race_name_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{} must be between 0.0 and 1.0, got {}", name, value));
            }
        }

        if self.bucket_prefix_length == 0 {
            return Err("bucket_prefix_length must be > 0".to_string());
        }

        if self.max_autocomplete_results == 0 {
            return Err("max_autocomplete_results must be > 0".to_string());
        }

        if self.min_partial_name_length < self.bucket_prefix_length {
            return Err(format!(
                "min_partial_name_length ({}) cannot be shorter than bucket_prefix_length ({})",
                self.min_partial_name_length, self.bucket_prefix_length
            ));
        }

        Ok(())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for SearchConfig, used to carry process-level cache lifetimes
#[derive(Default)]
pub struct SearchConfigBuilder {
    config: SearchConfig,
}

impl SearchConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: SearchConfig::new(),
        }
    }

    pub fn result_ttl(mut self, ttl: Duration) -> Self {
        self.config.result_ttl = ttl;
        self
    }

    pub fn name_index_ttl(mut self, ttl: Duration) -> Self {
        self.config.name_index_ttl = ttl;
        self
    }

    pub fn build(self) -> Result<SearchConfig, String> {
        self.config.validate()?;
        Ok(self.config)
    }
}
