use super::similarity_strategy::{DiceCoefficientStrategy, SimilarityStrategy};
use super::text_pipeline::TextPipeline;
use crate::shared::config::SearchConfig;

/// Club names that stand for "no real club"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClubAlias {
    Unknown,
    Unattached,
}

impl ClubAlias {
    /// Recognize blank, `"unknown"`, `"ua"`, `"u/a"` and `"unattached"`
    pub fn of(club: &str) -> Option<Self> {
        match club.trim().to_lowercase().as_str() {
            "" | "unknown" => Some(Self::Unknown),
            "ua" | "u/a" | "unattached" => Some(Self::Unattached),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Unattached => "Unattached",
        }
    }
}

/// Club label used when counting a runner's clubs
///
/// Blank clubs read `"Unknown"` and `ua`/`u/a` read `"Unattached"`; any
/// other club is returned as written.
pub fn canonical_club_label(club: &str) -> String {
    match club.trim().to_lowercase().as_str() {
        "" => ClubAlias::Unknown.label().to_string(),
        "ua" | "u/a" => ClubAlias::Unattached.label().to_string(),
        _ => club.to_string(),
    }
}

/// Exact club equality after trimming, ignoring case, treating aliases as equal
pub fn same_club(a: &str, b: &str) -> bool {
    match (ClubAlias::of(a), ClubAlias::of(b)) {
        (Some(x), Some(y)) => x == y,
        (None, None) => a.trim().to_lowercase() == b.trim().to_lowercase(),
        _ => false,
    }
}

/// Decides whether two club spellings refer to the same club
///
/// Works in the tidied space (lowercase, no periods, connectives and
/// hyphens flattened to spaces). Two multi-word clubs are compared on
/// their first words only. Otherwise a pair matches if any of these
/// passes: one club against the other's first word, the space-free forms,
/// an acronym against the other club, or the plain tidied forms.
pub struct ClubSimilarityMatcher {
    strategy: Box<dyn SimilarityStrategy>,
    tidy_pipeline: TextPipeline,
    token_threshold: f64,
    acronym_threshold: f64,
}

impl ClubSimilarityMatcher {
    pub fn new(config: &SearchConfig) -> Self {
        Self::with_strategy(
            Box::new(DiceCoefficientStrategy),
            config.club_token_threshold,
            config.club_acronym_threshold,
        )
    }

    pub fn with_strategy(
        strategy: Box<dyn SimilarityStrategy>,
        token_threshold: f64,
        acronym_threshold: f64,
    ) -> Self {
        Self {
            strategy,
            tidy_pipeline: TextPipeline::club_tidy(),
            token_threshold,
            acronym_threshold,
        }
    }

    /// Comparison form of a club name
    pub fn tidy(&self, club: &str) -> String {
        self.tidy_pipeline.apply(club)
    }

    /// Whether `a` and `b` name the same club
    pub fn similar(&self, a: &str, b: &str) -> bool {
        let (alias_a, alias_b) = (ClubAlias::of(a), ClubAlias::of(b));
        if let (Some(x), Some(y)) = (alias_a, alias_b) {
            return x == y;
        }

        let to = self.tidy(alias_a.map(|alias| alias.label()).unwrap_or(a));
        let added = self.tidy(alias_b.map(|alias| alias.label()).unwrap_or(b));
        let matched = self.similar_tidied(&to, &added);

        log::trace!(
            "Club similarity ({}): '{}' vs '{}' -> {}",
            self.strategy.name(),
            to,
            added,
            matched
        );
        matched
    }

    /// Whether any club of `a` is similar to any club of `b`
    pub fn any_similar<A, B>(&self, a: &[A], b: &[B]) -> bool
    where
        A: AsRef<str>,
        B: AsRef<str>,
    {
        a.iter()
            .any(|x| b.iter().any(|y| self.similar(x.as_ref(), y.as_ref())))
    }

    fn similar_tidied(&self, to: &str, added: &str) -> bool {
        let to_words = to.contains(' ');
        let added_words = added.contains(' ');
        let score = |x: &str, y: &str| self.strategy.calculate(x, y);

        if to_words && added_words {
            return score(first_word(to), first_word(added)) >= self.token_threshold;
        }

        if added_words && score(to, first_word(added)) >= self.token_threshold {
            return true;
        }
        if to_words && score(first_word(to), added) >= self.token_threshold {
            return true;
        }
        if score(&to.replace(' ', ""), &added.replace(' ', "")) >= self.token_threshold {
            return true;
        }
        if to_words && score(&acronym(to), added) >= self.acronym_threshold {
            return true;
        }
        if added_words && score(&acronym(added), to) >= self.acronym_threshold {
            return true;
        }

        score(to, added) >= self.token_threshold
    }
}

impl Default for ClubSimilarityMatcher {
    fn default() -> Self {
        Self::new(&SearchConfig::default())
    }
}

fn first_word(value: &str) -> &str {
    value.split(' ').next().unwrap_or(value)
}

/// First letter of each word
pub fn acronym(value: &str) -> String {
    value
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .collect()
}
