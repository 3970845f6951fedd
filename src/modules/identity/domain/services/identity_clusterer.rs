use super::club_matcher::ClubSimilarityMatcher;
use super::similarity_strategy::{DiceCoefficientStrategy, SimilarityStrategy};
use crate::modules::identity::domain::entities::RunnerIdentity;
use crate::modules::identity::domain::value_objects::NormalizedName;
use crate::modules::results::domain::RunnerClubCount;
use crate::shared::config::SearchConfig;

/// A matched name paired with one club it has raced for
#[derive(Debug, Clone, PartialEq)]
pub struct IdentityCandidate {
    pub name: NormalizedName,
    pub club: String,
    pub count: u32,
}

/// Greedy clustering of name/club candidates into runner identities
///
/// A candidate joins the first identity that either has the same display
/// name (ignoring case) and a similar club, or a display name scoring at
/// least the merge threshold and a club that is already listed or similar.
/// Otherwise it starts a new identity.
pub struct IdentityClusterer {
    name_strategy: Box<dyn SimilarityStrategy>,
    club_matcher: ClubSimilarityMatcher,
    name_merge_threshold: f64,
}

impl IdentityClusterer {
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            name_strategy: Box::new(DiceCoefficientStrategy),
            club_matcher: ClubSimilarityMatcher::new(config),
            name_merge_threshold: config.name_merge_threshold,
        }
    }

    pub fn with_strategy(
        name_strategy: Box<dyn SimilarityStrategy>,
        club_matcher: ClubSimilarityMatcher,
        name_merge_threshold: f64,
    ) -> Self {
        Self {
            name_strategy,
            club_matcher,
            name_merge_threshold,
        }
    }

    /// Pair each matched name with every club row recorded for it
    ///
    /// Club rows are walked in order; a name with no club rows gets a
    /// single `"Unknown"` candidate with a zero count so it still surfaces.
    pub fn candidates(
        &self,
        matches: &[NormalizedName],
        club_counts: &[RunnerClubCount],
    ) -> Vec<IdentityCandidate> {
        let mut candidates: Vec<IdentityCandidate> = Vec::new();

        for row in club_counts {
            let row_name = row.name.to_lowercase();
            for name in matches.iter().filter(|n| n.original.to_lowercase() == row_name) {
                let duplicate = candidates
                    .iter()
                    .any(|c| c.name.original == name.original && c.club == row.club);
                if !duplicate {
                    candidates.push(IdentityCandidate {
                        name: name.clone(),
                        club: row.club.clone(),
                        count: row.count,
                    });
                }
            }
        }

        for name in matches {
            if !candidates.iter().any(|c| c.name.original == name.original) {
                candidates.push(IdentityCandidate {
                    name: name.clone(),
                    club: "Unknown".to_string(),
                    count: 0,
                });
            }
        }

        candidates
    }

    /// Fold one candidate into the identity list
    ///
    /// Pure: returns the updated list and leaves the input untouched.
    pub fn merge_identity(
        &self,
        existing: &[RunnerIdentity],
        candidate: &IdentityCandidate,
    ) -> Vec<RunnerIdentity> {
        let mut identities = existing.to_vec();
        let display = candidate.name.display_lowercase();
        let tidied = self.club_matcher.tidy(&candidate.club);

        let target = identities.iter().position(|identity| {
            let identity_display = identity.display_name.to_lowercase();
            if identity_display == display {
                self.club_matcher
                    .any_similar(&[candidate.club.as_str()], &identity.club_names())
            } else if self.name_strategy.calculate(&display, &identity_display)
                >= self.name_merge_threshold
            {
                identity.has_club(&candidate.club)
                    || self
                        .club_matcher
                        .any_similar(&[candidate.club.as_str()], &identity.club_names())
            } else {
                false
            }
        });

        let identity = match target {
            Some(index) => &mut identities[index],
            None => {
                identities.push(RunnerIdentity::new(candidate.name.display.clone()));
                let last = identities.len() - 1;
                &mut identities[last]
            }
        };
        identity.add_original(&candidate.name.original);
        identity.add_club(&candidate.club, &tidied, candidate.count);

        identities
    }

    /// Cluster matched names using their club appearance counts
    pub fn cluster(
        &self,
        matches: &[NormalizedName],
        club_counts: &[RunnerClubCount],
    ) -> Vec<RunnerIdentity> {
        let identities = self
            .candidates(matches, club_counts)
            .iter()
            .fold(Vec::new(), |acc, candidate| self.merge_identity(&acc, candidate));

        log::debug!(
            "Clustered {} names into {} identities using {}",
            matches.len(),
            identities.len(),
            self.name_strategy.name()
        );
        identities
    }
}

impl Default for IdentityClusterer {
    fn default() -> Self {
        Self::new(&SearchConfig::default())
    }
}
