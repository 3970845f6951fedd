pub mod club_matcher;
pub mod identity_clusterer;
pub mod identity_index;
pub mod name_normalizer;
pub mod similarity_strategy;
pub mod text_pipeline;

pub use club_matcher::{acronym, canonical_club_label, same_club, ClubAlias, ClubSimilarityMatcher};
pub use identity_clusterer::{IdentityCandidate, IdentityClusterer};
pub use identity_index::IdentityIndex;
pub use name_normalizer::NameNormalizer;
pub use similarity_strategy::{DiceCoefficientStrategy, SimilarityStrategy};
pub use text_pipeline::{TextPipeline, TextTransformation};
