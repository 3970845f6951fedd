use strsim::sorensen_dice;

/// Strategy for calculating similarity between two strings
///
/// This trait enables different similarity algorithms to be used interchangeably,
/// making the matchers testable and extensible.
pub trait SimilarityStrategy: Send + Sync {
    /// Calculate similarity between two strings
    ///
    /// Returns a value between 0.0 (completely different) and 1.0 (identical)
    fn calculate(&self, a: &str, b: &str) -> f64;

    /// Get the name of this strategy for logging/debugging
    fn name(&self) -> &'static str;
}

/// Bigram-overlap (Sørensen-Dice) similarity
///
/// Whitespace is ignored before scoring, so word-order and spacing noise in
/// hand-typed names costs little. Equal strings (including two empty ones)
/// score 1.0; any string shorter than two characters scores 0.0 against a
/// different string.
#[derive(Debug, Clone, Default)]
pub struct DiceCoefficientStrategy;

impl SimilarityStrategy for DiceCoefficientStrategy {
    fn calculate(&self, a: &str, b: &str) -> f64 {
        sorensen_dice(a, b)
    }

    fn name(&self) -> &'static str {
        "DiceCoefficient"
    }
}
