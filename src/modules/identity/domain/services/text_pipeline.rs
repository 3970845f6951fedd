/// Transformation that can be applied to a name or club string
///
/// Each transformation is composable and testable in isolation.
pub trait TextTransformation: Send + Sync {
    fn transform(&self, text: &str) -> String;
    fn name(&self) -> &'static str;
}

/// Converts text to lowercase
#[derive(Debug, Clone)]
pub struct LowercaseTransform;

impl TextTransformation for LowercaseTransform {
    fn transform(&self, text: &str) -> String {
        text.to_lowercase()
    }

    fn name(&self) -> &'static str {
        "Lowercase"
    }
}

/// Normalizes whitespace (collapses multiple spaces, trims)
#[derive(Debug, Clone)]
pub struct NormalizeWhitespaceTransform;

impl TextTransformation for NormalizeWhitespaceTransform {
    fn transform(&self, text: &str) -> String {
        text.split_whitespace().collect::<Vec<&str>>().join(" ")
    }

    fn name(&self) -> &'static str {
        "NormalizeWhitespace"
    }
}

/// Turns `"Surname, Given"` into `"Given Surname"`
///
/// Only applies when the text holds exactly one comma.
#[derive(Debug, Clone)]
pub struct ReorderSurnameFirstTransform;

impl TextTransformation for ReorderSurnameFirstTransform {
    fn transform(&self, text: &str) -> String {
        match split_surname_first(text) {
            Some((surname, given)) => format!("{} {}", given.trim(), surname.trim())
                .trim()
                .to_string(),
            None => text.to_string(),
        }
    }

    fn name(&self) -> &'static str {
        "ReorderSurnameFirst"
    }
}

/// Upper-cases the first letter of each word
#[derive(Debug, Clone)]
pub struct TitleCaseTransform;

impl TextTransformation for TitleCaseTransform {
    fn transform(&self, text: &str) -> String {
        crate::shared::utils::upper_case_words(text)
    }

    fn name(&self) -> &'static str {
        "TitleCase"
    }
}

/// Removes every occurrence of the given characters
#[derive(Debug, Clone)]
pub struct StripCharsTransform {
    chars: Vec<char>,
}

impl StripCharsTransform {
    pub fn new(chars: &[char]) -> Self {
        Self {
            chars: chars.to_vec(),
        }
    }
}

impl TextTransformation for StripCharsTransform {
    fn transform(&self, text: &str) -> String {
        text.chars().filter(|c| !self.chars.contains(c)).collect()
    }

    fn name(&self) -> &'static str {
        "StripChars"
    }
}

/// Replaces each pattern with a single space
#[derive(Debug, Clone)]
pub struct ReplaceWithSpaceTransform {
    patterns: Vec<String>,
}

impl ReplaceWithSpaceTransform {
    pub fn new(patterns: Vec<String>) -> Self {
        Self { patterns }
    }
}

impl TextTransformation for ReplaceWithSpaceTransform {
    fn transform(&self, text: &str) -> String {
        let mut result = text.to_string();
        for pattern in &self.patterns {
            result = result.replace(pattern.as_str(), " ");
        }
        result
    }

    fn name(&self) -> &'static str {
        "ReplaceWithSpace"
    }
}

/// Split `"Surname, Given"` into its two parts when there is exactly one comma
pub fn split_surname_first(text: &str) -> Option<(&str, &str)> {
    if text.matches(',').count() != 1 {
        return None;
    }
    text.split_once(',')
}

/// Applies a pipeline of transformations in order
pub struct TextPipeline {
    transformations: Vec<Box<dyn TextTransformation>>,
}

impl TextPipeline {
    /// Create a new empty pipeline
    pub fn new() -> Self {
        Self {
            transformations: Vec::new(),
        }
    }

    /// Pipeline producing a runner's display name
    pub fn display_name() -> Self {
        Self::new()
            .with(LowercaseTransform)
            .with(ReorderSurnameFirstTransform)
            .with(NormalizeWhitespaceTransform)
            .with(TitleCaseTransform)
    }

    /// Pipeline producing the comparison form of a club name
    pub fn club_tidy() -> Self {
        Self::new()
            .with(LowercaseTransform)
            .with(StripCharsTransform::new(&['.']))
            .with(ReplaceWithSpaceTransform::new(vec![
                " and ".to_string(),
                "&".to_string(),
                "-".to_string(),
            ]))
            .with(NormalizeWhitespaceTransform)
    }

    /// Add a transformation to the end of the pipeline
    pub fn with(mut self, transformation: impl TextTransformation + 'static) -> Self {
        self.transformations.push(Box::new(transformation));
        self
    }

    /// Apply all transformations to the text
    pub fn apply(&self, text: &str) -> String {
        let mut result = text.to_string();

        for transformation in &self.transformations {
            result = transformation.transform(&result);
            log::trace!("After {}: '{}'", transformation.name(), result);
        }

        result
    }

    /// Get the number of transformations in the pipeline
    pub fn transformation_count(&self) -> usize {
        self.transformations.len()
    }
}

impl Default for TextPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reorder_surname_first() {
        let transform = ReorderSurnameFirstTransform;
        assert_eq!(transform.transform("smith, john"), "john smith");
        assert_eq!(transform.transform("smith,john"), "john smith");
        // Two commas: left alone
        assert_eq!(transform.transform("smith, john, jr"), "smith, john, jr");
        assert_eq!(transform.transform("john smith"), "john smith");
    }

    #[test]
    fn test_reorder_with_empty_given_name() {
        assert_eq!(ReorderSurnameFirstTransform.transform("smith,"), "smith");
    }

    #[test]
    fn test_strip_chars_transform() {
        let transform = StripCharsTransform::new(&['.']);
        assert_eq!(transform.transform("a.b. harriers"), "ab harriers");
    }

    #[test]
    fn test_replace_with_space_transform() {
        let transform = ReplaceWithSpaceTransform::new(vec!["&".into(), "-".into()]);
        assert_eq!(transform.transform("fell&dale-runners"), "fell dale runners");
    }

    #[test]
    fn test_empty_pipeline() {
        let pipeline = TextPipeline::new();
        assert_eq!(pipeline.apply("Smith"), "Smith");
        assert_eq!(pipeline.transformation_count(), 0);
    }

    #[test]
    fn test_display_name_pipeline() {
        let pipeline = TextPipeline::display_name();
        assert_eq!(pipeline.apply("SMITH, John"), "John Smith");
        assert_eq!(pipeline.apply("John   Smith"), "John Smith");
        assert_eq!(pipeline.transformation_count(), 4);
    }

    #[test]
    fn test_club_tidy_pipeline() {
        let pipeline = TextPipeline::club_tidy();
        assert_eq!(pipeline.apply(" A.B. Harriers "), "ab harriers");
        assert_eq!(pipeline.apply("Fell & Dale"), "fell dale");
        assert_eq!(pipeline.apply("Trail and Fell"), "trail fell");
        assert_eq!(pipeline.apply("Holmfirth-Harriers"), "holmfirth harriers");
    }
}
