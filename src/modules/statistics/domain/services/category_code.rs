use regex::Regex;

use crate::shared::utils::collapse_whitespace;

/// Category assumed when a runner has none
pub const DEFAULT_CATEGORY: &str = "M";

const SENIOR_MALE: &[&str] = &[
    "m", "male", "males", "men", "man", "ms", "sm", "msen", "m sen", "sen m", "msnr", "m snr",
    "mo", "m open", "mopen", "open m", "male open", "open male", "senior male", "male senior",
    "senior men", "men senior", "senior", "sen", "snr", "open",
];

const SENIOR_FEMALE: &[&str] = &[
    "f", "female", "females", "l", "lady", "ladies", "w", "women", "woman", "fs", "sf", "ls",
    "sl", "ws", "fsen", "f sen", "sen f", "lsen", "l sen", "wsen", "fsnr", "lsnr", "fo", "lo",
    "wo", "f open", "l open", "fopen", "lopen", "female open", "ladies open", "senior female",
    "female senior", "senior ladies", "ladies senior", "senior women", "women senior",
];

const JUNIOR_MALE: &[&str] = &[
    "mj", "jm", "mjun", "m jun", "jun m", "mjnr", "m jnr", "junior male", "male junior",
    "junior men", "men junior", "junior", "jun", "jnr", "boy", "boys",
];

const JUNIOR_FEMALE: &[&str] = &[
    "fj", "jf", "lj", "jl", "wj", "fjun", "f jun", "ljun", "l jun", "fjnr", "ljnr",
    "junior female", "female junior", "junior ladies", "ladies junior", "junior women",
    "women junior", "girl", "girls",
];

const MALE: &str = "(?:male|men|m)";
const FEMALE: &str = "(?:female|ladies|lady|women|f|l|w)";

/// One row of the category table
#[derive(Debug, Clone)]
pub enum CategoryRule {
    /// Any of `labels` maps to `code`
    Aliases {
        code: &'static str,
        labels: &'static [&'static str],
    },
    /// A full-label match expands `template` with the captured groups
    Pattern { regex: Regex, template: &'static str },
}

impl CategoryRule {
    pub fn aliases(code: &'static str, labels: &'static [&'static str]) -> Self {
        Self::Aliases { code, labels }
    }

    /// Anchored pattern rule; `pattern` must match the whole cleaned label
    pub fn pattern(pattern: &str, template: &'static str) -> Result<Self, regex::Error> {
        Ok(Self::Pattern {
            regex: Regex::new(&format!("^(?:{})$", pattern))?,
            template,
        })
    }

    fn apply(&self, cleaned: &str) -> Option<String> {
        match self {
            Self::Aliases { code, labels } => labels
                .iter()
                .any(|label| *label == cleaned)
                .then(|| code.to_string()),
            Self::Pattern { regex, template } => regex.captures(cleaned).map(|caps| {
                let mut code = String::new();
                caps.expand(template, &mut code);
                code
            }),
        }
    }
}

/// Ordered table mapping free-text category labels to canonical codes
///
/// Codes: `M`, `F`, `MJ`, `FJ`, `MV<nn>`, `FV<nn>`, `MU<nn>`, `FU<nn>`. The
/// first matching rule wins. Labels no rule recognizes fall back to their
/// first word upper-cased, and a blank label reads as `M`.
#[derive(Debug, Clone)]
pub struct CategoryRuleTable {
    rules: Vec<CategoryRule>,
}

impl CategoryRuleTable {
    pub fn with_rules(rules: Vec<CategoryRule>) -> Self {
        Self { rules }
    }

    pub fn standard() -> Self {
        let mut rules = vec![
            CategoryRule::aliases("M", SENIOR_MALE),
            CategoryRule::aliases("F", SENIOR_FEMALE),
            CategoryRule::aliases("MJ", JUNIOR_MALE),
            CategoryRule::aliases("FJ", JUNIOR_FEMALE),
        ];

        let patterns: Vec<(String, &'static str)> = vec![
            // Under-age bands
            (format!(r"{FEMALE}\s*u\s*(\d{{2}})"), "FU${1}"),
            (r"(?:mu|u)\s*(\d{2})".to_string(), "MU${1}"),
            (format!(r"{FEMALE}\s*(1[6-9]|2[0-3])"), "FU${1}"),
            (r"m\s*(1[6-9]|2[0-3])".to_string(), "MU${1}"),
            // Veterans
            (format!(r"(\d{{2}})\s*{FEMALE}\s*vets?"), "FV${1}"),
            (format!(r"(\d{{2}})\s*{MALE}\s*vets?"), "MV${1}"),
            (format!(r"v\s*(\d{{2}})\s*{FEMALE}"), "FV${1}"),
            (format!(r"v\s*(\d{{2}})\s*{MALE}"), "MV${1}"),
            (format!(r"{FEMALE}\s*v(?:et)?\s*(\d{{2}})"), "FV${1}"),
            (format!(r"{MALE}\s*v(?:et)?\s*(\d{{2}})"), "MV${1}"),
            (r"(?:vet|v)\s*(\d{2})".to_string(), "MV${1}"),
            (format!(r"{FEMALE}\s*(\d{{2}})"), "FV${1}"),
            (format!(r"{MALE}\s*(\d{{2}})"), "MV${1}"),
        ];

        for (pattern, template) in patterns {
            match CategoryRule::pattern(&pattern, template) {
                Ok(rule) => rules.push(rule),
                Err(e) => log::error!("Skipping category pattern '{}': {}", pattern, e),
            }
        }

        Self { rules }
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Lowercase, drop periods, turn `-` and `_` into spaces, collapse
    pub fn clean_label(label: &str) -> String {
        let cleaned: String = label
            .to_lowercase()
            .chars()
            .filter(|c| *c != '.')
            .map(|c| if c == '-' || c == '_' { ' ' } else { c })
            .collect();
        collapse_whitespace(&cleaned)
    }

    /// Canonical category code for a raw label
    pub fn tidy_category_name(&self, label: &str) -> String {
        let cleaned = Self::clean_label(label);
        if cleaned.is_empty() {
            return DEFAULT_CATEGORY.to_string();
        }

        self.rules
            .iter()
            .find_map(|rule| rule.apply(&cleaned))
            .unwrap_or_else(|| {
                label
                    .split_whitespace()
                    .next()
                    .unwrap_or(DEFAULT_CATEGORY)
                    .to_uppercase()
            })
    }
}

impl Default for CategoryRuleTable {
    fn default() -> Self {
        Self::standard()
    }
}
