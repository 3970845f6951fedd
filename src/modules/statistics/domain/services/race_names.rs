use serde::{Deserialize, Serialize};

use super::race_ranking::parse_race_date;
use crate::modules::identity::domain::services::{DiceCoefficientStrategy, SimilarityStrategy};
use crate::modules::results::domain::RaceCore;

/// Number of leading words compared when grouping race names
const LEADING_WORDS: usize = 2;

/// Separator between a race name and an edition qualifier
const QUALIFIER_SEPARATOR: &str = " - ";

/// Race name spellings that refer to the same race
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceNameGroup {
    pub display: String,
    /// Pipe-delimited raw names
    pub original: String,
}

/// Groups race name spellings on their leading words
///
/// Names lose any trailing `" - qualifier"`, then their first two words are
/// compared. Names scoring at or above the threshold join the first matching
/// group; the first spelling seen becomes the group's display.
pub struct RaceNameGrouper {
    strategy: Box<dyn SimilarityStrategy>,
    threshold: f64,
}

impl RaceNameGrouper {
    pub fn new(threshold: f64) -> Self {
        Self {
            strategy: Box::new(DiceCoefficientStrategy),
            threshold,
        }
    }

    pub fn with_strategy(strategy: Box<dyn SimilarityStrategy>, threshold: f64) -> Self {
        Self {
            strategy,
            threshold,
        }
    }

    /// Group names, sorted by display
    pub fn group<I, S>(&self, names: I) -> Vec<RaceNameGroup>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut groups: Vec<(String, RaceNameGroup, Vec<String>)> = Vec::new();

        for raw in names {
            let raw = raw.as_ref().trim();
            if raw.is_empty() {
                continue;
            }
            let base = strip_qualifier(raw);
            let leading = leading_words(base);

            let existing = groups.iter_mut().find(|(key, _, _)| {
                *key == leading || self.strategy.calculate(key, &leading) >= self.threshold
            });
            match existing {
                Some((_, group, originals)) => {
                    if !originals.iter().any(|o| o == raw) {
                        originals.push(raw.to_string());
                        group.original = originals.join("|");
                    }
                }
                None => groups.push((
                    leading,
                    RaceNameGroup {
                        display: base.to_string(),
                        original: raw.to_string(),
                    },
                    vec![raw.to_string()],
                )),
            }
        }

        let mut groups: Vec<RaceNameGroup> = groups.into_iter().map(|(_, group, _)| group).collect();
        groups.sort_by_key(|g| g.display.to_lowercase());
        groups
    }
}

impl Default for RaceNameGrouper {
    fn default() -> Self {
        Self::new(0.8)
    }
}

fn strip_qualifier(name: &str) -> &str {
    match name.rsplit_once(QUALIFIER_SEPARATOR) {
        Some((base, _)) if !base.trim().is_empty() => base.trim(),
        _ => name,
    }
}

fn leading_words(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .take(LEADING_WORDS)
        .collect::<Vec<&str>>()
        .join(" ")
}

/// Keep one metadata entry per race name, the most recent edition
///
/// Entries with unparseable dates never replace a dated one. Output keeps
/// the first-seen order of names.
pub fn latest_editions(races: &[RaceCore]) -> Vec<RaceCore> {
    let mut latest: Vec<RaceCore> = Vec::new();

    for race in races {
        let key = race.name.trim().to_lowercase();
        if key.is_empty() {
            continue;
        }
        match latest.iter_mut().find(|r| r.name.trim().to_lowercase() == key) {
            Some(current) => {
                let newer = match (parse_race_date(&race.date), parse_race_date(&current.date)) {
                    (Some(candidate), Some(existing)) => candidate > existing,
                    (Some(_), None) => true,
                    _ => false,
                };
                if newer {
                    *current = race.clone();
                }
            }
            None => latest.push(race.clone()),
        }
    }

    latest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualifiers_and_variants_group_together() {
        let groups = RaceNameGrouper::default().group([
            "Coniston Fell Race",
            "Coniston Fell Race - Juniors",
            "Coniston Fell",
            "Borrowdale",
        ]);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].display, "Borrowdale");
        assert_eq!(groups[1].display, "Coniston Fell Race");
        assert_eq!(
            groups[1].original,
            "Coniston Fell Race|Coniston Fell Race - Juniors|Coniston Fell"
        );
    }

    #[test]
    fn test_distinct_races_stay_apart() {
        let groups = RaceNameGrouper::default().group(["Ennerdale Horseshoe", "Wasdale Horseshoe"]);
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn test_duplicates_and_blanks() {
        let groups = RaceNameGrouper::default().group(["Borrowdale", " Borrowdale ", ""]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].original, "Borrowdale");
    }

    #[test]
    fn test_latest_editions() {
        let race = |name: &str, date: &str| RaceCore {
            name: name.to_string(),
            date: date.to_string(),
            ..RaceCore::default()
        };
        let latest = latest_editions(&[
            race("Borrowdale", "03/08/2018"),
            race("Coniston", "11/05/2019"),
            race("borrowdale", "02/08/2019"),
            race("Borrowdale", "not a date"),
        ]);

        assert_eq!(latest.len(), 2);
        assert_eq!(latest[0].date, "02/08/2019");
        assert_eq!(latest[1].name, "Coniston");
    }
}
