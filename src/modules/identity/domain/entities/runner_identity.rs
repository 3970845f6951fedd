use serde::{Deserialize, Serialize};

use crate::modules::identity::domain::value_objects::ClubVariant;
use crate::shared::utils::upper_case_words;

/// A cluster of raw name spellings believed to be one person
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunnerIdentity {
    /// Display name without the club suffix
    pub display_name: String,
    /// Raw spellings, first-seen order, no duplicates
    pub originals: Vec<String>,
    /// Club spellings, first-seen order, no duplicates
    pub clubs: Vec<ClubVariant>,
    /// Sum of appearance counts over all merged candidates
    pub appearance_count: u32,
}

impl RunnerIdentity {
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            originals: Vec::new(),
            clubs: Vec::new(),
            appearance_count: 0,
        }
    }

    pub fn add_original(&mut self, original: &str) {
        if !self.originals.iter().any(|o| o == original) {
            self.originals.push(original.to_string());
        }
    }

    /// Record `count` appearances under `club`
    pub fn add_club(&mut self, raw: &str, tidied: &str, count: u32) {
        match self.clubs.iter_mut().find(|c| c.raw == raw) {
            Some(existing) => existing.count += count,
            None => self.clubs.push(ClubVariant::new(raw, tidied, count)),
        }
        self.appearance_count += count;
    }

    pub fn club_names(&self) -> Vec<&str> {
        self.clubs.iter().map(|c| c.raw.as_str()).collect()
    }

    pub fn has_club(&self, raw: &str) -> bool {
        self.clubs.iter().any(|c| c.raw == raw)
    }

    /// Club with the highest appearance count, the first seen on ties
    pub fn prominent_club(&self) -> Option<&ClubVariant> {
        self.clubs
            .iter()
            .fold(None, |best: Option<&ClubVariant>, club| match best {
                Some(b) if b.count >= club.count => Some(b),
                _ => Some(club),
            })
    }

    /// `"<display> - <club>"` using the most prominent club
    ///
    /// Multi-word clubs are title-cased; single-word clubs (often
    /// acronyms) are kept as written.
    pub fn display_with_club(&self) -> String {
        match self.prominent_club() {
            Some(club) => {
                let label = club.raw.trim();
                let label = if label.contains(char::is_whitespace) {
                    upper_case_words(label)
                } else {
                    label.to_string()
                };
                format!("{} - {}", self.display_name, label)
            }
            None => self.display_name.clone(),
        }
    }

    pub fn to_view(&self) -> RunnerIdentityView {
        RunnerIdentityView {
            display: self.display_with_club(),
            original: self.originals.join("|"),
            club: self.club_names().join("|"),
            count: self.appearance_count,
        }
    }
}

/// Wire form of an identity returned by autocomplete
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunnerIdentityView {
    pub display: String,
    /// Pipe-delimited raw spellings
    pub original: String,
    /// Pipe-delimited club spellings
    pub club: String,
    pub count: u32,
}
