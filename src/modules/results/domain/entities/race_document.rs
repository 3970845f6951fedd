use serde::{Deserialize, Serialize};

use super::serde_helpers::{lenient_f64, optional_count, string_or_number};

/// One race edition as stored in the results collection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RaceDocument {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    /// Race display name
    #[serde(default)]
    pub race: String,
    /// `DD/MM/YYYY`
    #[serde(default)]
    pub date: String,
    #[serde(
        default,
        rename = "numberofrunners",
        deserialize_with = "optional_count"
    )]
    pub number_of_runners: Option<u32>,
    /// Finishers in finishing order
    #[serde(default)]
    pub runners: Vec<RaceRunner>,
}

impl RaceDocument {
    /// Field size, falling back to the length of the runner list
    pub fn field_size(&self) -> u32 {
        match self.number_of_runners {
            Some(n) if n > 0 => n,
            _ => self.runners.len() as u32,
        }
    }

    /// Race leader, the first runner in finishing order
    pub fn leader(&self) -> Option<&RaceRunner> {
        self.runners.first()
    }

    /// First row whose name equals `name`, ignoring case
    pub fn find_runner(&self, name: &str) -> Option<&RaceRunner> {
        let name = name.to_lowercase();
        self.runners.iter().find(|r| r.name.to_lowercase() == name)
    }
}

/// A runner's line inside a race document, one result row of that race
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RaceRunner {
    #[serde(default, deserialize_with = "string_or_number")]
    pub position: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub club: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub category: String,
    /// `HH:MM:SS` or a sentinel such as `DNF`
    #[serde(default, deserialize_with = "string_or_number")]
    pub time: String,
}

/// Aggregated (name, club) appearance count
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunnerClubCount {
    pub name: String,
    pub club: String,
    pub count: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Distance {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub kilometers: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub miles: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Climb {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub meters: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub feet: f64,
}

/// Race metadata from the race-info collection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RaceCore {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub date: String,
    /// Start time, `HH:MM`
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub distance: Distance,
    #[serde(default)]
    pub climb: Climb,
    #[serde(default)]
    pub venue: String,
}

impl RaceCore {
    /// Whether this metadata describes the race edition `name` on `date`
    pub fn describes(&self, name: &str, date: &str) -> bool {
        self.name.trim().to_lowercase() == name.trim().to_lowercase()
            && self.date.trim().to_lowercase() == date.trim().to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_accepts_numbers_or_strings() {
        let json = r#"{
            "id": 4412,
            "race": "Coniston Fell Race ",
            "date": "11/05/2019",
            "numberofrunners": "40",
            "runners": [
                {"position": 1, "name": "BLOGGS, Joe", "club": "Keswick AC", "category": "MSEN", "time": "01:02:03"},
                {"position": "2", "name": "Smith, John", "club": "", "category": "MV40", "time": "01:05:00"}
            ]
        }"#;

        let doc: RaceDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.id, "4412");
        assert_eq!(doc.number_of_runners, Some(40));
        assert_eq!(doc.runners[0].position, "1");
        assert_eq!(doc.runners[1].club, "");
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let doc: RaceDocument =
            serde_json::from_str(r#"{"race": "X", "runners": [{"name": "A"}]}"#).unwrap();
        assert_eq!(doc.number_of_runners, None);
        assert_eq!(doc.field_size(), 1);
        assert_eq!(doc.runners[0].time, "");
    }

    #[test]
    fn test_unparseable_count_falls_back_to_runner_list() {
        let doc: RaceDocument = serde_json::from_str(
            r#"{"numberofrunners": "n/a", "runners": [{"name": "A"}, {"name": "B"}]}"#,
        )
        .unwrap();
        assert_eq!(doc.field_size(), 2);
    }

    #[test]
    fn test_find_runner_ignores_case() {
        let doc = RaceDocument {
            runners: vec![RaceRunner {
                name: "Smith, John".into(),
                ..Default::default()
            }],
            ..Default::default()
        };
        assert!(doc.find_runner("SMITH, JOHN").is_some());
        assert!(doc.find_runner("John Smith").is_none());
    }

    #[test]
    fn test_race_core_lenient_measurements() {
        let core: RaceCore = serde_json::from_str(
            r#"{"id": "1", "name": "Skiddaw", "date": "01/04/2018",
                "distance": {"kilometers": "9.5", "miles": 5.9},
                "climb": {"meters": 950}}"#,
        )
        .unwrap();
        assert_eq!(core.distance.kilometers, 9.5);
        assert_eq!(core.climb.meters, 950.0);
        assert_eq!(core.climb.feet, 0.0);
        assert!(core.describes(" skiddaw", "01/04/2018 "));
    }
}
