/// Test data factories using builder pattern
///
/// Provides convenient methods to create race documents with sensible defaults
use fellrace_finder_lib::modules::results::domain::{
    Climb, Distance, RaceCore, RaceDocument, RaceRunner,
};

pub struct RaceFactory {
    id: String,
    race: String,
    date: String,
    number_of_runners: Option<u32>,
    runners: Vec<RaceRunner>,
}

impl Default for RaceFactory {
    fn default() -> Self {
        Self {
            id: "1".to_string(),
            race: "Test Fell Race".to_string(),
            date: "01/06/2019".to_string(),
            number_of_runners: None,
            runners: Vec::new(),
        }
    }
}

impl RaceFactory {
    pub fn new(race: &str) -> Self {
        Self {
            race: race.to_string(),
            ..Self::default()
        }
    }

    pub fn id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    pub fn date(mut self, date: &str) -> Self {
        self.date = date.to_string();
        self
    }

    pub fn field_size(mut self, size: u32) -> Self {
        self.number_of_runners = Some(size);
        self
    }

    /// Append a finisher; position follows insertion order
    pub fn runner(mut self, name: &str, club: &str, category: &str, time: &str) -> Self {
        let position = self.runners.len() + 1;
        self.runners.push(RaceRunner {
            position: position.to_string(),
            name: name.to_string(),
            club: club.to_string(),
            category: category.to_string(),
            time: time.to_string(),
        });
        self
    }

    /// Append a runner without a finishing position, e.g. `"DNF"`
    pub fn non_finisher(mut self, name: &str, club: &str, category: &str, status: &str) -> Self {
        self.runners.push(RaceRunner {
            position: status.to_string(),
            name: name.to_string(),
            club: club.to_string(),
            category: category.to_string(),
            time: status.to_string(),
        });
        self
    }

    /// Append `count` anonymous finishers
    pub fn fillers(mut self, count: usize) -> Self {
        for _ in 0..count {
            let n = self.runners.len() + 1;
            self = self.runner(&format!("Filler {n}"), "Other AC", "M", "03:00:00");
        }
        self
    }

    pub fn build(self) -> RaceDocument {
        RaceDocument {
            id: self.id,
            race: self.race,
            date: self.date,
            number_of_runners: self.number_of_runners,
            runners: self.runners,
        }
    }
}

pub fn race_info(id: &str, name: &str, date: &str, km: f64, climb_m: f64) -> RaceCore {
    RaceCore {
        id: id.to_string(),
        name: name.to_string(),
        date: date.to_string(),
        time: "11:00".to_string(),
        distance: Distance {
            kilometers: km,
            miles: km / 1.609_344,
        },
        climb: Climb {
            meters: climb_m,
            feet: climb_m * 3.280_84,
        },
        venue: "Lake District".to_string(),
    }
}
