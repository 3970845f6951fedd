pub mod race_document;
mod serde_helpers;

pub use race_document::{Climb, Distance, RaceCore, RaceDocument, RaceRunner, RunnerClubCount};
