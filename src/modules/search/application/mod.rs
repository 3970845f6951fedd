pub mod dto;
pub mod service;
pub mod wire;

pub use dto::*;
pub use service::RunnerSearchService;
pub use wire::{decode_html_entities, decode_race_names, decode_runner_selections, SelectedRunner};
