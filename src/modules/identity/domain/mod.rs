pub mod entities;
pub mod services;
pub mod value_objects;

pub use entities::{RunnerIdentity, RunnerIdentityView};
pub use services::*;
pub use value_objects::{ClubVariant, NormalizedName};
