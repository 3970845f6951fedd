pub mod runner_identity;

pub use runner_identity::{RunnerIdentity, RunnerIdentityView};
