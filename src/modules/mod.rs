pub mod identity;
pub mod results;
pub mod search;
pub mod statistics;
