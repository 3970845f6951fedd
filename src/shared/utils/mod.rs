pub mod logger;
pub mod text;

pub use logger::{init_logger, LogContext, TimedOperation};
pub use text::{collapse_whitespace, leading_number, upper_case_words};
