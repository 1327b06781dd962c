pub mod refresh;
pub mod submission;
