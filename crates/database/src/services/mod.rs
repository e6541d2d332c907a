pub mod access;
pub mod course;
pub mod grading;
pub mod progress;
pub mod roster;
pub mod submission;
