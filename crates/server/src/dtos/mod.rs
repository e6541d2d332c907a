pub mod access;
pub mod course;
pub mod lesson;
pub mod student;
pub mod submission;
pub mod test;
