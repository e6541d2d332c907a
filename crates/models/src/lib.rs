pub mod access;
pub mod grading;
pub mod question;
pub mod role;
