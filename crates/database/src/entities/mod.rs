pub mod answer;
pub mod course;
pub mod course_teacher;
pub mod lesson;
pub mod module;
pub mod module_teacher;
pub mod progress;
pub mod question;
pub mod submission;
pub mod user;

pub use answer as answers;
pub use course as courses;
pub use course_teacher as course_teachers;
pub use lesson as lessons;
pub use module as modules;
pub use module_teacher as module_teachers;
pub use question as questions;
pub use submission as submissions;
pub use test as tests;
pub use user as users;
