use crate::role::Role;
use serde::Serialize;
use std::{
    collections::HashSet,
    fmt::{Display, Formatter, Result as FmtResult},
    hash::Hash,
};

/// Why a student cannot open a piece of content yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LockReason {
    /// An earlier lesson in the module has not been passed
    PreviousLessonIncomplete,
    /// Some lesson in the module has not been passed
    LessonsIncomplete,
}

impl Display for LockReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::PreviousLessonIncomplete => write!(f, "complete the previous lesson"),
            Self::LessonsIncomplete => write!(f, "complete all lessons before testing"),
        }
    }
}

/// Content that does not exist yet, as opposed to content that is locked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Unavailable {
    TestNotCreated,
}

impl Display for Unavailable {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::TestNotCreated => write!(f, "test not yet created"),
        }
    }
}

/// Outcome of an access check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "reason", rename_all = "snake_case")]
pub enum Access {
    Granted,
    Locked(LockReason),
    Unavailable(Unavailable),
}

impl Access {
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }

    /// Human-readable explanation for locked or unavailable content
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Granted => None,
            Self::Locked(reason) => Some(reason.to_string()),
            Self::Unavailable(reason) => Some(reason.to_string()),
        }
    }
}

/// Decides whether a lesson is open to a student.
///
/// `module_lessons` is every lesson of the lesson's module in creation order,
/// and `passed` holds the lessons the student has passed. Free previews are
/// always open; otherwise every lesson ordered before this one must be passed.
pub fn lesson_access<K>(
    lesson: &K,
    is_free_preview: bool,
    module_lessons: &[K],
    passed: &HashSet<K>,
) -> Access
where
    K: Eq + Hash,
{
    if is_free_preview {
        return Access::Granted;
    }

    let predecessors_passed = module_lessons
        .iter()
        .take_while(|id| *id != lesson)
        .all(|id| passed.contains(id));

    if predecessors_passed {
        Access::Granted
    } else {
        Access::Locked(LockReason::PreviousLessonIncomplete)
    }
}

/// Decides whether a module's test is open to a student.
///
/// Every lesson in the module must be passed; a module without lessons is open.
pub fn test_access<K>(module_lessons: &[K], passed: &HashSet<K>) -> Access
where
    K: Eq + Hash,
{
    if module_lessons.iter().all(|id| passed.contains(id)) {
        Access::Granted
    } else {
        Access::Locked(LockReason::LessonsIncomplete)
    }
}

/// Whether `user` may manage a module: a teacher listed among its teachers
pub fn is_teacher_of<K>(user: &K, role: Role, module_teachers: &[K]) -> bool
where
    K: PartialEq,
{
    role.is_teacher() && module_teachers.contains(user)
}
