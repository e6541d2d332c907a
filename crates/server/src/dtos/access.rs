use models::access::Access;
use serde::Serialize;
use utoipa::ToSchema;

/// Whether the caller may open a lesson or test, and why not
#[derive(Debug, Serialize, ToSchema)]
pub struct AccessResponse {
    /// One of `granted`, `locked` or `unavailable`
    pub state: String,
    pub message: Option<String>,
}

impl From<Access> for AccessResponse {
    fn from(access: Access) -> Self {
        let state = match access {
            Access::Granted => "granted",
            Access::Locked(_) => "locked",
            Access::Unavailable(_) => "unavailable",
        };

        Self {
            state: state.to_string(),
            message: access.message(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::access::LockReason;

    #[test]
    fn test_locked_access_carries_message() {
        let response = AccessResponse::from(Access::Locked(LockReason::PreviousLessonIncomplete));
        assert_eq!(response.state, "locked");
        assert_eq!(response.message.as_deref(), Some("complete the previous lesson"));
    }

    #[test]
    fn test_granted_access_has_no_message() {
        let response = AccessResponse::from(Access::Granted);
        assert_eq!(response.state, "granted");
        assert!(response.message.is_none());
    }
}
