use crate::{error::ApiError, state::AppState};
use axum::{extract::FromRequestParts, http::request::Parts};
use database::entities::users;
use log::debug;
use sea_orm::EntityTrait;
use tower_oauth2_resource_server::claims::DefaultClaims;
use uuid::Uuid;

/// The caller identified by the bearer token's subject.
///
/// The `sub` claim must be the UUID of a known user.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub users::Model);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let claims = parts
            .extensions
            .get::<DefaultClaims>()
            .ok_or(ApiError::Unauthorized)?;
        let sub = claims.sub.as_deref().ok_or(ApiError::Unauthorized)?;

        let Ok(user_id) = Uuid::parse_str(sub) else {
            debug!("Rejecting token with non-UUID subject {sub}");
            return Err(ApiError::Forbidden("unknown user".to_string()));
        };

        let user = users::Entity::find_by_id(user_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| ApiError::Forbidden("unknown user".to_string()))?;

        Ok(Self(user))
    }
}
