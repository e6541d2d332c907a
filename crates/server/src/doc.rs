use crate::routes::health;
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "jwt",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// API Documentation. Authenticated paths are added by the router.
#[derive(OpenApi)]
#[openapi(
    paths(health::health),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service liveness"),
        (name = "Courses", description = "Course outlines"),
        (name = "Lessons", description = "Lesson access and completion"),
        (name = "Tests", description = "Module tests and submissions"),
        (name = "Submissions", description = "Submission review and grading"),
        (name = "Profile", description = "The caller's own progress"),
        (name = "Teacher", description = "Student administration for teachers"),
    ),
    info(
        title = "Learning API",
        version = "1.0.0",
        description = "Lessons, module tests and grading",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;
