use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Service API",
        version = "1.0.0",
        description = "CRUD over a single `users` collection in MongoDB.\n\nUpdates and deletes return the raw store result (matched/modified/deleted counts), not the affected record. An unknown id is a zero-count result, not an error."
    ),
    paths(
        crate::api::users::hello,
        crate::api::users::create_user,
        crate::api::users::list_users,
        crate::api::users::list_active_users,
        crate::api::users::update_user,
        crate::api::users::delete_user,

        // Health & Metrics
        crate::api::health::health_check,
        crate::api::metrics::get_metrics,
    ),
    components(
        schemas(
            crate::models::CreateUserRequest,
            crate::models::UserResponse,
            crate::models::UpdateOutcome,
            crate::models::DeleteOutcome,
            crate::api::health::HealthResponse,
        )
    ),
    tags(
        (name = "Users", description = "User records: create, list, filter by active flag, partial update, delete."),
        (name = "Health", description = "Health check and request counters."),
    )
)]
pub struct ApiDoc;
