use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Service API",
        version = "0.1.0",
        description = "CRUD endpoints for the user resource, backed by MongoDB."
    ),
    paths(
        // Health
        crate::api::health::health_check,

        // Users
        crate::api::users::get_list,
        crate::api::users::create_user,
        crate::api::users::get_user_by_uuid,
        crate::api::users::update_user,
        crate::api::users::partially_update_user,
        crate::api::users::delete_user,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check, including database reachability."),
        (name = "Users", description = "User resource endpoints."),
    )
)]
pub struct ApiDoc;
