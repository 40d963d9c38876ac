use actix_web::{web, HttpResponse};

use crate::utils::AppError;

pub const USERS_URL: &str = "/users";
pub const USER_URL: &str = "/users/{uuid}";

/// Registers the user routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route(USERS_URL, web::get().to(get_list))
        .route(USERS_URL, web::post().to(create_user))
        .route(USER_URL, web::get().to(get_user_by_uuid))
        .route(USER_URL, web::put().to(update_user))
        .route(USER_URL, web::patch().to(partially_update_user))
        .route(USER_URL, web::delete().to(delete_user));
}

#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "List of users", body = String)
    )
)]
pub async fn get_list() -> Result<HttpResponse, AppError> {
    log::debug!("GET /users");
    Ok(HttpResponse::Ok().body("this is list of users"))
}

#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    responses(
        (status = 201, description = "User created", body = String)
    )
)]
pub async fn create_user() -> Result<HttpResponse, AppError> {
    log::debug!("POST /users");
    Ok(HttpResponse::Created().body("this is CreateUser"))
}

#[utoipa::path(
    get,
    path = "/users/{uuid}",
    tag = "Users",
    params(("uuid" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User found", body = String)
    )
)]
pub async fn get_user_by_uuid(path: web::Path<String>) -> Result<HttpResponse, AppError> {
    log::debug!("GET /users/{}", path);
    Ok(HttpResponse::Ok().body("this is GetUserByUIID"))
}

#[utoipa::path(
    put,
    path = "/users/{uuid}",
    tag = "Users",
    params(("uuid" = String, Path, description = "User identifier")),
    responses(
        (status = 204, description = "User replaced")
    )
)]
pub async fn update_user(path: web::Path<String>) -> Result<HttpResponse, AppError> {
    log::debug!("PUT /users/{}", path);
    Ok(HttpResponse::NoContent().body("this is UpdateUser"))
}

#[utoipa::path(
    patch,
    path = "/users/{uuid}",
    tag = "Users",
    params(("uuid" = String, Path, description = "User identifier")),
    responses(
        (status = 204, description = "User partially updated")
    )
)]
pub async fn partially_update_user(path: web::Path<String>) -> Result<HttpResponse, AppError> {
    log::debug!("PATCH /users/{}", path);
    Ok(HttpResponse::NoContent().body("this is PartiallyUpdateUser"))
}

#[utoipa::path(
    delete,
    path = "/users/{uuid}",
    tag = "Users",
    params(("uuid" = String, Path, description = "User identifier")),
    responses(
        (status = 204, description = "User deleted")
    )
)]
pub async fn delete_user(path: web::Path<String>) -> Result<HttpResponse, AppError> {
    log::debug!("DELETE /users/{}", path);
    Ok(HttpResponse::NoContent().body("this is DeleteUser"))
}
