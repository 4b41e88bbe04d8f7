//! Users resource handlers.
//!
//! ```text
//! GET    /api/users
//! GET    /api/users/{id}
//! PATCH  /api/users/{id} {"age":34}
//! POST   /api/users      {"firstname":"Timmy","lastname":"Timmerson","age":19,"gender":"Male"}
//! DELETE /api/users/{id}
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, web};
use crate::domain::{Error, NewUser, User, UserId, UserList, UserPatch};
use crate::inbound::http::ApiResult;
use crate::inbound::http::json::json_config;
use crate::inbound::http::state::HttpState;

fn parse_id(raw: &str) -> Result<UserId, Error> {
    UserId::new(raw).map_err(|_| Error::not_found(format!("user {raw} not found")))
}

/// List every stored user.
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Stored users", body = UserList),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<UserList>> {
    let data = state.users_query.list_users().await?;
    Ok(web::Json(UserList { data }))
}

/// Fetch one user.
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = User),
        (status = 404, description = "Unknown user; body is null"),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<User>> {
    let id = parse_id(&path)?;
    Ok(web::Json(state.users_query.get_user(&id).await?))
}

/// Merge the supplied fields into a stored user.
///
/// An unknown id answers 404 even when the body is also malformed.
#[utoipa::path(
    patch,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    request_body = UserPatch,
    responses(
        (status = 200, description = "Merged user", body = User),
        (status = 404, description = "Unknown user; body is null"),
        (status = 500, description = "Malformed body or internal error", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[patch("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: Result<web::Json<UserPatch>, Error>,
) -> ApiResult<web::Json<User>> {
    let id = parse_id(&path)?;
    state.users_query.get_user(&id).await?;
    let patch = payload?.into_inner();
    Ok(web::Json(state.users_command.update_user(&id, patch).await?))
}

/// Store a new user under a generated id.
///
/// Any caller-supplied id is ignored.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = NewUser,
    responses(
        (status = 201, description = "Created user", body = User),
        (status = 500, description = "Malformed body or internal error", body = Error)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<NewUser>,
) -> ApiResult<HttpResponse> {
    let user = state.users_command.create_user(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(user))
}

/// Remove a stored user and return it.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Deleted user", body = User),
        (status = 404, description = "Unknown user; body is null"),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<User>> {
    let id = parse_id(&path)?;
    Ok(web::Json(state.users_command.delete_user(&id).await?))
}

/// Register the users routes and their JSON extractor settings.
///
/// Mount under `/api`.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use actix_web::{App, web};
/// use roster::domain::{UserStore, UserStoreService};
/// use roster::inbound::http::state::HttpState;
/// use roster::inbound::http::users::configure;
///
/// let state = HttpState::from_service(Arc::new(UserStoreService::new(UserStore::seeded())));
/// let _app = App::new()
///     .app_data(web::Data::new(state))
///     .service(web::scope("/api").configure(configure));
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(list_users)
        .service(get_user)
        .service(update_user)
        .service(create_user)
        .service(delete_user);
}

#[cfg(test)]
mod tests;
