//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the users resource, the health probes and the
//! payload schemas they exchange. Swagger UI serves it in debug builds.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode, Gender, NewUser, User, UserList, UserPatch};
use crate::inbound::http::health::{ProbeReport, ProbeStatus};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Roster API",
        description = "In-memory user roster with CRUD operations and health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        User,
        NewUser,
        UserPatch,
        UserList,
        Gender,
        Error,
        ErrorCode,
        ProbeReport,
        ProbeStatus
    )),
    tags(
        (name = "users", description = "User roster CRUD"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
