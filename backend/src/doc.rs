//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer together
//! with the schema wrappers in [`crate::inbound::http::schemas`], which keep
//! domain types free of utoipa derives.
//!
//! The document backs Swagger UI in debug builds and is printed by
//! `cargo run --bin openapi-dump` for external tooling.

use utoipa::OpenApi;

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Citizen complaint backend API",
        description = "Administration of users, complaints, feedback, and contact messages."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::deactivate_user,
        crate::inbound::http::complaints::list_complaints,
        crate::inbound::http::complaints::create_complaint,
        crate::inbound::http::complaints::get_complaint,
        crate::inbound::http::complaints::update_complaint,
        crate::inbound::http::complaints::delete_complaint,
        crate::inbound::http::feedbacks::list_feedbacks,
        crate::inbound::http::feedbacks::create_feedback,
        crate::inbound::http::feedbacks::get_feedback,
        crate::inbound::http::feedbacks::update_feedback,
        crate::inbound::http::feedbacks::delete_feedback,
        crate::inbound::http::contacts::list_contacts,
        crate::inbound::http::contacts::create_contact,
        crate::inbound::http::contacts::get_contact,
        crate::inbound::http::contacts::update_contact,
        crate::inbound::http::contacts::delete_contact,
        crate::inbound::http::analytics::analytics,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
        crate::inbound::http::health::root,
    ),
    components(schemas(ErrorSchema, ErrorCodeSchema)),
    tags(
        (name = "users", description = "Citizen and administrator accounts"),
        (name = "complaints", description = "Citizen complaints"),
        (name = "feedbacks", description = "Service feedback"),
        (name = "contacts", description = "Contact form messages"),
        (name = "analytics", description = "Dashboard summary"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
