//! HTTP inbound adapter exposing REST endpoints.

pub mod analytics;
pub mod cache_control;
pub mod complaints;
pub mod contacts;
pub mod error;
pub mod feedbacks;
pub mod health;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// The `/api` scope with every resource handler and the extractor error
/// handlers that keep rejections in the shared error envelope.
///
/// Handlers expect `web::Data<state::HttpState>` to be registered on the
/// enclosing app.
pub fn api_scope() -> actix_web::Scope {
    web::scope("/api")
        .app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(error::query_error_handler))
        .app_data(web::PathConfig::default().error_handler(error::path_error_handler))
        .service(users::list_users)
        .service(users::create_user)
        .service(users::get_user)
        .service(users::update_user)
        .service(users::deactivate_user)
        .service(complaints::list_complaints)
        .service(complaints::create_complaint)
        .service(complaints::get_complaint)
        .service(complaints::update_complaint)
        .service(complaints::delete_complaint)
        .service(feedbacks::list_feedbacks)
        .service(feedbacks::create_feedback)
        .service(feedbacks::get_feedback)
        .service(feedbacks::update_feedback)
        .service(feedbacks::delete_feedback)
        .service(contacts::list_contacts)
        .service(contacts::create_contact)
        .service(contacts::get_contact)
        .service(contacts::update_contact)
        .service(contacts::delete_contact)
        .service(analytics::analytics)
}
