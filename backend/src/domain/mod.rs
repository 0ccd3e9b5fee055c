//! Domain primitives, aggregates, and services.
//!
//! Purpose: hold the rules of the complaint desk independent of HTTP and
//! persistence. Entities validate on construction, ports describe what the
//! adapters must provide, and the services implement the driving ports.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic error payload.
//! - TraceId: per-request correlation identifier.
//! - sequence: human-readable identifier allocation (`USR001`, `CMP0001`).
//! - user, complaint, feedback, contact, analytics: the record types.
//! - *Service: driving port implementations wired by the server.

pub mod analytics;
pub mod complaint;
pub mod contact;
pub mod error;
pub mod feedback;
mod labels;
pub mod password;
pub mod ports;
pub mod sequence;
pub mod trace_id;
pub mod user;
pub mod validation;

mod complaint_service;
mod contact_service;
mod dashboard_service;
mod feedback_service;
mod reconciliation_service;
pub(crate) mod service_support;
mod user_service;

pub use self::complaint_service::ComplaintService;
pub use self::contact_service::ContactService;
pub use self::dashboard_service::DashboardService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::feedback_service::FeedbackService;
pub use self::reconciliation_service::reconcile_sequences;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user_service::UserService;

