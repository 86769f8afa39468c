//! # audithub-api
//!
//! HTTP surface for AuditHub. A thin axum layer: extractors resolve the
//! session into a [`audithub_service::context::RequestContext`], handlers
//! delegate to services, and errors map onto HTTP status codes.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;
