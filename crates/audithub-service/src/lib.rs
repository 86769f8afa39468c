//! # audithub-service
//!
//! Business logic services for AuditHub. Every operation takes an explicit
//! [`context::RequestContext`] naming the acting user and session; there is
//! no ambient security state.

pub mod auth;
pub mod context;
pub mod organization;
