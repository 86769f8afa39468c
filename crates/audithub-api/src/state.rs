//! Shared application state injected into every handler.

use std::sync::Arc;

use audithub_auth::session::SessionManager;
use audithub_core::config::AppConfig;
use audithub_database::connection::DatabasePool;
use audithub_service::auth::AuthService;
use audithub_service::organization::{
    InvitationService, MembershipService, OrganizationService, RoleService,
};

/// Application state shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Database pool (health checks).
    pub db: DatabasePool,
    /// Session lifecycle manager.
    pub session_manager: Arc<SessionManager>,
    /// Authentication flows.
    pub auth_service: Arc<AuthService>,
    /// Organization lifecycle.
    pub organization_service: Arc<OrganizationService>,
    /// Membership management.
    pub membership_service: Arc<MembershipService>,
    /// Invitation workflow.
    pub invitation_service: Arc<InvitationService>,
    /// Dynamic roles.
    pub role_service: Arc<RoleService>,
}
