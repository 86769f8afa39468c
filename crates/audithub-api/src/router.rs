//! Route table.

use axum::Router;
use axum::routing::{delete, get, post, put};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{auth, health, organization};
use crate::state::AppState;

/// Build the application router with all routes and middleware layers.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        // Auth
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/logout-all", post(auth::logout_all))
        .route("/api/auth/renew", post(auth::renew))
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/sessions", get(auth::sessions))
        .route("/api/auth/sessions/{id}", delete(auth::revoke_session))
        // Organizations
        .route(
            "/api/organizations",
            post(organization::create).get(organization::list_mine),
        )
        .route("/api/organizations/check-slug", get(organization::check_slug))
        .route("/api/organizations/activate", post(organization::activate))
        .route(
            "/api/organizations/{id}",
            put(organization::update).delete(organization::delete),
        )
        .route("/api/organizations/{id}/full", get(organization::get_full))
        .route("/api/organizations/{id}/leave", post(organization::leave))
        .route(
            "/api/organizations/{id}/check-permission",
            post(organization::check_permission),
        )
        // Members
        .route(
            "/api/organizations/{id}/members",
            get(organization::list_members).post(organization::add_member),
        )
        .route(
            "/api/organizations/{id}/members/me",
            get(organization::current_member),
        )
        .route(
            "/api/organizations/{id}/members/me/role",
            get(organization::current_role),
        )
        .route(
            "/api/organizations/{id}/members/{member}",
            delete(organization::remove_member),
        )
        .route(
            "/api/organizations/{id}/members/{member_id}/role",
            put(organization::update_member_role),
        )
        // Invitations
        .route(
            "/api/organizations/{id}/invitations",
            post(organization::invite_member).get(organization::list_invitations),
        )
        .route("/api/invitations/mine", get(organization::my_invitations))
        .route("/api/invitations/{id}", get(organization::get_invitation))
        .route(
            "/api/invitations/{id}/accept",
            post(organization::accept_invitation),
        )
        .route(
            "/api/invitations/{id}/reject",
            post(organization::reject_invitation),
        )
        .route(
            "/api/invitations/{id}/cancel",
            post(organization::cancel_invitation),
        )
        // Dynamic roles
        .route(
            "/api/organizations/{id}/roles",
            post(organization::create_role).get(organization::list_roles),
        )
        .route(
            "/api/organizations/{id}/roles/{role}",
            get(organization::get_role)
                .put(organization::update_role)
                .delete(organization::delete_role),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
