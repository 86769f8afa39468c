//! AuditHub Server — multi-tenant back office for occupational-health
//! auditing.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tokio::sync::watch;
use tracing;
use tracing_subscriber::{EnvFilter, fmt};

use audithub_core::config::AppConfig;
use audithub_core::error::AppError;

#[tokio::main]
async fn main() {
    let env = std::env::var("AUDITHUB_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting AuditHub v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db = audithub_database::connection::DatabasePool::connect(&config.database).await?;
    audithub_database::migration::run_migrations(db.pool()).await?;

    // ── Step 2: Repositories ─────────────────────────────────────
    let pool = db.pool().clone();
    let user_repo = Arc::new(audithub_database::repositories::user::UserRepository::new(
        pool.clone(),
    ));
    let session_repo = Arc::new(
        audithub_database::repositories::session::SessionRepository::new(pool.clone()),
    );
    let org_repo = Arc::new(
        audithub_database::repositories::organization::OrganizationRepository::new(pool.clone()),
    );
    let member_repo = Arc::new(
        audithub_database::repositories::member::MemberRepository::new(pool.clone()),
    );
    let invitation_repo = Arc::new(
        audithub_database::repositories::invitation::InvitationRepository::new(pool.clone()),
    );
    let role_repo = Arc::new(
        audithub_database::repositories::org_role::OrgRoleRepository::new(pool.clone()),
    );

    // ── Step 3: Auth system ──────────────────────────────────────
    let session_store = Arc::new(audithub_auth::session::SessionStore::new(
        Arc::clone(&session_repo),
        config.session.clone(),
    ));
    let session_manager = Arc::new(audithub_auth::session::SessionManager::new(
        Arc::clone(&session_store),
        Arc::clone(&user_repo),
    ));
    let password_hasher = Arc::new(audithub_auth::password::PasswordHasher::new());

    // ── Step 4: Services ─────────────────────────────────────────
    let auth_service = Arc::new(audithub_service::auth::AuthService::new(
        Arc::clone(&user_repo),
        Arc::clone(&session_manager),
        Arc::clone(&password_hasher),
    ));
    let organization_service = Arc::new(
        audithub_service::organization::OrganizationService::new(
            Arc::clone(&org_repo),
            Arc::clone(&member_repo),
            Arc::clone(&invitation_repo),
            Arc::clone(&session_manager),
            config.invitation.clone(),
        ),
    );
    let membership_service = Arc::new(audithub_service::organization::MembershipService::new(
        Arc::clone(&member_repo),
        Arc::clone(&user_repo),
        Arc::clone(&role_repo),
    ));
    let invitation_service = Arc::new(audithub_service::organization::InvitationService::new(
        Arc::clone(&invitation_repo),
        Arc::clone(&member_repo),
        config.invitation.clone(),
    ));
    let role_service = Arc::new(audithub_service::organization::RoleService::new(
        Arc::clone(&role_repo),
        Arc::clone(&member_repo),
    ));

    tracing::info!("Services initialized");

    // ── Step 5: Shutdown channel ─────────────────────────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // ── Step 6: Session reaper ───────────────────────────────────
    let reaper_handle = if config.worker.enabled {
        let cleanup =
            audithub_auth::session::SessionCleanup::new(Arc::clone(&session_store));
        let reaper = audithub_worker::SessionReaper::new(cleanup, &config.session);
        let cancel = shutdown_rx.clone();
        let handle = tokio::spawn(async move {
            reaper.run(cancel).await;
        });
        tracing::info!("Session reaper started");
        Some(handle)
    } else {
        tracing::info!("Background worker disabled");
        None
    };

    // ── Step 7: HTTP server ──────────────────────────────────────
    let app_state = audithub_api::state::AppState {
        config: Arc::new(config.clone()),
        db: db.clone(),
        session_manager: Arc::clone(&session_manager),
        auth_service,
        organization_service,
        membership_service,
        invitation_service,
        role_service,
    };

    let app = audithub_api::router::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("AuditHub server listening on {}", addr);

    // ── Step 8: Graceful shutdown ────────────────────────────────
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
        let _ = shutdown_tx.send(true);
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    if let Some(handle) = reaper_handle {
        let _ = tokio::time::timeout(std::time::Duration::from_secs(10), handle).await;
    }

    db.close().await;
    tracing::info!("AuditHub server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
