// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod config;
mod error;
mod live;
mod routes;
mod session;
mod storage;

#[cfg(test)]
mod tests;

use axum::{Router, extract::FromRef};
use clap::Parser;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;
use vine_api::AuthenticationService;
use vine_persistence::Persistence;

use crate::config::Args;
use crate::live::LiveEventBroadcaster;
use crate::routes::build_router;
use crate::storage::UploadStorage;

/// Application state shared across handlers.
///
/// The single persistence instance sits behind a mutex, so each request's
/// backend calls are serialized.
#[derive(Clone)]
pub struct AppState {
    /// The persistence layer.
    pub persistence: Arc<Mutex<Persistence>>,
    /// Sign-in and token validation.
    pub auth: Arc<AuthenticationService>,
    /// Fan-out for check-in board events.
    pub live_events: Arc<LiveEventBroadcaster>,
    /// Gallery image files.
    pub uploads: Arc<UploadStorage>,
    /// Key required on public form submissions, when configured.
    pub anon_key: Option<Arc<str>>,
}

impl AppState {
    /// Builds the state from an opened persistence layer and configuration.
    #[must_use]
    pub fn new(persistence: Persistence, args: &Args) -> Self {
        Self {
            persistence: Arc::new(Mutex::new(persistence)),
            auth: Arc::new(AuthenticationService::new(
                args.session_ttl_hours,
                args.service_role_key.clone(),
            )),
            live_events: Arc::new(LiveEventBroadcaster::new()),
            uploads: Arc::new(UploadStorage::new(
                args.upload_dir.clone(),
                &args.public_upload_base,
            )),
            anon_key: args.anon_key().map(Arc::from),
        }
    }
}

impl FromRef<AppState> for Arc<LiveEventBroadcaster> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.live_events)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Vine Server");

    let mut persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };
    persistence.verify_foreign_key_enforcement()?;

    let app_state: AppState = AppState::new(persistence, &args);
    app_state.uploads.prepare().await?;
    info!(
        upload_dir = %args.upload_dir.display(),
        anon_key = app_state.anon_key.is_some(),
        service_role_key = args.service_role_key.is_some(),
        "Configuration loaded"
    );

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = args.socket_addr();
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
