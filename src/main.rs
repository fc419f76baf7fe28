#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
// easier to use when using the functions as callback of foreign functions
#![allow(clippy::needless_pass_by_value)]

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::Extension;
use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;
use tracing_subscriber::prelude::*;

use crate::api::router;
use crate::config::Config;
use crate::config::MediaConfig;
use crate::keys::JwtKeys;
use crate::media::BlobStore;
use crate::media::Directory;
use crate::media::FILES_PATH;
use crate::media::Media;
use crate::media::MemoryBlobs;
use crate::media::UrlSigner;
use crate::storage::Backend;
use crate::storage::Storage;
use crate::users::ensure_initial_user;

mod api;
mod board;
mod config;
mod graceful_shutdown;
mod keys;
mod media;
mod notes;
mod password;
mod storage;
#[cfg(test)]
mod tests;
mod users;

const DEFAULT_RUST_LOG: &str = "noteboard=debug,tower_http=debug";

#[tokio::main]
async fn main() -> Result<()> {
    setup_environment();
    setup_tracing();

    let config = Config::from_env()?;
    let address = config.address;

    let app = setup_app(config).await?;

    let listener = tokio::net::TcpListener::bind(address).await?;
    tracing::info!("Listening on {}", address);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(graceful_shutdown::handler())
    .await?;

    Ok(())
}

/// Create and setup the app with its dependencies
///
/// # Errors
///
/// Will return `Err` if any of its dependencies fail to load:
/// - Media directory
/// - Initial user setup
pub async fn setup_app(config: Config) -> Result<Router> {
    let blobs = setup_blobs(&config.media).await?;

    let signer = UrlSigner::new(
        JwtKeys::new(config.jwt_secret.as_bytes()),
        config.media.public_url.clone(),
        config.media.url_ttl,
    );

    let media = Media::new(blobs, signer);

    match &config.storage {
        Backend::Memory => {
            let storage = storage::Memory::new();
            create_app(storage, media, &config).await
        }
        Backend::Postgres { database_url } => {
            let storage = storage::Postgres::new(database_url).await;
            create_app(storage, media, &config).await
        }
    }
}

/// Seed the initial user and build the router on top of the chosen storage
async fn create_app<S: Storage>(storage: S, media: Media, config: &Config) -> Result<Router> {
    ensure_initial_user(&storage, &config.initial_user).await?;

    Ok(create_router(storage, media, config))
}

/// Create the router for NoteBoard
fn create_router<S: Storage>(storage: S, media: Media, config: &Config) -> Router {
    let jwt_keys = JwtKeys::new(config.jwt_secret.as_bytes());

    Router::new()
        .nest("/api", router::<S>(config.max_upload_bytes))
        .route(&format!("/{FILES_PATH}/{{*key}}"), get(api::download))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(storage))
        .layer(Extension(media))
        .layer(Extension(jwt_keys))
}

/// Pick the blob store backing the `media/` namespace
async fn setup_blobs(config: &MediaConfig) -> Result<Arc<dyn BlobStore>> {
    let blobs: Arc<dyn BlobStore> = if let Some(root) = &config.directory {
        tracing::info!("Storing media in {}", root.display());
        Arc::new(Directory::open(root).await?)
    } else {
        tracing::info!("`MEDIA_DIR` is not set, media is kept in memory");
        Arc::new(MemoryBlobs::new())
    };

    Ok(blobs)
}

fn setup_environment() {
    dotenvy::dotenv().ok();
}

fn setup_tracing() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::registry;

    registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_RUST_LOG.into()),
        ))
        .with(fmt::layer())
        .init();
}
