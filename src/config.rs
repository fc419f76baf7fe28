//! Runtime configuration
//!
//! Everything is read from the environment once on startup, tests build a [`Config`] directly

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;
use anyhow::Result;
use url::Url;

use crate::password::generate;
use crate::storage::Backend;

const DEFAULT_ADDRESS: &str = "0.0.0.0:6000";
const DEFAULT_PUBLIC_URL: &str = "http://localhost:6000";

/// Signed media links stay valid for 15 minutes by default
const DEFAULT_MEDIA_URL_TTL: u64 = 900;

/// Default body limit for note submissions: 10 MiB
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// All configuration of the app
pub struct Config {
    /// Address to listen on
    pub address: SocketAddr,

    /// Secret for access tokens and media tokens
    pub jwt_secret: String,

    /// Where notes and users live
    pub storage: Backend,

    /// Where attached images live and how they are linked
    pub media: MediaConfig,

    /// Credentials for the first user, when the store is empty
    pub initial_user: InitialUser,

    /// Body limit for note submissions
    pub max_upload_bytes: usize,
}

/// Media configuration
pub struct MediaConfig {
    /// Directory for the blob store, memory when `None`
    pub directory: Option<PathBuf>,

    /// Base URL used for signed media links
    pub public_url: Url,

    /// Lifetime of a signed media link
    pub url_ttl: Duration,
}

/// Credentials for the initial user
///
/// Missing values are generated and logged
#[derive(Default)]
pub struct InitialUser {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Config {
    /// Read the configuration from the environment
    ///
    /// # Errors
    ///
    /// Will return `Err` when a variable is set but can not be parsed
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from a variable lookup
    ///
    /// Empty values count as unset
    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.is_empty());

        let storage = if let Some(database_url) = var("DATABASE_URL") {
            Backend::Postgres { database_url }
        } else {
            tracing::info!("`DATABASE_URL` is not set, notes are kept in memory");
            Backend::Memory
        };

        let public_url = var("PUBLIC_URL").unwrap_or_else(|| String::from(DEFAULT_PUBLIC_URL));

        let url_ttl = parse_var(&var, "MEDIA_URL_TTL", DEFAULT_MEDIA_URL_TTL)?;
        let max_upload_bytes = parse_var(&var, "MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?;

        Ok(Self {
            address: setup_address(&var)?,
            jwt_secret: setup_jwt_secret(&var),
            storage,
            media: MediaConfig {
                directory: var("MEDIA_DIR").map(PathBuf::from),
                public_url: Url::parse(&public_url).context("Invalid PUBLIC_URL")?,
                url_ttl: Duration::from_secs(url_ttl),
            },
            initial_user: InitialUser {
                username: var("INITIAL_USERNAME"),
                password: var("INITIAL_PASSWORD"),
            },
            max_upload_bytes,
        })
    }
}

fn parse_var<T>(var: &impl Fn(&str) -> Option<String>, name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = var(name)
        .map(|value| value.parse::<T>())
        .transpose()
        .with_context(|| format!("Invalid {name}"))?;

    Ok(value.unwrap_or(default))
}

fn setup_jwt_secret(var: &impl Fn(&str) -> Option<String>) -> String {
    var("JWT_SECRET").unwrap_or_else(|| {
        let jwt_secret = generate();
        tracing::info!("`JWT_SECRET` is not set, generating temporary one: {jwt_secret}");
        jwt_secret
    })
}

fn setup_address(var: &impl Fn(&str) -> Option<String>) -> Result<SocketAddr> {
    let mut address = var("ADDRESS")
        .unwrap_or_else(|| String::from(DEFAULT_ADDRESS))
        .parse::<SocketAddr>()
        .context("Invalid ADDRESS")?;

    // optional override of just the port
    if let Some(port) = var("PORT") {
        let port = port.parse::<u16>().context("Invalid PORT")?;

        address.set_port(port);
    }

    Ok(address)
}
