use anyhow::Result;
use anyhow::anyhow;
use chrono::naive::NaiveDateTime;
use uuid::Uuid;

use crate::config::InitialUser;
use crate::password::generate;
use crate::password::hash;
use crate::storage::CreateUserValues;
use crate::storage::Storage;

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub session_id: Uuid,
    pub username: String,
    pub hashed_password: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

/// Make sure somebody can sign in on a fresh store
pub async fn ensure_initial_user<S: Storage>(storage: &S, initial: &InitialUser) -> Result<()> {
    let user = storage.find_any_single_user().await?;

    if user.is_none() {
        let username = initial.username.clone().unwrap_or_else(|| {
            let initial_username = Uuid::new_v4().to_string();
            tracing::info!(
                "`INITIAL_USERNAME` not set, generating new username: {initial_username}"
            );
            initial_username
        });

        let password = initial.password.clone().unwrap_or_else(|| {
            let initial_password = generate();
            tracing::info!(
                "`INITIAL_PASSWORD` not set, generating new password: {initial_password}"
            );
            initial_password
        });

        let hashed_password = hash(&password).map_err(|err| anyhow!("Could not hash: {err}"))?;

        let values = CreateUserValues {
            session_id: &Uuid::new_v4(),
            username: &username,
            hashed_password: &hashed_password,
        };

        storage.create_user(&values).await?;
    }

    Ok(())
}
