//! Session gate
//!
//! Nothing on the board runs without a signed-in user. The gate has two states, how a session
//! failed to establish (no token, bad token, signed out, expired) is never visible past it.

use std::ops::Deref;
use std::sync::Arc;

use uuid::Uuid;

use crate::storage::Result;
use crate::storage::Storage;
use crate::users::User;

use super::UserNotes;

/// Either signed in, or not
pub enum SessionGate<S: Storage> {
    /// Show the sign-in prompt
    Unauthenticated,

    /// Show the board
    Authenticated(Session<S>),
}

impl<S: Storage> SessionGate<S> {
    /// Run `children` with the session, or `prompt` without one
    pub fn render<T>(
        self,
        prompt: impl FnOnce() -> T,
        children: impl FnOnce(Session<S>) -> T,
    ) -> T {
        match self {
            Self::Unauthenticated => prompt(),
            Self::Authenticated(session) => children(session),
        }
    }
}

/// A signed-in user
#[derive(Clone)]
pub struct Session<S: Storage> {
    storage: S,
    user: Arc<User>,
}

impl<S: Storage> Session<S> {
    pub fn new(storage: S, user: User) -> Self {
        Self {
            storage,
            user: Arc::new(user),
        }
    }

    /// The notes this session can see
    pub fn notes(&self) -> UserNotes<S> {
        UserNotes::new(self.storage.clone(), self.user.id)
    }

    /// End the session
    ///
    /// A new session ID is stored, every token of the current session stops working
    pub async fn sign_out(self) -> Result<()> {
        self.storage
            .rotate_session(&self.user, &Uuid::new_v4())
            .await?;

        tracing::info!("User {} signed out", self.user.username);

        Ok(())
    }
}

impl<S: Storage> Deref for Session<S> {
    type Target = User;

    fn deref(&self) -> &Self::Target {
        &self.user
    }
}
