use taskdeck_core::DeckResult;
use tracing::debug;

use crate::client::{AuthApi, User};
use crate::token::TokenStore;

/// A live session: the bearer token and the user it belongs to.
#[derive(Debug, Clone)]
pub struct Authenticated {
    pub token: String,
    pub user: User,
}

/// Composes the remote auth API with the local token store, owning the
/// startup-restore, login, signup, and logout flows.
pub struct AuthGateway<A: AuthApi> {
    api: A,
    store: TokenStore,
}

impl<A: AuthApi> AuthGateway<A> {
    pub fn new(api: A, store: TokenStore) -> Self {
        Self { api, store }
    }

    /// Restore the session from the stored token, if any. A rejected or
    /// unreachable profile fetch clears the token and yields
    /// unauthenticated without surfacing an error.
    pub async fn restore(&self) -> DeckResult<Option<Authenticated>> {
        let Some(token) = self.store.load()? else {
            return Ok(None);
        };
        match self.api.profile(&token).await {
            Ok(user) => Ok(Some(Authenticated { token, user })),
            Err(err) => {
                debug!("profile fetch failed, clearing stored token: {err}");
                self.store.clear()?;
                Ok(None)
            }
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> DeckResult<Authenticated> {
        let session = self.api.sign_in(email, password).await?;
        self.store.save(&session.token)?;
        Ok(Authenticated {
            token: session.token,
            user: session.user,
        })
    }

    pub async fn signup(&self, name: &str, email: &str, password: &str) -> DeckResult<Authenticated> {
        let session = self.api.sign_up(name, email, password).await?;
        self.store.save(&session.token)?;
        Ok(Authenticated {
            token: session.token,
            user: session.user,
        })
    }

    /// Forget the stored token. Purely local; the backend holds no
    /// session state to revoke.
    pub fn logout(&self) -> DeckResult<()> {
        self.store.clear()
    }
}
