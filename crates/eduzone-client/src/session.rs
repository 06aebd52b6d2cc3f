use eduzone_models::UserProfile;
use tracing::{debug, info, warn};

use crate::client::ApiClient;
use crate::error::ClientError;
use crate::store::PersistedAuth;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// `restore` has not finished yet.
    #[default]
    Loading,
    Unauthenticated,
    Authenticated(UserProfile),
}

impl SessionState {
    pub fn user(&self) -> Option<&UserProfile> {
        match self {
            Self::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

/// The signed-in user and the lifecycle of their token.
pub struct Session {
    client: ApiClient,
    state: SessionState,
    last_error: Option<String>,
}

impl Session {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: SessionState::Loading,
            last_error: None,
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.state.user()
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated(_))
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Picks up a persisted token and asks the server who it belongs to.
    ///
    /// Any failure (401, network, unreadable store) clears the persisted token and
    /// leaves the session unauthenticated.
    pub async fn restore(&mut self) -> &SessionState {
        let token = match self.client.token_store().token() {
            Ok(Some(token)) => token,
            Ok(None) => {
                self.state = SessionState::Unauthenticated;
                return &self.state;
            }
            Err(e) => {
                warn!(error = %e, "Could not read persisted session");
                self.forget();
                return &self.state;
            }
        };

        match self.client.me().await {
            Ok(user) => {
                debug!(user.id = user.id, "Session restored");
                let persisted = PersistedAuth {
                    token,
                    user: Some(user.clone()),
                };
                if let Err(e) = self.client.token_store().save(&persisted) {
                    warn!(error = %e, "Could not refresh persisted user");
                }
                self.state = SessionState::Authenticated(user);
            }
            Err(e) => {
                if !e.is_unauthorized() {
                    warn!(error = %e, "Session check failed");
                    self.last_error = Some("Authentication failed".to_string());
                }
                self.forget();
            }
        }

        &self.state
    }

    /// Signs in and persists the token and user.
    ///
    /// On failure the returned error's `Display` is the message to show, e.g.
    /// "Invalid credentials".
    pub async fn login(&mut self, email: &str, password: &str) -> Result<UserProfile, ClientError> {
        self.last_error = None;

        let auth = match self.client.login(email, password).await {
            Ok(auth) => auth,
            Err(e) => {
                self.last_error = Some(e.to_string());
                return Err(e);
            }
        };

        self.client.token_store().save(&PersistedAuth {
            token: auth.token,
            user: Some(auth.user.clone()),
        })?;

        info!(user.id = auth.user.id, role = auth.user.role.as_str(), "Logged in");
        self.state = SessionState::Authenticated(auth.user.clone());

        Ok(auth.user)
    }

    /// Clears the persisted token and user before returning.
    pub fn logout(&mut self) {
        self.forget();
        self.last_error = None;
    }

    fn forget(&mut self) {
        if let Err(e) = self.client.token_store().clear() {
            warn!(error = %e, "Could not clear persisted session");
        }
        self.state = SessionState::Unauthenticated;
    }
}
