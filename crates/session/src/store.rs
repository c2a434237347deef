use crate::authenticator::IdentityProvider;
use crate::error::SessionError;
use core_types::SessionUser;
use events::{Notification, Route};
use notifier::{Navigator, NotificationSink};
use std::sync::Arc;
use storage::KeyValueStore;

/// The storage slot holding the serialized `{id, username, role}` record.
pub const SESSION_KEY: &str = "user";

/// Holds the current authenticated identity, if any.
pub struct SessionStore {
    identity: Box<dyn IdentityProvider>,
    storage: Arc<dyn KeyValueStore>,
    notifier: Arc<dyn NotificationSink>,
    current: Option<SessionUser>,
}

impl SessionStore {
    /// Creates an empty store. Call `restore` to pick up a persisted session.
    pub fn new(
        identity: Box<dyn IdentityProvider>,
        storage: Arc<dyn KeyValueStore>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            identity,
            storage,
            notifier,
            current: None,
        }
    }

    pub fn current(&self) -> Option<&SessionUser> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.current.as_ref().is_some_and(SessionUser::is_admin)
    }

    /// Reinstates a previously persisted session.
    ///
    /// A missing record yields `None`. A malformed record is discarded and also
    /// yields `None`; the problem is logged but never surfaced to the caller.
    pub fn restore(&mut self) -> Option<&SessionUser> {
        let raw = match self.storage.get(SESSION_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(error = %e, "Could not read the persisted session.");
                return None;
            }
        };

        match serde_json::from_str::<SessionUser>(&raw) {
            Ok(user) => {
                tracing::info!(user_id = user.id, username = %user.username, "Session restored.");
                self.current = Some(user);
                self.current.as_ref()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to parse saved session, discarding it.");
                if let Err(e) = self.storage.remove(SESSION_KEY) {
                    tracing::warn!(error = %e, "Could not remove the malformed session record.");
                }
                self.current = None;
                None
            }
        }
    }

    /// Logs in with an exact username/password match.
    ///
    /// On failure nothing changes apart from an error notification.
    pub fn authenticate(&mut self, username: &str, password: &str) -> Result<&SessionUser, SessionError> {
        let Some(user) = self.identity.check_credentials(username, password) else {
            tracing::info!(username, "Login rejected.");
            self.notifier.notify(Notification::error(
                "Login failed",
                "Invalid username or password",
            ));
            return Err(SessionError::InvalidCredentials);
        };

        self.persist(&user)?;
        self.notifier.notify(Notification::info(
            "Logged in successfully",
            format!("Welcome back, {}!", username),
        ));
        Ok(self.start(user))
    }

    /// Creates a new account and logs it in.
    pub fn register(&mut self, username: &str, password: &str) -> Result<&SessionUser, SessionError> {
        let user = self.identity.register(username, password);
        if let Err(e) = self.persist(&user) {
            self.notifier.notify(Notification::error(
                "Registration failed",
                "An error occurred during registration",
            ));
            return Err(e);
        }
        self.notifier.notify(Notification::info(
            "Registration successful",
            format!("Welcome, {}!", username),
        ));
        Ok(self.start(user))
    }

    /// Ends the session and removes the persisted record.
    ///
    /// If the record cannot be removed the in-memory session is kept, so a failed
    /// logout never comes back as a restored session.
    pub fn clear(&mut self) -> Result<(), SessionError> {
        self.storage.remove(SESSION_KEY)?;
        if let Some(user) = self.current.take() {
            tracing::info!(user_id = user.id, "Session cleared.");
        }
        self.notifier.notify(Notification::info(
            "Logged out",
            "You have been logged out successfully",
        ));
        Ok(())
    }

    /// `clear`, then send the user back to the landing page.
    pub fn logout(&mut self, navigator: &dyn Navigator) -> Result<(), SessionError> {
        self.clear()?;
        navigator.redirect(Route::Home);
        Ok(())
    }

    /// Writes the record. Callers persist before touching `current`, so a failed
    /// write leaves the store unchanged.
    fn persist(&self, user: &SessionUser) -> Result<(), SessionError> {
        let record = serde_json::to_string(user)?;
        self.storage.set(SESSION_KEY, &record)?;
        Ok(())
    }

    fn start(&mut self, user: SessionUser) -> &SessionUser {
        tracing::info!(user_id = user.id, role = %user.role, "Session started.");
        &*self.current.insert(user)
    }
}
