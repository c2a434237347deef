use analytics::QueryEngine;
use chrono::Local;
use configuration::Config;
use core_types::{PricingTier, SessionUser, Strategy, User};
use session::MockAuthenticator;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

/// The shared application state that all handlers can access.
pub struct AppState {
    pub(crate) identity: MockAuthenticator,
    pub(crate) engine: QueryEngine,
    pub(crate) strategies: Vec<Strategy>,
    pub(crate) pricing: Vec<PricingTier>,
    users: RwLock<Vec<User>>,
    tokens: RwLock<HashMap<Uuid, SessionUser>>,
}

impl AppState {
    pub fn new(identity: MockAuthenticator, strategies: Vec<Strategy>, users: Vec<User>) -> Self {
        Self {
            identity,
            engine: QueryEngine::new(),
            strategies,
            pricing: seed_data::pricing_tiers(),
            users: RwLock::new(users),
            tokens: RwLock::new(HashMap::new()),
        }
    }

    /// Builds the state from the seed collections and the configured credential list.
    pub fn from_config(config: &Config) -> Arc<Self> {
        let anchor = config
            .seed
            .anchor_date
            .unwrap_or_else(|| Local::now().date_naive());
        let strategies = seed_data::seed_strategies(anchor, config.seed.history_days, config.seed.rng_seed);
        Arc::new(Self::new(
            MockAuthenticator::from_settings(&config.auth),
            strategies,
            seed_data::seed_users(),
        ))
    }

    /// Starts a session for `user` and returns its bearer token.
    pub fn issue_token(&self, user: SessionUser) -> Uuid {
        let token = Uuid::new_v4();
        tracing::info!(user_id = user.id, role = %user.role, "Token issued.");
        write(&self.tokens).insert(token, user);
        token
    }

    pub fn session(&self, token: &Uuid) -> Option<SessionUser> {
        read(&self.tokens).get(token).cloned()
    }

    /// Returns whether the token was live.
    pub fn revoke(&self, token: &Uuid) -> bool {
        write(&self.tokens).remove(token).is_some()
    }

    pub(crate) fn users(&self) -> RwLockReadGuard<'_, Vec<User>> {
        read(&self.users)
    }

    pub(crate) fn users_mut(&self) -> RwLockWriteGuard<'_, Vec<User>> {
        write(&self.users)
    }
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
