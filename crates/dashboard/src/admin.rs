use crate::error::DashboardError;
use crate::guard::{AccessRule, admit};
use analytics::{DashboardStats, QueryEngine, UserCriteria};
use core_types::{SessionUser, Strategy, User};
use events::Notification;
use notifier::{Navigator, NotificationSink};
use std::sync::Arc;

/// The admin panel: the user table with a search box, deletion and the headline figures.
pub struct AdminDashboard {
    viewer: SessionUser,
    users: Vec<User>,
    strategies: Vec<Strategy>,
    criteria: UserCriteria,
    engine: QueryEngine,
    notifier: Arc<dyn NotificationSink>,
}

impl AdminDashboard {
    /// Opens the panel for `session`.
    ///
    /// Anyone but an authenticated admin is redirected and gets `AccessDenied`.
    pub fn open(
        session: Option<&SessionUser>,
        users: Vec<User>,
        strategies: Vec<Strategy>,
        navigator: &dyn Navigator,
        notifier: Arc<dyn NotificationSink>,
    ) -> Result<Self, DashboardError> {
        let viewer = admit(AccessRule::Admin, session, navigator)?;

        tracing::info!(admin = %viewer.username, users = users.len(), "Admin dashboard opened.");
        Ok(Self {
            viewer,
            users,
            strategies,
            criteria: UserCriteria::default(),
            engine: QueryEngine::new(),
            notifier,
        })
    }

    pub fn viewer(&self) -> &SessionUser {
        &self.viewer
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn search(&self) -> &str {
        &self.criteria.search
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.criteria.search = search.into();
    }

    /// The rows of the user table under the current search.
    pub fn visible_users(&self) -> Vec<&User> {
        self.engine.filter_users(&self.users, &self.criteria)
    }

    /// `(shown, total)` for the "showing N of M users" line.
    pub fn showing(&self) -> (usize, usize) {
        (self.visible_users().len(), self.users.len())
    }

    /// Removes the user with `id` from the working list and returns it.
    pub fn delete_user(&mut self, id: u32) -> Result<User, DashboardError> {
        let Some(index) = self.users.iter().position(|u| u.id == id) else {
            return Err(DashboardError::UserNotFound(id));
        };
        let removed = self.users.remove(index);
        tracing::info!(user_id = id, username = %removed.username, "User deleted.");
        self.notifier.notify(Notification::info(
            "User deleted",
            "The user has been successfully removed",
        ));
        Ok(removed)
    }

    /// Aggregates over the full working list, independent of the search.
    pub fn stats(&self) -> DashboardStats {
        self.engine.dashboard_stats(&self.users, &self.strategies)
    }
}
