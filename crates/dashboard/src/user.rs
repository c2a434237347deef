use crate::error::DashboardError;
use crate::guard::{AccessRule, admit};
use analytics::{HistorySummary, QueryEngine, StrategyCriteria};
use core_types::{RiskTier, SessionUser, Strategy, User};
use notifier::Navigator;

/// Number of catalog strategies shown as subscribed when the viewer has no user record.
const FALLBACK_SUBSCRIPTIONS: usize = 3;

/// The subscription ids of `viewer`.
///
/// Taken from the user record with the same username. Identities without a record
/// (freshly registered accounts, for instance) see the first few catalog strategies.
pub fn default_subscriptions(viewer: &SessionUser, users: &[User], strategies: &[Strategy]) -> Vec<u32> {
    match users.iter().find(|u| u.username == viewer.username) {
        Some(record) => record.strategies.clone(),
        None => strategies
            .iter()
            .take(FALLBACK_SUBSCRIPTIONS)
            .map(|s| s.id)
            .collect(),
    }
}

/// The strategy explorer of a regular user.
pub struct UserDashboard {
    viewer: SessionUser,
    strategies: Vec<Strategy>,
    subscriptions: Vec<u32>,
    selected: Option<u32>,
    criteria: StrategyCriteria,
    engine: QueryEngine,
}

impl UserDashboard {
    /// Opens the explorer for `session`. Anonymous visitors go to `/login`, admins to `/admin`.
    ///
    /// The first subscribed strategy starts out selected.
    pub fn open(
        session: Option<&SessionUser>,
        strategies: Vec<Strategy>,
        subscriptions: Vec<u32>,
        navigator: &dyn Navigator,
    ) -> Result<Self, DashboardError> {
        let viewer = admit(AccessRule::User, session, navigator)?;

        let mut dashboard = Self {
            viewer,
            strategies,
            subscriptions,
            selected: None,
            criteria: StrategyCriteria::new(),
            engine: QueryEngine::new(),
        };
        dashboard.selected = dashboard.subscribed_strategies().first().map(|s| s.id);
        tracing::info!(
            username = %dashboard.viewer.username,
            subscribed = dashboard.subscriptions.len(),
            "User dashboard opened."
        );
        Ok(dashboard)
    }

    pub fn viewer(&self) -> &SessionUser {
        &self.viewer
    }

    pub fn strategies(&self) -> &[Strategy] {
        &self.strategies
    }

    /// Subscribed strategies in subscription order. Unknown ids are skipped.
    pub fn subscribed_strategies(&self) -> Vec<&Strategy> {
        self.engine
            .strategies_by_ids(&self.subscriptions, &self.strategies)
    }

    pub fn selected_strategy(&self) -> Option<&Strategy> {
        self.selected
            .and_then(|id| self.engine.strategy_by_id(&self.strategies, id))
    }

    /// Charts another strategy. Any catalog strategy can be selected.
    pub fn select_strategy(&mut self, id: u32) -> Result<&Strategy, DashboardError> {
        let strategy = self
            .engine
            .strategy_by_id(&self.strategies, id)
            .ok_or(DashboardError::StrategyNotFound(id))?;
        self.selected = Some(id);
        Ok(strategy)
    }

    /// Summary of the selected strategy's series, if one is selected and it has data.
    pub fn selected_history(&self) -> Option<HistorySummary> {
        let strategy = self.selected_strategy()?;
        self.engine.summarize_history(&strategy.historical_data).ok()
    }

    pub fn criteria(&self) -> &StrategyCriteria {
        &self.criteria
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.criteria.search = search.into();
    }

    pub fn set_risk(&mut self, risk: Option<RiskTier>) {
        self.criteria.set_risk(risk);
    }

    pub fn set_category(&mut self, category: Option<String>) {
        self.criteria.set_category(category);
    }

    /// Returns whether `asset` is selected afterwards.
    pub fn toggle_asset(&mut self, asset: &str) -> bool {
        self.criteria.toggle_asset(asset)
    }

    /// Adds `asset` to the selection. Selecting it again, in any case, changes nothing.
    pub fn select_asset(&mut self, asset: &str) {
        self.criteria.select_asset(asset);
    }

    pub fn clear_filters(&mut self) {
        self.criteria.clear();
    }

    /// The explorer table: the whole catalog under the current criteria.
    pub fn visible_strategies(&self) -> Vec<&Strategy> {
        self.engine.filter_strategies(&self.strategies, &self.criteria)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_types::Role;
    use events::Route;
    use notifier::RecordingNavigator;

    fn catalog() -> Vec<Strategy> {
        let anchor = NaiveDate::from_ymd_opt(2023, 4, 5).unwrap();
        seed_data::seed_strategies(anchor, 30, 42)
    }

    fn muser() -> SessionUser {
        SessionUser::new(1, "muser", Role::User)
    }

    fn open_for(viewer: &SessionUser) -> UserDashboard {
        let strategies = catalog();
        let subscriptions = default_subscriptions(viewer, &seed_data::seed_users(), &strategies);
        UserDashboard::open(Some(viewer), strategies, subscriptions, &RecordingNavigator::new()).unwrap()
    }

    fn ids(strategies: &[&Strategy]) -> Vec<u32> {
        strategies.iter().map(|s| s.id).collect()
    }

    #[test]
    fn test_access_rules() {
        let navigator = RecordingNavigator::new();
        let result = UserDashboard::open(None, catalog(), vec![], &navigator);
        assert_eq!(result.err(), Some(DashboardError::AccessDenied(Route::Login)));

        let admin = SessionUser::new(2, "mvc", Role::Admin);
        let result = UserDashboard::open(Some(&admin), catalog(), vec![], &navigator);
        assert_eq!(result.err(), Some(DashboardError::AccessDenied(Route::Admin)));
        assert_eq!(navigator.redirects(), vec![Route::Login, Route::Admin]);
    }

    #[test]
    fn test_subscriptions_and_default_selection() {
        let dashboard = open_for(&muser());
        assert_eq!(ids(&dashboard.subscribed_strategies()), vec![1, 3, 5]);
        assert_eq!(dashboard.selected_strategy().map(|s| s.id), Some(1));
    }

    #[test]
    fn test_unknown_viewer_falls_back_to_first_strategies() {
        let newcomer = SessionUser::new(3, "alice", Role::User);
        let subscriptions = default_subscriptions(&newcomer, &seed_data::seed_users(), &catalog());
        assert_eq!(subscriptions, vec![1, 2, 3]);
    }

    #[test]
    fn test_unknown_subscription_ids_are_skipped() {
        let dashboard = UserDashboard::open(Some(&muser()), catalog(), vec![9, 4], &RecordingNavigator::new()).unwrap();
        assert_eq!(ids(&dashboard.subscribed_strategies()), vec![4]);
        assert_eq!(dashboard.selected_strategy().map(|s| s.id), Some(4));
    }

    #[test]
    fn test_no_subscriptions_means_no_selection() {
        let dashboard = UserDashboard::open(Some(&muser()), catalog(), vec![], &RecordingNavigator::new()).unwrap();
        assert!(dashboard.selected_strategy().is_none());
        assert!(dashboard.selected_history().is_none());
    }

    #[test]
    fn test_select_strategy() {
        let mut dashboard = open_for(&muser());
        assert_eq!(dashboard.select_strategy(4).unwrap().name, "Crypto-Traditional Blend");
        assert_eq!(dashboard.selected_strategy().map(|s| s.id), Some(4));

        assert_eq!(dashboard.select_strategy(42).err(), Some(DashboardError::StrategyNotFound(42)));
        assert_eq!(dashboard.selected_strategy().map(|s| s.id), Some(4));
    }

    #[test]
    fn test_selected_history_summary() {
        let dashboard = open_for(&muser());
        let summary = dashboard.selected_history().unwrap();
        assert_eq!(summary.points, 31);
        assert_eq!(summary.end_date, NaiveDate::from_ymd_opt(2023, 4, 5).unwrap());
        assert!(summary.min_value <= summary.first_value);
        assert!(summary.max_value >= summary.last_value);
    }

    #[test]
    fn test_filters_combine() {
        let mut dashboard = open_for(&muser());
        assert_eq!(dashboard.visible_strategies().len(), 5);

        dashboard.set_risk(Some(RiskTier::Medium));
        assert_eq!(ids(&dashboard.visible_strategies()), vec![1, 5]);

        assert!(dashboard.toggle_asset("REITs"));
        assert_eq!(ids(&dashboard.visible_strategies()), vec![5]);

        assert!(!dashboard.toggle_asset("reits"));
        dashboard.set_category(Some("income".to_string()));
        // Medium risk AND category containing "income": "Real Estate" does not match.
        assert!(dashboard.visible_strategies().is_empty());

        dashboard.set_risk(None);
        assert_eq!(ids(&dashboard.visible_strategies()), vec![3]);

        dashboard.clear_filters();
        assert!(dashboard.criteria().is_empty());
        assert_eq!(dashboard.visible_strategies().len(), 5);
    }

    #[test]
    fn test_selecting_an_asset_twice_keeps_it() {
        let mut dashboard = open_for(&muser());
        dashboard.select_asset("Gold");
        dashboard.select_asset("gold");
        assert_eq!(dashboard.criteria().assets().len(), 1);
        assert_eq!(ids(&dashboard.visible_strategies()), vec![4]);

        dashboard.select_asset("STOCKS");
        assert_eq!(ids(&dashboard.visible_strategies()), vec![1, 4]);
    }

    #[test]
    fn test_search_matches_description() {
        let mut dashboard = open_for(&muser());
        dashboard.set_search("bond portfolio");
        assert_eq!(ids(&dashboard.visible_strategies()), vec![3]);
    }
}
