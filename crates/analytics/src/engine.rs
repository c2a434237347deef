use crate::criteria::{StrategyCriteria, UserCriteria};
use crate::error::AnalyticsError;
use crate::filter::Filter;
use crate::report::{DashboardStats, HistorySummary};
use core_types::{HistoricalPoint, RiskTier, Strategy, User};
use rust_decimal::{Decimal, RoundingStrategy};

/// A stateless query engine over the in-memory collections.
///
/// Every method only reads its inputs, so it is safe to call repeatedly with the
/// same criteria and always get the same answer.
#[derive(Debug, Default, Clone, Copy)]
pub struct QueryEngine {}

impl QueryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The admin panel's user filter: search text against username and email.
    pub fn user_filter(&self, criteria: &UserCriteria) -> Filter<User> {
        Filter::new().text(&criteria.search, &[user_username, user_email])
    }

    /// The strategy filter: search text against name and description, plus
    /// risk, category and asset selections.
    pub fn strategy_filter(&self, criteria: &StrategyCriteria) -> Filter<Strategy> {
        Filter::new()
            .text(&criteria.search, &[strategy_name, strategy_description])
            .equals(criteria.risk, strategy_risk)
            .contains(criteria.category.as_deref(), strategy_category)
            .any_of(criteria.assets(), strategy_assets)
    }

    pub fn filter_users<'a>(&self, users: &'a [User], criteria: &UserCriteria) -> Vec<&'a User> {
        self.user_filter(criteria).apply(users)
    }

    pub fn filter_strategies<'a>(
        &self,
        strategies: &'a [Strategy],
        criteria: &StrategyCriteria,
    ) -> Vec<&'a Strategy> {
        let filter = self.strategy_filter(criteria);
        let matched = filter.apply(strategies);
        tracing::debug!(
            predicates = filter.len(),
            matched = matched.len(),
            total = strategies.len(),
            "Strategy filter applied."
        );
        matched
    }

    pub fn strategy_by_id<'a>(&self, strategies: &'a [Strategy], id: u32) -> Option<&'a Strategy> {
        strategies.iter().find(|s| s.id == id)
    }

    /// Resolves a user's subscription ids against the catalog, in subscription order.
    /// Ids with no matching strategy are skipped.
    pub fn subscribed_strategies<'a>(&self, user: &User, strategies: &'a [Strategy]) -> Vec<&'a Strategy> {
        self.strategies_by_ids(&user.strategies, strategies)
    }

    /// Looks up each id in `ids`, keeping their order and skipping unknown ones.
    pub fn strategies_by_ids<'a>(&self, ids: &[u32], strategies: &'a [Strategy]) -> Vec<&'a Strategy> {
        ids.iter()
            .filter_map(|id| self.strategy_by_id(strategies, *id))
            .collect()
    }

    pub fn active_user_count(&self, users: &[User]) -> usize {
        users.iter().filter(|u| u.status.is_active()).count()
    }

    /// Mean number of subscribed strategies per user, rounded half-up to one decimal.
    pub fn average_subscriptions(&self, users: &[User]) -> Result<Decimal, AnalyticsError> {
        if users.is_empty() {
            return Err(AnalyticsError::NoData(
                "average subscriptions over an empty user list".to_string(),
            ));
        }
        let total: usize = users.iter().map(|u| u.strategies.len()).sum();
        let mean = Decimal::from(total) / Decimal::from(users.len());
        Ok(mean.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero))
    }

    pub fn dashboard_stats(&self, users: &[User], strategies: &[Strategy]) -> DashboardStats {
        DashboardStats {
            total_users: users.len(),
            active_users: self.active_user_count(users),
            total_strategies: strategies.len(),
            avg_strategies_per_user: self.average_subscriptions(users).ok(),
        }
    }

    /// Summarises a historical series. The series must be sorted by date.
    pub fn summarize_history(&self, series: &[HistoricalPoint]) -> Result<HistorySummary, AnalyticsError> {
        let (Some(first), Some(last)) = (series.first(), series.last()) else {
            return Err(AnalyticsError::NoData("empty historical series".to_string()));
        };

        let (min_value, max_value) = series
            .iter()
            .fold((Decimal::MAX, Decimal::MIN), |(min, max), p| {
                (min.min(p.value), max.max(p.value))
            });

        let change = last.value - first.value;
        let change_pct = if first.value.is_zero() {
            None
        } else {
            Some(
                (change / first.value * Decimal::ONE_HUNDRED)
                    .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
            )
        };

        Ok(HistorySummary {
            start_date: first.date,
            end_date: last.date,
            points: series.len(),
            first_value: first.value,
            last_value: last.value,
            min_value,
            max_value,
            change,
            change_pct,
        })
    }
}

// --- Field accessors ---

fn user_username(user: &User) -> &str {
    &user.username
}

fn user_email(user: &User) -> &str {
    &user.email
}

fn strategy_name(strategy: &Strategy) -> &str {
    &strategy.name
}

fn strategy_description(strategy: &Strategy) -> &str {
    &strategy.description
}

fn strategy_category(strategy: &Strategy) -> &str {
    &strategy.category
}

fn strategy_risk(strategy: &Strategy) -> RiskTier {
    strategy.risk
}

fn strategy_assets(strategy: &Strategy) -> &[String] {
    &strategy.assets
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_types::UserStatus;
    use rust_decimal_macros::dec;
    use seed_data::{seed_strategies, seed_users};

    fn strategies() -> Vec<Strategy> {
        seed_strategies(NaiveDate::from_ymd_opt(2024, 4, 5).unwrap(), 10, 1)
    }

    fn ids<T, F: Fn(&T) -> u32>(records: &[&T], id: F) -> Vec<u32> {
        records.iter().map(|r| id(*r)).collect()
    }

    #[test]
    fn test_seed_aggregates() {
        let engine = QueryEngine::new();
        let users = seed_users();
        assert_eq!(engine.active_user_count(&users), 4);
        assert_eq!(engine.average_subscriptions(&users), Ok(dec!(2.6)));

        let stats = engine.dashboard_stats(&users, &strategies());
        assert_eq!(stats.total_users, 5);
        assert_eq!(stats.total_strategies, 5);
        assert_eq!(stats.avg_strategies_per_user, Some(dec!(2.6)));
    }

    #[test]
    fn test_average_rounds_half_up() {
        let engine = QueryEngine::new();
        let mut users = seed_users();
        // Counts [3, 5, 2, 1] -> 11 / 4 = 2.75 -> 2.8
        users.remove(3);
        assert_eq!(engine.average_subscriptions(&users), Ok(dec!(2.8)));
        // Counts [3, 1] -> 2.0
        let pair = vec![users[0].clone(), users[3].clone()];
        assert_eq!(engine.average_subscriptions(&pair), Ok(dec!(2.0)));
    }

    #[test]
    fn test_average_over_no_users_is_no_data() {
        let engine = QueryEngine::new();
        assert!(matches!(
            engine.average_subscriptions(&[]),
            Err(AnalyticsError::NoData(_))
        ));
        assert_eq!(engine.dashboard_stats(&[], &[]).avg_strategies_per_user, None);
    }

    #[test]
    fn test_user_search_matches_username_or_email() {
        let engine = QueryEngine::new();
        let users = seed_users();

        let by_email = engine.filter_users(&users, &UserCriteria::new("JOHN@"));
        assert_eq!(ids(&by_email, |u: &User| u.id), vec![3]);

        let by_name = engine.filter_users(&users, &UserCriteria::new("smith"));
        assert_eq!(ids(&by_name, |u: &User| u.id), vec![4]);

        let everyone = engine.filter_users(&users, &UserCriteria::default());
        assert_eq!(everyone.len(), users.len());
    }

    #[test]
    fn test_strategy_filters() {
        let engine = QueryEngine::new();
        let catalog = strategies();

        let high = engine.filter_strategies(&catalog, &StrategyCriteria::new().with_risk(RiskTier::High));
        assert_eq!(ids(&high, |s: &Strategy| s.id), vec![2, 4]);

        let income = engine.filter_strategies(&catalog, &StrategyCriteria::new().with_category("INCOME"));
        assert_eq!(ids(&income, |s: &Strategy| s.id), vec![3]);

        // Only exact (case-folded) labels count: "stocks" does not match "Tech Stocks".
        let stocks = engine.filter_strategies(&catalog, &StrategyCriteria::new().with_asset("stocks"));
        assert_eq!(ids(&stocks, |s: &Strategy| s.id), vec![1]);

        let gold_or_fx = engine.filter_strategies(
            &catalog,
            &StrategyCriteria::new().with_asset("gold").with_asset("fx"),
        );
        assert_eq!(ids(&gold_or_fx, |s: &Strategy| s.id), vec![1, 4]);

        let search = engine.filter_strategies(&catalog, &StrategyCriteria::new().with_search("bond portfolio"));
        assert_eq!(ids(&search, |s: &Strategy| s.id), vec![3]);
    }

    #[test]
    fn test_strategy_predicates_are_anded() {
        let engine = QueryEngine::new();
        let catalog = strategies();
        let criteria = StrategyCriteria::new()
            .with_risk(RiskTier::Medium)
            .with_asset("reits");
        let filter = engine.strategy_filter(&criteria);

        for strategy in &catalog {
            let risk_ok = strategy.risk == RiskTier::Medium;
            let asset_ok = strategy.assets.iter().any(|a| a.to_lowercase() == "reits");
            assert_eq!(filter.matches(strategy), risk_ok && asset_ok, "strategy {}", strategy.id);
        }
        // Strategy 1 is medium risk without REITs; only 5 satisfies both.
        assert_eq!(ids(&filter.apply(&catalog), |s: &Strategy| s.id), vec![5]);
    }

    #[test]
    fn test_filter_result_is_an_idempotent_subset() {
        let engine = QueryEngine::new();
        let catalog = strategies();
        let criteria = StrategyCriteria::new().with_asset("bitcoin").with_asset("stocks");

        let first = engine.filter_strategies(&catalog, &criteria);
        let second = engine.filter_strategies(&catalog, &criteria);
        assert_eq!(first, second);

        for matched in &first {
            assert_eq!(
                catalog.iter().filter(|s| std::ptr::eq(*s, *matched)).count(),
                1
            );
        }
        let mut seen: Vec<u32> = first.iter().map(|s| s.id).collect();
        seen.dedup();
        assert_eq!(seen.len(), first.len());
    }

    #[test]
    fn test_subscribed_strategies_skip_unknown_ids() {
        let engine = QueryEngine::new();
        let catalog = strategies();
        let user = User {
            id: 9,
            username: "ghost".to_string(),
            email: "ghost@example.com".to_string(),
            registration_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            last_login: NaiveDate::from_ymd_opt(2023, 1, 2).unwrap(),
            status: UserStatus::Inactive,
            strategies: vec![5, 42, 2],
        };
        let subscribed = engine.subscribed_strategies(&user, &catalog);
        assert_eq!(ids(&subscribed, |s: &Strategy| s.id), vec![5, 2]);
        assert!(engine.strategy_by_id(&catalog, 42).is_none());
    }

    #[test]
    fn test_strategies_by_ids_keeps_order() {
        let engine = QueryEngine::new();
        let catalog = strategies();
        let found = engine.strategies_by_ids(&[4, 0, 1, 4], &catalog);
        assert_eq!(ids(&found, |s: &Strategy| s.id), vec![4, 1, 4]);
        assert!(engine.strategies_by_ids(&[], &catalog).is_empty());
    }

    #[test]
    fn test_history_summary() {
        let engine = QueryEngine::new();
        let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
        let series = vec![
            HistoricalPoint { date: day(1), value: dec!(100) },
            HistoricalPoint { date: day(2), value: dec!(90) },
            HistoricalPoint { date: day(3), value: dec!(125.5) },
            HistoricalPoint { date: day(4), value: dec!(110) },
        ];
        let summary = engine.summarize_history(&series).unwrap();
        assert_eq!(summary.points, 4);
        assert_eq!(summary.start_date, day(1));
        assert_eq!(summary.end_date, day(4));
        assert_eq!(summary.min_value, dec!(90));
        assert_eq!(summary.max_value, dec!(125.5));
        assert_eq!(summary.change, dec!(10));
        assert_eq!(summary.change_pct, Some(dec!(10.00)));

        assert!(engine.summarize_history(&[]).is_err());
    }
}
