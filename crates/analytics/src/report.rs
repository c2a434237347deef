use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The headline figures of the admin panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_users: usize,
    pub active_users: usize,
    pub total_strategies: usize,
    /// Mean number of subscribed strategies per user, one decimal.
    /// `None` when there are no users to average over.
    pub avg_strategies_per_user: Option<Decimal>,
}

/// First/last/extreme values of a strategy's historical series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySummary {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub points: usize,
    pub first_value: Decimal,
    pub last_value: Decimal,
    pub min_value: Decimal,
    pub max_value: Decimal,
    pub change: Decimal,
    /// Change relative to the first value, in percent with two decimals.
    /// `None` when the series starts at zero.
    pub change_pct: Option<Decimal>,
}
