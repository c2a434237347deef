use crate::enums::{RiskTier, Role, UserStatus};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Return percentages of a strategy over four fixed horizons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Performance {
    pub daily: Decimal,
    pub weekly: Decimal,
    pub monthly: Decimal,
    pub yearly: Decimal,
}

/// A single point of a strategy's historical value series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoricalPoint {
    pub date: NaiveDate,
    pub value: Decimal,
}

/// A pre-defined investment allocation with fixed mock performance.
///
/// `historical_data` is sorted ascending by date and every value is non-negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Strategy {
    pub id: u32,
    pub name: String,
    /// The category label, e.g. "Multi-Asset" or "Sector Rotation".
    #[serde(rename = "type")]
    pub category: String,
    pub assets: Vec<String>,
    pub performance: Performance,
    pub risk: RiskTier,
    pub creator: String,
    pub description: String,
    pub historical_data: Vec<HistoricalPoint>,
}

/// A registered account as seen by the admin panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u32,
    pub username: String,
    pub email: String,
    pub registration_date: NaiveDate,
    pub last_login: NaiveDate,
    pub status: UserStatus,
    /// Ids of subscribed strategies. Not checked against the strategy catalog.
    pub strategies: Vec<u32>,
}

/// The authenticated identity held by a session and persisted as `{id, username, role}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: u32,
    pub username: String,
    pub role: Role,
}

impl SessionUser {
    pub fn new(id: u32, username: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            username: username.into(),
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// A value/label pair for the selectable filter options (asset types, risk levels, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// A subscription plan shown on the pricing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingTier {
    pub title: String,
    pub price: Decimal,
    pub period: String,
    pub description: String,
    pub features: Vec<String>,
    pub button_text: String,
    pub highlighted: bool,
}
