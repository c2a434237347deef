use core_types::RiskTier;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The admin panel's search box.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCriteria {
    /// Matched against username and email.
    pub search: String,
}

impl UserCriteria {
    pub fn new(search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
        }
    }
}

/// The strategy explorer's filter panel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyCriteria {
    /// Matched against name and description.
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub risk: Option<RiskTier>,
    /// Matched as a case-insensitive substring of the category label.
    #[serde(default)]
    pub category: Option<String>,
    /// Case-folded asset labels.
    #[serde(default)]
    assets: BTreeSet<String>,
}

impl StrategyCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_risk(mut self, risk: RiskTier) -> Self {
        self.risk = Some(risk);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.set_category(Some(category.into()));
        self
    }

    pub fn with_asset(mut self, asset: &str) -> Self {
        self.select_asset(asset);
        self
    }

    pub fn select_asset(&mut self, asset: &str) {
        self.assets.insert(asset.to_lowercase());
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Selects the asset if it was not selected, deselects it otherwise.
    /// Returns whether the asset is selected afterwards.
    pub fn toggle_asset(&mut self, asset: &str) -> bool {
        let key = asset.to_lowercase();
        if self.assets.remove(&key) {
            false
        } else {
            self.assets.insert(key);
            true
        }
    }

    pub fn set_risk(&mut self, risk: Option<RiskTier>) {
        self.risk = risk;
    }

    /// An empty category is the same as no category.
    pub fn set_category(&mut self, category: Option<String>) {
        self.category = category.filter(|c| !c.trim().is_empty());
    }

    pub fn assets(&self) -> &BTreeSet<String> {
        &self.assets
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.risk.is_none() && self.category.is_none() && self.assets.is_empty()
    }
}
