use crate::history::generate_history;
use chrono::NaiveDate;
use core_types::{Performance, RiskTier, Strategy};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Length of the generated historical series, in days before the anchor date.
pub const DEFAULT_HISTORY_DAYS: u32 = 365;

const INITIAL_VALUE: f64 = 100.0;

struct StrategySeed {
    id: u32,
    name: &'static str,
    category: &'static str,
    assets: &'static [&'static str],
    performance: [Decimal; 4],
    risk: RiskTier,
    creator: &'static str,
    description: &'static str,
    volatility: f64,
}

const SEEDS: [StrategySeed; 5] = [
    StrategySeed {
        id: 1,
        name: "Global Macro Diversification",
        category: "Multi-Asset",
        assets: &["Stocks", "Bonds", "Commodities", "FX"],
        performance: [dec!(0.3), dec!(1.7), dec!(5.2), dec!(24.8)],
        risk: RiskTier::Medium,
        creator: "Quant Team Alpha",
        description: "A global macro strategy that allocates across different asset classes based on economic indicators and market trends.",
        volatility: 0.015,
    },
    StrategySeed {
        id: 2,
        name: "Tech-Commodities Rotation",
        category: "Sector Rotation",
        assets: &["Tech Stocks", "Energy Commodities", "Precious Metals"],
        performance: [dec!(-0.2), dec!(2.1), dec!(6.7), dec!(31.2)],
        risk: RiskTier::High,
        creator: "Sector Specialists",
        description: "Rotates between technology stocks and commodities based on economic cycles and inflation expectations.",
        volatility: 0.025,
    },
    StrategySeed {
        id: 3,
        name: "Fixed Income Fortress",
        category: "Income",
        assets: &["Government Bonds", "Corporate Bonds", "High-Yield Bonds"],
        performance: [dec!(0.1), dec!(0.5), dec!(1.8), dec!(8.7)],
        risk: RiskTier::Low,
        creator: "Bond Masters",
        description: "A conservative strategy focused on generating stable income through a diversified bond portfolio.",
        volatility: 0.007,
    },
    StrategySeed {
        id: 4,
        name: "Crypto-Traditional Blend",
        category: "Alternative",
        assets: &["Bitcoin", "Ethereum", "Blue-Chip Stocks", "Gold"],
        performance: [dec!(1.2), dec!(3.9), dec!(12.3), dec!(42.6)],
        risk: RiskTier::High,
        creator: "Digital Assets Team",
        description: "Combines cryptocurrency exposure with traditional safe-haven assets for a balanced approach to digital and physical assets.",
        volatility: 0.035,
    },
    StrategySeed {
        id: 5,
        name: "Real Estate Income Plus",
        category: "Real Estate",
        assets: &["REITs", "Real Estate Stocks", "Infrastructure"],
        performance: [dec!(0.2), dec!(1.1), dec!(3.6), dec!(15.4)],
        risk: RiskTier::Medium,
        creator: "Property Experts",
        description: "Focuses on generating income and capital appreciation through real estate investments across different sectors.",
        volatility: 0.012,
    },
];

/// Builds the strategy catalog with series of `history_days + 1` points ending on `anchor`.
///
/// Each strategy's walk is seeded from `rng_seed` combined with its id, so the whole
/// catalog is reproducible for a given seed.
pub fn seed_strategies(anchor: NaiveDate, history_days: u32, rng_seed: u64) -> Vec<Strategy> {
    SEEDS
        .iter()
        .map(|seed| {
            let [daily, weekly, monthly, yearly] = seed.performance;
            Strategy {
                id: seed.id,
                name: seed.name.to_string(),
                category: seed.category.to_string(),
                assets: seed.assets.iter().map(|a| a.to_string()).collect(),
                performance: Performance {
                    daily,
                    weekly,
                    monthly,
                    yearly,
                },
                risk: seed.risk,
                creator: seed.creator.to_string(),
                description: seed.description.to_string(),
                historical_data: generate_history(
                    history_days,
                    INITIAL_VALUE,
                    seed.volatility,
                    anchor,
                    rng_seed.wrapping_add(u64::from(seed.id)),
                ),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Strategy> {
        seed_strategies(NaiveDate::from_ymd_opt(2024, 4, 5).unwrap(), DEFAULT_HISTORY_DAYS, 0)
    }

    #[test]
    fn test_catalog_contents() {
        let strategies = catalog();
        assert_eq!(strategies.len(), 5);
        assert_eq!(
            strategies.iter().map(|s| s.id).collect::<Vec<_>>(),
            vec![1, 2, 3, 4, 5]
        );
        assert_eq!(strategies[1].name, "Tech-Commodities Rotation");
        assert_eq!(strategies[1].performance.daily, dec!(-0.2));
        assert_eq!(strategies[2].risk, RiskTier::Low);
        assert_eq!(strategies[3].assets, vec!["Bitcoin", "Ethereum", "Blue-Chip Stocks", "Gold"]);
    }

    #[test]
    fn test_every_series_is_well_formed() {
        for strategy in catalog() {
            let series = &strategy.historical_data;
            assert_eq!(series.len(), DEFAULT_HISTORY_DAYS as usize + 1);
            assert!(series.windows(2).all(|w| w[0].date < w[1].date));
            assert!(series.iter().all(|p| p.value >= Decimal::ZERO));
        }
    }
}
