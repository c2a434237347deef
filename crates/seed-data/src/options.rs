use core_types::SelectOption;

/// Asset classes a user can filter strategies by. The values are the case-folded
/// labels matched against strategy assets.
pub fn asset_types() -> Vec<SelectOption> {
    options(&[
        ("stocks", "Stocks"),
        ("bonds", "Bonds"),
        ("commodities", "Commodities"),
        ("forex", "Foreign Exchange (FX)"),
        ("crypto", "Cryptocurrencies"),
        ("realestate", "Real Estate"),
    ])
}

pub fn risk_levels() -> Vec<SelectOption> {
    options(&[
        ("low", "Conservative (Low Risk)"),
        ("medium", "Balanced (Medium Risk)"),
        ("high", "Aggressive (High Risk)"),
    ])
}

pub fn strategy_types() -> Vec<SelectOption> {
    options(&[
        ("multi-asset", "Multi-Asset Allocation"),
        ("sector-rotation", "Sector Rotation"),
        ("trend-following", "Trend Following"),
        ("value", "Value Investing"),
        ("growth", "Growth Investing"),
        ("income", "Income Generation"),
        ("alternative", "Alternative Investments"),
    ])
}

fn options(pairs: &[(&str, &str)]) -> Vec<SelectOption> {
    pairs
        .iter()
        .map(|(value, label)| SelectOption {
            value: value.to_string(),
            label: label.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::RiskTier;

    #[test]
    fn test_risk_level_values_parse() {
        for option in risk_levels() {
            assert!(option.value.parse::<RiskTier>().is_ok());
        }
    }

    #[test]
    fn test_option_counts() {
        assert_eq!(asset_types().len(), 6);
        assert_eq!(strategy_types().len(), 7);
    }
}
