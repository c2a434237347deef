use core_types::PricingTier;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// The three subscription plans on the pricing page, cheapest first.
pub fn pricing_tiers() -> Vec<PricingTier> {
    vec![
        tier(
            "Basic",
            dec!(29),
            "Perfect for individual investors starting their journey",
            &[
                "5 strategy recommendations per month",
                "Basic performance tracking",
                "Weekly market updates",
                "Email notifications",
                "Basic asset classes (Stocks & Bonds)",
            ],
            "Get Started",
            false,
        ),
        tier(
            "Professional",
            dec!(79),
            "Ideal for serious investors seeking comprehensive insights",
            &[
                "15 strategy recommendations per month",
                "Advanced performance analytics",
                "Daily market updates",
                "Real-time notifications",
                "All asset classes",
                "Risk assessment tools",
                "Portfolio optimization",
            ],
            "Subscribe Now",
            true,
        ),
        tier(
            "Enterprise",
            dec!(199),
            "For institutions and professional portfolio managers",
            &[
                "Unlimited strategy recommendations",
                "Institutional-grade analytics",
                "Real-time market data & alerts",
                "Custom strategy development",
                "All asset classes with detailed analysis",
                "Advanced risk modeling",
                "API access",
                "Dedicated account manager",
            ],
            "Contact Sales",
            false,
        ),
    ]
}

fn tier(
    title: &str,
    price: Decimal,
    description: &str,
    features: &[&str],
    button_text: &str,
    highlighted: bool,
) -> PricingTier {
    PricingTier {
        title: title.to_string(),
        price,
        period: "month".to_string(),
        description: description.to_string(),
        features: features.iter().map(|f| f.to_string()).collect(),
        button_text: button_text.to_string(),
        highlighted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exactly_one_highlighted_tier() {
        let tiers = pricing_tiers();
        let highlighted: Vec<_> = tiers.iter().filter(|t| t.highlighted).collect();
        assert_eq!(highlighted.len(), 1);
        assert_eq!(highlighted[0].title, "Professional");
    }

    #[test]
    fn test_prices_ascend() {
        let prices: Vec<_> = pricing_tiers().into_iter().map(|t| t.price).collect();
        assert_eq!(prices, vec![dec!(29), dec!(79), dec!(199)]);
    }
}
