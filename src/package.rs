//! Package calculator
//!
//! Maps the number of pages found on a site to the Luna offer tier, its
//! one-time price and its monthly fee.

use serde::Serialize;
use std::fmt;

/// Base one-time price of the largest fixed tier, in euros
const ENTERPRISE_BASE_PRICE: u64 = 18_000;

/// Surcharge per additional block of pages above the Advanced tier
const ENTERPRISE_BLOCK_PRICE: u64 = 1_000;

/// Pages per Enterprise surcharge block
const ENTERPRISE_BLOCK_PAGES: u64 = 200;

/// Commercial tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Tier {
    Starter,
    Professional,
    Advanced,
    Enterprise,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Starter => "Starter",
            Self::Professional => "Professional",
            Self::Advanced => "Advanced",
            Self::Enterprise => "Enterprise",
        };
        f.write_str(name)
    }
}

/// A sized offer for a crawled site
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Package {
    pub tier: Tier,

    /// One-time price, e.g. `12.000 €`
    pub upfront_price: String,

    /// Recurring fee, e.g. `697 €/Monat`
    pub monthly_fee: String,
}

/// Calculates the package for a page count
///
/// | Pages     | Tier         | One-time                                 | Monthly       |
/// |-----------|--------------|------------------------------------------|---------------|
/// | ≤ 50      | Starter      | 12.000 €                                 | 697 €/Monat   |
/// | 51–100    | Professional | 15.000 €                                 | 997 €/Monat   |
/// | 101–200   | Advanced     | 18.000 €                                 | 1.497 €/Monat |
/// | > 200     | Enterprise   | 18.000 € + 1.000 € per ⌊(n−1)/200⌋ block | 1.997 €/Monat |
///
/// # Examples
///
/// ```
/// use luna_crawler::package::{calculate_package, Tier};
///
/// let package = calculate_package(201);
/// assert_eq!(package.tier, Tier::Enterprise);
/// assert_eq!(package.upfront_price, "19.000 €");
/// ```
pub fn calculate_package(page_count: usize) -> Package {
    match page_count {
        0..=50 => Package::fixed(Tier::Starter, "12.000 €", "697 €/Monat"),
        51..=100 => Package::fixed(Tier::Professional, "15.000 €", "997 €/Monat"),
        101..=200 => Package::fixed(Tier::Advanced, "18.000 €", "1.497 €/Monat"),
        _ => {
            let extra_blocks = (page_count as u64 - 1) / ENTERPRISE_BLOCK_PAGES;
            let price = extra_blocks
                .saturating_mul(ENTERPRISE_BLOCK_PRICE)
                .saturating_add(ENTERPRISE_BASE_PRICE);
            Package {
                tier: Tier::Enterprise,
                upfront_price: format!("{} €", format_thousands(price)),
                monthly_fee: "1.997 €/Monat".to_string(),
            }
        }
    }
}

impl Package {
    fn fixed(tier: Tier, upfront_price: &str, monthly_fee: &str) -> Self {
        Self {
            tier,
            upfront_price: upfront_price.to_string(),
            monthly_fee: monthly_fee.to_string(),
        }
    }
}

/// Formats an integer with `.` as the thousands separator
fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut formatted = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            formatted.push('.');
        }
        formatted.push(digit);
    }

    formatted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_pages_is_starter() {
        assert_eq!(calculate_package(0).tier, Tier::Starter);
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(calculate_package(50).tier, Tier::Starter);
        assert_eq!(calculate_package(51).tier, Tier::Professional);
        assert_eq!(calculate_package(100).tier, Tier::Professional);
        assert_eq!(calculate_package(101).tier, Tier::Advanced);
        assert_eq!(calculate_package(200).tier, Tier::Advanced);
        assert_eq!(calculate_package(201).tier, Tier::Enterprise);
    }

    #[test]
    fn test_fixed_prices() {
        let starter = calculate_package(10);
        assert_eq!(starter.upfront_price, "12.000 €");
        assert_eq!(starter.monthly_fee, "697 €/Monat");

        let professional = calculate_package(75);
        assert_eq!(professional.upfront_price, "15.000 €");
        assert_eq!(professional.monthly_fee, "997 €/Monat");

        let advanced = calculate_package(150);
        assert_eq!(advanced.upfront_price, "18.000 €");
        assert_eq!(advanced.monthly_fee, "1.497 €/Monat");
    }

    #[test]
    fn test_enterprise_blocks() {
        assert_eq!(calculate_package(201).upfront_price, "19.000 €");
        assert_eq!(calculate_package(400).upfront_price, "19.000 €");
        assert_eq!(calculate_package(401).upfront_price, "20.000 €");
        assert_eq!(calculate_package(201).monthly_fee, "1.997 €/Monat");
    }

    #[test]
    fn test_enterprise_large_counts() {
        // 18000 + 1000 * 249 = 267000
        assert_eq!(calculate_package(50_000).upfront_price, "267.000 €");
        // 18000 + 1000 * 4999 = 5017000
        assert_eq!(calculate_package(1_000_000).upfront_price, "5.017.000 €");
    }

    #[test]
    fn test_enterprise_price_saturates() {
        let package = calculate_package(usize::MAX);
        assert_eq!(package.tier, Tier::Enterprise);
        assert!(package.upfront_price.ends_with(" €"));
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1_000), "1.000");
        assert_eq!(format_thousands(19_000), "19.000");
        assert_eq!(format_thousands(1_234_567), "1.234.567");
    }

    #[test]
    fn test_tier_display() {
        assert_eq!(Tier::Enterprise.to_string(), "Enterprise");
    }
}
