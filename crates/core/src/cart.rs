//! Cart arithmetic in integer minor units (cents).

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::ProductId;

/// Maximum discount expressed in basis points (100%).
pub const MAX_BASIS_POINTS: u32 = 10_000;

/// One product line in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: u64,
    pub quantity: u32,
}

impl CartLine {
    pub fn line_total(&self) -> u64 {
        self.unit_price.saturating_mul(u64::from(self.quantity))
    }
}

/// Discount from an applied promotion.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum Discount {
    /// Percentage in basis points (`1500` = 15%).
    Percentage(u32),
    /// Fixed amount off, in minor units.
    Fixed(u64),
}

impl Discount {
    pub fn percentage(basis_points: u32) -> DomainResult<Self> {
        if basis_points > MAX_BASIS_POINTS {
            return Err(DomainError::validation(format!(
                "discount of {basis_points} bps exceeds 100%"
            )));
        }
        Ok(Self::Percentage(basis_points))
    }

    /// Amount taken off `subtotal`; never more than the subtotal.
    pub fn amount_off(&self, subtotal: u64) -> u64 {
        match *self {
            Discount::Percentage(bps) => {
                let bps = u128::from(bps.min(MAX_BASIS_POINTS));
                (u128::from(subtotal) * bps / u128::from(MAX_BASIS_POINTS)) as u64
            }
            Discount::Fixed(amount) => amount.min(subtotal),
        }
    }
}

/// Totals shown in the cart and sent to checkout.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub item_count: u32,
    pub subtotal: u64,
    pub discount: u64,
    pub total: u64,
}

impl CartTotals {
    pub fn compute(lines: &[CartLine], discount: Option<Discount>) -> Self {
        let subtotal = lines
            .iter()
            .fold(0u64, |acc, line| acc.saturating_add(line.line_total()));
        let item_count = lines
            .iter()
            .fold(0u32, |acc, line| acc.saturating_add(line.quantity));
        let discount = discount.map(|d| d.amount_off(subtotal)).unwrap_or(0);

        Self {
            item_count,
            subtotal,
            discount,
            total: subtotal - discount,
        }
    }
}

/// Format minor units as a price string (`1999` -> `"19.99"`).
pub fn format_minor_units(amount: u64) -> String {
    format!("{}.{:02}", amount / 100, amount % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: &str, unit_price: u64, quantity: u32) -> CartLine {
        CartLine {
            product_id: id.parse().unwrap(),
            name: id.to_string(),
            unit_price,
            quantity,
        }
    }

    #[test]
    fn totals_without_discount() {
        let lines = vec![line("serum", 2_500, 2), line("toner", 1_299, 1)];
        let totals = CartTotals::compute(&lines, None);
        assert_eq!(totals.item_count, 3);
        assert_eq!(totals.subtotal, 6_299);
        assert_eq!(totals.discount, 0);
        assert_eq!(totals.total, 6_299);
    }

    #[test]
    fn percentage_discount_rounds_down() {
        let lines = vec![line("cleanser", 999, 1)];
        let totals = CartTotals::compute(&lines, Some(Discount::percentage(1_500).unwrap()));
        // 15% of 9.99 = 1.4985 -> 1.49
        assert_eq!(totals.discount, 149);
        assert_eq!(totals.total, 850);
    }

    #[test]
    fn fixed_discount_is_capped_at_subtotal() {
        let lines = vec![line("mask", 500, 1)];
        let totals = CartTotals::compute(&lines, Some(Discount::Fixed(2_000)));
        assert_eq!(totals.discount, 500);
        assert_eq!(totals.total, 0);
    }

    #[test]
    fn percentage_over_one_hundred_is_rejected() {
        assert!(Discount::percentage(10_001).is_err());
    }

    #[test]
    fn formats_minor_units() {
        assert_eq!(format_minor_units(1_999), "19.99");
        assert_eq!(format_minor_units(5), "0.05");
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: a discount never makes the total exceed the subtotal or go negative.
            #[test]
            fn total_is_bounded_by_subtotal(
                prices in proptest::collection::vec((0u64..100_000, 0u32..20), 0..10),
                bps in 0u32..=MAX_BASIS_POINTS,
            ) {
                let lines: Vec<CartLine> = prices
                    .iter()
                    .enumerate()
                    .map(|(i, (p, q))| line(&format!("p{i}"), *p, *q))
                    .collect();
                let totals = CartTotals::compute(&lines, Some(Discount::Percentage(bps)));
                prop_assert!(totals.total <= totals.subtotal);
                prop_assert_eq!(totals.subtotal, totals.total + totals.discount);
            }
        }
    }
}
