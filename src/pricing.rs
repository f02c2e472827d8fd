//! Pricing

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, iso};
use serde::Serialize;

use crate::cart::CartLine;

/// Tax rate applied to the cart subtotal (5%).
pub const TAX_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

/// Derived totals over a cart, recomputed on demand and never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    /// Sum of all line quantities
    pub item_count: u64,

    /// Sum of `price * quantity` over all lines
    pub subtotal: u64,

    /// Tax on the subtotal, rounded half-up to whole rupees
    pub tax: u64,

    /// `subtotal + tax`
    pub total: u64,
}

impl CartSnapshot {
    /// Compute the snapshot for a set of cart lines.
    pub fn from_lines(lines: &[CartLine]) -> Self {
        let (item_count, subtotal) = lines.iter().fold((0_u64, 0_u64), |(count, sum), line| {
            (
                count.saturating_add(u64::from(line.quantity)),
                sum.saturating_add(line.line_total()),
            )
        });

        let tax = tax_for(subtotal);

        Self {
            item_count,
            subtotal,
            tax,
            total: subtotal.saturating_add(tax),
        }
    }

    /// Whether the snapshot covers no items at all.
    pub fn is_empty(&self) -> bool {
        self.item_count == 0
    }
}

/// Tax owed on a subtotal: `round(subtotal * 0.05)` with ties rounded up.
pub fn tax_for(subtotal: u64) -> u64 {
    let applied = Decimal::from(subtotal) * TAX_RATE;

    // Identical to half-up for non-negative amounts.
    let rounded = applied.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    // 5% of a u64 always fits back into a u64.
    rounded.to_u64().unwrap_or(u64::MAX)
}

/// Format a whole-rupee amount for display, e.g. `₹45,000.00`.
pub fn format_rupees(amount: u64) -> String {
    match i64::try_from(amount) {
        Ok(major) => Money::from_major(major, iso::INR).to_string(),
        Err(_) => format!("₹{amount}"),
    }
}
