//! Pure derivation rules for the reporting and notification pipelines.
//!
//! Everything in this module is deterministic and free of I/O: given the same
//! inputs, the same classification or score comes out. The report and
//! notification services feed these functions with rows they have already
//! fetched; keeping the rules here, as named units, is what makes them
//! independently regression-testable.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::STATUS_ATIVO;

/// Coarse classification of stock sufficiency relative to the configured
/// minimum. Variants are ordered from most to least depleted so that the
/// derived `Ord` matches severity rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
pub enum StockLevel {
    #[serde(rename = "Crítico")]
    Critico,
    #[serde(rename = "Baixo")]
    Baixo,
    #[serde(rename = "Médio")]
    Medio,
    #[serde(rename = "Alto")]
    Alto,
}

impl StockLevel {
    /// Display label used by chart axes and detail rows.
    pub fn label(self) -> &'static str {
        match self {
            StockLevel::Critico => "Crítico",
            StockLevel::Baixo => "Baixo",
            StockLevel::Medio => "Médio",
            StockLevel::Alto => "Alto",
        }
    }
}

/// Notification severity bucket, ordered most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

/// Classifies stock on hand against the configured minimum.
///
/// Boundary values resolve to the stricter (more depleted) tier: a product
/// sitting exactly at its minimum is `Baixo`, exactly at twice the minimum is
/// `Medio`.
pub fn classify_stock(stock: i32, min_stock: i32) -> StockLevel {
    if stock == 0 {
        StockLevel::Critico
    } else if stock <= min_stock {
        StockLevel::Baixo
    } else if i64::from(stock) <= 2 * i64::from(min_stock) {
        StockLevel::Medio
    } else {
        StockLevel::Alto
    }
}

/// Severity of a low-stock condition, derived from the stock/minimum ratio.
///
/// Zero stock is always critical; otherwise a product at 20% of its minimum
/// or less is high, at half or less is medium, and anything above that is a
/// low-severity reminder.
pub fn stock_severity(stock: i32, min_stock: i32) -> Severity {
    let ratio = if min_stock > 0 {
        f64::from(stock) / f64::from(min_stock)
    } else {
        0.0
    };

    if stock == 0 {
        Severity::Critical
    } else if ratio <= 0.2 {
        Severity::High
    } else if ratio <= 0.5 {
        Severity::Medium
    } else {
        Severity::Low
    }
}

/// Heuristic 0-10 supplier performance score.
///
/// Additive point rules over order volume, order count, recency of the last
/// order and the supplier's active flag; the sum is clamped to [0, 10].
pub fn score_supplier(
    total_value: f64,
    total_orders: i64,
    days_since_last_order: i64,
    status: &str,
) -> u8 {
    let mut score: i32 = 0;

    if total_value > 10_000.0 {
        score += 3;
    } else if total_value > 5_000.0 {
        score += 2;
    } else if total_value > 1_000.0 {
        score += 1;
    }

    if total_orders > 10 {
        score += 3;
    } else if total_orders > 5 {
        score += 2;
    } else if total_orders > 0 {
        score += 1;
    }

    if days_since_last_order <= 7 {
        score += 2;
    } else if days_since_last_order <= 30 {
        score += 1;
    }

    if status == STATUS_ATIVO {
        score += 2;
    } else {
        score -= 1;
    }

    score.clamp(0, 10) as u8
}

/// Percentage of delivered orders, rounded to the nearest integer.
///
/// Returns 0 for an empty order set rather than dividing by zero.
pub fn completion_rate(delivered: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((delivered as f64 / total as f64) * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 5, StockLevel::Critico)]
    #[case(5, 5, StockLevel::Baixo)]
    #[case(9, 5, StockLevel::Medio)]
    #[case(10, 5, StockLevel::Medio)]
    #[case(11, 5, StockLevel::Alto)]
    fn classify_stock_scenarios(
        #[case] stock: i32,
        #[case] min_stock: i32,
        #[case] expected: StockLevel,
    ) {
        assert_eq!(classify_stock(stock, min_stock), expected);
    }

    #[test]
    fn classify_stock_with_zero_minimum() {
        assert_eq!(classify_stock(0, 0), StockLevel::Critico);
        // Anything above a zero minimum exceeds twice the minimum.
        assert_eq!(classify_stock(1, 0), StockLevel::Alto);
    }

    #[test]
    fn stock_severity_buckets() {
        assert_eq!(stock_severity(0, 5), Severity::Critical);
        assert_eq!(stock_severity(1, 5), Severity::High); // ratio 0.2
        assert_eq!(stock_severity(2, 5), Severity::Medium); // ratio 0.4
        assert_eq!(stock_severity(4, 5), Severity::Low); // ratio 0.8
    }

    #[test]
    fn score_supplier_clamps_at_ten() {
        // 3 (value) + 3 (orders) + 2 (recency) + 2 (ativo) = 10
        assert_eq!(score_supplier(12_000.0, 12, 3, "ativo"), 10);
    }

    #[test]
    fn score_supplier_floor_is_zero() {
        // Inactive supplier with no history: -1 clamped up to 0.
        assert_eq!(score_supplier(0.0, 0, 999, "inativo"), 0);
    }

    #[test]
    fn completion_rate_of_empty_set_is_zero() {
        assert_eq!(completion_rate(0, 0), 0);
    }

    #[test]
    fn completion_rate_rounds() {
        assert_eq!(completion_rate(1, 3), 33);
        assert_eq!(completion_rate(2, 3), 67);
        assert_eq!(completion_rate(3, 3), 100);
    }

    proptest! {
        #[test]
        fn classify_stock_is_monotonic_in_stock(
            min_stock in 0i32..10_000,
            stock in 0i32..100_000,
        ) {
            // Adding a unit of stock never moves the product into a more
            // depleted tier.
            let here = classify_stock(stock, min_stock);
            let next = classify_stock(stock.saturating_add(1), min_stock);
            prop_assert!(next >= here, "{:?} regressed to {:?}", here, next);
        }

        #[test]
        fn score_supplier_stays_in_range(
            total_value in -1.0e9f64..1.0e9,
            total_orders in -1_000i64..1_000_000,
            days in -1_000i64..100_000,
            status in prop_oneof![Just("ativo"), Just("inativo"), Just("")],
        ) {
            let score = score_supplier(total_value, total_orders, days, status);
            prop_assert!(score <= 10);
        }

        #[test]
        fn completion_rate_never_exceeds_hundred(
            delivered in 0usize..1_000,
            extra in 0usize..1_000,
        ) {
            let total = delivered + extra;
            let rate = completion_rate(delivered, total);
            prop_assert!(rate <= 100);
        }
    }
}
