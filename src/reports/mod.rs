//! Report envelopes and the pure shaping step that fills them.
//!
//! The report service fetches rows and hands them to the `shape_*` functions
//! here, which compute summaries and chart series without touching the
//! database. Detail rows are capped at [`DETAIL_LIMIT`] while summary counts
//! and totals always reflect the full result set.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

use crate::entities::{order_status, STATUS_ATIVO, STATUS_INATIVO};
use crate::scoring::{self, Severity, StockLevel};

/// Maximum number of detail rows included in any report payload.
pub const DETAIL_LIMIT: usize = 50;

/// Label/value series for count-based charts.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CountSeries {
    pub labels: Vec<String>,
    pub data: Vec<i64>,
}

/// Label/value series for monetary charts.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ValueSeries {
    pub labels: Vec<String>,
    pub data: Vec<f64>,
}

/// Per-week order counts and monetary totals, parallel to `labels`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WeeklySeries {
    pub labels: Vec<String>,
    pub orders: Vec<i64>,
    pub values: Vec<f64>,
}

// ---------------------------------------------------------------------------
// Stock performance

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StockProductRow {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub price: f64,
    pub stock: i32,
    pub min_stock: i32,
    pub stock_value: f64,
    pub stock_level: StockLevel,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockSummary {
    pub total_products: usize,
    pub critical_stock: usize,
    pub low_stock: usize,
    pub medium_stock: usize,
    pub high_stock: usize,
    pub total_value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockCharts {
    pub stock_levels: CountSeries,
    pub categories: CountSeries,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StockPerformanceReport {
    pub success: bool,
    pub summary: StockSummary,
    pub products: Vec<StockProductRow>,
    pub charts: StockCharts,
}

/// Builds the stock performance envelope from classified product rows.
///
/// Rows are ordered by stock value descending before truncation, so the
/// detail section always shows the highest-value inventory first. Category
/// chart labels come out alphabetically.
pub fn shape_stock_report(mut products: Vec<StockProductRow>) -> StockPerformanceReport {
    products.sort_by(|a, b| {
        b.stock_value
            .partial_cmp(&a.stock_value)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let count_level =
        |level: StockLevel| products.iter().filter(|p| p.stock_level == level).count();

    let summary = StockSummary {
        total_products: products.len(),
        critical_stock: count_level(StockLevel::Critico),
        low_stock: count_level(StockLevel::Baixo),
        medium_stock: count_level(StockLevel::Medio),
        high_stock: count_level(StockLevel::Alto),
        total_value: products.iter().map(|p| p.stock_value).sum(),
    };

    let stock_levels = CountSeries {
        labels: vec![
            "Crítico".into(),
            "Baixo".into(),
            "Médio".into(),
            "Alto".into(),
        ],
        data: vec![
            summary.critical_stock as i64,
            summary.low_stock as i64,
            summary.medium_stock as i64,
            summary.high_stock as i64,
        ],
    };

    let mut by_category: BTreeMap<String, i64> = BTreeMap::new();
    for p in &products {
        *by_category.entry(p.category.clone()).or_insert(0) += 1;
    }
    let categories = CountSeries {
        labels: by_category.keys().cloned().collect(),
        data: by_category.values().copied().collect(),
    };

    products.truncate(DETAIL_LIMIT);

    StockPerformanceReport {
        success: true,
        summary,
        products,
        charts: StockCharts {
            stock_levels,
            categories,
        },
    }
}

// ---------------------------------------------------------------------------
// Supplier analysis

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SupplierRow {
    pub id: i32,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: String,
    pub total_orders: i64,
    pub total_value: f64,
    pub total_products: i64,
    pub last_order_date: Option<DateTime<Utc>>,
    pub days_since_last_order: i64,
    #[serde(rename = "performanceScore")]
    pub performance_score: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SupplierSummary {
    pub total_suppliers: usize,
    pub active_suppliers: usize,
    pub inactive_suppliers: usize,
    pub excellent_performance: usize,
    pub total_value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SupplierCharts {
    pub performance: CountSeries,
    pub top_suppliers: ValueSeries,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SupplierAnalysisReport {
    pub success: bool,
    pub summary: SupplierSummary,
    pub suppliers: Vec<SupplierRow>,
    pub charts: SupplierCharts,
}

/// Scores each supplier, then builds the analysis envelope.
///
/// Supplier rows arrive with their aggregates filled in and a
/// `performance_score` of zero; the score is assigned here so the rule lives
/// in one place. Ordering is by total order value descending.
pub fn shape_supplier_report(mut suppliers: Vec<SupplierRow>) -> SupplierAnalysisReport {
    for s in suppliers.iter_mut() {
        s.performance_score = scoring::score_supplier(
            s.total_value,
            s.total_orders,
            s.days_since_last_order,
            &s.status,
        );
    }
    suppliers.sort_by(|a, b| {
        b.total_value
            .partial_cmp(&a.total_value)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let inactive = suppliers
        .iter()
        .filter(|s| s.status == STATUS_INATIVO)
        .count();
    let summary = SupplierSummary {
        total_suppliers: suppliers.len(),
        active_suppliers: suppliers
            .iter()
            .filter(|s| s.status == STATUS_ATIVO)
            .count(),
        inactive_suppliers: inactive,
        excellent_performance: suppliers
            .iter()
            .filter(|s| s.performance_score >= 8)
            .count(),
        total_value: suppliers.iter().map(|s| s.total_value).sum(),
    };

    let bucket = |lo: u8, hi: u8| {
        suppliers
            .iter()
            .filter(|s| s.performance_score >= lo && s.performance_score < hi)
            .count() as i64
    };
    let performance = CountSeries {
        labels: vec![
            "Excelente".into(),
            "Bom".into(),
            "Médio".into(),
            "Ruim".into(),
            "Inativo".into(),
        ],
        data: vec![
            bucket(8, u8::MAX),
            bucket(6, 8),
            bucket(4, 6),
            bucket(0, 4),
            inactive as i64,
        ],
    };

    let top_suppliers = ValueSeries {
        labels: suppliers.iter().take(10).map(|s| s.name.clone()).collect(),
        data: suppliers.iter().take(10).map(|s| s.total_value).collect(),
    };

    suppliers.truncate(DETAIL_LIMIT);

    SupplierAnalysisReport {
        success: true,
        summary,
        suppliers,
        charts: SupplierCharts {
            performance,
            top_suppliers,
        },
    }
}

// ---------------------------------------------------------------------------
// Executive dashboard

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardKpis {
    pub total_products: i64,
    pub stock_value: f64,
    pub critical_stock: i64,
    pub monthly_orders: i64,
    pub monthly_value: f64,
    pub active_suppliers: i64,
    pub pending_quotes: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardTrends {
    pub order_growth: i64,
    pub new_products: i64,
    pub new_suppliers: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardAlert {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub severity: Severity,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExecutiveDashboard {
    pub success: bool,
    pub kpis: DashboardKpis,
    pub trends: DashboardTrends,
    pub alerts: Vec<DashboardAlert>,
}

/// Month-over-month order growth as a rounded percentage.
///
/// Zero when the previous period had no orders, which avoids reporting an
/// infinite jump on a freshly seeded system.
pub fn order_growth(current: i64, previous: i64) -> i64 {
    if previous == 0 {
        return 0;
    }
    (((current - previous) as f64 / previous as f64) * 100.0).round() as i64
}

// ---------------------------------------------------------------------------
// Order trends

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderRow {
    pub id: i32,
    pub order_date: DateTime<Utc>,
    pub delivery_date: Option<DateTime<Utc>>,
    pub received_date: Option<DateTime<Utc>>,
    pub status: String,
    pub total_value: f64,
    pub supplier_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub total_orders: usize,
    pub total_value: f64,
    pub avg_delivery_time: f64,
    pub completion_rate: u32,
    pub pending_orders: usize,
    pub processing_orders: usize,
    pub delivered_orders: usize,
    pub cancelled_orders: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderCharts {
    pub weekly: WeeklySeries,
    pub status: CountSeries,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderTrendsReport {
    pub success: bool,
    pub summary: OrderSummary,
    pub orders: Vec<OrderRow>,
    pub charts: OrderCharts,
}

/// Builds the order trends envelope for the window starting at
/// `window_start` and spanning `days` days.
///
/// The weekly chart buckets orders into `Sem 1..N` slices of seven days from
/// the window start (the last slice absorbs any remainder). Average delivery
/// time is the mean days between placement and receipt over delivered orders,
/// 0.0 when none have been received.
pub fn shape_order_report(
    mut orders: Vec<OrderRow>,
    window_start: DateTime<Utc>,
    days: u32,
) -> OrderTrendsReport {
    orders.sort_by(|a, b| b.order_date.cmp(&a.order_date));

    let count_status = |status: &str| orders.iter().filter(|o| o.status == status).count();
    let delivered = count_status(order_status::ENTREGUE);

    let delivery_days: Vec<f64> = orders
        .iter()
        .filter(|o| o.status == order_status::ENTREGUE)
        .filter_map(|o| o.received_date.map(|r| (r - o.order_date).num_hours()))
        .map(|hours| hours as f64 / 24.0)
        .collect();
    let avg_delivery_time = if delivery_days.is_empty() {
        0.0
    } else {
        delivery_days.iter().sum::<f64>() / delivery_days.len() as f64
    };

    let summary = OrderSummary {
        total_orders: orders.len(),
        total_value: orders.iter().map(|o| o.total_value).sum(),
        avg_delivery_time,
        completion_rate: scoring::completion_rate(delivered, orders.len()),
        pending_orders: count_status(order_status::PENDENTE),
        processing_orders: count_status(order_status::PROCESSANDO),
        delivered_orders: delivered,
        cancelled_orders: count_status(order_status::CANCELADO),
    };

    let weeks = (days as usize).div_ceil(7).max(1);
    let mut weekly_orders = vec![0i64; weeks];
    let mut weekly_values = vec![0.0f64; weeks];
    for o in &orders {
        let offset = (o.order_date - window_start).num_days();
        if offset < 0 {
            continue;
        }
        let idx = ((offset / 7) as usize).min(weeks - 1);
        weekly_orders[idx] += 1;
        weekly_values[idx] += o.total_value;
    }
    let weekly = WeeklySeries {
        labels: (1..=weeks).map(|w| format!("Sem {w}")).collect(),
        orders: weekly_orders,
        values: weekly_values,
    };

    let status = CountSeries {
        labels: vec![
            "Pendente".into(),
            "Processando".into(),
            "Entregue".into(),
            "Cancelado".into(),
        ],
        data: vec![
            summary.pending_orders as i64,
            summary.processing_orders as i64,
            summary.delivered_orders as i64,
            summary.cancelled_orders as i64,
        ],
    };

    orders.truncate(DETAIL_LIMIT);

    OrderTrendsReport {
        success: true,
        summary,
        orders,
        charts: OrderCharts { weekly, status },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;

    fn product(id: i32, category: &str, price: f64, stock: i32, min_stock: i32) -> StockProductRow {
        StockProductRow {
            id,
            name: format!("Produto {id}"),
            description: None,
            category: category.to_string(),
            price,
            stock,
            min_stock,
            stock_value: price * stock as f64,
            stock_level: scoring::classify_stock(stock, min_stock),
        }
    }

    #[test]
    fn stock_report_caps_rows_but_counts_everything() {
        let products: Vec<_> = (0..500).map(|i| product(i, "geral", 10.0, 3, 5)).collect();
        let report = shape_stock_report(products);

        assert_eq!(report.products.len(), DETAIL_LIMIT);
        assert_eq!(report.summary.total_products, 500);
        assert_eq!(report.summary.low_stock, 500);
        assert!((report.summary.total_value - 500.0 * 30.0).abs() < 1e-9);
    }

    #[test]
    fn stock_report_orders_by_value_and_buckets_levels() {
        let report = shape_stock_report(vec![
            product(1, "b", 5.0, 0, 5),   // Crítico, value 0
            product(2, "a", 100.0, 4, 5), // Baixo, value 400
            product(3, "a", 10.0, 8, 5),  // Médio, value 80
            product(4, "c", 1.0, 50, 5),  // Alto, value 50
        ]);

        assert_eq!(report.products[0].id, 2);
        assert_eq!(report.charts.stock_levels.data, vec![1, 1, 1, 1]);
        assert_eq!(report.charts.categories.labels, vec!["a", "b", "c"]);
        assert_eq!(report.charts.categories.data, vec![2, 1, 1]);
    }

    fn supplier(id: i32, status: &str, total_value: f64, total_orders: i64) -> SupplierRow {
        SupplierRow {
            id,
            name: format!("Fornecedor {id}"),
            email: None,
            phone: None,
            status: status.to_string(),
            total_orders,
            total_value,
            total_products: 0,
            last_order_date: None,
            days_since_last_order: 999,
            performance_score: 0,
        }
    }

    #[test]
    fn supplier_report_scores_and_ranks() {
        let mut strong = supplier(1, "ativo", 12_000.0, 12);
        strong.days_since_last_order = 3;
        let weak = supplier(2, "inativo", 100.0, 0);

        let report = shape_supplier_report(vec![weak, strong]);

        assert_eq!(report.suppliers[0].id, 1);
        assert_eq!(report.suppliers[0].performance_score, 10);
        assert_eq!(report.summary.excellent_performance, 1);
        assert_eq!(report.summary.inactive_suppliers, 1);
        // Excelente, Bom, Médio, Ruim, Inativo
        assert_eq!(report.charts.performance.data, vec![1, 0, 0, 1, 1]);
        assert_eq!(report.charts.top_suppliers.labels[0], "Fornecedor 1");
    }

    #[test]
    fn order_growth_handles_empty_previous_period() {
        assert_eq!(order_growth(10, 0), 0);
        assert_eq!(order_growth(15, 10), 50);
        assert_eq!(order_growth(5, 10), -50);
    }

    fn order(id: i32, day_offset: i64, status: &str, value: f64) -> OrderRow {
        let base = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        OrderRow {
            id,
            order_date: base + Duration::days(day_offset),
            delivery_date: None,
            received_date: None,
            status: status.to_string(),
            total_value: value,
            supplier_name: None,
        }
    }

    #[test]
    fn order_report_buckets_weeks_and_counts_statuses() {
        let window_start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let orders = vec![
            order(1, 0, order_status::PENDENTE, 100.0),
            order(2, 3, order_status::ENTREGUE, 200.0),
            order(3, 10, order_status::PROCESSANDO, 300.0),
            order(4, 25, order_status::CANCELADO, 400.0),
        ];

        let report = shape_order_report(orders, window_start, 28);

        assert_eq!(report.charts.weekly.labels.len(), 4);
        assert_eq!(report.charts.weekly.orders, vec![2, 1, 0, 1]);
        assert_eq!(report.charts.weekly.values, vec![300.0, 300.0, 0.0, 400.0]);
        assert_eq!(report.charts.status.data, vec![1, 1, 1, 1]);
        assert_eq!(report.summary.completion_rate, 25);
        // Newest first in the detail rows.
        assert_eq!(report.orders[0].id, 4);
    }

    #[test]
    fn order_report_avg_delivery_from_received_orders() {
        let window_start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let mut delivered = order(1, 0, order_status::ENTREGUE, 100.0);
        delivered.received_date = Some(delivered.order_date + Duration::days(6));
        let pending = order(2, 1, order_status::PENDENTE, 50.0);

        let report = shape_order_report(vec![delivered, pending], window_start, 30);
        assert!((report.summary.avg_delivery_time - 6.0).abs() < 1e-9);

        let report = shape_order_report(vec![order(3, 0, order_status::PENDENTE, 10.0)], window_start, 30);
        assert_eq!(report.summary.avg_delivery_time, 0.0);
    }

    proptest! {
        #[test]
        fn chart_labels_and_data_stay_parallel(
            inputs in prop::collection::vec(
                (0i32..1000, 0i32..100, 0i32..20, 0usize..4),
                0..80,
            ),
        ) {
            let categories = ["geral", "escritório", "informática", "limpeza"];
            let products: Vec<_> = inputs
                .iter()
                .enumerate()
                .map(|(i, &(price_cents, stock, min_stock, cat))| {
                    product(i as i32, categories[cat], price_cents as f64 / 100.0, stock, min_stock)
                })
                .collect();

            let report = shape_stock_report(products);
            prop_assert_eq!(
                report.charts.stock_levels.labels.len(),
                report.charts.stock_levels.data.len()
            );
            prop_assert_eq!(
                report.charts.categories.labels.len(),
                report.charts.categories.data.len()
            );
            prop_assert!(report.products.len() <= DETAIL_LIMIT);
        }
    }

    #[test]
    fn empty_inputs_produce_zeroed_summaries() {
        let stock = shape_stock_report(vec![]);
        assert_eq!(stock.summary.total_products, 0);
        assert!(stock.charts.categories.labels.is_empty());

        let window_start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let orders = shape_order_report(vec![], window_start, 30);
        assert_eq!(orders.summary.completion_rate, 0);
        assert_eq!(orders.charts.weekly.labels.len(), 5);
    }
}
