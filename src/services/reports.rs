use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect,
};
use tracing::info;

use crate::entities::{
    order::{self, Entity as OrderEntity},
    product::{self, Entity as ProductEntity},
    quote::{self, Entity as QuoteEntity},
    quote_status,
    supplier::{self, Entity as SupplierEntity},
    STATUS_ATIVO,
};
use crate::errors::ServiceError;
use crate::reports::{
    self, DashboardAlert, DashboardKpis, DashboardTrends, ExecutiveDashboard, OrderRow,
    OrderTrendsReport, StockPerformanceReport, StockProductRow, SupplierAnalysisReport,
    SupplierRow,
};
use crate::scoring::{self, Severity};

/// Days a supplier is considered dormant when it has no orders in the window.
const NO_ORDER_SENTINEL_DAYS: i64 = 999;

/// Report generation over the purchasing database.
///
/// Each method runs the queries for one report and hands the rows to the
/// shaping functions in [`crate::reports`]. Aggregation happens in Rust so
/// the derivation rules stay portable across SQLite and Postgres.
#[derive(Clone)]
pub struct ReportService {
    db: Arc<DatabaseConnection>,
}

impl ReportService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Stock performance report, optionally restricted to one category.
    pub async fn stock_performance(
        &self,
        category: Option<&str>,
    ) -> Result<StockPerformanceReport, ServiceError> {
        info!(category = category.unwrap_or("<all>"), "Generating stock performance report");

        let mut query = ProductEntity::find();
        if let Some(category) = category {
            query = query.filter(product::Column::Category.eq(category));
        }
        let products = query.all(&*self.db).await?;

        let rows = products
            .into_iter()
            .map(|p| {
                let stock_value = p.stock_value();
                StockProductRow {
                    id: p.id,
                    name: p.name,
                    description: p.description,
                    category: p.category,
                    price: p.price,
                    stock: p.stock,
                    min_stock: p.min_stock,
                    stock_value,
                    stock_level: scoring::classify_stock(p.stock, p.min_stock),
                }
            })
            .collect();

        Ok(reports::shape_stock_report(rows))
    }

    /// Supplier analysis over orders placed in the last `days` days.
    pub async fn supplier_analysis(&self, days: u32) -> Result<SupplierAnalysisReport, ServiceError> {
        info!(days, "Generating supplier analysis report");

        let now = Utc::now();
        let window_start = now - Duration::days(i64::from(days));

        let suppliers = SupplierEntity::find().all(&*self.db).await?;
        let orders = OrderEntity::find()
            .filter(order::Column::OrderDate.gte(window_start))
            .all(&*self.db)
            .await?;
        let products = ProductEntity::find().all(&*self.db).await?;

        struct OrderAgg {
            count: i64,
            value: f64,
            last_order: DateTime<Utc>,
        }
        let mut by_supplier: HashMap<i32, OrderAgg> = HashMap::new();
        for o in &orders {
            let agg = by_supplier.entry(o.supplier_id).or_insert(OrderAgg {
                count: 0,
                value: 0.0,
                last_order: o.order_date,
            });
            agg.count += 1;
            agg.value += o.total_value;
            if o.order_date > agg.last_order {
                agg.last_order = o.order_date;
            }
        }

        let mut product_counts: HashMap<i32, i64> = HashMap::new();
        for p in &products {
            if let Some(supplier_id) = p.supplier_id {
                *product_counts.entry(supplier_id).or_insert(0) += 1;
            }
        }

        let rows = suppliers
            .into_iter()
            .map(|s| {
                let agg = by_supplier.get(&s.id);
                SupplierRow {
                    total_orders: agg.map_or(0, |a| a.count),
                    total_value: agg.map_or(0.0, |a| a.value),
                    total_products: product_counts.get(&s.id).copied().unwrap_or(0),
                    last_order_date: agg.map(|a| a.last_order),
                    days_since_last_order: agg
                        .map_or(NO_ORDER_SENTINEL_DAYS, |a| (now - a.last_order).num_days()),
                    performance_score: 0,
                    id: s.id,
                    name: s.name,
                    email: s.email,
                    phone: s.phone,
                    status: s.status,
                }
            })
            .collect();

        Ok(reports::shape_supplier_report(rows))
    }

    /// Executive dashboard: KPIs, thirty-day trends and critical alerts.
    pub async fn executive_dashboard(&self) -> Result<ExecutiveDashboard, ServiceError> {
        info!("Generating executive dashboard");

        let db = &*self.db;
        let now = Utc::now();
        let month_start = now - Duration::days(30);
        let prev_month_start = now - Duration::days(60);

        let products = ProductEntity::find().all(db).await?;
        let stock_value: f64 = products.iter().map(|p| p.stock_value()).sum();
        let critical_stock = products.iter().filter(|p| p.stock <= p.min_stock).count() as i64;
        let new_products = products.iter().filter(|p| p.created_at >= month_start).count() as i64;

        let monthly_orders = OrderEntity::find()
            .filter(order::Column::OrderDate.gte(month_start))
            .all(db)
            .await?;
        let monthly_value: f64 = monthly_orders.iter().map(|o| o.total_value).sum();

        let previous_orders = OrderEntity::find()
            .filter(order::Column::OrderDate.gte(prev_month_start))
            .filter(order::Column::OrderDate.lt(month_start))
            .count(db)
            .await? as i64;

        let active_suppliers = SupplierEntity::find()
            .filter(supplier::Column::Status.eq(STATUS_ATIVO))
            .count(db)
            .await? as i64;
        let new_suppliers = SupplierEntity::find()
            .filter(supplier::Column::CreatedAt.gte(month_start))
            .count(db)
            .await? as i64;

        let pending_quotes = QuoteEntity::find()
            .filter(quote::Column::Status.eq(quote_status::PENDENTE))
            .count(db)
            .await? as i64;

        let alerts = ProductEntity::find()
            .filter(product::Column::Stock.eq(0))
            .limit(5)
            .all(db)
            .await?
            .into_iter()
            .map(|p| DashboardAlert {
                kind: "Estoque Crítico".to_string(),
                message: format!("Produto com estoque zerado: {}", p.name),
                severity: Severity::Critical,
                created_at: now,
            })
            .collect();

        Ok(ExecutiveDashboard {
            success: true,
            kpis: DashboardKpis {
                total_products: products.len() as i64,
                stock_value,
                critical_stock,
                monthly_orders: monthly_orders.len() as i64,
                monthly_value,
                active_suppliers,
                pending_quotes,
            },
            trends: DashboardTrends {
                order_growth: reports::order_growth(monthly_orders.len() as i64, previous_orders),
                new_products,
                new_suppliers,
            },
            alerts,
        })
    }

    /// Order trends over the last `days` days.
    pub async fn order_trends(&self, days: u32) -> Result<OrderTrendsReport, ServiceError> {
        info!(days, "Generating order trends report");

        let now = Utc::now();
        let window_start = now - Duration::days(i64::from(days));

        let orders = OrderEntity::find()
            .filter(order::Column::OrderDate.gte(window_start))
            .all(&*self.db)
            .await?;

        let supplier_names: HashMap<i32, String> = SupplierEntity::find()
            .all(&*self.db)
            .await?
            .into_iter()
            .map(|s| (s.id, s.name))
            .collect();

        let rows = orders
            .into_iter()
            .map(|o| OrderRow {
                supplier_name: supplier_names.get(&o.supplier_id).cloned(),
                id: o.id,
                order_date: o.order_date,
                delivery_date: o.delivery_date,
                received_date: o.received_date,
                status: o.status,
                total_value: o.total_value,
            })
            .collect();

        Ok(reports::shape_order_report(rows, window_start, days))
    }
}
