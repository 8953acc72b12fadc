//! Notification model and the pure constructors for each alert rule.
//!
//! The notification service detects conditions in the database and calls the
//! constructors here to materialize them. Ids are deterministic per source
//! entity (`low-stock-{id}`, `order-{id}`, ...) so the same condition keeps
//! the same id across refresh cycles and a read mark can outlive the snapshot
//! it was applied to.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::scoring::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    LowStock,
    OrderDelay,
    QuoteExpiring,
    SupplierInactive,
    OrderDelivered,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Notification {
    /// Stable id derived from the source entity.
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub severity: Severity,
    pub title: String,
    pub message: String,
    /// Rule-specific payload for the frontend.
    #[schema(value_type = Object)]
    pub data: serde_json::Value,
    #[serde(rename = "actionUrl")]
    pub action_url: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    pub read: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct NotificationSummary {
    pub total: usize,
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

/// Product at or below its minimum stock, severity from the stock ratio.
pub fn low_stock(
    product_id: i32,
    name: &str,
    category: &str,
    stock: i32,
    min_stock: i32,
    now: DateTime<Utc>,
) -> Notification {
    Notification {
        id: format!("low-stock-{product_id}"),
        kind: NotificationKind::LowStock,
        severity: crate::scoring::stock_severity(stock, min_stock),
        title: format!("Estoque baixo: {name}"),
        message: format!(
            "Produto com estoque de {stock} unidades (mínimo: {min_stock})"
        ),
        data: json!({
            "productId": product_id,
            "productName": name,
            "currentStock": stock,
            "minStock": min_stock,
            "category": category,
        }),
        action_url: format!("/products/{product_id}"),
        created_at: now,
        read: false,
    }
}

/// Order still pending or processing after more than seven days.
pub fn order_delay(
    order_id: i32,
    supplier_name: &str,
    total_value: f64,
    days_pending: i64,
    now: DateTime<Utc>,
) -> Notification {
    let severity = if days_pending > 14 {
        Severity::High
    } else {
        Severity::Medium
    };
    Notification {
        id: format!("order-{order_id}"),
        kind: NotificationKind::OrderDelay,
        severity,
        title: "Pedido Pendente".to_string(),
        message: format!("Pedido #{order_id} - {supplier_name} ({days_pending} dias)"),
        data: json!({
            "orderId": order_id,
            "supplierName": supplier_name,
            "totalValue": total_value,
            "daysPending": days_pending,
        }),
        action_url: format!("/orders/{order_id}"),
        created_at: now,
        read: false,
    }
}

/// Pending quote whose expected date is within the next three days.
pub fn quote_expiring(
    quote_id: i32,
    supplier_name: &str,
    total_value: f64,
    days_until_expiry: i64,
    now: DateTime<Utc>,
) -> Notification {
    let severity = if days_until_expiry <= 1 {
        Severity::High
    } else {
        Severity::Medium
    };
    Notification {
        id: format!("quote-{quote_id}"),
        kind: NotificationKind::QuoteExpiring,
        severity,
        title: "Cotação Vencendo".to_string(),
        message: format!("Cotação #{quote_id} - {supplier_name} ({days_until_expiry} dias)"),
        data: json!({
            "quoteId": quote_id,
            "supplierName": supplier_name,
            "totalValue": total_value,
            "daysUntilExpiry": days_until_expiry,
        }),
        action_url: format!("/quotes/{quote_id}"),
        created_at: now,
        read: false,
    }
}

/// Supplier flagged inactive that still has orders in the last ninety days.
pub fn supplier_inactive(
    supplier_id: i32,
    name: &str,
    recent_orders: i64,
    now: DateTime<Utc>,
) -> Notification {
    Notification {
        id: format!("supplier-{supplier_id}"),
        kind: NotificationKind::SupplierInactive,
        severity: Severity::Medium,
        title: "Fornecedor Inativo".to_string(),
        message: format!("{name} está inativo mas tem {recent_orders} pedidos recentes"),
        data: json!({
            "supplierId": supplier_id,
            "supplierName": name,
            "recentOrders": recent_orders,
        }),
        action_url: format!("/suppliers/{supplier_id}"),
        created_at: now,
        read: false,
    }
}

/// Order received within the last twenty-four hours.
///
/// Unlike the other rules this one is timestamped with the receipt time, so
/// it sorts among its peers by when the delivery actually happened.
pub fn order_delivered(
    order_id: i32,
    number: &str,
    supplier_name: &str,
    total_value: f64,
    received_at: DateTime<Utc>,
) -> Notification {
    let date = received_at.format("%d/%m/%Y");
    let time = received_at.format("%H:%M");
    Notification {
        id: format!("delivered-{order_id}"),
        kind: NotificationKind::OrderDelivered,
        severity: Severity::Low,
        title: "Pedido Entregue".to_string(),
        message: format!("{number} - {supplier_name} entregue em {date} às {time}"),
        data: json!({
            "orderId": order_id,
            "orderNumber": number,
            "supplierName": supplier_name,
            "totalValue": total_value,
            "deliveredAt": received_at,
        }),
        action_url: format!("/orders/{order_id}"),
        created_at: received_at,
        read: false,
    }
}

/// Orders by severity rank, most severe first, newest first within a rank.
pub fn sort_notifications(notifications: &mut [Notification]) {
    notifications.sort_by(|a, b| {
        a.severity
            .cmp(&b.severity)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
}

/// Severity counts over the unread portion of a snapshot.
pub fn summarize(notifications: &[Notification]) -> NotificationSummary {
    let mut summary = NotificationSummary::default();
    for n in notifications.iter().filter(|n| !n.read) {
        summary.total += 1;
        match n.severity {
            Severity::Critical => summary.critical += 1,
            Severity::High => summary.high += 1,
            Severity::Medium => summary.medium += 1,
            Severity::Low => summary.low += 1,
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, hour, 0, 0).unwrap()
    }

    #[test]
    fn ids_are_deterministic_per_entity() {
        let now = at(9);
        assert_eq!(low_stock(7, "Papel", "escritório", 0, 5, now).id, "low-stock-7");
        assert_eq!(order_delay(3, "ACME", 100.0, 9, now).id, "order-3");
        assert_eq!(quote_expiring(4, "ACME", 50.0, 2, now).id, "quote-4");
        assert_eq!(supplier_inactive(9, "ACME", 2, now).id, "supplier-9");
        assert_eq!(order_delivered(12, "PED-12", "ACME", 10.0, now).id, "delivered-12");
    }

    #[test]
    fn delay_and_expiry_severity_thresholds() {
        let now = at(9);
        assert_eq!(order_delay(1, "A", 0.0, 14, now).severity, Severity::Medium);
        assert_eq!(order_delay(1, "A", 0.0, 15, now).severity, Severity::High);
        assert_eq!(quote_expiring(1, "A", 0.0, 2, now).severity, Severity::Medium);
        assert_eq!(quote_expiring(1, "A", 0.0, 1, now).severity, Severity::High);
    }

    #[test]
    fn delivered_message_uses_receipt_timestamp() {
        let received = Utc.with_ymd_and_hms(2024, 3, 10, 14, 30, 0).unwrap();
        let n = order_delivered(12, "PED-0012", "ACME", 10.0, received);
        assert_eq!(n.message, "PED-0012 - ACME entregue em 10/03/2024 às 14:30");
        assert_eq!(n.created_at, received);
    }

    #[test]
    fn sorting_ranks_severity_then_recency() {
        let now = at(12);
        let mut items = vec![
            order_delivered(1, "PED-1", "A", 0.0, now - Duration::hours(1)),
            low_stock(2, "B", "c", 0, 5, now),
            order_delay(3, "C", 0.0, 20, now - Duration::hours(2)),
            order_delay(4, "D", 0.0, 20, now),
        ];
        sort_notifications(&mut items);

        let ids: Vec<_> = items.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["low-stock-2", "order-4", "order-3", "delivered-1"]);
    }

    #[test]
    fn summary_skips_read_notifications() {
        let now = at(9);
        let mut read = low_stock(1, "A", "c", 0, 5, now);
        read.read = true;
        let items = vec![read, order_delay(2, "B", 0.0, 9, now)];

        let summary = summarize(&items);
        assert_eq!(summary.total, 1);
        assert_eq!(summary.critical, 0);
        assert_eq!(summary.medium, 1);
    }
}
