use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{Duration, Utc};
use dashmap::DashMap;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::entities::{
    order::{self, Entity as OrderEntity},
    order_status,
    product::{self, Entity as ProductEntity},
    quote::{self, Entity as QuoteEntity},
    quote_status,
    supplier::Entity as SupplierEntity,
    STATUS_ATIVO, STATUS_INATIVO,
};
use crate::errors::ServiceError;
use crate::notifications::{self, Notification, NotificationSummary};

const ORDER_DELAY_DAYS: i64 = 7;
const QUOTE_EXPIRY_WINDOW_DAYS: i64 = 3;
const SUPPLIER_DORMANCY_DAYS: i64 = 90;

/// Detects alert conditions and serves them from an in-memory snapshot.
///
/// A background poller rebuilds the snapshot periodically; readers clone the
/// current `Arc` and never observe a half-built list. Read marks live in a
/// separate id set so they survive snapshot replacement, since ids are
/// stable per source entity.
pub struct NotificationService {
    db: Arc<DatabaseConnection>,
    snapshot: RwLock<Arc<Vec<Notification>>>,
    read_ids: DashMap<String, ()>,
}

impl NotificationService {
    pub fn new(db: Arc<DatabaseConnection>) -> Arc<Self> {
        Arc::new(Self {
            db,
            snapshot: RwLock::new(Arc::new(Vec::new())),
            read_ids: DashMap::new(),
        })
    }

    /// Current snapshot. Cheap; clones the `Arc`, not the list.
    pub async fn notifications(&self) -> Arc<Vec<Notification>> {
        self.snapshot.read().await.clone()
    }

    /// Severity counts over the unread notifications in the snapshot.
    pub async fn summary(&self) -> NotificationSummary {
        notifications::summarize(&self.notifications().await)
    }

    /// Marks one notification as read.
    ///
    /// Fails with `NotFound` when the id is not in the current snapshot. The
    /// mark is kept by id, so a condition that persists through the next
    /// refresh stays read.
    pub async fn mark_read(&self, id: &str) -> Result<(), ServiceError> {
        let mut guard = self.snapshot.write().await;
        if !guard.iter().any(|n| n.id == id) {
            return Err(ServiceError::NotFound(format!(
                "Notificação {id} não encontrada"
            )));
        }

        self.read_ids.insert(id.to_string(), ());
        let mut updated: Vec<Notification> = guard.as_ref().clone();
        for n in updated.iter_mut().filter(|n| n.id == id) {
            n.read = true;
        }
        *guard = Arc::new(updated);
        Ok(())
    }

    /// Re-evaluates every rule against the database and swaps the snapshot.
    ///
    /// Returns the number of active notifications.
    pub async fn refresh(&self) -> Result<usize, ServiceError> {
        let mut items = self.detect().await?;
        notifications::sort_notifications(&mut items);
        for n in items.iter_mut() {
            n.read = self.read_ids.contains_key(&n.id);
        }

        let count = items.len();
        *self.snapshot.write().await = Arc::new(items);
        info!(count, "Notification snapshot refreshed");
        Ok(count)
    }

    /// Spawns the periodic refresh task.
    pub fn spawn_poller(self: &Arc<Self>, poll_interval: StdDuration) -> JoinHandle<()> {
        let service = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(poll_interval);
            loop {
                ticker.tick().await;
                if let Err(err) = service.refresh().await {
                    warn!(error = %err, "Notification refresh failed");
                }
            }
        })
    }

    async fn detect(&self) -> Result<Vec<Notification>, ServiceError> {
        let db = &*self.db;
        let now = Utc::now();
        let mut items = Vec::new();

        let supplier_names: HashMap<i32, String> = SupplierEntity::find()
            .all(db)
            .await?
            .into_iter()
            .map(|s| (s.id, s.name))
            .collect();
        let unknown_supplier = || "Fornecedor desconhecido".to_string();

        // Active products at or below their minimum stock.
        let low_stock = ProductEntity::find()
            .filter(product::Column::Status.eq(STATUS_ATIVO))
            .filter(Expr::col(product::Column::Stock).lte(Expr::col(product::Column::MinStock)))
            .all(db)
            .await?;
        for p in low_stock {
            items.push(notifications::low_stock(
                p.id,
                &p.name,
                &p.category,
                p.stock,
                p.min_stock,
                now,
            ));
        }

        // Orders stuck in pendente/processando past the delay threshold.
        let delayed = OrderEntity::find()
            .filter(
                order::Column::Status
                    .is_in([order_status::PENDENTE, order_status::PROCESSANDO]),
            )
            .filter(order::Column::OrderDate.lt(now - Duration::days(ORDER_DELAY_DAYS)))
            .all(db)
            .await?;
        for o in delayed {
            let supplier = supplier_names
                .get(&o.supplier_id)
                .cloned()
                .unwrap_or_else(unknown_supplier);
            let days_pending = (now - o.order_date).num_days();
            items.push(notifications::order_delay(
                o.id,
                &supplier,
                o.total_value,
                days_pending,
                now,
            ));
        }

        // Pending quotes expiring within the window.
        let pending_quotes = QuoteEntity::find()
            .filter(quote::Column::Status.eq(quote_status::PENDENTE))
            .filter(quote::Column::ExpectedDate.is_not_null())
            .all(db)
            .await?;
        for q in pending_quotes {
            let Some(expected) = q.expected_date else {
                continue;
            };
            let days_until = (expected - now).num_days();
            if (0..=QUOTE_EXPIRY_WINDOW_DAYS).contains(&days_until) {
                let supplier = supplier_names
                    .get(&q.supplier_id)
                    .cloned()
                    .unwrap_or_else(unknown_supplier);
                items.push(notifications::quote_expiring(
                    q.id,
                    &supplier,
                    q.total_value,
                    days_until,
                    now,
                ));
            }
        }

        // Inactive suppliers that still received orders recently.
        let recent_orders = OrderEntity::find()
            .filter(order::Column::OrderDate.gte(now - Duration::days(SUPPLIER_DORMANCY_DAYS)))
            .all(db)
            .await?;
        let mut recent_by_supplier: HashMap<i32, i64> = HashMap::new();
        for o in &recent_orders {
            *recent_by_supplier.entry(o.supplier_id).or_insert(0) += 1;
        }
        let inactive = SupplierEntity::find()
            .filter(crate::entities::supplier::Column::Status.eq(STATUS_INATIVO))
            .all(db)
            .await?;
        for s in inactive {
            if let Some(&count) = recent_by_supplier.get(&s.id) {
                items.push(notifications::supplier_inactive(s.id, &s.name, count, now));
            }
        }

        // Orders received in the last twenty-four hours.
        let delivered = OrderEntity::find()
            .filter(order::Column::Status.eq(order_status::ENTREGUE))
            .filter(order::Column::ReceivedDate.gte(now - Duration::hours(24)))
            .all(db)
            .await?;
        for o in delivered {
            let Some(received) = o.received_date else {
                continue;
            };
            let supplier = supplier_names
                .get(&o.supplier_id)
                .cloned()
                .unwrap_or_else(unknown_supplier);
            items.push(notifications::order_delivered(
                o.id,
                &o.number,
                &supplier,
                o.total_value,
                received,
            ));
        }

        Ok(items)
    }
}
