use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Purchase order entity
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Human-facing order number (e.g. "PED-0042")
    #[sea_orm(unique)]
    pub number: String,

    pub supplier_id: i32,

    /// Date the order was placed
    pub order_date: DateTime<Utc>,

    /// Expected delivery date
    pub delivery_date: Option<DateTime<Utc>>,

    /// Actual receipt date, set when the order is delivered
    pub received_date: Option<DateTime<Utc>>,

    /// "pendente", "processando", "entregue" or "cancelado"
    pub status: String,

    pub total_value: f64,

    pub created_at: DateTime<Utc>,

    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::supplier::Entity",
        from = "Column::SupplierId",
        to = "super::supplier::Column::Id"
    )]
    Supplier,
}

impl Related<super::supplier::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Supplier.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
