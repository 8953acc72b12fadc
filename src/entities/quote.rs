use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Supplier quote entity
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "quotes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Human-facing quote number (e.g. "COT-0017")
    #[sea_orm(unique)]
    pub number: String,

    pub supplier_id: i32,

    /// "pendente", "aprovada" or "rejeitada"
    pub status: String,

    /// Date the quote was requested
    pub request_date: DateTime<Utc>,

    /// Date the quoted prices expire
    pub expected_date: Option<DateTime<Utc>>,

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
