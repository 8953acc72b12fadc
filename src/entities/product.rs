use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Product entity
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, Validate)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Primary key
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Internal product code
    #[sea_orm(unique)]
    #[validate(length(
        min = 1,
        max = 50,
        message = "Product code must be between 1 and 50 characters"
    ))]
    pub code: String,

    /// Product name
    #[validate(length(
        min = 1,
        max = 255,
        message = "Product name must be between 1 and 255 characters"
    ))]
    pub name: String,

    /// Product description
    pub description: Option<String>,

    /// Product category used for grouping in reports
    pub category: String,

    /// Unit price
    pub price: f64,

    /// Current stock on hand, never negative
    pub stock: i32,

    /// Configured minimum stock threshold
    pub min_stock: i32,

    /// Supplier that provides this product
    pub supplier_id: Option<i32>,

    /// Record status: "ativo" or "inativo"
    pub status: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
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

impl Model {
    /// Total value of the stock on hand.
    pub fn stock_value(&self) -> f64 {
        self.price * self.stock as f64
    }
}
