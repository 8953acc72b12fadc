//! Schema bootstrap for fresh databases.
//!
//! Creates the four tables from their entity definitions when they do not
//! already exist. Intended for SQLite development databases and tests; a
//! managed Postgres deployment provisions its schema out of band.

use sea_orm::{ConnectionTrait, DbErr, Schema};
use tracing::info;

use crate::db::DbPool;
use crate::entities::{order, product, quote, supplier};

/// Creates any missing tables for the registered entities.
pub async fn ensure_schema(db: &DbPool) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut suppliers = schema.create_table_from_entity(supplier::Entity);
    let mut products = schema.create_table_from_entity(product::Entity);
    let mut orders = schema.create_table_from_entity(order::Entity);
    let mut quotes = schema.create_table_from_entity(quote::Entity);

    // Suppliers first, the other tables reference them.
    for stmt in [&mut suppliers, &mut products, &mut orders, &mut quotes] {
        stmt.if_not_exists();
        db.execute(backend.build(&*stmt)).await?;
    }

    info!("Database schema is up to date");
    Ok(())
}
