//! Persistence models for the purchasing domain.
//!
//! These mirror the relational tables owned by the datastore collaborator:
//! products, suppliers, purchase orders and quotes. Derived values (stock
//! levels, performance scores) are computed in [`crate::scoring`] and never
//! persisted.

pub mod order;
pub mod product;
pub mod quote;
pub mod supplier;

/// Status value shared by suppliers and products for active records.
pub const STATUS_ATIVO: &str = "ativo";
/// Status value shared by suppliers and products for inactive records.
pub const STATUS_INATIVO: &str = "inativo";

/// Purchase order lifecycle statuses.
pub mod order_status {
    pub const PENDENTE: &str = "pendente";
    pub const PROCESSANDO: &str = "processando";
    pub const ENTREGUE: &str = "entregue";
    pub const CANCELADO: &str = "cancelado";
}

/// Quote lifecycle statuses.
pub mod quote_status {
    pub const PENDENTE: &str = "pendente";
    pub const APROVADA: &str = "aprovada";
    pub const REJEITADA: &str = "rejeitada";
}
