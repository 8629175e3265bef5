//! Custom actions for the crops table.
//!
//! Counter increments are actions rather than patches so that the read-modify-write happens
//! inside the table's task. See [`Record::handle_action`](record_store::Record::handle_action)
//! in [`entity`](super::entity).

/// Row-level operations beyond CRUD.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropAction {
    /// A customer opened the listing.
    IncrementViews,
    /// An order was placed against the listing.
    RecordSale,
}

/// Results from [`CropAction`]s. Variants match 1:1 with the actions.
#[derive(Debug, Clone, PartialEq)]
pub enum CropActionResult {
    Views(u64),
    Sale(SaleReceipt),
}

/// What the order service learns about a crop at the moment a sale is counted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SaleReceipt {
    /// The sales counter after this sale.
    pub sales: u64,
    pub price_per_unit: f64,
}
