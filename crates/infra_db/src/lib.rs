//! PostgreSQL persistence layer
//!
//! Connection pool management, error mapping, and the invoice repository.
//! The repository keeps the gapless numbering invariant: the number draw,
//! customer upsert, header insert, and item inserts share one transaction,
//! so a failure anywhere rolls everything back and consumes no number.

pub mod error;
pub mod pool;
pub mod repositories;

pub use error::DatabaseError;
pub use pool::{create_pool, create_pool_from_url, run_migrations, DatabaseConfig, DatabasePool};
pub use repositories::invoices::{InvoiceRepository, StoredInvoice};
