//! Shared test builders and fixtures

pub mod builders;
pub mod fixtures;

pub use builders::{CustomerBuilder, LineItemBuilder};
pub use fixtures::sample_invoice;
