//! Repository implementations

pub mod invoices;
