//! Core Kernel - Foundational types for the workshop invoicing system
//!
//! This crate provides the building blocks used across all domain modules:
//! - Money with precise decimal arithmetic and invoice-grade rounding
//! - Percentage rates for tax calculations
//! - Strongly-typed identifiers

pub mod money;
pub mod identifiers;

pub use money::{Money, Percent, MoneyError};
pub use identifiers::{InvoiceId, CustomerId, LineItemId};
