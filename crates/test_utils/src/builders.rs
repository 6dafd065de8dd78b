//! Builders for domain objects with sensible defaults

use core_kernel::Money;
use domain_invoicing::{CustomerDetails, LineItem};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Builds a [`LineItem`], defaulting to one unit of work at 100.00
pub struct LineItemBuilder {
    description: String,
    hsn_code: Option<String>,
    quantity: Decimal,
    rate: Money,
}

impl LineItemBuilder {
    pub fn new() -> Self {
        Self {
            description: "Alternator repair".to_string(),
            hsn_code: None,
            quantity: dec!(1),
            rate: Money::new(dec!(100)),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn hsn_code(mut self, hsn_code: impl Into<String>) -> Self {
        self.hsn_code = Some(hsn_code.into());
        self
    }

    pub fn quantity(mut self, quantity: Decimal) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn rate(mut self, rate: Decimal) -> Self {
        self.rate = Money::new(rate);
        self
    }

    pub fn build(self) -> LineItem {
        LineItem {
            description: self.description,
            hsn_code: self.hsn_code,
            quantity: self.quantity,
            rate: self.rate,
        }
    }
}

impl Default for LineItemBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds a [`CustomerDetails`], defaulting to a walk-in customer
pub struct CustomerBuilder {
    customer: CustomerDetails,
}

impl CustomerBuilder {
    pub fn new() -> Self {
        Self {
            customer: CustomerDetails::new("Ramesh Kumar"),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.customer.name = name.into();
        self
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.customer.address = Some(address.into());
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.customer.phone = Some(phone.into());
        self
    }

    pub fn gstin(mut self, gstin: impl Into<String>) -> Self {
        self.customer.gstin = Some(gstin.into());
        self
    }

    pub fn vehicle_number(mut self, vehicle: impl Into<String>) -> Self {
        self.customer.vehicle_number = Some(vehicle.into());
        self
    }

    pub fn job_card_number(mut self, job_card: impl Into<String>) -> Self {
        self.customer.job_card_number = Some(job_card.into());
        self
    }

    pub fn build(self) -> CustomerDetails {
        self.customer
    }
}

impl Default for CustomerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
