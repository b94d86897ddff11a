//! Core Kernel - Foundational types and utilities for the rental ledger
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Money types with precise decimal arithmetic
//! - Closed date ranges for billing periods and exemption intervals
//! - Common identifiers and value objects

pub mod money;
pub mod temporal;
pub mod identifiers;
pub mod ports;
pub mod error;

pub use money::{Money, Currency, Rate, MoneyError};
pub use temporal::{DateRange, TemporalError};
pub use identifiers::{
    TenantId, InvoiceId, ChargeId, PaymentId,
    ExemptionId, CreditNoteId,
};
pub use ports::{PortError, DomainPort};
pub use error::CoreError;
