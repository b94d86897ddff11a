//! Ledger Domain - Waterfall Allocation and Aging
//!
//! This crate implements the unsettled-balance side of the rental ledger:
//! given a tenant's charges and payments, it determines what remains
//! unpaid, how old the debt is, and which collection actions apply.
//!
//! # Allocation policy
//!
//! Payments are never tied to a specific charge by the operator. Instead
//! the total of all payments is allocated against charges in a fixed
//! waterfall:
//!
//! - Late fees are settled first, then rent, then everything else
//! - Within a priority tier, the oldest due date is settled first
//!
//! Charges are append-only: corrections are posted as new credit
//! charges, never as edits, so any historical allocation can be
//! reproduced from the record set alone.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_ledger::{allocate, age_unsettled};
//!
//! let unsettled = allocate(&charges, &payments)?;
//! let summary = age_unsettled(&unsettled, today)?;
//! ```

pub mod charge;
pub mod payment;
pub mod allocator;
pub mod aging;
pub mod collections;
pub mod ports;
pub mod statement;
pub mod error;

pub use charge::{Charge, ChargeCategory};
pub use payment::Payment;
pub use allocator::{allocate, UnsettledCharge, SETTLEMENT_TOLERANCE};
pub use aging::{age_unsettled, AgingBucket, AgingSummary};
pub use collections::{propose_late_fees, LateFeeProposal, LetterSeverity};
pub use ports::LedgerStore;
pub use statement::StatementService;
pub use error::LedgerError;
