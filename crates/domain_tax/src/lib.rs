//! Tax Domain - SST Proration and Exemption Reconciliation
//!
//! This crate computes service tax (SST) for rental invoices and keeps
//! historical invoices honest when exemptions arrive late.
//!
//! # Proration
//!
//! Tax is charged at 8% on the rent base, pro-rated by the fraction of
//! the billing period not covered by any exemption interval. A tenant
//! with an exemption for Jan 10-20 on a January invoice pays tax on
//! 20 of 31 days. Exemption intervals may overlap; a day covered by any
//! interval is exempt exactly once (union, not sum).
//!
//! # Retroactive reconciliation
//!
//! Exemptions are often granted after invoices have gone out. When a new
//! exemption is registered, the reconciler scans historical invoices
//! whose billing period overlaps it, recomputes what the tax should have
//! been, and posts compensating credit notes for the difference. The
//! original tax charges are never touched: the ledger stays append-only
//! and every historical allocation remains reproducible.

pub mod exemption;
pub mod proration;
pub mod reconciler;
pub mod ports;
pub mod service;
pub mod error;

pub use exemption::{ExemptionInterval, TaxProfile};
pub use proration::{taxable_fraction, tax_due, SST_RATE};
pub use reconciler::{reconcile_exemption, CreditNote, ReconciliationOutcome, CREDIT_THRESHOLD};
pub use ports::TaxStore;
pub use service::ExemptionService;
pub use error::TaxError;
