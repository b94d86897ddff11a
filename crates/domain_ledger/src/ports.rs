//! Ledger domain port
//!
//! The `LedgerStore` trait defines what the ledger domain needs from its
//! data source. Adapters (in-memory, SQL, mock) implement this trait;
//! the domain never sees the storage technology.
//!
//! All reads are scoped to a single tenant: allocation and aging never
//! cross account boundaries, and the adapter is responsible for
//! serializing concurrent writers for the same tenant.

use async_trait::async_trait;

use core_kernel::{DomainPort, PortError, TenantId};

use crate::charge::Charge;
use crate::payment::Payment;

/// Read/append access to the charge and payment record sets
#[async_trait]
pub trait LedgerStore: DomainPort {
    /// All non-voided charges for a tenant, in posting order
    async fn charges_for_tenant(&self, tenant_id: TenantId) -> Result<Vec<Charge>, PortError>;

    /// All payments for a tenant
    async fn payments_for_tenant(&self, tenant_id: TenantId) -> Result<Vec<Payment>, PortError>;

    /// Appends a batch of charges atomically
    ///
    /// Either every charge in the batch is durably recorded or none is.
    /// Used by reconciliation to post credit notes and by late-fee
    /// application; existing charges are never modified.
    async fn append_charges(&self, charges: &[Charge]) -> Result<(), PortError>;

    /// Records a payment
    async fn record_payment(&self, payment: &Payment) -> Result<(), PortError>;
}
