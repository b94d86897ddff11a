//! The in-memory adapter

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;
use tracing::debug;

use core_kernel::{DomainPort, PortError, TenantId};
use domain_ledger::{Charge, LedgerStore, Payment};
use domain_tax::{ExemptionInterval, TaxProfile, TaxStore};

#[derive(Default)]
struct State {
    charges: HashMap<TenantId, Vec<Charge>>,
    payments: HashMap<TenantId, Vec<Payment>>,
    profiles: HashMap<TenantId, TaxProfile>,
}

/// Thread-safe in-memory backing store for both domain ports
///
/// Records are kept per tenant in insertion order, matching the
/// posting-order contract of `LedgerStore`. A tenant with no records is
/// indistinguishable from one that was never seen; reads return empty
/// sets and an untaxed profile rather than `NotFound`, since the ledger
/// treats an empty account as a normal state.
#[derive(Default)]
pub struct InMemoryStore {
    state: RwLock<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a tenant's tax commencement date, creating the profile if
    /// needed
    pub async fn set_commencement(&self, tenant_id: TenantId, date: NaiveDate) {
        let mut state = self.state.write().await;
        state
            .profiles
            .entry(tenant_id)
            .or_insert_with(|| TaxProfile::untaxed(tenant_id))
            .commencement_date = Some(date);
    }
}

impl DomainPort for InMemoryStore {}

#[async_trait]
impl LedgerStore for InMemoryStore {
    async fn charges_for_tenant(&self, tenant_id: TenantId) -> Result<Vec<Charge>, PortError> {
        let state = self.state.read().await;
        Ok(state.charges.get(&tenant_id).cloned().unwrap_or_default())
    }

    async fn payments_for_tenant(&self, tenant_id: TenantId) -> Result<Vec<Payment>, PortError> {
        let state = self.state.read().await;
        Ok(state.payments.get(&tenant_id).cloned().unwrap_or_default())
    }

    async fn append_charges(&self, charges: &[Charge]) -> Result<(), PortError> {
        // Single write lock for the whole batch: all or nothing
        let mut state = self.state.write().await;
        for charge in charges {
            state
                .charges
                .entry(charge.tenant_id)
                .or_default()
                .push(charge.clone());
        }
        debug!(count = charges.len(), "appended charge batch");
        Ok(())
    }

    async fn record_payment(&self, payment: &Payment) -> Result<(), PortError> {
        let mut state = self.state.write().await;
        state
            .payments
            .entry(payment.tenant_id)
            .or_default()
            .push(payment.clone());
        Ok(())
    }
}

#[async_trait]
impl TaxStore for InMemoryStore {
    async fn tax_profile(&self, tenant_id: TenantId) -> Result<TaxProfile, PortError> {
        let state = self.state.read().await;
        Ok(state
            .profiles
            .get(&tenant_id)
            .cloned()
            .unwrap_or_else(|| TaxProfile::untaxed(tenant_id)))
    }

    async fn add_exemption(&self, exemption: &ExemptionInterval) -> Result<(), PortError> {
        let mut state = self.state.write().await;
        state
            .profiles
            .entry(exemption.tenant_id)
            .or_insert_with(|| TaxProfile::untaxed(exemption.tenant_id))
            .exemptions
            .push(exemption.clone());
        debug!(exemption = %exemption.id, tenant = %exemption.tenant_id, "stored exemption");
        Ok(())
    }
}
