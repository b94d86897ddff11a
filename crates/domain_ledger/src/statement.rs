//! Statement reporting over the ledger store
//!
//! Combines the pure allocation and aging functions with the store port
//! for callers that want a tenant's position in one call.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, instrument};

use core_kernel::{PortError, TenantId};

use crate::aging::{age_unsettled, AgingSummary};
use crate::allocator::{allocate, UnsettledCharge};
use crate::ports::LedgerStore;

/// Read-side reporting service for a tenant's outstanding position
pub struct StatementService<S: LedgerStore> {
    store: Arc<S>,
}

impl<S: LedgerStore> StatementService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// The tenant's unsettled charges after waterfall allocation
    #[instrument(skip(self))]
    pub async fn unsettled_charges(
        &self,
        tenant_id: TenantId,
    ) -> Result<Vec<UnsettledCharge>, PortError> {
        let charges = self.store.charges_for_tenant(tenant_id).await?;
        let payments = self.store.payments_for_tenant(tenant_id).await?;

        let unsettled = allocate(&charges, &payments)
            .map_err(|e| PortError::validation(e.to_string()))?;
        debug!(
            tenant = %tenant_id,
            charges = charges.len(),
            payments = payments.len(),
            unsettled = unsettled.len(),
            "allocated tenant ledger"
        );
        Ok(unsettled)
    }

    /// The tenant's aging summary as of a date
    #[instrument(skip(self))]
    pub async fn aging(
        &self,
        tenant_id: TenantId,
        as_of: NaiveDate,
    ) -> Result<AgingSummary, PortError> {
        let unsettled = self.unsettled_charges(tenant_id).await?;
        age_unsettled(&unsettled, as_of).map_err(|e| PortError::validation(e.to_string()))
    }
}
