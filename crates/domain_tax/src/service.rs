//! Exemption registration with retroactive reconciliation
//!
//! The write-side entry point of the tax domain. Registering an
//! exemption is a three-step sequence: persist the interval, snapshot
//! the tenant's ledger, then append whatever credit notes the
//! reconciler produced in a single batch. The snapshot is taken after
//! the exemption is stored so a crash between the two steps leaves the
//! system re-reconcilable, never half-credited.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, instrument};

use core_kernel::TenantId;
use domain_ledger::{Charge, LedgerStore};

use crate::error::TaxError;
use crate::exemption::ExemptionInterval;
use crate::ports::TaxStore;
use crate::reconciler::{reconcile_exemption, ReconciliationOutcome};

/// Registers exemptions and reconciles historical invoices
pub struct ExemptionService<S: LedgerStore + TaxStore> {
    store: Arc<S>,
}

impl<S: LedgerStore + TaxStore> ExemptionService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Registers a new exemption and credits overcharged invoices
    ///
    /// Returns the reconciliation outcome so callers can report what
    /// was refunded. Zero credit notes is a normal result, not an
    /// error.
    #[instrument(skip(self))]
    pub async fn register_exemption(
        &self,
        tenant_id: TenantId,
        start: NaiveDate,
        end: NaiveDate,
        description: Option<String>,
    ) -> Result<ReconciliationOutcome, TaxError> {
        let mut exemption = ExemptionInterval::new(tenant_id, start, end)?;
        if let Some(description) = description {
            exemption = exemption.with_description(description);
        }

        self.store.add_exemption(&exemption).await?;

        let profile = self.store.tax_profile(tenant_id).await?;
        let charges = self.store.charges_for_tenant(tenant_id).await?;

        let outcome = reconcile_exemption(&profile, &exemption, &charges)?;

        if !outcome.credit_notes.is_empty() {
            let batch: Vec<Charge> = outcome
                .credit_notes
                .iter()
                .cloned()
                .map(|note| note.into_charge())
                .collect::<Result<_, _>>()?;
            self.store.append_charges(&batch).await?;
        }

        info!(
            tenant = %tenant_id,
            exemption = %exemption.id,
            scanned = outcome.invoices_scanned,
            credited = outcome.credit_notes.len(),
            total = %outcome.total_credited,
            "exemption registered"
        );

        Ok(outcome)
    }
}
