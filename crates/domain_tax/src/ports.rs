//! Tax domain port
//!
//! Adapters implement `TaxStore` next to `LedgerStore`; the exemption
//! service needs both, since registering an exemption both persists the
//! interval and appends credit notes to the ledger.

use async_trait::async_trait;

use core_kernel::{DomainPort, PortError, TenantId};

use crate::exemption::{ExemptionInterval, TaxProfile};

/// Access to tenant tax configuration
#[async_trait]
pub trait TaxStore: DomainPort {
    /// The tenant's tax profile: commencement date and every exemption
    ///
    /// A tenant unknown to the tax regime still has a profile (with no
    /// commencement date); adapters return `NotFound` only when the
    /// tenant itself does not exist.
    async fn tax_profile(&self, tenant_id: TenantId) -> Result<TaxProfile, PortError>;

    /// Persists a new exemption interval
    async fn add_exemption(&self, exemption: &ExemptionInterval) -> Result<(), PortError>;
}
