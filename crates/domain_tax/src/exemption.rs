//! Exemption intervals and the per-tenant tax profile
//!
//! An exemption is a closed date range during which SST does not apply
//! to a tenant. Exemptions are immutable once created: they are only
//! ever added, never edited, which is what makes retroactive
//! reconciliation deterministic. Intervals may overlap or sit apart;
//! proration treats a day as exempt if any interval covers it.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{DateRange, ExemptionId, TemporalError, TenantId};

/// A period during which tax does not apply to a tenant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExemptionInterval {
    /// Unique identifier
    pub id: ExemptionId,
    /// Owning tenant
    pub tenant_id: TenantId,
    /// The exempt period (closed, both endpoints inclusive)
    pub period: DateRange,
    /// Why the exemption was granted
    pub description: Option<String>,
    /// Reference to the supporting exemption letter
    pub evidence_ref: Option<String>,
    /// When the record was created
    pub created_at: DateTime<Utc>,
}

impl ExemptionInterval {
    /// Creates a new exemption, rejecting inverted date ranges
    pub fn new(
        tenant_id: TenantId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Self, TemporalError> {
        Ok(Self {
            id: ExemptionId::new_v7(),
            tenant_id,
            period: DateRange::new(start, end)?,
            description: None,
            evidence_ref: None,
            created_at: Utc::now(),
        })
    }

    /// Sets the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the evidence reference
    pub fn with_evidence(mut self, evidence_ref: impl Into<String>) -> Self {
        self.evidence_ref = Some(evidence_ref.into());
        self
    }

    /// Returns true if the given day falls inside this exemption
    pub fn covers(&self, day: NaiveDate) -> bool {
        self.period.contains(day)
    }
}

/// A tenant's tax configuration: commencement date plus exemption set
///
/// The commencement date is the boundary before which tax never applies,
/// regardless of exemptions. A tenant with no commencement date is
/// outside the tax regime entirely and owes zero tax; that is a normal
/// state, not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxProfile {
    /// Owning tenant
    pub tenant_id: TenantId,
    /// Date from which the tax regime applies, if at all
    pub commencement_date: Option<NaiveDate>,
    /// Every exemption granted to the tenant
    pub exemptions: Vec<ExemptionInterval>,
}

impl TaxProfile {
    /// A profile outside the tax regime (no commencement date)
    pub fn untaxed(tenant_id: TenantId) -> Self {
        Self {
            tenant_id,
            commencement_date: None,
            exemptions: Vec::new(),
        }
    }

    /// A profile with tax commencing on the given date
    pub fn commencing(tenant_id: TenantId, date: NaiveDate) -> Self {
        Self {
            tenant_id,
            commencement_date: Some(date),
            exemptions: Vec::new(),
        }
    }

    /// Adds an exemption interval
    pub fn with_exemption(mut self, exemption: ExemptionInterval) -> Self {
        self.exemptions.push(exemption);
        self
    }

    /// Returns true if any exemption covers the given day
    pub fn is_exempt_on(&self, day: NaiveDate) -> bool {
        self.exemptions.iter().any(|e| e.covers(day))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_exemption_rejects_inverted_range() {
        let result = ExemptionInterval::new(TenantId::new(), d(2024, 2, 1), d(2024, 1, 1));
        assert!(result.is_err());
    }

    #[test]
    fn test_exemption_covers_endpoints() {
        let exemption =
            ExemptionInterval::new(TenantId::new(), d(2024, 1, 10), d(2024, 1, 20)).unwrap();

        assert!(exemption.covers(d(2024, 1, 10)));
        assert!(exemption.covers(d(2024, 1, 20)));
        assert!(!exemption.covers(d(2024, 1, 9)));
        assert!(!exemption.covers(d(2024, 1, 21)));
    }

    #[test]
    fn test_profile_union_of_exemptions() {
        let tenant = TenantId::new();
        let profile = TaxProfile::commencing(tenant, d(2024, 1, 1))
            .with_exemption(ExemptionInterval::new(tenant, d(2024, 1, 5), d(2024, 1, 15)).unwrap())
            .with_exemption(ExemptionInterval::new(tenant, d(2024, 1, 10), d(2024, 1, 25)).unwrap());

        assert!(profile.is_exempt_on(d(2024, 1, 12)));
        assert!(profile.is_exempt_on(d(2024, 1, 25)));
        assert!(!profile.is_exempt_on(d(2024, 1, 26)));
    }

    #[test]
    fn test_untaxed_profile() {
        let profile = TaxProfile::untaxed(TenantId::new());
        assert!(profile.commencement_date.is_none());
        assert!(!profile.is_exempt_on(d(2024, 1, 1)));
    }
}
